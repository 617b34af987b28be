//! Descriptor encoding and decoding.
//!
//! A descriptor is the compact string encoding of a field's type or a method's parameter and
//! return shape. The rename table uses method descriptors as part of its member keys, and the
//! symbol resolver compares descriptors to tell overloads apart, so this module is the common
//! ground for both.
//!
//! # Encoding
//!
//! - One character per primitive kind: `Z C B S I F J D`, and `V` for no value
//! - One leading `[` per array dimension, followed by the component type
//! - `L<internal-name>;` for class references, with `/` as the package separator
//! - Methods: `(` + each parameter in declaration order + `)` + the return type
//!
//! A descriptor that stops after the closing parenthesis is *partial*: it pins down the
//! argument shape but says nothing about the return type.
//!
//! # Examples
//!
//! ```rust
//! use remapper::descriptor::{encode_method, parse_method_descriptor, MethodShape, PrimitiveKind, TypeShape};
//!
//! let shape = MethodShape::new(
//!     vec![TypeShape::array_of(TypeShape::class("java.lang.String"), 1)],
//!     TypeShape::Primitive(PrimitiveKind::Int),
//! );
//! let descriptor = encode_method(&shape);
//! assert_eq!(descriptor, "([Ljava/lang/String;)I");
//! assert_eq!(parse_method_descriptor(&descriptor)?, shape);
//! # Ok::<(), remapper::Error>(())
//! ```

mod encoders;
mod parser;
mod remap;
mod types;

pub use encoders::*;
pub use parser::*;
pub use remap::remap;
pub use types::*;

use crate::Result;

/// Parse a field (or parameter) descriptor
///
/// ## Arguments
/// * 'descriptor' - The descriptor to parse
///
/// # Errors
/// Returns an error if the descriptor is malformed
pub fn parse_type_descriptor(descriptor: &str) -> Result<TypeShape> {
    let mut parser = DescriptorParser::new(descriptor);
    parser.parse_field_descriptor()
}

/// Parse a complete method descriptor
///
/// ## Arguments
/// * 'descriptor' - The descriptor to parse
///
/// # Errors
/// Returns an error if the descriptor is malformed or partial
pub fn parse_method_descriptor(descriptor: &str) -> Result<MethodShape> {
    let mut parser = DescriptorParser::new(descriptor);
    parser.parse_method_descriptor()
}

/// The parameter-list portion of a method descriptor, up to and including `)`
///
/// Returns the whole input if it carries no closing parenthesis.
///
/// ## Arguments
/// * 'descriptor' - A full or partial method descriptor
#[must_use]
pub fn param_list(descriptor: &str) -> &str {
    match descriptor.find(')') {
        Some(end) => &descriptor[..=end],
        None => descriptor,
    }
}

/// The return-type portion of a method descriptor, if there is one
///
/// ## Arguments
/// * 'descriptor' - A full or partial method descriptor
#[must_use]
pub fn return_type(descriptor: &str) -> Option<&str> {
    let end = descriptor.find(')')?;
    let ret = &descriptor[end + 1..];
    if ret.is_empty() {
        None
    } else {
        Some(ret)
    }
}

/// Returns `true` for a method descriptor that stops after its parameter list
///
/// ## Arguments
/// * 'descriptor' - The descriptor to check
#[must_use]
pub fn is_partial(descriptor: &str) -> bool {
    descriptor.starts_with('(') && descriptor.ends_with(')')
}
