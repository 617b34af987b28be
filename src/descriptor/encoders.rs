//! Descriptor encoders.
//!
//! Turns [`TypeShape`] and [`MethodShape`] values into their compact string form. The output
//! is what the rename table uses as part of its member keys, so the encoding never elides
//! anything: every array dimension gets its own `[`, and primitive and class types are kept
//! apart by their leading character.

use std::fmt;

use crate::descriptor::{MethodShape, TypeShape};

/// Appends the encoding of `shape` to `buffer`
///
/// ## Arguments
/// * 'shape'  - The type to encode
/// * 'buffer' - The output buffer to write to
pub fn write_type(shape: &TypeShape, buffer: &mut String) {
    match shape {
        TypeShape::Primitive(kind) => buffer.push(kind.code()),
        TypeShape::Class(name) => {
            buffer.push('L');
            buffer.push_str(name);
            buffer.push(';');
        }
        TypeShape::Array(component) => {
            buffer.push('[');
            write_type(component, buffer);
        }
    }
}

/// Encode a field, parameter or return type
///
/// ## Arguments
/// * 'shape' - The type to encode
#[must_use]
pub fn encode_type(shape: &TypeShape) -> String {
    let mut buffer = String::new();
    write_type(shape, &mut buffer);
    buffer
}

/// Encode a method as `(` + parameters + `)` + return type
///
/// ## Arguments
/// * 'method' - The method shape to encode
#[must_use]
pub fn encode_method(method: &MethodShape) -> String {
    let mut buffer = String::from("(");
    for param in &method.params {
        write_type(param, &mut buffer);
    }
    buffer.push(')');
    write_type(&method.ret, &mut buffer);
    buffer
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_type(self))
    }
}

impl fmt::Display for MethodShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_method(self))
    }
}
