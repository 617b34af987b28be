// Copyright 2025 The remapper Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # remapper
//!
//! Rename-table loading and symbol resolution for patching renamed JVM programs.
//!
//! Shipped builds of a program frequently carry systematically renamed identifiers, while
//! patches are written against the readable development names. `remapper` bridges the two: it
//! loads the rename table that relates both spellings, resolves a possibly partial reference
//! (a name, optionally with a descriptor) to exactly one declared member, and traces overrides
//! back to the declaration the rename table is keyed by.
//!
//! ## Features
//!
//! - **📦 Efficient loading** - Memory-mapped rename tables, parsed line by line into an immutable index
//! - **🔍 Forward and reverse lookups** - Classes, fields and methods, plus whole-descriptor remapping
//! - **🎯 Precise resolution** - Loose-when-unique matching, never a guess between overloads
//! - **🧬 Override tracing** - Single-inheritance walks to original declarations and compiler bridges
//! - **⚡ Concurrent** - Tables and resolvers are `Send + Sync`; batches resolve in parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use remapper::prelude::*;
//!
//! let table: RenameTable = "pkg/Foo a/a\n\tcount b\n\tcompute ()I c\n\tcompute (I)I d\n".parse()?;
//!
//! assert_eq!(table.resolve_class("pkg/Foo")?, "a/a");
//! assert_eq!(table.resolve_member("pkg/Foo", "count", None)?, "b");
//! assert_eq!(table.resolve_member("pkg/Foo", "compute", Some("()I"))?, "c");
//! assert!(matches!(
//!     table.resolve_member("pkg/Foo", "compute", None),
//!     Err(Error::AmbiguousDefinition(_))
//! ));
//! # Ok::<(), remapper::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`descriptor`] - Descriptor encoding, decoding and class-name remapping
//! - [`mapping`] - The rename table and its loader
//! - [`resolver`] - Host-supplied member facts and the two-tier symbol resolver
//! - [`hierarchy`] - Override-chain walking and the in-memory [`hierarchy::ClassPool`]
//! - [`target`] - Patch-target resolution tying the pieces together
//! - [`config`] - [`ResolverOptions`] and option-map parsing
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Lookups fail with a typed
//! error instead of guessing:
//!
//! ```rust
//! use remapper::{Error, RenameTable};
//!
//! let table: RenameTable = "pkg/Foo a/a\n".parse()?;
//! match table.resolve_class("pkg/Bar") {
//!     Ok(renamed) => println!("renamed to {}", renamed),
//!     Err(Error::MappingNotFound(name)) => println!("{} is not renamed", name),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! # Ok::<(), remapper::Error>(())
//! ```
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! # Install fuzzing tools
//! cargo install cargo-fuzz
//!
//! # Run fuzzer
//! cargo +nightly fuzz run rename_table --release
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use remapper::prelude::*;
///
/// let table: RenameTable = "pkg/Foo a/a\n".parse()?;
/// assert_eq!(table.class_or_identity("pkg/Foo"), "a/a");
/// # Ok::<(), remapper::Error>(())
/// ```
pub mod prelude;

/// Raw rename-table input from files or memory
pub mod file;

/// Descriptor codec
///
/// Encodes [`descriptor::TypeShape`] and [`descriptor::MethodShape`] values into their compact
/// string form, parses them back, and rewrites embedded class references through a mapping
/// function.
///
/// # Examples
///
/// ```rust
/// use remapper::descriptor::{is_partial, param_list};
///
/// assert_eq!(param_list("(ILpkg/Foo;)V"), "(ILpkg/Foo;)");
/// assert!(is_partial("(I)"));
/// ```
pub mod descriptor;

/// Rename tables
///
/// # Key Types
///
/// - [`mapping::RenameTable`] - The loaded table
/// - [`mapping::RenameRecord`] - Rename data of one class
/// - [`mapping::MemberKey`] - Key of a field or method within a record
pub mod mapping;

/// Symbol resolution
///
/// # Key Types
///
/// - [`resolver::ClassInfo`] / [`resolver::DeclaredMember`] - Host-supplied facts
/// - [`resolver::Query`] - What to look for
/// - [`resolver::MatchOutcome`] - What was found
/// - [`resolver::SymbolResolver`] - The matching algorithm
pub mod resolver;

/// Override-chain walking
pub mod hierarchy;

/// Patch-target resolution
pub mod target;

/// Resolver configuration
pub mod config;

/// `remapper` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use remapper::{Result, RenameTable};
///
/// fn renamed_class(table: &RenameTable, name: &str) -> Result<String> {
///     table.resolve_class(name)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `remapper` Error type
///
/// The main error type for all operations in this crate. Provides detailed error information
/// for table loading, lookups and override walks.
pub use error::Error;

/// The loaded rename table, see [`mapping::RenameTable`]
pub use mapping::RenameTable;

/// Resolver configuration, see [`config::ResolverOptions`]
pub use config::ResolverOptions;

/// Patch-target resolution, see [`target::TargetResolver`]
pub use target::TargetResolver;
