//! Rename table loading and lookups.
//!
//! A rename table records, for every renamed class, its new internal name and the new names of
//! its fields and methods. The text form is line oriented:
//!
//! ```text
//! pkg/Foo a/a
//! 	count b
//! 	compute ()I c
//! 	compute (I)I d
//! ```
//!
//! An unindented two-token line opens a class (`original renamed`). Lines indented with a tab
//! or space belong to the class above them: two tokens rename a field (`original renamed`),
//! three tokens rename a method (`original descriptor renamed`). There are no comments, no
//! escaping and no blank lines; anything else fails the whole load with
//! [`crate::Error::Malformed`].
//!
//! Methods are keyed by name plus full descriptor, so overloads can only be told apart by
//! their descriptor. Lookups that leave more than one candidate fail with
//! [`crate::Error::AmbiguousDefinition`] instead of picking one.
//!
//! # Key Components
//!
//! - [`RenameTable`] - The loaded table with forward, reverse and descriptor lookups
//! - [`RenameRecord`] - Rename data of one class
//! - [`MemberKey`] - Field or method key within a record

mod loader;
mod record;
mod table;

pub use record::{MemberKey, RenameRecord, RenameRecordRc};
pub use table::RenameTable;
