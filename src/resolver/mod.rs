//! Symbol resolution against declared class members.
//!
//! Turns a [`Query`] (a name, an optional descriptor and a strictness flag) into exactly one
//! [`DeclaredMember`] of a class, or a typed [`MatchOutcome`] explaining why that was not
//! possible. The member facts themselves come from the host as [`ClassInfo`] values.
//!
//! # Matching rules
//!
//! - A unique name wins without looking at descriptors, unless the query is strict and
//!   carries one.
//! - Overloads without descriptor are always [`MatchOutcome::Ambiguous`]; there are no
//!   tie-breaking heuristics.
//! - Non-strict method matching compares parameter lists only, so a partial descriptor such
//!   as `(I)` is enough to pick an overload.
//! - Field descriptors are only ever used to verify the single name match.
//!
//! # Examples
//!
//! ```rust
//! use remapper::resolver::{ClassInfo, MatchOutcome, Modifiers, Query, SymbolResolver};
//!
//! let class = ClassInfo::new("pkg/Foo", None);
//! class.declare_method("compute", "()I", Modifiers::PUBLIC);
//! class.declare_method("compute", "(I)I", Modifiers::PUBLIC);
//!
//! let outcome = SymbolResolver::resolve_in(&class, &Query::method("compute"));
//! assert!(matches!(outcome, MatchOutcome::Ambiguous { count: 2, .. }));
//!
//! let query = Query::method("compute").with_descriptor("(I)");
//! let member = SymbolResolver::resolve_in(&class, &query).into_result()?;
//! assert_eq!(member.descriptor, "(I)I");
//! # Ok::<(), remapper::Error>(())
//! ```

mod member;
mod query;
mod symbol;

pub use member::{
    ClassInfo, ClassInfoRc, ClassRef, DeclaredMember, DeclaredMemberRc, MemberKind, Modifiers,
};
pub use query::{MatchOutcome, Query};
pub use symbol::SymbolResolver;
