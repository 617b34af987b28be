use std::fmt;

use crate::{
    resolver::{DeclaredMemberRc, MemberKind},
    Error, Result,
};

/// A request to find one member of a class
///
/// Built with [`Query::field`] or [`Query::method`] and refined with the `with_*` builders.
/// A query without descriptor succeeds only if the name alone is unique.
///
/// # Example
///
/// ```rust
/// use remapper::resolver::{MemberKind, Query};
///
/// let query = Query::method("compute").with_descriptor("(I)I").strict(true);
/// assert_eq!(query.kind, MemberKind::Method);
/// assert_eq!(query.to_string(), "compute (I)I");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Field or method
    pub kind: MemberKind,
    /// Simple member name
    pub name: String,
    /// Full or partial descriptor, if known
    pub descriptor: Option<String>,
    /// Require an exact descriptor match instead of a parameter-list match
    pub strict: bool,
}

impl Query {
    /// Query for a field by name
    pub fn field(name: impl Into<String>) -> Self {
        Query {
            kind: MemberKind::Field,
            name: name.into(),
            descriptor: None,
            strict: false,
        }
    }

    /// Query for a method by name
    pub fn method(name: impl Into<String>) -> Self {
        Query {
            kind: MemberKind::Method,
            name: name.into(),
            descriptor: None,
            strict: false,
        }
    }

    /// Attach a descriptor to the query
    ///
    /// ## Arguments
    /// * 'descriptor' - A type descriptor for fields; a full or partial method descriptor
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    /// Attach an optional descriptor to the query
    #[must_use]
    pub fn with_optional_descriptor(mut self, descriptor: Option<&str>) -> Self {
        self.descriptor = descriptor.map(str::to_string);
        self
    }

    /// Set strict matching
    ///
    /// ## Arguments
    /// * 'strict' - `true` to compare whole descriptors, `false` to compare parameter lists
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.descriptor {
            Some(descriptor) => write!(f, "{} {}", self.name, descriptor),
            None => f.write_str(&self.name),
        }
    }
}

/// Outcome of a single resolution
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// Exactly one member matched
    Found(DeclaredMemberRc),
    /// No member matched
    NotFound {
        /// What was searched for
        kind: MemberKind,
        /// The searched name, with descriptor if one was given
        name: String,
        /// The class that was searched
        parent: String,
    },
    /// More than one member matched
    Ambiguous {
        /// How many candidates were left
        count: usize,
        /// The searched name
        name: String,
        /// The class that was searched
        parent: String,
    },
}

impl MatchOutcome {
    /// Returns `true` if a member was found
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, MatchOutcome::Found(_))
    }

    /// The found member, if any
    #[must_use]
    pub fn found(&self) -> Option<&DeclaredMemberRc> {
        match self {
            MatchOutcome::Found(member) => Some(member),
            _ => None,
        }
    }

    /// Convert into a `Result` for `?` propagation
    ///
    /// # Errors
    /// Returns [`Error::TargetNotFound`] for [`MatchOutcome::NotFound`] and
    /// [`Error::AmbiguousDefinition`] for [`MatchOutcome::Ambiguous`]
    pub fn into_result(self) -> Result<DeclaredMemberRc> {
        match self {
            MatchOutcome::Found(member) => Ok(member),
            MatchOutcome::NotFound { kind, name, parent } => Err(Error::TargetNotFound {
                kind: kind.to_string(),
                name,
                parent,
            }),
            MatchOutcome::Ambiguous {
                count,
                name,
                parent,
            } => Err(Error::AmbiguousDefinition(format!(
                "Found {} members named {} in class {}!",
                count, name, parent
            ))),
        }
    }
}
