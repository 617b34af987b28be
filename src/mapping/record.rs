use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::{
    descriptor::{is_partial, param_list},
    Error::AmbiguousDefinition,
    Result,
};

/// A reference-counted pointer to a [`RenameRecord`]
pub type RenameRecordRc = Arc<RenameRecord>;

/// Key of a renamed member within its class
///
/// Fields are keyed by name alone, methods by name and full descriptor. Overloads are
/// therefore only distinguishable through their descriptor. The textual form is the one
/// used by the rename-table format: `name` for fields, `name descriptor` for methods.
///
/// Keys order by name first, and a field key sorts before every method key of the same name,
/// which keeps all keys sharing a name next to each other in a [`BTreeMap`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberKey {
    name: String,
    descriptor: Option<String>,
}

impl MemberKey {
    /// Key of a field
    ///
    /// ## Arguments
    /// * 'name' - The original field name
    pub fn field(name: impl Into<String>) -> Self {
        MemberKey {
            name: name.into(),
            descriptor: None,
        }
    }

    /// Key of a method
    ///
    /// ## Arguments
    /// * 'name'       - The original method name
    /// * 'descriptor' - The full method descriptor
    pub fn method(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        MemberKey {
            name: name.into(),
            descriptor: Some(descriptor.into()),
        }
    }

    /// The name portion of the key
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The descriptor portion of the key, `None` for fields
    #[must_use]
    pub fn descriptor(&self) -> Option<&str> {
        self.descriptor.as_deref()
    }

    /// Returns `true` if this key names a method
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.descriptor.is_some()
    }

    /// Check whether this key satisfies a requested descriptor
    ///
    /// A full descriptor has to be equal to the stored one; a partial one (parameter list
    /// only) has to equal the stored parameter list. Field keys never match a descriptor.
    fn matches_descriptor(&self, requested: &str) -> bool {
        match self.descriptor() {
            Some(stored) if is_partial(requested) => param_list(stored) == requested,
            Some(stored) => stored == requested,
            None => false,
        }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.descriptor {
            Some(descriptor) => write!(f, "{} {}", self.name, descriptor),
            None => f.write_str(&self.name),
        }
    }
}

/// Rename data of one class
///
/// Created once while the table is loaded and never modified afterwards; the owning
/// [`crate::RenameTable`] hands out shared references only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRecord {
    /// Original internal name, e.g. `pkg/Foo`
    pub original: String,
    /// Renamed internal name, e.g. `a/a`
    pub renamed: String,
    members: BTreeMap<MemberKey, String>,
}

impl RenameRecord {
    /// Create a record without members
    ///
    /// ## Arguments
    /// * 'original' - The original internal name
    /// * 'renamed'  - The renamed internal name
    pub fn new(original: impl Into<String>, renamed: impl Into<String>) -> Self {
        RenameRecord {
            original: original.into(),
            renamed: renamed.into(),
            members: BTreeMap::new(),
        }
    }

    /// Add a member rename, replacing and returning an earlier one with the same key
    pub(crate) fn insert_member(&mut self, key: MemberKey, renamed: String) -> Option<String> {
        self.members.insert(key, renamed)
    }

    /// Number of renamed members in this class
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// All member renames of this class, ordered by key
    pub fn members(&self) -> impl Iterator<Item = (&MemberKey, &str)> {
        self.members.iter().map(|(key, renamed)| (key, renamed.as_str()))
    }

    /// Exact lookup of a single key
    ///
    /// ## Arguments
    /// * 'key' - The member key
    #[must_use]
    pub fn get(&self, key: &MemberKey) -> Option<&str> {
        self.members.get(key).map(String::as_str)
    }

    /// All keys whose name portion equals `name`
    ///
    /// ## Arguments
    /// * 'name' - The original member name
    pub fn candidates<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = (&'a MemberKey, &'a str)> + use<'a, 'n> {
        self.members
            .range(MemberKey::field(name)..)
            .take_while(move |(key, _)| key.name == name)
            .map(|(key, renamed)| (key, renamed.as_str()))
    }

    /// Two-tier narrowing of the member renames of this class
    ///
    /// All keys named `name` are collected first. If a descriptor is given, only keys whose
    /// descriptor matches survive. Exactly one survivor is the answer.
    ///
    /// ## Arguments
    /// * 'name'       - The original member name
    /// * 'descriptor' - Optional full or partial method descriptor
    ///
    /// # Errors
    /// Returns [`crate::Error::MappingNotFound`] if nothing survives, and
    /// [`crate::Error::AmbiguousDefinition`] if more than one key does.
    pub fn resolve(&self, name: &str, descriptor: Option<&str>) -> Result<&str> {
        let mut candidates: Vec<(&MemberKey, &str)> = self
            .members
            .range(MemberKey::field(name)..)
            .take_while(|(key, _)| key.name == name)
            .map(|(key, renamed)| (key, renamed.as_str()))
            .collect();
        if let Some(requested) = descriptor {
            candidates.retain(|(key, _)| key.matches_descriptor(requested));
        }

        match candidates.as_slice() {
            [] => Err(mapping_not_found!(self.original, name)),
            [(_, renamed)] => Ok(*renamed),
            _ => Err(AmbiguousDefinition(format!(
                "Mapper could not uniquely identify member {}::{}, found {} candidates",
                self.original,
                name,
                candidates.len()
            ))),
        }
    }

    /// Reverse lookup of a renamed member, scanning all keys
    ///
    /// ## Arguments
    /// * 'renamed' - The renamed member name
    #[must_use]
    pub fn reverse(&self, renamed: &str) -> Option<&MemberKey> {
        self.members
            .iter()
            .find(|(_, value)| value.as_str() == renamed)
            .map(|(key, _)| key)
    }
}
