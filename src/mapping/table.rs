use std::{borrow::Cow, path::Path, str::FromStr};

use crossbeam_skiplist::SkipMap;

use crate::{
    descriptor::remap,
    file::MappingSource,
    mapping::{loader::TableLoader, MemberKey, RenameRecordRc},
    Error, Result,
};

/// The loaded rename table
///
/// Maps original internal class names to their [`crate::mapping::RenameRecord`]. Built once,
/// then only read; all lookups take `&self` and the table is `Send + Sync`, so a single
/// instance can serve any number of concurrent resolvers.
///
/// Forward lookups are keyed by original name. Reverse lookups (renamed to original) scan all
/// records linearly.
///
/// # Example
///
/// ```rust
/// use remapper::RenameTable;
///
/// let table: RenameTable = "pkg/Foo a/a\n\tcount b\n\tcompute ()I c\n".parse()?;
/// assert_eq!(table.resolve_class("pkg/Foo")?, "a/a");
/// assert_eq!(table.resolve_member("pkg/Foo", "compute", Some("()I"))?, "c");
/// assert_eq!(table.map_method_descriptor("(Lpkg/Foo;)V")?, "(La/a;)V");
/// # Ok::<(), remapper::Error>(())
/// ```
pub struct RenameTable {
    classes: SkipMap<String, RenameRecordRc>,
    normalize_dotted: bool,
}

impl RenameTable {
    /// Build a table from an ordered sequence of lines
    ///
    /// ## Arguments
    /// * 'lines' - The lines of the rename table, without terminators
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] naming the first offending line. No partially built table
    /// is returned.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut loader = TableLoader::new();
        for line in lines {
            loader.feed(line.as_ref())?;
        }

        Ok(RenameTable {
            classes: loader.finish(),
            normalize_dotted: true,
        })
    }

    /// Build a table from a loaded input source
    ///
    /// ## Arguments
    /// * 'source' - The input to read lines from
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the input is not UTF-8 or a line is malformed
    pub fn from_source(source: &MappingSource) -> Result<Self> {
        Self::from_lines(source.lines()?)
    }

    /// Build a table from an in-memory buffer
    ///
    /// ## Arguments
    /// * 'data' - The raw rename-table text
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the input is not UTF-8 or a line is malformed
    pub fn from_mem(data: Vec<u8>) -> Result<Self> {
        Self::from_source(&MappingSource::from_mem(data))
    }

    /// Build a table from a file on disk, which gets memory-mapped for the load
    ///
    /// ## Arguments
    /// * 'path' - Path to the rename-table file
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the file cannot be opened, or [`Error::Malformed`] if
    /// its content is invalid
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_source(&MappingSource::from_file(path)?)
    }

    /// Control whether dotted names (`pkg.Foo`) are accepted as internal names (`pkg/Foo`)
    ///
    /// Enabled by default.
    ///
    /// ## Arguments
    /// * 'enabled' - `true` to rewrite `.` to `/` in every incoming class name
    #[must_use]
    pub fn with_dotted_names(mut self, enabled: bool) -> Self {
        self.normalize_dotted = enabled;
        self
    }

    fn normalize<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.normalize_dotted && name.contains('.') {
            Cow::Owned(name.replace('.', "/"))
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Number of classes in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if the table holds no classes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The record of a class, by original name
    ///
    /// ## Arguments
    /// * 'class' - The original internal class name
    pub fn get(&self, class: &str) -> Option<RenameRecordRc> {
        let class = self.normalize(class);
        self.classes
            .get(class.as_ref())
            .map(|entry| entry.value().clone())
    }

    /// All records, ordered by original class name
    pub fn iter(&self) -> impl Iterator<Item = RenameRecordRc> + '_ {
        self.classes.iter().map(|entry| entry.value().clone())
    }

    fn record(&self, class: &str) -> Result<RenameRecordRc> {
        self.get(class).ok_or_else(|| mapping_not_found!(class))
    }

    fn record_reverse(&self, renamed: &str) -> Result<RenameRecordRc> {
        let renamed = self.normalize(renamed);
        self.iter()
            .find(|record| record.renamed == renamed.as_ref())
            .ok_or_else(|| mapping_not_found!(renamed))
    }

    /// The renamed name of a class
    ///
    /// ## Arguments
    /// * 'class' - The original internal class name
    ///
    /// # Errors
    /// Returns [`Error::MappingNotFound`] if the class is not in the table
    pub fn resolve_class(&self, class: &str) -> Result<String> {
        Ok(self.record(class)?.renamed.clone())
    }

    /// The original name of a renamed class
    ///
    /// ## Arguments
    /// * 'renamed' - The renamed internal class name
    ///
    /// # Errors
    /// Returns [`Error::MappingNotFound`] if no class was renamed to `renamed`
    pub fn resolve_class_reverse(&self, renamed: &str) -> Result<String> {
        Ok(self.record_reverse(renamed)?.original.clone())
    }

    /// The renamed name of a member
    ///
    /// Without a descriptor the name alone has to identify the member. A full descriptor must
    /// equal the stored one; a partial one (`(...)` without return type) is compared against
    /// the stored parameter list.
    ///
    /// ## Arguments
    /// * 'class'      - The original internal name of the owning class
    /// * 'member'     - The original member name
    /// * 'descriptor' - Optional full or partial method descriptor
    ///
    /// # Errors
    /// Returns [`Error::MappingNotFound`] if the class or member is unknown, and
    /// [`Error::AmbiguousDefinition`] if the member cannot be identified uniquely
    pub fn resolve_member(
        &self,
        class: &str,
        member: &str,
        descriptor: Option<&str>,
    ) -> Result<String> {
        let record = self.record(class)?;
        let renamed = record.resolve(member, descriptor)?;
        Ok(renamed.to_string())
    }

    /// The renamed name of a field
    ///
    /// Only the field key is consulted, so a method sharing the field's name does not make the
    /// lookup ambiguous.
    ///
    /// ## Arguments
    /// * 'class' - The original internal name of the owning class
    /// * 'field' - The original field name
    ///
    /// # Errors
    /// Returns [`Error::MappingNotFound`] if the class or field is unknown
    pub fn resolve_field(&self, class: &str, field: &str) -> Result<String> {
        let record = self.record(class)?;
        match record.get(&MemberKey::field(field)) {
            Some(renamed) => Ok(renamed.to_string()),
            None => Err(mapping_not_found!(record.original, field)),
        }
    }

    /// The renamed name of a method with a known descriptor
    ///
    /// # Errors
    /// See [`RenameTable::resolve_member`]
    pub fn resolve_method(&self, class: &str, method: &str, descriptor: &str) -> Result<String> {
        self.resolve_member(class, method, Some(descriptor))
    }

    /// The original key of a renamed member
    ///
    /// ## Arguments
    /// * 'renamed_class'  - The renamed internal class name
    /// * 'renamed_member' - The renamed member name
    ///
    /// # Errors
    /// Returns [`Error::MappingNotFound`] if either name is unknown
    pub fn resolve_member_reverse(
        &self,
        renamed_class: &str,
        renamed_member: &str,
    ) -> Result<MemberKey> {
        let record = self.record_reverse(renamed_class)?;
        match record.reverse(renamed_member) {
            Some(key) => Ok(key.clone()),
            None => Err(mapping_not_found!(renamed_class, renamed_member)),
        }
    }

    fn map_descriptor(&self, descriptor: &str) -> Result<String> {
        remap(descriptor, |class| self.resolve_class(class))
    }

    /// Rewrite all class references in a method descriptor to their renamed form
    ///
    /// Classes the table does not know are left unchanged.
    ///
    /// ## Arguments
    /// * 'descriptor' - A full or partial method descriptor
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if a class reference is not terminated
    pub fn map_method_descriptor(&self, descriptor: &str) -> Result<String> {
        self.map_descriptor(descriptor)
    }

    /// Rewrite the class reference in a field descriptor to its renamed form
    ///
    /// # Errors
    /// See [`RenameTable::map_method_descriptor`]
    pub fn map_type_descriptor(&self, descriptor: &str) -> Result<String> {
        self.map_descriptor(descriptor)
    }

    /// The renamed name of a class, or the name itself if the table does not track it
    #[must_use]
    pub fn class_or_identity(&self, class: &str) -> String {
        match self.get(class) {
            Some(record) => record.renamed.clone(),
            None => self.normalize(class).into_owned(),
        }
    }

    /// The renamed name of a field, or the name itself if the table does not track it
    #[must_use]
    pub fn field_or_identity(&self, class: &str, field: &str) -> String {
        self.resolve_field(class, field)
            .unwrap_or_else(|_| field.to_string())
    }

    /// The renamed name of a member, or the name itself if the table does not track it
    ///
    /// # Errors
    /// Returns [`Error::AmbiguousDefinition`] if the member is tracked but cannot be
    /// identified uniquely; only a missing mapping falls back to identity.
    pub fn member_or_identity(
        &self,
        class: &str,
        member: &str,
        descriptor: Option<&str>,
    ) -> Result<String> {
        match self.resolve_member(class, member, descriptor) {
            Err(Error::MappingNotFound(_)) => Ok(member.to_string()),
            other => other,
        }
    }
}

impl FromStr for RenameTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_lines(s.lines())
    }
}

impl std::fmt::Debug for RenameTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenameTable")
            .field("classes", &self.classes.len())
            .field("normalize_dotted", &self.normalize_dotted)
            .finish()
    }
}
