//! Resolver configuration
//!
//! All toggles are passed explicitly to the components that need them; nothing here is read
//! from process-wide state. Options can be built in code or parsed from the string map a build
//! tool hands to an annotation processor.

use std::{collections::HashMap, path::PathBuf};

use crate::{
    hierarchy::MAX_HIERARCHY_DEPTH, mapping::RenameTable, Error::InvalidResource, Result,
};

/// Option key naming the rename-table file
pub const OPTION_MAPPINGS_FILE: &str = "mappingsFile";
/// Option key toggling warnings about untracked classes in descriptors
pub const OPTION_UNMAPPED_WARNING: &str = "unmappedWarning";
/// Option key toggling warnings about anonymous classes that cannot be verified
pub const OPTION_ANONYMOUS_CLASS_WARNING: &str = "anonymousClassWarning";
/// Option key bounding ancestor walks
pub const OPTION_MAX_HIERARCHY_DEPTH: &str = "maxHierarchyDepth";
/// Option key toggling acceptance of dotted class names
pub const OPTION_NORMALIZE_DOTTED_NAMES: &str = "normalizeDottedNames";

/// Configuration for loading a rename table and resolving targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Location of the rename table; `None` disables renaming altogether
    pub mappings_file: Option<PathBuf>,

    /// Warn when a descriptor references a class the rename table does not track (default: true)
    pub unmapped_warning: bool,

    /// Warn when an inner-class path runs through an anonymous class (default: true)
    pub anonymous_class_warning: bool,

    /// Maximum number of ancestors one override walk may visit (default: 256)
    pub max_hierarchy_depth: usize,

    /// Accept `pkg.Foo` wherever `pkg/Foo` is expected (default: true)
    pub normalize_dotted_names: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            mappings_file: None,
            unmapped_warning: true,
            anonymous_class_warning: true,
            max_hierarchy_depth: MAX_HIERARCHY_DEPTH,
            normalize_dotted_names: true,
        }
    }
}

impl ResolverOptions {
    /// Creates a configuration that does not warn about untracked or anonymous classes
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            unmapped_warning: false,
            anonymous_class_warning: false,
            ..Self::default()
        }
    }

    /// Creates a configuration that only accepts internal (slash-separated) class names and
    /// keeps ancestor walks short
    #[must_use]
    pub fn strict() -> Self {
        Self {
            mappings_file: None,
            unmapped_warning: true,
            anonymous_class_warning: true,
            max_hierarchy_depth: 64,
            normalize_dotted_names: false,
        }
    }

    /// Set the rename-table location
    ///
    /// ## Arguments
    /// * 'path' - Path to the rename-table file
    #[must_use]
    pub fn with_mappings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mappings_file = Some(path.into());
        self
    }

    /// Parse options from a processor-style string map
    ///
    /// Missing keys keep their default. Boolean values are either integers (`0` is false,
    /// anything else true) or `true`/`false` in any case; other text counts as false. Keys
    /// this crate does not know are logged and ignored.
    ///
    /// ## Arguments
    /// * 'options' - The option map, key to raw value
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the depth bound is not a non-negative integer
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self> {
        let mut result = Self::default();

        for (key, value) in options {
            match key.as_str() {
                OPTION_MAPPINGS_FILE => result.mappings_file = Some(PathBuf::from(value)),
                OPTION_UNMAPPED_WARNING => result.unmapped_warning = parse_bool(value),
                OPTION_ANONYMOUS_CLASS_WARNING => {
                    result.anonymous_class_warning = parse_bool(value)
                }
                OPTION_NORMALIZE_DOTTED_NAMES => result.normalize_dotted_names = parse_bool(value),
                OPTION_MAX_HIERARCHY_DEPTH => match value.trim().parse::<usize>() {
                    Ok(depth) => result.max_hierarchy_depth = depth,
                    Err(error) => {
                        return Err(malformed_error!(
                            "Invalid value '{}' for option {} - {}",
                            value,
                            key,
                            error
                        ))
                    }
                },
                _ => log::warn!("ignoring unknown option {}={}", key, value),
            }
        }

        Ok(result)
    }

    /// Load the configured rename table
    ///
    /// Returns `Ok(None)` if no mappings file is configured.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidResource`] if the configured file does not exist, and
    /// any load error of [`RenameTable::from_file`] otherwise
    pub fn load_table(&self) -> Result<Option<RenameTable>> {
        let Some(path) = &self.mappings_file else {
            return Ok(None);
        };

        if !path.is_file() {
            return Err(InvalidResource(path.display().to_string()));
        }

        let table = RenameTable::from_file(path)?.with_dotted_names(self.normalize_dotted_names);
        log::debug!("loaded {} renamed classes from {}", table.len(), path.display());
        Ok(Some(table))
    }
}

/// `0` is false, any other integer true; otherwise `true` in any case, everything else false
fn parse_bool(value: &str) -> bool {
    let value = value.trim();
    match value.parse::<i64>() {
        Ok(number) => number != 0,
        Err(_) => value.eq_ignore_ascii_case("true"),
    }
}
