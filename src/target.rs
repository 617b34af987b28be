//! Patch-target resolution.
//!
//! Combines the pieces of this crate into the lookups a patch author actually needs: given a
//! class name, or a class plus a member name and optional descriptor, find the declared
//! symbol (when the host knows the class) and both its original and renamed spelling.
//!
//! Classes the host does not know are *unverifiable*: their names still pass through the
//! rename table, but members can only be addressed with an explicit descriptor, since there is
//! nothing to resolve a bare name against.
//!
//! # Examples
//!
//! ```rust
//! use remapper::prelude::*;
//!
//! let table: RenameTable = "pkg/Foo a/a\n\tcompute (I)I d\n".parse()?;
//! let pool = ClassPool::new();
//! let foo = pool.insert(ClassInfo::new("pkg/Foo", None));
//! foo.declare_method("compute", "()I", Modifiers::PUBLIC);
//! foo.declare_method("compute", "(I)I", Modifiers::PUBLIC);
//!
//! let options = ResolverOptions::default();
//! let targets = TargetResolver::new(&pool, &pool, Some(&table), &options);
//! let parent = targets.class("pkg.Foo");
//! let method = targets.method(&parent, "compute", Some("(I)"), false, false)?;
//! assert_eq!(parent.name_mapped, "a/a");
//! assert_eq!(method.descriptor, "(I)I");
//! assert_eq!(method.name_mapped, "d");
//! # Ok::<(), remapper::Error>(())
//! ```

use std::{borrow::Cow, sync::Arc};

use crate::{
    config::ResolverOptions,
    descriptor::remap,
    hierarchy::{ClassSource, HierarchyWalker, OverridePredicate},
    mapping::RenameTable,
    resolver::{ClassInfoRc, DeclaredMemberRc, Query, SymbolResolver},
    Error::{self, AmbiguousDefinition, TargetNotFound},
    Result,
};

/// A resolved class
#[derive(Debug, Clone)]
pub struct ClassTarget {
    /// Original internal name
    pub name: String,
    /// Renamed internal name, equal to `name` if the class is not renamed
    pub name_mapped: String,
    /// The host's facts about the class, `None` if the class is unverifiable
    pub info: Option<ClassInfoRc>,
}

impl ClassTarget {
    /// Returns `true` if the host knows this class
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.info.is_some()
    }

    /// Original type descriptor, `L<name>;`
    #[must_use]
    pub fn descriptor(&self) -> String {
        format!("L{};", self.name)
    }

    /// Renamed type descriptor, `L<name_mapped>;`
    #[must_use]
    pub fn descriptor_mapped(&self) -> String {
        format!("L{};", self.name_mapped)
    }
}

/// A resolved method
#[derive(Debug, Clone)]
pub struct MethodTarget {
    /// The class that was searched
    pub parent: ClassTarget,
    /// Original method name
    pub name: String,
    /// Original method descriptor
    pub descriptor: String,
    /// Renamed method name
    pub name_mapped: String,
    /// Method descriptor with all tracked classes renamed
    pub descriptor_mapped: String,
    /// The declared method, `None` if the parent is unverifiable
    pub member: Option<DeclaredMemberRc>,
}

/// A resolved field
#[derive(Debug, Clone)]
pub struct FieldTarget {
    /// The class that was searched
    pub parent: ClassTarget,
    /// Original field name
    pub name: String,
    /// Original type descriptor
    pub descriptor: String,
    /// Renamed field name
    pub name_mapped: String,
    /// Type descriptor with its class renamed, if tracked
    pub descriptor_mapped: String,
    /// The declared field, `None` if the parent is unverifiable
    pub member: Option<DeclaredMemberRc>,
}

/// Resolves patch targets against the host's classes and the rename table
///
/// Without a rename table every renamed spelling equals the original one.
pub struct TargetResolver<'a> {
    source: &'a dyn ClassSource,
    walker: HierarchyWalker<'a>,
    table: Option<&'a RenameTable>,
    unmapped_warning: bool,
    anonymous_class_warning: bool,
    normalize_dotted_names: bool,
}

impl<'a> TargetResolver<'a> {
    /// Create a new target resolver
    ///
    /// ## Arguments
    /// * 'source'    - Supplies classes by name
    /// * 'predicate' - Decides whether one method overrides another
    /// * 'table'     - The rename table, if renaming is enabled
    /// * 'options'   - Depth bound and warning toggles
    pub fn new(
        source: &'a dyn ClassSource,
        predicate: &'a dyn OverridePredicate,
        table: Option<&'a RenameTable>,
        options: &ResolverOptions,
    ) -> Self {
        TargetResolver {
            source,
            walker: HierarchyWalker::new(source, predicate)
                .with_max_depth(options.max_hierarchy_depth),
            table,
            unmapped_warning: options.unmapped_warning,
            anonymous_class_warning: options.anonymous_class_warning,
            normalize_dotted_names: options.normalize_dotted_names,
        }
    }

    /// The walker used for override lookups
    #[must_use]
    pub fn walker(&self) -> &HierarchyWalker<'a> {
        &self.walker
    }

    fn normalize<'n>(&self, name: &'n str) -> Cow<'n, str> {
        if self.normalize_dotted_names && name.contains('.') {
            Cow::Owned(name.replace('.', "/"))
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Resolve a class by name
    ///
    /// ## Arguments
    /// * 'name' - The original class name, internal or (if enabled) dotted
    pub fn class(&self, name: &str) -> ClassTarget {
        let name = self.normalize(name).into_owned();
        let info = self.source.class(&name);
        if info.is_none() {
            log::debug!("class {} is unknown to the host, treating it as unverifiable", name);
        }

        self.class_target(name, info)
    }

    /// Resolve an inner class, given its outermost class and the path of inner names
    ///
    /// Each inner name is looked up as `<enclosing>$<inner>`. A numeric name denotes an
    /// anonymous class, which the host cannot describe: from there on the target is
    /// unverifiable, and the remaining names are appended without lookup. Empty names are
    /// skipped.
    ///
    /// ## Arguments
    /// * 'name'  - The outermost class name, internal or (if enabled) dotted
    /// * 'inner' - The inner class names, outermost first
    ///
    /// # Errors
    /// Returns [`Error::TargetNotFound`] if the host knows the enclosing class but not the
    /// named inner class
    pub fn inner_class(&self, name: &str, inner: &[&str]) -> Result<ClassTarget> {
        let mut name = self.normalize(name).into_owned();
        let mut info = self.source.class(&name);
        let mut verifiable = true;

        for inner_name in inner.iter().filter(|inner_name| !inner_name.is_empty()) {
            let enclosing = name.len();
            name.push('$');
            name.push_str(inner_name);

            if !verifiable {
                continue;
            }

            if inner_name.parse::<u32>().is_ok() {
                if self.anonymous_class_warning {
                    log::warn!(
                        "anonymous class {} cannot be verified, its existence is not guaranteed",
                        name
                    );
                } else {
                    log::debug!("anonymous class {} cannot be verified", name);
                }
                verifiable = false;
                info = None;
                continue;
            }

            if info.is_some() {
                info = self.source.class(&name);
                if info.is_none() {
                    return Err(TargetNotFound {
                        kind: "class".to_string(),
                        name: (*inner_name).to_string(),
                        parent: name[..enclosing].to_string(),
                    });
                }
            }
        }

        Ok(self.class_target(name, info))
    }

    fn class_target(&self, name: String, info: Option<ClassInfoRc>) -> ClassTarget {
        let name_mapped = match self.table {
            Some(table) => table.class_or_identity(&name),
            None => name.clone(),
        };

        ClassTarget {
            name,
            name_mapped,
            info,
        }
    }

    /// Resolve a method of `parent`
    ///
    /// Strict matching only applies if a descriptor is given. With `bridge`, the
    /// compiler-generated bridge of the resolved method is returned instead.
    ///
    /// The renamed name is looked up for the resolved signature in `parent` first, then for the
    /// original declaration the override chain leads to, and falls back to the original name.
    ///
    /// ## Arguments
    /// * 'parent'     - The class to search
    /// * 'name'       - The method name
    /// * 'descriptor' - Full or partial method descriptor, if known
    /// * 'strict'     - Compare whole descriptors instead of parameter lists
    /// * 'bridge'     - Return the bridge of the resolved method
    ///
    /// # Errors
    /// Returns [`Error::AmbiguousDefinition`] for a name-only lookup in an unverifiable class
    /// or if the method cannot be identified uniquely, and [`Error::TargetNotFound`] if no
    /// method (or no bridge) matches
    pub fn method(
        &self,
        parent: &ClassTarget,
        name: &str,
        descriptor: Option<&str>,
        strict: bool,
        bridge: bool,
    ) -> Result<MethodTarget> {
        let Some(info) = &parent.info else {
            let Some(descriptor) = descriptor else {
                return Err(AmbiguousDefinition(format!(
                    "Cannot use name-based lookups for methods of unverifiable class {}!",
                    parent.name
                )));
            };

            return Ok(MethodTarget {
                parent: parent.clone(),
                name: name.to_string(),
                descriptor: descriptor.to_string(),
                name_mapped: self.member_name(&parent.name, name, Some(descriptor))?,
                descriptor_mapped: self.map_descriptor(descriptor)?,
                member: None,
            });
        };

        let query = Query::method(name)
            .with_optional_descriptor(descriptor)
            .strict(strict && descriptor.is_some());
        let mut member = SymbolResolver::resolve_in(info, &query).into_result()?;
        if bridge {
            member = self.walker.find_bridge(info, &member)?;
        }

        Ok(MethodTarget {
            parent: parent.clone(),
            name: member.name.clone(),
            descriptor: member.descriptor.clone(),
            name_mapped: self.method_name(parent, info, &member)?,
            descriptor_mapped: self.map_descriptor(&member.descriptor)?,
            member: Some(member),
        })
    }

    /// Resolve a field of `parent`
    ///
    /// A given descriptor is used to verify the field found by name.
    ///
    /// ## Arguments
    /// * 'parent'     - The class to search
    /// * 'name'       - The field name
    /// * 'descriptor' - The type descriptor, if known
    ///
    /// # Errors
    /// Returns [`Error::AmbiguousDefinition`] for a name-only lookup in an unverifiable class,
    /// and [`Error::TargetNotFound`] if no field matches
    pub fn field(
        &self,
        parent: &ClassTarget,
        name: &str,
        descriptor: Option<&str>,
    ) -> Result<FieldTarget> {
        let (member, descriptor) = match &parent.info {
            Some(info) => {
                let query = Query::field(name)
                    .with_optional_descriptor(descriptor)
                    .strict(descriptor.is_some());
                let member = SymbolResolver::resolve_in(info, &query).into_result()?;
                let descriptor = member.descriptor.clone();
                (Some(member), descriptor)
            }
            None => match descriptor {
                Some(descriptor) => (None, descriptor.to_string()),
                None => {
                    return Err(AmbiguousDefinition(format!(
                        "Cannot use name-based lookups for fields of unverifiable class {}!",
                        parent.name
                    )))
                }
            },
        };

        Ok(FieldTarget {
            parent: parent.clone(),
            name: name.to_string(),
            name_mapped: self.field_name(&parent.name, name),
            descriptor_mapped: self.map_descriptor(&descriptor)?,
            descriptor,
            member,
        })
    }

    fn field_name(&self, class: &str, name: &str) -> String {
        match self.table {
            Some(table) => table.field_or_identity(class, name),
            None => name.to_string(),
        }
    }

    fn member_name(&self, class: &str, name: &str, descriptor: Option<&str>) -> Result<String> {
        match self.table {
            Some(table) => table.member_or_identity(class, name, descriptor),
            None => Ok(name.to_string()),
        }
    }

    /// Renamed name of a resolved method, following overrides back to their declaration
    fn method_name(
        &self,
        parent: &ClassTarget,
        info: &ClassInfoRc,
        member: &DeclaredMemberRc,
    ) -> Result<String> {
        let Some(table) = self.table else {
            return Ok(member.name.clone());
        };

        match table.resolve_member(&parent.name, &member.name, Some(&member.descriptor)) {
            Err(Error::MappingNotFound(_)) => {}
            other => return other,
        }

        let original = self.walker.find_original_declaration(info, member)?;
        if Arc::ptr_eq(&original, member) {
            return Ok(member.name.clone());
        }

        match original.declaring_class().name() {
            Some(owner) => {
                table.member_or_identity(&owner, &original.name, Some(&original.descriptor))
            }
            None => Ok(member.name.clone()),
        }
    }

    fn map_descriptor(&self, descriptor: &str) -> Result<String> {
        let Some(table) = self.table else {
            return Ok(descriptor.to_string());
        };

        remap(descriptor, |class| {
            let result = table.resolve_class(class);
            if result.is_err() {
                if self.unmapped_warning {
                    log::warn!("class {} in descriptor {} is not renamed", class, descriptor);
                } else {
                    log::debug!("class {} in descriptor {} is not renamed", class, descriptor);
                }
            }
            result
        })
    }
}
