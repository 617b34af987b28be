use dashmap::{DashMap, DashSet};

use crate::{
    hierarchy::{ClassSource, OverridePredicate, SignatureOverrides},
    resolver::{ClassInfo, ClassInfoRc, DeclaredMember},
};

/// Thread-safe in-memory collection of class facts
///
/// Serves as both [`ClassSource`] and [`OverridePredicate`] for hosts that describe their
/// classes up front. Classes are kept in insertion order for iteration and indexed by name for
/// lookups. Overrides that the descriptors do not reveal (generic erasure) can be recorded
/// with [`ClassPool::link_override`]; a recorded link always counts as an override, every
/// other pair is decided by [`SignatureOverrides`].
pub struct ClassPool {
    /// All classes, in insertion order
    classes: boxcar::Vec<ClassInfoRc>,
    /// Lookup by internal name
    by_name: DashMap<String, ClassInfoRc>,
    /// Explicit override links, as (overrider, overridden) member signatures
    links: DashSet<(String, String)>,
}

impl ClassPool {
    /// Create an empty pool
    #[must_use]
    pub fn new() -> Self {
        ClassPool {
            classes: boxcar::Vec::new(),
            by_name: DashMap::new(),
            links: DashSet::new(),
        }
    }

    /// Add a class and return it for further member declarations
    ///
    /// A class with the same name replaces the earlier one for lookups.
    ///
    /// ## Arguments
    /// * 'class' - The class to add
    pub fn insert(&self, class: ClassInfoRc) -> ClassInfoRc {
        if self
            .by_name
            .insert(class.name.clone(), class.clone())
            .is_some()
        {
            log::warn!("class {} registered twice, keeping the later one", class.name);
        }
        self.classes.push(class.clone());
        class
    }

    /// The class named `name`
    ///
    /// ## Arguments
    /// * 'name' - The internal class name
    pub fn get(&self, name: &str) -> Option<ClassInfoRc> {
        self.by_name.get(name).map(|entry| entry.value().clone())
    }

    /// Number of distinct class names in the pool
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if the pool holds no classes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All classes in insertion order, replaced ones included
    pub fn iter(&self) -> impl Iterator<Item = &ClassInfoRc> {
        self.classes.iter().map(|(_, class)| class)
    }

    /// Record that `overrider` overrides `overridden`
    ///
    /// ## Arguments
    /// * 'overrider'  - The overriding method
    /// * 'overridden' - The method it overrides
    pub fn link_override(&self, overrider: &DeclaredMember, overridden: &DeclaredMember) {
        self.links
            .insert((overrider.to_string(), overridden.to_string()));
    }
}

impl Default for ClassPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassSource for ClassPool {
    fn class(&self, name: &str) -> Option<ClassInfoRc> {
        self.get(name)
    }
}

impl OverridePredicate for ClassPool {
    fn overrides(
        &self,
        overrider: &DeclaredMember,
        overridden: &DeclaredMember,
        context: &ClassInfo,
    ) -> bool {
        self.links
            .contains(&(overrider.to_string(), overridden.to_string()))
            || SignatureOverrides.overrides(overrider, overridden, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Modifiers;

    #[test]
    fn insert_and_lookup() {
        let pool = ClassPool::new();
        assert!(pool.is_empty());

        pool.insert(ClassInfo::new("pkg/Base", None));
        pool.insert(ClassInfo::new("pkg/Child", Some("pkg/Base")));

        assert_eq!(pool.len(), 2);
        assert_eq!(
            pool.class("pkg/Child").unwrap().superclass.as_deref(),
            Some("pkg/Base")
        );
        assert!(pool.class("pkg/Missing").is_none());

        let names: Vec<&str> = pool.iter().map(|class| class.name.as_str()).collect();
        assert_eq!(names, vec!["pkg/Base", "pkg/Child"]);
    }

    #[test]
    fn later_class_wins() {
        let pool = ClassPool::new();
        pool.insert(ClassInfo::new("pkg/Foo", None));
        pool.insert(ClassInfo::new("pkg/Foo", Some("pkg/Base")));

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.iter().count(), 2);
        assert_eq!(
            pool.get("pkg/Foo").unwrap().superclass.as_deref(),
            Some("pkg/Base")
        );
    }

    #[test]
    fn explicit_links_take_precedence() {
        let pool = ClassPool::new();
        let base = pool.insert(ClassInfo::new("pkg/Base", None));
        let child = pool.insert(ClassInfo::new("pkg/Child", Some("pkg/Base")));

        let generic = base.declare_method("accept", "(Ljava/lang/Object;)V", Modifiers::PUBLIC);
        let specific = child.declare_method("accept", "(Ljava/lang/String;)V", Modifiers::PUBLIC);

        assert!(!pool.overrides(&specific, &generic, &child));
        pool.link_override(&specific, &generic);
        assert!(pool.overrides(&specific, &generic, &child));
        assert!(!pool.overrides(&generic, &specific, &base));
    }
}
