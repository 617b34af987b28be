use std::sync::Arc;

use crate::{
    hierarchy::{ClassSource, OverridePredicate},
    resolver::{ClassInfo, ClassInfoRc, DeclaredMemberRc},
    Error::{RecursionLimit, TargetNotFound},
    Result,
};

/// Default bound on the number of ancestors a single walk may visit
pub const MAX_HIERARCHY_DEPTH: usize = 256;

/// Iterator over the superclass chain of a class, nearest ancestor first
///
/// Ends at a class without superclass, or at a superclass the [`ClassSource`] does not know.
/// Yields [`crate::Error::RecursionLimit`] once, and then stops, if the chain is longer than
/// the configured depth; a cyclic hierarchy ends up there as well.
pub struct Ancestors<'a> {
    source: &'a dyn ClassSource,
    next: Option<String>,
    depth: usize,
    max_depth: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = Result<ClassInfoRc>;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.next.take()?;
        if self.depth >= self.max_depth {
            return Some(Err(RecursionLimit(self.max_depth)));
        }
        self.depth += 1;

        match self.source.class(&name) {
            Some(class) => {
                self.next.clone_from(&class.superclass);
                Some(Ok(class))
            }
            None => {
                log::debug!("superclass {} is unknown, ending the walk", name);
                None
            }
        }
    }
}

/// Walks superclass chains to relate overrides to the methods they override
pub struct HierarchyWalker<'a> {
    source: &'a dyn ClassSource,
    predicate: &'a dyn OverridePredicate,
    max_depth: usize,
}

impl<'a> HierarchyWalker<'a> {
    /// Create a walker over the given host facilities
    ///
    /// ## Arguments
    /// * 'source'    - Supplies classes by name
    /// * 'predicate' - Decides whether one method overrides another
    pub fn new(source: &'a dyn ClassSource, predicate: &'a dyn OverridePredicate) -> Self {
        HierarchyWalker {
            source,
            predicate,
            max_depth: MAX_HIERARCHY_DEPTH,
        }
    }

    /// Limit the number of ancestors a single walk may visit
    ///
    /// ## Arguments
    /// * 'max_depth' - The new bound
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The ancestors of `class`, starting with its direct superclass
    ///
    /// ## Arguments
    /// * 'class' - The class to start from, not part of the output
    pub fn ancestors(&self, class: &ClassInfo) -> Ancestors<'a> {
        Ancestors {
            source: self.source,
            next: class.superclass.clone(),
            depth: 0,
            max_depth: self.max_depth,
        }
    }

    /// The nearest ancestor method that `method` overrides
    ///
    /// Walks upward from the direct superclass of `class` and returns the first declared
    /// method the predicate confirms; returns `method` itself if the chain ends without one.
    ///
    /// ## Arguments
    /// * 'class'  - The class declaring `method`
    /// * 'method' - The overriding method
    ///
    /// # Errors
    /// Returns [`crate::Error::RecursionLimit`] if the chain exceeds the depth bound
    pub fn find_overridden_ancestor(
        &self,
        class: &ClassInfo,
        method: &DeclaredMemberRc,
    ) -> Result<DeclaredMemberRc> {
        for ancestor in self.ancestors(class) {
            let ancestor = ancestor?;
            let overridden = ancestor
                .methods()
                .find(|candidate| self.predicate.overrides(method, candidate, class))
                .cloned();
            if let Some(overridden) = overridden {
                log::debug!(
                    "{}::{} {} overrides {}",
                    class.name,
                    method.name,
                    method.descriptor,
                    overridden
                );
                return Ok(overridden);
            }
        }

        Ok(method.clone())
    }

    /// The topmost declaration `method` ultimately overrides
    ///
    /// Repeats [`HierarchyWalker::find_overridden_ancestor`] from each found method until no
    /// further ancestor is overridden. Returns `method` itself if it overrides nothing.
    ///
    /// ## Arguments
    /// * 'class'  - The class declaring `method`
    /// * 'method' - The overriding method
    ///
    /// # Errors
    /// Returns [`crate::Error::RecursionLimit`] if the chain exceeds the depth bound
    pub fn find_original_declaration(
        &self,
        class: &ClassInfo,
        method: &DeclaredMemberRc,
    ) -> Result<DeclaredMemberRc> {
        let mut current = method.clone();
        let mut next = self.find_overridden_ancestor(class, method)?;
        let mut steps = 0;

        while !Arc::ptr_eq(&current, &next) {
            steps += 1;
            if steps > self.max_depth {
                return Err(RecursionLimit(self.max_depth));
            }

            current = next;
            let Some(owner) = current.declaring_class().upgrade() else {
                break;
            };
            next = self.find_overridden_ancestor(&owner, &current)?;
        }

        Ok(current)
    }

    /// The bridge the compiler generates for `method`
    ///
    /// A bridge exists when the nearest overridden ancestor method has a different descriptor
    /// than `method`. If `class` itself declares a method with the ancestor's name and
    /// descriptor, that declaration is returned; otherwise the ancestor method, whose
    /// descriptor is the one the bridge carries.
    ///
    /// ## Arguments
    /// * 'class'  - The class declaring `method`
    /// * 'method' - The overriding method
    ///
    /// # Errors
    /// Returns [`crate::Error::TargetNotFound`] if `method` overrides nothing or the
    /// descriptors are identical, and [`crate::Error::RecursionLimit`] if the chain exceeds
    /// the depth bound
    pub fn find_bridge(
        &self,
        class: &ClassInfo,
        method: &DeclaredMemberRc,
    ) -> Result<DeclaredMemberRc> {
        let overridden = self.find_overridden_ancestor(class, method)?;
        if overridden.descriptor == method.descriptor {
            return Err(TargetNotFound {
                kind: "bridge method for".to_string(),
                name: overridden.name.clone(),
                parent: class.name.clone(),
            });
        }

        let declared = class.methods().find(|candidate| {
            candidate.name == overridden.name && candidate.descriptor == overridden.descriptor
        });
        Ok(declared.unwrap_or(&overridden).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hierarchy::{ClassPool, SignatureOverrides},
        resolver::Modifiers,
        test::generic_hierarchy,
        Error,
    };

    #[test]
    fn ancestors_in_order() {
        let fixture = generic_hierarchy();
        let walker = HierarchyWalker::new(&fixture.pool, &fixture.pool);

        let names: Vec<String> = walker
            .ancestors(&fixture.leaf)
            .map(|class| class.unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["pkg/Middle", "pkg/Base"]);
    }

    #[test]
    fn ancestors_stop_at_unknown_superclass() {
        let pool = ClassPool::new();
        let class = pool.insert(ClassInfo::new("pkg/Foo", Some("java/lang/Object")));
        let walker = HierarchyWalker::new(&pool, &pool);
        assert_eq!(walker.ancestors(&class).count(), 0);
    }

    #[test]
    fn nearest_overridden_ancestor() {
        let fixture = generic_hierarchy();
        let walker = HierarchyWalker::new(&fixture.pool, &fixture.pool);

        let found = walker
            .find_overridden_ancestor(&fixture.leaf, &fixture.leaf_apply)
            .unwrap();
        assert!(Arc::ptr_eq(&found, &fixture.middle_apply));

        let found = walker
            .find_overridden_ancestor(&fixture.middle, &fixture.middle_apply)
            .unwrap();
        assert!(Arc::ptr_eq(&found, &fixture.base_apply));
    }

    #[test]
    fn no_override_returns_method() {
        let fixture = generic_hierarchy();
        let walker = HierarchyWalker::new(&fixture.pool, &fixture.pool);

        let found = walker
            .find_overridden_ancestor(&fixture.base, &fixture.base_apply)
            .unwrap();
        assert!(Arc::ptr_eq(&found, &fixture.base_apply));
    }

    #[test]
    fn original_declaration_is_transitive() {
        let fixture = generic_hierarchy();
        let walker = HierarchyWalker::new(&fixture.pool, &fixture.pool);

        let found = walker
            .find_original_declaration(&fixture.leaf, &fixture.leaf_apply)
            .unwrap();
        assert!(Arc::ptr_eq(&found, &fixture.base_apply));
    }

    #[test]
    fn bridge_for_erased_override() {
        let fixture = generic_hierarchy();
        let walker = HierarchyWalker::new(&fixture.pool, &fixture.pool);

        let bridge = walker
            .find_bridge(&fixture.middle, &fixture.middle_apply)
            .unwrap();
        assert!(Arc::ptr_eq(&bridge, &fixture.middle_bridge));
        assert_eq!(bridge.descriptor, "(Ljava/lang/Object;)V");
        assert!(bridge.is_bridge());
        assert_eq!(bridge.declaring_class().name().as_deref(), Some("pkg/Middle"));
    }

    #[test]
    fn no_bridge_for_identical_descriptor() {
        let fixture = generic_hierarchy();
        let walker = HierarchyWalker::new(&fixture.pool, &fixture.pool);

        match walker.find_bridge(&fixture.leaf, &fixture.leaf_apply) {
            Err(Error::TargetNotFound { kind, name, parent }) => {
                assert_eq!(kind, "bridge method for");
                assert_eq!(name, "apply");
                assert_eq!(parent, "pkg/Leaf");
            }
            other => panic!("unexpected result {other:?}"),
        }

        assert!(matches!(
            walker.find_bridge(&fixture.base, &fixture.base_apply),
            Err(Error::TargetNotFound { .. })
        ));
    }

    #[test]
    fn bridge_falls_back_to_ancestor_declaration() {
        let pool = ClassPool::new();
        let base = pool.insert(ClassInfo::new("pkg/Base", None));
        let root = base.declare_method("get", "()Ljava/lang/Object;", Modifiers::PUBLIC);
        let child = pool.insert(ClassInfo::new("pkg/Child", Some("pkg/Base")));
        let get = child.declare_method("get", "()Ljava/lang/String;", Modifiers::PUBLIC);

        let walker = HierarchyWalker::new(&pool, &SignatureOverrides);
        let bridge = walker.find_bridge(&child, &get).unwrap();
        assert!(Arc::ptr_eq(&bridge, &root));
    }

    #[test]
    fn cyclic_hierarchy_hits_depth_limit() {
        let pool = ClassPool::new();
        let a = pool.insert(ClassInfo::new("pkg/A", Some("pkg/B")));
        pool.insert(ClassInfo::new("pkg/B", Some("pkg/A")));
        let run = a.declare_method("run", "()V", Modifiers::PRIVATE);

        let walker = HierarchyWalker::new(&pool, &pool).with_max_depth(8);
        assert!(matches!(
            walker.find_overridden_ancestor(&a, &run),
            Err(Error::RecursionLimit(8))
        ));

        let results: Vec<_> = walker.ancestors(&a).collect();
        assert_eq!(results.len(), 9);
        assert!(results.last().unwrap().is_err());
    }
}
