//! Override-chain walking over single-inheritance class hierarchies.
//!
//! The rename table is keyed by the signature a method had where it was first declared. An
//! override somewhere down the hierarchy therefore has to be traced back to that declaration
//! before its renamed name can be looked up. The same walk also finds the compiler-generated
//! bridge that appears when an override changes the erased descriptor (generic parameters or
//! covariant return types).
//!
//! Only the direct superclass chain is followed. Interfaces and default methods are not
//! modeled.
//!
//! # Key Components
//!
//! - [`ClassSource`] - Host facility that supplies [`crate::resolver::ClassInfo`] by name
//! - [`OverridePredicate`] - Host facility that decides whether one method overrides another
//! - [`SignatureOverrides`] - Predicate based on names, parameter lists and modifiers
//! - [`ClassPool`] - Thread-safe in-memory host implementing both facilities
//! - [`HierarchyWalker`] - The ancestor walk itself
//!
//! # Examples
//!
//! ```rust
//! use remapper::hierarchy::{ClassPool, HierarchyWalker};
//! use remapper::resolver::{ClassInfo, Modifiers};
//!
//! let pool = ClassPool::new();
//! let base = pool.insert(ClassInfo::new("pkg/Base", None));
//! let root = base.declare_method("create", "()Ljava/lang/Object;", Modifiers::PUBLIC);
//! let child = pool.insert(ClassInfo::new("pkg/Child", Some("pkg/Base")));
//! let create = child.declare_method("create", "()Ljava/lang/Object;", Modifiers::PUBLIC);
//!
//! let walker = HierarchyWalker::new(&pool, &pool);
//! let original = walker.find_overridden_ancestor(&child, &create)?;
//! assert!(std::sync::Arc::ptr_eq(&original, &root));
//! # Ok::<(), remapper::Error>(())
//! ```

mod pool;
mod walker;

pub use pool::ClassPool;
pub use walker::{Ancestors, HierarchyWalker, MAX_HIERARCHY_DEPTH};

use crate::{
    descriptor::param_list,
    resolver::{ClassInfo, ClassInfoRc, DeclaredMember},
};

/// Supplies class facts by internal name
pub trait ClassSource: Send + Sync {
    /// The class named `name`, or `None` if the host does not know it
    ///
    /// ## Arguments
    /// * 'name' - The internal class name
    fn class(&self, name: &str) -> Option<ClassInfoRc>;
}

/// Decides whether one method overrides another
pub trait OverridePredicate: Send + Sync {
    /// Returns `true` if `overrider` overrides `overridden` as a member of `context`
    ///
    /// ## Arguments
    /// * 'overrider'  - The method lower in the hierarchy
    /// * 'overridden' - The candidate ancestor method
    /// * 'context'    - The class `overrider` is a member of
    fn overrides(
        &self,
        overrider: &DeclaredMember,
        overridden: &DeclaredMember,
        context: &ClassInfo,
    ) -> bool;
}

/// Override rule based on signatures and modifiers
///
/// A method overrides another one if both are methods with the same name and parameter list,
/// the overridden one is neither `private`, `static` nor `final`, and the overrider is not
/// `static`. Return types are not compared, which makes covariant returns count as overrides.
/// Overrides across generic erasure cannot be seen from descriptors alone; hosts record those
/// explicitly, see [`ClassPool::link_override`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureOverrides;

impl OverridePredicate for SignatureOverrides {
    fn overrides(
        &self,
        overrider: &DeclaredMember,
        overridden: &DeclaredMember,
        _context: &ClassInfo,
    ) -> bool {
        overrider.is_method()
            && overridden.is_method()
            && overrider.name == overridden.name
            && param_list(&overrider.descriptor) == param_list(&overridden.descriptor)
            && !overridden.is_private()
            && !overridden.is_static()
            && !overridden.is_final()
            && !overrider.is_static()
    }
}
