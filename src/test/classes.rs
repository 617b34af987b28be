use crate::{
    hierarchy::ClassPool,
    resolver::{ClassInfo, ClassInfoRc, DeclaredMemberRc, Modifiers},
};

// Helper function to create `pkg/Foo` with an overloaded `compute`
pub fn foo_class() -> ClassInfoRc {
    let class = ClassInfo::new("pkg/Foo", None);
    class.declare_field("count", "I", Modifiers::PRIVATE);
    class.declare_field("owner", "Lpkg/Bar;", Modifiers::PRIVATE);
    class.declare_method("compute", "()I", Modifiers::PUBLIC);
    class.declare_method("compute", "(I)I", Modifiers::PUBLIC);
    class.declare_method("reset", "()V", Modifiers::PUBLIC);
    class.declare_method("merge", "(Lpkg/Bar;)Lpkg/Foo;", Modifiers::PUBLIC);
    class
}

// Helper function to create a pool that only knows `pkg/Foo`
pub fn foo_pool() -> ClassPool {
    let pool = ClassPool::new();
    pool.insert(foo_class());
    pool
}

pub struct GenericHierarchy {
    pub pool: ClassPool,
    pub base: ClassInfoRc,
    pub middle: ClassInfoRc,
    pub leaf: ClassInfoRc,
    pub base_apply: DeclaredMemberRc,
    pub middle_apply: DeclaredMemberRc,
    pub middle_bridge: DeclaredMemberRc,
    pub leaf_apply: DeclaredMemberRc,
}

// Base<T>.apply(T), Middle extends Base<String> with its bridge, Leaf extends Middle
pub fn generic_hierarchy() -> GenericHierarchy {
    let pool = ClassPool::new();

    let base = pool.insert(ClassInfo::new("pkg/Base", None));
    let base_apply = base.declare_method("apply", "(Ljava/lang/Object;)V", Modifiers::PUBLIC);

    let middle = pool.insert(ClassInfo::new("pkg/Middle", Some("pkg/Base")));
    let middle_apply = middle.declare_method("apply", "(Ljava/lang/String;)V", Modifiers::PUBLIC);
    let middle_bridge = middle.declare_method(
        "apply",
        "(Ljava/lang/Object;)V",
        Modifiers::PUBLIC | Modifiers::BRIDGE | Modifiers::SYNTHETIC,
    );
    pool.link_override(&middle_apply, &base_apply);

    let leaf = pool.insert(ClassInfo::new("pkg/Leaf", Some("pkg/Middle")));
    let leaf_apply = leaf.declare_method("apply", "(Ljava/lang/String;)V", Modifiers::PUBLIC);

    GenericHierarchy {
        pool,
        base,
        middle,
        leaf,
        base_apply,
        middle_apply,
        middle_bridge,
        leaf_apply,
    }
}
