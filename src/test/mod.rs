mod classes;

pub use classes::*;

// Two renamed classes; `compute` is overloaded
pub const FOO_BAR_TABLE: &str = "pkg/Foo a/a
\tcount b
\tcompute ()I c
\tcompute (I)I d
pkg/Bar a/b
\tvalue a
";

// Renames matching `generic_hierarchy`; only the base class carries the method rename
pub const GENERIC_TABLE: &str = "pkg/Base a/a
\tapply (Ljava/lang/Object;)V x
pkg/Middle b/b
pkg/Leaf c/c
";
