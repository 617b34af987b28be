//! Host-supplied class and member facts.
//!
//! The resolver never discovers members on its own; the host environment describes each class
//! it knows about as a [`ClassInfo`] and attaches the declared fields and methods to it. A
//! member keeps a weak reference to its declaring class, so members can be handed around
//! freely without keeping whole classes alive.

use std::{
    fmt,
    sync::{Arc, Weak},
};

use bitflags::bitflags;
use strum::{Display, EnumIter};

/// A reference-counted pointer to a [`DeclaredMember`]
pub type DeclaredMemberRc = Arc<DeclaredMember>;
/// A reference-counted pointer to a [`ClassInfo`]
pub type ClassInfoRc = Arc<ClassInfo>;

/// Whether a member is a field or a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum MemberKind {
    /// A field, described by a type descriptor
    Field,
    /// A method, described by a method descriptor
    Method,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Access and property flags of a member, using the JVM access-flag values
    ///
    /// Some values are shared between field-only and method-only flags (`VOLATILE` and
    /// `BRIDGE`, `TRANSIENT` and `VARARGS`); which one applies depends on the member kind.
    pub struct Modifiers: u32 {
        /// Accessible from everywhere
        const PUBLIC = 0x0001;
        /// Accessible only from the declaring class
        const PRIVATE = 0x0002;
        /// Accessible from subclasses and the same package
        const PROTECTED = 0x0004;
        /// Belongs to the class rather than an instance
        const STATIC = 0x0008;
        /// Cannot be overridden (methods) or reassigned (fields)
        const FINAL = 0x0010;
        /// Method invocation is wrapped in a monitor
        const SYNCHRONIZED = 0x0020;
        /// Field cannot be cached
        const VOLATILE = 0x0040;
        /// Compiler-generated bridge method
        const BRIDGE = 0x0040;
        /// Field is not serialized
        const TRANSIENT = 0x0080;
        /// Method takes a variable number of arguments
        const VARARGS = 0x0080;
        /// Method implemented outside of the bytecode
        const NATIVE = 0x0100;
        /// Method has no implementation
        const ABSTRACT = 0x0400;
        /// Method uses strict floating-point semantics
        const STRICT = 0x0800;
        /// Not present in source code
        const SYNTHETIC = 0x1000;
    }
}

/// Weak reference to a [`ClassInfo`]
///
/// Held by every [`DeclaredMember`] to point back at its declaring class without owning it.
#[derive(Debug, Clone)]
pub struct ClassRef {
    weak_ref: Weak<ClassInfo>,
}

impl ClassRef {
    /// Create a new `ClassRef` from a strong reference
    pub fn new(strong_ref: &ClassInfoRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the class, returning None if the class has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<ClassInfoRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced class is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Get the internal name of the referenced class (if still alive)
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|class| class.name.clone())
    }
}

/// A field or method declared by a class, as reported by the host
#[derive(Debug)]
pub struct DeclaredMember {
    /// Simple member name
    pub name: String,
    /// Type descriptor for fields, full method descriptor for methods
    pub descriptor: String,
    /// Access and property flags
    pub modifiers: Modifiers,
    /// Field or method
    pub kind: MemberKind,
    declaring_class: ClassRef,
}

impl DeclaredMember {
    /// The class that declares this member
    #[must_use]
    pub fn declaring_class(&self) -> &ClassRef {
        &self.declaring_class
    }

    /// Returns `true` if this member is a method
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    /// Returns `true` if the member is declared `static`
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    /// Returns `true` if the member is declared `private`
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.modifiers.contains(Modifiers::PRIVATE)
    }

    /// Returns `true` if the member is declared `final`
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers.contains(Modifiers::FINAL)
    }

    /// Returns `true` for compiler-generated bridge methods
    #[must_use]
    pub fn is_bridge(&self) -> bool {
        self.is_method() && self.modifiers.contains(Modifiers::BRIDGE)
    }
}

impl fmt::Display for DeclaredMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.declaring_class.name() {
            Some(class) => write!(f, "{}::{} {}", class, self.name, self.descriptor),
            None => write!(f, "{} {}", self.name, self.descriptor),
        }
    }
}

/// The facts about one class: its name, its superclass and its declared members
///
/// Members are appended through `&self`, so a class can be published in a shared pool
/// first and filled afterwards.
pub struct ClassInfo {
    /// Internal name, e.g. `pkg/Foo`
    pub name: String,
    /// Internal name of the direct superclass, `None` for a hierarchy root
    pub superclass: Option<String>,
    /// Class-level access flags
    pub modifiers: Modifiers,
    members: boxcar::Vec<DeclaredMemberRc>,
}

impl ClassInfo {
    /// Create a class without members
    ///
    /// ## Arguments
    /// * 'name'       - The internal class name
    /// * 'superclass' - The internal name of the direct superclass, if any
    pub fn new(name: impl Into<String>, superclass: Option<&str>) -> ClassInfoRc {
        Self::with_modifiers(name, superclass, Modifiers::PUBLIC)
    }

    /// Create a class without members and with explicit access flags
    ///
    /// ## Arguments
    /// * 'name'       - The internal class name
    /// * 'superclass' - The internal name of the direct superclass, if any
    /// * 'modifiers'  - Class-level access flags
    pub fn with_modifiers(
        name: impl Into<String>,
        superclass: Option<&str>,
        modifiers: Modifiers,
    ) -> ClassInfoRc {
        Arc::new(ClassInfo {
            name: name.into(),
            superclass: superclass.map(str::to_string),
            modifiers,
            members: boxcar::Vec::new(),
        })
    }

    /// Declare a member on this class
    ///
    /// ## Arguments
    /// * 'kind'       - Field or method
    /// * 'name'       - The simple member name
    /// * 'descriptor' - Type descriptor for fields, method descriptor for methods
    /// * 'modifiers'  - Access and property flags
    pub fn declare(
        self: &Arc<Self>,
        kind: MemberKind,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        modifiers: Modifiers,
    ) -> DeclaredMemberRc {
        let member = Arc::new(DeclaredMember {
            name: name.into(),
            descriptor: descriptor.into(),
            modifiers,
            kind,
            declaring_class: ClassRef::new(self),
        });
        self.members.push(member.clone());
        member
    }

    /// Declare a field on this class
    pub fn declare_field(
        self: &Arc<Self>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        modifiers: Modifiers,
    ) -> DeclaredMemberRc {
        self.declare(MemberKind::Field, name, descriptor, modifiers)
    }

    /// Declare a method on this class
    pub fn declare_method(
        self: &Arc<Self>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        modifiers: Modifiers,
    ) -> DeclaredMemberRc {
        self.declare(MemberKind::Method, name, descriptor, modifiers)
    }

    /// All declared members, in declaration order
    pub fn members(&self) -> impl Iterator<Item = &DeclaredMemberRc> {
        self.members.iter().map(|(_, member)| member)
    }

    /// All declared methods, in declaration order
    pub fn methods(&self) -> impl Iterator<Item = &DeclaredMemberRc> {
        self.members().filter(|member| member.kind == MemberKind::Method)
    }

    /// All declared fields, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &DeclaredMemberRc> {
        self.members().filter(|member| member.kind == MemberKind::Field)
    }

    /// Number of declared members
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.count()
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("superclass", &self.superclass)
            .field("modifiers", &self.modifiers)
            .field("members", &self.member_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn member_kind_names() {
        let names: Vec<String> = MemberKind::iter().map(|kind| kind.to_string()).collect();
        assert_eq!(names, vec!["field", "method"]);
    }

    #[test]
    fn modifiers_use_jvm_values() {
        assert_eq!(Modifiers::PUBLIC.bits(), 0x0001);
        assert_eq!(Modifiers::SYNTHETIC.bits(), 0x1000);
        assert_eq!(Modifiers::BRIDGE, Modifiers::VOLATILE);

        let flags = Modifiers::from_bits_truncate(0x0019);
        assert!(flags.contains(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL));
    }

    #[test]
    fn members_point_back_to_their_class() {
        let class = ClassInfo::new("pkg/Foo", Some("java/lang/Object"));
        let field = class.declare_field("count", "I", Modifiers::PRIVATE);
        let method = class.declare_method("compute", "()I", Modifiers::PUBLIC);

        assert_eq!(class.member_count(), 2);
        assert_eq!(class.fields().count(), 1);
        assert_eq!(class.methods().count(), 1);
        assert!(field.declaring_class().is_valid());
        assert_eq!(method.declaring_class().name().as_deref(), Some("pkg/Foo"));
        assert_eq!(method.to_string(), "pkg/Foo::compute ()I");
        assert!(field.is_private());
        assert!(!method.is_static());
    }

    #[test]
    fn dropped_class_invalidates_reference() {
        let class = ClassInfo::new("pkg/Gone", None);
        let member = class.declare_method("run", "()V", Modifiers::PUBLIC);
        drop(class);

        assert!(!member.declaring_class().is_valid());
        assert!(member.declaring_class().upgrade().is_none());
        assert_eq!(member.to_string(), "run ()V");
    }

    #[test]
    fn bridge_flag_only_for_methods() {
        let class = ClassInfo::new("pkg/Foo", None);
        let bridge = class.declare_method(
            "apply",
            "(Ljava/lang/Object;)V",
            Modifiers::PUBLIC | Modifiers::BRIDGE | Modifiers::SYNTHETIC,
        );
        let volatile = class.declare_field("flag", "Z", Modifiers::VOLATILE);
        assert!(bridge.is_bridge());
        assert!(!volatile.is_bridge());
    }
}
