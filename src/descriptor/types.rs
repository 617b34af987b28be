use strum::{EnumCount, EnumIter};

/// The primitive kinds of the descriptor alphabet, one character each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum PrimitiveKind {
    /// boolean - `Z`
    Boolean,
    /// char - `C`
    Char,
    /// signed 8bit integer - `B`
    Byte,
    /// signed 16bit integer - `S`
    Short,
    /// signed 32bit integer - `I`
    Int,
    /// 32bit floating-point - `F`
    Float,
    /// signed 64bit integer - `J`
    Long,
    /// 64bit floating-point - `D`
    Double,
    /// no value, only valid as a method return type - `V`
    Void,
}

impl PrimitiveKind {
    /// The descriptor character for this kind
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Double => 'D',
            PrimitiveKind::Void => 'V',
        }
    }

    /// Look up the kind encoded by `code`, if it is part of the alphabet
    ///
    /// ## Arguments
    /// * 'code' - The descriptor character
    #[must_use]
    pub const fn from_code(code: u8) -> Option<PrimitiveKind> {
        match code {
            b'Z' => Some(PrimitiveKind::Boolean),
            b'C' => Some(PrimitiveKind::Char),
            b'B' => Some(PrimitiveKind::Byte),
            b'S' => Some(PrimitiveKind::Short),
            b'I' => Some(PrimitiveKind::Int),
            b'F' => Some(PrimitiveKind::Float),
            b'J' => Some(PrimitiveKind::Long),
            b'D' => Some(PrimitiveKind::Double),
            b'V' => Some(PrimitiveKind::Void),
            _ => None,
        }
    }
}

/// Structural description of a field type, parameter type or return type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A primitive (or `void`)
    Primitive(PrimitiveKind),
    /// A class reference, by slash-delimited internal name
    Class(String),
    /// One array dimension around the component type
    Array(Box<TypeShape>),
}

impl TypeShape {
    /// Create a class reference, accepting both `a.b.C` and `a/b/C`
    ///
    /// ## Arguments
    /// * 'name' - The qualified or internal name of the class
    #[must_use]
    pub fn class(name: &str) -> TypeShape {
        TypeShape::Class(name.replace('.', "/"))
    }

    /// Wrap `component` into `dimensions` levels of array nesting
    ///
    /// ## Arguments
    /// * 'component'  - The innermost component type
    /// * 'dimensions' - Number of array levels to add
    #[must_use]
    pub fn array_of(component: TypeShape, dimensions: usize) -> TypeShape {
        (0..dimensions).fold(component, |shape, _| TypeShape::Array(Box::new(shape)))
    }

    /// The nesting level of the array, `0` for non-array types
    #[must_use]
    pub fn array_level(&self) -> usize {
        let mut level = 0;
        let mut current = self;
        while let TypeShape::Array(component) = current {
            level += 1;
            current = component;
        }
        level
    }

    /// The innermost component, i.e. the type with all array levels removed
    #[must_use]
    pub fn innermost(&self) -> &TypeShape {
        let mut current = self;
        while let TypeShape::Array(component) = current {
            current = component;
        }
        current
    }

    /// Returns `true` for `void`
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, TypeShape::Primitive(PrimitiveKind::Void))
    }
}

/// Structural description of a method: parameters in declaration order and the return type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodShape {
    /// The parameters of this method
    pub params: Vec<TypeShape>,
    /// The return type, `void` for no value
    pub ret: TypeShape,
}

impl MethodShape {
    /// Create a new method shape
    ///
    /// ## Arguments
    /// * 'params' - The parameter types, in declaration order
    /// * 'ret'    - The return type
    #[must_use]
    pub fn new(params: Vec<TypeShape>, ret: TypeShape) -> Self {
        MethodShape { params, ret }
    }
}
