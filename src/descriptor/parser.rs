use crate::{
    descriptor::{MethodShape, PrimitiveKind, TypeShape},
    Result,
};

/// Maximum number of array dimensions a descriptor may carry
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Descriptor parser, decoding the compact string form back into shapes
///
/// # Example
///
/// ```rust
/// use remapper::descriptor::DescriptorParser;
/// let mut parser = DescriptorParser::new("(I[Ljava/lang/String;)V");
/// let method = parser.parse_method_descriptor().unwrap();
/// assert_eq!(method.params.len(), 2);
/// ```
///
/// Make sure to not re-use a parser instance for multiple descriptors; the parse functions
/// exposed on [`crate::descriptor`] create a fresh one per call.
pub struct DescriptorParser<'a> {
    descriptor: &'a str,
    data: &'a [u8],
    position: usize,
}

impl<'a> DescriptorParser<'a> {
    /// Create a new `DescriptorParser` over a descriptor string
    ///
    /// ## Arguments
    /// * 'descriptor' - The descriptor to read from
    #[must_use]
    pub fn new(descriptor: &'a str) -> Self {
        DescriptorParser {
            descriptor,
            data: descriptor.as_bytes(),
            position: 0,
        }
    }

    /// Current position within the descriptor
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Returns `true` if there is more input to parse
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    fn peek_byte(&self) -> Result<u8> {
        match self.data.get(self.position) {
            Some(byte) => Ok(*byte),
            None => Err(malformed_error!(
                "Descriptor ended unexpectedly at offset {}",
                self.position
            )),
        }
    }

    fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.position += 1;
        Ok(byte)
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        let found = self.read_byte()?;
        if found != expected {
            return Err(malformed_error!(
                "Expected '{}' at offset {}, found '{}'",
                expected as char,
                self.position - 1,
                found as char
            ));
        }
        Ok(())
    }

    fn expect_end(&self) -> Result<()> {
        if self.has_more_data() {
            return Err(malformed_error!(
                "Trailing data in descriptor at offset {}",
                self.position
            ));
        }
        Ok(())
    }

    /// Parse a single type, `void` included
    fn parse_type(&mut self) -> Result<TypeShape> {
        let mut dimensions = 0;
        while self.peek_byte()? == b'[' {
            self.position += 1;
            dimensions += 1;
            if dimensions > MAX_ARRAY_DIMENSIONS {
                return Err(malformed_error!(
                    "Descriptor exceeds {} array dimensions",
                    MAX_ARRAY_DIMENSIONS
                ));
            }
        }

        let start = self.position;
        let current_byte = self.read_byte()?;
        let component = if current_byte == b'L' {
            TypeShape::Class(self.parse_class_name()?)
        } else if let Some(kind) = PrimitiveKind::from_code(current_byte) {
            TypeShape::Primitive(kind)
        } else {
            return Err(malformed_error!(
                "Unsupported descriptor character '{}' at offset {}",
                current_byte as char,
                start
            ));
        };

        if dimensions > 0 && component.is_void() {
            return Err(malformed_error!("Array of void at offset {}", start));
        }

        Ok(TypeShape::array_of(component, dimensions))
    }

    /// Parse the internal name following an `L`, consuming the terminating `;`
    fn parse_class_name(&mut self) -> Result<String> {
        let start = self.position;
        let Some(length) = self.data[start..].iter().position(|&b| b == b';') else {
            return Err(malformed_error!(
                "Unterminated class reference at offset {}",
                start - 1
            ));
        };

        let name = &self.data[start..start + length];
        if name.is_empty() {
            return Err(malformed_error!("Empty class name at offset {}", start));
        }
        if let Some(bad) = name.iter().find(|&&b| matches!(b, b'.' | b'[' | b'(' | b')')) {
            return Err(malformed_error!(
                "Invalid character '{}' in class name at offset {}",
                *bad as char,
                start
            ));
        }

        self.position = start + length + 1;
        // `L` and `;` are ASCII, so both ends sit on char boundaries
        Ok(self.descriptor[start..start + length].to_string())
    }

    /// Parse a type that must carry a value (anything but `void`)
    fn parse_value_type(&mut self) -> Result<TypeShape> {
        let start = self.position;
        let shape = self.parse_type()?;
        if shape.is_void() {
            return Err(malformed_error!("Unexpected void at offset {}", start));
        }
        Ok(shape)
    }

    /// Parse the parenthesised parameter list of a method descriptor
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the list is not enclosed in parentheses or
    /// contains an invalid type.
    pub fn parse_parameter_list(&mut self) -> Result<Vec<TypeShape>> {
        self.expect_byte(b'(')?;

        let mut params = Vec::new();
        while self.peek_byte()? != b')' {
            params.push(self.parse_value_type()?);
        }
        self.position += 1;

        Ok(params)
    }

    /// Parse a complete method descriptor, `(` params `)` return
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the descriptor is truncated, carries trailing
    /// data, or contains an invalid type.
    pub fn parse_method_descriptor(&mut self) -> Result<MethodShape> {
        let params = self.parse_parameter_list()?;
        let ret = self.parse_type()?;
        self.expect_end()?;

        Ok(MethodShape { params, ret })
    }

    /// Parse a complete field descriptor
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the descriptor is not exactly one non-void type.
    pub fn parse_field_descriptor(&mut self) -> Result<TypeShape> {
        let shape = self.parse_value_type()?;
        self.expect_end()?;
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_primitive_types() {
        let test_cases = [
            ("Z", PrimitiveKind::Boolean),
            ("C", PrimitiveKind::Char),
            ("B", PrimitiveKind::Byte),
            ("S", PrimitiveKind::Short),
            ("I", PrimitiveKind::Int),
            ("F", PrimitiveKind::Float),
            ("J", PrimitiveKind::Long),
            ("D", PrimitiveKind::Double),
        ];

        for (descriptor, expected) in test_cases {
            let mut parser = DescriptorParser::new(descriptor);
            assert_eq!(
                parser.parse_field_descriptor().unwrap(),
                TypeShape::Primitive(expected)
            );
        }
    }

    #[test]
    fn test_parse_class_and_arrays() {
        let mut parser = DescriptorParser::new("Ljava/lang/String;");
        assert_eq!(
            parser.parse_field_descriptor().unwrap(),
            TypeShape::Class("java/lang/String".to_string())
        );

        let mut parser = DescriptorParser::new("[[Lpkg/Foo$Inner;");
        let shape = parser.parse_field_descriptor().unwrap();
        assert_eq!(shape.array_level(), 2);
        assert_eq!(
            shape.innermost(),
            &TypeShape::Class("pkg/Foo$Inner".to_string())
        );
    }

    #[test]
    fn test_parse_method() {
        let mut parser = DescriptorParser::new("(IJ[Lpkg/Foo;)Ljava/util/List;");
        let method = parser.parse_method_descriptor().unwrap();

        assert_eq!(method.params.len(), 3);
        assert_eq!(method.params[0], TypeShape::Primitive(PrimitiveKind::Int));
        assert_eq!(method.params[1], TypeShape::Primitive(PrimitiveKind::Long));
        assert_eq!(method.params[2].array_level(), 1);
        assert_eq!(method.ret, TypeShape::Class("java/util/List".to_string()));

        let mut parser = DescriptorParser::new("()V");
        let method = parser.parse_method_descriptor().unwrap();
        assert!(method.params.is_empty());
        assert!(method.ret.is_void());
    }

    #[test]
    fn test_parse_parameter_list_only() {
        let mut parser = DescriptorParser::new("(ILpkg/Foo;)");
        let params = parser.parse_parameter_list().unwrap();
        assert_eq!(params.len(), 2);
        assert!(!parser.has_more_data());
    }

    #[test]
    fn test_error_handling() {
        let malformed = [
            "",
            "V",
            "[V",
            "Q",
            "Lpkg/Foo",
            "L;",
            "Ljava.lang.String;",
            "II",
            "(I",
            "(V)V",
            "(I)",
            "(I)VV",
            "I)V",
        ];

        for descriptor in malformed {
            let mut field = DescriptorParser::new(descriptor);
            let mut method = DescriptorParser::new(descriptor);
            assert!(
                matches!(field.parse_field_descriptor(), Err(Error::Malformed { .. })),
                "{descriptor} accepted as field"
            );
            assert!(
                matches!(method.parse_method_descriptor(), Err(Error::Malformed { .. })),
                "{descriptor} accepted as method"
            );
        }
    }

    #[test]
    fn test_array_dimension_limit() {
        let ok = format!("{}I", "[".repeat(MAX_ARRAY_DIMENSIONS));
        assert_eq!(
            DescriptorParser::new(&ok)
                .parse_field_descriptor()
                .unwrap()
                .array_level(),
            MAX_ARRAY_DIMENSIONS
        );

        let too_deep = format!("{}I", "[".repeat(MAX_ARRAY_DIMENSIONS + 1));
        assert!(DescriptorParser::new(&too_deep)
            .parse_field_descriptor()
            .is_err());
    }
}
