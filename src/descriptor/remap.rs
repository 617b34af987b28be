use crate::{Error, Result};

/// Rewrite every class reference embedded in `descriptor` through `mapper`
///
/// Primitive and array segments are copied through untouched; only the internal name between
/// `L` and `;` is handed to `mapper`. A mapper that answers [`Error::MappingNotFound`] leaves
/// that reference unchanged. Any other error aborts the rewrite.
///
/// Works for field descriptors, full method descriptors and bare parameter lists alike.
///
/// ## Arguments
/// * 'descriptor' - The descriptor to rewrite
/// * 'mapper'     - Substitution for a single internal class name
///
/// # Errors
/// Returns [`Error::Malformed`] for an unterminated or empty class reference, or the first
/// error other than [`Error::MappingNotFound`] produced by `mapper`.
///
/// # Example
///
/// ```rust
/// use remapper::{descriptor::remap, Error};
///
/// let mapped = remap("(Lpkg/Foo;Ljava/lang/String;)V", |name| match name {
///     "pkg/Foo" => Ok("a/a".to_string()),
///     other => Err(Error::MappingNotFound(other.to_string())),
/// })?;
/// assert_eq!(mapped, "(La/a;Ljava/lang/String;)V");
/// # Ok::<(), remapper::Error>(())
/// ```
pub fn remap<F>(descriptor: &str, mut mapper: F) -> Result<String>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut result = String::with_capacity(descriptor.len());
    let mut rest = descriptor;

    // `L` is not part of the primitive alphabet, so outside a class name it always opens one
    while let Some(start) = rest.find('L') {
        let (head, tail) = rest.split_at(start);
        result.push_str(head);

        let Some(end) = tail.find(';') else {
            return Err(malformed_error!(
                "Unterminated class reference in descriptor {}",
                descriptor
            ));
        };

        let name = &tail[1..end];
        if name.is_empty() {
            return Err(malformed_error!(
                "Empty class reference in descriptor {}",
                descriptor
            ));
        }

        match mapper(name) {
            Ok(mapped) => {
                result.push('L');
                result.push_str(&mapped);
                result.push(';');
            }
            Err(Error::MappingNotFound(_)) => result.push_str(&tail[..=end]),
            Err(error) => return Err(error),
        }

        rest = &tail[end + 1..];
    }

    result.push_str(rest);
    Ok(result)
}
