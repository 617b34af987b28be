//! Raw access to rename-table input.
//!
//! This module abstracts over where the text of a rename table comes from. A mapping file on
//! disk is memory-mapped, an in-memory buffer is consumed as-is, and both are exposed through
//! the same [`crate::file::Backend`] trait. [`crate::file::MappingSource`] sits on top and
//! validates that the data is UTF-8 before handing out individual lines to the loader in
//! [`crate::mapping`].
//!
//! # Key Components
//!
//! - [`crate::file::Backend`] - Trait for different data sources (disk files, memory buffers)
//! - `Physical` - Memory-mapped file backend for disk access
//! - `Memory` - In-memory buffer backend
//! - [`crate::file::MappingSource`] - UTF-8 validated view over a backend
//!
//! # Examples
//!
//! ```rust,no_run
//! use remapper::file::MappingSource;
//! use std::path::Path;
//!
//! let source = MappingSource::from_file(Path::new("mappings/joined.tsrg"))?;
//! for line in source.lines()? {
//!     println!("{}", line);
//! }
//! # Ok::<(), remapper::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! All backends are `Send + Sync`; a [`MappingSource`] can be shared across threads.

mod memory;
mod physical;

use std::path::Path;

use crate::Result;
use memory::Memory;
use physical::Physical;

/// Backend trait for mapping data sources.
///
/// This trait abstracts over the source of rename-table text, allowing for both in-memory and
/// on-disk representations. All implementations must be thread-safe.
pub trait Backend: Send + Sync {
    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;
}

/// A loaded rename-table input, independent of where the bytes live.
///
/// `MappingSource` owns its backend and lends out borrowed lines, so loading a table from a
/// memory-mapped file never copies the file contents.
pub struct MappingSource {
    data: Box<dyn Backend>,
}

impl MappingSource {
    /// Memory-maps the mapping file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file cannot be opened, or
    /// [`crate::Error::Error`] if memory mapping fails.
    pub fn from_file(path: &Path) -> Result<MappingSource> {
        let input = Physical::new(path)?;
        log::debug!("mapped {} bytes from {}", input.len(), path.display());

        Ok(MappingSource {
            data: Box::new(input),
        })
    }

    /// Wraps an in-memory buffer holding rename-table text.
    #[must_use]
    pub fn from_mem(data: Vec<u8>) -> MappingSource {
        MappingSource {
            data: Box::new(Memory::new(data)),
        }
    }

    /// Returns the total length of the underlying buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Returns the whole input as text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the input is not valid UTF-8.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(self.data.data()).map_err(|error| {
            malformed_error!(
                "Mapping input is not valid UTF-8 at byte {}",
                error.valid_up_to()
            )
        })
    }

    /// Returns an iterator over the lines of the input, without line terminators.
    ///
    /// Both `\n` and `\r\n` terminators are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the input is not valid UTF-8.
    pub fn lines(&self) -> Result<std::str::Lines<'_>> {
        Ok(self.text()?.lines())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn lines_from_memory() {
        let source = MappingSource::from_mem(b"pkg/Foo a/a\r\n\tcount b\n".to_vec());

        let lines: Vec<&str> = source.lines().unwrap().collect();
        assert_eq!(lines, vec!["pkg/Foo a/a", "\tcount b"]);
        assert_eq!(source.len(), 22);
        assert!(!source.is_empty());
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let source = MappingSource::from_mem(vec![b'a', 0xFF, b'b']);
        assert!(matches!(
            source.text(),
            Err(crate::Error::Malformed { .. })
        ));
    }

    #[test]
    fn lines_from_file() {
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file.write_all(b"pkg/Foo a/a\n\tcount b\n").unwrap();
        temp_file.flush().unwrap();

        let source = MappingSource::from_file(temp_file.path()).unwrap();
        assert_eq!(source.lines().unwrap().count(), 2);
        assert!(source.text().unwrap().starts_with("pkg/Foo"));
    }

    #[test]
    fn missing_file() {
        let result = MappingSource::from_file(Path::new("/nonexistent/path/to/joined.tsrg"));
        assert!(matches!(result, Err(crate::Error::FileError(_))));
    }
}
