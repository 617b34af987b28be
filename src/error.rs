use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! mapping_not_found {
    ($name:expr) => {
        crate::Error::MappingNotFound($name.to_string())
    };

    ($parent:expr, $member:expr) => {
        crate::Error::MappingNotFound(format!("{}::{}", $parent, $member))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure is raised at the point of detection and propagated to the caller unchanged.
///
/// # Error Categories
///
/// ## Lookup Errors
/// - [`Error::MappingNotFound`] - A class or member is absent from the rename table
/// - [`Error::AmbiguousDefinition`] - Narrowing left more than one candidate
/// - [`Error::TargetNotFound`] - Narrowing left zero candidates
///
/// ## Input Errors
/// - [`Error::Malformed`] - Rename-table text or a descriptor violates its grammar
/// - [`Error::InvalidResource`] - A configured mapping file does not exist
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// ## Analysis Errors
/// - [`Error::RecursionLimit`] - An ancestor walk exceeded its configured depth
///
/// # Examples
///
/// ```rust
/// use remapper::{Error, RenameTable};
///
/// match RenameTable::from_lines(["\tcount b"]) {
///     Ok(_) => unreachable!(),
///     Err(Error::Malformed { message, .. }) => println!("bad mapping: {}", message),
///     Err(e) => println!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// No rename-table entry exists for the given class or member.
    ///
    /// The payload is the fully spelled lookup key, `class` or `class::member`.
    #[error("Could not find mapping for {0}!")]
    MappingNotFound(String),

    /// More than one candidate survived narrowing.
    ///
    /// Ambiguity is never resolved heuristically; the caller has to supply more information
    /// (usually a full descriptor) and re-issue the query.
    #[error("{0}")]
    AmbiguousDefinition(String),

    /// No candidate survived narrowing.
    ///
    /// # Fields
    ///
    /// * `kind` - What was searched for (`field`, `method`, `bridge method for`, ...)
    /// * `name` - The searched name, possibly including the descriptor
    /// * `parent` - The internal name of the class that was searched
    #[error("Could not find {kind} {name} in class {parent}!")]
    TargetNotFound {
        /// What kind of member was searched for
        kind: String,
        /// The name (and descriptor, if any) that was searched for
        name: String,
        /// The class that was searched
        parent: String,
    },

    /// The input is damaged and could not be parsed.
    ///
    /// Raised for rename-table lines that violate the line-shape rules and for descriptors
    /// that do not follow the descriptor grammar. The error includes the source location where
    /// the malformation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The configured mapping resource does not exist.
    #[error("Specified resource {0} was not found!")]
    InvalidResource(String),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening or mapping a mapping file.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),

    /// Recursion limit reached.
    ///
    /// Ancestor walks are bounded so that a cyclic class hierarchy supplied by the host cannot
    /// loop forever. The associated value shows the limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_macro_records_location() {
        let err = malformed_error!("bad line {}", 3);
        match err {
            Error::Malformed {
                message,
                file,
                line,
            } => {
                assert_eq!(message, "bad line 3");
                assert!(file.ends_with("error.rs"));
                assert!(line > 0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn mapping_not_found_formats_member_key() {
        let err = mapping_not_found!("pkg/Foo", "count");
        assert_eq!(err.to_string(), "Could not find mapping for pkg/Foo::count!");
    }

    #[test]
    fn target_not_found_message() {
        let err = Error::TargetNotFound {
            kind: "method".to_string(),
            name: "bar ()V".to_string(),
            parent: "pkg/Foo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not find method bar ()V in class pkg/Foo!"
        );
    }
}
