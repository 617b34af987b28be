//! Line-oriented rename-table loader.
//!
//! The loader is a small state machine: a class line opens a new record, indented member
//! lines attach to the record that is currently open, and the open record is flushed into
//! the table whenever the next class line arrives or the input ends.

use crossbeam_skiplist::SkipMap;
use std::sync::Arc;

use crate::{
    descriptor::parse_method_descriptor,
    mapping::{MemberKey, RenameRecord, RenameRecordRc},
    Result,
};

/// One classified input line
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Class {
        original: &'a str,
        renamed: &'a str,
    },
    Field {
        original: &'a str,
        renamed: &'a str,
    },
    Method {
        original: &'a str,
        descriptor: &'a str,
        renamed: &'a str,
    },
}

impl<'a> Line<'a> {
    /// Split a raw line into its tokens and decide what it describes
    ///
    /// ## Arguments
    /// * 'line'   - The raw line, without terminator
    /// * 'number' - The 1-based line number, for error reporting
    fn classify(line: &'a str, number: usize) -> Result<Line<'a>> {
        let indented = line.starts_with(['\t', ' ']);
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match (indented, tokens.as_slice()) {
            (false, &[original, renamed]) => Ok(Line::Class { original, renamed }),
            (true, &[original, renamed]) => Ok(Line::Field { original, renamed }),
            (true, &[original, descriptor, renamed]) => Ok(Line::Method {
                original,
                descriptor,
                renamed,
            }),
            (_, &[]) => Err(malformed_error!("Line {}: blank line", number)),
            (false, _) => Err(malformed_error!(
                "Line {}: class line needs 2 tokens, found {}",
                number,
                tokens.len()
            )),
            (true, _) => Err(malformed_error!(
                "Line {}: member line needs 2 or 3 tokens, found {}",
                number,
                tokens.len()
            )),
        }
    }
}

/// Incremental state of a running load
#[derive(Default)]
pub(crate) struct TableLoader {
    classes: SkipMap<String, RenameRecordRc>,
    current: Option<RenameRecord>,
    lines: usize,
    members: usize,
}

impl TableLoader {
    /// Create a loader with an empty table and no open record
    pub(crate) fn new() -> Self {
        TableLoader::default()
    }

    /// Consume the next input line
    ///
    /// ## Arguments
    /// * 'line' - The raw line, without terminator
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the line does not match any of the line shapes,
    /// if a member line appears before the first class line, or if a method descriptor
    /// does not parse.
    pub(crate) fn feed(&mut self, line: &str) -> Result<()> {
        self.lines += 1;
        let number = self.lines;

        match Line::classify(line, number)? {
            Line::Class { original, renamed } => {
                self.flush();
                self.current = Some(RenameRecord::new(original, renamed));
            }
            Line::Field { original, renamed } => {
                self.add_member(number, MemberKey::field(original), renamed)?;
            }
            Line::Method {
                original,
                descriptor,
                renamed,
            } => {
                if let Err(error) = parse_method_descriptor(descriptor) {
                    return Err(malformed_error!(
                        "Line {}: invalid method descriptor {} - {}",
                        number,
                        descriptor,
                        error
                    ));
                }
                self.add_member(number, MemberKey::method(original, descriptor), renamed)?;
            }
        }

        Ok(())
    }

    fn add_member(&mut self, number: usize, key: MemberKey, renamed: &str) -> Result<()> {
        let Some(record) = self.current.as_mut() else {
            return Err(malformed_error!(
                "Line {}: member line {} outside of a class",
                number,
                key
            ));
        };

        if let Some(previous) = record.insert_member(key.clone(), renamed.to_string()) {
            log::debug!(
                "line {}: {}::{} remapped again, {} replaces {}",
                number,
                record.original,
                key,
                renamed,
                previous
            );
        }
        self.members += 1;
        Ok(())
    }

    /// Move the open record, if any, into the table
    fn flush(&mut self) {
        let Some(record) = self.current.take() else {
            return;
        };

        if self.classes.contains_key(&record.original) {
            log::warn!(
                "class {} listed more than once, keeping the later entry",
                record.original
            );
        }
        self.classes.insert(record.original.clone(), Arc::new(record));
    }

    /// Close the open record and hand out the finished class map
    pub(crate) fn finish(mut self) -> SkipMap<String, RenameRecordRc> {
        self.flush();
        log::debug!(
            "loaded {} classes and {} member lines from {} lines",
            self.classes.len(),
            self.members,
            self.lines
        );
        self.classes
    }
}
