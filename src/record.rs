use crate::DirectiveLine;
use std::fmt;

/// The empty record handed out when no record applies.
pub(crate) static EMPTY_RECORD: Record = Record::new();

/// Ordered directive lines of one group, or of the shared non-group record.
///
/// Records are filled while a document is parsed and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    lines: Vec<DirectiveLine>,
}

impl Record {
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn from_lines(lines: Vec<DirectiveLine>) -> Self {
        Self { lines }
    }

    pub fn push(&mut self, line: DirectiveLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[DirectiveLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DirectiveLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Values of every `directive` line, in document order. The directive
    /// name is compared case-insensitively.
    pub fn values<'a, 'd>(&'a self, directive: &'d str) -> impl Iterator<Item = &'a str> + use<'a, 'd> {
        self.lines
            .iter()
            .filter(move |line| line.field.eq_ignore_ascii_case(directive))
            .map(|line| line.value.as_str())
    }

    /// First value of `directive`, if the record has one.
    pub fn value(&self, directive: &str) -> Option<&str> {
        self.values(directive).next()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a DirectiveLine;
    type IntoIter = std::slice::Iter<'a, DirectiveLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Writes each line as `Field: value` followed by CRLF.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            write!(f, "{line}\r\n")?;
        }
        Ok(())
    }
}
