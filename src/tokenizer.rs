//! Directive-line tokenizer.
//!
//! Scans raw robots.txt text into a lazy sequence of [`Token`]s. One call to
//! [`Iterator::next`] consumes exactly as much input as needed for the next
//! token, and [`Tokenizer::remainder`] exposes the unconsumed tail, so a
//! consumer can stop at any point and hand the rest of the document elsewhere.
//!
//! Accepted line shape (CR, LF and CRLF are all one terminator, freely mixed):
//!
//! ```text
//! [ws] field [lws] ":" [lws] value [ws "#" comment] EOL
//!
//! ws   = *( SP / HTAB )
//! lws  = EOL 1*( SP / HTAB )    ; continuation onto the next line
//!      / ws
//! ```
//!
//! - `field` is `[A-Za-z-]+`; it is reported in canonical case (`User-agent`).
//! - A comment truncates the value and the whitespace right before `#`.
//!   Without a comment the value keeps its trailing whitespace.
//! - Blank and comment-only lines produce nothing; lines that do not have the
//!   shape above are skipped silently.
//! - Over-long physical lines, field names or values produce
//!   [`Token::Skipped`] carrying the offending length but none of the text.

use crate::{DirectiveLine, Options};

/// One unit of tokenizer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A well-formed directive line.
    Line(DirectiveLine),
    /// A line dropped for exceeding a length limit. `len` is the byte length
    /// of the over-long value (or of the whole physical line).
    Skipped { len: usize },
}

/// Lazy scanner over a robots.txt document.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    offset: usize,
    max_directive_length: usize,
    max_value_length: usize,
    max_line_length: usize,
}

/// Byte offsets of a structurally valid `field: value` line.
struct Directive {
    field: (usize, usize),
    value: (usize, usize),
    next: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str, options: &Options) -> Self {
        Self {
            source,
            offset: 0,
            max_directive_length: options.max_directive_length,
            max_value_length: options.max_value_length,
            max_line_length: options.max_line_length,
        }
    }

    /// The part of the source not consumed yet.
    pub fn remainder(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Byte offset of [`Self::remainder`] within the source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Scan one logical line starting at `start`; returns the produced token
    /// (if any) and the offset where the next line begins.
    fn scan_line(&self, start: usize) -> (Option<Token>, usize) {
        let bytes = self.source.as_bytes();
        let line_end = find_eol(bytes, start);

        if line_end - start > self.max_line_length {
            log::debug!("skipping line of {} bytes at offset {}", line_end - start, start);
            return (Some(Token::Skipped { len: line_end - start }), skip_eols(bytes, line_end));
        }

        let pos = skip_blanks(bytes, start);
        let Some(directive) = parse_directive(bytes, pos) else {
            if pos != line_end && bytes[pos] != b'#' {
                log::trace!("ignoring unparseable line at offset {}", start);
                return (None, skip_eols(bytes, line_end));
            }
            return (None, after_eol(bytes, line_end));
        };

        let (field_start, field_end) = directive.field;
        let (value_start, value_end) = directive.value;
        let value_len = value_end - value_start;

        if field_end - field_start > self.max_directive_length || value_len > self.max_value_length {
            log::debug!("skipping over-long directive at offset {} (value of {} bytes)", start, value_len);
            return (Some(Token::Skipped { len: value_len }), directive.next);
        }

        let line = DirectiveLine::new(&self.source[field_start..field_end], &self.source[value_start..value_end]);
        log::trace!("{}: {:?}", line.field, line.value);
        (Some(Token::Line(line)), directive.next)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.offset < self.source.len() {
            let (token, next) = self.scan_line(self.offset);
            self.offset = next;
            if token.is_some() {
                return token;
            }
        }
        None
    }
}

fn parse_directive(bytes: &[u8], start: usize) -> Option<Directive> {
    let mut pos = start;
    while pos < bytes.len() && (bytes[pos].is_ascii_alphabetic() || bytes[pos] == b'-') {
        pos += 1;
    }
    if pos == start {
        return None;
    }
    let field = (start, pos);

    pos = skip_lws(bytes, pos);
    if bytes.get(pos) != Some(&b':') {
        return None;
    }
    pos = skip_lws(bytes, pos + 1);

    let value_start = pos;
    while pos < bytes.len() && !matches!(bytes[pos], b'\r' | b'\n' | b'#') {
        pos += 1;
    }
    let mut value_end = pos;
    if pos < bytes.len() && bytes[pos] == b'#' {
        while value_end > value_start && matches!(bytes[value_end - 1], b' ' | b'\t') {
            value_end -= 1;
        }
        pos = find_eol(bytes, pos);
    }

    Some(Directive { field, value: (value_start, value_end), next: after_eol(bytes, pos) })
}

fn skip_blanks(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t') {
        pos += 1;
    }
    pos
}

/// A line break counts as whitespace only when the next line is indented.
fn skip_lws(bytes: &[u8], pos: usize) -> usize {
    let continued = after_eol(bytes, pos);
    if continued != pos && matches!(bytes.get(continued), Some(b' ' | b'\t')) {
        return skip_blanks(bytes, continued);
    }
    skip_blanks(bytes, pos)
}

fn find_eol(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && !matches!(bytes[pos], b'\r' | b'\n') {
        pos += 1;
    }
    pos
}

/// Consume a single CR, LF or CRLF at `pos`, if present.
fn after_eol(bytes: &[u8], pos: usize) -> usize {
    match (bytes.get(pos), bytes.get(pos + 1)) {
        (Some(b'\r'), Some(b'\n')) => pos + 2,
        (Some(b'\r' | b'\n'), _) => pos + 1,
        _ => pos,
    }
}

fn skip_eols(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && matches!(bytes[pos], b'\r' | b'\n') {
        pos += 1;
    }
    pos
}
