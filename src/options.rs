//! Processing options.
//!
//! Every stage of the pipeline reads its limits and switches from one
//! [`Options`] value. There is a single source of defaults (the `Default`
//! impl below); callers override individual fields with struct update syntax
//! or load a partial object through serde:
//!
//! ```
//! use robots_rules::Options;
//!
//! let options = Options { max_wildcards: 3, respect_order: true, ..Options::default() };
//! assert_eq!(options.max_records, 1000);
//! ```

use serde::{Deserialize, Serialize};

/// Limits and behavior switches shared by the tokenizer, record builder,
/// filter and tester.
///
/// Size limits are never reported as errors: input beyond a limit is dropped
/// while the rest of the document is still processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Maximum number of group records kept per document.
    pub max_records: usize,
    /// Document-wide budget of accepted `User-agent` lines.
    pub max_user_agents: usize,
    /// Agent names longer than this (in bytes) are truncated.
    pub max_name_length: usize,
    /// Longest accepted directive (field) name.
    pub max_directive_length: usize,
    /// Longest accepted directive value.
    pub max_value_length: usize,
    /// Longest accepted physical line.
    pub max_line_length: usize,
    /// Maximum directive lines per group record, and separately for the non-group record.
    pub max_lines: usize,
    /// Path values with more wildcard runs than this are dropped.
    pub max_wildcards: usize,
    /// Treat `%2A` in Allow/Disallow values as the `*` wildcard. On by default.
    pub escaped_wildcard: bool,
    /// Prefix `/` to relative path values instead of dropping them.
    pub complement_leading_slash: bool,
    /// Keep trailing spaces and tabs of values and agent names.
    pub keep_trailing_spaces: bool,
    /// Evaluate rules in declaration order instead of longest-pattern-first.
    pub respect_order: bool,
    /// Treat 401 and 403 responses for the document as "no restrictions".
    pub ignore_forbidden: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_records: 1000,
            max_user_agents: 1000,
            max_name_length: 200,
            max_directive_length: 32,
            max_value_length: 2000,
            max_line_length: 2000,
            max_lines: 1000,
            max_wildcards: 10,
            escaped_wildcard: true,
            complement_leading_slash: true,
            keep_trailing_spaces: false,
            respect_order: false,
            ignore_forbidden: false,
        }
    }
}
