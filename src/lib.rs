//! robots.txt processing: tokenizing, grouping records per user-agent,
//! selecting the record for a crawler and deciding whether a path may be
//! fetched.
//!
//! ```text
//! text ── Tokenizer ──▶ Token ── RecordBuilder ──▶ Group ── Filter ──▶ RecordSet
//!          (lazy, bounded)       (Classifier,              (targets,       │
//!                                 PathNormalizer)           max_records)   │
//!                                                                          ▼
//!                                 path ── Tester / Matcher ──▶ allowed?  Record
//! ```
//!
//! ```
//! use robots_rules::{Options, Tester};
//!
//! let mut tester = Tester::new(&Options::default());
//! tester.set_source("User-agent: *\nDisallow: /private\n", None)?;
//! assert!(tester.is_allowed("/index.html")?);
//! assert!(!tester.is_allowed("/private/notes")?);
//! # Ok::<(), robots_rules::Error>(())
//! ```

use std::fmt;

#[macro_use]
mod macros;
mod api;
mod builder;
mod classify;
mod error;
mod filter;
mod matcher;
mod normalize;
mod options;
mod record;
mod record_set;
mod tester;
mod tokenizer;

pub use api::{parse, parse_verbose_with, parse_with};
pub use builder::{BuildStats, Group, RecordBuilder};
pub use classify::{Classifier, LineKind};
pub use error::{Error, Result};
pub use filter::Filter;
pub use matcher::{COMPACTION_LIMIT, CompiledMatcher, Matcher, PathRule, RuleKind, normalize_percent};
pub use normalize::{NormalizeFlags, PathNormalizer};
pub use options::Options;
pub use record::Record;
pub use record_set::{FALLBACK_AGENT, RecordSet};
pub use tester::{Source, Tester};
pub use tokenizer::{Token, Tokenizer};

// --- Shared types -----------------------------------------------------------

/// One `field: value` line.
///
/// The field name is kept in canonical case (first letter upper, the rest
/// lower), so `user-AGENT` and `User-agent` compare equal. The value is kept
/// as found, after tokenizer trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine {
    pub field: String,
    pub value: String,
}

impl DirectiveLine {
    pub fn new(field: &str, value: &str) -> Self {
        Self { field: canonical_field(field), value: value.to_string() }
    }
}

impl fmt::Display for DirectiveLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.value)
    }
}

fn canonical_field(field: &str) -> String {
    let mut canonical = field.to_ascii_lowercase();
    if let Some(first) = canonical.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    canonical
}
