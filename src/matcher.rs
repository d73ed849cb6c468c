//! Path matching against one record's Allow/Disallow rules.
//!
//! The matcher is split into two submodules:
//!
//! - `path.rs`: percent-encoding normalization, applied to rule patterns and
//!   to the queried path alike.
//! - `compile.rs`: rule extraction, priority ordering, compaction of adjacent
//!   same-kind rules and translation into anchored byte regexes.
//!
//! Matching walks the compiled list in priority order and the first regex
//! that matches at the start of the path decides. A path no rule matches is
//! allowed.

#[path = "matcher/compile.rs"]
mod compile;
#[path = "matcher/path.rs"]
mod path;

pub use compile::{COMPACTION_LIMIT, CompiledMatcher, PathRule, RuleKind};
pub use path::normalize_percent;

use crate::Record;
use crate::error::{Error, Result};

/// Compiled rules of one record.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    matchers: Vec<CompiledMatcher>,
}

impl Matcher {
    /// Compile the Allow/Disallow lines of `record`. Longer patterns take
    /// priority unless `respect_order` keeps declaration order.
    pub fn from_record(record: &Record, respect_order: bool) -> Result<Self> {
        Self::from_rules(compile::rules_from_record(record), respect_order)
    }

    pub fn from_rules(rules: Vec<PathRule>, respect_order: bool) -> Result<Self> {
        let matchers = compile::compile(rules, respect_order)?;
        log::trace!(
            "compiled {} path rules into {} matchers",
            matchers.iter().map(|matcher| matcher.rules).sum::<usize>(),
            matchers.len()
        );
        Ok(Self { matchers })
    }

    /// Kind of the first rule matching an already normalized path.
    pub fn decide(&self, normalized_path: &[u8]) -> Option<RuleKind> {
        self.matchers.iter().find(|matcher| matcher.regex.is_match(normalized_path)).map(|matcher| matcher.kind)
    }

    /// Whether `path` (starting with `/`, query string included) may be crawled.
    pub fn is_allowed(&self, path: &str) -> Result<bool> {
        check_path(path)?;
        let normalized = normalize_percent(path);
        Ok(self.decide(&normalized) != Some(RuleKind::Disallow))
    }

    pub fn matchers(&self) -> &[CompiledMatcher] {
        &self.matchers
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// Reject target paths that do not begin with `/`.
pub(crate) fn check_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(())
}
