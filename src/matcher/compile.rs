//! Rule compilation: ordering, compaction and regex translation.
//!
//! ```text
//! Record ── rules_from_record ──▶ [PathRule]           (Allow/Disallow only,
//!                                     │                 percent-normalized)
//!                       sort by pattern length, stable  (unless respect_order)
//!                                     │
//!                              compact(limit)          adjacent same-kind
//!                                     │                 rules → one alternation
//!                                     ▼
//!                            [CompiledMatcher]          first match decides
//! ```
//!
//! Compaction only joins neighbours of the same kind, so for any path the
//! first matching alternation has the kind of the first matching rule of the
//! uncompacted list.

use super::path::normalize_percent;
use crate::Record;
use crate::classify::is_path_member;
use crate::error::Result;
use regex::bytes::Regex;
use std::fmt::Write;

/// Upper bound for the combined pattern length of one compacted matcher.
pub const COMPACTION_LIMIT: usize = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Allow,
    Disallow,
}

/// One Allow/Disallow line with its percent-normalized pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRule {
    pub kind: RuleKind,
    pub pattern: Vec<u8>,
}

impl PathRule {
    /// Build a rule from an Allow/Disallow value. An empty Disallow places no
    /// restriction and becomes an Allow matching everything.
    pub fn new(kind: RuleKind, value: &str) -> Self {
        let pattern = normalize_percent(value);
        let kind = if pattern.is_empty() { RuleKind::Allow } else { kind };
        Self { kind, pattern }
    }
}

/// A regex standing for one or more adjacent rules of the same kind.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    pub kind: RuleKind,
    pub regex: Regex,
    /// Number of rules merged into this matcher.
    pub rules: usize,
}

/// Path rules of a record in declaration order; other directives are ignored.
pub fn rules_from_record(record: &Record) -> Vec<PathRule> {
    record
        .iter()
        .filter(|line| is_path_member(&line.field))
        .map(|line| {
            let kind = if line.field.eq_ignore_ascii_case("allow") { RuleKind::Allow } else { RuleKind::Disallow };
            PathRule::new(kind, &line.value)
        })
        .collect()
}

/// Longest pattern first; ties keep declaration order.
pub fn sort_rules(rules: &mut [PathRule]) {
    rules.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
}

/// Group adjacent same-kind rules while their joined length (with one
/// separator between patterns) stays under `limit`.
pub fn compact(rules: &[PathRule], limit: usize) -> Vec<(RuleKind, Vec<&PathRule>)> {
    let mut groups: Vec<(RuleKind, Vec<&PathRule>, usize)> = Vec::new();
    for rule in rules {
        if let Some((kind, members, joined)) = groups.last_mut() {
            if *kind == rule.kind && *joined + rule.pattern.len() < limit {
                *joined += rule.pattern.len() + 1;
                members.push(rule);
                continue;
            }
        }
        groups.push((rule.kind, vec![rule], rule.pattern.len()));
    }
    groups.into_iter().map(|(kind, members, _)| (kind, members)).collect()
}

pub fn compile(rules: Vec<PathRule>, respect_order: bool) -> Result<Vec<CompiledMatcher>> {
    compile_with_limit(rules, respect_order, COMPACTION_LIMIT)
}

pub(crate) fn compile_with_limit(
    mut rules: Vec<PathRule>,
    respect_order: bool,
    limit: usize,
) -> Result<Vec<CompiledMatcher>> {
    if !respect_order {
        sort_rules(&mut rules);
    }
    compact(&rules, limit)
        .into_iter()
        .map(|(kind, members)| {
            let alternatives: Vec<String> = members.iter().map(|rule| pattern_source(&rule.pattern)).collect();
            let regex = Regex::new(&format!(r"(?s-u)\A(?:{})", alternatives.join("|")))?;
            Ok(CompiledMatcher { kind, regex, rules: members.len() })
        })
        .collect()
}

/// Translate a normalized pattern into regex syntax: `*` matches any run of
/// octets, a trailing `$` anchors at the end of the path, every other octet
/// matches itself.
pub fn pattern_source(pattern: &[u8]) -> String {
    let body_len = pattern.iter().rposition(|&octet| octet != b'$').map_or(0, |idx| idx + 1);
    let (body, anchored) = (&pattern[..body_len], body_len < pattern.len());

    let mut source = String::with_capacity(body.len() * 2);
    let mut after_wildcard = false;
    for &octet in body {
        if octet == b'*' {
            if !after_wildcard {
                source.push_str(".*?");
            }
            after_wildcard = true;
            continue;
        }
        after_wildcard = false;
        if octet.is_ascii_alphanumeric() || octet == b'/' {
            source.push(char::from(octet));
        } else {
            let _ = write!(source, r"\x{octet:02X}");
        }
    }
    if anchored {
        source.push_str(r"\z");
    }
    source
}
