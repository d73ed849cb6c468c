//! Records of one document, keyed by agent name.
//!
//! Lookups never fail: when no record applies, the shared empty record is
//! returned, so callers can read values or build matchers without checking
//! for presence first.

use crate::Record;
use crate::record::EMPTY_RECORD;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Key of the fallback record.
pub const FALLBACK_AGENT: &str = "*";

/// All records parsed from one document plus the shared non-group record.
///
/// Several agent names of one group share the same `Arc<Record>`. A record
/// set is not modified after it has been assembled and can be read from
/// multiple threads.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: BTreeMap<String, Arc<Record>>,
    non_group: Option<Arc<Record>>,
    preferences: Vec<String>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` under `agent`; a later record for the same name replaces
    /// the earlier one.
    pub fn add(&mut self, agent: &str, record: impl Into<Arc<Record>>) {
        self.records.insert(normalize_name(agent), record.into());
    }

    pub fn set_non_group_record(&mut self, record: impl Into<Arc<Record>>) {
        self.non_group = Some(record.into());
    }

    /// Install the ordered agent list used by [`Self::record`]. Include `*`
    /// in the list to fall back to the wildcard record.
    pub fn set_preferences<I, S>(&mut self, agents: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.preferences = agents.into_iter().map(|agent| normalize_name(agent.as_ref())).collect();
    }

    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    /// Agent keys in sorted order.
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.non_group.as_ref().is_none_or(|record| record.is_empty())
    }

    /// Exact lookup of one agent's record, without fallback.
    pub fn raw_record(&self, agent: &str) -> Option<&Record> {
        self.records.get(&normalize_name(agent)).map(Arc::as_ref)
    }

    /// Record for the configured preference list, or for `*` when none is set.
    pub fn record(&self) -> &Record {
        self.resolve_preferred().map_or(&EMPTY_RECORD, Arc::as_ref)
    }

    /// Record for the first of `agents` present, falling back to `*`.
    pub fn record_for<I, S>(&self, agents: I) -> &Record
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.resolve_explicit(agents).map_or(&EMPTY_RECORD, Arc::as_ref)
    }

    pub fn non_group_record(&self) -> &Record {
        self.non_group.as_deref().unwrap_or(&EMPTY_RECORD)
    }

    /// First value of a group directive (e.g. `Crawl-delay`) for the preferred agents.
    pub fn value(&self, directive: &str) -> Option<&str> {
        self.record().value(directive)
    }

    pub fn value_for<I, S>(&self, directive: &str, agents: I) -> Option<&str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.record_for(agents).value(directive)
    }

    /// First value of a non-group directive (e.g. `Sitemap`), verbatim.
    pub fn non_group_value(&self, directive: &str) -> Option<&str> {
        self.non_group_record().value(directive)
    }

    pub fn non_group_values<'a, 'd>(&'a self, directive: &'d str) -> impl Iterator<Item = &'a str> + use<'a, 'd> {
        self.non_group_record().values(directive)
    }

    /// Reduced set holding only the preferred record (re-keyed as `*`) and the
    /// non-group record.
    pub fn extract(&self) -> RecordSet {
        self.extracted(self.resolve_preferred())
    }

    /// Like [`Self::extract`] but resolving `agents` (with `*` fallback).
    pub fn extract_for<I, S>(&self, agents: I) -> RecordSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extracted(self.resolve_explicit(agents))
    }

    fn extracted(&self, record: Option<&Arc<Record>>) -> RecordSet {
        let mut set = RecordSet { non_group: self.non_group.clone(), ..RecordSet::default() };
        if let Some(record) = record {
            set.records.insert(FALLBACK_AGENT.to_string(), Arc::clone(record));
        }
        set
    }

    fn resolve_preferred(&self) -> Option<&Arc<Record>> {
        if self.preferences.is_empty() {
            return self.records.get(FALLBACK_AGENT);
        }
        self.preferences.iter().find_map(|agent| self.records.get(agent))
    }

    fn resolve_explicit<I, S>(&self, agents: I) -> Option<&Arc<Record>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        agents
            .into_iter()
            .find_map(|agent| self.records.get(&normalize_name(agent.as_ref())))
            .or_else(|| self.records.get(FALLBACK_AGENT))
    }
}

/// Serializes as robots.txt: one block per agent key, then the non-group
/// lines, blocks separated by a blank line and every line CRLF-terminated.
impl fmt::Display for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (agent, record) in &self.records {
            if !first {
                f.write_str("\r\n")?;
            }
            first = false;
            write!(f, "User-agent: {agent}\r\n{record}")?;
        }
        let non_group = self.non_group_record();
        if !non_group.is_empty() {
            if !first {
                f.write_str("\r\n")?;
            }
            write!(f, "{non_group}")?;
        }
        Ok(())
    }
}

/// Case-fold an agent name for lookup.
pub fn normalize_name(name: &str) -> String {
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DirectiveLine;

    fn record(field: &str, value: &str) -> Record {
        Record::from_lines(vec![DirectiveLine::new(field, value)])
    }

    fn sample() -> RecordSet {
        let mut set = RecordSet::new();
        set.add("A", record("Disallow", "/a"));
        set.add("b", record("Disallow", "/b"));
        set.add("*", record("Disallow", "/"));
        set.set_non_group_record(record("Sitemap", "https://example.com/sitemap.xml"));
        set
    }

    #[test]
    fn explicit_candidates_fall_back_to_wildcard() {
        let set = sample();
        assert_eq!(set.record_for(["a"]).value("Disallow"), Some("/a"));
        assert_eq!(set.record_for(["B", "a"]).value("Disallow"), Some("/b"));
        assert_eq!(set.record_for(["c"]).value("Disallow"), Some("/"));
        assert_eq!(set.record().value("Disallow"), Some("/"));
    }

    #[test]
    fn preferences_order_wins() {
        let mut set = sample();
        set.set_preferences(["b", "a", "*"]);
        assert_eq!(set.record().value("Disallow"), Some("/b"));

        set.set_preferences(["c"]);
        assert!(set.record().is_empty());
    }

    #[test]
    fn missing_records_are_empty_not_absent() {
        let set = RecordSet::new();
        assert!(set.record().is_empty());
        assert!(set.record_for(["x"]).is_empty());
        assert!(set.non_group_record().is_empty());
        assert_eq!(set.non_group_value("Sitemap"), None);
        assert!(set.raw_record("*").is_none());
    }

    #[test]
    fn non_group_values_are_verbatim() {
        let set = sample();
        assert_eq!(set.non_group_value("sitemap"), Some("https://example.com/sitemap.xml"));
        assert_eq!(set.non_group_values("SITEMAP").count(), 1);

        let sitemaps: Vec<&str> = set.non_group_values(&String::from("Sitemap")).collect();
        assert_eq!(sitemaps, ["https://example.com/sitemap.xml"]);
        assert_eq!(set.value_for(&String::from("disallow"), ["b"]), Some("/b"));
    }

    #[test]
    fn extract_keeps_only_resolved_and_non_group() {
        assert_eq!(RecordSet::new().extract().to_string(), "");

        let mut set = RecordSet::new();
        set.set_non_group_record(record("Sitemap", "s"));
        assert_eq!(set.extract().to_string(), "Sitemap: s\r\n");

        set.add("Rec", record("Disallow", "/1"));
        set.add("Rec2", record("Disallow", "/2"));
        assert_eq!(set.extract().to_string(), "Sitemap: s\r\n");
        assert_eq!(set.extract_for(["Rec"]).to_string(), "User-agent: *\r\nDisallow: /1\r\n\r\nSitemap: s\r\n");
        assert_eq!(set.extract_for(["Rec2"]).to_string(), "User-agent: *\r\nDisallow: /2\r\n\r\nSitemap: s\r\n");

        set.add("*", record("Disallow", "/any"));
        let extracted = set.extract();
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted.to_string(), "User-agent: *\r\nDisallow: /any\r\n\r\nSitemap: s\r\n");
    }

    #[test]
    fn display_lists_agents_in_order() {
        let set = sample();
        assert_eq!(
            set.to_string(),
            "User-agent: *\r\nDisallow: /\r\n\r\n\
             User-agent: a\r\nDisallow: /a\r\n\r\n\
             User-agent: b\r\nDisallow: /b\r\n\r\n\
             Sitemap: https://example.com/sitemap.xml\r\n"
        );
    }
}
