//! Allow/deny decisions for one loaded robots.txt.
//!
//! A [`Tester`] owns a [`RecordSet`] loaded from text, from a pre-built set,
//! or synthesized from an HTTP response code. Queries without explicit agents
//! resolve the set's preferred record once and reuse its compiled matcher until
//! the next source is loaded; queries naming agents compile a fresh matcher and
//! leave the cached one alone.

use crate::classify::Classifier;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::matcher::{Matcher, check_path};
use crate::{Options, RecordSet};
use once_cell::sync::OnceCell;

/// Document loaded for an unreachable or disallowing response code.
const DISALLOW_ALL: &str = "User-agent: *\nDisallow: /";

/// What a [`Tester`] can be loaded from.
#[derive(Debug, Clone)]
pub enum Source {
    /// robots.txt text, parsed with the tester's options.
    Text(String),
    /// A record set assembled elsewhere, used as is.
    Records(RecordSet),
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

impl From<RecordSet> for Source {
    fn from(set: RecordSet) -> Self {
        Source::Records(set)
    }
}

#[derive(Debug, Default)]
pub struct Tester {
    options: Options,
    classifier: Classifier,
    record_set: Option<RecordSet>,
    matcher: OnceCell<Matcher>,
}

impl Tester {
    pub fn new(options: &Options) -> Self {
        Self { options: options.clone(), ..Self::default() }
    }

    /// Classifier used when parsing text sources.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn classifier_mut(&mut self) -> &mut Classifier {
        &mut self.classifier
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn record_set(&self) -> Option<&RecordSet> {
        self.record_set.as_ref()
    }

    /// Load a new source, dropping the cached matcher.
    ///
    /// With `agents`, a text source keeps only those agents' records (plus
    /// `*`) and prefers them in the given order. A pre-built record set
    /// already carries its own preferences, so combining it with `agents` is
    /// rejected.
    pub fn set_source(&mut self, source: impl Into<Source>, agents: Option<&[&str]>) -> Result<()> {
        let set = match source.into() {
            Source::Records(_) if agents.is_some() => return Err(Error::AgentsWithRecordSet),
            Source::Records(set) => set,
            Source::Text(text) => self.parse(&text, agents),
        };
        self.install(set);
        Ok(())
    }

    /// Whether a robots.txt fetch answered with `code` permits crawling.
    pub fn is_response_code_allowed(&self, code: u16) -> bool {
        match code {
            0..=299 => true,
            300..=399 => false,
            401 | 403 => self.options.ignore_forbidden,
            400..=499 => true,
            _ => false,
        }
    }

    /// Load an allow-all or disallow-all source for `code`.
    pub fn set_response_code(&mut self, code: u16) {
        let source = if self.is_response_code_allowed(code) { "" } else { DISALLOW_ALL };
        log::debug!("response code {code}: loading {}", if source.is_empty() { "allow-all" } else { "disallow-all" });
        self.install(self.parse(source, None));
    }

    /// Load the fetched body for a 2xx response, otherwise apply the
    /// response-code policy.
    pub fn set_response(&mut self, code: u16, body: &str) {
        if (200..=299).contains(&code) {
            self.install(self.parse(body, None));
        } else {
            self.set_response_code(code);
        }
    }

    /// Decide `path` against the preferred record of the loaded source.
    pub fn is_allowed(&self, path: &str) -> Result<bool> {
        check_path(path)?;
        let set = self.record_set.as_ref().ok_or(Error::NoSource)?;
        let matcher =
            self.matcher.get_or_try_init(|| Matcher::from_record(set.record(), self.options.respect_order))?;
        matcher.is_allowed(path)
    }

    /// Decide `path` for the first of `agents` present in the source, falling
    /// back to `*`.
    pub fn is_allowed_for(&self, path: &str, agents: &[&str]) -> Result<bool> {
        check_path(path)?;
        let set = self.record_set.as_ref().ok_or(Error::NoSource)?;
        Matcher::from_record(set.record_for(agents), self.options.respect_order)?.is_allowed(path)
    }

    fn parse(&self, text: &str, agents: Option<&[&str]>) -> RecordSet {
        let mut filter = Filter::new(&self.options).with_classifier(self.classifier.clone());
        if let Some(agents) = agents {
            filter.set_user_agents(agents, true);
        }
        filter.record_set(text)
    }

    fn install(&mut self, set: RecordSet) {
        self.record_set = Some(set);
        self.matcher = OnceCell::new();
    }
}

#[cfg(test)]
#[path = "tester/tests.rs"]
mod tests;
