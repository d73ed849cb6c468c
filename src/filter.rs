//! Document → [`RecordSet`] assembly.
//!
//! A [`Filter`] runs the tokenizer and record builder over a document and
//! stores the resulting groups by agent name. It can restrict the kept
//! records to a list of target agents, in which case that list also becomes
//! the record set's preference order.

use crate::builder::{BuildStats, RecordBuilder};
use crate::classify::Classifier;
use crate::record_set::{FALLBACK_AGENT, normalize_name};
use crate::tokenizer::{Token, Tokenizer};
use crate::{Options, RecordSet};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Filter {
    options: Options,
    classifier: Classifier,
    targets: Option<Vec<String>>,
}

impl Filter {
    pub fn new(options: &Options) -> Self {
        Self { options: options.clone(), ..Self::default() }
    }

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

    /// Keep only records for `agents` (plus `*` when `fallback`) and use the
    /// same list, in order, as the preference for lookups without explicit agents.
    pub fn set_user_agents<I, S>(&mut self, agents: I, fallback: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut targets: Vec<String> = agents.into_iter().map(|agent| normalize_name(agent.as_ref())).collect();
        if fallback {
            targets.push(FALLBACK_AGENT.to_string());
        }
        self.targets = Some(targets);
    }

    /// Keep every agent's record again.
    pub fn clear_user_agents(&mut self) {
        self.targets = None;
    }

    pub fn record_set(&self, source: &str) -> RecordSet {
        self.record_set_with_stats(source).0
    }

    pub fn record_set_with_stats(&self, source: &str) -> (RecordSet, BuildStats) {
        let tokens = Tokenizer::new(source, &self.options);
        self.assemble(RecordBuilder::new(tokens, &self.classifier, &self.options))
    }

    /// Assemble a record set from an already configured builder.
    pub fn assemble<I>(&self, mut builder: RecordBuilder<'_, I>) -> (RecordSet, BuildStats)
    where
        I: Iterator<Item = Token>,
    {
        let mut set = RecordSet::new();
        let mut remaining = self.options.max_records;

        for group in builder.by_ref() {
            if remaining == 0 {
                log::debug!("dropping group for {:?}: record limit {} reached", group.agents, self.options.max_records);
                continue;
            }
            remaining -= 1;

            let record = Arc::new(group.record);
            for agent in group.agents.iter().filter(|agent| self.keeps(agent)) {
                set.add(agent, Arc::clone(&record));
            }
        }

        let (non_group, stats) = builder.finish();
        if stats != BuildStats::default() {
            log::debug!("record set built with dropped input: {:?}", stats);
        }
        set.set_non_group_record(non_group);
        if let Some(targets) = &self.targets {
            set.set_preferences(targets);
        }
        (set, stats)
    }

    fn keeps(&self, agent: &str) -> bool {
        match &self.targets {
            Some(targets) => {
                let agent = normalize_name(agent);
                targets.iter().any(|target| *target == agent)
            }
            None => true,
        }
    }
}
