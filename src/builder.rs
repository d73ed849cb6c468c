//! Record builder.
//!
//! Turns the token stream into groups. The builder is itself an iterator: it
//! yields one [`Group`] per run of agent names as soon as the group is closed,
//! while non-group lines accumulate in a single shared record that is handed
//! back by [`RecordBuilder::finish`].
//!
//! ```text
//!                  User-agent                 group member
//! AwaitingAgent ─────────────▶ Collecting ───────────────────▶ InGroup
//!      │  ▲                      │   ▲ User-agent                 │
//!      │  └── (group member:     └───┘                            │
//!      │       dangling, dropped)          User-agent: emit group │
//!      │                        ◀─────────────────────────────────┘
//!      └── non-group lines go to the shared record in every state
//! ```
//!
//! All limits are enforced while scanning, so memory stays bounded no matter
//! how large or hostile the input is.

use crate::classify::{Classifier, LineKind, is_path_member};
use crate::normalize::PathNormalizer;
use crate::tokenizer::Token;
use crate::{DirectiveLine, Options, Record};

/// A closed group: the agent names as written (trailing blanks trimmed) and
/// the directive lines that apply to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub agents: Vec<String>,
    pub record: Record,
}

/// Counters for input the builder did not keep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    /// Over-long lines reported by the tokenizer.
    pub skipped_tokens: usize,
    /// Agent names beyond the document-wide budget.
    pub dropped_agents: usize,
    /// Group lines beyond the per-record limit.
    pub dropped_group_lines: usize,
    /// Non-group lines beyond the limit.
    pub dropped_non_group_lines: usize,
    /// Allow/Disallow values rejected by path normalization.
    pub rejected_paths: usize,
    /// Group directives with no preceding agent name.
    pub dangling_lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingAgent,
    CollectingAgents,
    InGroup,
}

#[derive(Debug)]
pub struct RecordBuilder<'c, I> {
    tokens: I,
    classifier: &'c Classifier,
    normalizer: PathNormalizer,
    state: State,
    agents: Vec<String>,
    record: Record,
    non_group: Record,
    agent_budget: usize,
    max_name_length: usize,
    max_lines: usize,
    stats: BuildStats,
}

impl<'c, I> RecordBuilder<'c, I>
where
    I: Iterator<Item = Token>,
{
    pub fn new(tokens: I, classifier: &'c Classifier, options: &Options) -> Self {
        Self::with_normalizer(tokens, classifier, PathNormalizer::from_options(options), options)
    }

    pub fn with_normalizer(
        tokens: I,
        classifier: &'c Classifier,
        normalizer: PathNormalizer,
        options: &Options,
    ) -> Self {
        Self {
            tokens,
            classifier,
            normalizer,
            state: State::AwaitingAgent,
            agents: Vec::new(),
            record: Record::new(),
            non_group: Record::new(),
            agent_budget: options.max_user_agents,
            max_name_length: options.max_name_length,
            max_lines: options.max_lines,
            stats: BuildStats::default(),
        }
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Drain any groups not consumed yet and return the shared non-group
    /// record with the final statistics.
    pub fn finish(mut self) -> (Record, BuildStats) {
        for group in self.by_ref() {
            log::trace!("discarding unconsumed group for {:?}", group.agents);
        }
        (self.non_group, self.stats)
    }

    fn take_group(&mut self) -> Group {
        self.state = State::AwaitingAgent;
        Group { agents: std::mem::take(&mut self.agents), record: std::mem::take(&mut self.record) }
    }

    fn add_agent(&mut self, value: &str) {
        self.state = State::CollectingAgents;
        if self.agent_budget == 0 {
            self.stats.dropped_agents += 1;
            log::debug!("dropping user-agent {:?}: agent budget exhausted", value);
            return;
        }
        self.agent_budget -= 1;
        let name = self.normalizer.trim(truncate(value, self.max_name_length));
        self.agents.push(name.to_string());
    }

    fn add_member(&mut self, line: DirectiveLine) {
        if self.agents.is_empty() {
            self.stats.dangling_lines += 1;
            log::debug!("dropping {} line outside of any group", line.field);
            return;
        }
        self.state = State::InGroup;

        let value = if is_path_member(&line.field) {
            match self.normalizer.normalize(&line.value) {
                Some(path) => path,
                None => {
                    self.stats.rejected_paths += 1;
                    return;
                }
            }
        } else {
            line.value
        };
        if self.record.len() >= self.max_lines {
            self.stats.dropped_group_lines += 1;
            log::debug!("dropping {} line: group line limit {} reached", line.field, self.max_lines);
            return;
        }
        let value = self.normalizer.trim(&value).to_string();
        self.record.push(DirectiveLine { field: line.field, value });
    }

    fn add_non_group(&mut self, line: DirectiveLine) {
        if self.non_group.len() >= self.max_lines {
            self.stats.dropped_non_group_lines += 1;
            log::debug!("dropping non-group {} line: line limit {} reached", line.field, self.max_lines);
            return;
        }
        let value = self.normalizer.trim(&line.value).to_string();
        self.non_group.push(DirectiveLine { field: line.field, value });
    }
}

impl<I> Iterator for RecordBuilder<'_, I>
where
    I: Iterator<Item = Token>,
{
    type Item = Group;

    fn next(&mut self) -> Option<Group> {
        while let Some(token) = self.tokens.next() {
            let line = match token {
                Token::Line(line) => line,
                Token::Skipped { len } => {
                    self.stats.skipped_tokens += 1;
                    log::trace!("ignoring skipped line of {len} bytes");
                    continue;
                }
            };

            match self.classifier.classify(&line) {
                LineKind::UserAgent => {
                    let finished = (self.state == State::InGroup).then(|| self.take_group());
                    self.add_agent(&line.value);
                    if finished.is_some() {
                        return finished;
                    }
                }
                LineKind::GroupMember => self.add_member(line),
                LineKind::NonGroup => self.add_non_group(line),
            }
        }

        (self.state == State::InGroup).then(|| self.take_group())
    }
}

/// Cut `value` to at most `max` bytes without splitting a character.
fn truncate(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
