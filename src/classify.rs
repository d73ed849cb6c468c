//! Directive-line classification.
//!
//! Maps each [`DirectiveLine`] to the role it plays in record grouping. The
//! mapping is a pure function of the field name; the sets of names are
//! configured up front so vendor-specific group directives can be registered
//! before parsing starts.

use crate::DirectiveLine;
use regex::Regex;

/// Role of a directive line in the record structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Starts (or extends) the agent-name list of a group.
    UserAgent,
    /// Belongs to the group opened by the preceding agent names.
    GroupMember,
    /// Applies to the whole document regardless of grouping (e.g. `Sitemap`).
    NonGroup,
}

/// Field-name based line classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    user_agent: Regex,
    group_member: Regex,
    /// Additional group directives, lowercased.
    registered: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            user_agent: regex!(r"(?i)^User-?agent$").clone(),
            group_member: regex!(r"(?i)^(?:(?:Dis)?Allow|Crawl-delay)$").clone(),
            registered: Vec::new(),
        }
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pattern recognizing agent-name lines.
    pub fn with_user_agent_pattern(mut self, pattern: Regex) -> Self {
        self.user_agent = pattern;
        self
    }

    /// Replace the pattern recognizing group directives. Names added with
    /// [`Self::register_group_directive`] still count as group directives.
    pub fn with_group_member_pattern(mut self, pattern: Regex) -> Self {
        self.group_member = pattern;
        self
    }

    /// Register an extra directive name (case-insensitive) as a group member.
    pub fn register_group_directive(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        if !self.registered.contains(&name) {
            self.registered.push(name);
        }
    }

    pub fn classify(&self, line: &DirectiveLine) -> LineKind {
        let field = line.field.as_str();
        if self.group_member.is_match(field) || self.registered.iter().any(|name| name.eq_ignore_ascii_case(field)) {
            LineKind::GroupMember
        } else if self.user_agent.is_match(field) {
            LineKind::UserAgent
        } else {
            LineKind::NonGroup
        }
    }
}

/// Whether `field` carries a path pattern (`Allow` or `Disallow`).
pub fn is_path_member(field: &str) -> bool {
    field.eq_ignore_ascii_case("allow") || field.eq_ignore_ascii_case("disallow")
}
