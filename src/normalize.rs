//! Normalization of directive values while records are built.
//!
//! Allow/Disallow values go through, in order:
//!
//! 1. `%2A` → `*` (with [`NormalizeFlags::ESCAPED_WILDCARD`], set by default),
//! 2. wildcard runs collapsed to a single `*`,
//! 3. a relative value (non-empty, not starting with `/` or `*`, not ending
//!    with `$`) is either prefixed with `/` or rejected,
//! 4. values with more than `max_wildcards` wildcards are rejected.
//!
//! The result is idempotent: normalizing a normalized value returns it
//! unchanged. Trailing-whitespace trimming applies to every value and is kept
//! separate (see [`PathNormalizer::trim`]).

use crate::Options;
use std::borrow::Cow;

bitflags::bitflags! {
    /// Switches for [`PathNormalizer`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NormalizeFlags: u8 {
        const ESCAPED_WILDCARD         = 1 << 0;
        const COMPLEMENT_LEADING_SLASH = 1 << 1;
        const KEEP_TRAILING_SPACES     = 1 << 2;
    }
}

impl NormalizeFlags {
    pub fn from_options(options: &Options) -> Self {
        let mut flags = NormalizeFlags::empty();
        flags.set(NormalizeFlags::ESCAPED_WILDCARD, options.escaped_wildcard);
        flags.set(NormalizeFlags::COMPLEMENT_LEADING_SLASH, options.complement_leading_slash);
        flags.set(NormalizeFlags::KEEP_TRAILING_SPACES, options.keep_trailing_spaces);
        flags
    }
}

/// Value normalizer injected into the record builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNormalizer {
    flags: NormalizeFlags,
    max_wildcards: usize,
}

impl PathNormalizer {
    pub fn new(flags: NormalizeFlags, max_wildcards: usize) -> Self {
        Self { flags, max_wildcards }
    }

    pub fn from_options(options: &Options) -> Self {
        Self::new(NormalizeFlags::from_options(options), options.max_wildcards)
    }

    pub fn flags(&self) -> NormalizeFlags {
        self.flags
    }

    /// Normalize an Allow/Disallow value, or `None` if the value must be dropped.
    pub fn normalize(&self, value: &str) -> Option<String> {
        let mut path = Cow::Borrowed(value);
        if self.flags.contains(NormalizeFlags::ESCAPED_WILDCARD) {
            path = Cow::Owned(regex!("%2[Aa]").replace_all(&path, "*").into_owned());
        }

        let wildcard_runs = regex!(r"\*+");
        let wildcards = wildcard_runs.find_iter(&path).count();
        let mut path = wildcard_runs.replace_all(&path, "*").into_owned();

        if !path.is_empty() && !path.starts_with(['/', '*']) && !path.ends_with('$') {
            if !self.flags.contains(NormalizeFlags::COMPLEMENT_LEADING_SLASH) {
                log::debug!("dropping relative path value {:?}", value);
                return None;
            }
            path.insert(0, '/');
        }

        if wildcards > self.max_wildcards {
            log::debug!("dropping path value with {} wildcards (max {})", wildcards, self.max_wildcards);
            return None;
        }
        Some(path)
    }

    /// Strip trailing spaces and tabs unless they are configured to be kept.
    pub fn trim<'v>(&self, value: &'v str) -> &'v str {
        if self.flags.contains(NormalizeFlags::KEEP_TRAILING_SPACES) {
            value
        } else {
            value.trim_end_matches([' ', '\t'])
        }
    }
}
