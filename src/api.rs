use crate::builder::BuildStats;
use crate::filter::Filter;
use crate::{Options, RecordSet};

/// Parse `text` with default options, keeping every agent's record.
pub fn parse(text: &str) -> RecordSet {
    parse_with(text, &Options::default())
}

/// Parse `text` with the provided `options`, keeping every agent's record.
pub fn parse_with(text: &str, options: &Options) -> RecordSet {
    Filter::new(options).record_set(text)
}

/// Like [`parse_with`], also reporting what was dropped while building.
///
/// Useful for checking how much of a document fell outside the configured
/// limits; the default [`parse_with`] path discards these counters.
pub fn parse_verbose_with(text: &str, options: &Options) -> (RecordSet, BuildStats) {
    Filter::new(options).record_set_with_stats(text)
}
