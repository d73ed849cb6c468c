/// Errors raised for caller misuse.
///
/// Malformed or oversized documents never produce one of these; they are
/// processed by dropping whatever cannot be kept.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target path handed to the tester does not begin with `/`.
    #[error("path should begin with a slash: {0:?}")]
    InvalidPath(String),

    /// The tester was queried before any source was loaded.
    #[error("no source is loaded yet")]
    NoSource,

    /// An agent list was supplied together with an already-built record set.
    #[error("cannot specify user-agents for a pre-built record set")]
    AgentsWithRecordSet,

    /// A compiled path pattern was rejected by the regex engine.
    #[error("failed to compile path pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
