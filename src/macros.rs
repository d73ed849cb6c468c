/// Compile a `regex::Regex` once and hand out a `&'static` reference to it.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Byte-oriented twin of `regex!`, for paths that may carry decoded non-UTF-8 octets.
macro_rules! bytes_regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::bytes::Regex> =
            once_cell::sync::Lazy::new(|| regex::bytes::Regex::new($pat).unwrap());
        &*RE
    }};
}
