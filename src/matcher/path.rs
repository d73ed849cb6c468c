//! Percent-encoding normalization shared by rule patterns and target paths.
//!
//! Both sides of a comparison go through [`normalize_percent`] so that `%7E`
//! and `~` compare equal while `%2F` and `/` stay distinct:
//!
//! - `%XX` of a reserved or meta character (`%:/?#[]@!$&'()*+,;=`) stays
//!   encoded, with the hex digits uppercased;
//! - `%XX` of any other octet is decoded;
//! - raw control octets and a `%` not followed by two hex digits are encoded.
//!
//! The result is a byte string: decoding may produce octets that are not
//! valid UTF-8.

const RESERVED: &[u8] = b"%:/?#[]@!$&'()*+,;=";

pub fn normalize_percent(path: &str) -> Vec<u8> {
    let decoded = bytes_regex!("%([0-9A-Fa-f]{2})").replace_all(path.as_bytes(), |caps: &regex::bytes::Captures<'_>| {
        let hex = &caps[1];
        let octet = (hex_value(hex[0]) << 4) | hex_value(hex[1]);
        if RESERVED.contains(&octet) {
            vec![b'%', hex[0].to_ascii_uppercase(), hex[1].to_ascii_uppercase()]
        } else {
            vec![octet]
        }
    });

    let mut out = Vec::with_capacity(decoded.len());
    for (idx, &octet) in decoded.iter().enumerate() {
        let lone_percent = octet == b'%' && !is_escape(&decoded[idx + 1..]);
        if octet < 0x20 || lone_percent {
            push_escaped(&mut out, octet);
        } else {
            out.push(octet);
        }
    }
    out
}

fn is_escape(rest: &[u8]) -> bool {
    rest.len() >= 2 && rest[0].is_ascii_hexdigit() && rest[1].is_ascii_hexdigit()
}

fn push_escaped(out: &mut Vec<u8>, octet: u8) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    out.extend_from_slice(&[b'%', HEX[usize::from(octet >> 4)], HEX[usize::from(octet & 0x0f)]]);
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
