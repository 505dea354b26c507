//! ISUPPORT value escaping.
//!
//! A 005 token is a single middle parameter, so its value must never carry a
//! literal space. Values are escaped with `\xHH` sequences (uppercase hex):
//!
//! - space → `\x20`
//! - backslash → `\x5C`
//! - `=` → `\x3D` (the first `=` of a token always separates name and value)
//! - any other byte below 0x20 → `\xHH`
//!
//! Everything else, including non-ASCII UTF-8, is written through unchanged.

use std::fmt::{Result as FmtResult, Write};

#[inline]
fn needs_escape(c: char) -> bool {
    c == ' ' || c == '\\' || c == '=' || (c as u32) < 0x20
}

/// Escape a value into any `fmt::Write` sink.
pub fn escape_value_to(f: &mut dyn Write, value: &str) -> FmtResult {
    for c in value.chars() {
        if needs_escape(c) {
            write!(f, "\\x{:02X}", c as u32)?;
        } else {
            f.write_char(c)?;
        }
    }
    Ok(())
}

/// Escape a value, returning a new string.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    // Writing into a String cannot fail.
    let _ = escape_value_to(&mut out, value);
    out
}

/// Reverse [`escape_value`].
///
/// Sequences that are not a well-formed `\xHH` are kept as-is.
pub fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find("\\x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 2..];
        let byte = tail
            .get(..2)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match byte {
            Some(byte) if byte.is_ascii() => {
                out.push(byte as char);
                rest = &tail[2..];
            }
            _ => {
                out.push_str("\\x");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
