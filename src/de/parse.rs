//! Splitting a querystring into its `key=value` segments.
//!
//! Values are split from keys on the _first_ `=` only, so values may
//! contain `=` themselves (which is common for base64 padding):
//! `key===usb=` has the key `key` and the value `==usb=`.

use crate::error::{Error, Result};

/// Removes a single leading `?`, rejecting strings that are then empty.
pub fn strip_prefix(input: &str) -> Result<&str> {
    let stripped = input.strip_prefix('?').unwrap_or(input);
    if stripped.is_empty() {
        return Err(Error::EmptyQueryString);
    }
    Ok(stripped)
}

/// Iterates over the `&` separated segments of a stripped querystring.
///
/// Empty segments are yielded too (and rejected by the splitters) so
/// that `a=1&&b=2` is not silently accepted.
pub fn segments(stripped: &str) -> impl Iterator<Item = &str> {
    stripped.split('&')
}

/// Splits a raw segment into its still-encoded key and value.
///
/// Both parts must be non-empty: `key=` and `=value` are malformed.
pub fn split_raw(segment: &str) -> Result<(&str, &str)> {
    match segment.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => Ok((key, value)),
        _ => Err(Error::malformed(segment)),
    }
}

/// Splits a base64 segment into its still-encoded key and value.
///
/// An unencoded `=` key is recognised by the segment starting with `==`:
/// `==dHJ1ZQ==` has the key `=` and the value `dHJ1ZQ==`.
pub fn split_base64(segment: &str) -> Result<(&str, &str)> {
    if let Some(value) = segment.strip_prefix("==") {
        return Ok(("=", value));
    }
    segment.split_once('=').ok_or_else(|| Error::malformed(segment))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{segments, split_base64, split_raw, strip_prefix};
    use crate::error::Error;

    #[test]
    fn strip_empty() {
        assert!(matches!(strip_prefix(""), Err(Error::EmptyQueryString)));
        assert!(matches!(strip_prefix("?"), Err(Error::EmptyQueryString)));
        assert_eq!(strip_prefix("??a=1").unwrap(), "?a=1");
        assert_eq!(strip_prefix("a=1").unwrap(), "a=1");
    }

    #[test]
    fn segments_keep_empty() {
        assert_eq!(segments("a=1&&b=2").collect::<Vec<_>>(), ["a=1", "", "b=2"]);
    }

    #[test]
    fn split_raw_on_first_equals() {
        assert_eq!(split_raw("key===usb=").unwrap(), ("key", "==usb="));
        assert_eq!(split_raw("key=value=").unwrap(), ("key", "value="));
    }

    #[test]
    fn split_raw_malformed() {
        for segment in ["", "data", "q=", "=value", "="] {
            assert!(
                matches!(split_raw(segment), Err(Error::MalformedSegment(ref s)) if s == segment),
                "segment: {segment:?}"
            );
        }
    }

    #[test]
    fn split_base64_equals_key() {
        assert_eq!(split_base64("==dHJ1ZQ==").unwrap(), ("=", "dHJ1ZQ=="));
        assert_eq!(split_base64("%3D=dHJ1ZQ==").unwrap(), ("%3D", "dHJ1ZQ=="));
        assert_eq!(split_base64("q=MTIz").unwrap(), ("q", "MTIz"));
        assert_eq!(split_base64("q=").unwrap(), ("q", ""));
        assert!(matches!(split_base64("1234"), Err(Error::MalformedSegment(_))));
    }

    #[test]
    fn split_base64_keeps_extra_equals() {
        assert_eq!(split_base64("===dHJ1ZQ==").unwrap(), ("=", "=dHJ1ZQ=="));
        assert_eq!(split_base64("==").unwrap(), ("=", ""));
    }
}
