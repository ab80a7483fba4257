use std::borrow::Cow;

/// Decodes a percent-encoded key or value.
///
/// - `%XX` sequences are decoded, malformed ones are kept literally.
/// - `+` is left alone: querystrings generated by this crate encode
///   spaces as `%20`.
/// - Invalid UTF-8 is replaced with U+FFFD.
///
/// Avoids allocating when there is nothing to decode.
pub fn decode(input: &str) -> Cow<'_, str> {
    if !input.contains('%') {
        return Cow::Borrowed(input);
    }
    percent_encoding::percent_decode_str(input).decode_utf8_lossy()
}
