use percent_encoding::percent_encode_byte;

/// Characters left unescaped by default.
///
/// These are the querystring delimiters and the sub-delimiters that are
/// legal in a URL query, so a generated querystring stays readable.
pub const DEFAULT_SAFE_CHARS: &str = ";/?!:@&=+$,.";

/// The RFC 3986 unreserved characters, which are never percent-encoded:
/// ASCII alphanumerics plus U+002D (-), U+002E (.), U+005F (_) and U+007E (~).
#[inline]
fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// Percent-encodes `input` with uppercase hex digits, leaving the
/// unreserved characters and the ASCII characters of `safe_chars` as-is.
///
/// Only ASCII characters can be exempted: non-ASCII characters are
/// always written as percent-encoded UTF-8. Spaces become `%20`; unlike
/// form encoding, `+` is never used for a space.
pub fn encode(input: &str, safe_chars: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut utf8 = [0; 4];
    for c in input.chars() {
        if is_unreserved(c) || (c.is_ascii() && safe_chars.contains(c)) {
            output.push(c);
        } else {
            for &b in c.encode_utf8(&mut utf8).as_bytes() {
                output.push_str(percent_encode_byte(b));
            }
        }
    }
    output
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{DEFAULT_SAFE_CHARS, encode};

    #[test]
    fn default_safe_chars() {
        assert_eq!(
            encode("key w/ sp'ec chars=value w/ spec chars!", DEFAULT_SAFE_CHARS),
            "key%20w/%20sp%27ec%20chars=value%20w/%20spec%20chars!"
        );
        assert_eq!(encode(";/?!:@&=+$,.-_~", DEFAULT_SAFE_CHARS), ";/?!:@&=+$,.-_~");
        assert_eq!(encode("\"#<>%", DEFAULT_SAFE_CHARS), "%22%23%3C%3E%25");
    }

    #[test]
    fn custom_safe_chars() {
        let input = "key w/ sp'ec chars=value w/ spec chars!";
        assert_eq!(encode(input, " /'!="), "key w/ sp'ec chars=value w/ spec chars!");
        assert_eq!(
            encode(input, "/'!="),
            "key%20w/%20sp'ec%20chars=value%20w/%20spec%20chars!"
        );
        assert_eq!(
            encode(input, "/'!"),
            "key%20w/%20sp'ec%20chars%3Dvalue%20w/%20spec%20chars!"
        );
    }

    #[test]
    fn unreserved_cannot_be_escaped() {
        assert_eq!(encode("a-b.c_d~e", ""), "a-b.c_d~e");
    }

    #[test]
    fn non_ascii_always_escaped() {
        assert_eq!(encode("comté", "é"), "comt%C3%A9");
        assert_eq!(encode("🦀", ""), "%F0%9F%A6%80");
    }

    #[test]
    fn control_chars_escaped() {
        assert_eq!(encode("a\tb\u{7f}", DEFAULT_SAFE_CHARS), "a%09b%7F");
    }
}
