//! Parsing querystrings.
//!
//! Three entry points share the same segment handling (see [`parse`]):
//!
//! * [`decode_raw`] for `key=value` fields, with type inference,
//! * [`decode_base64`] for fields holding base64 encoded JSON,
//! * [`parse_auto`] for querystrings mixing both, field by field.
//!
//! ### Detecting the encoding of a field
//!
//! `parse_auto` first tries to read every field as base64 JSON, and only
//! when that fails reads it as a raw value. Base64 JSON is very unlikely to
//! also be a sensible raw value, and vice versa, but it is possible: the raw
//! value `MTIz` is the base64 encoding of the JSON `123`, and is decoded as
//! the integer `123` rather than the string `"MTIz"`. Callers that know the
//! format of their querystrings should use the dedicated functions.

mod decode;
mod parse;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};

use crate::config::Config;
use crate::error::Result;
use crate::scalar::denormalize;
use crate::value::{Map, Value};

use decode::decode;

/// Parses a raw querystring such as `?key=value&count=3`.
///
/// When the config normalizes values (the default), the type of every
/// value is inferred, see [`crate::scalar`].
pub(crate) fn decode_raw(input: &str, config: &Config) -> Result<Map> {
    let stripped = parse::strip_prefix(input)?;
    let mut map = Map::new();
    for segment in parse::segments(stripped) {
        let (key, value) = parse::split_raw(segment)?;
        let value = decode(value);
        let value = if config.get_normalize_values() {
            denormalize(&value)
        } else {
            Value::String(value.into_owned())
        };
        map.insert(decode(key).into_owned(), value);
    }
    Ok(map)
}

/// Parses a querystring where every value is base64 encoded JSON, such as
/// `?q=eyJrZXkiOiAidmFsdWUifQ==`.
///
/// Any field that fails to decode fails the whole call.
pub(crate) fn decode_base64(input: &str) -> Result<Map> {
    let stripped = parse::strip_prefix(input)?;
    let mut map = Map::new();
    for segment in parse::segments(stripped) {
        let (key, value) = parse::split_base64(segment)?;
        map.insert(decode(key).into_owned(), decode_json_field(value)?);
    }
    Ok(map)
}

/// Decodes the base64 then the JSON of a single field value.
///
/// The URL-safe alphabet is expected, but values produced with the
/// standard alphabet (e.g. by a browser's `btoa`) are accepted too.
/// Padding is required. Numbers out of range fail like any other bad
/// JSON, with [`EncodingError::Number`](crate::EncodingError::Number).
fn decode_json_field(encoded: &str) -> Result<Value> {
    let bytes = URL_SAFE
        .decode(encoded)
        .or_else(|err| STANDARD.decode(encoded).map_err(|_| err))?;
    let json: serde_json::Value = serde_json::from_slice(&bytes)?;
    Value::try_from(json)
}

/// Parses a querystring whose fields may be raw or base64 encoded.
///
/// Each field is decoded on its own, so `?a=1&q=eyJrZXkiOiAidmFsdWUifQ==`
/// yields both the integer `a` and the object `q`. Later fields overwrite
/// earlier ones with the same key.
pub(crate) fn parse_auto(input: &str, config: &Config) -> Result<Map> {
    let stripped = parse::strip_prefix(input)?;
    let mut map = Map::new();
    for segment in parse::segments(stripped) {
        // both formats need a key and a value
        parse::split_base64(segment)?;

        let fields = match decode_base64(segment) {
            Ok(fields) => fields,
            Err(err) => {
                tracing::trace!(segment, error = %err, "not a base64 field, parsing as raw");
                decode_raw(segment, config)?
            }
        };
        map.extend(fields);
    }
    Ok(map)
}
