//! Generating querystrings.
//!
//! Both formats start with `?` and are ready to be appended to a URL:
//!
//! * raw: `?key=value&count=3`, one percent-encoded segment per entry of
//!   a flat map.
//! * base64: `?q=eyJrZXkiOiAidmFsdWUifQ==`, a single field holding the
//!   URL-safe base64 encoding of a JSON document.

pub(crate) mod encode;
pub(crate) mod json;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::scalar::normalize;
use crate::value::{Map, Value};

/// Generates a raw querystring from a flat map.
///
/// Each value is normalized (`true`, `42`, `3.14`, ...), then the whole
/// `key=value` segment is percent-encoded, leaving the configured safe
/// characters as they are. Because the delimiters `&` and `=` are safe
/// by default, keys and values containing them will not survive a
/// round trip unless the safe characters are changed.
pub(crate) fn encode_raw(map: &Map, config: &Config) -> Result<String> {
    if map.is_empty() {
        return Err(Error::invalid_shape(
            "cannot generate a query string from an empty map",
        ));
    }

    let safe_chars = config.get_safe_chars();
    let mut output = String::with_capacity(64);
    for (key, value) in map {
        let normalized = normalize(value).map_err(|err| {
            tracing::debug!(key = %key, kind = value.type_name(), "rejecting non-scalar value");
            err
        })?;
        output.push(if output.is_empty() { '?' } else { '&' });
        output.push_str(&encode::encode(&format!("{key}={normalized}"), safe_chars));
    }
    Ok(output)
}

/// Generates `?<field>=<base64>` from a [`Value`].
pub(crate) fn encode_base64(value: &Value, config: &Config) -> Result<String> {
    encode_base64_serialize(value, config)
}

/// Generates `?<field>=<base64>` from any serializable value.
///
/// The value is written as JSON with [`json::SpacedFormatter`], then
/// encoded with the padded URL-safe base64 alphabet.
pub(crate) fn encode_base64_serialize<T>(value: &T, config: &Config) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let json = json::to_vec(value).map_err(Error::invalid_input)?;
    Ok(format!(
        "?{}={}",
        encode::encode(config.get_field_name(), config.get_safe_chars()),
        URL_SAFE.encode(json)
    ))
}
