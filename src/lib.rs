//! Generate and parse URL querystrings, raw or base64 encoded.
//!
//! Two encodings are supported:
//!
//! * **raw** querystrings, `?key=value&count=3&price=3.14&flag=true`, hold
//!   a flat map of scalars. When parsing, the type of each value is
//!   inferred: booleans, integers and decimals are recognised, anything
//!   else stays a string.
//! * **base64** querystrings, `?q=eyJrZXkiOiAidmFsdWUifQ==`, hold a JSON
//!   document of any shape, encoded with the URL-safe base64 alphabet.
//!
//! [`parse_auto`] reads querystrings that mix both, deciding field by field.
//!
//! ## Exact numbers
//!
//! Decimal values never go through binary floating point: `0.1` is decoded
//! to exactly one tenth, whether it comes from a raw value or from a JSON
//! number, and is written back out as `0.1`. See [`Value`].
//!
//! ## Usage
//!
//! ```
//! use qs_manager::{Map, Value};
//!
//! let mut params = Map::new();
//! params.insert("name".into(), Value::from("Acme"));
//! params.insert("id".into(), Value::from(42));
//! params.insert("price".into(), Value::decimal("-3.14").unwrap());
//! params.insert("active".into(), Value::from(true));
//!
//! let raw = qs_manager::encode_raw(&params, None).unwrap();
//! assert_eq!(raw, "?name=Acme&id=42&price=-3.14&active=true");
//! assert_eq!(qs_manager::decode_raw(&raw, true).unwrap(), params);
//!
//! let nested = Value::from(vec![Value::Object(params.clone()), Value::Null]);
//! let encoded = qs_manager::encode_base64(&nested, "q").unwrap();
//! assert_eq!(qs_manager::decode_base64(&encoded).unwrap()["q"], nested);
//!
//! let mixed = qs_manager::parse_auto("?q=eyJrZXkiOiAidmFsdWUifQ==&test2=-3.14").unwrap();
//! assert_eq!(mixed["q"].as_object().unwrap()["key"], Value::from("value"));
//! assert_eq!(mixed["test2"], Value::decimal("-3.14").unwrap());
//! ```

mod config;
mod de;
mod error;
mod ser;
mod value;

pub mod scalar;

use serde::Serialize;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use error::{EncodingError, Error, Result};
#[doc(inline)]
pub use value::{Map, Value};

/// Generates a raw querystring from a non-empty map of scalars.
///
/// `safe_chars` overrides the characters left unescaped, see
/// [`Config::safe_chars`].
///
/// ```
/// use qs_manager::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key w/ sp'ec chars".into(), Value::from("value w/ spec chars!"));
/// assert_eq!(
///     qs_manager::encode_raw(&map, None).unwrap(),
///     "?key%20w/%20sp%27ec%20chars=value%20w/%20spec%20chars!"
/// );
/// ```
pub fn encode_raw(map: &Map, safe_chars: Option<&str>) -> Result<String> {
    match safe_chars {
        Some(safe_chars) => Config::new().safe_chars(safe_chars).encode_raw(map),
        None => Config::new().encode_raw(map),
    }
}

/// Parses a raw querystring, inferring value types when `normalize` is set.
///
/// ```
/// use qs_manager::Value;
///
/// let map = qs_manager::decode_raw("?test=-1&test2=hello&test3=false&test4=.14", true).unwrap();
/// assert_eq!(map["test"], Value::from(-1));
/// assert_eq!(map["test2"], Value::from("hello"));
/// assert_eq!(map["test3"], Value::from(false));
/// assert_eq!(map["test4"], Value::decimal("0.14").unwrap());
/// ```
pub fn decode_raw(input: &str, normalize: bool) -> Result<Map> {
    Config::new().normalize_values(normalize).decode_raw(input)
}

/// Generates `?<field_name>=<base64 json>` from any value.
///
/// ```
/// use qs_manager::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".into(), Value::from("value"));
/// assert_eq!(
///     qs_manager::encode_base64(&Value::Object(map), "q").unwrap(),
///     "?q=eyJrZXkiOiAidmFsdWUifQ=="
/// );
/// ```
pub fn encode_base64(value: &Value, field_name: &str) -> Result<String> {
    Config::new().field_name(field_name).encode_base64(value)
}

/// Like [`encode_base64`], for any serializable type.
///
/// Floats are written in their shortest round-trip form.
///
/// ```
/// #[derive(serde::Serialize)]
/// struct Query {
///     test: f64,
/// }
///
/// assert_eq!(
///     qs_manager::encode_base64_serialize(&Query { test: 3.14 }, "q").unwrap(),
///     "?q=eyJ0ZXN0IjogMy4xNH0="
/// );
/// ```
pub fn encode_base64_serialize<T>(value: &T, field_name: &str) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Config::new().field_name(field_name).encode_base64_serialize(value)
}

/// Parses a querystring where every field is base64 encoded JSON.
pub fn decode_base64(input: &str) -> Result<Map> {
    Config::new().decode_base64(input)
}

/// Parses a querystring mixing raw and base64 encoded fields.
///
/// Every field is first read as base64 JSON, then as a raw value if
/// that fails. A raw value that happens to be valid base64 JSON (such
/// as `MTIz`, the encoding of `123`) is read as base64.
pub fn parse_auto(input: &str) -> Result<Map> {
    Config::new().parse_auto(input)
}
