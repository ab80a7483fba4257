use std::borrow::Cow;

use serde::Serialize;

use crate::error::Result;
use crate::ser::encode::DEFAULT_SAFE_CHARS;
use crate::value::{Map, Value};

/// Configuration for generating and parsing querystrings.
///
/// The free functions at the crate root use `Config::default()`;
/// build a `Config` to change any of the following.
///
/// ## Safe characters
///
/// Characters left as-is when percent-encoding raw `key=value` segments
/// and base64 field names. ASCII alphanumerics and `-._~` are never
/// encoded, and non-ASCII characters are always encoded.
///
/// Default value: `;/?!:@&=+$,.`
///
/// ```
/// use qs_manager::{Config, Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key w/ spaces".into(), Value::from("value!"));
///
/// let config = Config::new().safe_chars(" !=");
/// assert_eq!(config.encode_raw(&map).unwrap(), "?key w%2F spaces=value!");
/// ```
///
/// ## Field name
///
/// The name under which [`Config::encode_base64`] stores the encoded
/// document. Default value: `q`
///
/// ## Normalizing values
///
/// Whether [`Config::decode_raw`] infers booleans, integers and decimals
/// from raw values, or keeps every value as a string.
/// Default value: `true`
///
/// ```
/// use qs_manager::{Config, Value};
///
/// let map = Config::new().normalize_values(false).decode_raw("?test=1").unwrap();
/// assert_eq!(map["test"], Value::from("1"));
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    safe_chars: Cow<'static, str>,
    field_name: Cow<'static, str>,
    normalize_values: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            safe_chars: Cow::Borrowed(DEFAULT_SAFE_CHARS),
            field_name: Cow::Borrowed("q"),
            normalize_values: true,
        }
    }

    /// Specifies the characters that are not percent-encoded.
    pub fn safe_chars(mut self, safe_chars: &str) -> Self {
        self.safe_chars = Cow::Owned(safe_chars.to_owned());
        self
    }

    /// Specifies the field that holds base64 encoded data.
    pub fn field_name(mut self, field_name: &str) -> Self {
        self.field_name = Cow::Owned(field_name.to_owned());
        self
    }

    /// Specifies whether raw values are converted from strings to
    /// booleans, integers and decimals. Default is `true`.
    pub const fn normalize_values(mut self, normalize_values: bool) -> Self {
        self.normalize_values = normalize_values;
        self
    }

    pub(crate) fn get_safe_chars(&self) -> &str {
        &self.safe_chars
    }

    pub(crate) fn get_field_name(&self) -> &str {
        &self.field_name
    }

    pub(crate) const fn get_normalize_values(&self) -> bool {
        self.normalize_values
    }

    /// Generates a raw querystring, `?key=value&key2=value2`, from a
    /// non-empty map of scalars.
    pub fn encode_raw(&self, map: &Map) -> Result<String> {
        crate::ser::encode_raw(map, self)
    }

    /// Generates a base64 querystring, `?<field>=<base64 json>`.
    pub fn encode_base64(&self, value: &Value) -> Result<String> {
        crate::ser::encode_base64(value, self)
    }

    /// Generates a base64 querystring from any serializable value.
    pub fn encode_base64_serialize<T>(&self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        crate::ser::encode_base64_serialize(value, self)
    }

    /// Parses a raw querystring using this `Config`.
    pub fn decode_raw(&self, input: &str) -> Result<Map> {
        crate::de::decode_raw(input, self)
    }

    /// Parses a querystring where every field is base64 encoded JSON.
    pub fn decode_base64(&self, input: &str) -> Result<Map> {
        crate::de::decode_base64(input)
    }

    /// Parses a querystring mixing raw and base64 fields.
    pub fn parse_auto(&self, input: &str) -> Result<Map> {
        crate::de::parse_auto(input, self)
    }
}
