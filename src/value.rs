//! The dynamically typed values carried by a querystring.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::{EncodingError, Error, Result};
use crate::scalar::compact_decimal;

/// A decoded querystring: field name to value, in the order the fields
/// first appeared.
pub type Map = IndexMap<String, Value>;

/// Any value that can appear in a querystring.
///
/// Raw fields only ever decode to the scalar variants
/// (`Bool`, `Integer`, `Decimal`, `String`), base64 fields may hold
/// any JSON document.
///
/// Numbers are never stored as binary floats: integers are arbitrary
/// precision, and anything with a fraction or exponent is an exact
/// [`BigDecimal`] that remembers its scale.
///
/// Equality is numeric across `Integer` and `Decimal`, so the decimal
/// `14.0` equals the integer `14`. A raw querystring cannot tell them
/// apart once written.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Parses an exact decimal from its textual form, e.g. `"3.14"`.
    ///
    /// ```
    /// use qs_manager::Value;
    ///
    /// let pi = Value::decimal("3.14").unwrap();
    /// assert_eq!(qs_manager::encode_raw(&[("pi".to_owned(), pi)].into_iter().collect(), None).unwrap(), "?pi=3.14");
    /// ```
    pub fn decimal(text: &str) -> Result<Self> {
        BigDecimal::from_str(text)
            .map(Value::Decimal)
            .map_err(|e| Error::invalid_input(format_args!("`{text}` is not a decimal: {e}")))
    }

    /// Scalars are the values allowed in a raw querystring.
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Integer(_) | Value::Decimal(_) | Value::String(_)
        )
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub const fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Integer(i), Value::Decimal(d)) | (Value::Decimal(d), Value::Integer(i)) => {
                *d == BigDecimal::from(i.clone())
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    /// Scalars are displayed in their raw querystring form, except for
    /// decimals with a far-off exponent. Nested values are displayed as JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Decimal(d) => f.write_str(&compact_decimal(d)),
            Value::String(s) => f.write_str(s),
            Value::Array(_) | Value::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Numbers are serialized through `serde_json::Number`, which keeps
/// their exact digits when the serializer is `serde_json`.
fn json_number<E: ser::Error>(text: &str) -> std::result::Result<serde_json::Number, E> {
    serde_json::Number::from_str(text).map_err(E::custom)
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => {
                if let Ok(small) = i64::try_from(i) {
                    serializer.serialize_i64(small)
                } else if let Ok(small) = u64::try_from(i) {
                    serializer.serialize_u64(small)
                } else {
                    json_number(&i.to_string())?.serialize(serializer)
                }
            }
            Value::Decimal(d) => json_number(&compact_decimal(d))?.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// JSON decimals with a scale or exponent beyond this are rejected, so
/// that writing them to a raw querystring stays a reasonable size.
pub(crate) const MAX_JSON_EXPONENT: u64 = 4096;

/// Numbers with a fraction or exponent become exact decimals built from
/// the literal JSON text, all others become integers.
fn from_json_number(text: &str) -> Result<Value> {
    let invalid = |msg: String| Error::from(EncodingError::Number(msg));

    if !text.contains(['.', 'e', 'E']) {
        return BigInt::from_str(text)
            .map(Value::Integer)
            .map_err(|e| invalid(format!("`{text}` is not an integer: {e}")));
    }

    let decimal = BigDecimal::from_str(text)
        .map_err(|e| invalid(format!("`{text}` is not a decimal: {e}")))?;
    let (_, scale) = decimal.as_bigint_and_exponent();
    if scale.unsigned_abs() > MAX_JSON_EXPONENT {
        return Err(invalid(format!(
            "`{text}` has an exponent beyond {MAX_JSON_EXPONENT}"
        )));
    }
    Ok(Value::Decimal(decimal))
}

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    /// Fails with [`EncodingError::Number`] for numbers that cannot be held
    /// exactly, or whose exponent or scale is beyond 4096.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        Ok(match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => from_json_number(&n.to_string())?,
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::try_from).collect::<Result<_>>()?)
            }
            serde_json::Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

impl TryFrom<f64> for Value {
    type Error = Error;

    /// Floats are converted through their shortest round-trip text,
    /// so `3.14_f64` becomes exactly `3.14`.
    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::invalid_input(format_args!(
                "{value} cannot be represented in a query string"
            )));
        }
        let mut buffer = ryu::Buffer::new();
        Value::decimal(buffer.format_finite(value))
    }
}

impl TryFrom<f32> for Value {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::invalid_input(format_args!(
                "{value} cannot be represented in a query string"
            )));
        }
        let mut buffer = ryu::Buffer::new();
        Value::decimal(buffer.format_finite(value))
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(BigInt::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Integer(value)
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
