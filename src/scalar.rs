//! Conversion between scalar values and their plain-text form.
//!
//! Raw querystrings carry every value as text, so on the way out each
//! scalar is written in a canonical form, and on the way in the type is
//! inferred from the text:
//!
//! | text                   | value                 |
//! |------------------------|-----------------------|
//! | `true`, `FALSE`        | [`Value::Bool`]       |
//! | `3.14`, `-.5`, `14.`   | [`Value::Decimal`]    |
//! | `42`, `-7`             | [`Value::Integer`]    |
//! | anything else          | [`Value::String`]     |
//!
//! Decimals are built directly from their digits, so `0.1` is exactly one
//! tenth and keeps its scale when written back out.

use std::borrow::Cow;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};

use crate::error::{Error, Result};
use crate::value::Value;

/// Writes a scalar in the form used inside a raw querystring.
///
/// Nested values and `null` have no raw form and are rejected.
pub fn normalize(value: &Value) -> Result<Cow<'_, str>> {
    match value {
        Value::Bool(true) => Ok(Cow::Borrowed("true")),
        Value::Bool(false) => Ok(Cow::Borrowed("false")),
        Value::Integer(i) => Ok(Cow::Owned(i.to_string())),
        Value::Decimal(d) => Ok(Cow::Owned(plain_decimal(d))),
        Value::String(s) => Ok(Cow::Borrowed(s.as_str())),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(Error::invalid_shape(format_args!(
            "{} values cannot be written to a raw query string",
            value.type_name()
        ))),
    }
}

/// Infers the type of an already percent-decoded raw value.
pub fn denormalize(text: &str) -> Value {
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    if let Some((int_part, frac_part)) = unsigned.split_once('.') {
        if let Some(decimal) = exact_decimal(negative, int_part, frac_part) {
            return Value::Decimal(decimal);
        }
    } else if is_digits(unsigned) {
        if let Some(integer) = BigInt::parse_bytes(text.as_bytes(), 10) {
            return Value::Integer(integer);
        }
    }

    Value::String(text.to_owned())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Builds `[-]int.frac` from its unscaled digits and scale.
///
/// Either side of the point may be empty, but not both.
fn exact_decimal(negative: bool, int_part: &str, frac_part: &str) -> Option<BigDecimal> {
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let mut digits = String::with_capacity(int_part.len() + frac_part.len() + 1);
    if negative {
        digits.push('-');
    }
    digits.push_str(int_part);
    digits.push_str(frac_part);

    let unscaled = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    let scale = i64::try_from(frac_part.len()).ok()?;
    Some(BigDecimal::new(unscaled, scale))
}

/// Formats a decimal without exponent notation, keeping its scale.
///
/// `BigDecimal`'s own `Display` switches to exponent notation for
/// large and small magnitudes, which is not valid in a raw value.
pub(crate) fn plain_decimal(value: &BigDecimal) -> String {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let digits = unscaled.magnitude().to_string();
    let sign = if unscaled.sign() == Sign::Minus { "-" } else { "" };

    if scale <= 0 {
        if unscaled.sign() == Sign::NoSign {
            return "0".to_owned();
        }
        let zeros = "0".repeat(scale.unsigned_abs() as usize);
        return format!("{sign}{digits}{zeros}");
    }

    let scale = scale as usize;
    if digits.len() > scale {
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        format!("{sign}{int_part}.{frac_part}")
    } else {
        let zeros = "0".repeat(scale - digits.len());
        format!("{sign}0.{zeros}{digits}")
    }
}

/// Padding zeros allowed before [`compact_decimal`] switches to an exponent.
const MAX_PADDING_ZEROS: u64 = 64;

/// Formats a decimal for JSON and `Display`.
///
/// Same as [`plain_decimal`], unless that would take more than 64 padding
/// zeros: `1e500` is then written `1e500` rather than as 501 digits.
pub(crate) fn compact_decimal(value: &BigDecimal) -> String {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let padding = if scale <= 0 {
        scale.unsigned_abs()
    } else {
        let digits = unscaled.magnitude().to_string().len() as u64;
        scale.unsigned_abs().saturating_sub(digits)
    };

    if padding <= MAX_PADDING_ZEROS {
        plain_decimal(value)
    } else if scale < 0 {
        format!("{unscaled}e{}", scale.unsigned_abs())
    } else {
        format!("{unscaled}e-{scale}")
    }
}
