use std::fmt::Display;

use thiserror::Error;

/// Errors raised while generating or parsing a querystring.
#[derive(Debug, Error)]
pub enum Error {
    /// The value could not be turned into a querystring at all,
    /// e.g. a non-finite float or a map with non-string keys.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The input was empty, or only contained the leading `?`.
    #[error("cannot parse a query string from an empty string")]
    EmptyQueryString,

    /// A `key=value` segment could not be split into its two parts.
    #[error("malformed query string segment: `{0}`")]
    MalformedSegment(String),

    /// The value of a base64 field was not base64, not JSON, or held a
    /// number out of range.
    #[error(transparent)]
    InvalidEncoding(#[from] EncodingError),

    /// A raw querystring was requested for data that is not a
    /// non-empty map of scalars.
    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

/// The underlying failure of a base64 field.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid json data: {0}")]
    Json(#[from] serde_json::Error),
    /// A JSON number that has no exact [`Value`](crate::Value) form.
    #[error("invalid json number: {0}")]
    Number(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Generate an error for a segment missing its key, value, or `=`.
    pub fn malformed<T: Into<String>>(segment: T) -> Self {
        Error::MalformedSegment(segment.into())
    }

    /// Generate an error for a value that has no flat representation.
    pub fn invalid_shape<T: Display>(msg: T) -> Self {
        Error::InvalidShape(msg.to_string())
    }

    pub fn invalid_input<T: Display>(msg: T) -> Self {
        Error::InvalidInput(msg.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::InvalidEncoding(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidEncoding(err.into())
    }
}
