//! Scalar grammars and array parsing for type candidates.
//!
//! Raw strings are parsed strictly: no trimming, no locale handling.
//! - INTEGER: `[+-]?[0-9]+`, fitting in `i64`
//! - FLOAT: `[+-]?[0-9]+(\.[0-9]+)?`
//! - BOOLEAN: one of [`TRUTHY`] / [`FALSY`], case-insensitive
//! - ENUM: exact match against the domain's raw values
//! - STRING: anything

mod split;

pub use split::{ARRAY_DELIMITER, ESCAPE, split};

use crate::schema::{CandidateShape, EnumDomain, TypeCandidate};
use crate::value::Value;

/// Tokens accepted as `true`.
pub const TRUTHY: &[&str] = &["true", "1", "yes", "y", "on"];

/// Tokens accepted as `false`.
pub const FALSY: &[&str] = &["false", "0", "no", "n", "off"];

/// Why a raw string did not parse as a candidate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CastFailure {
    /// Not an optional sign followed by digits.
    #[error("\"{0}\" is not an integer")]
    NotInteger(String),

    /// Well-formed but outside the `i64` range.
    #[error("\"{0}\" does not fit in a 64-bit integer")]
    IntegerOutOfRange(String),

    /// Not a decimal number.
    #[error("\"{0}\" is not a number")]
    NotFloat(String),

    /// Not a recognized boolean token.
    #[error("\"{0}\" is not a recognized boolean token")]
    NotBoolean(String),

    /// Not a raw value of the enum domain.
    #[error("\"{0}\" is not one of the allowed values")]
    NotInDomain(String),

    /// Nested candidates are resolved from their own keys, never from a raw string.
    #[error("nested values cannot be parsed from a single string")]
    NotScalar,

    /// An array element failed.
    #[error("element {index}: {failure}")]
    Element {
        /// Zero-based element position
        index: usize,
        /// Failure of that element
        failure: Box<CastFailure>,
    },
}

/// Parse `raw` according to a scalar candidate, splitting first in array mode.
pub fn cast(candidate: &TypeCandidate, raw: &str) -> Result<Value, CastFailure> {
    if !candidate.is_array() {
        return cast_scalar(candidate.shape(), raw);
    }
    split(raw)
        .iter()
        .enumerate()
        .map(|(index, item)| {
            cast_scalar(candidate.shape(), item).map_err(|failure| CastFailure::Element {
                index,
                failure: Box::new(failure),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn cast_scalar(shape: &CandidateShape, raw: &str) -> Result<Value, CastFailure> {
    match shape {
        CandidateShape::Integer => parse_integer(raw).map(Value::Integer),
        CandidateShape::Float => parse_float(raw).map(Value::Float),
        CandidateShape::Boolean => parse_boolean(raw).map(Value::Boolean),
        CandidateShape::String => Ok(Value::String(raw.to_string())),
        CandidateShape::Enum(domain) => parse_enum(domain, raw),
        CandidateShape::Nested { .. } => Err(CastFailure::NotScalar),
    }
}

fn unsigned_part(raw: &str) -> &str {
    raw.strip_prefix(['+', '-']).unwrap_or(raw)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a signed decimal integer.
pub fn parse_integer(raw: &str) -> Result<i64, CastFailure> {
    if !all_digits(unsigned_part(raw)) {
        return Err(CastFailure::NotInteger(raw.to_string()));
    }
    raw.parse::<i64>()
        .map_err(|_| CastFailure::IntegerOutOfRange(raw.to_string()))
}

/// Parse a signed decimal number with an optional fractional part.
pub fn parse_float(raw: &str) -> Result<f64, CastFailure> {
    let unsigned = unsigned_part(raw);
    let well_formed = match unsigned.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(unsigned),
    };
    if !well_formed {
        return Err(CastFailure::NotFloat(raw.to_string()));
    }
    raw.parse::<f64>()
        .map_err(|_| CastFailure::NotFloat(raw.to_string()))
}

/// Parse a boolean token.
pub fn parse_boolean(raw: &str) -> Result<bool, CastFailure> {
    if TRUTHY.iter().any(|token| token.eq_ignore_ascii_case(raw)) {
        Ok(true)
    } else if FALSY.iter().any(|token| token.eq_ignore_ascii_case(raw)) {
        Ok(false)
    } else {
        Err(CastFailure::NotBoolean(raw.to_string()))
    }
}

fn parse_enum(domain: &EnumDomain, raw: &str) -> Result<Value, CastFailure> {
    domain
        .find(raw)
        .cloned()
        .map(Value::Enum)
        .ok_or_else(|| CastFailure::NotInDomain(raw.to_string()))
}
