//! Request and response types for the HTTP API.

use serde::Serialize;
use serde_json::Value;

use bellq_hal::Counts;

use crate::error::ApiError;

/// Message returned with every successful run.
pub const SUCCESS_MESSAGE: &str = "Quantum circuit executed successfully.";

/// Error text for a `shots` value that cannot be read as an integer.
pub const SHOTS_NOT_A_NUMBER: &str = "Shots must be a number";

/// Requested number of repetitions.
///
/// Zero and negative values are kept as requested; the backend rejects them
/// at run time. Values beyond the `i64` range saturate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShotCount(pub i64);

impl ShotCount {
    /// Read the `shots` field of a request body.
    ///
    /// A missing field yields `default`. Integers pass through, floats are
    /// truncated toward zero, booleans become 1 or 0 and strings must hold a
    /// decimal integer. Everything else is a bad request.
    pub fn from_field(field: Option<&Value>, default: u32) -> Result<Self, ApiError> {
        let Some(value) = field else {
            return Ok(ShotCount(i64::from(default)));
        };

        let shots = match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(i)
                } else if n.as_u64().is_some() {
                    Some(i64::MAX)
                } else {
                    n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
                }
            }
            Value::Bool(b) => Some(i64::from(*b)),
            Value::String(s) => parse_integer(s),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        };

        shots
            .map(ShotCount)
            .ok_or_else(|| ApiError::BadRequest(SHOTS_NOT_A_NUMBER.to_string()))
    }
}

/// Parse a decimal integer string.
///
/// Leading and trailing whitespace is ignored, an optional `+`/`-` sign is
/// allowed and single underscores may separate digits (`1_000`).
fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }

    let mut value: i64 = 0;
    let mut prev_underscore = false;
    for c in digits.chars() {
        if c == '_' {
            if prev_underscore {
                return None;
            }
            prev_underscore = true;
            continue;
        }
        prev_underscore = false;
        let digit = i64::from(c.to_digit(10)?);
        value = value.saturating_mul(10).saturating_add(digit);
    }

    Some(if negative { -value } else { value })
}

/// Body of a successful `POST /run-circuit`.
#[derive(Debug, Clone, Serialize)]
pub struct RunCircuitResponse {
    pub message: String,
    pub results: Counts,
}

impl RunCircuitResponse {
    pub fn new(results: Counts) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            results,
        }
    }
}
