//! Query parameters of `GET /pidigits/` and their validation.
//!
//! The query string is extracted as raw key/value pairs. A repeated key keeps
//! its last value, surrounding whitespace is ignored (a literal `+` decodes to
//! a space) and unknown keys are skipped. Values are parsed as signed 64-bit
//! integers so that negative and oversized values reach
//! [`PiDigitsQuery::validate`] and get a range error instead of a parse error.

use crate::server::service::error::ApiError;
use core::num::{IntErrorKind, ParseIntError};
use pidigits::PREFIX_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiDigitsQuery {
    pub digits: i64,
    pub limit: Option<i64>,
}

/// A request whose parameters are within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiDigitsRequest {
    /// Precision passed to the digit provider.
    pub digits: u32,
    /// Number of fractional digits returned, if different from `digits`.
    pub limit: Option<u32>,
}

impl PiDigitsQuery {
    /// Builds the query from decoded `(key, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `digits` is missing or either
    /// parameter is not an integer.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut digits = None;
        let mut limit = None;
        for (key, value) in pairs {
            match key.as_str() {
                "digits" => digits = Some(value),
                "limit" => limit = Some(value),
                _ => {}
            }
        }

        let digits = digits.ok_or_else(|| ApiError::Validation {
            detail: "digits: Field required".to_string(),
        })?;
        Ok(Self {
            digits: integer("digits", &digits)?,
            limit: limit.map(|limit| integer("limit", &limit)).transpose()?,
        })
    }

    /// Checks `0 <= digits < max_digits` and, if present,
    /// `0 < limit < max_digits`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the first offending parameter.
    pub fn validate(self, max_digits: u32) -> Result<PiDigitsRequest, ApiError> {
        let digits = bounded("digits", self.digits, Lower::Inclusive(0), max_digits)?;
        let limit = self
            .limit
            .map(|limit| bounded("limit", limit, Lower::Exclusive(0), max_digits))
            .transpose()?;
        Ok(PiDigitsRequest { digits, limit })
    }
}

impl PiDigitsRequest {
    /// Number of characters of the provider's output returned to the client:
    /// the fractional digits asked for plus the `"3."` prefix.
    pub fn output_len(&self) -> usize {
        self.limit.unwrap_or(self.digits) as usize + PREFIX_LEN
    }
}

fn integer(name: &str, raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|e: ParseIntError| {
        let detail = match e.kind() {
            IntErrorKind::PosOverflow => format!("Input should be less than {}", i64::MAX),
            IntErrorKind::NegOverflow => format!("Input should be greater than {}", i64::MIN),
            _ => "Input should be a valid integer, unable to parse string as an integer"
                .to_string(),
        };
        ApiError::Validation {
            detail: format!("{name}: {detail}"),
        }
    })
}

#[derive(Clone, Copy)]
enum Lower {
    Inclusive(i64),
    Exclusive(i64),
}

fn bounded(name: &str, value: i64, lower: Lower, upper: u32) -> Result<u32, ApiError> {
    let invalid = |detail: String| ApiError::Validation {
        detail: format!("{name}: {detail}"),
    };

    match lower {
        Lower::Inclusive(min) if value < min => {
            return Err(invalid(format!(
                "Input should be greater than or equal to {min}"
            )));
        }
        Lower::Exclusive(min) if value <= min => {
            return Err(invalid(format!("Input should be greater than {min}")));
        }
        _ => {}
    }

    if value >= i64::from(upper) {
        return Err(invalid(format!("Input should be less than {upper}")));
    }

    u32::try_from(value).map_err(|_| invalid(format!("Input should be less than {upper}")))
}

/// Returns the first `len` characters of `digits`, or all of it if shorter.
pub fn truncate(mut digits: String, len: usize) -> String {
    if let Some((end, _)) = digits.char_indices().nth(len) {
        digits.truncate(end);
    }
    digits
}
