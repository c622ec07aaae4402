//! Error types for the pidigits HTTP service.
//!
//! [`ApiError`] captures every way a request can fail. It is translated into an
//! HTTP status and a JSON `{"detail": ...}` body at the request boundary:
//!
//! - `Validation`: missing, non-integer or out-of-range query parameters (400).
//! - `Provider`: the digit provider refused the precision (400) or failed in
//!   some other way (500).
//! - `Internal`: the computation task could not be joined (500).
//!
//! Server-side failures never expose their message to the client.

use crate::server::{config::ErrorDetail, telemetry::increment_request_errors};
use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Detail returned for every 5xx response.
pub const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request's query parameters are invalid.
    #[error("{detail}")]
    Validation { detail: String },

    /// The digit provider returned an error.
    #[error(transparent)]
    Provider(#[from] pidigits::Error),

    /// The request could not be completed for reasons unrelated to its input.
    #[error("Internal error: {context}")]
    Internal { context: String },
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation {
            detail: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Provider(err) if err.is_recoverable() => StatusCode::BAD_REQUEST,
            Self::Provider(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Resolves the response for this error under the given detail policy.
    ///
    /// `max_digits` is only used to phrase the generic client error message.
    pub fn into_error_response(self, policy: ErrorDetail, max_digits: u32) -> ErrorResponse {
        let status = self.status();
        increment_request_errors(status.as_u16());

        let detail = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            INTERNAL_DETAIL.to_string()
        } else {
            tracing::warn!(error = %self, "request rejected");
            match policy {
                ErrorDetail::Verbatim => self.to_string(),
                ErrorDetail::Generic => generic_detail(max_digits),
            }
        };

        ErrorResponse { status, detail }
    }
}

/// The fixed client error message used with [`ErrorDetail::Generic`].
pub fn generic_detail(max_digits: u32) -> String {
    format!(
        "Invalid request: digits must be an integer with 0 < digits < {max_digits} \
         and limit, if given, an integer with 0 < limit < {max_digits}"
    )
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// A resolved error: status code plus the detail shown to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub detail: String,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pidigits::MAX_DIGITS;

    #[test]
    fn validation_is_bad_request() {
        let err = ApiError::Validation {
            detail: "digits: Input should be greater than or equal to 0".to_string(),
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let resolved = err.into_error_response(ErrorDetail::Verbatim, MAX_DIGITS);
        assert_eq!(
            resolved.detail,
            "digits: Input should be greater than or equal to 0"
        );
    }

    #[test]
    fn recoverable_provider_errors_are_bad_request() {
        let invalid = ApiError::from(pidigits::Error::InvalidPrecision {
            reason: "must be greater than 0".to_string(),
        });
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let overflow = ApiError::from(pidigits::Error::Unrepresentable { digits: u32::MAX });
        assert_eq!(overflow.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_detail_is_echoed_verbatim() {
        let err = ApiError::from(pidigits::Error::InvalidPrecision {
            reason: "must be greater than 0".to_string(),
        });
        let resolved = err.into_error_response(ErrorDetail::Verbatim, MAX_DIGITS);
        assert_eq!(resolved.detail, "Invalid digits: must be greater than 0");
    }

    #[test]
    fn generic_policy_hides_the_underlying_message() {
        let err = ApiError::Validation {
            detail: "limit: Input should be greater than 0".to_string(),
        };
        let resolved = err.into_error_response(ErrorDetail::Generic, 100);
        assert_eq!(resolved.status, StatusCode::BAD_REQUEST);
        assert_eq!(resolved.detail, generic_detail(100));
        assert!(resolved.detail.contains("< 100"));
    }

    #[test]
    fn error_response_carries_status_and_json_detail() {
        let response = ApiError::Validation {
            detail: "digits: Field required".to_string(),
        }
        .into_error_response(ErrorDetail::Verbatim, MAX_DIGITS)
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn generic_detail_excludes_zero_digits() {
        let detail = generic_detail(MAX_DIGITS);
        assert!(detail.contains(&format!("0 < digits < {MAX_DIGITS}")), "{detail}");
        assert!(!detail.contains("0 <= digits"), "{detail}");
    }

    #[test]
    fn server_errors_never_leak_context() {
        for err in [
            ApiError::from(pidigits::Error::Unknown {
                context: "secret".to_string(),
            }),
            ApiError::Internal {
                context: "task panicked".to_string(),
            },
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let resolved = err.into_error_response(ErrorDetail::Verbatim, MAX_DIGITS);
            assert_eq!(resolved.detail, INTERNAL_DETAIL);
        }
    }
}
