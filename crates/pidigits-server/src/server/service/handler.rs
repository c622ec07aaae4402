//! HTTP handlers for the pidigits service.
//!
//! This module defines [`PiService`], the shared state behind the router, and
//! the two endpoints it serves:
//!
//! - `GET /pidigits/?digits=D[&limit=L]`: validate, compute pi to `D` digits,
//!   return the first `L + 2` (or `D + 2`) characters as plain text.
//! - `GET /healthz`: constant liveness payload.
//!
//! ## Responsibilities
//!
//! - Validate query parameters before any computation is attempted.
//! - Run the CPU-bound digit provider on the blocking thread pool so it never
//!   stalls the async executor.
//! - Translate provider and validation failures into JSON error responses.

use crate::server::{
    config::ServerConfig,
    service::{
        error::ApiError,
        params::{PiDigitsQuery, PiDigitsRequest, truncate},
    },
    telemetry::{increment_requests, record_compute_duration, record_digits_requested},
};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use pidigits::{Chudnovsky, DigitProvider};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Instant};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared, cheaply cloneable state for every request.
///
/// Holds the runtime configuration and the digit provider. Requests share
/// nothing mutable; each one validates, computes and truncates independently.
#[derive(Clone)]
pub struct PiService {
    config: ServerConfig,
    provider: Arc<dyn DigitProvider>,
}

impl PiService {
    /// Creates a service backed by the [`Chudnovsky`] provider.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_provider(config, Chudnovsky)
    }

    /// Creates a service backed by an arbitrary provider.
    pub fn with_provider(config: ServerConfig, provider: impl DigitProvider + 'static) -> Self {
        Self {
            config,
            provider: Arc::new(provider),
        }
    }

    /// Computes pi for a validated request and cuts it to the output length.
    ///
    /// The provider call runs on Tokio's blocking pool and is never cancelled:
    /// once started it runs to completion even if the client goes away.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Provider`] if the provider fails.
    /// - [`ApiError::Internal`] if the blocking task panics.
    pub async fn digits(&self, request: PiDigitsRequest) -> Result<String, ApiError> {
        let provider = Arc::clone(&self.provider);
        let digits = request.digits;
        record_digits_requested(f64::from(digits));

        let start = Instant::now();
        let computed = tokio::task::spawn_blocking(move || provider.pi_digits(digits))
            .await
            .map_err(|e| ApiError::Internal {
                context: format!("digit computation task failed: {e}"),
            })??;
        let elapsed = start.elapsed();
        record_compute_duration(elapsed.as_secs_f64() * 1000.0);
        tracing::debug!(digits, ?elapsed, "digits computed");

        Ok(truncate(computed, request.output_len()))
    }

    async fn handle(
        &self,
        query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    ) -> Result<String, ApiError> {
        let Query(pairs) = query?;
        let request = PiDigitsQuery::from_pairs(pairs)?.validate(self.config.max_digits)?;

        let span = tracing::Span::current();
        span.record("digits", request.digits);
        if let Some(limit) = request.limit {
            span.record("limit", limit);
        }

        self.digits(request).await
    }
}

/// Builds the application router with request tracing and permissive CORS.
pub fn router(service: PiService) -> Router {
    Router::new()
        .route("/pidigits/", get(pidigits))
        .route("/pidigits", get(pidigits))
        .route("/healthz", get(healthz))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[tracing::instrument(
    skip_all,
    fields(digits = tracing::field::Empty, limit = tracing::field::Empty)
)]
async fn pidigits(
    State(service): State<PiService>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    increment_requests();

    match service.handle(query).await {
        Ok(body) => body.into_response(),
        Err(err) => err
            .into_error_response(service.config.error_detail, service.config.max_digits)
            .into_response(),
    }
}

/// Liveness payload of `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
