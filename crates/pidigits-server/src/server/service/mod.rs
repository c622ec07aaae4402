//! HTTP service implementation.
//!
//! ## Structure
//!
//! - [`handler`] - router, shared state (`PiService`) and endpoints.
//! - [`params`] - query parameter parsing and range validation.
//! - [`error`] - error taxonomy and its HTTP mapping.

pub mod error;
pub mod handler;
pub mod params;
