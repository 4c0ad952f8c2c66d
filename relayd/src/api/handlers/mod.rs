//! API request handlers for the relay daemon REST API.
//!
//! # Handler Modules
//!
//! - [`relays`] - Relay resource endpoints addressed by 1-based id
//! - [`legacy`] - myStrom WiFi Switch endpoints bound to the default relay
//!
//! All handlers accept `State<AppState>` and return `Result<_, ApiError>`.
//! Every failure is the canonical 404 page, whichever surface raised it.

pub mod legacy;
pub mod relays;

use crate::api::error::ApiError;
use axum::extract::{rejection::PathRejection, Path};
use axum::http::Uri;

/// Raw relay id from the path.
///
/// A segment axum cannot decode is an unknown relay like any other.
pub(crate) fn raw_relay_id(
    path: Result<Path<String>, PathRejection>,
) -> Result<String, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::not_found(rejection.body_text()))
}

/// Fallback for unrouted paths
pub(crate) async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("no route for {}", uri.path()))
}
