//! API module for the relay daemon
//!
//! Contains the REST API implementation with Axum router and handlers.
//! Two surfaces share one [`RelayRegistry`]: the resource API under
//! `/relays` and the myStrom-compatible endpoints bound to the default relay.

pub(crate) mod handlers;

use crate::relays::RelayRegistry;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, put},
    Router,
};
use relayswitch_core::{RelayId, Result};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Application state shared across all handlers
#[derive(Clone)]
pub(crate) struct AppState {
    /// Every relay on the board
    pub registry: Arc<RelayRegistry>,
    /// Relay driven by the myStrom-compatible endpoints
    pub default_relay: RelayId,
}

impl AppState {
    /// Create new application state
    ///
    /// Fails if `default_relay` does not address a relay in `registry`.
    pub fn new(registry: Arc<RelayRegistry>, default_relay: RelayId) -> Result<Self> {
        registry.relay(default_relay)?;
        Ok(Self {
            registry,
            default_relay,
        })
    }
}

/// Create the main API router with all endpoints
pub(crate) fn create_router(state: AppState) -> Router {
    info!("Setting up API router...");

    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET, Method::PUT])
        .allow_headers(tower_http::cors::Any);

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Router::new()
        // myStrom WiFi Switch emulation (default relay only)
        .route("/relay", get(handlers::legacy::set_state))
        .route("/toggle", get(handlers::legacy::toggle))
        .route("/report", get(handlers::legacy::report))
        // Relay resource endpoints
        .route("/relays", get(handlers::relays::list_relays))
        .route("/relays/:id", get(handlers::relays::get_relay))
        .route("/relays/:id/toggle", put(handlers::relays::toggle_relay))
        .route("/relays/:id/on", put(handlers::relays::turn_on_relay))
        .route("/relays/:id/off", put(handlers::relays::turn_off_relay))
        .fallback(handlers::not_found)
        .layer(middleware_stack)
        .with_state(state)
}

/// Error handling utilities
pub(crate) mod error {
    use axum::{
        http::{header, StatusCode},
        response::{IntoResponse, Response},
    };
    use relayswitch_core::api::NOT_FOUND_BODY;
    use relayswitch_core::RelaySwitchError;
    use tracing::{debug, error};

    /// Custom error type for API responses
    #[derive(Debug)]
    pub struct ApiError {
        pub status_code: StatusCode,
        pub message: String,
    }

    impl ApiError {
        /// Create a new API error
        pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
            Self {
                status_code,
                message: message.into(),
            }
        }

        /// Create the canonical not found error
        pub fn not_found(message: impl Into<String>) -> Self {
            Self::new(StatusCode::NOT_FOUND, message)
        }

        /// Create an internal server error
        pub fn internal_error(message: impl Into<String>) -> Self {
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            if self.status_code == StatusCode::NOT_FOUND {
                debug!("Not found: {}", self.message);
                return (
                    StatusCode::NOT_FOUND,
                    [(header::CONTENT_TYPE, "text/html; charset=UTF-8")],
                    NOT_FOUND_BODY,
                )
                    .into_response();
            }

            error!("API Error {}: {}", self.status_code, self.message);
            (self.status_code, self.message).into_response()
        }
    }

    /// Convert RelaySwitchError to ApiError
    impl From<RelaySwitchError> for ApiError {
        fn from(err: RelaySwitchError) -> Self {
            match err {
                RelaySwitchError::NotFound(msg) => Self::not_found(msg),
                _ => Self::internal_error(err.to_string()),
            }
        }
    }
}

/// Router fixtures backed by mock drivers
#[cfg(test)]
pub(crate) mod test_support {
    use super::{create_router, AppState};
    use crate::relays::RelayRegistry;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use relayswitch_core::RelayId;
    use relayswitch_hardware::{MockProbe, MockSwitch, SwitchDriver};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Router over `count` mock relays, all off, with the given 0-based default relay
    pub fn mock_app(count: usize, default_index: usize) -> (Router, Vec<MockProbe>) {
        let switches: Vec<MockSwitch> = (0..count).map(|i| MockSwitch::new(i as u8)).collect();
        let probes = switches.iter().map(MockSwitch::probe).collect();
        let drivers = switches
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn SwitchDriver>)
            .collect();

        let registry = Arc::new(RelayRegistry::new(drivers));
        let state = AppState::new(registry, RelayId::from_index(default_index)).unwrap();
        (create_router(state), probes)
    }

    /// Send a request and return status and body text
    pub async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// State of every mock relay
    pub fn states(probes: &[MockProbe]) -> Vec<bool> {
        probes.iter().map(MockProbe::is_on).collect()
    }
}
