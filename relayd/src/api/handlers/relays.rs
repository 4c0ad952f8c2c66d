//! Relay resource handlers

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::api::handlers::raw_relay_id;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use relayswitch_core::api::{RelayStateResponse, RelaysOverview};
use tracing::debug;

/// Lists the state of every relay.
///
/// # Endpoint
///
/// `GET /relays`
///
/// # Response
///
/// `{"relays": [{"1": false}, {"2": true}, ...]}` in relay order.
pub(crate) async fn list_relays(State(state): State<AppState>) -> Json<RelaysOverview> {
    debug!("Request: GET /relays");

    let overview: RelaysOverview = state.registry.list().await.into_iter().collect();
    Json(overview)
}

/// Reads the state of one relay.
///
/// # Endpoint
///
/// `GET /relays/:id`
///
/// # Path Parameters
///
/// - `id` - 1-based relay id; anything else, including a segment that does
///   not decode to UTF-8, is a 404
pub(crate) async fn get_relay(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RelayStateResponse>, ApiError> {
    let relay_id = raw_relay_id(path)?;
    debug!("Request: GET /relays/{}", relay_id);

    let on = state.registry.state(&relay_id).await?;
    Ok(Json(RelayStateResponse::new(on)))
}

/// Toggles one relay and returns its new state.
///
/// # Endpoint
///
/// `PUT /relays/:id/toggle`
pub(crate) async fn toggle_relay(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RelayStateResponse>, ApiError> {
    let relay_id = raw_relay_id(path)?;
    debug!("Request: PUT /relays/{}/toggle", relay_id);

    let on = state.registry.toggle(&relay_id).await?;
    Ok(Json(RelayStateResponse::new(on)))
}

/// Turns one relay on. Empty 200 on success.
///
/// # Endpoint
///
/// `PUT /relays/:id/on`
pub(crate) async fn turn_on_relay(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<(), ApiError> {
    let relay_id = raw_relay_id(path)?;
    debug!("Request: PUT /relays/{}/on", relay_id);

    state.registry.turn_on(&relay_id).await?;
    Ok(())
}

/// Turns one relay off. Empty 200 on success.
///
/// # Endpoint
///
/// `PUT /relays/:id/off`
pub(crate) async fn turn_off_relay(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<(), ApiError> {
    let relay_id = raw_relay_id(path)?;
    debug!("Request: PUT /relays/{}/off", relay_id);

    state.registry.turn_off(&relay_id).await?;
    Ok(())
}
