//! myStrom WiFi Switch emulation
//!
//! Reproduces the switch's REST API (`/relay`, `/toggle`, `/report`) for the
//! default relay, so home automation integrations written for the myStrom
//! plug can drive one relay of the board unchanged. These paths never take a
//! relay id.

use crate::api::error::ApiError;
use crate::api::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use relayswitch_core::api::RelayStateResponse;
use relayswitch_core::SwitchCommand;
use tracing::debug;

/// Switches the default relay on or off.
///
/// # Endpoint
///
/// `GET /relay?state=1` or `GET /relay?state=0`
///
/// # Compatibility
///
/// Any `state` other than exactly `1` or `0`, a missing `state`, or a
/// query that does not parse answers with the 404 page, not a 400. When
/// `state` is repeated the last value wins.
pub(crate) async fn set_state(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<(), ApiError> {
    let params = query.map(|Query(params)| params).unwrap_or_default();
    let value = params
        .iter()
        .rev()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.as_str());

    debug!("Request: GET /relay?state={:?}", value);

    let command = SwitchCommand::from_legacy_state(value)?;
    let relay = state.registry.relay(state.default_relay)?;
    match command {
        SwitchCommand::On => relay.turn_on().await,
        SwitchCommand::Off => relay.turn_off().await,
    }
    Ok(())
}

/// Toggles the default relay. Empty 200 on success.
///
/// # Endpoint
///
/// `GET /toggle`
pub(crate) async fn toggle(State(state): State<AppState>) -> Result<(), ApiError> {
    debug!("Request: GET /toggle");

    state.registry.relay(state.default_relay)?.toggle().await;
    Ok(())
}

/// Reports the state of the default relay.
///
/// # Endpoint
///
/// `GET /report`
///
/// # Response
///
/// `{"relay": true}`
pub(crate) async fn report(
    State(state): State<AppState>,
) -> Result<Json<RelayStateResponse>, ApiError> {
    debug!("Request: GET /report");

    let on = state.registry.relay(state.default_relay)?.is_on().await;
    Ok(Json(RelayStateResponse::new(on)))
}
