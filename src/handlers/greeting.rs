//! Read-only endpoints bound from configuration at startup.
//!
//! - `GET /greeting` - `greeting.name` as plain text
//! - `GET /greeting/coffee` - `greeting.coffee` as plain text
//! - `GET /droid` - the configured droid as JSON

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::models::Droid;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn get_greeting(State(state): State<AppState>) -> String {
    state.greeting.name.clone()
}

#[instrument(skip(state))]
pub async fn get_greeting_coffee(State(state): State<AppState>) -> String {
    state.greeting.coffee.clone()
}

#[instrument(skip(state))]
pub async fn get_droid(State(state): State<AppState>) -> Json<Droid> {
    Json(state.droid.as_ref().clone())
}
