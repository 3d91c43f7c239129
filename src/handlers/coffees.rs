//! Coffee CRUD handlers.
//!
//! # Endpoints
//!
//! - `GET /coffees` - List all coffees
//! - `GET /coffees/{id}` - Get one coffee (404 if absent)
//! - `POST /coffees` - Create a coffee, generating an id if none is given (201)
//! - `PUT /coffees/{id}` - Create (201) or replace (200) the coffee at `id`
//! - `DELETE /coffees/{id}` - Delete a coffee (204, also when absent)

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use super::AppJson;
use crate::error::{AppError, AppResult};
use crate::models::{Coffee, CoffeeRequest};
use crate::state::AppState;

/// List all coffees.
#[instrument(skip(state))]
pub async fn list_coffees(State(state): State<AppState>) -> AppResult<Json<Vec<Coffee>>> {
    Ok(Json(state.coffees.list().await?))
}

/// Get a specific coffee by id.
#[instrument(skip(state))]
pub async fn get_coffee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Coffee>> {
    state
        .coffees
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Coffee '{id}' not found")))
}

/// Create a new coffee.
///
/// # Request Body
///
/// ```json
/// { "name": "Cafe Test" }
/// ```
///
/// An `id` may be included; an existing record with that id is replaced.
#[instrument(skip(state, payload))]
pub async fn create_coffee(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CoffeeRequest>,
) -> AppResult<(StatusCode, Json<Coffee>)> {
    let coffee = state.coffees.create(payload).await?;
    Ok((StatusCode::CREATED, Json(coffee)))
}

/// Create or replace the coffee at `id`.
///
/// The path id is the one stored; an `id` in the body is ignored.
#[instrument(skip(state, payload))]
pub async fn upsert_coffee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CoffeeRequest>,
) -> AppResult<(StatusCode, Json<Coffee>)> {
    let upserted = state.coffees.upsert(&id, payload).await?;

    let status = if upserted.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(upserted.coffee)))
}

/// Delete a coffee by id.
#[instrument(skip(state))]
pub async fn delete_coffee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.coffees.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
