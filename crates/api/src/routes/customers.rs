//! Customer CRUD handlers.
//!
//! Handlers stay thin: translate the wire payload, call the service,
//! wrap the result. Failure shaping lives in `error` and `extract`.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use customer_registry_core::CustomerId;

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{Customer, CustomerPayload};
use crate::state::AppState;

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(remove))
}

/// `GET /customers`
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    Ok(Json(state.customers().get_all().await?))
}

/// `GET /customers/{id}`
async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Customer>> {
    let customer = state.customers().get_by_id(CustomerId::new(id)).await?;
    Ok(Json(customer))
}

/// `POST /customers`
async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<(StatusCode, Json<Customer>)> {
    let draft = payload.validate().map_err(ApiError::InvalidData)?;
    let customer = state.customers().insert(draft).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// `PUT /customers/{id}`
async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<Json<Customer>> {
    let draft = payload.validate().map_err(ApiError::InvalidData)?;
    let customer = state.customers().update(CustomerId::new(id), draft).await?;
    Ok(Json(customer))
}

/// `DELETE /customers/{id}`
async fn remove(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode> {
    state.customers().delete(CustomerId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
