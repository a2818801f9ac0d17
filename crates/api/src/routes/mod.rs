//! HTTP route handlers for the registry API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health          - Liveness check
//! GET    /health/ready    - Readiness check (pings the database)
//!
//! # Customers
//! GET    /customers       - List customers (with embedded addresses)
//! POST   /customers       - Create a customer (201)
//! GET    /customers/{id}  - Customer detail
//! PUT    /customers/{id}  - Replace a customer
//! DELETE /customers/{id}  - Delete a customer (204)
//! ```
//!
//! Anything else falls through to [`fallback`], which answers with the
//! resource-not-found envelope.

pub mod customers;

use axum::Router;
use axum::http::Uri;

use crate::error::ApiError;
use crate::state::AppState;

/// Create all routes for the registry API.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/customers", customers::router())
}

/// Handler for unmatched routes.
pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::NotFound(format!(
        "The resource {} does not exist. Please check and try again.",
        uri.path()
    ))
}
