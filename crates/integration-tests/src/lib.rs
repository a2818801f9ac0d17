//! Integration tests for the customer registry.
//!
//! # Running Tests
//!
//! The tests in `tests/` drive a running server over HTTP and are
//! `#[ignore]`-gated. To run them:
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p customer-registry-cli -- migrate
//!
//! # Start the server
//! cargo run -p customer-registry-api
//!
//! # Run the ignored tests
//! cargo test -p customer-registry-integration-tests -- --ignored
//! ```
//!
//! The server address defaults to `http://localhost:8080` and can be
//! overridden with `REGISTRY_BASE_URL`.

/// Base URL for the registry API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("REGISTRY_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

/// HTTP client for driving the API.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}
