//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::customers::CustomerService;
use crate::services::viacep::{ViaCepClient, ViaCepError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the customer service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    customers: CustomerService<ViaCepClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the ViaCEP client cannot be built.
    pub fn new(config: ApiConfig, pool: PgPool) -> Result<Self, ViaCepError> {
        let viacep = ViaCepClient::new(&config.viacep)?;
        let customers = CustomerService::new(pool.clone(), viacep);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                customers,
            }),
        })
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the customer service.
    #[must_use]
    pub fn customers(&self) -> &CustomerService<ViaCepClient> {
        &self.inner.customers
    }
}
