//! Service layer: customer orchestration and the postal lookup seam.

pub mod customers;
pub mod viacep;

use async_trait::async_trait;
use customer_registry_core::PostalCode;
use thiserror::Error;

use crate::models::Address;

/// Errors a postal lookup collaborator can produce.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The service does not know the requested code.
    #[error("postal code {0} is unknown to the lookup service")]
    UnknownCode(PostalCode),

    /// The service could not be reached or answered unusably.
    #[error("postal lookup unavailable: {0}")]
    Unavailable(String),
}

/// External collaborator resolving a postal code to address fields.
///
/// The trait exists so the customer service receives its lookup
/// dependency through the constructor rather than reaching for a
/// process-wide client, and so tests can substitute a stub.
#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// Resolve a postal code to a populated address.
    async fn lookup(&self, code: &PostalCode) -> Result<Address, LookupError>;
}
