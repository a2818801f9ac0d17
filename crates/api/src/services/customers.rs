//! Customer service: orchestrates reads and the resolve-then-persist
//! write path.
//!
//! Every write runs inside one transaction so the address-resolution
//! side effect and the customer mutation commit or roll back together;
//! a persisted customer therefore always references an existing address.

use customer_registry_core::{CustomerId, PostalCode};
use sqlx::{PgConnection, PgPool};
use thiserror::Error;

use super::{LookupError, PostalLookup};
use crate::db::{self, RepositoryError};
use crate::models::{Address, Customer, CustomerDraft};

/// Errors surfaced by customer operations.
///
/// Display strings are part of the API contract: they flow into the
/// error envelope's detail and user message unchanged.
#[derive(Debug, Error)]
pub enum CustomerServiceError {
    /// No customer exists with the given id.
    #[error("There is no customer with id {0}")]
    NotFound(CustomerId),

    /// Delete was blocked by a referential constraint.
    #[error("Customer id {0} in use, cannot be removed")]
    InUse(CustomerId),

    /// The lookup service does not know the given postal code.
    #[error("There is no address for postal code {0}")]
    UnknownPostalCode(PostalCode),

    /// The lookup service could not be reached.
    #[error("postal lookup unavailable: {0}")]
    LookupUnavailable(String),

    /// Storage-layer failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<LookupError> for CustomerServiceError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::UnknownCode(code) => Self::UnknownPostalCode(code),
            LookupError::Unavailable(message) => Self::LookupUnavailable(message),
        }
    }
}

/// Orchestrates customer CRUD over the two stores and the postal lookup
/// collaborator, all passed in at construction.
#[derive(Debug, Clone)]
pub struct CustomerService<L> {
    pool: PgPool,
    lookup: L,
}

impl<L: PostalLookup> CustomerService<L> {
    /// Create a new customer service.
    pub const fn new(pool: PgPool, lookup: L) -> Self {
        Self { pool, lookup }
    }

    /// List all customers.
    ///
    /// # Errors
    ///
    /// Returns `CustomerServiceError::Repository` if the store fails.
    pub async fn get_all(&self) -> Result<Vec<Customer>, CustomerServiceError> {
        Ok(db::customers::list_all(&self.pool).await?)
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `CustomerServiceError::NotFound` if no record has that id.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Customer, CustomerServiceError> {
        db::customers::get_by_id(&self.pool, id)
            .await?
            .ok_or(CustomerServiceError::NotFound(id))
    }

    /// Create a customer, resolving its address first.
    ///
    /// The store assigns the id; whatever id the caller sent was already
    /// discarded during validation.
    ///
    /// # Errors
    ///
    /// Returns `CustomerServiceError::UnknownPostalCode` if the lookup
    /// rejects the code, `LookupUnavailable` if it cannot be reached,
    /// or `Repository` if a store operation fails.
    pub async fn insert(&self, draft: CustomerDraft) -> Result<Customer, CustomerServiceError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let address = self.resolve_address(&mut tx, &draft.postal_code).await?;
        let id = db::customers::insert(&mut *tx, &draft).await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        tracing::info!(customer_id = %id, "customer created");
        Ok(Customer {
            id,
            name: draft.name,
            address,
        })
    }

    /// Replace the customer stored under `id`.
    ///
    /// Full replace, pinned to the path id: the existing record must
    /// exist, and the saved row keeps `id` no matter what the payload
    /// claimed about its own identity.
    ///
    /// # Errors
    ///
    /// Returns `CustomerServiceError::NotFound` if no record has that
    /// id; otherwise the same failure modes as [`Self::insert`].
    pub async fn update(
        &self,
        id: CustomerId,
        draft: CustomerDraft,
    ) -> Result<Customer, CustomerServiceError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        if db::customers::get_by_id(&mut *tx, id).await?.is_none() {
            return Err(CustomerServiceError::NotFound(id));
        }

        let address = self.resolve_address(&mut tx, &draft.postal_code).await?;
        if !db::customers::update(&mut *tx, id, &draft).await? {
            // Row existed a moment ago inside this transaction
            return Err(CustomerServiceError::NotFound(id));
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        tracing::info!(customer_id = %id, "customer updated");
        Ok(Customer {
            id,
            name: draft.name,
            address,
        })
    }

    /// Delete the customer stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `CustomerServiceError::NotFound` if no record has that
    /// id, or `InUse` if the store reports a referential-integrity
    /// violation.
    pub async fn delete(&self, id: CustomerId) -> Result<(), CustomerServiceError> {
        match db::customers::delete(&self.pool, id).await {
            Ok(true) => {
                tracing::info!(customer_id = %id, "customer deleted");
                Ok(())
            }
            Ok(false) => Err(CustomerServiceError::NotFound(id)),
            Err(RepositoryError::Conflict(_)) => Err(CustomerServiceError::InUse(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Get-or-fetch-and-cache: return the stored address for `code`, or
    /// fetch it from the lookup collaborator and persist it.
    ///
    /// Cached addresses are returned unchanged - there is no refresh.
    async fn resolve_address(
        &self,
        tx: &mut PgConnection,
        code: &PostalCode,
    ) -> Result<Address, CustomerServiceError> {
        if let Some(address) = db::addresses::get_by_code(&mut *tx, code).await? {
            return Ok(address);
        }

        tracing::debug!(postal_code = %code, "address cache miss, querying lookup service");
        let fetched = self.lookup.lookup(code).await?;
        db::addresses::upsert(&mut *tx, &fetched).await?;

        Ok(fetched)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_match_api_contract() {
        assert_eq!(
            CustomerServiceError::NotFound(CustomerId::new(999)).to_string(),
            "There is no customer with id 999"
        );
        assert_eq!(
            CustomerServiceError::InUse(CustomerId::new(7)).to_string(),
            "Customer id 7 in use, cannot be removed"
        );
        assert_eq!(
            CustomerServiceError::UnknownPostalCode(PostalCode::parse("99999999").unwrap())
                .to_string(),
            "There is no address for postal code 99999-999"
        );
    }

    #[test]
    fn test_lookup_error_mapping() {
        let code = PostalCode::parse("01001-000").unwrap();
        assert!(matches!(
            CustomerServiceError::from(LookupError::UnknownCode(code)),
            CustomerServiceError::UnknownPostalCode(_)
        ));
        assert!(matches!(
            CustomerServiceError::from(LookupError::Unavailable("timeout".to_owned())),
            CustomerServiceError::LookupUnavailable(_)
        ));
    }
}
