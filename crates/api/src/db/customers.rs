//! Customer store: persistence of customer records with their address
//! reference, read back with the address row joined in.

use customer_registry_core::{CustomerId, PostalCode};
use sqlx::PgExecutor;

use super::RepositoryError;
use crate::models::{Address, Customer, CustomerDraft};

/// Internal row type for customer queries (customer + joined address).
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    name: String,
    postal_code: String,
    street: Option<String>,
    complement: Option<String>,
    neighborhood: Option<String>,
    city: Option<String>,
    state_code: Option<String>,
    city_code: Option<String>,
    geo_area_code: Option<String>,
    dial_code: Option<String>,
    tax_region_code: Option<String>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let postal_code = PostalCode::parse(&row.postal_code).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid postal code in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            name: row.name,
            address: Address {
                postal_code,
                street: row.street,
                complement: row.complement,
                neighborhood: row.neighborhood,
                city: row.city,
                state_code: row.state_code,
                city_code: row.city_code,
                geo_area_code: row.geo_area_code,
                dial_code: row.dial_code,
                tax_region_code: row.tax_region_code,
            },
        })
    }
}

const SELECT_CUSTOMER: &str = r"
    SELECT c.id, c.name,
           a.postal_code, a.street, a.complement, a.neighborhood, a.city,
           a.state_code, a.city_code, a.geo_area_code, a.dial_code, a.tax_region_code
    FROM customer c
    JOIN address a ON a.postal_code = c.address_postal_code
";

/// List all customers with their addresses.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
/// Returns `RepositoryError::DataCorruption` if a stored code is invalid.
pub async fn list_all(db: impl PgExecutor<'_>) -> Result<Vec<Customer>, RepositoryError> {
    let rows =
        sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_CUSTOMER} ORDER BY c.id"))
            .fetch_all(db)
            .await?;

    rows.into_iter().map(TryInto::try_into).collect()
}

/// Get a customer by id.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
/// Returns `RepositoryError::DataCorruption` if a stored code is invalid.
pub async fn get_by_id(
    db: impl PgExecutor<'_>,
    id: CustomerId,
) -> Result<Option<Customer>, RepositoryError> {
    let row = sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_CUSTOMER} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await?;

    row.map(TryInto::try_into).transpose()
}

/// Insert a customer row; the store assigns the id.
///
/// The referenced address row must already exist in this transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn insert(
    db: impl PgExecutor<'_>,
    draft: &CustomerDraft,
) -> Result<CustomerId, RepositoryError> {
    let id: i32 = sqlx::query_scalar(
        "INSERT INTO customer (name, address_postal_code) VALUES ($1, $2) RETURNING id",
    )
    .bind(&draft.name)
    .bind(&draft.postal_code)
    .fetch_one(db)
    .await?;

    Ok(CustomerId::new(id))
}

/// Overwrite the customer row with the given id.
///
/// The update is pinned to `id`; whatever identity the caller's payload
/// claimed is irrelevant here. Returns `false` when no such row exists.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn update(
    db: impl PgExecutor<'_>,
    id: CustomerId,
    draft: &CustomerDraft,
) -> Result<bool, RepositoryError> {
    let result = sqlx::query(
        "UPDATE customer SET name = $2, address_postal_code = $3, updated_at = now() WHERE id = $1",
    )
    .bind(id)
    .bind(&draft.name)
    .bind(&draft.postal_code)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete the customer row with the given id.
///
/// Returns `false` when no such row exists.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the row is still referenced by
/// another record (referential-integrity violation).
/// Returns `RepositoryError::Database` for other database errors.
pub async fn delete(db: impl PgExecutor<'_>, id: CustomerId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM customer WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict(format!(
                    "customer {id} is still referenced by another record"
                ));
            }
            RepositoryError::Database(e)
        })?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = CustomerRow {
            id: 1,
            name: "Ana".to_owned(),
            postal_code: "01001-000".to_owned(),
            street: Some("Praça da Sé".to_owned()),
            complement: None,
            neighborhood: Some("Sé".to_owned()),
            city: Some("São Paulo".to_owned()),
            state_code: Some("SP".to_owned()),
            city_code: None,
            geo_area_code: None,
            dial_code: Some("11".to_owned()),
            tax_region_code: None,
        };

        let customer: Customer = row.try_into().unwrap();
        assert_eq!(customer.id, CustomerId::new(1));
        assert_eq!(customer.name, "Ana");
        assert_eq!(customer.address.postal_code.as_str(), "01001-000");
    }

    #[test]
    fn test_row_conversion_rejects_corrupt_code() {
        let row = CustomerRow {
            id: 2,
            name: "Rui".to_owned(),
            postal_code: "bogus".to_owned(),
            street: None,
            complement: None,
            neighborhood: None,
            city: None,
            state_code: None,
            city_code: None,
            geo_area_code: None,
            dial_code: None,
            tax_region_code: None,
        };

        let result: Result<Customer, _> = row.try_into();
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
