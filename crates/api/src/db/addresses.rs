//! Address store: key-value persistence keyed by postal code.

use customer_registry_core::PostalCode;
use sqlx::PgExecutor;

use super::RepositoryError;
use crate::models::Address;

/// Internal row type for address queries.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
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

impl TryFrom<AddressRow> for Address {
    type Error = RepositoryError;

    fn try_from(row: AddressRow) -> Result<Self, Self::Error> {
        let postal_code = PostalCode::parse(&row.postal_code).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid postal code in database: {e}"))
        })?;

        Ok(Self {
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
        })
    }
}

/// Fetch the cached address for a postal code, if any.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
/// Returns `RepositoryError::DataCorruption` if the stored code is invalid.
pub async fn get_by_code(
    db: impl PgExecutor<'_>,
    code: &PostalCode,
) -> Result<Option<Address>, RepositoryError> {
    let row = sqlx::query_as::<_, AddressRow>(
        r"
        SELECT postal_code, street, complement, neighborhood, city,
               state_code, city_code, geo_area_code, dial_code, tax_region_code
        FROM address
        WHERE postal_code = $1
        ",
    )
    .bind(code)
    .fetch_optional(db)
    .await?;

    row.map(TryInto::try_into).transpose()
}

/// Persist a freshly fetched address.
///
/// Concurrent requests may race to resolve the same unseen postal code;
/// the conflict clause makes that race last-writer-wins on the key, which
/// is safe because the upstream source returns idempotent data per code.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn upsert(db: impl PgExecutor<'_>, address: &Address) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO address (postal_code, street, complement, neighborhood, city,
                             state_code, city_code, geo_area_code, dial_code, tax_region_code)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (postal_code) DO UPDATE SET
            street = EXCLUDED.street,
            complement = EXCLUDED.complement,
            neighborhood = EXCLUDED.neighborhood,
            city = EXCLUDED.city,
            state_code = EXCLUDED.state_code,
            city_code = EXCLUDED.city_code,
            geo_area_code = EXCLUDED.geo_area_code,
            dial_code = EXCLUDED.dial_code,
            tax_region_code = EXCLUDED.tax_region_code
        ",
    )
    .bind(&address.postal_code)
    .bind(&address.street)
    .bind(&address.complement)
    .bind(&address.neighborhood)
    .bind(&address.city)
    .bind(&address.state_code)
    .bind(&address.city_code)
    .bind(&address.geo_area_code)
    .bind(&address.dial_code)
    .bind(&address.tax_region_code)
    .execute(db)
    .await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = AddressRow {
            postal_code: "01001-000".to_owned(),
            street: Some("Praça da Sé".to_owned()),
            complement: Some("lado ímpar".to_owned()),
            neighborhood: Some("Sé".to_owned()),
            city: Some("São Paulo".to_owned()),
            state_code: Some("SP".to_owned()),
            city_code: Some("3550308".to_owned()),
            geo_area_code: Some("1004".to_owned()),
            dial_code: Some("11".to_owned()),
            tax_region_code: Some("7107".to_owned()),
        };

        let address: Address = row.try_into().unwrap();
        assert_eq!(address.postal_code.as_str(), "01001-000");
        assert_eq!(address.city.as_deref(), Some("São Paulo"));
    }

    #[test]
    fn test_row_conversion_rejects_corrupt_code() {
        let row = AddressRow {
            postal_code: "not-a-cep".to_owned(),
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

        let result: Result<Address, _> = row.try_into();
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
