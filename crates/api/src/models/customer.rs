//! Customer model, inbound payload, and payload validation.

use customer_registry_core::{CustomerId, PostalCode};
use serde::{Deserialize, Serialize};

use crate::error::Description;
use crate::models::Address;

/// A persisted customer record with its resolved address embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: Address,
}

/// Inbound customer payload for create and update requests.
///
/// Every field is optional at the serde level so that missing required
/// fields surface as validation descriptions rather than parse errors.
/// Unknown properties are rejected by the deserializer and reported as
/// an incomprehensible-message failure instead.
///
/// The `id` field is accepted for compatibility but always ignored: the
/// store assigns ids on insert, and updates target the path id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomerPayload {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub address: Option<AddressPayload>,
}

/// Inbound address payload. Only the postal code participates in the
/// write path; the remaining fields are accepted and discarded, since
/// the stored address always comes from the resolver.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddressPayload {
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub city_code: Option<String>,
    pub geo_area_code: Option<String>,
    pub dial_code: Option<String>,
    pub tax_region_code: Option<String>,
}

/// A validated customer write request: the only inputs the service
/// needs before resolving the address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub postal_code: PostalCode,
}

impl CustomerPayload {
    /// Validate the payload into a [`CustomerDraft`].
    ///
    /// # Errors
    ///
    /// Returns one [`Description`] per invalid field, with the dotted
    /// field path as the description name. Nothing is written when
    /// validation fails.
    pub fn validate(&self) -> Result<CustomerDraft, Vec<Description>> {
        let mut issues = Vec::new();

        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(name.to_owned()),
            _ => {
                issues.push(Description::new("name", "must not be blank"));
                None
            }
        };

        let postal_code = match &self.address {
            None => {
                issues.push(Description::new("address", "is required"));
                None
            }
            Some(address) => match address.postal_code.as_deref() {
                None => {
                    issues.push(Description::new("address.postalCode", "is required"));
                    None
                }
                Some(raw) => match PostalCode::parse(raw) {
                    Ok(code) => Some(code),
                    Err(e) => {
                        issues.push(Description::new("address.postalCode", e.to_string()));
                        None
                    }
                },
            },
        };

        match (name, postal_code) {
            (Some(name), Some(postal_code)) if issues.is_empty() => {
                Ok(CustomerDraft { name, postal_code })
            }
            _ => Err(issues),
        }
    }
}
