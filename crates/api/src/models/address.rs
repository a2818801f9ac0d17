//! Postal address model.

use customer_registry_core::PostalCode;
use serde::{Deserialize, Serialize};

/// A postal address resolved from the lookup service and cached by
/// postal code.
///
/// The postal code is the identity; every other field is optional
/// because the upstream source omits or blanks them for some codes.
/// Addresses are never mutated after creation - there is no address
/// update operation anywhere in the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub postal_code: PostalCode,
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

impl Address {
    /// An address carrying only its postal code, all other fields empty.
    #[must_use]
    pub const fn bare(postal_code: PostalCode) -> Self {
        Self {
            postal_code,
            street: None,
            complement: None,
            neighborhood: None,
            city: None,
            state_code: None,
            city_code: None,
            geo_area_code: None,
            dial_code: None,
            tax_region_code: None,
        }
    }
}
