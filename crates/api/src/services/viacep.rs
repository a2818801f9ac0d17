//! ViaCEP API client for postal code resolution.
//!
//! ViaCEP (<https://viacep.com.br>) resolves Brazilian postal codes to
//! address records over plain JSON. The wire vocabulary is Portuguese;
//! this module owns the translation into the domain [`Address`].

use async_trait::async_trait;
use customer_registry_core::PostalCode;
use serde::Deserialize;
use thiserror::Error;

use super::{LookupError, PostalLookup};
use crate::config::ViaCepConfig;
use crate::models::Address;

/// Errors that can occur when querying ViaCEP.
#[derive(Debug, Error)]
pub enum ViaCepError {
    /// HTTP request failed (includes client-side timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("lookup returned status {status} for postal code {code}")]
    Api { status: u16, code: PostalCode },

    /// API answered but flagged the code as unknown.
    #[error("postal code {0} is not known to ViaCEP")]
    UnknownCode(PostalCode),
}

/// ViaCEP API client.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    /// Create a new ViaCEP client with a bounded request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ViaCepConfig) -> Result<Self, ViaCepError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Resolve a postal code to an address.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API answers with a
    /// non-success status, or the code is unknown.
    pub async fn query(&self, code: &PostalCode) -> Result<Address, ViaCepError> {
        let url = format!("{}/{}/json/", self.base_url, code.digits());

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ViaCepError::Api {
                status: status.as_u16(),
                code: code.clone(),
            });
        }

        let payload: ViaCepAddress = response.json().await?;
        payload.into_address(code)
    }
}

#[async_trait]
impl PostalLookup for ViaCepClient {
    async fn lookup(&self, code: &PostalCode) -> Result<Address, LookupError> {
        self.query(code).await.map_err(|e| match e {
            ViaCepError::UnknownCode(code) => LookupError::UnknownCode(code),
            other => LookupError::Unavailable(other.to_string()),
        })
    }
}

/// Wire shape of a ViaCEP response.
#[derive(Debug, Deserialize)]
struct ViaCepAddress {
    cep: Option<String>,
    logradouro: Option<String>,
    complemento: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    ibge: Option<String>,
    gia: Option<String>,
    ddd: Option<String>,
    siafi: Option<String>,
    // Unknown codes come back as `{"erro": true}`; older deployments send
    // the string "true" instead, so presence of the field is the signal.
    erro: Option<serde_json::Value>,
}

impl ViaCepAddress {
    fn into_address(self, requested: &PostalCode) -> Result<Address, ViaCepError> {
        if self.erro.is_some() {
            return Err(ViaCepError::UnknownCode(requested.clone()));
        }

        // ViaCEP echoes the code back formatted; normalize it, falling
        // back to the requested code so the cache key always matches.
        let postal_code = self
            .cep
            .as_deref()
            .and_then(|c| PostalCode::parse(c).ok())
            .unwrap_or_else(|| requested.clone());

        Ok(Address {
            postal_code,
            street: scrub(self.logradouro),
            complement: scrub(self.complemento),
            neighborhood: scrub(self.bairro),
            city: scrub(self.localidade),
            state_code: scrub(self.uf),
            city_code: scrub(self.ibge),
            geo_area_code: scrub(self.gia),
            dial_code: scrub(self.ddd),
            tax_region_code: scrub(self.siafi),
        })
    }
}

/// ViaCEP reports absent fields as empty strings; store them as NULLs.
fn scrub(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn requested() -> PostalCode {
        PostalCode::parse("01001-000").unwrap()
    }

    #[test]
    fn test_wire_conversion() {
        let raw = r#"{
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "gia": "1004",
            "ddd": "11",
            "siafi": "7107"
        }"#;

        let wire: ViaCepAddress = serde_json::from_str(raw).unwrap();
        let address = wire.into_address(&requested()).unwrap();

        assert_eq!(address.postal_code.as_str(), "01001-000");
        assert_eq!(address.street.as_deref(), Some("Praça da Sé"));
        assert_eq!(address.neighborhood.as_deref(), Some("Sé"));
        assert_eq!(address.city.as_deref(), Some("São Paulo"));
        assert_eq!(address.state_code.as_deref(), Some("SP"));
        assert_eq!(address.city_code.as_deref(), Some("3550308"));
        assert_eq!(address.geo_area_code.as_deref(), Some("1004"));
        assert_eq!(address.dial_code.as_deref(), Some("11"));
        assert_eq!(address.tax_region_code.as_deref(), Some("7107"));
    }

    #[test]
    fn test_empty_strings_become_none() {
        let raw = r#"{
            "cep": "70040-010",
            "logradouro": "",
            "complemento": "",
            "bairro": "Zona Cívico-Administrativa",
            "localidade": "Brasília",
            "uf": "DF",
            "ibge": "5300108",
            "gia": "",
            "ddd": "61",
            "siafi": "9701"
        }"#;

        let wire: ViaCepAddress = serde_json::from_str(raw).unwrap();
        let address = wire
            .into_address(&PostalCode::parse("70040-010").unwrap())
            .unwrap();

        assert!(address.street.is_none());
        assert!(address.complement.is_none());
        assert!(address.geo_area_code.is_none());
        assert_eq!(address.city.as_deref(), Some("Brasília"));
    }

    #[test]
    fn test_erro_flag_boolean() {
        let wire: ViaCepAddress = serde_json::from_str(r#"{"erro": true}"#).unwrap();
        assert!(matches!(
            wire.into_address(&requested()),
            Err(ViaCepError::UnknownCode(_))
        ));
    }

    #[test]
    fn test_erro_flag_string() {
        let wire: ViaCepAddress = serde_json::from_str(r#"{"erro": "true"}"#).unwrap();
        assert!(matches!(
            wire.into_address(&requested()),
            Err(ViaCepError::UnknownCode(_))
        ));
    }

    #[test]
    fn test_missing_cep_falls_back_to_requested_code() {
        let wire: ViaCepAddress = serde_json::from_str(r#"{"localidade": "São Paulo"}"#).unwrap();
        let address = wire.into_address(&requested()).unwrap();
        assert_eq!(address.postal_code, requested());
    }
}
