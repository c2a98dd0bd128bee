//! Government VIN registry client
//!
//! Speaks to the vPIC-compatible public registry: extended decode by VIN,
//! the full make list, and models by make and year. Responses come back as
//! JSON with a `Results` array; the decode variant is a flat list of
//! (variable id, value) rows that the normalization engine maps into a
//! structured profile.
//!
//! No retry logic lives here; a timeout or non-success status surfaces as a
//! typed failure and the caller decides what to do with it.

use crate::error::DecodeError;
use crate::registry::{MakesModelsRegistry, VinRegistry};
use crate::types::{MakeEntry, ModelEntry, RegistryPair};
use async_trait::async_trait;
use reqwest::Client;
use revline_common::config::RegistryConfig;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Government VIN registry client
pub struct VpicClient {
    http_client: Client,
    base_url: String,
}

impl VpicClient {
    /// Create a client against the given base URL with the given timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    /// Create a client from registry configuration
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.vpic_base_url.clone(), config.request_timeout)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, DecodeError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DecodeError::ServiceUnavailable(format!(
                "registry returned {}",
                status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            DecodeError::ServiceUnavailable(format!("malformed registry response: {}", e))
        })
    }
}

impl Default for VpicClient {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}

fn map_transport_error(e: reqwest::Error) -> DecodeError {
    if e.is_timeout() {
        DecodeError::Timeout
    } else {
        DecodeError::ServiceUnavailable(e.to_string())
    }
}

#[async_trait]
impl VinRegistry for VpicClient {
    async fn decode_extended(
        &self,
        vin: &str,
        model_year: Option<u16>,
    ) -> Result<Vec<RegistryPair>, DecodeError> {
        let mut url = format!(
            "{}/vehicles/DecodeVinExtended/{}?format=json",
            self.base_url, vin
        );
        if let Some(year) = model_year {
            url.push_str(&format!("&modelyear={}", year));
        }

        debug!(vin = %vin, year = ?model_year, "Decoding VIN against registry");

        let response: DecodeVinResponse = self.get_json(&url).await?;

        Ok(response
            .results
            .into_iter()
            .map(|row| RegistryPair {
                variable_id: row.variable_id,
                value: row.value,
            })
            .collect())
    }
}

#[async_trait]
impl MakesModelsRegistry for VpicClient {
    async fn all_makes(&self) -> Result<Vec<MakeEntry>, DecodeError> {
        let url = format!("{}/vehicles/GetAllMakes?format=json", self.base_url);
        let response: AllMakesResponse = self.get_json(&url).await?;

        Ok(response
            .results
            .into_iter()
            .map(|row| MakeEntry {
                make_id: row.make_id,
                make_name: row.make_name,
            })
            .collect())
    }

    async fn models_for_make_year(
        &self,
        make: &str,
        year: u16,
    ) -> Result<Vec<ModelEntry>, DecodeError> {
        let url = format!(
            "{}/vehicles/GetModelsForMakeYear/make/{}/modelyear/{}?format=json",
            self.base_url, make, year
        );
        let response: ModelsResponse = self.get_json(&url).await?;

        Ok(response
            .results
            .into_iter()
            .map(|row| ModelEntry {
                model_id: row.model_id,
                make_name: row.make_name,
                model_name: row.model_name,
            })
            .collect())
    }
}

// ============================================================================
// Registry API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct DecodeVinResponse {
    #[serde(rename = "Results", default)]
    results: Vec<DecodeVinRow>,
}

#[derive(Debug, Deserialize)]
struct DecodeVinRow {
    #[serde(rename = "VariableId")]
    variable_id: i64,
    #[serde(rename = "Value")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AllMakesResponse {
    #[serde(rename = "Results", default)]
    results: Vec<MakeRow>,
}

#[derive(Debug, Deserialize)]
struct MakeRow {
    #[serde(rename = "Make_ID")]
    make_id: i64,
    #[serde(rename = "Make_Name")]
    make_name: String,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(rename = "Results", default)]
    results: Vec<ModelRow>,
}

#[derive(Debug, Deserialize)]
struct ModelRow {
    #[serde(rename = "Model_ID")]
    model_id: i64,
    #[serde(rename = "Make_Name")]
    make_name: String,
    #[serde(rename = "Model_Name")]
    model_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_response_parses_registry_shape() {
        let json = r#"{
            "Count": 2,
            "Message": "Results returned successfully",
            "Results": [
                {"Value": "HONDA", "ValueId": "474", "Variable": "Make", "VariableId": 26},
                {"Value": null, "ValueId": "", "Variable": "Trim", "VariableId": 38}
            ]
        }"#;

        let parsed: DecodeVinResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].variable_id, 26);
        assert_eq!(parsed.results[0].value.as_deref(), Some("HONDA"));
        assert_eq!(parsed.results[1].value, None);
    }

    #[test]
    fn makes_response_parses_registry_shape() {
        let json = r#"{"Results": [{"Make_ID": 474, "Make_Name": "HONDA"}]}"#;
        let parsed: AllMakesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results[0].make_id, 474);
        assert_eq!(parsed.results[0].make_name, "HONDA");
    }

    #[test]
    fn default_client_uses_public_base_url() {
        let client = VpicClient::default();
        assert!(client.base_url.contains("vpic"));
    }
}
