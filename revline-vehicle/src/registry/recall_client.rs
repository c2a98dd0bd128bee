//! Recall registry client
//!
//! Looks up open recall campaigns by (make, model, model year). Lookups are
//! strictly on-demand: nothing in this crate sweeps VINs or vehicles through
//! this endpoint in bulk.

use crate::error::DecodeError;
use crate::registry::RecallRegistry;
use crate::types::RecallCampaign;
use async_trait::async_trait;
use reqwest::Client;
use revline_common::config::RegistryConfig;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Recall registry client
pub struct RecallClient {
    http_client: Client,
    base_url: String,
}

impl RecallClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.recall_base_url.clone(), config.request_timeout)
    }
}

impl Default for RecallClient {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}

#[async_trait]
impl RecallRegistry for RecallClient {
    async fn recalls_by_vehicle(
        &self,
        make: &str,
        model: &str,
        year: u16,
    ) -> Result<Vec<RecallCampaign>, DecodeError> {
        let url = format!(
            "{}/recalls/recallsByVehicle?make={}&model={}&modelYear={}",
            self.base_url, make, model, year
        );

        debug!(make = %make, model = %model, year = year, "Querying recall registry");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                DecodeError::Timeout
            } else {
                DecodeError::ServiceUnavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DecodeError::ServiceUnavailable(format!(
                "recall registry returned {}",
                status
            )));
        }

        let parsed: RecallResponse = response.json().await.map_err(|e| {
            DecodeError::ServiceUnavailable(format!("malformed recall response: {}", e))
        })?;

        Ok(parsed
            .results
            .into_iter()
            .map(|row| RecallCampaign {
                campaign_number: row.campaign_number,
                component: row.component,
                summary: row.summary,
                consequence: row.consequence,
                remedy: row.remedy,
                manufacturer: row.manufacturer,
                report_received_date: row.report_received_date,
            })
            .collect())
    }
}

// ============================================================================
// Recall API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct RecallResponse {
    #[serde(rename = "results", default)]
    results: Vec<RecallRow>,
}

#[derive(Debug, Deserialize)]
struct RecallRow {
    #[serde(rename = "NHTSACampaignNumber")]
    campaign_number: String,
    #[serde(rename = "Component")]
    component: Option<String>,
    #[serde(rename = "Summary")]
    summary: Option<String>,
    #[serde(rename = "Consequence")]
    consequence: Option<String>,
    #[serde(rename = "Remedy")]
    remedy: Option<String>,
    #[serde(rename = "Manufacturer")]
    manufacturer: Option<String>,
    #[serde(rename = "ReportReceivedDate")]
    report_received_date: Option<String>,
}
