//! Degrade-to-empty lookup adapters
//!
//! UI-facing read paths for recalls and make/model reference lists. A
//! transport failure here is logged and collapsed to an empty list: an
//! empty recall list renders as "no recalls found", which is the right
//! screen for a registry hiccup, while the typed failure stays available
//! to callers using the clients directly.

use crate::registry::{MakesModelsRegistry, RecallRegistry};
use crate::types::{MakeEntry, ModelEntry, RecallCampaign};
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct LookupAdapters {
    makes_models: Arc<dyn MakesModelsRegistry>,
    recalls: Arc<dyn RecallRegistry>,
}

impl LookupAdapters {
    pub fn new(makes_models: Arc<dyn MakesModelsRegistry>, recalls: Arc<dyn RecallRegistry>) -> Self {
        Self {
            makes_models,
            recalls,
        }
    }

    /// Recall campaigns for (make, model, year); empty on any transport failure
    pub async fn recalls_for_vehicle(
        &self,
        make: &str,
        model: &str,
        year: u16,
    ) -> Vec<RecallCampaign> {
        match self.recalls.recalls_by_vehicle(make, model, year).await {
            Ok(campaigns) => campaigns,
            Err(e) => {
                warn!(make = %make, model = %model, year = year, error = %e,
                    "Recall lookup failed, returning empty result");
                Vec::new()
            }
        }
    }

    /// Full make list; empty on any transport failure
    pub async fn all_makes(&self) -> Vec<MakeEntry> {
        match self.makes_models.all_makes().await {
            Ok(makes) => makes,
            Err(e) => {
                warn!(error = %e, "Make list lookup failed, returning empty result");
                Vec::new()
            }
        }
    }

    /// Models for (make, year); empty on any transport failure
    pub async fn models_for_make_year(&self, make: &str, year: u16) -> Vec<ModelEntry> {
        match self.makes_models.models_for_make_year(make, year).await {
            Ok(models) => models,
            Err(e) => {
                warn!(make = %make, year = year, error = %e,
                    "Model list lookup failed, returning empty result");
                Vec::new()
            }
        }
    }
}
