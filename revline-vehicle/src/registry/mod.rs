//! Outbound registry clients and the lookup adapter layer
//!
//! Trait seams front each external endpoint so callers and tests can
//! substitute doubles; the concrete clients speak to the public registries
//! over HTTP with an explicit per-request timeout.

pub mod adapters;
pub mod recall_client;
pub mod vpic_client;

pub use adapters::LookupAdapters;
pub use recall_client::RecallClient;
pub use vpic_client::VpicClient;

use crate::error::DecodeError;
use crate::types::{MakeEntry, ModelEntry, RecallCampaign, RegistryPair};
use async_trait::async_trait;

/// Extended decode-by-VIN against the government registry
#[async_trait]
pub trait VinRegistry: Send + Sync {
    /// Decode a VIN into the registry's flat (variable id, value) pair list.
    ///
    /// An empty pair list is a valid response; the decode engine maps it to
    /// [`DecodeError::NoResults`].
    async fn decode_extended(
        &self,
        vin: &str,
        model_year: Option<u16>,
    ) -> Result<Vec<RegistryPair>, DecodeError>;
}

/// Make and model reference lists from the government registry
#[async_trait]
pub trait MakesModelsRegistry: Send + Sync {
    async fn all_makes(&self) -> Result<Vec<MakeEntry>, DecodeError>;

    async fn models_for_make_year(
        &self,
        make: &str,
        year: u16,
    ) -> Result<Vec<ModelEntry>, DecodeError>;
}

/// Recall campaign lookup by (make, model, year).
///
/// On-demand only: implementations are never invoked in bulk or background
/// sweeps, to respect the registry's rate expectations.
#[async_trait]
pub trait RecallRegistry: Send + Sync {
    async fn recalls_by_vehicle(
        &self,
        make: &str,
        model: &str,
        year: u16,
    ) -> Result<Vec<RecallCampaign>, DecodeError>;
}
