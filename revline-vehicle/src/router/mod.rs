//! Feature-tier router
//!
//! For each (user, feature) pair, decides which backing source answers the
//! request. Gated features return a typed locked response — a first-class
//! success shape the UI renders as an upsell, never an error.

pub mod entitlements;

pub use entitlements::Entitlements;

use crate::catalog::CatalogQuery;
use crate::decode::DecodeService;
use crate::error::{DecodeError, RouterError};
use crate::registry::LookupAdapters;
use crate::types::{CatalogEntry, DecodeSource, DecodedVehicle, RecallCampaign};
use async_trait::async_trait;
use revline_common::db::load_vehicle;
use revline_common::db::models::VehicleRecord;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

/// Features a caller can request for a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleFeature {
    Specifications,
    Recalls,
    MaintenanceSchedule,
    Warranty,
    MarketValue,
    RepairEstimates,
}

/// Everything that can be gated, including the onboarding intake paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatedFeature {
    Specifications,
    Recalls,
    MaintenanceSchedule,
    Warranty,
    MarketValue,
    RepairEstimates,
    VinDecode,
    PlateLookup,
    CameraScan,
}

impl From<VehicleFeature> for GatedFeature {
    fn from(feature: VehicleFeature) -> Self {
        match feature {
            VehicleFeature::Specifications => GatedFeature::Specifications,
            VehicleFeature::Recalls => GatedFeature::Recalls,
            VehicleFeature::MaintenanceSchedule => GatedFeature::MaintenanceSchedule,
            VehicleFeature::Warranty => GatedFeature::Warranty,
            VehicleFeature::MarketValue => GatedFeature::MarketValue,
            VehicleFeature::RepairEstimates => GatedFeature::RepairEstimates,
        }
    }
}

impl GatedFeature {
    /// Short marketing line shown on the locked card
    pub fn teaser(&self) -> &'static str {
        match self {
            GatedFeature::Specifications => "Full factory specifications for your exact vehicle",
            GatedFeature::Recalls => "Open safety recalls, checked against the federal registry",
            GatedFeature::MaintenanceSchedule => {
                "Factory maintenance schedules tailored to your mileage"
            }
            GatedFeature::Warranty => "See what's still covered before you pay out of pocket",
            GatedFeature::MarketValue => "Live market value for your exact year, make, and trim",
            GatedFeature::RepairEstimates => "Fair-price repair estimates from shops in your area",
            GatedFeature::VinDecode => "Instant vehicle lookup by VIN",
            GatedFeature::PlateLookup => "Add your vehicle with just a plate number",
            GatedFeature::CameraScan => "Scan your VIN with the camera, skip the typing",
        }
    }
}

/// The tier whose source answered the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    Free,
    Premium,
}

/// Which backing source produced the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Cache,
    LiveFetch,
    Catalog,
    PremiumSource,
}

/// Data payload of a successful routing decision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturePayload {
    Specifications(DecodedVehicle),
    Recalls(Vec<RecallCampaign>),
    RepairEstimates(Vec<CatalogEntry>),
    /// Opaque payload from an out-of-scope premium source
    Premium(serde_json::Value),
}

/// The router's output: data, or a locked-feature response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FeatureOutcome {
    Data {
        feature: GatedFeature,
        tier: AccessTier,
        origin: DataOrigin,
        payload: FeaturePayload,
    },
    Locked {
        feature: GatedFeature,
        teaser: String,
        upgrade_prompt: bool,
    },
}

impl FeatureOutcome {
    fn locked(feature: GatedFeature) -> Self {
        FeatureOutcome::Locked {
            feature,
            teaser: feature.teaser().to_string(),
            upgrade_prompt: true,
        }
    }
}

/// The requesting user, resolved by the caller's session layer
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: Uuid,
    pub region: Option<String>,
}

/// Vehicle intake paths for onboarding
#[derive(Debug, Clone)]
pub enum OnboardingMethod {
    Vin {
        vin: String,
        model_year: Option<u16>,
    },
    Plate {
        plate: String,
        state: String,
    },
    CameraScan {
        image_ref: String,
    },
}

/// Out-of-scope premium sources, reachable only through this seam.
///
/// A host process wires a real vendor integration; tests wire a stub. The
/// router owns the tier policy, never the vendor semantics.
#[async_trait]
pub trait PremiumVehicleData: Send + Sync {
    async fn maintenance_schedule(
        &self,
        vehicle: &VehicleRecord,
    ) -> Result<serde_json::Value, DecodeError>;

    async fn warranty_coverage(
        &self,
        vehicle: &VehicleRecord,
    ) -> Result<serde_json::Value, DecodeError>;

    async fn market_value(
        &self,
        vehicle: &VehicleRecord,
    ) -> Result<serde_json::Value, DecodeError>;

    async fn repair_estimate(
        &self,
        vehicle: &VehicleRecord,
        region: Option<&str>,
    ) -> Result<serde_json::Value, DecodeError>;

    async fn decode_plate(&self, plate: &str, state: &str)
        -> Result<DecodedVehicle, DecodeError>;

    async fn decode_scan(&self, image_ref: &str) -> Result<DecodedVehicle, DecodeError>;
}

/// The orchestration layer: decides, per (user, feature), which source runs
#[derive(Clone)]
pub struct FeatureRouter {
    pool: SqlitePool,
    decode: DecodeService,
    adapters: LookupAdapters,
    catalog: CatalogQuery,
    entitlements: Entitlements,
    premium: Arc<dyn PremiumVehicleData>,
}

impl FeatureRouter {
    pub fn new(
        pool: SqlitePool,
        decode: DecodeService,
        adapters: LookupAdapters,
        catalog: CatalogQuery,
        entitlements: Entitlements,
        premium: Arc<dyn PremiumVehicleData>,
    ) -> Self {
        Self {
            pool,
            decode,
            adapters,
            catalog,
            entitlements,
            premium,
        }
    }

    /// Resolve one (user, vehicle, feature) request
    pub async fn resolve(
        &self,
        user: &UserContext,
        vehicle_id: &Uuid,
        feature: VehicleFeature,
    ) -> Result<FeatureOutcome, RouterError> {
        let vehicle = load_vehicle(&self.pool, vehicle_id)
            .await?
            .ok_or(RouterError::UnknownVehicle(*vehicle_id))?;

        let is_premium = self.entitlements.is_premium(&user.user_id).await?;

        match feature {
            // No premium differentiation: everyone gets the cached profile
            VehicleFeature::Specifications => self.specifications(&vehicle).await,

            // No premium differentiation: everyone gets the live lookup
            VehicleFeature::Recalls => Ok(self.recalls(&vehicle).await),

            VehicleFeature::RepairEstimates => {
                if is_premium {
                    let payload = self
                        .premium
                        .repair_estimate(&vehicle, user.region.as_deref())
                        .await?;
                    Ok(premium_data(feature, payload))
                } else {
                    self.organic_estimates(&vehicle, user).await
                }
            }

            VehicleFeature::MaintenanceSchedule
            | VehicleFeature::Warranty
            | VehicleFeature::MarketValue => {
                if !is_premium {
                    return Ok(FeatureOutcome::locked(feature.into()));
                }
                let payload = match feature {
                    VehicleFeature::MaintenanceSchedule => {
                        self.premium.maintenance_schedule(&vehicle).await?
                    }
                    VehicleFeature::Warranty => self.premium.warranty_coverage(&vehicle).await?,
                    _ => self.premium.market_value(&vehicle).await?,
                };
                Ok(premium_data(feature, payload))
            }
        }
    }

    /// Route a vehicle-intake request from onboarding
    pub async fn route_onboarding(
        &self,
        method: OnboardingMethod,
        user: &UserContext,
    ) -> Result<FeatureOutcome, RouterError> {
        match method {
            // Decode by VIN is always free
            OnboardingMethod::Vin { vin, model_year } => {
                let decoded = self.decode.decode(&vin, model_year).await?;
                let origin = origin_of(&decoded);
                Ok(FeatureOutcome::Data {
                    feature: GatedFeature::VinDecode,
                    tier: AccessTier::Free,
                    origin,
                    payload: FeaturePayload::Specifications(decoded),
                })
            }

            OnboardingMethod::Plate { plate, state } => {
                if !self.entitlements.is_premium(&user.user_id).await? {
                    return Ok(FeatureOutcome::locked(GatedFeature::PlateLookup));
                }
                let decoded = self.premium.decode_plate(&plate, &state).await?;
                Ok(FeatureOutcome::Data {
                    feature: GatedFeature::PlateLookup,
                    tier: AccessTier::Premium,
                    origin: DataOrigin::PremiumSource,
                    payload: FeaturePayload::Specifications(decoded),
                })
            }

            OnboardingMethod::CameraScan { image_ref } => {
                if !self.entitlements.is_premium(&user.user_id).await? {
                    return Ok(FeatureOutcome::locked(GatedFeature::CameraScan));
                }
                let decoded = self.premium.decode_scan(&image_ref).await?;
                Ok(FeatureOutcome::Data {
                    feature: GatedFeature::CameraScan,
                    tier: AccessTier::Premium,
                    origin: DataOrigin::PremiumSource,
                    payload: FeaturePayload::Specifications(decoded),
                })
            }
        }
    }

    async fn specifications(
        &self,
        vehicle: &VehicleRecord,
    ) -> Result<FeatureOutcome, RouterError> {
        let vin = vehicle.vin.clone().unwrap_or_default();
        let year = vehicle.year.and_then(|y| u16::try_from(y).ok());
        let decoded = self.decode.decode(&vin, year).await?;
        let origin = origin_of(&decoded);

        Ok(FeatureOutcome::Data {
            feature: GatedFeature::Specifications,
            tier: AccessTier::Free,
            origin,
            payload: FeaturePayload::Specifications(decoded),
        })
    }

    async fn recalls(&self, vehicle: &VehicleRecord) -> FeatureOutcome {
        let campaigns = match (
            vehicle.make.as_deref(),
            vehicle.model.as_deref(),
            vehicle.year.and_then(|y| u16::try_from(y).ok()),
        ) {
            (Some(make), Some(model), Some(year)) => {
                self.adapters.recalls_for_vehicle(make, model, year).await
            }
            // Without make/model/year there is nothing to look up; an empty
            // list is the valid-but-uninteresting answer
            _ => Vec::new(),
        };

        FeatureOutcome::Data {
            feature: GatedFeature::Recalls,
            tier: AccessTier::Free,
            origin: DataOrigin::LiveFetch,
            payload: FeaturePayload::Recalls(campaigns),
        }
    }

    async fn organic_estimates(
        &self,
        vehicle: &VehicleRecord,
        user: &UserContext,
    ) -> Result<FeatureOutcome, RouterError> {
        let (Some(year), Some(make), Some(model)) =
            (vehicle.year, vehicle.make.as_deref(), vehicle.model.as_deref())
        else {
            return Ok(FeatureOutcome::locked(GatedFeature::RepairEstimates));
        };

        let entries = self
            .catalog
            .pricing_for_vehicle(make, model, year, None, user.region.as_deref(), None)
            .await?;

        if entries.is_empty() {
            return Ok(FeatureOutcome::locked(GatedFeature::RepairEstimates));
        }

        Ok(FeatureOutcome::Data {
            feature: GatedFeature::RepairEstimates,
            tier: AccessTier::Free,
            origin: DataOrigin::Catalog,
            payload: FeaturePayload::RepairEstimates(entries),
        })
    }
}

fn premium_data(feature: VehicleFeature, payload: serde_json::Value) -> FeatureOutcome {
    FeatureOutcome::Data {
        feature: feature.into(),
        tier: AccessTier::Premium,
        origin: DataOrigin::PremiumSource,
        payload: FeaturePayload::Premium(payload),
    }
}

fn origin_of(decoded: &DecodedVehicle) -> DataOrigin {
    match decoded.source {
        DecodeSource::Cache => DataOrigin::Cache,
        DecodeSource::LiveFetch => DataOrigin::LiveFetch,
    }
}
