//! The `VehicleData` facade
//!
//! The single inbound surface other in-process services consume. Built at
//! process startup with the shared pool and the outbound clients; every
//! component it aggregates borrows that lifecycle rather than constructing
//! its own handles.

use crate::cache::DecodeCache;
use crate::catalog::{
    CatalogFeed, CatalogQuery, CatalogRecompute, PricingFilter, RecomputeSummary,
    ServicePartsTable,
};
use crate::decode::DecodeService;
use crate::error::{DecodeError, RouterError};
use crate::registry::{
    LookupAdapters, MakesModelsRegistry, RecallClient, RecallRegistry, VinRegistry, VpicClient,
};
use crate::router::{
    Entitlements, FeatureOutcome, FeatureRouter, OnboardingMethod, PremiumVehicleData,
    UserContext, VehicleFeature,
};
use crate::types::{CatalogEntry, DecodedVehicle, MakeEntry, ModelEntry, RecallCampaign};
use revline_common::config::RegistryConfig;
use revline_common::Result;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct VehicleData {
    decode: DecodeService,
    adapters: LookupAdapters,
    feed: CatalogFeed,
    query: CatalogQuery,
    recompute_pool: SqlitePool,
    service_parts: ServicePartsTable,
    router: FeatureRouter,
}

impl VehicleData {
    /// Wire the facade with explicit clients (tests pass doubles here)
    pub fn new(
        pool: SqlitePool,
        vin_registry: Arc<dyn VinRegistry>,
        makes_models: Arc<dyn MakesModelsRegistry>,
        recalls: Arc<dyn RecallRegistry>,
        premium: Arc<dyn PremiumVehicleData>,
    ) -> Self {
        let cache = DecodeCache::new(pool.clone());
        let decode = DecodeService::new(vin_registry, cache);
        let adapters = LookupAdapters::new(makes_models, recalls);
        let query = CatalogQuery::new(pool.clone());
        let entitlements = Entitlements::new(pool.clone());
        let router = FeatureRouter::new(
            pool.clone(),
            decode.clone(),
            adapters.clone(),
            query.clone(),
            entitlements,
            premium,
        );

        Self {
            decode,
            adapters,
            feed: CatalogFeed::new(pool.clone()),
            query,
            recompute_pool: pool,
            service_parts: ServicePartsTable::new(),
            router,
        }
    }

    /// Wire the facade against the public registries
    pub fn with_default_clients(
        pool: SqlitePool,
        config: &RegistryConfig,
        premium: Arc<dyn PremiumVehicleData>,
    ) -> Self {
        let vpic = Arc::new(VpicClient::from_config(config));
        let recalls = Arc::new(RecallClient::from_config(config));
        Self::new(pool, vpic.clone(), vpic, recalls, premium)
    }

    /// Decode a VIN, cache-aside over the external registry
    pub async fn decode_vin(
        &self,
        vin: &str,
        model_year: Option<u16>,
    ) -> std::result::Result<DecodedVehicle, DecodeError> {
        self.decode.decode(vin, model_year).await
    }

    /// Recall campaigns for (make, model, year); empty on registry trouble
    pub async fn get_recalls(&self, make: &str, model: &str, year: u16) -> Vec<RecallCampaign> {
        self.adapters.recalls_for_vehicle(make, model, year).await
    }

    /// Full make list; empty on registry trouble
    pub async fn get_all_makes(&self) -> Vec<MakeEntry> {
        self.adapters.all_makes().await
    }

    /// Models for (make, year); empty on registry trouble
    pub async fn get_models_for_make_year(&self, make: &str, year: u16) -> Vec<ModelEntry> {
        self.adapters.models_for_make_year(make, year).await
    }

    /// Route one feature request through the tier decision table
    pub async fn route_vehicle_feature(
        &self,
        user: &UserContext,
        vehicle_id: &Uuid,
        feature: VehicleFeature,
    ) -> std::result::Result<FeatureOutcome, RouterError> {
        self.router.resolve(user, vehicle_id, feature).await
    }

    /// Route a vehicle-intake request from onboarding
    pub async fn route_onboarding(
        &self,
        method: OnboardingMethod,
        user: &UserContext,
    ) -> std::result::Result<FeatureOutcome, RouterError> {
        self.router.route_onboarding(method, user).await
    }

    /// Feed the catalog from a completed transaction; never fails
    pub async fn feed_catalog_from_completed_transaction(&self, transaction_id: Uuid) {
        self.feed
            .feed_from_completed_transaction(transaction_id)
            .await
    }

    /// Regional pricing entries matching the filter
    pub async fn query_regional_pricing(
        &self,
        filter: &PricingFilter,
    ) -> Result<Vec<CatalogEntry>> {
        self.query.regional_pricing(filter).await
    }

    /// Part-name autocomplete over the catalog
    pub async fn query_part_suggestions(
        &self,
        search_term: &str,
        fingerprint: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<CatalogEntry>> {
        self.query
            .part_suggestions(search_term, fingerprint, limit)
            .await
    }

    /// Run the exact re-aggregation job once (scheduled, not per-request)
    pub async fn recalculate_catalog(&self) -> Result<RecomputeSummary> {
        CatalogRecompute::new(self.recompute_pool.clone()).run().await
    }

    /// Expected part names for a service type, from the static fallback table
    pub fn expected_parts_for_service(&self, service_type: &str) -> Option<&'static [&'static str]> {
        self.service_parts.expected_parts(service_type)
    }
}
