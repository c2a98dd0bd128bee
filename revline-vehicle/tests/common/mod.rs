//! Shared helpers for integration tests: in-memory pools, seeded platform
//! rows, and counting doubles for the external registries.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use revline_vehicle::error::DecodeError;
use revline_vehicle::registry::{MakesModelsRegistry, RecallRegistry, VinRegistry};
use revline_vehicle::router::PremiumVehicleData;
use revline_vehicle::types::{
    DecodeSource, DecodedVehicle, MakeEntry, ModelEntry, RecallCampaign, RegistryPair,
    VehicleProfile,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// In-memory database with the full schema applied.
///
/// A single connection: each connection to `sqlite::memory:` is its own
/// database, so a larger pool would scatter the schema.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    revline_common::db::create_schema(&pool).await.unwrap();
    pool
}

// ============================================================================
// Registry doubles
// ============================================================================

/// What the scripted VIN registry should do on each call
pub enum VinBehavior {
    Pairs(Vec<RegistryPair>),
    Empty,
    Timeout,
    Unavailable,
}

/// VIN registry double with call-count instrumentation
pub struct ScriptedVinRegistry {
    behavior: VinBehavior,
    pub calls: AtomicUsize,
}

impl ScriptedVinRegistry {
    pub fn returning(pairs: Vec<RegistryPair>) -> Self {
        Self {
            behavior: VinBehavior::Pairs(pairs),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_behavior(behavior: VinBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VinRegistry for ScriptedVinRegistry {
    async fn decode_extended(
        &self,
        _vin: &str,
        _model_year: Option<u16>,
    ) -> Result<Vec<RegistryPair>, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            VinBehavior::Pairs(pairs) => Ok(pairs.clone()),
            VinBehavior::Empty => Ok(Vec::new()),
            VinBehavior::Timeout => Err(DecodeError::Timeout),
            VinBehavior::Unavailable => {
                Err(DecodeError::ServiceUnavailable("503".to_string()))
            }
        }
    }
}

/// Recall registry double; `fail` makes every call a transport error
pub struct ScriptedRecallRegistry {
    pub campaigns: Vec<RecallCampaign>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl ScriptedRecallRegistry {
    pub fn returning(campaigns: Vec<RecallCampaign>) -> Self {
        Self {
            campaigns,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            campaigns: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RecallRegistry for ScriptedRecallRegistry {
    async fn recalls_by_vehicle(
        &self,
        _make: &str,
        _model: &str,
        _year: u16,
    ) -> Result<Vec<RecallCampaign>, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(DecodeError::ServiceUnavailable("connection refused".to_string()))
        } else {
            Ok(self.campaigns.clone())
        }
    }
}

/// Makes/models registry double; `fail` makes every call a transport error
pub struct ScriptedMakesModels {
    pub makes: Vec<MakeEntry>,
    pub models: Vec<ModelEntry>,
    pub fail: bool,
}

impl ScriptedMakesModels {
    pub fn empty() -> Self {
        Self {
            makes: Vec::new(),
            models: Vec::new(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            makes: Vec::new(),
            models: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl MakesModelsRegistry for ScriptedMakesModels {
    async fn all_makes(&self) -> Result<Vec<MakeEntry>, DecodeError> {
        if self.fail {
            Err(DecodeError::Timeout)
        } else {
            Ok(self.makes.clone())
        }
    }

    async fn models_for_make_year(
        &self,
        _make: &str,
        _year: u16,
    ) -> Result<Vec<ModelEntry>, DecodeError> {
        if self.fail {
            Err(DecodeError::Timeout)
        } else {
            Ok(self.models.clone())
        }
    }
}

/// Premium source stub: every method answers with a recognizable payload
pub struct StubPremiumSource;

#[async_trait]
impl PremiumVehicleData for StubPremiumSource {
    async fn maintenance_schedule(
        &self,
        _vehicle: &revline_common::db::models::VehicleRecord,
    ) -> Result<serde_json::Value, DecodeError> {
        Ok(serde_json::json!({"source": "stub", "kind": "maintenance_schedule"}))
    }

    async fn warranty_coverage(
        &self,
        _vehicle: &revline_common::db::models::VehicleRecord,
    ) -> Result<serde_json::Value, DecodeError> {
        Ok(serde_json::json!({"source": "stub", "kind": "warranty"}))
    }

    async fn market_value(
        &self,
        _vehicle: &revline_common::db::models::VehicleRecord,
    ) -> Result<serde_json::Value, DecodeError> {
        Ok(serde_json::json!({"source": "stub", "kind": "market_value"}))
    }

    async fn repair_estimate(
        &self,
        _vehicle: &revline_common::db::models::VehicleRecord,
        _region: Option<&str>,
    ) -> Result<serde_json::Value, DecodeError> {
        Ok(serde_json::json!({"source": "stub", "kind": "repair_estimate"}))
    }

    async fn decode_plate(
        &self,
        _plate: &str,
        _state: &str,
    ) -> Result<DecodedVehicle, DecodeError> {
        Ok(stub_decoded_vehicle())
    }

    async fn decode_scan(&self, _image_ref: &str) -> Result<DecodedVehicle, DecodeError> {
        Ok(stub_decoded_vehicle())
    }
}

fn stub_decoded_vehicle() -> DecodedVehicle {
    DecodedVehicle {
        vin: "1HGCM82633A004352".to_string(),
        profile: VehicleProfile::default(),
        completeness: 0,
        engine_summary: "Unknown Engine".to_string(),
        warning: None,
        source: DecodeSource::LiveFetch,
    }
}

// ============================================================================
// Registry fixtures
// ============================================================================

/// The registry's pair list for the 2003 Honda Accord test VIN
pub fn honda_accord_pairs() -> Vec<RegistryPair> {
    vec![
        RegistryPair::new(26, "HONDA"),
        RegistryPair::new(28, "Accord"),
        RegistryPair::new(29, "2003"),
        RegistryPair::new(38, "EX-V6"),
        RegistryPair::new(5, "Coupe"),
        RegistryPair::new(9, "6"),
        RegistryPair::new(13, "3.0"),
        RegistryPair::new(64, "V-Shaped"),
        RegistryPair::new(71, "240"),
        RegistryPair::new(24, "Gasoline"),
        RegistryPair::new(15, "FWD"),
        RegistryPair::new(27, "AMERICAN HONDA MOTOR CO., INC."),
        RegistryPair::new(143, "0"),
    ]
}

// ============================================================================
// Row seeders
// ============================================================================

pub async fn insert_vehicle(
    pool: &SqlitePool,
    vin: Option<&str>,
    year: i64,
    make: &str,
    model: &str,
) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO vehicles (id, vin, year, make, model) VALUES (?, ?, ?, ?, ?)")
        .bind(id.to_string())
        .bind(vin)
        .bind(year)
        .bind(make)
        .bind(model)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn insert_subscription(
    pool: &SqlitePool,
    user_id: &Uuid,
    plan: &str,
    status: &str,
    paid_through_days_from_now: i64,
) {
    let paid_through = (Utc::now() + Duration::days(paid_through_days_from_now)).to_rfc3339();
    sqlx::query(
        "INSERT INTO subscriptions (id, user_id, plan, status, paid_through) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(user_id.to_string())
    .bind(plan)
    .bind(status)
    .bind(paid_through)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_completed_transaction(
    pool: &SqlitePool,
    vehicle_id: &Uuid,
    service_type: Option<&str>,
    region: Option<&str>,
) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO service_transactions (id, vehicle_id, service_type, region, status, completed_at)
         VALUES (?, ?, ?, ?, 'completed', ?)",
    )
    .bind(id.to_string())
    .bind(vehicle_id.to_string())
    .bind(service_type)
    .bind(region)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await
    .unwrap();
    id
}

pub async fn insert_line_item(
    pool: &SqlitePool,
    transaction_id: &Uuid,
    name: &str,
    price: f64,
) -> Uuid {
    insert_line_item_full(pool, transaction_id, name, price, None, None).await
}

pub async fn insert_line_item_full(
    pool: &SqlitePool,
    transaction_id: &Uuid,
    name: &str,
    price: f64,
    part_number: Option<&str>,
    brand: Option<&str>,
) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO transaction_line_items (id, transaction_id, name, price, part_number, brand)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(transaction_id.to_string())
    .bind(name)
    .bind(price)
    .bind(part_number)
    .bind(brand)
    .execute(pool)
    .await
    .unwrap();
    id
}

/// Read one catalog row's aggregates for assertions
pub async fn catalog_row(
    pool: &SqlitePool,
    fingerprint: &str,
    part_name: &str,
) -> Option<(i64, f64, f64, f64)> {
    sqlx::query_as::<_, (i64, f64, f64, f64)>(
        "SELECT usage_count, avg_price, min_price, max_price
         FROM parts_catalog WHERE fingerprint = ? AND part_name = ?",
    )
    .bind(fingerprint)
    .bind(part_name)
    .fetch_optional(pool)
    .await
    .unwrap()
}
