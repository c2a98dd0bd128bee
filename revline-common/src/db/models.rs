//! Shared database models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: Uuid,
    pub vin: Option<String>,
    pub year: Option<i64>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: String,
    pub status: String,
    /// RFC 3339 timestamp; the subscription is usable while this is in the future
    pub paid_through: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTransaction {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_type: Option<String>,
    pub region: Option<String>,
    pub status: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLineItem {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub name: String,
    pub price: f64,
    pub part_number: Option<String>,
    pub brand: Option<String>,
}
