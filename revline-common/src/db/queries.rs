//! Shared read queries against platform tables
//!
//! The vehicle data core reads vehicles, transactions, and line items that
//! other services own; the row loaders live here so every consumer maps
//! columns the same way.

use crate::db::models::{ServiceTransaction, TransactionLineItem, VehicleRecord};
use crate::{Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Load one vehicle by id, or None if it does not exist
pub async fn load_vehicle(pool: &SqlitePool, vehicle_id: &Uuid) -> Result<Option<VehicleRecord>> {
    let row = sqlx::query_as::<_, (String, Option<String>, Option<i64>, Option<String>, Option<String>, Option<String>)>(
        "SELECT id, vin, year, make, model, owner_id FROM vehicles WHERE id = ?",
    )
    .bind(vehicle_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some((id, vin, year, make, model, owner_id)) => Ok(Some(VehicleRecord {
            id: parse_uuid(&id)?,
            vin,
            year,
            make,
            model,
            owner_id: owner_id.as_deref().map(parse_uuid).transpose()?,
        })),
        None => Ok(None),
    }
}

/// Load one service transaction by id, or None if it does not exist
pub async fn load_transaction(
    pool: &SqlitePool,
    transaction_id: &Uuid,
) -> Result<Option<ServiceTransaction>> {
    let row = sqlx::query_as::<_, (String, String, Option<String>, Option<String>, String, Option<String>)>(
        "SELECT id, vehicle_id, service_type, region, status, completed_at
         FROM service_transactions WHERE id = ?",
    )
    .bind(transaction_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some((id, vehicle_id, service_type, region, status, completed_at)) => {
            Ok(Some(ServiceTransaction {
                id: parse_uuid(&id)?,
                vehicle_id: parse_uuid(&vehicle_id)?,
                service_type,
                region,
                status,
                completed_at,
            }))
        }
        None => Ok(None),
    }
}

/// Load all line items belonging to a transaction
pub async fn load_line_items(
    pool: &SqlitePool,
    transaction_id: &Uuid,
) -> Result<Vec<TransactionLineItem>> {
    let rows = sqlx::query_as::<_, (String, String, String, f64, Option<String>, Option<String>)>(
        "SELECT id, transaction_id, name, price, part_number, brand
         FROM transaction_line_items WHERE transaction_id = ? ORDER BY created_at",
    )
    .bind(transaction_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(id, tx_id, name, price, part_number, brand)| {
            Ok(TransactionLineItem {
                id: parse_uuid(&id)?,
                transaction_id: parse_uuid(&tx_id)?,
                name,
                price,
                part_number,
                brand,
            })
        })
        .collect()
}

fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::Internal(format!("malformed uuid '{}': {}", value, e)))
}
