//! Catalog feed path
//!
//! Invoked as a side effect of a transaction completing and being paid.
//! Nothing on this path may propagate an error back to the payment flow:
//! the public entry point catches everything, logs it, and returns.

use crate::catalog::fingerprint::{normalize_part_name, vehicle_fingerprint};
use chrono::Utc;
use revline_common::db::{load_line_items, load_transaction, load_vehicle};
use revline_common::db::models::TransactionLineItem;
use revline_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct CatalogFeed {
    pool: SqlitePool,
}

impl CatalogFeed {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Feed the catalog from a completed, paid transaction.
    ///
    /// Never fails: any problem (missing transaction, vehicle without
    /// year/make/model, persistence error) is logged and swallowed so the
    /// caller's payment success path is unaffected.
    pub async fn feed_from_completed_transaction(&self, transaction_id: Uuid) {
        match self.ingest_completed_transaction(transaction_id).await {
            Ok(written) => {
                debug!(transaction_id = %transaction_id, entries = written,
                    "Catalog feed complete");
            }
            Err(e) => {
                warn!(transaction_id = %transaction_id, error = %e,
                    "Catalog feed failed; transaction completion unaffected");
            }
        }
    }

    /// The fallible feed pipeline; returns the number of upserted entries
    pub async fn ingest_completed_transaction(&self, transaction_id: Uuid) -> Result<u32> {
        let transaction = load_transaction(&self.pool, &transaction_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("transaction {}", transaction_id)))?;

        if transaction.status != "completed" {
            return Err(Error::InvalidInput(format!(
                "transaction {} is '{}', not completed",
                transaction_id, transaction.status
            )));
        }

        let vehicle = load_vehicle(&self.pool, &transaction.vehicle_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("vehicle {}", transaction.vehicle_id)))?;

        let (Some(year), Some(make), Some(model)) = (vehicle.year, &vehicle.make, &vehicle.model)
        else {
            return Err(Error::InvalidInput(format!(
                "vehicle {} is missing year/make/model, cannot fingerprint",
                vehicle.id
            )));
        };
        let fingerprint = vehicle_fingerprint(year, make, model);

        let items = load_line_items(&self.pool, &transaction_id).await?;

        let mut written: u32 = 0;
        for item in &items {
            // Unpriced or unnamed rows carry no market signal
            if item.name.trim().is_empty() || item.price <= 0.0 {
                continue;
            }

            self.upsert_entry(
                &fingerprint,
                item,
                transaction.service_type.as_deref(),
                transaction.region.as_deref(),
            )
            .await?;
            written += 1;
        }

        Ok(written)
    }

    /// One observation -> one upsert.
    ///
    /// First sight creates the row with usage 1 and all three price fields
    /// at the observed price. Repeat sight increments usage atomically in
    /// SQL (two concurrent feeds must both land), refreshes last-seen, and
    /// backfills part number/brand only where the stored row has none. The
    /// price aggregates are left alone between recompute runs.
    async fn upsert_entry(
        &self,
        fingerprint: &str,
        item: &TransactionLineItem,
        service_type: Option<&str>,
        region: Option<&str>,
    ) -> Result<()> {
        let part_name = normalize_part_name(&item.name);
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO parts_catalog
             (id, fingerprint, part_name, usage_count, avg_price, min_price, max_price,
              part_number, brand, service_type, region, last_seen_at, created_at)
             VALUES (?, ?, ?, 1, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(fingerprint, part_name) DO UPDATE SET
                usage_count = usage_count + 1,
                last_seen_at = excluded.last_seen_at,
                part_number = COALESCE(part_number, excluded.part_number),
                brand = COALESCE(brand, excluded.brand)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(fingerprint)
        .bind(&part_name)
        .bind(item.price)
        .bind(item.price)
        .bind(item.price)
        .bind(&item.part_number)
        .bind(&item.brand)
        .bind(service_type)
        .bind(region)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
