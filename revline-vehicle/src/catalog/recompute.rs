//! Catalog recomputation job
//!
//! The feed path's increments are a cheap approximation: usage counts are
//! exact but the price aggregates stay at their first-observation values
//! between runs. This job is the only path authorized to overwrite the
//! aggregate fields. It runs on a schedule (nightly), never per-request,
//! processes entries sequentially, and is idempotent: two consecutive runs
//! over unchanged data produce identical aggregates.

use crate::catalog::fingerprint::vehicle_fingerprint;
use chrono::{Duration, Utc};
use revline_common::Result;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info};

/// How far back the job re-scans completed transactions
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Entries need at least this many observations before exact recomputation
/// is worth a re-scan
const MIN_USAGE_FOR_RECOMPUTE: i64 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeSummary {
    pub entries_examined: u64,
    pub entries_updated: u64,
}

pub struct CatalogRecompute {
    pool: SqlitePool,
    window_days: i64,
}

impl CatalogRecompute {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_window(pool: SqlitePool, window_days: i64) -> Self {
        Self { pool, window_days }
    }

    /// Recalculate exact aggregates for every entry with enough usage.
    ///
    /// Matching is exact on (year, make, model): a transaction's prices only
    /// count toward an entry when its vehicle's fingerprint — derived with
    /// the same function the feed path uses — equals the entry's.
    /// Entries with no qualifying observations inside the window keep their
    /// previous aggregates.
    pub async fn run(&self) -> Result<RecomputeSummary> {
        let cutoff = (Utc::now() - Duration::days(self.window_days)).to_rfc3339();

        let vehicles_by_fingerprint = self.vehicles_by_fingerprint(&cutoff).await?;

        let entries = sqlx::query_as::<_, (String, String)>(
            "SELECT fingerprint, part_name FROM parts_catalog WHERE usage_count >= ?",
        )
        .bind(MIN_USAGE_FOR_RECOMPUTE)
        .fetch_all(&self.pool)
        .await?;

        let mut summary = RecomputeSummary::default();

        for (fingerprint, part_name) in entries {
            summary.entries_examined += 1;

            let Some(vehicle_ids) = vehicles_by_fingerprint.get(&fingerprint) else {
                continue;
            };

            let prices = self
                .observed_prices(&cutoff, vehicle_ids, &part_name)
                .await?;
            if prices.is_empty() {
                continue;
            }

            let count = prices.len() as i64;
            let sum: f64 = prices.iter().sum();
            let avg = sum / prices.len() as f64;
            let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

            sqlx::query(
                "UPDATE parts_catalog
                 SET usage_count = ?, avg_price = ?, min_price = ?, max_price = ?
                 WHERE fingerprint = ? AND part_name = ?",
            )
            .bind(count)
            .bind(avg)
            .bind(min)
            .bind(max)
            .bind(&fingerprint)
            .bind(&part_name)
            .execute(&self.pool)
            .await?;

            debug!(fingerprint = %fingerprint, part = %part_name, observations = count,
                "Recomputed catalog entry");
            summary.entries_updated += 1;
        }

        info!(
            examined = summary.entries_examined,
            updated = summary.entries_updated,
            window_days = self.window_days,
            "Catalog recomputation complete"
        );

        Ok(summary)
    }

    /// Vehicles seen in completed transactions inside the window, grouped by
    /// fingerprint. Vehicles missing year/make/model cannot be fingerprinted
    /// and are skipped, exactly as the feed path skips them.
    async fn vehicles_by_fingerprint(
        &self,
        cutoff: &str,
    ) -> Result<HashMap<String, Vec<String>>> {
        let rows = sqlx::query_as::<_, (String, Option<i64>, Option<String>, Option<String>)>(
            "SELECT DISTINCT v.id, v.year, v.make, v.model
             FROM vehicles v
             JOIN service_transactions t ON t.vehicle_id = v.id
             WHERE t.status = 'completed' AND t.completed_at >= ?",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for (id, year, make, model) in rows {
            let (Some(year), Some(make), Some(model)) = (year, make, model) else {
                continue;
            };
            grouped
                .entry(vehicle_fingerprint(year, &make, &model))
                .or_default()
                .push(id);
        }

        Ok(grouped)
    }

    /// All qualifying prices for one part name across the given vehicles
    async fn observed_prices(
        &self,
        cutoff: &str,
        vehicle_ids: &[String],
        part_name: &str,
    ) -> Result<Vec<f64>> {
        let placeholders = vec!["?"; vehicle_ids.len()].join(", ");
        let sql = format!(
            "SELECT li.price
             FROM transaction_line_items li
             JOIN service_transactions t ON li.transaction_id = t.id
             WHERE t.status = 'completed'
               AND t.completed_at >= ?
               AND t.vehicle_id IN ({})
               AND lower(trim(li.name)) = ?
               AND li.price > 0",
            placeholders
        );

        let mut query = sqlx::query_scalar::<_, f64>(&sql).bind(cutoff);
        for id in vehicle_ids {
            query = query.bind(id);
        }
        query = query.bind(part_name);

        Ok(query.fetch_all(&self.pool).await?)
    }
}
