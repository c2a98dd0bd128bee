//! Catalog query path
//!
//! Read-only views over the aggregated observations: filtered regional
//! pricing, free-text part suggestions for autocomplete, and a by-vehicle
//! variant that derives the fingerprint internally. Results are ordered by
//! usage (popularity) then recency, and always capped.

use crate::catalog::fingerprint::vehicle_fingerprint;
use crate::types::CatalogEntry;
use revline_common::Result;
use sqlx::SqlitePool;

/// Cap applied when the caller does not supply one
pub const DEFAULT_QUERY_LIMIT: u32 = 25;

/// Filters for the regional pricing query; all optional and AND-combined
#[derive(Debug, Clone, Default)]
pub struct PricingFilter {
    pub fingerprint: Option<String>,
    pub service_type: Option<String>,
    pub part_name: Option<String>,
    pub region: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Clone)]
pub struct CatalogQuery {
    pool: SqlitePool,
}

type CatalogRow = (
    String,
    String,
    i64,
    f64,
    f64,
    f64,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
);

impl CatalogQuery {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Regional pricing entries matching the filter
    pub async fn regional_pricing(&self, filter: &PricingFilter) -> Result<Vec<CatalogEntry>> {
        let limit = filter.limit.unwrap_or(DEFAULT_QUERY_LIMIT);

        let rows = sqlx::query_as::<_, CatalogRow>(
            "SELECT fingerprint, part_name, usage_count, avg_price, min_price, max_price,
                    part_number, brand, service_type, region, last_seen_at
             FROM parts_catalog
             WHERE (?1 IS NULL OR fingerprint = ?1)
               AND (?2 IS NULL OR service_type = ?2)
               AND (?3 IS NULL OR part_name = ?3)
               AND (?4 IS NULL OR region = ?4)
             ORDER BY usage_count DESC, last_seen_at DESC
             LIMIT ?5",
        )
        .bind(&filter.fingerprint)
        .bind(&filter.service_type)
        .bind(&filter.part_name)
        .bind(&filter.region)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(entry_from_row).collect())
    }

    /// Free-text part name search for autocomplete
    pub async fn part_suggestions(
        &self,
        search_term: &str,
        fingerprint: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<CatalogEntry>> {
        let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT);
        let pattern = format!("%{}%", search_term.trim().to_lowercase());

        let rows = sqlx::query_as::<_, CatalogRow>(
            "SELECT fingerprint, part_name, usage_count, avg_price, min_price, max_price,
                    part_number, brand, service_type, region, last_seen_at
             FROM parts_catalog
             WHERE part_name LIKE ?1
               AND (?2 IS NULL OR fingerprint = ?2)
             ORDER BY usage_count DESC, last_seen_at DESC
             LIMIT ?3",
        )
        .bind(&pattern)
        .bind(fingerprint)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(entry_from_row).collect())
    }

    /// Pricing for an explicit (make, model, year); the fingerprint is
    /// derived here with the same function the feed path uses
    pub async fn pricing_for_vehicle(
        &self,
        make: &str,
        model: &str,
        year: i64,
        service_type: Option<&str>,
        region: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<CatalogEntry>> {
        let filter = PricingFilter {
            fingerprint: Some(vehicle_fingerprint(year, make, model)),
            service_type: service_type.map(str::to_string),
            part_name: None,
            region: region.map(str::to_string),
            limit,
        };
        self.regional_pricing(&filter).await
    }
}

fn entry_from_row(row: CatalogRow) -> CatalogEntry {
    let (
        fingerprint,
        part_name,
        usage_count,
        avg_price,
        min_price,
        max_price,
        part_number,
        brand,
        service_type,
        region,
        last_seen_at,
    ) = row;

    CatalogEntry {
        fingerprint,
        part_name,
        usage_count,
        avg_price,
        min_price,
        max_price,
        part_number,
        brand,
        service_type,
        region,
        last_seen_at,
    }
}
