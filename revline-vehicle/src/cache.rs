//! Decode cache
//!
//! Key-value store mapping a normalized VIN to its last successful decode
//! plus an expiry timestamp. Expiry is evaluated at read time: a row found
//! expired is deleted and reported absent, so stale entries are invisible
//! and self-cleaning on next access. Writes are full replacements; there is
//! at most one live entry per VIN.

use crate::types::VehicleProfile;
use chrono::{DateTime, Duration, Utc};
use revline_common::Result;
use sqlx::SqlitePool;
use tracing::warn;

/// Cached decodes expire this many days after creation
pub const CACHE_TTL_DAYS: i64 = 30;

/// One live cache row
#[derive(Debug, Clone)]
pub struct CachedDecode {
    pub vin: String,
    pub profile: VehicleProfile,
    pub completeness: u8,
    pub engine_summary: String,
    pub warning: Option<String>,
    /// The registry's pair list as stored, kept only as an audit trail
    pub raw_response: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct DecodeCache {
    pool: SqlitePool,
}

impl DecodeCache {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a VIN; expired or unreadable rows are removed and reported absent
    pub async fn get(&self, vin: &str) -> Result<Option<CachedDecode>> {
        let row = sqlx::query_as::<_, (String, i64, String, Option<String>, String, String)>(
            "SELECT profile, completeness, engine_summary, decode_warning, raw_response, expires_at
             FROM vin_decode_cache WHERE vin = ?",
        )
        .bind(vin)
        .fetch_optional(&self.pool)
        .await?;

        let Some((profile_json, completeness, engine_summary, warning, raw_response, expires_at)) =
            row
        else {
            return Ok(None);
        };

        let expires_at = match DateTime::parse_from_rfc3339(&expires_at) {
            Ok(ts) => ts.with_timezone(&Utc),
            Err(e) => {
                warn!(vin = %vin, error = %e, "Unreadable cache expiry, evicting entry");
                self.delete(vin).await?;
                return Ok(None);
            }
        };

        // Lazy expiry: found-but-expired means delete, then miss
        if expires_at <= Utc::now() {
            self.delete(vin).await?;
            return Ok(None);
        }

        let profile: VehicleProfile = match serde_json::from_str(&profile_json) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(vin = %vin, error = %e, "Unreadable cached profile, evicting entry");
                self.delete(vin).await?;
                return Ok(None);
            }
        };

        Ok(Some(CachedDecode {
            vin: vin.to_string(),
            profile,
            completeness: completeness.clamp(0, 100) as u8,
            engine_summary,
            warning,
            raw_response,
            expires_at,
        }))
    }

    /// Store a decode result, replacing any existing entry for this VIN
    pub async fn put(
        &self,
        vin: &str,
        profile: &VehicleProfile,
        completeness: u8,
        engine_summary: &str,
        warning: Option<&str>,
        raw_response: &str,
    ) -> Result<()> {
        let now = Utc::now();
        let expires_at = now + Duration::days(CACHE_TTL_DAYS);
        let profile_json = serde_json::to_string(profile)
            .map_err(|e| revline_common::Error::Internal(format!("profile serialize: {}", e)))?;

        sqlx::query(
            "INSERT OR REPLACE INTO vin_decode_cache
             (vin, raw_response, profile, completeness, engine_summary, decode_warning, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(vin)
        .bind(raw_response)
        .bind(profile_json)
        .bind(completeness as i64)
        .bind(engine_summary)
        .bind(warning)
        .bind(expires_at.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a VIN's entry, if any
    pub async fn delete(&self, vin: &str) -> Result<()> {
        sqlx::query("DELETE FROM vin_decode_cache WHERE vin = ?")
            .bind(vin)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
