//! Call-time premium eligibility check
//!
//! Reads the subscriber's current subscription row on every check. No
//! caching here: freshness of billing state is the subscription system's
//! concern, and a stale grant would outlive a refund or chargeback.

use chrono::Utc;
use revline_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Plans in the elevated tier
pub const PREMIUM_PLANS: &[&str] = &["premium_monthly", "premium_annual", "shop_unlimited"];

#[derive(Clone)]
pub struct Entitlements {
    pool: SqlitePool,
}

impl Entitlements {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// True when the user holds an active subscription on an elevated plan
    /// whose paid-through date is in the future
    pub async fn is_premium(&self, user_id: &Uuid) -> Result<bool> {
        let now = Utc::now().to_rfc3339();

        let eligible: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM subscriptions
                WHERE user_id = ?1
                  AND status = 'active'
                  AND plan IN (?2, ?3, ?4)
                  AND paid_through > ?5
             )",
        )
        .bind(user_id.to_string())
        .bind(PREMIUM_PLANS[0])
        .bind(PREMIUM_PLANS[1])
        .bind(PREMIUM_PLANS[2])
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        Ok(eligible)
    }
}
