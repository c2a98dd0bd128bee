//! Database initialization
//!
//! Opens (or creates) the platform SQLite database, applies the pragmas
//! every service relies on, and creates the schema idempotently. The pool
//! returned here is owned by the process entry point and injected into
//! each component; no module constructs its own handle.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer; decode requests
    // and catalog feed upserts arrive from many request tasks at once
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Set busy timeout
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent - safe to call multiple times)
///
/// Exposed separately from [`init_database`] so tests can apply the schema
/// to an in-memory pool.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_vehicles_table(pool).await?;
    create_subscriptions_table(pool).await?;
    create_service_transactions_table(pool).await?;
    create_transaction_line_items_table(pool).await?;
    create_vin_decode_cache_table(pool).await?;
    create_parts_catalog_table(pool).await?;
    Ok(())
}

/// Create the vehicles table
///
/// Owned by the onboarding/garage service; the vehicle data core reads it
/// to resolve a vehicle id to (vin, year, make, model).
pub async fn create_vehicles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id TEXT PRIMARY KEY,
            vin TEXT,
            year INTEGER,
            make TEXT,
            model TEXT,
            owner_id TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (year IS NULL OR (year >= 1900 AND year <= 2100))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_vehicles_vin ON vehicles(vin)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_vehicles_owner ON vehicles(owner_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the subscriptions table
///
/// Owned by the billing service; the router's entitlement check reads the
/// current row at call time, freshness is billing's concern.
pub async fn create_subscriptions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subscriptions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            plan TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'canceled', 'past_due')),
            paid_through TIMESTAMP NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_subscriptions_user ON subscriptions(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the service_transactions table
///
/// Owned by the jobs/payments service; the organic catalog feed reads
/// completed rows, and the recompute job re-scans them.
pub async fn create_service_transactions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_transactions (
            id TEXT PRIMARY KEY,
            vehicle_id TEXT NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
            service_type TEXT,
            region TEXT,
            status TEXT NOT NULL DEFAULT 'open' CHECK (status IN ('open', 'completed', 'canceled')),
            completed_at TIMESTAMP,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_service_transactions_vehicle ON service_transactions(vehicle_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_service_transactions_completed ON service_transactions(status, completed_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the transaction_line_items table
pub async fn create_transaction_line_items_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transaction_line_items (
            id TEXT PRIMARY KEY,
            transaction_id TEXT NOT NULL REFERENCES service_transactions(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            part_number TEXT,
            brand TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_line_items_transaction ON transaction_line_items(transaction_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the vin_decode_cache table
///
/// One row per normalized VIN holding the raw registry response (opaque
/// audit blob), the normalized profile, its completeness score, and the
/// expiry timestamp. Expired rows are removed lazily on read.
pub async fn create_vin_decode_cache_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vin_decode_cache (
            vin TEXT PRIMARY KEY,
            raw_response TEXT NOT NULL,
            profile TEXT NOT NULL,
            completeness INTEGER NOT NULL,
            engine_summary TEXT NOT NULL,
            decode_warning TEXT,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            CHECK (completeness >= 0 AND completeness <= 100)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_vin_decode_cache_expires ON vin_decode_cache(expires_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the parts_catalog table
///
/// Crowd-sourced part pricing aggregates keyed by (vehicle fingerprint,
/// normalized part name). Rows are never deleted.
pub async fn create_parts_catalog_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS parts_catalog (
            id TEXT PRIMARY KEY,
            fingerprint TEXT NOT NULL,
            part_name TEXT NOT NULL,
            usage_count INTEGER NOT NULL DEFAULT 1,
            avg_price REAL NOT NULL,
            min_price REAL NOT NULL,
            max_price REAL NOT NULL,
            part_number TEXT,
            brand TEXT,
            service_type TEXT,
            region TEXT,
            last_seen_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (fingerprint, part_name),
            CHECK (usage_count >= 1),
            CHECK (min_price <= max_price)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_parts_catalog_usage ON parts_catalog(fingerprint, usage_count)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_parts_catalog_part ON parts_catalog(part_name)")
        .execute(pool)
        .await?;

    Ok(())
}
