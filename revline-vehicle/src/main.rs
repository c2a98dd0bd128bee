//! revline-vehicle - Catalog recomputation maintenance task
//!
//! Recalculates the organic catalog's price aggregates from the underlying
//! transaction history. Intended to run nightly from cron or a systemd
//! timer; the vehicle data library itself never schedules it.

use anyhow::Result;
use clap::Parser;
use revline_vehicle::catalog::CatalogRecompute;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "revline-vehicle", about = "Revline catalog recomputation job")]
struct Args {
    /// Root folder holding the platform database
    #[arg(long, env = "REVLINE_ROOT")]
    root_folder: Option<String>,

    /// Explicit database path (overrides the root folder)
    #[arg(long)]
    database: Option<std::path::PathBuf>,

    /// How many days of completed transactions to re-scan
    #[arg(long, default_value_t = revline_vehicle::catalog::recompute::DEFAULT_WINDOW_DAYS)]
    window_days: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Starting revline-vehicle catalog recomputation");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let db_path = match args.database {
        Some(path) => path,
        None => {
            let root = revline_common::config::resolve_root_folder(
                args.root_folder.as_deref(),
                "REVLINE_ROOT",
            )?;
            revline_common::config::database_path(&root)
        }
    };
    info!("Database: {}", db_path.display());

    let pool = revline_common::db::init_database(&db_path).await?;

    let summary = CatalogRecompute::with_window(pool, args.window_days)
        .run()
        .await?;

    info!(
        examined = summary.entries_examined,
        updated = summary.entries_updated,
        "Recomputation finished"
    );

    Ok(())
}
