//! Organic parts catalog
//!
//! Crowd-sourced part pricing built from completed service transactions:
//! a feed path that upserts running aggregates as transactions complete, a
//! query path serving regional pricing and autocomplete, and a periodic
//! recomputation job that replaces the running approximations with exact
//! aggregates from the underlying transaction history.

pub mod feed;
pub mod fingerprint;
pub mod query;
pub mod recompute;
pub mod service_parts;

pub use feed::CatalogFeed;
pub use fingerprint::{normalize_part_name, vehicle_fingerprint};
pub use query::{CatalogQuery, PricingFilter};
pub use recompute::{CatalogRecompute, RecomputeSummary};
pub use service_parts::ServicePartsTable;
