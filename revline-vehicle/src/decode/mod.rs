//! VIN decode and normalization engine
//!
//! Maps the registry's flat (variable id, value) pair list into the
//! structured [`crate::types::VehicleProfile`], derives the completeness
//! score and engine summary, and orchestrates cache-aside lookups.

pub mod completeness;
pub mod engine_summary;
pub mod field_map;
pub mod normalizer;
pub mod service;

pub use completeness::completeness_score;
pub use engine_summary::engine_summary;
pub use normalizer::{normalize, NormalizedDecode};
pub use service::{normalize_vin, DecodeService};
