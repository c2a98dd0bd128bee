//! Catalog key derivation
//!
//! The vehicle fingerprint groups observations about vehicles that share
//! specification but not identity. Both key derivations live here and
//! nowhere else, so the feed, query, and recompute paths can never disagree
//! on how a key is built.

/// Deterministic vehicle fingerprint from (year, make, model):
/// lower-cased, trimmed, whitespace runs collapsed to underscores.
///
/// `(2019, "Toyota", "Corolla")` -> `"2019_toyota_corolla"`.
pub fn vehicle_fingerprint(year: i64, make: &str, model: &str) -> String {
    format!("{}_{}_{}", year, squash(make), squash(model))
}

/// Normalized part name used as the second half of the catalog key
pub fn normalize_part_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn squash(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
