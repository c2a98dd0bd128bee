//! Decode completeness scoring
//!
//! The score is the fraction of a fixed set of essential fields the decode
//! populated, as an integer percentage. It is derived on every decode and
//! cached alongside the profile, never stored independently.

use crate::types::VehicleProfile;

/// The essential fields: year, make, model, cylinder count, displacement,
/// fuel type, drive type.
pub const ESSENTIAL_FIELD_COUNT: u32 = 7;

/// Percentage of essential fields populated, rounded to the nearest whole
/// percent. Always in [0, 100].
pub fn completeness_score(profile: &VehicleProfile) -> u8 {
    let mut present: u32 = 0;

    if profile.identification.model_year.is_some() {
        present += 1;
    }
    if profile.identification.make.is_some() {
        present += 1;
    }
    if profile.identification.model.is_some() {
        present += 1;
    }
    if profile.engine.cylinders.is_some() {
        present += 1;
    }
    if profile.engine.displacement_liters.is_some() {
        present += 1;
    }
    if profile.engine.fuel_type_primary.is_some() {
        present += 1;
    }
    if profile.drivetrain.drive_type.is_some() {
        present += 1;
    }

    ((present * 100) as f64 / ESSENTIAL_FIELD_COUNT as f64).round() as u8
}
