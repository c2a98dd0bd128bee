//! Flat pair list to structured profile normalization
//!
//! The registry hands back every decoded datum as a (variable id, value)
//! row. Normalization walks the rows once, routing each mapped id into its
//! field group. Blank or whitespace-only values are treated as absent, and
//! a numeric field that fails to parse stays absent; nothing here can fail
//! the decode as a whole.

use crate::decode::field_map::{
    semantic_field, SemanticField, AMBIGUOUS_ERROR_CODES, ERROR_CODE_VARIABLE, ERROR_TEXT_VARIABLE,
};
use crate::types::{RegistryPair, VehicleProfile};

/// Result of normalizing one registry response
#[derive(Debug, Clone, Default)]
pub struct NormalizedDecode {
    pub profile: VehicleProfile,
    /// Non-fatal warning when the registry flagged the decode as ambiguous
    pub warning: Option<String>,
    /// All error codes the registry reported, for the caller to inspect
    pub error_codes: Vec<String>,
}

/// Normalize the registry's flat pair list into a structured profile
pub fn normalize(pairs: &[RegistryPair]) -> NormalizedDecode {
    let mut profile = VehicleProfile::default();
    let mut error_codes: Vec<String> = Vec::new();
    let mut error_text: Option<String> = None;

    for pair in pairs {
        let Some(value) = clean_value(pair.value.as_deref()) else {
            continue;
        };

        if pair.variable_id == ERROR_CODE_VARIABLE {
            error_codes = value.split(',').map(|c| c.trim().to_string()).collect();
            continue;
        }
        if pair.variable_id == ERROR_TEXT_VARIABLE {
            error_text = Some(value);
            continue;
        }

        let Some(field) = semantic_field(pair.variable_id) else {
            continue;
        };

        apply_field(&mut profile, field, value);
    }

    let warning = ambiguity_warning(&error_codes, error_text.as_deref());

    NormalizedDecode {
        profile,
        warning,
        error_codes,
    }
}

/// Route one cleaned value into its profile field
fn apply_field(profile: &mut VehicleProfile, field: SemanticField, value: String) {
    use SemanticField::*;

    match field {
        Make => profile.identification.make = Some(value),
        Model => profile.identification.model = Some(value),
        ModelYear => profile.identification.model_year = parse_number(&value),
        Trim => profile.identification.trim = Some(value),
        Series => profile.identification.series = Some(value),
        VehicleType => profile.identification.vehicle_type = Some(value),

        BodyClass => profile.body.body_class = Some(value),
        Doors => profile.body.doors = parse_number(&value),
        Seats => profile.body.seats = parse_number(&value),
        GrossVehicleWeightRating => profile.body.gross_vehicle_weight_rating = Some(value),

        Cylinders => profile.engine.cylinders = parse_number(&value),
        DisplacementLiters => profile.engine.displacement_liters = parse_float(&value),
        DisplacementCc => profile.engine.displacement_cc = parse_float(&value),
        EngineConfiguration => profile.engine.configuration = Some(value),
        EngineModel => profile.engine.engine_model = Some(value),
        Horsepower => profile.engine.horsepower = parse_number(&value),
        FuelTypePrimary => profile.engine.fuel_type_primary = Some(value),
        FuelTypeSecondary => profile.engine.fuel_type_secondary = Some(value),
        Turbo => profile.engine.turbo = parse_yes_no(&value),
        ElectrificationLevel => profile.engine.electrification_level = Some(value),
        OtherEngineInfo => profile.engine.other_info = Some(value),

        DriveType => profile.drivetrain.drive_type = Some(value),
        TransmissionStyle => profile.drivetrain.transmission_style = Some(value),
        TransmissionSpeeds => profile.drivetrain.transmission_speeds = parse_number(&value),

        ManufacturerName => profile.manufacturer.name = Some(value),
        PlantCity => profile.manufacturer.plant_city = Some(value),
        PlantState => profile.manufacturer.plant_state = Some(value),
        PlantCountry => profile.manufacturer.plant_country = Some(value),

        Abs => profile.safety.abs = Some(value),
        ElectronicStabilityControl => profile.safety.electronic_stability_control = Some(value),
        TractionControl => profile.safety.traction_control = Some(value),
        TirePressureMonitoring => profile.safety.tire_pressure_monitoring = Some(value),
        FrontAirbags => profile.safety.front_airbags = Some(value),
        SideAirbags => profile.safety.side_airbags = Some(value),
        CurtainAirbags => profile.safety.curtain_airbags = Some(value),
        SeatBeltType => profile.safety.seat_belt_type = Some(value),

        AdaptiveCruiseControl => profile.driver_assistance.adaptive_cruise_control = Some(value),
        ForwardCollisionWarning => {
            profile.driver_assistance.forward_collision_warning = Some(value)
        }
        AutomaticEmergencyBraking => {
            profile.driver_assistance.automatic_emergency_braking = Some(value)
        }
        BlindSpotWarning => profile.driver_assistance.blind_spot_warning = Some(value),
        LaneDepartureWarning => profile.driver_assistance.lane_departure_warning = Some(value),
        LaneKeepAssist => profile.driver_assistance.lane_keep_assist = Some(value),
        BackupCamera => profile.driver_assistance.backup_camera = Some(value),
        ParkingAssist => profile.driver_assistance.parking_assist = Some(value),
    }
}

/// Trim a raw registry value; blank values are absent, not empty strings
fn clean_value(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an integer field, absent on failure
fn parse_number<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

/// Parse a float field, absent on failure
fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// Registry boolean fields arrive as "Yes"/"No" text
fn parse_yes_no(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Build the non-fatal warning for ambiguous decodes
fn ambiguity_warning(error_codes: &[String], error_text: Option<&str>) -> Option<String> {
    let ambiguous: Vec<&str> = error_codes
        .iter()
        .filter(|c| AMBIGUOUS_ERROR_CODES.contains(&c.as_str()))
        .map(|c| c.as_str())
        .collect();

    if ambiguous.is_empty() {
        return None;
    }

    Some(match error_text {
        Some(text) => format!("Registry reported an ambiguous decode: {}", text),
        None => format!(
            "Registry reported an ambiguous decode (code {})",
            ambiguous.join(", ")
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: i64, value: &str) -> RegistryPair {
        RegistryPair::new(id, value)
    }

    #[test]
    fn maps_identification_fields() {
        let decoded = normalize(&[
            pair(26, "HONDA"),
            pair(28, "Accord"),
            pair(29, "2003"),
            pair(38, "EX"),
        ]);

        assert_eq!(decoded.profile.identification.make.as_deref(), Some("HONDA"));
        assert_eq!(
            decoded.profile.identification.model.as_deref(),
            Some("Accord")
        );
        assert_eq!(decoded.profile.identification.model_year, Some(2003));
        assert_eq!(decoded.profile.identification.trim.as_deref(), Some("EX"));
    }

    #[test]
    fn blank_values_are_absent() {
        let decoded = normalize(&[
            pair(26, ""),
            pair(28, "   "),
            RegistryPair {
                variable_id: 29,
                value: None,
            },
        ]);

        assert_eq!(decoded.profile.identification.make, None);
        assert_eq!(decoded.profile.identification.model, None);
        assert_eq!(decoded.profile.identification.model_year, None);
    }

    #[test]
    fn numeric_parse_failure_leaves_field_absent() {
        let decoded = normalize(&[pair(29, "not-a-year"), pair(9, "four"), pair(13, "2.4")]);

        assert_eq!(decoded.profile.identification.model_year, None);
        assert_eq!(decoded.profile.engine.cylinders, None);
        assert_eq!(decoded.profile.engine.displacement_liters, Some(2.4));
    }

    #[test]
    fn unmapped_ids_are_ignored() {
        let decoded = normalize(&[pair(9999, "whatever"), pair(26, "HONDA")]);
        assert_eq!(decoded.profile.identification.make.as_deref(), Some("HONDA"));
    }

    #[test]
    fn turbo_parses_yes_no() {
        assert_eq!(normalize(&[pair(135, "Yes")]).profile.engine.turbo, Some(true));
        assert_eq!(normalize(&[pair(135, "No")]).profile.engine.turbo, Some(false));
        assert_eq!(normalize(&[pair(135, "Maybe")]).profile.engine.turbo, None);
    }

    #[test]
    fn ambiguous_error_code_produces_warning() {
        let decoded = normalize(&[pair(26, "HONDA"), pair(143, "6")]);
        assert!(decoded.warning.is_some());
        assert!(decoded.warning.unwrap().contains("ambiguous"));
        assert_eq!(decoded.error_codes, vec!["6"]);
    }

    #[test]
    fn warning_prefers_registry_error_text() {
        let decoded = normalize(&[pair(143, "14"), pair(191, "Unable to decode rear axle")]);
        assert!(decoded
            .warning
            .unwrap()
            .contains("Unable to decode rear axle"));
    }

    #[test]
    fn clean_decode_has_no_warning() {
        let decoded = normalize(&[pair(26, "HONDA"), pair(143, "0")]);
        assert_eq!(decoded.warning, None);
        assert_eq!(decoded.error_codes, vec!["0"]);
    }

    #[test]
    fn comma_separated_error_codes_are_split() {
        let decoded = normalize(&[pair(143, "6,14")]);
        assert_eq!(decoded.error_codes, vec!["6", "14"]);
        assert!(decoded.warning.is_some());
    }
}
