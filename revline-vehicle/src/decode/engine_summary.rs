//! Human-readable engine description
//!
//! Assembles a single display string from whichever engine fields the
//! decode populated, in fixed order: displacement, configuration/cylinder
//! count, horsepower, turbo tag, fuel type, electrification level.

use crate::types::EngineInfo;

/// Fallback when no engine field is available
pub const UNKNOWN_ENGINE: &str = "Unknown Engine";

/// Build the engine summary string, e.g. "3.0L V6 250HP Turbo Gasoline (HEV)".
///
/// Returns "Unknown Engine" iff every engine sub-field is absent.
pub fn engine_summary(engine: &EngineInfo) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(displacement) = engine.displacement_liters {
        parts.push(format!("{:.1}L", displacement));
    }

    // Prefer configuration + count ("V6"); fall back to "6-Cyl"
    match (engine.configuration.as_deref(), engine.cylinders) {
        (Some(configuration), Some(cylinders)) => {
            let prefix = configuration_prefix(configuration);
            if prefix.is_empty() {
                parts.push(format!("{}-Cyl", cylinders));
            } else {
                parts.push(format!("{}{}", prefix, cylinders));
            }
        }
        (None, Some(cylinders)) => {
            parts.push(format!("{}-Cyl", cylinders));
        }
        (Some(configuration), None) => {
            parts.push(configuration.to_string());
        }
        (None, None) => {}
    }

    if let Some(horsepower) = engine.horsepower {
        parts.push(format!("{}HP", horsepower));
    }

    if engine.turbo == Some(true) {
        parts.push("Turbo".to_string());
    }

    if let Some(fuel) = &engine.fuel_type_primary {
        parts.push(fuel.clone());
    }

    if let Some(level) = &engine.electrification_level {
        parts.push(format!("({})", level));
    }

    if parts.is_empty() {
        UNKNOWN_ENGINE.to_string()
    } else {
        parts.join(" ")
    }
}

/// Short prefix for the registry's configuration names
fn configuration_prefix(configuration: &str) -> &str {
    let lowered = configuration.to_lowercase();
    if lowered.starts_with('v') {
        "V"
    } else if lowered.starts_with("in-line") || lowered.starts_with("inline") {
        "I"
    } else if lowered.contains("horizontal") || lowered.starts_with("flat") {
        "H"
    } else if lowered.starts_with('w') {
        "W"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_engine_renders_in_fixed_order() {
        let engine = EngineInfo {
            cylinders: Some(6),
            displacement_liters: Some(3.0),
            configuration: Some("V-Shaped".into()),
            horsepower: Some(250),
            turbo: Some(true),
            fuel_type_primary: Some("Gasoline".into()),
            electrification_level: Some("Mild HEV".into()),
            ..Default::default()
        };

        assert_eq!(engine_summary(&engine), "3.0L V6 250HP Turbo Gasoline (Mild HEV)");
    }

    #[test]
    fn cylinders_without_configuration_fall_back() {
        let engine = EngineInfo {
            cylinders: Some(4),
            displacement_liters: Some(2.4),
            ..Default::default()
        };

        assert_eq!(engine_summary(&engine), "2.4L 4-Cyl");
    }

    #[test]
    fn inline_configuration_prefixes_i() {
        let engine = EngineInfo {
            cylinders: Some(4),
            configuration: Some("In-Line".into()),
            ..Default::default()
        };

        assert_eq!(engine_summary(&engine), "I4");
    }

    #[test]
    fn turbo_false_is_omitted() {
        let engine = EngineInfo {
            displacement_liters: Some(2.0),
            turbo: Some(false),
            ..Default::default()
        };

        assert_eq!(engine_summary(&engine), "2.0L");
    }

    #[test]
    fn unrecognized_configuration_falls_back_to_cylinder_count() {
        let engine = EngineInfo {
            cylinders: Some(2),
            configuration: Some("Rotary".into()),
            ..Default::default()
        };

        assert_eq!(engine_summary(&engine), "2-Cyl");
    }

    #[test]
    fn empty_engine_is_unknown() {
        assert_eq!(engine_summary(&EngineInfo::default()), UNKNOWN_ENGINE);
    }

    #[test]
    fn single_field_is_never_unknown() {
        let engine = EngineInfo {
            fuel_type_primary: Some("Diesel".into()),
            ..Default::default()
        };

        assert_eq!(engine_summary(&engine), "Diesel");
    }

    #[test]
    fn displacement_formats_one_decimal() {
        let engine = EngineInfo {
            displacement_liters: Some(5.0),
            ..Default::default()
        };

        assert_eq!(engine_summary(&engine), "5.0L");
    }
}
