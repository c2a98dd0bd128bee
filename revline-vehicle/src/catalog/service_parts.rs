//! Service type to expected parts fallback table
//!
//! Read-only reference data for services the organic catalog has no
//! observations for yet. Keys are normalized service-type slugs; values
//! are the part names typically replaced during that service. Not derived
//! from observations and never written.

use std::collections::HashMap;

/// Static service-type -> expected-parts table
#[derive(Clone)]
pub struct ServicePartsTable {
    mappings: HashMap<&'static str, &'static [&'static str]>,
}

impl Default for ServicePartsTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ServicePartsTable {
    pub fn new() -> Self {
        Self {
            mappings: Self::build_mappings(),
        }
    }

    /// Expected part names for a service type, or None when unknown.
    ///
    /// Lookup keys are normalized the same way service types are stored:
    /// lower-cased, with spaces and dashes collapsed to underscores.
    pub fn expected_parts(&self, service_type: &str) -> Option<&'static [&'static str]> {
        let key = Self::normalize_key(service_type);
        self.mappings.get(key.as_str()).copied()
    }

    /// Number of known service types
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    fn normalize_key(service_type: &str) -> String {
        service_type
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }

    fn build_mappings() -> HashMap<&'static str, &'static [&'static str]> {
        let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();

        map.insert("oil_change", &["oil filter", "engine oil", "drain plug gasket"]);
        map.insert("brake_service", &["brake pads", "brake rotors", "brake fluid"]);
        map.insert("brake_pad_replacement", &["brake pads", "pad hardware kit"]);
        map.insert("brake_rotor_replacement", &["brake rotors", "brake pads"]);
        map.insert("brake_caliper_replacement", &["brake caliper", "brake fluid"]);
        map.insert("tire_rotation", &["wheel weights"]);
        map.insert("tire_replacement", &["tires", "valve stems", "wheel weights"]);
        map.insert("wheel_alignment", &["camber bolts", "tie rod ends"]);
        map.insert("battery_replacement", &["battery", "terminal cleaner"]);
        map.insert("alternator_replacement", &["alternator", "serpentine belt"]);
        map.insert("starter_replacement", &["starter motor"]);
        map.insert("spark_plug_replacement", &["spark plugs", "ignition coils"]);
        map.insert("ignition_coil_replacement", &["ignition coils", "spark plugs"]);
        map.insert("engine_air_filter", &["engine air filter"]);
        map.insert("cabin_air_filter", &["cabin air filter"]);
        map.insert("timing_belt_replacement", &["timing belt", "water pump", "tensioner", "idler pulley"]);
        map.insert("timing_chain_replacement", &["timing chain", "chain guides", "tensioner"]);
        map.insert("serpentine_belt_replacement", &["serpentine belt", "belt tensioner"]);
        map.insert("water_pump_replacement", &["water pump", "coolant", "gasket"]);
        map.insert("radiator_replacement", &["radiator", "coolant", "radiator hoses"]);
        map.insert("thermostat_replacement", &["thermostat", "coolant", "gasket"]);
        map.insert("coolant_flush", &["coolant"]);
        map.insert("transmission_service", &["transmission fluid", "transmission filter", "pan gasket"]);
        map.insert("transmission_replacement", &["transmission", "transmission fluid"]);
        map.insert("clutch_replacement", &["clutch kit", "flywheel", "throwout bearing"]);
        map.insert("cv_axle_replacement", &["cv axle", "axle nut"]);
        map.insert("wheel_bearing_replacement", &["wheel bearing", "hub assembly"]);
        map.insert("ball_joint_replacement", &["ball joint"]);
        map.insert("tie_rod_replacement", &["tie rod end"]);
        map.insert("control_arm_replacement", &["control arm", "control arm bushings"]);
        map.insert("shock_replacement", &["shock absorbers"]);
        map.insert("strut_replacement", &["struts", "strut mounts"]);
        map.insert("sway_bar_link_replacement", &["sway bar links"]);
        map.insert("power_steering_service", &["power steering fluid", "power steering pump"]);
        map.insert("ac_recharge", &["refrigerant", "o-rings"]);
        map.insert("ac_compressor_replacement", &["ac compressor", "receiver drier", "refrigerant"]);
        map.insert("heater_core_replacement", &["heater core", "coolant"]);
        map.insert("blower_motor_replacement", &["blower motor"]);
        map.insert("fuel_pump_replacement", &["fuel pump", "fuel filter"]);
        map.insert("fuel_filter_replacement", &["fuel filter"]);
        map.insert("fuel_injector_service", &["fuel injectors", "injector o-rings"]);
        map.insert("oxygen_sensor_replacement", &["oxygen sensor"]);
        map.insert("catalytic_converter_replacement", &["catalytic converter", "exhaust gaskets"]);
        map.insert("muffler_replacement", &["muffler", "exhaust clamps"]);
        map.insert("exhaust_repair", &["exhaust pipe", "exhaust gaskets", "hangers"]);
        map.insert("valve_cover_gasket_replacement", &["valve cover gasket", "spark plug tube seals"]);
        map.insert("head_gasket_replacement", &["head gasket", "head bolts", "coolant"]);
        map.insert("motor_mount_replacement", &["motor mount"]);
        map.insert("wiper_blade_replacement", &["wiper blades"]);
        map.insert("headlight_replacement", &["headlight bulb", "headlight assembly"]);
        map.insert("window_regulator_replacement", &["window regulator", "window motor"]);

        map
    }
}
