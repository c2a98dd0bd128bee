//! Shared types for the vehicle data core

use serde::{Deserialize, Serialize};

/// One (variable id, value) pair from the registry's flat decode response.
///
/// The full pair list is preserved verbatim as the cache's raw audit blob;
/// everything else in the crate works off the normalized [`VehicleProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryPair {
    pub variable_id: i64,
    pub value: Option<String>,
}

impl RegistryPair {
    pub fn new(variable_id: i64, value: impl Into<String>) -> Self {
        Self {
            variable_id,
            value: Some(value.into()),
        }
    }
}

/// Identification group of the normalized profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    pub make: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<u16>,
    pub trim: Option<String>,
    pub series: Option<String>,
    pub vehicle_type: Option<String>,
}

/// Body group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub body_class: Option<String>,
    pub doors: Option<u8>,
    pub seats: Option<u8>,
    pub gross_vehicle_weight_rating: Option<String>,
}

/// Engine group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub cylinders: Option<u8>,
    pub displacement_liters: Option<f64>,
    pub displacement_cc: Option<f64>,
    pub configuration: Option<String>,
    pub engine_model: Option<String>,
    pub horsepower: Option<u16>,
    pub fuel_type_primary: Option<String>,
    pub fuel_type_secondary: Option<String>,
    pub turbo: Option<bool>,
    pub electrification_level: Option<String>,
    pub other_info: Option<String>,
}

impl EngineInfo {
    /// True when every engine sub-field is absent
    pub fn is_empty(&self) -> bool {
        self.cylinders.is_none()
            && self.displacement_liters.is_none()
            && self.displacement_cc.is_none()
            && self.configuration.is_none()
            && self.engine_model.is_none()
            && self.horsepower.is_none()
            && self.fuel_type_primary.is_none()
            && self.fuel_type_secondary.is_none()
            && self.turbo.is_none()
            && self.electrification_level.is_none()
            && self.other_info.is_none()
    }
}

/// Drivetrain group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drivetrain {
    pub drive_type: Option<String>,
    pub transmission_style: Option<String>,
    pub transmission_speeds: Option<u8>,
}

/// Manufacturer group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerInfo {
    pub name: Option<String>,
    pub plant_city: Option<String>,
    pub plant_state: Option<String>,
    pub plant_country: Option<String>,
}

/// Safety-system group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetySystems {
    pub abs: Option<String>,
    pub electronic_stability_control: Option<String>,
    pub traction_control: Option<String>,
    pub tire_pressure_monitoring: Option<String>,
    pub front_airbags: Option<String>,
    pub side_airbags: Option<String>,
    pub curtain_airbags: Option<String>,
    pub seat_belt_type: Option<String>,
}

/// Advanced-driver-assistance group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverAssistance {
    pub adaptive_cruise_control: Option<String>,
    pub forward_collision_warning: Option<String>,
    pub automatic_emergency_braking: Option<String>,
    pub blind_spot_warning: Option<String>,
    pub lane_departure_warning: Option<String>,
    pub lane_keep_assist: Option<String>,
    pub backup_camera: Option<String>,
    pub parking_assist: Option<String>,
}

/// The normalized decode result.
///
/// Every field is independently nullable: the registry may omit any of
/// them, and normalization never fabricates a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub identification: Identification,
    pub body: Body,
    pub engine: EngineInfo,
    pub drivetrain: Drivetrain,
    pub manufacturer: ManufacturerInfo,
    pub safety: SafetySystems,
    pub driver_assistance: DriverAssistance,
}

/// Where a decode result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeSource {
    Cache,
    LiveFetch,
}

/// A completed decode: profile plus the derived values callers render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedVehicle {
    pub vin: String,
    pub profile: VehicleProfile,
    /// Integer percentage of essential fields populated, 0-100
    pub completeness: u8,
    pub engine_summary: String,
    /// Non-fatal warning when the registry reported an ambiguous decode
    pub warning: Option<String>,
    pub source: DecodeSource,
}

/// One recall campaign from the recall registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallCampaign {
    pub campaign_number: String,
    pub component: Option<String>,
    pub summary: Option<String>,
    pub consequence: Option<String>,
    pub remedy: Option<String>,
    pub manufacturer: Option<String>,
    pub report_received_date: Option<String>,
}

/// One make from the registry's full make list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeEntry {
    pub make_id: i64,
    pub make_name: String,
}

/// One model from the registry's models-by-make-and-year list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub model_id: i64,
    pub make_name: String,
    pub model_name: String,
}

/// One aggregated crowd-sourced price observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub fingerprint: String,
    pub part_name: String,
    pub usage_count: i64,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub part_number: Option<String>,
    pub brand: Option<String>,
    pub service_type: Option<String>,
    pub region: Option<String>,
    /// RFC 3339 timestamp of the most recent observation
    pub last_seen_at: String,
}
