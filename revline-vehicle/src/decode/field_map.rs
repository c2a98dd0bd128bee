//! Registry variable-id to semantic field mapping
//!
//! The registry publishes each decoded datum under a stable numeric
//! variable id. This table maps the ids we consume to tagged fields in the
//! normalized profile; ids outside the table are ignored. The mapping is
//! the single place where the external schema meets ours, and it is tested
//! exhaustively rather than re-derived anywhere else.

/// Variable id carrying the registry's error code list (comma-separated)
pub const ERROR_CODE_VARIABLE: i64 = 143;

/// Variable id carrying the registry's human-readable error text
pub const ERROR_TEXT_VARIABLE: i64 = 191;

/// Error codes treated as "ambiguous decode": the result is still usable
/// but carries a warning. 1 = check digit mismatch, 6 = incomplete VIN,
/// 14 = some fields could not be decoded.
pub const AMBIGUOUS_ERROR_CODES: &[&str] = &["1", "6", "14"];

/// Error code meaning the VIN pattern matched nothing in the registry
pub const UNRECOGNIZED_VIN_CODE: &str = "11";

/// Tagged semantic field in the normalized profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticField {
    // Identification
    Make,
    Model,
    ModelYear,
    Trim,
    Series,
    VehicleType,
    // Body
    BodyClass,
    Doors,
    Seats,
    GrossVehicleWeightRating,
    // Engine
    Cylinders,
    DisplacementLiters,
    DisplacementCc,
    EngineConfiguration,
    EngineModel,
    Horsepower,
    FuelTypePrimary,
    FuelTypeSecondary,
    Turbo,
    ElectrificationLevel,
    OtherEngineInfo,
    // Drivetrain
    DriveType,
    TransmissionStyle,
    TransmissionSpeeds,
    // Manufacturer
    ManufacturerName,
    PlantCity,
    PlantState,
    PlantCountry,
    // Safety systems
    Abs,
    ElectronicStabilityControl,
    TractionControl,
    TirePressureMonitoring,
    FrontAirbags,
    SideAirbags,
    CurtainAirbags,
    SeatBeltType,
    // Driver assistance
    AdaptiveCruiseControl,
    ForwardCollisionWarning,
    AutomaticEmergencyBraking,
    BlindSpotWarning,
    LaneDepartureWarning,
    LaneKeepAssist,
    BackupCamera,
    ParkingAssist,
}

/// Map a registry variable id to its semantic field, if we consume it
pub fn semantic_field(variable_id: i64) -> Option<SemanticField> {
    use SemanticField::*;

    let field = match variable_id {
        26 => Make,
        28 => Model,
        29 => ModelYear,
        38 => Trim,
        34 => Series,
        39 => VehicleType,

        5 => BodyClass,
        14 => Doors,
        33 => Seats,
        25 => GrossVehicleWeightRating,

        9 => Cylinders,
        13 => DisplacementLiters,
        11 => DisplacementCc,
        64 => EngineConfiguration,
        18 => EngineModel,
        71 => Horsepower,
        24 => FuelTypePrimary,
        66 => FuelTypeSecondary,
        135 => Turbo,
        126 => ElectrificationLevel,
        129 => OtherEngineInfo,

        15 => DriveType,
        37 => TransmissionStyle,
        63 => TransmissionSpeeds,

        27 => ManufacturerName,
        31 => PlantCity,
        77 => PlantState,
        75 => PlantCountry,

        86 => Abs,
        99 => ElectronicStabilityControl,
        100 => TractionControl,
        168 => TirePressureMonitoring,
        65 => FrontAirbags,
        107 => SideAirbags,
        55 => CurtainAirbags,
        79 => SeatBeltType,

        81 => AdaptiveCruiseControl,
        101 => ForwardCollisionWarning,
        87 => AutomaticEmergencyBraking,
        88 => BlindSpotWarning,
        102 => LaneDepartureWarning,
        103 => LaneKeepAssist,
        104 => BackupCamera,
        105 => ParkingAssist,

        _ => return None,
    };

    Some(field)
}
