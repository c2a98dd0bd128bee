//! Error types for the vehicle data core

use thiserror::Error;
use uuid::Uuid;

/// Failures on the decode and registry lookup paths.
///
/// These are surfaced to the caller, which decides whether to retry or show
/// an error. Persistence problems (cache or catalog writes) are deliberately
/// not represented here: they are logged at the call site and never fail the
/// operation that triggered them.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// VIN failed validation before any external call was made
    #[error("Invalid VIN: {0}")]
    InvalidVin(String),

    /// The registry did not answer within the request timeout
    #[error("Registry request timed out")]
    Timeout,

    /// The registry answered with a non-success status or could not be reached
    #[error("Registry unavailable: {0}")]
    ServiceUnavailable(String),

    /// Well-formed call, but the registry had nothing for this VIN
    #[error("No decode results for VIN")]
    NoResults,
}

/// Failures on the feature routing path
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Vehicle not found: {0}")]
    UnknownVehicle(Uuid),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Storage(#[from] revline_common::Error),
}
