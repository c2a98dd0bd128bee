//! # revline-vehicle - Vehicle Data Resolution & Tiered Access Layer
//!
//! Resolves authoritative and crowd-sourced data about a vehicle identified
//! by VIN, and decides per user and per feature which backing source answers
//! a request:
//!
//! - VIN decode and normalization against the government registry, with a
//!   30-day decode cache (cache-aside, lazy expiry)
//! - On-demand recall and makes/models lookup adapters
//! - The organic parts catalog: priced line items from completed service
//!   transactions, aggregated per (vehicle fingerprint, part name), with a
//!   nightly recomputation job
//! - The feature-tier router gating premium features behind the caller's
//!   subscription state
//!
//! This crate owns no network listener; other in-process services consume
//! it through the [`VehicleData`] facade. The only binary it ships runs the
//! catalog recomputation as a scheduled maintenance task.

pub mod cache;
pub mod catalog;
pub mod decode;
pub mod error;
pub mod registry;
pub mod router;
pub mod service;
pub mod types;

pub use error::DecodeError;
pub use service::VehicleData;
pub use types::{DecodeSource, DecodedVehicle, VehicleProfile};
