//! Cache-aside decode orchestration

use crate::cache::DecodeCache;
use crate::decode::field_map::UNRECOGNIZED_VIN_CODE;
use crate::decode::{completeness_score, engine_summary, normalize};
use crate::error::DecodeError;
use crate::registry::VinRegistry;
use crate::types::{DecodeSource, DecodedVehicle};
use std::sync::Arc;
use tracing::{debug, warn};

/// Minimum VIN length after stripping ambiguous characters.
///
/// Partial VINs down to 11 characters still decode; anything shorter is
/// rejected before an external call is made.
pub const MIN_VIN_LENGTH: usize = 11;

/// Normalize a raw VIN: uppercase, drop non-alphanumerics, strip the
/// ambiguous letters I/O/Q (never valid in a VIN, common in transcription).
pub fn normalize_vin(raw: &str) -> Result<String, DecodeError> {
    let vin: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| !matches!(c, 'I' | 'O' | 'Q'))
        .collect();

    if vin.len() < MIN_VIN_LENGTH {
        return Err(DecodeError::InvalidVin(format!(
            "'{}' is too short after normalization ({} chars, need {})",
            raw.trim(),
            vin.len(),
            MIN_VIN_LENGTH
        )));
    }

    Ok(vin)
}

/// VIN decode engine: cache-aside over the external registry
#[derive(Clone)]
pub struct DecodeService {
    registry: Arc<dyn VinRegistry>,
    cache: DecodeCache,
}

impl DecodeService {
    pub fn new(registry: Arc<dyn VinRegistry>, cache: DecodeCache) -> Self {
        Self { registry, cache }
    }

    /// Decode a VIN, serving from cache when a live entry exists.
    ///
    /// A successful live decode is written through the cache with a 30-day
    /// expiry; a cache write failure is logged and the decode still
    /// succeeds. No failure here is retried automatically.
    pub async fn decode(
        &self,
        vin: &str,
        model_year: Option<u16>,
    ) -> Result<DecodedVehicle, DecodeError> {
        let vin = normalize_vin(vin)?;

        // Cache trouble must not take down the decode path; treat a read
        // failure as a miss and carry on to the live fetch
        match self.cache.get(&vin).await {
            Ok(Some(hit)) => {
                debug!(vin = %vin, "Decode served from cache");
                return Ok(DecodedVehicle {
                    vin: hit.vin,
                    profile: hit.profile,
                    completeness: hit.completeness,
                    engine_summary: hit.engine_summary,
                    warning: hit.warning,
                    source: DecodeSource::Cache,
                });
            }
            Ok(None) => {}
            Err(e) => {
                warn!(vin = %vin, error = %e, "Decode cache read failed, falling back to live fetch");
            }
        }

        let pairs = self.registry.decode_extended(&vin, model_year).await?;
        if pairs.is_empty() {
            return Err(DecodeError::NoResults);
        }

        let normalized = normalize(&pairs);

        // The registry answers pattern-match failures with a populated error
        // channel and an otherwise empty profile
        if normalized
            .error_codes
            .iter()
            .any(|c| c == UNRECOGNIZED_VIN_CODE)
            && normalized.profile.identification.make.is_none()
            && normalized.profile.identification.model.is_none()
        {
            return Err(DecodeError::NoResults);
        }

        let completeness = completeness_score(&normalized.profile);
        let summary = engine_summary(&normalized.profile.engine);
        let raw_response =
            serde_json::to_string(&pairs).unwrap_or_else(|_| "[]".to_string());

        if let Err(e) = self
            .cache
            .put(
                &vin,
                &normalized.profile,
                completeness,
                &summary,
                normalized.warning.as_deref(),
                &raw_response,
            )
            .await
        {
            warn!(vin = %vin, error = %e, "Decode cache write failed, returning uncached result");
        }

        debug!(vin = %vin, completeness = completeness, "Decode served from registry");

        Ok(DecodedVehicle {
            vin,
            profile: normalized.profile,
            completeness,
            engine_summary: summary,
            warning: normalized.warning,
            source: DecodeSource::LiveFetch,
        })
    }
}
