//! Decode engine integration tests
//!
//! Cache-aside behavior against a counting registry double: the second
//! decode inside the TTL must be served from the cache with zero external
//! calls, and failure kinds must surface as their own typed errors.

mod common;

use common::{honda_accord_pairs, memory_pool, ScriptedVinRegistry, VinBehavior};
use revline_vehicle::cache::DecodeCache;
use revline_vehicle::decode::DecodeService;
use revline_vehicle::error::DecodeError;
use revline_vehicle::types::{DecodeSource, RegistryPair};
use std::sync::Arc;

const HONDA_VIN: &str = "1HGCM82633A004352";

fn service(registry: Arc<ScriptedVinRegistry>, pool: sqlx::SqlitePool) -> DecodeService {
    DecodeService::new(registry, DecodeCache::new(pool))
}

#[tokio::test]
async fn live_decode_normalizes_the_registry_response() {
    let pool = memory_pool().await;
    let registry = Arc::new(ScriptedVinRegistry::returning(honda_accord_pairs()));
    let decode = service(registry.clone(), pool);

    let decoded = decode.decode(HONDA_VIN, None).await.unwrap();

    assert_eq!(decoded.vin, HONDA_VIN);
    assert_eq!(decoded.profile.identification.make.as_deref(), Some("HONDA"));
    assert_eq!(decoded.profile.identification.model.as_deref(), Some("Accord"));
    assert_eq!(decoded.profile.identification.model_year, Some(2003));
    assert_eq!(decoded.profile.engine.cylinders, Some(6));
    assert_eq!(decoded.source, DecodeSource::LiveFetch);
    // All seven essential fields present in the fixture
    assert_eq!(decoded.completeness, 100);
    assert_eq!(decoded.engine_summary, "3.0L V6 240HP Gasoline");
    assert_eq!(registry.call_count(), 1);
}

#[tokio::test]
async fn second_decode_within_ttl_is_cache_sourced_with_zero_external_calls() {
    let pool = memory_pool().await;
    let registry = Arc::new(ScriptedVinRegistry::returning(honda_accord_pairs()));
    let decode = service(registry.clone(), pool);

    let first = decode.decode(HONDA_VIN, None).await.unwrap();
    let second = decode.decode(HONDA_VIN, None).await.unwrap();

    assert_eq!(first.source, DecodeSource::LiveFetch);
    assert_eq!(second.source, DecodeSource::Cache);
    // Idempotent within the TTL: identical normalized profiles
    assert_eq!(first.profile, second.profile);
    assert_eq!(first.completeness, second.completeness);
    assert_eq!(first.engine_summary, second.engine_summary);
    // The second call issued no external request
    assert_eq!(registry.call_count(), 1);
}

#[tokio::test]
async fn vin_normalization_unifies_cache_keys() {
    let pool = memory_pool().await;
    let registry = Arc::new(ScriptedVinRegistry::returning(honda_accord_pairs()));
    let decode = service(registry.clone(), pool);

    decode.decode("1hgcm82633a004352", None).await.unwrap();
    let second = decode.decode(" 1HG-CM82633A004352 ", None).await.unwrap();

    assert_eq!(second.source, DecodeSource::Cache);
    assert_eq!(registry.call_count(), 1);
}

#[tokio::test]
async fn expired_entry_is_evicted_and_refetched() {
    let pool = memory_pool().await;
    let registry = Arc::new(ScriptedVinRegistry::returning(honda_accord_pairs()));
    let decode = service(registry.clone(), pool.clone());

    decode.decode(HONDA_VIN, None).await.unwrap();

    // Age the entry past its expiry
    sqlx::query("UPDATE vin_decode_cache SET expires_at = '2020-01-01T00:00:00+00:00' WHERE vin = ?")
        .bind(HONDA_VIN)
        .execute(&pool)
        .await
        .unwrap();

    let again = decode.decode(HONDA_VIN, None).await.unwrap();

    assert_eq!(again.source, DecodeSource::LiveFetch);
    assert_eq!(registry.call_count(), 2);

    // The refetch replaced the expired row with a live one
    let expires_at: String =
        sqlx::query_scalar("SELECT expires_at FROM vin_decode_cache WHERE vin = ?")
            .bind(HONDA_VIN)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(expires_at > chrono::Utc::now().to_rfc3339());
}

#[tokio::test]
async fn short_vin_is_rejected_before_any_external_call() {
    let pool = memory_pool().await;
    let registry = Arc::new(ScriptedVinRegistry::returning(honda_accord_pairs()));
    let decode = service(registry.clone(), pool);

    let result = decode.decode("1HGCM8", None).await;

    assert!(matches!(result, Err(DecodeError::InvalidVin(_))));
    assert_eq!(registry.call_count(), 0);
}

#[tokio::test]
async fn timeout_surfaces_as_its_own_failure_kind() {
    let pool = memory_pool().await;
    let registry = Arc::new(ScriptedVinRegistry::with_behavior(VinBehavior::Timeout));
    let decode = service(registry, pool);

    assert!(matches!(
        decode.decode(HONDA_VIN, None).await,
        Err(DecodeError::Timeout)
    ));
}

#[tokio::test]
async fn unavailable_registry_surfaces_as_service_unavailable() {
    let pool = memory_pool().await;
    let registry = Arc::new(ScriptedVinRegistry::with_behavior(VinBehavior::Unavailable));
    let decode = service(registry, pool);

    assert!(matches!(
        decode.decode(HONDA_VIN, None).await,
        Err(DecodeError::ServiceUnavailable(_))
    ));
}

#[tokio::test]
async fn empty_result_set_is_no_results() {
    let pool = memory_pool().await;
    let registry = Arc::new(ScriptedVinRegistry::with_behavior(VinBehavior::Empty));
    let decode = service(registry, pool.clone());

    assert!(matches!(
        decode.decode(HONDA_VIN, None).await,
        Err(DecodeError::NoResults)
    ));

    // Failures are never cached
    let cached: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vin_decode_cache")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(cached, 0);
}

#[tokio::test]
async fn unrecognized_vin_pattern_is_no_results() {
    let pool = memory_pool().await;
    // Error code 11 with nothing decoded: the registry matched no pattern
    let registry = Arc::new(ScriptedVinRegistry::returning(vec![
        RegistryPair::new(143, "11"),
        RegistryPair::new(191, "Incorrect Model Year, decoded data may not be accurate"),
    ]));
    let decode = service(registry, pool);

    assert!(matches!(
        decode.decode(HONDA_VIN, None).await,
        Err(DecodeError::NoResults)
    ));
}

#[tokio::test]
async fn ambiguous_decode_carries_warning_but_succeeds() {
    let pool = memory_pool().await;
    let mut pairs = honda_accord_pairs();
    pairs.retain(|p| p.variable_id != 143);
    pairs.push(RegistryPair::new(143, "14"));
    let registry = Arc::new(ScriptedVinRegistry::returning(pairs));
    let decode = service(registry, pool);

    let decoded = decode.decode(HONDA_VIN, None).await.unwrap();

    assert!(decoded.warning.is_some());
    assert_eq!(decoded.profile.identification.make.as_deref(), Some("HONDA"));

    // The warning survives the cache round-trip too
    let again = decode.decode(HONDA_VIN, None).await.unwrap();
    assert_eq!(again.source, DecodeSource::Cache);
    assert!(again.warning.is_some());
}

#[tokio::test]
async fn raw_response_is_preserved_as_audit_blob() {
    let pool = memory_pool().await;
    let registry = Arc::new(ScriptedVinRegistry::returning(honda_accord_pairs()));
    let decode = service(registry, pool.clone());

    decode.decode(HONDA_VIN, None).await.unwrap();

    let raw: String = sqlx::query_scalar("SELECT raw_response FROM vin_decode_cache WHERE vin = ?")
        .bind(HONDA_VIN)
        .fetch_one(&pool)
        .await
        .unwrap();
    let pairs: Vec<RegistryPair> = serde_json::from_str(&raw).unwrap();
    assert_eq!(pairs, honda_accord_pairs());
}
