//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::TtlCache;
use crate::error::{CacheError, Result};
use crate::models::{GetResponse, HealthResponse, SetRequest, SetResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// One lock guards the whole cache: `set` and reconciliation touch the
/// entry table and the expiry index together, so readers must never see
/// one structure updated without the other.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache
    pub cache: Arc<RwLock<TtlCache<String, String>>>,
    /// TTL applied when a request does not specify one
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState with the given cache and default TTL.
    pub fn new(cache: TtlCache<String, String>, default_ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            TtlCache::new(),
            Duration::from_millis(config.default_ttl_ms),
        )
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with an optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request (rejects empty keys and negative TTLs)
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req
        .ttl_ms
        .map(|ms| Duration::from_millis(ms as u64))
        .unwrap_or(state.default_ttl);

    // Acquire write lock and set the value
    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key. Expired keys are
/// indistinguishable from missing ones.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Acquire write lock (lookup drives lazy eviction and stats updates)
    let mut cache = state.cache.write().await;
    let value = cache.get(&key).cloned();

    match value {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Acquire read lock for stats
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.expired_removals,
        stats.stale_discards,
        stats.total_entries,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn test_state() -> AppState {
        AppState::new(TtlCache::new(), Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        // Set a value
        let req = SetRequest {
            key: "test_key".to_string(),
            value: "test_value".to_string(),
            ttl_ms: None,
        };
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        // Get the value
        let result = get_handler(State(state.clone()), Path("test_key".to_string())).await;
        assert!(result.is_ok());
        let response = result.unwrap();
        assert_eq!(response.value, "test_value");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_expired_key() {
        let clock = Arc::new(ManualClock::new());
        let state = AppState::new(
            TtlCache::with_clock(clock.clone()),
            Duration::from_secs(300),
        );

        let req = SetRequest {
            key: "short_lived".to_string(),
            value: "value".to_string(),
            ttl_ms: Some(1_000),
        };
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        clock.advance(Duration::from_millis(1_500));

        let result = get_handler(State(state), Path("short_lived".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state();

        let req = SetRequest {
            key: "".to_string(), // Empty key is invalid
            value: "value".to_string(),
            ttl_ms: None,
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_set_negative_ttl_rejected() {
        let state = test_state();

        let req = SetRequest {
            key: "key".to_string(),
            value: "value".to_string(),
            ttl_ms: Some(-100),
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
