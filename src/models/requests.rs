//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl_ms`: Optional TTL in milliseconds (uses the server default if
///   not specified)
///
/// `ttl_ms` is deserialized as a signed integer on purpose: a negative
/// TTL is a caller bug and must be rejected fast instead of silently
/// wrapping into a huge unsigned duration. Zero is valid and produces an
/// entry that is already eligible for expiry.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<i64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > 256 {
            return Some("Key exceeds maximum length of 256 characters".to_string());
        }
        if let Some(ttl_ms) = self.ttl_ms {
            if ttl_ms < 0 {
                return Some("TTL cannot be negative".to_string());
            }
        }
        None
    }
}
