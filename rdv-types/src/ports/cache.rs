//! Cache facade port.
//!
//! Key/value store with sanitized string keys, JSON-serializable values
//! and a time-to-live. Instances hold their own injected state so tests
//! can swap in doubles; there is no static namespace.

use std::time::Duration;

use crate::error::CacheError;

/// Namespace prefix applied to every cache key.
pub const CACHE_PREFIX: &str = "rdv_";

/// Default time-to-live for cache entries.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Maximum length of the sanitized key body, keeping keys storable in
/// length-bounded backends.
const MAX_KEY_LEN: usize = 128;

/// Sanitizes a raw cache key.
///
/// Lowercases, maps every character outside `[a-z0-9_]` to `_`, trims
/// leading/trailing `_`, truncates, and applies the `rdv_` prefix.
pub fn sanitize_cache_key(raw: &str) -> String {
    let mut body: String = raw
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    body.truncate(MAX_KEY_LEN);
    let body = body.trim_matches('_');
    format!("{}{}", CACHE_PREFIX, body)
}

/// Port trait for the cache facade.
///
/// All operations sanitize their keys; callers pass raw keys.
#[async_trait::async_trait]
pub trait Cache: Send + Sync + 'static {
    /// Gets a cached value. Expired or missing entries read as `None`.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CacheError>;

    /// Caches a value under the given key for `ttl`.
    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Duration,
    ) -> Result<(), CacheError>;

    /// Removes an entry. Returns whether an entry was present.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Removes every entry whose raw key starts with `prefix`.
    /// Returns the number of entries removed.
    async fn flush_prefix(&self, prefix: &str) -> Result<usize, CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_lowercases_and_prefixes() {
        assert_eq!(sanitize_cache_key("Export CSV!"), "rdv_export_csv");
    }

    #[test]
    fn test_sanitize_keeps_valid_chars() {
        assert_eq!(sanitize_cache_key("export_csv_2"), "rdv_export_csv_2");
    }

    #[test]
    fn test_sanitize_trims_underscores() {
        assert_eq!(sanitize_cache_key("__key__"), "rdv_key");
    }

    #[test]
    fn test_sanitize_bounds_length() {
        let raw = "k".repeat(500);
        let key = sanitize_cache_key(&raw);
        assert!(key.len() <= CACHE_PREFIX.len() + 128);
        assert!(key.starts_with(CACHE_PREFIX));
    }

    #[test]
    fn test_sanitized_alphabet() {
        let key = sanitize_cache_key("Rendez-vous: 2025/06!");
        assert!(
            key.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        );
    }
}
