//! Bounded LRU memo of encoded matrices keyed on `(text, error correction)`.

use crate::error::QrStyleResult;
use crate::matrix::{encode, QrMatrix};
use crate::settings::ErrorCorrection;
use std::collections::HashMap;
use std::sync::Arc;

/// Default byte budget; holds a few hundred version-40 symbols.
pub const DEFAULT_CACHE_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MatrixCacheKey {
    text: String,
    error_correction: ErrorCorrection,
}

#[derive(Debug)]
struct MatrixCacheEntry {
    matrix: Arc<QrMatrix>,
    size_bytes: usize,
    last_used: u64,
}

#[derive(Debug)]
pub struct MatrixCache {
    max_bytes: usize,
    total_bytes: usize,
    clock: u64,
    entries: HashMap<MatrixCacheKey, MatrixCacheEntry>,
}

impl Default for MatrixCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_BYTES)
    }
}

impl MatrixCache {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            total_bytes: 0,
            clock: 0,
            entries: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_bytes = 0;
        self.clock = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    fn next_tick(&mut self) -> u64 {
        self.clock = self.clock.wrapping_add(1);
        self.clock
    }

    /// Return the cached matrix for `text` or encode and remember it.
    ///
    /// Encoding errors are returned and never cached.
    pub fn get_or_encode(
        &mut self,
        text: &str,
        error_correction: ErrorCorrection,
    ) -> QrStyleResult<Arc<QrMatrix>> {
        let key = MatrixCacheKey {
            text: text.to_string(),
            error_correction,
        };
        let tick = self.next_tick();
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = tick;
            log::debug!("matrix cache hit for level {}", error_correction);
            return Ok(Arc::clone(&entry.matrix));
        }

        let matrix = Arc::new(encode(text, error_correction)?);
        let size_bytes = matrix.size_bytes() + key.text.len();

        // Avoid pinning a single oversize matrix in cache.
        if size_bytes > self.max_bytes {
            return Ok(matrix);
        }

        self.total_bytes += size_bytes;
        self.entries.insert(
            key,
            MatrixCacheEntry {
                matrix: Arc::clone(&matrix),
                size_bytes,
                last_used: tick,
            },
        );

        self.evict_to_budget();

        Ok(matrix)
    }

    fn evict_to_budget(&mut self) {
        while self.total_bytes > self.max_bytes {
            let lru_key = self
                .entries
                .iter()
                .min_by_key(|(_key, entry)| entry.last_used)
                .map(|(key, _entry)| key.clone());

            let Some(key) = lru_key else {
                break;
            };

            if let Some(entry) = self.entries.remove(&key) {
                self.total_bytes = self.total_bytes.saturating_sub(entry.size_bytes);
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_returns_shared_matrix() {
        let mut cache = MatrixCache::default();
        let a = cache.get_or_encode("abc", ErrorCorrection::M).unwrap();
        let b = cache.get_or_encode("abc", ErrorCorrection::M).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        // Different level is a different key
        let c = cache.get_or_encode("abc", ErrorCorrection::H).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = MatrixCache::default();
        assert!(cache.get_or_encode("", ErrorCorrection::H).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.total_bytes(), 0);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let one = encode("one", ErrorCorrection::L).unwrap().size_bytes() + 3;
        // Room for exactly two version-1 entries with 3-byte keys
        let mut cache = MatrixCache::new(one * 2);

        let first = cache.get_or_encode("one", ErrorCorrection::L).unwrap();
        cache.get_or_encode("two", ErrorCorrection::L).unwrap();
        // Touch "one" so "two" becomes the LRU entry
        cache.get_or_encode("one", ErrorCorrection::L).unwrap();
        cache.get_or_encode("six", ErrorCorrection::L).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.total_bytes() <= one * 2);
        let again = cache.get_or_encode("one", ErrorCorrection::L).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }

    #[test]
    fn test_oversize_entry_is_not_cached() {
        let mut cache = MatrixCache::new(16);
        let matrix = cache.get_or_encode("hello", ErrorCorrection::L).unwrap();
        assert_eq!(matrix.size(), 21);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cache = MatrixCache::default();
        cache.get_or_encode("abc", ErrorCorrection::L).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.total_bytes(), 0);
    }
}
