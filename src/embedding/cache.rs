// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory embedding cache.
//!
//! Keys combine the model id with a blake3 hash of the text, so the same
//! paragraph embedded by two models never collides.

use serde::Serialize;
use std::collections::HashMap;

use super::Embedding;

/// Hit/miss counters of an [`EmbeddingCache`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate_percent: f64,
}

/// Cache of embeddings keyed by model and text
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: HashMap<String, Embedding>,
    hits: u64,
    misses: u64,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(text: &str, model_id: &str) -> String {
        let hash = blake3::hash(text.as_bytes());
        format!("{}:{}", model_id, &hash.to_hex()[..16])
    }

    /// Look up a cached embedding, counting the hit or miss.
    pub fn get(&mut self, text: &str, model_id: &str) -> Option<Embedding> {
        match self.entries.get(&Self::make_key(text, model_id)) {
            Some(embedding) => {
                self.hits += 1;
                Some(embedding.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store an embedding under its own text and model.
    pub fn insert(&mut self, embedding: Embedding) {
        let key = Self::make_key(&embedding.text, &embedding.model_id);
        self.entries.insert(key, embedding);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        let hit_rate = if total > 0 {
            self.hits as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        CacheStats {
            size: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate_percent: (hit_rate * 100.0).round() / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_put_get() {
        let mut cache = EmbeddingCache::new();
        assert!(cache.get("hello", "m1").is_none());

        cache.insert(Embedding::new("hello", vec![1.0, 2.0], "m1"));
        let cached = cache.get("hello", "m1").unwrap();
        assert_eq!(cached.vector, vec![1.0, 2.0]);

        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate_percent, 50.0);
    }

    #[test]
    fn test_cache_is_model_scoped() {
        let mut cache = EmbeddingCache::new();
        cache.insert(Embedding::new("hello", vec![1.0], "m1"));
        assert!(cache.get("hello", "m2").is_none());
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = EmbeddingCache::new();
        cache.insert(Embedding::new("a", vec![1.0], "m"));
        cache.get("a", "m");
        cache.clear();

        assert!(cache.is_empty());
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (0, 0));
        assert_eq!(stats.hit_rate_percent, 0.0);
    }
}
