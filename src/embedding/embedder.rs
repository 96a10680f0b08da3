// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch embedding with caching and per-batch failure recovery.

use anyhow::Result;
use tracing::{debug, warn};

use super::cache::{CacheStats, EmbeddingCache};
use super::provider::{create_provider, EmbeddingProvider};
use super::Embedding;
use crate::config::EmbeddingConfig;

/// Front end over an [`EmbeddingProvider`].
///
/// Failures never surface as errors: a batch the provider rejects, or one
/// that comes back with the wrong number of vectors, yields `None` for each
/// of its texts.
pub struct Embedder {
    provider: Box<dyn EmbeddingProvider>,
    cache: Option<EmbeddingCache>,
}

impl Embedder {
    pub fn new(provider: Box<dyn EmbeddingProvider>, cache_enabled: bool) -> Self {
        Self {
            provider,
            cache: cache_enabled.then(EmbeddingCache::new),
        }
    }

    /// Build the configured provider, with caching as configured.
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        Ok(Self::new(create_provider(config)?, config.cache()))
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    /// Embed a single text.
    pub fn embed(&mut self, text: &str) -> Option<Embedding> {
        self.embed_batch(&[text]).pop().flatten()
    }

    /// Embed every text, preserving input order.
    pub fn embed_batch<S: AsRef<str>>(&mut self, texts: &[S]) -> Vec<Option<Embedding>> {
        let mut results: Vec<Option<Embedding>> = vec![None; texts.len()];
        let model_id = self.provider.model_id().to_string();

        let mut pending: Vec<(usize, String)> = Vec::new();
        for (idx, text) in texts.iter().enumerate() {
            let text = text.as_ref();
            if let Some(cache) = self.cache.as_mut() {
                if let Some(cached) = cache.get(text, &model_id) {
                    results[idx] = Some(cached);
                    continue;
                }
            }
            pending.push((idx, text.to_string()));
        }

        if pending.is_empty() {
            return results;
        }

        let batch_size = self.provider.batch_size().max(1);
        debug!(
            model = %model_id,
            total = texts.len(),
            to_embed = pending.len(),
            batch_size,
            "embedding paragraphs"
        );

        for chunk in pending.chunks(batch_size) {
            let batch: Vec<String> = chunk.iter().map(|(_, text)| text.clone()).collect();
            let vectors = match self.provider.embed_texts(&batch) {
                Ok(vectors) if vectors.len() == batch.len() => vectors,
                Ok(vectors) => {
                    warn!(
                        "Embedding provider returned {} vectors for {} texts; treating batch as failed",
                        vectors.len(),
                        batch.len()
                    );
                    continue;
                }
                Err(err) => {
                    warn!("Embedding batch of {} texts failed: {:#}", batch.len(), err);
                    continue;
                }
            };

            for ((idx, text), vector) in chunk.iter().zip(vectors) {
                let embedding = Embedding::new(text.clone(), vector, model_id.clone());
                if let Some(cache) = self.cache.as_mut() {
                    cache.insert(embedding.clone());
                }
                results[*idx] = Some(embedding);
            }
        }

        results
    }

    /// Similarity of two texts on the [0, 1] scale; 0.0 if either fails to embed.
    pub fn compute_similarity(&mut self, a: &str, b: &str) -> f32 {
        let mut embeddings = self.embed_batch(&[a, b]).into_iter();
        match (embeddings.next().flatten(), embeddings.next().flatten()) {
            (Some(a), Some(b)) => a.similarity(&b),
            _ => 0.0,
        }
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(EmbeddingCache::stats)
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}
