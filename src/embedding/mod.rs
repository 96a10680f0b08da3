// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding module - turns paragraphs into vectors for comparison
//!
//! Providers produce raw vectors; the [`Embedder`] wraps a provider with a
//! cache and recovers per-batch failures as missing embeddings.

pub mod cache;
pub mod embedder;
pub mod provider;

pub use cache::{CacheStats, EmbeddingCache};
pub use embedder::Embedder;
pub use provider::{
    create_provider, CommandProvider, EmbeddingProvider, EmbeddingProviderConfig, FastEmbedder,
    HashingProvider, DEFAULT_HASHING_DIM,
};

use serde::{Deserialize, Serialize};

/// A paragraph and its vector, tagged with the model that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub text: String,
    pub vector: Vec<f32>,
    pub model_id: String,
}

impl Embedding {
    pub fn new(text: impl Into<String>, vector: Vec<f32>, model_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            vector,
            model_id: model_id.into(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Similarity with another embedding on the [0, 1] scale.
    pub fn similarity(&self, other: &Embedding) -> f32 {
        crate::diff::similarity::vector_similarity(&self.vector, &other.vector)
    }
}
