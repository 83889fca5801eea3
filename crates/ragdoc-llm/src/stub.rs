//! Deterministic offline stand-ins for the embedding and generation
//! capabilities, used by tests and air-gapped runs.

use std::hash::{Hash, Hasher};

use twox_hash::XxHash64;

use ragdoc_core::traits::{Embedder, Generator};
use ragdoc_core::types::SamplingParams;

pub const DEFAULT_STUB_DIM: usize = 1024;

/// Bag-of-words hashing embedder: each token hashes into one bucket of the
/// vector, which is then L2-normalized. Texts sharing tokens score higher
/// under cosine similarity, which is all the retrieval tests need. Tokens
/// are lowercased and stripped of edge punctuation so "flew." and "flew?"
/// land in the same bucket.
pub struct HashEmbedder {
    dim: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_STUB_DIM)
    }
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for token in text.split_whitespace() {
            let token: String = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += 1.0 + val;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// Generator that ignores sampling controls and replies deterministically:
/// either a fixed string, or an echo of the full prompt (handy for asserting
/// on prompt assembly).
pub struct CannedGenerator {
    reply: Option<String>,
}

impl CannedGenerator {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self { reply: Some(reply.into()) }
    }

    pub fn echo() -> Self {
        Self { reply: None }
    }
}

impl Generator for CannedGenerator {
    fn generate(&self, prompt: &str, _sampling: &SamplingParams) -> anyhow::Result<String> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Ok(prompt.to_string()),
        }
    }
}
