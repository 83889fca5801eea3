use std::cmp::Ordering;

use ragdoc_core::error::{Error, Result};
use ragdoc_core::types::ScoredChunk;

use crate::index::VectorIndex;

/// Ranks indexed chunks against a query vector.
///
/// The exhaustive scan below is O(N·D) and fine at single-document scale;
/// the trait seam exists so an approximate-nearest-neighbor structure can
/// substitute later without touching callers.
pub trait Retriever: Send + Sync {
    fn retrieve(
        &self,
        index: &VectorIndex,
        query_vec: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>>;
}

/// Cosine similarity, defined as 0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Exhaustive cosine-similarity retriever.
#[derive(Debug, Default, Clone, Copy)]
pub struct CosineRetriever;

impl Retriever for CosineRetriever {
    /// Score every entry, sort descending by similarity with ties broken by
    /// ascending chunk id, and return the first `min(top_k, len)` hits.
    fn retrieve(
        &self,
        index: &VectorIndex,
        query_vec: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>> {
        if top_k == 0 {
            return Err(Error::InvalidConfiguration(
                "top_k must be at least 1".to_string(),
            ));
        }
        if query_vec.len() != index.dim() {
            return Err(Error::InvalidConfiguration(format!(
                "query vector dimension {} does not match index dimension {}",
                query_vec.len(),
                index.dim()
            )));
        }

        let mut scored: Vec<ScoredChunk> = index
            .all()
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.clone(),
                score: cosine_similarity(query_vec, &entry.vector),
            })
            .collect();
        scored.sort_by(|a, b| {
            match b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal) {
                Ordering::Equal => a.id().cmp(&b.id()),
                other => other,
            }
        });
        scored.truncate(top_k);
        Ok(scored)
    }
}
