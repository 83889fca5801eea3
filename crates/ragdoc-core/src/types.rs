//! Domain types shared by the chunking, indexing and pipeline crates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub type ChunkId = usize;

/// A contiguous span of the source document's tokens.
///
/// - `id`: ordinal position within the document, 0-based
/// - `text`: exact substring of the document covering the span
/// - `token_start`/`token_end`: half-open token range `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub token_start: usize,
    pub token_end: usize,
}

/// A chunk paired with its embedding vector. Dimensionality is constant
/// across one index and determined by the embedder that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

/// One retrieval hit. `score` is cosine similarity, higher is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: EmbeddedChunk,
    pub score: f32,
}

impl ScoredChunk {
    pub fn id(&self) -> ChunkId {
        self.chunk.chunk.id
    }

    pub fn text(&self) -> &str {
        &self.chunk.chunk.text
    }
}

/// Chunking knobs. `chunk_overlap` must stay strictly below `chunk_size`,
/// otherwise the window would never advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { chunk_size: 1024, chunk_overlap: 20 }
    }
}

impl SplitConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        let cfg = Self { chunk_size, chunk_overlap };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfiguration(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::InvalidConfiguration(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Sampling controls forwarded verbatim to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
}

/// Per-query knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub top_k: usize,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self { top_k: 2, temperature: 0.1, top_p: 1.0 }
    }
}

impl QueryParams {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfiguration(
                "top_k must be at least 1".to_string(),
            ));
        }
        if !self.temperature.is_finite() || !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::InvalidConfiguration(format!(
                "temperature ({}) must be within [0, 1]",
                self.temperature
            )));
        }
        if !self.top_p.is_finite() || !(0.0..=1.0).contains(&self.top_p) {
            return Err(Error::InvalidConfiguration(format!(
                "top_p ({}) must be within [0, 1]",
                self.top_p
            )));
        }
        Ok(())
    }

    pub fn sampling(&self) -> SamplingParams {
        SamplingParams { temperature: self.temperature, top_p: self.top_p }
    }
}
