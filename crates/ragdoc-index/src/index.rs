use ragdoc_core::error::{Error, Result};
use ragdoc_core::types::{Chunk, ChunkId, EmbeddedChunk};

/// In-memory embedding index over one document.
///
/// Built whole and replaced whole; there is no partial-update surface.
/// Entry order equals chunk order, and every chunk id equals its position.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    entries: Vec<EmbeddedChunk>,
    dim: usize,
}

impl VectorIndex {
    /// Pair `chunks` with `embeddings` by position and validate the result.
    pub fn build(chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(Error::InvalidConfiguration(format!(
                "chunk count ({}) does not match embedding count ({})",
                chunks.len(),
                embeddings.len()
            )));
        }
        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, vector)| EmbeddedChunk { chunk, vector })
            .collect();
        Self::from_entries(entries)
    }

    /// Validate and adopt a caller-supplied embedded-chunk list.
    ///
    /// The list is untrusted input: ids must equal positions and all vectors
    /// must share one nonzero dimension. An empty list is `IndexNotReady`,
    /// matching the query-side contract.
    pub fn from_entries(entries: Vec<EmbeddedChunk>) -> Result<Self> {
        let Some(first) = entries.first() else {
            return Err(Error::IndexNotReady);
        };
        let dim = first.vector.len();
        if dim == 0 {
            return Err(Error::InvalidConfiguration(
                "embedding vectors must not be empty".to_string(),
            ));
        }
        for (position, entry) in entries.iter().enumerate() {
            if entry.chunk.id != position {
                return Err(Error::InvalidConfiguration(format!(
                    "chunk id {} at position {} (ids must be the insertion order)",
                    entry.chunk.id, position
                )));
            }
            if entry.vector.len() != dim {
                return Err(Error::InvalidConfiguration(format!(
                    "chunk {} has dimension {} but the index dimension is {}",
                    entry.chunk.id,
                    entry.vector.len(),
                    dim
                )));
            }
        }
        tracing::debug!(entries = entries.len(), dim, "index built");
        Ok(Self { entries, dim })
    }

    pub fn get(&self, id: ChunkId) -> Option<&EmbeddedChunk> {
        self.entries.get(id)
    }

    pub fn all(&self) -> &[EmbeddedChunk] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimension shared by every entry.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Hand the entries back to the caller, e.g. to re-POST with a query.
    pub fn into_entries(self) -> Vec<EmbeddedChunk> {
        self.entries
    }
}
