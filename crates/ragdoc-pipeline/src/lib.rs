//! Single-document retrieval-augmented generation pipeline.
//!
//! Two request/response operations mirror the external interface: [`build_index`]
//! turns one document into an ordered embedded-chunk list, and [`query`]
//! answers a question against a caller-supplied list. [`RagSession`] wraps
//! both in a per-session state machine that keeps the index across calls.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod prompt;
mod session;

pub use session::{Phase, RagSession};

use ragdoc_core::error::{Error, Result};
use ragdoc_core::traits::{Embedder, Generator};
use ragdoc_core::types::{EmbeddedChunk, QueryParams, SplitConfig};
use ragdoc_index::{Retriever, VectorIndex};

/// Build phase: chunk the document and embed every chunk.
///
/// The returned list is ordered by chunk id. An embedder failure aborts the
/// whole build; there is no partial output.
pub fn build_index(
    embedder: &dyn Embedder,
    document: &str,
    cfg: &SplitConfig,
) -> Result<Vec<EmbeddedChunk>> {
    cfg.validate()?;
    let chunks = ragdoc_chunk::split(document, cfg)?;
    if chunks.is_empty() {
        return Err(Error::InvalidConfiguration(
            "document contains no tokens".to_string(),
        ));
    }

    tracing::info!(chunks = chunks.len(), "embedding document chunks");
    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let vectors = embedder
        .embed_batch(&texts)
        .map_err(|e| Error::EmbeddingService(e.to_string()))?;
    if vectors.len() != chunks.len() {
        return Err(Error::EmbeddingService(format!(
            "embedder returned {} vectors for {} chunks",
            vectors.len(),
            chunks.len()
        )));
    }

    Ok(chunks
        .into_iter()
        .zip(vectors)
        .map(|(chunk, vector)| EmbeddedChunk { chunk, vector })
        .collect())
}

/// Query phase: validate the caller-supplied embedded-chunk list, embed the
/// query, rank the chunks, and generate an answer grounded in the top hits.
///
/// An empty `nodes` list is `IndexNotReady`; a malformed one (out-of-order
/// ids, ragged dimensions) is `InvalidConfiguration`.
pub fn query(
    embedder: &dyn Embedder,
    generator: &dyn Generator,
    retriever: &dyn Retriever,
    query_text: &str,
    nodes: Vec<EmbeddedChunk>,
    params: &QueryParams,
) -> Result<String> {
    let index = VectorIndex::from_entries(nodes)?;
    query_against(embedder, generator, retriever, query_text, &index, params)
}

/// Same as [`query`] but against an already validated index.
pub fn query_against(
    embedder: &dyn Embedder,
    generator: &dyn Generator,
    retriever: &dyn Retriever,
    query_text: &str,
    index: &VectorIndex,
    params: &QueryParams,
) -> Result<String> {
    params.validate()?;

    let mut vectors = embedder
        .embed_batch(&[query_text.to_string()])
        .map_err(|e| Error::EmbeddingService(e.to_string()))?;
    if vectors.len() != 1 {
        return Err(Error::EmbeddingService(format!(
            "embedder returned {} vectors for one query",
            vectors.len()
        )));
    }
    let query_vec = vectors.remove(0);

    let hits = retriever.retrieve(index, &query_vec, params.top_k)?;
    let prompt = prompt::assemble(&hits, query_text);
    tracing::debug!(hits = hits.len(), "running grounded generation");
    generator
        .generate(&prompt, &params.sampling())
        .map_err(|e| Error::GenerationService(e.to_string()))
}
