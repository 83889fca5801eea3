//! Deterministic token chunker.
//!
//! A token is a whitespace-delimited span of the source text, tracked by its
//! byte range so a chunk's text is the exact substring from its first to its
//! last token. Interior whitespace and punctuation survive verbatim. Word
//! tokens were chosen over model-specific sub-word tokens so chunk boundaries
//! do not depend on any embedding model.

use ragdoc_core::error::Result;
use ragdoc_core::types::{Chunk, SplitConfig};

/// Byte range of one token, half-open.
#[derive(Debug, Clone, Copy)]
struct TokenSpan {
    start: usize,
    end: usize,
}

fn tokenize(text: &str) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push(TokenSpan { start: s, end: i });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push(TokenSpan { start: s, end: text.len() });
    }
    spans
}

/// Split `document` into overlapping chunks of `cfg.chunk_size` tokens.
///
/// Windows start at token 0 and advance by `chunk_size - chunk_overlap`
/// tokens; the final chunk may be shorter than `chunk_size`. Once a window
/// reaches the last token the sequence ends, so no chunk is a strict suffix
/// of its predecessor. A document with no tokens yields an empty sequence.
/// Identical inputs always yield identical boundaries.
pub fn split(document: &str, cfg: &SplitConfig) -> Result<Vec<Chunk>> {
    cfg.validate()?;

    let tokens = tokenize(document);
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let step = cfg.chunk_size - cfg.chunk_overlap;
    let mut chunks = Vec::new();
    let mut offset = 0usize;
    while offset < tokens.len() {
        let end = (offset + cfg.chunk_size).min(tokens.len());
        let text = document[tokens[offset].start..tokens[end - 1].end].to_string();
        chunks.push(Chunk {
            id: chunks.len(),
            text,
            token_start: offset,
            token_end: end,
        });
        if end == tokens.len() {
            break;
        }
        offset += step;
    }
    tracing::debug!(tokens = tokens.len(), chunks = chunks.len(), "split document");
    Ok(chunks)
}
