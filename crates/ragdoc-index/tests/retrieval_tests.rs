use ragdoc_core::error::Error;
use ragdoc_core::types::{Chunk, EmbeddedChunk};
use ragdoc_index::{CosineRetriever, Retriever, VectorIndex};

fn entry(id: usize, vector: Vec<f32>) -> EmbeddedChunk {
    EmbeddedChunk {
        chunk: Chunk {
            id,
            text: format!("chunk {id}"),
            token_start: id,
            token_end: id + 1,
        },
        vector,
    }
}

fn index_of(vectors: Vec<Vec<f32>>) -> VectorIndex {
    let entries = vectors
        .into_iter()
        .enumerate()
        .map(|(id, v)| entry(id, v))
        .collect();
    VectorIndex::from_entries(entries).expect("valid index")
}

#[test]
fn ranking_is_descending_by_similarity() {
    let index = index_of(vec![
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![0.7, 0.7],
    ]);
    let hits = CosineRetriever
        .retrieve(&index, &[1.0, 0.0], 3)
        .expect("retrieve");

    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].id(), 1, "exact match first");
    assert_eq!(hits[1].id(), 2);
    assert_eq!(hits[2].id(), 0);
    assert!(hits[0].score >= hits[1].score && hits[1].score >= hits[2].score);
}

#[test]
fn top_k_above_len_returns_all() {
    let index = index_of(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    let hits = CosineRetriever
        .retrieve(&index, &[1.0, 1.0], 50)
        .expect("retrieve");
    assert_eq!(hits.len(), 2);
}

#[test]
fn top_k_truncates() {
    let index = index_of(vec![vec![1.0, 0.0], vec![0.9, 0.1], vec![0.0, 1.0]]);
    let hits = CosineRetriever
        .retrieve(&index, &[1.0, 0.0], 1)
        .expect("retrieve");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), 0);
}

#[test]
fn equal_scores_break_ties_by_ascending_id() {
    // Identical vectors at ids 0..3 score identically against any query.
    let index = index_of(vec![
        vec![1.0, 1.0],
        vec![1.0, 1.0],
        vec![1.0, 1.0],
        vec![1.0, 1.0],
    ]);
    let hits = CosineRetriever
        .retrieve(&index, &[0.5, 0.5], 4)
        .expect("retrieve");
    let ids: Vec<usize> = hits.iter().map(|h| h.id()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn zero_norm_query_scores_everything_zero() {
    let index = index_of(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    let hits = CosineRetriever
        .retrieve(&index, &[0.0, 0.0], 2)
        .expect("retrieve");
    assert!(hits.iter().all(|h| h.score == 0.0));
    // Deterministic order falls back to chunk ids.
    assert_eq!(hits[0].id(), 0);
    assert_eq!(hits[1].id(), 1);
}

#[test]
fn query_dimension_must_match_index() {
    let index = index_of(vec![vec![1.0, 0.0]]);
    let err = CosineRetriever
        .retrieve(&index, &[1.0, 0.0, 0.0], 1)
        .expect_err("must reject");
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn top_k_zero_is_rejected() {
    let index = index_of(vec![vec![1.0, 0.0]]);
    let err = CosineRetriever
        .retrieve(&index, &[1.0, 0.0], 0)
        .expect_err("must reject");
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn empty_entry_list_is_index_not_ready() {
    let err = VectorIndex::from_entries(Vec::new()).expect_err("must reject");
    assert!(matches!(err, Error::IndexNotReady));
}

#[test]
fn out_of_order_ids_are_rejected() {
    let entries = vec![entry(1, vec![1.0]), entry(0, vec![1.0])];
    let err = VectorIndex::from_entries(entries).expect_err("must reject");
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn ragged_dimensions_are_rejected() {
    let entries = vec![entry(0, vec![1.0, 0.0]), entry(1, vec![1.0])];
    let err = VectorIndex::from_entries(entries).expect_err("must reject");
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn empty_vectors_are_rejected() {
    let entries = vec![entry(0, Vec::new())];
    let err = VectorIndex::from_entries(entries).expect_err("must reject");
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn build_requires_matching_lengths() {
    let chunks = vec![
        Chunk { id: 0, text: "a".to_string(), token_start: 0, token_end: 1 },
        Chunk { id: 1, text: "b".to_string(), token_start: 1, token_end: 2 },
    ];
    let err = VectorIndex::build(chunks, vec![vec![1.0]]).expect_err("must reject");
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn accessors_reflect_insertion_order() {
    let index = index_of(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    assert_eq!(index.len(), 2);
    assert!(!index.is_empty());
    assert_eq!(index.dim(), 2);
    assert_eq!(index.get(1).expect("present").chunk.id, 1);
    assert!(index.get(2).is_none());
    let ids: Vec<usize> = index.all().iter().map(|e| e.chunk.id).collect();
    assert_eq!(ids, vec![0, 1]);
}
