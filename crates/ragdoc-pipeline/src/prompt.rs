//! Fixed QA prompt template for grounded generation.

use ragdoc_core::types::ScoredChunk;

/// Concatenate retrieved chunk texts in rank order, then the literal query.
pub fn assemble(hits: &[ScoredChunk], query: &str) -> String {
    let mut context = String::new();
    for hit in hits {
        context.push_str(hit.text());
        context.push_str("\n\n");
    }
    format!(
        "Context information is below.\n\
         ---------------------\n\
         {context}\
         ---------------------\n\
         Given the context information and not prior knowledge, answer the query.\n\
         Query: {query}\n\
         Answer:"
    )
}
