#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

mod index;
mod retriever;

pub use index::VectorIndex;
pub use retriever::{cosine_similarity, CosineRetriever, Retriever};
