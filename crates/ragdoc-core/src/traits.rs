use crate::types::SamplingParams;

/// Text-to-vector capability. Implementations are network- or model-bound;
/// the pipeline treats them as opaque, does not retry, and surfaces failures
/// to the caller as `EmbeddingService` errors.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Grounded-generation capability: prompt plus sampling controls in, answer
/// text out. Same opacity contract as [`Embedder`].
pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str, sampling: &SamplingParams) -> anyhow::Result<String>;
}
