//! Embedding and generation capabilities consumed by the pipeline.
//!
//! The real implementations speak the OpenAI-compatible HTTP API; the stubs
//! are deterministic and run offline. Factories pick one from the
//! environment so tests and air-gapped runs never touch the network.

pub mod openai;
pub mod stub;

use ragdoc_core::config::Config;
use ragdoc_core::traits::{Embedder, Generator};

use crate::openai::{LlmConfig, OpenAiEmbedder, OpenAiGenerator};
use crate::stub::{CannedGenerator, HashEmbedder};

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Embedder selected by `APP_USE_FAKE_EMBEDDINGS`, defaulting to the HTTP
/// client configured under `llm.*`.
pub fn embedder_from_env(config: &Config) -> anyhow::Result<Box<dyn Embedder>> {
    if env_flag("APP_USE_FAKE_EMBEDDINGS") {
        tracing::info!("using deterministic hash embedder");
        return Ok(Box::new(HashEmbedder::default()));
    }
    Ok(Box::new(OpenAiEmbedder::new(LlmConfig::from_config(config))?))
}

/// Generator selected by `APP_USE_FAKE_LLM`, defaulting to the HTTP client.
pub fn generator_from_env(config: &Config) -> anyhow::Result<Box<dyn Generator>> {
    if env_flag("APP_USE_FAKE_LLM") {
        tracing::info!("using canned generator");
        return Ok(Box::new(CannedGenerator::echo()));
    }
    Ok(Box::new(OpenAiGenerator::new(LlmConfig::from_config(config))?))
}
