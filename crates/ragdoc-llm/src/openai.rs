//! OpenAI-compatible HTTP clients for the embedding and generation
//! capabilities.
//!
//! The capability traits are synchronous, so each client owns a tokio
//! runtime and blocks on its requests. Timeouts are enforced by the reqwest
//! client and surface as ordinary request errors; the pipeline maps them to
//! the corresponding service error without retrying.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use ragdoc_core::config::Config;
use ragdoc_core::traits::{Embedder, Generator};
use ragdoc_core::types::SamplingParams;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_base: String,
    pub api_key: String,
    pub chat_model: String,
    pub embed_model: String,
    pub embed_dim: usize,
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            chat_model: "gpt-4o-mini".to_string(),
            embed_model: "text-embedding-3-small".to_string(),
            embed_dim: 1536,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl LlmConfig {
    /// Read `llm.*` keys, falling back to defaults for anything unset.
    /// The API key may also come from `OPENAI_API_KEY`.
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            api_base: config.get("llm.api_base").unwrap_or(defaults.api_base),
            api_key: config
                .get("llm.api_key")
                .or_else(|_| std::env::var("OPENAI_API_KEY").map_err(anyhow::Error::from))
                .unwrap_or(defaults.api_key),
            chat_model: config.get("llm.chat_model").unwrap_or(defaults.chat_model),
            embed_model: config.get("llm.embed_model").unwrap_or(defaults.embed_model),
            embed_dim: config.get("llm.embed_dim").unwrap_or(defaults.embed_dim),
            request_timeout: config
                .get("llm.request_timeout_secs")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

fn build_client(config: &LlmConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("failed to build HTTP client")
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

pub struct OpenAiEmbedder {
    client: Client,
    runtime: Runtime,
    config: LlmConfig,
}

impl OpenAiEmbedder {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = build_client(&config)?;
        let runtime = Runtime::new().context("failed to start tokio runtime")?;
        Ok(Self { client, runtime, config })
    }

    async fn post_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingsRequest { model: &self.config.embed_model, input: texts };
        let response = self
            .client
            .post(format!("{}/embeddings", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("embeddings request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("embeddings API error {status}: {body}");
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .context("failed to parse embeddings response")?;
        let vectors: Vec<Vec<f32>> = parsed.data.into_iter().map(|d| d.embedding).collect();
        if vectors.len() != texts.len() {
            anyhow::bail!(
                "embeddings API returned {} vectors for {} inputs",
                vectors.len(),
                texts.len()
            );
        }
        for v in &vectors {
            if v.len() != self.config.embed_dim {
                anyhow::bail!(
                    "embedding dimension {} does not match configured llm.embed_dim {}",
                    v.len(),
                    self.config.embed_dim
                );
            }
        }
        Ok(vectors)
    }
}

impl Embedder for OpenAiEmbedder {
    fn dim(&self) -> usize {
        self.config.embed_dim
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        tracing::debug!(batch = texts.len(), model = %self.config.embed_model, "embedding batch");
        self.runtime.block_on(self.post_embeddings(texts))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

pub struct OpenAiGenerator {
    client: Client,
    runtime: Runtime,
    config: LlmConfig,
}

impl OpenAiGenerator {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = build_client(&config)?;
        let runtime = Runtime::new().context("failed to start tokio runtime")?;
        Ok(Self { client, runtime, config })
    }

    async fn post_chat(&self, prompt: &str, sampling: &SamplingParams) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.chat_model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: sampling.temperature,
            top_p: sampling.top_p,
        };
        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("chat completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("chat API error {status}: {body}");
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to parse chat response")?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("chat API returned no choices"))
    }
}

impl Generator for OpenAiGenerator {
    fn generate(&self, prompt: &str, sampling: &SamplingParams) -> Result<String> {
        tracing::debug!(model = %self.config.chat_model, "running chat completion");
        self.runtime.block_on(self.post_chat(prompt, sampling))
    }
}
