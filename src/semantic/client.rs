// src/semantic/client.rs - HTTP implementation of the semantic matcher

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use super::{build_classification_prompt, parse_group_response, SemanticMatcher};

/// Configuration for the external text-similarity service, loaded from
/// environment variables. Leaving `SEMANTIC_MATCHER_URL` unset disables the
/// residual pass entirely; the deterministic pipeline never depends on it.
#[derive(Debug, Clone)]
pub struct SemanticClientConfig {
    pub base_url: Option<String>,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl SemanticClientConfig {
    pub fn from_env() -> Self {
        let config = Self {
            base_url: env::var("SEMANTIC_MATCHER_URL").ok().filter(|s| !s.is_empty()),
            model: env::var("SEMANTIC_MATCHER_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            api_key: env::var("SEMANTIC_MATCHER_API_KEY").ok().filter(|s| !s.is_empty()),
            timeout_secs: env::var("SEMANTIC_MATCHER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
        };
        debug!(
            "Semantic matcher config: enabled={}, model={}, timeout={}s",
            config.is_enabled(),
            config.model,
            config.timeout_secs
        );
        config
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn log_config(&self) {
        if self.is_enabled() {
            info!(
                "🧠 Residual semantic matcher ENABLED (model: {}, timeout: {}s)",
                self.model, self.timeout_secs
            );
        } else {
            info!("🧠 Residual semantic matcher disabled (SEMANTIC_MATCHER_URL unset)");
        }
    }
}

/// Chat-completions client for the residual pass. One request per run.
#[derive(Clone)]
pub struct SemanticClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl SemanticClient {
    /// Build a client from config; `None` when the matcher is disabled.
    pub fn from_config(config: &SemanticClientConfig) -> Result<Option<Self>> {
        let Some(base_url) = &config.base_url else {
            return Ok(None);
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build semantic matcher HTTP client")?;
        Ok(Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            client,
        }))
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: 0.0,
        };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .context("Failed to send request to semantic matcher")?;

        if !response.status().is_success() {
            bail!("Semantic matcher request failed: {}", response.status());
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Failed to parse semantic matcher response body")?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("Semantic matcher response contained no choices")?;

        Ok(content)
    }
}

impl SemanticMatcher for SemanticClient {
    async fn classify(&self, rules: &str, names: &[String]) -> Result<Vec<Vec<String>>> {
        let prompt = build_classification_prompt(rules, names);
        debug!(
            "Sending {} residual names to semantic matcher ({} prompt chars)",
            names.len(),
            prompt.len()
        );
        let content = self.complete(prompt).await?;
        parse_group_response(&content)
    }
}
