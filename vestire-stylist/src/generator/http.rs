//! HTTP generator for Gemini- and Claude-style text endpoints

use super::parser::parse_generated_outfits;
use super::prompt::{claude_user_message, gemini_prompt, STYLIST_SYSTEM_PROMPT};
use super::{GeneratedOutfit, GenerationContext, GenerationError, OutfitGenerator};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use vestire_common::config::{GeneratorConfig, GeneratorProvider};

const USER_AGENT: &str = concat!("vestire-stylist/", env!("CARGO_PKG_VERSION"));
const CLAUDE_MODEL: &str = "claude-3-haiku-20240307";
const CLAUDE_API_VERSION: &str = "2023-06-01";
const CLAUDE_MAX_TOKENS: u32 = 4000;
const GEMINI_TEMPERATURE: f32 = 0.7;
const GEMINI_MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

impl GeminiResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default()
    }
}

impl ClaudeResponse {
    fn into_text(self) -> String {
        self.content
            .into_iter()
            .next()
            .map(|p| p.text)
            .unwrap_or_default()
    }
}

/// Generator backed by a hosted text model
pub struct HttpGenerator {
    http_client: reqwest::Client,
    provider: GeneratorProvider,
    api_key: String,
    api_url: String,
    timeout_ms: u64,
}

impl std::fmt::Debug for HttpGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGenerator")
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl HttpGenerator {
    /// Build a generator from configuration
    ///
    /// Fails when the provider is disabled or no API key is configured.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        if config.provider == GeneratorProvider::Disabled {
            return Err(GenerationError::Disabled);
        }

        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GenerationError::MissingApiKey(config.provider.to_string()))?
            .to_string();

        let api_url = config
            .effective_api_url()
            .ok_or(GenerationError::Disabled)?;

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            provider: config.provider,
            api_key,
            api_url,
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn provider(&self) -> GeneratorProvider {
        self.provider
    }

    fn map_send_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout_ms)
        } else {
            GenerationError::NetworkError(e.to_string())
        }
    }

    async fn request_gemini(&self, context: &GenerationContext) -> Result<String, GenerationError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": gemini_prompt(context) }] }],
            "generationConfig": {
                "temperature": GEMINI_TEMPERATURE,
                "maxOutputTokens": GEMINI_MAX_OUTPUT_TOKENS,
            },
        });

        let response = self
            .http_client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiError(status.as_u16(), error_text));
        }

        let reply: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::ParseError(e.to_string()))?;
        Ok(reply.into_text())
    }

    async fn request_claude(&self, context: &GenerationContext) -> Result<String, GenerationError> {
        let body = json!({
            "model": CLAUDE_MODEL,
            "max_tokens": CLAUDE_MAX_TOKENS,
            "system": STYLIST_SYSTEM_PROMPT,
            "messages": [{ "role": "user", "content": claude_user_message(context) }],
        });

        let response = self
            .http_client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", CLAUDE_API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiError(status.as_u16(), error_text));
        }

        let reply: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::ParseError(e.to_string()))?;
        Ok(reply.into_text())
    }
}

#[async_trait]
impl OutfitGenerator for HttpGenerator {
    fn name(&self) -> &str {
        self.provider.as_str()
    }

    async fn generate(
        &self,
        context: &GenerationContext,
    ) -> Result<Vec<GeneratedOutfit>, GenerationError> {
        tracing::debug!(
            provider = %self.provider,
            items = context.items.len(),
            "Requesting outfits from generator"
        );

        let text = match self.provider {
            GeneratorProvider::Gemini => self.request_gemini(context).await?,
            GeneratorProvider::Claude => self.request_claude(context).await?,
            GeneratorProvider::Disabled => return Err(GenerationError::Disabled),
        };

        let outfits = parse_generated_outfits(&text)?;
        tracing::info!(
            provider = %self.provider,
            outfits = outfits.len(),
            "Generator reply parsed"
        );
        Ok(outfits)
    }
}
