//! External outfit generation
//!
//! The recommendation pipeline treats generation as a capability that either
//! returns outfits or fails. [`OutfitGenerator`] is that boundary;
//! [`HttpGenerator`] implements it against Gemini- and Claude-style text
//! endpoints, and tests substitute their own implementations.

pub mod http;
pub mod parser;
pub mod prompt;

pub use http::HttpGenerator;
pub use parser::parse_generated_outfits;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use vestire_common::{ClothingItem, Mood, Season};

/// Generator failures
///
/// Never surfaced to API callers; the orchestrator logs them and falls back
/// to local assembly.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No provider configured
    #[error("Generator disabled")]
    Disabled,

    /// Provider selected but no API key available
    #[error("{0} API key is not configured")]
    MissingApiKey(String),

    /// Network communication error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Provider returned an error response
    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    /// Reply text held no recognizable outfits
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No reply within the configured deadline
    #[error("Generator timed out after {0} ms")]
    Timeout(u64),
}

/// What the generator is asked to dress for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationContext {
    /// Closet subset relevant to the request
    pub items: Vec<ClothingItem>,
    pub mood: Option<Mood>,
    pub occasion: Option<String>,
    pub season: Option<Season>,
    pub query: Option<String>,
    /// Caller preferences quoted into the prompt
    pub preferences: BTreeMap<String, String>,
}

impl GenerationContext {
    /// Mood word used in prompts; casual when none was given
    pub fn mood_word(&self) -> &str {
        self.mood.map(|m| m.as_str()).unwrap_or("casual")
    }

    /// Season worth mentioning in a prompt (not "all")
    pub fn season_word(&self) -> Option<&'static str> {
        self.season
            .filter(|season| *season != Season::All)
            .map(|season| season.as_str())
    }

    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Outfit as proposed by a generator; ids are unverified
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedOutfit {
    pub name: String,
    pub items: Vec<String>,
    pub description: String,
    pub styling_tips: String,
}

/// External outfit generation capability
#[async_trait]
pub trait OutfitGenerator: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    async fn generate(
        &self,
        context: &GenerationContext,
    ) -> Result<Vec<GeneratedOutfit>, GenerationError>;
}
