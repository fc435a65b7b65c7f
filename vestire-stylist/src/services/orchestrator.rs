//! Recommendation orchestration
//!
//! Routes one request through the available outfit sources in order:
//!
//! 1. Curated outfits that score positively against the intent
//! 2. The external generator, if one is configured, under a timeout
//! 3. Local assembly from the closet
//!
//! Mood rules apply to every source. The generator is only ever observed as
//! success or failure; any failure moves on to assembly.

use crate::generator::{GeneratedOutfit, GenerationContext, GenerationError, OutfitGenerator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use vestire_common::config::RecommendationConfig;
use vestire_common::{ClothingItem, Mood, Outfit, OutfitSource, ScoredOutfit, StyleIntent};

use super::constraint_filter::{filter_appropriate, outfit_is_allowed};
use super::intent_extractor::{detect_request_occasion, query_words};
use super::outfit_assembler::synthesize;
use super::outfit_ranker::rank_outfits;
use super::style_matcher::match_items;

/// Recommendation failures visible to callers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Closet has {count} items; at least {minimum} are needed for recommendations")]
    ClosetTooSmall { count: usize, minimum: usize },

    #[error("No outfit could be generated from the closet")]
    GenerationUnavailable,
}

/// Which source produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Curated,
    Generated,
    Assembled,
}

/// Outcome of one recommendation request
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub source: RecommendationSource,
    pub outfits: Vec<Outfit>,
    /// Ranker scores; only populated for curated results
    pub scored: Vec<ScoredOutfit>,
}

/// Sequences ranking, generation and assembly
#[derive(Clone)]
pub struct Orchestrator {
    config: RecommendationConfig,
    generator: Option<Arc<dyn OutfitGenerator>>,
    generator_timeout: Duration,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("generator", &self.generator.as_ref().map(|g| g.name().to_string()))
            .field("generator_timeout", &self.generator_timeout)
            .finish()
    }
}

impl Orchestrator {
    /// Orchestrator without a generator; assembly is the only fallback
    pub fn new(config: RecommendationConfig) -> Self {
        Self {
            config,
            generator: None,
            generator_timeout: Duration::from_secs(20),
        }
    }

    pub fn with_generator(
        mut self,
        generator: Arc<dyn OutfitGenerator>,
        timeout: Duration,
    ) -> Self {
        self.generator = Some(generator);
        self.generator_timeout = timeout;
        self
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Name of the configured generator, if any
    pub fn generator_name(&self) -> Option<&str> {
        self.generator.as_ref().map(|g| g.name())
    }

    /// Recommend outfits with entropy-seeded randomness
    pub async fn recommend(
        &self,
        intent: &StyleIntent,
        existing_outfits: &[Outfit],
        closet: &[ClothingItem],
        mood: Option<Mood>,
    ) -> Result<Recommendation, RecommendError> {
        let mut rng = StdRng::from_entropy();
        self.recommend_with_rng(intent, existing_outfits, closet, mood, &mut rng)
            .await
    }

    /// Recommend outfits using the given randomness source for assembly
    pub async fn recommend_with_rng<R: Rng + Send + ?Sized>(
        &self,
        intent: &StyleIntent,
        existing_outfits: &[Outfit],
        closet: &[ClothingItem],
        mood: Option<Mood>,
        rng: &mut R,
    ) -> Result<Recommendation, RecommendError> {
        if closet.len() < self.config.min_closet_size {
            return Err(RecommendError::ClosetTooSmall {
                count: closet.len(),
                minimum: self.config.min_closet_size,
            });
        }

        let effective_mood = mood.or(intent.detected_mood);

        let scored = self.rank_curated(intent, existing_outfits, closet, effective_mood);
        if !scored.is_empty() {
            tracing::info!(count = scored.len(), "Recommending curated outfits");
            return Ok(Recommendation {
                source: RecommendationSource::Curated,
                outfits: scored.iter().map(|s| s.outfit.clone()).collect(),
                scored,
            });
        }

        if let Some(generator) = &self.generator {
            match self.generate(generator.as_ref(), intent, closet, effective_mood).await {
                Ok(outfits) if !outfits.is_empty() => {
                    tracing::info!(
                        generator = generator.name(),
                        count = outfits.len(),
                        "Recommending generated outfits"
                    );
                    return Ok(Recommendation {
                        source: RecommendationSource::Generated,
                        outfits,
                        scored: Vec::new(),
                    });
                }
                Ok(_) => {
                    tracing::warn!(
                        generator = generator.name(),
                        "Generator produced no usable outfits, falling back to assembly"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        generator = generator.name(),
                        error = %e,
                        "Generator failed, falling back to assembly"
                    );
                }
            }
        }

        let outfits = synthesize(intent, closet, mood, self.config.max_outfits, rng)
            .map_err(|_| RecommendError::GenerationUnavailable)?;
        if outfits.is_empty() {
            tracing::warn!(closet = closet.len(), "Assembly produced no outfits");
            return Err(RecommendError::GenerationUnavailable);
        }

        tracing::info!(count = outfits.len(), "Recommending assembled outfits");
        Ok(Recommendation {
            source: RecommendationSource::Assembled,
            outfits,
            scored: Vec::new(),
        })
    }

    /// Rank saved outfits restricted to what the closet still holds
    ///
    /// `mood` is the effective mood and replaces the intent's detected mood
    /// for scoring.
    fn rank_curated(
        &self,
        intent: &StyleIntent,
        existing_outfits: &[Outfit],
        closet: &[ClothingItem],
        mood: Option<Mood>,
    ) -> Vec<ScoredOutfit> {
        let candidates: Vec<Outfit> = existing_outfits
            .iter()
            .filter_map(|outfit| {
                let resolved = outfit.resolve_items(closet);
                if resolved.is_empty() || !outfit_is_allowed(&resolved, mood) {
                    return None;
                }
                let mut outfit = outfit.clone();
                outfit.items = resolved.iter().map(|item| item.id.clone()).collect();
                Some(outfit)
            })
            .collect();

        if candidates.len() < existing_outfits.len() {
            tracing::debug!(
                dropped = existing_outfits.len() - candidates.len(),
                "Curated outfits unresolvable or inappropriate"
            );
        }

        let intent = StyleIntent {
            detected_mood: mood,
            ..intent.clone()
        };
        let words = intent.query_text().map(query_words).unwrap_or_default();
        rank_outfits(&intent, &candidates, &words)
    }

    async fn generate(
        &self,
        generator: &dyn OutfitGenerator,
        intent: &StyleIntent,
        closet: &[ClothingItem],
        mood: Option<Mood>,
    ) -> Result<Vec<Outfit>, GenerationError> {
        let allowed: Vec<ClothingItem> =
            filter_appropriate(closet, mood).into_iter().cloned().collect();
        let query = intent.query_text();

        let context = GenerationContext {
            items: match query {
                Some(q) => match_items(q, &allowed),
                None => allowed,
            },
            mood,
            occasion: intent.requested_occasion.clone().or_else(|| {
                query
                    .and_then(detect_request_occasion)
                    .map(str::to_string)
            }),
            season: intent.detected_season,
            query: query.map(str::to_string),
            preferences: intent.preferences.clone(),
        };

        let generated =
            match tokio::time::timeout(self.generator_timeout, generator.generate(&context)).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(GenerationError::Timeout(
                        self.generator_timeout.as_millis() as u64,
                    ))
                }
            };

        Ok(self.accept_generated(generated, closet, mood, context.occasion.as_deref()))
    }

    /// Turn generator proposals into outfits, rejecting any with no real
    /// items or with an item the mood forbids
    fn accept_generated(
        &self,
        generated: Vec<GeneratedOutfit>,
        closet: &[ClothingItem],
        mood: Option<Mood>,
        occasion: Option<&str>,
    ) -> Vec<Outfit> {
        let proposed = generated.len();
        let accepted: Vec<Outfit> = generated
            .into_iter()
            .enumerate()
            .filter_map(|(index, g)| {
                let mut outfit = Outfit::candidate(
                    if g.name.trim().is_empty() {
                        format!("Outfit {}", index + 1)
                    } else {
                        g.name.trim().to_string()
                    },
                    g.description,
                    g.items,
                    OutfitSource::Generated,
                );
                let resolved = outfit.resolve_items(closet);
                if resolved.is_empty() || !outfit_is_allowed(&resolved, mood) {
                    return None;
                }
                outfit.items = resolved.iter().map(|item| item.id.clone()).collect();
                outfit.mood = mood;
                outfit.occasion = occasion.map(str::to_string);
                outfit.styling_tips = Some(g.styling_tips).filter(|t| !t.trim().is_empty());
                Some(outfit)
            })
            .take(self.config.max_outfits)
            .collect();

        if accepted.len() < proposed {
            tracing::debug!(proposed, accepted = accepted.len(), "Filtered generated outfits");
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::intent_extractor::extract_intent;

    fn closet() -> Vec<ClothingItem> {
        vec![
            ClothingItem::new("1", "blouse"),
            ClothingItem::new("2", "slacks"),
            ClothingItem::new("3", "loafer shoes"),
            ClothingItem::new("4", "lace bra"),
        ]
    }

    #[tokio::test]
    async fn test_closet_too_small() {
        let orchestrator = Orchestrator::new(RecommendationConfig::default());
        let result = orchestrator
            .recommend(&StyleIntent::default(), &[], &closet()[..2], None)
            .await;
        assert_eq!(
            result.unwrap_err(),
            RecommendError::ClosetTooSmall { count: 2, minimum: 3 }
        );
    }

    #[test]
    fn test_curated_unknown_ids_dropped() {
        let orchestrator = Orchestrator::new(RecommendationConfig::default());
        let mut saved = Outfit::candidate(
            "Office",
            "a business look",
            vec!["1".into(), "gone".into(), "2".into()],
            OutfitSource::Curated,
        );
        saved.mood = Some(Mood::Business);

        let intent = extract_intent("business", None);
        let scored = orchestrator.rank_curated(&intent, &[saved], &closet(), Some(Mood::Business));
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].outfit.items, vec!["1", "2"]);
    }

    #[test]
    fn test_curated_with_forbidden_item_rejected() {
        let orchestrator = Orchestrator::new(RecommendationConfig::default());
        let mut saved = Outfit::candidate(
            "Office",
            "business",
            vec!["1".into(), "4".into()],
            OutfitSource::Curated,
        );
        saved.mood = Some(Mood::Business);

        let intent = extract_intent("business", None);
        assert!(orchestrator
            .rank_curated(&intent, &[saved], &closet(), Some(Mood::Business))
            .is_empty());
    }

    #[tokio::test]
    async fn test_curated_scored_with_explicit_mood() {
        let orchestrator = Orchestrator::new(RecommendationConfig::default());
        let closet = vec![
            ClothingItem::new("g", "silk gown"),
            ClothingItem::new("h", "heels"),
            ClothingItem::new("b", "blouse"),
        ];
        let mut saved = Outfit::candidate(
            "Gala",
            "",
            vec!["g".into(), "h".into()],
            OutfitSource::Curated,
        );
        saved.mood = Some(Mood::Formal);

        let intent = extract_intent("something comfortable", None);
        assert_ne!(intent.detected_mood, Some(Mood::Formal));

        let result = orchestrator
            .recommend(&intent, &[saved], &closet, Some(Mood::Formal))
            .await
            .unwrap();
        assert_eq!(result.source, RecommendationSource::Curated);
        assert_eq!(result.scored[0].score, 5);
    }

    #[test]
    fn test_accept_generated() {
        let orchestrator = Orchestrator::new(RecommendationConfig::default());
        let generated = vec![
            GeneratedOutfit {
                name: " ".into(),
                items: vec!["1".into(), "2".into(), "99".into()],
                description: "sharp".into(),
                styling_tips: String::new(),
            },
            GeneratedOutfit {
                name: "Ghost".into(),
                items: vec!["98".into()],
                ..Default::default()
            },
            GeneratedOutfit {
                name: "Risky".into(),
                items: vec!["1".into(), "4".into()],
                ..Default::default()
            },
        ];

        let accepted =
            orchestrator.accept_generated(generated, &closet(), Some(Mood::Business), Some("work"));
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "Outfit 1");
        assert_eq!(accepted[0].items, vec!["1", "2"]);
        assert_eq!(accepted[0].source, OutfitSource::Generated);
        assert_eq!(accepted[0].occasion.as_deref(), Some("work"));
        assert_eq!(accepted[0].styling_tips, None);
    }
}
