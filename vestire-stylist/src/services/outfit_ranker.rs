//! Curated outfit ranking
//!
//! Additive keyword scoring of saved outfits against a [`StyleIntent`]:
//!
//! | Signal                                           | Points |
//! |--------------------------------------------------|--------|
//! | outfit mood equals detected mood                 | +5     |
//! | each detected occasion inside `occasion`         | +3     |
//! | each detected style label in name or description | +5     |
//! | each detected color in description               | +2     |
//! | detected season in description                   | +2     |
//! | detected weather in description                  | +2     |
//! | each query word of 4+ chars in description       | +1     |
//!
//! All comparisons are case-insensitive substring checks.

use vestire_common::{Outfit, ScoredOutfit, StyleIntent};

/// Maximum number of ranked outfits returned
pub const MAX_RANKED: usize = 3;

const MOOD_POINTS: i32 = 5;
const OCCASION_POINTS: i32 = 3;
const STYLE_POINTS: i32 = 5;
const COLOR_POINTS: i32 = 2;
const SEASON_POINTS: i32 = 2;
const WEATHER_POINTS: i32 = 2;
const WORD_POINTS: i32 = 1;
const MIN_WORD_LEN: usize = 4;

/// Score a single outfit
pub fn score_outfit(intent: &StyleIntent, outfit: &Outfit, query_words: &[String]) -> i32 {
    let mut score = 0;

    if let (Some(detected), Some(mood)) = (intent.detected_mood, outfit.mood) {
        if detected == mood {
            score += MOOD_POINTS;
        }
    }

    if let Some(occasion) = outfit.occasion.as_deref() {
        let occasion = occasion.to_lowercase();
        let hits = intent
            .detected_occasions
            .iter()
            .filter(|o| occasion.contains(o.to_lowercase().as_str()))
            .count() as i32;
        score += hits * OCCASION_POINTS;
    }

    let name = outfit.name.to_lowercase();
    let description = outfit.description.to_lowercase();

    let style_hits = intent
        .detected_styles
        .iter()
        .filter(|style| name.contains(style.label()) || description.contains(style.label()))
        .count() as i32;
    score += style_hits * STYLE_POINTS;

    if !description.is_empty() {
        let color_hits = intent
            .detected_colors
            .iter()
            .filter(|color| description.contains(color.to_lowercase().as_str()))
            .count() as i32;
        score += color_hits * COLOR_POINTS;

        if intent
            .detected_season
            .is_some_and(|season| description.contains(season.as_str()))
        {
            score += SEASON_POINTS;
        }

        if intent
            .detected_weather
            .is_some_and(|weather| description.contains(weather.as_str()))
        {
            score += WEATHER_POINTS;
        }

        let word_hits = query_words
            .iter()
            .filter(|word| word.chars().count() >= MIN_WORD_LEN)
            .filter(|word| description.contains(word.to_lowercase().as_str()))
            .count() as i32;
        score += word_hits * WORD_POINTS;
    }

    score
}

/// Rank outfits by descending score
///
/// Only positive scores are kept, at most [`MAX_RANKED`], and ties keep
/// their input order.
pub fn rank_outfits(
    intent: &StyleIntent,
    outfits: &[Outfit],
    query_words: &[String],
) -> Vec<ScoredOutfit> {
    let mut scored: Vec<ScoredOutfit> = outfits
        .iter()
        .map(|outfit| ScoredOutfit {
            score: score_outfit(intent, outfit, query_words),
            outfit: outfit.clone(),
        })
        .filter(|scored| scored.score > 0)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RANKED);

    tracing::debug!(
        candidates = outfits.len(),
        ranked = scored.len(),
        top_score = scored.first().map(|s| s.score),
        "Ranked curated outfits"
    );

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::intent_extractor::{extract_intent, query_words};
    use vestire_common::{Mood, OutfitSource, StyleTag};

    fn outfit(name: &str, description: &str) -> Outfit {
        Outfit::candidate(name, description, vec!["1".into()], OutfitSource::Curated)
    }

    #[test]
    fn test_mood_and_occasion() {
        let mut wedding = outfit("Navy Evening Gown", "elegant gown in navy");
        wedding.mood = Some(Mood::Formal);
        wedding.occasion = Some("Wedding".to_string());

        let intent = extract_intent("formal wedding", Some(Mood::Formal));
        let words = query_words("formal wedding");
        assert_eq!(score_outfit(&intent, &wedding, &words), 8);
    }

    #[test]
    fn test_style_label_in_name() {
        let party = outfit("Party Sparkle", "sequins everywhere");
        let mut intent = StyleIntent::default();
        intent.detected_styles.insert(StyleTag::NightOut);
        assert_eq!(score_outfit(&intent, &party, &[]), 5);
    }

    #[test]
    fn test_description_signals() {
        let look = outfit("Look", "a red summer dress for sunny days");
        let intent = extract_intent("red and sunny", None);
        let words = query_words("red and sunny");
        // red +2, summer season +2, sunny weather +2, "sunny" word +1
        assert_eq!(score_outfit(&intent, &look, &words), 7);
    }

    #[test]
    fn test_empty_description_scores_only_name_signals() {
        let plain = outfit("Plain", "");
        let intent = extract_intent("black winter coat", None);
        let words = query_words("black winter coat");
        assert_eq!(score_outfit(&intent, &plain, &words), 0);
    }

    #[test]
    fn test_rank_filters_sorts_and_truncates() {
        let outfits = vec![
            outfit("A", "black"),
            outfit("B", "nothing relevant"),
            outfit("C", "black and white"),
            outfit("D", "white"),
            outfit("E", "black"),
        ];

        let intent = extract_intent("black white", None);
        let ranked = rank_outfits(&intent, &outfits, &[]);

        assert_eq!(ranked.len(), MAX_RANKED);
        assert!(ranked.iter().all(|s| s.score > 0));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));

        let names: Vec<&str> = ranked.iter().map(|s| s.outfit.name.as_str()).collect();
        // C scores 4; A, D and E tie at 2 and keep input order
        assert_eq!(names, vec!["C", "A", "D"]);
    }

    #[test]
    fn test_no_positive_scores() {
        let outfits = vec![outfit("A", "plain"), outfit("B", "simple")];
        let intent = extract_intent("", None);
        assert!(rank_outfits(&intent, &outfits, &[]).is_empty());
    }
}
