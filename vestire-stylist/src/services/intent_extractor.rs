//! Intent extraction
//!
//! Turns free request text into a [`StyleIntent`] by keyword membership
//! against the taxonomy tables. Pure and deterministic: the same text and
//! mood always yield the same intent.

use vestire_common::taxonomy::{
    self, ALTERNATE_REQUEST_KEYWORDS, CLOTHING_TYPE_KEYWORDS, COLOR_KEYWORDS, MOOD_CATEGORIES,
    OCCASION_KEYWORDS, REQUEST_OCCASIONS, SEASON_KEYWORDS, STYLE_CATEGORIES, WEATHER_KEYWORDS,
};
use vestire_common::{Mood, Season, StyleIntent};

/// Extract a style intent from request text
///
/// An explicit mood always wins; otherwise the first mood in table order
/// with a keyword hit is used. Styles, occasions, clothing types and colors
/// accumulate every hit. Season and weather take the first hit.
pub fn extract_intent(text: &str, explicit_mood: Option<Mood>) -> StyleIntent {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();

    let mut intent = StyleIntent {
        detected_mood: explicit_mood,
        query: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        ..Default::default()
    };

    if lower.is_empty() {
        return intent;
    }

    if intent.detected_mood.is_none() {
        intent.detected_mood = taxonomy::first_match(&lower, MOOD_CATEGORIES);
    }

    intent.detected_styles = taxonomy::all_matches(&lower, STYLE_CATEGORIES).collect();
    intent.detected_occasions = taxonomy::all_matches(&lower, OCCASION_KEYWORDS)
        .map(str::to_string)
        .collect();
    intent.detected_clothing_types =
        taxonomy::all_matches(&lower, CLOTHING_TYPE_KEYWORDS).collect();
    intent.detected_colors = COLOR_KEYWORDS
        .iter()
        .filter(|color| lower.contains(*color))
        .map(|color| color.to_string())
        .collect();
    intent.detected_season = taxonomy::first_match(&lower, SEASON_KEYWORDS);
    intent.detected_weather = taxonomy::first_match(&lower, WEATHER_KEYWORDS);
    intent.is_requesting_alternate = taxonomy::contains_any(&lower, ALTERNATE_REQUEST_KEYWORDS);

    tracing::debug!(
        mood = ?intent.detected_mood,
        styles = intent.detected_styles.len(),
        occasions = intent.detected_occasions.len(),
        alternate = intent.is_requesting_alternate,
        "Extracted style intent"
    );

    intent
}

/// Fold explicit request fields into an intent
///
/// A named occasion joins the detected occasions and is used as the
/// generator occasion. A specific season replaces any season read from the
/// text; `all` leaves the intent alone.
pub fn apply_request_hints(
    intent: &mut StyleIntent,
    occasion: Option<&str>,
    season: Option<Season>,
) {
    if let Some(occasion) = occasion.map(str::trim).filter(|o| !o.is_empty()) {
        let occasion = occasion.to_lowercase();
        intent.detected_occasions.insert(occasion.clone());
        intent.requested_occasion = Some(occasion);
    }
    if let Some(season) = season.filter(|s| *s != Season::All) {
        intent.detected_season = Some(season);
    }
}

/// Single occasion label for generator context, first hit in table order
pub fn detect_request_occasion(text: &str) -> Option<&'static str> {
    taxonomy::first_match(&text.to_lowercase(), REQUEST_OCCASIONS)
}

/// Lower-cased whitespace-separated words of the request
pub fn query_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestire_common::{ClothingType, Season, StyleTag, Weather};

    #[test]
    fn test_empty_text_yields_empty_intent() {
        let intent = extract_intent("   ", None);
        assert_eq!(intent, StyleIntent::default());

        // Explicit mood is still recorded
        let intent = extract_intent("", Some(Mood::Business));
        assert_eq!(intent.detected_mood, Some(Mood::Business));
        assert!(intent.detected_styles.is_empty());
        assert!(intent.query.is_none());
    }

    #[test]
    fn test_request_hints() {
        let mut intent = extract_intent("cozy winter look", None);
        apply_request_hints(&mut intent, Some(" Wedding "), Some(Season::Summer));

        assert!(intent.detected_occasions.contains("wedding"));
        assert_eq!(intent.requested_occasion.as_deref(), Some("wedding"));
        assert_eq!(intent.detected_season, Some(Season::Summer));

        let mut intent = extract_intent("cozy winter look", None);
        apply_request_hints(&mut intent, Some("  "), Some(Season::All));
        assert_eq!(intent.requested_occasion, None);
        assert_eq!(intent.detected_season, Some(Season::Winter));
    }

    #[test]
    fn test_first_mood_wins() {
        // "professional" is listed under formal before business
        let intent = extract_intent("something professional for the office", None);
        assert_eq!(intent.detected_mood, Some(Mood::Formal));
    }

    #[test]
    fn test_explicit_mood_overrides_detection() {
        let intent = extract_intent("a relaxed weekend look", Some(Mood::Athletic));
        assert_eq!(intent.detected_mood, Some(Mood::Athletic));
    }

    #[test]
    fn test_accumulating_fields() {
        let intent = extract_intent("Sexy red dress and black heels for a date night party", None);

        assert_eq!(intent.detected_mood, Some(Mood::Provocative));
        assert!(intent.detected_styles.contains(&StyleTag::Sexy));
        assert!(intent.detected_styles.contains(&StyleTag::NightOut));
        assert!(intent.detected_styles.contains(&StyleTag::Date));
        assert!(intent.detected_occasions.contains("date night"));
        assert!(intent.detected_occasions.contains("party"));
        assert!(intent.detected_clothing_types.contains(&ClothingType::Dresses));
        assert!(intent.detected_clothing_types.contains(&ClothingType::Shoes));
        assert!(intent.detected_colors.contains("red"));
        assert!(intent.detected_colors.contains("black"));
        assert_eq!(
            intent.query.as_deref(),
            Some("Sexy red dress and black heels for a date night party")
        );
    }

    #[test]
    fn test_season_and_weather_take_first_hit() {
        // "cold" is both a winter and a cold-weather keyword; rainy is listed before cold
        let intent = extract_intent("cold rainy day", None);
        assert_eq!(intent.detected_season, Some(Season::Winter));
        assert_eq!(intent.detected_weather, Some(Weather::Rainy));
    }

    #[test]
    fn test_contradictory_tags_coexist() {
        let intent = extract_intent("casual outfit for a party", None);
        assert_eq!(intent.detected_mood, Some(Mood::Casual));
        assert!(intent.detected_occasions.contains("party"));
    }

    #[test]
    fn test_alternate_request() {
        assert!(extract_intent("show me another one", None).is_requesting_alternate);
        assert!(extract_intent("something DIFFERENT", None).is_requesting_alternate);
        assert!(!extract_intent("a blue shirt", None).is_requesting_alternate);
    }

    #[test]
    fn test_deterministic() {
        let text = "vintage boho look for a summer picnic in the park";
        assert_eq!(extract_intent(text, None), extract_intent(text, None));
    }

    #[test]
    fn test_detect_request_occasion() {
        assert_eq!(detect_request_occasion("Job INTERVIEW tomorrow"), Some("work"));
        assert_eq!(detect_request_occasion("dinner with friends"), Some("date"));
        assert_eq!(detect_request_occasion("nothing to see"), None);
    }

    #[test]
    fn test_query_words() {
        assert_eq!(
            query_words("  Elegant   Navy gown "),
            vec!["elegant".to_string(), "navy".to_string(), "gown".to_string()]
        );
    }
}
