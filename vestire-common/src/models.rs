//! Wardrobe data model
//!
//! Types exchanged between the storage collaborator, the recommendation
//! pipeline and API callers. JSON field names are camelCase; enum values are
//! lower-case strings.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Enumerated tags
// ============================================================================

/// Fixed style mood, user-selected or inferred from request text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Casual,
    Formal,
    Business,
    Athletic,
    Adventurous,
    Relaxed,
    Provocative,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Casual,
        Mood::Formal,
        Mood::Business,
        Mood::Athletic,
        Mood::Adventurous,
        Mood::Relaxed,
        Mood::Provocative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Casual => "casual",
            Mood::Formal => "formal",
            Mood::Business => "business",
            Mood::Athletic => "athletic",
            Mood::Adventurous => "adventurous",
            Mood::Relaxed => "relaxed",
            Mood::Provocative => "provocative",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown mood '{}'", s)))
    }
}

/// Season an item is suited for, or a season detected in a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    #[serde(alias = "any")]
    All,
    Spring,
    Summer,
    #[serde(alias = "autumn")]
    Fall,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::All => "all",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }
}

/// Weather condition detected in a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Rainy,
    Sunny,
    Cold,
    Hot,
}

impl Weather {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Rainy => "rainy",
            Weather::Sunny => "sunny",
            Weather::Cold => "cold",
            Weather::Hot => "hot",
        }
    }
}

/// Style tag that is not itself a mood (sexy, trendy, vintage, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    Sexy,
    Professional,
    Trendy,
    Vintage,
    Minimalist,
    Bohemian,
    #[serde(alias = "party")]
    NightOut,
    Date,
}

impl StyleTag {
    /// Label searched for in outfit names and descriptions
    pub fn label(&self) -> &'static str {
        match self {
            StyleTag::Sexy => "sexy",
            StyleTag::Professional => "professional",
            StyleTag::Trendy => "trendy",
            StyleTag::Vintage => "vintage",
            StyleTag::Minimalist => "minimalist",
            StyleTag::Bohemian => "bohemian",
            StyleTag::NightOut => "party",
            StyleTag::Date => "date",
        }
    }
}

/// Clothing type; doubles as the closet bucket key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingType {
    Tops,
    Bottoms,
    Dresses,
    Shoes,
    Outerwear,
    #[serde(alias = "bras")]
    Underwear,
}

impl ClothingType {
    pub const ALL: [ClothingType; 6] = [
        ClothingType::Tops,
        ClothingType::Bottoms,
        ClothingType::Dresses,
        ClothingType::Shoes,
        ClothingType::Outerwear,
        ClothingType::Underwear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingType::Tops => "tops",
            ClothingType::Bottoms => "bottoms",
            ClothingType::Dresses => "dresses",
            ClothingType::Shoes => "shoes",
            ClothingType::Outerwear => "outerwear",
            ClothingType::Underwear => "underwear",
        }
    }
}

// ============================================================================
// Closet items
// ============================================================================

/// A single piece of clothing owned by the user
///
/// Read-only to the recommendation pipeline; `id` is the storage handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub season: Season,
}

impl ClothingItem {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            description: String::new(),
            color: String::new(),
            season: Season::All,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    /// True when category or description contains any of the keywords
    ///
    /// Keywords are expected lower-case.
    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        let category = self.category.to_lowercase();
        let description = self.description.to_lowercase();
        keywords
            .iter()
            .any(|k| category.contains(k) || description.contains(k))
    }
}

/// Copy the template item's category and season onto every item of a batch
///
/// Mirrors the upload form's "apply to all items" action.
pub fn apply_category_and_season(items: &mut [ClothingItem], template_index: usize) -> Result<()> {
    let template = items.get(template_index).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Template index {} out of range for batch of {}",
            template_index,
            items.len()
        ))
    })?;

    if template.category.trim().is_empty() {
        return Err(Error::InvalidInput(
            "Template item has no category".to_string(),
        ));
    }

    let category = template.category.clone();
    let season = template.season;
    for item in items.iter_mut() {
        item.category = category.clone();
        item.season = season;
    }
    Ok(())
}

// ============================================================================
// Outfits
// ============================================================================

/// Where an outfit came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutfitSource {
    /// User-saved, persistent
    #[default]
    Curated,
    /// Produced by the external generator
    Generated,
    /// Synthesized by the fallback assembler
    Assembled,
}

/// A named combination of closet items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ordered item ids; ids missing from the closet are ignored
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, alias = "styling_tips", skip_serializing_if = "Option::is_none")]
    pub styling_tips: Option<String>,
    #[serde(default = "Utc::now", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub source: OutfitSource,
}

impl Outfit {
    /// Build an unsaved candidate outfit with a fresh id
    pub fn candidate(
        name: impl Into<String>,
        description: impl Into<String>,
        items: Vec<String>,
        source: OutfitSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            items,
            occasion: None,
            mood: None,
            styling_tips: None,
            created_at: Utc::now(),
            source,
        }
    }

    /// Resolve item ids against the closet, silently dropping unknown ids
    pub fn resolve_items<'a>(&self, closet: &'a [ClothingItem]) -> Vec<&'a ClothingItem> {
        let index: HashMap<&str, &ClothingItem> =
            closet.iter().map(|item| (item.id.as_str(), item)).collect();
        self.items
            .iter()
            .filter_map(|id| index.get(id.as_str()).copied())
            .collect()
    }
}

/// Curated outfit paired with its match score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredOutfit {
    pub outfit: Outfit,
    pub score: i32,
}

// ============================================================================
// Style intent
// ============================================================================

/// Structured reading of a free-text style request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleIntent {
    pub detected_mood: Option<Mood>,
    pub detected_occasions: BTreeSet<String>,
    pub detected_styles: BTreeSet<StyleTag>,
    pub detected_clothing_types: BTreeSet<ClothingType>,
    pub detected_colors: BTreeSet<String>,
    pub detected_season: Option<Season>,
    pub detected_weather: Option<Weather>,
    pub is_requesting_alternate: bool,
    /// Trimmed request text, when the intent came from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Occasion named by the caller rather than read from the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_occasion: Option<String>,
    /// Free-form caller preferences, passed through to the generator
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub preferences: BTreeMap<String, String>,
}

impl StyleIntent {
    /// Non-empty request text carried by the intent
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

// ============================================================================
// Classified closet
// ============================================================================

/// Closet items grouped by clothing type
///
/// Every bucket is always present (possibly empty). An item may appear in
/// several buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassifiedCloset {
    buckets: BTreeMap<ClothingType, Vec<ClothingItem>>,
}

impl Default for ClassifiedCloset {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifiedCloset {
    pub fn new() -> Self {
        Self {
            buckets: ClothingType::ALL.into_iter().map(|t| (t, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, bucket: ClothingType, item: ClothingItem) {
        self.buckets.entry(bucket).or_default().push(item);
    }

    pub fn bucket(&self, bucket: ClothingType) -> &[ClothingItem] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no bucket holds any item
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// All bucket contents in bucket order; multi-bucket items repeat
    pub fn flatten(&self) -> Vec<&ClothingItem> {
        self.buckets.values().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_from_str_is_case_insensitive() {
        assert_eq!("Business".parse::<Mood>().unwrap(), Mood::Business);
        assert_eq!(" casual ".parse::<Mood>().unwrap(), Mood::Casual);
        assert!("evening".parse::<Mood>().is_err());
    }

    #[test]
    fn test_clothing_item_defaults_missing_fields() {
        let item: ClothingItem = serde_json::from_str(r#"{"id":"a1","category":"Jeans"}"#).unwrap();
        assert_eq!(item.description, "");
        assert_eq!(item.season, Season::All);

        let item: ClothingItem =
            serde_json::from_str(r#"{"id":"a2","category":"coat","season":"autumn"}"#).unwrap();
        assert_eq!(item.season, Season::Fall);
    }

    #[test]
    fn test_mentions_any_checks_category_and_description() {
        let item = ClothingItem::new("1", "Shoes").with_description("Black OXFORD");
        assert!(item.mentions_any(&["oxford"]));
        assert!(item.mentions_any(&["shoe"]));
        assert!(!item.mentions_any(&["sneaker"]));
    }

    #[test]
    fn test_outfit_accepts_snake_case_styling_tips() {
        let json = r#"{"id":"o1","name":"Look","items":["1"],"styling_tips":"Add a belt"}"#;
        let outfit: Outfit = serde_json::from_str(json).unwrap();
        assert_eq!(outfit.styling_tips.as_deref(), Some("Add a belt"));
        assert_eq!(outfit.source, OutfitSource::Curated);

        let value = serde_json::to_value(&outfit).unwrap();
        assert_eq!(value["stylingTips"], "Add a belt");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_resolve_items_drops_unknown_ids_and_keeps_order() {
        let closet = vec![
            ClothingItem::new("a", "top"),
            ClothingItem::new("b", "jeans"),
        ];
        let outfit = Outfit::candidate(
            "Test",
            "",
            vec!["b".into(), "ghost".into(), "a".into()],
            OutfitSource::Curated,
        );
        let resolved: Vec<&str> = outfit
            .resolve_items(&closet)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(resolved, vec!["b", "a"]);
    }

    #[test]
    fn test_apply_category_and_season_to_batch() {
        let mut items = vec![
            ClothingItem::new("1", "dress").with_season(Season::Summer),
            ClothingItem::new("2", ""),
            ClothingItem::new("3", "coat").with_season(Season::Winter),
        ];
        apply_category_and_season(&mut items, 0).unwrap();
        assert!(items.iter().all(|i| i.category == "dress"));
        assert!(items.iter().all(|i| i.season == Season::Summer));
    }

    #[test]
    fn test_apply_category_and_season_rejects_bad_template() {
        let mut items = vec![ClothingItem::new("1", ""), ClothingItem::new("2", "top")];
        assert!(apply_category_and_season(&mut items, 0).is_err());
        assert!(apply_category_and_season(&mut items, 5).is_err());
        assert_eq!(items[1].category, "top");
    }

    #[test]
    fn test_classified_closet_has_all_buckets() {
        let closet = ClassifiedCloset::new();
        assert!(closet.is_empty());
        let value = serde_json::to_value(&closet).unwrap();
        for t in ClothingType::ALL {
            assert!(value[t.as_str()].is_array());
        }
    }

    #[test]
    fn test_intent_serializes_camel_case() {
        let mut intent = StyleIntent::default();
        intent.detected_mood = Some(Mood::Formal);
        intent.detected_styles.insert(StyleTag::NightOut);
        let value = serde_json::to_value(&intent).unwrap();
        assert_eq!(value["detectedMood"], "formal");
        assert_eq!(value["detectedStyles"][0], "nightout");
        assert_eq!(value["isRequestingAlternate"], false);
    }
}
