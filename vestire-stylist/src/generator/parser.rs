//! Lenient parsing of generator reply text
//!
//! Models are asked for a JSON array but often wrap it in prose or ignore the
//! format entirely. The first `[{...}]` span is tried as JSON; failing that,
//! `Outfit N:` blocks are scanned for `name:`, `items:`, `description:` and
//! `styling_tips:` lines.

use super::{GeneratedOutfit, GenerationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[\s*\{.*?\}\s*\]").expect("Invalid JSON array regex"));
static OUTFIT_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Outfit \d+:").expect("Invalid outfit header regex"));
static NAME_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)name:?\s*["']?([^"'\n]+)"#).expect("Invalid name regex"));
static ITEMS_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)items:?\s*([\d,\s]+)").expect("Invalid items regex"));
static DESCRIPTION_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)description:?\s*["']?([^"'\n]+)"#).expect("Invalid description regex")
});
static TIPS_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)styling_tips:?\s*["']?([^"'\n]+)"#).expect("Invalid styling tips regex")
});

#[derive(Deserialize)]
struct RawOutfit {
    #[serde(default)]
    name: String,
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "stylingTips")]
    styling_tips: String,
}

impl From<RawOutfit> for GeneratedOutfit {
    fn from(raw: RawOutfit) -> Self {
        let items = raw
            .items
            .into_iter()
            .filter_map(|value| match value {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|id| !id.is_empty())
            .collect();
        GeneratedOutfit {
            name: raw.name,
            items,
            description: raw.description,
            styling_tips: raw.styling_tips,
        }
    }
}

/// Extract outfits from free-form reply text
///
/// Item ids are not checked against any closet here.
pub fn parse_generated_outfits(text: &str) -> Result<Vec<GeneratedOutfit>, GenerationError> {
    if let Some(found) = JSON_ARRAY.find(text) {
        let raw: Vec<RawOutfit> = serde_json::from_str(found.as_str())
            .map_err(|e| GenerationError::ParseError(format!("Invalid outfit JSON: {}", e)))?;
        return Ok(raw.into_iter().map(GeneratedOutfit::from).collect());
    }

    let outfits: Vec<GeneratedOutfit> = OUTFIT_HEADER
        .split(text)
        .skip(1)
        .enumerate()
        .map(|(index, block)| parse_block(index, block))
        .collect();

    if outfits.is_empty() {
        return Err(GenerationError::ParseError(
            "No outfits found in generator reply".to_string(),
        ));
    }
    Ok(outfits)
}

fn capture(re: &Regex, block: &str) -> Option<String> {
    re.captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn parse_block(index: usize, block: &str) -> GeneratedOutfit {
    let items = capture(&ITEMS_FIELD, block)
        .map(|ids| {
            ids.split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect()
        })
        .unwrap_or_default();

    GeneratedOutfit {
        name: capture(&NAME_FIELD, block).unwrap_or_else(|| format!("Outfit {}", index + 1)),
        items,
        description: capture(&DESCRIPTION_FIELD, block).unwrap_or_default(),
        styling_tips: capture(&TIPS_FIELD, block).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_wrapped_in_prose() {
        let reply = r#"Here are your looks!
[
  {"name": "Boardroom Ready", "items": ["a1", "b2"], "description": "Sharp", "styling_tips": "Add a watch"},
  {"name": "Friday Office", "items": [3, 4], "description": "Relaxed", "stylingTips": "Roll the sleeves"}
]
Enjoy."#;
        let outfits = parse_generated_outfits(reply).unwrap();
        assert_eq!(outfits.len(), 2);
        assert_eq!(outfits[0].name, "Boardroom Ready");
        assert_eq!(outfits[0].items, vec!["a1", "b2"]);
        assert_eq!(outfits[1].items, vec!["3", "4"]);
        assert_eq!(outfits[1].styling_tips, "Roll the sleeves");
    }

    #[test]
    fn test_missing_fields_default() {
        let outfits = parse_generated_outfits(r#"[{"name": "Bare"}]"#).unwrap();
        assert_eq!(outfits[0].name, "Bare");
        assert!(outfits[0].items.is_empty());
        assert!(outfits[0].description.is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let result = parse_generated_outfits(r#"[{"name": "Broken", }]"#);
        assert!(matches!(result, Err(GenerationError::ParseError(_))));
    }

    #[test]
    fn test_block_fallback() {
        let reply = "Outfit 1:\nName: City Stroll\nItems: 1, 2, 3\nDescription: Easy layers\n\
                     Styling_tips: Sunglasses\n\nOutfit 2:\nitems: 4,5\n";
        let outfits = parse_generated_outfits(reply).unwrap();

        assert_eq!(outfits.len(), 2);
        assert_eq!(outfits[0].name, "City Stroll");
        assert_eq!(outfits[0].items, vec!["1", "2", "3"]);
        assert_eq!(outfits[0].description, "Easy layers");
        assert_eq!(outfits[0].styling_tips, "Sunglasses");

        assert_eq!(outfits[1].name, "Outfit 2");
        assert_eq!(outfits[1].items, vec!["4", "5"]);
        assert!(outfits[1].description.is_empty());
    }

    #[test]
    fn test_unrecognizable_reply() {
        let result = parse_generated_outfits("I'm sorry, I can't help with that.");
        assert!(matches!(result, Err(GenerationError::ParseError(_))));
    }
}
