//! Query-driven closet narrowing
//!
//! Selects the closet items most relevant to a request before they are handed
//! to the generator, so the prompt stays focused on what was asked for.
//! Matching runs in priority order and stops at the first tier that applies:
//!
//! 1. Style words and clothing-type words both present: items matching either
//! 2. Style words only: items matching the style, topped up for sexy and
//!    professional requests
//! 3. Clothing-type words only: items of those types
//! 4. Otherwise: items mentioning any meaningful query word
//!
//! A thin result is padded with one top, bottom, shoe and dress; fewer than 3
//! items after that returns the whole closet.

use vestire_common::taxonomy::{self, KeywordTable, CLOTHING_TYPE_KEYWORDS};
use vestire_common::{ClothingItem, ClothingType};

const MIN_MATCHED: usize = 3;

/// Broader style vocabulary than the intent tables; includes garment words
static MATCHER_STYLES: &KeywordTable<&'static str> = &[
    (
        "sexy",
        &[
            "sexy", "hot", "revealing", "seductive", "provocative", "date night", "party",
            "clubbing", "night out", "attractive", "flirty", "body-con", "bodycon",
            "figure-hugging", "slim-fit", "tight", "lingerie", "bra", "skimpy", "low-cut", "mini",
        ],
    ),
    (
        "professional",
        &[
            "professional", "work", "office", "business", "formal", "interview", "corporate",
            "meeting", "presentation", "conservative", "polished", "clean-cut", "modest",
            "elegant", "sophisticated", "tailored", "blazer", "suit", "blouse", "slacks",
            "dress shirt",
        ],
    ),
    (
        "casual",
        &[
            "casual", "everyday", "relaxed", "comfortable", "laid-back", "informal", "weekend",
            "lounge", "chill", "easy-going", "simple", "tee", "t-shirt", "jeans", "shorts",
            "hoodie", "sneakers",
        ],
    ),
    (
        "athletic",
        &[
            "athletic", "sports", "workout", "gym", "exercise", "training", "running", "fitness",
            "active", "performance", "sporty", "leggings", "joggers", "sweatpants",
        ],
    ),
    (
        "party",
        &[
            "party", "celebration", "festive", "going out", "evening", "cocktail", "club",
            "dance", "disco", "sparkly", "sequin", "glitter", "statement",
        ],
    ),
    (
        "date",
        &[
            "date", "romantic", "dinner", "special occasion", "night out", "charming",
            "attractive", "flattering",
        ],
    ),
];

/// Categories added for a sexy request that matched too little
static SEXY_STAPLES: &[&str] = &["dress", "skirt", "bodycon", "lingerie", "bra"];

/// Categories added for a professional request that matched too little
static PROFESSIONAL_STAPLES: &[&str] = &["blazer", "suit", "shirt", "slacks", "blouse"];

/// Filler words ignored by the free-word tier
static STOP_WORDS: &[&str] = &[
    "show", "something", "need", "like", "want", "with", "that", "this", "have", "give",
    "would", "could", "should",
];

/// Closet items relevant to the query, in closet order
///
/// Deterministic: padding takes the first item of each missing type.
pub fn match_items(query: &str, items: &[ClothingItem]) -> Vec<ClothingItem> {
    if items.is_empty() {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    let types: Vec<ClothingType> =
        taxonomy::all_matches(&query_lower, CLOTHING_TYPE_KEYWORDS).collect();
    let styles: Vec<&str> = taxonomy::all_matches(&query_lower, MATCHER_STYLES).collect();

    let mut matched: Vec<&ClothingItem> = if !styles.is_empty() && !types.is_empty() {
        items
            .iter()
            .filter(|item| matches_types(item, &types) || matches_styles(item, &styles))
            .collect()
    } else if !styles.is_empty() {
        let mut matched: Vec<&ClothingItem> =
            items.iter().filter(|item| matches_styles(item, &styles)).collect();
        if styles.contains(&"sexy") && matched.len() < MIN_MATCHED {
            extend_unique(&mut matched, items.iter().filter(|i| category_has(i, SEXY_STAPLES)));
        }
        if styles.contains(&"professional") && matched.len() < MIN_MATCHED {
            extend_unique(
                &mut matched,
                items.iter().filter(|i| category_has(i, PROFESSIONAL_STAPLES)),
            );
        }
        matched
    } else if !types.is_empty() {
        items.iter().filter(|item| matches_types(item, &types)).collect()
    } else {
        let words: Vec<&str> = query_lower
            .split_whitespace()
            .filter(|word| word.chars().count() > 3)
            .filter(|word| !STOP_WORDS.contains(word))
            .collect();
        if words.is_empty() {
            Vec::new()
        } else {
            items.iter().filter(|item| item.mentions_any(&words)).collect()
        }
    };

    if matched.len() < MIN_MATCHED {
        pad_with_staples(&mut matched, items);
    }

    if matched.len() < MIN_MATCHED {
        tracing::debug!(matched = matched.len(), "Too few matches, using whole closet");
        return items.to_vec();
    }

    tracing::debug!(
        styles = ?styles,
        types = types.len(),
        matched = matched.len(),
        "Matched closet items to query"
    );
    matched.into_iter().cloned().collect()
}

fn matches_types(item: &ClothingItem, types: &[ClothingType]) -> bool {
    CLOTHING_TYPE_KEYWORDS
        .iter()
        .filter(|(t, _)| types.contains(t))
        .any(|(_, keywords)| item.mentions_any(keywords))
}

fn matches_styles(item: &ClothingItem, styles: &[&str]) -> bool {
    MATCHER_STYLES
        .iter()
        .filter(|(style, _)| styles.contains(style))
        .any(|(_, keywords)| item.mentions_any(keywords))
}

/// Category-only keyword check
fn category_has(item: &ClothingItem, keywords: &[&str]) -> bool {
    taxonomy::contains_any(&item.category.to_lowercase(), keywords)
}

fn is_of_type(item: &ClothingItem, clothing_type: ClothingType) -> bool {
    CLOTHING_TYPE_KEYWORDS
        .iter()
        .find(|(t, _)| *t == clothing_type)
        .is_some_and(|(_, keywords)| category_has(item, keywords))
}

fn extend_unique<'a>(
    matched: &mut Vec<&'a ClothingItem>,
    extra: impl Iterator<Item = &'a ClothingItem>,
) {
    for item in extra {
        if !matched.iter().any(|m| m.id == item.id) {
            matched.push(item);
        }
    }
}

/// Make sure a top, a bottom (unless a dress is present) and shoes are
/// represented, then add a dress if still short
fn pad_with_staples<'a>(matched: &mut Vec<&'a ClothingItem>, items: &'a [ClothingItem]) {
    let first_of = |t: ClothingType| items.iter().find(|item| is_of_type(item, t));
    let has = |matched: &[&ClothingItem], t: ClothingType| {
        matched.iter().any(|item| is_of_type(item, t))
    };

    if !has(matched.as_slice(), ClothingType::Tops) {
        extend_unique(matched, first_of(ClothingType::Tops).into_iter());
    }
    let covers_legs = has(matched.as_slice(), ClothingType::Bottoms)
        || has(matched.as_slice(), ClothingType::Dresses);
    if !covers_legs {
        extend_unique(matched, first_of(ClothingType::Bottoms).into_iter());
    }
    if !has(matched.as_slice(), ClothingType::Shoes) {
        extend_unique(matched, first_of(ClothingType::Shoes).into_iter());
    }
    if matched.len() < MIN_MATCHED {
        extend_unique(matched, first_of(ClothingType::Dresses).into_iter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closet() -> Vec<ClothingItem> {
        vec![
            ClothingItem::new("blazer", "navy blazer"),
            ClothingItem::new("slacks", "grey slacks"),
            ClothingItem::new("tee", "graphic t-shirt"),
            ClothingItem::new("jeans", "blue jeans"),
            ClothingItem::new("dress", "bodycon dress").with_description("tight red mini"),
            ClothingItem::new("heels", "stiletto heels"),
            ClothingItem::new("sneakers", "white sneakers"),
            ClothingItem::new("bra", "lace bra"),
        ]
    }

    fn ids(items: &[ClothingItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_style_only() {
        let matched = match_items("something sexy", &closet());
        // Dress and bra match; padding adds the first top and shoe but no
        // bottom since a dress is present
        assert_eq!(ids(&matched), vec!["dress", "bra", "blazer", "heels"]);
    }

    #[test]
    fn test_style_and_type() {
        let matched = match_items("professional shoes", &closet());
        // professional words hit blazer/slacks; shoe words hit heels/sneakers
        assert_eq!(ids(&matched), vec!["blazer", "slacks", "heels", "sneakers"]);
    }

    #[test]
    fn test_type_only() {
        let matched = match_items("any skirt please", &closet());
        // Bottoms match slacks and jeans; padding adds the first top and shoe
        assert_eq!(ids(&matched), vec!["slacks", "jeans", "blazer", "heels"]);
    }

    #[test]
    fn test_free_words() {
        let matched = match_items("show me graphic navy grey stuff", &closet());
        assert_eq!(ids(&matched), vec!["blazer", "slacks", "tee"]);
    }

    #[test]
    fn test_too_few_returns_whole_closet() {
        let small = vec![
            ClothingItem::new("1", "scarf"),
            ClothingItem::new("2", "belt"),
        ];
        assert_eq!(match_items("anything", &small), small);
    }

    #[test]
    fn test_empty_closet() {
        assert!(match_items("sexy", &[]).is_empty());
    }
}
