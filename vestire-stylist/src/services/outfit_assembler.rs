//! Fallback outfit synthesis
//!
//! Builds candidate outfits directly from the closet when no curated outfit
//! matches and the generator is unavailable. A synthesis strategy picks the
//! keyword refinements for each slot; item choice inside a slot is uniform
//! random over an injected [`Rng`], so a seeded generator reproduces the same
//! outfits.
//!
//! Per attempt:
//! 1. Base: a dress, else a top plus a bottom (provocative requests may fall
//!    back to two intimates)
//! 2. Optional slots: shoes, outerwear, and under the provocative strategy
//!    an underwear piece with probability 0.5
//! 3. Candidates with fewer than 2 items, or with the same items as an
//!    earlier candidate, are dropped
//!
//! When every attempt fails but at least 2 eligible items exist, one
//! last-resort outfit of up to 3 random items is returned.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use thiserror::Error;
use vestire_common::taxonomy::{
    self, SlotRefinements, CASUAL_REFINEMENTS, CASUAL_SIGNALS, GENERIC_REFINEMENTS,
    PROFESSIONAL_REFINEMENTS, PROFESSIONAL_SIGNALS, PROVOCATIVE_REFINEMENTS, PROVOCATIVE_SIGNALS,
};
use vestire_common::{
    ClassifiedCloset, ClothingItem, ClothingType, Mood, Outfit, OutfitSource, StyleIntent,
    StyleTag,
};

use super::closet_classifier::{classify, refine_or_fallback};
use super::constraint_filter::filter_appropriate;

/// Default number of synthesis attempts
pub const DEFAULT_MAX_OUTFITS: usize = 3;

/// Chance of adding an underwear piece under the provocative strategy
pub const UNDERWEAR_PROBABILITY: f64 = 0.5;

/// Size cap of the last-resort outfit
const LAST_RESORT_ITEMS: usize = 3;

const MIN_OUTFIT_ITEMS: usize = 2;

/// Assembly errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("Closet is empty")]
    ClosetEmpty,
}

/// Style direction used to refine each slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisStrategy {
    Professional,
    Provocative,
    Casual,
    Generic,
}

impl SynthesisStrategy {
    /// Pick a strategy, first matching in priority order
    pub fn select(intent: &StyleIntent, mood: Option<Mood>) -> Self {
        let query = intent.query_text().map(str::to_lowercase).unwrap_or_default();
        let styles = &intent.detected_styles;
        let occasions = &intent.detected_occasions;

        let professional = taxonomy::contains_any(&query, PROFESSIONAL_SIGNALS)
            || styles.contains(&StyleTag::Professional)
            || occasions.contains("work")
            || occasions.contains("interview")
            || matches!(mood, Some(Mood::Business | Mood::Formal));
        if professional {
            return SynthesisStrategy::Professional;
        }

        let provocative = taxonomy::contains_any(&query, PROVOCATIVE_SIGNALS)
            || styles.contains(&StyleTag::Sexy)
            || styles.contains(&StyleTag::Date)
            || occasions.contains("date night")
            || mood == Some(Mood::Provocative);
        if provocative {
            return SynthesisStrategy::Provocative;
        }

        let casual = taxonomy::contains_any(&query, CASUAL_SIGNALS)
            || matches!(mood, Some(Mood::Casual | Mood::Relaxed));
        if casual {
            return SynthesisStrategy::Casual;
        }

        SynthesisStrategy::Generic
    }

    pub fn refinements(&self) -> &'static SlotRefinements {
        match self {
            SynthesisStrategy::Professional => &PROFESSIONAL_REFINEMENTS,
            SynthesisStrategy::Provocative => &PROVOCATIVE_REFINEMENTS,
            SynthesisStrategy::Casual => &CASUAL_REFINEMENTS,
            SynthesisStrategy::Generic => &GENERIC_REFINEMENTS,
        }
    }
}

/// What an outfit is built around; drives naming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Dress,
    Separates,
    Intimates,
}

struct OutfitCopy {
    name: String,
    description: String,
    tips: &'static str,
}

/// Synthesize up to `max_outfits` outfits from the closet
///
/// `mood` is the caller's explicit mood; when absent the intent's detected
/// mood applies. Items forbidden under the effective mood are never used.
/// Returns an empty list when fewer than 2 closet items are allowed and no
/// attempt succeeded.
pub fn synthesize<R: Rng + ?Sized>(
    intent: &StyleIntent,
    closet: &[ClothingItem],
    mood: Option<Mood>,
    max_outfits: usize,
    rng: &mut R,
) -> Result<Vec<Outfit>, AssemblyError> {
    if closet.is_empty() {
        return Err(AssemblyError::ClosetEmpty);
    }

    let mood = mood.or(intent.detected_mood);
    let eligible = filter_appropriate(closet, mood);
    let classified = classify(eligible.iter().copied());
    let strategy = SynthesisStrategy::select(intent, mood);

    tracing::debug!(
        strategy = ?strategy,
        mood = ?mood,
        closet = closet.len(),
        eligible = eligible.len(),
        "Synthesizing outfits"
    );

    let mut outfits = Vec::new();
    let mut seen: Vec<BTreeSet<String>> = Vec::new();

    for _ in 0..max_outfits {
        let Some((base, items)) = assemble_one(&classified, strategy, rng) else {
            continue;
        };
        if items.len() < MIN_OUTFIT_ITEMS {
            continue;
        }

        let key: BTreeSet<String> = items.iter().map(|item| item.id.clone()).collect();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        let copy = outfit_copy(strategy, base, mood, intent.query_text());
        outfits.push(build_outfit(copy, &items, mood, rng));
    }

    if outfits.is_empty() && eligible.len() >= MIN_OUTFIT_ITEMS {
        let items: Vec<&ClothingItem> = eligible
            .choose_multiple(rng, LAST_RESORT_ITEMS)
            .copied()
            .collect();
        tracing::debug!(items = items.len(), "Using last-resort outfit");
        let copy = last_resort_copy(intent.query_text());
        outfits.push(build_outfit(copy, &items, mood, rng));
    }

    Ok(outfits)
}

/// One synthesis attempt; `None` when no base can be formed
fn assemble_one<'a, R: Rng + ?Sized>(
    closet: &'a ClassifiedCloset,
    strategy: SynthesisStrategy,
    rng: &mut R,
) -> Option<(Base, Vec<&'a ClothingItem>)> {
    let refine = strategy.refinements();
    let mut items: Vec<&ClothingItem> = Vec::new();

    let dress = choose_slot(closet, ClothingType::Dresses, refine.dresses, &items, rng);

    let base = if let Some(dress) = dress {
        items.push(dress);
        Base::Dress
    } else if has_available(closet, ClothingType::Tops, &items)
        && has_available(closet, ClothingType::Bottoms, &items)
    {
        let top = choose_slot(closet, ClothingType::Tops, refine.tops, &items, rng)?;
        items.push(top);
        let bottom = choose_slot(closet, ClothingType::Bottoms, refine.bottoms, &items, rng)?;
        items.push(bottom);
        Base::Separates
    } else if strategy == SynthesisStrategy::Provocative {
        let first = choose_slot(closet, ClothingType::Underwear, &[], &items, rng)?;
        items.push(first);
        if let Some(second) = choose_slot(closet, ClothingType::Underwear, &[], &items, rng) {
            items.push(second);
        }
        return Some((Base::Intimates, items));
    } else {
        return None;
    };

    if let Some(shoes) = choose_slot(closet, ClothingType::Shoes, refine.shoes, &items, rng) {
        items.push(shoes);
    }
    let outer = choose_slot(closet, ClothingType::Outerwear, refine.outerwear, &items, rng);
    if let Some(outer) = outer {
        items.push(outer);
    }
    if strategy == SynthesisStrategy::Provocative
        && has_available(closet, ClothingType::Underwear, &items)
        && rng.gen_bool(UNDERWEAR_PROBABILITY)
    {
        if let Some(under) = choose_slot(closet, ClothingType::Underwear, &[], &items, rng) {
            items.push(under);
        }
    }

    Some((base, items))
}

/// Uniform pick from the refined slot, falling back to the whole bucket
///
/// Items already in the outfit are never picked again.
fn choose_slot<'a, R: Rng + ?Sized>(
    closet: &'a ClassifiedCloset,
    bucket: ClothingType,
    keywords: &[&str],
    taken: &[&ClothingItem],
    rng: &mut R,
) -> Option<&'a ClothingItem> {
    let available = closet
        .bucket(bucket)
        .iter()
        .filter(|item| !is_taken(item, taken));
    refine_or_fallback(available, keywords).choose(rng).copied()
}

fn has_available(
    closet: &ClassifiedCloset,
    bucket: ClothingType,
    taken: &[&ClothingItem],
) -> bool {
    closet.bucket(bucket).iter().any(|item| !is_taken(item, taken))
}

fn is_taken(item: &ClothingItem, taken: &[&ClothingItem]) -> bool {
    taken.iter().any(|t| t.id == item.id)
}

fn build_outfit<R: Rng + ?Sized>(
    copy: OutfitCopy,
    items: &[&ClothingItem],
    mood: Option<Mood>,
    rng: &mut R,
) -> Outfit {
    let ids = items.iter().map(|item| item.id.clone()).collect();
    let mut outfit = Outfit::candidate(copy.name, copy.description, ids, OutfitSource::Assembled);
    // Id drawn from the injected source so seeded runs are fully reproducible
    outfit.id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string();
    outfit.mood = mood;
    outfit.styling_tips = Some(copy.tips.to_string());
    outfit
}

fn outfit_copy(
    strategy: SynthesisStrategy,
    base: Base,
    mood: Option<Mood>,
    query: Option<&str>,
) -> OutfitCopy {
    let (name, description, tips): (String, String, &'static str) = match (strategy, base) {
        (_, Base::Intimates) => (
            "Intimate Seductive Ensemble".into(),
            "A sensual and intimate combination for special private occasions".into(),
            "Keep accessories minimal and focus on the essentials for this look",
        ),
        (SynthesisStrategy::Professional, Base::Dress) => (
            "Professional Dress Ensemble".into(),
            concat!(
                "A sophisticated professional outfit built around a dress, ",
                "perfect for work or formal settings"
            )
            .into(),
            "Add minimal jewelry and a structured bag to complete this professional look",
        ),
        (SynthesisStrategy::Professional, Base::Separates) => (
            "Business Professional Attire".into(),
            "A polished professional combination ideal for workplace settings".into(),
            "Ensure everything is well-pressed and add a quality watch as an accessory",
        ),
        (SynthesisStrategy::Provocative, Base::Dress) => (
            "Seductive Night Out Look".into(),
            "A stunning outfit that exudes confidence and sensuality".into(),
            "Add statement jewelry and style your hair to complement this bold look",
        ),
        (SynthesisStrategy::Provocative, Base::Separates) => (
            "Hot Date Night Ensemble".into(),
            "A stylish and seductive combination that makes a bold statement".into(),
            "Add delicate jewelry and a touch of your favorite perfume to complete this look",
        ),
        (SynthesisStrategy::Casual, Base::Dress) => (
            "Effortless Casual Dress Outfit".into(),
            "A simple yet effective casual outfit centered around a comfortable dress".into(),
            "Change accessories to dress this outfit up or down as needed",
        ),
        (SynthesisStrategy::Casual, Base::Separates) => (
            "Everyday Casual Look".into(),
            "A comfortable yet put-together outfit perfect for daily activities".into(),
            "Add your favorite accessories to personalize this versatile outfit",
        ),
        (SynthesisStrategy::Generic, Base::Dress) => {
            let word = mood.map(|m| m.as_str()).unwrap_or("versatile");
            (
                format!("{} Dress Ensemble", capitalize(word)),
                format!("{} {} outfit built around a versatile dress", article(word), word),
                "Accessorize based on the specific occasion to customize this look",
            )
        }
        (SynthesisStrategy::Generic, Base::Separates) => {
            let word = mood.map(|m| m.as_str()).unwrap_or("versatile");
            (
                format!("{} Style Mix", capitalize(word)),
                format!(
                    "{} {} outfit combination that balances style and comfort",
                    article(word),
                    word
                ),
                "Mix and match these pieces based on your preference and the occasion",
            )
        }
    };

    match query {
        Some(query) => OutfitCopy {
            name: format!("{} {}", capitalize(query), name),
            description: format!(
                "{} - perfectly matching your request for \"{}\"",
                description, query
            ),
            tips,
        },
        None => OutfitCopy { name, description, tips },
    }
}

fn last_resort_copy(query: Option<&str>) -> OutfitCopy {
    let name = "Personal Style Mix";
    let description = "A custom combination of items from your wardrobe";
    let tips = "Mix and match these pieces based on your preference and the occasion";

    match query {
        Some(query) => OutfitCopy {
            name: format!("{} {}", capitalize(query), name),
            description: format!("{} - aligned with your request for \"{}\"", description, query),
            tips,
        },
        None => OutfitCopy {
            name: name.to_string(),
            description: description.to_string(),
            tips,
        },
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "An",
        _ => "A",
    }
}
