//! Style taxonomy keyword tables
//!
//! Immutable keyword tables driving intent extraction, closet classification,
//! constraint filtering and outfit synthesis. All keywords are lower-case and
//! are matched as substrings of lower-cased text: one keyword hit anywhere in a
//! tag's phrase list activates the tag, and tags are non-exclusive.
//!
//! Tables are ordered slices rather than maps. Where a consumer takes the
//! first match (mood detection, season, weather) the table order below is the
//! documented tie-break.

use crate::models::{ClothingType, Mood, Season, StyleTag, Weather};

/// Ordered `(tag, keywords)` table
pub type KeywordTable<T> = [(T, &'static [&'static str])];

/// Mood keywords, scanned in this order; first hit wins
pub static MOOD_CATEGORIES: &KeywordTable<Mood> = &[
    (
        Mood::Casual,
        &[
            "casual", "relaxed", "everyday", "chill", "comfortable", "relax", "laid back",
            "easy going",
        ],
    ),
    (
        Mood::Formal,
        &["formal", "elegant", "fancy", "dressed up", "professional", "sophisticated", "classy"],
    ),
    (
        Mood::Business,
        &["business", "work", "office", "professional", "meeting", "interview", "corporate"],
    ),
    (
        Mood::Adventurous,
        &["adventurous", "bold", "creative", "unique", "statement", "fun", "colorful", "exciting"],
    ),
    (
        Mood::Relaxed,
        &["relaxed", "lounge", "cozy", "homey", "comfortable", "calm", "chill"],
    ),
    (
        Mood::Athletic,
        &["athletic", "sporty", "workout", "gym", "active", "exercise", "running", "sport"],
    ),
    (
        Mood::Provocative,
        &["sexy", "provocative", "seductive", "sensual", "revealing", "alluring", "daring"],
    ),
];

/// Style keywords for tags that are not moods; all hits accumulate
pub static STYLE_CATEGORIES: &KeywordTable<StyleTag> = &[
    (
        StyleTag::Sexy,
        &["sexy", "hot", "revealing", "date night", "attractive", "seductive"],
    ),
    (
        StyleTag::Professional,
        &["professional", "work", "business", "office", "formal", "interview"],
    ),
    (
        StyleTag::Trendy,
        &["trendy", "fashionable", "stylish", "hip", "cool", "in style"],
    ),
    (
        StyleTag::Vintage,
        &["vintage", "retro", "classic", "old school", "throwback"],
    ),
    (
        StyleTag::Minimalist,
        &["minimalist", "simple", "clean", "basic", "understated"],
    ),
    (
        StyleTag::Bohemian,
        &["bohemian", "boho", "hippie", "free-spirited", "earthy"],
    ),
    (
        StyleTag::NightOut,
        &["party", "club", "going out", "night out", "dance", "bar", "cocktail"],
    ),
    (
        StyleTag::Date,
        &["date", "romantic", "dinner", "anniversary"],
    ),
];

/// Occasion keywords; the tag is the occasion label matched against outfits
pub static OCCASION_KEYWORDS: &KeywordTable<&'static str> = &[
    ("date night", &["date", "romantic", "dinner", "night out"]),
    ("party", &["party", "celebration", "festive", "club", "dance"]),
    ("work", &["work", "office", "business", "meeting", "professional"]),
    ("weekend", &["weekend", "casual", "day off", "relaxed"]),
    ("outdoor", &["outdoor", "nature", "hiking", "picnic", "park", "beach"]),
    ("vacation", &["vacation", "holiday", "travel", "trip"]),
    ("wedding", &["wedding", "bride", "ceremony", "reception"]),
    ("interview", &["interview", "job", "hiring"]),
];

/// Single occasion sent to the generator along with a request
pub static REQUEST_OCCASIONS: &KeywordTable<&'static str> = &[
    ("work", &["work", "office", "business", "professional", "meeting", "interview"]),
    ("date", &["date", "romantic", "dinner", "night out", "sexy", "hot"]),
    ("party", &["party", "celebration", "club", "festive", "dance"]),
    ("casual", &["casual", "everyday", "day-to-day", "relaxed", "home"]),
    ("formal", &["formal", "elegant", "fancy", "dressed up", "classy", "gala"]),
    ("workout", &["workout", "exercise", "gym", "fitness", "run", "training"]),
    ("outdoor", &["outdoor", "hiking", "picnic", "beach", "park", "nature"]),
    ("travel", &["travel", "vacation", "trip", "holiday", "journey", "adventure"]),
];

/// Clothing type keywords; also the closet bucket membership rules
pub static CLOTHING_TYPE_KEYWORDS: &KeywordTable<ClothingType> = &[
    (
        ClothingType::Tops,
        &[
            "shirt", "blouse", "top", "t-shirt", "tee", "tank", "sweater", "cardigan", "blazer",
            "jacket",
        ],
    ),
    (
        ClothingType::Bottoms,
        &["pants", "jeans", "shorts", "skirt", "slacks", "trousers", "leggings"],
    ),
    (
        ClothingType::Dresses,
        &["dress", "gown", "jumpsuit", "romper"],
    ),
    (
        ClothingType::Shoes,
        &[
            "shoe", "heel", "boot", "sneaker", "sandal", "flats", "loafer", "oxford", "stiletto",
            "pump",
        ],
    ),
    (
        ClothingType::Outerwear,
        &["jacket", "coat", "blazer", "cardigan", "sweater", "hoodie"],
    ),
    (
        ClothingType::Underwear,
        &["bra", "bralette", "bikini", "underwear", "lingerie", "panties"],
    ),
];

/// Color keywords; each keyword is its own tag
pub static COLOR_KEYWORDS: &[&str] = &[
    "red", "blue", "green", "black", "white", "yellow", "purple", "pink", "orange", "brown",
    "gray", "grey", "dark", "light", "bright", "neutral", "pastel", "colorful",
];

/// Season keywords, first hit wins
pub static SEASON_KEYWORDS: &KeywordTable<Season> = &[
    (Season::Summer, &["summer", "hot", "warm", "beach", "sun"]),
    (Season::Winter, &["winter", "cold", "snow", "freezing", "chilly"]),
    (Season::Spring, &["spring", "mild", "fresh", "bloom"]),
    (Season::Fall, &["fall", "autumn", "cool", "crisp", "leaves"]),
];

/// Weather keywords, first hit wins
pub static WEATHER_KEYWORDS: &KeywordTable<Weather> = &[
    (Weather::Rainy, &["rain", "rainy", "wet", "drizzle", "storm", "umbrella"]),
    (Weather::Sunny, &["sun", "sunny", "bright", "clear"]),
    (Weather::Cold, &["cold", "chilly", "freezing", "frost"]),
    (Weather::Hot, &["hot", "warm", "heat", "sweaty"]),
];

/// Phrases marking a request for an alternative suggestion
pub static ALTERNATE_REQUEST_KEYWORDS: &[&str] = &["another", "one more", "different"];

/// Item category keyword → moods under which the item is forbidden
pub static INAPPROPRIATE_COMBINATIONS: &[(&str, &[Mood])] = &[
    ("bra", &[Mood::Business, Mood::Formal]),
    ("underwear", &[Mood::Business, Mood::Formal]),
    ("intimate", &[Mood::Business, Mood::Formal]),
    ("lingerie", &[Mood::Business, Mood::Formal]),
    ("swimwear", &[Mood::Business, Mood::Formal]),
    ("bikini", &[Mood::Business, Mood::Formal]),
];

// ============================================================================
// Outfit synthesis tables
// ============================================================================

/// Request phrases selecting the professional synthesis strategy
pub static PROFESSIONAL_SIGNALS: &[&str] = &["professional", "work", "business", "formal"];

/// Request phrases selecting the provocative synthesis strategy
pub static PROVOCATIVE_SIGNALS: &[&str] = &["sexy", "hot", "date"];

/// Request phrases selecting the casual synthesis strategy
pub static CASUAL_SIGNALS: &[&str] = &["casual", "everyday", "comfortable"];

/// Per-slot keyword subsets biasing item choice toward a style
///
/// An empty slice means "no refinement": the whole bucket is used.
#[derive(Debug, Clone, Copy)]
pub struct SlotRefinements {
    pub dresses: &'static [&'static str],
    pub tops: &'static [&'static str],
    pub bottoms: &'static [&'static str],
    pub shoes: &'static [&'static str],
    pub outerwear: &'static [&'static str],
}

pub static PROFESSIONAL_REFINEMENTS: SlotRefinements = SlotRefinements {
    dresses: &["professional", "formal", "office", "sheath", "blazer"],
    tops: &["blouse", "button", "dress shirt", "formal", "professional"],
    bottoms: &["slacks", "trousers", "formal", "professional"],
    shoes: &["heel", "oxford", "loafer", "formal", "dress"],
    outerwear: &["blazer", "suit", "formal", "professional"],
};

pub static PROVOCATIVE_REFINEMENTS: SlotRefinements = SlotRefinements {
    dresses: &["bodycon", "mini", "tight", "short", "revealing", "fitted"],
    tops: &["crop", "tank", "tight", "revealing", "low-cut"],
    bottoms: &["mini", "shorts", "tight", "short", "fitted"],
    shoes: &["heel", "stiletto", "high", "sexy"],
    outerwear: &["leather", "fitted", "cropped"],
};

pub static CASUAL_REFINEMENTS: SlotRefinements = SlotRefinements {
    dresses: &["casual", "comfortable", "everyday"],
    tops: &["t-shirt", "tee", "sweater", "casual", "comfortable"],
    bottoms: &["jeans", "shorts", "casual", "comfortable"],
    shoes: &["sneaker", "flat", "casual", "comfortable"],
    outerwear: &["hoodie", "denim", "casual", "comfortable"],
};

pub static GENERIC_REFINEMENTS: SlotRefinements = SlotRefinements {
    dresses: &[],
    tops: &[],
    bottoms: &[],
    shoes: &[],
    outerwear: &[],
};

// ============================================================================
// Matching primitives
// ============================================================================

/// True when `text_lower` contains any keyword as a substring
pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text_lower.contains(k))
}

/// First tag (in table order) with a keyword hit
pub fn first_match<T: Copy>(text_lower: &str, table: &KeywordTable<T>) -> Option<T> {
    table
        .iter()
        .find(|(_, keywords)| contains_any(text_lower, keywords))
        .map(|(tag, _)| *tag)
}

/// Every tag with a keyword hit, in table order
pub fn all_matches<'t, T: Copy + 't>(
    text_lower: &'t str,
    table: &'t KeywordTable<T>,
) -> impl Iterator<Item = T> + 't {
    table
        .iter()
        .filter(move |(_, keywords)| contains_any(text_lower, keywords))
        .map(|(tag, _)| *tag)
}

/// Moods under which an item with this (lower-cased) category is forbidden
pub fn forbidden_moods(category_lower: &str) -> impl Iterator<Item = Mood> + '_ {
    INAPPROPRIATE_COMBINATIONS
        .iter()
        .filter(move |(key, _)| category_lower.contains(key))
        .flat_map(|(_, moods)| moods.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_lower_case() {
        let tables: Vec<&[&str]> = MOOD_CATEGORIES
            .iter()
            .map(|(_, k)| *k)
            .chain(STYLE_CATEGORIES.iter().map(|(_, k)| *k))
            .chain(OCCASION_KEYWORDS.iter().map(|(_, k)| *k))
            .chain(CLOTHING_TYPE_KEYWORDS.iter().map(|(_, k)| *k))
            .chain(std::iter::once(COLOR_KEYWORDS))
            .collect();
        for keywords in tables {
            for k in keywords {
                assert_eq!(*k, k.to_lowercase(), "keyword '{}' must be lower-case", k);
            }
        }
    }

    #[test]
    fn test_first_match_follows_table_order() {
        // "comfortable" appears under both casual and relaxed; casual is listed first
        assert_eq!(first_match("something comfortable", MOOD_CATEGORIES), Some(Mood::Casual));
        assert_eq!(first_match("nothing here", MOOD_CATEGORIES), None);
    }

    #[test]
    fn test_all_matches_accumulates() {
        let hits: Vec<ClothingType> =
            all_matches("a blazer and jeans", CLOTHING_TYPE_KEYWORDS).collect();
        assert_eq!(
            hits,
            vec![ClothingType::Tops, ClothingType::Bottoms, ClothingType::Outerwear]
        );
    }

    #[test]
    fn test_every_clothing_type_has_keywords() {
        for t in ClothingType::ALL {
            assert!(
                CLOTHING_TYPE_KEYWORDS.iter().any(|(tag, k)| *tag == t && !k.is_empty()),
                "{:?} has no keywords",
                t
            );
        }
    }

    #[test]
    fn test_forbidden_moods_for_intimates() {
        let moods: Vec<Mood> = forbidden_moods("sports bra").collect();
        assert!(moods.contains(&Mood::Business));
        assert!(moods.contains(&Mood::Formal));
        assert_eq!(forbidden_moods("jeans").count(), 0);
    }
}
