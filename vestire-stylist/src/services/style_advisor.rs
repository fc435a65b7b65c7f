//! Conversational style advice
//!
//! Answers a chat message with a canned stylist reply. The reply is chosen
//! by advice topic, then by named occasion, then by a few question shapes
//! (general recommendation, trends, colour matching). When the message asks
//! for another suggestion, replies already given in the two most recent
//! assistant turns are not repeated.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use vestire_common::taxonomy::{self, KeywordTable};
use vestire_common::Mood;

use super::intent_extractor::extract_intent;

/// Coarse topic of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceTopic {
    Provocative,
    Formal,
    Casual,
    Athletic,
    Business,
    NightOut,
}

/// Topic keywords; a later topic with a hit overrides an earlier one
static ADVICE_TOPICS: &KeywordTable<AdviceTopic> = &[
    (
        AdviceTopic::Provocative,
        &[
            "sexy", "hot", "revealing", "slutty", "seductive", "sensual", "provocative", "daring",
            "bold", "alluring",
        ],
    ),
    (
        AdviceTopic::Formal,
        &[
            "elegant", "sophisticated", "classy", "fancy", "formal", "refined", "polished",
            "black tie", "gala",
        ],
    ),
    (
        AdviceTopic::Casual,
        &[
            "relaxed", "everyday", "comfortable", "chill", "laid back", "informal", "easy-going",
            "simple",
        ],
    ),
    (
        AdviceTopic::Athletic,
        &[
            "sporty", "active", "workout", "gym", "athletic", "fitness", "training", "running",
            "exercise",
        ],
    ),
    (
        AdviceTopic::Business,
        &[
            "professional", "office", "work", "corporate", "business", "career", "interview",
            "meeting",
        ],
    ),
    (
        AdviceTopic::NightOut,
        &[
            "party", "club", "going out", "night", "dance", "bar", "date night", "evening",
            "cocktail",
        ],
    ),
];

/// Occasions with a dedicated reply, checked in this order
static ADVICE_OCCASIONS: &[&str] = &["date", "club", "beach", "wedding", "interview"];

const RECOMMEND_KEYWORDS: &[&str] = &["recommend", "suggest", "what should i wear"];
const TREND_KEYWORDS: &[&str] = &["trend", "fashion", "style"];
const COLOR_KEYWORDS: &[&str] = &["color", "match", "combination"];

/// Assistant turns searched for earlier suggestions
const RECENT_SUGGESTIONS: usize = 2;

/// Author of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of chat history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// What a chat message asks about
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatIntent {
    pub topic: Option<AdviceTopic>,
    pub matched_keywords: Vec<&'static str>,
    pub occasions: Vec<&'static str>,
    pub is_requesting_alternate: bool,
}

/// Read the topic, occasions and alternate request from a chat message
pub fn detect_chat_intent(message: &str) -> ChatIntent {
    let lower = message.to_lowercase();

    let mut intent = ChatIntent {
        is_requesting_alternate: extract_intent(message, None).is_requesting_alternate,
        ..Default::default()
    };

    for (topic, keywords) in ADVICE_TOPICS {
        let hits: Vec<&'static str> = keywords
            .iter()
            .copied()
            .filter(|k| lower.contains(k))
            .collect();
        if !hits.is_empty() {
            intent.topic = Some(*topic);
            intent.matched_keywords.extend(hits);
        }
    }

    intent.occasions = ADVICE_OCCASIONS
        .iter()
        .copied()
        .filter(|o| lower.contains(o))
        .collect();

    intent
}

/// Most recent assistant replies, newest first
///
/// Only consulted once the conversation has at least two non-system turns.
pub fn previous_suggestions(history: &[ChatMessage]) -> Vec<&str> {
    let turns: Vec<&ChatMessage> = history
        .iter()
        .filter(|m| m.role != ChatRole::System)
        .collect();
    if turns.len() < 2 {
        return Vec::new();
    }

    turns
        .iter()
        .rev()
        .filter(|m| m.role == ChatRole::Assistant)
        .take(RECENT_SUGGESTIONS)
        .map(|m| m.content.as_str())
        .collect()
}

/// Stylist reply to a chat message
pub fn advise<R: Rng + ?Sized>(
    message: &str,
    mood: Option<Mood>,
    history: &[ChatMessage],
    rng: &mut R,
) -> String {
    let intent = detect_chat_intent(message);
    let previous = if intent.is_requesting_alternate {
        previous_suggestions(history)
    } else {
        Vec::new()
    };

    tracing::debug!(
        topic = ?intent.topic,
        occasions = ?intent.occasions,
        alternate = intent.is_requesting_alternate,
        excluded = previous.len(),
        "Answering style question"
    );

    if let Some(topic) = intent.topic {
        return topic_reply(topic, &previous, rng).to_string();
    }
    if let Some(occasion) = intent.occasions.first() {
        return occasion_reply(occasion).to_string();
    }

    let lower = message.to_lowercase();
    let reply = if taxonomy::contains_any(&lower, RECOMMEND_KEYWORDS) {
        general_reply(mood)
    } else if taxonomy::contains_any(&lower, TREND_KEYWORDS) {
        TREND_REPLY
    } else if taxonomy::contains_any(&lower, COLOR_KEYWORDS) {
        COLOR_REPLY
    } else {
        DEFAULT_REPLY
    };
    reply.to_string()
}

/// A random topic suggestion not among `previous`, else the topic's summary
fn topic_reply<R: Rng + ?Sized>(
    topic: AdviceTopic,
    previous: &[&str],
    rng: &mut R,
) -> &'static str {
    let (suggestions, summary) = topic_catalog(topic);
    let available: Vec<&'static str> = suggestions
        .iter()
        .copied()
        .filter(|s| !previous.iter().any(|prev| prev.contains(s)))
        .collect();
    available.choose(rng).copied().unwrap_or(summary)
}

fn topic_catalog(topic: AdviceTopic) -> (&'static [&'static str], &'static str) {
    match topic {
        AdviceTopic::Provocative => (PROVOCATIVE_SUGGESTIONS, PROVOCATIVE_SUMMARY),
        AdviceTopic::Formal => (FORMAL_SUGGESTIONS, FORMAL_SUMMARY),
        AdviceTopic::Casual => (CASUAL_SUGGESTIONS, CASUAL_SUMMARY),
        AdviceTopic::Business => (BUSINESS_SUGGESTIONS, BUSINESS_SUMMARY),
        AdviceTopic::Athletic => (ATHLETIC_SUGGESTIONS, ATHLETIC_SUMMARY),
        AdviceTopic::NightOut => (NIGHT_OUT_SUGGESTIONS, NIGHT_OUT_SUMMARY),
    }
}

fn occasion_reply(occasion: &str) -> &'static str {
    match occasion {
        "date" => "For a date, consider an outfit that makes you feel confident and comfortable \
            while showing your personal style. A good approach is dark jeans or chinos paired \
            with a well-fitted button-up shirt or an elegant top. Layer with a blazer or leather \
            jacket depending on the venue. This strikes the perfect balance between effort and \
            effortlessness - you want to look like you care without seeming like you tried too \
            hard.",
        "club" => "For a club or night out dancing, opt for an outfit that allows movement while \
            still looking stylish. Consider dark jeans or leather pants paired with a top that \
            has some interesting element - maybe sequins, a unique cut, or a bold color. Wear \
            shoes you can actually walk and dance in comfortably, and consider bringing a small \
            crossbody bag to keep your hands free.",
        "beach" => "For a beach outfit, light fabrics that dry quickly are key. Beyond your \
            swimwear, pack a cover-up like a flowy dress or loose linen shirt, comfortable \
            sandals, a wide-brimmed hat for sun protection, and sunglasses. Opt for bright \
            colors or tropical prints to embrace the beach vibe!",
        "wedding" => "For wedding attire, always consider the dress code specified on the \
            invitation. For semi-formal weddings, a suit or dress in a mid-tone color works \
            well. For formal weddings, opt for a dark suit or floor-length dress. When in doubt, \
            it's better to be slightly overdressed than underdressed.",
        "interview" => "For a job interview, your outfit should communicate professionalism and \
            attention to detail. A tailored suit in navy, gray, or black is the safest choice \
            for most industries. Pair with a light-colored, crisply pressed shirt or blouse and \
            conservative accessories. First impressions matter, so ensure everything is clean, \
            wrinkle-free, and fits well.",
        _ => "For any special occasion, consider both the venue and the level of formality when \
            selecting your outfit. Pay attention to details like proper fit, appropriate \
            accessories, and clean, wrinkle-free clothes. Most importantly, wear something that \
            makes you feel confident.",
    }
}

fn general_reply(mood: Option<Mood>) -> &'static str {
    match mood {
        Some(Mood::Casual) => "For a casual look, I recommend well-fitted jeans paired with a \
            comfortable t-shirt or a light sweater. You could add a denim jacket or a cardigan \
            if it's cooler. Finish with white sneakers or casual boots.",
        Some(Mood::Formal) => "For a formal occasion, consider a tailored suit in navy, \
            charcoal, or black. Pair it with a crisp dress shirt and a coordinating tie. \
            Complete the look with polished leather dress shoes and subtle accessories like a \
            quality watch.",
        Some(Mood::Business) => "For a professional business look, try tailored slacks or a \
            skirt with a button-down shirt or a modest blouse. Add a blazer for more formality. \
            Closed-toe shoes like loafers, modest heels, or oxfords complete the look.",
        Some(Mood::Adventurous) => "For an adventurous outfit, mix unexpected colors or \
            patterns! Try pairing wide-leg pants with a fitted crop top, or layer a bright \
            blazer over a graphic tee. Statement accessories can really elevate this look.",
        Some(Mood::Provocative) => "For a more daring outfit that's still tasteful, consider \
            pieces that highlight your favorite features while maintaining balance. When \
            showing more skin in one area, keep other areas more covered. Confidence is the \
            most important element of pulling off a bold look!",
        _ => "I'd recommend building outfits around core pieces that make you feel confident. \
            Start with well-fitting basics like quality jeans, versatile t-shirts, and a few \
            button-downs, then add personality with accessories and layering pieces.",
    }
}

const TREND_REPLY: &str = "Current fashion trends include oversized blazers, wide-leg pants, \
    and statement collars. Sustainability is also becoming increasingly important, with more \
    people investing in quality pieces that last longer. Remember though, the best style is one \
    that makes you feel confident and comfortable.";

const COLOR_REPLY: &str = "When combining colors, a good rule of thumb is to use the color \
    wheel: complementary colors create bold looks, while analogous colors create harmonious \
    ones. Neutrals like black, white, navy, and beige pair well with almost everything. If \
    you're unsure, a monochromatic outfit is always elegant.";

const DEFAULT_REPLY: &str = "I'd be happy to help with your style questions! Whether you're \
    looking for outfit ideas, style advice, or recommendations for specific occasions, I can \
    assist you. What kind of outfit are you interested in today?";

static PROVOCATIVE_SUGGESTIONS: &[&str] = &[
    "For a seductive yet tasteful look, try a fitted black bodycon dress that accentuates your \
     figure, paired with strappy heels and minimal jewelry.",
    "A stylish yet provocative outfit could be high-waisted leather pants paired with a silk \
     camisole or a slightly sheer blouse. Add a fitted blazer and finish with heeled boots.",
    "For a bold going-out look, consider a mini skirt paired with an off-shoulder or \
     one-shoulder top. This shows just enough skin while maintaining an air of sophistication.",
    "A daring yet classy outfit would be a jumpsuit with strategic cutouts or a low back. This \
     creates intrigue while still being put-together.",
    "For a subtly provocative look, try skinny jeans with a bodysuit that has a plunging \
     neckline, topped with a lightweight cardigan you can style open or closed.",
    "A slip dress in a luxurious fabric like silk or satin creates a sensual look that's still \
     elegant. Layer with a thin jacket if you want the option of more coverage.",
    "For a bold summer outfit, pair high-waisted shorts with a crop top that shows just a hint \
     of midriff. This is playful and flirty without being too revealing.",
];

const PROVOCATIVE_SUMMARY: &str = "For a seductive yet tasteful outfit, balance more revealing \
    pieces with more modest ones. If you wear a low-cut top, pair it with longer pants or a \
    skirt; if you choose a mini skirt, balance it with a less revealing top.";

static FORMAL_SUGGESTIONS: &[&str] = &[
    "For a formal occasion, a classic black suit with a crisp white shirt and a silk tie never \
     fails. Add a pocket square and polish off the look with well-shined oxfords.",
    "A tailored tuxedo in midnight blue provides an elegant alternative to traditional black. \
     Pair with patent leather shoes and subtle accessories.",
    "For formal events, consider a floor-length gown in a jewel tone like emerald or sapphire, \
     accessorized with metallic accents.",
    "A sophisticated formal outfit could be a tailored jumpsuit in crepe or velvet, with \
     statement jewelry and heels.",
];

const FORMAL_SUMMARY: &str = "For a formal occasion, choose a well-tailored outfit that fits \
    you perfectly. A classic suit in navy or charcoal, or an elegant dress in a sophisticated \
    color, makes a confident statement. Quality fabrics and subtle accessories elevate the look.";

static CASUAL_SUGGESTIONS: &[&str] = &[
    "For a relaxed casual look, pair well-fitted jeans with a soft t-shirt and layer with an \
     open button-up shirt or light jacket. Finish with clean sneakers or casual boots.",
    "A casual weekend outfit could be chinos in tan or olive, paired with a Henley or polo \
     shirt.",
    "For a casual summer outfit, try linen shorts paired with a short-sleeve button-up in a fun \
     print or solid color.",
];

const CASUAL_SUMMARY: &str = "For a casual everyday look that still feels put-together, start \
    with well-fitted jeans or chinos. Add a quality t-shirt, polo, or casual button-down, layer \
    with a light jacket or cardigan, and finish with clean sneakers or casual boots.";

static BUSINESS_SUGGESTIONS: &[&str] = &[
    "For a professional business look, a navy or charcoal suit with a light-colored dress shirt \
     and a complementary tie creates a trustworthy, competent appearance.",
    "A versatile business outfit is a tailored blazer with coordinating trousers or a pencil \
     skirt, a crisp button-down shirt, and closed-toe shoes.",
    "For a modern business casual approach, try wool or cotton blend trousers with a tucked-in \
     dress shirt and no tie. Add a quality belt and leather shoes.",
];

const BUSINESS_SUMMARY: &str = "For a professional environment, a well-tailored suit in navy, \
    charcoal, or black with a crisp white or light blue shirt is a reliable choice. Make sure \
    your shoes are polished and match your belt.";

static ATHLETIC_SUGGESTIONS: &[&str] = &[
    "For a functional workout outfit, pair moisture-wicking leggings or shorts with a breathable \
     performance t-shirt or tank, and supportive athletic shoes.",
    "A stylish gym outfit could be coordinated compression shorts or leggings with a matching \
     performance top.",
    "For yoga or low-impact exercise, try high-waisted leggings with a fitted tank that won't \
     ride up during movement.",
];

const ATHLETIC_SUMMARY: &str = "For an athletic outfit, start with moisture-wicking bottoms, \
    pair with a breathable top that allows full range of motion, and choose footwear made for \
    your activity.";

static NIGHT_OUT_SUGGESTIONS: &[&str] = &[
    "For a stylish night out, try dark wash jeans paired with a silk or satin top and a tailored \
     blazer. Add heeled boots and some statement jewelry.",
    "A versatile evening outfit could be black jeans or trousers with a bold patterned shirt or \
     a top with metallic accents, layered with a leather jacket.",
    "For a dinner date or upscale bar, consider a midi dress with an interesting texture, paired \
     with ankle boots or heels and a clutch.",
];

const NIGHT_OUT_SUMMARY: &str = "For a night out, pair well-fitted jeans or trousers with a \
    statement top, add a leather jacket or blazer, and finish with footwear comfortable enough \
    for a full evening.";
