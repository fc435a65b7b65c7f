//! Prompt text for the text-generation providers

use super::GenerationContext;
use vestire_common::ClothingItem;

/// Number of outfits requested from a provider
pub const REQUESTED_OUTFITS: usize = 3;

/// System prompt sent with Claude-style requests
pub const STYLIST_SYSTEM_PROMPT: &str = "You are a professional fashion stylist. Your task is to \
create outfit combinations from the user's closet that match their specified mood, occasion, and \
season. Base your recommendations only on the clothing items provided.";

fn closet_json(items: &[ClothingItem]) -> String {
    serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
}

/// Preferences paragraph, empty when there are none
fn preferences_block(context: &GenerationContext) -> String {
    if context.preferences.is_empty() {
        return String::new();
    }
    match serde_json::to_string_pretty(&context.preferences) {
        Ok(json) => format!("\nAdditional preferences: {}\n", json),
        Err(_) => String::new(),
    }
}

/// Single-turn prompt for Gemini-style endpoints
pub fn gemini_prompt(context: &GenerationContext) -> String {
    let mood = context.mood_word();
    let query = context.query_text();
    let focus = query.unwrap_or(mood);

    let mut look = String::new();
    if let Some(q) = query {
        look.push_str(q);
        look.push_str(", ");
    }
    look.push_str(mood);
    look.push(' ');
    if let Some(occasion) = context.occasion.as_deref() {
        look.push_str(occasion);
        look.push(' ');
    }
    look.push_str("look");
    if let Some(season) = context.season_word() {
        look.push_str(" in ");
        look.push_str(season);
    }

    format!(
        "Generate {count} outfit recommendations from my closet items for a {look}.\n\
         \n\
         My closet items:\n\
         {items}\n\
         {preferences}\n\
         Rules:\n\
         1. Only use items from the provided list\n\
         2. Create outfits appropriate for the mood and occasion\n\
         3. If a season is specified, choose seasonal appropriate clothing\n\
         4. The outfits MUST match the style query: \"{query}\"\n\
         5. Include a name, items used (by ID), description, and styling tips for each outfit\n\
         6. Make the outfit name and description specifically reference \"{focus}\"\n\
         \n\
         Format your response as a JSON array with {count} outfit objects:\n\
         [{{\n\
         \x20 \"name\": \"outfit name that references {focus}\",\n\
         \x20 \"items\": [\"item1_id\", \"item2_id\"],\n\
         \x20 \"description\": \"why these items work well together and how they fulfill the {focus} request\",\n\
         \x20 \"styling_tips\": \"additional styling suggestions\"\n\
         }},\n\
         ...\n\
         ]",
        count = REQUESTED_OUTFITS,
        look = look,
        items = closet_json(&context.items),
        preferences = preferences_block(context),
        query = query.unwrap_or_default(),
        focus = focus,
    )
}

/// User message for Claude-style endpoints; pairs with [`STYLIST_SYSTEM_PROMPT`]
pub fn claude_user_message(context: &GenerationContext) -> String {
    let mood = context.mood_word();
    let query = context.query_text();
    let focus = query.unwrap_or(mood);

    let mut want = format!("I want to create outfits from my closet that are {}", mood);
    if let Some(occasion) = context.occasion.as_deref() {
        want.push_str(&format!(" for {}", occasion));
    }
    if let Some(season) = context.season_word() {
        want.push_str(&format!(" in {}", season));
    }
    if let Some(q) = query {
        want.push_str(&format!(" that are {}", q));
    }
    want.push('.');

    let (exactly, name_ref, fulfil_ref) = match query {
        Some(q) => (
            "exactly ",
            format!(" and includes reference to \"{}\"", q),
            format!(" and how they fulfill my request for \"{}\"", q),
        ),
        None => ("", String::new(), String::new()),
    };

    format!(
        "{want}\n\
         \n\
         Here are the items in my closet:\n\
         {items}\n\
         {preferences}\n\
         Please create {exactly}{count} different outfit combinations that match my request. For each outfit:\n\
         1. Give it a creative name that reflects the style{name_ref}\n\
         2. List the specific items used from my closet (reference them by their IDs)\n\
         3. Explain why the items work well together{fulfil_ref}\n\
         4. Provide accessory and styling suggestions if applicable\n\
         \n\
         Format your response as a JSON array with {count} outfit objects, each containing:\n\
         - name: the outfit name (must be relevant to {focus})\n\
         - items: array of item IDs used\n\
         - description: why it works well and how it fulfills my request\n\
         - styling_tips: additional styling suggestions\n",
        want = want,
        items = closet_json(&context.items),
        preferences = preferences_block(context),
        exactly = exactly,
        count = REQUESTED_OUTFITS,
        name_ref = name_ref,
        fulfil_ref = fulfil_ref,
        focus = focus,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestire_common::{Mood, Season};

    fn context() -> GenerationContext {
        GenerationContext {
            items: vec![ClothingItem {
                color: "navy".to_string(),
                ..ClothingItem::new("7", "navy blazer")
            }],
            mood: Some(Mood::Business),
            occasion: Some("work".to_string()),
            season: Some(Season::Fall),
            query: Some("interview outfit".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_gemini_prompt_mentions_request() {
        let prompt = gemini_prompt(&context());
        assert!(prompt.starts_with(
            "Generate 3 outfit recommendations from my closet items for a interview outfit, business work look in fall."
        ));
        assert!(prompt.contains("\"id\": \"7\""));
        assert!(prompt.contains("MUST match the style query: \"interview outfit\""));
        assert!(prompt.contains("\"name\": \"outfit name that references interview outfit\""));
    }

    #[test]
    fn test_gemini_prompt_defaults() {
        let prompt = gemini_prompt(&GenerationContext::default());
        assert!(prompt.starts_with(
            "Generate 3 outfit recommendations from my closet items for a casual look."
        ));
        assert!(prompt.contains("style query: \"\""));
        assert!(prompt.contains("specifically reference \"casual\""));
    }

    #[test]
    fn test_preferences_quoted_when_present() {
        let mut context = context();
        assert!(!gemini_prompt(&context).contains("Additional preferences"));

        context
            .preferences
            .insert("fit".to_string(), "relaxed".to_string());
        let prompt = gemini_prompt(&context);
        assert!(prompt.contains("Additional preferences: {\n  \"fit\": \"relaxed\"\n}\n\nRules:"));
        assert!(claude_user_message(&context).contains("\"fit\": \"relaxed\""));
    }

    #[test]
    fn test_claude_message() {
        let message = claude_user_message(&context());
        assert!(message.starts_with(
            "I want to create outfits from my closet that are business for work in fall that are interview outfit."
        ));
        assert!(message.contains("Please create exactly 3 different outfit combinations"));
        assert!(message.contains("includes reference to \"interview outfit\""));

        let plain = claude_user_message(&GenerationContext::default());
        assert!(plain.starts_with("I want to create outfits from my closet that are casual."));
        assert!(plain.contains("Please create 3 different outfit combinations"));
        assert!(plain.contains("must be relevant to casual"));
    }
}
