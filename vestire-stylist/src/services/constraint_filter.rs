//! Mood-based appropriateness rules
//!
//! An item is forbidden when its category contains a key from
//! `INAPPROPRIATE_COMBINATIONS` and the active mood is in that key's
//! forbidden set. With no mood, everything is allowed.

use vestire_common::taxonomy;
use vestire_common::{ClothingItem, Mood};

/// True when the item may be worn under the mood
pub fn is_allowed(item: &ClothingItem, mood: Option<Mood>) -> bool {
    let Some(mood) = mood else {
        return true;
    };
    let category = item.category.to_lowercase();
    let forbidden = taxonomy::forbidden_moods(&category).any(|m| m == mood);
    !forbidden
}

/// Items allowed under the mood, in input order
pub fn filter_appropriate<'a, I>(items: I, mood: Option<Mood>) -> Vec<&'a ClothingItem>
where
    I: IntoIterator<Item = &'a ClothingItem>,
{
    items.into_iter().filter(|item| is_allowed(item, mood)).collect()
}

/// Whole-outfit check: every item must be allowed
///
/// Used on generator output, where a single offending item rejects the
/// entire outfit.
pub fn outfit_is_allowed(items: &[&ClothingItem], mood: Option<Mood>) -> bool {
    items.iter().all(|item| is_allowed(item, mood))
}
