//! Closet classification into clothing-type buckets

use vestire_common::taxonomy::CLOTHING_TYPE_KEYWORDS;
use vestire_common::{ClassifiedCloset, ClothingItem};

/// Group items into the six clothing-type buckets
///
/// An item joins every bucket whose keywords appear in its category or
/// description, so one item can sit in several buckets (a blazer is both a
/// top and outerwear). Items matching nothing are left out.
pub fn classify<'a, I>(items: I) -> ClassifiedCloset
where
    I: IntoIterator<Item = &'a ClothingItem>,
{
    let mut closet = ClassifiedCloset::new();
    let mut unmatched = 0usize;

    for item in items {
        let mut matched = false;
        for (bucket, keywords) in CLOTHING_TYPE_KEYWORDS.iter() {
            if item.mentions_any(keywords) {
                closet.push(*bucket, item.clone());
                matched = true;
            }
        }
        if !matched {
            unmatched += 1;
        }
    }

    if unmatched > 0 {
        tracing::debug!(unmatched, "Items matched no clothing-type bucket");
    }

    closet
}

/// Narrow a bucket to items mentioning any keyword
///
/// Falls back to the whole bucket when nothing matches or when no keywords
/// are given.
pub fn refine_or_fallback<'a, I>(bucket: I, keywords: &[&str]) -> Vec<&'a ClothingItem>
where
    I: IntoIterator<Item = &'a ClothingItem>,
{
    let bucket: Vec<&ClothingItem> = bucket.into_iter().collect();
    if !keywords.is_empty() {
        let refined: Vec<&ClothingItem> = bucket
            .iter()
            .copied()
            .filter(|item| item.mentions_any(keywords))
            .collect();
        if !refined.is_empty() {
            return refined;
        }
    }
    bucket
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestire_common::ClothingType;

    fn item(id: &str, category: &str) -> ClothingItem {
        ClothingItem::new(id, category)
    }

    #[test]
    fn test_membership_is_non_exclusive() {
        let items = vec![item("1", "Navy Blazer"), item("2", "jeans")];
        let closet = classify(&items);

        assert_eq!(closet.bucket(ClothingType::Tops).len(), 1);
        assert_eq!(closet.bucket(ClothingType::Outerwear).len(), 1);
        assert_eq!(closet.bucket(ClothingType::Bottoms).len(), 1);
        assert!(closet.bucket(ClothingType::Dresses).is_empty());
    }

    #[test]
    fn test_description_counts() {
        let items = vec![item("1", "misc").with_description("a silk slip dress")];
        let closet = classify(&items);
        assert_eq!(closet.bucket(ClothingType::Dresses)[0].id, "1");
    }

    #[test]
    fn test_unmatched_items_are_dropped() {
        let items = vec![item("1", "miscellaneous"), item("2", "accessory")];
        assert!(classify(&items).is_empty());
    }

    #[test]
    fn test_flatten_keeps_every_matched_item() {
        let items = vec![
            item("1", "t-shirt"),
            item("2", "cardigan"),
            item("3", "ankle boots"),
            item("4", "lace bra"),
            item("5", "umbrella"),
        ];
        let closet = classify(&items);
        let flattened: Vec<&str> = closet.flatten().iter().map(|i| i.id.as_str()).collect();

        for id in ["1", "2", "3", "4"] {
            assert!(flattened.contains(&id), "item {} lost", id);
        }
        assert!(!flattened.contains(&"5"));
    }

    #[test]
    fn test_refine_or_fallback() {
        let shoes = vec![item("1", "sneakers"), item("2", "oxford shoes")];

        let refined = refine_or_fallback(&shoes, &["oxford", "loafer"]);
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].id, "2");

        let fallback = refine_or_fallback(&shoes, &["stiletto"]);
        assert_eq!(fallback.len(), 2);

        let unrefined = refine_or_fallback(&shoes, &[]);
        assert_eq!(unrefined.len(), 2);

        assert!(refine_or_fallback(&Vec::<ClothingItem>::new(), &["heel"]).is_empty());
    }
}
