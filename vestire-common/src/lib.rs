//! # Vestire Common Library
//!
//! Shared code for the Vestire style services including:
//! - Wardrobe data model (clothing items, outfits, style intents)
//! - Style taxonomy keyword tables
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod models;
pub mod taxonomy;

pub use error::{Error, Result};
pub use models::{
    ClassifiedCloset, ClothingItem, ClothingType, Mood, Outfit, OutfitSource, ScoredOutfit,
    Season, StyleIntent, StyleTag, Weather,
};
