//! HTTP API handlers for vestire-stylist
//!
//! Stateless: every request carries the closet and outfits it operates on.

pub mod chat;
pub mod closet;
pub mod health;
pub mod intent;
pub mod recommendations;

pub use chat::chat_routes;
pub use closet::closet_routes;
pub use health::health_routes;
pub use intent::intent_routes;
pub use recommendations::recommendation_routes;

use crate::error::ApiResult;
use vestire_common::Mood;

/// Optional mood field from a request body; blank means none
pub(crate) fn parse_mood(mood: Option<&str>) -> ApiResult<Option<Mood>> {
    match mood.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => Ok(Some(m.parse()?)),
        None => Ok(None),
    }
}
