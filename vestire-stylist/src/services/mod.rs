//! Recommendation pipeline services
//!
//! Leaves first: intent extraction, closet classification and mood filtering
//! feed the ranker and assembler; the style matcher narrows generator input;
//! the orchestrator sequences all of them into one recommendation. The style
//! advisor answers chat questions alongside the pipeline.

pub mod closet_classifier;
pub mod constraint_filter;
pub mod intent_extractor;
pub mod orchestrator;
pub mod outfit_assembler;
pub mod outfit_ranker;
pub mod style_advisor;
pub mod style_matcher;

pub use closet_classifier::{classify, refine_or_fallback};
pub use constraint_filter::{filter_appropriate, is_allowed, outfit_is_allowed};
pub use intent_extractor::{
    apply_request_hints, detect_request_occasion, extract_intent, query_words,
};
pub use orchestrator::{Orchestrator, Recommendation, RecommendError, RecommendationSource};
pub use outfit_assembler::{synthesize, AssemblyError, SynthesisStrategy};
pub use outfit_ranker::{rank_outfits, score_outfit};
pub use style_advisor::{advise, detect_chat_intent, AdviceTopic, ChatIntent, ChatMessage, ChatRole};
pub use style_matcher::match_items;
