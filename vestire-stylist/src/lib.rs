//! vestire-stylist library interface
//!
//! Exposes the recommendation pipeline, generator adapters and HTTP router
//! for the binary and for integration tests.

pub mod api;
pub mod error;
pub mod generator;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use vestire_common::config::{GeneratorProvider, TomlConfig};

use crate::generator::HttpGenerator;
use crate::services::Orchestrator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<TomlConfig>,
    /// Recommendation pipeline, generator included
    pub orchestrator: Orchestrator,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Build state from configuration, wiring in the HTTP generator when a
    /// provider and API key are configured
    pub fn new(config: TomlConfig) -> Self {
        let mut orchestrator = Orchestrator::new(config.recommendation.clone());

        let generator_config = &config.generator;
        if generator_config.is_usable() {
            match HttpGenerator::from_config(generator_config) {
                Ok(generator) => {
                    tracing::info!(
                        provider = %generator_config.provider,
                        timeout_ms = generator_config.timeout_ms,
                        "Outfit generator enabled"
                    );
                    orchestrator = orchestrator.with_generator(
                        Arc::new(generator),
                        Duration::from_millis(generator_config.timeout_ms),
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Outfit generator unavailable, using assembly only");
                }
            }
        } else if generator_config.provider != GeneratorProvider::Disabled {
            tracing::info!(
                provider = %generator_config.provider,
                "No API key configured, using assembly only"
            );
        }

        Self::with_orchestrator(config, orchestrator)
    }

    /// Build state around an existing orchestrator
    pub fn with_orchestrator(config: TomlConfig, orchestrator: Orchestrator) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator,
            startup_time: Utc::now(),
        }
    }

    /// Generator name for diagnostics
    pub fn generator_name(&self) -> String {
        self.orchestrator
            .generator_name()
            .unwrap_or(GeneratorProvider::Disabled.as_str())
            .to_string()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::intent_routes())
        .merge(api::closet_routes())
        .merge(api::recommendation_routes())
        .merge(api::chat_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
