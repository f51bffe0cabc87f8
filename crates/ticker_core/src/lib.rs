//! # ticker_core - Live-Ticker Commentary Engine
//!
//! Turns football match-feed events (goals, cards, substitutions) into short
//! commentary lines for a live ticker, in one of three tones and four
//! languages.
//!
//! ## Features
//! - Template catalogs for German, English, Spanish and Japanese
//! - Tone pools with a neutral and then a generic fallback, so every event gets a line
//! - Seeded selection for reproducible output (same seed = same text)
//! - JSON API for the ticker persistence layer

// generate_commentary mirrors the feed's fields one by one
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod commentary;
pub mod config;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{generate_commentary_json, generate_response, request_schema_json, CommentaryResponse};
pub use commentary::{
    generate_commentary, CommentaryBackend, CommentaryEngine, ResilientBackend, SelectionMode,
    TemplateBackend,
};
pub use config::EngineConfig;
pub use error::{BackendError, CatalogError, CommentaryError, Result, ValidationError};
pub use models::{
    CardColor, CommentaryRequest, CommentaryText, EventKind, Language, MatchEvent, Tone,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_single_call_entry_point() {
        let engine = CommentaryEngine::embedded(SelectionMode::Seeded { seed: 1 }).unwrap();
        let text = generate_commentary(
            &engine,
            "Goal",
            "Normal Goal",
            23,
            Some("Müller"),
            Some("Kimmich"),
            Some("Bayern"),
            "neutral",
            "de",
        )
        .unwrap();
        assert!(text.contains("Müller"));
        assert!(text.contains("23"));
        assert!(text.ends_with("Vorlage: Kimmich."));
    }
}
