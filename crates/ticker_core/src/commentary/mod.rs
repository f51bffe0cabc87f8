//! Commentary Engine
//!
//! Turns match-feed events into live-ticker text:
//! raw event → [`classifier`] → [`selector`] → [`render`] → [`CommentaryText`].
//!
//! The engine is an immutable value built once from an [`EngineConfig`] and
//! handed to callers. It holds no interior state, so it can be shared across
//! threads and called concurrently without locking.

pub mod backend;
pub mod catalog;
pub mod classifier;
pub mod deterministic;
pub mod render;
pub mod selector;


pub use backend::{CommentaryBackend, Generated, ResilientBackend, RetryPolicy, TemplateBackend};
pub use catalog::{Catalog, CatalogSet, TemplateEntry};
pub use classifier::{classify, normalize};
pub use deterministic::SelectionMode;
pub use selector::{select, Selection, SelectionSource};

use rand::Rng;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{CatalogError, ValidationError};
use crate::models::{CommentaryRequest, CommentaryText, Language, MatchEvent, Tone};

/// Local, template-based commentary generator.
#[derive(Debug, Clone)]
pub struct CommentaryEngine {
    catalogs: Arc<CatalogSet>,
    selection: SelectionMode,
}

impl CommentaryEngine {
    pub fn new(catalogs: Arc<CatalogSet>, selection: SelectionMode) -> Self {
        Self { catalogs, selection }
    }

    /// Engine over the compiled-in catalogs.
    pub fn embedded(selection: SelectionMode) -> Result<Self, CatalogError> {
        Ok(Self::new(Arc::new(CatalogSet::embedded()?), selection))
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, CatalogError> {
        let catalogs = match &config.catalog_dir {
            Some(dir) => CatalogSet::load_from_dir(dir)?,
            None => CatalogSet::embedded()?,
        };
        Ok(Self::new(Arc::new(catalogs), config.selection))
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    pub fn selection(&self) -> SelectionMode {
        self.selection
    }

    /// Renders a classified event using the engine's selection mode.
    pub fn generate(&self, event: &MatchEvent, tone: Tone, language: Language) -> CommentaryText {
        let mut rng = self.selection.rng_for(event, tone, language);
        self.generate_with_rng(event, tone, language, &mut rng)
    }

    /// Renders a classified event with a caller-supplied RNG.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        event: &MatchEvent,
        tone: Tone,
        language: Language,
        rng: &mut R,
    ) -> CommentaryText {
        let catalog = self.catalogs.get(language);
        let selection = select(catalog, event.key(), tone, rng);
        let text = render::render(selection.entry, event, tone, catalog);

        tracing::debug!(
            kind = %event.kind,
            minute = event.minute,
            tone = %tone,
            language = %language,
            source = ?selection.source,
            "generated commentary"
        );
        text
    }

    /// Validates, classifies and renders a raw request.
    pub fn commentary(&self, request: &CommentaryRequest) -> Result<CommentaryText, ValidationError> {
        let event = normalize(request)?;
        let tone = Tone::resolve(&request.style);
        let language = Language::resolve(&request.language);
        Ok(self.generate(&event, tone, language))
    }
}

/// Single-call entry point for the ticker persistence layer.
///
/// `tone` falls back to neutral and `language` to German when unrecognized.
/// Malformed input (minute outside 0-120, blank names, a missing player for
/// goals, cards and substitutions) is rejected before any text is produced.
pub fn generate_commentary(
    engine: &CommentaryEngine,
    event_kind: &str,
    event_detail: &str,
    minute: i64,
    actor: Option<&str>,
    assist: Option<&str>,
    team: Option<&str>,
    tone: &str,
    language: &str,
) -> Result<String, ValidationError> {
    let request = CommentaryRequest {
        event_type: event_kind.to_string(),
        event_detail: event_detail.to_string(),
        minute: Some(minute),
        player_name: actor.map(str::to_string),
        assist_name: assist.map(str::to_string),
        team_name: team.map(str::to_string),
        style: tone.to_string(),
        language: language.to_string(),
    };
    engine.commentary(&request).map(|text| text.text)
}
