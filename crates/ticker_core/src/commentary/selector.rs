//! Template selection
//!
//! Fallback chain, most specific first:
//! 1. pool for `(kind, card, tone)`
//! 2. pool for `(kind, card, Neutral)`
//! 3. the catalog's generic entry
//!
//! The chain is total, so selection never fails.

use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::{Catalog, TemplateEntry};
use crate::models::{TemplateKey, Tone};

/// Which step of the fallback chain produced the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    TonePool,
    NeutralPool,
    Generic,
}

#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub entry: &'a TemplateEntry,
    pub source: SelectionSource,
}

/// Picks one variant uniformly at random from the best available pool.
pub fn select<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    key: TemplateKey,
    tone: Tone,
    rng: &mut R,
) -> Selection<'a> {
    if let Some(entry) = catalog.pool(key, tone).choose(rng) {
        return Selection { entry, source: SelectionSource::TonePool };
    }

    if tone != Tone::Neutral {
        if let Some(entry) = catalog.pool(key, Tone::Neutral).choose(rng) {
            tracing::debug!(
                language = %catalog.language(),
                key = %key,
                tone = %tone,
                "no tone pool, using neutral variants"
            );
            return Selection { entry, source: SelectionSource::NeutralPool };
        }
    }

    tracing::debug!(language = %catalog.language(), key = %key, "no pool, using generic template");
    Selection { entry: catalog.generic(), source: SelectionSource::Generic }
}
