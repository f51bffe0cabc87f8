//! Seeded variant selection
//!
//! Derives a per-event RNG seed from `(seed, event)` so the same event always
//! gets the same phrasing for a given engine seed.
//!
//! FxHasher is used instead of DefaultHasher, whose output is not stable
//! across Rust versions.

use fxhash::FxHasher;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::models::{Language, MatchEvent, Tone};

/// Separates selection seeds from any other use of the same engine seed.
const SELECTION_SALT: u64 = 0x7469_636b_6572_0001;

/// How the engine picks among variants of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionMode {
    /// Fresh entropy per call.
    #[default]
    Entropy,
    /// Reproducible: identical events render identically.
    Seeded { seed: u64 },
}

/// Hash of everything that identifies an event's rendering.
pub fn event_seed(seed: u64, event: &MatchEvent, tone: Tone, language: Language) -> u64 {
    let mut hasher = FxHasher::default();
    SELECTION_SALT.hash(&mut hasher);
    seed.hash(&mut hasher);
    event.kind.hash(&mut hasher);
    event.card.hash(&mut hasher);
    event.minute.hash(&mut hasher);
    event.actor.hash(&mut hasher);
    event.team.hash(&mut hasher);
    tone.hash(&mut hasher);
    language.hash(&mut hasher);
    hasher.finish()
}

impl SelectionMode {
    pub fn rng_for(&self, event: &MatchEvent, tone: Tone, language: Language) -> ChaCha8Rng {
        match *self {
            SelectionMode::Entropy => ChaCha8Rng::from_entropy(),
            SelectionMode::Seeded { seed } => {
                ChaCha8Rng::seed_from_u64(event_seed(seed, event, tone, language))
            }
        }
    }
}
