//! Commentary backends
//!
//! [`CommentaryBackend`] is the seam where a hosted text model can replace the
//! local templates. Classification, selection and rendering stay unchanged
//! behind it; [`ResilientBackend`] adds retries, a deadline and a template
//! fallback around any primary backend.

use serde::{Deserialize, Serialize};
use std::thread;
use std::time::{Duration, Instant};

use super::CommentaryEngine;
use crate::config::EngineConfig;
use crate::error::{BackendError, CatalogError};
use crate::models::{CommentaryText, Language, MatchEvent, Tone};

pub const TEMPLATE_MODEL_ID: &str = "template-v1";

/// Text plus the identifier of the model that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: CommentaryText,
    pub model: String,
}

pub trait CommentaryBackend: Send + Sync {
    /// Identifier stored with the ticker entry.
    fn model_id(&self) -> &str;

    fn generate(
        &self,
        event: &MatchEvent,
        tone: Tone,
        language: Language,
    ) -> Result<CommentaryText, BackendError>;

    fn generate_entry(
        &self,
        event: &MatchEvent,
        tone: Tone,
        language: Language,
    ) -> Result<Generated, BackendError> {
        let text = self.generate(event, tone, language)?;
        Ok(Generated { text, model: self.model_id().to_string() })
    }
}

/// The local template engine. Never fails.
#[derive(Debug, Clone)]
pub struct TemplateBackend {
    engine: CommentaryEngine,
}

impl TemplateBackend {
    pub fn new(engine: CommentaryEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &CommentaryEngine {
        &self.engine
    }
}

impl CommentaryBackend for TemplateBackend {
    fn model_id(&self) -> &str {
        TEMPLATE_MODEL_ID
    }

    fn generate(
        &self,
        event: &MatchEvent,
        tone: Tone,
        language: Language,
    ) -> Result<CommentaryText, BackendError> {
        Ok(self.engine.generate(event, tone, language))
    }
}

/// Bounded retry settings for a remote backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Wall-clock budget for all attempts together.
    pub timeout_ms: u64,
    /// Wait before retry `n` is `n * backoff_ms`.
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 2, timeout_ms: 3_000, backoff_ms: 200 }
    }
}

impl RetryPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn backoff(&self, retry: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(retry)))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("retry.timeout_ms must be greater than 0".to_string());
        }
        if self.max_retries > 10 {
            return Err(format!("retry.max_retries must be at most 10, got {}", self.max_retries));
        }
        Ok(())
    }
}

/// Wraps a primary backend; falls back to templates when it gives up.
///
/// Calls are synchronous, so a slow attempt cannot be interrupted. Its result
/// is discarded if it arrives after the deadline.
pub struct ResilientBackend<P> {
    primary: P,
    fallback: TemplateBackend,
    policy: RetryPolicy,
}

impl<P: CommentaryBackend> ResilientBackend<P> {
    pub fn new(primary: P, fallback: TemplateBackend, policy: RetryPolicy) -> Self {
        Self { primary, fallback, policy }
    }

    /// Template fallback and retry policy both taken from `config`.
    pub fn from_config(primary: P, config: &EngineConfig) -> Result<Self, CatalogError> {
        let fallback = TemplateBackend::new(CommentaryEngine::from_config(config)?);
        Ok(Self::new(primary, fallback, config.retry))
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    fn try_primary(
        &self,
        event: &MatchEvent,
        tone: Tone,
        language: Language,
    ) -> Result<CommentaryText, BackendError> {
        let deadline = Instant::now() + self.policy.timeout();
        let mut last_error = BackendError::Timeout;

        for attempt in 0..=self.policy.max_retries {
            if attempt > 0 {
                let wait = self.policy.backoff(attempt);
                if Instant::now() + wait >= deadline {
                    return Err(BackendError::Timeout);
                }
                thread::sleep(wait);
            }

            match self.primary.generate(event, tone, language) {
                Ok(_) if Instant::now() > deadline => return Err(BackendError::Timeout),
                Ok(text) => return Ok(text),
                Err(error) if error.is_retryable() => {
                    tracing::warn!(
                        model = self.primary.model_id(),
                        attempt = attempt + 1,
                        error = %error,
                        "commentary backend attempt failed"
                    );
                    last_error = error;
                }
                Err(error) => return Err(error),
            }
        }
        Err(last_error)
    }
}

impl<P: CommentaryBackend> CommentaryBackend for ResilientBackend<P> {
    fn model_id(&self) -> &str {
        self.primary.model_id()
    }

    fn generate(
        &self,
        event: &MatchEvent,
        tone: Tone,
        language: Language,
    ) -> Result<CommentaryText, BackendError> {
        self.generate_entry(event, tone, language).map(|generated| generated.text)
    }

    fn generate_entry(
        &self,
        event: &MatchEvent,
        tone: Tone,
        language: Language,
    ) -> Result<Generated, BackendError> {
        match self.try_primary(event, tone, language) {
            Ok(text) => Ok(Generated { text, model: self.primary.model_id().to_string() }),
            Err(error) => {
                tracing::warn!(
                    model = self.primary.model_id(),
                    error = %error,
                    "falling back to template commentary"
                );
                self.fallback.generate_entry(event, tone, language)
            }
        }
    }
}
