//! Boundary type for commentary requests coming from the ticker CRUD layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ValidationError;

fn default_style() -> String {
    "neutral".to_string()
}

fn default_language() -> String {
    "de".to_string()
}

/// One raw match-feed event plus the requested style and language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, JsonSchema)]
pub struct CommentaryRequest {
    /// Feed event type: `Goal`, `Card`, `subst`, ...
    pub event_type: String,
    /// Feed event detail: `Normal Goal`, `Yellow Card`, `Red Card`, ...
    #[serde(default)]
    pub event_detail: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 120))]
    pub minute: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub player_name: Option<String>,
    /// Assisting player for goals, outgoing player for substitutions.
    #[serde(default)]
    pub assist_name: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub team_name: Option<String>,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl CommentaryRequest {
    pub fn new(event_type: impl Into<String>, event_detail: impl Into<String>, minute: i64) -> Self {
        Self {
            event_type: event_type.into(),
            event_detail: event_detail.into(),
            minute: Some(minute),
            player_name: None,
            assist_name: None,
            team_name: None,
            style: default_style(),
            language: default_language(),
        }
    }

    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    pub fn assist(mut self, name: impl Into<String>) -> Self {
        self.assist_name = Some(name.into());
        self
    }

    pub fn team(mut self, name: impl Into<String>) -> Self {
        self.team_name = Some(name.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Field-level checks. Kind-specific rules run after classification.
    pub fn check(&self) -> Result<(), ValidationError> {
        let Some(minute) = self.minute else {
            return Err(ValidationError::MissingField { field: "minute" });
        };
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let fields = errors.field_errors();
        if fields.contains_key("minute") {
            return Err(ValidationError::MinuteOutOfRange { minute });
        }
        for field in ["player_name", "team_name"] {
            if fields.contains_key(field) {
                return Err(ValidationError::EmptyName { field });
            }
        }
        Err(ValidationError::Invalid(errors))
    }
}
