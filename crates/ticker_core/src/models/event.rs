use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use unic_langid::LanguageIdentifier;

use crate::error::ValidationError;

/// Assist value the match feed sends when nobody assisted.
pub const NO_ASSIST_SENTINEL: &str = "null";

/// Latest minute accepted, extra time included.
pub const MAX_MINUTE: u8 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    Card,
    Substitution,
    Other,
}

impl EventKind {
    /// Kinds whose narration names a player.
    pub fn requires_actor(self) -> bool {
        !matches!(self, EventKind::Other)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Goal => "goal",
            EventKind::Card => "card",
            EventKind::Substitution => "substitution",
            EventKind::Other => "other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum CardColor {
    Yellow,
    Red,
}

/// Rhetorical register of the commentary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    #[serde(alias = "euphorisch")]
    Euphoric,
    #[serde(alias = "kritisch")]
    Critical,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Neutral, Tone::Euphoric, Tone::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Euphoric => "euphoric",
            Tone::Critical => "critical",
        }
    }

    /// Accepts English labels and the stored ticker style vocabulary.
    pub fn parse(value: &str) -> Option<Tone> {
        match value.trim().to_ascii_lowercase().as_str() {
            "neutral" => Some(Tone::Neutral),
            "euphoric" | "euphorisch" => Some(Tone::Euphoric),
            "critical" | "kritisch" => Some(Tone::Critical),
            _ => None,
        }
    }

    /// Like [`Tone::parse`], but unknown styles downgrade to neutral.
    pub fn resolve(value: &str) -> Tone {
        Tone::parse(value).unwrap_or_else(|| {
            tracing::warn!(style = value, "unknown commentary style, using neutral");
            Tone::Neutral
        })
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Languages with their own template catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    De,
    En,
    Es,
    Ja,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::De, Language::En, Language::Es, Language::Ja];

    pub fn code(self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Es => "es",
            Language::Ja => "ja",
        }
    }

    fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Negotiates a requested language tag (`en`, `en-US`, `ja_JP`) against
    /// the supported set.
    pub fn parse(value: &str) -> Option<Language> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("und") {
            return None;
        }
        let requested: LanguageIdentifier = value.parse().ok()?;
        let available: Vec<LanguageIdentifier> =
            Language::ALL.iter().filter_map(|lang| lang.code().parse().ok()).collect();

        let negotiated = negotiate_languages(
            &[requested],
            &available,
            None,
            NegotiationStrategy::Filtering,
        );

        negotiated.first().and_then(|lang| Language::from_code(&lang.to_string()))
    }

    /// Like [`Language::parse`], but unsupported codes fall back to German.
    pub fn resolve(value: &str) -> Language {
        Language::parse(value).unwrap_or_else(|| {
            tracing::debug!(language = value, "unsupported language, using de");
            Language::De
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Catalog key without tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    pub kind: EventKind,
    pub card: Option<CardColor>,
}

impl TemplateKey {
    /// Keys the catalog must cover.
    pub const SUPPORTED: [TemplateKey; 4] = [
        TemplateKey { kind: EventKind::Goal, card: None },
        TemplateKey { kind: EventKind::Card, card: Some(CardColor::Yellow) },
        TemplateKey { kind: EventKind::Card, card: Some(CardColor::Red) },
        TemplateKey { kind: EventKind::Substitution, card: None },
    ];

    pub fn new(kind: EventKind, card: Option<CardColor>) -> Self {
        Self { kind, card }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.card {
            Some(CardColor::Yellow) => write!(f, "{}/yellow", self.kind),
            Some(CardColor::Red) => write!(f, "{}/red", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// A classified match event, ready for template selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchEvent {
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardColor>,
    /// Raw feed type, kept for the generic fallback text.
    pub raw_kind: String,
    pub detail: String,
    pub minute: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl MatchEvent {
    pub fn key(&self) -> TemplateKey {
        TemplateKey::new(self.kind, self.card)
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_assist(mut self, assist: impl Into<String>) -> Self {
        self.assist = Some(assist.into());
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// The assisting player, unless absent, blank or the feed's sentinel.
    pub fn credited_assist(&self) -> Option<&str> {
        self.assist
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty() && *name != NO_ASSIST_SENTINEL)
    }

    /// Structural checks for events built directly in code.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.minute > MAX_MINUTE {
            return Err(ValidationError::MinuteOutOfRange { minute: i64::from(self.minute) });
        }
        for (field, value) in [("player_name", &self.actor), ("team_name", &self.team)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ValidationError::EmptyName { field });
            }
        }
        if self.kind.requires_actor() && self.actor.is_none() {
            return Err(ValidationError::MissingActor { kind: self.kind });
        }
        Ok(())
    }
}

/// Generated commentary, handed back to the caller for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryText {
    pub text: String,
}

impl CommentaryText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for CommentaryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> MatchEvent {
        MatchEvent {
            kind: EventKind::Goal,
            card: None,
            raw_kind: "Goal".to_string(),
            detail: "Normal Goal".to_string(),
            minute: 23,
            actor: Some("Müller".to_string()),
            assist: None,
            team: Some("Bayern".to_string()),
        }
    }

    #[test]
    fn test_tone_parsing() {
        assert_eq!(Tone::parse("neutral"), Some(Tone::Neutral));
        assert_eq!(Tone::parse(" Euphorisch "), Some(Tone::Euphoric));
        assert_eq!(Tone::parse("kritisch"), Some(Tone::Critical));
        assert_eq!(Tone::parse("CRITICAL"), Some(Tone::Critical));
        assert_eq!(Tone::parse("sarcastic"), None);
        assert_eq!(Tone::resolve("sarcastic"), Tone::Neutral);
    }

    #[test]
    fn test_tone_serde_accepts_stored_style() {
        let tone: Tone = serde_json::from_str("\"kritisch\"").unwrap();
        assert_eq!(tone, Tone::Critical);
        assert_eq!(serde_json::to_string(&Tone::Euphoric).unwrap(), "\"euphoric\"");
    }

    #[test]
    fn test_language_negotiation() {
        assert_eq!(Language::parse("de"), Some(Language::De));
        assert_eq!(Language::parse("en-US"), Some(Language::En));
        assert_eq!(Language::parse("ja-JP"), Some(Language::Ja));
        assert_eq!(Language::parse("es"), Some(Language::Es));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::parse(""), None);
        assert_eq!(Language::resolve("fr"), Language::De);
    }

    #[test]
    fn test_credited_assist_filters_sentinel() {
        assert_eq!(goal().with_assist("Kimmich").credited_assist(), Some("Kimmich"));
        assert_eq!(goal().with_assist("null").credited_assist(), None);
        assert_eq!(goal().with_assist("  ").credited_assist(), None);
        assert_eq!(goal().credited_assist(), None);
    }

    #[test]
    fn test_event_validation() {
        assert!(goal().validate().is_ok());

        let late = MatchEvent { minute: 121, ..goal() };
        assert_eq!(late.validate(), Err(ValidationError::MinuteOutOfRange { minute: 121 }));

        let anonymous = MatchEvent { actor: None, ..goal() };
        assert_eq!(
            anonymous.validate(),
            Err(ValidationError::MissingActor { kind: EventKind::Goal })
        );

        let blank = goal().with_actor(" ");
        assert_eq!(blank.validate(), Err(ValidationError::EmptyName { field: "player_name" }));

        let other = MatchEvent { kind: EventKind::Other, actor: None, ..goal() };
        assert!(other.validate().is_ok());
    }

    #[test]
    fn test_template_key_display() {
        assert_eq!(TemplateKey::SUPPORTED[1].to_string(), "card/yellow");
        assert_eq!(TemplateKey::new(EventKind::Goal, None).to_string(), "goal");
    }
}
