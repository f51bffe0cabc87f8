//! Template catalog
//!
//! One catalog per language, embedded at compile time with `include_str!` and
//! optionally replaced from a directory of `<code>.yaml` files. Catalogs are
//! validated once at load and are read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::render::{placeholders, PLACEHOLDERS};
use crate::error::CatalogError;
use crate::models::{CardColor, EventKind, Language, TemplateKey, Tone};

pub const CATALOG_DE: &str = include_str!("../../data/catalog/de.yaml");
pub const CATALOG_EN: &str = include_str!("../../data/catalog/en.yaml");
pub const CATALOG_ES: &str = include_str!("../../data/catalog/es.yaml");
pub const CATALOG_JA: &str = include_str!("../../data/catalog/ja.yaml");

fn embedded_source(language: Language) -> &'static str {
    match language {
        Language::De => CATALOG_DE,
        Language::En => CATALOG_EN,
        Language::Es => CATALOG_ES,
        Language::Ja => CATALOG_JA,
    }
}

/// One phrasing variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardColor>,
    pub tone: Tone,
    pub body: String,
}

impl TemplateEntry {
    pub fn key(&self) -> TemplateKey {
        TemplateKey::new(self.kind, self.card)
    }
}

/// Assist credit appended to goal commentary. Missing tones use `neutral`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistClauses {
    pub neutral: String,
    #[serde(default)]
    pub euphoric: Option<String>,
    #[serde(default)]
    pub critical: Option<String>,
}

/// On-disk layout of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub language: Language,
    pub generic: String,
    pub unknown_player: String,
    pub unknown_team: String,
    pub assist_clauses: AssistClauses,
    pub templates: Vec<TemplateEntry>,
}

/// Variant pools of a single language.
#[derive(Debug, Clone)]
pub struct Catalog {
    language: Language,
    pools: HashMap<(TemplateKey, Tone), Vec<TemplateEntry>>,
    generic: TemplateEntry,
    unknown_player: String,
    unknown_team: String,
    assist_clauses: AssistClauses,
}

impl Catalog {
    pub fn parse(expected: Language, source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(source)?;
        Self::from_file(expected, file)
    }

    pub fn from_file(expected: Language, file: CatalogFile) -> Result<Self, CatalogError> {
        let language = expected.code().to_string();
        if file.language != expected {
            return Err(CatalogError::LanguageMismatch {
                found: file.language.code().to_string(),
                expected: language,
            });
        }

        for (field, value) in [
            ("generic", &file.generic),
            ("unknown_player", &file.unknown_player),
            ("unknown_team", &file.unknown_team),
            ("assist_clauses.neutral", &file.assist_clauses.neutral),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::EmptyField { language, field });
            }
        }

        let clauses = [
            Some(&file.assist_clauses.neutral),
            file.assist_clauses.euphoric.as_ref(),
            file.assist_clauses.critical.as_ref(),
        ];
        for body in clauses.into_iter().flatten().chain(std::iter::once(&file.generic)) {
            check_placeholders(&language, body)?;
        }

        let mut pools: HashMap<(TemplateKey, Tone), Vec<TemplateEntry>> = HashMap::new();
        for entry in file.templates {
            check_placeholders(&language, &entry.body)?;
            if entry.body.trim().is_empty() {
                return Err(CatalogError::EmptyField { language, field: "template body" });
            }
            if (entry.kind == EventKind::Card) != entry.card.is_some() {
                return Err(CatalogError::MalformedEntry { language, body: entry.body });
            }
            pools.entry((entry.key(), entry.tone)).or_default().push(entry);
        }

        let catalog = Self {
            language: expected,
            pools,
            generic: TemplateEntry {
                kind: EventKind::Other,
                card: None,
                tone: Tone::Neutral,
                body: file.generic,
            },
            unknown_player: file.unknown_player,
            unknown_team: file.unknown_team,
            assist_clauses: file.assist_clauses,
        };
        catalog.check_coverage()?;
        Ok(catalog)
    }

    /// Every supported key needs a neutral pool; yellow cards vary by tone,
    /// red cards must not.
    fn check_coverage(&self) -> Result<(), CatalogError> {
        let language = self.language.code().to_string();

        for key in TemplateKey::SUPPORTED {
            if self.pool(key, Tone::Neutral).is_empty() {
                return Err(CatalogError::MissingNeutralPool { language, key: key.to_string() });
            }
        }

        let yellow = TemplateKey::new(EventKind::Card, Some(CardColor::Yellow));
        let red = TemplateKey::new(EventKind::Card, Some(CardColor::Red));
        for tone in [Tone::Euphoric, Tone::Critical] {
            if self.pool(yellow, tone).is_empty() {
                return Err(CatalogError::MissingTonePool {
                    language,
                    key: yellow.to_string(),
                    tone: tone.to_string(),
                });
            }
            if !self.pool(red, tone).is_empty() {
                return Err(CatalogError::UnexpectedTonePool {
                    language,
                    key: red.to_string(),
                    tone: tone.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The variant pool for a key and tone; empty when none is defined.
    pub fn pool(&self, key: TemplateKey, tone: Tone) -> &[TemplateEntry] {
        self.pools.get(&(key, tone)).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn generic(&self) -> &TemplateEntry {
        &self.generic
    }

    pub fn unknown_player(&self) -> &str {
        &self.unknown_player
    }

    pub fn unknown_team(&self) -> &str {
        &self.unknown_team
    }

    pub fn assist_clause(&self, tone: Tone) -> &str {
        let specific = match tone {
            Tone::Neutral => None,
            Tone::Euphoric => self.assist_clauses.euphoric.as_deref(),
            Tone::Critical => self.assist_clauses.critical.as_deref(),
        };
        specific.unwrap_or(&self.assist_clauses.neutral)
    }

    pub fn template_count(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }
}

fn check_placeholders(language: &str, body: &str) -> Result<(), CatalogError> {
    match placeholders(body).find(|name| !PLACEHOLDERS.contains(name)) {
        Some(unknown) => Err(CatalogError::UnknownPlaceholder {
            language: language.to_string(),
            placeholder: unknown.to_string(),
            body: body.to_string(),
        }),
        None => Ok(()),
    }
}

/// Catalogs for every supported language.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    de: Catalog,
    en: Catalog,
    es: Catalog,
    ja: Catalog,
}

impl CatalogSet {
    /// Catalogs compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        let load = |language| Catalog::parse(language, embedded_source(language));
        Ok(Self {
            de: load(Language::De)?,
            en: load(Language::En)?,
            es: load(Language::Es)?,
            ja: load(Language::Ja)?,
        })
    }

    /// Embedded catalogs, with any `<code>.yaml` in `dir` taking precedence.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut set = Self::embedded()?;
        for language in Language::ALL {
            let path = dir.join(format!("{}.yaml", language.code()));
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let catalog = Catalog::parse(language, &content)?;
                tracing::info!(
                    language = %language,
                    path = %path.display(),
                    templates = catalog.template_count(),
                    "loaded catalog override"
                );
                *set.slot_mut(language) = catalog;
            }
        }
        Ok(set)
    }

    pub fn get(&self, language: Language) -> &Catalog {
        match language {
            Language::De => &self.de,
            Language::En => &self.en,
            Language::Es => &self.es,
            Language::Ja => &self.ja,
        }
    }

    fn slot_mut(&mut self, language: Language) -> &mut Catalog {
        match language {
            Language::De => &mut self.de,
            Language::En => &mut self.en,
            Language::Es => &mut self.es,
            Language::Ja => &mut self.ja,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use strum::IntoEnumIterator;

    const MINIMAL: &str = r#"
language: en
generic: "{minute}': {kind} - {detail}"
unknown_player: "a player"
unknown_team: "the team"
assist_clauses:
  neutral: " Assist: {assist_name}."
templates:
  - { kind: goal, tone: neutral, body: "Goal by {player_name}." }
  - { kind: card, card: yellow, tone: neutral, body: "Yellow for {player_name}." }
  - { kind: card, card: yellow, tone: euphoric, body: "Yellow for {player_name}!" }
  - { kind: card, card: yellow, tone: critical, body: "Yellow for {player_name}, deserved." }
  - { kind: card, card: red, tone: neutral, body: "Red for {player_name}." }
  - { kind: substitution, tone: neutral, body: "{player_name} on for {assist_name}." }
"#;

    #[test]
    fn test_embedded_catalogs_load() {
        let set = CatalogSet::embedded().unwrap();
        for language in Language::iter() {
            let catalog = set.get(language);
            assert_eq!(catalog.language(), language);
            assert!(catalog.template_count() > 10, "{} catalog too small", language);
        }
    }

    #[test]
    fn test_embedded_coverage() {
        let set = CatalogSet::embedded().unwrap();
        for language in Language::iter() {
            let catalog = set.get(language);
            for key in TemplateKey::SUPPORTED {
                assert!(!catalog.pool(key, Tone::Neutral).is_empty(), "{language}: {key}");
            }
            let goal = TemplateKey::new(EventKind::Goal, None);
            for tone in Tone::iter() {
                assert!(catalog.pool(goal, tone).len() >= 2, "{language}: goal/{tone}");
            }
        }
    }

    #[test]
    fn test_minimal_catalog() {
        let catalog = Catalog::parse(Language::En, MINIMAL).unwrap();
        assert_eq!(catalog.template_count(), 6);
        assert_eq!(catalog.assist_clause(Tone::Critical), " Assist: {assist_name}.");
        assert!(catalog.pool(TemplateKey::new(EventKind::Goal, None), Tone::Euphoric).is_empty());
    }

    #[test]
    fn test_language_mismatch() {
        let err = Catalog::parse(Language::De, MINIMAL).unwrap_err();
        assert!(matches!(err, CatalogError::LanguageMismatch { .. }));
    }

    #[test]
    fn test_missing_neutral_pool() {
        let source = MINIMAL.replace(
            "  - { kind: substitution, tone: neutral, body: \"{player_name} on for {assist_name}.\" }\n",
            "",
        );
        let err = Catalog::parse(Language::En, &source).unwrap_err();
        assert!(matches!(err, CatalogError::MissingNeutralPool { ref key, .. } if key == "substitution"));
    }

    #[test]
    fn test_red_card_must_be_tone_invariant() {
        let source = format!(
            "{MINIMAL}  - {{ kind: card, card: red, tone: euphoric, body: \"Red!\" }}\n"
        );
        let err = Catalog::parse(Language::En, &source).unwrap_err();
        assert!(matches!(err, CatalogError::UnexpectedTonePool { .. }));
    }

    #[test]
    fn test_yellow_card_needs_every_tone() {
        let source = MINIMAL.replace(
            "  - { kind: card, card: yellow, tone: critical, body: \"Yellow for {player_name}, deserved.\" }\n",
            "",
        );
        let err = Catalog::parse(Language::En, &source).unwrap_err();
        assert!(matches!(err, CatalogError::MissingTonePool { .. }));
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let source = format!("{MINIMAL}  - {{ kind: goal, tone: critical, body: \"{{score}}\" }}\n");
        let err = Catalog::parse(Language::En, &source).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownPlaceholder { ref placeholder, .. } if placeholder == "score"));
    }

    #[test]
    fn test_card_color_on_goal_rejected() {
        let source = format!(
            "{MINIMAL}  - {{ kind: goal, card: red, tone: critical, body: \"Goal.\" }}\n"
        );
        let err = Catalog::parse(Language::En, &source).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedEntry { .. }));
    }

    #[test]
    fn test_load_from_dir_overrides_one_language() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("en.yaml")).unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let set = CatalogSet::load_from_dir(dir.path()).unwrap();
        assert_eq!(set.get(Language::En).template_count(), 6);
        assert!(set.get(Language::De).template_count() > 6);
    }

    #[test]
    fn test_override_lands_in_its_own_slot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ja.yaml"), MINIMAL.replace("language: en", "language: ja")).unwrap();

        let set = CatalogSet::load_from_dir(dir.path()).unwrap();
        assert_eq!(set.get(Language::Ja).template_count(), 6);
        assert_eq!(set.get(Language::Ja).language(), Language::Ja);
        for language in [Language::De, Language::En, Language::Es] {
            assert_eq!(set.get(language).language(), language);
            assert!(set.get(language).template_count() > 6);
        }
    }

    #[test]
    fn test_load_from_dir_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("es.yaml"), "language: [").unwrap();
        let err = CatalogSet::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
