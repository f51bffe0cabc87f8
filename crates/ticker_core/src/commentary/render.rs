//! Placeholder substitution and the assist clause.

use super::catalog::{Catalog, TemplateEntry};
use crate::models::{CommentaryText, EventKind, MatchEvent, Tone};

pub const PLACEHOLDERS: &[&str] =
    &["minute", "player_name", "team_name", "assist_name", "kind", "detail"];

/// Yields every `{name}` in a template body, in order.
pub fn placeholders(body: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = body;
    std::iter::from_fn(move || {
        let open = rest.find('{')?;
        let after = &rest[open + 1..];
        let close = after.find('}')?;
        let name = &after[..close];
        rest = &after[close + 1..];
        Some(name)
    })
}

/// Values available to a template, resolved once per event.
struct Fields<'a> {
    minute: String,
    player_name: &'a str,
    team_name: &'a str,
    assist_name: &'a str,
    kind: &'a str,
    detail: &'a str,
}

impl<'a> Fields<'a> {
    fn new(event: &'a MatchEvent, catalog: &'a Catalog) -> Self {
        Self {
            minute: event.minute.to_string(),
            player_name: event.actor.as_deref().unwrap_or(catalog.unknown_player()),
            team_name: event.team.as_deref().unwrap_or(catalog.unknown_team()),
            assist_name: event.credited_assist().unwrap_or(catalog.unknown_player()),
            kind: &event.raw_kind,
            detail: &event.detail,
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        match name {
            "minute" => Some(&self.minute),
            "player_name" => Some(self.player_name),
            "team_name" => Some(self.team_name),
            "assist_name" => Some(self.assist_name),
            "kind" => Some(self.kind),
            "detail" => Some(self.detail),
            _ => None,
        }
    }
}

fn substitute(body: &str, fields: &Fields<'_>) -> String {
    let mut out = String::with_capacity(body.len() + 32);
    let mut rest = body;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match fields.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Renders the selected template, then appends the assist credit for goals.
pub fn render(
    template: &TemplateEntry,
    event: &MatchEvent,
    tone: Tone,
    catalog: &Catalog,
) -> CommentaryText {
    let fields = Fields::new(event, catalog);
    let mut text = substitute(&template.body, &fields);

    if event.kind == EventKind::Goal {
        if event.credited_assist().is_some() {
            text.push_str(&substitute(catalog.assist_clause(tone), &fields));
        }
    }

    CommentaryText::new(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::catalog::CatalogSet;
    use crate::models::{CardColor, Language};

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

    fn entry(body: &str) -> TemplateEntry {
        TemplateEntry {
            kind: EventKind::Goal,
            card: None,
            tone: Tone::Neutral,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_placeholder_scan() {
        let names: Vec<&str> = placeholders("{minute}. Minute: {kind} - {detail}").collect();
        assert_eq!(names, vec!["minute", "kind", "detail"]);
        assert_eq!(placeholders("no placeholders").count(), 0);
        assert_eq!(placeholders("dangling {minute").count(), 0);
    }

    #[test]
    fn test_substitution() {
        let set = CatalogSet::embedded().unwrap();
        let catalog = set.get(Language::De);
        let text = render(&entry("{minute}: {player_name} ({team_name})"), &goal(), Tone::Neutral, catalog);
        assert_eq!(text.as_str(), "23: Müller (Bayern)");
    }

    #[test]
    fn test_unknown_placeholder_kept_verbatim() {
        let set = CatalogSet::embedded().unwrap();
        let text = render(&entry("{score} {minute"), &goal(), Tone::Neutral, set.get(Language::De));
        assert_eq!(text.as_str(), "{score} {minute");
    }

    #[test]
    fn test_assist_clause_only_when_credited() {
        let set = CatalogSet::embedded().unwrap();
        let catalog = set.get(Language::De);
        let template = entry("Tor durch {player_name}.");

        let with_assist = render(&template, &goal().with_assist("Kimmich"), Tone::Neutral, catalog);
        assert_eq!(with_assist.as_str(), "Tor durch Müller. Vorlage: Kimmich.");

        let sentinel = render(&template, &goal().with_assist("null"), Tone::Neutral, catalog);
        assert_eq!(sentinel.as_str(), "Tor durch Müller.");

        let absent = render(&template, &goal(), Tone::Neutral, catalog);
        assert_eq!(absent.as_str(), "Tor durch Müller.");
    }

    #[test]
    fn test_assist_clause_varies_by_tone() {
        let set = CatalogSet::embedded().unwrap();
        let catalog = set.get(Language::De);
        let template = entry("Tor.");
        let event = goal().with_assist("Kimmich");

        let neutral = render(&template, &event, Tone::Neutral, catalog);
        let euphoric = render(&template, &event, Tone::Euphoric, catalog);
        let critical = render(&template, &event, Tone::Critical, catalog);

        assert!(euphoric.as_str().ends_with('!'));
        assert_ne!(neutral, euphoric);
        assert_ne!(neutral, critical);
        for text in [neutral, euphoric, critical] {
            assert!(text.as_str().contains("Kimmich"));
        }
    }

    #[test]
    fn test_no_assist_clause_for_cards() {
        let set = CatalogSet::embedded().unwrap();
        let event = MatchEvent {
            kind: EventKind::Card,
            card: Some(CardColor::Yellow),
            raw_kind: "Card".to_string(),
            detail: "Yellow Card".to_string(),
            ..goal()
        }
        .with_assist("Kimmich");
        let text = render(&entry("Gelb für {player_name}."), &event, Tone::Neutral, set.get(Language::De));
        assert_eq!(text.as_str(), "Gelb für Müller.");
    }

    #[test]
    fn test_missing_team_uses_catalog_word() {
        let set = CatalogSet::embedded().unwrap();
        let catalog = set.get(Language::En);
        let event = MatchEvent { team: None, ..goal() };
        let text = render(&entry("Goal for {team_name}"), &event, Tone::Neutral, catalog);
        assert_eq!(text.as_str(), format!("Goal for {}", catalog.unknown_team()));
    }
}
