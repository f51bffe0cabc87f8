//! Event classification
//!
//! Maps the match feed's free-form type/detail strings onto [`EventKind`].
//! Matching is exact and case-sensitive, like the feed vocabulary itself:
//!
//! | raw type | raw detail    | kind           | card   |
//! |----------|---------------|----------------|--------|
//! | `Goal`   | any           | `Goal`         | -      |
//! | `Card`   | `Yellow Card` | `Card`         | Yellow |
//! | `Card`   | anything else | `Card`         | Red    |
//! | `subst`  | any           | `Substitution` | -      |
//! | other    | any           | `Other`        | -      |

use crate::error::ValidationError;
use crate::models::{CardColor, CommentaryRequest, EventKind, MatchEvent};

pub const RAW_GOAL: &str = "Goal";
pub const RAW_CARD: &str = "Card";
pub const RAW_SUBSTITUTION: &str = "subst";
pub const RAW_YELLOW_CARD: &str = "Yellow Card";

/// Total over all inputs: unknown types become [`EventKind::Other`].
pub fn classify(raw_type: &str, _raw_detail: &str) -> EventKind {
    match raw_type {
        RAW_GOAL => EventKind::Goal,
        RAW_CARD => EventKind::Card,
        RAW_SUBSTITUTION => EventKind::Substitution,
        _ => EventKind::Other,
    }
}

/// Only the exact yellow literal is yellow; second yellows and straight reds
/// share the red-card phrasing.
pub fn card_color(raw_detail: &str) -> CardColor {
    if raw_detail == RAW_YELLOW_CARD {
        CardColor::Yellow
    } else {
        CardColor::Red
    }
}

/// Validates a request and turns it into a classified [`MatchEvent`].
pub fn normalize(request: &CommentaryRequest) -> Result<MatchEvent, ValidationError> {
    request.check()?;

    let kind = classify(&request.event_type, &request.event_detail);
    let card = (kind == EventKind::Card).then(|| card_color(&request.event_detail));

    let raw_minute = request.minute.ok_or(ValidationError::MissingField { field: "minute" })?;
    let minute = u8::try_from(raw_minute)
        .map_err(|_| ValidationError::MinuteOutOfRange { minute: raw_minute })?;

    let event = MatchEvent {
        kind,
        card,
        raw_kind: request.event_type.clone(),
        detail: request.event_detail.clone(),
        minute,
        actor: request.player_name.clone(),
        assist: request.assist_name.clone(),
        team: request.team_name.clone(),
    };
    event.validate()?;

    tracing::trace!(kind = %kind, card = ?card, minute, "classified feed event");
    Ok(event)
}
