pub mod event;
pub mod request;

pub use event::{
    CardColor, CommentaryText, EventKind, Language, MatchEvent, TemplateKey, Tone, MAX_MINUTE,
    NO_ASSIST_SENTINEL,
};
pub use request::CommentaryRequest;
