//! JSON API
//!
//! String-in/string-out entry points for the ticker persistence layer. The
//! response carries the resolved metadata the caller stores next to the text.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::commentary::{normalize, CommentaryBackend};
use crate::error::Result;
use crate::models::{CommentaryRequest, Language, Tone};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommentaryResponse {
    pub text: String,
    pub minute: u8,
    /// Resolved tone, after any downgrade to neutral.
    pub style: Tone,
    /// Resolved language, after any fallback to `de`.
    pub language: Language,
    /// Identifier of the model that produced `text`.
    pub model: String,
}

pub fn generate_response(
    backend: &dyn CommentaryBackend,
    request: &CommentaryRequest,
) -> Result<CommentaryResponse> {
    let event = normalize(request)?;
    let style = Tone::resolve(&request.style);
    let language = Language::resolve(&request.language);

    let generated = backend.generate_entry(&event, style, language)?;
    Ok(CommentaryResponse {
        text: generated.text.text,
        minute: event.minute,
        style,
        language,
        model: generated.model,
    })
}

/// Parses a [`CommentaryRequest`] and returns a [`CommentaryResponse`] as JSON.
pub fn generate_commentary_json(backend: &dyn CommentaryBackend, request_json: &str) -> Result<String> {
    let request: CommentaryRequest = serde_json::from_str(request_json)?;
    let response = generate_response(backend, &request)?;
    Ok(serde_json::to_string(&response)?)
}

/// JSON schema of the request body.
pub fn request_schema_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&schema_for!(CommentaryRequest))?)
}
