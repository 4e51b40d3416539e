//! Gemini `generateContent` request and response model.
//!
//! The HTTP call itself belongs to the host; the library only knows how to
//! build the request body and how to unwrap the generated text from the
//! response, so both sides can be tested without a network.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Anything that can turn a prompt into generated text.
///
/// Implementations report transport failures as [`Error::network`] and
/// non-success statuses as [`Error::http`]. An empty but well-formed response
/// is not a failure; see [`extract_text`].
pub trait TextSource: Send + Sync {
    /// Fetch the generated text for a prompt.
    fn fetch_generated_text(&self, prompt: &str) -> Result<String>;
}

impl<T: TextSource + ?Sized> TextSource for std::sync::Arc<T> {
    fn fetch_generated_text(&self, prompt: &str) -> Result<String> {
        (**self).fetch_generated_text(prompt)
    }
}

/// URL of the `generateContent` endpoint for a model, without the API key.
pub fn generate_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

/// Request body for `generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// Single-turn request carrying one text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
        }
    }
}

/// A message made of parts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single message part. Only text parts are used.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response body of `generateContent`, reduced to the fields read here.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> std::result::Result<&str, EmptyReason> {
        let candidate = self.candidates.first().ok_or(EmptyReason::NoCandidates)?;
        candidate
            .content
            .as_ref()
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
            .ok_or(EmptyReason::NoTextPart)
    }
}

/// Why a response carried no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The candidates list was missing or empty.
    NoCandidates,
    /// The first candidate had no text part.
    NoTextPart,
}

impl EmptyReason {
    /// Fixed text shown in place of generated content.
    pub fn placeholder(self) -> &'static str {
        match self {
            EmptyReason::NoCandidates => "Empty response (no candidates).",
            EmptyReason::NoTextPart => "Empty response (no text part).",
        }
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoCandidates => write!(f, "no candidates"),
            EmptyReason::NoTextPart => write!(f, "no text part"),
        }
    }
}

/// Pull the generated text out of a raw response, failing on empty responses.
pub fn try_extract_text(raw: &str) -> Result<String> {
    let response: GenerateResponse =
        serde_json::from_str(raw).map_err(|e| Error::MalformedResponse(e.to_string()))?;
    response
        .first_text()
        .map(|text| text.trim().to_string())
        .map_err(Error::EmptyResponse)
}

/// Pull the generated text out of a raw response.
///
/// Empty responses yield a placeholder string that flows through formatting
/// like any other text; only a body that is not JSON of the expected shape
/// is an error.
pub fn extract_text(raw: &str) -> Result<String> {
    match try_extract_text(raw) {
        Err(Error::EmptyResponse(reason)) => {
            log::warn!("Upstream returned an empty response: {}", reason);
            Ok(reason.placeholder().to_string())
        }
        other => other,
    }
}
