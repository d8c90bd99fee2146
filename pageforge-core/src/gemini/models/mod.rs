pub mod request;
pub mod response;

pub use request::{GenerateContentRequest, GenerationConfig};
pub use response::{Candidate, GenerateContentResponse, PromptFeedback};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Content {
            role: Some("user".into()),
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// Role-less content, the shape `systemInstruction` expects.
    pub fn instruction(text: impl Into<String>) -> Self {
        Content {
            role: None,
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// Text of every text part, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(Part::as_text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    /// Parts we do not render (inline data, executable code, ...).
    Other(Value),
}

impl Part {
    /// Get the text content if this is a Text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::Other(_) => None,
        }
    }
}

/// A tool made available to the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tool {
    #[serde(
        default,
        rename = "googleSearch",
        skip_serializing_if = "Option::is_none"
    )]
    pub google_search: Option<GoogleSearch>,
}

impl Tool {
    /// Grounding with Google Search.
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch::default()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleSearch {}
