use super::Content;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One streamed (or complete) `generateContent` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default, rename = "usageMetadata")]
    pub usage_metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: Option<usize>,
}

/// Set when the prompt itself was rejected; no candidates follow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub block_reason_message: Option<String>,
}

impl PromptFeedback {
    /// Human-readable reason, if the prompt was blocked.
    pub fn blocked_reason(&self) -> Option<String> {
        let reason = self.block_reason.as_deref()?;
        Some(match self.block_reason_message.as_deref() {
            Some(message) => format!("prompt blocked ({reason}): {message}"),
            None => format!("prompt blocked ({reason})"),
        })
    }
}
