//! Community input record submitted by the shell.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the user told us about the community.
///
/// Exactly one variant is active per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "input_type", rename_all = "snake_case")]
pub enum InputRecord {
    /// Name and location only; the model researches the rest.
    Details {
        community_name: String,
        city: String,
        state: String,
    },
    /// Free-form source material the model mines for facts.
    SourceText { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

impl InputRecord {
    pub fn details(
        community_name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self::Details {
            community_name: community_name.into(),
            city: city.into(),
            state: state.into(),
        }
    }

    pub fn source_text(text: impl Into<String>) -> Self {
        Self::SourceText { text: text.into() }
    }

    /// Check that every required field of the active variant is filled in.
    pub fn validate(&self) -> Result<(), InputError> {
        match self {
            Self::Details {
                community_name,
                city,
                state,
            } => {
                require("community name", community_name)?;
                require("city", city)?;
                require("state", state)
            }
            Self::SourceText { text } => require("source text", text),
        }
    }

    /// Short human label used in logs and status lines.
    pub fn summary(&self) -> String {
        match self {
            Self::Details {
                community_name,
                city,
                state,
            } => format!("{community_name}, {city}, {state}"),
            Self::SourceText { text } => format!("source text ({} chars)", text.chars().count()),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), InputError> {
    if value.trim().is_empty() {
        Err(InputError::MissingField(field))
    } else {
        Ok(())
    }
}
