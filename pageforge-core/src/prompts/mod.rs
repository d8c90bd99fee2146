//! Prompt construction for community page generation

pub mod context;
pub mod system;

pub use context::user_context;
pub use system::{GUIDE_LINK_PLACEHOLDER, system_instruction};

use crate::config::core::PromptConfig;
use crate::input::InputRecord;
use anyhow::{Context, Result};
use std::fs;

/// Everything the model needs for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub system_instruction: String,
    pub user_context: String,
    pub web_search: bool,
}

/// Turns an [`InputRecord`] into a [`PromptRequest`].
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_instruction: String,
    web_search: bool,
}

impl PromptBuilder {
    /// Builder with the bundled instruction and the given guide link.
    pub fn new(guide_link: &str, web_search: bool) -> Self {
        Self {
            system_instruction: system_instruction(guide_link),
            web_search,
        }
    }

    /// Builder honouring a custom instruction file, if one is configured.
    pub fn from_config(config: &PromptConfig, web_search: bool) -> Result<Self> {
        let Some(path) = &config.system_instruction_path else {
            return Ok(Self::new(&config.guide_link, web_search));
        };

        let template = fs::read_to_string(path).with_context(|| {
            format!("Failed to read system instruction: {}", path.display())
        })?;
        Ok(Self {
            system_instruction: system::fill_template(&template, &config.guide_link),
            web_search,
        })
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn build(&self, input: &InputRecord) -> PromptRequest {
        PromptRequest {
            system_instruction: self.system_instruction.clone(),
            user_context: user_context(input),
            web_search: self.web_search,
        }
    }
}
