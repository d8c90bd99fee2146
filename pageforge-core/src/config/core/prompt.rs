use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prompt customisation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptConfig {
    /// Lead-capture guide linked from every page's call to action
    #[serde(default = "default_guide_link")]
    pub guide_link: String,

    /// Replace the bundled system instruction with this file. `{guide_link}`
    /// inside it is still substituted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction_path: Option<PathBuf>,
}

fn default_guide_link() -> String {
    defaults::GUIDE_LINK.to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            guide_link: default_guide_link(),
            system_instruction_path: None,
        }
    }
}
