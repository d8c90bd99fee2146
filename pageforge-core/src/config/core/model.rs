use crate::config::constants::{env_vars, models, urls};
use serde::{Deserialize, Serialize};

/// Model selection and request shaping
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Gemini model ID
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// API key stored in the config file (environment takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Ground responses with Google Search
    #[serde(default = "default_true")]
    pub enable_web_search: bool,

    /// Sampling temperature; the model default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

fn default_model() -> String {
    models::google::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    env_vars::GEMINI_API_KEY.to_string()
}

fn default_base_url() -> String {
    urls::GEMINI_API_BASE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            api_key: None,
            base_url: default_base_url(),
            enable_web_search: default_true(),
            temperature: None,
        }
    }
}

impl ModelConfig {
    pub fn is_known_model(&self) -> bool {
        models::google::SUPPORTED_MODELS.contains(&self.model.as_str())
    }
}
