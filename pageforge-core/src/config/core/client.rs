use crate::config::constants::defaults;
use crate::gemini::{ClientConfig, StreamingConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP and streaming timeouts, in seconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpClientConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Longest wait for the first streamed event (web search happens here)
    #[serde(default = "default_first_chunk_timeout")]
    pub first_chunk_timeout_secs: u64,

    /// Longest silence tolerated between later events
    #[serde(default = "default_chunk_timeout")]
    pub chunk_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_request_timeout() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}
fn default_connect_timeout() -> u64 {
    defaults::CONNECT_TIMEOUT_SECS
}
fn default_first_chunk_timeout() -> u64 {
    defaults::FIRST_CHUNK_TIMEOUT_SECS
}
fn default_chunk_timeout() -> u64 {
    defaults::CHUNK_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    defaults::USER_AGENT.to_string()
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            first_chunk_timeout_secs: default_first_chunk_timeout(),
            chunk_timeout_secs: default_chunk_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClientConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            user_agent: self.user_agent.clone(),
            ..ClientConfig::default()
        }
    }

    pub fn streaming_config(&self) -> StreamingConfig {
        StreamingConfig {
            first_chunk_timeout: Duration::from_secs(self.first_chunk_timeout_secs),
            chunk_timeout: Duration::from_secs(self.chunk_timeout_secs),
        }
    }
}
