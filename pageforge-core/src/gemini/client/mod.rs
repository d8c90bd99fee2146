pub mod config;

pub use config::ClientConfig;

use crate::config::constants::urls;
use crate::gateway::ContentSource;
use crate::gemini::models::{Content, GenerateContentRequest, GenerationConfig, Tool};
use crate::gemini::streaming::{StreamSummary, StreamingConfig, StreamingError, StreamingProcessor};
use crate::prompts::PromptRequest;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Streaming client for the Gemini `generateContent` API.
///
/// Each call opens its own stream; the client holds no per-request state and
/// can be shared between independent requests.
#[derive(Clone)]
pub struct Client {
    api_key: String,
    model: String,
    base_url: String,
    http: ReqwestClient,
    config: ClientConfig,
    streaming_config: StreamingConfig,
    generation_config: Option<GenerationConfig>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::with_config(api_key, model, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(api_key: String, model: String, config: ClientConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .tcp_keepalive(config.tcp_keepalive)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            model,
            base_url: urls::GEMINI_API_BASE.to_string(),
            http: http_client,
            config,
            streaming_config: StreamingConfig::default(),
            generation_config: None,
        })
    }

    /// Point the client at another API root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_streaming_config(mut self, streaming_config: StreamingConfig) -> Self {
        self.streaming_config = streaming_config;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.generation_config = temperature.map(|temperature| GenerationConfig {
            temperature: Some(temperature),
        });
        self
    }

    /// Get current client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        )
    }

    fn headers(&self) -> Result<HeaderMap, StreamingError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&self.api_key).map_err(|_| StreamingError::ApiError {
            status_code: 401,
            message: "API key contains characters that cannot be sent in a header".to_string(),
        })?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        Ok(headers)
    }

    /// Shape a prompt into a Gemini request body.
    pub fn build_request(&self, prompt: &PromptRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user_text(prompt.user_context.clone())],
            tools: prompt.web_search.then(|| vec![Tool::google_search()]),
            system_instruction: Some(Content::instruction(prompt.system_instruction.clone())),
            generation_config: self.generation_config.clone(),
        }
    }

    /// Generate content with the Gemini API using streaming
    pub async fn generate_stream<F>(
        &self,
        request: &GenerateContentRequest,
        on_chunk: F,
    ) -> Result<StreamSummary, StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        debug!(model = %self.model, "opening Gemini stream");

        let response = self
            .http
            .post(self.stream_url())
            .headers(self.headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| StreamingError::NetworkError {
                message: format!("Failed to send request: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(http_error(status.as_u16(), &error_text));
        }

        let mut processor = StreamingProcessor::with_config(self.streaming_config.clone());
        let stream = Box::pin(response.bytes_stream());
        let summary = processor.process_stream(stream, on_chunk).await?;

        debug!(
            fragments = summary.metrics.text_fragments,
            bytes = summary.metrics.total_bytes,
            first_chunk_ms = summary
                .metrics
                .first_chunk_latency()
                .map(|latency| latency.as_millis() as u64),
            finish_reason = summary.finish_reason.as_deref().unwrap_or("none"),
            "Gemini stream finished"
        );

        Ok(summary)
    }
}

#[async_trait]
impl ContentSource for Client {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn stream_content(
        &self,
        prompt: &PromptRequest,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<StreamSummary, StreamingError> {
        let request = self.build_request(prompt);
        self.generate_stream(&request, |text| {
            on_chunk(text);
            Ok(())
        })
        .await
    }
}

/// Turn a non-success response into an error, preferring the API's own
/// message when the body is a Gemini error object.
fn http_error(status_code: u16, body: &str) -> StreamingError {
    let api_message = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        value
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    let message = api_message.unwrap_or_else(|| match body.trim() {
        "" => "empty error response".to_string(),
        trimmed => trimmed.to_string(),
    });

    StreamingError::ApiError {
        status_code,
        message,
    }
}
