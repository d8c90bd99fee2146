//! Streaming processor for server-sent events from the Gemini API
//!
//! The processor reads raw body bytes, splits them into SSE lines, assembles
//! `data:` payloads into events, and hands every text fragment found in an
//! event's candidates to a callback as soon as the event is complete.

use crate::gemini::models::{GenerateContentResponse, PromptFeedback};
use crate::gemini::streaming::{StreamSummary, StreamingError, StreamingMetrics};
use futures::stream::{Stream, StreamExt};
use serde_json::Value;
use std::fmt::Display;
use std::time::Instant;
use tokio::time::{Duration, timeout};
use tracing::{debug, warn};

/// Configuration for the streaming processor
#[derive(Debug, Clone)]
pub struct StreamingConfig {
    /// Timeout for reading each chunk after the first
    pub chunk_timeout: Duration,
    /// Maximum time to wait for the first chunk
    pub first_chunk_timeout: Duration,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_timeout: Duration::from_secs(30),
            first_chunk_timeout: Duration::from_secs(90),
        }
    }
}

/// Streaming processor for handling real-time responses from the Gemini API
pub struct StreamingProcessor {
    config: StreamingConfig,
    metrics: StreamingMetrics,
    current_event_data: String,
    finish_reason: Option<String>,
    usage_metadata: Option<Value>,
}

impl StreamingProcessor {
    /// Create a new streaming processor with default configuration
    pub fn new() -> Self {
        Self::with_config(StreamingConfig::default())
    }

    /// Create a new streaming processor with custom configuration
    pub fn with_config(config: StreamingConfig) -> Self {
        Self {
            config,
            metrics: StreamingMetrics::default(),
            current_event_data: String::new(),
            finish_reason: None,
            usage_metadata: None,
        }
    }

    /// Consume a body stream, calling `on_chunk` for every non-empty text
    /// fragment in arrival order.
    ///
    /// Returns once the body ends. An empty body is a successful, empty
    /// response. Any read failure, timeout, malformed event, or in-band
    /// error object ends processing with an error; fragments delivered
    /// before that point stay delivered.
    pub async fn process_stream<S, B, E, F>(
        &mut self,
        mut stream: S,
        mut on_chunk: F,
    ) -> Result<StreamSummary, StreamingError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: Display,
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        self.metrics = StreamingMetrics {
            request_start_time: Some(Instant::now()),
            ..StreamingMetrics::default()
        };
        self.current_event_data.clear();
        self.finish_reason = None;
        self.usage_metadata = None;

        let mut buffer: Vec<u8> = Vec::new();

        loop {
            let (operation, limit) = if self.metrics.first_chunk_time.is_none() {
                ("first_chunk", self.config.first_chunk_timeout)
            } else {
                ("chunk", self.config.chunk_timeout)
            };

            let next = match timeout(limit, stream.next()).await {
                Ok(next) => next,
                Err(_) => {
                    self.metrics.error_count += 1;
                    return Err(StreamingError::TimeoutError {
                        operation: operation.to_string(),
                        duration: limit,
                    });
                }
            };

            let bytes = match next {
                Some(Ok(bytes)) => bytes,
                Some(Err(e)) => {
                    self.metrics.error_count += 1;
                    return Err(StreamingError::NetworkError {
                        message: format!("Failed to read chunk: {e}"),
                    });
                }
                None => break,
            };

            let bytes = bytes.as_ref();
            if self.metrics.first_chunk_time.is_none() {
                self.metrics.first_chunk_time = Some(Instant::now());
            }
            self.metrics.total_chunks += 1;
            self.metrics.total_bytes += bytes.len();

            buffer.extend_from_slice(bytes);
            self.process_buffer(&mut buffer, &mut on_chunk)?;
        }

        self.process_remaining_buffer(&mut buffer, &mut on_chunk)?;

        if self.metrics.text_fragments == 0 {
            if let Some(reason) = self.finish_reason.as_deref().filter(|r| *r != "STOP") {
                self.metrics.error_count += 1;
                return Err(StreamingError::NoContent {
                    reason: format!("finish reason {reason}"),
                });
            }
            debug!("stream ended without any text");
        }

        Ok(StreamSummary {
            finish_reason: self.finish_reason.take(),
            usage_metadata: self.usage_metadata.take(),
            metrics: self.metrics.clone(),
        })
    }

    /// Handle every complete line in the buffer, keeping the partial tail.
    ///
    /// Lines are cut at `\n` before decoding, so a multi-byte character split
    /// across two network reads is decoded whole.
    fn process_buffer<F>(&mut self, buffer: &mut Vec<u8>, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        let mut processed = 0;

        while let Some(newline_pos) = buffer[processed..].iter().position(|&b| b == b'\n') {
            let line_end = processed + newline_pos;
            let line = String::from_utf8_lossy(&buffer[processed..line_end]).into_owned();
            processed = line_end + 1;

            self.handle_line(&line, on_chunk)?;
        }

        if processed > 0 {
            buffer.drain(..processed);
        }

        Ok(())
    }

    /// Process any remaining data in the buffer after streaming is complete
    fn process_remaining_buffer<F>(
        &mut self,
        buffer: &mut Vec<u8>,
        on_chunk: &mut F,
    ) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        if !buffer.is_empty() {
            let remaining = String::from_utf8_lossy(buffer).into_owned();
            buffer.clear();
            if !remaining.trim().is_empty() {
                self.handle_line(&remaining, on_chunk)?;
            }
        }

        self.finalize_current_event(on_chunk)
    }

    /// Handle a single SSE line
    fn handle_line<F>(&mut self, raw_line: &str, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        let line = raw_line.trim_end_matches('\r');

        if line.is_empty() {
            return self.finalize_current_event(on_chunk);
        }

        let trimmed = line.trim();

        if trimmed.is_empty()
            || trimmed.starts_with(':')
            || trimmed.starts_with("event:")
            || trimmed.starts_with("id:")
            || trimmed.starts_with("retry:")
        {
            return Ok(());
        }

        if let Some(data) = trimmed.strip_prefix("data:") {
            let data_segment = data.trim_start();
            if data_segment == "[DONE]" {
                return self.finalize_current_event(on_chunk);
            }

            if !data_segment.is_empty() {
                if !self.current_event_data.is_empty() {
                    self.current_event_data.push('\n');
                }
                self.current_event_data.push_str(data_segment);
            }
            return Ok(());
        }

        // Bare JSON, as sent without `alt=sse`.
        if self.current_event_data.is_empty() && (trimmed.starts_with('{') || trimmed.starts_with('[')) {
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                return self.process_event_value(value, on_chunk);
            }
        }

        if !self.current_event_data.is_empty() {
            self.current_event_data.push('\n');
        }
        self.current_event_data.push_str(trimmed);

        Ok(())
    }

    fn finalize_current_event<F>(&mut self, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        if self.current_event_data.trim().is_empty() {
            self.current_event_data.clear();
            return Ok(());
        }

        let event_data = std::mem::take(&mut self.current_event_data);
        let parsed: Value = serde_json::from_str(event_data.trim()).map_err(|parse_err| {
            self.metrics.error_count += 1;
            StreamingError::ParseError {
                message: format!("Failed to parse streaming JSON: {parse_err}"),
                raw_response: event_data.clone(),
            }
        })?;

        self.process_event_value(parsed, on_chunk)
    }

    fn process_event_value<F>(&mut self, value: Value, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.process_event_value(item, on_chunk)?;
                }
                Ok(())
            }
            Value::Object(map) => {
                if let Some(error_value) = map.get("error") {
                    self.metrics.error_count += 1;
                    return Err(api_error_from_value(error_value));
                }

                let response: GenerateContentResponse =
                    serde_json::from_value(Value::Object(map)).map_err(|err| {
                        StreamingError::ParseError {
                            message: format!("Failed to parse candidate: {err}"),
                            raw_response: String::new(),
                        }
                    })?;

                if let Some(reason) = response
                    .prompt_feedback
                    .as_ref()
                    .and_then(PromptFeedback::blocked_reason)
                {
                    self.metrics.error_count += 1;
                    return Err(StreamingError::NoContent { reason });
                }

                if response.usage_metadata.is_some() {
                    self.usage_metadata = response.usage_metadata;
                }

                for candidate in response.candidates {
                    if let Some(content) = &candidate.content {
                        for text in content.texts() {
                            self.emit(text, on_chunk)?;
                        }
                    }
                    if let Some(reason) = candidate.finish_reason {
                        if reason != "STOP" {
                            warn!(finish_reason = %reason, "model stopped early");
                        }
                        self.finish_reason = Some(reason);
                    }
                }

                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn emit<F>(&mut self, text: &str, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        // Whitespace-only fragments still carry the line structure of the page.
        if text.is_empty() {
            return Ok(());
        }
        self.metrics.text_fragments += 1;
        on_chunk(text)
    }

    /// Get current streaming metrics
    pub fn metrics(&self) -> &StreamingMetrics {
        &self.metrics
    }
}

impl Default for StreamingProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an [`StreamingError::ApiError`] from a Gemini `error` object.
pub(crate) fn api_error_from_value(error_value: &Value) -> StreamingError {
    let message = error_value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Gemini streaming error")
        .to_string();
    let code = error_value
        .get("code")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .unwrap_or(500);
    StreamingError::ApiError {
        status_code: code,
        message,
    }
}
