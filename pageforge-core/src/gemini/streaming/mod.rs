pub mod errors;
pub mod processor;

pub use errors::StreamingError;
pub use processor::{StreamingConfig, StreamingProcessor};

use serde_json::Value;
use std::time::{Duration, Instant};

/// Streaming metrics for monitoring and debugging
#[derive(Debug, Clone, Default)]
pub struct StreamingMetrics {
    pub request_start_time: Option<Instant>,
    pub first_chunk_time: Option<Instant>,
    /// Network reads
    pub total_chunks: usize,
    pub total_bytes: usize,
    /// Non-empty text fragments handed to the callback
    pub text_fragments: usize,
    pub error_count: usize,
}

impl StreamingMetrics {
    pub fn first_chunk_latency(&self) -> Option<Duration> {
        match (self.request_start_time, self.first_chunk_time) {
            (Some(start), Some(first)) => Some(first.saturating_duration_since(start)),
            _ => None,
        }
    }
}

/// What is known about a stream once it has been fully consumed
#[derive(Debug, Clone, Default)]
pub struct StreamSummary {
    pub finish_reason: Option<String>,
    pub usage_metadata: Option<Value>,
    pub metrics: StreamingMetrics,
}
