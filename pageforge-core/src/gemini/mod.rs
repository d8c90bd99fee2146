//! Gemini API client
//!
//! HTTP client configuration, API models, and the server-sent-events
//! streaming processor used to receive generated text fragment by fragment.

pub mod client;
pub mod models;
pub mod streaming;

pub use client::{Client, ClientConfig};
pub use models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    Tool,
};
pub use streaming::{
    StreamSummary, StreamingConfig, StreamingError, StreamingMetrics, StreamingProcessor,
};
