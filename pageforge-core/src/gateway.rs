//! Content request gateway.
//!
//! Turns an [`InputRecord`] into a prompt, opens one stream against a
//! [`ContentSource`] and forwards every non-empty text fragment to the caller
//! in arrival order. The gateway keeps no state between calls.

use crate::gemini::{StreamSummary, StreamingError};
use crate::input::{InputError, InputRecord};
use crate::prompts::{PromptBuilder, PromptRequest};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A generative model that can stream text for a prompt.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Stream the response for `request`, calling `on_chunk` for each text
    /// fragment as it arrives. Resolves once the stream is exhausted.
    async fn stream_content(
        &self,
        request: &PromptRequest,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<StreamSummary, StreamingError>;
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    #[error("Failed to generate content from Gemini API: {0}")]
    Generation(#[source] StreamingError),
}

pub struct ContentGateway<S> {
    source: S,
    prompt: PromptBuilder,
}

impl<S: ContentSource> ContentGateway<S> {
    pub fn new(source: S, prompt: PromptBuilder) -> Self {
        Self { source, prompt }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generate content for `input`.
    ///
    /// `on_chunk` runs once per non-empty fragment, synchronously and in the
    /// order the model produced them. Fragments delivered before a failure
    /// are not taken back.
    pub async fn generate<F>(
        &self,
        input: &InputRecord,
        mut on_chunk: F,
    ) -> Result<StreamSummary, GatewayError>
    where
        F: FnMut(&str) + Send,
    {
        input.validate()?;
        let request = self.prompt.build(input);

        info!(
            source = self.source.name(),
            input = %input.summary(),
            web_search = request.web_search,
            "requesting community page"
        );

        let mut forward = |text: &str| {
            if !text.is_empty() {
                on_chunk(text);
            }
        };

        match self.source.stream_content(&request, &mut forward).await {
            Ok(summary) => {
                debug!(
                    fragments = summary.metrics.text_fragments,
                    finish_reason = summary.finish_reason.as_deref().unwrap_or("none"),
                    "generation finished"
                );
                Ok(summary)
            }
            Err(err) => {
                warn!(source = self.source.name(), error = %err, "generation failed");
                Err(GatewayError::Generation(err))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gemini::StreamingMetrics;
    use std::sync::Mutex;

    /// Replays a fixed list of fragments, then optionally fails.
    pub(crate) struct ScriptedSource {
        pub fragments: Vec<String>,
        pub failure: Option<StreamingError>,
        pub seen: Mutex<Vec<PromptRequest>>,
    }

    impl ScriptedSource {
        pub fn new(fragments: &[&str]) -> Self {
            Self {
                fragments: fragments.iter().map(|f| f.to_string()).collect(),
                failure: None,
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_after(fragments: &[&str], failure: StreamingError) -> Self {
            Self {
                failure: Some(failure),
                ..Self::new(fragments)
            }
        }
    }

    #[async_trait]
    impl ContentSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn stream_content(
            &self,
            request: &PromptRequest,
            on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
        ) -> Result<StreamSummary, StreamingError> {
            self.seen.lock().unwrap().push(request.clone());
            for fragment in &self.fragments {
                tokio::task::yield_now().await;
                on_chunk(fragment);
            }
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(StreamSummary {
                    finish_reason: Some("STOP".to_string()),
                    usage_metadata: None,
                    metrics: StreamingMetrics::default(),
                }),
            }
        }
    }

    fn gateway(source: ScriptedSource) -> ContentGateway<ScriptedSource> {
        ContentGateway::new(source, PromptBuilder::new("https://guide.example", true))
    }

    #[tokio::test]
    async fn forwards_non_empty_fragments_in_order() {
        let gateway = gateway(ScriptedSource::new(&["# Title", "", "\n", "Body"]));
        let mut received = Vec::new();

        gateway
            .generate(&InputRecord::details("Willow Creek", "Austin", "TX"), |text| {
                received.push(text.to_string())
            })
            .await
            .unwrap();

        assert_eq!(received, vec!["# Title", "\n", "Body"]);
    }

    #[tokio::test]
    async fn builds_prompt_from_input() {
        let gateway = gateway(ScriptedSource::new(&[]));
        gateway
            .generate(&InputRecord::source_text("Lakeside homes in Reno"), |_| {})
            .await
            .unwrap();

        let seen = gateway.source().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].web_search);
        assert!(seen[0].system_instruction.contains("https://guide.example"));
        assert!(seen[0].user_context.contains("Lakeside homes in Reno"));
    }

    #[tokio::test]
    async fn empty_stream_is_success() {
        let gateway = gateway(ScriptedSource::new(&[]));
        let mut calls = 0;
        let result = gateway
            .generate(&InputRecord::details("A", "B", "C"), |_| calls += 1)
            .await;
        assert!(result.is_ok());
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_source() {
        let gateway = gateway(ScriptedSource::new(&["never"]));
        let err = gateway
            .generate(&InputRecord::details("A", "", "C"), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidInput(_)));
        assert_eq!(err.to_string(), "city is required");
        assert!(gateway.source().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_keeps_delivered_fragments_and_is_descriptive() {
        let gateway = gateway(ScriptedSource::failing_after(
            &["partial "],
            StreamingError::ApiError {
                status_code: 429,
                message: "Resource has been exhausted".to_string(),
            },
        ));
        let mut received = String::new();

        let err = gateway
            .generate(&InputRecord::details("A", "B", "C"), |text| {
                received.push_str(text)
            })
            .await
            .unwrap_err();

        assert_eq!(received, "partial ");
        assert_eq!(
            err.to_string(),
            "Failed to generate content from Gemini API: API error (429): Resource has been exhausted"
        );
    }

    #[tokio::test]
    async fn repeated_calls_are_independent() {
        let gateway = gateway(ScriptedSource::new(&["one"]));
        for _ in 0..2 {
            let mut received = String::new();
            gateway
                .generate(&InputRecord::details("A", "B", "C"), |text| {
                    received.push_str(text)
                })
                .await
                .unwrap();
            assert_eq!(received, "one");
        }
        assert_eq!(gateway.source().seen.lock().unwrap().len(), 2);
    }
}
