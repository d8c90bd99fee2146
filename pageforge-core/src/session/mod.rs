//! Request lifecycle: state, streamed content and the submit flow.

mod accumulator;
mod state;

pub use accumulator::{CANCELLED_MESSAGE, ContentAccumulator, ContentView, Observer};
pub use state::RequestState;

use crate::gateway::{ContentGateway, ContentSource};
use crate::input::InputRecord;
use tracing::info;

/// Run one request from submit to terminal state.
///
/// The accumulator is reset first, receives every chunk the gateway forwards,
/// and ends in `Loaded` or `Failed`. Text received before a failure stays in
/// the buffer. Returns the final state.
pub async fn run_generation<S: ContentSource>(
    gateway: &ContentGateway<S>,
    input: &InputRecord,
    accumulator: &mut ContentAccumulator,
) -> RequestState {
    accumulator.reset();

    let result = gateway
        .generate(input, |chunk| accumulator.append(chunk))
        .await;

    match result {
        Ok(_) => accumulator.complete(),
        Err(err) => accumulator.fail(failure_message(&err)),
    }

    info!(
        state = accumulator.state().label(),
        chunks = accumulator.chunk_count(),
        bytes = accumulator.buffer().len(),
        "request finished"
    );
    accumulator.state().clone()
}

fn failure_message(err: &dyn std::fmt::Display) -> String {
    format!("Sorry, something went wrong. Please try again. ({err})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::ScriptedSource;
    use crate::gemini::StreamingError;
    use crate::prompts::PromptBuilder;

    fn gateway(source: ScriptedSource) -> ContentGateway<ScriptedSource> {
        ContentGateway::new(source, PromptBuilder::new("https://guide.example", true))
    }

    #[tokio::test]
    async fn success_ends_loaded_with_full_buffer() {
        let gateway = gateway(ScriptedSource::new(&["Hel", "lo", "", " World"]));
        let mut acc = ContentAccumulator::new();

        let state = run_generation(&gateway, &InputRecord::details("A", "B", "C"), &mut acc).await;

        assert_eq!(state, RequestState::Loaded);
        assert_eq!(acc.buffer(), "Hello World");
        assert_eq!(acc.chunk_count(), 3);
    }

    #[tokio::test]
    async fn failure_after_partial_output_keeps_it() {
        let gateway = gateway(ScriptedSource::failing_after(
            &["partial "],
            StreamingError::NetworkError {
                message: "connection reset".to_string(),
            },
        ));
        let mut acc = ContentAccumulator::new();

        let state = run_generation(&gateway, &InputRecord::details("A", "B", "C"), &mut acc).await;

        assert_eq!(
            state.error_message(),
            Some(
                "Sorry, something went wrong. Please try again. \
                 (Failed to generate content from Gemini API: Network error: connection reset)"
            )
        );
        assert_eq!(acc.buffer(), "partial ");
    }

    #[tokio::test]
    async fn invalid_input_fails_without_content() {
        let gateway = gateway(ScriptedSource::new(&["unused"]));
        let mut acc = ContentAccumulator::new();

        let state = run_generation(&gateway, &InputRecord::source_text("  "), &mut acc).await;

        assert_eq!(
            state.error_message(),
            Some("Sorry, something went wrong. Please try again. (source text is required)")
        );
        assert_eq!(acc.buffer(), "");
    }

    #[tokio::test]
    async fn a_new_request_starts_clean_after_a_failure() {
        let failing = gateway(ScriptedSource::failing_after(
            &["stale"],
            StreamingError::NoContent {
                reason: "prompt blocked (SAFETY)".to_string(),
            },
        ));
        let working = gateway(ScriptedSource::new(&["# Fresh"]));
        let mut acc = ContentAccumulator::new();
        let input = InputRecord::details("A", "B", "C");

        run_generation(&failing, &input, &mut acc).await;
        let state = run_generation(&working, &input, &mut acc).await;

        assert_eq!(state, RequestState::Loaded);
        assert_eq!(acc.buffer(), "# Fresh");
        assert_eq!(acc.blocks().len(), 1);
    }
}
