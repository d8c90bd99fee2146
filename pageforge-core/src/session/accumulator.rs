use super::RequestState;
use crate::markdown::{self, ContentBlock};
use tracing::debug;

/// Message recorded when a request is abandoned mid-stream.
pub const CANCELLED_MESSAGE: &str = "Generation cancelled";

/// Read-only snapshot handed to observers after every change.
#[derive(Debug, Clone, Copy)]
pub struct ContentView<'a> {
    pub state: &'a RequestState,
    pub buffer: &'a str,
    pub blocks: &'a [ContentBlock],
    /// Leading blocks that later chunks can no longer change.
    pub settled: usize,
}

impl ContentView<'_> {
    /// Still streaming and something has arrived.
    pub fn is_receiving(&self) -> bool {
        self.state.is_loading() && !self.buffer.is_empty()
    }

    pub fn settled_blocks(&self) -> &[ContentBlock] {
        &self.blocks[..self.settled]
    }
}

pub type Observer = Box<dyn FnMut(&ContentView<'_>) + Send>;

/// Owns the text received so far for the current request, its rendered
/// blocks and the request state.
///
/// The accumulator is the only writer of the buffer. Blocks are re-derived
/// from the whole buffer on every non-empty append.
#[derive(Default)]
pub struct ContentAccumulator {
    state: RequestState,
    buffer: String,
    blocks: Vec<ContentBlock>,
    settled: usize,
    chunk_count: usize,
    observer: Option<Observer>,
}

impl std::fmt::Debug for ContentAccumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentAccumulator")
            .field("state", &self.state)
            .field("buffer_len", &self.buffer.len())
            .field("blocks", &self.blocks.len())
            .field("settled", &self.settled)
            .field("chunk_count", &self.chunk_count)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl ContentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer<F>(observer: F) -> Self
    where
        F: FnMut(&ContentView<'_>) + Send + 'static,
    {
        Self {
            observer: Some(Box::new(observer)),
            ..Self::default()
        }
    }

    /// Start a new request: clear the buffer and any error, enter `Loading`.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.blocks.clear();
        self.settled = 0;
        self.chunk_count = 0;
        self.state = RequestState::Loading;
        self.notify();
    }

    /// Append one chunk and re-render. Empty chunks change nothing.
    pub fn append(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.buffer.push_str(chunk);
        self.chunk_count += 1;
        self.blocks = markdown::render(&self.buffer);
        self.settled = markdown::settled_block_count(&self.buffer);
        self.notify();
    }

    /// Stream finished cleanly.
    pub fn complete(&mut self) {
        if !self.state.is_loading() {
            debug!(state = self.state.label(), "ignoring completion outside of a request");
            return;
        }
        self.state = RequestState::Loaded;
        self.settled = self.blocks.len();
        self.notify();
    }

    /// Stream failed; already received text stays in the buffer.
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.state.is_loading() {
            debug!(state = self.state.label(), "ignoring failure outside of a request");
            return;
        }
        self.state = RequestState::Failed {
            message: message.into(),
        };
        self.settled = self.blocks.len();
        self.notify();
    }

    /// The caller stopped the stream; no more chunks will arrive.
    pub fn cancel(&mut self) {
        self.fail(CANCELLED_MESSAGE);
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    pub fn is_receiving(&self) -> bool {
        self.view().is_receiving()
    }

    /// Blocks that are final. Once the request ends every block is.
    pub fn settled_blocks(&self) -> &[ContentBlock] {
        &self.blocks[..self.settled]
    }

    pub fn view(&self) -> ContentView<'_> {
        ContentView {
            state: &self.state,
            buffer: &self.buffer,
            blocks: &self.blocks,
            settled: self.settled,
        }
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            let view = ContentView {
                state: &self.state,
                buffer: &self.buffer,
                blocks: &self.blocks,
                settled: self.settled,
            };
            observer(&view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::InlineSpan;
    use std::sync::{Arc, Mutex};

    #[test]
    fn chunks_apply_in_order() {
        let mut acc = ContentAccumulator::new();
        acc.reset();
        for chunk in ["Hel", "lo ", " World"] {
            acc.append(chunk);
        }
        assert_eq!(acc.buffer(), "Hello  World");

        acc.reset();
        for chunk in ["Hel", "lo", " World"] {
            acc.append(chunk);
        }
        assert_eq!(acc.buffer(), "Hello World");
    }

    #[test]
    fn empty_chunks_are_no_ops() {
        let mut with_empty = ContentAccumulator::new();
        with_empty.reset();
        for chunk in ["", "Hel", "", "lo", "", " World", ""] {
            with_empty.append(chunk);
        }

        let mut without = ContentAccumulator::new();
        without.reset();
        for chunk in ["Hel", "lo", " World"] {
            without.append(chunk);
        }

        assert_eq!(with_empty.buffer(), without.buffer());
        assert_eq!(with_empty.blocks(), without.blocks());
        assert_eq!(with_empty.chunk_count(), 3);
    }

    #[test]
    fn incremental_blocks_match_full_render() {
        let chunks = ["# Wil", "low Creek\nHomes with **", "pools**.\n\n* a", "\n- b\nEnd"];
        let mut acc = ContentAccumulator::new();
        acc.reset();
        let mut so_far = String::new();
        for chunk in chunks {
            acc.append(chunk);
            so_far.push_str(chunk);
            assert_eq!(acc.blocks(), markdown::render(&so_far).as_slice());
        }
    }

    #[test]
    fn reset_clears_previous_failure_and_content() {
        let mut acc = ContentAccumulator::new();
        acc.reset();
        acc.append("partial ");
        acc.fail("network down");
        assert_eq!(acc.state().error_message(), Some("network down"));

        acc.reset();
        assert_eq!(acc.state(), &RequestState::Loading);
        assert_eq!(acc.buffer(), "");
        assert!(acc.blocks().is_empty());
        assert_eq!(acc.chunk_count(), 0);
    }

    #[test]
    fn terminal_transitions_only_from_loading() {
        let mut acc = ContentAccumulator::new();
        acc.complete();
        assert_eq!(acc.state(), &RequestState::Idle);
        acc.fail("ignored");
        assert_eq!(acc.state(), &RequestState::Idle);

        acc.reset();
        acc.complete();
        acc.fail("too late");
        assert_eq!(acc.state(), &RequestState::Loaded);
    }

    #[test]
    fn cancel_is_a_terminal_failure() {
        let mut acc = ContentAccumulator::new();
        acc.reset();
        acc.append("half a page");
        acc.cancel();
        assert_eq!(acc.state().error_message(), Some(CANCELLED_MESSAGE));
        assert_eq!(acc.buffer(), "half a page");
    }

    #[test]
    fn receiving_flag_needs_loading_and_content() {
        let mut acc = ContentAccumulator::new();
        assert!(!acc.is_receiving());
        acc.reset();
        assert!(!acc.is_receiving());
        acc.append("x");
        assert!(acc.is_receiving());
        acc.complete();
        assert!(!acc.is_receiving());
    }

    #[test]
    fn every_block_settles_when_the_request_ends() {
        let mut acc = ContentAccumulator::new();
        acc.reset();
        acc.append("# Title\nBody");
        assert!(acc.settled_blocks().is_empty());
        acc.append("\n\nMore\n");
        assert_eq!(acc.settled_blocks().len(), 2);
        acc.complete();
        assert_eq!(acc.settled_blocks().len(), 3);
    }

    #[test]
    fn observer_sees_every_mutation() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut acc = ContentAccumulator::with_observer(move |view| {
            sink.lock()
                .unwrap()
                .push((view.state.label(), view.buffer.to_string(), view.blocks.len()));
        });

        acc.reset();
        acc.append("**Hi**");
        acc.append("");
        acc.complete();

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                ("loading", String::new(), 0),
                ("loading", "**Hi**".to_string(), 1),
                ("loaded", "**Hi**".to_string(), 1),
            ]
        );
        assert_eq!(
            acc.blocks(),
            &[ContentBlock::Paragraph {
                spans: vec![InlineSpan::bold("Hi")]
            }]
        );
    }
}
