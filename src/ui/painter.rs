//! Live painting of a streaming request.
//!
//! A terminal cannot take back lines it has already printed, so only settled
//! blocks are written while the response streams; the spinner shows progress
//! for the rest. Once the request ends the remaining blocks are flushed and a
//! failure is reported under whatever content arrived.

use super::blocks::BlockFormatter;
use super::spinner::Spinner;
use console::style;
use pageforge_core::{ContentView, RequestState};
use std::io::Write;

pub struct LivePainter {
    spinner: Spinner,
    formatter: BlockFormatter,
    out: Box<dyn Write + Send>,
    raw: bool,
    /// Blocks already written (block mode).
    printed_blocks: usize,
    /// Bytes of the buffer already written (raw mode).
    printed_bytes: usize,
}

impl LivePainter {
    pub fn new(
        spinner: Spinner,
        formatter: BlockFormatter,
        out: Box<dyn Write + Send>,
        raw: bool,
    ) -> Self {
        Self {
            spinner,
            formatter,
            out,
            raw,
            printed_blocks: 0,
            printed_bytes: 0,
        }
    }

    /// Observer entry point; called after every accumulator change.
    pub fn observe(&mut self, view: &ContentView<'_>) {
        match view.state {
            RequestState::Idle => {}
            RequestState::Loading if view.is_receiving() => {
                self.spinner
                    .set_message(format!("Writing… {} sections so far", view.blocks.len()));
                self.flush(view, view.settled);
            }
            RequestState::Loading => {
                self.printed_blocks = 0;
                self.printed_bytes = 0;
                self.spinner.set_message("Researching and writing…");
            }
            RequestState::Loaded => {
                self.flush(view, view.blocks.len());
                self.spinner.finish_and_clear();
            }
            RequestState::Failed { message } => {
                self.flush(view, view.blocks.len());
                self.spinner.finish_and_clear();
                eprintln!("\n{} {}", style("Error:").red().bold(), style(message).red());
            }
        }
    }

    fn flush(&mut self, view: &ContentView<'_>, upto: usize) {
        let chunk = if self.raw {
            self.take_raw(view)
        } else {
            self.take_blocks(view, upto)
        };
        let Some(chunk) = chunk else {
            return;
        };

        let out = &mut self.out;
        self.spinner.suspend(|| {
            // Nothing useful to do if the terminal went away.
            let _ = out.write_all(chunk.as_bytes());
            let _ = out.flush();
        });
    }

    fn take_raw(&mut self, view: &ContentView<'_>) -> Option<String> {
        let fresh = view.buffer.get(self.printed_bytes..)?;
        if fresh.is_empty() && !view.state.is_terminal() {
            return None;
        }
        self.printed_bytes = view.buffer.len();

        let mut chunk = fresh.to_string();
        if view.state.is_terminal() && !view.buffer.is_empty() && !view.buffer.ends_with('\n') {
            chunk.push('\n');
        }
        (!chunk.is_empty()).then_some(chunk)
    }

    fn take_blocks(&mut self, view: &ContentView<'_>, upto: usize) -> Option<String> {
        let upto = upto.min(view.blocks.len());
        if upto <= self.printed_blocks {
            return None;
        }

        let mut chunk = String::new();
        for block in &view.blocks[self.printed_blocks..upto] {
            if self.printed_blocks > 0 {
                chunk.push('\n');
            }
            chunk.push_str(&self.formatter.format_block(block));
            chunk.push('\n');
            self.printed_blocks += 1;
        }
        Some(chunk)
    }
}
