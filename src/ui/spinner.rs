//! Loading spinner for the terminal UI using the indicatif crate

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

/// Wrapper around an indicatif spinner drawn on stderr.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create a spinner with the given message and start ticking.
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars(TICK_CHARS),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.tick();

        Self { pb }
    }

    /// A spinner that never draws; output still goes through [`Spinner::suspend`].
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.pb.set_message(message.into());
    }

    /// Run `f` with the spinner line cleared, so it can write to the terminal.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.pb.suspend(f)
    }

    /// Finish the spinner and clear the line
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_runs_suspended_closures() {
        let spinner = Spinner::hidden();
        let value = spinner.suspend(|| 41 + 1);
        assert_eq!(value, 42);
        spinner.set_message("done");
        spinner.finish_and_clear();
    }
}
