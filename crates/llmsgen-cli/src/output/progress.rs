//! Progress display for the conversion phase

use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

/// Progress bar driven by the pipeline's `(completed, total)` callback.
///
/// Hidden unless stderr is a terminal, so logs and piped output stay clean.
#[derive(Clone)]
pub struct ConversionProgress {
    bar: ProgressBar,
}

impl ConversionProgress {
    /// Create a bar for an interactive stderr, hidden otherwise or when `quiet`.
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet || !std::io::stderr().is_terminal() {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            bar
        };
        Self { bar }
    }

    /// Record that `completed` of `total` pages are done.
    pub fn update(&self, completed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(completed as u64);
    }

    /// Remove the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
