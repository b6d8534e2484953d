//! Progress display for a batch of files, with CI fallback

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Tracks completed files during a run.
///
/// Shows an indicatif bar in interactive mode and one plain line per
/// finished file otherwise.
pub struct FileProgress {
    bar: Option<ProgressBar>,
    total: usize,
    done: usize,
    plain: bool,
}

impl FileProgress {
    pub fn new(ctx: &UiContext, total: usize) -> Self {
        let bar = if ctx.use_fancy_output() && total > 0 {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.cyan} {bar:30.cyan/dim} {pos}/{len} files {msg:.dim}  {elapsed:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                    .progress_chars("━╸─"),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            Some(bar)
        } else {
            None
        };

        Self {
            bar,
            total,
            done: 0,
            plain: !ctx.use_fancy_output() && ctx.shows_human_output(),
        }
    }

    /// Record one finished file
    pub fn file_done(&mut self, path: &Path) {
        self.done += 1;
        let name = display_name(path);

        if let Some(ref bar) = self.bar {
            bar.inc(1);
            bar.set_message(name);
        } else if self.plain {
            println!(
                "  {} {}",
                style(format!("[{}/{}]", self.done, self.total)).dim(),
                name
            );
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }

    #[cfg(test)]
    pub fn done(&self) -> usize {
        self.done
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
