//! UI module for consistent CLI output
//!
//! Uses `cliclack` and `indicatif` in interactive terminals with automatic
//! fallback to plain output in CI/non-interactive environments. A quiet
//! context (machine-readable output formats) prints nothing here.
//!
//! # Example
//!
//! ```rust,ignore
//! use matcache::ui::{self, FileProgress, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! ui::intro(&ctx, "matcache");
//!
//! let mut progress = FileProgress::new(&ctx, files.len());
//! // ... for each finished file ...
//! progress.file_done(&path);
//! progress.finish();
//!
//! ui::outro_success(&ctx, "All files cached");
//! ```

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, outro_warn, step_error_detail, step_ok, step_ok_detail,
    step_warn_hint,
};
pub use progress::FileProgress;
