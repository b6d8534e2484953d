//! UI context for detecting interactive vs CI environments

use std::io::IsTerminal;

/// Environment variables set by common CI providers
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
];

/// UI context that determines output behavior
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether stdout is an interactive terminal outside CI
    interactive: bool,
    /// Suppress human-oriented output (machine-readable formats)
    quiet: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self {
            interactive: Self::detect_interactive(),
            quiet: false,
        }
    }

    /// Create a non-interactive context (for testing or explicit CI mode)
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            quiet: false,
        }
    }

    /// Silence banners, steps and progress, e.g. for `--format json`
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Check if we're in an interactive terminal
    #[cfg(test)]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Check if banners and step lines should be printed at all
    pub fn shows_human_output(&self) -> bool {
        !self.quiet
    }

    /// Check if we should use fancy output (progress bars, colors)
    pub fn use_fancy_output(&self) -> bool {
        self.interactive && !self.quiet
    }

    fn detect_interactive() -> bool {
        std::io::stdout().is_terminal() && !CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
    }
}
