#![forbid(unsafe_code)]

//! Terminal capability detection for the progress overlay.
//!
//! Detection is based on environment variables and on whether stdout is
//! attached to a terminal. The overlay only needs two answers: can the
//! terminal interpret ANSI cursor movement, and should the overlay be on by
//! default.
//!
//! # Detection Strategy
//!
//! - `TERM`: `dumb` or empty disables ANSI (except inside Windows Terminal)
//! - `WT_SESSION`: Windows Terminal, which often omits `TERM`
//! - `CI`: continuous integration logs are not interactive
//! - stdout `isatty`
//!
//! # Decision Rule
//!
//! ```text
//! supershell_default = ansi && stdout_tty && !in_ci
//! ```

use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Default)]
struct DetectInputs {
    term: String,
    wt_session: bool,
    in_ci: bool,
    stdout_tty: bool,
}

impl DetectInputs {
    fn from_env() -> Self {
        Self {
            term: env::var("TERM").unwrap_or_default(),
            wt_session: env::var("WT_SESSION").is_ok(),
            in_ci: env::var("CI").is_ok_and(|v| !v.is_empty() && v != "false"),
            stdout_tty: std::io::stdout().is_terminal(),
        }
    }
}

/// What the current terminal can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// ANSI control sequences are interpreted.
    pub ansi: bool,
    /// stdout is attached to a terminal.
    pub stdout_tty: bool,
    /// Running under continuous integration.
    pub in_ci: bool,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self::basic()
    }
}

impl TerminalCapabilities {
    /// Detect capabilities from the environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_from_inputs(&DetectInputs::from_env())
    }

    fn detect_from_inputs(env: &DetectInputs) -> Self {
        let term = env.term.as_str();
        let is_dumb = term == "dumb" || (term.is_empty() && !env.wt_session);

        Self {
            ansi: !is_dumb,
            stdout_tty: env.stdout_tty,
            in_ci: env.in_ci,
        }
    }

    /// Minimal capability set: no ANSI, overlay off.
    #[must_use]
    pub const fn basic() -> Self {
        Self {
            ansi: false,
            stdout_tty: false,
            in_ci: false,
        }
    }

    /// An interactive ANSI terminal.
    #[must_use]
    pub const fn ansi_terminal() -> Self {
        Self {
            ansi: true,
            stdout_tty: true,
            in_ci: false,
        }
    }

    /// Whether the progress overlay should be enabled when not configured
    /// explicitly.
    #[must_use]
    pub const fn supershell_default(&self) -> bool {
        self.ansi && self.stdout_tty && !self.in_ci
    }
}
