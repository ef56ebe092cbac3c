#![forbid(unsafe_code)]

//! Configuration for the progress overlay.
//!
//! Defaults suit an interactive terminal. Every field can be overridden via
//! the builder methods, and [`SupershellConfig::from_env`] layers the
//! following environment variables on top of the defaults:
//!
//! | Variable | Values | Field |
//! |----------|--------|-------|
//! | `SUPERSHELL` | `true`/`1`/`always`/`on`, `false`/`0`/`never`/`off` | `supershell` |
//! | `SUPERSHELL_BLANK_ZONE` | rows | `blank_zone` |
//! | `SUPERSHELL_HISTORY` | lines | `history_capacity` |
//! | `SUPERSHELL_TICK_MS` | milliseconds | `tick_interval` |
//!
//! Unparseable values, and a tick interval of 0, are ignored and the
//! default is kept.

use std::env;
use std::time::Duration;

use crate::terminal_capabilities::TerminalCapabilities;

/// Default number of blank rows kept between the last output line and the
/// progress block.
pub const DEFAULT_BLANK_ZONE: usize = 1;

/// Default capacity of the completed-line history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 300;

/// Default interval between progress snapshots.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Line terminator of the host platform.
#[cfg(windows)]
pub const PLATFORM_LINE_SEPARATOR: &str = "\r\n";
/// Line terminator of the host platform.
#[cfg(not(windows))]
pub const PLATFORM_LINE_SEPARATOR: &str = "\n";

#[derive(Debug, Clone, Default)]
struct ConfigInputs {
    supershell: Option<String>,
    blank_zone: Option<String>,
    history: Option<String>,
    tick_ms: Option<String>,
}

impl ConfigInputs {
    fn from_env() -> Self {
        Self {
            supershell: env::var("SUPERSHELL").ok(),
            blank_zone: env::var("SUPERSHELL_BLANK_ZONE").ok(),
            history: env::var("SUPERSHELL_HISTORY").ok(),
            tick_ms: env::var("SUPERSHELL_TICK_MS").ok(),
        }
    }
}

/// Progress overlay settings for one terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupershellConfig {
    /// Force the overlay on or off. `None` follows the detected
    /// capabilities.
    pub supershell: Option<bool>,
    /// Minimum number of blank rows reserved above the progress block.
    pub blank_zone: usize,
    /// Capacity of the completed-line history.
    pub history_capacity: usize,
    /// Terminator that completes an output line.
    pub line_separator: String,
    /// Interval between progress snapshots.
    pub tick_interval: Duration,
}

impl Default for SupershellConfig {
    fn default() -> Self {
        Self {
            supershell: None,
            blank_zone: DEFAULT_BLANK_ZONE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            line_separator: PLATFORM_LINE_SEPARATOR.to_owned(),
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl SupershellConfig {
    /// Create a config with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `SUPERSHELL*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_inputs(&ConfigInputs::from_env())
    }

    fn from_inputs(inputs: &ConfigInputs) -> Self {
        let mut config = Self::default();
        if let Some(raw) = inputs.supershell.as_deref() {
            config.supershell = parse_switch("SUPERSHELL", raw);
        }
        if let Some(rows) = parse_number("SUPERSHELL_BLANK_ZONE", inputs.blank_zone.as_deref()) {
            config.blank_zone = rows;
        }
        if let Some(lines) = parse_number("SUPERSHELL_HISTORY", inputs.history.as_deref()) {
            config.history_capacity = lines;
        }
        match parse_number("SUPERSHELL_TICK_MS", inputs.tick_ms.as_deref()) {
            Some(0) => reject("SUPERSHELL_TICK_MS", "0"),
            Some(ms) => config.tick_interval = Duration::from_millis(ms as u64),
            None => {}
        }
        config
    }

    /// Force the overlay on or off.
    #[must_use]
    pub fn with_supershell(mut self, enabled: bool) -> Self {
        self.supershell = Some(enabled);
        self
    }

    /// Set the blank zone height.
    #[must_use]
    pub fn with_blank_zone(mut self, rows: usize) -> Self {
        self.blank_zone = rows;
        self
    }

    /// Set the history capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, lines: usize) -> Self {
        self.history_capacity = lines;
        self
    }

    /// Set the line terminator.
    #[must_use]
    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Set the snapshot interval.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Resolve the overlay switch against detected capabilities.
    #[must_use]
    pub fn supershell_enabled(&self, caps: &TerminalCapabilities) -> bool {
        self.supershell.unwrap_or_else(|| caps.supershell_default())
    }
}

fn parse_switch(name: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "always" | "on" | "yes" => Some(true),
        "false" | "0" | "never" | "off" | "no" => Some(false),
        "" | "auto" => None,
        _ => {
            reject(name, raw);
            None
        }
    }
}

fn parse_number(name: &str, raw: Option<&str>) -> Option<usize> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            reject(name, raw);
            None
        }
    }
}

#[cfg(feature = "tracing")]
fn reject(name: &str, raw: &str) {
    tracing::warn!(variable = name, value = raw, "ignoring invalid supershell setting");
}

#[cfg(not(feature = "tracing"))]
fn reject(_name: &str, _raw: &str) {}
