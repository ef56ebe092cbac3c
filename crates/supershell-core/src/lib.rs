#![forbid(unsafe_code)]

//! Supershell Core
//!
//! Host-independent building blocks for rendering a live progress block
//! beneath scrolling log output.
//!
//! # Key Components
//!
//! - [`Terminal`] - The capability contract the overlay renders against
//! - [`Prompt`] - Prompt state of the terminal (running, asking, ...)
//! - [`TerminalCapabilities`] - Environment-based ANSI/TTY/CI detection
//! - [`SupershellConfig`] - Blank zone, history size, line separator, ticks
//! - [`ansi`] - Escape sequences composed into redraws
//! - [`line_metrics`] - Row accounting at a given terminal width
//!
//! # Role in Supershell
//! `supershell-core` holds no mutable state. `supershell-runtime` builds the
//! line accumulator, the renderer and the concrete terminal on top of it.

pub mod ansi;
pub mod config;
pub mod line_metrics;
pub mod prompt;
pub mod terminal;
pub mod terminal_capabilities;

pub use config::SupershellConfig;
pub use prompt::Prompt;
pub use terminal::Terminal;
pub use terminal_capabilities::TerminalCapabilities;
