#![forbid(unsafe_code)]

//! Supershell Runtime
//!
//! Keeps a live block of task progress pinned beneath ordinary scrolling
//! output, redrawing it with relative cursor movement only.
//!
//! # Key Components
//!
//! - [`ProgressState`] - Line accumulator, padding and the current block
//! - [`ProgressEvent`] - A snapshot of running tasks
//! - [`SinkTerminal`] - One-writer terminal over any `Write` sink
//! - [`ProgressTicker`] - Background thread applying periodic snapshots
//! - [`LineHistory`] - Bounded history of completed output lines
//!
//! # Data flow
//!
//! ```text
//! log output ──► SinkTerminal::write_output ──► ProgressState::write ──► sink
//!                                                   │
//! ProgressTicker ──► ProgressState::update_progress_state ──► sink
//! ```
//!
//! Both paths hold the terminal's sink lock for their whole write, so the
//! progress block is never interleaved with a partial log line.

pub mod line_history;
#[cfg(feature = "log-writer")]
pub mod log_writer;
pub mod progress_event;
mod progress_render;
pub mod progress_state;
mod progress_update;
pub mod sink_terminal;
pub mod ticker;

#[cfg(test)]
mod test_support;

pub use line_history::LineHistory;
#[cfg(feature = "log-writer")]
pub use log_writer::TerminalLogWriter;
pub use progress_event::{ProgressEvent, ProgressItem};
pub use progress_state::ProgressState;
pub use progress_update::progress_info_lines;
pub use sink_terminal::SinkTerminal;
pub use ticker::{ProgressTerminal, ProgressTicker};

pub use supershell_core::{Prompt, SupershellConfig, Terminal, TerminalCapabilities};
