#![forbid(unsafe_code)]

//! A [`Terminal`] backed by any [`Write`] sink.
//!
//! `SinkTerminal` is the one writer for its sink: log output and progress
//! redraws both go through it, serialized by a single lock, so a redraw can
//! never interleave with a half-written log line.
//!
//! # Usage
//!
//! ```ignore
//! use supershell_core::SupershellConfig;
//! use supershell_runtime::{ProgressEvent, ProgressItem, ProgressTerminal, SinkTerminal};
//!
//! let terminal = SinkTerminal::stdout("console0", &SupershellConfig::from_env());
//! terminal.update_progress(&ProgressEvent::new([ProgressItem::new("compile", 0)]))?;
//! terminal.write_output(b"[info] compiling 3 sources\n")?;
//! ```

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use supershell_core::{Prompt, SupershellConfig, Terminal, TerminalCapabilities};
use tracing::debug;

use crate::progress_state::ProgressState;
use crate::ticker::ProgressTerminal;

/// Width assumed until the host reports one.
pub const DEFAULT_WIDTH: usize = 80;

/// Terminal that renders the progress overlay into a byte sink.
#[derive(Debug)]
pub struct SinkTerminal<W: Write + Send> {
    name: String,
    sink: Mutex<W>,
    capabilities: TerminalCapabilities,
    width: AtomicUsize,
    supershell: AtomicBool,
    prompt: Mutex<Prompt>,
    progress: ProgressState,
}

impl<W: Write + Send> SinkTerminal<W> {
    /// Create a terminal writing to `sink`.
    ///
    /// The overlay switch is resolved from `config` against `capabilities`.
    pub fn new(
        name: impl Into<String>,
        sink: W,
        capabilities: TerminalCapabilities,
        config: &SupershellConfig,
    ) -> Self {
        Self {
            name: name.into(),
            sink: Mutex::new(sink),
            capabilities,
            width: AtomicUsize::new(DEFAULT_WIDTH),
            supershell: AtomicBool::new(config.supershell_enabled(&capabilities)),
            prompt: Mutex::new(Prompt::default()),
            progress: ProgressState::from_config(config),
        }
    }

    fn lock_sink(&self) -> MutexGuard<'_, W> {
        self.sink.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Capabilities this terminal was created with.
    #[must_use]
    pub fn capabilities(&self) -> &TerminalCapabilities {
        &self.capabilities
    }

    /// Update the width after a resize.
    ///
    /// Only measurement changes; the next snapshot redraws at the new width.
    pub fn set_width(&self, columns: usize) {
        let previous = self.width.swap(columns, Ordering::AcqRel);
        if previous != columns {
            debug!(terminal = %self.name, previous, columns, "terminal resized");
        }
    }

    /// Replace the prompt state.
    pub fn set_prompt(&self, prompt: Prompt) {
        *self.prompt.lock().unwrap_or_else(|e| e.into_inner()) = prompt;
    }

    /// Turn the overlay on or off.
    pub fn set_supershell_enabled(&self, enabled: bool) {
        self.supershell.store(enabled, Ordering::Release);
    }

    /// The progress state rendered into this terminal.
    #[must_use]
    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    /// Write ordinary output, redrawing the progress block as needed.
    ///
    /// Without an enabled overlay on an ANSI terminal the bytes pass through
    /// unchanged, though the line history is still kept.
    pub fn write_output(&self, bytes: &[u8]) -> io::Result<()> {
        let has_progress = self.is_supershell_enabled() && self.capabilities.ansi;
        let mut sink = self.lock_sink();
        self.progress.write(self, bytes, &mut *sink, has_progress)
    }

    /// Forget all on-screen progress state after a client reattaches.
    ///
    /// Nothing is written; the next snapshot draws a fresh block.
    pub fn reattach(&self) {
        self.progress.reset();
        debug!(terminal = %self.name, "progress state reset on reattach");
    }

    /// Consume the terminal and return the sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl SinkTerminal<io::Stdout> {
    /// Terminal on the process's stdout with detected capabilities and
    /// width.
    pub fn stdout(name: impl Into<String>, config: &SupershellConfig) -> Self {
        let terminal = Self::new(name, io::stdout(), TerminalCapabilities::detect(), config);
        match crossterm::terminal::size() {
            Ok((columns, _rows)) => terminal.set_width(usize::from(columns)),
            Err(err) => {
                debug!(error = %err, "terminal size unavailable, assuming {DEFAULT_WIDTH} columns");
            }
        }
        terminal
    }
}

impl<W: Write + Send> Terminal for SinkTerminal<W> {
    fn width(&self) -> usize {
        self.width.load(Ordering::Acquire)
    }

    fn is_ansi_supported(&self) -> bool {
        self.capabilities.ansi
    }

    fn is_supershell_enabled(&self) -> bool {
        self.supershell.load(Ordering::Acquire)
    }

    fn prompt(&self) -> Prompt {
        self.prompt.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn last_line(&self) -> Option<String> {
        self.progress.current_line()
    }

    fn with_print_stream(
        &self,
        action: &mut dyn FnMut(&mut dyn Write) -> io::Result<()>,
    ) -> io::Result<()> {
        let mut sink = self.lock_sink();
        action(&mut *sink)
    }
}

impl<W: Write + Send> ProgressTerminal for SinkTerminal<W> {
    fn progress_state(&self) -> &ProgressState {
        &self.progress
    }
}

impl<W: Write + Send> Write for &SinkTerminal<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_output(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock_sink().flush()
    }
}
