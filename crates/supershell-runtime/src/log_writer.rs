#![forbid(unsafe_code)]

//! Route `tracing_subscriber::fmt` output through a [`SinkTerminal`].
//!
//! Log events then scroll above the progress block instead of tearing
//! through it:
//!
//! ```ignore
//! let terminal = Arc::new(SinkTerminal::stdout("console0", &config));
//! tracing_subscriber::fmt()
//!     .with_writer(TerminalLogWriter::new(Arc::clone(&terminal)))
//!     .init();
//! ```

use std::io::Write;
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use crate::sink_terminal::SinkTerminal;

/// [`MakeWriter`] handing out the shared terminal for every event.
#[derive(Debug)]
pub struct TerminalLogWriter<W: Write + Send> {
    terminal: Arc<SinkTerminal<W>>,
}

impl<W: Write + Send> TerminalLogWriter<W> {
    /// Wrap a shared terminal.
    pub fn new(terminal: Arc<SinkTerminal<W>>) -> Self {
        Self { terminal }
    }

    /// The terminal events are written to.
    #[must_use]
    pub fn terminal(&self) -> &Arc<SinkTerminal<W>> {
        &self.terminal
    }
}

impl<W: Write + Send> Clone for TerminalLogWriter<W> {
    fn clone(&self) -> Self {
        Self {
            terminal: Arc::clone(&self.terminal),
        }
    }
}

impl<'a, W: Write + Send + 'a> MakeWriter<'a> for TerminalLogWriter<W> {
    type Writer = &'a SinkTerminal<W>;

    fn make_writer(&'a self) -> Self::Writer {
        &self.terminal
    }
}
