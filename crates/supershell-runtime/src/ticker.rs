#![forbid(unsafe_code)]

//! Background thread that pushes progress snapshots at a fixed interval.
//!
//! The ticker asks a producer closure for the next [`ProgressEvent`] once
//! per interval and applies it to the terminal. It stops when the producer
//! returns `None`, when [`ProgressTicker::stop`] is called, or when the
//! handle is dropped.
//!
//! A failed redraw is logged and the ticker keeps running: losing one frame
//! of progress is not worth tearing down the session.

use std::io;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use supershell_core::Terminal;
use tracing::{debug, warn};

use crate::progress_event::ProgressEvent;
use crate::progress_state::ProgressState;

/// Shortest interval the ticker waits between snapshots.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// A terminal that owns a [`ProgressState`] and can apply snapshots to it.
pub trait ProgressTerminal: Terminal {
    /// The state rendered into this terminal.
    fn progress_state(&self) -> &ProgressState;

    /// Apply a snapshot and redraw the progress block.
    fn update_progress(&self, event: &ProgressEvent) -> io::Result<()> {
        self.progress_state().update_progress_state(event, self)
    }
}

/// Signal observed by the ticker thread.
#[derive(Clone)]
struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Block until stopped or `duration` elapses. Returns `true` if stopped.
    fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        let deadline = Instant::now() + duration;
        while !*stopped {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(|e| e.into_inner());
            stopped = guard;
        }
        true
    }
}

struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner()) = true;
        cvar.notify_all();
    }
}

/// Handle to a running ticker thread.
pub struct ProgressTicker {
    interval: Duration,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl ProgressTicker {
    /// Start ticking `terminal` every `interval`.
    ///
    /// `make_event` is called on the ticker thread; returning `None` ends
    /// the ticker. Intervals shorter than [`MIN_TICK_INTERVAL`] are raised
    /// to it.
    pub fn spawn<T, F>(terminal: Arc<T>, interval: Duration, make_event: F) -> io::Result<Self>
    where
        T: ProgressTerminal + 'static,
        F: FnMut() -> Option<ProgressEvent> + Send + 'static,
    {
        let interval = interval.max(MIN_TICK_INTERVAL);
        let (signal, trigger) = StopSignal::new();
        let thread = thread::Builder::new()
            .name("supershell-ticker".to_owned())
            .spawn(move || run(&*terminal, interval, make_event, &signal))?;
        Ok(Self {
            interval,
            trigger,
            thread: Some(thread),
        })
    }

    /// Effective interval between snapshots.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the ticker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(thread::JoinHandle::is_finished)
    }

    /// Stop the ticker and wait for its thread to exit.
    pub fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.trigger.stop();
        // The thread exits at its next wakeup; dropping never blocks.
    }
}

fn run<T, F>(terminal: &T, interval: Duration, mut make_event: F, stop: &StopSignal)
where
    T: ProgressTerminal + ?Sized,
    F: FnMut() -> Option<ProgressEvent>,
{
    let mut ticks: u64 = 0;
    debug!(terminal = terminal.name(), ?interval, "progress ticker started");
    loop {
        if stop.wait_timeout(interval) {
            debug!(ticks, "progress ticker stopped");
            break;
        }
        let Some(event) = make_event() else {
            debug!(ticks, "progress producer finished");
            break;
        };
        ticks += 1;
        if let Err(err) = terminal.update_progress(&event) {
            warn!(error = %err, "progress redraw failed");
        }
    }
}
