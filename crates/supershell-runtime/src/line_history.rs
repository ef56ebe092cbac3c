#![forbid(unsafe_code)]

//! Bounded history of completed output lines.
//!
//! A `VecDeque` ring: pushing at capacity evicts the oldest line. Reaching
//! capacity is the steady state of a long session, not an error.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Fixed-capacity FIFO of completed lines, safe to share between threads.
///
/// The lock is held only for the push or copy itself, never across I/O.
#[derive(Debug)]
pub struct LineHistory {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LineHistory {
    /// Create a history holding at most `capacity` lines.
    ///
    /// A capacity of `0` disables the history (all pushes are dropped).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity.min(4096))),
            capacity,
        }
    }

    fn guard(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Maximum number of lines held.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether no line has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Append a line, evicting the oldest one when full.
    ///
    /// Returns the evicted line, if any.
    pub fn push(&self, line: String) -> Option<String> {
        if self.capacity == 0 {
            return None;
        }
        let mut lines = self.guard();
        let evicted = if lines.len() >= self.capacity {
            lines.pop_front()
        } else {
            None
        };
        lines.push_back(line);
        evicted
    }

    /// Copy of all lines, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.guard().iter().cloned().collect()
    }
}
