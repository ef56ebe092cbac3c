#![forbid(unsafe_code)]

//! Progress snapshots delivered to a terminal.

/// One task shown in the progress block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressItem {
    /// Task name.
    pub name: String,
    /// Time the task has been running, in microseconds.
    pub elapsed_micros: u64,
}

impl ProgressItem {
    /// Create an item.
    pub fn new(name: impl Into<String>, elapsed_micros: u64) -> Self {
        Self {
            name: name.into(),
            elapsed_micros,
        }
    }

    /// Whole seconds elapsed, truncated.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_micros / 1_000_000
    }
}

/// A snapshot of everything currently in progress.
///
/// Each snapshot replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressEvent {
    /// Running tasks, in display order.
    pub items: Vec<ProgressItem>,
    /// External command currently being evaluated, if any.
    pub command: Option<String>,
    /// Session that produced this snapshot.
    pub channel_name: Option<String>,
    /// Do not redraw while a foreground command is running.
    pub skip_if_active: Option<bool>,
}

impl ProgressEvent {
    /// Snapshot listing `items`.
    pub fn new(items: impl IntoIterator<Item = ProgressItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Self::default()
        }
    }

    /// An empty snapshot. Rendering it erases the progress block.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the running command.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set the originating channel.
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel_name = Some(channel.into());
        self
    }

    /// Request suppression while a foreground command runs.
    #[must_use]
    pub fn with_skip_if_active(mut self, skip: bool) -> Self {
        self.skip_if_active = Some(skip);
        self
    }

    /// Whether suppression was requested. Absent means no.
    #[must_use]
    pub fn skips_if_active(&self) -> bool {
        self.skip_if_active.unwrap_or(false)
    }
}
