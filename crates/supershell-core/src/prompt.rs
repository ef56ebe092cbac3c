#![forbid(unsafe_code)]

//! Interactive prompt state of a terminal.

/// What the terminal's prompt line is currently doing.
///
/// The progress overlay needs to know whether a command is executing (the
/// prompt is hidden) or whether prompt text must survive every redraw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Prompt {
    /// A command is executing in the foreground.
    Running,
    /// Non-interactive batch execution.
    Batch,
    /// Waiting for file changes in watch mode.
    Watch,
    /// Interactive session with no prompt shown.
    #[default]
    NoPrompt,
    /// Waiting for user input; carries the rendered prompt text.
    AskUser(String),
}

impl Prompt {
    /// The text to print for this prompt. Empty unless asking the user.
    #[must_use]
    pub fn render(&self) -> &str {
        match self {
            Prompt::AskUser(text) => text,
            _ => "",
        }
    }

    /// Whether a command currently owns the foreground.
    #[must_use]
    pub const fn is_running_or_batch(&self) -> bool {
        matches!(self, Prompt::Running | Prompt::Batch)
    }

    /// Short name used in log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Prompt::Running => "running",
            Prompt::Batch => "batch",
            Prompt::Watch => "watch",
            Prompt::NoPrompt => "no-prompt",
            Prompt::AskUser(_) => "ask-user",
        }
    }
}
