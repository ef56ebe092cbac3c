#![forbid(unsafe_code)]

//! Applying progress snapshots to a terminal.

use std::io::{self, Write};

use supershell_core::ansi::CLEAR_SCREEN_AFTER_CURSOR;
use supershell_core::{Prompt, Terminal};
use tracing::{debug, trace};

use crate::progress_event::ProgressEvent;
use crate::progress_render::total_rows;
use crate::progress_state::ProgressState;

/// Format the lines shown for `event` on a terminal named `terminal_name`.
///
/// Task lines are shown when nothing interactive is on screen and the
/// snapshot belongs to this terminal. Otherwise a running external command
/// is announced instead.
#[must_use]
pub fn progress_info_lines(
    event: &ProgressEvent,
    prompt: &Prompt,
    terminal_name: &str,
) -> Vec<String> {
    let shows_tasks = matches!(prompt, Prompt::Running | Prompt::Batch | Prompt::NoPrompt);
    let own_channel = event
        .channel_name
        .as_deref()
        .is_none_or(|channel| channel == terminal_name);

    if shows_tasks && own_channel {
        event
            .items
            .iter()
            .map(|item| format!("  | => {} {}s", item.name, item.elapsed_seconds()))
            .collect()
    } else if let Some(command) = &event.command {
        let mut lines = vec![format!("sbt server is running '{command}'")];
        if *prompt != Prompt::Watch {
            lines.push("enter 'cancel' to stop evaluation".to_owned());
        }
        lines
    } else {
        Vec::new()
    }
}

fn visible_last_line<T: Terminal + ?Sized>(terminal: &T, prompt: &Prompt) -> String {
    match prompt {
        Prompt::AskUser(text) => text.clone(),
        _ => terminal.last_line().unwrap_or_default(),
    }
}

impl ProgressState {
    /// Swap in a new progress snapshot and redraw the block.
    ///
    /// Does nothing unless the supershell is enabled. When the snapshot asks
    /// to be skipped while a command runs in the foreground, the redraw is
    /// skipped, but a block that is still on screen is erased so it does not
    /// go stale.
    ///
    /// The block never shrinks on screen: rows it no longer needs become
    /// padding, so previously printed output keeps its position.
    pub fn update_progress_state<T: Terminal + ?Sized>(
        &self,
        event: &ProgressEvent,
        terminal: &T,
    ) -> io::Result<()> {
        if !terminal.is_supershell_enabled() {
            return Ok(());
        }
        let prompt = terminal.prompt();

        if event.skips_if_active() && prompt.is_running_or_batch() {
            if !self.has_progress_lines() {
                trace!(prompt = prompt.as_str(), "progress redraw suppressed");
                return Ok(());
            }
            terminal.with_print_stream(&mut |sink| {
                self.swap_progress_lines(Vec::new());
                let mut out = visible_last_line(terminal, &prompt).into_bytes();
                out.extend_from_slice(CLEAR_SCREEN_AFTER_CURSOR);
                sink.write_all(&out)?;
                sink.flush()
            })?;
            debug!(prompt = prompt.as_str(), "progress block cleared while command runs");
            return Ok(());
        }

        // No tracing inside the closure: a log writer routed through this
        // terminal would need the sink we are holding.
        let mut rows = (0, 0);
        terminal.with_print_stream(&mut |sink| {
            let info = progress_info_lines(event, &prompt, terminal.name());
            let current_length = total_rows(terminal, &info);
            let previous = self.swap_progress_lines(info);
            let prev_size = total_rows(terminal, &previous) + self.padding();
            let last_line = visible_last_line(terminal, &prompt);
            self.set_padding(prev_size.saturating_sub(current_length));
            rows = (current_length, self.padding());

            let mut out = self.prompt_bytes(terminal);
            out.extend(self.compose_progress_block(terminal, &last_line));
            sink.write_all(&out)?;
            sink.flush()
        })?;
        debug!(rows = rows.0, padding = rows.1, "progress block updated");
        Ok(())
    }
}
