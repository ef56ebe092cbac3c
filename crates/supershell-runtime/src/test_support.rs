#![forbid(unsafe_code)]

//! Fixed-width in-memory terminal for unit tests.

use std::io::{self, Write};
use std::sync::Mutex;

use supershell_core::{Prompt, Terminal};

pub(crate) struct FixedTerminal {
    pub(crate) width: usize,
    pub(crate) ansi: bool,
    pub(crate) supershell: bool,
    pub(crate) name: String,
    pub(crate) prompt: Mutex<Prompt>,
    pub(crate) last_line: Mutex<Option<String>>,
    pub(crate) output: Mutex<Vec<u8>>,
}

impl FixedTerminal {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            width,
            ansi: true,
            supershell: true,
            name: "console0".to_owned(),
            prompt: Mutex::new(Prompt::Running),
            last_line: Mutex::new(None),
            output: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_prompt(self, prompt: Prompt) -> Self {
        *self.prompt.lock().unwrap() = prompt;
        self
    }

    pub(crate) fn set_last_line(&self, line: &str) {
        *self.last_line.lock().unwrap() = Some(line.to_owned());
    }

    pub(crate) fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut *self.output.lock().unwrap())
    }
}

impl Terminal for FixedTerminal {
    fn width(&self) -> usize {
        self.width
    }

    fn is_ansi_supported(&self) -> bool {
        self.ansi
    }

    fn is_supershell_enabled(&self) -> bool {
        self.supershell
    }

    fn prompt(&self) -> Prompt {
        self.prompt.lock().unwrap().clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn last_line(&self) -> Option<String> {
        self.last_line.lock().unwrap().clone()
    }

    fn with_print_stream(
        &self,
        action: &mut dyn FnMut(&mut dyn Write) -> io::Result<()>,
    ) -> io::Result<()> {
        let mut output = self.output.lock().unwrap();
        action(&mut *output)
    }
}
