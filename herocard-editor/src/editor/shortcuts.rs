// Keyboard shortcuts the editor reacts to.

use tracing::trace;

/// Commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Undo,
    Redo,
}

impl EditorCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::Undo => "Undo",
            EditorCommand::Redo => "Redo",
        }
    }
}

/// A key press with its modifiers, as reported by the host key handler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shortcut {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    /// Cmd on macOS; treated like Ctrl.
    pub meta: bool,
}

impl Shortcut {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl+Z undoes; Ctrl+Shift+Z and Ctrl+Y redo.
    pub fn command(&self) -> Option<EditorCommand> {
        if !(self.ctrl || self.meta) {
            return None;
        }

        let command = match (self.key.to_ascii_lowercase().as_str(), self.shift) {
            ("z", false) => Some(EditorCommand::Undo),
            ("z", true) => Some(EditorCommand::Redo),
            ("y", false) => Some(EditorCommand::Redo),
            _ => None,
        };
        trace!(key = %self.key, shift = self.shift, command = ?command, "shortcut mapped");
        command
    }
}
