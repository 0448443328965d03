//! herocard-editor: editing session for a hero ability page.
//!
//! Design rules:
//! - One `Editor` owns the page state; nothing lives in globals.
//! - Every change goes through the history manager so undo/redo see it.
//! - Bursts of edits within the debounce window are a single undo step.
//! - Time is injected (`Clock`) so grouping is testable without real timers.

pub mod editor;

pub use editor::{
    Clock, Editor, EditorCommand, EditorState, HistoryConfig, HistoryManager, ManualClock,
    Shortcut, SystemClock, ViewState,
};
