// Editor module for the hero page.

pub mod clock;
pub mod controller;
pub mod history;
pub mod shortcuts;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{Editor, EditorState, ViewState};
pub use history::{HistoryConfig, HistoryManager};
pub use shortcuts::{EditorCommand, Shortcut};
