// Undo/redo history module for the editor.
//
// Rapid edits (slider drags, color pickers) are grouped into one undo step:
// the first commit opens a grouping window, every commit inside the window
// replaces `present` without touching `past`, and the window closes once
// `debounce_ms` pass without a commit. Undo/redo close the window at once and
// bump `version`, which invalidates the pending close.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::clock::{Clock, SystemClock};

/// Policy constants for the history manager.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_max_entries() -> usize {
    50
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl HistoryConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// The scheduled end of the current grouping window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingClose {
    deadline: Duration,
    /// `HistoryManager::version` when this close was scheduled.
    version: u64,
}

/// Linear undo/redo over snapshots of `T`.
#[derive(Debug)]
pub struct HistoryManager<T, C = SystemClock> {
    past: VecDeque<T>,   // oldest first
    present: T,
    future: VecDeque<T>, // next redo first
    config: HistoryConfig,
    clock: C,
    grouping: bool,
    version: u64,
    pending: Option<PendingClose>,
}

impl<T: Clone + PartialEq> HistoryManager<T, SystemClock> {
    pub fn new(initial: T) -> Self {
        Self::with_clock(initial, HistoryConfig::default(), SystemClock::new())
    }
}

impl<T: Clone + PartialEq, C: Clock> HistoryManager<T, C> {
    pub fn with_clock(initial: T, config: HistoryConfig, clock: C) -> Self {
        debug!(
            max_entries = config.max_entries,
            debounce_ms = config.debounce_ms,
            "history manager created"
        );
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            config,
            clock,
            grouping: false,
            version: 0,
            pending: None,
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    pub fn past(&self) -> &VecDeque<T> {
        &self.past
    }

    pub fn future(&self) -> &VecDeque<T> {
        &self.future
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Whether the next commit would merge into the current undo step.
    pub fn is_grouping(&mut self) -> bool {
        self.poll();
        self.grouping
    }

    /// Bumped every time a scheduled window close is invalidated.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Fire the pending window close if its deadline has passed.
    /// Returns true when the window was closed by this call.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if self.clock.now() < pending.deadline {
            return false;
        }

        self.pending = None;
        if pending.version != self.version {
            trace!(
                scheduled = pending.version,
                current = self.version,
                "stale window close ignored"
            );
            return false;
        }

        self.grouping = false;
        debug!(past = self.past.len(), "grouping window closed");
        true
    }

    /// Commit a new state. Returns false when `next` equals `present`.
    pub fn commit(&mut self, next: T) -> bool {
        self.poll();

        if next == self.present {
            trace!("commit skipped, state unchanged");
            return false;
        }

        if self.grouping {
            trace!("commit merged into open group");
            self.present = next;
        } else {
            let previous = std::mem::replace(&mut self.present, next);
            self.push_past(previous);
            debug!(past = self.past.len(), "new undo step");
        }
        self.future.clear();

        self.grouping = true;
        self.pending = Some(PendingClose {
            deadline: self.clock.now() + self.config.debounce(),
            version: self.version,
        });
        true
    }

    /// Commit the state computed from the current one.
    pub fn commit_with(&mut self, update: impl FnOnce(&T) -> T) -> bool {
        let next = update(&self.present);
        self.commit(next)
    }

    pub fn undo(&mut self) -> bool {
        self.poll();
        self.close_window();

        let Some(previous) = self.past.pop_back() else {
            trace!("undo with empty history");
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        debug!(
            past = self.past.len(),
            future = self.future.len(),
            "undo"
        );
        true
    }

    pub fn redo(&mut self) -> bool {
        self.poll();
        self.close_window();

        let Some(next) = self.future.pop_front() else {
            trace!("redo with empty future");
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        debug!(
            past = self.past.len(),
            future = self.future.len(),
            "redo"
        );
        true
    }

    /// Forget every undo/redo step, keeping `present`.
    pub fn clear_history(&mut self) {
        self.close_window();
        self.past.clear();
        self.future.clear();
        debug!("history cleared");
    }

    /// Close the grouping window now so the next commit starts a new step.
    pub fn end_group(&mut self) {
        self.poll();
        self.close_window();
    }

    /// The scheduled close stays in place; the version bump makes `poll`
    /// discard it once its deadline passes.
    fn close_window(&mut self) {
        if self.grouping {
            self.version += 1;
            self.grouping = false;
        }
    }

    fn push_past(&mut self, state: T) {
        self.past.push_back(state);
        while self.past.len() > self.config.max_entries {
            self.past.pop_front();
        }
    }
}
