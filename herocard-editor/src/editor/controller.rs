// Editor controller for the hero page.
// Owns the page state and its undo history; the preview and form widgets read
// from `state()` and write through the `edit_*` methods.

use herocard_core::{DisplaySettings, HeroCollection, HeroData, ModelError};
use herocard_template::{decode_with_report, encode, template_file_name, FormatError, Repair};
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::history::{HistoryConfig, HistoryManager};
use super::shortcuts::{EditorCommand, Shortcut};

/// The undoable application state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub hero: HeroData,
    pub display: DisplaySettings,
}

/// Window state that is neither exported nor undoable.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub active_panel: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            active_panel: "hero".into(),
        }
    }
}

pub struct Editor<C: Clock = SystemClock> {
    history: HistoryManager<EditorState, C>,
    view: ViewState,
}

impl Editor<SystemClock> {
    pub fn new(hero: HeroData) -> Self {
        Self::with_clock(
            EditorState {
                hero,
                display: DisplaySettings::default(),
            },
            HistoryConfig::default(),
            SystemClock::new(),
        )
    }
}

impl<C: Clock> Editor<C> {
    pub fn with_clock(initial: EditorState, config: HistoryConfig, clock: C) -> Self {
        info!(hero = %initial.hero.name, "editor opened");
        Self {
            history: HistoryManager::with_clock(initial, config, clock),
            view: ViewState::default(),
        }
    }

    pub fn state(&self) -> &EditorState {
        self.history.present()
    }

    pub fn history(&self) -> &HistoryManager<EditorState, C> {
        &self.history
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Edit the hero. Rapid edits merge into one undo step.
    pub fn edit_hero(&mut self, edit: impl FnOnce(&mut HeroData)) -> bool {
        self.history.commit_with(|state| {
            let mut next = state.clone();
            edit(&mut next.hero);
            next
        })
    }

    /// Edit the display settings. Rapid edits merge into one undo step.
    pub fn edit_display(&mut self, edit: impl FnOnce(&mut DisplaySettings)) -> bool {
        self.history.commit_with(|state| {
            let mut next = state.clone();
            edit(&mut next.display);
            next
        })
    }

    /// A discrete hero edit that may fail. It becomes its own undo step and
    /// nothing is committed on error.
    pub fn try_edit_hero<R, E>(
        &mut self,
        edit: impl FnOnce(&mut HeroData) -> Result<R, E>,
    ) -> Result<R, E> {
        let mut next = self.state().clone();
        let out = edit(&mut next.hero)?;
        self.commit_step(next);
        Ok(out)
    }

    pub fn add_item(&mut self, collection: HeroCollection) -> String {
        let mut next = self.state().clone();
        let id = next.hero.add_item(collection);
        self.commit_step(next);
        id
    }

    pub fn remove_item(&mut self, collection: HeroCollection, id: &str) -> Result<(), ModelError> {
        self.try_edit_hero(|hero| hero.remove_item(collection, id))
    }

    pub fn move_item(
        &mut self,
        collection: HeroCollection,
        id: &str,
        to: usize,
    ) -> Result<(), ModelError> {
        self.try_edit_hero(|hero| hero.move_item(collection, id, to))
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear_history();
    }

    /// Run the command bound to a key press. Returns true if state changed.
    pub fn handle_shortcut(&mut self, shortcut: &Shortcut) -> bool {
        let Some(command) = shortcut.command() else {
            return false;
        };
        let changed = match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
        };
        debug!(command = command.name(), changed, "shortcut handled");
        changed
    }

    /// Replace the page with a template. Editor overlays stay as they are.
    /// On error nothing changes.
    pub fn import_template(&mut self, text: &str) -> Result<Vec<Repair>, FormatError> {
        let (template, repairs) = decode_with_report(text).map_err(|e| {
            warn!(error = %e, "template import rejected");
            e
        })?;

        let next = EditorState {
            display: template.display_settings_over(&self.state().display),
            hero: template.hero_data,
        };
        let changed = self.commit_step(next);
        info!(
            name = %template.name,
            repairs = repairs.len(),
            changed,
            "template imported"
        );
        Ok(repairs)
    }

    pub fn export_template(&self) -> serde_json::Result<String> {
        let state = self.state();
        encode(&state.hero, &state.display)
    }

    /// Suggested download name for `export_template`.
    pub fn export_file_name(&self) -> String {
        template_file_name(&self.state().hero.name)
    }

    /// Commit `next` as an undo step of its own.
    fn commit_step(&mut self, next: EditorState) -> bool {
        self.history.end_group();
        let changed = self.history.commit(next);
        self.history.end_group();
        debug!(changed, "discrete edit committed");
        changed
    }
}
