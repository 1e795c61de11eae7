//! TUI application state for modelbook.
//!
//! Wraps the [`Editor`] with the purely visual state: which panel has
//! focus, which form field is active, and any open confirmation dialog.

use std::time::Instant;

use crate::editor::{Editor, PendingDelete};
use crate::form::Field;

/// Which panel receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Form,
}

/// An open yes/no dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    Delete(PendingDelete),
    Quit,
}

impl Confirm {
    pub fn message(&self) -> String {
        match self {
            Self::Delete(pending) => pending.prompt(),
            Self::Quit => "Quit without writing unsaved changes?".to_string(),
        }
    }
}

/// Core application state for the TUI.
pub struct App {
    pub editor: Editor,
    pub focus: Focus,
    /// Active form field.
    pub field: Field,
    /// Show the API key in clear text.
    pub show_api_key: bool,
    pub confirm: Option<Confirm>,
    /// Field flagged by the last failed validation.
    pub invalid_field: Option<Field>,
    /// Row to resume from when navigating with nothing selected.
    anchor: usize,
}

impl App {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            focus: Focus::Sidebar,
            field: Field::DisplayName,
            show_api_key: false,
            confirm: None,
            invalid_field: None,
            anchor: 0,
        }
    }

    /// Expires the status message.
    pub fn tick(&mut self, now: Instant) {
        self.editor.status.clear_expired(now);
    }

    pub fn select_prev(&mut self) {
        let len = self.editor.registry().len();
        if len == 0 {
            return;
        }
        let target = match self.editor.selected_index() {
            Some(i) => i.saturating_sub(1),
            None => self.anchor.min(len - 1),
        };
        self.select(target);
    }

    pub fn select_next(&mut self) {
        let len = self.editor.registry().len();
        if len == 0 {
            return;
        }
        let target = match self.editor.selected_index() {
            Some(i) => (i + 1).min(len - 1),
            None => self.anchor.min(len - 1),
        };
        self.select(target);
    }

    fn select(&mut self, index: usize) {
        if self.editor.select_at(index) {
            self.anchor = index;
            self.invalid_field = None;
        }
    }

    pub fn focus_form(&mut self) {
        self.focus = Focus::Form;
    }

    /// Back to the list, discarding unapplied edits.
    pub fn focus_sidebar(&mut self) {
        self.focus = Focus::Sidebar;
        self.invalid_field = None;
        self.editor.reload_form();
    }

    pub fn begin_new(&mut self) {
        if let Some(i) = self.editor.selected_index() {
            self.anchor = i;
        }
        self.editor.begin_new();
        self.editor.status.info("New model: fill in the form and press Ctrl+S");
        self.invalid_field = None;
        self.field = Field::DisplayName;
        self.focus = Focus::Form;
    }

    /// Commits the form; on failure jumps to the offending field.
    pub fn apply(&mut self) {
        match self.editor.apply_changes() {
            Ok(()) => {
                self.invalid_field = None;
                if let Some(i) = self.editor.selected_index() {
                    self.anchor = i;
                }
            }
            Err(err) => {
                self.invalid_field = Some(err.field());
                self.field = err.field();
                self.focus = Focus::Form;
            }
        }
    }

    pub fn request_delete(&mut self) {
        match self.editor.request_delete() {
            Some(pending) => self.confirm = Some(Confirm::Delete(pending)),
            None => self.editor.status.warning("Nothing selected to delete"),
        }
    }

    /// Returns `true` if the app should exit now; otherwise a confirmation
    /// was opened. Unwritten changes always ask first, including those left
    /// behind by a failed auto-save.
    pub fn request_quit(&mut self) -> bool {
        if self.editor.is_dirty() {
            self.confirm = Some(Confirm::Quit);
            return false;
        }
        true
    }

    /// Resolves the open dialog. Returns `true` if the app should exit.
    pub fn answer_confirm(&mut self, yes: bool) -> bool {
        let Some(confirm) = self.confirm.take() else {
            return false;
        };
        if !yes {
            return false;
        }
        match confirm {
            Confirm::Delete(pending) => {
                if let Some(i) = self.editor.selected_index() {
                    self.anchor = i;
                }
                self.editor.confirm_delete(pending);
                self.invalid_field = None;
                false
            }
            Confirm::Quit => true,
        }
    }

    pub fn move_selected_up(&mut self) {
        if let Some(i) = self.editor.selected_index() {
            if self.editor.move_up(i) {
                self.anchor = i - 1;
            }
        }
    }

    pub fn move_selected_down(&mut self) {
        if let Some(i) = self.editor.selected_index() {
            if self.editor.move_down(i) {
                self.anchor = i + 1;
            }
        }
    }

    pub fn toggle_mark_selected(&mut self) {
        if let Some(i) = self.editor.selected_index() {
            self.editor.toggle_mark(i);
        }
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
    }
}
