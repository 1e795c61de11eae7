//! The model registry editor.
//!
//! [`Editor`] ties the registry, the edit form, the status line and the
//! on-disk store together. Front ends talk to it in list positions; inside,
//! everything is keyed by [`RecordId`] through the functions in [`ops`].

pub mod ops;

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::{ConfigDocument, ConfigError, ConfigStore};
use crate::form::{FormData, ValidationError};
use crate::model::{ModelRecord, RecordId};
use crate::registry::Registry;
use crate::status::StatusLine;

pub use ops::EditorState;

/// When mutations reach the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    /// Write after every successful mutation.
    #[default]
    Auto,
    /// Write only on an explicit [`Editor::save`].
    Manual,
}

/// A deletion waiting for the user's yes/no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    One { id: RecordId, name: String },
    Marked(BTreeSet<RecordId>),
}

impl PendingDelete {
    /// Question to put to the user.
    pub fn prompt(&self) -> String {
        match self {
            Self::One { name, .. } if name.is_empty() => "Delete this model?".to_string(),
            Self::One { name, .. } => format!("Delete \"{name}\"?"),
            Self::Marked(ids) => format!("Delete {} selected model(s)?", ids.len()),
        }
    }
}

/// Editing session over one config document.
pub struct Editor {
    store: ConfigStore,
    document: ConfigDocument,
    registry: Registry,
    state: EditorState,
    policy: SavePolicy,
    dirty: bool,
    /// Contents of the edit form.
    pub form: FormData,
    /// Transient feedback for the user.
    pub status: StatusLine,
}

impl Editor {
    /// Loads the document behind `store` and opens an editing session.
    ///
    /// Never fails: an unreadable or malformed document is reported on the
    /// status line and the session starts with an empty registry. The file
    /// itself is left alone until the next persisted mutation.
    pub fn load(store: ConfigStore, policy: SavePolicy) -> Self {
        let mut status = StatusLine::new();
        let mut report = |err: ConfigError| {
            tracing::error!(%err, "failed to load config");
            status.error(format!("Failed to load config: {err}"));
        };
        // A document that parsed as an object is kept even when its records
        // do not decode, so the other top-level keys reach the next save.
        let (document, records) = match store.load() {
            Ok(doc) => match doc.custom_models(store.path()) {
                Ok(records) => (doc, records),
                Err(err) => {
                    report(err);
                    (doc, Vec::new())
                }
            },
            Err(err) => {
                report(err);
                (ConfigDocument::default(), Vec::new())
            }
        };

        tracing::debug!(count = records.len(), ?policy, "editor ready");
        let mut editor = Self {
            store,
            document,
            registry: Registry::from_records(records),
            state: EditorState::default(),
            policy,
            dirty: false,
            form: FormData::default(),
            status,
        };
        if !editor.select_at(0) {
            editor.begin_new();
        }
        editor
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn policy(&self) -> SavePolicy {
        self.policy
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// True when the registry has changes that are not on disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Position of the selected record, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.state.selection.and_then(|id| self.registry.position(id))
    }

    pub fn selected_record(&self) -> Option<&ModelRecord> {
        self.state.selection.and_then(|id| self.registry.get(id))
    }

    pub fn is_marked(&self, id: RecordId) -> bool {
        self.state.marked.contains(&id)
    }

    /// Selects the record at `index` and loads it into the form.
    /// Out-of-bounds indices are ignored.
    pub fn select_at(&mut self, index: usize) -> bool {
        let Some(state) = ops::select(&self.registry, &self.state, index) else {
            return false;
        };
        self.state = state;
        self.reload_form();
        true
    }

    /// Switches to "new record" mode with a blank form.
    pub fn begin_new(&mut self) {
        self.state = ops::begin_new(&self.state);
        self.form = FormData::default();
    }

    /// Reloads the form from the selection, discarding edits.
    pub fn reload_form(&mut self) {
        self.form = match self.selected_record() {
            Some(record) => FormData::from_record(record),
            None => FormData::default(),
        };
    }

    /// Validates the form and commits it to the registry.
    ///
    /// On failure the registry, the selection and the form are untouched
    /// and the error is shown on the status line.
    pub fn apply_changes(&mut self) -> Result<(), ValidationError> {
        let was_new = self.state.selection.is_none();
        let state = match ops::apply(&mut self.registry, &self.state, &self.form) {
            Ok(state) => state,
            Err(err) => {
                self.status.error(err.to_string());
                return Err(err);
            }
        };
        self.state = state;
        self.reload_form();
        tracing::info!(index = ?self.selected_index(), created = was_new, "applied form");

        let msg = if was_new { "Model added" } else { "Changes saved!" };
        self.commit(msg);
        Ok(())
    }

    /// Builds the confirmation for a delete: marked records if any,
    /// otherwise the selection. `None` when there is nothing to delete.
    pub fn request_delete(&self) -> Option<PendingDelete> {
        if !self.state.marked.is_empty() {
            return Some(PendingDelete::Marked(self.state.marked.clone()));
        }
        let id = self.state.selection?;
        let record = self.registry.get(id)?;
        Some(PendingDelete::One {
            id,
            name: record.model_display_name.clone(),
        })
    }

    /// Carries out a delete the user agreed to.
    pub fn confirm_delete(&mut self, pending: PendingDelete) -> usize {
        match pending {
            PendingDelete::One { id, .. } => match self.registry.position(id) {
                Some(index) => usize::from(self.delete_at(index)),
                None => 0,
            },
            PendingDelete::Marked(ids) => self.delete_ids(&ids),
        }
    }

    /// Removes the record at `index`. Confirmation is the caller's job.
    pub fn delete_at(&mut self, index: usize) -> bool {
        let Some(id) = self.registry.id_at(index) else {
            return false;
        };
        let Some(state) = ops::delete(&mut self.registry, &self.state, id) else {
            return false;
        };
        self.state = state;
        self.form = FormData::default();
        tracing::info!(index, "deleted model");
        self.commit("Model deleted");
        true
    }

    /// Removes the records at `indices` in one step. Out-of-bounds and
    /// duplicate indices are ignored. Returns how many were removed.
    pub fn delete_many(&mut self, indices: &[usize]) -> usize {
        let ids: BTreeSet<RecordId> = indices
            .iter()
            .filter_map(|&i| self.registry.id_at(i))
            .collect();
        self.delete_ids(&ids)
    }

    fn delete_ids(&mut self, ids: &BTreeSet<RecordId>) -> usize {
        let before = self.registry.len();
        let Some(state) = ops::delete_many(&mut self.registry, ids) else {
            return 0;
        };
        let removed = before - self.registry.len();
        self.state = state;
        self.form = FormData::default();
        tracing::info!(removed, "deleted models");
        self.commit(format!("Deleted {removed} model(s)"));
        removed
    }

    /// Swaps the record at `index` with the one above it.
    pub fn move_up(&mut self, index: usize) -> bool {
        let Some(id) = self.registry.id_at(index) else {
            return false;
        };
        match ops::move_up(&mut self.registry, &self.state, id) {
            Some(state) => {
                self.finish_move(state);
                self.commit("Model moved up");
                true
            }
            None => false,
        }
    }

    /// Swaps the record at `index` with the one below it.
    pub fn move_down(&mut self, index: usize) -> bool {
        let Some(id) = self.registry.id_at(index) else {
            return false;
        };
        match ops::move_down(&mut self.registry, &self.state, id) {
            Some(state) => {
                self.finish_move(state);
                self.commit("Model moved down");
                true
            }
            None => false,
        }
    }

    fn finish_move(&mut self, state: EditorState) {
        let reselected = state.selection != self.state.selection;
        self.state = state;
        if reselected {
            self.reload_form();
        }
    }

    /// Marks or unmarks the record at `index` for bulk deletion.
    pub fn toggle_mark(&mut self, index: usize) -> bool {
        let Some(id) = self.registry.id_at(index) else {
            return false;
        };
        match ops::toggle_mark(&self.registry, &self.state, id) {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    /// Marks every record, or clears all marks if all are marked.
    pub fn toggle_mark_all(&mut self) {
        self.state = ops::toggle_mark_all(&self.registry, &self.state);
    }

    /// True when there is at least one record and every record is marked.
    pub fn all_marked(&self) -> bool {
        !self.registry.is_empty() && self.registry.ids().all(|id| self.is_marked(id))
    }

    /// Writes the registry to disk now, whatever the save policy.
    ///
    /// On failure the error is shown and returned; in-memory state is kept
    /// so the user can retry.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.persist() {
            Ok(()) => {
                let msg = format!("Saved {}", self.path().display());
                self.status.success(msg);
                Ok(())
            }
            Err(err) => {
                self.status.error(format!("Failed to save: {err}"));
                Err(err)
            }
        }
    }

    fn persist(&mut self) -> Result<(), ConfigError> {
        self.document.set_custom_models(&self.registry.records())?;
        if let Err(err) = self.store.save(&self.document) {
            tracing::error!(%err, "failed to save config");
            return Err(err);
        }
        self.dirty = false;
        Ok(())
    }

    /// Marks the registry changed and persists per policy, reporting `msg`
    /// on success.
    fn commit(&mut self, msg: impl Into<String>) {
        self.dirty = true;
        match self.policy {
            SavePolicy::Auto => match self.persist() {
                Ok(()) => self.status.success(msg),
                Err(err) => self.status.error(format!("Failed to save: {err}")),
            },
            SavePolicy::Manual => {
                self.status
                    .info(format!("{} (unsaved, Ctrl+W to write)", msg.into()));
            }
        }
    }
}

#[cfg(test)]
mod tests;
