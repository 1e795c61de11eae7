//! Registry mutations as functions of explicit editor state.
//!
//! Each operation takes the registry and the prior [`EditorState`] and
//! returns the next state. `None` means the operation was a no-op and
//! neither the registry nor the state changed.

use std::collections::BTreeSet;

use crate::form::{FormData, ValidationError};
use crate::model::RecordId;
use crate::registry::Registry;

/// Selection and multi-select marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// The record loaded in the form, or `None` in "new record" mode.
    pub selection: Option<RecordId>,
    /// Records marked for bulk deletion.
    pub marked: BTreeSet<RecordId>,
}

pub fn select(registry: &Registry, state: &EditorState, index: usize) -> Option<EditorState> {
    let id = registry.id_at(index)?;
    Some(EditorState {
        selection: Some(id),
        ..state.clone()
    })
}

pub fn begin_new(state: &EditorState) -> EditorState {
    EditorState {
        selection: None,
        ..state.clone()
    }
}

/// Commits the form: overwrite the selection in place, or append and select.
pub fn apply(
    registry: &mut Registry,
    state: &EditorState,
    form: &FormData,
) -> Result<EditorState, ValidationError> {
    let target = state.selection.filter(|id| registry.get(*id).is_some());
    let record = form.validate(target.and_then(|id| registry.get(id)))?;

    let selection = match target {
        Some(id) => {
            registry.replace(id, record);
            id
        }
        None => registry.push(record),
    };
    Ok(EditorState {
        selection: Some(selection),
        ..state.clone()
    })
}

pub fn delete(registry: &mut Registry, state: &EditorState, id: RecordId) -> Option<EditorState> {
    registry.remove(id)?;
    let mut marked = state.marked.clone();
    marked.remove(&id);
    Some(EditorState {
        selection: None,
        marked,
    })
}

/// Removes every record in `ids` in one pass. Clears selection and marks.
pub fn delete_many(registry: &mut Registry, ids: &BTreeSet<RecordId>) -> Option<EditorState> {
    if registry.remove_many(ids) == 0 {
        return None;
    }
    Some(EditorState::default())
}

pub fn move_up(registry: &mut Registry, state: &EditorState, id: RecordId) -> Option<EditorState> {
    registry.move_up(id).then(|| EditorState {
        selection: Some(id),
        ..state.clone()
    })
}

pub fn move_down(
    registry: &mut Registry,
    state: &EditorState,
    id: RecordId,
) -> Option<EditorState> {
    registry.move_down(id).then(|| EditorState {
        selection: Some(id),
        ..state.clone()
    })
}

pub fn toggle_mark(registry: &Registry, state: &EditorState, id: RecordId) -> Option<EditorState> {
    registry.get(id)?;
    let mut marked = state.marked.clone();
    if !marked.remove(&id) {
        marked.insert(id);
    }
    Some(EditorState {
        marked,
        ..state.clone()
    })
}

/// Marks every record, or unmarks all when every record is already marked.
pub fn toggle_mark_all(registry: &Registry, state: &EditorState) -> EditorState {
    let all_marked = !registry.is_empty() && registry.ids().all(|id| state.marked.contains(&id));
    let marked = if all_marked {
        BTreeSet::new()
    } else {
        registry.ids().collect()
    };
    EditorState {
        marked,
        ..state.clone()
    }
}
