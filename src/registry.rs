//! Ordered collection of model records.
//!
//! [`Registry`] owns the records in display order and hands out a
//! [`RecordId`] for each one. All mutations are expressed in ids; indices
//! only appear in [`Registry::id_at`] and [`Registry::position`].

use std::collections::BTreeSet;

use crate::model::{ModelRecord, RecordId};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    id: RecordId,
    record: ModelRecord,
}

/// The ordered list of records being edited.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Registry {
    /// Builds a registry from records in file order.
    pub fn from_records(records: Vec<ModelRecord>) -> Self {
        let mut registry = Self::default();
        for record in records {
            registry.push(record);
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a record and returns its new id.
    pub fn push(&mut self, record: ModelRecord) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, record });
        id
    }

    pub fn get(&self, id: RecordId) -> Option<&ModelRecord> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.record)
    }

    /// Replaces the record behind `id`. Returns `false` if the id is gone.
    pub fn replace(&mut self, id: RecordId, record: ModelRecord) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.record = record;
                true
            }
            None => false,
        }
    }

    /// Removes the record behind `id`, returning it.
    pub fn remove(&mut self, id: RecordId) -> Option<ModelRecord> {
        let pos = self.position(id)?;
        Some(self.entries.remove(pos).record)
    }

    /// Removes every record whose id is in `ids`. Returns how many went.
    pub fn remove_many(&mut self, ids: &BTreeSet<RecordId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id));
        before - self.entries.len()
    }

    /// Swaps the record with its predecessor. `false` at the top or if absent.
    pub fn move_up(&mut self, id: RecordId) -> bool {
        match self.position(id) {
            Some(pos) if pos > 0 => {
                self.entries.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    /// Swaps the record with its successor. `false` at the bottom or if absent.
    pub fn move_down(&mut self, id: RecordId) -> bool {
        match self.position(id) {
            Some(pos) if pos + 1 < self.entries.len() => {
                self.entries.swap(pos, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// Current index of `id` in display order.
    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Id of the record at `index`, if in bounds.
    pub fn id_at(&self, index: usize) -> Option<RecordId> {
        self.entries.get(index).map(|e| e.id)
    }

    /// Ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// `(id, record)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &ModelRecord)> + '_ {
        self.entries.iter().map(|e| (e.id, &e.record))
    }

    /// Clones the records out in display order, for persistence.
    pub fn records(&self) -> Vec<ModelRecord> {
        self.entries.iter().map(|e| e.record.clone()).collect()
    }
}
