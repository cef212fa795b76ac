//! Assignment storage and replace-all persistence.
//!
//! The engine does not own a database; it writes through the
//! [`AssignmentStore`] trait, a thin find/delete-many/insert-many record
//! store scoped by (class, section). Saving a timetable is a destructive
//! replace, not a merge: prior entries for the scope are deleted, then the
//! new set inserted. If the insert fails, the previous entries are
//! restored so a half-replaced timetable is never left visible.
//!
//! Serialization of concurrent saves for the *same* scope is the storage
//! layer's responsibility; the engine itself holds no locks.

use log::{debug, info};
use thiserror::Error;

use crate::models::{Assignment, Slot, Timetable};
use crate::validation::{check_entry, EntryConflict};

/// Errors from the storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing record store failed.
    #[error("assignment store backend error: {0}")]
    Backend(String),
}

/// Errors from the replace-all save path.
#[derive(Debug, Error)]
pub enum PersistError {
    /// An entry does not belong to the scope being replaced.
    #[error("entry for class '{0}' is outside the scope being replaced")]
    ScopeMismatch(String),

    /// The save failed; the prior schedule was restored and remains authoritative.
    #[error("save failed, prior schedule restored: {0}")]
    SaveFailed(StoreError),

    /// The save failed and the rollback attempt also failed.
    #[error("save failed and rollback failed, store may be inconsistent: {0}")]
    Inconsistent(StoreError),

    /// The storage backend failed before any write was attempted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Rejection of a manual entry create/update.
#[derive(Debug, Error)]
pub enum EditRejection {
    /// One or more uniqueness dimensions collided; nothing was written.
    #[error("entry conflicts with {} existing assignment(s)", .0.len())]
    Conflicts(Vec<EntryConflict>),

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Find/delete-many/insert-many record store for timetable entries.
pub trait AssignmentStore {
    /// Entries stored for one (class, section) scope.
    fn load_scope(&self, class_id: &str, section: Option<&str>)
        -> Result<Vec<Assignment>, StoreError>;

    /// All entries across the institution.
    fn load_all(&self) -> Result<Vec<Assignment>, StoreError>;

    /// Deletes all entries of a scope, returning how many were removed.
    fn delete_scope(&mut self, class_id: &str, section: Option<&str>)
        -> Result<usize, StoreError>;

    /// Deletes the entry of a scope at one slot, returning how many were removed.
    fn delete_at(
        &mut self,
        class_id: &str,
        section: Option<&str>,
        slot: Slot,
    ) -> Result<usize, StoreError>;

    /// Inserts entries, returning how many were written.
    fn insert_many(&mut self, entries: &[Assignment]) -> Result<usize, StoreError>;
}

/// Replace-all persistence over an [`AssignmentStore`].
#[derive(Debug)]
pub struct SchedulePersister<S: AssignmentStore> {
    store: S,
}

impl<S: AssignmentStore> SchedulePersister<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwraps the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Atomically replaces all stored entries of a (class, section) scope.
    ///
    /// Fails closed: if the insert does not complete, the prior entries
    /// are restored and [`PersistError::SaveFailed`] is returned; if even
    /// the restore fails, [`PersistError::Inconsistent`] signals that
    /// manual repair is needed.
    pub fn replace_all(
        &mut self,
        class_id: &str,
        section: Option<&str>,
        entries: &[Assignment],
    ) -> Result<usize, PersistError> {
        for entry in entries {
            if !entry.same_scope(class_id, section) {
                return Err(PersistError::ScopeMismatch(entry.class_id.clone()));
            }
        }

        let previous = self.store.load_scope(class_id, section)?;
        let removed = self.store.delete_scope(class_id, section)?;
        debug!(
            "replacing {} stored entries for class {} with {} new entries",
            removed,
            class_id,
            entries.len()
        );

        match self.store.insert_many(entries) {
            Ok(saved) => {
                info!("saved {} timetable entries for class {}", saved, class_id);
                Ok(saved)
            }
            Err(err) => {
                if self.store.delete_scope(class_id, section).is_err() {
                    return Err(PersistError::Inconsistent(err));
                }
                match self.store.insert_many(&previous) {
                    Ok(_) => Err(PersistError::SaveFailed(err)),
                    Err(_) => Err(PersistError::Inconsistent(err)),
                }
            }
        }
    }

    /// Saves a generated (or hand-edited) timetable via replace-all.
    pub fn save_timetable(&mut self, timetable: &Timetable) -> Result<usize, PersistError> {
        self.replace_all(
            &timetable.class_id,
            timetable.section.as_deref(),
            &timetable.assignments,
        )
    }

    /// Creates or updates one entry after conflict validation.
    ///
    /// The candidate is checked against every stored assignment across the
    /// institution; a violated dimension rejects the edit with the full
    /// conflict list and nothing is written. For an update, `replaces`
    /// names the entry's prior slot, which is removed on acceptance.
    pub fn apply_entry(
        &mut self,
        entry: Assignment,
        replaces: Option<Slot>,
    ) -> Result<(), EditRejection> {
        let existing = self.store.load_all()?;
        check_entry(&entry, &existing, replaces).map_err(EditRejection::Conflicts)?;

        if let Some(slot) = replaces {
            self.store
                .delete_at(&entry.class_id, entry.section.as_deref(), slot)?;
        }
        debug!(
            "writing manual entry for class {} at {}",
            entry.class_id, entry.slot
        );
        self.store.insert_many(std::slice::from_ref(&entry))?;
        Ok(())
    }
}

/// Vec-backed store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Vec<Assignment>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssignmentStore for InMemoryStore {
    fn load_scope(
        &self,
        class_id: &str,
        section: Option<&str>,
    ) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.same_scope(class_id, section))
            .cloned()
            .collect())
    }

    fn load_all(&self) -> Result<Vec<Assignment>, StoreError> {
        Ok(self.entries.clone())
    }

    fn delete_scope(
        &mut self,
        class_id: &str,
        section: Option<&str>,
    ) -> Result<usize, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|e| !e.same_scope(class_id, section));
        Ok(before - self.entries.len())
    }

    fn delete_at(
        &mut self,
        class_id: &str,
        section: Option<&str>,
        slot: Slot,
    ) -> Result<usize, StoreError> {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.same_scope(class_id, section) && e.slot == slot));
        Ok(before - self.entries.len())
    }

    fn insert_many(&mut self, entries: &[Assignment]) -> Result<usize, StoreError> {
        self.entries.extend_from_slice(entries);
        Ok(entries.len())
    }
}
