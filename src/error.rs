//! Engine error taxonomy.
//!
//! Only genuinely exceptional situations surface here: bad inputs rejected
//! before any allocation work, and collaborator failures (catalog, store).
//! Unfilled slots and manual-edit collisions are *data*, not errors — they
//! are reported through [`crate::models::UnfilledSlot`] and
//! [`crate::validation::EntryConflict`] so the caller always receives a
//! usable partial result.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::persistence::StoreError;

/// Errors raised by the generation entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request did not name a class.
    #[error("class identifier must not be empty")]
    MissingClassId,

    /// The catalog returned no subjects for the requested class.
    #[error("no subjects found for class '{0}'")]
    NoSubjects(String),

    /// The requested grid has no working days.
    #[error("at least one working day is required")]
    NoWorkingDays,

    /// The requested grid has zero periods per day.
    #[error("periods per day must be positive")]
    NoPeriods,

    /// Two subjects in the catalog share the same identifier.
    #[error("duplicate subject identifier '{0}' in class catalog")]
    DuplicateSubject(String),

    /// The resource catalog failed to deliver inputs.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The assignment store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            EngineError::MissingClassId.to_string(),
            "class identifier must not be empty"
        );
        assert_eq!(
            EngineError::NoSubjects("10A".into()).to_string(),
            "no subjects found for class '10A'"
        );
        assert_eq!(
            EngineError::DuplicateSubject("math".into()).to_string(),
            "duplicate subject identifier 'math' in class catalog"
        );
    }
}
