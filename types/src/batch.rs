//! Result type for fail-fast batch folds.

use serde::{Deserialize, Serialize};

/// Outcome of a bounded-batch operation processed as a strict left-to-right
/// fold.
///
/// On the first element failure the fold stops: `applied` elements remain
/// committed (no rollback), no later element is attempted, and `halted`
/// carries the error. A fully successful batch has `halted == None`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchReport<E> {
    /// Number of elements applied before the fold stopped.
    pub applied: u32,
    /// The error that halted the fold, if any.
    pub halted: Option<E>,
}

impl<E> BatchReport<E> {
    /// A batch in which every element was applied.
    pub fn complete(applied: u32) -> Self {
        Self {
            applied,
            halted: None,
        }
    }

    /// A batch halted by `error` after `applied` successful elements.
    pub fn halted_at(applied: u32, error: E) -> Self {
        Self {
            applied,
            halted: Some(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }
}
