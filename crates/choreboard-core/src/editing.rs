//! The "is the user editing" seam.

use std::sync::atomic::{AtomicBool, Ordering};

/// Predicate supplied by the presentation layer.
///
/// While it reports `true` the reconciler must not pull: a merge replaces
/// the people list wholesale and would destroy in-progress keystrokes. What
/// counts as "editing" is the front end's business (a focused text field, a
/// half-answered prompt); the sync service only asks.
pub trait EditingGuard: Send + Sync {
    fn is_editing(&self) -> bool;
}

/// Guard for fronts with no editable focus state.
pub struct NeverEditing;

impl EditingGuard for NeverEditing {
    fn is_editing(&self) -> bool {
        false
    }
}

/// Shared flag a front end raises while the user is mid-edit.
#[derive(Default)]
pub struct EditingFlag(AtomicBool);

impl EditingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_editing(&self, editing: bool) {
        self.0.store(editing, Ordering::SeqCst);
    }
}

impl EditingGuard for EditingFlag {
    fn is_editing(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
