//! Roster observers.
//!
//! The presentation layer subscribes to the engine instead of the engine
//! reaching into view state. Observers are called once per successful
//! command that changed something, after the change is committed.

use crate::core::Roster;

use super::event::Changeset;

/// Receives committed roster changes.
///
/// Any `FnMut(&Roster, &Changeset)` closure is an observer.
pub trait RosterObserver {
    /// Called after `changes` have been applied; `roster` is the new state.
    fn roster_changed(&mut self, roster: &Roster, changes: &Changeset);
}

impl<F> RosterObserver for F
where
    F: FnMut(&Roster, &Changeset),
{
    fn roster_changed(&mut self, roster: &Roster, changes: &Changeset) {
        self(roster, changes);
    }
}

/// Observer that keeps every changeset it sees.
///
/// Handy for an action log or for tests.
#[derive(Clone, Debug, Default)]
pub struct ChangeLog {
    entries: Vec<Changeset>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded changesets, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Changeset] {
        &self.entries
    }

    /// Revision of the most recent changeset.
    #[must_use]
    pub fn latest_revision(&self) -> Option<u64> {
        self.entries.last().map(|c| c.revision)
    }
}

impl RosterObserver for ChangeLog {
    fn roster_changed(&mut self, _roster: &Roster, changes: &Changeset) {
        self.entries.push(changes.clone());
    }
}
