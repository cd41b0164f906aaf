//! Roster change events.
//!
//! Every command that changes the roster reports what changed as a list of
//! `RosterEvent`s wrapped in a `Changeset`. The changeset's revision is a
//! monotonic token: presentation can compare it with the last revision it
//! rendered instead of diffing the roster.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cause, Flag, LifeState, PlayerId, RoleKind};

/// A single change to the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum RosterEvent {
    /// A player joined the roster.
    PlayerAdded { player: PlayerId, kind: RoleKind },

    /// A player was removed as a setup correction.
    PlayerRemoved { player: PlayerId },

    /// A player's life state or recorded cause changed.
    LifeChanged {
        player: PlayerId,
        state: LifeState,
        cause: Cause,
    },

    /// A flag was granted.
    FlagGranted { player: PlayerId, flag: Flag },

    /// A flag was removed (consumed, cleared by a cascade, or reassigned).
    FlagRevoked { player: PlayerId, flag: Flag },
}

impl RosterEvent {
    /// The player this event concerns.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            RosterEvent::PlayerAdded { player, .. }
            | RosterEvent::PlayerRemoved { player }
            | RosterEvent::LifeChanged { player, .. }
            | RosterEvent::FlagGranted { player, .. }
            | RosterEvent::FlagRevoked { player, .. } => *player,
        }
    }

    /// True if this event records a death.
    #[must_use]
    pub fn is_death(&self) -> bool {
        matches!(
            self,
            RosterEvent::LifeChanged {
                state: LifeState::Dead,
                ..
            }
        )
    }
}

/// Events collected while a command runs.
///
/// Most commands touch one or two players, so a handful of events stay
/// inline.
pub type EventList = SmallVec<[RosterEvent; 4]>;

/// The outcome of one successful command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    /// Roster revision after the command. Unchanged if `events` is empty.
    pub revision: u64,

    /// What changed, in the order it happened.
    pub events: EventList,
}

impl Changeset {
    /// True if the command changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Players who died during this command, in order, without duplicates.
    #[must_use]
    pub fn deaths(&self) -> Vec<PlayerId> {
        let mut dead = Vec::new();
        for event in self.events.iter().filter(|e| e.is_death()) {
            if !dead.contains(&event.player()) {
                dead.push(event.player());
            }
        }
        dead
    }

    /// Check whether any event concerns `player`.
    #[must_use]
    pub fn touches(&self, player: PlayerId) -> bool {
        self.events.iter().any(|e| e.player() == player)
    }
}
