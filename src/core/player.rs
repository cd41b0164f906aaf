//! Player identification and per-player game data.
//!
//! ## PlayerId
//!
//! Stable identifier handed out by the roster. IDs are never reused, so an
//! ID held by the presentation layer can't silently start pointing at a
//! different player after a removal.
//!
//! ## Player
//!
//! Name, role, life state and flags. Outside this crate a `Player` is
//! read-only; life state, cause and flags change only through the
//! resolution rules.

use serde::{Deserialize, Serialize};

use super::flags::{Flag, FlagSet};
use super::role::{Archetype, Cause, Role, RoleKind};

/// Unique, never-reused player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Authoritative life status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

/// A player on the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    role: Role,
    state: LifeState,
    flags: FlagSet,
    /// Potion flags this player has used up or lost. Never granted again.
    #[serde(default)]
    spent: FlagSet,
}

impl Player {
    /// Create an alive player with no flags.
    ///
    /// Role onboarding (cupid/witch/hunter flags) is applied by the roster,
    /// not here.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, kind: RoleKind) -> Self {
        Self {
            id,
            name: name.into(),
            role: Role::new(kind),
            state: LifeState::Alive,
            flags: FlagSet::new(),
            spent: FlagSet::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Shorthand for `role().kind.archetype()`.
    #[must_use]
    pub fn archetype(&self) -> Archetype {
        self.role.kind.archetype()
    }

    #[must_use]
    pub fn cause(&self) -> Cause {
        self.role.cause
    }

    #[must_use]
    pub fn state(&self) -> LifeState {
        self.state
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state == LifeState::Alive
    }

    #[must_use]
    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    #[must_use]
    pub fn has(&self, flag: Flag) -> bool {
        self.flags.contains(flag)
    }

    /// True if `potion` was already consumed or destroyed for this player.
    #[must_use]
    pub fn has_spent(&self, potion: Flag) -> bool {
        self.spent.contains(potion)
    }

    // === Engine-only mutation ===

    /// Set life state and cause. Returns true if anything changed.
    pub(crate) fn set_life(&mut self, state: LifeState, cause: Cause) -> bool {
        let changed = self.state != state || self.role.cause != cause;
        self.state = state;
        self.role.cause = cause;
        changed
    }

    pub(crate) fn grant(&mut self, flag: Flag) -> bool {
        self.flags.insert(flag)
    }

    /// Remove a flag. Removing a potion marks it spent.
    pub(crate) fn revoke(&mut self, flag: Flag) -> bool {
        let removed = self.flags.remove(flag);
        if removed && flag.is_potion() {
            self.spent.insert(flag);
        }
        removed
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.role.kind)
    }
}
