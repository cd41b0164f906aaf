//! The moderator engine: command and query surface over one roster.
//!
//! `Engine` owns the roster, assigns revisions, and notifies observers.
//! All commands take `&mut self` and run to completion, so there is never
//! more than one command in flight.

use log::debug;

use crate::core::{Cause, Flag, LifeState, Player, PlayerId, RoleKind, Roster};
use crate::events::{Changeset, EventList, RosterEvent, RosterObserver};
use crate::rules::{check_state, Alert, CascadeResolver, EngineError, FlagAssigner};

/// A running game from the moderator's point of view.
///
/// ## Example
///
/// ```
/// use werewolf_moderator::core::{Cause, Flag, LifeState, RoleKind};
/// use werewolf_moderator::{Alert, Engine};
///
/// let mut engine = Engine::new();
/// let amor = engine.add_player("Amor", RoleKind::Cupid);
/// let bea = engine.add_player("Bea", RoleKind::Villager);
/// engine.add_player("Carl", RoleKind::Werewolf);
/// assert_eq!(engine.check_state(), Alert::NeedLover);
///
/// engine.set_flag(bea, Flag::Lover).unwrap();
/// engine.apply_cause(bea, Cause::Eat, LifeState::Dead).unwrap();
///
/// // Cupid died of heartbreak with her
/// assert!(!engine.player(amor).unwrap().is_alive());
/// assert_eq!(engine.check_state(), Alert::NeedMayor);
/// ```
#[derive(Default)]
pub struct Engine {
    roster: Roster,
    revision: u64,
    observers: Vec<Box<dyn RosterObserver>>,
}

impl Engine {
    /// Create an engine with an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine around an existing roster (e.g. one loaded for
    /// debugging).
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    /// Register an observer for committed changes.
    pub fn subscribe(&mut self, observer: impl RosterObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Queries ===

    /// Read-only view of the roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Current revision. Increases by one for every command that changed
    /// something.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Look up a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.get(id)
    }

    /// The first player holding `flag`.
    #[must_use]
    pub fn get_player(&self, flag: Flag) -> Option<&Player> {
        self.roster.find(flag)
    }

    /// What the moderator must resolve next.
    #[must_use]
    pub fn check_state(&self) -> Alert {
        check_state(&self.roster)
    }

    // === Commands ===

    /// Add a player. Always succeeds.
    pub fn add_player(&mut self, name: impl Into<String>, kind: RoleKind) -> PlayerId {
        let id = self.roster.add(name, kind);
        debug!("added {id} as {kind:?}");

        let mut events = EventList::new();
        events.push(RosterEvent::PlayerAdded { player: id, kind });
        if let Some(player) = self.roster.get(id) {
            for flag in player.flags().iter() {
                events.push(RosterEvent::FlagGranted { player: id, flag });
            }
        }
        self.publish(events);
        id
    }

    /// Remove the players at the given roster positions. No cascade runs.
    ///
    /// Removing the cupid also clears the remaining lover's `lover` flag.
    pub fn remove_players(&mut self, indices: impl IntoIterator<Item = usize>) -> Changeset {
        let lovers: Vec<PlayerId> = self
            .roster
            .find_all(|p| p.has(Flag::Lover))
            .map(Player::id)
            .collect();

        let mut events: EventList = self
            .roster
            .remove(indices)
            .into_iter()
            .map(|player| RosterEvent::PlayerRemoved { player })
            .collect();
        for lover in lovers {
            if self.roster.get(lover).is_some_and(|p| !p.has(Flag::Lover)) {
                debug!("{lover} lost their cupid and is no longer a lover");
                events.push(RosterEvent::FlagRevoked {
                    player: lover,
                    flag: Flag::Lover,
                });
            }
        }
        self.publish(events)
    }

    /// Apply a cause to a player and run its cascade.
    pub fn apply_cause(
        &mut self,
        target: PlayerId,
        cause: Cause,
        intended: LifeState,
    ) -> Result<Changeset, EngineError> {
        let events = CascadeResolver::apply_cause(&mut self.roster, target, cause, intended)?;
        Ok(self.publish(events))
    }

    /// Give a player a flag by moderator choice. Idempotent.
    pub fn set_flag(&mut self, target: PlayerId, flag: Flag) -> Result<Changeset, EngineError> {
        let events = FlagAssigner::set_flag(&mut self.roster, target, flag)?;
        Ok(self.publish(events))
    }

    /// Take a flag away from a player by moderator choice.
    pub fn clear_flag(&mut self, target: PlayerId, flag: Flag) -> Result<Changeset, EngineError> {
        let events = FlagAssigner::clear_flag(&mut self.roster, target, flag)?;
        Ok(self.publish(events))
    }

    /// Stamp a revision on committed events and notify observers.
    fn publish(&mut self, events: EventList) -> Changeset {
        if events.is_empty() {
            return Changeset {
                revision: self.revision,
                events,
            };
        }

        self.revision += 1;
        let changes = Changeset {
            revision: self.revision,
            events,
        };
        for observer in &mut self.observers {
            observer.roster_changed(&self.roster, &changes);
        }
        changes
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("roster", &self.roster)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}
