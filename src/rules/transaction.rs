//! All-or-nothing roster mutation.
//!
//! A `Transaction` works on an O(1) clone of the roster and records every
//! change as a `RosterEvent`. Committing swaps the working copy in; dropping
//! the transaction (for instance on an early `?` return) discards it, so a
//! rejected command never leaves a half-applied cascade behind.

use log::debug;

use crate::core::{Cause, Flag, LifeState, Player, PlayerId, Roster};
use crate::events::{EventList, RosterEvent};

use super::error::EngineError;

pub(crate) struct Transaction {
    working: Roster,
    events: EventList,
}

impl Transaction {
    pub(crate) fn begin(roster: &Roster) -> Self {
        Self {
            working: roster.clone(),
            events: EventList::new(),
        }
    }

    /// Replace `roster` with the working copy and return what changed.
    pub(crate) fn commit(self, roster: &mut Roster) -> EventList {
        *roster = self.working;
        self.events
    }

    pub(crate) fn roster(&self) -> &Roster {
        &self.working
    }

    pub(crate) fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.working.get(id).ok_or(EngineError::UnknownPlayer(id))
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, EngineError> {
        self.working.get_mut(id).ok_or(EngineError::UnknownPlayer(id))
    }

    /// The single holder of a singleton flag.
    ///
    /// A missing or duplicated holder means the roster is corrupt.
    pub(crate) fn sole_holder(&self, flag: Flag) -> Result<PlayerId, EngineError> {
        let mut holders = self.working.find_all(move |p| p.has(flag)).map(Player::id);
        let first = holders
            .next()
            .ok_or_else(|| EngineError::invariant(format!("no player holds {flag:?}")))?;
        if let Some(second) = holders.next() {
            return Err(EngineError::invariant(format!(
                "{flag:?} is held by both {first} and {second}"
            )));
        }
        Ok(first)
    }

    /// Every player currently holding `flag`, in roster order.
    pub(crate) fn holders(&self, flag: Flag) -> Vec<PlayerId> {
        self.working
            .find_all(move |p| p.has(flag))
            .map(Player::id)
            .collect()
    }

    pub(crate) fn set_life(
        &mut self,
        id: PlayerId,
        state: LifeState,
        cause: Cause,
    ) -> Result<(), EngineError> {
        if self.player_mut(id)?.set_life(state, cause) {
            self.events.push(RosterEvent::LifeChanged {
                player: id,
                state,
                cause,
            });
        }
        Ok(())
    }

    pub(crate) fn kill(&mut self, id: PlayerId, cause: Cause) -> Result<(), EngineError> {
        debug!("{id} dies: {cause:?}");
        self.set_life(id, LifeState::Dead, cause)
    }

    pub(crate) fn grant(&mut self, id: PlayerId, flag: Flag) -> Result<(), EngineError> {
        if self.player_mut(id)?.grant(flag) {
            self.events.push(RosterEvent::FlagGranted { player: id, flag });
        }
        Ok(())
    }

    pub(crate) fn revoke(&mut self, id: PlayerId, flag: Flag) -> Result<(), EngineError> {
        if self.player_mut(id)?.revoke(flag) {
            self.events.push(RosterEvent::FlagRevoked { player: id, flag });
        }
        Ok(())
    }

    pub(crate) fn mark_lovers_chosen(&mut self) {
        self.working.mark_lovers_chosen();
    }
}
