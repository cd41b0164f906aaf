//! The roster: ordered collection of players and single source of truth.
//!
//! Insertion order is display order. Players live in an `im::Vector`, so
//! cloning a roster is O(1); the resolution rules lean on this to run each
//! command against a snapshot and commit only when it succeeds.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::flags::Flag;
use super::player::{Player, PlayerId};
use super::role::{Archetype, RoleKind};

/// Ordered player collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vector<Player>,
    /// Next ID to hand out. IDs are never reused.
    next_id: u32,
    /// Latched the first time a lover is assigned.
    lovers_chosen: bool,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player and apply role onboarding.
    ///
    /// - Cupid receives `cupid` (the lover is chosen later).
    /// - Witch receives `witch` plus both potions.
    /// - Hunter receives `hunter`.
    ///
    /// Role flags are singletons: if another player already holds the
    /// role's flag, the newcomer gets none.
    ///
    /// ```
    /// use werewolf_moderator::core::{Flag, RoleKind, Roster};
    ///
    /// let mut roster = Roster::new();
    /// let witch = roster.add("Wanda", RoleKind::Witch);
    ///
    /// let player = roster.get(witch).unwrap();
    /// assert!(player.has(Flag::Witch));
    /// assert!(player.has(Flag::WitchHasHeal));
    /// assert!(player.has(Flag::WitchHasPoison));
    /// ```
    pub fn add(&mut self, name: impl Into<String>, kind: RoleKind) -> PlayerId {
        let id = PlayerId::new(self.next_id);
        self.next_id += 1;

        let mut player = Player::new(id, name, kind);
        let onboarding: &[Flag] = match kind.archetype() {
            Archetype::Cupid => &[Flag::Cupid],
            Archetype::Witch => &[Flag::Witch, Flag::WitchHasHeal, Flag::WitchHasPoison],
            Archetype::Hunter => &[Flag::Hunter],
            Archetype::Plain | Archetype::Prince => &[],
        };
        // A second cupid/witch/hunter joins as a plain player
        if onboarding.first().is_some_and(|&role| self.find(role).is_none()) {
            for &flag in onboarding {
                player.grant(flag);
            }
        }

        self.players.push_back(player);
        id
    }

    /// Remove the players at the given positions. Out-of-range positions
    /// are ignored. No cascade runs: this corrects setup mistakes.
    ///
    /// Removing the cupid unpairs the couple: a `lover` flag without a
    /// cupid in play is cleared, so the remaining lover dies alone.
    ///
    /// Returns the IDs of the removed players, in roster order.
    pub fn remove(&mut self, indices: impl IntoIterator<Item = usize>) -> Vec<PlayerId> {
        let doomed: FxHashSet<usize> = indices.into_iter().collect();
        if doomed.is_empty() {
            return Vec::new();
        }

        let mut removed = Vec::new();
        let mut kept = Vector::new();
        for (index, player) in self.players.iter().enumerate() {
            if doomed.contains(&index) {
                removed.push(player.id());
            } else {
                kept.push_back(player.clone());
            }
        }
        self.players = kept;
        if self.find(Flag::Cupid).is_none() {
            self.unpair_lovers();
        }
        removed
    }

    /// Clear every `lover` flag. Returns the players who lost one.
    pub(crate) fn unpair_lovers(&mut self) -> Vec<PlayerId> {
        let mut unpaired = Vec::new();
        for player in self.players.iter_mut() {
            if player.revoke(Flag::Lover) {
                unpaired.push(player.id());
            }
        }
        unpaired
    }

    // === Lookup ===

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate over players in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Get a player by ID.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Get a player by roster position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Roster position of a player.
    #[must_use]
    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    /// First player in roster order holding `flag`.
    ///
    /// Only meaningful as "the" holder for singleton flags (mayor, cupid,
    /// hunter, witch), which the rules keep unique.
    #[must_use]
    pub fn find(&self, flag: Flag) -> Option<&Player> {
        self.players.iter().find(|p| p.has(flag))
    }

    /// Lazily iterate over players matching `predicate`, in roster order.
    pub fn find_all<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Player> + 'a
    where
        P: Fn(&Player) -> bool + 'a,
    {
        self.players.iter().filter(move |p| predicate(p))
    }

    /// Number of living players.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.find_all(Player::is_alive).count()
    }

    /// Number of dead players.
    #[must_use]
    pub fn dead_count(&self) -> usize {
        self.len() - self.alive_count()
    }

    /// True once a lover has ever been assigned in this game.
    #[must_use]
    pub fn lovers_chosen(&self) -> bool {
        self.lovers_chosen
    }

    // === Engine-only mutation ===

    pub(crate) fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        let index = self.position(id)?;
        self.players.get_mut(index)
    }

    pub(crate) fn mark_lovers_chosen(&mut self) {
        self.lovers_chosen = true;
    }

    /// Set a player's life state directly. Test setup only.
    #[cfg(test)]
    pub(crate) fn force_state(&mut self, id: PlayerId, state: super::player::LifeState) {
        if let Some(player) = self.get_mut(id) {
            let cause = player.cause();
            player.set_life(state, cause);
        }
    }
}
