//! What the moderator has to do next.
//!
//! `check_state` is a pure query run after every command. Checks are
//! ordered: setup alerts (lover, mayor) come first because resolving them
//! can change who counts as alive for the end-state check.

use serde::{Deserialize, Serialize};

use crate::core::{Cause, Flag, Player, Roster};

/// Condition the moderator must act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alert {
    /// Nothing to resolve.
    #[default]
    None,
    /// Cupid is in play and has not chosen a lover.
    NeedLover,
    /// The village has its first casualty (or lost its mayor) and needs one.
    NeedMayor,
    /// Only the couple is left alive: the lovers win.
    GameFinished,
    /// A dead hunter still owes a shot.
    NeedHunterShot,
}

impl Alert {
    /// Message shown to the moderator. Empty for `None`.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Alert::None => "",
            Alert::NeedLover => "Wähle einen Verliebten aus",
            Alert::NeedMayor => "Wähle einen Bürgermeister",
            Alert::GameFinished => "Das Liebespaar hat gewonnen",
            Alert::NeedHunterShot => "Der Jäger muss schießen",
        }
    }

    /// True once the game is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Alert::GameFinished)
    }
}

/// Evaluate the roster and return the first applicable alert.
///
/// ```
/// use werewolf_moderator::core::{RoleKind, Roster};
/// use werewolf_moderator::rules::{check_state, Alert};
///
/// let mut roster = Roster::new();
/// roster.add("Amor", RoleKind::Cupid);
/// roster.add("Bea", RoleKind::Villager);
///
/// assert_eq!(check_state(&roster), Alert::NeedLover);
/// ```
#[must_use]
pub fn check_state(roster: &Roster) -> Alert {
    if roster.find(Flag::Cupid).is_some() && !roster.lovers_chosen() {
        return Alert::NeedLover;
    }

    if roster.find(Flag::Mayor).is_none() && roster.dead_count() > 0 {
        return Alert::NeedMayor;
    }

    if roster.alive_count() == 2 {
        let mut alive = roster.find_all(Player::is_alive);
        if let (Some(a), Some(b)) = (alive.next(), alive.next()) {
            if are_paired(a, b) {
                return Alert::GameFinished;
            }
        }
    }

    let hunter_owes_shot = roster
        .find(Flag::Hunter)
        .is_some_and(|h| !h.is_alive() && h.cause() != Cause::Shoot);
    if hunter_owes_shot {
        return Alert::NeedHunterShot;
    }

    Alert::None
}

fn are_paired(a: &Player, b: &Player) -> bool {
    (a.has(Flag::Cupid) && b.has(Flag::Lover)) || (a.has(Flag::Lover) && b.has(Flag::Cupid))
}
