//! Moderator flag assignment.
//!
//! Flags the moderator hands out by choice (the lover, the mayor, a
//! correction after a misclick) go through `FlagAssigner`, which keeps the
//! singleton and single-use potion invariants intact.

use log::{debug, warn};

use crate::core::{Flag, PlayerId, Roster};
use crate::events::EventList;

use super::error::EngineError;
use super::transaction::Transaction;

/// Grants and clears flags on moderator request.
pub struct FlagAssigner;

impl FlagAssigner {
    /// Give `flag` to `player`. Granting a flag the player already holds
    /// changes nothing.
    ///
    /// - `mayor` moves: the previous mayor loses the office.
    /// - `cupid`, `hunter`, `witch` are rejected while someone else holds
    ///   them.
    /// - `lover` needs a cupid in play and can't go to the cupid.
    /// - Potions only go to the witch, and never come back once spent.
    pub fn set_flag(
        roster: &mut Roster,
        player: PlayerId,
        flag: Flag,
    ) -> Result<EventList, EngineError> {
        let mut txn = Transaction::begin(roster);
        Self::grant(&mut txn, player, flag).inspect_err(|err| {
            warn!("assigning {flag:?} to {player} rejected: {err}");
        })?;
        Ok(txn.commit(roster))
    }

    /// Remove `flag` from `player`. Clearing a potion spends it; clearing
    /// `cupid` unpairs the lover.
    pub fn clear_flag(
        roster: &mut Roster,
        player: PlayerId,
        flag: Flag,
    ) -> Result<EventList, EngineError> {
        let mut txn = Transaction::begin(roster);
        txn.revoke(player, flag)?;
        if flag == Flag::Cupid && txn.roster().find(Flag::Cupid).is_none() {
            for lover in txn.holders(Flag::Lover) {
                txn.revoke(lover, Flag::Lover)?;
            }
        }
        debug!("cleared {flag:?} from {player}");
        Ok(txn.commit(roster))
    }

    fn grant(txn: &mut Transaction, player: PlayerId, flag: Flag) -> Result<(), EngineError> {
        let target = txn.player(player)?;
        if target.has(flag) {
            return Ok(());
        }
        if flag.is_potion() {
            if target.has_spent(flag) {
                return Err(EngineError::PotionSpent { player, potion: flag });
            }
            if !target.has(Flag::Witch) {
                return Err(EngineError::InvalidFlagTarget { player, flag });
            }
        }

        match flag {
            Flag::Mayor => {
                for previous in txn.holders(Flag::Mayor) {
                    debug!("{previous} hands the mayor's office to {player}");
                    txn.revoke(previous, Flag::Mayor)?;
                }
            }
            Flag::Lover => {
                let cupid = txn.roster().find(Flag::Cupid).ok_or(EngineError::NoCupid)?;
                if cupid.id() == player {
                    return Err(EngineError::InvalidFlagTarget { player, flag });
                }
                txn.mark_lovers_chosen();
            }
            _ if flag.is_singleton() => {
                if let Some(holder) = txn.holders(flag).first() {
                    return Err(EngineError::FlagHeld {
                        flag,
                        holder: *holder,
                    });
                }
            }
            _ => {}
        }

        txn.grant(player, flag)
    }
}
