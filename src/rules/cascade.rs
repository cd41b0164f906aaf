//! Death-cascade resolution.
//!
//! `CascadeResolver::apply_cause` applies one elimination (or protection,
//! or revival) to a target and then runs whatever secondary effects the
//! target's flags demand:
//!
//! | Target holds          | Cascade                                        |
//! |-----------------------|------------------------------------------------|
//! | `lover` / `cupid`     | heartbreak: partner dies too, then succession  |
//! | `mayor`               | succession: office vacated                     |
//! | `hunter`              | retaliation: shot owed, see validation         |
//! | `witch`               | witch death: all flags and potions destroyed   |
//!
//! Branches are checked in that order and the first match wins. Heartbreak
//! is the only cascade that chains into another one.

use log::{debug, error, info, warn};
use smallvec::SmallVec;

use crate::core::{Archetype, Cause, Flag, LifeState, Player, PlayerId, Roster};
use crate::events::EventList;

use super::error::EngineError;
use super::transaction::Transaction;

/// Applies causes to the roster.
pub struct CascadeResolver;

impl CascadeResolver {
    /// Apply `cause` to `target`.
    ///
    /// Deadly causes ignore `intended` (the target ends up dead unless a
    /// cascade says otherwise). Non-deadly causes other than `shield` set
    /// the target's state to `intended`.
    ///
    /// `heal` and `poison` first consume the matching potion from the
    /// witch. On any error the roster is left unchanged.
    pub fn apply_cause(
        roster: &mut Roster,
        target: PlayerId,
        cause: Cause,
        intended: LifeState,
    ) -> Result<EventList, EngineError> {
        let mut txn = Transaction::begin(roster);

        match Self::resolve(&mut txn, target, cause, intended) {
            Ok(()) => Ok(txn.commit(roster)),
            Err(err) => {
                if err.is_fatal() {
                    error!("{cause:?} on {target} aborted: {err}");
                } else {
                    warn!("{cause:?} on {target} rejected: {err}");
                }
                Err(err)
            }
        }
    }

    fn resolve(
        txn: &mut Transaction,
        target: PlayerId,
        cause: Cause,
        intended: LifeState,
    ) -> Result<(), EngineError> {
        let player = txn.player(target)?;
        let flags = player.flags();
        let archetype = player.archetype();
        debug!("applying {cause:?} to {player} with flags {flags:?}");

        Self::consume_potion(txn, cause)?;

        if cause == Cause::Shield {
            return Self::shield(txn, target);
        }

        if !cause.is_deadly() {
            return txn.set_life(target, intended, cause);
        }

        if flags.contains(Flag::Lover) || flags.contains(Flag::Cupid) {
            Self::heartbreak(txn, target, cause)?;
        } else if flags.contains(Flag::Mayor) {
            Self::succession(txn, cause)?;
        } else if flags.contains(Flag::Hunter) {
            Self::retaliation(txn, cause)?;
        } else if flags.contains(Flag::Witch) {
            Self::witch_death(txn, cause)?;
        } else if archetype == Archetype::Prince
            && cause == Cause::Lynch
            && !flags.contains(Flag::PrinceImmunity)
        {
            info!("{target} is the prince and survives the lynch");
            txn.grant(target, Flag::PrinceImmunity)?;
            txn.set_life(target, LifeState::Alive, Cause::Prince)?;
        } else {
            txn.kill(target, cause)?;
        }

        Self::bury_witch(txn)?;

        if cause == Cause::Shoot {
            Self::record_hunter_shot(txn)?;
        }

        Ok(())
    }

    /// Take the potion a `heal`/`poison` uses away from the witch.
    fn consume_potion(txn: &mut Transaction, cause: Cause) -> Result<(), EngineError> {
        let potion = match cause {
            Cause::Heal => Flag::WitchHasHeal,
            Cause::Poison => Flag::WitchHasPoison,
            _ => return Ok(()),
        };

        let witch = txn
            .roster()
            .find(Flag::Witch)
            .filter(|w| w.is_alive())
            .ok_or(EngineError::NoWitch)?;
        if !witch.has(potion) {
            return Err(EngineError::PotionExhausted { potion });
        }
        let witch = witch.id();

        debug!("{witch} uses {potion:?}");
        txn.revoke(witch, potion)
    }

    /// The doctor's protection moves to `target` and pulls them back alive.
    fn shield(txn: &mut Transaction, target: PlayerId) -> Result<(), EngineError> {
        if txn.player(target)?.has(Flag::DoctorShield) {
            return Err(EngineError::DuplicateShield { player: target });
        }

        for previous in txn.holders(Flag::DoctorShield) {
            txn.revoke(previous, Flag::DoctorShield)?;
        }
        txn.grant(target, Flag::DoctorShield)?;
        txn.set_life(target, LifeState::Alive, Cause::Shield)
    }

    /// Cupid and the beloved die together.
    fn heartbreak(txn: &mut Transaction, target: PlayerId, cause: Cause) -> Result<(), EngineError> {
        let lovers = txn.holders(Flag::Lover);
        if lovers.len() > 1 {
            return Err(EngineError::AmbiguousPairing);
        }

        let partner = if txn.player(target)?.has(Flag::Lover) {
            let cupid = txn.roster().find(Flag::Cupid).ok_or_else(|| {
                EngineError::invariant(format!("{target} is a lover but no cupid is in play"))
            })?;
            Some(cupid.id())
        } else {
            lovers.first().copied()
        };

        let mut couple: SmallVec<[PlayerId; 2]> = SmallVec::new();
        couple.push(target);
        if let Some(partner) = partner.filter(|p| *p != target) {
            couple.push(partner);
        }

        // A partner who is already dead keeps their own cause
        let dying: SmallVec<[PlayerId; 2]> = couple
            .iter()
            .copied()
            .filter(|&id| id == target || txn.roster().get(id).is_some_and(Player::is_alive))
            .collect();
        let mayor_among_them = dying
            .iter()
            .any(|id| txn.roster().get(*id).is_some_and(|p| p.has(Flag::Mayor)));

        info!("heartbreak: {dying:?} die together ({cause:?})");
        for &id in &dying {
            txn.kill(id, cause)?;
        }
        for &id in &couple {
            txn.revoke(id, Flag::Lover)?;
        }

        if mayor_among_them {
            Self::succession(txn, cause)?;
        }
        Ok(())
    }

    /// The mayor dies and the office is left vacant.
    fn succession(txn: &mut Transaction, cause: Cause) -> Result<(), EngineError> {
        let mayor = txn.sole_holder(Flag::Mayor)?;
        txn.revoke(mayor, Flag::Mayor)?;
        txn.kill(mayor, cause)?;
        info!("mayor {mayor} died; a successor must be appointed");
        Ok(())
    }

    /// The hunter dies and owes a shot.
    fn retaliation(txn: &mut Transaction, cause: Cause) -> Result<(), EngineError> {
        let hunter = txn.sole_holder(Flag::Hunter)?;
        txn.kill(hunter, cause)?;
        info!("hunter {hunter} died and must take a shot");
        Ok(())
    }

    /// The witch dies and her remaining potions are destroyed.
    fn witch_death(txn: &mut Transaction, cause: Cause) -> Result<(), EngineError> {
        let witch = txn.sole_holder(Flag::Witch)?;
        let flags = txn.player(witch)?.flags();
        for flag in flags.iter() {
            txn.revoke(witch, flag)?;
        }
        txn.kill(witch, cause)?;
        info!("witch {witch} died with her potions");
        Ok(())
    }

    /// A witch who died through another cascade (as mayor or lover) loses
    /// her potions all the same.
    fn bury_witch(txn: &mut Transaction) -> Result<(), EngineError> {
        let Some(witch) = txn.roster().find(Flag::Witch).filter(|w| !w.is_alive()) else {
            return Ok(());
        };
        let witch = witch.id();

        for flag in [Flag::Witch, Flag::WitchHasHeal, Flag::WitchHasPoison] {
            txn.revoke(witch, flag)?;
        }
        info!("witch {witch} died with her potions");
        Ok(())
    }

    /// A recorded shot settles the dead hunter's debt.
    fn record_hunter_shot(txn: &mut Transaction) -> Result<(), EngineError> {
        let settled: Vec<PlayerId> = txn
            .roster()
            .find_all(|p| p.has(Flag::Hunter) && !p.is_alive())
            .map(Player::id)
            .collect();

        for hunter in settled {
            debug!("{hunter} has taken their shot");
            txn.revoke(hunter, Flag::Hunter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoleKind;

    fn apply(roster: &mut Roster, target: PlayerId, cause: Cause) -> Result<EventList, EngineError> {
        let intended = if cause.is_deadly() {
            LifeState::Dead
        } else {
            LifeState::Alive
        };
        CascadeResolver::apply_cause(roster, target, cause, intended)
    }

    /// Give a flag directly, bypassing assignment rules.
    fn give(roster: &mut Roster, id: PlayerId, flag: Flag) {
        roster.get_mut(id).unwrap().grant(flag);
    }

    #[test]
    fn test_default_death() {
        let mut roster = Roster::new();
        let a = roster.add("A", RoleKind::Villager);

        let events = apply(&mut roster, a, Cause::Eat).unwrap();

        let a = roster.get(a).unwrap();
        assert_eq!(a.state(), LifeState::Dead);
        assert_eq!(a.cause(), Cause::Eat);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_deadly_cause_ignores_intended_state() {
        let mut roster = Roster::new();
        let a = roster.add("A", RoleKind::Villager);

        CascadeResolver::apply_cause(&mut roster, a, Cause::Killed, LifeState::Alive).unwrap();

        assert!(!roster.get(a).unwrap().is_alive());
    }

    #[test]
    fn test_revive() {
        let mut roster = Roster::new();
        let a = roster.add("A", RoleKind::Villager);
        apply(&mut roster, a, Cause::Lynch).unwrap();

        apply(&mut roster, a, Cause::Revive).unwrap();

        let a = roster.get(a).unwrap();
        assert!(a.is_alive());
        assert_eq!(a.cause(), Cause::Revive);
    }

    #[test]
    fn test_none_cause_sets_intended_state() {
        let mut roster = Roster::new();
        let a = roster.add("A", RoleKind::Villager);

        CascadeResolver::apply_cause(&mut roster, a, Cause::None, LifeState::Dead).unwrap();

        let a = roster.get(a).unwrap();
        assert!(!a.is_alive());
        assert_eq!(a.cause(), Cause::None);
    }

    #[test]
    fn test_shield_revives_and_moves() {
        let mut roster = Roster::new();
        let a = roster.add("A", RoleKind::Villager);
        let b = roster.add("B", RoleKind::Villager);

        apply(&mut roster, a, Cause::Eat).unwrap();
        apply(&mut roster, a, Cause::Shield).unwrap();

        let player = roster.get(a).unwrap();
        assert!(player.is_alive());
        assert!(player.has(Flag::DoctorShield));

        apply(&mut roster, b, Cause::Shield).unwrap();
        assert!(!roster.get(a).unwrap().has(Flag::DoctorShield));
        assert!(roster.get(b).unwrap().has(Flag::DoctorShield));
    }

    #[test]
    fn test_duplicate_shield_rejected() {
        let mut roster = Roster::new();
        let a = roster.add("A", RoleKind::Villager);
        apply(&mut roster, a, Cause::Shield).unwrap();
        let before = roster.clone();

        let err = apply(&mut roster, a, Cause::Shield).unwrap_err();

        assert_eq!(err, EngineError::DuplicateShield { player: a });
        assert_eq!(roster, before);
    }

    #[test]
    fn test_heartbreak_kills_both() {
        let mut roster = Roster::new();
        let cupid = roster.add("Amor", RoleKind::Cupid);
        let lover = roster.add("B", RoleKind::Villager);
        let bystander = roster.add("C", RoleKind::Villager);
        give(&mut roster, lover, Flag::Lover);

        apply(&mut roster, lover, Cause::Eat).unwrap();

        for id in [cupid, lover] {
            let p = roster.get(id).unwrap();
            assert!(!p.is_alive());
            assert_eq!(p.cause(), Cause::Eat);
            assert!(!p.has(Flag::Lover));
        }
        assert!(roster.get(cupid).unwrap().has(Flag::Cupid));
        assert!(roster.get(bystander).unwrap().is_alive());
    }

    #[test]
    fn test_heartbreak_from_cupid_side() {
        let mut roster = Roster::new();
        let cupid = roster.add("Amor", RoleKind::Cupid);
        let lover = roster.add("B", RoleKind::Villager);
        give(&mut roster, lover, Flag::Lover);

        apply(&mut roster, cupid, Cause::Lynch).unwrap();

        assert!(!roster.get(lover).unwrap().is_alive());
        assert_eq!(roster.get(lover).unwrap().cause(), Cause::Lynch);
    }

    #[test]
    fn test_cupid_without_lover_dies_alone() {
        let mut roster = Roster::new();
        let cupid = roster.add("Amor", RoleKind::Cupid);
        let other = roster.add("B", RoleKind::Villager);

        apply(&mut roster, cupid, Cause::Eat).unwrap();

        assert!(!roster.get(cupid).unwrap().is_alive());
        assert!(roster.get(other).unwrap().is_alive());
    }

    #[test]
    fn test_heartbreak_runs_succession() {
        let mut roster = Roster::new();
        let cupid = roster.add("Amor", RoleKind::Cupid);
        let lover = roster.add("B", RoleKind::Villager);
        give(&mut roster, lover, Flag::Lover);
        give(&mut roster, cupid, Flag::Mayor);

        apply(&mut roster, lover, Cause::Eat).unwrap();

        assert!(roster.find(Flag::Mayor).is_none());
        assert!(!roster.get(cupid).unwrap().is_alive());
    }

    #[test]
    fn test_love_triangle_is_flagged() {
        let mut roster = Roster::new();
        roster.add("Amor", RoleKind::Cupid);
        let b = roster.add("B", RoleKind::Villager);
        let c = roster.add("C", RoleKind::Villager);
        give(&mut roster, b, Flag::Lover);
        give(&mut roster, c, Flag::Lover);
        let before = roster.clone();

        assert_eq!(apply(&mut roster, b, Cause::Eat), Err(EngineError::AmbiguousPairing));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_lover_without_cupid_is_fatal() {
        let mut roster = Roster::new();
        let b = roster.add("B", RoleKind::Villager);
        give(&mut roster, b, Flag::Lover);

        let err = apply(&mut roster, b, Cause::Eat).unwrap_err();
        assert!(err.is_fatal());
        assert!(roster.get(b).unwrap().is_alive());
    }

    #[test]
    fn test_heartbreak_leaves_dead_partner_alone() {
        let mut roster = Roster::new();
        let cupid = roster.add("Amor", RoleKind::Cupid);
        let lover = roster.add("B", RoleKind::Villager);
        apply(&mut roster, cupid, Cause::Lynch).unwrap();
        give(&mut roster, lover, Flag::Lover);

        let events = apply(&mut roster, lover, Cause::Eat).unwrap();

        assert_eq!(roster.get(cupid).unwrap().cause(), Cause::Lynch);
        assert!(!roster.get(lover).unwrap().is_alive());
        assert_eq!(events.iter().filter(|e| e.is_death()).count(), 1);
    }

    #[test]
    fn test_witch_lover_loses_potions() {
        let mut roster = Roster::new();
        let cupid = roster.add("Amor", RoleKind::Cupid);
        let witch = roster.add("W", RoleKind::Witch);
        give(&mut roster, witch, Flag::Lover);

        apply(&mut roster, cupid, Cause::Eat).unwrap();

        let w = roster.get(witch).unwrap();
        assert!(!w.is_alive());
        assert!(w.flags().is_empty());
        assert!(w.has_spent(Flag::WitchHasPoison));
    }

    #[test]
    fn test_succession() {
        let mut roster = Roster::new();
        let mayor = roster.add("M", RoleKind::Villager);
        give(&mut roster, mayor, Flag::Mayor);

        apply(&mut roster, mayor, Cause::Lynch).unwrap();

        let p = roster.get(mayor).unwrap();
        assert!(!p.is_alive());
        assert!(!p.has(Flag::Mayor));
        assert_eq!(p.cause(), Cause::Lynch);
    }

    #[test]
    fn test_two_mayors_is_fatal() {
        let mut roster = Roster::new();
        let a = roster.add("A", RoleKind::Villager);
        let b = roster.add("B", RoleKind::Villager);
        give(&mut roster, a, Flag::Mayor);
        give(&mut roster, b, Flag::Mayor);
        let before = roster.clone();

        let err = apply(&mut roster, b, Cause::Eat).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(roster, before);
    }

    #[test]
    fn test_hunter_dies_and_shot_settles() {
        let mut roster = Roster::new();
        let hunter = roster.add("H", RoleKind::Hunter);
        let victim = roster.add("V", RoleKind::Werewolf);

        apply(&mut roster, hunter, Cause::Eat).unwrap();
        assert!(!roster.get(hunter).unwrap().is_alive());
        assert!(roster.get(hunter).unwrap().has(Flag::Hunter));

        apply(&mut roster, victim, Cause::Shoot).unwrap();
        assert!(!roster.get(victim).unwrap().is_alive());
        assert!(!roster.get(hunter).unwrap().has(Flag::Hunter));
    }

    #[test]
    fn test_shot_while_hunter_alive_keeps_flag() {
        let mut roster = Roster::new();
        let hunter = roster.add("H", RoleKind::Hunter);
        let victim = roster.add("V", RoleKind::Villager);

        apply(&mut roster, victim, Cause::Shoot).unwrap();

        assert!(roster.get(hunter).unwrap().has(Flag::Hunter));
    }

    #[test]
    fn test_witch_death_destroys_potions() {
        let mut roster = Roster::new();
        let witch = roster.add("W", RoleKind::Witch);

        apply(&mut roster, witch, Cause::Eat).unwrap();

        let p = roster.get(witch).unwrap();
        assert!(!p.is_alive());
        assert!(p.flags().is_empty());
        assert!(p.has_spent(Flag::WitchHasHeal));
        assert!(p.has_spent(Flag::WitchHasPoison));
    }

    #[test]
    fn test_heal_consumes_only_heal() {
        let mut roster = Roster::new();
        let witch = roster.add("W", RoleKind::Witch);
        let target = roster.add("T", RoleKind::Villager);
        apply(&mut roster, target, Cause::Eat).unwrap();

        apply(&mut roster, target, Cause::Heal).unwrap();

        assert!(roster.get(target).unwrap().is_alive());
        assert_eq!(roster.get(target).unwrap().cause(), Cause::Heal);
        let w = roster.get(witch).unwrap();
        assert!(!w.has(Flag::WitchHasHeal));
        assert!(w.has(Flag::WitchHasPoison));
    }

    #[test]
    fn test_potion_exhausted() {
        let mut roster = Roster::new();
        roster.add("W", RoleKind::Witch);
        let x = roster.add("X", RoleKind::Villager);
        let y = roster.add("Y", RoleKind::Villager);

        apply(&mut roster, x, Cause::Poison).unwrap();
        let err = apply(&mut roster, y, Cause::Poison).unwrap_err();

        assert_eq!(
            err,
            EngineError::PotionExhausted {
                potion: Flag::WitchHasPoison
            }
        );
        assert!(roster.get(y).unwrap().is_alive());
    }

    #[test]
    fn test_no_witch() {
        let mut roster = Roster::new();
        let x = roster.add("X", RoleKind::Villager);
        let before = roster.clone();

        assert_eq!(apply(&mut roster, x, Cause::Heal), Err(EngineError::NoWitch));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_witch_poisons_herself() {
        let mut roster = Roster::new();
        let witch = roster.add("W", RoleKind::Witch);

        apply(&mut roster, witch, Cause::Poison).unwrap();

        let w = roster.get(witch).unwrap();
        assert!(!w.is_alive());
        assert!(w.flags().is_empty());
    }

    #[test]
    fn test_prince_survives_one_lynch() {
        let mut roster = Roster::new();
        let prince = roster.add("P", RoleKind::Prince);

        apply(&mut roster, prince, Cause::Lynch).unwrap();
        let p = roster.get(prince).unwrap();
        assert!(p.is_alive());
        assert!(p.has(Flag::PrinceImmunity));
        assert_eq!(p.cause(), Cause::Prince);

        apply(&mut roster, prince, Cause::Lynch).unwrap();
        assert!(!roster.get(prince).unwrap().is_alive());
    }

    #[test]
    fn test_prince_not_immune_to_wolves() {
        let mut roster = Roster::new();
        let prince = roster.add("P", RoleKind::Prince);

        apply(&mut roster, prince, Cause::Eat).unwrap();

        assert!(!roster.get(prince).unwrap().is_alive());
    }

    #[test]
    fn test_unknown_target() {
        let mut roster = Roster::new();
        assert_eq!(
            apply(&mut roster, PlayerId::new(9), Cause::Eat),
            Err(EngineError::UnknownPlayer(PlayerId::new(9)))
        );
    }
}
