//! Property tests for roster invariants under arbitrary command sequences.
//!
//! Run with: PROPTEST_CASES=10000 cargo test --release property_tests

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use werewolf_moderator::core::{Cause, Flag, LifeState, Player, PlayerId, RoleKind};
use werewolf_moderator::events::Changeset;
use werewolf_moderator::rules::EngineError;
use werewolf_moderator::Engine;

/// One moderator command against a roster position.
#[derive(Clone, Debug)]
enum Command {
    Apply(usize, Cause, LifeState),
    SetFlag(usize, Flag),
    ClearFlag(usize, Flag),
    Remove(usize),
}

fn life_state() -> impl Strategy<Value = LifeState> {
    prop_oneof![Just(LifeState::Alive), Just(LifeState::Dead)]
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        6 => (0usize..12, prop::sample::select(Cause::ALL.to_vec()), life_state())
            .prop_map(|(i, c, s)| Command::Apply(i, c, s)),
        3 => (0usize..12, prop::sample::select(Flag::ALL.to_vec()))
            .prop_map(|(i, f)| Command::SetFlag(i, f)),
        1 => (0usize..12, prop::sample::select(Flag::ALL.to_vec()))
            .prop_map(|(i, f)| Command::ClearFlag(i, f)),
        1 => (0usize..12).prop_map(Command::Remove),
    ]
}

fn roster_kinds() -> impl Strategy<Value = Vec<RoleKind>> {
    prop::collection::vec(prop::sample::select(RoleKind::ALL.to_vec()), 1..10)
}

fn engine_with(kinds: &[RoleKind]) -> Engine {
    let mut engine = Engine::new();
    for (i, kind) in kinds.iter().enumerate() {
        engine.add_player(format!("P{i}"), *kind);
    }
    engine
}

/// Resolve a roster position, wrapping so every index hits someone.
fn id_at(engine: &Engine, index: usize) -> Option<PlayerId> {
    let len = engine.roster().len();
    if len == 0 {
        return None;
    }
    engine.roster().at(index % len).map(Player::id)
}

fn run(engine: &mut Engine, cmd: &Command) -> Option<Result<Changeset, EngineError>> {
    let result = match *cmd {
        Command::Apply(i, cause, state) => {
            let id = id_at(engine, i)?;
            engine.apply_cause(id, cause, state)
        }
        Command::SetFlag(i, flag) => {
            let id = id_at(engine, i)?;
            engine.set_flag(id, flag)
        }
        Command::ClearFlag(i, flag) => {
            let id = id_at(engine, i)?;
            engine.clear_flag(id, flag)
        }
        Command::Remove(i) => Ok(engine.remove_players([i])),
    };
    Some(result)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// A rejected command leaves the roster and revision untouched.
    #[test]
    fn prop_commands_are_atomic(
        kinds in roster_kinds(),
        commands in prop::collection::vec(command(), 0..40),
    ) {
        let mut engine = engine_with(&kinds);

        for cmd in &commands {
            let before = engine.roster().clone();
            let revision = engine.revision();

            match run(&mut engine, cmd) {
                Some(Err(_)) => {
                    prop_assert_eq!(engine.roster(), &before, "{:?} changed the roster", cmd);
                    prop_assert_eq!(engine.revision(), revision);
                }
                Some(Ok(changes)) => {
                    let expected = if changes.is_empty() { revision } else { revision + 1 };
                    prop_assert_eq!(engine.revision(), expected);
                }
                None => {}
            }
        }
    }

    /// Mayor, cupid, hunter and witch never have two holders.
    #[test]
    fn prop_singletons_hold(
        kinds in roster_kinds(),
        commands in prop::collection::vec(command(), 0..40),
    ) {
        let mut engine = engine_with(&kinds);

        for cmd in &commands {
            let _ = run(&mut engine, cmd);
            for flag in [Flag::Mayor, Flag::Cupid, Flag::Hunter, Flag::Witch] {
                let holders = engine.roster().find_all(|p| p.has(flag)).count();
                prop_assert!(holders <= 1, "{:?} has {} holders after {:?}", flag, holders, cmd);
            }
        }
    }

    /// Once a potion is gone it never comes back.
    #[test]
    fn prop_potions_single_use(
        kinds in roster_kinds(),
        commands in prop::collection::vec(command(), 0..40),
    ) {
        let mut engine = engine_with(&kinds);

        for cmd in &commands {
            let _ = run(&mut engine, cmd);
            for player in engine.roster().iter() {
                for potion in [Flag::WitchHasHeal, Flag::WitchHasPoison] {
                    prop_assert!(
                        !(player.has(potion) && player.has_spent(potion)),
                        "{} holds a spent {:?}", player, potion
                    );
                }
            }
        }
    }

    /// Killing either half of the couple kills both with the same cause.
    #[test]
    fn prop_heartbreak_symmetry(
        bystanders in 0usize..6,
        cause in prop::sample::select(vec![
            Cause::Eat, Cause::Lynch, Cause::Heartbreak, Cause::Shoot, Cause::Killed,
        ]),
        hit_lover in any::<bool>(),
    ) {
        let mut engine = Engine::new();
        let others: Vec<_> = (0..bystanders)
            .map(|i| engine.add_player(format!("V{i}"), RoleKind::Villager))
            .collect();
        let cupid = engine.add_player("Amor", RoleKind::Cupid);
        let lover = engine.add_player("Bea", RoleKind::Villager);
        engine.set_flag(lover, Flag::Lover).unwrap();

        let target = if hit_lover { lover } else { cupid };
        engine.apply_cause(target, cause, LifeState::Dead).unwrap();

        for id in [cupid, lover] {
            let p = engine.player(id).unwrap();
            prop_assert!(!p.is_alive());
            prop_assert_eq!(p.cause(), cause);
            prop_assert!(!p.has(Flag::Lover));
        }
        for id in others {
            prop_assert!(engine.player(id).unwrap().is_alive());
        }
    }

    /// Granting a flag twice is the same as granting it once.
    #[test]
    fn prop_set_flag_idempotent(
        kinds in roster_kinds(),
        index in 0usize..10,
        flag in prop::sample::select(Flag::ALL.to_vec()),
    ) {
        let mut engine = engine_with(&kinds);
        let id = id_at(&engine, index).unwrap();

        if engine.set_flag(id, flag).is_ok() {
            let once = engine.roster().clone();
            let changes = engine.set_flag(id, flag).unwrap();

            prop_assert!(changes.is_empty());
            prop_assert_eq!(engine.roster(), &once);
        }
    }
}
