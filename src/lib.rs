//! # werewolf-moderator
//!
//! Bookkeeping engine for a moderator running a game of Werewolf.
//!
//! The moderator records what happened ("Bea was eaten", "the witch healed
//! Carl") and the engine works out the consequences: lovers dying of
//! heartbreak, a vacant mayor's office, a hunter's owed shot, a witch's
//! destroyed potions. After every command the moderator asks
//! [`Engine::check_state`] what needs resolving next.
//!
//! ## Design Principles
//!
//! 1. **Atomic Commands**: A command either applies completely or fails with
//!    an [`EngineError`] and leaves the roster untouched. Working copies are
//!    O(1) snapshots via `im-rs`.
//!
//! 2. **Closed Flag Set**: Every player attribute the rules look at is a
//!    [`Flag`](core::Flag). Singleton flags (mayor, cupid, hunter, witch)
//!    have at most one holder.
//!
//! 3. **Moderator Decides**: The engine never picks a victim, a mayor or a
//!    lover. It raises an [`Alert`] and waits.
//!
//! ## Modules
//!
//! - `core`: player IDs, roles, flags, the roster, configuration
//! - `rules`: cascade resolution, flag assignment, state validation
//! - `events`: change notifications for front ends

pub mod core;
pub mod events;
pub mod rules;

mod engine;

pub use crate::engine::Engine;

pub use crate::core::{
    Archetype, Cause, ConfigError, Flag, FlagSet, LifeState, ModeratorConfig, Player, PlayerId,
    Role, RoleKind, Roster,
};

pub use crate::events::{ChangeLog, Changeset, RosterEvent, RosterObserver};

pub use crate::rules::{check_state, Alert, CascadeResolver, EngineError, FlagAssigner};
