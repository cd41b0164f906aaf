//! Core data model: players, roles, flags, the roster, configuration.
//!
//! Everything the resolution rules operate on lives here. Mutation of
//! life state, causes and flags is crate-private; the `rules` module is
//! the only writer.

pub mod config;
pub mod flags;
pub mod player;
pub mod role;
pub mod roster;

pub use config::{ConfigError, ModeratorConfig};
pub use flags::{Flag, FlagSet};
pub use player::{LifeState, Player, PlayerId};
pub use role::{Archetype, Cause, Role, RoleKind};
pub use roster::Roster;
