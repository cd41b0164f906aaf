//! Change notification for the roster.
//!
//! - [`RosterEvent`]: one change (a death, a flag granted or revoked, ...)
//! - [`Changeset`]: everything one command changed, plus a revision token
//! - [`RosterObserver`]: subscriber interface for the presentation layer
//!
//! ## Example Usage
//!
//! ```
//! use werewolf_moderator::core::{Cause, LifeState, RoleKind};
//! use werewolf_moderator::Engine;
//!
//! let mut engine = Engine::new();
//! let anna = engine.add_player("Anna", RoleKind::Villager);
//!
//! let changes = engine.apply_cause(anna, Cause::Lynch, LifeState::Dead).unwrap();
//! assert_eq!(changes.deaths(), vec![anna]);
//! assert_eq!(changes.revision, engine.revision());
//! ```

mod event;
mod observer;

pub use event::{Changeset, EventList, RosterEvent};
pub use observer::{ChangeLog, RosterObserver};
