//! Resolution rules over the roster.
//!
//! - [`CascadeResolver`]: applies a cause to a target and runs the death
//!   cascades (heartbreak, succession, retaliation, witch death)
//! - [`FlagAssigner`]: moderator-chosen flags (lover, mayor, corrections)
//! - [`check_state`]: what the moderator must resolve next
//!
//! Every mutating entry point is atomic: it either applies completely and
//! returns the events it produced, or returns an [`EngineError`] and leaves
//! the roster untouched.

mod assign;
mod cascade;
mod error;
mod transaction;
mod validation;

pub use assign::FlagAssigner;
pub use cascade::CascadeResolver;
pub use error::EngineError;
pub use validation::{check_state, Alert};
