//! Errors reported by roster commands.

use thiserror::Error;

use crate::core::{Flag, PlayerId};

/// A rejected command.
///
/// Every variant leaves the roster exactly as it was before the command.
/// `InvariantViolation` additionally means the roster was already corrupt
/// when the command arrived; see [`EngineError::is_fatal`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error("a potion was used but nobody holds the witch flag")]
    NoWitch,

    #[error("the witch has no {potion} left")]
    PotionExhausted { potion: Flag },

    #[error("{player} was already shielded last cycle")]
    DuplicateShield { player: PlayerId },

    #[error("more than one lover is assigned; heartbreak needs a single partner")]
    AmbiguousPairing,

    #[error("a lover can only be chosen while a cupid is in play")]
    NoCupid,

    #[error("{flag} is already held by {holder}")]
    FlagHeld { flag: Flag, holder: PlayerId },

    #[error("{player} already used up {potion}; potions can't be restored")]
    PotionSpent { player: PlayerId, potion: Flag },

    #[error("{flag} can't be given to {player}")]
    InvalidFlagTarget { player: PlayerId, flag: Flag },

    #[error("roster invariant violated: {detail}")]
    InvariantViolation { detail: String },
}

impl EngineError {
    /// True for corrupted-state errors the caller must not paper over.
    ///
    /// Everything else is a rule violation the moderator can be told about
    /// and then retry differently.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::InvariantViolation { .. })
    }

    pub(crate) fn invariant(detail: impl Into<String>) -> Self {
        EngineError::InvariantViolation {
            detail: detail.into(),
        }
    }
}
