//! Roles and causes.
//!
//! A player's `Role` pairs the fixed `RoleKind` chosen by the moderator with
//! the `Cause` of their most recent life-state change.
//!
//! The engine never branches on the role kind directly. It consults the
//! kind's `Archetype`, so flavor roles with no rules of their own
//! (werewolf, bodyguard) behave exactly like plain villagers.

use serde::{Deserialize, Serialize};

/// The role a player was dealt. Fixed at creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleKind {
    #[default]
    Villager,
    Werewolf,
    Bodyguard,
    Cupid,
    Hunter,
    Witch,
    Prince,
}

/// Rules-relevant classification of a role kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// No cascade behavior of its own.
    Plain,
    Cupid,
    Hunter,
    Witch,
    /// Survives exactly one lynch.
    Prince,
}

impl RoleKind {
    /// Every role kind, in the order the moderator picks from.
    pub const ALL: [RoleKind; 7] = [
        RoleKind::Werewolf,
        RoleKind::Prince,
        RoleKind::Witch,
        RoleKind::Villager,
        RoleKind::Hunter,
        RoleKind::Bodyguard,
        RoleKind::Cupid,
    ];

    /// The rules archetype for this kind.
    #[must_use]
    pub const fn archetype(self) -> Archetype {
        match self {
            RoleKind::Villager | RoleKind::Werewolf | RoleKind::Bodyguard => Archetype::Plain,
            RoleKind::Cupid => Archetype::Cupid,
            RoleKind::Hunter => Archetype::Hunter,
            RoleKind::Witch => Archetype::Witch,
            RoleKind::Prince => Archetype::Prince,
        }
    }

    /// Display label shown to the moderator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RoleKind::Villager => "Dorfbewohner",
            RoleKind::Werewolf => "Werwolf",
            RoleKind::Bodyguard => "Leibwächter",
            RoleKind::Cupid => "Amor",
            RoleKind::Hunter => "Jäger",
            RoleKind::Witch => "Hexe",
            RoleKind::Prince => "Prinz",
        }
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a player last changed life state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cause {
    /// Bitten/eaten by the werewolves.
    Eat,
    Lynch,
    Heartbreak,
    Heal,
    Poison,
    /// The hunter's retaliatory shot.
    Shoot,
    Shield,
    Revive,
    /// Generic kill.
    Killed,
    /// A prince revealed himself and survived the lynch.
    Prince,
    #[default]
    None,
}

impl Cause {
    /// Every cause, in declaration order.
    pub const ALL: [Cause; 11] = [
        Cause::Eat,
        Cause::Lynch,
        Cause::Heartbreak,
        Cause::Heal,
        Cause::Poison,
        Cause::Shoot,
        Cause::Shield,
        Cause::Revive,
        Cause::Killed,
        Cause::Prince,
        Cause::None,
    ];

    /// Deadly causes kill the target unless a cascade overrides it.
    #[must_use]
    pub const fn is_deadly(self) -> bool {
        matches!(
            self,
            Cause::Eat
                | Cause::Lynch
                | Cause::Heartbreak
                | Cause::Poison
                | Cause::Shoot
                | Cause::Killed
        )
    }

    /// Display label shown next to the player. Empty for `None`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Cause::Eat => "Gefressen",
            Cause::Lynch => "Gelyncht",
            Cause::Heartbreak => "Liebeskummer",
            Cause::Heal => "Geheilt",
            Cause::Poison => "Vergiftet",
            Cause::Shoot => "Erschossen",
            Cause::Shield => "Geschützt",
            Cause::Revive => "Wiederbelebt",
            Cause::Killed => "Getötet",
            Cause::Prince => "Der Prinz",
            Cause::None => "",
        }
    }
}

impl std::fmt::Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A player's role: fixed kind plus most recent cause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    pub kind: RoleKind,
    pub cause: Cause,
}

impl Role {
    /// A fresh role with no recorded cause.
    #[must_use]
    pub const fn new(kind: RoleKind) -> Self {
        Self {
            kind,
            cause: Cause::None,
        }
    }
}
