//! Status flags attached to players.
//!
//! ## Flag
//!
//! A closed enumeration of every special status a player can carry:
//! relationship markers (lover, cupid), offices (mayor), abilities
//! (hunter, witch and her potions) and protections (doctor shield,
//! prince immunity).
//!
//! ## FlagSet
//!
//! A fixed-size bitset over `Flag`. Membership is O(1) and a set can
//! never hold the same flag twice.

use serde::{Deserialize, Serialize};

/// A special-status marker a player may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flag {
    /// The beloved chosen by cupid.
    Lover,
    /// Cupid's identity marker.
    Cupid,
    /// The village mayor.
    Mayor,
    /// The hunter, who takes a retaliatory shot when killed.
    Hunter,
    /// Protected by the doctor/bodyguard this cycle.
    DoctorShield,
    /// The witch still holds her healing potion.
    WitchHasHeal,
    /// The witch still holds her poison potion.
    WitchHasPoison,
    /// The witch's identity marker.
    Witch,
    /// The prince has already survived his one lynch.
    PrinceImmunity,
}

impl Flag {
    /// Every flag, in declaration order.
    pub const ALL: [Flag; 9] = [
        Flag::Lover,
        Flag::Cupid,
        Flag::Mayor,
        Flag::Hunter,
        Flag::DoctorShield,
        Flag::WitchHasHeal,
        Flag::WitchHasPoison,
        Flag::Witch,
        Flag::PrinceImmunity,
    ];

    const fn bit(self) -> u16 {
        1 << self as u16
    }

    /// Flags that at most one player may hold at a time.
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        matches!(self, Flag::Mayor | Flag::Cupid | Flag::Hunter | Flag::Witch)
    }

    /// Single-use witch potions.
    #[must_use]
    pub const fn is_potion(self) -> bool {
        matches!(self, Flag::WitchHasHeal | Flag::WitchHasPoison)
    }

    /// Display label shown to the moderator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Flag::Lover => "Verliebter",
            Flag::Cupid => "Amor",
            Flag::Mayor => "Bürgermeister",
            Flag::Hunter => "Jäger",
            Flag::DoctorShield => "Beschützt",
            Flag::WitchHasHeal => "Heiltrank",
            Flag::WitchHasPoison => "Gifttrank",
            Flag::Witch => "Hexe",
            Flag::PrinceImmunity => "Prinzenschutz",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A set of flags backed by a bitset.
///
/// Serializes as a list of flag names so roster dumps stay readable.
///
/// ```
/// use werewolf_moderator::core::{Flag, FlagSet};
///
/// let mut flags = FlagSet::new();
/// assert!(flags.insert(Flag::Mayor));
/// assert!(!flags.insert(Flag::Mayor)); // already present
/// assert!(flags.contains(Flag::Mayor));
/// assert_eq!(flags.len(), 1);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Flag>", into = "Vec<Flag>")]
pub struct FlagSet(u16);

impl FlagSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(self, flag: Flag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Add a flag. Returns true if it was not already present.
    pub fn insert(&mut self, flag: Flag) -> bool {
        let added = !self.contains(flag);
        self.0 |= flag.bit();
        added
    }

    /// Remove a flag. Returns true if it was present.
    pub fn remove(&mut self, flag: Flag) -> bool {
        let present = self.contains(flag);
        self.0 &= !flag.bit();
        present
    }

    /// Remove every flag.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// True if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of flags set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the flags in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Flag> {
        Flag::ALL.into_iter().filter(move |flag| self.contains(*flag))
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl From<Vec<Flag>> for FlagSet {
    fn from(flags: Vec<Flag>) -> Self {
        flags.into_iter().collect()
    }
}

impl From<FlagSet> for Vec<Flag> {
    fn from(set: FlagSet) -> Self {
        set.iter().collect()
    }
}

impl std::fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
