//! Perspective of one side of an exchange.

use crate::state::UnitInstance;

/// Which side of the exchange a unit is on.
///
/// Also used as the event marker in a planned attack order: each entry names
/// the side that strikes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Initiated combat.
    Attacker,
    /// Was attacked.
    Defender,
}

impl Role {
    pub fn opposite(self) -> Self {
        match self {
            Role::Attacker => Role::Defender,
            Role::Defender => Role::Attacker,
        }
    }
}

/// One side's view of an exchange.
///
/// Recomputed by [`flip`](Self::flip) whenever the perspective changes.
#[derive(Clone, Copy, Debug)]
pub struct CombatContext<'a> {
    /// The unit this context is about.
    pub unit: &'a UnitInstance,
    /// Its opponent.
    pub foe: &'a UnitInstance,
    /// Whether `unit` initiated combat.
    pub initiator: bool,
    /// Other units on the field. Always empty for a single exchange.
    pub allies: &'a [UnitInstance],
}

impl<'a> CombatContext<'a> {
    /// Attacker's perspective of `attacker` initiating against `defender`.
    pub fn initiate(attacker: &'a UnitInstance, defender: &'a UnitInstance) -> Self {
        Self {
            unit: attacker,
            foe: defender,
            initiator: true,
            allies: &[],
        }
    }

    pub fn role(&self) -> Role {
        if self.initiator {
            Role::Attacker
        } else {
            Role::Defender
        }
    }

    /// Same exchange, seen from the foe.
    pub fn flip(&self) -> Self {
        Self {
            unit: self.foe,
            foe: self.unit,
            initiator: !self.initiator,
            allies: self.allies,
        }
    }

    /// `(attacker, defender)` regardless of perspective.
    pub fn sides(&self) -> (&'a UnitInstance, &'a UnitInstance) {
        if self.initiator {
            (self.unit, self.foe)
        } else {
            (self.foe, self.unit)
        }
    }
}
