//! Combat result types.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::TransientState;

use super::context::Role;

/// One executed strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeRecord {
    /// Side that struck.
    pub striker: Role,
    /// Damage actually dealt, after defensive specials.
    pub damage: i32,
    /// Striker's on-attack special fired.
    pub special: bool,
    /// Target's defensive special fired.
    pub defensive_special: bool,
    /// HP after the strike and any healing.
    pub attacker_hp: i32,
    pub defender_hp: i32,
}

/// Per-side totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideSummary {
    /// Damage of one hit before specials.
    pub hit_damage: i32,
    /// Strikes in the planned order.
    pub hits_planned: u8,
    /// Strikes actually executed.
    pub hits_landed: u8,
    /// Extra damage from this side's on-attack specials.
    pub special_damage: i32,
    /// HP after combat, post-combat effects included.
    pub hp: i32,
    pub max_hp: i32,
    /// Remaining countdown, `None` without a special.
    pub special_countdown: Option<u8>,
    /// A galeforce special is charged and grants another action.
    pub galeforce_ready: bool,
    /// State to pass into the next exchange.
    pub next_state: TransientState,
}

/// Outcome of one exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub attacker: SideSummary,
    pub defender: SideSummary,
    /// Pre-combat area damage dealt to the defender.
    pub area_damage: i32,
    pub strikes: ArrayVec<StrikeRecord, { CombatConfig::MAX_STRIKES }>,
}

impl CombatResult {
    pub fn side(&self, role: Role) -> &SideSummary {
        match role {
            Role::Attacker => &self.attacker,
            Role::Defender => &self.defender,
        }
    }

    pub fn side_mut(&mut self, role: Role) -> &mut SideSummary {
        match role {
            Role::Attacker => &mut self.attacker,
            Role::Defender => &mut self.defender,
        }
    }

    /// True when either side ended at 0 HP.
    pub fn is_lethal(&self) -> bool {
        self.attacker.hp == 0 || self.defender.hp == 0
    }
}
