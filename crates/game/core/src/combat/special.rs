//! Special charge tracking.
//!
//! ```text
//! cooldown  = max(base cooldown + Σ cooldown shifts, 1)
//! countdown = max(cooldown − accumulated charge, 0)      0 = ready
//! ```

use crate::skills::{SkillEffect, SpecialKind};

use super::combatant::Combatant;

/// Effective cooldown after weapon and skill shifts. Never below 1.
pub fn effective_cooldown(base: u8, shift: i32) -> u8 {
    let cooldown = (i32::from(base) + shift).max(1);
    u8::try_from(cooldown).unwrap_or(u8::MAX)
}

/// Running special state for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialGauge<'a> {
    kind: &'a SpecialKind,
    cooldown: u8,
    countdown: u8,
}

impl<'a> SpecialGauge<'a> {
    /// Gauge for the combatant's equipped special, or `None` without one.
    pub fn of(combatant: &Combatant<'a>) -> Option<Self> {
        let (definition, kind) = combatant.skills.special()?;
        let shift = combatant.skills.sum(|effect| match effect {
            SkillEffect::CooldownShift(shift) => Some(*shift),
            _ => None,
        });
        let cooldown = effective_cooldown(definition.params.cooldown.unwrap_or(0), shift);
        let accumulated = combatant.instance.state.special_charge;
        Some(Self {
            kind,
            cooldown,
            countdown: cooldown.saturating_sub(accumulated),
        })
    }

    pub fn kind(&self) -> &'a SpecialKind {
        self.kind
    }

    pub fn cooldown(&self) -> u8 {
        self.cooldown
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    pub fn is_ready(&self) -> bool {
        self.countdown == 0
    }

    /// Charge accumulated toward the next trigger.
    pub fn accumulated(&self) -> u8 {
        self.cooldown - self.countdown
    }

    /// Back to a full countdown after triggering.
    pub fn reset(&mut self) {
        self.countdown = self.cooldown;
    }

    /// Advances the countdown by `charge`, floored at ready. Negative charge
    /// is treated as none.
    pub fn charge(&mut self, charge: i32) {
        let step = u8::try_from(charge.max(0)).unwrap_or(u8::MAX);
        self.countdown = self.countdown.saturating_sub(step);
    }
}
