use crate::stats::Level;

/// Combat rules constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Speed lead needed for a follow-up attack.
    pub follow_up_threshold: i32,
    /// Level stats are resolved at during combat.
    pub combat_level: Level,
    /// Extra damage share from weapon effectiveness, in percent.
    pub effective_bonus_pct: i32,
    /// Base color-triangle magnitude, in percent.
    pub triangle_pct: i32,
    /// Damage share dealt by healing staves without an override.
    pub staff_damage_pct: i32,
    /// Archetype unknown names fall back to.
    pub default_archetype: String,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Highest merge level.
    pub const MAX_MERGES: u8 = crate::stats::MAX_MERGES;
    /// Upper bound on attack events in one exchange.
    pub const MAX_STRIKES: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FOLLOW_UP_THRESHOLD: i32 = 5;
    pub const DEFAULT_COMBAT_LEVEL: Level = Level::Forty;
    pub const DEFAULT_EFFECTIVE_BONUS_PCT: i32 = 50;
    pub const DEFAULT_TRIANGLE_PCT: i32 = 20;
    pub const DEFAULT_STAFF_DAMAGE_PCT: i32 = 50;

    pub fn new() -> Self {
        Self {
            follow_up_threshold: Self::DEFAULT_FOLLOW_UP_THRESHOLD,
            combat_level: Self::DEFAULT_COMBAT_LEVEL,
            effective_bonus_pct: Self::DEFAULT_EFFECTIVE_BONUS_PCT,
            triangle_pct: Self::DEFAULT_TRIANGLE_PCT,
            staff_damage_pct: Self::DEFAULT_STAFF_DAMAGE_PCT,
            default_archetype: crate::env::UnitArchetype::GENERIC_NAME.to_string(),
        }
    }

    pub fn with_follow_up_threshold(mut self, threshold: i32) -> Self {
        self.follow_up_threshold = threshold;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
