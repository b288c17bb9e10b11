//! HP gauge at combat start.

/// Current and maximum HP, used for HP-percentage preconditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpGauge {
    pub current: i32,
    pub max: i32,
}

impl HpGauge {
    /// Builds a gauge from max HP and missing HP. Current HP is clamped to
    /// `[0, max]`.
    pub fn new(max: i32, missing: i32) -> Self {
        let max = max.max(0);
        Self {
            current: (max - missing.max(0)).clamp(0, max),
            max,
        }
    }

    pub fn full(max: i32) -> Self {
        Self::new(max, 0)
    }

    /// current ≥ pct% of max, compared without division.
    pub fn percent_at_least(&self, pct: i32) -> bool {
        self.current * 100 >= pct * self.max
    }

    /// current ≤ pct% of max.
    pub fn percent_at_most(&self, pct: i32) -> bool {
        self.current * 100 <= pct * self.max
    }

    pub fn missing(&self) -> i32 {
        self.max - self.current
    }
}
