use crate::defs::{ConditionRange, QualityRange};

/// Loadout configuration constants and tunable defaults for new selectors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadoutConfig {
    /// Stack ceiling given to freshly added single-thing selectors.
    pub default_stack_count: u32,
    /// Quality range given to freshly added single-thing selectors.
    pub default_quality_range: QualityRange,
    /// Condition range given to freshly added single-thing selectors.
    pub default_hit_points: ConditionRange,
}

impl LoadoutConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STACK_COUNT: u32 = 1;
    pub const DEFAULT_QUALITY_RANGE: QualityRange = QualityRange::ALL;
    pub const DEFAULT_HIT_POINTS: ConditionRange = ConditionRange::FULL;

    pub fn new() -> Self {
        Self {
            default_stack_count: Self::DEFAULT_STACK_COUNT,
            default_quality_range: Self::DEFAULT_QUALITY_RANGE,
            default_hit_points: Self::DEFAULT_HIT_POINTS,
        }
    }

    pub fn with_default_stack_count(default_stack_count: u32) -> Self {
        Self {
            default_stack_count,
            ..Self::new()
        }
    }
}

impl Default for LoadoutConfig {
    fn default() -> Self {
        Self::new()
    }
}
