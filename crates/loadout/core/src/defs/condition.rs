//! Allowed condition (fraction of hit points) ranges.

/// Closed interval within `[0.0, 1.0]`. Deserialized ranges are clamped and
/// ordered like [`ConditionRange::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ConditionBounds"))]
pub struct ConditionRange {
    pub min: f32,
    pub max: f32,
}

impl ConditionRange {
    pub const FULL: Self = Self { min: 0.0, max: 1.0 };

    /// Creates a range clamped to `[0.0, 1.0]`; reversed bounds are swapped.
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min: min.clamp(0.0, 1.0),
            max: max.clamp(0.0, 1.0),
        }
    }

    pub fn includes(&self, condition: f32) -> bool {
        self.min <= condition && condition <= self.max
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

impl Default for ConditionRange {
    fn default() -> Self {
        Self::FULL
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ConditionBounds {
    min: f32,
    max: f32,
}

#[cfg(feature = "serde")]
impl From<ConditionBounds> for ConditionRange {
    fn from(bounds: ConditionBounds) -> Self {
        Self::new(bounds.min, bounds.max)
    }
}
