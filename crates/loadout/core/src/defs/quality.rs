//! Craftsmanship tiers and allowed quality ranges.

/// Ordinal craftsmanship tier, worst to best.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Quality {
    Awful,
    Poor,
    #[default]
    Normal,
    Good,
    Excellent,
    Masterwork,
    Legendary,
}

impl Quality {
    pub const WORST: Self = Self::Awful;
    pub const BEST: Self = Self::Legendary;

    /// Position on the scale, `0` for [`Quality::Awful`].
    pub const fn rank(self) -> u8 {
        self as u8
    }
}

/// Allowed quality tiers, inclusive on both ends.
///
/// Deserialized ranges go through [`QualityRange::new`], so `min <= max` holds
/// for every value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "QualityBounds"))]
pub struct QualityRange {
    pub min: Quality,
    pub max: Quality,
}

impl QualityRange {
    pub const ALL: Self = Self {
        min: Quality::WORST,
        max: Quality::BEST,
    };

    /// Creates a range; reversed bounds are swapped.
    pub fn new(min: Quality, max: Quality) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn at_least(min: Quality) -> Self {
        Self::new(min, Quality::BEST)
    }

    pub fn includes(&self, quality: Quality) -> bool {
        self.min <= quality && quality <= self.max
    }

    /// Number of tiers covered beyond the lower bound.
    pub fn span(&self) -> u8 {
        self.max.rank().abs_diff(self.min.rank())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct QualityBounds {
    min: Quality,
    max: Quality,
}

#[cfg(feature = "serde")]
impl From<QualityBounds> for QualityRange {
    fn from(bounds: QualityBounds) -> Self {
        Self::new(bounds.min, bounds.max)
    }
}

impl Default for QualityRange {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ordering_follows_scale() {
        let all: Vec<_> = Quality::iter().collect();
        assert_eq!(all.first(), Some(&Quality::Awful));
        assert_eq!(all.last(), Some(&Quality::Legendary));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn reversed_bounds_are_normalised() {
        let range = QualityRange::new(Quality::Excellent, Quality::Poor);
        assert_eq!(range.min, Quality::Poor);
        assert_eq!(range.max, Quality::Excellent);
        assert_eq!(range.span(), 3);
    }

    #[test]
    fn span_tolerates_reversed_fields() {
        let range = QualityRange {
            min: Quality::Legendary,
            max: Quality::Awful,
        };
        assert_eq!(range.span(), 6);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_bounds_are_normalised() {
        let range: QualityRange =
            serde_json::from_str(r#"{"min":"Excellent","max":"Poor"}"#).unwrap();
        assert_eq!(range, QualityRange::new(Quality::Poor, Quality::Excellent));
    }

    #[test]
    fn includes_is_inclusive() {
        let range = QualityRange::new(Quality::Normal, Quality::Good);
        assert!(range.includes(Quality::Normal));
        assert!(range.includes(Quality::Good));
        assert!(!range.includes(Quality::Poor));
        assert!(!range.includes(Quality::Legendary));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Masterwork".parse::<Quality>().ok(), Some(Quality::Masterwork));
        assert_eq!(Quality::Good.to_string(), "good");
    }
}
