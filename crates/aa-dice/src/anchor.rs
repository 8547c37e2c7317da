//! Anchors and their loaded weight tables.
//!
//! The low anchor sits near 3 and the high anchor near 9. Each anchor carries
//! a fixed table of totals the loaded dice may land on.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dice::Total;
use crate::error::DiceError;
use crate::weighted::WeightedOption;

const LOW_TABLE: &[WeightedOption<Total>] = &[
    WeightedOption::new(2, 1),
    WeightedOption::new(3, 3),
    WeightedOption::new(4, 3),
    WeightedOption::new(5, 1),
];

const HIGH_TABLE: &[WeightedOption<Total>] = &[
    WeightedOption::new(8, 2),
    WeightedOption::new(9, 3),
    WeightedOption::new(10, 2),
];

/// The anchor a participant is primed with before estimating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Totals 2 to 5, leaning toward 3 and 4.
    Low,
    /// Totals 8 to 10, leaning toward 9.
    High,
}

impl Anchor {
    /// Both anchors, in display order.
    pub const ALL: [Anchor; 2] = [Anchor::Low, Anchor::High];

    /// The weighted totals this anchor may produce.
    pub fn table(self) -> &'static [WeightedOption<Total>] {
        match self {
            Self::Low => LOW_TABLE,
            Self::High => HIGH_TABLE,
        }
    }

    /// The value the anchor is named after.
    pub fn anchor_point(self) -> Total {
        match self {
            Self::Low => 3,
            Self::High => 9,
        }
    }

    /// Whether `total` is one this anchor can produce.
    pub fn permits(self, total: Total) -> bool {
        self.table().iter().any(|o| o.value == total)
    }

    /// Parse an anchor, falling back to [`Anchor::Low`] for unknown input.
    ///
    /// This is the lenient path for values read back from storage. Input
    /// typed by a user should go through [`FromStr`] and be rejected instead.
    pub fn parse_or_low(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: DiceError| {
            tracing::warn!(input = s, error = %e, "unknown anchor, using low");
            Self::Low
        })
    }
}

impl FromStr for Anchor {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            _ => Err(DiceError::InvalidAnchor(s.to_string())),
        }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weighted::validate_weights;

    #[test]
    fn tables_match_anchor_ranges() {
        let low: Vec<Total> = Anchor::Low.table().iter().map(|o| o.value).collect();
        let high: Vec<Total> = Anchor::High.table().iter().map(|o| o.value).collect();
        assert_eq!(low, vec![2, 3, 4, 5]);
        assert_eq!(high, vec![8, 9, 10]);
    }

    #[test]
    fn table_weights() {
        let low: Vec<u32> = Anchor::Low.table().iter().map(|o| o.weight).collect();
        let high: Vec<u32> = Anchor::High.table().iter().map(|o| o.weight).collect();
        assert_eq!(low, vec![1, 3, 3, 1]);
        assert_eq!(high, vec![2, 3, 2]);
    }

    #[test]
    fn tables_are_valid() {
        for anchor in Anchor::ALL {
            assert!(validate_weights(anchor.table()).is_ok());
        }
    }

    #[test]
    fn permits() {
        assert!(Anchor::Low.permits(2));
        assert!(!Anchor::Low.permits(6));
        assert!(Anchor::High.permits(10));
        assert!(!Anchor::High.permits(7));
    }

    #[test]
    fn parse_strict() {
        assert_eq!("low".parse::<Anchor>().unwrap(), Anchor::Low);
        assert_eq!(" HIGH ".parse::<Anchor>().unwrap(), Anchor::High);
        assert!(matches!(
            "medium".parse::<Anchor>(),
            Err(DiceError::InvalidAnchor(s)) if s == "medium"
        ));
    }

    #[test]
    fn parse_or_low_falls_back() {
        assert_eq!(Anchor::parse_or_low("high"), Anchor::High);
        assert_eq!(Anchor::parse_or_low("sideways"), Anchor::Low);
        assert_eq!(Anchor::parse_or_low(""), Anchor::Low);
    }

    #[test]
    fn display_and_serde_agree() {
        for anchor in Anchor::ALL {
            let json = serde_json::to_string(&anchor).unwrap();
            assert_eq!(json, format!("\"{anchor}\""));
        }
    }
}
