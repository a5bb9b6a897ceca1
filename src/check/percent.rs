//! Percentage change between two sizes
//!
//! Threshold comparisons are exact (cross-multiplied, no division). The
//! displayed value is in hundredths of a percent, truncated toward zero. Any
//! growth from an empty file is unbounded and exceeds every threshold.

use super::threshold::Threshold;
use crate::types::{ByteCount, ByteDelta};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentChange {
    change_bytes: ByteDelta,
    base_bytes: ByteCount,
}

impl PercentChange {
    /// `(new / old * 100) - 100`
    pub fn growth(old: ByteCount, new: ByteCount) -> Self {
        Self {
            change_bytes: ByteDelta::from(new) - ByteDelta::from(old),
            base_bytes: old,
        }
    }

    /// `(1 - new / old) * 100`
    pub fn shrinkage(old: ByteCount, new: ByteCount) -> Self {
        Self {
            change_bytes: ByteDelta::from(old) - ByteDelta::from(new),
            base_bytes: old,
        }
    }

    /// Strictly greater than `threshold` percent.
    pub fn exceeds(&self, threshold: Threshold) -> bool {
        if self.change_bytes <= 0 {
            return false;
        }
        let lhs = self.change_bytes.unsigned_abs() * 10_000;
        let rhs = u128::from(threshold.hundredths()) * u128::from(self.base_bytes);
        lhs > rhs
    }

    /// Hundredths of a percent, or `None` when the base is empty and the size moved.
    pub fn hundredths(&self) -> Option<ByteDelta> {
        if self.base_bytes == 0 {
            return (self.change_bytes == 0).then_some(0);
        }
        Some(self.change_bytes * 10_000 / ByteDelta::from(self.base_bytes))
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hundredths() {
            Some(h) => {
                let sign = if h < 0 { "-" } else { "" };
                let magnitude = h.unsigned_abs();
                write!(f, "{sign}{}.{:02}%", magnitude / 100, magnitude % 100)
            }
            None if self.change_bytes > 0 => f.write_str("inf%"),
            None => f.write_str("-inf%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_growth_boundary_is_strict() {
        let growth = PercentChange::growth(100, 110);
        assert_eq!(growth.hundredths(), Some(1000));
        assert!(!growth.exceeds(Threshold::whole(10)));
        assert!(growth.exceeds(Threshold::whole(9)));
    }

    #[test]
    fn test_shrinkage() {
        let shrink = PercentChange::shrinkage(200, 150);
        assert_eq!(shrink.hundredths(), Some(2500));
        assert!(shrink.exceeds(Threshold::whole(24)));
        assert!(!shrink.exceeds(Threshold::whole(25)));
        assert_eq!(shrink.to_string(), "25.00%");
    }

    #[test]
    fn test_tiny_growth_still_exceeds_zero() {
        let growth = PercentChange::growth(1_000_000, 1_000_001);
        assert_eq!(growth.hundredths(), Some(0));
        assert!(growth.exceeds(Threshold::ZERO));
    }

    #[test]
    fn test_no_change_never_exceeds() {
        let growth = PercentChange::growth(500, 500);
        assert!(!growth.exceeds(Threshold::ZERO));
        assert!(!PercentChange::shrinkage(500, 500).exceeds(Threshold::ZERO));
    }

    #[test]
    fn test_empty_base() {
        let from_empty = PercentChange::growth(0, 10);
        assert_eq!(from_empty.hundredths(), None);
        assert!(from_empty.exceeds(Threshold::whole(1_000_000)));
        assert_eq!(from_empty.to_string(), "inf%");

        let still_empty = PercentChange::growth(0, 0);
        assert_eq!(still_empty.hundredths(), Some(0));
        assert!(!still_empty.exceeds(Threshold::ZERO));

        let shrink = PercentChange::shrinkage(0, 10);
        assert!(!shrink.exceeds(Threshold::ZERO));
        assert_eq!(shrink.to_string(), "-inf%");
    }

    #[test]
    fn test_display_truncates() {
        assert_eq!(PercentChange::growth(3, 4).to_string(), "33.33%");
        assert_eq!(PercentChange::growth(3, 2).to_string(), "-33.33%");
        assert_eq!(PercentChange::shrinkage(3, 0).to_string(), "100.00%");
    }

    proptest! {
        #[test]
        fn prop_growth_and_shrinkage_are_opposites(old in 1u64..u64::MAX / 2, new in 0u64..u64::MAX / 2) {
            let growth = PercentChange::growth(old, new).hundredths().unwrap();
            let shrinkage = PercentChange::shrinkage(old, new).hundredths().unwrap();
            prop_assert_eq!(growth, -shrinkage);
        }

        #[test]
        fn prop_exceeds_agrees_with_exact_value(old in 1u64..1_000_000, new in 0u64..2_000_000, t in 0u64..20_000) {
            let threshold = Threshold::from_hundredths(t);
            let exact = (i128::from(new) - i128::from(old)) * 10_000 > i128::from(t) * i128::from(old);
            prop_assert_eq!(PercentChange::growth(old, new).exceeds(threshold), exact);
        }
    }
}
