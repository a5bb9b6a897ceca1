//! Byte units
//!
//! Binary multiples only: a kilobyte is 1024 bytes.

use crate::types::ByteDelta;
use std::fmt;

/// Canonical KB→bytes multiplier.
pub const BYTES_PER_KB: u64 = 1024;

/// Canonical MB→bytes multiplier (1024 * KB).
pub const BYTES_PER_MB: u64 = 1024 * BYTES_PER_KB;

/// Canonical GB→bytes multiplier (1024 * MB).
pub const BYTES_PER_GB: u64 = 1024 * BYTES_PER_MB;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteUnit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
}

impl ByteUnit {
    pub fn multiplier(self) -> u64 {
        match self {
            ByteUnit::Byte => 1,
            ByteUnit::Kilobyte => BYTES_PER_KB,
            ByteUnit::Megabyte => BYTES_PER_MB,
            ByteUnit::Gigabyte => BYTES_PER_GB,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ByteUnit::Byte => "B",
            ByteUnit::Kilobyte => "KB",
            ByteUnit::Megabyte => "MB",
            ByteUnit::Gigabyte => "GB",
        }
    }

    /// Express a byte delta in this unit, truncating toward zero.
    pub fn convert(self, delta_bytes: ByteDelta) -> ByteDelta {
        delta_bytes / ByteDelta::from(self.multiplier())
    }

    /// Largest unit whose multiplier does not exceed `bytes`.
    pub fn for_display(bytes: u128) -> Self {
        if bytes >= u128::from(BYTES_PER_GB) {
            ByteUnit::Gigabyte
        } else if bytes >= u128::from(BYTES_PER_MB) {
            ByteUnit::Megabyte
        } else if bytes >= u128::from(BYTES_PER_KB) {
            ByteUnit::Kilobyte
        } else {
            ByteUnit::Byte
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Human-readable byte amount in its auto-selected unit, two decimals, truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    bytes: ByteDelta,
    signed: bool,
}

impl DisplaySize {
    pub fn size(bytes: u64) -> Self {
        Self {
            bytes: ByteDelta::from(bytes),
            signed: false,
        }
    }

    /// Delta rendering always carries a sign (`+0 B` for no change).
    pub fn delta(bytes: ByteDelta) -> Self {
        Self {
            bytes,
            signed: true,
        }
    }
}

impl fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.bytes.unsigned_abs();
        let sign = if self.bytes < 0 {
            "-"
        } else if self.signed {
            "+"
        } else {
            ""
        };
        let unit = ByteUnit::for_display(magnitude);
        if unit == ByteUnit::Byte {
            return write!(f, "{sign}{magnitude} {unit}");
        }
        let hundredths = magnitude * 100 / u128::from(unit.multiplier());
        write!(f, "{sign}{}.{:02} {unit}", hundredths / 100, hundredths % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_unit_boundaries() {
        assert_eq!(ByteUnit::for_display(0), ByteUnit::Byte);
        assert_eq!(ByteUnit::for_display(1023), ByteUnit::Byte);
        assert_eq!(ByteUnit::for_display(1024), ByteUnit::Kilobyte);
        assert_eq!(ByteUnit::for_display(1_048_575), ByteUnit::Kilobyte);
        assert_eq!(ByteUnit::for_display(1_048_576), ByteUnit::Megabyte);
        assert_eq!(ByteUnit::for_display(1 << 30), ByteUnit::Gigabyte);
        assert_eq!(ByteUnit::for_display(5 << 40), ByteUnit::Gigabyte);
    }

    #[test]
    fn test_convert_truncates_toward_zero() {
        assert_eq!(ByteUnit::Kilobyte.convert(2047), 1);
        assert_eq!(ByteUnit::Kilobyte.convert(-2047), -1);
        assert_eq!(ByteUnit::Megabyte.convert(1_048_576), 1);
        assert_eq!(ByteUnit::Gigabyte.convert(1_073_741_823), 0);
        assert_eq!(ByteUnit::Byte.convert(-17), -17);
    }

    #[test]
    fn test_display_size_formatting() {
        assert_eq!(DisplaySize::size(512).to_string(), "512 B");
        assert_eq!(DisplaySize::size(1536).to_string(), "1.50 KB");
        assert_eq!(DisplaySize::size(2_097_152).to_string(), "2.00 MB");
        assert_eq!(DisplaySize::size(1_073_741_823).to_string(), "1023.99 MB");
        assert_eq!(DisplaySize::delta(0).to_string(), "+0 B");
        assert_eq!(DisplaySize::delta(-1_048_576).to_string(), "-1.00 MB");
        assert_eq!(DisplaySize::delta(3 << 30).to_string(), "+3.00 GB");
    }

    proptest! {
        #[test]
        fn prop_convert_never_overshoots(delta in -(1i128 << 50)..(1i128 << 50)) {
            for unit in [ByteUnit::Byte, ByteUnit::Kilobyte, ByteUnit::Megabyte, ByteUnit::Gigabyte] {
                let converted = unit.convert(delta);
                let back = converted * ByteDelta::from(unit.multiplier());
                prop_assert!(back.abs() <= delta.abs());
                prop_assert!((delta - back).abs() < ByteDelta::from(unit.multiplier()));
            }
        }

        #[test]
        fn prop_display_unit_fits(bytes in 0u128..(1u128 << 45)) {
            let unit = ByteUnit::for_display(bytes);
            prop_assert!(bytes >= u128::from(unit.multiplier()) || unit == ByteUnit::Byte);
            if unit != ByteUnit::Gigabyte {
                prop_assert!(bytes < u128::from(unit.multiplier()) * 1024);
            }
        }
    }
}
