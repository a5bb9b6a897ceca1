//! Non-negative decimal threshold with two fractional digits.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Threshold {
    hundredths: u64,
}

impl Threshold {
    pub const ZERO: Threshold = Threshold { hundredths: 0 };

    pub fn from_hundredths(hundredths: u64) -> Self {
        Self { hundredths }
    }

    pub fn whole(value: u64) -> Self {
        Self {
            hundredths: value.saturating_mul(100),
        }
    }

    pub fn hundredths(self) -> u64 {
        self.hundredths
    }
}

impl FromStr for Threshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid threshold '{s}': expected a non-negative number with at most two decimals");
        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if fraction.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|h| h.checked_add(fraction))
            .map(Threshold::from_hundredths)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, fraction) = (self.hundredths / 100, self.hundredths % 100);
        if fraction == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{fraction:02}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_decimal() {
        assert_eq!("10".parse::<Threshold>().unwrap().hundredths(), 1000);
        assert_eq!("2.5".parse::<Threshold>().unwrap().hundredths(), 250);
        assert_eq!("2.05".parse::<Threshold>().unwrap().hundredths(), 205);
        assert_eq!(".5".parse::<Threshold>().unwrap().hundredths(), 50);
        assert_eq!("7.".parse::<Threshold>().unwrap().hundredths(), 700);
        assert_eq!("0".parse::<Threshold>().unwrap(), Threshold::ZERO);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for input in ["", ".", "-1", "1.234", "abc", "1e3", "+4", "1,5", " 3"] {
            assert!(input.parse::<Threshold>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!("184467440737095517".parse::<Threshold>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Threshold::whole(10).to_string(), "10");
        assert_eq!(Threshold::from_hundredths(250).to_string(), "2.50");
        assert_eq!(Threshold::from_hundredths(5).to_string(), "0.05");
    }
}
