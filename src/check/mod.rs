//! Size-Change Check
//!
//! The single predicate requested for one invocation ([`CheckSpec`]), the
//! outcome it produces ([`Verdict`]) and the evaluator tying them together.

pub mod evaluator;
pub mod percent;
pub mod threshold;
pub mod units;

pub use evaluator::{evaluate, Evaluation, Measurement};
pub use percent::PercentChange;
pub use threshold::Threshold;
pub use units::{ByteUnit, DisplaySize};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Fail when the size changed.
    Change,
    /// Fail when the size did not change.
    Same,
    Grow,
    Shrink,
}

/// How a grow/shrink threshold is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdUnit {
    Percent,
    Bytes(ByteUnit),
}

impl fmt::Display for ThresholdUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdUnit::Percent => f.write_str("%"),
            ThresholdUnit::Bytes(unit) => write!(f, " {unit}"),
        }
    }
}

/// CheckSpec: the one active predicate of an invocation
///
/// `unit` and `threshold` only matter for grow and shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSpec {
    pub kind: CheckKind,
    pub unit: ThresholdUnit,
    pub threshold: Threshold,
}

impl CheckSpec {
    pub fn change() -> Self {
        Self {
            kind: CheckKind::Change,
            unit: ThresholdUnit::Percent,
            threshold: Threshold::ZERO,
        }
    }

    pub fn same() -> Self {
        Self {
            kind: CheckKind::Same,
            ..Self::change()
        }
    }

    pub fn grow(unit: ThresholdUnit, threshold: Threshold) -> Self {
        Self {
            kind: CheckKind::Grow,
            unit,
            threshold,
        }
    }

    pub fn shrink(unit: ThresholdUnit, threshold: Threshold) -> Self {
        Self {
            kind: CheckKind::Shrink,
            unit,
            threshold,
        }
    }

    /// Bare `--grow`: any growth fails.
    pub fn any_growth() -> Self {
        Self::grow(ThresholdUnit::Percent, Threshold::ZERO)
    }

    /// Bare `--shrink`: any shrinkage fails.
    pub fn any_shrinkage() -> Self {
        Self::shrink(ThresholdUnit::Percent, Threshold::ZERO)
    }
}

impl Default for CheckSpec {
    fn default() -> Self {
        Self::change()
    }
}

/// Outcome of a check, reported through the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Pass,
    Changed,
    Unchanged,
    Grew,
    Shrank,
}

impl Verdict {
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Pass => 0,
            Verdict::Changed => 1,
            Verdict::Unchanged => 2,
            Verdict::Grew => 3,
            Verdict::Shrank => 4,
        }
    }

    pub fn is_failure(self) -> bool {
        self != Verdict::Pass
    }
}
