//! Size-Change Evaluator
//!
//! Applies a [`CheckSpec`] to an old/new size pair and explains the result.

use super::percent::PercentChange;
use super::units::DisplaySize;
use super::{CheckKind, CheckSpec, Threshold, ThresholdUnit, Verdict};
use crate::types::{ByteCount, ByteDelta};

/// Sizes compared by one run. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub old_size_bytes: ByteCount,
    pub new_size_bytes: ByteCount,
}

impl Measurement {
    pub fn new(old_size_bytes: ByteCount, new_size_bytes: ByteCount) -> Self {
        Self {
            old_size_bytes,
            new_size_bytes,
        }
    }

    /// No recorded history: the old size is taken to equal the new one.
    pub fn first_run(new_size_bytes: ByteCount) -> Self {
        Self::new(new_size_bytes, new_size_bytes)
    }

    pub fn delta_bytes(&self) -> ByteDelta {
        ByteDelta::from(self.new_size_bytes) - ByteDelta::from(self.old_size_bytes)
    }

    pub fn percent_growth(&self) -> PercentChange {
        PercentChange::growth(self.old_size_bytes, self.new_size_bytes)
    }

    pub fn percent_shrinkage(&self) -> PercentChange {
        PercentChange::shrinkage(self.old_size_bytes, self.new_size_bytes)
    }

    fn old(&self) -> DisplaySize {
        DisplaySize::size(self.old_size_bytes)
    }

    fn new_size(&self) -> DisplaySize {
        DisplaySize::size(self.new_size_bytes)
    }

    fn delta(&self) -> DisplaySize {
        DisplaySize::delta(self.delta_bytes())
    }
}

/// Verdict plus the explanation printed for the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub measurement: Measurement,
    pub message: String,
}

impl Evaluation {
    /// `new_size_bytes=<N>;old_size_bytes=<N>;size_difference_bytes=<N>;message=<text>`
    pub fn report_line(&self) -> String {
        format!(
            "new_size_bytes={};old_size_bytes={};size_difference_bytes={};message={}",
            self.measurement.new_size_bytes,
            self.measurement.old_size_bytes,
            self.measurement.delta_bytes(),
            self.message
        )
    }
}

pub fn evaluate(spec: &CheckSpec, measurement: Measurement) -> Evaluation {
    let m = measurement;
    let delta = m.delta_bytes();

    let (verdict, message) = match spec.kind {
        CheckKind::Change if delta != 0 => (
            Verdict::Changed,
            format!("File size changed from {} to {} ({})", m.old(), m.new_size(), m.delta()),
        ),
        CheckKind::Change => (
            Verdict::Pass,
            format!("File size unchanged at {}", m.new_size()),
        ),
        CheckKind::Same if delta == 0 => (
            Verdict::Unchanged,
            format!("File size unchanged at {}", m.new_size()),
        ),
        CheckKind::Same => (
            Verdict::Pass,
            format!("File size changed from {} to {} ({})", m.old(), m.new_size(), m.delta()),
        ),
        CheckKind::Grow => evaluate_grow(&m, spec.unit, spec.threshold),
        CheckKind::Shrink => evaluate_shrink(&m, spec.unit, spec.threshold),
    };

    Evaluation {
        verdict,
        measurement,
        message,
    }
}

fn evaluate_grow(m: &Measurement, unit: ThresholdUnit, threshold: Threshold) -> (Verdict, String) {
    let (failed, amount) = match unit {
        ThresholdUnit::Percent => {
            let growth = m.percent_growth();
            (growth.exceeds(threshold), growth.to_string())
        }
        ThresholdUnit::Bytes(byte_unit) => {
            let converted = byte_unit.convert(m.delta_bytes());
            let failed = m.delta_bytes() > 0 && reaches(converted, threshold);
            (failed, format!("{converted} {byte_unit}"))
        }
    };

    if failed {
        (
            Verdict::Grew,
            format!(
                "File grew by {amount} from {} to {} ({}), over the {}{unit} growth limit",
                m.old(),
                m.new_size(),
                m.delta(),
                threshold
            ),
        )
    } else {
        (
            Verdict::Pass,
            format!(
                "File size went from {} to {} ({}), within the {}{unit} growth limit",
                m.old(),
                m.new_size(),
                m.delta(),
                threshold
            ),
        )
    }
}

fn evaluate_shrink(m: &Measurement, unit: ThresholdUnit, threshold: Threshold) -> (Verdict, String) {
    let (failed, amount) = match unit {
        ThresholdUnit::Percent => {
            let shrinkage = m.percent_shrinkage();
            (shrinkage.exceeds(threshold), shrinkage.to_string())
        }
        ThresholdUnit::Bytes(byte_unit) => {
            let converted = byte_unit.convert(m.delta_bytes());
            let failed = m.delta_bytes() < 0 && reaches(-converted, threshold);
            (failed, format!("{} {byte_unit}", -converted))
        }
    };

    if failed {
        (
            Verdict::Shrank,
            format!(
                "File shrank by {amount} from {} to {} ({}), over the {}{unit} shrink limit",
                m.old(),
                m.new_size(),
                m.delta(),
                threshold
            ),
        )
    } else {
        (
            Verdict::Pass,
            format!(
                "File size went from {} to {} ({}), within the {}{unit} shrink limit",
                m.old(),
                m.new_size(),
                m.delta(),
                threshold
            ),
        )
    }
}

/// `converted >= threshold` with the threshold's two decimals kept exact.
fn reaches(converted: ByteDelta, threshold: Threshold) -> bool {
    converted * 100 >= ByteDelta::from(threshold.hundredths())
}
