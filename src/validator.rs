//! Output bounds validation.
//!
//! Every subsystem runs its computed output through the validator before
//! treating it as trustworthy. A failing check is a soft signal: it is
//! logged as a warning and the tick carries on. It never becomes a hard
//! error.

use tracing::{trace, warn};

pub const SAMPLE_MIN: f64 = -10_000.0;
pub const SAMPLE_MAX: f64 = 10_000.0;

/// A value tree submitted for bounds checking.
///
/// Closed set of leaf kinds: numeric scalars are range-checked, groups are
/// traversed recursively, and anything else is vacuously valid.
#[derive(Debug, Clone)]
pub enum Sample {
    Scalar(f64),
    Group(Vec<(&'static str, Sample)>),
    Other,
}

impl Sample {
    pub fn scalar(value: f64) -> Self {
        Sample::Scalar(value)
    }

    pub fn group(fields: Vec<(&'static str, Sample)>) -> Self {
        Sample::Group(fields)
    }
}

/// Types that can render themselves as a [`Sample`] tree for auditing.
pub trait Validate {
    fn sample(&self) -> Sample;
}

/// Returns true iff every numeric leaf in the tree is finite and lies
/// within `[SAMPLE_MIN, SAMPLE_MAX]`. Total over arbitrary nesting depth.
pub fn in_bounds(sample: &Sample) -> bool {
    match sample {
        Sample::Scalar(value) => value.is_finite() && (SAMPLE_MIN..=SAMPLE_MAX).contains(value),
        Sample::Group(fields) => fields.iter().all(|(_, nested)| in_bounds(nested)),
        Sample::Other => true,
    }
}

/// Checks a value and logs the outcome under the given subsystem name.
/// Returns the check result so callers can surface it in their own state
/// if they want to.
pub fn audit<T: Validate>(name: &str, value: &T) -> bool {
    let ok = in_bounds(&value.sample());
    if ok {
        trace!(subsystem = name, "bounds check passed");
    } else {
        warn!(subsystem = name, "bounds check failed");
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_inside_interval_is_valid() {
        assert!(in_bounds(&Sample::scalar(0.0)));
        assert!(in_bounds(&Sample::scalar(SAMPLE_MIN)));
        assert!(in_bounds(&Sample::scalar(SAMPLE_MAX)));
    }

    #[test]
    fn scalar_outside_interval_is_invalid() {
        assert!(!in_bounds(&Sample::scalar(SAMPLE_MIN - 0.001)));
        assert!(!in_bounds(&Sample::scalar(SAMPLE_MAX + 0.001)));
    }

    #[test]
    fn non_finite_scalars_are_invalid() {
        assert!(!in_bounds(&Sample::scalar(f64::NAN)));
        assert!(!in_bounds(&Sample::scalar(f64::INFINITY)));
        assert!(!in_bounds(&Sample::scalar(f64::NEG_INFINITY)));
    }

    #[test]
    fn other_leaves_are_vacuously_valid() {
        assert!(in_bounds(&Sample::Other));
        assert!(in_bounds(&Sample::group(vec![("status", Sample::Other)])));
    }

    #[test]
    fn nested_groups_are_traversed_to_any_depth() {
        let deep = Sample::group(vec![(
            "outer",
            Sample::group(vec![(
                "middle",
                Sample::group(vec![
                    ("fine", Sample::scalar(1.0)),
                    ("bad", Sample::scalar(99_999.0)),
                ]),
            )]),
        )]);
        assert!(!in_bounds(&deep));
    }

    #[test]
    fn group_is_valid_iff_all_leaves_are_valid() {
        let mixed = Sample::group(vec![
            ("a", Sample::scalar(-500.0)),
            ("b", Sample::Other),
            ("c", Sample::group(vec![("d", Sample::scalar(500.0))])),
        ]);
        assert!(in_bounds(&mixed));
    }

    #[test]
    fn empty_group_is_valid() {
        assert!(in_bounds(&Sample::group(Vec::new())));
    }
}
