//! Averages and display bands for grades.
//!
//! # Invariants
//! - `average` of an empty slice is `None`; callers render it as a sentinel.
//! - `Average` holds the mean already rounded half away from zero to two
//!   decimals, so its band and its text always agree.

use std::fmt::{Display, Formatter};

const GOOD_UPPER_BOUND: f64 = 2.0;
const MID_UPPER_BOUND: f64 = 3.5;

/// Arithmetic mean rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Average(f64);

impl Average {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Display band of the rounded mean.
    pub fn band(self) -> GradeBand {
        GradeBand::for_grade(self.0)
    }
}

impl Display for Average {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Computes the rounded arithmetic mean of `grades`.
///
/// Returns `None` for an empty slice.
pub fn average(grades: &[f64]) -> Option<Average> {
    if grades.is_empty() {
        return None;
    }
    let sum: f64 = grades.iter().sum();
    let mean = sum / grades.len() as f64;
    Some(Average(round_to_cents(mean)))
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Color bucket used for display styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeBand {
    /// `grade <= 2.0`
    Good,
    /// `2.0 < grade <= 3.5`
    Mid,
    /// `grade > 3.5`
    Bad,
}

impl GradeBand {
    pub fn for_grade(grade: f64) -> Self {
        if grade <= GOOD_UPPER_BOUND {
            Self::Good
        } else if grade <= MID_UPPER_BOUND {
            Self::Mid
        } else {
            Self::Bad
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Mid => "mid",
            Self::Bad => "bad",
        }
    }

    /// CSS class name used by the HTML renderer.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Good => "grade-good",
            Self::Mid => "grade-mid",
            Self::Bad => "grade-bad",
        }
    }
}
