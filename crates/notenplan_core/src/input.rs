//! Parsing of raw grade input typed by the user.
//!
//! Accepts both `.` and `,` as decimal separator since grades are commonly
//! written as `2,5`. Range checks are left to `Grade`.

use crate::model::gradebook::GradebookError;
use once_cell::sync::Lazy;
use regex::Regex;

static GRADE_INPUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?\d+)(?:[.,](\d+))?$").expect("valid grade input regex"));

/// Parses a grade from user input.
///
/// # Errors
/// - `NonNumericGrade` when the trimmed input is not a plain decimal number.
pub fn parse_grade_input(raw: &str) -> Result<f64, GradebookError> {
    let trimmed = raw.trim();
    let caps = GRADE_INPUT_RE
        .captures(trimmed)
        .ok_or_else(|| GradebookError::NonNumericGrade(trimmed.to_string()))?;

    let normalized = match caps.get(2) {
        Some(fraction) => format!("{}.{}", &caps[1], fraction.as_str()),
        None => caps[1].to_string(),
    };
    normalized
        .parse::<f64>()
        .map_err(|_| GradebookError::NonNumericGrade(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_grade_input;
    use crate::model::gradebook::GradebookError;

    #[test]
    fn accepts_dot_and_comma_separators() {
        assert_eq!(parse_grade_input("2").unwrap(), 2.0);
        assert_eq!(parse_grade_input(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_grade_input("1,7").unwrap(), 1.7);
    }

    #[test]
    fn out_of_range_numbers_still_parse() {
        assert_eq!(parse_grade_input("7").unwrap(), 7.0);
        assert_eq!(parse_grade_input("-1").unwrap(), -1.0);
    }

    #[test]
    fn rejects_non_numeric_input() {
        for raw in ["", "abc", "2.5abc", "1.2.3", "2,", ".5", "NaN", "inf"] {
            let err = parse_grade_input(raw).unwrap_err();
            assert!(
                matches!(err, GradebookError::NonNumericGrade(_)),
                "{raw:?} should be non-numeric"
            );
        }
    }
}
