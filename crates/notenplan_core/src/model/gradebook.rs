//! Subjects, notes and the gradebook store.
//!
//! # Responsibility
//! - Hold the ordered subject list and each subject's ordered notes.
//! - Validate add-subject/add-note/delete-subject requests before mutating.
//! - Provide the flattened grade views used for averages.
//!
//! # Invariants
//! - Names and labels are stored trimmed and never empty.
//! - No two subjects share a name after lowercase folding.
//! - `Grade` values are finite and within `[MIN_GRADE, MAX_GRADE]`.
//!
//! # See also
//! - `crate::stats` for averaging and display bands.

use crate::stats::{average, Average};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Best grade a note can carry.
pub const MIN_GRADE: f64 = 1.0;
/// Worst grade a note can carry.
pub const MAX_GRADE: f64 = 6.0;

const INVALID_NOTE_ALERT: &str = "Bitte gültigen Namen und Note (1–6) eingeben.";

/// Validation error for gradebook mutations and persisted documents.
///
/// `Display` yields the alert text shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum GradebookError {
    /// Subject name is blank after trim.
    EmptySubjectName,
    /// Another subject already uses this name (case-insensitive).
    DuplicateSubject(String),
    /// Note label is blank after trim.
    EmptyNoteLabel,
    /// Grade input could not be read as a number.
    NonNumericGrade(String),
    /// Grade is NaN, infinite or outside `[MIN_GRADE, MAX_GRADE]`.
    GradeOutOfRange(f64),
    /// No subject at the given zero-based index.
    SubjectNotFound(usize),
}

impl GradebookError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptySubjectName => "empty_subject_name",
            Self::DuplicateSubject(_) => "duplicate_subject",
            Self::EmptyNoteLabel => "empty_note_label",
            Self::NonNumericGrade(_) => "non_numeric_grade",
            Self::GradeOutOfRange(_) => "grade_out_of_range",
            Self::SubjectNotFound(_) => "subject_not_found",
        }
    }
}

impl Display for GradebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySubjectName => write!(f, "Bitte einen Fachnamen eingeben."),
            Self::DuplicateSubject(_) => write!(f, "Dieses Fach gibt es schon."),
            Self::EmptyNoteLabel | Self::NonNumericGrade(_) | Self::GradeOutOfRange(_) => {
                write!(f, "{INVALID_NOTE_ALERT}")
            }
            Self::SubjectNotFound(index) => write!(f, "Fach Nr. {} gibt es nicht.", index + 1),
        }
    }
}

impl Error for GradebookError {}

/// A grade within `[MIN_GRADE, MAX_GRADE]`.
///
/// Serialized as a plain JSON number; deserialization re-checks the range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Grade(f64);

impl Grade {
    /// Validates and wraps a raw grade value.
    pub fn new(value: f64) -> Result<Self, GradebookError> {
        if !value.is_finite() || !(MIN_GRADE..=MAX_GRADE).contains(&value) {
            return Err(GradebookError::GradeOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Grade {
    type Error = GradebookError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for f64 {
    fn from(value: Grade) -> Self {
        value.0
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A single labeled grade entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    label: String,
    grade: Grade,
}

impl Note {
    /// Creates a note from a label and a raw grade.
    ///
    /// The label is trimmed; blank labels and out-of-range grades are rejected.
    pub fn new(label: &str, grade: f64) -> Result<Self, GradebookError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(GradebookError::EmptyNoteLabel);
        }
        Ok(Self {
            label: label.to_string(),
            grade: Grade::new(grade)?,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }
}

/// A named course holding its notes in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    name: String,
    notes: Vec<Note>,
}

impl Subject {
    fn new(name: String) -> Self {
        Self {
            name,
            notes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Raw grade values of this subject's notes, in insertion order.
    pub fn grades(&self) -> Vec<f64> {
        self.notes.iter().map(|note| note.grade.value()).collect()
    }

    /// Mean grade of this subject, or `None` when it has no notes.
    pub fn average(&self) -> Option<Average> {
        average(&self.grades())
    }
}

/// The ordered collection of subjects: the whole application state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    subjects: Vec<Subject>,
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, index: usize) -> Option<&Subject> {
        self.subjects.get(index)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Total note count across all subjects.
    pub fn note_count(&self) -> usize {
        self.subjects.iter().map(|subject| subject.notes.len()).sum()
    }

    /// Appends a subject with no notes and returns its index.
    ///
    /// # Errors
    /// - `EmptySubjectName` when `name` is blank after trim.
    /// - `DuplicateSubject` when a subject with the same folded name exists.
    pub fn add_subject(&mut self, name: &str) -> Result<usize, GradebookError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GradebookError::EmptySubjectName);
        }
        let folded = name.to_lowercase();
        if self
            .subjects
            .iter()
            .any(|subject| subject.name.to_lowercase() == folded)
        {
            return Err(GradebookError::DuplicateSubject(name.to_string()));
        }

        self.subjects.push(Subject::new(name.to_string()));
        Ok(self.subjects.len() - 1)
    }

    /// Appends a note to the subject at `index` and returns the note index.
    ///
    /// # Errors
    /// - `SubjectNotFound` when `index` is out of range.
    /// - `EmptyNoteLabel` / `GradeOutOfRange` from note validation.
    pub fn add_note(
        &mut self,
        index: usize,
        label: &str,
        grade: f64,
    ) -> Result<usize, GradebookError> {
        let subject = self
            .subjects
            .get_mut(index)
            .ok_or(GradebookError::SubjectNotFound(index))?;
        subject.notes.push(Note::new(label, grade)?);
        Ok(subject.notes.len() - 1)
    }

    /// Removes and returns the subject at `index`.
    ///
    /// Remaining subjects keep their relative order and their notes.
    pub fn delete_subject(&mut self, index: usize) -> Result<Subject, GradebookError> {
        if index >= self.subjects.len() {
            return Err(GradebookError::SubjectNotFound(index));
        }
        Ok(self.subjects.remove(index))
    }

    /// Every grade of every subject, subject by subject.
    pub fn all_grades(&self) -> Vec<f64> {
        self.subjects.iter().flat_map(Subject::grades).collect()
    }

    /// Mean over all notes of all subjects, or `None` when there are none.
    pub fn overall_average(&self) -> Option<Average> {
        average(&self.all_grades())
    }

    /// Re-checks invariants that serde cannot express on its own.
    ///
    /// Grade ranges are enforced while deserializing; this covers blank
    /// names/labels and duplicate subject names in loaded documents.
    pub fn validate(&self) -> Result<(), GradebookError> {
        let mut seen = HashSet::new();
        for subject in &self.subjects {
            if subject.name.trim().is_empty() {
                return Err(GradebookError::EmptySubjectName);
            }
            if !seen.insert(subject.name.to_lowercase()) {
                return Err(GradebookError::DuplicateSubject(subject.name.clone()));
            }
            if subject.notes.iter().any(|note| note.label.trim().is_empty()) {
                return Err(GradebookError::EmptyNoteLabel);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Grade, Gradebook, GradebookError, Note};

    #[test]
    fn grade_accepts_bounds_and_rejects_outside() {
        assert!(Grade::new(1.0).is_ok());
        assert!(Grade::new(6.0).is_ok());
        assert_eq!(
            Grade::new(0.9).unwrap_err(),
            GradebookError::GradeOutOfRange(0.9)
        );
        assert!(Grade::new(6.01).is_err());
        assert!(Grade::new(f64::NAN).is_err());
        assert!(Grade::new(f64::INFINITY).is_err());
    }

    #[test]
    fn note_trims_label() {
        let note = Note::new("  Test  ", 2.0).unwrap();
        assert_eq!(note.label(), "Test");
        assert_eq!(note.grade().value(), 2.0);
    }

    #[test]
    fn add_subject_trims_and_rejects_blank() {
        let mut book = Gradebook::new();
        assert_eq!(book.add_subject("  Mathe ").unwrap(), 0);
        assert_eq!(book.subjects()[0].name(), "Mathe");
        assert_eq!(
            book.add_subject("   ").unwrap_err(),
            GradebookError::EmptySubjectName
        );
    }

    #[test]
    fn add_subject_rejects_case_insensitive_duplicate() {
        let mut book = Gradebook::new();
        book.add_subject("Mathe").unwrap();
        let err = book.add_subject("MATHE").unwrap_err();
        assert_eq!(err, GradebookError::DuplicateSubject("MATHE".to_string()));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn add_note_to_missing_subject_fails() {
        let mut book = Gradebook::new();
        assert_eq!(
            book.add_note(0, "Test", 2.0).unwrap_err(),
            GradebookError::SubjectNotFound(0)
        );
    }

    #[test]
    fn alert_texts_match_user_messages() {
        assert_eq!(
            GradebookError::EmptySubjectName.to_string(),
            "Bitte einen Fachnamen eingeben."
        );
        assert_eq!(
            GradebookError::DuplicateSubject("Mathe".into()).to_string(),
            "Dieses Fach gibt es schon."
        );
        assert_eq!(
            GradebookError::GradeOutOfRange(7.0).to_string(),
            "Bitte gültigen Namen und Note (1–6) eingeben."
        );
        assert_eq!(
            GradebookError::SubjectNotFound(2).to_string(),
            "Fach Nr. 3 gibt es nicht."
        );
    }
}
