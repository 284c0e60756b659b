use crate::model::gradebook::{Gradebook, Note, Subject};
use crate::stats::{Average, GradeBand};

/// Placeholder shown when there is nothing to average.
pub const NO_VALUE: &str = "–";

/// Display form of an optional average.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AverageView {
    /// Two-decimal text, or `NO_VALUE`.
    pub text: String,
    /// `None` when there is no average.
    pub band: Option<GradeBand>,
}

impl AverageView {
    fn from_average(average: Option<Average>) -> Self {
        match average {
            Some(average) => Self {
                text: average.to_string(),
                band: Some(average.band()),
            },
            None => Self {
                text: NO_VALUE.to_string(),
                band: None,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.band.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub label: String,
    /// Grade with two decimals.
    pub grade: String,
    pub band: GradeBand,
}

impl NoteView {
    fn from_note(note: &Note) -> Self {
        let grade = note.grade();
        Self {
            label: note.label().to_string(),
            grade: grade.to_string(),
            band: GradeBand::for_grade(grade.value()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectView {
    /// Zero-based position in the gradebook.
    pub index: usize,
    pub name: String,
    pub notes: Vec<NoteView>,
    pub average: AverageView,
}

impl SubjectView {
    fn from_subject(index: usize, subject: &Subject) -> Self {
        Self {
            index,
            name: subject.name().to_string(),
            notes: subject.notes().iter().map(NoteView::from_note).collect(),
            average: AverageView::from_average(subject.average()),
        }
    }
}

/// Full render model of the gradebook page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradebookView {
    pub subjects: Vec<SubjectView>,
    /// Mean over every note of every subject.
    pub overall_average: AverageView,
}

impl GradebookView {
    pub fn from_gradebook(gradebook: &Gradebook) -> Self {
        Self {
            subjects: gradebook
                .subjects()
                .iter()
                .enumerate()
                .map(|(index, subject)| SubjectView::from_subject(index, subject))
                .collect(),
            overall_average: AverageView::from_average(gradebook.overall_average()),
        }
    }
}
