//! Owned gradebook state with persist-after-mutate semantics.
//!
//! # Invariants
//! - In-memory state and stored state match after every call returns.
//!   A failed save rolls the in-memory mutation back.
//! - Rejected input never touches storage.
//! - Log events carry counts and error codes only, never names or labels.

use crate::model::gradebook::{Gradebook, GradebookError, Note, Subject};
use crate::render::GradebookView;
use crate::repo::gradebook_repo::{GradebookRepository, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for gradebook service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected by gradebook validation; shown to the user as an alert.
    Gradebook(GradebookError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Returns the validation error when the failure is user-facing.
    pub fn as_alert(&self) -> Option<&GradebookError> {
        match self {
            Self::Gradebook(err) => Some(err),
            Self::Repo(_) => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gradebook(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Gradebook(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<GradebookError> for ServiceError {
    fn from(value: GradebookError) -> Self {
        Self::Gradebook(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Gradebook service facade over a repository implementation.
pub struct GradebookService<R: GradebookRepository> {
    repo: R,
    gradebook: Gradebook,
}

impl<R: GradebookRepository> GradebookService<R> {
    /// Loads persisted state (or starts empty) and takes ownership of `repo`.
    pub fn load(repo: R) -> Result<Self, ServiceError> {
        let gradebook = repo.load_gradebook()?;
        info!(
            "event=gradebook_open module=service status=ok subjects={} notes={}",
            gradebook.len(),
            gradebook.note_count()
        );
        Ok(Self { repo, gradebook })
    }

    /// Read-only access to the current state.
    pub fn gradebook(&self) -> &Gradebook {
        &self.gradebook
    }

    /// Builds the render model for the current state.
    pub fn view(&self) -> GradebookView {
        GradebookView::from_gradebook(&self.gradebook)
    }

    /// Adds an empty subject and persists.
    pub fn add_subject(&mut self, name: &str) -> Result<&Subject, ServiceError> {
        let index = self.commit("subject_add", |book| book.add_subject(name))?;
        Ok(&self.gradebook.subjects()[index])
    }

    /// Appends a note to the subject at zero-based `index` and persists.
    pub fn add_note(
        &mut self,
        index: usize,
        label: &str,
        grade: f64,
    ) -> Result<&Note, ServiceError> {
        let note_index = self.commit("note_add", |book| book.add_note(index, label, grade))?;
        Ok(&self.gradebook.subjects()[index].notes()[note_index])
    }

    /// Deletes the subject at `index` once `confirm` agrees.
    ///
    /// Returns `Ok(None)` when the confirmation is declined; nothing is
    /// changed or persisted in that case.
    pub fn delete_subject(
        &mut self,
        index: usize,
        confirm: impl FnOnce(&Subject) -> bool,
    ) -> Result<Option<Subject>, ServiceError> {
        let subject = self
            .gradebook
            .subject(index)
            .ok_or(GradebookError::SubjectNotFound(index))?;
        if !confirm(subject) {
            info!("event=subject_delete module=service status=cancelled");
            return Ok(None);
        }
        self.commit("subject_delete", |book| book.delete_subject(index))
            .map(Some)
    }

    fn commit<T>(
        &mut self,
        event: &'static str,
        mutate: impl FnOnce(&mut Gradebook) -> Result<T, GradebookError>,
    ) -> Result<T, ServiceError> {
        let snapshot = self.gradebook.clone();
        let value = match mutate(&mut self.gradebook) {
            Ok(value) => value,
            Err(err) => {
                info!(
                    "event={event} module=service status=rejected error_code={}",
                    err.code()
                );
                return Err(err.into());
            }
        };

        if let Err(err) = self.repo.save_gradebook(&self.gradebook) {
            self.gradebook = snapshot;
            error!("event={event} module=service status=error error_code=save_failed error={err}");
            return Err(err.into());
        }

        info!(
            "event={event} module=service status=ok subjects={} notes={}",
            self.gradebook.len(),
            self.gradebook.note_count()
        );
        Ok(value)
    }
}
