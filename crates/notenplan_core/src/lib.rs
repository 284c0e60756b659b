//! Core domain logic for Notenplan.
//! This crate is the single source of truth for gradebook invariants.

pub mod db;
pub mod input;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod stats;

pub use input::parse_grade_input;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::gradebook::{
    Grade, Gradebook, GradebookError, Note, Subject, MAX_GRADE, MIN_GRADE,
};
pub use render::{render_html, render_text, GradebookView, NO_VALUE};
pub use repo::gradebook_repo::{
    GradebookRepository, RepoError, RepoResult, SqliteGradebookRepository, STORAGE_KEY,
};
pub use service::gradebook_service::{GradebookService, ServiceError};
pub use stats::{average, Average, GradeBand};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
