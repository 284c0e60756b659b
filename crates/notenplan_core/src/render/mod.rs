//! Rendering of gradebook state.
//!
//! # Responsibility
//! - Derive a pure view model from the gradebook (`GradebookView`).
//! - Turn that model into terminal text or an HTML fragment.
//!
//! # Invariants
//! - Rendering never mutates state; callers rebuild the whole view after
//!   every mutation.
//! - Subject indexes in the view are the handles used to address
//!   add-note/delete-subject actions.

mod html;
mod text;
mod view;

pub use html::render_html;
pub use text::render_text;
pub use view::{AverageView, GradebookView, NoteView, SubjectView, NO_VALUE};
