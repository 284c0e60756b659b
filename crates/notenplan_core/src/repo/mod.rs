//! Persistence for the gradebook document.
//!
//! # Responsibility
//! - Define the load/save contract used by the gradebook service.
//! - Keep SQL and JSON encoding details out of the service layer.
//!
//! # Invariants
//! - Loads reject documents that break gradebook invariants instead of
//!   repairing them.

pub mod gradebook_repo;
