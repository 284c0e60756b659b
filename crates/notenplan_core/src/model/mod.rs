//! Gradebook domain model.
//!
//! # Responsibility
//! - Define the subject → note tree held in memory and persisted as JSON.
//! - Enforce naming and grade-range invariants at mutation time.
//!
//! # Invariants
//! - Subject names are unique, compared case-insensitively.
//! - Every stored grade lies within `[MIN_GRADE, MAX_GRADE]`.
//! - Subjects and notes keep insertion order.

pub mod gradebook;
