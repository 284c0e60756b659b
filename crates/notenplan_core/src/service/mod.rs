//! Gradebook use-case service.
//!
//! # Responsibility
//! - Own the single in-process gradebook and its repository.
//! - Run every mutation as validate → mutate → persist.
//!
//! # See also
//! - `crate::render` for the view rebuilt after each mutation.

pub mod gradebook_service;
