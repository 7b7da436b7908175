//! Domain model for encyclopedia entries and static sections.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep title rules in one place for every storage backend.
//!
//! # Invariants
//! - Every entry is identified by its title, compared case-insensitively.
//! - Entries are never deleted by core APIs.

pub mod entry;
pub mod section;
