//! Title search entry points.
//!
//! # Responsibility
//! - Decide between an exact-title redirect and a substring result list.
//! - Keep result shaping inside core, independent of storage.

pub mod resolver;
