//! Load-time services.
//!
//! # Responsibility
//! - Orchestrate store access into a displayable initiative set.
//! - Keep view code independent of which store (or the fallback) answered.
//! - Fill a local store from saved store responses or the built-in plan.

pub mod fallback;
pub mod import;
pub mod loader;
