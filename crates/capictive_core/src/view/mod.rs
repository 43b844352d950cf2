//! Display-side shaping of a loaded initiative set.
//!
//! # Responsibility
//! - Build the view model (categories, stats, resolved connections).
//! - Track the transient selection of one view instance.
//! - Produce display labels.
//!
//! # Invariants
//! - Builders are pure functions of their input; no I/O happens here.
//! - Filtering never alters selection; only a data reload can clear it.

pub mod builder;
pub mod labels;
pub mod plan_view;
pub mod selection;
