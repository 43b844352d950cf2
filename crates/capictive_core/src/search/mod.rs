//! Search and filter predicates over a loaded initiative set.
//!
//! # Responsibility
//! - Decide per initiative whether it is visible in the list view.
//!
//! # See also
//! - `view::plan_view` for where the active filter lives.

pub mod filter;
