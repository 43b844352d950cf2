//! Domain model for the government-plan tracker.
//!
//! # Responsibility
//! - Define the strongly-typed initiative shape every layer exchanges.
//! - Keep untyped store rows out of business logic.
//!
//! # Invariants
//! - Every initiative is identified by an `InitiativeId` unique within its set.
//! - Loaded sets are read-only for the lifetime of a view.

pub mod initiative;
