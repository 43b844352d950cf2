//! Initiative stores.
//!
//! # Responsibility
//! - Define the read contract the loader depends on.
//! - Provide the hosted (REST) store and a local SQLite store.
//!
//! # Invariants
//! - Every store maps rows into validated `Initiative` values before
//!   returning; callers never see raw rows.
//! - Store errors are semantic (`InvalidData`, `Config`) as well as
//!   transport-level (`Db`, `Remote`).

pub mod initiative_repo;
pub mod rest_repo;
