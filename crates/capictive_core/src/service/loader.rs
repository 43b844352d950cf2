//! Initiative record loader with graceful degradation.
//!
//! # Responsibility
//! - Fetch the full initiative set once per view activation.
//! - Turn any fetch failure into the built-in demonstration plan.
//!
//! # Invariants
//! - `resolve` is the only place where the fallback decision is made.
//! - Load errors never reach the caller; they are logged as `warn`.
//! - A fetched set is validated as a whole (including id uniqueness)
//!   before it is accepted.

use crate::model::initiative::{validate_set, Initiative};
use crate::repo::initiative_repo::{InitiativeRepository, RepoError};
use crate::service::fallback::fallback_initiatives;
use log::{info, warn};
use serde::Serialize;
use std::time::Instant;

/// Tagged result of one fetch attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<Initiative>),
    Failed(RepoError),
}

/// Where the displayed set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Store,
    Fallback,
}

/// Displayable initiative set produced by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPlan {
    /// Newest-created first when `source == Store`.
    pub initiatives: Vec<Initiative>,
    pub source: LoadSource,
}

/// Performs a single fetch attempt. No retry.
pub fn fetch<R: InitiativeRepository + ?Sized>(repo: &R) -> LoadOutcome {
    let started_at = Instant::now();
    let result = repo.list_initiatives().and_then(|initiatives| {
        validate_set(&initiatives)?;
        Ok(initiatives)
    });

    match result {
        Ok(initiatives) => {
            info!(
                "event=plan_load module=loader status=ok count={} duration_ms={}",
                initiatives.len(),
                started_at.elapsed().as_millis()
            );
            LoadOutcome::Loaded(initiatives)
        }
        Err(err) => LoadOutcome::Failed(err),
    }
}

/// Decides what the view shows for a given fetch outcome.
pub fn resolve(outcome: LoadOutcome) -> LoadedPlan {
    match outcome {
        LoadOutcome::Loaded(initiatives) => LoadedPlan {
            initiatives,
            source: LoadSource::Store,
        },
        LoadOutcome::Failed(err) => {
            let initiatives = fallback_initiatives();
            warn!(
                "event=plan_load module=loader status=fallback count={} error={}",
                initiatives.len(),
                err
            );
            LoadedPlan {
                initiatives,
                source: LoadSource::Fallback,
            }
        }
    }
}

/// Fetch-or-fallback in one call.
pub fn load_initiatives<R: InitiativeRepository + ?Sized>(repo: &R) -> LoadedPlan {
    resolve(fetch(repo))
}
