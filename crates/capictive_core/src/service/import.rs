//! Bulk import into the local SQLite store.
//!
//! # Responsibility
//! - Copy store records (saved query responses or the demonstration plan)
//!   into a local store, keeping relationship labels.
//!
//! # Invariants
//! - The batch is validated as a set before any write.
//! - Ids already stored are skipped, so re-running an import is safe.
//! - Records are written oldest first so the newest-first listing keeps the
//!   batch order.

use crate::model::initiative::{validate_set, Initiative, InitiativeRecord};
use crate::repo::initiative_repo::{RepoResult, SqliteInitiativeRepository};
use crate::service::fallback::fallback_initiatives;
use log::info;
use serde::Serialize;

/// Counters reported after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Writes `records` (newest first, as the store lists them) into `repo`.
///
/// A failure midway leaves earlier records stored; re-running resumes.
pub fn import_records(
    repo: &SqliteInitiativeRepository<'_>,
    records: &[InitiativeRecord],
) -> RepoResult<ImportSummary> {
    let initiatives: Vec<Initiative> = records
        .iter()
        .map(|record| record.initiative.clone())
        .collect();
    validate_set(&initiatives)?;

    let mut summary = ImportSummary::default();
    for record in records.iter().rev() {
        if repo.get_initiative(&record.initiative.id)?.is_some() {
            summary.skipped += 1;
            continue;
        }

        let bare = Initiative {
            connections: Vec::new(),
            ..record.initiative.clone()
        };
        repo.create_initiative(&bare)?;
        for link in &record.links {
            repo.add_connection(link)?;
        }
        summary.inserted += 1;
    }

    info!(
        "event=import module=import status=ok inserted={} skipped={}",
        summary.inserted, summary.skipped
    );
    Ok(summary)
}

/// Imports the built-in demonstration plan.
pub fn seed_fallback(repo: &SqliteInitiativeRepository<'_>) -> RepoResult<ImportSummary> {
    let records: Vec<InitiativeRecord> = fallback_initiatives()
        .into_iter()
        .map(InitiativeRecord::unlabelled)
        .collect();
    import_records(repo, &records)
}
