//! Core logic for the Capictive government-plan tracker.
//!
//! Loads initiatives from the hosted store (or a local SQLite store),
//! degrades to a built-in plan when loading fails, and shapes the set into
//! the dashboard view model: categories, stats, filtered sections, and the
//! selection-driven detail panel.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::initiative::{
    validate_set, Initiative, InitiativeId, InitiativeRecord, InitiativeStatus,
    InitiativeValidationError,
};
pub use repo::initiative_repo::{
    InitiativeRepository, RepoError, RepoResult, SqliteInitiativeRepository,
};
pub use repo::rest_repo::{
    parse_rows_json, ConfigError, RemoteError, RestInitiativeRepository, StoreConfig,
};
pub use search::filter::{filter_initiatives, InitiativeFilter, StatusFilter};
pub use service::fallback::fallback_initiatives;
pub use service::import::{import_records, seed_fallback, ImportSummary};
pub use service::loader::{fetch, load_initiatives, resolve, LoadOutcome, LoadSource, LoadedPlan};
pub use view::builder::{
    build_view_model, category_sections, distinct_categories, resolve_connections,
    CategorySection, InitiativeIndex, PlanStats, PlanViewModel, ResolvedInitiative,
};
pub use view::plan_view::{DetailPanel, PlanView};
pub use view::selection::{card_state, CardState, Selection};
