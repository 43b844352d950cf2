//! Initiative domain model.
//!
//! # Responsibility
//! - Define the canonical record for a tracked government commitment.
//! - Own the status vocabulary shared by storage, filtering and display.
//!
//! # Invariants
//! - `progress` is a percentage in `0..=100`.
//! - `id` and `title` are never blank.
//! - Identifiers are unique within one loaded set.
//! - `connections` may reference ids outside the set; readers must tolerate it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifier of an initiative.
///
/// Kept as text: the hosted store hands out UUIDs or integers, and the
/// built-in demonstration set uses short numeric strings.
pub type InitiativeId = String;

/// Upper bound for `Initiative::progress`.
pub const MAX_PROGRESS: u8 = 100;

/// Lifecycle state of an initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitiativeStatus {
    Completed,
    InProgress,
    Delayed,
    Pending,
}

impl InitiativeStatus {
    /// All statuses in display order.
    pub const ALL: [InitiativeStatus; 4] = [
        InitiativeStatus::Completed,
        InitiativeStatus::InProgress,
        InitiativeStatus::Delayed,
        InitiativeStatus::Pending,
    ];

    /// Wire value used by the stores (`completed`, `in-progress`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::Delayed => "delayed",
            Self::Pending => "pending",
        }
    }

    /// Human-facing label shown on cards and in the detail panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completado",
            Self::InProgress => "En Progreso",
            Self::Delayed => "Retrasado",
            Self::Pending => "Pendiente",
        }
    }
}

impl Display for InitiativeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitiativeStatus {
    type Err = InitiativeValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "completed" => Ok(Self::Completed),
            "in-progress" => Ok(Self::InProgress),
            "delayed" => Ok(Self::Delayed),
            "pending" => Ok(Self::Pending),
            other => Err(InitiativeValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Validation failures for a single initiative or a loaded set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitiativeValidationError {
    EmptyId,
    EmptyTitle(InitiativeId),
    ProgressOutOfRange { id: InitiativeId, progress: i64 },
    UnknownStatus(String),
    DuplicateId(InitiativeId),
}

impl Display for InitiativeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "initiative id cannot be blank"),
            Self::EmptyTitle(id) => write!(f, "initiative `{id}` has a blank title"),
            Self::ProgressOutOfRange { id, progress } => write!(
                f,
                "initiative `{id}` progress {progress} is outside 0..={MAX_PROGRESS}"
            ),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown initiative status `{value}`; expected completed|in-progress|delayed|pending"
            ),
            Self::DuplicateId(id) => write!(f, "initiative id `{id}` appears more than once"),
        }
    }
}

impl Error for InitiativeValidationError {}

/// A tracked government commitment with its completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: InitiativeId,
    pub title: String,
    pub description: String,
    pub status: InitiativeStatus,
    /// Completion percentage, `0..=100`.
    pub progress: u8,
    /// Free-text grouping label, e.g. `Salud`.
    pub category: String,
    pub deadline: Option<NaiveDate>,
    /// Ordered ids of related initiatives. Not necessarily symmetric.
    pub connections: Vec<InitiativeId>,
}

impl Initiative {
    /// Creates a pending initiative with a caller-provided id.
    ///
    /// Used by import paths and the demonstration set, where identity
    /// already exists. Does not validate.
    pub fn with_id(
        id: impl Into<InitiativeId>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: InitiativeStatus::Pending,
            progress: 0,
            category: category.into(),
            deadline: None,
            connections: Vec::new(),
        }
    }

    /// Checks single-record invariants.
    pub fn validate(&self) -> Result<(), InitiativeValidationError> {
        if self.id.trim().is_empty() {
            return Err(InitiativeValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(InitiativeValidationError::EmptyTitle(self.id.clone()));
        }
        if self.progress > MAX_PROGRESS {
            return Err(InitiativeValidationError::ProgressOutOfRange {
                id: self.id.clone(),
                progress: i64::from(self.progress),
            });
        }
        Ok(())
    }

    /// Whether this initiative lists `id` among its connections.
    pub fn connects_to(&self, id: &str) -> bool {
        self.connections.iter().any(|target| target == id)
    }
}

/// Storage-side association between two initiatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub source: InitiativeId,
    pub target: InitiativeId,
    /// Optional free-text relationship label (e.g. `depends_on`).
    pub relationship: Option<String>,
}

/// An initiative together with its labelled outgoing connections.
///
/// `links` targets mirror `initiative.connections`, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiativeRecord {
    pub initiative: Initiative,
    pub links: Vec<Connection>,
}

impl InitiativeRecord {
    /// Wraps an initiative whose connections carry no relationship label.
    pub fn unlabelled(initiative: Initiative) -> Self {
        let links = initiative
            .connections
            .iter()
            .map(|target| Connection {
                source: initiative.id.clone(),
                target: target.clone(),
                relationship: None,
            })
            .collect();
        Self { initiative, links }
    }
}

/// Validates every record and checks id uniqueness across the set.
pub fn validate_set(initiatives: &[Initiative]) -> Result<(), InitiativeValidationError> {
    let mut seen = HashSet::with_capacity(initiatives.len());
    for initiative in initiatives {
        initiative.validate()?;
        if !seen.insert(initiative.id.as_str()) {
            return Err(InitiativeValidationError::DuplicateId(initiative.id.clone()));
        }
    }
    Ok(())
}
