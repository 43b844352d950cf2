//! Text search and status filter for the initiative list.
//!
//! # Invariants
//! - Matching is per initiative; there is no ranking across initiatives.
//! - An empty (or whitespace-only) search text matches everything.
//! - Unrecognised status filter input means "all", never an error.
//! - Visible subsets keep the input order.

use crate::model::initiative::{Initiative, InitiativeStatus};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Status restriction applied on top of the text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InitiativeStatus),
}

impl StatusFilter {
    /// Parses `all` or a status wire value. Anything else means `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Self::All,
            other => other.parse().map(Self::Only).unwrap_or(Self::All),
        }
    }

    pub fn admits(self, status: InitiativeStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Active search text and status filter of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InitiativeFilter {
    search_text: String,
    status: StatusFilter,
}

impl InitiativeFilter {
    pub fn new(search_text: impl Into<String>, status: StatusFilter) -> Self {
        let mut filter = Self::default();
        filter.set_search_text(search_text);
        filter.status = status;
        filter
    }

    /// Replaces the search text, kept exactly as typed.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    /// Whether no restriction is active.
    pub fn is_unrestricted(&self) -> bool {
        !self.has_search_text() && self.status == StatusFilter::All
    }

    /// Case-insensitive substring match on title or description, combined
    /// with the status restriction.
    pub fn matches(&self, initiative: &Initiative) -> bool {
        self.status.admits(initiative.status) && self.matches_text(initiative)
    }

    // Whitespace-only input is no query; any other input matches as typed.
    fn has_search_text(&self) -> bool {
        !self.search_text.trim().is_empty()
    }

    fn matches_text(&self, initiative: &Initiative) -> bool {
        if !self.has_search_text() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        initiative.title.to_lowercase().contains(&needle)
            || initiative.description.to_lowercase().contains(&needle)
    }
}

/// Returns the visible subset in input order.
pub fn filter_initiatives<'a>(
    initiatives: &'a [Initiative],
    filter: &InitiativeFilter,
) -> Vec<&'a Initiative> {
    initiatives
        .iter()
        .filter(|initiative| filter.matches(initiative))
        .collect()
}
