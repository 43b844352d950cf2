//! Selection state of the detail panel.
//!
//! # Invariants
//! - At most one initiative is selected; selecting replaces, never stacks.
//! - Selecting an id outside the loaded set is a no-op.
//! - Filter changes never touch the selection.

use crate::model::initiative::{Initiative, InitiativeId};
use crate::view::builder::InitiativeIndex;
use log::debug;
use serde::Serialize;

/// Which initiative the detail panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(InitiativeId),
}

impl Selection {
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            Self::NoSelection => None,
            Self::Selected(id) => Some(id.as_str()),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id() == Some(id)
    }

    /// Moves to `Selected(id)` when `id` is in the set.
    ///
    /// Returns `false` (state unchanged) for unknown ids. Re-selecting the
    /// current initiative is accepted and changes nothing.
    pub fn select(&mut self, id: &str, index: &InitiativeIndex<'_>) -> bool {
        if !index.contains(id) {
            debug!("event=select module=selection status=ignored reason=unknown_id id={id}");
            return false;
        }
        if !self.is_selected(id) {
            *self = Self::Selected(id.to_string());
        }
        true
    }

    /// Drops the selection when its id left the set (after a reload).
    pub fn retain_in(&mut self, index: &InitiativeIndex<'_>) {
        if let Some(id) = self.selected_id() {
            if !index.contains(id) {
                debug!("event=select module=selection status=reset reason=missing_after_reload id={id}");
                *self = Self::NoSelection;
            }
        }
    }
}

/// Highlight state of one card in the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    Selected,
    /// Linked to the selected initiative in either direction.
    Connected,
    Idle,
}

/// Computes the highlight for `card` given the current selection.
pub fn card_state(selected: Option<&Initiative>, card: &Initiative) -> CardState {
    match selected {
        Some(selected) if selected.id == card.id => CardState::Selected,
        Some(selected) if selected.connects_to(&card.id) || card.connects_to(&selected.id) => {
            CardState::Connected
        }
        _ => CardState::Idle,
    }
}
