//! Per-view state of the government-plan dashboard.
//!
//! # Responsibility
//! - Own the loaded set, the active filter and the selection of one view.
//! - Expose read-only projections (visible list, sections, detail panel).
//!
//! # Invariants
//! - The loaded set is never mutated in place; a reload swaps it whole.
//! - A fresh view starts with no selection.
//! - The detail panel ignores the filter: a selected initiative stays
//!   shown even when the list hides it.
//! - A reload keeps the selection only if its id is still in the new set.

use crate::model::initiative::Initiative;
use crate::repo::initiative_repo::InitiativeRepository;
use crate::search::filter::{filter_initiatives, InitiativeFilter, StatusFilter};
use crate::service::loader::{load_initiatives, LoadSource, LoadedPlan};
use crate::view::builder::{
    build_view_model, category_sections, distinct_categories, CategorySection, InitiativeIndex,
    PlanViewModel,
};
use crate::view::selection::{card_state, CardState, Selection};
use serde::Serialize;

/// Contents of the detail panel for the selected initiative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel<'a> {
    pub initiative: &'a Initiative,
    /// Connections present in the loaded set, in declared order.
    pub related: Vec<&'a Initiative>,
}

/// State object owned by one dashboard view instance.
#[derive(Debug, Clone)]
pub struct PlanView {
    initiatives: Vec<Initiative>,
    source: LoadSource,
    filter: InitiativeFilter,
    selection: Selection,
}

impl PlanView {
    /// Activates a view from an already loaded plan.
    pub fn new(plan: LoadedPlan) -> Self {
        Self {
            initiatives: plan.initiatives,
            source: plan.source,
            filter: InitiativeFilter::default(),
            selection: Selection::NoSelection,
        }
    }

    /// Activates a view by loading from `repo` (fetch-or-fallback).
    pub fn load<R: InitiativeRepository + ?Sized>(repo: &R) -> Self {
        Self::new(load_initiatives(repo))
    }

    /// Re-runs the fetch-or-fallback sequence and swaps the set.
    pub fn reload<R: InitiativeRepository + ?Sized>(&mut self, repo: &R) {
        self.replace_plan(load_initiatives(repo));
    }

    /// Swaps in a new set; the filter is kept.
    pub fn replace_plan(&mut self, plan: LoadedPlan) {
        self.initiatives = plan.initiatives;
        self.source = plan.source;
        let index = InitiativeIndex::new(&self.initiatives);
        self.selection.retain_in(&index);
    }

    pub fn initiatives(&self) -> &[Initiative] {
        &self.initiatives
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn filter(&self) -> &InitiativeFilter {
        &self.filter
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.set_search_text(text);
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.set_status(status);
    }

    /// Selects `id`; unknown ids are ignored and return `false`.
    pub fn select(&mut self, id: &str) -> bool {
        let index = InitiativeIndex::new(&self.initiatives);
        self.selection.select(id, &index)
    }

    /// Initiatives passing the active filter, in load order.
    pub fn visible(&self) -> Vec<&Initiative> {
        filter_initiatives(&self.initiatives, &self.filter)
    }

    /// View model over the full set; the filter does not affect stats.
    pub fn view_model(&self) -> PlanViewModel<'_> {
        build_view_model(&self.initiatives)
    }

    /// Visible initiatives grouped by category.
    pub fn sections(&self) -> Vec<CategorySection<'_>> {
        let categories = distinct_categories(&self.initiatives);
        category_sections(&categories, &self.visible())
    }

    pub fn selected(&self) -> Option<&Initiative> {
        let id = self.selection.selected_id()?;
        self.initiatives.iter().find(|initiative| initiative.id == id)
    }

    /// Detail panel content, independent of the active filter.
    pub fn detail(&self) -> Option<DetailPanel<'_>> {
        let initiative = self.selected()?;
        Some(DetailPanel {
            initiative,
            related: InitiativeIndex::new(&self.initiatives).related(initiative),
        })
    }

    pub fn card_state(&self, card: &Initiative) -> CardState {
        card_state(self.selected(), card)
    }
}
