//! View-model builder for the government-plan dashboard.
//!
//! # Responsibility
//! - Derive categories, aggregate counters and resolved connections from a
//!   loaded initiative set.
//! - Group a visible subset into category sections.
//!
//! # Invariants
//! - Output depends only on the input slice; same input, same view model.
//! - Categories keep first-seen order.
//! - Connection ids absent from the set are dropped, never reported.
//! - `avg_progress` is `0` for an empty set and always within `0..=100`.

use crate::model::initiative::{Initiative, InitiativeStatus};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Aggregate counters shown above the initiative list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlanStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub delayed: usize,
    pub pending: usize,
    /// Mean progress rounded half-up to the nearest integer.
    pub avg_progress: u8,
}

impl PlanStats {
    pub fn from_initiatives(initiatives: &[Initiative]) -> Self {
        let mut stats = Self {
            total: initiatives.len(),
            ..Self::default()
        };
        let mut progress_sum: u64 = 0;

        for initiative in initiatives {
            progress_sum += u64::from(initiative.progress);
            match initiative.status {
                InitiativeStatus::Completed => stats.completed += 1,
                InitiativeStatus::InProgress => stats.in_progress += 1,
                InitiativeStatus::Delayed => stats.delayed += 1,
                InitiativeStatus::Pending => stats.pending += 1,
            }
        }

        stats.avg_progress = rounded_mean(progress_sum, stats.total as u64);
        stats
    }

    pub fn count_for(&self, status: InitiativeStatus) -> usize {
        match status {
            InitiativeStatus::Completed => self.completed,
            InitiativeStatus::InProgress => self.in_progress,
            InitiativeStatus::Delayed => self.delayed,
            InitiativeStatus::Pending => self.pending,
        }
    }
}

fn rounded_mean(sum: u64, count: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    // Each term is <= 100, so the mean is too.
    u8::try_from((2 * sum + count) / (2 * count)).unwrap_or(u8::MAX)
}

/// An initiative with its connections resolved inside the loaded set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedInitiative<'a> {
    pub initiative: &'a Initiative,
    pub related: Vec<&'a Initiative>,
}

/// Display-ready shape of a loaded set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanViewModel<'a> {
    pub categories: Vec<&'a str>,
    pub stats: PlanStats,
    pub initiatives: Vec<ResolvedInitiative<'a>>,
}

/// Lookup from id to initiative over one loaded set.
#[derive(Debug, Clone)]
pub struct InitiativeIndex<'a> {
    by_id: HashMap<&'a str, &'a Initiative>,
}

impl<'a> InitiativeIndex<'a> {
    pub fn new(initiatives: &'a [Initiative]) -> Self {
        Self {
            by_id: initiatives
                .iter()
                .map(|initiative| (initiative.id.as_str(), initiative))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a Initiative> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Connections of `initiative` present in the set, in declared order.
    pub fn related(&self, initiative: &Initiative) -> Vec<&'a Initiative> {
        initiative
            .connections
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }
}

/// Builds the full view model. Pure; performs no I/O.
pub fn build_view_model(initiatives: &[Initiative]) -> PlanViewModel<'_> {
    let index = InitiativeIndex::new(initiatives);
    PlanViewModel {
        categories: distinct_categories(initiatives),
        stats: PlanStats::from_initiatives(initiatives),
        initiatives: initiatives
            .iter()
            .map(|initiative| ResolvedInitiative {
                initiative,
                related: index.related(initiative),
            })
            .collect(),
    }
}

/// Distinct category labels in first-seen order.
pub fn distinct_categories(initiatives: &[Initiative]) -> Vec<&str> {
    let mut seen = HashSet::new();
    initiatives
        .iter()
        .map(|initiative| initiative.category.as_str())
        .filter(|category| seen.insert(*category))
        .collect()
}

/// Resolves one initiative's connections against a set.
pub fn resolve_connections<'a>(
    initiative: &Initiative,
    initiatives: &'a [Initiative],
) -> Vec<&'a Initiative> {
    InitiativeIndex::new(initiatives).related(initiative)
}

/// A category heading with the visible initiatives filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySection<'a> {
    pub category: &'a str,
    pub initiatives: Vec<&'a Initiative>,
}

/// Groups visible initiatives under the given categories.
///
/// Sections follow `categories` order; categories without any visible
/// initiative are omitted.
pub fn category_sections<'a>(
    categories: &[&'a str],
    visible: &[&'a Initiative],
) -> Vec<CategorySection<'a>> {
    categories
        .iter()
        .filter_map(|&category| {
            let initiatives: Vec<&'a Initiative> = visible
                .iter()
                .copied()
                .filter(|initiative| initiative.category == category)
                .collect();
            (!initiatives.is_empty()).then_some(CategorySection {
                category,
                initiatives,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{distinct_categories, rounded_mean};
    use crate::model::initiative::Initiative;

    #[test]
    fn rounded_mean_rounds_half_up() {
        assert_eq!(rounded_mean(0, 0), 0);
        assert_eq!(rounded_mean(5, 2), 3);
        assert_eq!(rounded_mean(4, 3), 1);
        assert_eq!(rounded_mean(300, 3), 100);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let set = vec![
            Initiative::with_id("1", "A", "Salud"),
            Initiative::with_id("2", "B", "Educación"),
            Initiative::with_id("3", "C", "Salud"),
        ];
        assert_eq!(distinct_categories(&set), vec!["Salud", "Educación"]);
    }
}
