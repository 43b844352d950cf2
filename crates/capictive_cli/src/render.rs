//! Text and JSON renderings of a plan view.

use capictive_core::view::labels::{
    category_count_label, connection_count_label, deadline_label, EMPTY_RESULTS_MESSAGE,
    NO_SELECTION_MESSAGE,
};
use capictive_core::{
    CardState, DetailPanel, Initiative, InitiativeFilter, LoadSource, PlanStats, PlanView,
    Selection,
};
use serde::Serialize;
use std::io::{self, Write};

/// JSON shape printed by `capictive plan --json`.
#[derive(Serialize)]
pub struct PlanReport<'a> {
    source: LoadSource,
    filter: &'a InitiativeFilter,
    stats: PlanStats,
    categories: Vec<&'a str>,
    sections: Vec<SectionReport<'a>>,
    selection: &'a Selection,
    detail: Option<DetailPanel<'a>>,
}

#[derive(Serialize)]
struct SectionReport<'a> {
    category: &'a str,
    initiatives: Vec<CardReport<'a>>,
}

#[derive(Serialize)]
struct CardReport<'a> {
    #[serde(flatten)]
    initiative: &'a Initiative,
    state: CardState,
}

impl<'a> PlanReport<'a> {
    pub fn new(view: &'a PlanView) -> Self {
        let model = view.view_model();
        Self {
            source: view.source(),
            filter: view.filter(),
            stats: model.stats,
            categories: model.categories,
            sections: view
                .sections()
                .into_iter()
                .map(|section| SectionReport {
                    category: section.category,
                    initiatives: section
                        .initiatives
                        .into_iter()
                        .map(|initiative| CardReport {
                            initiative,
                            state: view.card_state(initiative),
                        })
                        .collect(),
                })
                .collect(),
            selection: view.selection(),
            detail: view.detail(),
        }
    }
}

/// Writes the dashboard as plain text.
pub fn write_text<W: Write>(view: &PlanView, out: &mut W) -> io::Result<()> {
    let stats = view.view_model().stats;

    writeln!(out, "Plan de Gobierno")?;
    if view.source() == LoadSource::Fallback {
        writeln!(out, "(datos de demostración)")?;
    }
    writeln!(
        out,
        "Total: {} | Completado: {} | En Progreso: {} | Retrasado: {} | Pendiente: {} | Progreso promedio: {}%",
        stats.total, stats.completed, stats.in_progress, stats.delayed, stats.pending, stats.avg_progress
    )?;

    let sections = view.sections();
    if sections.is_empty() {
        writeln!(out)?;
        writeln!(out, "{EMPTY_RESULTS_MESSAGE}")?;
    }
    for section in &sections {
        writeln!(out)?;
        writeln!(
            out,
            "{} ({})",
            section.category,
            category_count_label(section.initiatives.len())
        )?;
        for initiative in &section.initiatives {
            write_card(out, initiative, view.card_state(initiative))?;
        }
    }

    writeln!(out)?;
    match view.detail() {
        Some(detail) => write_detail(out, &detail),
        None => writeln!(out, "{NO_SELECTION_MESSAGE}"),
    }
}

fn write_card<W: Write>(out: &mut W, initiative: &Initiative, state: CardState) -> io::Result<()> {
    let marker = match state {
        CardState::Selected => '>',
        CardState::Connected => '~',
        CardState::Idle => ' ',
    };
    write!(
        out,
        "{marker} [{}] {} | {} {}%",
        initiative.id,
        initiative.title,
        initiative.status.label(),
        initiative.progress
    )?;
    if let Some(deadline) = initiative.deadline {
        write!(out, " | {}", deadline_label(deadline))?;
    }
    if let Some(label) = connection_count_label(initiative.connections.len()) {
        write!(out, " | {label}")?;
    }
    writeln!(out)
}

fn write_detail<W: Write>(out: &mut W, detail: &DetailPanel<'_>) -> io::Result<()> {
    let initiative = detail.initiative;
    writeln!(out, "{}", initiative.title)?;
    if !initiative.description.is_empty() {
        writeln!(out, "  {}", initiative.description)?;
    }
    writeln!(out, "  Estado: {}", initiative.status.label())?;
    writeln!(out, "  Progreso: {}%", initiative.progress)?;
    writeln!(out, "  Categoría: {}", initiative.category)?;
    if let Some(deadline) = initiative.deadline {
        writeln!(out, "  Fecha límite: {}", deadline_label(deadline))?;
    }
    if !detail.related.is_empty() {
        writeln!(out, "  Iniciativas relacionadas:")?;
        for related in &detail.related {
            writeln!(
                out,
                "    - [{}] {} ({})",
                related.id,
                related.title,
                related.status.label()
            )?;
        }
    }
    Ok(())
}
