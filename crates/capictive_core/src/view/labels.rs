//! Display labels for dashboard cards and the detail panel.

use chrono::{Datelike, NaiveDate};

const MONTHS_ES: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Message shown when the filter hides every initiative.
pub const EMPTY_RESULTS_MESSAGE: &str =
    "No se encontraron iniciativas que coincidan con tu búsqueda";

/// Message shown in the detail panel while nothing is selected.
pub const NO_SELECTION_MESSAGE: &str = "Selecciona una iniciativa para ver más detalles";

/// Formats a deadline as `<Mon> <YYYY>`, e.g. `Dic 2025`.
pub fn deadline_label(date: NaiveDate) -> String {
    format!("{} {}", MONTHS_ES[date.month0() as usize], date.year())
}

/// `1 conexión`, `N conexiones`, or `None` without connections.
pub fn connection_count_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 conexión".to_string()),
        n => Some(format!("{n} conexiones")),
    }
}

/// `N iniciativas` badge for a category section.
pub fn category_count_label(count: usize) -> String {
    format!("{count} iniciativas")
}
