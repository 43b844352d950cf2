//! Built-in demonstration plan shown when the store cannot be read.
//!
//! Seven initiatives across three categories (Educación, Salud,
//! Transporte), listed in display order.

use crate::model::initiative::{Initiative, InitiativeStatus};
use chrono::NaiveDate;

struct Seed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    status: InitiativeStatus,
    progress: u8,
    category: &'static str,
    connections: &'static [&'static str],
    deadline: (i32, u32),
}

const SEEDS: [Seed; 7] = [
    Seed {
        id: "1",
        title: "Reforma Educativa",
        description: "Implementación de nuevo currículo nacional",
        status: InitiativeStatus::InProgress,
        progress: 65,
        category: "Educación",
        connections: &["2", "3"],
        deadline: (2025, 12),
    },
    Seed {
        id: "2",
        title: "Infraestructura Escolar",
        description: "Construcción de 50 nuevas escuelas",
        status: InitiativeStatus::InProgress,
        progress: 40,
        category: "Educación",
        connections: &["1"],
        deadline: (2026, 6),
    },
    Seed {
        id: "3",
        title: "Capacitación Docente",
        description: "Programa de formación continua para profesores",
        status: InitiativeStatus::Completed,
        progress: 100,
        category: "Educación",
        connections: &["1"],
        deadline: (2025, 3),
    },
    Seed {
        id: "4",
        title: "Sistema de Salud Digital",
        description: "Digitalización de historias clínicas",
        status: InitiativeStatus::Delayed,
        progress: 25,
        category: "Salud",
        connections: &["5"],
        deadline: (2025, 9),
    },
    Seed {
        id: "5",
        title: "Telemedicina Rural",
        description: "Acceso a consultas médicas remotas en zonas rurales",
        status: InitiativeStatus::Pending,
        progress: 10,
        category: "Salud",
        connections: &["4"],
        deadline: (2026, 12),
    },
    Seed {
        id: "6",
        title: "Transporte Público Sostenible",
        description: "Renovación de flota con vehículos eléctricos",
        status: InitiativeStatus::InProgress,
        progress: 55,
        category: "Transporte",
        connections: &["7"],
        deadline: (2025, 8),
    },
    Seed {
        id: "7",
        title: "Ciclovías Urbanas",
        description: "Red de 200km de ciclovías en ciudades principales",
        status: InitiativeStatus::InProgress,
        progress: 70,
        category: "Transporte",
        connections: &["6"],
        deadline: (2025, 11),
    },
];

/// Returns a fresh copy of the demonstration plan.
pub fn fallback_initiatives() -> Vec<Initiative> {
    SEEDS.iter().map(Seed::to_initiative).collect()
}

impl Seed {
    fn to_initiative(&self) -> Initiative {
        let (year, month) = self.deadline;
        Initiative {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            status: self.status,
            progress: self.progress,
            category: self.category.to_string(),
            // Deadlines are month-granular; pin them to the first day.
            deadline: NaiveDate::from_ymd_opt(year, month, 1),
            connections: self.connections.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fallback_initiatives;
    use crate::model::initiative::validate_set;

    #[test]
    fn fallback_set_is_valid_and_complete() {
        let plan = fallback_initiatives();
        assert_eq!(plan.len(), 7);
        assert!(validate_set(&plan).is_ok());
        assert!(plan.iter().all(|initiative| initiative.deadline.is_some()));
    }
}
