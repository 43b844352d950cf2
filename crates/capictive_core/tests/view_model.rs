use capictive_core::view::labels::{
    category_count_label, connection_count_label, deadline_label,
};
use capictive_core::{
    build_view_model, category_sections, distinct_categories, fallback_initiatives,
    filter_initiatives, resolve_connections, Initiative, InitiativeFilter, InitiativeStatus,
    PlanStats, StatusFilter,
};
use chrono::NaiveDate;

#[test]
fn fallback_plan_stats_match_dashboard_counters() {
    let set = fallback_initiatives();
    let stats = PlanStats::from_initiatives(&set);

    assert_eq!(stats.total, 7);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.in_progress, 4);
    assert_eq!(stats.delayed, 1);
    assert_eq!(stats.pending, 1);
    // 365 / 7 = 52.14
    assert_eq!(stats.avg_progress, 52);
}

#[test]
fn status_counts_always_sum_to_total() {
    let set = fallback_initiatives();
    let stats = PlanStats::from_initiatives(&set);

    let sum: usize = InitiativeStatus::ALL
        .iter()
        .map(|status| stats.count_for(*status))
        .sum();
    assert_eq!(sum, stats.total);
}

#[test]
fn empty_set_has_zero_stats_and_no_categories() {
    let model = build_view_model(&[]);

    assert_eq!(model.stats, PlanStats::default());
    assert_eq!(model.stats.avg_progress, 0);
    assert!(model.categories.is_empty());
    assert!(model.initiatives.is_empty());
}

#[test]
fn average_rounds_half_up() {
    let mut a = Initiative::with_id("a", "A", "X");
    a.progress = 50;
    let mut b = Initiative::with_id("b", "B", "X");
    b.progress = 51;

    assert_eq!(PlanStats::from_initiatives(&[a, b]).avg_progress, 51);
}

#[test]
fn view_model_is_deterministic() {
    let set = fallback_initiatives();

    assert_eq!(build_view_model(&set), build_view_model(&set));
}

#[test]
fn categories_are_the_distinct_set_in_first_seen_order() {
    let set = fallback_initiatives();

    assert_eq!(
        distinct_categories(&set),
        vec!["Educación", "Salud", "Transporte"]
    );
}

#[test]
fn connections_resolve_in_declared_order() {
    let set = fallback_initiatives();
    let reforma = &set[0];

    let titles: Vec<&str> = resolve_connections(reforma, &set)
        .into_iter()
        .map(|initiative| initiative.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Infraestructura Escolar", "Capacitación Docente"]);
}

#[test]
fn dangling_connection_ids_are_dropped() {
    let mut a = Initiative::with_id("a", "A", "X");
    a.connections = vec!["ghost".to_string(), "b".to_string()];
    let b = Initiative::with_id("b", "B", "X");
    let set = vec![a, b];

    let model = build_view_model(&set);
    let related: Vec<&str> = model.initiatives[0]
        .related
        .iter()
        .map(|initiative| initiative.id.as_str())
        .collect();
    assert_eq!(related, vec!["b"]);
}

#[test]
fn search_matches_title_case_insensitively() {
    let set = fallback_initiatives();
    let filter = InitiativeFilter::new("escolar", StatusFilter::All);

    let titles: Vec<&str> = filter_initiatives(&set, &filter)
        .into_iter()
        .map(|initiative| initiative.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Infraestructura Escolar"]);
}

#[test]
fn trailing_space_in_search_is_part_of_the_query() {
    let set = fallback_initiatives();

    let exact = InitiativeFilter::new("escuelas", StatusFilter::All);
    let ids: Vec<&str> = filter_initiatives(&set, &exact)
        .into_iter()
        .map(|initiative| initiative.id.as_str())
        .collect();
    assert_eq!(ids, vec!["2"]);

    let trailing = InitiativeFilter::new("escuelas ", StatusFilter::All);
    assert!(filter_initiatives(&set, &trailing).is_empty());
}

#[test]
fn search_matches_description() {
    let set = fallback_initiatives();
    let filter = InitiativeFilter::new("ELÉCTRICOS", StatusFilter::All);

    let ids: Vec<&str> = filter_initiatives(&set, &filter)
        .into_iter()
        .map(|initiative| initiative.id.as_str())
        .collect();
    assert_eq!(ids, vec!["6"]);
}

#[test]
fn status_filter_keeps_only_that_status() {
    let set = fallback_initiatives();
    let filter = InitiativeFilter::new("", StatusFilter::Only(InitiativeStatus::Completed));

    let visible = filter_initiatives(&set, &filter);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Capacitación Docente");
    assert_eq!(visible[0].progress, 100);
}

#[test]
fn search_and_status_combine() {
    let set = fallback_initiatives();
    let filter = InitiativeFilter::new("a", StatusFilter::Only(InitiativeStatus::Delayed));

    let ids: Vec<&str> = filter_initiatives(&set, &filter)
        .into_iter()
        .map(|initiative| initiative.id.as_str())
        .collect();
    assert_eq!(ids, vec!["4"]);
}

#[test]
fn unrestricted_filter_returns_full_set_in_order() {
    let set = fallback_initiatives();
    let filter = InitiativeFilter::new("   ", StatusFilter::parse("bogus"));

    assert!(filter.is_unrestricted());
    let visible: Vec<Initiative> = filter_initiatives(&set, &filter)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(visible, set);
}

#[test]
fn filtering_is_idempotent() {
    let set = fallback_initiatives();
    let filter = InitiativeFilter::new("ci", StatusFilter::Only(InitiativeStatus::InProgress));

    let once: Vec<Initiative> = filter_initiatives(&set, &filter)
        .into_iter()
        .cloned()
        .collect();
    let twice: Vec<Initiative> = filter_initiatives(&once, &filter)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(once, twice);
}

#[test]
fn sections_skip_categories_without_visible_initiatives() {
    let set = fallback_initiatives();
    let categories = distinct_categories(&set);
    let filter = InitiativeFilter::new("salud", StatusFilter::All);
    let visible = filter_initiatives(&set, &filter);

    let sections = category_sections(&categories, &visible);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].category, "Salud");
    assert_eq!(sections[0].initiatives[0].title, "Sistema de Salud Digital");
}

#[test]
fn labels_render_spanish_copy() {
    assert_eq!(
        deadline_label(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()),
        "Dic 2025"
    );
    assert_eq!(connection_count_label(0), None);
    assert_eq!(connection_count_label(1).as_deref(), Some("1 conexión"));
    assert_eq!(connection_count_label(2).as_deref(), Some("2 conexiones"));
    assert_eq!(category_count_label(3), "3 iniciativas");
}
