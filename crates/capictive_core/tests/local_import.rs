use capictive_core::db::open_db_in_memory;
use capictive_core::{
    fallback_initiatives, import_records, parse_rows_json, seed_fallback, ImportSummary,
    InitiativeRepository, RepoError, SqliteInitiativeRepository,
};
use rusqlite::Connection;

const SAVED_ROWS: &str = r#"[
  {
    "id": "b",
    "title": "Telemedicina Rural",
    "status": "pending",
    "progress": 10,
    "category": "Salud",
    "deadline": "2026-12-01",
    "initiative_connections": [
      { "connected_initiative_id": "a", "relationship_type": "depends_on" },
      { "connected_initiative_id": "ghost", "relationship_type": null }
    ]
  },
  {
    "id": "a",
    "title": "Sistema de Salud Digital",
    "status": "delayed",
    "progress": 25,
    "category": "Salud",
    "initiative_connections": []
  }
]"#;

#[test]
fn import_keeps_order_connections_and_labels() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);
    let records = parse_rows_json(SAVED_ROWS).unwrap();

    let summary = import_records(&repo, &records).unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            inserted: 2,
            skipped: 0
        }
    );

    let listed = repo.list_initiatives().unwrap();
    let expected: Vec<_> = records.into_iter().map(|record| record.initiative).collect();
    assert_eq!(listed, expected);

    assert_eq!(relationship_of(&conn, "b", "a").as_deref(), Some("depends_on"));
    assert_eq!(relationship_of(&conn, "b", "ghost"), None);
}

#[test]
fn reimport_skips_stored_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);
    let records = parse_rows_json(SAVED_ROWS).unwrap();

    import_records(&repo, &records).unwrap();
    let again = import_records(&repo, &records).unwrap();

    assert_eq!(again.inserted, 0);
    assert_eq!(again.skipped, 2);
    assert_eq!(repo.list_initiatives().unwrap().len(), 2);
}

#[test]
fn duplicate_ids_are_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);
    let body = r#"[
      {"id":"1","title":"A","status":"pending","progress":0,"category":"X"},
      {"id":"1","title":"B","status":"pending","progress":0,"category":"X"}
    ]"#;
    let records = parse_rows_json(body).unwrap();

    let err = import_records(&repo, &records).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_initiatives().unwrap().is_empty());
}

#[test]
fn seeded_store_lists_the_demonstration_plan() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    let summary = seed_fallback(&repo).unwrap();
    assert_eq!(summary.inserted, 7);
    assert_eq!(repo.list_initiatives().unwrap(), fallback_initiatives());
}

fn relationship_of(conn: &Connection, source: &str, target: &str) -> Option<String> {
    conn.query_row(
        "SELECT relationship_type FROM initiative_connections
         WHERE initiative_id = ?1 AND connected_initiative_id = ?2;",
        [source, target],
        |row| row.get(0),
    )
    .unwrap()
}
