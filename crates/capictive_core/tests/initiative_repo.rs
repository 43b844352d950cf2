use capictive_core::db::open_db_in_memory;
use capictive_core::model::initiative::Connection as InitiativeConnection;
use capictive_core::{
    Initiative, InitiativeRepository, InitiativeStatus, RepoError, SqliteInitiativeRepository,
};
use chrono::NaiveDate;

#[test]
fn create_and_get_roundtrip_keeps_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    let mut initiative = Initiative::with_id("1", "Reforma Educativa", "Educación");
    initiative.description = "Implementación de nuevo currículo nacional".to_string();
    initiative.status = InitiativeStatus::InProgress;
    initiative.progress = 65;
    initiative.deadline = NaiveDate::from_ymd_opt(2025, 12, 1);
    initiative.connections = vec!["2".to_string(), "3".to_string()];

    let id = repo.create_initiative(&initiative).unwrap();
    let loaded = repo.get_initiative(&id).unwrap().unwrap();
    assert_eq!(loaded, initiative);
}

#[test]
fn get_missing_initiative_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    assert!(repo.get_initiative("nope").unwrap().is_none());
}

#[test]
fn list_returns_newest_created_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    repo.create_initiative(&Initiative::with_id("old", "Antigua", "X"))
        .unwrap();
    repo.create_initiative(&Initiative::with_id("new", "Nueva", "X"))
        .unwrap();

    let ids: Vec<String> = repo
        .list_initiatives()
        .unwrap()
        .into_iter()
        .map(|initiative| initiative.id)
        .collect();
    assert_eq!(ids, vec!["new".to_string(), "old".to_string()]);
}

#[test]
fn list_uses_created_at_before_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    repo.create_initiative(&Initiative::with_id("a", "A", "X"))
        .unwrap();
    repo.create_initiative(&Initiative::with_id("b", "B", "X"))
        .unwrap();
    conn.execute(
        "UPDATE government_initiatives SET created_at = created_at + 60000 WHERE id = 'a';",
        [],
    )
    .unwrap();

    let first = repo.list_initiatives().unwrap().remove(0);
    assert_eq!(first.id, "a");
}

#[test]
fn dangling_connections_are_stored_and_listed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    let mut initiative = Initiative::with_id("1", "Solo", "X");
    initiative.connections = vec!["ghost".to_string()];
    repo.create_initiative(&initiative).unwrap();

    let listed = repo.list_initiatives().unwrap();
    assert_eq!(listed[0].connections, vec!["ghost".to_string()]);
}

#[test]
fn add_connection_appends_after_existing_connections() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    let mut initiative = Initiative::with_id("1", "A", "X");
    initiative.connections = vec!["2".to_string()];
    repo.create_initiative(&initiative).unwrap();

    repo.add_connection(&InitiativeConnection {
        source: "1".to_string(),
        target: "3".to_string(),
        relationship: Some("depends_on".to_string()),
    })
    .unwrap();

    let loaded = repo.get_initiative("1").unwrap().unwrap();
    assert_eq!(loaded.connections, vec!["2".to_string(), "3".to_string()]);

    let relationship: Option<String> = conn
        .query_row(
            "SELECT relationship_type FROM initiative_connections
             WHERE initiative_id = '1' AND connected_initiative_id = '3';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(relationship.as_deref(), Some("depends_on"));
}

#[test]
fn add_connection_from_unknown_source_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    let err = repo
        .add_connection(&InitiativeConnection {
            source: "missing".to_string(),
            target: "1".to_string(),
            relationship: None,
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == "missing"));
}

#[test]
fn validation_failure_blocks_create() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    let mut invalid = Initiative::with_id("1", "   ", "X");
    invalid.progress = 10;
    let err = repo.create_initiative(&invalid).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_initiatives().unwrap().is_empty());
}

#[test]
fn duplicate_id_is_a_db_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    repo.create_initiative(&Initiative::with_id("1", "A", "X"))
        .unwrap();
    let err = repo
        .create_initiative(&Initiative::with_id("1", "B", "X"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn invalid_persisted_deadline_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInitiativeRepository::new(&conn);

    conn.execute(
        "INSERT INTO government_initiatives (id, title, status, progress, category, deadline)
         VALUES ('1', 'A', 'pending', 0, 'X', 'Dic 2025');",
        [],
    )
    .unwrap();

    let err = repo.list_initiatives().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("deadline")));
}
