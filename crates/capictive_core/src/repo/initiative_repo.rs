//! Initiative repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the read contract every initiative store satisfies.
//! - Keep SQL details for the local store inside this module.
//!
//! # Invariants
//! - Listings are ordered newest-created first.
//! - Each initiative's connections keep their stored order.
//! - Write paths call `Initiative::validate()` before touching SQL.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::initiative::{
    Connection as InitiativeConnection, Initiative, InitiativeId, InitiativeStatus,
    InitiativeValidationError, MAX_PROGRESS,
};
use crate::repo::rest_repo::{ConfigError, RemoteError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const INITIATIVE_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    progress,
    category,
    deadline
FROM government_initiatives";

const DEADLINE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error raised by any initiative store.
#[derive(Debug)]
pub enum RepoError {
    Validation(InitiativeValidationError),
    Db(DbError),
    Remote(RemoteError),
    Config(ConfigError),
    NotFound(InitiativeId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Remote(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "initiative not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid initiative data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Remote(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<InitiativeValidationError> for RepoError {
    fn from(value: InitiativeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RemoteError> for RepoError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

impl From<ConfigError> for RepoError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Read contract shared by the hosted and local stores.
pub trait InitiativeRepository {
    /// Returns every initiative with its connection ids, newest-created first.
    fn list_initiatives(&self) -> RepoResult<Vec<Initiative>>;
}

impl<R: InitiativeRepository + ?Sized> InitiativeRepository for &R {
    fn list_initiatives(&self) -> RepoResult<Vec<Initiative>> {
        (**self).list_initiatives()
    }
}

impl<R: InitiativeRepository + ?Sized> InitiativeRepository for Box<R> {
    fn list_initiatives(&self) -> RepoResult<Vec<Initiative>> {
        (**self).list_initiatives()
    }
}

/// SQLite-backed initiative store.
pub struct SqliteInitiativeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInitiativeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts one initiative and its ordered connections atomically.
    ///
    /// Connection targets are stored as given; they do not have to exist.
    pub fn create_initiative(&self, initiative: &Initiative) -> RepoResult<InitiativeId> {
        initiative.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO government_initiatives (
                id,
                title,
                description,
                status,
                progress,
                category,
                deadline
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                initiative.id.as_str(),
                initiative.title.as_str(),
                initiative.description.as_str(),
                initiative.status.as_str(),
                i64::from(initiative.progress),
                initiative.category.as_str(),
                initiative
                    .deadline
                    .map(|date| date.format(DEADLINE_FORMAT).to_string()),
            ],
        )?;

        for (position, target) in initiative.connections.iter().enumerate() {
            tx.execute(
                "INSERT INTO initiative_connections (
                    initiative_id,
                    connected_initiative_id,
                    position
                ) VALUES (?1, ?2, ?3);",
                params![initiative.id.as_str(), target.as_str(), position as i64],
            )?;
        }
        tx.commit()?;

        Ok(initiative.id.clone())
    }

    /// Appends a labelled connection after the source's existing ones.
    ///
    /// Returns `NotFound` when the source initiative is not stored. The
    /// target may be absent.
    pub fn add_connection(&self, connection: &InitiativeConnection) -> RepoResult<()> {
        let source_exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM government_initiatives WHERE id = ?1);",
            [connection.source.as_str()],
            |row| row.get(0),
        )?;
        if !source_exists {
            return Err(RepoError::NotFound(connection.source.clone()));
        }

        self.conn.execute(
            "INSERT INTO initiative_connections (
                initiative_id,
                connected_initiative_id,
                relationship_type,
                position
            ) VALUES (
                ?1,
                ?2,
                ?3,
                (SELECT COALESCE(MAX(position) + 1, 0)
                 FROM initiative_connections
                 WHERE initiative_id = ?1)
            );",
            params![
                connection.source.as_str(),
                connection.target.as_str(),
                connection.relationship.as_deref(),
            ],
        )?;
        Ok(())
    }

    /// Loads one initiative by id.
    pub fn get_initiative(&self, id: &str) -> RepoResult<Option<Initiative>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{INITIATIVE_SELECT_SQL} WHERE id = ?1;"))?;
        let Some(mut initiative) = stmt
            .query_row([id], |row| Ok(parse_initiative_row(row)))
            .optional()?
            .transpose()?
        else {
            return Ok(None);
        };

        initiative.connections = self.connections_of(id)?;
        Ok(Some(initiative))
    }

    fn connections_of(&self, id: &str) -> RepoResult<Vec<InitiativeId>> {
        let mut stmt = self.conn.prepare(
            "SELECT connected_initiative_id
             FROM initiative_connections
             WHERE initiative_id = ?1
             ORDER BY position ASC;",
        )?;
        let targets = stmt
            .query_map([id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(targets)
    }

    fn all_connections(&self) -> RepoResult<HashMap<InitiativeId, Vec<InitiativeId>>> {
        let mut stmt = self.conn.prepare(
            "SELECT initiative_id, connected_initiative_id
             FROM initiative_connections
             ORDER BY initiative_id ASC, position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut by_source: HashMap<InitiativeId, Vec<InitiativeId>> = HashMap::new();
        while let Some(row) = rows.next()? {
            by_source
                .entry(row.get("initiative_id")?)
                .or_default()
                .push(row.get("connected_initiative_id")?);
        }
        Ok(by_source)
    }
}

impl InitiativeRepository for SqliteInitiativeRepository<'_> {
    fn list_initiatives(&self) -> RepoResult<Vec<Initiative>> {
        let mut connections = self.all_connections()?;

        // rowid breaks ties between rows created within the same millisecond.
        let mut stmt = self.conn.prepare(&format!(
            "{INITIATIVE_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut initiatives = Vec::new();
        while let Some(row) = rows.next()? {
            let mut initiative = parse_initiative_row(row)?;
            initiative.connections = connections.remove(&initiative.id).unwrap_or_default();
            initiatives.push(initiative);
        }
        Ok(initiatives)
    }
}

fn parse_initiative_row(row: &Row<'_>) -> RepoResult<Initiative> {
    let id: String = row.get("id")?;

    let status_text: String = row.get("status")?;
    let status = status_text.parse::<InitiativeStatus>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in government_initiatives.status"
        ))
    })?;

    let raw_progress: i64 = row.get("progress")?;
    let progress = u8::try_from(raw_progress)
        .ok()
        .filter(|value| *value <= MAX_PROGRESS)
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid progress `{raw_progress}` in government_initiatives.progress"
            ))
        })?;

    let deadline = match row.get::<_, Option<String>>("deadline")? {
        Some(text) => Some(NaiveDate::parse_from_str(&text, DEADLINE_FORMAT).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid deadline `{text}` in government_initiatives.deadline"
            ))
        })?),
        None => None,
    };

    let initiative = Initiative {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        progress,
        category: row.get("category")?,
        deadline,
        connections: Vec::new(),
    };
    initiative.validate()?;
    Ok(initiative)
}
