//! Hosted initiative store accessed over its REST query interface.
//!
//! # Responsibility
//! - Issue the single "all initiatives with connections" query.
//! - Map untyped rows eagerly into `Initiative`; nothing untyped escapes.
//!
//! # Invariants
//! - One request per call. No retry, no backoff.
//! - A row violating model invariants fails the whole listing.

use crate::model::initiative::{
    Connection, Initiative, InitiativeId, InitiativeRecord, InitiativeStatus, MAX_PROGRESS,
};
use crate::repo::initiative_repo::{InitiativeRepository, RepoError, RepoResult};
use chrono::{DateTime, NaiveDate};
use log::{debug, error, info};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const STORE_URL_ENV: &str = "SUPABASE_URL";
pub const STORE_KEY_ENV: &str = "SUPABASE_ANON_KEY";

const INITIATIVES_PATH: &str = "rest/v1/government_initiatives";
const INITIATIVES_SELECT: &str =
    "*,initiative_connections(connected_initiative_id,relationship_type)";
const INITIATIVES_ORDER: &str = "created_at.desc";
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Missing or unusable store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidUrl(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "environment variable `{var}` is not set"),
            Self::InvalidUrl(url) => {
                write!(f, "store url must start with http:// or https://, got `{url}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Connection settings for the hosted store.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl StoreConfig {
    /// Builds a config, normalising the base URL.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Reads `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through an arbitrary lookup; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let base_url = read(STORE_URL_ENV)?;
        let api_key = read(STORE_KEY_ENV)?;
        Self::new(&base_url, api_key.trim())
    }

    fn initiatives_url(&self) -> String {
        format!("{}/{INITIATIVES_PATH}", self.base_url)
    }
}

/// Failure talking to the hosted store.
#[derive(Debug)]
pub enum RemoteError {
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    Decode(serde_json::Error),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "initiative store request failed: {err}"),
            Self::Status { status, body } => {
                write!(f, "initiative store answered {status}: {body}")
            }
            Self::Decode(err) => write!(f, "initiative store returned an unexpected body: {err}"),
        }
    }
}

impl Error for RemoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Initiative store backed by the hosted REST interface.
pub struct RestInitiativeRepository {
    config: StoreConfig,
    client: Client,
}

impl RestInitiativeRepository {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Builds a repository from the process environment.
    pub fn from_env() -> RepoResult<Self> {
        Ok(Self::new(StoreConfig::from_env()?))
    }

    fn fetch_rows(&self) -> Result<Vec<InitiativeRow>, RemoteError> {
        let response = self
            .client
            .get(self.config.initiatives_url())
            .query(&[("select", INITIATIVES_SELECT), ("order", INITIATIVES_ORDER)])
            .header("apikey", self.config.api_key.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        serde_json::from_str(&body).map_err(RemoteError::Decode)
    }
}

impl InitiativeRepository for RestInitiativeRepository {
    fn list_initiatives(&self) -> RepoResult<Vec<Initiative>> {
        let started_at = Instant::now();
        debug!("event=store_query module=rest_repo status=start table=government_initiatives");

        let rows = match self.fetch_rows() {
            Ok(rows) => rows,
            Err(err) => {
                error!(
                    "event=store_query module=rest_repo status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        let initiatives: Vec<Initiative> = map_rows(rows)?
            .into_iter()
            .map(|record| record.initiative)
            .collect();
        info!(
            "event=store_query module=rest_repo status=ok rows={} duration_ms={}",
            initiatives.len(),
            started_at.elapsed().as_millis()
        );
        Ok(initiatives)
    }
}

/// Identifier as delivered by the store: text or integer primary keys.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowId {
    Text(String),
    Number(i64),
}

impl From<RowId> for InitiativeId {
    fn from(value: RowId) -> Self {
        match value {
            RowId::Text(text) => text,
            RowId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InitiativeRow {
    id: RowId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    status: String,
    progress: i64,
    category: String,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    initiative_connections: Option<Vec<ConnectionRow>>,
}

#[derive(Debug, Deserialize)]
struct ConnectionRow {
    connected_initiative_id: RowId,
    #[serde(default)]
    relationship_type: Option<String>,
}

/// Parses a saved response of the store query (a JSON array of rows).
///
/// Unlike a live listing, each record keeps its relationship labels.
pub fn parse_rows_json(body: &str) -> RepoResult<Vec<InitiativeRecord>> {
    let rows: Vec<InitiativeRow> =
        serde_json::from_str(body).map_err(|err| RepoError::Remote(RemoteError::Decode(err)))?;
    map_rows(rows)
}

fn map_rows(rows: Vec<InitiativeRow>) -> RepoResult<Vec<InitiativeRecord>> {
    rows.into_iter().map(map_row).collect()
}

fn map_row(row: InitiativeRow) -> RepoResult<InitiativeRecord> {
    let id = InitiativeId::from(row.id);

    let status = row.status.parse::<InitiativeStatus>().map_err(|_| {
        RepoError::InvalidData(format!(
            "initiative `{id}` has unknown status `{}`",
            row.status
        ))
    })?;

    let progress = u8::try_from(row.progress)
        .ok()
        .filter(|value| *value <= MAX_PROGRESS)
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "initiative `{id}` has progress {} outside 0..={MAX_PROGRESS}",
                row.progress
            ))
        })?;

    let deadline = row
        .deadline
        .as_deref()
        .map(|text| {
            parse_deadline(text).ok_or_else(|| {
                RepoError::InvalidData(format!("initiative `{id}` has invalid deadline `{text}`"))
            })
        })
        .transpose()?;

    let links: Vec<Connection> = row
        .initiative_connections
        .unwrap_or_default()
        .into_iter()
        .map(|connection| Connection {
            source: id.clone(),
            target: InitiativeId::from(connection.connected_initiative_id),
            relationship: connection.relationship_type,
        })
        .collect();
    let connections = links.iter().map(|link| link.target.clone()).collect();

    let initiative = Initiative {
        id,
        title: row.title,
        description: row.description.unwrap_or_default(),
        status,
        progress,
        category: row.category,
        deadline,
        connections,
    };
    initiative.validate()?;
    Ok(InitiativeRecord { initiative, links })
}

/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp.
fn parse_deadline(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::{parse_deadline, ConfigError, StoreConfig, STORE_KEY_ENV, STORE_URL_ENV};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (STORE_URL_ENV, "https://demo.supabase.co/"),
            (STORE_KEY_ENV, "anon"),
        ]))
        .unwrap();
        assert_eq!(
            config.initiatives_url(),
            "https://demo.supabase.co/rest/v1/government_initiatives"
        );
    }

    #[test]
    fn config_reports_blank_key_as_missing() {
        let err = StoreConfig::from_lookup(lookup_from(&[
            (STORE_URL_ENV, "https://demo.supabase.co"),
            (STORE_KEY_ENV, "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(STORE_KEY_ENV));
    }

    #[test]
    fn config_rejects_non_http_url() {
        let err = StoreConfig::new("ftp://store", "key").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = StoreConfig::new("https://demo.supabase.co", "secret-key").unwrap();
        assert!(!format!("{config:?}").contains("secret-key"));
    }

    #[test]
    fn deadline_accepts_date_and_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(parse_deadline("2025-12-01"), Some(expected));
        assert_eq!(parse_deadline("2025-12-01T00:00:00+00:00"), Some(expected));
        assert_eq!(parse_deadline("Dic 2025"), None);
    }
}
