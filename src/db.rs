use crate::config::{Config, ConfigError};
use crate::models::{Indicator, Item};
use crate::sync::reconciler::EntityStore;
use crate::sync::SyncError;
use chrono::prelude::*;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::result::{ConnectionError, Error};
use diesel::sqlite::SqliteConnection;
use diesel::{Connection, QueryResult};

pub mod indicators;
pub mod items;

use indicators::NewIndicator;
use items::{ItemChangeset, NewItem};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id TEXT PRIMARY KEY NOT NULL CHECK (length(id) > 0),
    author TEXT,
    company_ids TEXT NOT NULL DEFAULT '[]',
    indicator_ids TEXT NOT NULL DEFAULT '[]',
    is_published BOOLEAN NOT NULL DEFAULT 0,
    is_tailored BOOLEAN NOT NULL DEFAULT 0,
    labels TEXT NOT NULL DEFAULT '[]',
    langs TEXT NOT NULL DEFAULT '[]',
    malware_list TEXT NOT NULL DEFAULT '[]',
    seq_update BIGINT NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS indicators (
    id TEXT PRIMARY KEY NOT NULL CHECK (length(id) > 0),
    item_id TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
    date_first_seen TEXT,
    date_last_seen TEXT,
    deleted BOOLEAN NOT NULL DEFAULT 0,
    description TEXT,
    domain TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS indicators_item_id_index ON indicators(item_id);
"#;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to connect to the database: {0}")]
    Connection(#[from] ConnectionError),
    #[error("failed to prepare the database: {0}")]
    Query(#[from] Error),
}

pub fn current_time() -> DateTime<Utc> {
    Utc::now().round_subsecs(0)
}

pub fn establish_connection() -> Result<SqliteConnection, DbError> {
    let url = Config::database_url()?;

    connect(&url)
}

pub fn connect(url: &str) -> Result<SqliteConnection, DbError> {
    let mut connection = SqliteConnection::establish(url)?;

    setup(&mut connection)?;

    Ok(connection)
}

/// Enables foreign keys for the connection and creates missing tables.
pub fn setup(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute("PRAGMA foreign_keys = ON;")?;
    conn.batch_execute(SCHEMA)
}

#[cfg(test)]
pub fn establish_test_connection() -> SqliteConnection {
    connect(":memory:").unwrap_or_else(|error| panic!("Error creating test database: {error}"))
}

impl EntityStore for SqliteConnection {
    fn find_item(&mut self, id: &str) -> QueryResult<Option<Item>> {
        items::find(self, id)
    }

    fn insert_item(&mut self, item: &NewItem) -> QueryResult<()> {
        items::create(self, item).map(|_| ())
    }

    fn update_item(&mut self, id: &str, changes: &ItemChangeset) -> QueryResult<()> {
        items::update(self, id, changes).map(|_| ())
    }

    fn find_indicator(&mut self, id: &str) -> QueryResult<Option<Indicator>> {
        indicators::find(self, id)
    }

    fn insert_indicator(&mut self, indicator: &NewIndicator) -> QueryResult<()> {
        indicators::create(self, indicator).map(|_| ())
    }

    fn atomically<T, F>(&mut self, f: F) -> Result<T, SyncError>
    where
        F: FnOnce(&mut Self) -> Result<T, SyncError>,
    {
        self.transaction(f)
    }
}
