use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::{
    config::GraphConfig, edge::Edge, errors::GraphQueryError, query::Query, schema::ensure_schema,
};

/// Owns the SQLite connection that queries execute against.
pub struct Graph {
    conn: Connection,
}

impl Graph {
    pub fn open<P: AsRef<Path>>(path: P, cfg: &GraphConfig) -> Result<Self, GraphQueryError> {
        let path = path.as_ref();
        let conn =
            Connection::open(path).map_err(|e| GraphQueryError::connection(e.to_string()))?;
        debug!(path = %path.display(), "opened graph");
        Self::from_connection(conn, cfg)
    }

    pub fn open_in_memory() -> Result<Self, GraphQueryError> {
        Self::open_in_memory_with(&GraphConfig::default())
    }

    pub fn open_in_memory_with(cfg: &GraphConfig) -> Result<Self, GraphQueryError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| GraphQueryError::connection(e.to_string()))?;
        Self::from_connection(conn, cfg)
    }

    pub fn from_connection(conn: Connection, cfg: &GraphConfig) -> Result<Self, GraphQueryError> {
        cfg.apply(&conn)?;
        if cfg.create_schema {
            ensure_schema(&conn)?;
        }
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Empty root query.
    pub fn query(&self) -> Query<'_> {
        Query::new(&self.conn)
    }

    /// Root query with a lookup for `edge` applied.
    pub fn find(&self, edge: &Edge) -> Result<Query<'_>, GraphQueryError> {
        self.query().apply(edge)
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}
