//! Connection configuration.
//!
//! ```rust
//! use graphlite::GraphConfig;
//!
//! let mut cfg = GraphConfig::default();
//! cfg.pragma_settings.insert("journal_mode".to_string(), "WAL".to_string());
//! cfg.statement_cache_capacity = Some(64);
//! assert!(cfg.create_schema);
//! ```

use std::collections::BTreeMap;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::GraphQueryError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Create the relations table on open.
    ///
    /// **Default:** `true`
    pub create_schema: bool,

    /// Capacity of the prepared statement cache used when scanning queries.
    ///
    /// **Default:** `None` (rusqlite's own default)
    pub statement_cache_capacity: Option<usize>,

    /// PRAGMAs applied right after the connection is opened, in key order.
    ///
    /// **Default:** empty
    pub pragma_settings: BTreeMap<String, String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            create_schema: true,
            statement_cache_capacity: None,
            pragma_settings: BTreeMap::new(),
        }
    }
}

impl GraphConfig {
    pub fn from_json_str(input: &str) -> Result<Self, GraphQueryError> {
        let cfg: GraphConfig = serde_json::from_str(input)
            .map_err(|e| GraphQueryError::invalid_input(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GraphQueryError> {
        for key in self.pragma_settings.keys() {
            if !is_identifier(key) {
                return Err(GraphQueryError::invalid_input(format!(
                    "invalid pragma name {key:?}"
                )));
            }
        }
        if self.statement_cache_capacity == Some(0) {
            return Err(GraphQueryError::invalid_input(
                "statement cache capacity must be positive",
            ));
        }
        Ok(())
    }

    pub(crate) fn apply(&self, conn: &Connection) -> Result<(), GraphQueryError> {
        self.validate()?;
        for (key, value) in &self.pragma_settings {
            conn.pragma_update(None, key, value)
                .map_err(|e| GraphQueryError::connection(format!("pragma {key}: {e}")))?;
        }
        if let Some(capacity) = self.statement_cache_capacity {
            conn.set_prepared_statement_cache_capacity(capacity);
        }
        debug!(
            pragmas = self.pragma_settings.len(),
            cache = ?self.statement_cache_capacity,
            "connection configured"
        );
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
