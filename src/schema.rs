use rusqlite::Connection;
use tracing::debug;

use crate::errors::GraphQueryError;

pub fn ensure_schema(conn: &Connection) -> Result<(), GraphQueryError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS graph_relations (
            src INTEGER NOT NULL,
            rel TEXT    NOT NULL,
            dst INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_relations_src ON graph_relations(src, rel);
        CREATE INDEX IF NOT EXISTS idx_relations_dst ON graph_relations(dst, rel);
        "#,
    )
    .map_err(|e| GraphQueryError::schema(e.to_string()))?;
    debug!("relations schema ensured");
    Ok(())
}
