use graphlite::schema::ensure_schema;
use rusqlite::Connection;

#[test]
fn test_schema_creates_relations_table() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    assert!(table_exists(&conn, "graph_relations"));
    assert!(table_exists(&conn, "idx_relations_src"));
    assert!(table_exists(&conn, "idx_relations_dst"));
}

#[test]
fn test_schema_is_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO graph_relations(src, rel, dst) VALUES(1, 'knows', 2)",
        [],
    )
    .unwrap();
    ensure_schema(&conn).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM graph_relations", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

fn table_exists(conn: &Connection, name: &str) -> bool {
    conn.prepare("SELECT name FROM sqlite_master WHERE name=?1")
        .unwrap()
        .exists([name])
        .unwrap()
}
