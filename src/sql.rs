//! SQL fragments for edge lookups over the `graph_relations` table.
//!
//! Every builder returns a single statement with anonymous `?` placeholders.
//! Builders that embed a subquery put their own placeholders after it, so the
//! subquery's parameters followed by the new ones bind in order.

use rusqlite::types::Value;

/// Joins query fragments into one executable statement.
pub const FRAGMENT_SEPARATOR: &str = "\n";

pub const INTERSECT: &str = "INTERSECT";
pub const UNION: &str = "UNION";
pub const EXCEPT: &str = "EXCEPT";

#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }
}

/// Destinations reachable from `src`, optionally restricted to one relation.
pub fn forward_relation(src: i64, rel: Option<&str>) -> Statement {
    let mut sql = String::from("SELECT dst FROM graph_relations WHERE src = ?");
    let mut params = vec![Value::Integer(src)];
    push_relation(&mut sql, &mut params, rel);
    Statement::new(sql, params)
}

/// Sources that reach `dst`, optionally restricted to one relation.
pub fn inverse_relation(dst: i64, rel: Option<&str>) -> Statement {
    let mut sql = String::from("SELECT src FROM graph_relations WHERE dst = ?");
    let mut params = vec![Value::Integer(dst)];
    push_relation(&mut sql, &mut params, rel);
    Statement::new(sql, params)
}

/// Destinations reachable in one hop from any node produced by `subquery`.
pub fn compound_forward(rel: Option<&str>, subquery: &str) -> Statement {
    let mut sql = format!("SELECT dst FROM graph_relations WHERE src IN (\n{subquery}\n)");
    let mut params = Vec::new();
    push_relation(&mut sql, &mut params, rel);
    Statement::new(sql, params)
}

/// Nodes produced by `subquery` that reach `dst`.
pub fn compound_inverse(dst: i64, rel: Option<&str>, subquery: &str) -> Statement {
    let mut sql =
        format!("SELECT src FROM graph_relations WHERE src IN (\n{subquery}\n) AND dst = ?");
    let mut params = vec![Value::Integer(dst)];
    push_relation(&mut sql, &mut params, rel);
    Statement::new(sql, params)
}

fn push_relation(sql: &mut String, params: &mut Vec<Value>, rel: Option<&str>) {
    if let Some(rel) = rel {
        sql.push_str(" AND rel = ?");
        params.push(Value::Text(rel.to_string()));
    }
}
