#![allow(dead_code)]

use graphlite::Graph;
use rusqlite::params;

pub const SAMPLE_EDGES: &[(i64, &str, i64)] = &[
    (1, "knows", 2),
    (1, "knows", 3),
    (2, "knows", 4),
    (3, "knows", 4),
    (3, "knows", 5),
    (4, "knows", 6),
    (2, "likes", 5),
    (3, "likes", 6),
    (6, "likes", 1),
];

pub fn insert_edge(graph: &Graph, src: i64, rel: &str, dst: i64) {
    graph
        .connection()
        .execute(
            "INSERT INTO graph_relations(src, rel, dst) VALUES(?1, ?2, ?3)",
            params![src, rel, dst],
        )
        .expect("insert edge");
}

pub fn sample_graph() -> Graph {
    let graph = Graph::open_in_memory().expect("graph");
    for (src, rel, dst) in SAMPLE_EDGES {
        insert_edge(&graph, *src, rel, *dst);
    }
    graph
}

pub fn sorted(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids
}
