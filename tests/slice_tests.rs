mod common;

use common::sample_graph;
use graphlite::{GraphQueryError, Query, SliceRange};
use proptest::prelude::*;
use rusqlite::{Connection, params, types::Value};

const ORDERED_KNOWS: &str = "SELECT dst FROM graph_relations WHERE rel = ? ORDER BY dst";

fn ordered(query: Query<'_>) -> Query<'_> {
    query.derived(ORDERED_KNOWS, [Value::Text("knows".into())])
}

#[test]
fn test_half_open_ranges() {
    let graph = sample_graph();
    let q = ordered(graph.query());
    assert_eq!(q.ids().expect("ids"), vec![2, 3, 4, 4, 5, 6]);
    assert_eq!(q.slice(1..3).expect("1..3"), vec![3, 4]);
    assert_eq!(q.slice(4..).expect("4.."), vec![5, 6]);
    assert_eq!(q.slice(..2).expect("..2"), vec![2, 3]);
    assert_eq!(q.slice(..).expect(".."), q.ids().expect("ids"));
    assert_eq!(q.slice(1..=2).expect("1..=2"), vec![3, 4]);
    assert_eq!(q.slice(..=0).expect("..=0"), vec![2]);
}

#[test]
fn test_stepped_ranges() {
    let graph = sample_graph();
    let q = ordered(graph.query());
    let evens = SliceRange::new(None, None, Some(2));
    assert_eq!(q.slice(evens).expect("step 2"), vec![2, 4, 5]);
    let window = SliceRange::new(Some(1), Some(5), Some(3));
    assert_eq!(q.slice(window).expect("window"), vec![3, 5]);
}

#[test]
fn test_empty_ranges_are_not_errors() {
    let graph = sample_graph();
    let q = ordered(graph.query());
    assert!(q.slice(3..1).expect("reversed").is_empty());
    assert!(q.slice(2..2).expect("empty").is_empty());
    assert!(q.slice(10..20).expect("past end").is_empty());
}

#[test]
fn test_position_and_zero_step_are_rejected() {
    let graph = sample_graph();
    let q = ordered(graph.query());
    assert!(matches!(q.slice(2), Err(GraphQueryError::UnsupportedIndex(_))));
    assert!(matches!(
        q.slice(SliceRange::new(Some(0), Some(3), Some(0))),
        Err(GraphQueryError::UnsupportedIndex(_))
    ));
}

#[test]
fn test_scan_slice_stops_at_range_end() {
    let graph = sample_graph();
    let q = ordered(graph.query());
    let (taken, first) = q
        .scan_slice(1..3, |ids| {
            let first = ids.next();
            (1 + ids.count(), first)
        })
        .expect("scan slice");
    assert_eq!(taken, 2);
    assert!(matches!(first, Some(Ok(3))));
}

#[test]
fn test_slice_surfaces_errors_before_start() {
    let graph = sample_graph();
    let q = graph.query().derived("SELECT rel FROM graph_relations", []);
    assert!(matches!(q.slice(3..5), Err(GraphQueryError::Backend(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn slice_matches_vec_semantics(
        len in 0usize..20,
        start in proptest::option::of(0usize..25),
        stop in proptest::option::of(0usize..25),
        step in proptest::option::of(1usize..5),
    ) {
        let conn = Connection::open_in_memory().expect("connection");
        conn.execute_batch("CREATE TABLE numbers (n INTEGER NOT NULL)").expect("table");
        for n in 0..len {
            conn.execute("INSERT INTO numbers(n) VALUES(?1)", params![n as i64]).expect("insert");
        }
        let q = Query::new(&conn).derived("SELECT n FROM numbers ORDER BY n", []);
        let all: Vec<i64> = (0..len as i64).collect();
        let lo = start.unwrap_or(0).min(len);
        let hi = stop.unwrap_or(len).min(len).max(lo);
        let expected: Vec<i64> = all[lo..hi].iter().step_by(step.unwrap_or(1)).copied().collect();
        let got = q.slice(SliceRange::new(start, stop, step)).expect("slice");
        prop_assert_eq!(got, expected);
    }
}
