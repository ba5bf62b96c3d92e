//! Lazy, composable edge queries.
//!
//! A [`Query`] is an ordered list of SQL fragments plus their positional
//! parameters. Composing never touches the database and never mutates the
//! receiver; each call returns a new query. Rows are only read when a query is
//! scanned, and every scan executes the statement again from scratch.
//!
//! ```no_run
//! use graphlite::{Edge, Graph};
//!
//! let graph = Graph::open_in_memory()?;
//! let knows = Edge::new().rel("knows");
//! let friends_of_friends = graph.find(&Edge::from_source(1).rel("knows"))?.traverse(&knows)?;
//! let mutual = graph
//!     .find(&Edge::from_source(1).rel("knows"))?
//!     .intersection()
//!     .apply(&Edge::from_source(2).rel("knows"))?;
//! println!("{} / {:?}", friends_of_friends.count()?, mutual.ids()?);
//! # Ok::<(), graphlite::GraphQueryError>(())
//! ```

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use ahash::AHashSet;
use rusqlite::{Connection, Rows, params_from_iter, types::Value};
use tracing::{debug, trace};

use crate::{
    edge::Edge,
    errors::GraphQueryError,
    sql::{self, FRAGMENT_SEPARATOR, Statement},
};

#[derive(Clone, Debug)]
pub struct Query<'conn> {
    conn: &'conn Connection,
    fragments: Vec<String>,
    params: Vec<Value>,
}

impl<'conn> Query<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_parts(conn, Vec::new(), Vec::new())
    }

    /// Query seeded with existing fragments. `params` must line up with the
    /// placeholders of the joined fragments.
    pub fn with_parts(conn: &'conn Connection, fragments: Vec<String>, params: Vec<Value>) -> Self {
        Self {
            conn,
            fragments,
            params,
        }
    }

    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The statement a scan would execute.
    pub fn statement(&self) -> String {
        self.fragments.join(FRAGMENT_SEPARATOR)
    }

    /// New query with `fragment` appended and `params` bound after the existing ones.
    pub fn derived<I>(&self, fragment: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut fragments = self.fragments.clone();
        fragments.push(fragment.into());
        let mut bound = self.params.clone();
        bound.extend(params);
        trace!(fragments = fragments.len(), params = bound.len(), "derived query");
        Self::with_parts(self.conn, fragments, bound)
    }

    /// Appends a lookup for `edge`.
    ///
    /// A bound destination selects the sources reaching it, whether or not the
    /// source is bound too. Otherwise a bound source selects its destinations.
    pub fn apply(&self, edge: &Edge) -> Result<Self, GraphQueryError> {
        let rel = edge.rel.as_deref();
        let statement = match (edge.src, edge.dst) {
            (_, Some(dst)) => sql::inverse_relation(dst, rel),
            (Some(src), None) => sql::forward_relation(src, rel),
            (None, None) => {
                return Err(GraphQueryError::invalid_pattern(format!(
                    "{edge} binds neither source nor destination"
                )));
            }
        };
        Ok(self.derive_statement(statement))
    }

    /// Folds the current result set into a one-hop step along `edge`.
    ///
    /// Without a destination this selects everything the current nodes reach
    /// through `edge.rel`; with one it keeps the current nodes that reach it.
    /// The returned query holds a single fragment; earlier parameters stay in
    /// front of the new ones. `edge.src` is not consulted. Traversing from an
    /// empty query yields no rows.
    pub fn traverse(&self, edge: &Edge) -> Result<Self, GraphQueryError> {
        if edge.src.is_some() && edge.dst.is_some() {
            debug!(%edge, "traverse ignores the bound source");
        }
        let current = self.statement();
        let rel = edge.rel.as_deref();
        let statement = match edge.dst {
            None => sql::compound_forward(rel, &current),
            Some(dst) => sql::compound_inverse(dst, rel, &current),
        };
        let mut params = self.params.clone();
        params.extend(statement.params);
        trace!(params = params.len(), "folded traversal");
        Ok(Self::with_parts(self.conn, vec![statement.sql], params))
    }

    /// Appends `INTERSECT`; compose the right-hand side next.
    pub fn intersection(&self) -> Self {
        self.derived(sql::INTERSECT, [])
    }

    /// Appends `UNION`; compose the right-hand side next.
    pub fn union(&self) -> Self {
        self.derived(sql::UNION, [])
    }

    /// Appends `EXCEPT`; compose the right-hand side next.
    pub fn difference(&self) -> Self {
        self.derived(sql::EXCEPT, [])
    }

    pub fn intersect(&self, other: &Query<'_>) -> Self {
        self.intersection().extended_with(other)
    }

    pub fn union_with(&self, other: &Query<'_>) -> Self {
        self.union().extended_with(other)
    }

    pub fn except(&self, other: &Query<'_>) -> Self {
        self.difference().extended_with(other)
    }

    /// Executes the statement and hands the lazy id stream to `f`.
    ///
    /// The cursor lives exactly as long as the call to `f`; stopping early
    /// just drops the remaining rows unread.
    pub fn scan<R, F>(&self, f: F) -> Result<R, GraphQueryError>
    where
        F: FnOnce(&mut IdStream<'_>) -> R,
    {
        self.with_stream(|mut ids| f(&mut ids))
    }

    /// Like [`Query::scan`], restricted to `index`. Rows past the end of the
    /// range are never fetched.
    pub fn scan_slice<R, F>(&self, index: impl Into<QueryIndex>, f: F) -> Result<R, GraphQueryError>
    where
        F: FnOnce(&mut SliceStream<'_>) -> R,
    {
        let bounds = SliceBounds::try_from(index.into())?;
        self.with_stream(|ids| f(&mut SliceStream::new(ids, bounds)))
    }

    pub fn ids(&self) -> Result<Vec<i64>, GraphQueryError> {
        self.scan(|ids| ids.collect::<Result<Vec<_>, _>>())?
    }

    pub fn id_set(&self) -> Result<AHashSet<i64>, GraphQueryError> {
        self.scan(|ids| ids.collect::<Result<AHashSet<_>, _>>())?
    }

    pub fn count(&self) -> Result<usize, GraphQueryError> {
        self.scan(|ids| ids.try_fold(0usize, |n, id| id.map(|_| n + 1)))?
    }

    pub fn slice(&self, index: impl Into<QueryIndex>) -> Result<Vec<i64>, GraphQueryError> {
        self.scan_slice(index, |ids| ids.collect::<Result<Vec<_>, _>>())?
    }

    fn derive_statement(&self, statement: Statement) -> Self {
        self.derived(statement.sql, statement.params)
    }

    fn extended_with(&self, other: &Query<'_>) -> Self {
        let mut fragments = self.fragments.clone();
        fragments.extend(other.fragments.iter().cloned());
        let mut params = self.params.clone();
        params.extend(other.params.iter().cloned());
        Self::with_parts(self.conn, fragments, params)
    }

    fn with_stream<R, F>(&self, f: F) -> Result<R, GraphQueryError>
    where
        F: FnOnce(IdStream<'_>) -> R,
    {
        let statement = self.statement();
        debug!(statement = %statement, params = self.params.len(), "executing query");
        let mut prepared = self.conn.prepare_cached(&statement)?;
        let rows = prepared.query(params_from_iter(self.params.iter()))?;
        let out = f(IdStream::new(rows));
        Ok(out)
    }
}

/// Node ids read from the first column of each row.
pub struct IdStream<'stmt> {
    rows: Rows<'stmt>,
    done: bool,
}

impl<'stmt> IdStream<'stmt> {
    fn new(rows: Rows<'stmt>) -> Self {
        Self { rows, done: false }
    }
}

impl Iterator for IdStream<'_> {
    type Item = Result<i64, GraphQueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = match self.rows.next() {
            Ok(Some(row)) => row.get::<_, i64>(0).map_err(GraphQueryError::from),
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(err) => Err(GraphQueryError::from(err)),
        };
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

/// Argument accepted by [`Query::slice`]. Only ranges are supported; a single
/// position is rejected at scan time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryIndex {
    Position(usize),
    Slice(SliceRange),
}

/// Half-open `start..stop` taking every `step`th row. Unset fields default to
/// the start of the result, its end, and a step of one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SliceRange {
    pub start: Option<usize>,
    pub stop: Option<usize>,
    pub step: Option<usize>,
}

impl SliceRange {
    pub fn new(start: Option<usize>, stop: Option<usize>, step: Option<usize>) -> Self {
        Self { start, stop, step }
    }
}

impl From<SliceRange> for QueryIndex {
    fn from(range: SliceRange) -> Self {
        QueryIndex::Slice(range)
    }
}

impl From<usize> for QueryIndex {
    fn from(position: usize) -> Self {
        QueryIndex::Position(position)
    }
}

impl From<Range<usize>> for QueryIndex {
    fn from(range: Range<usize>) -> Self {
        SliceRange::new(Some(range.start), Some(range.end), None).into()
    }
}

impl From<RangeFrom<usize>> for QueryIndex {
    fn from(range: RangeFrom<usize>) -> Self {
        SliceRange::new(Some(range.start), None, None).into()
    }
}

impl From<RangeTo<usize>> for QueryIndex {
    fn from(range: RangeTo<usize>) -> Self {
        SliceRange::new(None, Some(range.end), None).into()
    }
}

impl From<RangeFull> for QueryIndex {
    fn from(_: RangeFull) -> Self {
        SliceRange::default().into()
    }
}

impl From<RangeInclusive<usize>> for QueryIndex {
    fn from(range: RangeInclusive<usize>) -> Self {
        let (start, end) = range.into_inner();
        SliceRange::new(Some(start), Some(end.saturating_add(1)), None).into()
    }
}

impl From<RangeToInclusive<usize>> for QueryIndex {
    fn from(range: RangeToInclusive<usize>) -> Self {
        SliceRange::new(None, Some(range.end.saturating_add(1)), None).into()
    }
}

#[derive(Clone, Copy, Debug)]
struct SliceBounds {
    start: usize,
    stop: Option<usize>,
    step: usize,
}

impl TryFrom<QueryIndex> for SliceBounds {
    type Error = GraphQueryError;

    fn try_from(index: QueryIndex) -> Result<Self, Self::Error> {
        let range = match index {
            QueryIndex::Slice(range) => range,
            QueryIndex::Position(position) => {
                return Err(GraphQueryError::unsupported_index(format!(
                    "position {position}; only ranges can be taken from a query"
                )));
            }
        };
        let step = range.step.unwrap_or(1);
        if step == 0 {
            return Err(GraphQueryError::unsupported_index(
                "slice step must be non-zero",
            ));
        }
        Ok(Self {
            start: range.start.unwrap_or(0),
            stop: range.stop,
            step,
        })
    }
}

/// [`IdStream`] restricted to a [`SliceRange`]. Errors are yielded even when
/// they occur on a skipped row.
pub struct SliceStream<'stmt> {
    ids: IdStream<'stmt>,
    bounds: SliceBounds,
    position: usize,
}

impl<'stmt> SliceStream<'stmt> {
    fn new(ids: IdStream<'stmt>, bounds: SliceBounds) -> Self {
        Self {
            ids,
            bounds,
            position: 0,
        }
    }
}

impl Iterator for SliceStream<'_> {
    type Item = Result<i64, GraphQueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.bounds.stop.is_some_and(|stop| self.position >= stop) {
                return None;
            }
            let item = self.ids.next()?;
            let position = self.position;
            self.position += 1;
            match item {
                Err(err) => return Some(Err(err)),
                Ok(id) => {
                    if position >= self.bounds.start
                        && (position - self.bounds.start) % self.bounds.step == 0
                    {
                        return Some(Ok(id));
                    }
                }
            }
        }
    }
}
