//! Edge patterns: `(source)-[:relation]->(destination)` triples with any
//! field left unbound.
//!
//! An [`Edge`] is both a lookup key (`graph.find(&Edge::from_source(1).rel("knows"))`)
//! and a traversal step (`query.traverse(&Edge::new().rel("knows"))`). Every
//! builder method returns a fresh value, so a pattern handed to a query can be
//! reused afterwards.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub src: Option<i64>,
    pub rel: Option<String>,
    pub dst: Option<i64>,
}

impl Edge {
    /// Fully unbound pattern.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(src: Option<i64>, rel: Option<&str>, dst: Option<i64>) -> Self {
        Self {
            src,
            rel: rel.map(str::to_string),
            dst,
        }
    }

    pub fn from_source(src: i64) -> Self {
        Self {
            src: Some(src),
            ..Self::default()
        }
    }

    pub fn to_destination(dst: i64) -> Self {
        Self {
            dst: Some(dst),
            ..Self::default()
        }
    }

    /// Returns a copy of this pattern with the relation set to `name`.
    pub fn rel(&self, name: impl Into<String>) -> Self {
        Self {
            rel: Some(name.into()),
            ..self.clone()
        }
    }

    /// Returns a copy of this pattern with the destination bound to `dst`.
    pub fn to(&self, dst: i64) -> Self {
        Self {
            dst: Some(dst),
            ..self.clone()
        }
    }

    pub fn without_relation(&self) -> Self {
        Self {
            rel: None,
            ..self.clone()
        }
    }

    pub fn has_bound_endpoint(&self) -> bool {
        self.src.is_some() || self.dst.is_some()
    }

    /// Equality against an arbitrary value. Anything that is not an `Edge`
    /// compares unequal.
    pub fn eq_dyn(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<Edge>().is_some_and(|edge| edge == self)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.src {
            Some(src) => write!(f, "({src})")?,
            None => f.write_str("(*)")?,
        }
        match &self.rel {
            Some(rel) => write!(f, "-[:{rel}]->")?,
            None => f.write_str("-[*]->")?,
        }
        match self.dst {
            Some(dst) => write!(f, "({dst})"),
            None => f.write_str("(*)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_leave_receiver_untouched() {
        let base = Edge::from_source(1);
        let named = base.rel("knows");
        let bound = named.to(2);
        assert_eq!(base, Edge::with(Some(1), None, None));
        assert_eq!(named, Edge::with(Some(1), Some("knows"), None));
        assert_eq!(bound, Edge::with(Some(1), Some("knows"), Some(2)));
        assert_eq!(bound.without_relation(), Edge::with(Some(1), None, Some(2)));
    }

    #[test]
    fn display_marks_unbound_fields() {
        assert_eq!(Edge::new().to_string(), "(*)-[*]->(*)");
        assert_eq!(
            Edge::from_source(1).rel("knows").to(2).to_string(),
            "(1)-[:knows]->(2)"
        );
        assert_eq!(Edge::to_destination(7).to_string(), "(*)-[*]->(7)");
    }

    #[test]
    fn eq_dyn_rejects_foreign_values() {
        let edge = Edge::from_source(1).rel("knows");
        assert!(edge.eq_dyn(&edge.clone()));
        assert!(!edge.eq_dyn(&"(1)-[:knows]->(*)"));
        assert!(!edge.eq_dyn(&1_i64));
        assert!(!edge.eq_dyn(&Edge::from_source(1)));
    }
}
