//! Lazy edge queries over a SQLite relations table.
//!
//! Describe edges with [`Edge`], compose them into a [`Query`] with lookups,
//! set operators and multi-hop traversal, then scan the result. Nothing is
//! read from the database until a query is scanned.

pub mod config;
pub mod edge;
pub mod errors;
pub mod graph;
pub mod query;
pub mod schema;
pub mod sql;

pub use crate::config::GraphConfig;
pub use crate::edge::Edge;
pub use crate::errors::GraphQueryError;
pub use crate::graph::Graph;
pub use crate::query::{IdStream, Query, QueryIndex, SliceRange, SliceStream};
