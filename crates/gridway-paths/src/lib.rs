//! Informed best-first search and reachability analysis over gridway grids.
//!
//! This crate is the algorithmic core of the *gridway* workspace:
//!
//! - **A\*** shortest-path search ([`search`]) with deterministic
//!   `(f, insertion_order)` tie-breaking, a per-pop observability callback
//!   and cooperative cancellation
//! - **Heuristic metrics** ([`Heuristic`], plus the free functions
//!   [`manhattan`], [`euclidean`], [`octile`]) — the metric choice also
//!   fixes the grid connectivity
//! - **BFS reachability pre-check** ([`is_reachable`]) to skip searches
//!   that cannot succeed
//! - **Path reconstruction** ([`Trace`]) from the predecessor map
//! - **Advisory diagnostics** ([`Diagnostics`]) — per-edge consistency and
//!   at-success admissibility checks that warn but never change the result
//!
//! Missing paths are ordinary results ([`SearchResult::NotFound`]); only
//! precondition violations surface as [`SearchError`].

mod astar;
mod bfs;
mod diag;
mod heuristic;
mod trace;

pub use astar::{SearchError, SearchReport, SearchResult, search};
pub use bfs::is_reachable;
pub use diag::{Diagnostics, EPSILON};
pub use heuristic::{Heuristic, euclidean, manhattan, octile};
pub use trace::Trace;
