//! **gridway-core** — grid model and geometry for the gridway shortest-path
//! engine.
//!
//! This crate provides the types shared across the *gridway* workspace: the
//! [`Point`] geometry primitive, the [`Cell`]/[`Role`] state model, and the
//! [`Grid`] itself with its barrier, terrain and start/end mutators plus
//! neighbor enumeration under a [`Connectivity`] pattern.
//!
//! Rendering, input handling and map decoding live in external collaborators;
//! the core only hands out read-only cell snapshots (see [`Grid::iter`]) and
//! accepts mutations between searches.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::{Cell, Role};
pub use geom::Point;
pub use grid::{Connectivity, Grid, GridError};
