//! The [`Grid`] type — a square board of [`Cell`]s in row-major layout.
//!
//! The grid owns all cell state for one search session. Mutation (barrier
//! toggling, terrain painting, start/end placement, reset) is only valid
//! *between* searches; an in-flight search holds `&mut Grid` so the borrow
//! checker enforces this.

use std::fmt;

use crate::cell::{Cell, Role};
use crate::geom::Point;

/// Which neighboring cells count as adjacent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// The four orthogonal neighbors, unit step cost.
    Four,
    /// Orthogonal plus diagonal neighbors; diagonal steps cost sqrt(2) and
    /// may not cut corners.
    Eight,
}

/// Default number of terrain cost bands (costs 0 through 4).
pub const DEFAULT_TERRAIN_BANDS: u32 = 5;

const CARDINAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

const DIAGONAL: [Point; 4] = [
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// Errors from grid construction and mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The coordinate lies outside the grid.
    OutOfBounds(Point),
    /// A terrain band outside the configured range was requested.
    TerrainOutOfRange { band: u32, bands: u32 },
    /// Start and end may not share a cell.
    EndpointConflict(Point),
    /// A label array does not match the grid dimension.
    BadLabels { expected: usize, got: usize },
    /// A label value that is neither a barrier nor a valid terrain band.
    InvalidLabel { value: i32, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "coordinate {p} is outside the grid"),
            Self::TerrainOutOfRange { band, bands } => {
                write!(f, "terrain band {band} outside configured range 0..{bands}")
            }
            Self::EndpointConflict(p) => {
                write!(f, "start and end cannot share the cell {p}")
            }
            Self::BadLabels { expected, got } => {
                write!(f, "label array has {got} entries, grid needs {expected}")
            }
            Self::InvalidLabel { value, pos } => {
                write!(f, "invalid label {value} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A square grid of [`Cell`]s with tracked start/end positions.
///
/// Exactly zero or one cell holds the `Start` role and zero or one the
/// `End` role; every mutator that writes those roles goes through
/// [`set_role`](Grid::set_role), which keeps the bookkeeping consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    side: i32,
    bands: u32,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a new `side` x `side` grid of free cells with the default
    /// terrain band count.
    pub fn new(side: i32) -> Self {
        Self::with_terrain_bands(side, DEFAULT_TERRAIN_BANDS)
    }

    /// Create a grid with a custom number of terrain cost bands.
    ///
    /// Bands are the integer costs `0..bands`; the count is a session
    /// parameter, not a fixed contract.
    pub fn with_terrain_bands(side: i32, bands: u32) -> Self {
        let n = side.max(0);
        Self {
            cells: vec![Cell::default(); (n * n) as usize],
            side: n,
            bands: bands.max(1),
            start: None,
            end: None,
        }
    }

    /// Build a grid from a row-major label array, the hand-off format of the
    /// map-loading collaborator: `-1` marks a barrier, `0..bands` a terrain
    /// band.
    pub fn from_labels(side: i32, bands: u32, labels: &[i32]) -> Result<Self, GridError> {
        let mut grid = Self::with_terrain_bands(side, bands);
        if labels.len() != grid.cells.len() {
            return Err(GridError::BadLabels {
                expected: grid.cells.len(),
                got: labels.len(),
            });
        }
        for (i, &label) in labels.iter().enumerate() {
            let pos = grid.point(i);
            match label {
                -1 => grid.cells[i].role = Role::Barrier,
                v if v >= 0 && (v as u32) < grid.bands => {
                    grid.cells[i].terrain = v as f64;
                }
                v => return Err(GridError::InvalidLabel { value: v, pos }),
            }
        }
        Ok(grid)
    }

    /// Side length `N` of the grid.
    #[inline]
    pub fn side(&self) -> i32 {
        self.side
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has zero cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of terrain cost bands configured for this grid.
    #[inline]
    pub fn terrain_bands(&self) -> u32 {
        self.bands
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.side && p.y >= 0 && p.y < self.side
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.side + p.x) as usize
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new((idx as i32) % self.side, (idx as i32) / self.side)
    }

    /// The cell at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Cell> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Terrain cost paid when entering `p`. Out-of-bounds cells cost 0.
    #[inline]
    pub fn terrain(&self, p: Point) -> f64 {
        if !self.contains(p) {
            return 0.0;
        }
        self.cells[self.index(p)].terrain
    }

    /// Whether `p` is inside the grid and not a barrier.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.contains(p) && self.cells[self.index(p)].is_passable()
    }

    /// The tracked start cell, if one is placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The tracked end cell, if one is placed.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Set the role of the cell at `p`, keeping the start/end bookkeeping
    /// consistent: assigning `Start` or `End` relocates the unique endpoint,
    /// and overwriting an endpoint's cell clears its tracking.
    pub fn set_role(&mut self, p: Point, role: Role) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        match role {
            Role::Start => {
                if self.end == Some(p) {
                    return Err(GridError::EndpointConflict(p));
                }
                if let Some(old) = self.start.take() {
                    let i = self.index(old);
                    self.cells[i].role = Role::Free;
                }
                self.start = Some(p);
            }
            Role::End => {
                if self.start == Some(p) {
                    return Err(GridError::EndpointConflict(p));
                }
                if let Some(old) = self.end.take() {
                    let i = self.index(old);
                    self.cells[i].role = Role::Free;
                }
                self.end = Some(p);
            }
            _ => {
                if self.start == Some(p) {
                    self.start = None;
                }
                if self.end == Some(p) {
                    self.end = None;
                }
            }
        }
        let i = self.index(p);
        self.cells[i].role = role;
        Ok(())
    }

    /// Place the unique start cell at `p`.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        self.set_role(p, Role::Start)
    }

    /// Place the unique end cell at `p`.
    pub fn set_end(&mut self, p: Point) -> Result<(), GridError> {
        self.set_role(p, Role::End)
    }

    /// Remove the start cell, if any.
    pub fn clear_start(&mut self) {
        if let Some(p) = self.start.take() {
            let i = self.index(p);
            self.cells[i].role = Role::Free;
        }
    }

    /// Remove the end cell, if any.
    pub fn clear_end(&mut self) {
        if let Some(p) = self.end.take() {
            let i = self.index(p);
            self.cells[i].role = Role::Free;
        }
    }

    /// Flip the cell at `p` between `Barrier` and `Free`. Toggling an
    /// endpoint cell into a barrier clears that endpoint. Terrain cost is
    /// untouched either way.
    pub fn toggle_barrier(&mut self, p: Point) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        let role = if self.cells[self.index(p)].role == Role::Barrier {
            Role::Free
        } else {
            Role::Barrier
        };
        self.set_role(p, role)
    }

    /// Paint terrain band `band` (cost `band`) onto the cell at `p`.
    pub fn set_terrain(&mut self, p: Point, band: u32) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        if band >= self.bands {
            return Err(GridError::TerrainOutOfRange {
                band,
                bands: self.bands,
            });
        }
        let i = self.index(p);
        self.cells[i].terrain = band as f64;
        Ok(())
    }

    /// Reset every cell to a free, zero-terrain default and clear the
    /// endpoints. Dimension and band count are kept.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
        self.start = None;
        self.end = None;
    }

    /// Clear the transient search marks (`Frontier`, `Visited`, `Path`)
    /// left behind by a finished search, keeping topology, terrain and
    /// endpoints intact.
    pub fn clear_marks(&mut self) {
        for cell in &mut self.cells {
            if cell.role.is_mark() {
                cell.role = Role::Free;
            }
        }
    }

    /// Append the passable neighbors of `p` under `conn` into `buf`
    /// (cleared first), cardinals before diagonals.
    ///
    /// Under [`Connectivity::Eight`], a diagonal neighbor is included only
    /// if both orthogonal cells flanking that corner are passable — no
    /// cutting corners. Neighbors are computed on demand from current
    /// barrier state; nothing is cached across mutations.
    pub fn neighbors(&self, p: Point, conn: Connectivity, buf: &mut Vec<Point>) {
        buf.clear();
        if !self.contains(p) {
            return;
        }
        for d in CARDINAL {
            let n = p + d;
            if self.is_passable(n) {
                buf.push(n);
            }
        }
        if conn == Connectivity::Eight {
            for d in DIAGONAL {
                let n = p + d;
                if self.is_passable(n)
                    && self.is_passable(p.shift(d.x, 0))
                    && self.is_passable(p.shift(0, d.y))
                {
                    buf.push(n);
                }
            }
        }
    }

    /// Row-major iterator over `(Point, Cell)` pairs — the read-only
    /// snapshot handed to rendering collaborators.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (self.point(i), c))
    }
}
