//! Path reconstruction from a predecessor map.

use gridway_core::{Grid, Point, Role};

/// Sentinel for "no predecessor" in the parent array.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// The predecessor map produced by a search, ready for path reconstruction.
///
/// Each cell is assigned a parent at most once before being finalized, so
/// the map forms a tree and every walk terminates within the grid size.
#[derive(Debug, Clone)]
pub struct Trace {
    parent: Vec<usize>,
    side: i32,
}

impl Trace {
    pub(crate) fn new(parent: Vec<usize>, side: i32) -> Self {
        Self { parent, side }
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        (p.y * self.side + p.x) as usize
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new((idx as i32) % self.side, (idx as i32) / self.side)
    }

    /// Walk predecessor links backward from `end` and return the path as an
    /// ordered sequence `end -> start`, exclusive of `start`.
    ///
    /// Every intermediate cell is marked [`Role::Path`]; `start` and `end`
    /// keep their terminal roles. Reconstruction is idempotent: repeated
    /// calls yield the same sequence and marks.
    ///
    /// Only meaningful after a search that reached `end`; for an
    /// unreached `end` the walk stops at the first missing link.
    pub fn reconstruct(&self, grid: &mut Grid, end: Point, start: Point) -> Vec<Point> {
        let start_idx = self.idx(start);
        let end_idx = self.idx(end);
        let mut path = Vec::new();
        let mut cur = end_idx;
        while cur != start_idx && cur != NO_PARENT {
            let p = self.point(cur);
            path.push(p);
            if cur != end_idx {
                // Grid and trace share the same dimension, so this cannot fail.
                let _ = grid.set_role(p, Role::Path);
            }
            cur = self.parent[cur];
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hand-built parent map on a 3x3 grid:
    // (0,0) -> (1,0) -> (2,1) -> (2,2)
    fn sample() -> Trace {
        let mut parent = vec![NO_PARENT; 9];
        parent[1] = 0; // (1,0) <- (0,0)
        parent[5] = 1; // (2,1) <- (1,0)
        parent[8] = 5; // (2,2) <- (2,1)
        Trace::new(parent, 3)
    }

    #[test]
    fn walks_end_to_start_exclusive() {
        let trace = sample();
        let mut grid = Grid::new(3);
        grid.set_start(Point::new(0, 0)).unwrap();
        grid.set_end(Point::new(2, 2)).unwrap();
        let path = trace.reconstruct(&mut grid, Point::new(2, 2), Point::new(0, 0));
        assert_eq!(
            path,
            vec![Point::new(2, 2), Point::new(2, 1), Point::new(1, 0)]
        );
        // Intermediates marked, endpoints untouched.
        assert_eq!(grid.at(Point::new(2, 1)).unwrap().role, Role::Path);
        assert_eq!(grid.at(Point::new(1, 0)).unwrap().role, Role::Path);
        assert_eq!(grid.at(Point::new(0, 0)).unwrap().role, Role::Start);
        assert_eq!(grid.at(Point::new(2, 2)).unwrap().role, Role::End);
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let trace = sample();
        let mut grid = Grid::new(3);
        let first = trace.reconstruct(&mut grid, Point::new(2, 2), Point::new(0, 0));
        let second = trace.reconstruct(&mut grid, Point::new(2, 2), Point::new(0, 0));
        assert_eq!(first, second);
    }
}
