//! Breadth-first reachability pre-check.

use std::collections::VecDeque;

use gridway_core::{Connectivity, Grid, Point};

/// Whether `end` can be reached from `start` at all, ignoring edge weights.
///
/// Runs an unweighted breadth-first traversal over the same neighbor
/// relation the weighted search uses for `conn`, so a `false` here means a
/// subsequent search is guaranteed to come back empty and can be skipped.
/// Owns its transient visited set; the grid is not touched.
///
/// Invalid endpoints (out of bounds, or on a barrier) give `false`.
pub fn is_reachable(grid: &Grid, start: Point, end: Point, conn: Connectivity) -> bool {
    if !grid.is_passable(start) || !grid.is_passable(end) {
        return false;
    }
    if start == end {
        return true;
    }

    let side = grid.side();
    let idx = |p: Point| (p.y * side + p.x) as usize;

    let mut visited = vec![false; grid.len()];
    let mut queue: VecDeque<Point> = VecDeque::new();
    let mut nbuf: Vec<Point> = Vec::with_capacity(8);

    visited[idx(start)] = true;
    queue.push_back(start);

    while let Some(cur) = queue.pop_front() {
        grid.neighbors(cur, conn, &mut nbuf);
        for &np in nbuf.iter() {
            if np == end {
                return true;
            }
            let ni = idx(np);
            if !visited[ni] {
                visited[ni] = true;
                queue.push_back(np);
            }
        }
    }

    false
}
