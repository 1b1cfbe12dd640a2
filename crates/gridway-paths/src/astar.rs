//! A* shortest-path search over a [`Grid`].

use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;
use std::fmt;
use std::ops::ControlFlow;

use gridway_core::{Grid, Point, Role};

use crate::diag::Diagnostics;
use crate::heuristic::Heuristic;
use crate::trace::{NO_PARENT, Trace};

/// Precondition violations, rejected before the search loop starts.
///
/// A missing path is *not* an error — see [`SearchResult::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid has zero cells.
    EmptyGrid,
    /// An endpoint lies outside the grid.
    OutOfBounds(Point),
    /// Start and end coincide.
    StartIsEnd(Point),
    /// The start cell is a barrier.
    StartOnBarrier(Point),
    /// The end cell is a barrier.
    EndOnBarrier(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "cannot search an empty grid"),
            Self::OutOfBounds(p) => write!(f, "endpoint {p} is outside the grid"),
            Self::StartIsEnd(p) => write!(f, "start and end coincide at {p}"),
            Self::StartOnBarrier(p) => write!(f, "start {p} is a barrier cell"),
            Self::EndOnBarrier(p) => write!(f, "end {p} is a barrier cell"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Outcome of a search. Both variants are ordinary results.
#[derive(Debug, Clone)]
pub enum SearchResult {
    /// A minimum-cost path exists.
    Found {
        /// Total cost of the path (move costs plus terrain).
        cost: f64,
        /// Cells popped from the open set.
        explored: usize,
        /// The reconstructed path, `end -> start` exclusive of `start`.
        path: Vec<Point>,
        /// Predecessor map, for re-running reconstruction.
        trace: Trace,
    },
    /// No path exists, or the search was cancelled.
    NotFound {
        /// Cells popped before exhaustion or cancellation.
        explored: usize,
    },
}

/// A [`SearchResult`] together with the advisory heuristic diagnostics.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub result: SearchResult,
    pub diagnostics: Diagnostics,
}

/// Open-set entry ordered by `(f, insertion_order)`.
///
/// `Ord` is reversed so `BinaryHeap` (a max-heap) pops the smallest f
/// first; equal f resolves first-pushed-first-popped, which makes the
/// exploration order deterministic and independent of cell representation.
struct OpenEntry {
    f: f64,
    order: u64,
    idx: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// Per-invocation search state; never outlives one `search` call.
struct SearchState {
    g: Vec<f64>,
    f: Vec<f64>,
    parent: Vec<usize>,
    /// Mirrors open-set membership for O(1) tests. Entries superseded while
    /// queued stay in the heap and are discarded at pop time.
    in_open: Vec<bool>,
    open: BinaryHeap<OpenEntry>,
    counter: u64,
}

impl SearchState {
    fn new(len: usize) -> Self {
        Self {
            g: vec![f64::INFINITY; len],
            f: vec![f64::INFINITY; len],
            parent: vec![NO_PARENT; len],
            in_open: vec![false; len],
            open: BinaryHeap::new(),
            counter: 0,
        }
    }

    /// Queue `idx` under its current f score, tagged with the next
    /// insertion-order value.
    fn push(&mut self, idx: usize) {
        let order = self.counter;
        self.counter += 1;
        self.open.push(OpenEntry {
            f: self.f[idx],
            order,
            idx,
        });
        self.in_open[idx] = true;
    }
}

/// Compute a minimum-cost path from `start` to `end` using A*.
///
/// The heuristic choice fixes the connectivity: `Manhattan` searches the
/// four cardinal neighbors at unit cost, the other metrics additionally
/// allow diagonal steps at cost sqrt(2) (never through a blocked corner).
/// Entering a cell always adds its terrain cost on top of the move cost.
///
/// During the search, open cells are marked [`Role::Frontier`] and expanded
/// cells [`Role::Visited`] so a renderer can show progress; on success the
/// path cells are marked [`Role::Path`]. These marks are observability
/// only and never feed back into the algorithm.
///
/// `on_step` is invoked once per popped cell with a read-only view of the
/// grid; returning [`ControlFlow::Break`] cancels the search, which then
/// returns [`SearchResult::NotFound`] with the exploration count so far and
/// reconstructs no partial path. A caller wanting a deadline wraps the
/// callback to break once its elapsed time exceeds the budget.
///
/// `Err` is reserved for precondition violations; an exhausted search is
/// the ordinary [`SearchResult::NotFound`].
pub fn search<F>(
    grid: &mut Grid,
    start: Point,
    end: Point,
    kind: Heuristic,
    mut on_step: F,
) -> Result<SearchReport, SearchError>
where
    F: FnMut(&Grid) -> ControlFlow<()>,
{
    if grid.is_empty() {
        return Err(SearchError::EmptyGrid);
    }
    for p in [start, end] {
        if !grid.contains(p) {
            return Err(SearchError::OutOfBounds(p));
        }
    }
    if start == end {
        return Err(SearchError::StartIsEnd(start));
    }
    if !grid.is_passable(start) {
        return Err(SearchError::StartOnBarrier(start));
    }
    if !grid.is_passable(end) {
        return Err(SearchError::EndOnBarrier(end));
    }

    let conn = kind.connectivity();
    let side = grid.side();
    let idx = |p: Point| (p.y * side + p.x) as usize;
    let point = |i: usize| Point::new((i as i32) % side, (i as i32) / side);

    let mut state = SearchState::new(grid.len());
    let mut diagnostics = Diagnostics::default();
    let mut explored = 0usize;

    let start_idx = idx(start);
    let end_idx = idx(end);
    state.g[start_idx] = 0.0;
    state.f[start_idx] = kind.estimate(start, end);
    state.push(start_idx);

    let mut nbuf: Vec<Point> = Vec::with_capacity(8);

    while let Some(entry) = state.open.pop() {
        let ci = entry.idx;
        // A stale duplicate whose priority was superseded while queued.
        if !state.in_open[ci] {
            continue;
        }
        state.in_open[ci] = false;
        explored += 1;

        if ci == end_idx {
            let cost = state.g[end_idx];
            diagnostics.check_admissible(kind, start, end, cost);
            let trace = Trace::new(state.parent, side);
            let path = trace.reconstruct(grid, end, start);
            return Ok(SearchReport {
                result: SearchResult::Found {
                    cost,
                    explored,
                    path,
                    trace,
                },
                diagnostics,
            });
        }

        let cp = point(ci);
        grid.neighbors(cp, conn, &mut nbuf);
        for &np in nbuf.iter() {
            let ni = idx(np);
            let d = np - cp;
            let move_cost = if d.x != 0 && d.y != 0 { SQRT_2 } else { 1.0 };
            let step = move_cost + grid.terrain(np);
            let tentative = state.g[ci] + step;
            if tentative < state.g[ni] {
                diagnostics.check_edge(kind, cp, np, step, end);
                state.parent[ni] = ci;
                state.g[ni] = tentative;
                state.f[ni] = tentative + kind.estimate(np, end);
                if !state.in_open[ni] {
                    state.push(ni);
                    if np != start && np != end {
                        let _ = grid.set_role(np, Role::Frontier);
                    }
                }
            }
        }

        if on_step(grid).is_break() {
            return Ok(SearchReport {
                result: SearchResult::NotFound { explored },
                diagnostics,
            });
        }
        if cp != start {
            let _ = grid.set_role(cp, Role::Visited);
        }
    }

    Ok(SearchReport {
        result: SearchResult::NotFound { explored },
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::is_reachable;
    use crate::diag::EPSILON;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn run(grid: &mut Grid, start: Point, end: Point, kind: Heuristic) -> SearchReport {
        search(grid, start, end, kind, |_| ControlFlow::Continue(())).unwrap()
    }

    fn found(report: &SearchReport) -> (f64, usize, &[Point]) {
        match &report.result {
            SearchResult::Found {
                cost,
                explored,
                path,
                ..
            } => (*cost, *explored, path.as_slice()),
            SearchResult::NotFound { .. } => panic!("expected a path"),
        }
    }

    #[test]
    fn scenario_a_empty_grid_manhattan() {
        let mut g = Grid::new(5);
        let report = run(&mut g, Point::new(0, 0), Point::new(4, 4), Heuristic::Manhattan);
        let (cost, explored, path) = found(&report);
        assert_eq!(cost, 8.0);
        assert!(explored <= 25);
        // Unit cardinal steps: cost equals the number of path edges.
        assert_eq!(path.len(), 8);
        assert_eq!(path[0], Point::new(4, 4));
        assert!(report.diagnostics.is_clean());
    }

    #[test]
    fn scenario_b_wall_with_gap() {
        let mut g = Grid::new(5);
        for x in 0..4 {
            g.toggle_barrier(Point::new(x, 2)).unwrap();
        }
        let report = run(&mut g, Point::new(0, 0), Point::new(4, 4), Heuristic::Manhattan);
        let (cost, _, path) = found(&report);
        assert_eq!(cost, 8.0);
        assert!(path.contains(&Point::new(4, 2)), "path must use the gap");
    }

    #[test]
    fn scenario_c_full_wall_not_found() {
        let mut g = Grid::new(5);
        for x in 0..5 {
            g.toggle_barrier(Point::new(x, 2)).unwrap();
        }
        assert!(!is_reachable(
            &g,
            Point::new(0, 0),
            Point::new(4, 4),
            Heuristic::Manhattan.connectivity()
        ));
        let report = run(&mut g, Point::new(0, 0), Point::new(4, 4), Heuristic::Manhattan);
        match report.result {
            // The reachable component above the wall has exactly 10 cells.
            SearchResult::NotFound { explored } => assert_eq!(explored, 10),
            SearchResult::Found { .. } => panic!("wall should be impassable"),
        }
    }

    #[test]
    fn scenario_d_terrain_detour() {
        let mut g = Grid::new(3);
        g.set_terrain(Point::new(1, 1), 4).unwrap();
        let report = run(&mut g, Point::new(0, 0), Point::new(2, 2), Heuristic::Euclidean);
        let (cost, _, path) = found(&report);
        assert!(!path.contains(&Point::new(1, 1)), "must avoid the costly cell");
        // Around the center: two cardinal steps plus one diagonal.
        assert!((cost - (2.0 + SQRT_2)).abs() < EPSILON);
    }

    #[test]
    fn terrain_applies_on_entry_regardless_of_direction() {
        // 1x3 corridor with a band-2 middle cell: cost 1 + (1 + 2) = 4.
        let mut g = Grid::new(3);
        g.set_terrain(Point::new(1, 0), 2).unwrap();
        let report = run(&mut g, Point::new(0, 0), Point::new(2, 0), Heuristic::Manhattan);
        let (cost, _, _) = found(&report);
        assert_eq!(cost, 4.0);
    }

    #[test]
    fn octile_explores_no_more_than_euclidean() {
        let mut g = Grid::new(10);
        for p in [
            Point::new(4, 2),
            Point::new(4, 3),
            Point::new(4, 4),
            Point::new(5, 6),
            Point::new(6, 6),
            Point::new(2, 7),
        ] {
            g.toggle_barrier(p).unwrap();
        }
        let mut g2 = g.clone();
        let oct = run(&mut g, Point::new(0, 0), Point::new(9, 9), Heuristic::Octile);
        let euc = run(&mut g2, Point::new(0, 0), Point::new(9, 9), Heuristic::Euclidean);
        let (oct_cost, oct_explored, _) = found(&oct);
        let (euc_cost, euc_explored, _) = found(&euc);
        assert!((oct_cost - euc_cost).abs() < EPSILON);
        assert!(
            oct_explored <= euc_explored,
            "tighter heuristic expanded more cells ({oct_explored} > {euc_explored})"
        );
    }

    #[test]
    fn admissibility_diagnostic_never_fires_without_terrain() {
        for kind in [Heuristic::Manhattan, Heuristic::Euclidean, Heuristic::Octile] {
            let mut g = Grid::new(6);
            for p in [Point::new(2, 1), Point::new(2, 2), Point::new(2, 3), Point::new(3, 3)] {
                g.toggle_barrier(p).unwrap();
            }
            let report = run(&mut g, Point::new(0, 0), Point::new(5, 5), kind);
            let (cost, _, _) = found(&report);
            assert!(kind.estimate(Point::new(0, 0), Point::new(5, 5)) <= cost + EPSILON);
            assert!(report.diagnostics.is_clean(), "{kind:?} flagged a violation");
        }
    }

    #[test]
    fn repeated_searches_are_deterministic() {
        let mut g = Grid::new(8);
        for p in [Point::new(3, 0), Point::new(3, 1), Point::new(3, 2), Point::new(5, 5)] {
            g.toggle_barrier(p).unwrap();
        }
        let a = run(&mut g, Point::new(0, 0), Point::new(7, 7), Heuristic::Octile);
        g.clear_marks();
        let b = run(&mut g, Point::new(0, 0), Point::new(7, 7), Heuristic::Octile);
        let (ca, ea, pa) = found(&a);
        let (cb, eb, pb) = found(&b);
        assert_eq!(ca, cb);
        assert_eq!(ea, eb);
        assert_eq!(pa, pb);
    }

    #[test]
    fn trace_reconstruction_is_idempotent() {
        let mut g = Grid::new(5);
        let report = run(&mut g, Point::new(0, 0), Point::new(4, 4), Heuristic::Manhattan);
        let SearchResult::Found { path, trace, .. } = report.result else {
            panic!("expected a path");
        };
        let again = trace.reconstruct(&mut g, Point::new(4, 4), Point::new(0, 0));
        assert_eq!(path, again);
    }

    #[test]
    fn reachability_agrees_with_search_on_random_grids() {
        let start = Point::new(0, 0);
        let end = Point::new(7, 7);
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut g = Grid::new(8);
            for y in 0..8 {
                for x in 0..8 {
                    if rng.random_bool(0.35) {
                        g.toggle_barrier(Point::new(x, y)).unwrap();
                    }
                }
            }
            for p in [start, end] {
                if !g.is_passable(p) {
                    g.toggle_barrier(p).unwrap();
                }
            }
            for kind in [Heuristic::Manhattan, Heuristic::Octile] {
                let reachable = is_reachable(&g, start, end, kind.connectivity());
                let report = run(&mut g, start, end, kind);
                match report.result {
                    SearchResult::Found { .. } => {
                        assert!(reachable, "seed {seed}: found a path while unreachable")
                    }
                    SearchResult::NotFound { .. } => {
                        assert!(!reachable, "seed {seed}: reachable but no path found")
                    }
                }
                g.clear_marks();
            }
        }
    }

    #[test]
    fn preconditions_are_rejected() {
        let cont = |_: &Grid| ControlFlow::Continue(());

        let mut empty = Grid::new(0);
        assert_eq!(
            search(&mut empty, Point::ZERO, Point::new(1, 1), Heuristic::Manhattan, cont)
                .unwrap_err(),
            SearchError::EmptyGrid
        );

        let mut g = Grid::new(4);
        g.toggle_barrier(Point::new(0, 0)).unwrap();
        g.toggle_barrier(Point::new(3, 3)).unwrap();
        assert_eq!(
            search(&mut g, Point::new(9, 9), Point::new(1, 1), Heuristic::Manhattan, cont)
                .unwrap_err(),
            SearchError::OutOfBounds(Point::new(9, 9))
        );
        assert_eq!(
            search(&mut g, Point::new(1, 1), Point::new(1, 1), Heuristic::Manhattan, cont)
                .unwrap_err(),
            SearchError::StartIsEnd(Point::new(1, 1))
        );
        assert_eq!(
            search(&mut g, Point::new(0, 0), Point::new(1, 1), Heuristic::Manhattan, cont)
                .unwrap_err(),
            SearchError::StartOnBarrier(Point::new(0, 0))
        );
        assert_eq!(
            search(&mut g, Point::new(1, 1), Point::new(3, 3), Heuristic::Manhattan, cont)
                .unwrap_err(),
            SearchError::EndOnBarrier(Point::new(3, 3))
        );
    }

    #[test]
    fn cancellation_stops_after_current_cell() {
        let mut g = Grid::new(10);
        let report = search(
            &mut g,
            Point::new(0, 0),
            Point::new(9, 9),
            Heuristic::Manhattan,
            |_| ControlFlow::Break(()),
        )
        .unwrap();
        match report.result {
            SearchResult::NotFound { explored } => assert_eq!(explored, 1),
            SearchResult::Found { .. } => panic!("cancelled search returned a path"),
        }
        // No partial path was reconstructed.
        assert!(g.iter().all(|(_, c)| c.role != Role::Path));
    }

    #[test]
    fn on_step_runs_once_per_popped_cell() {
        let mut g = Grid::new(6);
        let mut steps = 0usize;
        let report = search(
            &mut g,
            Point::new(0, 0),
            Point::new(5, 5),
            Heuristic::Manhattan,
            |_| {
                steps += 1;
                ControlFlow::Continue(())
            },
        )
        .unwrap();
        let (_, explored, _) = found(&report);
        // The goal pop returns before its callback fires.
        assert_eq!(steps, explored - 1);
    }

    #[test]
    fn roles_record_search_progress() {
        let mut g = Grid::new(5);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_end(Point::new(4, 4)).unwrap();
        let report = run(&mut g, Point::new(0, 0), Point::new(4, 4), Heuristic::Manhattan);
        let (_, _, path) = found(&report);
        assert_eq!(g.at(Point::new(0, 0)).unwrap().role, Role::Start);
        assert_eq!(g.at(Point::new(4, 4)).unwrap().role, Role::End);
        for &p in path.iter().skip(1) {
            assert_eq!(g.at(p).unwrap().role, Role::Path);
        }
        assert!(g.iter().any(|(_, c)| c.role == Role::Visited));
    }

    #[test]
    fn corner_cutting_forces_the_long_way_round() {
        // Diagonal doorway sealed by its two flanks: Eight-connectivity
        // must go around, not through.
        let mut g = Grid::new(4);
        g.toggle_barrier(Point::new(1, 0)).unwrap();
        g.toggle_barrier(Point::new(0, 1)).unwrap();
        let report = run(&mut g, Point::new(0, 0), Point::new(3, 3), Heuristic::Octile);
        match report.result {
            SearchResult::NotFound { explored } => assert_eq!(explored, 1),
            SearchResult::Found { .. } => panic!("corner cut through a sealed doorway"),
        }
    }
}
