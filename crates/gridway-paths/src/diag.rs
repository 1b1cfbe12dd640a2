//! Advisory heuristic quality checks run alongside a search.
//!
//! Violations are reported (counted and logged) but never alter the search
//! result or control flow.

use gridway_core::Point;

use crate::heuristic::Heuristic;

/// Tolerance for floating-point comparisons in the heuristic checks.
pub const EPSILON: f64 = 1e-5;

/// Findings of the inline heuristic checks for one search.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Relaxed edges on which the triangle inequality failed.
    pub inconsistent_edges: usize,
    /// Whether the start estimate overshot the found path cost.
    pub inadmissible: bool,
}

impl Diagnostics {
    /// Whether no check fired during the search.
    pub fn is_clean(&self) -> bool {
        self.inconsistent_edges == 0 && !self.inadmissible
    }

    /// Consistency check for one relaxed edge `from -> to` with the given
    /// step cost (move cost plus terrain).
    pub(crate) fn check_edge(
        &mut self,
        kind: Heuristic,
        from: Point,
        to: Point,
        step_cost: f64,
        goal: Point,
    ) {
        if kind.estimate(from, goal) > step_cost + kind.estimate(to, goal) + EPSILON {
            self.inconsistent_edges += 1;
            log::warn!("{kind:?} heuristic inconsistent at edge {from} -> {to}");
        }
    }

    /// Admissibility check, run once when a path has been found.
    pub(crate) fn check_admissible(
        &mut self,
        kind: Heuristic,
        start: Point,
        goal: Point,
        path_cost: f64,
    ) {
        if kind.estimate(start, goal) > path_cost + EPSILON {
            self.inadmissible = true;
            log::warn!(
                "{kind:?} heuristic not admissible: estimate {} exceeds path cost {}",
                kind.estimate(start, goal),
                path_cost
            );
        }
    }
}
