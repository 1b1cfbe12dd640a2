//! Heuristic estimates of remaining cost between two grid coordinates.

use gridway_core::{Connectivity, Point};

/// Manhattan (L1) distance between two points.
///
/// Admissible only when movement is restricted to the four cardinal
/// directions with unit cost.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as f64
}

/// Euclidean (L2) distance between two points.
///
/// Admissible under any connectivity; underestimates on 8-connected grids
/// where diagonals cost sqrt(2).
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Octile distance between two points.
///
/// Exactly the true cost on an unweighted 8-connected grid with unit
/// cardinal and sqrt(2) diagonal steps — admissible and tight absent
/// terrain cost.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x).abs() as f64;
    let dy = (a.y - b.y).abs() as f64;
    dx.max(dy) + (std::f64::consts::SQRT_2 - 1.0) * dx.min(dy)
}

/// Which metric a search uses to estimate remaining cost.
///
/// The choice also fixes the connectivity pattern: `Manhattan` is only
/// admissible for cardinal movement, so it restricts the search to
/// 4-connectivity; the other two enable diagonal moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    Manhattan,
    Euclidean,
    Octile,
}

impl Heuristic {
    /// Estimated remaining cost from `a` to `b`. Pure and total.
    #[inline]
    pub fn estimate(self, a: Point, b: Point) -> f64 {
        match self {
            Self::Manhattan => manhattan(a, b),
            Self::Euclidean => euclidean(a, b),
            Self::Octile => octile(a, b),
        }
    }

    /// The connectivity pattern this metric is admissible for.
    #[inline]
    pub fn connectivity(self) -> Connectivity {
        match self {
            Self::Manhattan => Connectivity::Four,
            Self::Euclidean | Self::Octile => Connectivity::Eight,
        }
    }
}
