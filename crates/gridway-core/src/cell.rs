//! The [`Cell`] type and its [`Role`] state.
//!
//! A cell's role is the single source of truth for what the cell currently
//! is: passability is derived from it, and any color mapping belongs to the
//! rendering collaborator, not here.

/// What a cell currently is, both topologically and for observers.
///
/// `Barrier` is the only role that affects search correctness (it makes the
/// cell impassable). `Frontier`, `Visited` and `Path` are observability
/// marks written during a search so a renderer can show progress; they never
/// feed back into the algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Ordinary traversable cell.
    #[default]
    Free,
    /// Impassable cell.
    Barrier,
    /// The unique search origin.
    Start,
    /// The unique search goal.
    End,
    /// Member of the reconstructed shortest path.
    Path,
    /// Currently in the open set of an in-flight search.
    Frontier,
    /// Expanded (popped) by an in-flight search.
    Visited,
}

impl Role {
    /// Whether a search may enter a cell with this role.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Role::Barrier)
    }

    /// Whether this role is a transient search mark (`Frontier`, `Visited`
    /// or `Path`) rather than topology or an endpoint.
    #[inline]
    pub const fn is_mark(self) -> bool {
        matches!(self, Role::Path | Role::Frontier | Role::Visited)
    }
}

/// A single grid cell: its current [`Role`] plus an additive terrain cost
/// paid when a search enters it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub role: Role,
    /// Extra cost for entering this cell. Non-negative; 0 for plain ground.
    pub terrain: f64,
}

impl Cell {
    /// Whether a search may enter this cell.
    #[inline]
    pub const fn is_passable(&self) -> bool {
        self.role.is_passable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barrier_is_the_only_impassable_role() {
        for role in [
            Role::Free,
            Role::Start,
            Role::End,
            Role::Path,
            Role::Frontier,
            Role::Visited,
        ] {
            assert!(role.is_passable(), "{role:?} should be passable");
        }
        assert!(!Role::Barrier.is_passable());
    }

    #[test]
    fn default_cell_is_free_ground() {
        let c = Cell::default();
        assert_eq!(c.role, Role::Free);
        assert_eq!(c.terrain, 0.0);
        assert!(c.is_passable());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn cell_round_trip() {
        let c = Cell {
            role: Role::Frontier,
            terrain: 3.0,
        };
        let json = serde_json::to_string(&c).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
