//! Cell kinds handed to the external leaf/branch cell solver.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Contributes nothing to the solver.
    Null,
    /// Conifer leaf carrying a hydration level of 1..=4.
    ConiferLeaf(u8),
    ConiferBranch,
    /// Radius-1 branch sitting directly on another piece of the same branch.
    ConiferTopBranch,
}

/// Leaf cell per hydration level, index 0 being [`Cell::Null`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafCells([Cell; 5]);

impl LeafCells {
    pub fn conifer() -> Self {
        Self([
            Cell::Null,
            Cell::ConiferLeaf(1),
            Cell::ConiferLeaf(2),
            Cell::ConiferLeaf(3),
            Cell::ConiferLeaf(4),
        ])
    }

    pub fn for_hydration(&self, hydration: u8) -> Cell {
        self.0.get(hydration as usize).copied().unwrap_or(Cell::Null)
    }
}

/// Branch cell for a conifer branch block.
///
/// Only twigs (radius 1) take part in leaf solving; a twig stacked on the
/// same branch is a top branch.
pub fn branch_cell(radius: u32, below_is_same_branch: bool) -> Cell {
    match (radius, below_is_same_branch) {
        (1, true) => Cell::ConiferTopBranch,
        (1, false) => Cell::ConiferBranch,
        _ => Cell::Null,
    }
}
