//! Which grid cells the user may edit directly.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::layout::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockReason {
    /// Header row or label column.
    Header,
    /// The state combination is forbidden by a link restriction.
    Restricted,
    /// The column's values come from an uncertainty distribution.
    Uncertain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lock {
    Free,
    Locked(LockReason),
}

impl Lock {
    pub fn is_locked(&self) -> bool {
        matches!(self, Lock::Locked(_))
    }

    /// One-character rendering: `.` free, `H` header, `R` restricted, `U` uncertain.
    pub fn symbol(&self) -> char {
        match self {
            Lock::Free => '.',
            Lock::Locked(LockReason::Header) => 'H',
            Lock::Locked(LockReason::Restricted) => 'R',
            Lock::Locked(LockReason::Uncertain) => 'U',
        }
    }
}

pub type EditabilityMask = Grid<Lock>;

/// Lock mask over the whole grid.
///
/// `restrictions` are full state tuples in variable-space order; each locks
/// its single data cell. `uncertainty_columns` is indexed by grid column
/// (entry 0 is ignored) and locks every data row of a flagged column. A
/// cell both restricted and uncertain reports `Restricted`.
pub fn build_mask(
    restrictions: &[Vec<usize>],
    uncertainty_columns: &[bool],
    layout: &Layout,
) -> Result<EditabilityMask> {
    if uncertainty_columns.len() != layout.cols {
        return Err(GridError::DimensionMismatch {
            what: "uncertainty columns",
            expected: layout.cols,
            found: uncertainty_columns.len(),
        });
    }

    let mut mask = Grid::filled(layout.rows, layout.cols, Lock::Locked(LockReason::Header));
    let data_rows = layout.first_editable_row..=layout.last_editable_row;

    for col in 1..layout.cols {
        let lock = if uncertainty_columns[col] {
            Lock::Locked(LockReason::Uncertain)
        } else {
            Lock::Free
        };
        for row in data_rows.clone() {
            mask.set(row, col, lock)?;
        }
    }

    for tuple in restrictions {
        let coord = layout.cell_for_tuple(tuple)?;
        mask.set(coord.row, coord.col, Lock::Locked(LockReason::Restricted))?;
    }

    Ok(mask)
}
