//! Grid layout of a potential.
//!
//! ```text
//!            col 0      col 1 ..                     col n
//! row 0      parent_1   states of parent_1 (slowest)
//! ..         ..
//! row k-1    parent_k   states of parent_k (fastest)
//! row k      x_{m-1}    values ...
//! ..
//! row k+m-1  x_0        values ...
//! ```
//!
//! One header row per parent, then one data row per conditioned state with
//! state 0 at the bottom. Every data column is one parent block of the
//! codec (`col = block + 1`). Exact potentials carry a single data row
//! labelled with the node's own name.

use potgrid_core::VariableSpace;

use crate::cell::Cell;
use crate::cell_id::{column_id, GridCoord};
use crate::codec::MixedRadixCodec;
use crate::error::{GridError, Result};
use crate::grid::Grid;

/// Shape and headers of the grid for one potential.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    pub first_editable_row: usize,
    pub last_editable_row: usize,
    /// Spreadsheet id of every grid column, label column included.
    pub column_ids: Vec<String>,
    pub is_exact: bool,
    space: VariableSpace,
    codec: MixedRadixCodec,
}

/// Compute the layout for `space`.
///
/// `is_exact` selects the single-row layout of exact potentials, which hold
/// one value per parent configuration.
pub fn build_layout(space: &VariableSpace, is_exact: bool) -> Result<Layout> {
    let codec = MixedRadixCodec::for_space(space)?;

    let first_editable_row = space.parents().len();
    let data_rows = if is_exact { 1 } else { codec.conditioned_states() };
    let rows = first_editable_row + data_rows;
    let cols = 1 + codec.blocks();

    Ok(Layout {
        rows,
        cols,
        first_editable_row,
        last_editable_row: rows - 1,
        column_ids: (0..cols).map(column_id).collect(),
        is_exact,
        space: space.clone(),
        codec,
    })
}

impl Layout {
    pub fn space(&self) -> &VariableSpace {
        &self.space
    }

    pub fn codec(&self) -> &MixedRadixCodec {
        &self.codec
    }

    /// Number of value columns (everything but the label column).
    pub fn data_columns(&self) -> usize {
        self.cols - 1
    }

    pub fn data_rows(&self) -> usize {
        self.last_editable_row - self.first_editable_row + 1
    }

    /// Length of the tensor this layout displays.
    pub fn tensor_len(&self) -> usize {
        if self.is_exact {
            self.codec.blocks()
        } else {
            self.codec.size()
        }
    }

    pub fn is_data_cell(&self, row: usize, col: usize) -> bool {
        (self.first_editable_row..=self.last_editable_row).contains(&row)
            && (1..self.cols).contains(&col)
    }

    /// Columns spanned by one state of the parent shown in `header_row`:
    /// the product of the state counts of every later parent.
    pub fn repetition(&self, header_row: usize) -> Result<usize> {
        let parents = &self.codec.radices()[1..];
        if header_row >= parents.len() {
            return Err(GridError::OutOfRange {
                what: "header row",
                index: header_row,
                bound: parents.len(),
            });
        }
        Ok(parents[header_row + 1..].iter().product())
    }

    /// State of the parent in `header_row` shown above data column `col`.
    pub fn header_state(&self, header_row: usize, col: usize) -> Result<usize> {
        self.check_data_column(col)?;
        let repetition = self.repetition(header_row)?;
        let states = self.codec.radices()[header_row + 1];
        Ok(((col - 1) / repetition) % states)
    }

    /// Conditioned-variable state displayed in data row `row`.
    ///
    /// Exact layouts have no conditioned dimension and report state 0.
    pub fn state_for_row(&self, row: usize) -> Result<usize> {
        self.check_data_row(row)?;
        if self.is_exact {
            return Ok(0);
        }
        Ok((self.last_editable_row - row) % self.codec.conditioned_states())
    }

    /// Data row of a conditioned-variable state (bottom-up).
    pub fn row_for_state(&self, state: usize) -> Result<usize> {
        let states = self.codec.conditioned_states();
        if state >= states {
            return Err(GridError::OutOfRange { what: "state", index: state, bound: states });
        }
        if self.is_exact {
            return Ok(self.first_editable_row);
        }
        Ok(self.last_editable_row - state)
    }

    /// Tensor position shown at data cell `(row, col)`.
    pub fn position_at(&self, row: usize, col: usize) -> Result<usize> {
        self.check_data_column(col)?;
        let x = self.state_for_row(row)?;
        let block = col - 1;
        if self.is_exact {
            return Ok(block);
        }
        let mut configuration = Vec::with_capacity(self.codec.radices().len());
        configuration.push(x);
        configuration.extend(self.codec.parent_states_of(block)?);
        self.codec.position_of(&configuration)
    }

    /// Data cell showing tensor `position`. Inverse of [`position_at`](Self::position_at).
    pub fn cell_of_position(&self, position: usize) -> Result<GridCoord> {
        let len = self.tensor_len();
        if position >= len {
            return Err(GridError::OutOfRange { what: "position", index: position, bound: len });
        }
        if self.is_exact {
            return Ok(GridCoord::new(self.first_editable_row, position + 1));
        }
        let states = self.codec.conditioned_states();
        let row = self.row_for_state(position % states)?;
        Ok(GridCoord::new(row, position / states + 1))
    }

    /// Data cell of a full state tuple given in variable-space order.
    pub fn cell_for_tuple(&self, tuple: &[usize]) -> Result<GridCoord> {
        let position = self.codec.position_of(tuple)?;
        let row = self.row_for_state(tuple[0])?;
        let col = position / self.codec.conditioned_states() + 1;
        Ok(GridCoord::new(row, col))
    }

    /// An empty grid with headers and labels filled in; data cells are `Empty`.
    pub fn blank_grid(&self) -> Grid<Cell> {
        let mut grid: Grid<Cell> = Grid::new(self.rows, self.cols);

        for (r, parent) in self.space.parents().iter().enumerate() {
            put(&mut grid, r, 0, Cell::label(parent.name()));
            let repetition: usize = self.codec.radices()[r + 2..].iter().product();
            for col in 1..self.cols {
                let state = ((col - 1) / repetition) % parent.state_count();
                let name = parent.state_name(state).unwrap_or_default();
                put(&mut grid, r, col, Cell::label(name));
            }
        }

        // build_layout rejected empty spaces, so a conditioned variable exists
        if let Some(conditioned) = self.space.conditioned() {
            if self.is_exact {
                put(&mut grid, self.first_editable_row, 0, Cell::label(conditioned.name()));
            } else {
                for (state, name) in conditioned.states().iter().enumerate() {
                    put(&mut grid, self.last_editable_row - state, 0, Cell::label(name.as_str()));
                }
            }
        }

        grid
    }

    fn check_data_column(&self, col: usize) -> Result<()> {
        if col == 0 || col >= self.cols {
            return Err(GridError::InvalidColumn { col, cols: self.cols });
        }
        Ok(())
    }

    fn check_data_row(&self, row: usize) -> Result<()> {
        if row < self.first_editable_row || row > self.last_editable_row {
            return Err(GridError::OutOfRange { what: "row", index: row, bound: self.rows });
        }
        Ok(())
    }
}

fn put(grid: &mut Grid<Cell>, row: usize, col: usize, cell: Cell) {
    if let Some(slot) = grid.get_mut(row, col) {
        *slot = cell;
    }
}
