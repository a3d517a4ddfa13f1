//! Copying values between a flat tensor and the grid.
//!
//! One code path serves numeric tables and symbolic (expression) tables;
//! the value kind is the `T` of [`Tensor<T>`].

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::layout::Layout;
use crate::rounding::Rounding;

/// A value a potential's tensor can hold.
pub trait PotentialValue: Sized {
    /// Cell shown for this value. Only numeric values are rounded.
    fn to_cell(&self, rounding: Option<&Rounding>) -> Cell;

    /// Read a value back from a data cell; `None` if the variant does not fit.
    fn from_cell(cell: &Cell) -> Option<Self>;
}

impl PotentialValue for f64 {
    fn to_cell(&self, rounding: Option<&Rounding>) -> Cell {
        Cell::Numeric(rounding.map_or(*self, |r| r.round(*self)))
    }

    fn from_cell(cell: &Cell) -> Option<Self> {
        cell.as_number()
    }
}

impl PotentialValue for String {
    fn to_cell(&self, _rounding: Option<&Rounding>) -> Cell {
        Cell::Symbolic(self.clone())
    }

    fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Symbolic(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Flat values of a potential in codec order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tensor<T> {
    values: Vec<T>,
}

impl<T> Tensor<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.values.get(position)
    }

    pub fn set(&mut self, position: usize, value: T) -> Result<()> {
        let len = self.values.len();
        match self.values.get_mut(position) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(GridError::OutOfRange { what: "position", index: position, bound: len }),
        }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T> From<Vec<T>> for Tensor<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

/// Fills grids from tensors and reads them back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueProjector {
    rounding: Option<Rounding>,
}

impl Default for ValueProjector {
    fn default() -> Self {
        Self {
            rounding: Some(Rounding::default()),
        }
    }
}

impl ValueProjector {
    pub fn new(rounding: Option<Rounding>) -> Self {
        Self { rounding }
    }

    /// A projector that copies numbers unchanged.
    pub fn exact() -> Self {
        Self { rounding: None }
    }

    pub fn rounding(&self) -> Option<&Rounding> {
        self.rounding.as_ref()
    }

    /// Layout headers plus every tensor value at its data cell.
    pub fn fill_grid<T: PotentialValue>(&self, tensor: &Tensor<T>, layout: &Layout) -> Result<Grid<Cell>> {
        check_tensor_len(tensor.len(), layout)?;

        let mut grid = layout.blank_grid();
        for col in 1..layout.cols {
            for row in layout.first_editable_row..=layout.last_editable_row {
                let position = layout.position_at(row, col)?;
                let value = &tensor.values[position];
                grid.set(row, col, value.to_cell(self.rounding.as_ref()))?;
            }
        }
        Ok(grid)
    }

    /// Rebuild the tensor from the data cells of `grid`.
    ///
    /// Header and label cells are ignored; every data cell must hold the
    /// variant matching `T`.
    pub fn extract_grid<T: PotentialValue>(&self, grid: &Grid<Cell>, layout: &Layout) -> Result<Tensor<T>> {
        if grid.rows() != layout.rows {
            return Err(GridError::DimensionMismatch {
                what: "grid rows",
                expected: layout.rows,
                found: grid.rows(),
            });
        }
        if grid.cols() != layout.cols {
            return Err(GridError::DimensionMismatch {
                what: "grid columns",
                expected: layout.cols,
                found: grid.cols(),
            });
        }

        let len = layout.tensor_len();
        let mut values = Vec::with_capacity(len);
        for position in 0..len {
            let coord = layout.cell_of_position(position)?;
            let value = grid
                .get(coord.row, coord.col)
                .and_then(T::from_cell)
                .ok_or(GridError::UnexpectedCell { row: coord.row, col: coord.col })?;
            values.push(value);
        }
        Ok(Tensor::new(values))
    }
}

/// [`ValueProjector::fill_grid`] with default rounding.
pub fn fill_grid<T: PotentialValue>(tensor: &Tensor<T>, layout: &Layout) -> Result<Grid<Cell>> {
    ValueProjector::default().fill_grid(tensor, layout)
}

/// [`ValueProjector::extract_grid`]; extraction never rounds.
pub fn extract_grid<T: PotentialValue>(grid: &Grid<Cell>, layout: &Layout) -> Result<Tensor<T>> {
    ValueProjector::default().extract_grid(grid, layout)
}

fn check_tensor_len(found: usize, layout: &Layout) -> Result<()> {
    let expected = layout.tensor_len();
    if found != expected {
        return Err(GridError::DimensionMismatch { what: "tensor length", expected, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_layout;
    use potgrid_core::{Variable, VariableSpace};

    fn xy_space() -> VariableSpace {
        VariableSpace::from_parts(
            Variable::new("X", ["x0", "x1"]),
            vec![Variable::new("Y", ["y0", "y1"])],
        )
    }

    #[test]
    fn test_two_by_two_scenario() {
        let layout = build_layout(&xy_space(), false).unwrap();
        let tensor = Tensor::new(vec![0.1, 0.9, 0.4, 0.6]);
        let grid = fill_grid(&tensor, &layout).unwrap();

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        // upper data row is X=1, bottom row is X=0
        assert_eq!(grid.get(1, 0), Some(&Cell::label("x1")));
        assert_eq!(grid.get(2, 0), Some(&Cell::label("x0")));
        assert_eq!(grid.get(0, 1), Some(&Cell::label("y0")));
        assert_eq!(grid.get(0, 2), Some(&Cell::label("y1")));
        assert_eq!(grid.get(1, 1), Some(&Cell::Numeric(0.9)));
        assert_eq!(grid.get(2, 1), Some(&Cell::Numeric(0.1)));
        assert_eq!(grid.get(1, 2), Some(&Cell::Numeric(0.6)));
        assert_eq!(grid.get(2, 2), Some(&Cell::Numeric(0.4)));

        let back: Tensor<f64> = extract_grid(&grid, &layout).unwrap();
        assert_eq!(back, tensor);
    }

    #[test]
    fn test_fill_rounds_by_default() {
        let space = VariableSpace::from_parts(Variable::new("X", ["a", "b"]), vec![]);
        let layout = build_layout(&space, false).unwrap();
        let tensor = Tensor::new(vec![0.1 + 0.2, 0.7]);

        let rounded = fill_grid(&tensor, &layout).unwrap();
        assert_eq!(rounded.get(1, 1), Some(&Cell::Numeric(0.3)));

        let raw = ValueProjector::exact().fill_grid(&tensor, &layout).unwrap();
        assert_eq!(raw.get(1, 1), Some(&Cell::Numeric(0.1 + 0.2)));
    }

    #[test]
    fn test_symbolic_values() {
        let layout = build_layout(&xy_space(), true).unwrap();
        let tensor = Tensor::new(vec!["Y + 1".to_string(), "2 * Y".to_string()]);
        let grid = fill_grid(&tensor, &layout).unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.get(1, 0), Some(&Cell::label("X")));
        assert_eq!(grid.get(1, 1), Some(&Cell::Symbolic("Y + 1".into())));
        assert_eq!(grid.get(1, 2), Some(&Cell::Symbolic("2 * Y".into())));

        let back: Tensor<String> = extract_grid(&grid, &layout).unwrap();
        assert_eq!(back, tensor);
    }

    #[test]
    fn test_tensor_length_checked() {
        let layout = build_layout(&xy_space(), false).unwrap();
        let err = fill_grid(&Tensor::new(vec![0.5; 3]), &layout).unwrap_err();
        assert_eq!(err, GridError::DimensionMismatch { what: "tensor length", expected: 4, found: 3 });
    }

    #[test]
    fn test_extract_rejects_wrong_cell() {
        let layout = build_layout(&xy_space(), false).unwrap();
        let mut grid = fill_grid(&Tensor::new(vec![0.1, 0.9, 0.4, 0.6]), &layout).unwrap();
        grid.set(2, 2, Cell::Symbolic("oops".into())).unwrap();
        let err = extract_grid::<f64>(&grid, &layout).unwrap_err();
        assert_eq!(err, GridError::UnexpectedCell { row: 2, col: 2 });

        grid.set(2, 2, Cell::Empty).unwrap();
        assert!(extract_grid::<f64>(&grid, &layout).is_err());
    }

    #[test]
    fn test_extract_checks_shape() {
        let layout = build_layout(&xy_space(), false).unwrap();
        let grid: Grid<Cell> = Grid::new(3, 4);
        let err = extract_grid::<f64>(&grid, &layout).unwrap_err();
        assert_eq!(err, GridError::DimensionMismatch { what: "grid columns", expected: 3, found: 4 });
    }

    #[test]
    fn test_tensor_set() {
        let mut tensor = Tensor::new(vec![0.0, 1.0]);
        tensor.set(1, 0.5).unwrap();
        assert_eq!(tensor.get(1), Some(&0.5));
        assert_eq!(
            tensor.set(2, 0.5),
            Err(GridError::OutOfRange { what: "position", index: 2, bound: 2 })
        );
    }
}
