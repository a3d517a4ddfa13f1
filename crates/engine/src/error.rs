use std::fmt;

/// Errors reported by the projection engine.
///
/// Every operation returns one of these instead of substituting a default;
/// presenting a "no data" state is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No variables, or a variable without states.
    EmptyPotential,
    /// An index or state lies outside `[0, bound)`.
    OutOfRange {
        what: &'static str,
        index: usize,
        bound: usize,
    },
    /// Column 0 (labels) or a column past the grid was asked for a configuration.
    InvalidColumn { col: usize, cols: usize },
    /// A length does not match the one implied by the variable space.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A data cell holds a variant the tensor kind cannot take.
    UnexpectedCell { row: usize, col: usize },
    /// The product of the state counts does not fit in `usize`.
    TooLarge { what: &'static str },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPotential => write!(f, "potential has no variables or a variable has no states"),
            Self::OutOfRange { what, index, bound } => {
                write!(f, "{what} {index} out of range (must be < {bound})")
            }
            Self::InvalidColumn { col, cols } => {
                write!(f, "column {col} is not a data column (valid: 1..{cols})")
            }
            Self::DimensionMismatch { what, expected, found } => {
                write!(f, "{what}: expected {expected}, found {found}")
            }
            Self::UnexpectedCell { row, col } => {
                let coord = crate::cell_id::GridCoord::new(*row, *col);
                write!(f, "cell {coord} does not hold a value of the potential's kind")
            }
            Self::TooLarge { what } => write!(f, "{what} does not fit in memory addressing"),
        }
    }
}

impl std::error::Error for GridError {}

pub type Result<T> = std::result::Result<T, GridError>;
