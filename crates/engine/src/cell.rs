use serde::{Deserialize, Serialize};

/// Content of one grid cell.
///
/// Headers and the label column hold `Label`s; the data rectangle holds
/// `Numeric` values for table potentials and `Symbolic` expressions for
/// function potentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Label(String),
    Numeric(f64),
    Symbolic(String),
}

impl Cell {
    pub fn label(text: impl Into<String>) -> Self {
        Cell::Label(text.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Label(s) | Cell::Symbolic(s) => Some(s),
            _ => None,
        }
    }

    /// Text shown for this cell. Whole numbers print without a decimal point.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Label(s) | Cell::Symbolic(s) => s.clone(),
            Cell::Numeric(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}
