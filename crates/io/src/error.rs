use std::fmt;

use potgrid_engine::GridError;

#[derive(Debug)]
pub enum IoError {
    /// File read/write error.
    Io(String),
    /// JSON parse or serialization error.
    Json(String),
    /// TOML parse or serialization error.
    Toml(String),
    /// CSV read/write error, or a cell that cannot be parsed.
    Csv(String),
    /// Document is well-formed but inconsistent (unknown variable, etc.).
    Document(String),
    /// The projection engine rejected the document's data.
    Grid(GridError),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::Toml(msg) => write!(f, "TOML error: {msg}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Document(msg) => write!(f, "invalid document: {msg}"),
            Self::Grid(e) => write!(f, "grid error: {e}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for IoError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<::csv::Error> for IoError {
    fn from(e: ::csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
