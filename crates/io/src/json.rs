// JSON export

use std::io::Write;

use potgrid_engine::{Cell, Grid};

use crate::error::IoError;

/// Export a grid as a JSON array of arrays of display strings.
pub fn export<W: Write>(grid: &Grid<Cell>, writer: W) -> Result<(), IoError> {
    let rows: Vec<Vec<String>> = grid
        .iter_rows()
        .map(|row| row.iter().map(Cell::display).collect())
        .collect();

    serde_json::to_writer_pretty(writer, &rows)?;
    Ok(())
}
