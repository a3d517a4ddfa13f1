// CSV/TSV export and re-import of projected grids

use std::io::{Read, Write};
use std::path::Path;

use potgrid_engine::{extract_grid, Cell, Grid, GridCoord, Layout};

use crate::document::{ValueKind, Values};
use crate::error::IoError;

/// Write `grid` as delimited text, one record per grid row. With
/// `include_column_ids` the first record holds the spreadsheet column ids.
pub fn export<W: Write>(
    grid: &Grid<Cell>,
    layout: &Layout,
    writer: W,
    delimiter: u8,
    include_column_ids: bool,
) -> Result<(), IoError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    if include_column_ids {
        writer.write_record(&layout.column_ids)?;
    }
    for row in grid.iter_rows() {
        writer.write_record(row.iter().map(Cell::display))?;
    }

    writer.flush()?;
    Ok(())
}

/// Read an edited grid back into tensor values of the given kind.
///
/// Only the data rectangle is read; headers and labels come from `layout`.
/// A leading record equal to the column ids is skipped.
pub fn import<R: Read>(reader: R, layout: &Layout, delimiter: u8, kind: ValueKind) -> Result<Values, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }
    if records
        .first()
        .is_some_and(|r| r.iter().eq(layout.column_ids.iter().map(String::as_str)))
    {
        records.remove(0);
    }
    if records.len() != layout.rows {
        return Err(IoError::Csv(format!(
            "expected {} rows, found {}",
            layout.rows,
            records.len()
        )));
    }

    let mut grid = layout.blank_grid();
    for row in layout.first_editable_row..=layout.last_editable_row {
        for col in 1..layout.cols {
            let field = records[row].get(col).unwrap_or("").trim();
            let cell = match kind {
                ValueKind::Numeric => {
                    let coord = GridCoord::new(row, col);
                    let n: f64 = field
                        .parse()
                        .map_err(|_| IoError::Csv(format!("cell {coord}: cannot parse number '{field}'")))?;
                    if !n.is_finite() {
                        return Err(IoError::Csv(format!("cell {coord}: '{field}' is not a finite number")));
                    }
                    Cell::Numeric(n)
                }
                ValueKind::Symbolic => Cell::Symbolic(field.to_string()),
            };
            grid.set(row, col, cell)?;
        }
    }

    log::debug!("imported {} data cells", layout.data_rows() * layout.data_columns());

    Ok(match kind {
        ValueKind::Numeric => Values::Numeric(extract_grid::<f64>(&grid, layout)?.into_values()),
        ValueKind::Symbolic => Values::Symbolic(extract_grid::<String>(&grid, layout)?.into_values()),
    })
}

/// [`import`] from a file, detecting the delimiter when none is given.
pub fn import_file(path: &Path, layout: &Layout, delimiter: Option<u8>, kind: ValueKind) -> Result<Values, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(&content));
    import(content.as_bytes(), layout, delimiter, kind)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (grids edited in Excel often come back as Windows-1252)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path).map_err(|e| IoError::Io(format!("{}: {e}", path.display())))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            log::warn!("{} is not UTF-8; decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
