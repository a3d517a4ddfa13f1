//! Grid columns as parent configurations (evidence).

use potgrid_core::Configuration;

use crate::error::{GridError, Result};
use crate::layout::Layout;

/// Parent configuration represented by data column `col`.
///
/// Decodes the position of the column's top data row and drops the
/// conditioned variable's state.
pub fn configuration_for_column(col: usize, layout: &Layout) -> Result<Configuration> {
    configuration_for_cell(layout.first_editable_row, col, layout)
}

/// Parent configuration of any data cell; the same for every row of a column.
pub fn configuration_for_cell(row: usize, col: usize, layout: &Layout) -> Result<Configuration> {
    if col == 0 || col >= layout.cols {
        return Err(GridError::InvalidColumn { col, cols: layout.cols });
    }
    let position = layout.position_at(row, col)?;
    let codec = layout.codec();
    let parent_states = if layout.is_exact {
        codec.parent_states_of(position)?
    } else {
        codec.configuration_of(position)?.split_off(1)
    };

    let mut configuration = Configuration::new();
    for (parent, state) in layout.space().parents().iter().zip(parent_states) {
        configuration.assign(parent.name(), state);
    }
    Ok(configuration)
}

/// Data column showing `configuration`. Inverse of [`configuration_for_column`].
///
/// Every parent must be assigned; assignments to other variables are ignored.
pub fn column_for_configuration(configuration: &Configuration, layout: &Layout) -> Result<usize> {
    let parents = layout.space().parents();
    let states = parents
        .iter()
        .map(|p| configuration.get(p.name()))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| GridError::DimensionMismatch {
            what: "assigned parents",
            expected: parents.len(),
            found: parents.iter().filter(|p| configuration.get(p.name()).is_some()).count(),
        })?;
    Ok(layout.codec().block_of(&states)? + 1)
}
