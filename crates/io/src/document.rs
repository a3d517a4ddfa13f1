//! Potential documents: one node's variables, values and lock annotations.
//!
//! ```json
//! {
//!   "variables": [
//!     { "name": "X", "states": ["absent", "present"] },
//!     { "name": "Y", "states": ["low", "high"] }
//!   ],
//!   "exact": false,
//!   "values": [0.1, 0.9, 0.4, 0.6],
//!   "restrictions": [[1, 0]],
//!   "uncertain": [{ "Y": 1 }]
//! }
//! ```
//!
//! `values` holds numbers for table potentials and strings for expression
//! potentials. `restrictions` are full state tuples (conditioned first).
//! Each `uncertain` entry is a parent configuration by state index; every
//! column consistent with it carries uncertainty. An entry naming only
//! some parents matches several columns.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use potgrid_core::{Configuration, Variable, VariableSpace};
use potgrid_engine::{
    build_layout, build_mask, configuration_for_column, Cell, EditabilityMask, Grid, GridError,
    Layout, Tensor, ValueProjector,
};
use serde::{Deserialize, Serialize};

use crate::error::IoError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub exact: bool,
    pub values: Values,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uncertain: Vec<BTreeMap<String, usize>>,
}

/// Tensor values of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Values {
    Numeric(Vec<f64>),
    Symbolic(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Numeric,
    Symbolic,
}

impl Values {
    pub fn len(&self) -> usize {
        match self {
            Values::Numeric(v) => v.len(),
            Values::Symbolic(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Values::Numeric(_) => ValueKind::Numeric,
            Values::Symbolic(_) => ValueKind::Symbolic,
        }
    }
}

/// A document projected onto its grid.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub layout: Layout,
    pub grid: Grid<Cell>,
    pub mask: EditabilityMask,
}

impl Document {
    pub fn from_json_str(s: &str) -> Result<Self, IoError> {
        let doc: Self = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, IoError> {
        let doc: Self = toml::from_str(s).map_err(|e| IoError::Toml(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn space(&self) -> VariableSpace {
        VariableSpace::new(self.variables.clone())
    }

    pub fn layout(&self) -> Result<Layout, IoError> {
        Ok(build_layout(&self.space(), self.exact)?)
    }

    /// Same document with new values (after a grid edit).
    pub fn with_values(&self, values: Values) -> Self {
        Self {
            values,
            ..self.clone()
        }
    }

    /// Check what the engine cannot: duplicate names, `uncertain` entries
    /// naming variables that are not parents, and non-finite numbers. The
    /// value count is checked here as well, before a layout sized by the
    /// variables is ever built.
    pub fn validate(&self) -> Result<(), IoError> {
        for (i, v) in self.variables.iter().enumerate() {
            if self.variables[..i].iter().any(|w| w.name == v.name) {
                return Err(IoError::Document(format!("duplicate variable '{}'", v.name)));
            }
        }

        let space = self.space();
        for entry in &self.uncertain {
            for (name, &state) in entry {
                let parent = space
                    .parents()
                    .iter()
                    .find(|p| &p.name == name)
                    .ok_or_else(|| IoError::Document(format!("uncertain: '{name}' is not a parent variable")))?;
                if state >= parent.state_count() {
                    return Err(IoError::Document(format!(
                        "uncertain: state {state} out of range for '{name}' ({} states)",
                        parent.state_count()
                    )));
                }
            }
        }

        if let Values::Numeric(values) = &self.values {
            if let Some(position) = values.iter().position(|v| !v.is_finite()) {
                return Err(IoError::Document(format!("values[{position}] is not a finite number")));
            }
        }

        self.check_value_count(&space)
    }

    /// Empty spaces and zero-state variables are left for the engine to
    /// report as `EmptyPotential`.
    fn check_value_count(&self, space: &VariableSpace) -> Result<(), IoError> {
        if space.is_empty() || space.variables().iter().any(|v| v.state_count() == 0) {
            return Ok(());
        }
        let expected = if self.exact {
            space.parent_configurations()
        } else {
            space.tensor_size()
        };
        let expected = expected.ok_or(GridError::TooLarge { what: "tensor size" })?;
        if expected != self.values.len() {
            return Err(GridError::DimensionMismatch {
                what: "tensor length",
                expected,
                found: self.values.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Flag every grid column whose parent configuration matches an
    /// `uncertain` entry. Indexed by grid column; entry 0 is always false.
    pub fn uncertainty_columns(&self, layout: &Layout) -> Result<Vec<bool>, IoError> {
        let mut flags = vec![false; layout.cols];
        if self.uncertain.is_empty() {
            return Ok(flags);
        }
        for (col, flag) in flags.iter_mut().enumerate().skip(1) {
            let configuration = configuration_for_column(col, layout)?;
            *flag = self.uncertain.iter().any(|entry| matches_entry(&configuration, entry));
        }
        Ok(flags)
    }
}

fn matches_entry(configuration: &Configuration, entry: &BTreeMap<String, usize>) -> bool {
    entry
        .iter()
        .all(|(name, &state)| configuration.get(name) == Some(state))
}

/// Project `doc` with `projector`: grid values plus lock mask.
pub fn render(doc: &Document, projector: &ValueProjector) -> Result<Rendered, IoError> {
    let layout = doc.layout()?;
    let grid = match &doc.values {
        Values::Numeric(v) => projector.fill_grid(&Tensor::new(v.clone()), &layout)?,
        Values::Symbolic(v) => projector.fill_grid(&Tensor::new(v.clone()), &layout)?,
    };
    let uncertain = doc.uncertainty_columns(&layout)?;
    let mask = build_mask(&doc.restrictions, &uncertain, &layout)?;

    log::debug!(
        "rendered {}x{} grid ({} restrictions, {} uncertain columns)",
        layout.rows,
        layout.cols,
        doc.restrictions.len(),
        uncertain.iter().filter(|&&u| u).count()
    );

    Ok(Rendered { layout, grid, mask })
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"))
}

/// Load a document; `.toml` files are TOML, everything else JSON.
pub fn load_document(path: &Path) -> Result<Document, IoError> {
    let content = fs::read_to_string(path).map_err(|e| IoError::Io(format!("{}: {e}", path.display())))?;
    log::debug!("loading document {}", path.display());
    if is_toml(path) {
        Document::from_toml_str(&content)
    } else {
        Document::from_json_str(&content)
    }
}

/// Save a document in the format implied by the extension.
pub fn save_document(doc: &Document, path: &Path) -> Result<(), IoError> {
    let content = if is_toml(path) {
        toml::to_string_pretty(doc).map_err(|e| IoError::Toml(e.to_string()))?
    } else {
        serde_json::to_string_pretty(doc)?
    };
    fs::write(path, content).map_err(|e| IoError::Io(format!("{}: {e}", path.display())))?;
    log::debug!("saved document {}", path.display());
    Ok(())
}
