use serde::{Deserialize, Serialize};

/// A discrete variable: a name and its ordered list of states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub states: Vec<String>,
}

impl Variable {
    pub fn new<I, S>(name: impl Into<String>, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            states: states.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn state_name(&self, index: usize) -> Option<&str> {
        self.states.get(index).map(String::as_str)
    }

    /// Index of a state by name (case-sensitive).
    pub fn state_index(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|s| s == name)
    }
}

/// Ordered variables of one potential: `[conditioned, parent_1, ..., parent_k]`.
///
/// The conditioned variable is always at index 0. The space itself accepts
/// any shape; the engine rejects empty spaces and zero-state variables when
/// a layout is built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableSpace {
    variables: Vec<Variable>,
}

impl VariableSpace {
    pub fn new(variables: Vec<Variable>) -> Self {
        Self { variables }
    }

    /// Build a space from the conditioned variable and its parents.
    pub fn from_parts(conditioned: Variable, parents: Vec<Variable>) -> Self {
        let mut variables = Vec::with_capacity(parents.len() + 1);
        variables.push(conditioned);
        variables.extend(parents);
        Self { variables }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn conditioned(&self) -> Option<&Variable> {
        self.variables.first()
    }

    /// Parent variables in declaration order (empty when there are none).
    pub fn parents(&self) -> &[Variable] {
        self.variables.get(1..).unwrap_or(&[])
    }

    pub fn state_counts(&self) -> Vec<usize> {
        self.variables.iter().map(Variable::state_count).collect()
    }

    /// Product of every state count; 0 for an empty space, `None` when the
    /// product overflows `usize`.
    pub fn tensor_size(&self) -> Option<usize> {
        if self.variables.is_empty() {
            return Some(0);
        }
        checked_product(&self.variables)
    }

    /// Number of distinct parent configurations (1 when there are no parents).
    pub fn parent_configurations(&self) -> Option<usize> {
        checked_product(self.parents())
    }

    /// Look up a variable by name, returning its position in the space.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }
}

fn checked_product(variables: &[Variable]) -> Option<usize> {
    variables
        .iter()
        .try_fold(1usize, |acc, v| acc.checked_mul(v.state_count()))
}
