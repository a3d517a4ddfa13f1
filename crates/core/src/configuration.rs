use std::fmt;

use serde::{Deserialize, Serialize};

use crate::variable::VariableSpace;

/// One variable fixed to one of its states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateAssignment {
    pub variable: String,
    pub state: usize,
}

/// A partial assignment of states to variables (evidence).
///
/// Assignments keep the order in which they were pushed, which for
/// configurations produced by the engine is parent declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    assignments: Vec<StateAssignment>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `state` to `variable`, replacing any earlier assignment.
    pub fn assign(&mut self, variable: impl Into<String>, state: usize) {
        let variable = variable.into();
        match self.assignments.iter_mut().find(|a| a.variable == variable) {
            Some(existing) => existing.state = state,
            None => self.assignments.push(StateAssignment { variable, state }),
        }
    }

    pub fn with(mut self, variable: impl Into<String>, state: usize) -> Self {
        self.assign(variable, state);
        self
    }

    pub fn get(&self, variable: &str) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.variable == variable)
            .map(|a| a.state)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateAssignment> {
        self.assignments.iter()
    }

    /// State indices in assignment order.
    pub fn states(&self) -> Vec<usize> {
        self.assignments.iter().map(|a| a.state).collect()
    }

    /// Render with state names looked up in `space`, e.g. `Y=present, Z=low`.
    /// Unknown variables or states fall back to the raw index.
    pub fn describe(&self, space: &VariableSpace) -> String {
        self.assignments
            .iter()
            .map(|a| {
                let state = space
                    .position_of(&a.variable)
                    .and_then(|i| space.variables()[i].state_name(a.state))
                    .map(str::to_string)
                    .unwrap_or_else(|| a.state.to_string());
                format!("{}={}", a.variable, state)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.assignments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", a.variable, a.state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;

    #[test]
    fn test_assign_replaces() {
        let mut c = Configuration::new().with("Y", 0).with("Z", 2);
        c.assign("Y", 1);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get("Y"), Some(1));
        assert_eq!(c.states(), vec![1, 2]);
    }

    #[test]
    fn test_display() {
        let c = Configuration::new().with("Y", 1).with("Z", 0);
        assert_eq!(c.to_string(), "Y=1, Z=0");
        assert_eq!(Configuration::new().to_string(), "");
    }

    #[test]
    fn test_describe_uses_state_names() {
        let space = VariableSpace::from_parts(
            Variable::new("X", ["a", "b"]),
            vec![Variable::new("Y", ["low", "high"])],
        );
        let c = Configuration::new().with("Y", 1).with("W", 4);
        assert_eq!(c.describe(&space), "Y=high, W=4");
    }
}
