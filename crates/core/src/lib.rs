//! Plain data model shared by the projection engine and the file layer.
//!
//! Nothing in here knows about grids. A potential is described by a
//! [`VariableSpace`]: the conditioned variable first, then its parents.

pub mod configuration;
pub mod variable;

pub use configuration::{Configuration, StateAssignment};
pub use variable::{Variable, VariableSpace};
