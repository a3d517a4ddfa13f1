//! Projection of potential tables onto editable grids.
//!
//! A conditional probability or utility table is a flat tensor addressed by
//! a mixed-radix index over `[conditioned, parent_1, .., parent_k]`. This
//! crate lays that tensor out as a 2-D grid, copies values both ways, turns
//! grid columns back into parent configurations, and computes which cells
//! are locked. Everything here is a pure function of its inputs.

pub mod cell;
pub mod cell_id;
pub mod codec;
pub mod configuration;
pub mod error;
pub mod grid;
pub mod layout;
pub mod mask;
pub mod projector;
pub mod rounding;

pub use cell::Cell;
pub use cell_id::{column_id, column_index, GridCoord};
pub use codec::MixedRadixCodec;
pub use configuration::{column_for_configuration, configuration_for_cell, configuration_for_column};
pub use error::GridError;
pub use grid::Grid;
pub use layout::{build_layout, Layout};
pub use mask::{build_mask, EditabilityMask, Lock, LockReason};
pub use projector::{extract_grid, fill_grid, PotentialValue, Tensor, ValueProjector};
pub use rounding::Rounding;
