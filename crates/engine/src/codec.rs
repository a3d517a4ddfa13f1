//! Mixed-radix addressing of a potential's flat tensor.
//!
//! Digit order is fixed for the whole engine: the conditioned variable
//! (index 0 of the space) is the least significant digit, and among the
//! parents the left-most one is the most significant. For `[X, Y, Z]`:
//!
//! ```text
//! position = (y * |Z| + z) * |X| + x
//! ```
//!
//! The parent part `y * |Z| + z` is the *block* of a position. Blocks map
//! one-to-one onto data columns (`col = block + 1`) and the conditioned
//! digit maps onto data rows, so both grid formulas derive from here.

use potgrid_core::VariableSpace;

use crate::error::{GridError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedRadixCodec {
    /// State counts in variable-space order.
    radices: Vec<usize>,
    size: usize,
}

impl MixedRadixCodec {
    /// Build a codec from state counts in variable-space order.
    pub fn new(radices: Vec<usize>) -> Result<Self> {
        if radices.is_empty() || radices.contains(&0) {
            return Err(GridError::EmptyPotential);
        }
        let size = radices
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or(GridError::TooLarge { what: "tensor size" })?;
        Ok(Self { radices, size })
    }

    pub fn for_space(space: &VariableSpace) -> Result<Self> {
        Self::new(space.state_counts())
    }

    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    /// Total number of positions (`tensor_size`).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// States of the conditioned variable (the fastest digit).
    #[inline]
    pub fn conditioned_states(&self) -> usize {
        self.radices[0]
    }

    /// Number of distinct parent blocks.
    #[inline]
    pub fn blocks(&self) -> usize {
        self.size / self.radices[0]
    }

    /// Flat position of a full state tuple given in variable-space order.
    pub fn position_of(&self, configuration: &[usize]) -> Result<usize> {
        self.check_len(configuration.len(), self.radices.len())?;
        let x = configuration[0];
        if x >= self.radices[0] {
            return Err(GridError::OutOfRange { what: "state", index: x, bound: self.radices[0] });
        }
        let block = self.block_of(&configuration[1..])?;
        Ok(block * self.radices[0] + x)
    }

    /// Exact inverse of [`position_of`](Self::position_of).
    pub fn configuration_of(&self, position: usize) -> Result<Vec<usize>> {
        if position >= self.size {
            return Err(GridError::OutOfRange { what: "position", index: position, bound: self.size });
        }
        let x = position % self.radices[0];
        let mut configuration = Vec::with_capacity(self.radices.len());
        configuration.push(x);
        configuration.extend(self.parent_states_of(position / self.radices[0])?);
        Ok(configuration)
    }

    /// Block index of a parent assignment (left-most parent slowest).
    pub fn block_of(&self, parents: &[usize]) -> Result<usize> {
        let radices = &self.radices[1..];
        self.check_len(parents.len(), radices.len())?;
        let mut index = 0;
        for (&state, &radix) in parents.iter().zip(radices) {
            if state >= radix {
                return Err(GridError::OutOfRange { what: "state", index: state, bound: radix });
            }
            index = index * radix + state;
        }
        Ok(index)
    }

    /// Parent assignment of a block index.
    pub fn parent_states_of(&self, block: usize) -> Result<Vec<usize>> {
        let blocks = self.blocks();
        if block >= blocks {
            return Err(GridError::OutOfRange { what: "block", index: block, bound: blocks });
        }
        let radices = &self.radices[1..];
        let mut states = vec![0; radices.len()];
        let mut rest = block;
        for (slot, &radix) in states.iter_mut().zip(radices).rev() {
            *slot = rest % radix;
            rest /= radix;
        }
        Ok(states)
    }

    fn check_len(&self, found: usize, expected: usize) -> Result<()> {
        if found != expected {
            return Err(GridError::DimensionMismatch { what: "configuration length", expected, found });
        }
        Ok(())
    }
}
