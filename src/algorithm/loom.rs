//! Pick-by-pick loom session
//!
//! Holds the two blocks a weaver is following at the loom, counts picks, and
//! reports which numbered handles to raise next. Manual adjustments let the
//! weaver override a block between picks.

use crate::algorithm::block::{BlockId, BlockPair, Step, StripeBlock};
use crate::io::error::{Result, WithContext};
use crate::math::draws::DrawSource;

/// Manual override applied to one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Move the stripe by one thread
    Shift(Step),
    /// Widen or narrow the stripe by one thread
    Resize(Step),
}

/// Interactive weaving session over two blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loom {
    blocks: BlockPair,
    pick_number: usize,
}

impl Default for Loom {
    fn default() -> Self {
        Self::new()
    }
}

impl Loom {
    /// Start at pick 1 with two default blocks
    pub fn new() -> Self {
        Self::with_blocks(BlockPair::default())
    }

    /// Start at pick 1 with the given blocks
    pub const fn with_blocks(blocks: BlockPair) -> Self {
        Self {
            blocks,
            pick_number: 1,
        }
    }

    /// Current blocks
    pub const fn blocks(&self) -> &BlockPair {
        &self.blocks
    }

    /// Block selected by `id`
    pub const fn block(&self, id: BlockId) -> &StripeBlock {
        self.blocks.get(id)
    }

    /// One-based number of the current pick
    pub const fn pick_number(&self) -> usize {
        self.pick_number
    }

    /// Step both blocks and move on to the next pick
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if either block leaves its bounds; the
    /// session is left unchanged in that case
    pub fn advance(&mut self, draws: &mut impl DrawSource) -> Result<()> {
        self.blocks = self.blocks.next(draws).at_pick(self.pick_number)?;
        self.pick_number += 1;
        Ok(())
    }

    /// Apply a manual override to one block
    ///
    /// Overrides that would push the stripe out of bounds are ignored.
    pub fn adjust(&mut self, id: BlockId, adjustment: Adjustment) {
        let block = self.blocks.get(id);
        let adjusted = match adjustment {
            Adjustment::Shift(step) => block.shifted(step),
            Adjustment::Resize(step) => block.resized(step),
        };
        self.blocks = self.blocks.with(id, adjusted);
    }

    /// One-based handle numbers to raise for the current pick
    pub fn raised_handles(&self) -> Vec<usize> {
        self.blocks.raised_handles()
    }
}
