//! Pick grid produced by folding block states over the rows of a carpet
//!
//! Each row advances both blocks once, then lays out every cell of the
//! threading with the picks of its block. The grid stores `1` where a thread
//! is raised and `0` where it is lowered.

use crate::algorithm::block::BlockPair;
use crate::io::error::{Result, WithContext, require_positive};
use crate::math::draws::DrawSource;
use crate::spatial::threading::Threading;
use ndarray::{Array2, ArrayView1};

/// Woven pick grid with the block states that produced each row
#[derive(Debug, Clone)]
pub struct Carpet {
    threading: Threading,
    picks: Array2<u8>,
    states: Vec<BlockPair>,
}

impl Carpet {
    /// Weave `row_count` rows starting from two default blocks
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `row_count` is zero, or
    /// `InvariantViolation` if a block leaves its bounds
    pub fn weave(
        threading: &Threading,
        row_count: usize,
        draws: &mut impl DrawSource,
    ) -> Result<Self> {
        Self::weave_from(threading, row_count, BlockPair::default(), draws)
    }

    /// Weave `row_count` rows starting from the given blocks
    ///
    /// The starting pair itself is never painted: every row shows the state
    /// after that row's step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `row_count` is zero, or
    /// `InvariantViolation` if a block leaves its bounds
    pub fn weave_from(
        threading: &Threading,
        row_count: usize,
        blocks: BlockPair,
        draws: &mut impl DrawSource,
    ) -> Result<Self> {
        Self::weave_with_progress(threading, row_count, blocks, draws, |_| {})
    }

    /// Weave while reporting each finished row to `on_row`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `row_count` is zero, or
    /// `InvariantViolation` (tagged with the pick index) if a block leaves
    /// its bounds
    pub fn weave_with_progress(
        threading: &Threading,
        row_count: usize,
        blocks: BlockPair,
        draws: &mut impl DrawSource,
        mut on_row: impl FnMut(usize),
    ) -> Result<Self> {
        let row_count = require_positive("row_count", row_count)?;
        let thread_count = thread_count(threading, &blocks);

        let mut picks = Array2::<u8>::zeros((row_count, thread_count));
        let mut states = Vec::with_capacity(row_count);
        let mut pair = blocks;

        for (row, mut target) in picks.rows_mut().into_iter().enumerate() {
            pair = pair.next(draws).at_pick(row)?;
            for (cell, pick) in target.iter_mut().zip(row_picks(threading, &pair)) {
                *cell = pick;
            }
            states.push(pair);
            on_row(row);
        }

        Ok(Self {
            threading: threading.clone(),
            picks,
            states,
        })
    }

    /// Threading the carpet was woven with
    pub const fn threading(&self) -> &Threading {
        &self.threading
    }

    /// Full pick grid indexed by `[row, thread]`
    pub const fn picks(&self) -> &Array2<u8> {
        &self.picks
    }

    /// Picks of a single row
    pub fn row(&self, row: usize) -> Option<ArrayView1<'_, u8>> {
        (row < self.row_count()).then(|| self.picks.row(row))
    }

    /// Block states after each row's step
    pub fn states(&self) -> &[BlockPair] {
        &self.states
    }

    /// Number of woven rows
    pub fn row_count(&self) -> usize {
        self.picks.nrows()
    }

    /// Number of threads across the warp
    pub fn thread_count(&self) -> usize {
        self.picks.ncols()
    }
}

/// Total number of threads for a threading and block geometry
pub fn thread_count(threading: &Threading, blocks: &BlockPair) -> usize {
    threading
        .cells()
        .iter()
        .map(|&cell| blocks.get(cell).block_width())
        .sum()
}

/// Picks of one row, cell after cell in warp order
pub fn row_picks<'a>(
    threading: &'a Threading,
    blocks: &'a BlockPair,
) -> impl Iterator<Item = u8> + 'a {
    threading.cells().iter().flat_map(move |&cell| {
        let block = blocks.get(cell);
        (0..block.block_width()).map(move |thread| u8::from(block.is_raised(thread)))
    })
}
