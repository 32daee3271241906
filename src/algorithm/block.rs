//! Stripe block state and its stochastic step function
//!
//! A block is one cell of `block_width` threads in which a contiguous stripe
//! is raised. Each step either leaves the block alone, nudges the stripe one
//! thread sideways, or changes its width by one with a soft pull towards the
//! preferred width. Blocks are plain values: every transition returns a new
//! snapshot and leaves the original untouched.

use crate::io::configuration::{
    CHANGE_WIDTH_CHANCE, DEFAULT_BLOCK_WIDTH, DEFAULT_MAX_STRIPE_WIDTH, DEFAULT_MIN_STRIPE_WIDTH,
    DEFAULT_OFFSET, DEFAULT_PREFERRED_STRIPE_WIDTH, DEFAULT_STRIPE_WIDTH, FAIR_COIN, MOVE_CHANCE,
    TOWARDS_PREFERRED,
};
use crate::io::error::{Result, WeaveError, invalid_argument};
use crate::math::draws::DrawSource;
use crate::math::probability::{coin_step, sign_int};

/// Geometry and initial state used to build a [`StripeBlock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockParams {
    /// Initial stripe width
    pub stripe_width: usize,
    /// Initial stripe offset
    pub offset: usize,
    /// Number of threads in the cell
    pub block_width: usize,
    /// Narrowest stripe allowed
    pub min_stripe_width: usize,
    /// Widest stripe allowed
    pub max_stripe_width: usize,
    /// Width the stripe drifts back towards
    pub preferred_stripe_width: usize,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            stripe_width: DEFAULT_STRIPE_WIDTH,
            offset: DEFAULT_OFFSET,
            block_width: DEFAULT_BLOCK_WIDTH,
            min_stripe_width: DEFAULT_MIN_STRIPE_WIDTH,
            max_stripe_width: DEFAULT_MAX_STRIPE_WIDTH,
            preferred_stripe_width: DEFAULT_PREFERRED_STRIPE_WIDTH,
        }
    }
}

/// Kind of change applied by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The stripe changed width (and possibly offset)
    Width,
    /// The stripe moved one thread sideways
    Move,
    /// Nothing changed
    Stay,
}

/// Direction of a manual adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Towards smaller offsets or widths
    Backward,
    /// Towards larger offsets or widths
    Forward,
}

/// Immutable snapshot of one stripe block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripeBlock {
    stripe_width: usize,
    offset: usize,
    block_width: usize,
    min_stripe_width: usize,
    max_stripe_width: usize,
    preferred_stripe_width: usize,
}

impl Default for StripeBlock {
    fn default() -> Self {
        let params = BlockParams::default();
        Self {
            stripe_width: params.stripe_width,
            offset: params.offset,
            block_width: params.block_width,
            min_stripe_width: params.min_stripe_width,
            max_stripe_width: params.max_stripe_width,
            preferred_stripe_width: params.preferred_stripe_width,
        }
    }
}

impl StripeBlock {
    /// Build a block from explicit parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless
    /// `1 <= min <= preferred <= max < block_width`, `min < max`, and the
    /// initial width and offset lie inside their bounds. The stripe must be
    /// narrower than the cell so a forced move away from either edge always
    /// has room, and a forced width change needs two widths to pick from.
    pub fn new(params: BlockParams) -> Result<Self> {
        let BlockParams {
            stripe_width,
            offset,
            block_width,
            min_stripe_width,
            max_stripe_width,
            preferred_stripe_width,
        } = params;

        if min_stripe_width == 0 {
            return Err(invalid_argument(
                "min_stripe_width",
                &min_stripe_width,
                &"stripe must be at least one thread wide",
            ));
        }
        if max_stripe_width <= min_stripe_width {
            return Err(invalid_argument(
                "max_stripe_width",
                &max_stripe_width,
                &format!("must be wider than the minimum {min_stripe_width}"),
            ));
        }
        if !(min_stripe_width..=max_stripe_width).contains(&preferred_stripe_width) {
            return Err(invalid_argument(
                "preferred_stripe_width",
                &preferred_stripe_width,
                &format!("must lie within [{min_stripe_width}, {max_stripe_width}]"),
            ));
        }
        if max_stripe_width >= block_width {
            return Err(invalid_argument(
                "max_stripe_width",
                &max_stripe_width,
                &format!("must be narrower than the cell width {block_width}"),
            ));
        }
        if !(min_stripe_width..=max_stripe_width).contains(&stripe_width) {
            return Err(invalid_argument(
                "stripe_width",
                &stripe_width,
                &format!("must lie within [{min_stripe_width}, {max_stripe_width}]"),
            ));
        }
        if offset > block_width - stripe_width {
            return Err(invalid_argument(
                "offset",
                &offset,
                &format!("stripe must fit in the cell (max {})", block_width - stripe_width),
            ));
        }

        Ok(Self {
            stripe_width,
            offset,
            block_width,
            min_stripe_width,
            max_stripe_width,
            preferred_stripe_width,
        })
    }

    /// Current stripe width
    pub const fn stripe_width(&self) -> usize {
        self.stripe_width
    }

    /// Current stripe offset
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of threads in the cell
    pub const fn block_width(&self) -> usize {
        self.block_width
    }

    /// Narrowest stripe allowed
    pub const fn min_stripe_width(&self) -> usize {
        self.min_stripe_width
    }

    /// Widest stripe allowed
    pub const fn max_stripe_width(&self) -> usize {
        self.max_stripe_width
    }

    /// Width the stripe drifts back towards
    pub const fn preferred_stripe_width(&self) -> usize {
        self.preferred_stripe_width
    }

    /// Largest offset at which the stripe still fits
    pub const fn max_offset(&self) -> usize {
        self.block_width.saturating_sub(self.stripe_width)
    }

    /// Advance one step
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the new state leaves its bounds
    pub fn next(&self, draws: &mut impl DrawSource) -> Result<Self> {
        self.step(draws).map(|(block, _)| block)
    }

    /// Advance one step and report which transition fired
    ///
    /// Reads one decision draw, then whatever the chosen transition needs.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the new state leaves its bounds
    pub fn step(&self, draws: &mut impl DrawSource) -> Result<(Self, Transition)> {
        let r = draws.draw();
        let (block, transition) = if r < CHANGE_WIDTH_CHANCE {
            (self.new_width(draws), Transition::Width)
        } else if r < MOVE_CHANCE {
            (self.new_offset(draws), Transition::Move)
        } else {
            (*self, Transition::Stay)
        };
        block.check_invariants()?;
        Ok((block, transition))
    }

    /// Move the stripe one thread sideways
    ///
    /// Stripes touching an edge are pushed back inwards without a draw.
    pub fn new_offset(&self, draws: &mut impl DrawSource) -> Self {
        let mut block = *self;
        if block.offset == 0 {
            block.offset = 1;
        } else if block.offset == block.max_offset() {
            block.offset -= 1;
        } else {
            block.offset = shift(block.offset, coin_step(draws.draw(), FAIR_COIN));
        }
        block
    }

    /// Change the stripe width by one and reconcile the offset
    ///
    /// Widths at the minimum or maximum reflect without a draw. Away from the
    /// preferred width the stripe steps towards it three times out of four.
    pub fn new_width(&self, draws: &mut impl DrawSource) -> Self {
        let mut block = *self;
        let current_width = block.stripe_width;

        if block.stripe_width == block.min_stripe_width {
            block.stripe_width += 1;
        } else if block.stripe_width == block.max_stripe_width {
            block.stripe_width -= 1;
        } else if block.stripe_width == block.preferred_stripe_width {
            block.stripe_width = shift(block.stripe_width, coin_step(draws.draw(), FAIR_COIN));
        } else {
            let dir = sign_int(signed(block.preferred_stripe_width) - signed(block.stripe_width));
            block.stripe_width = shift(
                block.stripe_width,
                dir * coin_step(draws.draw(), TOWARDS_PREFERRED),
            );
        }

        let max_offset = block.max_offset();
        if block.offset > max_offset {
            block.offset = max_offset;
        } else if block.offset > 0 && block.offset < max_offset {
            let go_right = draws.draw() > FAIR_COIN;
            let is_wider = block.stripe_width > current_width;
            if is_wider && !go_right {
                block.offset -= 1;
            } else if !is_wider && go_right {
                block.offset += 1;
            }
        }
        // A stripe resting on the left edge stays there

        block
    }

    /// Binary mask of the cell with ones under the stripe
    pub fn picks(&self) -> Vec<u8> {
        (0..self.block_width)
            .map(|thread| u8::from(self.is_raised(thread)))
            .collect()
    }

    /// Whether the given thread lies under the stripe
    pub const fn is_raised(&self, thread: usize) -> bool {
        thread >= self.offset && thread < self.offset + self.stripe_width
    }

    /// Move the stripe by one thread if it still fits
    pub const fn shifted(&self, step: Step) -> Self {
        let mut block = *self;
        match step {
            Step::Backward => {
                if block.offset > 0 {
                    block.offset -= 1;
                }
            }
            Step::Forward => {
                if block.offset < block.max_offset() {
                    block.offset += 1;
                }
            }
        }
        block
    }

    /// Change the stripe width by one if it stays within bounds
    ///
    /// A stripe widened against the right edge is pulled one thread left.
    pub const fn resized(&self, step: Step) -> Self {
        let mut block = *self;
        match step {
            Step::Backward => {
                if block.stripe_width > block.min_stripe_width {
                    block.stripe_width -= 1;
                }
            }
            Step::Forward => {
                if block.stripe_width < block.max_stripe_width {
                    block.stripe_width += 1;
                    if block.offset > block.max_offset() {
                        block.offset = block.max_offset();
                    }
                }
            }
        }
        block
    }

    /// Verify the width and offset bounds
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` naming the broken bound
    pub fn check_invariants(&self) -> Result<()> {
        let reason = if self.stripe_width < self.min_stripe_width {
            Some("stripe narrower than minimum")
        } else if self.stripe_width > self.max_stripe_width {
            Some("stripe wider than maximum")
        } else if self.stripe_width > self.block_width
            || self.offset > self.block_width - self.stripe_width
        {
            Some("stripe overflows the cell")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(WeaveError::InvariantViolation {
                stripe_width: self.stripe_width,
                offset: self.offset,
                block_width: self.block_width,
                reason,
                pick: None,
            }),
            None => Ok(()),
        }
    }
}

/// Which of the two stripe blocks drives a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockId {
    /// Selector `1`
    First,
    /// Selector `2`
    Second,
}

impl BlockId {
    /// Parse a numeric selector
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for anything other than 1 or 2
    pub fn from_selector(selector: u8) -> Result<Self> {
        match selector {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(invalid_argument(
                "threading",
                &other,
                &"block selectors must be 1 or 2",
            )),
        }
    }

    /// Numeric selector of this block
    pub const fn selector(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// The two stripe blocks of a loom, advanced in lockstep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockPair {
    /// Block driving cells with selector 1
    pub first: StripeBlock,
    /// Block driving cells with selector 2
    pub second: StripeBlock,
}

impl BlockPair {
    /// Pair two blocks
    pub const fn new(first: StripeBlock, second: StripeBlock) -> Self {
        Self { first, second }
    }

    /// Block selected by `id`
    pub const fn get(&self, id: BlockId) -> &StripeBlock {
        match id {
            BlockId::First => &self.first,
            BlockId::Second => &self.second,
        }
    }

    /// Copy of the pair with the block at `id` replaced
    pub const fn with(&self, id: BlockId, block: StripeBlock) -> Self {
        let mut pair = *self;
        match id {
            BlockId::First => pair.first = block,
            BlockId::Second => pair.second = block,
        }
        pair
    }

    /// Step both blocks, first block first
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if either block leaves its bounds
    pub fn next(&self, draws: &mut impl DrawSource) -> Result<Self> {
        let first = self.first.next(draws)?;
        let second = self.second.next(draws)?;
        Ok(Self { first, second })
    }

    /// One-based handle numbers raised by this pair
    ///
    /// Handles of the first block come first, numbered from 1; the second
    /// block's handles continue after them.
    pub fn raised_handles(&self) -> Vec<usize> {
        let first = self.first;
        let second = self.second;
        let first_handles = (0..first.block_width())
            .filter(move |&thread| first.is_raised(thread))
            .map(|thread| thread + 1);
        let second_handles = (0..second.block_width())
            .filter(move |&thread| second.is_raised(thread))
            .map(move |thread| thread + first.block_width() + 1);
        first_handles.chain(second_handles).collect()
    }
}

// Widths and offsets are tiny, so the signed round trip never truncates
#[allow(clippy::cast_possible_wrap)]
const fn signed(value: usize) -> i32 {
    value as i32
}

const fn shift(value: usize, delta: i32) -> usize {
    value.saturating_add_signed(delta as isize)
}
