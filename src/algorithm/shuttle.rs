//! Random pick counts for two alternating shuttles

use crate::io::configuration::{SHUTTLE_INITIAL_PICKS, SHUTTLE_OPTIONS};
use crate::io::error::{Result, invalid_argument};
use crate::math::draws::DrawSource;
use crate::math::probability::draw_index;

/// Throws two shuttles in turn, each time for a random number of picks
///
/// Options repeat to weight the draw; the default list favours short runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuttlePicker {
    options: Vec<usize>,
    shuttle: u8,
    picks: usize,
}

impl Default for ShuttlePicker {
    fn default() -> Self {
        Self {
            options: SHUTTLE_OPTIONS.to_vec(),
            shuttle: 1,
            picks: SHUTTLE_INITIAL_PICKS,
        }
    }
}

impl ShuttlePicker {
    /// Build a picker over custom options
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `options` is empty
    pub fn new(options: Vec<usize>) -> Result<Self> {
        let first = options.first().copied().ok_or_else(|| {
            invalid_argument("options", &"[]", &"need at least one pick count")
        })?;
        Ok(Self {
            options,
            shuttle: 1,
            picks: first,
        })
    }

    /// Shuttle that throws next (1 or 2)
    pub const fn shuttle(&self) -> u8 {
        self.shuttle
    }

    /// Pick count of the most recent throw
    pub const fn picks(&self) -> usize {
        self.picks
    }

    /// Draw a pick count for the current shuttle and hand over to the other
    ///
    /// Returns the shuttle that was thrown with its pick count.
    pub fn throw(&mut self, draws: &mut impl DrawSource) -> (u8, usize) {
        let thrown = self.shuttle;
        if let Some(picks) = draw_index(draws.draw(), self.options.len())
            .and_then(|index| self.options.get(index).copied())
        {
            self.picks = picks;
        }
        self.shuttle = self.shuttle % 2 + 1;
        (thrown, self.picks)
    }
}
