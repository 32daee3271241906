//! Sources of uniform random draws consumed by the stripe transitions
//!
//! Every stochastic decision reads one value in `[0, 1)` from a [`DrawSource`].
//! Production code uses a seeded [`StdRng`]; tests and replays use
//! [`ScriptedDraws`] to feed an exact sequence of values.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A stream of uniform values in `[0, 1)`
pub trait DrawSource {
    /// Consume the next value from the stream
    fn draw(&mut self) -> f64;
}

impl DrawSource for StdRng {
    fn draw(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl DrawSource for ThreadRng {
    fn draw(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl<D: DrawSource + ?Sized> DrawSource for &mut D {
    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

/// Create the deterministic generator used for a given seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Pick a fresh seed from the thread-local generator
pub fn fresh_seed() -> u64 {
    rand::rng().random::<u64>()
}

/// Replays a fixed script of draws, cycling when it runs out
///
/// Counts every value handed out so callers can check how many draws a
/// transition consumed.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    script: Vec<f64>,
    consumed: usize,
}

impl ScriptedDraws {
    /// Create a replay source from the given values
    ///
    /// An empty script behaves as an endless stream of `0.0`.
    pub fn new(script: impl Into<Vec<f64>>) -> Self {
        Self {
            script: script.into(),
            consumed: 0,
        }
    }

    /// Number of values handed out so far
    pub const fn consumed(&self) -> usize {
        self.consumed
    }
}

impl DrawSource for ScriptedDraws {
    fn draw(&mut self) -> f64 {
        let value = if self.script.is_empty() {
            0.0
        } else {
            self.script
                .get(self.consumed % self.script.len())
                .copied()
                .unwrap_or(0.0)
        };
        self.consumed += 1;
        value
    }
}
