//! Randomized weaving carpets driven by two drifting stripe blocks
//!
//! Each block is a stripe inside a fixed-width cell whose width and offset
//! wander one thread at a time. A threading pattern lays the two blocks
//! across the warp, every pick advances both, and the resulting grid of
//! raised and lowered threads is painted into a bitmap.

#![forbid(unsafe_code)]

/// Stripe blocks, loom sessions and shuttle picks
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Random draw sources and sign helpers
pub mod math;
/// Threading patterns and the woven pick grid
pub mod spatial;

pub use algorithm::block::{BlockId, BlockPair, StripeBlock};
pub use io::error::{Result, WeaveError};
pub use io::image::{CarpetRenderer, render};
pub use io::palette::Palette;
pub use spatial::{Carpet, Threading};
