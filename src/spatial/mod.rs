//! Warp layout and the woven pick grid
//!
//! This module contains spatial-related functionality including:
//! - Threading patterns mapping cells to blocks
//! - The carpet grid folded from successive block states

/// Pick grid folded from block states
pub mod carpet;
/// Threading patterns assigning cells to blocks
pub mod threading;

pub use carpet::Carpet;
pub use threading::Threading;
