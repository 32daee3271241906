//! Mathematical utilities for the stochastic transitions

/// Uniform draw sources (seeded generators and scripted replays)
pub mod draws;
/// Sign and coin-flip helpers shared by the transitions
pub mod probability;
