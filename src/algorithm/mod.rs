/// Stripe block state, stochastic transitions and block pairs
pub mod block;
/// Pick-by-pick loom session with manual overrides
pub mod loom;
/// Random pick counts for two alternating shuttles
pub mod shuttle;
