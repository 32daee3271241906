/// Command-line interface and run orchestration
pub mod cli;
/// Constants and default settings
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Carpet rasterization and PNG export
pub mod image;
/// Two-color palettes
pub mod palette;
/// Terminal progress reporting
pub mod progress;
/// Animated weaving visualization
pub mod visualization;
