//! Weaving constants and runtime configuration defaults

// Stripe block transition chances
/// Draws below this value change the stripe width
pub const CHANGE_WIDTH_CHANCE: f64 = 0.15;
/// Draws below this value (and not below the width chance) move the stripe
pub const MOVE_CHANCE: f64 = 0.4;

// Offset moves and preferred-width wobble are fair coins
/// Threshold of a fair coin flip
pub const FAIR_COIN: f64 = 0.5;
/// Threshold giving a 75% chance of stepping towards the preferred width
pub const TOWARDS_PREFERRED: f64 = 0.25;

// Default stripe block geometry
/// Cells per block
pub const DEFAULT_BLOCK_WIDTH: usize = 8;
/// Initial stripe width
pub const DEFAULT_STRIPE_WIDTH: usize = 3;
/// Initial stripe offset
pub const DEFAULT_OFFSET: usize = 2;
/// Narrowest stripe
pub const DEFAULT_MIN_STRIPE_WIDTH: usize = 2;
/// Widest stripe
pub const DEFAULT_MAX_STRIPE_WIDTH: usize = 5;
/// Width the stripe drifts back towards
pub const DEFAULT_PREFERRED_STRIPE_WIDTH: usize = 2;

// Pixel sizes
/// Default width of one thread in pixels
pub const DEFAULT_THREAD_WIDTH: u32 = 4;
/// Default height of one pick in pixels
pub const DEFAULT_PICK_WIDTH: u32 = 4;

// Palette
/// Color of lowered threads (pick 0)
pub const GROUND_COLOR: [u8; 4] = [230, 217, 138, 255];
/// Color of raised threads (pick 1)
pub const OVERSHOT_COLOR: [u8; 4] = [99, 99, 92, 255];

// Shuttle picker
/// Pick counts the shuttle picker chooses from, weighted by repetition
pub const SHUTTLE_OPTIONS: [usize; 11] = [2, 2, 2, 2, 4, 4, 4, 4, 6, 6, 8];
/// Pick count shown before the first throw
pub const SHUTTLE_INITIAL_PICKS: usize = 2;

// Output settings
/// Default output file
pub const DEFAULT_OUTPUT: &str = "carpet.png";
/// Suffix added to the visualization filename
pub const VISUALIZATION_SUFFIX: &str = "_weaving";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
