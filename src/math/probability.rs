/// Three-valued sign of a real number
///
/// Returns `-1`, `0` or `1`. Zero (and NaN) map to `0`, so a draw landing
/// exactly on a threshold produces no movement.
pub fn sign(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Sign of an integer difference
pub const fn sign_int(x: i32) -> i32 {
    x.signum()
}

/// Step direction from a uniform draw compared against a threshold
///
/// With a uniform draw in `[0, 1)` the result is `+1` with probability
/// `1 - threshold` and `-1` with probability `threshold`.
pub fn coin_step(draw: f64, threshold: f64) -> i32 {
    sign(draw - threshold)
}

/// Maps a uniform draw in `[0, 1)` onto an index in `0..len`
///
/// Draws outside the unit interval are clamped onto the nearest valid index.
pub fn draw_index(draw: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let scaled = (draw * len as f64).floor();
    // Negative and NaN saturate to zero in the float-to-int cast
    #[allow(clippy::cast_sign_loss)]
    let index = scaled as usize;
    Some(index.min(len - 1))
}
