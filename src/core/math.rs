// Math utilities and helper functions

/// Round a sub-pixel coordinate to the nearest whole pixel.
///
/// Halves round toward positive infinity, so `-0.5` becomes `0` and `2.5`
/// becomes `3`.
pub fn round_to_pixel(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// Milliseconds elapsed between two timestamps, never negative
pub fn elapsed_ms(previous: f64, now: f64) -> f64 {
    (now - previous).max(0.0)
}
