//! Common numeric helpers used across the platform

/// Round a value to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Express a `[0, 1]` ratio as a percentage rounded to 2 decimal places
pub fn ratio_percent(ratio: f64) -> f64 {
    round_to(ratio * 100.0, 2)
}
