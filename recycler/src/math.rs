//! Small numeric helpers shared by the layout strategies and adapters.
//!
//! With `feature = "std"` the float functions forward to the inherent `f32` methods; otherwise
//! they use `libm`.

/// Wraps `i` into `[0, n)`.
///
/// For every `n > 0`: `i == floor_div(i, n) * n + wrap(i, n)`.
///
/// `n == 0` has no valid range; it returns `0` (and debug-asserts).
pub fn wrap(i: i64, n: i64) -> i64 {
    debug_assert!(n > 0, "wrap: period must be positive (n={n})");
    if n <= 0 {
        return 0;
    }
    i.rem_euclid(n)
}

/// Floor division (rounds toward negative infinity for `n > 0`).
pub fn floor_div(i: i64, n: i64) -> i64 {
    debug_assert!(n > 0, "floor_div: divisor must be positive (n={n})");
    if n <= 0 {
        return 0;
    }
    i.div_euclid(n)
}

/// Wraps a scalar into `[0, period)`. Returns `value` unchanged when `period` is not positive.
pub fn wrap_f32(value: f32, period: f32) -> f32 {
    if period.is_nan() || period <= 0.0 {
        return value;
    }
    let r = value - floor(value / period) * period;
    // `value` just below a multiple of `period` can round up to `period`.
    if r >= period { 0.0 } else { r }
}

#[cfg(feature = "std")]
pub fn floor(x: f32) -> f32 {
    x.floor()
}

#[cfg(not(feature = "std"))]
pub fn floor(x: f32) -> f32 {
    libm::floorf(x)
}

#[cfg(feature = "std")]
pub fn ceil(x: f32) -> f32 {
    x.ceil()
}

#[cfg(not(feature = "std"))]
pub fn ceil(x: f32) -> f32 {
    libm::ceilf(x)
}

#[cfg(feature = "std")]
pub fn abs(x: f32) -> f32 {
    x.abs()
}

#[cfg(not(feature = "std"))]
pub fn abs(x: f32) -> f32 {
    libm::fabsf(x)
}

/// `2^x`.
#[cfg(feature = "std")]
pub fn exp2(x: f32) -> f32 {
    x.exp2()
}

/// `2^x`.
#[cfg(not(feature = "std"))]
pub fn exp2(x: f32) -> f32 {
    libm::exp2f(x)
}

/// Replaces NaN and negative values with zero.
pub(crate) fn non_negative(x: f32) -> f32 {
    if x > 0.0 { x } else { 0.0 }
}

/// Converts a scalar row/column coordinate to an integer (saturating; NaN maps to `0`).
pub(crate) fn to_i64(x: f32) -> i64 {
    x as i64
}
