use recycler::math::exp2;

/// Exponential approach toward a target, parameterized by the time it takes to halve the remaining
/// distance.
///
/// `next = target + (current - target) * 2^(-dt / half_life)`. For a fixed target and `dt > 0`
/// the distance shrinks by the same factor every step, so the approach is monotonic and never
/// overshoots.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfLife(f32);

impl HalfLife {
    /// A half-life of `seconds`. Zero (or negative) snaps to the target.
    pub const fn new(seconds: f32) -> Self {
        Self(seconds)
    }

    pub fn seconds(self) -> f32 {
        self.0
    }

    /// Fraction of the remaining distance left after `dt` seconds.
    pub fn retention(self, dt: f32) -> f32 {
        if self.0.is_nan() || self.0 <= 0.0 {
            return 0.0;
        }
        if dt.is_nan() || dt <= 0.0 {
            return 1.0;
        }
        exp2(-dt / self.0)
    }

    pub fn step(self, current: f32, target: f32, dt: f32) -> f32 {
        target + (current - target) * self.retention(dt)
    }
}

impl Default for HalfLife {
    fn default() -> Self {
        Self(0.08)
    }
}

/// One damped step from `current` toward `target`; see [`HalfLife`].
pub fn damp(current: f32, target: f32, dt: f32, half_life: f32) -> f32 {
    HalfLife::new(half_life).step(current, target, dt)
}
