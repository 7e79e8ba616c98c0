use std::f32::consts::PI;

/// Frame-rate independent exponential blend:
/// `value + (target - value) * (1 - e^(-rate * dt))`.
///
/// The effective time constant is `1 / rate` seconds regardless of tick
/// length, so motion tuned at 60 Hz behaves identically at 30 or 144 Hz.
#[inline]
#[must_use]
pub fn exp_blend(value: f32, target: f32, rate: f32, dt: f32) -> f32 {
    value + (target - value) * (1.0 - (-rate * dt).exp())
}

#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-out over `t` in `[0, 1]` (clamped): fast start, soft stop.
#[inline]
#[must_use]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Half-sine envelope over `t` in `[0, 1]` (clamped): rises from 0 to 1 at
/// the midpoint and returns to exactly 0 at the end.
#[inline]
#[must_use]
pub fn sine_pulse(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * PI).sin()
}
