use std::f32::consts::{PI, TAU};

/// Wraps an angle into the half-open interval `(-PI, PI]`.
///
/// `rem_euclid` first maps the input into `[0, TAU)`, so the result is
/// well-defined for arbitrarily large accumulators in either direction.
#[inline]
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Signed shortest angular delta from `from` to `to`, wrapped to `(-PI, PI]`.
#[inline]
#[must_use]
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Advances `current` toward `target` along the shortest arc, moving at most
/// `max_step` radians.
///
/// Returns `(new_angle, applied_delta)`. The returned angle is an unbounded
/// accumulator: it is never re-wrapped, so callers integrating a heading can
/// keep a continuous value across many revolutions.
#[inline]
#[must_use]
pub fn approach_angle(current: f32, target: f32, max_step: f32) -> (f32, f32) {
    let max_step = max_step.max(0.0);
    let delta = shortest_arc(current, target);
    let step = delta.clamp(-max_step, max_step);
    (current + step, step)
}
