//! Layer compositing.
//!
//! Pure functions with no owned state: every engine's per-tick output is
//! merged here into one transform delta. Jump lean overrides locomotion
//! outright while airborne, a bounded landing window blends the captured
//! touchdown pose back toward steady state, and everything else sums
//! additively.

use glam::Vec3;

use crate::config::{CompositorConfig, JumpConfig};
use crate::motion::jump::{SquashSample, scale_for_squash};
use crate::utils::{ease_out_quad, lerp, shortest_arc};

/// Per-layer tilt/bank contributions for one entity tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiltBankLayers {
    pub locomotion_tilt: f32,
    pub locomotion_bank: f32,
    pub anticipation_tilt: f32,
    pub idle_tilt: f32,
    pub idle_bank: f32,
    pub overshoot_tilt: f32,
    pub hover_tilt: f32,
    pub hover_bank: f32,
}

/// Merges the tilt/bank layers under the jump-priority rules.
///
/// Airborne: the jump lean fully replaces the locomotion layers, a hard
/// priority, not a blend. Landing window: the captured impact lean eases
/// out quadratically toward the steady-state sum. Otherwise: additive.
#[must_use]
pub fn combine_tilt_bank(
    layers: &TiltBankLayers,
    squash: &SquashSample,
    config: &CompositorConfig,
) -> (f32, f32) {
    if squash.is_jumping {
        return (squash.jump_lean, 0.0);
    }

    let steady_tilt = layers.locomotion_tilt
        + layers.anticipation_tilt
        + layers.idle_tilt
        + layers.overshoot_tilt
        + layers.hover_tilt;
    let steady_bank = layers.locomotion_bank + layers.idle_bank + layers.hover_bank;

    if let Some(landing) = &squash.landing {
        let t = ease_out_quad(landing.elapsed / config.landing_blend);
        return (lerp(landing.lean, steady_tilt, t), steady_bank * t);
    }

    (steady_tilt, steady_bank)
}

/// Mirrors the three [`combine_tilt_bank`] regimes for the facing angle.
#[must_use]
pub fn blend_facing(steady_facing: f32, squash: &SquashSample, config: &CompositorConfig) -> f32 {
    if squash.is_jumping {
        return squash.jump_facing.unwrap_or(steady_facing);
    }
    if let Some(landing) = &squash.landing {
        let t = ease_out_quad(landing.elapsed / config.landing_blend);
        return landing.facing + shortest_arc(landing.facing, steady_facing) * t;
    }
    steady_facing
}

/// Converts a scalar squash into a non-uniform scale under a uniform base.
#[must_use]
pub fn compute_scale(squash: f32, base_scale: f32, config: &JumpConfig) -> Vec3 {
    let (scale_y, scale_xz) = scale_for_squash(squash, config);
    Vec3::new(scale_xz, scale_y, scale_xz) * base_scale
}

/// Composes a secondary anticipation squash multiplicatively onto an
/// existing scale.
#[must_use]
pub fn apply_anticipation_squash(scale: Vec3, squash: f32, config: &JumpConfig) -> Vec3 {
    let (scale_y, scale_xz) = scale_for_squash(squash, config);
    Vec3::new(scale.x * scale_xz, scale.y * scale_y, scale.z * scale_xz)
}
