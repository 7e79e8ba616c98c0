//! Utility Module
//!
//! Small numeric helpers shared by the motion engines:
//!
//! - [`angles`]: angle wrapping and rate-limited angular integration
//! - [`smoothing`]: exponential blends and easing envelopes

pub mod angles;
pub mod smoothing;

pub use angles::{approach_angle, shortest_arc, wrap_angle};
pub use smoothing::{ease_out_quad, exp_blend, lerp, sine_pulse};
