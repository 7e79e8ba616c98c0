//! Animus: a procedural secondary-motion core for real-time 3D characters.
//!
//! Converts sparse locomotion telemetry (speed, heading targets, jump
//! progress) into continuous, layered motion qualifiers: body tilt and
//! banking, squash/stretch, anticipatory wind-up, follow-through overshoot,
//! idle fidgets, and a constant hover drift. The host engine supplies
//! telemetry once per tick per entity and applies the returned transform
//! delta; this crate renders nothing and navigates nothing.
//!
//! ```rust
//! use animus::{MotionInput, MotionSystem};
//!
//! let mut motion = MotionSystem::default();
//! let hero = motion.register();
//!
//! let frame = motion.advance(
//!     hero,
//!     &MotionInput {
//!         speed: 1.2,
//!         target_facing: Some(0.4),
//!         stationary: false,
//!         dt: 1.0 / 60.0,
//!         time: 0.016,
//!         ..MotionInput::default()
//!     },
//! );
//! assert!(frame.scale.y > 0.0);
//!
//! motion.clear(hero);
//! ```

pub mod config;
pub mod errors;
pub mod motion;
pub mod utils;

pub use config::MotionConfig;
pub use errors::{AnimusError, Result};
pub use motion::{
    EntityHandle, JumpTelemetry, MotionFrame, MotionInput, MotionSystem,
};
