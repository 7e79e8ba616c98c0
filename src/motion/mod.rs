//! Procedural secondary-motion system.
//!
//! Seven independent per-entity engines evolve concurrently and are merged
//! only at the compositor boundary:
//! - [`store`]: per-entity, per-aspect slot storage (lazy create, explicit evict)
//! - [`tilt`]: forward/back tilt and left/right bank from locomotion
//! - [`facing`]: turn-rate-limited heading integration
//! - [`jump`]: phase-driven squash/stretch keyed to jump telemetry
//! - [`anticipation`]: edge-triggered wind-up pulses
//! - [`follow_through`]: damped-spring overshoot after stopping
//! - [`idle`]: randomized fidgets while stationary
//! - [`hover`]: always-on drift, bob, and reactive tilt
//! - [`compositor`]: pure layer-merging functions
//! - [`system`]: the per-tick orchestrator and entity lifecycle

pub mod anticipation;
pub mod compositor;
pub mod facing;
pub mod follow_through;
pub mod hover;
pub mod idle;
pub mod jump;
pub mod store;
pub mod system;
pub mod tilt;

pub use anticipation::{AnticipationEngine, AnticipationPhase, AnticipationSample};
pub use compositor::TiltBankLayers;
pub use facing::{FacingController, FacingSample};
pub use follow_through::{FollowThroughEngine, FollowThroughPhase};
pub use hover::{HoverDriftEngine, HoverSample};
pub use idle::{IdleFidgetEngine, IdleSample};
pub use jump::{JumpTelemetry, LandingBlend, SquashSample, SquashStretchEngine};
pub use store::{AspectStore, EntityHandle};
pub use system::{MotionFrame, MotionInput, MotionSystem};
pub use tilt::{TiltBankEngine, TiltSample};

/// Floor applied to `dt` before any division.
pub(crate) const MIN_DT: f32 = 0.016;
