use glam::{Vec2, Vec3};

use crate::config::JumpConfig;
use crate::motion::store::{AspectStore, EntityHandle};
use crate::utils::{approach_angle, exp_blend, lerp, sine_pulse};

/// Progress past which the flight stretch gives way to the pre-landing ramp.
const PRE_LANDING_START: f32 = 0.8;

/// Floor on the vertical scale before the volume-preserving square root.
const MIN_SCALE_Y: f32 = 0.1;

/// Externally supplied description of an in-flight jump, consumed per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpTelemetry {
    pub in_air: bool,
    /// Normalized jump progress in `[0, 1]`.
    pub progress: f32,
    /// Progress at which the pre-takeoff anticipation ends (typically 0.2).
    pub anticipation_end: f32,
    pub start_pos: Vec3,
    pub end_pos: Vec3,
}

/// Per-entity squash/jump record. Jump-only fields are valid iff
/// `is_jumping`.
#[derive(Debug, Clone, Copy)]
pub struct SquashState {
    current_squash: f32,
    is_jumping: bool,
    /// Seconds since touchdown while in landing recovery.
    landing_timer: f32,
    jump_target_angle: Option<f32>,
    current_jump_facing: Option<f32>,
    jump_lean: f32,
    base_scale: f32,
    /// Facing and lean captured at the instant of touchdown, blended out by
    /// the compositor over the landing window.
    landing_facing: f32,
    landing_lean: f32,
}

impl Default for SquashState {
    fn default() -> Self {
        Self {
            current_squash: 0.0,
            is_jumping: false,
            landing_timer: f32::MAX,
            jump_target_angle: None,
            current_jump_facing: None,
            jump_lean: 0.0,
            base_scale: 1.0,
            landing_facing: 0.0,
            landing_lean: 0.0,
        }
    }
}

/// Captured landing values, exposed while the recovery window is open.
#[derive(Debug, Clone, Copy)]
pub struct LandingBlend {
    /// Seconds since touchdown.
    pub elapsed: f32,
    pub facing: f32,
    pub lean: f32,
}

/// Result of one squash update.
#[derive(Debug, Clone, Copy)]
pub struct SquashSample {
    /// Signed squash amount, roughly `[-1, 1]`.
    pub squash: f32,
    pub scale_y: f32,
    pub scale_xz: f32,
    pub is_jumping: bool,
    /// Airborne heading, `Some` only while jumping.
    pub jump_facing: Option<f32>,
    pub jump_lean: f32,
    pub base_scale: f32,
    /// Set on the single tick the entity touches down.
    pub just_landed: bool,
    /// `Some` while the landing recovery window is open.
    pub landing: Option<LandingBlend>,
}

impl Default for SquashSample {
    fn default() -> Self {
        Self {
            squash: 0.0,
            scale_y: 1.0,
            scale_xz: 1.0,
            is_jumping: false,
            jump_facing: None,
            jump_lean: 0.0,
            base_scale: 1.0,
            just_landed: false,
            landing: None,
        }
    }
}

/// Converts a signed squash amount into vertical and horizontal scale.
///
/// Negative squash compresses by `max_squash`, positive stretches by
/// `max_stretch`; `scale_xz = 1 / sqrt(scale_y)` approximates a
/// volume-preserving body.
#[must_use]
pub fn scale_for_squash(squash: f32, config: &JumpConfig) -> (f32, f32) {
    let scale_y = if squash < 0.0 {
        1.0 + squash * config.max_squash
    } else {
        1.0 + squash * config.max_stretch
    };
    let scale_y = scale_y.max(MIN_SCALE_Y);
    (scale_y, 1.0 / scale_y.sqrt())
}

/// Phase-driven squash/stretch and directional lean keyed to jump progress.
///
/// State machine over grounded → jumping → landing-recovery, driven entirely
/// by [`JumpTelemetry`]. Targets are low-pass filtered toward the live
/// values each tick so phase boundaries stay continuous.
#[derive(Debug)]
pub struct SquashStretchEngine {
    config: JumpConfig,
    states: AspectStore<SquashState>,
}

impl SquashStretchEngine {
    #[must_use]
    pub fn new(config: JumpConfig) -> Self {
        Self {
            config,
            states: AspectStore::new(),
        }
    }

    /// Uniform base scale composed under the squash (default 1.0).
    pub fn set_base_scale(&mut self, entity: EntityHandle, base_scale: f32) {
        if let Some(state) = self.states.slot(entity) {
            state.base_scale = base_scale;
        }
    }

    /// Advances the squash state machine one tick.
    ///
    /// `facing` is the entity's steady-state heading, used both as the
    /// takeoff heading and as the fallback bearing when the jump's
    /// horizontal travel is too short to define one.
    pub fn update(
        &mut self,
        entity: EntityHandle,
        jump: &JumpTelemetry,
        facing: f32,
        dt: f32,
    ) -> SquashSample {
        let config = &self.config;
        let Some(state) = self.states.slot(entity) else {
            return SquashSample::default();
        };

        let mut just_landed = false;
        if jump.in_air {
            if !state.is_jumping {
                Self::begin_jump(state, jump, facing, config);
            }
            Self::advance_airborne(state, jump, dt, config);
        } else {
            if state.is_jumping {
                Self::land(state, facing, config);
                just_landed = true;
            }
            Self::advance_grounded(state, dt, config);
        }

        let (scale_y, scale_xz) = scale_for_squash(state.current_squash, config);
        let landing = (state.landing_timer < config.landing_recovery).then(|| LandingBlend {
            elapsed: state.landing_timer,
            facing: state.landing_facing,
            lean: state.landing_lean,
        });

        SquashSample {
            squash: state.current_squash,
            scale_y,
            scale_xz,
            is_jumping: state.is_jumping,
            jump_facing: state.current_jump_facing,
            jump_lean: state.jump_lean,
            base_scale: state.base_scale,
            just_landed,
            landing,
        }
    }

    /// Grounded → jumping: capture the takeoff heading and resolve the jump
    /// bearing from the horizontal travel vector.
    fn begin_jump(state: &mut SquashState, jump: &JumpTelemetry, facing: f32, config: &JumpConfig) {
        state.is_jumping = true;
        state.landing_timer = f32::MAX;
        state.current_jump_facing = Some(facing);

        let travel = jump.end_pos - jump.start_pos;
        let horizontal = Vec2::new(travel.x, travel.z);
        // Near-zero travel would hand atan2 a degenerate vector; hold the
        // current heading instead.
        state.jump_target_angle = Some(if horizontal.length() < config.min_travel {
            facing
        } else {
            horizontal.x.atan2(horizontal.y)
        });
    }

    fn advance_airborne(state: &mut SquashState, jump: &JumpTelemetry, dt: f32, config: &JumpConfig) {
        let progress = jump.progress.clamp(0.0, 1.0);
        let anticipation_end = jump.anticipation_end.clamp(1e-3, PRE_LANDING_START - 1e-3);

        let (target_squash, target_lean) = if progress < anticipation_end {
            // Sine-eased squat before leaving the ground.
            (
                -sine_pulse(progress / anticipation_end) * config.anticipation_squash,
                config.anticipation_lean,
            )
        } else if progress < PRE_LANDING_START {
            // Flight: stretch peaks mid-air; lean runs forward → level →
            // backward over the normalized [-1, 1] air coordinate.
            let air = (progress - anticipation_end) / (PRE_LANDING_START - anticipation_end);
            let coord = air * 2.0 - 1.0;
            (
                sine_pulse(air) * config.flight_stretch,
                -config.flight_lean * coord * coord.abs(),
            )
        } else {
            // Pre-landing: linear ramp into compression and backward lean.
            let t = (progress - PRE_LANDING_START) / (1.0 - PRE_LANDING_START);
            (
                lerp(0.0, config.pre_landing_squash, t),
                lerp(-config.flight_lean, config.pre_landing_lean, t),
            )
        };

        state.current_squash = exp_blend(state.current_squash, target_squash, config.squash_rate, dt);
        state.jump_lean = exp_blend(state.jump_lean, target_lean, config.lean_rate, dt);

        // Orient toward the jump bearing: fast while still anticipating on
        // the ground, slower once airborne.
        if let (Some(target), Some(jump_facing)) = (state.jump_target_angle, state.current_jump_facing)
        {
            let turn_speed = if progress < anticipation_end {
                config.anticipation_turn_speed
            } else {
                config.flight_turn_speed
            };
            let (next, _) = approach_angle(jump_facing, target, turn_speed * dt);
            state.current_jump_facing = Some(next);
        }
    }

    /// Jumping → grounded: snap to the impact pose and open the recovery
    /// window.
    fn land(state: &mut SquashState, facing: f32, config: &JumpConfig) {
        state.is_jumping = false;
        state.landing_timer = 0.0;
        state.current_squash = config.landing_squash;
        state.jump_lean = config.landing_lean;
        state.landing_facing = state.current_jump_facing.take().unwrap_or(facing);
        state.landing_lean = config.landing_lean;
        state.jump_target_angle = None;
    }

    fn advance_grounded(state: &mut SquashState, dt: f32, config: &JumpConfig) {
        if state.landing_timer < config.landing_recovery {
            state.landing_timer += dt;
            let t = (state.landing_timer / config.landing_recovery).clamp(0.0, 1.0);
            // Linear decay of the impact pose over the recovery window.
            state.current_squash = config.landing_squash * (1.0 - t);
            state.jump_lean = config.landing_lean * (1.0 - t);
        } else {
            state.current_squash = exp_blend(state.current_squash, 0.0, config.squash_rate, dt);
            state.jump_lean = exp_blend(state.jump_lean, 0.0, config.lean_rate, dt);
        }
    }

    pub fn evict(&mut self, entity: EntityHandle) {
        self.states.evict(entity);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
