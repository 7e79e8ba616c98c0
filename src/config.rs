//! Motion Tuning Configuration
//!
//! Every engine reads its tuning constants from one section of
//! [`MotionConfig`]. All sections deserialize from JSON with
//! field-by-field fallback to the built-in defaults, so a host can ship a
//! partial override file:
//!
//! ```rust,ignore
//! use animus::MotionConfig;
//!
//! // Built-in tuning
//! let config = MotionConfig::default();
//!
//! // Partial override: everything not named keeps its default
//! let config = MotionConfig::from_json_str(r#"{ "tilt": { "max_tilt": 0.5 } }"#)?;
//! ```
//!
//! [`MotionConfig::validate`] rejects out-of-range values up front so the
//! per-tick path never has to re-check them.

use serde::Deserialize;

use crate::errors::{AnimusError, Result};

// ---------------------------------------------------------------------------
// TiltConfig
// ---------------------------------------------------------------------------

/// Forward/back tilt and left/right bank from locomotion.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Blend fraction applied to raw speed once per call.
    ///
    /// This is a per-call fraction, not a rate: its effective time constant
    /// shortens as the frame rate rises. The tilt and bank blends below are
    /// dt-correct.
    pub speed_blend: f32,
    /// Tilt contributed per unit of acceleration.
    pub accel_scale: f32,
    /// Tilt at full cruise speed.
    pub cruise_tilt: f32,
    /// Clamp for the tilt target. Live tilt may transiently reach 1.5× this
    /// value when feeding layers push past it.
    pub max_tilt: f32,
    /// Clamp for bank.
    pub max_bank: f32,
    /// Bank contributed per rad/s of turn rate at full speed.
    pub bank_scale: f32,
    /// Exponential blend rate toward the tilt target (1/s).
    pub tilt_lerp_speed: f32,
    /// Exponential blend rate toward the bank target (1/s).
    pub bank_lerp_speed: f32,
    /// Speed considered "full cruise" when normalizing.
    pub max_speed: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            speed_blend: 0.2,
            accel_scale: 0.08,
            cruise_tilt: 0.12,
            max_tilt: 0.35,
            max_bank: 0.3,
            bank_scale: 0.25,
            tilt_lerp_speed: 8.0,
            bank_lerp_speed: 10.0,
            max_speed: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// FacingConfig
// ---------------------------------------------------------------------------

/// Turn-rate-limited heading integration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FacingConfig {
    /// Maximum heading change in rad/s before the per-call multiplier.
    pub max_turn_speed: f32,
}

impl Default for FacingConfig {
    fn default() -> Self {
        Self { max_turn_speed: 7.0 }
    }
}

// ---------------------------------------------------------------------------
// JumpConfig
// ---------------------------------------------------------------------------

/// Phase-driven squash/stretch and lean across a jump.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Vertical scale lost per unit of negative squash (`scale_y = 1 + squash * max_squash`).
    pub max_squash: f32,
    /// Vertical scale gained per unit of positive squash.
    pub max_stretch: f32,
    /// Depth of the pre-takeoff squat.
    pub anticipation_squash: f32,
    /// Backward lean while squatting.
    pub anticipation_lean: f32,
    /// Peak mid-flight stretch.
    pub flight_stretch: f32,
    /// Lean magnitude at takeoff/landing ends of the flight arc.
    pub flight_lean: f32,
    /// Squash target approached over the pre-landing ramp.
    pub pre_landing_squash: f32,
    /// Lean target approached over the pre-landing ramp.
    pub pre_landing_lean: f32,
    /// Squash snapped to at the instant of touchdown.
    pub landing_squash: f32,
    /// Lean snapped to at the instant of touchdown.
    pub landing_lean: f32,
    /// Seconds over which the landing compression decays to zero.
    pub landing_recovery: f32,
    /// Low-pass rate toward the squash target (1/s).
    pub squash_rate: f32,
    /// Low-pass rate toward the lean target (1/s). Slower than squash so the
    /// lean trails the compression.
    pub lean_rate: f32,
    /// Turn speed toward the jump bearing during anticipation (rad/s).
    pub anticipation_turn_speed: f32,
    /// Turn speed toward the jump bearing once airborne (rad/s).
    pub flight_turn_speed: f32,
    /// Horizontal travel below which the jump bearing falls back to the
    /// current facing instead of an `atan2` on a degenerate vector.
    pub min_travel: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            max_squash: 0.4,
            max_stretch: 0.25,
            anticipation_squash: 0.8,
            anticipation_lean: -0.15,
            flight_stretch: 0.6,
            flight_lean: 0.25,
            pre_landing_squash: -0.4,
            pre_landing_lean: -0.2,
            landing_squash: -0.55,
            landing_lean: -0.3,
            landing_recovery: 0.25,
            squash_rate: 18.0,
            lean_rate: 12.0,
            anticipation_turn_speed: 12.0,
            flight_turn_speed: 4.0,
            min_travel: 0.1,
        }
    }
}

// ---------------------------------------------------------------------------
// AnticipationConfig
// ---------------------------------------------------------------------------

/// Edge-triggered wind-up pulses.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnticipationConfig {
    /// Speed above which the entity counts as moving.
    pub speed_threshold: f32,
    /// Turn rate (rad/s) whose upward crossing triggers a turn wind-up.
    pub turn_threshold: f32,
    /// Duration of the start-moving squat pulse.
    pub start_duration: f32,
    /// Duration of the stop-moving lean pulse.
    pub stop_duration: f32,
    /// Duration of the sharp-turn lean pulse.
    pub turn_duration: f32,
    /// Squat depth before acceleration (negative squash).
    pub start_squash: f32,
    /// Forward lean before stopping.
    pub stop_lean: f32,
    /// Counter-lean before a sharp turn.
    pub turn_lean: f32,
    /// Scale on the spring velocity handed to follow-through when a stop
    /// pulse completes.
    pub handoff_gain: f32,
}

impl Default for AnticipationConfig {
    fn default() -> Self {
        Self {
            speed_threshold: 0.15,
            turn_threshold: 2.5,
            start_duration: 0.18,
            stop_duration: 0.22,
            turn_duration: 0.15,
            start_squash: -0.25,
            stop_lean: 0.2,
            turn_lean: 0.18,
            handoff_gain: 4.0,
        }
    }
}

// ---------------------------------------------------------------------------
// FollowThroughConfig
// ---------------------------------------------------------------------------

/// Damped-spring overshoot after a stop.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FollowThroughConfig {
    /// Spring stiffness (`force = -tilt * stiffness`).
    pub stiffness: f32,
    /// Multiplicative velocity damping applied once per tick.
    pub damping: f32,
    /// Hard clamp on the overshoot tilt.
    pub max_overshoot: f32,
    /// Settling is force-ended after this many seconds.
    pub max_settle_time: f32,
    /// Displacement below which the spring counts as at rest.
    pub rest_epsilon: f32,
    /// Velocity below which the spring counts as at rest.
    pub velocity_epsilon: f32,
}

impl Default for FollowThroughConfig {
    fn default() -> Self {
        Self {
            stiffness: 60.0,
            damping: 0.88,
            max_overshoot: 0.15,
            max_settle_time: 1.2,
            rest_epsilon: 0.005,
            velocity_epsilon: 0.02,
        }
    }
}

// ---------------------------------------------------------------------------
// IdleConfig
// ---------------------------------------------------------------------------

/// Randomized micro-motion while stationary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    /// Minimum seconds between fidgets.
    pub min_interval: f32,
    /// Maximum seconds between fidgets.
    pub max_interval: f32,
    /// Duration of one fidget pulse.
    pub fidget_duration: f32,
    /// Largest random tilt target.
    pub max_tilt: f32,
    /// Largest random bank target.
    pub max_bank: f32,
    /// Residual decay rate back to baseline between fidgets (1/s).
    pub decay_rate: f32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            min_interval: 2.0,
            max_interval: 5.0,
            fidget_duration: 0.6,
            max_tilt: 0.08,
            max_bank: 0.06,
            decay_rate: 6.0,
        }
    }
}

// ---------------------------------------------------------------------------
// HoverConfig
// ---------------------------------------------------------------------------

/// Always-on circular drift, vertical bob, and reactive tilt.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Radius of the XZ drift circle.
    pub drift_radius: f32,
    /// Peak vertical bob offset.
    pub bob_amplitude: f32,
    /// Mean drift angular frequency (rad/s); per-entity values are
    /// randomized within ±`drift_freq_jitter` of this.
    pub drift_freq_mean: f32,
    pub drift_freq_jitter: f32,
    /// Mean bob angular frequency (rad/s).
    pub bob_freq_mean: f32,
    pub bob_freq_jitter: f32,
    /// Reactive tilt per unit of drift offset.
    pub tilt_scale: f32,
    /// Lag-filter rate for the reactive tilt (1/s). Deliberately slower
    /// than the drift so the tilt trails it.
    pub tilt_rate: f32,
    /// Amplitude attenuation per unit of speed.
    pub speed_damp: f32,
    /// Amplitude multiplier while airborne.
    pub jump_damp: f32,
    /// Floor on the damped amplitude; hover recedes but never vanishes.
    pub min_amplitude: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            drift_radius: 0.05,
            bob_amplitude: 0.04,
            drift_freq_mean: 0.6,
            drift_freq_jitter: 0.2,
            bob_freq_mean: 1.1,
            bob_freq_jitter: 0.3,
            tilt_scale: 0.5,
            tilt_rate: 3.0,
            speed_damp: 0.8,
            jump_damp: 0.35,
            min_amplitude: 0.2,
        }
    }
}

// ---------------------------------------------------------------------------
// CompositorConfig
// ---------------------------------------------------------------------------

/// Layer-merging parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Seconds after touchdown during which captured landing values blend
    /// back toward steady-state locomotion. Must not exceed
    /// `jump.landing_recovery`, so the blend always completes while the
    /// landing window is still open.
    pub landing_blend: f32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self { landing_blend: 0.2 }
    }
}

// ---------------------------------------------------------------------------
// MotionConfig
// ---------------------------------------------------------------------------

/// Aggregate tuning for the whole motion core.
///
/// | Section        | Engine                                     |
/// |----------------|--------------------------------------------|
/// | `tilt`         | [`TiltBankEngine`](crate::motion::TiltBankEngine)       |
/// | `facing`       | [`FacingController`](crate::motion::FacingController)   |
/// | `jump`         | [`SquashStretchEngine`](crate::motion::SquashStretchEngine) |
/// | `anticipation` | [`AnticipationEngine`](crate::motion::AnticipationEngine) |
/// | `follow_through` | [`FollowThroughEngine`](crate::motion::FollowThroughEngine) |
/// | `idle`         | [`IdleFidgetEngine`](crate::motion::IdleFidgetEngine)   |
/// | `hover`        | [`HoverDriftEngine`](crate::motion::HoverDriftEngine)   |
/// | `compositor`   | [`compositor`](crate::motion::compositor) functions     |
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub tilt: TiltConfig,
    pub facing: FacingConfig,
    pub jump: JumpConfig,
    pub anticipation: AnticipationConfig,
    pub follow_through: FollowThroughConfig,
    pub idle: IdleConfig,
    pub hover: HoverConfig,
    pub compositor: CompositorConfig,
    /// Seed for the per-entity randomized parameters (hover character,
    /// fidget scheduling). Fixed so a session replays identically.
    pub rng_seed: u64,
}

impl MotionConfig {
    /// Parses and validates a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Rejects values the per-tick path assumes are in range.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(AnimusError::Config(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        positive("tilt.max_tilt", self.tilt.max_tilt)?;
        positive("tilt.max_bank", self.tilt.max_bank)?;
        positive("tilt.max_speed", self.tilt.max_speed)?;
        positive("facing.max_turn_speed", self.facing.max_turn_speed)?;
        positive("jump.landing_recovery", self.jump.landing_recovery)?;
        positive("jump.min_travel", self.jump.min_travel)?;
        positive("anticipation.start_duration", self.anticipation.start_duration)?;
        positive("anticipation.stop_duration", self.anticipation.stop_duration)?;
        positive("anticipation.turn_duration", self.anticipation.turn_duration)?;
        positive("follow_through.stiffness", self.follow_through.stiffness)?;
        positive("follow_through.max_overshoot", self.follow_through.max_overshoot)?;
        positive("idle.fidget_duration", self.idle.fidget_duration)?;
        positive("compositor.landing_blend", self.compositor.landing_blend)?;

        if !(0.0..1.0).contains(&self.tilt.speed_blend) {
            return Err(AnimusError::Config(format!(
                "tilt.speed_blend must be in [0, 1), got {}",
                self.tilt.speed_blend
            )));
        }
        if !(0.0..=1.0).contains(&self.follow_through.damping) {
            return Err(AnimusError::Config(format!(
                "follow_through.damping must be in [0, 1], got {}",
                self.follow_through.damping
            )));
        }
        if self.idle.min_interval > self.idle.max_interval {
            return Err(AnimusError::Config(format!(
                "idle.min_interval ({}) exceeds idle.max_interval ({})",
                self.idle.min_interval, self.idle.max_interval
            )));
        }
        if self.hover.min_amplitude <= 0.0 {
            return Err(AnimusError::Config(format!(
                "hover.min_amplitude must be positive, got {}",
                self.hover.min_amplitude
            )));
        }
        if self.hover.drift_freq_jitter >= self.hover.drift_freq_mean
            || self.hover.bob_freq_jitter >= self.hover.bob_freq_mean
        {
            return Err(AnimusError::Config(
                "hover frequency jitter must stay below its mean".to_string(),
            ));
        }
        if self.compositor.landing_blend > self.jump.landing_recovery {
            return Err(AnimusError::Config(format!(
                "compositor.landing_blend ({}) exceeds jump.landing_recovery ({})",
                self.compositor.landing_blend, self.jump.landing_recovery
            )));
        }

        Ok(())
    }
}
