use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::config::HoverConfig;
use crate::motion::store::{AspectStore, EntityHandle};
use crate::utils::exp_blend;

/// Per-entity hover record.
///
/// Phase, frequency, and direction are assigned from the engine's RNG at
/// first access and never change afterward; they are the identity of an
/// entity's hover character. Only the reactive tilt fields mutate.
#[derive(Debug, Clone, Copy)]
pub struct HoverState {
    drift_phase: f32,
    bob_phase: f32,
    drift_freq: f32,
    bob_freq: f32,
    /// +1 or -1, fixed orbit handedness.
    drift_direction: f32,
    current_tilt_x: f32,
    current_tilt_z: f32,
}

fn jittered(rng: &mut StdRng, mean: f32, jitter: f32) -> f32 {
    if jitter > 0.0 {
        mean + rng.random_range(-jitter..jitter)
    } else {
        mean
    }
}

impl HoverState {
    fn fresh(rng: &mut StdRng, config: &HoverConfig) -> Self {
        Self {
            drift_phase: rng.random_range(0.0..TAU),
            bob_phase: rng.random_range(0.0..TAU),
            drift_freq: jittered(rng, config.drift_freq_mean, config.drift_freq_jitter),
            bob_freq: jittered(rng, config.bob_freq_mean, config.bob_freq_jitter),
            drift_direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            current_tilt_x: 0.0,
            current_tilt_z: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HoverSample {
    /// Position offset: circular XZ drift plus vertical bob.
    pub offset: Vec3,
    pub tilt_x: f32,
    pub tilt_z: f32,
}

/// Always-on per-entity drift, bob, and lagged reactive tilt.
///
/// Not a state machine: the offset is a pure function of the monotonic
/// clock and the entity's fixed random parameters, so it is bounded for
/// arbitrarily large `time` and picks up seamlessly after any pause.
#[derive(Debug)]
pub struct HoverDriftEngine {
    config: HoverConfig,
    states: AspectStore<HoverState>,
    rng: StdRng,
}

impl HoverDriftEngine {
    #[must_use]
    pub fn new(config: HoverConfig, seed: u64) -> Self {
        Self {
            config,
            states: AspectStore::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Samples the hover layer at `time`, damping its amplitude by the
    /// current speed and jump state, never to zero.
    pub fn update(
        &mut self,
        entity: EntityHandle,
        time: f32,
        speed: f32,
        jumping: bool,
        dt: f32,
    ) -> HoverSample {
        let Self {
            config,
            states,
            rng,
        } = self;
        let Some(state) = states.slot_with(entity, || HoverState::fresh(rng, config)) else {
            return HoverSample::default();
        };

        let mut amplitude = 1.0 / (1.0 + speed.max(0.0) * config.speed_damp);
        if jumping {
            amplitude *= config.jump_damp;
        }
        let amplitude = amplitude.max(config.min_amplitude);

        let drift_angle = time * state.drift_freq + state.drift_phase;
        let dx = drift_angle.cos() * config.drift_radius * state.drift_direction * amplitude;
        let dz = drift_angle.sin() * config.drift_radius * amplitude;
        let dy = (time * state.bob_freq + state.bob_phase).sin() * config.bob_amplitude * amplitude;

        // Reactive tilt follows the drift vector through a lag filter, so
        // the body trails its own wander.
        let target_tilt_x = dz * config.tilt_scale;
        let target_tilt_z = -dx * config.tilt_scale;
        state.current_tilt_x = exp_blend(state.current_tilt_x, target_tilt_x, config.tilt_rate, dt);
        state.current_tilt_z = exp_blend(state.current_tilt_z, target_tilt_z, config.tilt_rate, dt);

        HoverSample {
            offset: Vec3::new(dx, dy, dz),
            tilt_x: state.current_tilt_x,
            tilt_z: state.current_tilt_z,
        }
    }

    /// Fixed hover parameters for `entity`, if its record exists.
    #[must_use]
    pub fn character(&self, entity: EntityHandle) -> Option<(f32, f32, f32, f32, f32)> {
        self.states.get(entity).map(|s| {
            (
                s.drift_phase,
                s.bob_phase,
                s.drift_freq,
                s.bob_freq,
                s.drift_direction,
            )
        })
    }

    pub fn evict(&mut self, entity: EntityHandle) {
        self.states.evict(entity);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
