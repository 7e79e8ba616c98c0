use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::config::IdleConfig;
use crate::motion::store::{AspectStore, EntityHandle};
use crate::utils::{exp_blend, sine_pulse};

/// Per-entity fidget record. Active only while the caller reports the
/// entity stationary.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleState {
    /// Countdown in seconds until the next fidget fires.
    next_fidget: f32,
    is_fidgeting: bool,
    fidget_timer: f32,
    target_tilt: f32,
    target_bank: f32,
    current_tilt: f32,
    current_bank: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdleSample {
    pub tilt: f32,
    pub bank: f32,
}

/// Randomized periodic micro-motion while stationary.
///
/// The instant motion resumes the record snaps back to baseline with no
/// smoothing; fidgets must never bleed into locomotion.
#[derive(Debug)]
pub struct IdleFidgetEngine {
    config: IdleConfig,
    states: AspectStore<IdleState>,
    rng: StdRng,
}

/// Next inter-fidget delay. Degenerate `min == max` configs collapse to a
/// fixed interval instead of an empty sample range.
fn next_interval(rng: &mut StdRng, config: &IdleConfig) -> f32 {
    if config.max_interval > config.min_interval {
        rng.random_range(config.min_interval..config.max_interval)
    } else {
        config.min_interval
    }
}

fn symmetric(rng: &mut StdRng, magnitude: f32) -> f32 {
    if magnitude > 0.0 {
        rng.random_range(-magnitude..magnitude)
    } else {
        0.0
    }
}

impl IdleFidgetEngine {
    #[must_use]
    pub fn new(config: IdleConfig, seed: u64) -> Self {
        Self {
            config,
            states: AspectStore::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn update(&mut self, entity: EntityHandle, stationary: bool, dt: f32) -> IdleSample {
        let Self {
            config,
            states,
            rng,
        } = self;
        let Some(state) = states.slot_with(entity, || IdleState {
            next_fidget: next_interval(rng, config),
            ..IdleState::default()
        }) else {
            return IdleSample::default();
        };

        if !stationary {
            // Hard reset, then reschedule so the next idle stretch starts
            // its own countdown.
            *state = IdleState {
                next_fidget: next_interval(rng, config),
                ..IdleState::default()
            };
            return IdleSample::default();
        }

        if state.is_fidgeting {
            state.fidget_timer += dt;
            let t = state.fidget_timer / config.fidget_duration;
            if t >= 1.0 {
                state.is_fidgeting = false;
                state.next_fidget = next_interval(rng, config);
                state.current_tilt = 0.0;
                state.current_bank = 0.0;
            } else {
                let envelope = sine_pulse(t);
                state.current_tilt = state.target_tilt * envelope;
                state.current_bank = state.target_bank * envelope;
            }
        } else {
            state.next_fidget -= dt;
            if state.next_fidget <= 0.0 {
                state.is_fidgeting = true;
                state.fidget_timer = 0.0;
                state.target_tilt = symmetric(rng, config.max_tilt);
                state.target_bank = symmetric(rng, config.max_bank);
            }
            // Residual smoothing back to zero between fidgets.
            state.current_tilt = exp_blend(state.current_tilt, 0.0, config.decay_rate, dt);
            state.current_bank = exp_blend(state.current_bank, 0.0, config.decay_rate, dt);
        }

        IdleSample {
            tilt: state.current_tilt,
            bank: state.current_bank,
        }
    }

    pub fn evict(&mut self, entity: EntityHandle) {
        self.states.evict(entity);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
