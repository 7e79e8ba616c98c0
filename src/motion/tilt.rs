use crate::config::TiltConfig;
use crate::motion::MIN_DT;
use crate::motion::store::{AspectStore, EntityHandle};
use crate::utils::exp_blend;

/// Live tilt may transiently exceed the target clamp by this factor when
/// feeding layers push past it.
const TILT_OVERSHOOT_BAND: f32 = 1.5;

/// Per-entity tilt/bank record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiltState {
    /// Smoothed speed from the previous tick.
    prev_speed: f32,
    current_tilt: f32,
    current_bank: f32,
}

/// Result of one tilt update, fed onward to banking and hover damping.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiltSample {
    pub smoothed_speed: f32,
    pub acceleration: f32,
    pub tilt: f32,
}

/// Converts smoothed speed/acceleration and turn rate into forward/back
/// tilt and left/right bank.
#[derive(Debug)]
pub struct TiltBankEngine {
    config: TiltConfig,
    states: AspectStore<TiltState>,
}

impl TiltBankEngine {
    #[must_use]
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            states: AspectStore::new(),
        }
    }

    /// Smooths the raw speed, derives acceleration, and advances the tilt.
    ///
    /// Target tilt is `accel * accel_scale + normalized_speed * cruise_tilt`
    /// clamped to `±max_tilt`; the live value chases it with a dt-correct
    /// exponential blend and is re-clamped to the wider `±1.5 * max_tilt`
    /// band so transient overshoot from feeding layers survives.
    pub fn update_tilt(&mut self, entity: EntityHandle, speed: f32, dt: f32) -> TiltSample {
        let Some(state) = self.states.slot(entity) else {
            return TiltSample::default();
        };

        // Fixed per-call blend fraction; see `TiltConfig::speed_blend`.
        let smoothed = state.prev_speed + (speed - state.prev_speed) * self.config.speed_blend;
        let acceleration = (smoothed - state.prev_speed) / dt.max(MIN_DT);
        state.prev_speed = smoothed;

        let normalized = (smoothed / self.config.max_speed).clamp(0.0, 1.0);
        let target = (acceleration * self.config.accel_scale + normalized * self.config.cruise_tilt)
            .clamp(-self.config.max_tilt, self.config.max_tilt);

        let band = self.config.max_tilt * TILT_OVERSHOOT_BAND;
        state.current_tilt =
            exp_blend(state.current_tilt, target, self.config.tilt_lerp_speed, dt).clamp(-band, band);

        TiltSample {
            smoothed_speed: smoothed,
            acceleration,
            tilt: state.current_tilt,
        }
    }

    /// Advances the bank toward `-turn_rate * bank_scale * speed_factor`.
    ///
    /// The bank target is clamped to `±max_bank` before blending, so the
    /// live value never leaves that band.
    pub fn update_bank(
        &mut self,
        entity: EntityHandle,
        turn_rate: f32,
        smoothed_speed: f32,
        dt: f32,
    ) -> f32 {
        let Some(state) = self.states.slot(entity) else {
            return 0.0;
        };

        let speed_factor = (smoothed_speed / self.config.max_speed).clamp(0.0, 1.0);
        let target = (-turn_rate * self.config.bank_scale * speed_factor)
            .clamp(-self.config.max_bank, self.config.max_bank);

        state.current_bank = exp_blend(state.current_bank, target, self.config.bank_lerp_speed, dt);
        state.current_bank
    }

    pub fn evict(&mut self, entity: EntityHandle) {
        self.states.evict(entity);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
