use crate::config::FacingConfig;
use crate::motion::MIN_DT;
use crate::motion::store::{AspectStore, EntityHandle};
use crate::utils::approach_angle;

/// Per-entity heading record. The facing is an unbounded radian accumulator
/// so downstream consumers see a continuous value across revolutions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacingState {
    current_facing: f32,
}

/// Result of one facing update.
///
/// `turn_rate` is the *applied* delta divided by dt: the rate banking and
/// anticipation react to, not the raw desired rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacingSample {
    pub turn_rate: f32,
    pub facing: f32,
}

/// Turn-rate-limited heading integrator; sole owner of steady-state facing.
#[derive(Debug)]
pub struct FacingController {
    config: FacingConfig,
    states: AspectStore<FacingState>,
}

impl FacingController {
    #[must_use]
    pub fn new(config: FacingConfig) -> Self {
        Self {
            config,
            states: AspectStore::new(),
        }
    }

    /// Integrates the heading toward `target`, clamping the step to
    /// `max_turn_speed * multiplier * dt`. A `None` target holds the
    /// current facing.
    pub fn update_facing(
        &mut self,
        entity: EntityHandle,
        target: Option<f32>,
        dt: f32,
        turn_speed_multiplier: f32,
    ) -> FacingSample {
        let Some(state) = self.states.slot(entity) else {
            return FacingSample::default();
        };
        let Some(target) = target else {
            return FacingSample {
                turn_rate: 0.0,
                facing: state.current_facing,
            };
        };

        let max_step = self.config.max_turn_speed * turn_speed_multiplier * dt;
        let (facing, applied) = approach_angle(state.current_facing, target, max_step);
        state.current_facing = facing;

        FacingSample {
            turn_rate: applied / dt.max(MIN_DT),
            facing,
        }
    }

    /// Jump-override write path: the only mutator of facing besides
    /// [`Self::update_facing`], used when a landing commits the airborne
    /// heading.
    pub fn override_facing(&mut self, entity: EntityHandle, facing: f32) {
        if let Some(state) = self.states.slot(entity) {
            state.current_facing = facing;
        }
    }

    /// Current facing without advancing it.
    #[must_use]
    pub fn facing(&self, entity: EntityHandle) -> f32 {
        self.states.get(entity).map_or(0.0, |s| s.current_facing)
    }

    pub fn evict(&mut self, entity: EntityHandle) {
        self.states.evict(entity);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
