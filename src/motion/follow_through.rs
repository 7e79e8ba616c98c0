use crate::config::FollowThroughConfig;
use crate::motion::store::{AspectStore, EntityHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowThroughPhase {
    #[default]
    None,
    Settling,
}

/// Per-entity damped-spring record.
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowThroughState {
    phase: FollowThroughPhase,
    timer: f32,
    overshoot_tilt: f32,
    overshoot_velocity: f32,
}

/// Damped-spring overshoot, seeded by [`AnticipationEngine`] when a stop
/// pulse completes.
///
/// [`AnticipationEngine`]: crate::motion::AnticipationEngine
#[derive(Debug)]
pub struct FollowThroughEngine {
    config: FollowThroughConfig,
    states: AspectStore<FollowThroughState>,
}

impl FollowThroughEngine {
    #[must_use]
    pub fn new(config: FollowThroughConfig) -> Self {
        Self {
            config,
            states: AspectStore::new(),
        }
    }

    /// Starts settling from rest with the given initial spring velocity.
    pub fn trigger(&mut self, entity: EntityHandle, velocity: f32) {
        if let Some(state) = self.states.slot(entity) {
            state.phase = FollowThroughPhase::Settling;
            state.timer = 0.0;
            state.overshoot_tilt = 0.0;
            state.overshoot_velocity = velocity;
        }
    }

    /// Integrates the spring one tick and returns the overshoot tilt.
    ///
    /// Settling ends when the maximum settle duration elapses or both
    /// displacement and velocity fall under their epsilons, whichever
    /// comes first, so the spring never oscillates indefinitely.
    pub fn update(&mut self, entity: EntityHandle, dt: f32) -> f32 {
        let config = &self.config;
        let Some(state) = self.states.slot(entity) else {
            return 0.0;
        };
        if state.phase != FollowThroughPhase::Settling {
            return 0.0;
        }

        state.timer += dt;

        let force = -state.overshoot_tilt * config.stiffness;
        state.overshoot_velocity += force * dt;
        // Per-tick multiplicative damping.
        state.overshoot_velocity *= config.damping;
        state.overshoot_tilt = (state.overshoot_tilt + state.overshoot_velocity * dt)
            .clamp(-config.max_overshoot, config.max_overshoot);

        let at_rest = state.overshoot_tilt.abs() < config.rest_epsilon
            && state.overshoot_velocity.abs() < config.velocity_epsilon;
        if state.timer >= config.max_settle_time || at_rest {
            *state = FollowThroughState::default();
            return 0.0;
        }

        state.overshoot_tilt
    }

    pub fn evict(&mut self, entity: EntityHandle) {
        self.states.evict(entity);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
