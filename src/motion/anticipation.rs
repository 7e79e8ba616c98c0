use crate::config::AnticipationConfig;
use crate::motion::follow_through::FollowThroughEngine;
use crate::motion::store::{AspectStore, EntityHandle};
use crate::utils::sine_pulse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnticipationPhase {
    #[default]
    None,
    Start,
    Stop,
    Turn,
}

/// Per-entity wind-up record. Phase transitions happen only via edge
/// detection from the quiescent phase; a playing pulse is never re-entered
/// or replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnticipationState {
    phase: AnticipationPhase,
    timer: f32,
    was_moving: bool,
    prev_turn_rate: f32,
    /// Sign of the lean for a turn pulse, captured at the edge.
    turn_sign: f32,
    anticipation_squash: f32,
    anticipation_tilt: f32,
}

/// Result of one anticipation update, composed additively downstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnticipationSample {
    pub squash: f32,
    pub tilt: f32,
}

/// Edge-triggered wind-up pulses on start-moving, stop-moving, and
/// sharp-turn events.
///
/// On stop-pulse completion this engine seeds [`FollowThroughEngine`] with
/// an opposing spring velocity; the hand-off is the only coupling between
/// the two.
#[derive(Debug)]
pub struct AnticipationEngine {
    config: AnticipationConfig,
    states: AspectStore<AnticipationState>,
}

impl AnticipationEngine {
    #[must_use]
    pub fn new(config: AnticipationConfig) -> Self {
        Self {
            config,
            states: AspectStore::new(),
        }
    }

    pub fn update(
        &mut self,
        entity: EntityHandle,
        speed: f32,
        turn_rate: f32,
        dt: f32,
        follow_through: &mut FollowThroughEngine,
    ) -> AnticipationSample {
        let config = &self.config;
        let Some(state) = self.states.slot(entity) else {
            return AnticipationSample::default();
        };

        let moving = speed > config.speed_threshold;
        if state.phase == AnticipationPhase::None {
            if moving && !state.was_moving {
                state.phase = AnticipationPhase::Start;
                state.timer = 0.0;
            } else if !moving && state.was_moving {
                state.phase = AnticipationPhase::Stop;
                state.timer = 0.0;
            } else if turn_rate.abs() > config.turn_threshold
                && state.prev_turn_rate.abs() <= config.turn_threshold
            {
                state.phase = AnticipationPhase::Turn;
                state.timer = 0.0;
                // Lean away from the upcoming turn.
                state.turn_sign = -turn_rate.signum();
            }
        }
        state.was_moving = moving;
        state.prev_turn_rate = turn_rate;

        let duration = match state.phase {
            AnticipationPhase::None => {
                state.anticipation_squash = 0.0;
                state.anticipation_tilt = 0.0;
                return AnticipationSample::default();
            }
            AnticipationPhase::Start => config.start_duration,
            AnticipationPhase::Stop => config.stop_duration,
            AnticipationPhase::Turn => config.turn_duration,
        };

        state.timer += dt;
        let t = state.timer / duration;
        if t >= 1.0 {
            let completed = state.phase;
            state.phase = AnticipationPhase::None;
            state.anticipation_squash = 0.0;
            state.anticipation_tilt = 0.0;
            // A finished stop pulse hands its energy to follow-through as an
            // opposing spring velocity.
            if completed == AnticipationPhase::Stop {
                follow_through.trigger(entity, -config.stop_lean * config.handoff_gain);
            }
            return AnticipationSample::default();
        }

        let envelope = sine_pulse(t);
        let (squash, tilt) = match state.phase {
            AnticipationPhase::Start => (config.start_squash * envelope, 0.0),
            AnticipationPhase::Stop => (0.0, config.stop_lean * envelope),
            AnticipationPhase::Turn => (0.0, config.turn_lean * state.turn_sign * envelope),
            AnticipationPhase::None => (0.0, 0.0),
        };
        state.anticipation_squash = squash;
        state.anticipation_tilt = tilt;

        AnticipationSample { squash, tilt }
    }

    pub fn evict(&mut self, entity: EntityHandle) {
        self.states.evict(entity);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
