use glam::Vec3;
use slotmap::{Key, SlotMap};

use crate::config::MotionConfig;
use crate::motion::anticipation::AnticipationEngine;
use crate::motion::compositor::{self, TiltBankLayers};
use crate::motion::facing::FacingController;
use crate::motion::follow_through::FollowThroughEngine;
use crate::motion::hover::HoverDriftEngine;
use crate::motion::idle::IdleFidgetEngine;
use crate::motion::jump::{JumpTelemetry, SquashStretchEngine};
use crate::motion::store::EntityHandle;
use crate::motion::tilt::TiltBankEngine;

/// Telemetry one locomotion collaborator supplies per entity per tick.
#[derive(Debug, Clone, Copy)]
pub struct MotionInput {
    /// Scalar velocity magnitude.
    pub speed: f32,
    /// Desired heading; `None` holds the current facing.
    pub target_facing: Option<f32>,
    /// Scales the facing controller's maximum turn speed for this tick.
    pub turn_speed_multiplier: f32,
    pub jump: JumpTelemetry,
    /// Derived externally from speed/intent, not recomputed here.
    pub stationary: bool,
    /// Frame delta time, seconds. Negative values are treated as zero.
    pub dt: f32,
    /// Monotonic clock, seconds. Drives the hover phase.
    pub time: f32,
}

impl Default for MotionInput {
    fn default() -> Self {
        Self {
            speed: 0.0,
            target_facing: None,
            turn_speed_multiplier: 1.0,
            jump: JumpTelemetry::default(),
            stationary: true,
            dt: 0.0,
            time: 0.0,
        }
    }
}

/// Transform delta handed to the presentation collaborator each tick.
#[derive(Debug, Clone, Copy)]
pub struct MotionFrame {
    /// Forward/back orientation delta.
    pub tilt: f32,
    /// Left/right orientation delta.
    pub bank: f32,
    /// Heading, radians (unbounded accumulator).
    pub facing: f32,
    /// Non-uniform scale.
    pub scale: Vec3,
    /// Position offset from hover drift.
    pub offset: Vec3,
}

impl Default for MotionFrame {
    fn default() -> Self {
        Self {
            tilt: 0.0,
            bank: 0.0,
            facing: 0.0,
            scale: Vec3::ONE,
            offset: Vec3::ZERO,
        }
    }
}

/// Owns the engine set and the entity registry; advances every layer in
/// dependency order once per tick per entity and composes the result.
///
/// Single-threaded and synchronous: no update suspends, blocks, or shares
/// state across entities. Ceasing to call [`advance`](Self::advance) simply
/// freezes an entity's animation; resuming later picks up the stale but
/// valid records.
#[derive(Debug)]
pub struct MotionSystem {
    config: MotionConfig,
    entities: SlotMap<EntityHandle, ()>,
    tilt: TiltBankEngine,
    facing: FacingController,
    squash: SquashStretchEngine,
    anticipation: AnticipationEngine,
    follow_through: FollowThroughEngine,
    idle: IdleFidgetEngine,
    hover: HoverDriftEngine,
}

impl Default for MotionSystem {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl MotionSystem {
    #[must_use]
    pub fn new(config: MotionConfig) -> Self {
        let seed = config.rng_seed;
        Self {
            tilt: TiltBankEngine::new(config.tilt.clone()),
            facing: FacingController::new(config.facing.clone()),
            squash: SquashStretchEngine::new(config.jump.clone()),
            anticipation: AnticipationEngine::new(config.anticipation.clone()),
            follow_through: FollowThroughEngine::new(config.follow_through.clone()),
            idle: IdleFidgetEngine::new(config.idle.clone(), seed),
            hover: HoverDriftEngine::new(config.hover.clone(), seed.wrapping_add(1)),
            entities: SlotMap::with_key(),
            config,
        }
    }

    /// Mints a handle for a newly spawned entity. Aspect records are still
    /// created lazily, on the entity's first [`advance`](Self::advance).
    pub fn register(&mut self) -> EntityHandle {
        self.entities.insert(())
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Uniform base scale composed under the squash for `entity`.
    pub fn set_base_scale(&mut self, entity: EntityHandle, base_scale: f32) {
        self.squash.set_base_scale(entity, base_scale);
    }

    /// Runs every engine for `entity` in coupling order and composes one
    /// transform delta.
    ///
    /// Order within the tick: facing feeds banking and anticipation;
    /// anticipation seeds follow-through; squash consumes the integrated
    /// facing; the compositor merges everything last.
    pub fn advance(&mut self, entity: EntityHandle, input: &MotionInput) -> MotionFrame {
        if entity.is_null() {
            log::warn!("advance called with the null entity handle");
            return MotionFrame::default();
        }
        let dt = input.dt.max(0.0);

        let facing = self.facing.update_facing(
            entity,
            input.target_facing,
            dt,
            input.turn_speed_multiplier,
        );
        let tilt = self.tilt.update_tilt(entity, input.speed, dt);
        let bank = self
            .tilt
            .update_bank(entity, facing.turn_rate, tilt.smoothed_speed, dt);
        let anticipation = self.anticipation.update(
            entity,
            input.speed,
            facing.turn_rate,
            dt,
            &mut self.follow_through,
        );
        let overshoot = self.follow_through.update(entity, dt);

        let squash = self.squash.update(entity, &input.jump, facing.facing, dt);
        if squash.just_landed {
            // Commit the airborne heading so steady-state facing resumes
            // from where the jump left it.
            if let Some(landing) = &squash.landing {
                self.facing.override_facing(entity, landing.facing);
            }
        }

        let idle = self.idle.update(entity, input.stationary, dt);
        let hover = self.hover.update(
            entity,
            input.time,
            tilt.smoothed_speed,
            squash.is_jumping,
            dt,
        );

        let layers = TiltBankLayers {
            locomotion_tilt: tilt.tilt,
            locomotion_bank: bank,
            anticipation_tilt: anticipation.tilt,
            idle_tilt: idle.tilt,
            idle_bank: idle.bank,
            overshoot_tilt: overshoot,
            hover_tilt: hover.tilt_x,
            hover_bank: hover.tilt_z,
        };
        let (out_tilt, out_bank) =
            compositor::combine_tilt_bank(&layers, &squash, &self.config.compositor);

        let steady_facing = self.facing.facing(entity);
        let out_facing = compositor::blend_facing(steady_facing, &squash, &self.config.compositor);

        let scale = compositor::compute_scale(squash.squash, squash.base_scale, &self.config.jump);
        let scale = compositor::apply_anticipation_squash(scale, anticipation.squash, &self.config.jump);

        MotionFrame {
            tilt: out_tilt,
            bank: out_bank,
            facing: out_facing,
            scale,
            offset: hover.offset,
        }
    }

    /// Evicts every per-aspect record for `entity`. Must be called on
    /// despawn; skipping it leaks records across spawn/despawn cycles.
    pub fn clear(&mut self, entity: EntityHandle) {
        if self.entities.remove(entity).is_none() {
            log::warn!("clear called for unknown entity {entity:?}");
        }
        self.tilt.evict(entity);
        self.facing.evict(entity);
        self.squash.evict(entity);
        self.anticipation.evict(entity);
        self.follow_through.evict(entity);
        self.idle.evict(entity);
        self.hover.evict(entity);
    }

    /// Session reset: evicts every record for every entity.
    pub fn clear_all(&mut self) {
        log::debug!("clearing motion state for {} entities", self.entities.len());
        self.entities.clear();
        self.tilt.clear();
        self.facing.clear();
        self.squash.clear();
        self.anticipation.clear();
        self.follow_through.clear();
        self.idle.clear();
        self.hover.clear();
    }
}
