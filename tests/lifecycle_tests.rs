//! Lifecycle & System Composition Tests
//!
//! Tests for:
//! - Lazy record creation and explicit eviction (clear / clear_all)
//! - No stale values surviving a clear
//! - Raw-handle round-tripping
//! - Jump-priority facing override and the landing blend window
//! - The null handle degrading to a default frame

use glam::Vec3;

use animus::motion::JumpTelemetry;
use animus::{EntityHandle, MotionInput, MotionSystem};

const DT: f32 = 1.0 / 60.0;

fn moving(speed: f32, time: f32) -> MotionInput {
    MotionInput {
        speed,
        stationary: false,
        dt: DT,
        time,
        ..MotionInput::default()
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn clear_discards_all_stale_state() {
    let mut motion = MotionSystem::default();
    let entity = motion.register();

    // Build up nonzero tilt state.
    let mut time = 0.0;
    let mut warmed = 0.0;
    for _ in 0..120 {
        time += DT;
        warmed = motion.advance(entity, &moving(1.8, time)).tilt;
    }
    assert!(warmed.abs() > 0.01, "warm-up produced no tilt");

    motion.clear(entity);

    // A fresh record at zero speed has nothing to tilt from; stale smoothed
    // speed would leak a nonzero value here. Only the first tick of hover
    // tilt (bounded well under 0.005) remains.
    let frame = motion.advance(entity, &moving(0.0, time + DT));
    assert!(
        frame.tilt.abs() < 0.005,
        "tilt {} survived the clear",
        frame.tilt
    );
    assert!((frame.scale - Vec3::ONE).length() < 1e-4);
}

#[test]
fn clear_all_resets_the_registry() {
    let mut motion = MotionSystem::default();
    let a = motion.register();
    let _b = motion.register();
    assert_eq!(motion.len(), 2);

    motion.advance(a, &moving(1.0, 0.0));
    motion.clear_all();
    assert!(motion.is_empty());

    // The system keeps working after a session reset.
    let c = motion.register();
    let frame = motion.advance(c, &moving(0.5, 1.0));
    assert!(frame.scale.y > 0.0);
}

#[test]
fn registered_entities_are_counted_and_removed() {
    let mut motion = MotionSystem::default();
    let a = motion.register();
    let b = motion.register();
    assert_eq!(motion.len(), 2);

    motion.clear(a);
    assert_eq!(motion.len(), 1);
    motion.clear(b);
    assert!(motion.is_empty());
}

#[test]
fn raw_handles_round_trip() {
    let mut motion = MotionSystem::default();
    let entity = motion.register();

    let mut time = 0.0;
    for _ in 0..30 {
        time += DT;
        motion.advance(
            entity,
            &MotionInput {
                target_facing: Some(1.0),
                stationary: false,
                dt: DT,
                time,
                ..MotionInput::default()
            },
        );
    }

    // The same records are reachable through the reconstructed handle.
    let resurrected = EntityHandle::from_raw(entity.to_raw());
    let frame = motion.advance(
        resurrected,
        &MotionInput {
            target_facing: None,
            stationary: false,
            dt: DT,
            time: time + DT,
            ..MotionInput::default()
        },
    );
    assert!(frame.facing > 0.5, "facing state lost across raw round-trip");
}

#[test]
fn null_handle_degrades_to_a_default_frame() {
    let mut motion = MotionSystem::default();
    let frame = motion.advance(EntityHandle::default(), &moving(2.0, 0.0));
    assert_eq!(frame.tilt, 0.0);
    assert_eq!(frame.scale, Vec3::ONE);
    assert_eq!(frame.offset, Vec3::ZERO);
}

// ============================================================================
// Jump priority & landing blend through the full system
// ============================================================================

#[test]
fn airborne_facing_overrides_and_lands_committed() {
    let mut motion = MotionSystem::default();
    let entity = motion.register();

    // Face 1.5 rad, then jump along +Z (bearing 0).
    let mut time = 0.0;
    for _ in 0..120 {
        time += DT;
        motion.advance(
            entity,
            &MotionInput {
                target_facing: Some(1.5),
                stationary: false,
                dt: DT,
                time,
                ..MotionInput::default()
            },
        );
    }

    let steps = 36;
    let mut airborne_facing = f32::NAN;
    for i in 0..=steps {
        time += DT;
        let frame = motion.advance(
            entity,
            &MotionInput {
                // Heading target still insists on 1.5; the jump must win.
                target_facing: Some(1.5),
                stationary: false,
                jump: JumpTelemetry {
                    in_air: true,
                    progress: i as f32 / steps as f32,
                    anticipation_end: 0.2,
                    start_pos: Vec3::ZERO,
                    end_pos: Vec3::new(0.0, 0.0, 2.0),
                },
                dt: DT,
                time,
                ..MotionInput::default()
            },
        );
        airborne_facing = frame.facing;
    }
    assert!(
        airborne_facing < 0.5,
        "airborne facing {airborne_facing} never turned toward the jump bearing"
    );

    // Touchdown: with no further heading target the committed facing stays
    // near the jump bearing instead of snapping back to 1.5.
    for _ in 0..30 {
        time += DT;
        let frame = motion.advance(
            entity,
            &MotionInput {
                target_facing: None,
                stationary: false,
                dt: DT,
                time,
                ..MotionInput::default()
            },
        );
        assert!(
            frame.facing < 0.6,
            "landed facing {} snapped back past the committed heading",
            frame.facing
        );
    }
}

#[test]
fn airborne_tilt_is_the_jump_lean_alone() {
    let mut motion = MotionSystem::default();
    let entity = motion.register();

    // Spin up locomotion tilt.
    let mut time = 0.0;
    for _ in 0..120 {
        time += DT;
        motion.advance(entity, &moving(2.0, time));
    }

    // Mid-flight the lean layer replaces the whole tilt sum; bank drops to
    // zero outright.
    time += DT;
    let frame = motion.advance(
        entity,
        &MotionInput {
            speed: 2.0,
            stationary: false,
            jump: JumpTelemetry {
                in_air: true,
                progress: 0.5,
                anticipation_end: 0.2,
                start_pos: Vec3::ZERO,
                end_pos: Vec3::new(0.0, 0.0, 2.0),
            },
            dt: DT,
            time,
            ..MotionInput::default()
        },
    );
    assert_eq!(frame.bank, 0.0, "bank leaked through the jump override");
}
