//! Tilt/Bank & Facing Tests
//!
//! Tests for:
//! - Tilt clamp invariant (|tilt| <= 1.5 * max_tilt under arbitrary input)
//! - Bank clamp invariant and sign convention
//! - Turn-rate-limited facing integration and convergence count
//! - Speed-ramp scenario stabilizing near cruise tilt

use std::f32::consts::PI;

use slotmap::SlotMap;

use animus::config::{FacingConfig, MotionConfig, TiltConfig};
use animus::motion::{FacingController, MotionInput, MotionSystem, TiltBankEngine};
use animus::EntityHandle;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn mint() -> EntityHandle {
    let mut registry: SlotMap<EntityHandle, ()> = SlotMap::with_key();
    registry.insert(())
}

// ============================================================================
// Tilt: clamp invariant
// ============================================================================

#[test]
fn tilt_stays_within_overshoot_band_under_extreme_input() {
    let config = TiltConfig::default();
    let band = config.max_tilt * 1.5;
    let mut engine = TiltBankEngine::new(config);
    let entity = mint();

    let speeds = [0.0, 1e6, -1e6, 3.0, 1e6, 0.0, -500.0, 42.0];
    for _ in 0..200 {
        for &speed in &speeds {
            let sample = engine.update_tilt(entity, speed, 1.0 / 60.0);
            assert!(
                sample.tilt.abs() <= band + EPSILON,
                "tilt {} escaped the ±{band} band",
                sample.tilt
            );
        }
    }
}

#[test]
fn bank_stays_within_max_bank_under_extreme_turn_rates() {
    let config = TiltConfig::default();
    let max_bank = config.max_bank;
    let mut engine = TiltBankEngine::new(config);
    let entity = mint();

    for i in 0..500 {
        let turn_rate = if i % 2 == 0 { 1e5 } else { -1e5 };
        let bank = engine.update_bank(entity, turn_rate, 2.0, 1.0 / 60.0);
        assert!(
            bank.abs() <= max_bank + EPSILON,
            "bank {bank} escaped ±{max_bank}"
        );
    }
}

#[test]
fn bank_opposes_turn_direction() {
    let mut engine = TiltBankEngine::new(TiltConfig::default());
    let entity = mint();

    // A sustained positive turn rate at cruise speed banks negative.
    let mut bank = 0.0;
    for _ in 0..120 {
        bank = engine.update_bank(entity, 3.0, 2.0, 1.0 / 60.0);
    }
    assert!(bank < -0.01, "expected negative bank, got {bank}");
}

// ============================================================================
// Facing: step bound & convergence
// ============================================================================

#[test]
fn facing_never_advances_more_than_max_step() {
    let config = FacingConfig { max_turn_speed: 7.0 };
    let mut controller = FacingController::new(config);
    let entity = mint();

    let dt = 0.1;
    let max_step = 7.0 * dt;
    let mut previous = controller.facing(entity);
    for _ in 0..50 {
        let sample = controller.update_facing(entity, Some(PI), dt, 1.0);
        let applied = (sample.facing - previous).abs();
        assert!(
            applied <= max_step + EPSILON,
            "facing advanced {applied} in one call (max {max_step})"
        );
        previous = sample.facing;
    }
}

#[test]
fn facing_converges_in_ceil_delta_over_step_calls() {
    let config = FacingConfig { max_turn_speed: 1.0 };
    let mut controller = FacingController::new(config);
    let entity = mint();

    // Delta of 1.0 rad at 0.1 rad per call: exactly ceil(1.0 / 0.1) = 10.
    let target = 1.0;
    let dt = 0.1;
    let mut calls = 0;
    loop {
        let sample = controller.update_facing(entity, Some(target), dt, 1.0);
        calls += 1;
        if (sample.facing - target).abs() < EPSILON {
            break;
        }
        assert!(calls < 100, "facing failed to converge");
    }
    assert_eq!(calls, 10);
}

#[test]
fn facing_holds_on_null_target() {
    let mut controller = FacingController::new(FacingConfig::default());
    let entity = mint();

    controller.update_facing(entity, Some(0.5), 10.0, 1.0);
    let held = controller.update_facing(entity, None, 0.1, 1.0);
    assert!(approx(held.facing, 0.5));
    assert!(approx(held.turn_rate, 0.0));
}

#[test]
fn facing_takes_the_shortest_arc() {
    let mut controller = FacingController::new(FacingConfig { max_turn_speed: 10.0 });
    let entity = mint();

    // From just above -PI to just below PI the short way is negative,
    // through the wrap, not the long way across zero.
    controller.update_facing(entity, Some(-3.0), 10.0, 1.0);
    let sample = controller.update_facing(entity, Some(3.0), 0.01, 1.0);
    assert!(
        sample.turn_rate < 0.0,
        "expected a negative (wrapping) turn, got rate {}",
        sample.turn_rate
    );
}

#[test]
fn reported_turn_rate_is_the_applied_rate() {
    let config = FacingConfig { max_turn_speed: 2.0 };
    let mut controller = FacingController::new(config);
    let entity = mint();

    // Desired delta is ~PI but only max_turn_speed * dt is applied.
    let dt = 1.0 / 60.0;
    let sample = controller.update_facing(entity, Some(3.0), dt, 1.0);
    assert!(approx(sample.turn_rate, 2.0));
}

// ============================================================================
// Scenario: speed ramp 0 -> 1.4 over 1s, then hold
// ============================================================================

#[test]
fn speed_ramp_rises_toward_cruise_tilt_then_stabilizes() {
    let mut motion = MotionSystem::new(MotionConfig::default());
    let entity = motion.register();

    let dt = 1.0 / 60.0;
    let mut time = 0.0;
    let mut tick = |motion: &mut MotionSystem, speed: f32, time: &mut f32| {
        *time += dt;
        motion.advance(
            entity,
            &MotionInput {
                speed,
                stationary: false,
                dt,
                time: *time,
                ..MotionInput::default()
            },
        )
    };

    // Ramp up: tilt should rise past half of its eventual cruise value.
    for i in 0..60 {
        let speed = 1.4 * (i as f32 / 60.0);
        tick(&mut motion, speed, &mut time);
    }
    let ramp_tilt = tick(&mut motion, 1.4, &mut time).tilt;
    assert!(ramp_tilt > 0.02, "tilt {ramp_tilt} did not rise during ramp");

    // Hold: acceleration decays to zero and tilt settles near
    // normalized_speed * cruise_tilt = (1.4 / 2.0) * 0.12.
    let mut settled = 0.0;
    for _ in 0..180 {
        settled = tick(&mut motion, 1.4, &mut time).tilt;
    }
    let expected = (1.4 / 2.0) * 0.12;
    assert!(
        (settled - expected).abs() < 0.02,
        "settled tilt {settled}, expected near {expected}"
    );

    // Stable: successive ticks barely move.
    let next = tick(&mut motion, 1.4, &mut time).tilt;
    assert!((next - settled).abs() < 1e-3);
}
