//! Hover Drift Tests
//!
//! Tests for:
//! - Output boundedness for arbitrarily large `time` (no drift accumulation)
//! - Immutability of the per-entity random hover parameters
//! - Amplitude damping by speed/jump state with a hard floor (never zero)
//! - Reactive tilt lagging the drift vector

use slotmap::SlotMap;

use animus::config::HoverConfig;
use animus::motion::HoverDriftEngine;
use animus::EntityHandle;

const DT: f32 = 1.0 / 60.0;

fn mint() -> EntityHandle {
    let mut registry: SlotMap<EntityHandle, ()> = SlotMap::with_key();
    registry.insert(())
}

// ============================================================================
// Boundedness
// ============================================================================

#[test]
fn offsets_stay_bounded_for_large_time() {
    let config = HoverConfig::default();
    let drift_radius = config.drift_radius;
    let bob_amplitude = config.bob_amplitude;
    let mut hover = HoverDriftEngine::new(config, 99);
    let entity = mint();

    for i in 0..2000 {
        // March far out along the clock; amplitude must stay periodic.
        let time = 1.0e5 + i as f32 * 37.0;
        let sample = hover.update(entity, time, 0.0, false, DT);
        assert!(sample.offset.x.abs() <= drift_radius + 1e-5);
        assert!(sample.offset.z.abs() <= drift_radius + 1e-5);
        assert!(sample.offset.y.abs() <= bob_amplitude + 1e-5);
    }
}

// ============================================================================
// Parameter immutability
// ============================================================================

#[test]
fn hover_character_is_assigned_once() {
    let mut hover = HoverDriftEngine::new(HoverConfig::default(), 99);
    let entity = mint();

    hover.update(entity, 0.0, 0.0, false, DT);
    let first = hover.character(entity).expect("record exists after update");

    for i in 1..500 {
        hover.update(entity, i as f32 * DT, (i % 5) as f32, i % 2 == 0, DT);
    }
    let later = hover.character(entity).expect("record still exists");
    assert_eq!(first, later, "hover parameters were rerolled");
}

#[test]
fn distinct_entities_get_distinct_characters() {
    let mut hover = HoverDriftEngine::new(HoverConfig::default(), 99);
    let mut registry: SlotMap<EntityHandle, ()> = SlotMap::with_key();
    let a = registry.insert(());
    let b = registry.insert(());

    hover.update(a, 0.0, 0.0, false, DT);
    hover.update(b, 0.0, 0.0, false, DT);
    assert_ne!(
        hover.character(a),
        hover.character(b),
        "two entities drew identical hover characters"
    );
}

// ============================================================================
// Amplitude damping
// ============================================================================

#[test]
fn fast_motion_damps_but_never_kills_the_hover() {
    let config = HoverConfig::default();
    let drift_radius = config.drift_radius;
    let min_amplitude = config.min_amplitude;
    let mut hover = HoverDriftEngine::new(config, 99);
    let entity = mint();

    // Sweep one full drift period at rest and at extreme speed while
    // airborne; compare peak horizontal offsets.
    let mut peak_rest = 0.0_f32;
    let mut peak_damped = 0.0_f32;
    for i in 0..4000 {
        let time = i as f32 * DT;
        let rest = hover.update(entity, time, 0.0, false, DT);
        peak_rest = peak_rest.max(rest.offset.z.abs());
        let damped = hover.update(entity, time, 1.0e6, true, DT);
        peak_damped = peak_damped.max(damped.offset.z.abs());
    }

    assert!(peak_damped < peak_rest, "damping had no effect");
    assert!(
        peak_damped >= drift_radius * min_amplitude * 0.9,
        "hover vanished under damping (peak {peak_damped})"
    );
}

// ============================================================================
// Reactive tilt
// ============================================================================

#[test]
fn reactive_tilt_lags_the_drift() {
    let config = HoverConfig::default();
    let tilt_scale = config.tilt_scale;
    let drift_radius = config.drift_radius;
    let mut hover = HoverDriftEngine::new(config, 99);
    let entity = mint();

    // The lag filter keeps the tilt short of its instantaneous target.
    let mut total_gap = 0.0;
    for i in 0..600 {
        let time = i as f32 * DT;
        let sample = hover.update(entity, time, 0.0, false, DT);
        let target = sample.offset.z * tilt_scale;
        total_gap += (sample.tilt_x - target).abs();
        assert!(sample.tilt_x.abs() <= drift_radius * tilt_scale + 1e-5);
    }
    assert!(total_gap > 1e-3, "tilt tracked the drift with no lag at all");
}
