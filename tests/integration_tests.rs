//! Integration tests for plotter-motion.
//!
//! These tests verify the complete workflow from TOML parsing to
//! coordinated motion and encoder feedback, against simulated pins and
//! switches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use plotter_motion::sim::{SimulatedPin, SimulatedQuadrature};
use plotter_motion::{
    Axis, AxisPair, Direction, Encoder, FollowOptions, Point, Polyline, SimulatedLimitSwitch,
    StepObserver,
};

/// Counts steps delivered to one axis.
struct StepCounter(Arc<AtomicU64>);

impl StepObserver for StepCounter {
    fn on_step(&mut self, _direction: Direction) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Test configuration data
// =============================================================================

/// 0.2 mm per step, 0.4 mm back-off, zero dwell so tests run at full rate.
const PLOTTER_CONFIG: &str = r#"
[axes.x]
name = "X Axis"
steps_per_revolution = 200
lead_mm_per_rev = 40.0
min_step_interval_us = 0
back_off_mm = 0.4
home_location_mm = 5.0

[axes.y]
name = "Y Axis"
steps_per_revolution = 200
lead_mm_per_rev = 40.0
min_step_interval_us = 0
back_off_mm = 0.4
home_location_mm = 5.0

[motion]
pen_speed_mm_per_sec = 1000000.0
resolution_mm = 0.5
"#;

fn sim_pins() -> [SimulatedPin; 4] {
    [
        SimulatedPin::new(false),
        SimulatedPin::new(false),
        SimulatedPin::new(false),
        SimulatedPin::new(false),
    ]
}

fn build_axis(
    config: &plotter_motion::PlotterConfig,
    name: &str,
    valid_range: (f64, f64),
) -> Axis<SimulatedPin, SimulatedLimitSwitch> {
    Axis::builder()
        .from_config(config, name)
        .expect("axis should exist in config")
        .coil_pins(sim_pins())
        .switches(
            SimulatedLimitSwitch::new(valid_range.0, valid_range.1),
            SimulatedLimitSwitch::new(valid_range.0, valid_range.1),
        )
        .build()
        .expect("axis should build")
}

fn build_pair(
) -> AxisPair<SimulatedPin, SimulatedLimitSwitch, SimulatedPin, SimulatedLimitSwitch> {
    let config = plotter_motion::config::parse_config(PLOTTER_CONFIG).expect("config should parse");
    let x = build_axis(&config, "x", (-10.0, 10.0));
    let y = build_axis(&config, "y", (-10.0, 10.0));
    AxisPair::new(x, y)
}

// =============================================================================
// Configuration to coordinated motion
// =============================================================================

#[test]
fn config_to_homed_pair_workflow() {
    let mut pair = build_pair();
    assert!(!pair.is_homed());

    pair.home().expect("homing should succeed");

    assert!(pair.is_homed());
    // Parked at the configured home location.
    assert!((pair.x().current_location() - 5.0).abs() < 1e-9);
    assert!((pair.y().current_location() - 5.0).abs() < 1e-9);

    // Soft limits are ordered and pulled half a step inside the measured
    // travel.
    let limits = pair.soft_limits();
    assert!(limits.x_lower() < limits.x_upper());
    assert!(limits.y_lower() < limits.y_upper());
    assert!((limits.x_upper() - 4.9).abs() < 1e-9);
    assert!((limits.x_lower() + 10.1).abs() < 1e-9);

    // Coils can be released once parked.
    pair.release().expect("release should succeed");
}

#[test]
fn homed_pair_traces_a_polyline() {
    let mut pair = build_pair();
    pair.home().expect("homing should succeed");

    let curve = Polyline::new(vec![
        Point::new(5.0, 5.0),
        Point::new(2.0, 5.0),
        Point::new(2.0, 1.0),
        Point::new(4.0, 3.0),
    ]);
    let options = FollowOptions {
        use_soft_limits: false,
        suppress_limit_warnings: false,
    };
    pair.follow(&curve, 1e6, 0.5, &options)
        .expect("follow should succeed");

    assert!((pair.x().current_location() - 4.0).abs() < 1e-9);
    assert!((pair.y().current_location() - 3.0).abs() < 1e-9);
}

#[test]
fn follow_clamps_targets_outside_soft_limits() {
    let mut pair = build_pair();
    pair.home().expect("homing should succeed");

    // Runs x far beyond the upper soft limit of 4.9.
    let curve = Polyline::new(vec![Point::new(5.0, 5.0), Point::new(9.0, 5.0)]);
    pair.follow(&curve, 1e6, 1.0, &FollowOptions::default())
        .expect("clamped follow should still succeed");

    // The pen stopped within half a step of the boundary instead of
    // running to 9.0 (and into the physical switch at 10.0).
    assert!((pair.x().current_location() - 4.9).abs() <= 0.1 + 1e-9);
}

#[test]
fn move_linearly_interleaves_both_axes() {
    let mut pair = build_pair();
    let x_steps = Arc::new(AtomicU64::new(0));
    let y_steps = Arc::new(AtomicU64::new(0));

    pair.x_mut()
        .add_step_observer(Box::new(StepCounter(Arc::clone(&x_steps))));
    pair.y_mut()
        .add_step_observer(Box::new(StepCounter(Arc::clone(&y_steps))));

    // A (3, 4)-step displacement at 0.2 mm per step.
    pair.move_linearly(Point::new(0.6, 0.8), Instant::now())
        .expect("move should succeed");

    assert_eq!(x_steps.load(Ordering::SeqCst), 3);
    assert_eq!(y_steps.load(Ordering::SeqCst), 4);
}

#[test]
fn runaway_move_is_stopped_by_the_switch() {
    let config = plotter_motion::config::parse_config(PLOTTER_CONFIG).expect("config should parse");
    let x = build_axis(&config, "x", (-1.0, 1.0));
    let y = build_axis(&config, "y", (-10.0, 10.0));
    let mut pair = AxisPair::new(x, y);

    let result = pair.move_linearly(Point::new(5.0, 0.0), Instant::now());

    assert!(result.is_err());
    // X tripped at 1.2 and backed off 0.4; its location stayed accurate
    // through the failure.
    assert!((pair.x().current_location() - 0.8).abs() < 1e-9);
}

// =============================================================================
// Ramped single-axis motion
// =============================================================================

#[test]
fn ramped_move_reaches_the_target() {
    let config = plotter_motion::config::parse_config(PLOTTER_CONFIG).expect("config should parse");
    let mut axis = build_axis(&config, "x", (-50.0, 50.0));

    axis.move_distance(4.0, 100.0, 20000.0, 20000.0)
        .expect("ramped move should succeed");
    assert!((axis.current_location() - 4.0).abs() < 1e-9);

    axis.move_distance(-4.0, 100.0, 20000.0, 20000.0)
        .expect("ramped move should succeed");
    assert!((axis.current_location()).abs() < 1e-9);
}

// =============================================================================
// Encoder feedback
// =============================================================================

#[test]
fn encoder_tracks_simulated_axis_steps() {
    let config = plotter_motion::config::parse_config(PLOTTER_CONFIG).expect("config should parse");
    let mut axis = build_axis(&config, "x", (-50.0, 50.0));

    let pin_a = SimulatedPin::new(false);
    let pin_b = SimulatedPin::new(false);
    axis.add_step_observer(Box::new(SimulatedQuadrature::new(
        pin_a.clone(),
        pin_b.clone(),
    )));

    // 4 quadrature positions per revolution for the simulated encoder.
    let mut encoder = Encoder::with_poll_interval(pin_a, pin_b, 4, false, Duration::from_millis(2))
        .expect("encoder thread should spawn");

    // Pace the motion so every quadrature transition is polled.
    for _ in 0..8 {
        axis.step().expect("step should succeed");
        assert!(encoder.wait_for_cycle(Duration::from_secs(1)));
    }
    assert_eq!(encoder.count(), 8);
    assert!((encoder.revolutions() - 2.0).abs() < 1e-12);
    assert_eq!(encoder.missed_transitions(), 0);

    axis.set_direction(Direction::Backward);
    for _ in 0..3 {
        axis.step().expect("step should succeed");
        assert!(encoder.wait_for_cycle(Duration::from_secs(1)));
    }
    assert_eq!(encoder.count(), 5);

    encoder.reset_position();
    assert_eq!(encoder.count(), 0);

    encoder.exit();
}

#[test]
fn unhomed_follow_still_moves() {
    let mut pair = build_pair();

    // No homing: follow warns but motion proceeds from the power-on origin.
    let curve = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    pair.follow(&curve, 1e6, 0.5, &FollowOptions::default())
        .expect("follow should succeed");

    assert!((pair.x().current_location() - 1.0).abs() < 1e-9);
    assert!((pair.y().current_location() - 1.0).abs() < 1e-9);
}
