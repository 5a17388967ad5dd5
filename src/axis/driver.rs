//! Single-axis driver: guarded stepping, homing, position tracking.

use std::time::Duration;

use embedded_hal::digital::OutputPin;

use crate::config::AxisGeometry;
use crate::error::{AxisError, MotionError, Result};
use crate::motion::{Direction, RampProfile};
use crate::motor::{StepObserver, StepperMotor};

use super::builder::AxisBuilder;
use super::switch::LimitSwitch;

/// One linear axis: a stepper motor coupled to a lead screw or belt,
/// bounded by a limit switch at each end.
///
/// `current_location` is advanced only by successful steps and is
/// untrusted until [`Axis::home`] completes.
pub struct Axis<P, L>
where
    P: OutputPin,
    L: LimitSwitch,
{
    /// The phase-sequenced motor.
    motor: StepperMotor<P>,

    /// Derived lead-screw geometry and homing parameters.
    geometry: AxisGeometry,

    /// Switch at the min-travel end.
    min_switch: L,

    /// Switch at the max-travel end.
    max_switch: L,

    /// Axis name for logging/debugging.
    name: heapless::String<32>,

    /// Current absolute location in millimetres.
    current_location: f64,

    /// Whether homing has established the location reference.
    homed: bool,

    /// Observers notified after every successful step.
    observers: Vec<Box<dyn StepObserver>>,
}

impl<P, L> Axis<P, L>
where
    P: OutputPin,
    L: LimitSwitch,
{
    /// Start building an axis.
    pub fn builder() -> AxisBuilder<P, L> {
        AxisBuilder::new()
    }

    pub(crate) fn new(
        motor: StepperMotor<P>,
        geometry: AxisGeometry,
        min_switch: L,
        max_switch: L,
        name: heapless::String<32>,
    ) -> Self {
        Self {
            motor,
            geometry,
            min_switch,
            max_switch,
            name,
            current_location: 0.0,
            homed: false,
            observers: Vec::new(),
        }
    }

    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the derived geometry.
    #[inline]
    pub fn geometry(&self) -> &AxisGeometry {
        &self.geometry
    }

    /// Current absolute location in millimetres.
    ///
    /// Untrusted until [`Axis::home`] has completed.
    #[inline]
    pub fn current_location(&self) -> f64 {
        self.current_location
    }

    /// Whether homing has established the location reference.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// Direction applied on the next step.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.motor.direction()
    }

    /// Set the direction for subsequent steps.
    pub fn set_direction(&mut self, direction: Direction) {
        self.motor.set_direction(direction);
    }

    /// Register an observer notified after every successful step.
    pub fn add_step_observer(&mut self, observer: Box<dyn StepObserver>) {
        self.observers.push(observer);
    }

    /// De-energize the motor coils.
    pub fn release(&mut self) -> Result<()> {
        self.motor.release()
    }

    /// Round a target to the nearest location reachable by whole steps
    /// from the current location.
    ///
    /// Physical motion is quantized to the step grid; this never fails.
    pub fn nearest_reachable_location(&self, target: f64) -> f64 {
        let delta_steps = self.geometry.distance_to_steps(target - self.current_location);
        self.current_location + self.geometry.steps_to_distance(delta_steps)
    }

    /// Advance one step in the current direction, guarded by the limit
    /// switches.
    ///
    /// # Errors
    ///
    /// - [`AxisError::UnexpectedLimitSwitch`] if a switch is pressed before
    ///   the step (the motor is not energized), or becomes pressed by the
    ///   step (the axis backs off first, then reports).
    /// - [`AxisError::SwitchStuck`] if a switch stays pressed after the
    ///   back-off.
    pub fn step(&mut self) -> Result<()> {
        if self.any_switch_pressed()? {
            return Err(AxisError::UnexpectedLimitSwitch {
                location: self.current_location,
            }
            .into());
        }

        self.step_unguarded()?;

        if self.any_switch_pressed()? {
            self.back_off()?;
            if self.any_switch_pressed()? {
                return Err(AxisError::SwitchStuck {
                    location: self.current_location,
                }
                .into());
            }
            return Err(AxisError::UnexpectedLimitSwitch {
                location: self.current_location,
            }
            .into());
        }

        Ok(())
    }

    /// Home the axis against its limit switches.
    ///
    /// Drives toward the primary switch, backs off, and rebases
    /// `current_location` so the hit point equals the configured home
    /// location; then drives the other way to locate the secondary switch.
    /// Returns the secondary hit location (used to derive soft limits).
    ///
    /// # Errors
    ///
    /// - [`AxisError::UnexpectedLimitSwitch`] if a switch is already
    ///   pressed when homing starts (ambiguous starting state).
    /// - [`AxisError::SwitchStuck`] if a switch stays pressed after a
    ///   back-off.
    pub fn home(&mut self) -> Result<f64> {
        if self.any_switch_pressed()? {
            return Err(AxisError::UnexpectedLimitSwitch {
                location: self.current_location,
            }
            .into());
        }

        let primary = if self.geometry.home_toward_max {
            Direction::Forward
        } else {
            Direction::Backward
        };

        log::debug!("axis {}: homing toward primary switch", self.name);
        self.motor.set_direction(primary);
        self.step_until_pressed()?;

        let backed = self.back_off()?;
        if self.any_switch_pressed()? {
            return Err(AxisError::SwitchStuck {
                location: self.current_location,
            }
            .into());
        }

        // The hit point becomes the configured home location; we now sit
        // one back-off behind it.
        self.current_location = self.geometry.home_location_mm - primary.sign_f64() * backed;

        self.motor.set_direction(primary.opposite());
        self.step_until_pressed()?;
        let secondary = self.current_location;

        self.back_off()?;
        if self.any_switch_pressed()? {
            return Err(AxisError::SwitchStuck {
                location: self.current_location,
            }
            .into());
        }

        self.homed = true;
        log::debug!(
            "axis {}: homed, secondary boundary at {:.3} mm",
            self.name,
            secondary
        );
        Ok(secondary)
    }

    /// Execute a ramped single-axis move over a signed distance.
    ///
    /// Computes a [`RampProfile`] and paces each step by the instantaneous
    /// ramp speed. This mode is independent of the pair's coordinated
    /// interpolation, which paces at a nominally constant combined speed.
    ///
    /// # Errors
    ///
    /// - [`MotionError::DegenerateProfile`] if either rate is zero.
    /// - Limit-switch errors propagate from the guarded stepping.
    pub fn move_distance(
        &mut self,
        distance_mm: f64,
        max_velocity: f64,
        acceleration: f64,
        deceleration: f64,
    ) -> Result<()> {
        let steps = self.geometry.distance_to_steps(distance_mm.abs());
        if steps == 0 {
            return Ok(());
        }

        // Step pacing works on the magnitude; direction is applied to the
        // motor separately.
        let profile = RampProfile::compute(
            max_velocity.abs(),
            acceleration.abs(),
            -deceleration.abs(),
            distance_mm.abs(),
        );
        if profile.is_zero() {
            return Err(MotionError::DegenerateProfile.into());
        }

        self.motor.set_direction(Direction::from_delta(distance_mm));

        let mm_per_step = self.geometry.mm_per_step;
        // Speed floor: the ramp speed after one full step. Keeps the first
        // interval finite when starting from rest.
        let speed_floor = (2.0 * profile.acceleration.abs() * mm_per_step).sqrt();

        for i in 0..steps {
            self.step()?;
            let s = (i + 1) as f64 * mm_per_step;
            let speed = profile.velocity_at(s).abs().max(speed_floor);
            std::thread::sleep(Duration::from_secs_f64(mm_per_step / speed));
        }
        Ok(())
    }

    /// One step with location bookkeeping and observer notification, but
    /// no switch guard. Homing intentionally steps into switches.
    fn step_unguarded(&mut self) -> Result<()> {
        self.motor.step()?;
        let direction = self.motor.direction();
        self.current_location += direction.sign_f64() * self.geometry.mm_per_step;
        for observer in &mut self.observers {
            observer.on_step(direction);
        }
        Ok(())
    }

    /// Step in the current direction until a switch reports pressed.
    fn step_until_pressed(&mut self) -> Result<()> {
        loop {
            self.step_unguarded()?;
            if self.any_switch_pressed()? {
                return Ok(());
            }
        }
    }

    /// Reverse away from a pressed switch by the configured back-off
    /// distance. Restores the prior direction; returns the distance
    /// actually backed (whole steps, so possibly slightly more than
    /// configured).
    fn back_off(&mut self) -> Result<f64> {
        let original = self.motor.direction();
        self.motor.set_direction(original.opposite());

        let steps = (self.geometry.back_off_mm * self.geometry.steps_per_mm).ceil() as u64;
        for _ in 0..steps {
            self.step_unguarded()?;
        }

        self.motor.set_direction(original);
        Ok(steps as f64 * self.geometry.mm_per_step)
    }

    fn any_switch_pressed(&mut self) -> Result<bool> {
        Ok(self.min_switch.is_pressed(self.current_location)?
            || self.max_switch.is_pressed(self.current_location)?)
    }
}
