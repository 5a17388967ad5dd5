//! Four-phase stepper motor driver.
//!
//! Generic over embedded-hal 1.0 output pins. Drives the four coil outputs
//! through a cyclic phase table to produce single motor steps, honoring a
//! minimum inter-step dwell.

use std::time::{Duration, Instant};

use embedded_hal::digital::OutputPin;

use crate::error::{AxisError, Result};
use crate::motion::{sleep_until, Direction};

/// Number of motor coils driven by the sequencer.
pub const COIL_COUNT: usize = 4;

/// Number of entries in the cyclic phase table.
pub const PHASE_COUNT: usize = 4;

/// One row of the phase table: which coils are energized.
pub type PhasePattern = [bool; COIL_COUNT];

/// Full-step sequence, two coils energized per phase.
pub const FULL_STEP_TABLE: [PhasePattern; PHASE_COUNT] = [
    [true, true, false, false],
    [false, true, true, false],
    [false, false, true, true],
    [true, false, false, true],
];

/// Stepper motor driver.
///
/// Owns the four coil pins and the phase bookkeeping. The constructor does
/// not touch the pins; the first [`StepperMotor::step`] energizes them.
pub struct StepperMotor<P>
where
    P: OutputPin,
{
    /// Coil output pins, in phase-table column order.
    coils: [P; COIL_COUNT],

    /// Cyclic coil energize patterns.
    phase_table: [PhasePattern; PHASE_COUNT],

    /// Motor steps per revolution.
    steps_per_revolution: u32,

    /// Direction applied on the next step.
    direction: Direction,

    /// Current index into the phase table.
    phase_index: usize,

    /// Minimum dwell between step pulses.
    min_step_interval: Duration,

    /// Earliest instant the next step may be issued.
    earliest_next_step: Option<Instant>,
}

impl<P> StepperMotor<P>
where
    P: OutputPin,
{
    /// Create a new motor with the default full-step phase table.
    pub fn new(coils: [P; COIL_COUNT], steps_per_revolution: u32, min_step_interval: Duration) -> Self {
        Self::with_phase_table(coils, steps_per_revolution, min_step_interval, FULL_STEP_TABLE)
    }

    /// Create a new motor with an explicit phase table.
    pub fn with_phase_table(
        coils: [P; COIL_COUNT],
        steps_per_revolution: u32,
        min_step_interval: Duration,
        phase_table: [PhasePattern; PHASE_COUNT],
    ) -> Self {
        Self {
            coils,
            phase_table,
            steps_per_revolution,
            direction: Direction::Forward,
            phase_index: 0,
            min_step_interval,
            earliest_next_step: None,
        }
    }

    /// Motor steps per revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution
    }

    /// Current index into the phase table.
    #[inline]
    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Direction applied on the next step.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Set the direction for subsequent steps.
    ///
    /// Takes effect on the next [`StepperMotor::step`].
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advance the motor exactly one physical step in the current direction.
    ///
    /// Blocks until the minimum dwell since the previous step has elapsed,
    /// then advances the phase index and energizes the coils with the new
    /// phase pattern.
    ///
    /// # Errors
    ///
    /// Returns [`AxisError::PinError`] if a coil write fails.
    pub fn step(&mut self) -> Result<()> {
        if let Some(deadline) = self.earliest_next_step {
            sleep_until(deadline);
        }

        self.phase_index = match self.direction {
            Direction::Forward => (self.phase_index + 1) % PHASE_COUNT,
            Direction::Backward => (self.phase_index + PHASE_COUNT - 1) % PHASE_COUNT,
        };

        let pattern = self.phase_table[self.phase_index];
        self.energize(pattern)?;

        self.earliest_next_step = Some(Instant::now() + self.min_step_interval);
        Ok(())
    }

    /// De-energize all coils.
    ///
    /// Holding torque is lost until the next step. Used between jobs to
    /// keep the coils cool.
    pub fn release(&mut self) -> Result<()> {
        self.energize([false; COIL_COUNT])
    }

    fn energize(&mut self, pattern: PhasePattern) -> Result<()> {
        for (coil, level) in self.coils.iter_mut().zip(pattern) {
            if level {
                coil.set_high().map_err(|_| AxisError::PinError)?;
            } else {
                coil.set_low().map_err(|_| AxisError::PinError)?;
            }
        }
        Ok(())
    }
}
