//! Motor module for plotter-motion.
//!
//! Provides the four-phase stepper driver and the step-observer seam.

mod observer;
mod sequencer;

pub use observer::StepObserver;
pub use sequencer::{PhasePattern, StepperMotor, COIL_COUNT, FULL_STEP_TABLE, PHASE_COUNT};
