//! Step observation.
//!
//! Observers are notified after every successful axis step. This is the
//! seam through which simulated encoders (and any other step-coupled
//! instrumentation) track motion without reaching into the stepping path.

use crate::motion::Direction;

/// Receives a notification after every successful step of an axis.
pub trait StepObserver {
    /// Called once per successful step with the direction it was taken in.
    fn on_step(&mut self, direction: Direction);
}
