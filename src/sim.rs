//! Simulated GPIO for development and tests.
//!
//! Real deployments hand the motion core pins from a hardware GPIO crate;
//! during development the same code runs against these shared-level pins.
//! [`SimulatedQuadrature`] closes the loop for the encoder: registered as a
//! step observer on an axis, it replays each motor step as one quadrature
//! transition on a pair of simulated pins.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::encoder::QUADRATURE_STATES;
use crate::motion::Direction;
use crate::motor::StepObserver;

/// A pin whose level lives in shared memory.
///
/// Clones observe the same level, so one handle can be written by a
/// simulated device while another is read by the core (or by an encoder
/// thread). Implements both [`InputPin`] and [`OutputPin`]; operations are
/// infallible.
#[derive(Debug, Clone)]
pub struct SimulatedPin {
    level: Arc<AtomicBool>,
}

impl SimulatedPin {
    /// Create a pin at the given initial level.
    pub fn new(level: bool) -> Self {
        Self {
            level: Arc::new(AtomicBool::new(level)),
        }
    }

    /// Set the level directly (as the simulated external device).
    pub fn set_level(&self, level: bool) {
        self.level.store(level, Ordering::SeqCst);
    }

    /// Read the level without going through the `InputPin` trait.
    pub fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }
}

impl ErrorType for SimulatedPin {
    type Error = Infallible;
}

impl OutputPin for SimulatedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl InputPin for SimulatedPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.load(Ordering::SeqCst))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.load(Ordering::SeqCst))
    }
}

/// Replays axis steps as quadrature transitions on two simulated pins.
///
/// Register on an [`crate::Axis`] with `add_step_observer`; hand clones of
/// the same two pins to an [`crate::Encoder`]. Each motor step advances the
/// simulated encoder by exactly one quadrature position.
#[derive(Debug)]
pub struct SimulatedQuadrature {
    pin_a: SimulatedPin,
    pin_b: SimulatedPin,
    state: usize,
}

impl SimulatedQuadrature {
    /// Create a simulated encoder driving the given pins.
    ///
    /// The pins are set to the initial quadrature state immediately.
    pub fn new(pin_a: SimulatedPin, pin_b: SimulatedPin) -> Self {
        let sim = Self {
            pin_a,
            pin_b,
            state: 0,
        };
        sim.apply();
        sim
    }

    fn apply(&self) {
        let (a, b) = QUADRATURE_STATES[self.state];
        self.pin_a.set_level(a);
        self.pin_b.set_level(b);
    }
}

impl StepObserver for SimulatedQuadrature {
    fn on_step(&mut self, direction: Direction) {
        let states = QUADRATURE_STATES.len();
        self.state = match direction {
            Direction::Forward => (self.state + 1) % states,
            Direction::Backward => (self.state + states - 1) % states,
        };
        self.apply();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_level() {
        let pin = SimulatedPin::new(false);
        let mut reader = pin.clone();

        pin.set_level(true);
        assert!(reader.is_high().unwrap());

        let mut writer = pin.clone();
        writer.set_low().unwrap();
        assert!(reader.is_low().unwrap());
    }

    #[test]
    fn test_quadrature_walks_states() {
        let a = SimulatedPin::new(false);
        let b = SimulatedPin::new(false);
        let mut quad = SimulatedQuadrature::new(a.clone(), b.clone());

        assert_eq!((a.level(), b.level()), QUADRATURE_STATES[0]);

        quad.on_step(Direction::Forward);
        assert_eq!((a.level(), b.level()), QUADRATURE_STATES[1]);

        quad.on_step(Direction::Forward);
        assert_eq!((a.level(), b.level()), QUADRATURE_STATES[2]);

        quad.on_step(Direction::Backward);
        assert_eq!((a.level(), b.level()), QUADRATURE_STATES[1]);

        // Wraps below zero
        quad.on_step(Direction::Backward);
        quad.on_step(Direction::Backward);
        assert_eq!((a.level(), b.level()), QUADRATURE_STATES[3]);
    }
}
