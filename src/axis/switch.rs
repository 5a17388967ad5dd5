//! Limit switches.
//!
//! A switch reports whether the axis has reached a physical travel
//! boundary. The axis passes its current location into every query so that
//! a simulated switch can trip on position alone; hardware switches ignore
//! the argument.

use embedded_hal::digital::InputPin;

use crate::error::{AxisError, Result};

/// Reports whether an axis travel boundary has been reached.
pub trait LimitSwitch {
    /// Whether the switch is currently pressed.
    ///
    /// `position_mm` is the querying axis's current location.
    fn is_pressed(&mut self, position_mm: f64) -> Result<bool>;
}

/// A limit switch read from a GPIO input.
pub struct GpioLimitSwitch<P>
where
    P: InputPin,
{
    pin: P,
    active_low: bool,
}

impl<P> GpioLimitSwitch<P>
where
    P: InputPin,
{
    /// Create a switch that reads pressed on a high level.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    /// Create a switch that reads pressed on a low level (normally-closed
    /// wiring).
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }
}

impl<P> LimitSwitch for GpioLimitSwitch<P>
where
    P: InputPin,
{
    fn is_pressed(&mut self, _position_mm: f64) -> Result<bool> {
        let high = self.pin.is_high().map_err(|_| AxisError::PinError)?;
        Ok(high != self.active_low)
    }
}

/// A simulated limit switch that trips outside a valid position range.
///
/// Both ends of an axis can share one instance's range: whichever side the
/// carriage leaves, the switch reads pressed.
#[derive(Debug, Clone)]
pub struct SimulatedLimitSwitch {
    valid_range: (f64, f64),
}

impl SimulatedLimitSwitch {
    /// Create a switch that is released within `[lo, hi]` millimetres.
    pub fn new(lo: f64, hi: f64) -> Self {
        Self {
            valid_range: (lo, hi),
        }
    }
}

impl LimitSwitch for SimulatedLimitSwitch {
    fn is_pressed(&mut self, position_mm: f64) -> Result<bool> {
        let (lo, hi) = self.valid_range;
        Ok(position_mm < lo || position_mm > hi)
    }
}
