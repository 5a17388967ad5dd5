//! Axis module for plotter-motion.
//!
//! Provides the single-axis driver with homing and guarded stepping, the
//! limit-switch boundary, and the coordinated two-axis pair.

mod builder;
mod driver;
mod pair;
mod switch;

pub use builder::AxisBuilder;
pub use driver::Axis;
pub use pair::{AxisPair, FollowOptions, SoftLimitBox};
pub use switch::{GpioLimitSwitch, LimitSwitch, SimulatedLimitSwitch};
