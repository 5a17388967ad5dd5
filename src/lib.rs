//! # plotter-motion
//!
//! Two-axis pen plotter motion control with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Configuration-driven**: Define axes and motion defaults in TOML files
//! - **embedded-hal 1.0**: Uses `OutputPin` for motor coils, `InputPin` for
//!   limit switches and encoders
//! - **Guarded stepping**: Limit switches are checked around every step;
//!   travel violations back off and surface as errors
//! - **Homing**: Limit-switch-referenced homing establishes an absolute
//!   position and soft travel limits
//! - **Coordinated motion**: Two axes interleave steps along a curve with
//!   wall-clock pacing at a requested pen speed
//! - **Quadrature decode**: An encoder polling thread maintains an
//!   independent revolution count
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plotter_motion::{Axis, AxisPair, FollowOptions};
//!
//! // Load configuration from TOML
//! let config = plotter_motion::load_config("plotter.toml")?;
//!
//! // Create axes with embedded-hal pins and limit switches
//! let x = Axis::builder()
//!     .from_config(&config, "x")?
//!     .coil_pins(pins_x)
//!     .switches(x_min_switch, x_max_switch)
//!     .build()?;
//! let y = Axis::builder()
//!     .from_config(&config, "y")?
//!     .coil_pins(pins_y)
//!     .switches(y_min_switch, y_max_switch)
//!     .build()?;
//!
//! // Home, then draw
//! let mut pair = AxisPair::new(x, y);
//! pair.home()?;
//! pair.follow(&curve, 25.0, 0.5, &FollowOptions::default())?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary with heapless string payloads
#![allow(clippy::result_large_err)]

// Core modules
pub mod axis;
pub mod config;
pub mod curve;
pub mod encoder;
pub mod error;
pub mod motion;
pub mod motor;
pub mod sim;

// Re-exports for ergonomic API
pub use axis::{
    Axis, AxisBuilder, AxisPair, FollowOptions, GpioLimitSwitch, LimitSwitch,
    SimulatedLimitSwitch, SoftLimitBox,
};
pub use config::{load_config, validate_config, AxisConfig, AxisGeometry, PlotterConfig};
pub use curve::{Curve, Point, Polyline};
pub use encoder::{Encoder, QuadratureDecoder};
pub use error::{Error, Result};
pub use motion::{Direction, LineInterleaver, RampProfile, StepAxis};
pub use motor::{StepObserver, StepperMotor};

// Unit types
pub use config::units::{Millimetres, MillimetresPerSec, MillimetresPerSecSquared};
