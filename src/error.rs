//! Error types for plotter-motion.
//!
//! Provides unified error handling across configuration, axis control,
//! motion planning, and the encoder thread.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all plotter-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Axis or limit-switch error
    Axis(AxisError),
    /// Motion profile or pacing error
    Motion(MotionError),
    /// Encoder thread error
    Encoder(EncoderError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A required builder field was not supplied
    MissingField(&'static str),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Encoder name not found in configuration
    EncoderNotFound(heapless::String<32>),
    /// Invalid lead (must be > 0 millimetres per revolution)
    InvalidLead(f64),
    /// Invalid steps per revolution (must be > 0)
    InvalidStepsPerRevolution(u32),
    /// Invalid back-off distance (must be > 0)
    InvalidBackOff(f64),
    /// Invalid default pen speed (must be > 0)
    InvalidPenSpeed(f64),
    /// Invalid default sampling resolution (must be > 0)
    InvalidResolution(f64),
    /// Invalid encoder resolution (must be > 0 positions per revolution)
    InvalidPositionsPerRevolution(u32),
    /// File I/O error
    IoError(heapless::String<128>),
}

/// Axis operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisError {
    /// A limit switch was pressed where none was expected.
    ///
    /// Raised when a step would occur, or did occur, with a switch pressed
    /// outside a homing back-off sequence. The axis has already backed off;
    /// `location` is where it came to rest.
    UnexpectedLimitSwitch {
        /// Axis location after the back-off, in millimetres
        location: f64,
    },
    /// A limit switch stayed pressed after backing off.
    ///
    /// The switch activation zone is larger than the configured back-off
    /// distance. Not recoverable without operator intervention.
    SwitchStuck {
        /// Axis location when the stuck switch was detected, in millimetres
        location: f64,
    },
    /// GPIO pin operation failed
    PinError,
}

/// Motion profile and pacing errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A ramp profile with zero acceleration or deceleration was supplied
    /// where ramped motion was requested
    DegenerateProfile,
    /// Pen speed must be positive
    NonPositiveSpeed(f64),
    /// Curve sampling resolution must be positive
    NonPositiveResolution(f64),
}

/// Encoder thread errors.
#[derive(Debug, Clone, PartialEq)]
pub enum EncoderError {
    /// The polling thread could not be spawned
    SpawnFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Encoder(e) => write!(f, "Encoder error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::EncoderNotFound(name) => write!(f, "Encoder '{}' not found", name),
            ConfigError::InvalidLead(v) => write!(f, "Invalid lead: {}. Must be > 0", v),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidBackOff(v) => {
                write!(f, "Invalid back-off distance: {}. Must be > 0", v)
            }
            ConfigError::InvalidPenSpeed(v) => write!(f, "Invalid pen speed: {}. Must be > 0", v),
            ConfigError::InvalidResolution(v) => {
                write!(f, "Invalid sampling resolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidPositionsPerRevolution(v) => {
                write!(f, "Invalid positions per revolution: {}. Must be > 0", v)
            }
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::UnexpectedLimitSwitch { location } => {
                write!(f, "Unexpected limit switch press near {:.3} mm", location)
            }
            AxisError::SwitchStuck { location } => {
                write!(f, "Limit switch still pressed after back-off at {:.3} mm", location)
            }
            AxisError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::DegenerateProfile => {
                write!(f, "Ramp profile is degenerate (zero acceleration or deceleration)")
            }
            MotionError::NonPositiveSpeed(v) => {
                write!(f, "Pen speed {} must be positive", v)
            }
            MotionError::NonPositiveResolution(v) => {
                write!(f, "Sampling resolution {} must be positive", v)
            }
        }
    }
}

impl fmt::Display for EncoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncoderError::SpawnFailed => write!(f, "Failed to spawn encoder polling thread"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<EncoderError> for Error {
    fn from(e: EncoderError) -> Self {
        Error::Encoder(e)
    }
}

impl std::error::Error for Error {}

impl std::error::Error for ConfigError {}

impl std::error::Error for AxisError {}

impl std::error::Error for MotionError {}

impl std::error::Error for EncoderError {}
