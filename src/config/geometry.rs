//! Derived axis geometry computed from configuration.

use std::time::Duration;

use super::axis::AxisConfig;

/// Derived mechanical parameters computed from an axis configuration.
///
/// These are computed once at initialization and used for all motion
/// planning and position bookkeeping.
#[derive(Debug, Clone)]
pub struct AxisGeometry {
    /// Motor steps per revolution.
    pub steps_per_revolution: u32,

    /// Lead: millimetres of travel per motor revolution.
    pub lead_mm: f64,

    /// Millimetres of travel per single step.
    pub mm_per_step: f64,

    /// Steps per millimetre of travel.
    pub steps_per_mm: f64,

    /// Minimum dwell between step pulses.
    pub min_step_interval: Duration,

    /// Distance to reverse after a limit switch press, in millimetres.
    pub back_off_mm: f64,

    /// Absolute location assigned to the primary switch hit point.
    pub home_location_mm: f64,

    /// Whether homing drives toward the max-end switch first.
    pub home_toward_max: bool,
}

impl AxisGeometry {
    /// Compute axis geometry from configuration.
    pub fn from_config(config: &AxisConfig) -> Self {
        let mm_per_step = config.mm_per_step();

        Self {
            steps_per_revolution: config.steps_per_revolution,
            lead_mm: config.lead.0,
            mm_per_step,
            steps_per_mm: 1.0 / mm_per_step,
            min_step_interval: Duration::from_micros(u64::from(config.min_step_interval_us)),
            back_off_mm: config.back_off.0,
            home_location_mm: config.home_location.0,
            home_toward_max: config.home_toward_max,
        }
    }

    /// Convert a signed distance in millimetres to whole steps (rounded).
    #[inline]
    pub fn distance_to_steps(&self, mm: f64) -> i64 {
        (mm * self.steps_per_mm).round() as i64
    }

    /// Convert a signed step count to millimetres.
    #[inline]
    pub fn steps_to_distance(&self, steps: i64) -> f64 {
        steps as f64 * self.mm_per_step
    }
}
