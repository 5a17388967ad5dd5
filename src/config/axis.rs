//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::Millimetres;

/// Complete axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Motor steps per revolution (e.g. 2048 for a geared 28BYJ-48,
    /// 200 for a 1.8 degree NEMA motor driven full-step).
    pub steps_per_revolution: u32,

    /// Lead: millimetres of carriage travel per motor revolution.
    #[serde(rename = "lead_mm_per_rev")]
    pub lead: Millimetres,

    /// Minimum time between step pulses in microseconds.
    ///
    /// Coils need settling time; the stepper refuses to issue steps faster
    /// than this regardless of what the motion layer requests.
    #[serde(default = "default_min_step_interval_us")]
    pub min_step_interval_us: u32,

    /// Distance to reverse after a limit switch press, in millimetres.
    #[serde(default = "default_back_off", rename = "back_off_mm")]
    pub back_off: Millimetres,

    /// Absolute location assigned to the primary limit switch hit point.
    #[serde(default, rename = "home_location_mm")]
    pub home_location: Millimetres,

    /// Whether homing drives toward the max-end (forward) switch first.
    #[serde(default = "default_home_toward_max")]
    pub home_toward_max: bool,
}

fn default_min_step_interval_us() -> u32 {
    1500
}

fn default_back_off() -> Millimetres {
    Millimetres(2.0)
}

fn default_home_toward_max() -> bool {
    true
}

impl AxisConfig {
    /// Millimetres of travel per single motor step.
    pub fn mm_per_step(&self) -> f64 {
        self.lead.0 / self.steps_per_revolution as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_per_step() {
        let config = AxisConfig {
            name: String::try_from("test").unwrap(),
            steps_per_revolution: 200,
            lead: Millimetres(40.0),
            min_step_interval_us: 1500,
            back_off: Millimetres(2.0),
            home_location: Millimetres(0.0),
            home_toward_max: true,
        };

        // 40 mm / 200 steps = 0.2 mm per step
        assert!((config.mm_per_step() - 0.2).abs() < 1e-12);
    }
}
