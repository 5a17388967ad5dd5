//! Builder pattern for Axis.

use std::time::Duration;

use embedded_hal::digital::OutputPin;

use crate::config::units::Millimetres;
use crate::config::{AxisConfig, AxisGeometry, PlotterConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motor::{StepperMotor, COIL_COUNT};

use super::driver::Axis;
use super::switch::LimitSwitch;

/// Builder for creating [`Axis`] instances.
pub struct AxisBuilder<P, L>
where
    P: OutputPin,
    L: LimitSwitch,
{
    coil_pins: Option<[P; COIL_COUNT]>,
    min_switch: Option<L>,
    max_switch: Option<L>,
    name: Option<heapless::String<32>>,
    steps_per_revolution: Option<u32>,
    lead: Option<Millimetres>,
    min_step_interval: Option<Duration>,
    back_off: Option<Millimetres>,
    home_location: Millimetres,
    home_toward_max: bool,
    geometry: Option<AxisGeometry>,
}

impl<P, L> Default for AxisBuilder<P, L>
where
    P: OutputPin,
    L: LimitSwitch,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, L> AxisBuilder<P, L>
where
    P: OutputPin,
    L: LimitSwitch,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            coil_pins: None,
            min_switch: None,
            max_switch: None,
            name: None,
            steps_per_revolution: None,
            lead: None,
            min_step_interval: None,
            back_off: None,
            home_location: Millimetres(0.0),
            home_toward_max: true,
            geometry: None,
        }
    }

    /// Set the four coil output pins, in phase-table column order.
    pub fn coil_pins(mut self, pins: [P; COIL_COUNT]) -> Self {
        self.coil_pins = Some(pins);
        self
    }

    /// Set the min-end and max-end limit switches.
    pub fn switches(mut self, min_switch: L, max_switch: L) -> Self {
        self.min_switch = Some(min_switch);
        self.max_switch = Some(max_switch);
        self
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set motor steps per revolution.
    pub fn steps_per_revolution(mut self, steps: u32) -> Self {
        self.steps_per_revolution = Some(steps);
        self
    }

    /// Set the lead: millimetres of travel per motor revolution.
    pub fn lead(mut self, lead: Millimetres) -> Self {
        self.lead = Some(lead);
        self
    }

    /// Set the minimum dwell between step pulses.
    pub fn min_step_interval(mut self, interval: Duration) -> Self {
        self.min_step_interval = Some(interval);
        self
    }

    /// Set the back-off distance applied after a limit switch press.
    pub fn back_off(mut self, back_off: Millimetres) -> Self {
        self.back_off = Some(back_off);
        self
    }

    /// Set the absolute location assigned to the primary switch hit point.
    pub fn home_location(mut self, location: Millimetres) -> Self {
        self.home_location = location;
        self
    }

    /// Set whether homing drives toward the max-end switch first.
    pub fn home_toward_max(mut self, toward_max: bool) -> Self {
        self.home_toward_max = toward_max;
        self
    }

    /// Configure from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.name = Some(config.name.clone());
        self.steps_per_revolution = Some(config.steps_per_revolution);
        self.lead = Some(config.lead);
        self.min_step_interval = Some(Duration::from_micros(u64::from(
            config.min_step_interval_us,
        )));
        self.back_off = Some(config.back_off);
        self.home_location = config.home_location;
        self.home_toward_max = config.home_toward_max;
        self.geometry = Some(AxisGeometry::from_config(config));
        self
    }

    /// Configure from a PlotterConfig by axis name.
    pub fn from_config(self, config: &PlotterConfig, axis_name: &str) -> Result<Self> {
        let axis_config = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_axis_config(axis_config))
    }

    /// Build the Axis.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Axis<P, L>> {
        let coil_pins = self
            .coil_pins
            .ok_or(Error::Config(ConfigError::MissingField("coil_pins")))?;
        let min_switch = self
            .min_switch
            .ok_or(Error::Config(ConfigError::MissingField("min_switch")))?;
        let max_switch = self
            .max_switch
            .ok_or(Error::Config(ConfigError::MissingField("max_switch")))?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("axis").unwrap_or_default());

        let geometry = if let Some(g) = self.geometry {
            g
        } else {
            // Build geometry from individual fields
            let steps_per_revolution = self.steps_per_revolution.ok_or(Error::Config(
                ConfigError::MissingField("steps_per_revolution"),
            ))?;
            let lead = self
                .lead
                .ok_or(Error::Config(ConfigError::MissingField("lead")))?;

            let config = AxisConfig {
                name: name.clone(),
                steps_per_revolution,
                lead,
                min_step_interval_us: self
                    .min_step_interval
                    .map(|d| d.as_micros() as u32)
                    .unwrap_or(1500),
                back_off: self.back_off.unwrap_or(Millimetres(2.0)),
                home_location: self.home_location,
                home_toward_max: self.home_toward_max,
            };

            AxisGeometry::from_config(&config)
        };

        let motor = StepperMotor::new(
            coil_pins,
            geometry.steps_per_revolution,
            geometry.min_step_interval,
        );

        Ok(Axis::new(motor, geometry, min_switch, max_switch, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::switch::SimulatedLimitSwitch;
    use crate::config::parse_config;
    use crate::sim::SimulatedPin;

    fn sim_pins() -> [SimulatedPin; COIL_COUNT] {
        [
            SimulatedPin::new(false),
            SimulatedPin::new(false),
            SimulatedPin::new(false),
            SimulatedPin::new(false),
        ]
    }

    #[test]
    fn test_build_from_fields() {
        let axis = Axis::builder()
            .coil_pins(sim_pins())
            .switches(
                SimulatedLimitSwitch::new(-10.0, 10.0),
                SimulatedLimitSwitch::new(-10.0, 10.0),
            )
            .name("x")
            .steps_per_revolution(200)
            .lead(Millimetres(40.0))
            .build()
            .unwrap();

        assert_eq!(axis.name(), "x");
        assert!((axis.geometry().mm_per_step - 0.2).abs() < 1e-12);
        // Defaults
        assert_eq!(axis.geometry().min_step_interval, Duration::from_micros(1500));
        assert!((axis.geometry().back_off_mm - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_build_requires_pins() {
        let result = Axis::<SimulatedPin, SimulatedLimitSwitch>::builder()
            .switches(
                SimulatedLimitSwitch::new(-10.0, 10.0),
                SimulatedLimitSwitch::new(-10.0, 10.0),
            )
            .steps_per_revolution(200)
            .lead(Millimetres(40.0))
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("coil_pins")))
        ));
    }

    #[test]
    fn test_build_from_config() {
        let config = parse_config(
            r#"
[axes.x]
name = "X Axis"
steps_per_revolution = 2048
lead_mm_per_rev = 40.96
home_location_mm = 120.0
"#,
        )
        .unwrap();

        let axis = Axis::builder()
            .from_config(&config, "x")
            .unwrap()
            .coil_pins(sim_pins())
            .switches(
                SimulatedLimitSwitch::new(-10.0, 10.0),
                SimulatedLimitSwitch::new(-10.0, 10.0),
            )
            .build()
            .unwrap();

        assert_eq!(axis.name(), "X Axis");
        assert!((axis.geometry().mm_per_step - 0.02).abs() < 1e-12);
        assert!((axis.geometry().home_location_mm - 120.0).abs() < 1e-12);
    }

    #[test]
    fn test_build_unknown_axis_name() {
        let config = parse_config(
            r#"
[axes.x]
name = "X Axis"
steps_per_revolution = 200
lead_mm_per_rev = 40.0
"#,
        )
        .unwrap();

        let result =
            Axis::<SimulatedPin, SimulatedLimitSwitch>::builder().from_config(&config, "z");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::AxisNotFound(_)))
        ));
    }
}
