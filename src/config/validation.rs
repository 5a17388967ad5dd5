//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::PlotterConfig;

/// Validate a plotter configuration.
///
/// Checks:
/// - Axis leads and step counts are positive
/// - Back-off distances are positive
/// - Encoder resolutions are positive
/// - Motion defaults are positive
pub fn validate_config(config: &PlotterConfig) -> Result<()> {
    for (name, axis) in config.axes.iter() {
        validate_axis(name.as_str(), axis)?;
    }

    for (name, encoder) in config.encoders.iter() {
        validate_encoder(name.as_str(), encoder)?;
    }

    if config.motion.pen_speed.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidPenSpeed(
            config.motion.pen_speed.0,
        )));
    }

    if config.motion.resolution.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidResolution(
            config.motion.resolution.0,
        )));
    }

    Ok(())
}

fn validate_axis(_name: &str, config: &super::AxisConfig) -> Result<()> {
    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    if config.lead.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidLead(config.lead.0)));
    }

    if config.back_off.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidBackOff(config.back_off.0)));
    }

    Ok(())
}

fn validate_encoder(_name: &str, config: &super::EncoderConfig) -> Result<()> {
    if config.positions_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidPositionsPerRevolution(
            config.positions_per_revolution,
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Millimetres;
    use crate::config::AxisConfig;

    fn axis_config(lead: f64, back_off: f64) -> AxisConfig {
        AxisConfig {
            name: heapless::String::try_from("test").unwrap(),
            steps_per_revolution: 200,
            lead: Millimetres(lead),
            min_step_interval_us: 1500,
            back_off: Millimetres(back_off),
            home_location: Millimetres(0.0),
            home_toward_max: true,
        }
    }

    #[test]
    fn test_invalid_lead() {
        let config = axis_config(-40.0, 2.0);
        let result = validate_axis("test", &config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidLead(_)))
        ));
    }

    #[test]
    fn test_invalid_back_off() {
        let config = axis_config(40.0, 0.0);
        let result = validate_axis("test", &config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidBackOff(_)))
        ));
    }

    #[test]
    fn test_valid_axis() {
        let config = axis_config(40.0, 2.0);
        assert!(validate_axis("test", &config).is_ok());
    }
}
