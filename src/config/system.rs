//! Plotter configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::AxisConfig;
use super::encoder::EncoderConfig;
use super::motion::MotionConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct PlotterConfig {
    /// Named axis configurations.
    pub axes: FnvIndexMap<String<32>, AxisConfig, 4>,

    /// Named encoder configurations.
    #[serde(default)]
    pub encoders: FnvIndexMap<String<32>, EncoderConfig, 4>,

    /// Motion pacing defaults.
    #[serde(default)]
    pub motion: MotionConfig,
}

impl PlotterConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get an encoder configuration by name.
    pub fn encoder(&self, name: &str) -> Option<&EncoderConfig> {
        self.encoders
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }

    /// List all encoder names.
    pub fn encoder_names(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(|s| s.as_str())
    }
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            axes: FnvIndexMap::new(),
            encoders: FnvIndexMap::new(),
            motion: MotionConfig::default(),
        }
    }
}
