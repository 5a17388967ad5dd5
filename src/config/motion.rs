//! Motion defaults from TOML.

use serde::Deserialize;

use super::units::{Millimetres, MillimetresPerSec};

/// Default pacing and sampling parameters for curve following.
#[derive(Debug, Clone, Deserialize)]
pub struct MotionConfig {
    /// Default pen speed along the curve, in millimetres per second.
    #[serde(default = "default_pen_speed", rename = "pen_speed_mm_per_sec")]
    pub pen_speed: MillimetresPerSec,

    /// Default arc-length spacing between curve samples, in millimetres.
    #[serde(default = "default_resolution", rename = "resolution_mm")]
    pub resolution: Millimetres,
}

fn default_pen_speed() -> MillimetresPerSec {
    MillimetresPerSec(25.0)
}

fn default_resolution() -> Millimetres {
    Millimetres(0.5)
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            pen_speed: default_pen_speed(),
            resolution: default_resolution(),
        }
    }
}
