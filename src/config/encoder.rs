//! Encoder configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// Quadrature encoder configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Quadrature positions per revolution of the encoder shaft.
    pub positions_per_revolution: u32,

    /// Invert the counting direction.
    #[serde(default)]
    pub invert: bool,
}
