//! # Codec Configuration
//!
//! The few operator-tunable knobs of the wire layer, loaded once at startup
//! from TOML and immutable afterward. Everything has a compiled-in default;
//! a missing file or missing key is not an error.

use serde::Deserialize;

use crate::error::{WireError, WireResult};

/// Default normalized-bar band (see [`crate::wire::AttributePair`]).
pub const DEFAULT_BAR_BAND: u16 = 25;

/// Default outbound-pipe capacity, in packets.
pub const DEFAULT_PIPE_CAPACITY: usize = 256;

/// Operator-tunable codec settings.
///
/// ```toml
/// normalize_bars = true
/// bar_band = 25
/// pipe_capacity = 256
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// When false, "normalized" attribute bars fall back to the raw
    /// encoding (revealing exact values to every viewer).
    pub normalize_bars: bool,
    /// The band maximum that normalized bars are scaled into.
    pub bar_band: u16,
    /// Bounded capacity of each connection's outbound pipe, in packets.
    pub pipe_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            normalize_bars: true,
            bar_band: DEFAULT_BAR_BAND,
            pipe_capacity: DEFAULT_PIPE_CAPACITY,
        }
    }
}

impl CodecConfig {
    /// Parses a TOML override file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the TOML parse error on malformed input or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Validates the invariants the codec relies on.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Precondition`] when a knob is outside its
    /// usable range.
    pub fn validate(&self) -> WireResult<()> {
        if self.bar_band == 0 {
            return Err(WireError::Precondition("bar_band must be nonzero"));
        }
        if self.pipe_capacity == 0 {
            return Err(WireError::Precondition("pipe_capacity must be nonzero"));
        }
        Ok(())
    }
}
