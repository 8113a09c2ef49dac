//! Network construction settings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Layer widths from input to output.
    pub layers: Vec<usize>,
    /// Lower bound of the uniform initialization range.
    pub init_low: f32,
    /// Upper bound (exclusive) of the uniform initialization range.
    pub init_high: f32,
    /// Fixed seed for reproducible initialization; `None` seeds from the
    /// system entropy source.
    pub seed: Option<u64>,
}

impl NetworkConfig {
    pub fn new(layers: Vec<usize>) -> Self {
        NetworkConfig {
            layers,
            ..Default::default()
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            layers: vec![2, 2, 1],
            init_low: -1.0,
            init_high: 1.0,
            seed: None,
        }
    }
}

impl FromStr for NetworkConfig {
    type Err = String;

    /// Parses `"3x4x2"` style architecture strings into a config with
    /// default initialization settings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let layers = s
            .split('x')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| format!("invalid layer width '{}' in architecture '{}'", part, s))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if layers.contains(&0) {
            return Err(format!("architecture '{}' has a zero-width layer", s));
        }
        Ok(NetworkConfig::new(layers))
    }
}
