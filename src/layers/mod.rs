pub(crate) mod celestial;
pub(crate) mod dust;
pub(crate) mod nebula;
pub(crate) mod stars;
pub(crate) mod waves;

use crate::sim::kind::{LayerEnv, LayerKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Animated layer selectable in a backdrop configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerChoice {
    /// Anchored nebula clouds.
    Nebula,
    /// Twinkling starfield.
    Stars,
    /// Sine energy waves.
    Waves,
    /// Trailed particle system.
    Trails,
    /// Ambient glowing motes.
    Ambient,
    /// Asteroids, comets and planets crossing the document.
    Celestial,
}

impl LayerChoice {
    /// Every choice.
    pub const ALL: [LayerChoice; 6] = [
        LayerChoice::Nebula,
        LayerChoice::Stars,
        LayerChoice::Waves,
        LayerChoice::Trails,
        LayerChoice::Ambient,
        LayerChoice::Celestial,
    ];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            LayerChoice::Nebula => "nebula",
            LayerChoice::Stars => "stars",
            LayerChoice::Waves => "waves",
            LayerChoice::Trails => "trails",
            LayerChoice::Ambient => "ambient",
            LayerChoice::Celestial => "celestial",
        }
    }

    /// Build the layer configuration for `env`.
    pub fn build(self, env: LayerEnv) -> Box<dyn LayerKind> {
        match self {
            LayerChoice::Nebula => Box::new(nebula::NebulaLayer::new(env)),
            LayerChoice::Stars => Box::new(stars::StarField::new(env)),
            LayerChoice::Waves => Box::new(waves::EnergyWaves::new(env)),
            LayerChoice::Trails => Box::new(dust::DustLayer::trails(env)),
            LayerChoice::Ambient => Box::new(dust::DustLayer::ambient(env)),
            LayerChoice::Celestial => Box::new(celestial::CelestialLayer::new(env)),
        }
    }
}

impl fmt::Display for LayerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerChoice {
    type Err = crate::foundation::error::StardriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerChoice::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                crate::foundation::error::StardriftError::validation(format!(
                    "unknown layer \"{s}\""
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/mod.rs"]
mod tests;
