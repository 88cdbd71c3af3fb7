use crate::foundation::color::Rgba8;
use crate::foundation::error::StardriftError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named visual theme controlling palette and density.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Blues, violets and cyans; the densest theme.
    #[default]
    Cosmic,
    /// Indigo and violet.
    Philosophical,
    /// Cyan and sky blue.
    Transcendent,
}

impl Variant {
    /// Every variant, in table order.
    pub const ALL: [Variant; 3] = [Variant::Cosmic, Variant::Philosophical, Variant::Transcendent];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Cosmic => "cosmic",
            Variant::Philosophical => "philosophical",
            Variant::Transcendent => "transcendent",
        }
    }

    /// Shared configuration for this variant.
    pub fn config(self) -> &'static VariantConfig {
        match self {
            Variant::Cosmic => &COSMIC,
            Variant::Philosophical => &PHILOSOPHICAL,
            Variant::Transcendent => &TRANSCENDENT,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Variant::Cosmic => 0,
            Variant::Philosophical => 1,
            Variant::Transcendent => 2,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = StardriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| StardriftError::validation(format!("unknown variant \"{s}\"")))
    }
}

/// Density tier for a variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Sparse; always used on mobile.
    Low,
    /// Default density.
    #[default]
    Medium,
    /// Densest tier.
    High,
}

impl Intensity {
    /// Every tier, lowest first.
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Medium, Intensity::High];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = StardriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intensity::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| StardriftError::validation(format!("unknown intensity \"{s}\"")))
    }
}

/// Mobile devices always run the lowest tier.
pub fn effective_intensity(requested: Intensity, mobile: bool) -> Intensity {
    if mobile { Intensity::Low } else { requested }
}

/// One value per intensity tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TierTable<T> {
    /// Value for [`Intensity::Low`].
    pub low: T,
    /// Value for [`Intensity::Medium`].
    pub medium: T,
    /// Value for [`Intensity::High`].
    pub high: T,
}

impl<T: Copy> TierTable<T> {
    /// Value for `tier`.
    pub fn get(&self, tier: Intensity) -> T {
        match tier {
            Intensity::Low => self.low,
            Intensity::Medium => self.medium,
            Intensity::High => self.high,
        }
    }
}

/// Soft radial color spot positioned in percent of the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientSpot {
    /// Horizontal center in percent of width.
    pub x_pct: f64,
    /// Vertical center in percent of height.
    pub y_pct: f64,
    /// Spot color; alpha carries the spot strength.
    pub color: Rgba8,
}

/// Variant-wide configuration shared by every layer.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct VariantConfig {
    /// Variant this table belongs to.
    pub variant: Variant,
    /// Accent palette.
    pub palette: &'static [Rgba8],
    /// Mesh gradient spots painted under the animated layers.
    pub mesh_spots: &'static [GradientSpot],
    /// Hue range (degrees) for hue-driven particles.
    pub hue_range: (f64, f64),
    /// Ambient mote count per tier.
    pub ambient_counts: TierTable<usize>,
}

const fn spot(x_pct: f64, y_pct: f64, rgb: u32) -> GradientSpot {
    GradientSpot {
        x_pct,
        y_pct,
        color: Rgba8::hexa(rgb, 0x28),
    }
}

static COSMIC: VariantConfig = VariantConfig {
    variant: Variant::Cosmic,
    palette: &[
        Rgba8::hex(0x3b82f6),
        Rgba8::hex(0xa855f7),
        Rgba8::hex(0x22d3ee),
    ],
    mesh_spots: &[
        spot(20.0, 30.0, 0x3b82f6),
        spot(80.0, 20.0, 0xa855f7),
        spot(40.0, 70.0, 0x22d3ee),
        spot(70.0, 80.0, 0x8b5cf6),
        spot(10.0, 60.0, 0x0ea5e9),
    ],
    hue_range: (220.0, 280.0),
    ambient_counts: TierTable {
        low: 6,
        medium: 20,
        high: 30,
    },
};

static PHILOSOPHICAL: VariantConfig = VariantConfig {
    variant: Variant::Philosophical,
    palette: &[Rgba8::hex(0x818cf8), Rgba8::hex(0xa855f7)],
    mesh_spots: &[
        spot(30.0, 40.0, 0x818cf8),
        spot(70.0, 30.0, 0xa855f7),
        spot(50.0, 70.0, 0xc084fc),
        spot(20.0, 80.0, 0x7c3aed),
    ],
    hue_range: (260.0, 300.0),
    ambient_counts: TierTable {
        low: 4,
        medium: 15,
        high: 20,
    },
};

static TRANSCENDENT: VariantConfig = VariantConfig {
    variant: Variant::Transcendent,
    palette: &[Rgba8::hex(0x22d3ee), Rgba8::hex(0x0ea5e9)],
    mesh_spots: &[
        spot(40.0, 20.0, 0x22d3ee),
        spot(60.0, 80.0, 0x0ea5e9),
        spot(80.0, 40.0, 0x06b6d4),
        spot(20.0, 70.0, 0x0891b2),
    ],
    hue_range: (180.0, 260.0),
    ambient_counts: TierTable {
        low: 4,
        medium: 15,
        high: 20,
    },
};

#[cfg(test)]
#[path = "../../tests/unit/theme/variant.rs"]
mod tests;
