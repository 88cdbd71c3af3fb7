use crate::foundation::color::Rgba8;
use crate::theme::variant::{Intensity, Variant};
use serde::Serialize;

/// Section used whenever the active section is unknown or cannot be observed.
pub const DEFAULT_SECTION: &str = "hero";

/// Accent colors for a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SectionColors {
    /// Primary accent.
    pub primary: Rgba8,
    /// Secondary accent.
    pub secondary: Rgba8,
    /// Highlight accent.
    pub accent: Rgba8,
}

/// Color stop of a vertical background gradient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f64,
    /// Color at `offset`.
    pub color: Rgba8,
}

/// Soft highlight drawn over the background ("glass" reflection).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GlassSpot {
    /// Horizontal center in percent of width.
    pub x_pct: f64,
    /// Vertical center in percent of height.
    pub y_pct: f64,
    /// Fade-out radius in percent of the larger surface side.
    pub radius_pct: f64,
    /// Color; alpha carries the spot strength.
    pub color: Rgba8,
}

/// Visual binding of one content section.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SectionBinding {
    /// Section identifier (matches the anchor name).
    pub id: &'static str,
    /// Variant driving every animated layer.
    pub variant: Variant,
    /// Requested density tier (mobile still caps it to low).
    pub intensity: Intensity,
    /// Accent colors.
    pub colors: SectionColors,
    /// Opacity of the background gradient over black.
    pub background_opacity: f64,
    /// Nominal particle budget for the section.
    pub particle_count: usize,
    /// Vertical background gradient.
    pub gradient: &'static [GradientStop],
    /// Highlight spots.
    pub glass: &'static [GlassSpot],
}

const fn stop(offset: f64, rgb: u32) -> GradientStop {
    GradientStop {
        offset,
        color: Rgba8::hex(rgb),
    }
}

const fn glass(x_pct: f64, y_pct: f64, radius_pct: f64, rgb: u32, alpha: u8) -> GlassSpot {
    GlassSpot {
        x_pct,
        y_pct,
        radius_pct,
        color: Rgba8::hexa(rgb, alpha),
    }
}

const DEEP_SPACE: &[GradientStop] = &[
    stop(0.0, 0x0a0a0a),
    stop(0.5, 0x1a1a2e),
    stop(1.0, 0x16213e),
];

static SECTIONS: [SectionBinding; 5] = [
    SectionBinding {
        id: "hero",
        variant: Variant::Cosmic,
        intensity: Intensity::High,
        colors: SectionColors {
            primary: Rgba8::hex(0x3b82f6),
            secondary: Rgba8::hex(0xa855f7),
            accent: Rgba8::hex(0x22d3ee),
        },
        background_opacity: 1.0,
        particle_count: 40,
        gradient: DEEP_SPACE,
        glass: &[
            glass(20.0, 30.0, 40.0, 0x3b82f6, 20),
            glass(80.0, 70.0, 40.0, 0xa855f7, 15),
            glass(50.0, 50.0, 60.0, 0x22d3ee, 13),
        ],
    },
    SectionBinding {
        id: "awakening",
        variant: Variant::Philosophical,
        intensity: Intensity::Medium,
        colors: SectionColors {
            primary: Rgba8::hex(0x818cf8),
            secondary: Rgba8::hex(0xa855f7),
            accent: Rgba8::hex(0xc084fc),
        },
        background_opacity: 0.8,
        particle_count: 25,
        gradient: &[
            stop(0.0, 0x0a0a0f),
            stop(0.5, 0x1a1530),
            stop(1.0, 0x1a1845),
        ],
        glass: &[
            glass(30.0, 40.0, 40.0, 0x818cf8, 15),
            glass(70.0, 60.0, 40.0, 0xa855f7, 20),
        ],
    },
    SectionBinding {
        id: "blog",
        variant: Variant::Transcendent,
        intensity: Intensity::Medium,
        colors: SectionColors {
            primary: Rgba8::hex(0x22d3ee),
            secondary: Rgba8::hex(0x0ea5e9),
            accent: Rgba8::hex(0x06b6d4),
        },
        background_opacity: 0.9,
        particle_count: 30,
        gradient: &[
            stop(0.0, 0x0a0a12),
            stop(0.5, 0x152838),
            stop(1.0, 0x1a2332),
        ],
        glass: &[
            glass(40.0, 20.0, 40.0, 0x22d3ee, 18),
            glass(60.0, 80.0, 40.0, 0x0ea5e9, 13),
        ],
    },
    SectionBinding {
        id: "visual",
        variant: Variant::Cosmic,
        intensity: Intensity::Low,
        colors: SectionColors {
            primary: Rgba8::hex(0x8b5cf6),
            secondary: Rgba8::hex(0x3b82f6),
            accent: Rgba8::hex(0x22d3ee),
        },
        background_opacity: 0.7,
        particle_count: 20,
        gradient: &[
            stop(0.0, 0x0a0a0f),
            stop(0.5, 0x1a1a2e),
            stop(1.0, 0x16213e),
        ],
        glass: &[
            glass(25.0, 75.0, 40.0, 0x8b5cf6, 15),
            glass(75.0, 25.0, 40.0, 0x3b82f6, 13),
        ],
    },
    SectionBinding {
        id: "footer",
        variant: Variant::Philosophical,
        intensity: Intensity::Low,
        colors: SectionColors {
            primary: Rgba8::hex(0x64748b),
            secondary: Rgba8::hex(0x475569),
            accent: Rgba8::hex(0x94a3b8),
        },
        background_opacity: 0.5,
        particle_count: 15,
        gradient: &[
            stop(0.0, 0x0a0a0a),
            stop(0.5, 0x151515),
            stop(1.0, 0x1a1a1a),
        ],
        glass: &[glass(50.0, 50.0, 50.0, 0x64748b, 10)],
    },
];

/// Every section binding, in page order.
pub fn sections() -> &'static [SectionBinding] {
    &SECTIONS
}

/// Section identifiers in page order.
pub fn section_ids() -> impl Iterator<Item = &'static str> {
    SECTIONS.iter().map(|s| s.id)
}

/// Binding for `id`, falling back to [`DEFAULT_SECTION`] for unknown identifiers.
pub fn resolve_section(id: &str) -> &'static SectionBinding {
    SECTIONS
        .iter()
        .find(|s| s.id == id)
        .unwrap_or(&SECTIONS[0])
}

/// Whether `id` names a known section.
pub fn is_known_section(id: &str) -> bool {
    SECTIONS.iter().any(|s| s.id == id)
}

#[cfg(test)]
#[path = "../../tests/unit/theme/section.rs"]
mod tests;
