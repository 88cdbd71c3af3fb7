use crate::foundation::core::Size;
use crate::foundation::error::{StardriftError, StardriftResult};
use crate::gate::intersection::ObserverOptions;
use crate::gate::visibility::Capabilities;
use crate::layers::LayerChoice;
use crate::schedule::frame_loop::FrameTiming;
use crate::stage::sections::{SECTION_THROTTLE_MS, SectionSpec};
use crate::theme::section::section_ids;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Viewports narrower than this count as mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Layers of the default backdrop, back to front.
pub const DEFAULT_LAYERS: [LayerChoice; 5] = [
    LayerChoice::Nebula,
    LayerChoice::Trails,
    LayerChoice::Waves,
    LayerChoice::Stars,
    LayerChoice::Celestial,
];

/// Everything a [`crate::Backdrop`] needs besides its host and surfaces.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    /// Viewport width in CSS px.
    pub viewport_width: f64,
    /// Viewport height in CSS px.
    pub viewport_height: f64,
    /// Document height in CSS px; defaults to the sum of the section heights.
    pub document_height: Option<f64>,
    /// Device pixel ratio reported by the host (capped at 2 for backing stores).
    pub device_pixel_ratio: f64,
    /// Viewports narrower than this run the mobile tables.
    pub mobile_breakpoint: f64,
    /// Frame pacing of every layer.
    pub frame: FrameTiming,
    /// Minimum time between section evaluations.
    pub section_throttle_ms: f64,
    /// Seed of every random choice.
    pub seed: u64,
    /// Enabled layers in painter's order.
    pub layers: Vec<LayerChoice>,
    /// Initial reduced-motion preference.
    pub reduced_motion: bool,
    /// Initial document visibility.
    pub document_visible: bool,
    /// Host primitives.
    pub capabilities: Capabilities,
    /// Intersection options of the animated layers.
    #[serde(default = "ObserverOptions::layer")]
    pub layer_observer: ObserverOptions,
    /// Intersection options of the content sections.
    #[serde(default = "ObserverOptions::section")]
    pub section_observer: ObserverOptions,
    /// Content sections, top to bottom.
    pub sections: Vec<SectionSpec>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        let viewport_height = 720.0;
        Self {
            viewport_width: 1280.0,
            viewport_height,
            document_height: None,
            device_pixel_ratio: 1.0,
            mobile_breakpoint: MOBILE_BREAKPOINT_PX,
            frame: FrameTiming::default(),
            section_throttle_ms: SECTION_THROTTLE_MS,
            seed: 0x5eed,
            layers: DEFAULT_LAYERS.to_vec(),
            reduced_motion: false,
            document_visible: true,
            capabilities: Capabilities::default(),
            layer_observer: ObserverOptions::layer(),
            section_observer: ObserverOptions::section(),
            sections: section_ids()
                .map(|id| SectionSpec {
                    id: id.to_string(),
                    height: viewport_height,
                })
                .collect(),
        }
    }
}

impl BackdropConfig {
    /// Parse a configuration from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> StardriftResult<Self> {
        let config: Self = serde_json::from_reader(r)
            .map_err(|e| StardriftError::serde(format!("parse backdrop config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(s: &str) -> StardriftResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a configuration from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> StardriftResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StardriftError::validation(format!("open backdrop config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON rendering.
    pub fn to_json_pretty(&self) -> StardriftResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StardriftError::serde(e.to_string()))
    }

    /// Reject sizes, ratios and intervals that cannot drive a backdrop.
    pub fn validate(&self) -> StardriftResult<()> {
        positive("viewport_width", self.viewport_width)?;
        positive("viewport_height", self.viewport_height)?;
        if let Some(h) = self.document_height {
            positive("document_height", h)?;
        }
        positive("device_pixel_ratio", self.device_pixel_ratio)?;
        non_negative("mobile_breakpoint", self.mobile_breakpoint)?;
        positive("frame.interval_ms", self.frame.interval_ms)?;
        non_negative("frame.slack_ms", self.frame.slack_ms)?;
        non_negative("frame.restart_delay_ms", self.frame.restart_delay_ms)?;
        non_negative("section_throttle_ms", self.section_throttle_ms)?;
        threshold("layer_observer", self.layer_observer)?;
        threshold("section_observer", self.section_observer)?;
        if self.layers.is_empty() {
            return Err(StardriftError::validation("layers must not be empty"));
        }
        for section in &self.sections {
            if section.id.is_empty() {
                return Err(StardriftError::validation("section id must not be empty"));
            }
            non_negative("section height", section.height)?;
        }
        Ok(())
    }

    /// Viewport size in CSS px.
    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    /// Document size in CSS px, never shorter than the viewport.
    pub fn document(&self) -> Size {
        let height = self
            .document_height
            .unwrap_or_else(|| self.sections.iter().map(|s| s.height).sum());
        Size::new(self.viewport_width, height.max(self.viewport_height))
    }

    /// Whether `viewport_width` falls below the mobile breakpoint.
    pub fn is_mobile(&self) -> bool {
        is_mobile_width(self.viewport_width, self.mobile_breakpoint)
    }
}

/// Whether a viewport of `width` px runs the mobile tables.
pub fn is_mobile_width(width: f64, breakpoint: f64) -> bool {
    width < breakpoint
}

fn positive(name: &str, v: f64) -> StardriftResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(StardriftError::validation(format!(
            "{name} must be finite and > 0, got {v}"
        )))
    }
}

fn non_negative(name: &str, v: f64) -> StardriftResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(StardriftError::validation(format!(
            "{name} must be finite and >= 0, got {v}"
        )))
    }
}

fn threshold(name: &str, options: ObserverOptions) -> StardriftResult<()> {
    let t = options.threshold;
    if t.is_finite() && (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(StardriftError::validation(format!(
            "{name}.threshold must be within [0, 1], got {t}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/config.rs"]
mod tests;
