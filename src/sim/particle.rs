use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Size, Vec2};
use crate::sim::trail::Trail;
use serde::{Deserialize, Serialize};

/// Fraction of a lifetime spent fading in (and, symmetrically, fading out).
pub const FADE_FRACTION: f64 = 0.2;

/// Margin (CSS px) past the surface edge before a drifting particle re-enters opposite.
pub const WRAP_MARGIN_PX: f64 = 50.0;

/// Kind of a starfield celestial object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelestialKind {
    /// Irregular rocky polygon.
    Asteroid,
    /// Fast disc with a trail.
    Comet,
    /// Large slow disc with a bright core.
    Planet,
}

/// Layer-specific state carried by a [`Particle`].
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// Drifting mote, optionally trailed.
    Mote {
        /// Recent positions, when the layer draws trails.
        trail: Option<Trail>,
    },
    /// Fixed twinkling star.
    Star {
        /// Phase advance per tick (radians).
        twinkle_speed: f64,
        /// Current twinkle phase (radians).
        twinkle_phase: f64,
    },
    /// Asteroid, comet or planet crossing the starfield.
    Celestial {
        /// Object kind.
        kind: CelestialKind,
        /// Comet trail.
        trail: Option<Trail>,
        /// Per-vertex radius factors of the asteroid hexagon, fixed per spawn.
        outline: [f64; 6],
    },
    /// Anchored nebula cloud that breathes around its anchor.
    Nebula {
        /// Rest position.
        anchor: Point,
        /// Peak drift away from the anchor.
        drift: Vec2,
        /// Radius at scale 1.
        base_radius: f64,
    },
    /// One sample of an energy wave polyline. The wave phase follows the life ratio.
    WaveSample {
        /// Wave index within the layer.
        wave: usize,
        /// Sample index along the wave.
        sample: usize,
    },
}

/// Ephemeral simulated entity owned by exactly one pool.
///
/// Invariant: `0 <= life_ms <= max_life_ms` and `radius > 0` after every step.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface-local CSS px.
    pub pos: Point,
    /// Displacement applied per accepted frame.
    pub vel: Vec2,
    /// Draw radius in CSS px.
    pub radius: f64,
    /// Opacity before lifetime fading.
    pub base_opacity: f64,
    /// Main draw color.
    pub color: Rgba8,
    /// Hue in degrees (hue-driven layers).
    pub hue: f64,
    /// Elapsed life in ms.
    pub life_ms: f64,
    /// Lifetime in ms.
    pub max_life_ms: f64,
    /// Index of this particle within its pool.
    pub slot: usize,
    /// Layer-specific state.
    pub body: Body,
}

impl Particle {
    /// Elapsed fraction of the lifetime, in `[0, 1]`.
    pub fn life_ratio(&self) -> f64 {
        if self.max_life_ms <= 0.0 {
            return 1.0;
        }
        (self.life_ms / self.max_life_ms).clamp(0.0, 1.0)
    }

    /// Lifetime fade factor in `[0, 1]`.
    pub fn fade(&self) -> f64 {
        fade_factor(self.life_ratio())
    }

    /// Effective draw alpha: fade times base opacity.
    pub fn alpha(&self) -> f64 {
        self.fade() * self.base_opacity
    }

    /// Return `true` once the lifetime is used up.
    pub fn is_expired(&self) -> bool {
        self.life_ms >= self.max_life_ms
    }

    /// Trail, for bodies that carry one.
    pub fn trail(&self) -> Option<&Trail> {
        match &self.body {
            Body::Mote { trail } | Body::Celestial { trail, .. } => trail.as_ref(),
            _ => None,
        }
    }

    /// Mutable trail, for bodies that carry one.
    pub fn trail_mut(&mut self) -> Option<&mut Trail> {
        match &mut self.body {
            Body::Mote { trail } | Body::Celestial { trail, .. } => trail.as_mut(),
            _ => None,
        }
    }

    /// Vertices of the asteroid outline, `None` for every other body.
    pub fn asteroid_outline(&self) -> Option<[Point; 6]> {
        let Body::Celestial {
            kind: CelestialKind::Asteroid,
            outline,
            ..
        } = &self.body
        else {
            return None;
        };
        let mut pts = [Point::ZERO; 6];
        for (i, (pt, k)) in pts.iter_mut().zip(outline).enumerate() {
            let angle = i as f64 / 6.0 * std::f64::consts::TAU;
            let r = self.radius * k;
            *pt = Point::new(self.pos.x + angle.cos() * r, self.pos.y + angle.sin() * r);
        }
        Some(pts)
    }

    /// Overwrite this particle with `fresh`, reusing the old trail storage.
    pub(crate) fn recycle(&mut self, mut fresh: Particle) {
        if let (Some(old), Some(new)) = (self.trail_mut(), fresh.trail_mut()) {
            old.donate_storage(new);
        }
        *self = fresh;
    }
}

/// Linear fade-in over the first [`FADE_FRACTION`] of life, fade-out over the last.
pub fn fade_factor(life_ratio: f64) -> f64 {
    let r = life_ratio.clamp(0.0, 1.0);
    if r < FADE_FRACTION {
        r / FADE_FRACTION
    } else if r > 1.0 - FADE_FRACTION {
        (1.0 - r) / FADE_FRACTION
    } else {
        1.0
    }
}

/// How a layer keeps particles on its surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WrapPolicy {
    /// Leaving past `margin` on one edge re-enters at `-margin` / `size + margin` opposite.
    Torus {
        /// Margin in CSS px.
        margin: f64,
    },
    /// Leaving past `width + exit_margin` re-enters at `x = -entry_margin` on a fresh random lane.
    ReenterLeft {
        /// Distance past the right edge before re-entering.
        exit_margin: f64,
        /// Distance left of the surface where objects re-enter.
        entry_margin: f64,
    },
    /// Particles are positioned by the layer itself.
    Anchored,
}

/// Toroidal wrap with a margin on all four edges.
pub fn wrap_torus(pos: Point, bounds: Size, margin: f64) -> Point {
    let mut out = pos;
    if out.x < -margin {
        out.x = bounds.width + margin;
    } else if out.x > bounds.width + margin {
        out.x = -margin;
    }
    if out.y < -margin {
        out.y = bounds.height + margin;
    } else if out.y > bounds.height + margin {
        out.y = -margin;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/sim/particle.rs"]
mod tests;
