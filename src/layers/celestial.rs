use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Size, Vec2};
use crate::render::surface::Surface;
use crate::sim::kind::{Extent, LayerEnv, LayerKind, SpawnCtx};
use crate::sim::particle::{Body, CelestialKind, Particle, WrapPolicy};
use crate::sim::trail::Trail;

/// Samples kept by a comet trail.
pub const COMET_TRAIL_LEN: usize = 20;
/// Distance past the right edge before an object re-enters.
pub const EXIT_MARGIN_PX: f64 = 100.0;
/// Distance left of the surface where objects (re-)enter.
pub const ENTRY_MARGIN_PX: f64 = 50.0;

const KINDS: [CelestialKind; 3] = [
    CelestialKind::Asteroid,
    CelestialKind::Comet,
    CelestialKind::Planet,
];

/// Fill color of a celestial kind.
pub fn kind_color(kind: CelestialKind) -> Rgba8 {
    match kind {
        CelestialKind::Asteroid => Rgba8::hex(0x8b7355),
        CelestialKind::Comet => Rgba8::hex(0x22d3ee),
        CelestialKind::Planet => Rgba8::hex(0xa855f7),
    }
}

/// Asteroids, comets and planets drifting rightwards across the whole document.
#[derive(Clone, Debug)]
pub struct CelestialLayer {
    mobile: bool,
}

impl CelestialLayer {
    /// Celestial layer; only the form factor matters.
    pub fn new(env: LayerEnv) -> Self {
        Self { mobile: env.mobile }
    }
}

impl LayerKind for CelestialLayer {
    fn name(&self) -> &'static str {
        "celestial"
    }

    fn capacity(&self, _bounds: Size) -> usize {
        if self.mobile { 4 } else { 8 }
    }

    fn spawn(&self, ctx: &mut SpawnCtx<'_>) -> Particle {
        let rng = &mut *ctx.rng;
        let kind = rng
            .pick(&KINDS)
            .copied()
            .unwrap_or(CelestialKind::Asteroid);
        let (radius, speed, opacity) = match kind {
            CelestialKind::Planet => (rng.range(4.0, 12.0), rng.range(0.1, 0.3), 0.7),
            _ => (rng.range(2.0, 6.0), rng.range(0.3, 1.0), 0.8),
        };
        let mut outline = [1.0; 6];
        for k in &mut outline {
            *k = rng.range(0.8, 1.2);
        }
        let x = if ctx.initial {
            rng.range(-ENTRY_MARGIN_PX, ctx.bounds.width)
        } else {
            -ENTRY_MARGIN_PX
        };
        Particle {
            pos: Point::new(x, rng.range(0.0, ctx.bounds.height)),
            vel: Vec2::new(speed, 0.0),
            radius,
            base_opacity: opacity,
            color: kind_color(kind),
            hue: 0.0,
            life_ms: 0.0,
            max_life_ms: rng.range(30_000.0, 60_000.0),
            slot: ctx.slot,
            body: Body::Celestial {
                kind,
                trail: (kind == CelestialKind::Comet).then(|| Trail::new(COMET_TRAIL_LEN)),
                outline,
            },
        }
    }

    fn wrap_policy(&self) -> WrapPolicy {
        WrapPolicy::ReenterLeft {
            exit_margin: EXIT_MARGIN_PX,
            entry_margin: ENTRY_MARGIN_PX,
        }
    }

    fn extent(&self) -> Extent {
        Extent::Document
    }

    fn draw_particle(&self, p: &Particle, surface: &mut dyn Surface) {
        let Body::Celestial { kind, .. } = p.body else {
            return;
        };
        let fade = p.fade();
        if let Some(trail) = p.trail() {
            for (sample, weight) in trail.weighted() {
                let a = weight * 0.6 * fade;
                if a > 0.01 {
                    surface.fill_circle(sample.pos, p.radius * 0.3, p.color.with_alpha(a), 2.0);
                }
            }
        }

        surface.draw_particle(p, p.color, p.radius * 2.0);

        if kind == CelestialKind::Planet && fade > 0.0 {
            surface.fill_circle(
                p.pos,
                p.radius * 0.6,
                Rgba8::WHITE.with_alpha(0.4 * fade),
                0.0,
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/celestial.rs"]
mod tests;
