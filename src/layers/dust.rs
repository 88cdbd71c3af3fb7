use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Size, Vec2};
use crate::render::surface::Surface;
use crate::sim::kind::{LayerEnv, LayerKind, SpawnCtx};
use crate::sim::particle::{Body, Particle, WRAP_MARGIN_PX, WrapPolicy};
use crate::sim::trail::Trail;
use crate::theme::variant::{TierTable, Variant};

/// Samples kept by a trailed mote.
pub const TRAIL_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
struct DustParams {
    name: &'static str,
    counts: TierTable<usize>,
    hue_range: (f64, f64),
    life_ms: (f64, f64),
    speed: f64,
    radius: (f64, f64),
    opacity: (f64, f64),
    trail: bool,
}

/// Drifting hue-tinted motes: the ambient background and the trailed particle system.
#[derive(Clone, Debug)]
pub struct DustLayer {
    params: DustParams,
    env: LayerEnv,
}

const fn tiers(low: usize, medium: usize, high: usize) -> TierTable<usize> {
    TierTable { low, medium, high }
}

impl DustLayer {
    /// Ambient motes: large soft glows, counts and hues from the variant table.
    pub fn ambient(env: LayerEnv) -> Self {
        let config = env.variant.config();
        Self {
            params: DustParams {
                name: "ambient",
                counts: config.ambient_counts,
                hue_range: config.hue_range,
                life_ms: (5000.0, 10_000.0),
                speed: 0.25,
                radius: (1.0, 4.0),
                opacity: (0.2, 0.7),
                trail: false,
            },
            env,
        }
    }

    /// Trailed particles with a bright inner core.
    pub fn trails(env: LayerEnv) -> Self {
        let (counts, hue_range) = match env.variant {
            Variant::Cosmic => (tiers(15, 30, 50), (220.0, 280.0)),
            Variant::Philosophical => (tiers(10, 20, 35), (260.0, 300.0)),
            Variant::Transcendent => (tiers(12, 25, 40), (180.0, 240.0)),
        };
        Self {
            params: DustParams {
                name: "trails",
                counts,
                hue_range,
                life_ms: (8000.0, 12_000.0),
                speed: 0.15,
                radius: (1.0, 3.0),
                opacity: (0.3, 0.7),
                trail: true,
            },
            env,
        }
    }

    fn glow(&self, p: &Particle) -> f64 {
        if self.params.trail {
            p.radius * 3.0
        } else if self.env.mobile {
            10.0
        } else {
            15.0
        }
    }
}

impl LayerKind for DustLayer {
    fn name(&self) -> &'static str {
        self.params.name
    }

    fn capacity(&self, _bounds: Size) -> usize {
        self.params.counts.get(self.env.intensity)
    }

    fn spawn(&self, ctx: &mut SpawnCtx<'_>) -> Particle {
        let p = &self.params;
        let rng = &mut *ctx.rng;
        let max_life_ms = rng.range(p.life_ms.0, p.life_ms.1);
        let pos = Point::new(
            rng.range(0.0, ctx.bounds.width),
            rng.range(0.0, ctx.bounds.height),
        );
        let vel = Vec2::new(rng.centered(p.speed), rng.centered(p.speed));
        let radius = rng.range(p.radius.0, p.radius.1);
        let base_opacity = rng.range(p.opacity.0, p.opacity.1);
        let hue = rng.range(p.hue_range.0, p.hue_range.1);
        let (s, l) = if p.trail { (80.0, 70.0) } else { (70.0, 65.0) };
        Particle {
            pos,
            vel,
            radius,
            base_opacity,
            color: Rgba8::from_hsl(hue, s, l),
            hue,
            life_ms: 0.0,
            max_life_ms,
            slot: ctx.slot,
            body: Body::Mote {
                trail: p.trail.then(|| Trail::new(TRAIL_LEN)),
            },
        }
    }

    fn wrap_policy(&self) -> WrapPolicy {
        WrapPolicy::Torus {
            margin: WRAP_MARGIN_PX,
        }
    }

    fn draw_particle(&self, p: &Particle, surface: &mut dyn Surface) {
        let alpha = p.alpha();
        if let Some(trail) = p.trail() {
            let trail_color = Rgba8::from_hsl(p.hue, 70.0, 65.0);
            for (sample, weight) in trail.weighted() {
                let a = alpha * weight * 0.3;
                if a > 0.01 {
                    surface.fill_circle(sample.pos, p.radius * 0.5, trail_color.with_alpha(a), 0.0);
                }
            }
        }

        surface.draw_particle(p, p.color, self.glow(p));

        if self.params.trail && alpha > 0.01 {
            let core = Rgba8::from_hsl(p.hue, 90.0, 85.0).with_alpha(alpha * 0.5);
            surface.fill_circle(p.pos, p.radius * 0.5, core, 0.0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/dust.rs"]
mod tests;
