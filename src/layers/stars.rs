use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Size, Vec2};
use crate::render::surface::Surface;
use crate::sim::kind::{LayerEnv, LayerKind, SpawnCtx, StepCtx};
use crate::sim::particle::{Body, Particle, WrapPolicy};
use crate::theme::variant::Variant;

/// Stars per CSS px of width, an upper bound on top of the variant count.
pub const STARS_PER_WIDTH_PX: f64 = 0.25;
/// Opacity the starfield surface is composited at.
pub const STARFIELD_OPACITY: f64 = 0.6;

const SPARKLE: Rgba8 = Rgba8::hex(0x22d3ee);

#[derive(Clone, Copy, Debug, PartialEq)]
struct StarTable {
    mobile: usize,
    desktop: usize,
    colors: &'static [Rgba8],
    brightness: (f64, f64),
}

static COSMIC: StarTable = StarTable {
    mobile: 80,
    desktop: 150,
    colors: &[
        Rgba8::WHITE,
        Rgba8::hex(0x3b82f6),
        Rgba8::hex(0x22d3ee),
        Rgba8::hex(0xa855f7),
    ],
    brightness: (0.3, 1.0),
};

static PHILOSOPHICAL: StarTable = StarTable {
    mobile: 60,
    desktop: 120,
    colors: &[Rgba8::WHITE, Rgba8::hex(0x818cf8), Rgba8::hex(0xa855f7)],
    brightness: (0.4, 0.9),
};

static TRANSCENDENT: StarTable = StarTable {
    mobile: 70,
    desktop: 130,
    colors: &[Rgba8::WHITE, Rgba8::hex(0x22d3ee), Rgba8::hex(0x0ea5e9)],
    brightness: (0.3, 1.0),
};

/// Fixed twinkling stars.
#[derive(Clone, Debug)]
pub struct StarField {
    table: &'static StarTable,
    mobile: bool,
}

impl StarField {
    /// Starfield for `env.variant`; the count depends on the form factor only.
    pub fn new(env: LayerEnv) -> Self {
        let table = match env.variant {
            Variant::Cosmic => &COSMIC,
            Variant::Philosophical => &PHILOSOPHICAL,
            Variant::Transcendent => &TRANSCENDENT,
        };
        Self {
            table,
            mobile: env.mobile,
        }
    }
}

/// Twinkle factor in `[0, 1]` for a phase.
pub fn twinkle(phase: f64) -> f64 {
    (phase.sin() + 1.0) * 0.5
}

impl LayerKind for StarField {
    fn name(&self) -> &'static str {
        "stars"
    }

    fn capacity(&self, bounds: Size) -> usize {
        let base = if self.mobile {
            self.table.mobile
        } else {
            self.table.desktop
        };
        let by_width = (bounds.width.max(0.0) * STARS_PER_WIDTH_PX).floor() as usize;
        base.min(by_width)
    }

    fn spawn(&self, ctx: &mut SpawnCtx<'_>) -> Particle {
        let rng = &mut *ctx.rng;
        let max_life_ms = rng.range(20_000.0, 40_000.0);
        let life_ms = if ctx.initial {
            max_life_ms * rng.range(0.2, 0.8)
        } else {
            0.0
        };
        let color = rng.pick(self.table.colors).copied().unwrap_or(Rgba8::WHITE);
        Particle {
            pos: Point::new(
                rng.range(0.0, ctx.bounds.width),
                rng.range(0.0, ctx.bounds.height),
            ),
            vel: Vec2::ZERO,
            radius: rng.range(0.5, 2.5),
            base_opacity: rng.range(self.table.brightness.0, self.table.brightness.1),
            color,
            hue: 0.0,
            life_ms,
            max_life_ms,
            slot: ctx.slot,
            body: Body::Star {
                twinkle_speed: rng.range(0.02, 0.05),
                twinkle_phase: rng.range(0.0, std::f64::consts::TAU),
            },
        }
    }

    fn advance(&self, p: &mut Particle, _ctx: &StepCtx) {
        if let Body::Star {
            twinkle_speed,
            twinkle_phase,
        } = &mut p.body
        {
            *twinkle_phase = (*twinkle_phase + *twinkle_speed) % std::f64::consts::TAU;
        }
    }

    fn wrap_policy(&self) -> WrapPolicy {
        WrapPolicy::Anchored
    }

    fn composite_opacity(&self) -> f64 {
        STARFIELD_OPACITY
    }

    fn draw_particle(&self, p: &Particle, surface: &mut dyn Surface) {
        let Body::Star { twinkle_phase, .. } = p.body else {
            return;
        };
        let tw = twinkle(twinkle_phase);
        let alpha = p.alpha() * (0.3 + tw * 0.7);
        if alpha <= 0.01 {
            return;
        }
        surface.fill_circle(p.pos, p.radius, p.color.with_alpha(alpha), p.radius * 2.0);

        if p.radius > 2.0 && tw > 0.8 {
            surface.fill_circle(
                p.pos,
                p.radius * 0.3,
                SPARKLE.with_alpha(alpha * 0.5),
                p.radius * 4.0,
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/stars.rs"]
mod tests;
