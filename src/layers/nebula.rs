use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::math::keyframes;
use crate::render::surface::Surface;
use crate::sim::kind::{LayerEnv, LayerKind, SpawnCtx, StepCtx};
use crate::sim::particle::{Body, Particle, WrapPolicy};
use crate::theme::variant::Variant;

/// Cloud scale relative to the desktop size on mobile devices.
pub const MOBILE_SCALE: f64 = 0.7;

const OPACITY_KEYS: [f64; 4] = [0.0, 1.0, 0.7, 1.0];
const SCALE_KEYS: [f64; 4] = [0.8, 1.2, 1.0, 1.1];
const DRIFT_KEYS: [f64; 3] = [0.0, 1.0, 0.0];

/// One anchored cloud: center in percent of the surface, diameter in CSS px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    /// Horizontal center in percent.
    pub x_pct: f64,
    /// Vertical center in percent.
    pub y_pct: f64,
    /// Diameter in CSS px on desktop.
    pub size: f64,
    /// Cloud color.
    pub color: Rgba8,
    /// Peak opacity.
    pub opacity: f64,
}

const fn blob(x_pct: f64, y_pct: f64, size: f64, rgb: u32, opacity: f64) -> Blob {
    Blob {
        x_pct,
        y_pct,
        size,
        color: Rgba8::hex(rgb),
        opacity,
    }
}

static COSMIC: [Blob; 3] = [
    blob(15.0, 25.0, 400.0, 0x3b82f6, 0.15),
    blob(70.0, 60.0, 350.0, 0xa855f7, 0.12),
    blob(40.0, 80.0, 300.0, 0x22d3ee, 0.18),
];
static PHILOSOPHICAL: [Blob; 2] = [
    blob(30.0, 40.0, 350.0, 0x818cf8, 0.14),
    blob(65.0, 20.0, 280.0, 0xa855f7, 0.16),
];
static TRANSCENDENT: [Blob; 2] = [
    blob(50.0, 30.0, 320.0, 0x22d3ee, 0.13),
    blob(25.0, 70.0, 380.0, 0x0ea5e9, 0.15),
];

/// Clouds of `variant`.
pub fn blobs(variant: Variant) -> &'static [Blob] {
    match variant {
        Variant::Cosmic => &COSMIC,
        Variant::Philosophical => &PHILOSOPHICAL,
        Variant::Transcendent => &TRANSCENDENT,
    }
}

/// Length of one drift/scale/opacity cycle of cloud `index`.
pub fn cycle_ms(index: usize) -> f64 {
    (30.0 + 5.0 * index as f64) * 1000.0
}

/// Slowly breathing clouds anchored at fixed positions.
///
/// Each cloud runs a keyframed cycle (opacity, scale, drift) whose progress is the particle's
/// life ratio; expiry restarts the cycle.
#[derive(Clone, Debug)]
pub struct NebulaLayer {
    blobs: &'static [Blob],
    scale: f64,
}

impl NebulaLayer {
    /// Nebula for `env.variant`, shrunk on mobile.
    pub fn new(env: LayerEnv) -> Self {
        Self {
            blobs: blobs(env.variant),
            scale: if env.mobile { MOBILE_SCALE } else { 1.0 },
        }
    }
}

impl LayerKind for NebulaLayer {
    fn name(&self) -> &'static str {
        "nebula"
    }

    fn capacity(&self, _bounds: Size) -> usize {
        self.blobs.len()
    }

    fn spawn(&self, ctx: &mut SpawnCtx<'_>) -> Particle {
        let i = ctx.slot;
        let blob = self.blobs[i % self.blobs.len()];
        let anchor = Point::new(
            ctx.bounds.width * blob.x_pct / 100.0,
            ctx.bounds.height * blob.y_pct / 100.0,
        );
        let angle = i as f64 * 45.0;
        let base_radius = blob.size * self.scale / 2.0;
        Particle {
            pos: anchor,
            vel: Vec2::ZERO,
            radius: base_radius * SCALE_KEYS[0],
            base_opacity: blob.opacity,
            color: blob.color,
            hue: 0.0,
            life_ms: 0.0,
            max_life_ms: cycle_ms(i),
            slot: i,
            body: Body::Nebula {
                anchor,
                drift: Vec2::new(angle.sin() * 20.0, angle.cos() * 15.0),
                base_radius,
            },
        }
    }

    fn advance(&self, p: &mut Particle, _ctx: &StepCtx) {
        let t = p.life_ratio();
        if let Body::Nebula {
            anchor,
            drift,
            base_radius,
        } = p.body
        {
            p.pos = anchor + drift * keyframes(&DRIFT_KEYS, t);
            p.radius = base_radius * keyframes(&SCALE_KEYS, t);
        }
    }

    fn wrap_policy(&self) -> WrapPolicy {
        WrapPolicy::Anchored
    }

    fn draw_particle(&self, p: &Particle, surface: &mut dyn Surface) {
        let alpha = p.base_opacity * keyframes(&OPACITY_KEYS, p.life_ratio());
        if alpha <= 0.0 {
            return;
        }
        // The gradient fades out at 70 % of the diameter.
        surface.fill_radial_glow(p.pos, p.radius * 1.4, p.color.with_alpha(alpha));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/nebula.rs"]
mod tests;
