use crate::foundation::core::Size;
use crate::foundation::error::StardriftResult;
use crate::foundation::rng::Rng64;
use crate::render::surface::Surface;
use crate::sim::particle::{Particle, WrapPolicy};
use crate::theme::variant::{Intensity, Variant};

/// Inputs that select a layer's tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LayerEnv {
    /// Visual variant.
    pub variant: Variant,
    /// Effective density tier (already capped for mobile).
    pub intensity: Intensity,
    /// Mobile form factor.
    pub mobile: bool,
}

/// Vertical extent a layer covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extent {
    /// Fixed to the viewport.
    Viewport,
    /// Covers the whole scroll document.
    Document,
}

/// Per-spawn context handed to [`LayerKind::spawn`].
pub struct SpawnCtx<'a> {
    /// Surface bounds in CSS px.
    pub bounds: Size,
    /// Pool slot being filled.
    pub slot: usize,
    /// `true` while the pool is being (re)initialized, `false` on respawn after expiry.
    pub initial: bool,
    /// Layer RNG.
    pub rng: &'a mut Rng64,
}

/// Per-step context handed to [`LayerKind::advance`].
#[derive(Clone, Copy, Debug)]
pub struct StepCtx {
    /// Surface bounds in CSS px.
    pub bounds: Size,
    /// Real time since the previous accepted frame.
    pub delta_ms: f64,
}

/// One concrete layer: particle factory, step rule and draw rule.
///
/// Every animated layer runs the same engine ([`crate::ParticlePool`] driven by a frame
/// loop); a `LayerKind` only supplies what differs.
pub trait LayerKind: std::fmt::Debug {
    /// Stable layer name used in logs.
    fn name(&self) -> &'static str;

    /// Number of particles for a surface of `bounds`. Constant for one pool lifetime.
    fn capacity(&self, bounds: Size) -> usize;

    /// Fresh particle for `ctx.slot`.
    fn spawn(&self, ctx: &mut SpawnCtx<'_>) -> Particle;

    /// Advance one accepted frame. Displacement is per frame, not scaled by `delta_ms`.
    fn advance(&self, p: &mut Particle, _ctx: &StepCtx) {
        p.pos += p.vel;
    }

    /// How particles stay on the surface.
    fn wrap_policy(&self) -> WrapPolicy;

    /// Vertical extent of the layer surface.
    fn extent(&self) -> Extent {
        Extent::Viewport
    }

    /// Opacity the layer surface is composited at.
    fn composite_opacity(&self) -> f64 {
        1.0
    }

    /// Paint one particle.
    fn draw_particle(&self, p: &Particle, surface: &mut dyn Surface);

    /// Paint the whole batch. Layers that draw shapes spanning many particles override this.
    fn draw(&self, particles: &[Particle], surface: &mut dyn Surface) -> StardriftResult<()> {
        for p in particles {
            self.draw_particle(p, surface);
        }
        Ok(())
    }
}
