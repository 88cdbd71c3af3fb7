use crate::foundation::core::Size;
use crate::foundation::rng::Rng64;
use crate::sim::kind::{LayerKind, SpawnCtx, StepCtx};
use crate::sim::particle::{Particle, WrapPolicy, wrap_torus};

/// Fixed-size particle collection owned by one layer.
///
/// The collection is filled once per (re)initialization and never grows or shrinks while
/// stepping: expired particles are respawned in their slot.
#[derive(Debug)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    bounds: Size,
    rng: Rng64,
}

impl ParticlePool {
    /// Empty pool drawing randomness from `rng`.
    pub fn new(rng: Rng64) -> Self {
        Self {
            particles: Vec::new(),
            bounds: Size::ZERO,
            rng,
        }
    }

    /// Fill the pool with `kind.capacity(bounds)` fresh particles, discarding previous ones.
    pub fn initialize(&mut self, kind: &dyn LayerKind, bounds: Size) {
        let count = kind.capacity(bounds);
        let Self {
            particles,
            bounds: pool_bounds,
            rng,
        } = self;
        *pool_bounds = bounds;
        particles.clear();
        particles.reserve_exact(count);
        for slot in 0..count {
            particles.push(kind.spawn(&mut SpawnCtx {
                bounds,
                slot,
                initial: true,
                rng: &mut *rng,
            }));
        }
        tracing::debug!(layer = kind.name(), count, ?bounds, "particle pool initialized");
    }

    /// Refill for new bounds so no particle clusters at stale edges.
    pub fn reinitialize(&mut self, kind: &dyn LayerKind, bounds: Size) {
        self.initialize(kind, bounds);
    }

    /// Advance every particle by one accepted frame.
    ///
    /// Per particle: advance, record trail, keep on surface, age by `delta_ms`, and respawn in
    /// place once expired.
    pub fn step(&mut self, kind: &dyn LayerKind, delta_ms: f64) {
        let Self {
            particles,
            bounds,
            rng,
        } = self;
        let bounds = *bounds;
        let ctx = StepCtx { bounds, delta_ms };
        let policy = kind.wrap_policy();
        let age = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };

        for p in particles.iter_mut() {
            kind.advance(p, &ctx);

            let (pos, alpha) = (p.pos, p.base_opacity);
            if let Some(trail) = p.trail_mut() {
                trail.push(pos, alpha);
            }

            match policy {
                WrapPolicy::Torus { margin } => p.pos = wrap_torus(p.pos, bounds, margin),
                WrapPolicy::ReenterLeft {
                    exit_margin,
                    entry_margin,
                } => {
                    if p.pos.x > bounds.width + exit_margin {
                        p.pos.x = -entry_margin;
                        p.pos.y = rng.range(0.0, bounds.height);
                    }
                }
                WrapPolicy::Anchored => {}
            }

            p.life_ms = (p.life_ms + age).min(p.max_life_ms);
            if p.is_expired() {
                let fresh = kind.spawn(&mut SpawnCtx {
                    bounds,
                    slot: p.slot,
                    initial: false,
                    rng: &mut *rng,
                });
                p.recycle(fresh);
            }
        }
    }

    /// Drop every particle and its storage.
    pub fn release(&mut self) {
        self.particles = Vec::new();
        self.bounds = Size::ZERO;
    }

    /// Current particles in slot order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Return `true` when the pool holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Bounds of the last (re)initialization.
    pub fn bounds(&self) -> Size {
        self.bounds
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/pool.rs"]
mod tests;
