use crate::foundation::color::Rgba8;
use crate::foundation::core::{BezPath, Point, Size, Vec2};
use crate::foundation::error::StardriftResult;
use crate::render::surface::Surface;
use crate::sim::kind::{LayerEnv, LayerKind, SpawnCtx, StepCtx};
use crate::sim::particle::{Body, Particle, WrapPolicy};
use crate::theme::variant::Variant;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

/// Phase covered by one wave cycle.
pub const CYCLE_PHASE: f64 = 4.0 * PI;

/// One sine wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    /// Amplitude in CSS px.
    pub amplitude: f64,
    /// Angular frequency per CSS px.
    pub frequency: f64,
    /// Phase offset (radians).
    pub phase: f64,
    /// Fill color.
    pub color: Rgba8,
    /// Fill opacity.
    pub opacity: f64,
}

const fn wave(amplitude: f64, frequency: f64, phase: f64, rgb: u32, opacity: f64) -> Wave {
    Wave {
        amplitude,
        frequency,
        phase,
        color: Rgba8::hex(rgb),
        opacity,
    }
}

static COSMIC: [Wave; 3] = [
    wave(50.0, 0.02, 0.0, 0x3b82f6, 0.1),
    wave(30.0, 0.03, PI, 0xa855f7, 0.08),
    wave(40.0, 0.025, FRAC_PI_2, 0x22d3ee, 0.12),
];
static PHILOSOPHICAL: [Wave; 2] = [
    wave(45.0, 0.025, 0.0, 0x818cf8, 0.1),
    wave(35.0, 0.035, PI, 0xa855f7, 0.09),
];
static TRANSCENDENT: [Wave; 2] = [
    wave(55.0, 0.02, 0.0, 0x22d3ee, 0.11),
    wave(25.0, 0.04, FRAC_PI_3, 0x0ea5e9, 0.08),
];

/// Waves of `variant`.
pub fn waves(variant: Variant) -> &'static [Wave] {
    match variant {
        Variant::Cosmic => &COSMIC,
        Variant::Philosophical => &PHILOSOPHICAL,
        Variant::Transcendent => &TRANSCENDENT,
    }
}

/// Length of one cycle of wave `index`.
pub fn cycle_ms(index: usize) -> f64 {
    (20.0 + 3.0 * index as f64) * 1000.0
}

/// Filled sine waves across the middle of the viewport.
///
/// Each wave is `steps + 1` sample particles; the whole wave is filled as one closed path.
#[derive(Clone, Debug)]
pub struct EnergyWaves {
    waves: &'static [Wave],
    steps: usize,
}

impl EnergyWaves {
    /// Waves for `env.variant`, sampled more coarsely on mobile.
    pub fn new(env: LayerEnv) -> Self {
        Self {
            waves: waves(env.variant),
            steps: if env.mobile { 30 } else { 50 },
        }
    }

    /// Segments per wave.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn wave_y(&self, w: &Wave, x: f64, height: f64, life_ratio: f64) -> f64 {
        height / 2.0 + (x * w.frequency + CYCLE_PHASE * life_ratio + w.phase).sin() * w.amplitude
    }
}

impl LayerKind for EnergyWaves {
    fn name(&self) -> &'static str {
        "waves"
    }

    fn capacity(&self, _bounds: Size) -> usize {
        self.waves.len() * (self.steps + 1)
    }

    fn spawn(&self, ctx: &mut SpawnCtx<'_>) -> Particle {
        let per_wave = self.steps + 1;
        let (wave, sample) = (ctx.slot / per_wave, ctx.slot % per_wave);
        let w = self.waves[wave % self.waves.len()];
        let x = sample as f64 / self.steps as f64 * ctx.bounds.width;
        Particle {
            pos: Point::new(x, self.wave_y(&w, x, ctx.bounds.height, 0.0)),
            vel: Vec2::ZERO,
            radius: 1.0,
            base_opacity: w.opacity,
            color: w.color,
            hue: 0.0,
            life_ms: 0.0,
            max_life_ms: cycle_ms(wave),
            slot: ctx.slot,
            body: Body::WaveSample { wave, sample },
        }
    }

    fn advance(&self, p: &mut Particle, ctx: &StepCtx) {
        let Body::WaveSample { wave, .. } = p.body else {
            return;
        };
        let w = self.waves[wave % self.waves.len()];
        p.pos.y = self.wave_y(&w, p.pos.x, ctx.bounds.height, p.life_ratio());
    }

    fn wrap_policy(&self) -> WrapPolicy {
        WrapPolicy::Anchored
    }

    // Samples are only drawn as part of their wave's path.
    fn draw_particle(&self, _p: &Particle, _surface: &mut dyn Surface) {}

    fn draw(&self, particles: &[Particle], surface: &mut dyn Surface) -> StardriftResult<()> {
        let css = surface.desc().css;
        let wave_of = |p: &Particle| match p.body {
            Body::WaveSample { wave, .. } => Some(wave),
            _ => None,
        };
        for samples in particles.chunk_by(|a, b| wave_of(a) == wave_of(b)) {
            let Some(first) = samples.first() else {
                continue;
            };
            let mut path = BezPath::new();
            path.move_to(Point::new(0.0, css.height));
            for p in samples {
                path.line_to(p.pos);
            }
            path.line_to(Point::new(css.width, css.height));
            path.close_path();
            surface.fill_path(&path, first.color.with_alpha(first.base_opacity));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/waves.rs"]
mod tests;
