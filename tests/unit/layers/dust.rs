use super::*;
use crate::foundation::rng::Rng64;
use crate::render::recording::{DrawCall, RecordingSurface};
use crate::sim::pool::ParticlePool;
use crate::theme::variant::{Intensity, effective_intensity};

fn env(variant: Variant, intensity: Intensity, mobile: bool) -> LayerEnv {
    LayerEnv {
        variant,
        intensity: effective_intensity(intensity, mobile),
        mobile,
    }
}

#[test]
fn mobile_cosmic_ambient_uses_low_tier_count() {
    let layer = DustLayer::ambient(env(Variant::Cosmic, Intensity::High, true));
    assert_eq!(layer.capacity(Size::new(375.0, 800.0)), 6);

    let layer = DustLayer::ambient(env(Variant::Transcendent, Intensity::Medium, false));
    assert_eq!(layer.capacity(Size::new(1280.0, 720.0)), 15);
}

#[test]
fn trail_counts_follow_their_own_tables() {
    let bounds = Size::new(1280.0, 720.0);
    let cases = [
        (Variant::Cosmic, Intensity::High, 50),
        (Variant::Philosophical, Intensity::Medium, 20),
        (Variant::Transcendent, Intensity::Low, 12),
    ];
    for (variant, intensity, expected) in cases {
        let layer = DustLayer::trails(env(variant, intensity, false));
        assert_eq!(layer.capacity(bounds), expected, "{variant} {intensity}");
    }
}

#[test]
fn spawned_motes_stay_within_ranges() {
    let layer = DustLayer::trails(env(Variant::Philosophical, Intensity::High, false));
    let mut rng = Rng64::new(3);
    for slot in 0..200 {
        let p = layer.spawn(&mut SpawnCtx {
            bounds: Size::new(300.0, 200.0),
            slot,
            initial: true,
            rng: &mut rng,
        });
        assert!((260.0..300.0).contains(&p.hue));
        assert!((1.0..3.0).contains(&p.radius));
        assert!((0.3..0.7).contains(&p.base_opacity));
        assert!((8000.0..12_000.0).contains(&p.max_life_ms));
        assert!(p.vel.x.abs() <= 0.15 && p.vel.y.abs() <= 0.15);
        assert_eq!(p.trail().map(|t| t.capacity()), Some(TRAIL_LEN));
    }
}

#[test]
fn ambient_glow_depends_on_form_factor() {
    let bounds = Size::new(300.0, 200.0);
    for (mobile, glow) in [(true, 10.0), (false, 15.0)] {
        let layer = DustLayer::ambient(env(Variant::Cosmic, Intensity::Medium, mobile));
        let mut pool = ParticlePool::new(Rng64::new(1));
        pool.initialize(&layer, bounds);
        for _ in 0..200 {
            pool.step(&layer, 16.7);
        }
        let mut surface = RecordingSurface::new();
        layer.draw(pool.particles(), &mut surface).unwrap();
        assert!(!surface.calls().is_empty());
        for call in surface.calls() {
            assert!(matches!(call, DrawCall::Circle { glow: g, .. } if *g == glow));
        }
    }
}

#[test]
fn trailed_motes_draw_trail_body_and_core() {
    let layer = DustLayer::trails(env(Variant::Cosmic, Intensity::Low, false));
    let mut pool = ParticlePool::new(Rng64::new(9));
    pool.initialize(&layer, Size::new(400.0, 300.0));
    for _ in 0..150 {
        pool.step(&layer, 16.7);
    }
    let p = pool.particles()[0].clone();
    assert_eq!(p.trail().map(|t| t.len()), Some(TRAIL_LEN));

    let mut surface = RecordingSurface::new();
    layer.draw_particle(&p, &mut surface);
    let calls = surface.calls();
    let halo = calls
        .iter()
        .filter(|c| matches!(c, DrawCall::Circle { glow, .. } if *glow > 0.0))
        .count();
    assert_eq!(halo, 1);
    let DrawCall::Circle { radius, .. } = calls[calls.len() - 1] else {
        panic!("expected core circle");
    };
    assert!((radius - p.radius * 0.5).abs() < 1e-12);
    assert!(calls.len() > 2);
}
