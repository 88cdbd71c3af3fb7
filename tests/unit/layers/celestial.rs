use super::*;
use crate::foundation::rng::Rng64;
use crate::render::recording::{DrawCall, RecordingSurface};
use crate::sim::pool::ParticlePool;
use crate::theme::variant::{Intensity, Variant};

fn layer(mobile: bool) -> CelestialLayer {
    CelestialLayer::new(LayerEnv {
        variant: Variant::Cosmic,
        intensity: Intensity::Medium,
        mobile,
    })
}

#[test]
fn covers_the_document_with_few_objects() {
    assert_eq!(layer(true).capacity(Size::new(375.0, 4000.0)), 4);
    assert_eq!(layer(false).capacity(Size::new(1280.0, 4000.0)), 8);
    assert_eq!(layer(false).extent(), Extent::Document);
}

#[test]
fn kinds_carry_their_size_speed_and_color() {
    let layer = layer(false);
    let mut rng = Rng64::new(11);
    for slot in 0..300 {
        let p = layer.spawn(&mut SpawnCtx {
            bounds: Size::new(1000.0, 3000.0),
            slot,
            initial: false,
            rng: &mut rng,
        });
        let Body::Celestial { kind, trail, outline } = &p.body else {
            panic!("expected celestial body");
        };
        assert_eq!(p.pos.x, -ENTRY_MARGIN_PX);
        assert_eq!(p.color, kind_color(*kind));
        assert!(outline.iter().all(|k| (0.8..1.2).contains(k)));
        match kind {
            CelestialKind::Planet => {
                assert!((4.0..12.0).contains(&p.radius));
                assert!((0.1..0.3).contains(&p.vel.x));
                assert_eq!(p.base_opacity, 0.7);
            }
            _ => {
                assert!((2.0..6.0).contains(&p.radius));
                assert!((0.3..1.0).contains(&p.vel.x));
                assert_eq!(p.base_opacity, 0.8);
            }
        }
        assert_eq!(trail.is_some(), *kind == CelestialKind::Comet);
    }
}

#[test]
fn outline_is_fixed_until_respawn() {
    let outline_of = |p: &Particle| match p.body {
        Body::Celestial { outline, .. } => outline,
        _ => panic!("expected celestial body"),
    };
    let layer = layer(false);
    let mut pool = ParticlePool::new(Rng64::new(2));
    pool.initialize(&layer, Size::new(800.0, 2000.0));
    for _ in 0..500 {
        let before: Vec<[f64; 6]> = pool.particles().iter().map(outline_of).collect();
        pool.step(&layer, 160.0);
        for (p, outline) in pool.particles().iter().zip(&before) {
            if p.life_ms > 0.0 {
                assert_eq!(outline_of(p), *outline);
            }
            assert!(p.pos.x >= -ENTRY_MARGIN_PX && p.pos.x <= 800.0 + EXIT_MARGIN_PX);
        }
    }
}

#[test]
fn planets_get_a_white_core_and_comets_a_trail() {
    let layer = layer(false);
    let mut planet = layer.spawn(&mut SpawnCtx {
        bounds: Size::new(100.0, 100.0),
        slot: 0,
        initial: true,
        rng: &mut Rng64::new(0),
    });
    planet.body = Body::Celestial {
        kind: CelestialKind::Planet,
        trail: None,
        outline: [1.0; 6],
    };
    planet.life_ms = planet.max_life_ms / 2.0;
    let mut surface = RecordingSurface::new();
    layer.draw_particle(&planet, &mut surface);
    assert_eq!(surface.calls().len(), 2);
    assert!(matches!(
        surface.calls()[1],
        DrawCall::Circle { color, .. } if color == Rgba8::WHITE.with_alpha(0.4)
    ));

    let mut comet = planet.clone();
    let mut trail = Trail::new(COMET_TRAIL_LEN);
    for i in 0..5 {
        trail.push(Point::new(i as f64, 0.0), 1.0);
    }
    comet.body = Body::Celestial {
        kind: CelestialKind::Comet,
        trail: Some(trail),
        outline: [1.0; 6],
    };
    let mut surface = RecordingSurface::new();
    layer.draw_particle(&comet, &mut surface);
    assert_eq!(surface.calls().len(), 4 + 1);
}
