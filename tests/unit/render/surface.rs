use super::*;
use crate::render::recording::{DrawCall, RecordingSurface};
use crate::sim::particle::{Body, CelestialKind};
use crate::foundation::core::Vec2;

fn particle(body: Body) -> Particle {
    Particle {
        pos: Point::new(20.0, 30.0),
        vel: Vec2::ZERO,
        radius: 4.0,
        base_opacity: 0.8,
        color: Rgba8::WHITE,
        hue: 0.0,
        life_ms: 500.0,
        max_life_ms: 1000.0,
        slot: 0,
        body,
    }
}

#[test]
fn dpr_is_capped_and_sanitized() {
    assert_eq!(effective_dpr(1.5), 1.5);
    assert_eq!(effective_dpr(3.0), MAX_DEVICE_PIXEL_RATIO);
    assert_eq!(effective_dpr(0.0), 1.0);
    assert_eq!(effective_dpr(f64::NAN), 1.0);
}

#[test]
fn fit_scales_backing_store_by_capped_dpr() {
    let d = SurfaceDesc::fit(Size::new(300.0, 200.0), 3.0);
    assert_eq!((d.backing_width, d.backing_height), (600, 400));
    assert_eq!(d.dpr, 2.0);
    assert_eq!(d.css_to_device(), Affine::scale(2.0));

    let d = SurfaceDesc::fit(Size::new(100.5, 50.0), 1.0);
    assert_eq!(d.backing_width, 100);
    assert!(!d.is_empty());
    assert!(SurfaceDesc::fit(Size::new(-5.0, 10.0), 1.0).is_empty());
}

#[test]
fn draw_particle_uses_fade_times_opacity() {
    let mut s = RecordingSurface::new();
    s.draw_particle(&particle(Body::Mote { trail: None }), Rgba8::WHITE, 3.0);
    let [DrawCall::Circle { color, glow, .. }] = s.calls() else {
        panic!("expected one circle, got {:?}", s.calls());
    };
    assert_eq!(color.a, 204);
    assert_eq!(*glow, 3.0);
}

#[test]
fn asteroids_draw_as_polygons_and_faint_particles_are_skipped() {
    let mut s = RecordingSurface::new();
    s.draw_particle(
        &particle(Body::Celestial {
            kind: CelestialKind::Asteroid,
            trail: None,
            outline: [1.0; 6],
        }),
        Rgba8::WHITE,
        0.0,
    );
    assert!(matches!(&s.calls()[0], DrawCall::Polygon { points, .. } if points.len() == 6));

    let mut faint = particle(Body::Mote { trail: None });
    faint.life_ms = 0.0;
    s.clear();
    s.draw_particle(&faint, Rgba8::WHITE, 0.0);
    assert!(s.calls().is_empty());
}

#[test]
fn frame_pixel_lookup_is_bounds_checked() {
    let f = FrameRGBA::transparent(2, 2);
    assert_eq!(f.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(2, 0), None);
}
