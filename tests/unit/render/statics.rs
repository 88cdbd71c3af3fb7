use super::*;
use crate::foundation::core::Size;
use crate::render::recording::{DrawCall, RecordingSurface};
use crate::theme::section::resolve_section;
use crate::theme::variant::Variant;

fn surface() -> RecordingSurface {
    let mut s = RecordingSurface::new();
    s.fit_to_container(Size::new(400.0, 300.0), 1.0).unwrap();
    s
}

#[test]
fn scroll_progress_drives_overlay_opacity() {
    assert_eq!(vignette_opacity(0.0), 0.6);
    assert!((vignette_opacity(1.0) - 0.8).abs() < 1e-12);
    assert!((vignette_opacity(7.0) - 0.8).abs() < 1e-12);
    assert_eq!(glass_opacity(0.0), 1.0);
    assert!((glass_opacity(1.0) - 0.6).abs() < 1e-12);
}

#[test]
fn gradient_sampling_hits_stops_and_midpoints() {
    let stops = resolve_section("hero").gradient;
    assert_eq!(sample_gradient(stops, 0.0), Rgba8::hex(0x0a0a0a));
    assert_eq!(sample_gradient(stops, 0.5), Rgba8::hex(0x1a1a2e));
    assert_eq!(sample_gradient(stops, 1.0), Rgba8::hex(0x16213e));
    assert_eq!(sample_gradient(stops, 0.25), Rgba8::hex(0x12121c));
    assert_eq!(sample_gradient(&[], 0.5).a, 0);
}

#[test]
fn background_covers_surface_with_bands() {
    let mut s = surface();
    paint_background(&mut s, resolve_section("blog").gradient, 0.9);
    let calls = s.calls();
    assert_eq!(calls.len(), 1 + GRADIENT_BANDS);
    let DrawCall::Rect { rect, color } = &calls[0] else {
        panic!("expected base rect");
    };
    assert_eq!(rect.size(), Size::new(400.0, 300.0));
    assert_eq!(color.a, 255);
    assert!(matches!(&calls[1], DrawCall::Rect { color, .. } if color.a == 230));
}

#[test]
fn vignette_frames_do_not_overlap_within_a_frame() {
    let mut s = surface();
    paint_vignette(&mut s, 0.6);
    assert_eq!(s.calls().len(), VIGNETTE_FRAMES * 4);
    let area: f64 = s.calls()[..4]
        .iter()
        .map(|c| match c {
            DrawCall::Rect { rect, .. } => rect.area(),
            _ => 0.0,
        })
        .sum();
    let inner = (400.0 - 2.0 * 400.0 / 32.0) * (300.0 - 2.0 * 300.0 / 32.0);
    assert!((area - (400.0 * 300.0 - inner)).abs() < 1e-6);

    let mut s = surface();
    paint_vignette(&mut s, 0.0);
    assert!(s.calls().is_empty());
}

#[test]
fn mesh_and_glass_place_spots_by_percent() {
    let mut s = surface();
    paint_mesh(&mut s, Variant::Cosmic.config().mesh_spots);
    assert_eq!(s.calls().len(), MESH_PASSES * 5);
    assert!(matches!(
        &s.calls()[0],
        DrawCall::RadialGlow { center, radius, .. }
            if *center == Point::new(80.0, 90.0) && *radius == 350.0
    ));

    let mut s = surface();
    paint_glass(&mut s, resolve_section("footer").glass, 0.5);
    let [DrawCall::RadialGlow { center, radius, color }] = s.calls() else {
        panic!("expected one glow");
    };
    assert_eq!(*center, Point::new(200.0, 150.0));
    assert_eq!(*radius, 200.0);
    assert_eq!(color.a, 5);
}
