use super::*;

fn fitted(w: f64, h: f64, dpr: f64) -> CpuSurface {
    let mut s = CpuSurface::new();
    s.fit_to_container(Size::new(w, h), dpr).unwrap();
    s
}

#[test]
fn empty_container_has_no_drawing_context() {
    let mut s = CpuSurface::new();
    let err = s.fit_to_container(Size::new(0.0, 10.0), 1.0).unwrap_err();
    assert!(matches!(err, StardriftError::Surface(_)));
    assert!(s.present().is_err());
    assert!(s.snapshot().is_none());
}

#[test]
fn oversized_backing_store_is_rejected() {
    let mut s = CpuSurface::new();
    let err = s.fit_to_container(Size::new(70_000.0, 10.0), 1.0).unwrap_err();
    assert!(matches!(err, StardriftError::Surface(_)));
}

#[test]
fn backing_store_follows_dpr() {
    let mut s = fitted(16.0, 8.0, 2.0);
    s.present().unwrap();
    let frame = s.snapshot().unwrap();
    assert_eq!((frame.width, frame.height), (32, 16));
    assert!(frame.premultiplied);
    assert_eq!(s.frames_presented(), 1);
}

#[test]
fn rect_fill_is_drawn_in_css_pixels() {
    let mut s = fitted(10.0, 10.0, 2.0);
    s.fill_rect(Rect::new(0.0, 0.0, 5.0, 10.0), Rgba8::hex(0xff0000));
    s.present().unwrap();
    let frame = s.snapshot().unwrap();
    assert_eq!(frame.pixel(2, 10), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(15, 10), Some([0, 0, 0, 0]));
}

#[test]
fn clear_wipes_previous_frame() {
    let mut s = fitted(8.0, 8.0, 1.0);
    s.fill_circle(Point::new(4.0, 4.0), 3.0, Rgba8::WHITE, 2.0);
    s.present().unwrap();
    assert_ne!(s.snapshot().unwrap().pixel(4, 4), Some([0, 0, 0, 0]));

    s.clear();
    s.present().unwrap();
    assert_eq!(s.snapshot().unwrap().pixel(4, 4), Some([0, 0, 0, 0]));
}
