use super::*;

#[test]
fn premul_rounds_like_canvas() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}

#[test]
fn overlap_area_handles_disjoint_and_nested() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(overlap_area(a, Rect::new(20.0, 20.0, 30.0, 30.0)), 0.0);
    assert_eq!(overlap_area(a, Rect::new(5.0, 5.0, 15.0, 15.0)), 25.0);
    assert_eq!(overlap_area(a, Rect::new(2.0, 2.0, 4.0, 4.0)), 4.0);
}
