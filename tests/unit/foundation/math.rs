use super::*;

#[test]
fn mul_div255_is_exact_at_bounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn unit_to_u8_clamps() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(2.0), 255);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(add_sat_u8(200, 100), 255);
    assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
}

#[test]
fn keyframes_interpolate_between_neighbours() {
    let v = [0.0, 1.0, 0.7, 1.0];
    assert_eq!(keyframes(&v, 0.0), 0.0);
    assert!((keyframes(&v, 1.0 / 6.0) - 0.5).abs() < 1e-12);
    assert!((keyframes(&v, 2.0 / 3.0) - 0.7).abs() < 1e-12);
    assert_eq!(keyframes(&v, 1.0), 1.0);
    assert_eq!(keyframes(&[3.0], 0.4), 3.0);
    assert_eq!(keyframes(&[], 0.4), 0.0);
}
