use super::*;

#[test]
fn oldest_sample_is_evicted_first() {
    let mut t = Trail::new(3);
    for i in 0..5 {
        t.push(Point::new(f64::from(i), 0.0), 1.0);
    }
    assert_eq!(t.len(), 3);
    let xs: Vec<f64> = t.iter().map(|s| s.pos.x).collect();
    assert_eq!(xs, [2.0, 3.0, 4.0]);
}

#[test]
fn weights_rise_towards_newest() {
    let mut t = Trail::new(4);
    for i in 0..4 {
        t.push(Point::new(f64::from(i), 0.0), 1.0);
    }
    let w: Vec<f64> = t.weighted().map(|(_, w)| w).collect();
    assert_eq!(w, [0.0, 0.25, 0.5, 0.75]);
}

#[test]
fn donated_storage_comes_back_empty() {
    let mut old = Trail::new(8);
    old.push(Point::ZERO, 1.0);
    let mut fresh = Trail::new(8);
    old.donate_storage(&mut fresh);
    assert!(fresh.is_empty());
    assert_eq!(fresh.capacity(), 8);
}

#[test]
fn zero_capacity_is_clamped() {
    let mut t = Trail::new(0);
    t.push(Point::ZERO, 1.0);
    t.push(Point::ZERO, 1.0);
    assert_eq!(t.len(), 1);
}
