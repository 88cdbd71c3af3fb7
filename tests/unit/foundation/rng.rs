use super::*;

#[test]
fn same_seed_same_sequence() {
    let mut a = Rng64::new(42);
    let mut b = Rng64::new(42);
    for _ in 0..16 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn ranges_stay_in_bounds() {
    let mut r = Rng64::new(7);
    for _ in 0..10_000 {
        let v = r.range(-3.0, 5.0);
        assert!((-3.0..5.0).contains(&v));
        let c = r.centered(0.25);
        assert!((-0.25..0.25).contains(&c));
        assert!(r.below(3) < 3);
    }
}

#[test]
fn pick_handles_empty_and_single() {
    let mut r = Rng64::new(1);
    let empty: [u8; 0] = [];
    assert!(r.pick(&empty).is_none());
    assert_eq!(r.pick(&[9]), Some(&9));
}

#[test]
fn forks_diverge_from_parent() {
    let parent = Rng64::new(5);
    let mut a = parent.fork(1);
    let mut b = parent.fork(2);
    assert_ne!(a.next_u64(), b.next_u64());
}
