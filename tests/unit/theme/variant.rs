use super::*;

#[test]
fn mobile_always_runs_lowest_tier() {
    for tier in Intensity::ALL {
        assert_eq!(effective_intensity(tier, true), Intensity::Low);
        assert_eq!(effective_intensity(tier, false), tier);
    }
}

#[test]
fn cosmic_low_tier_is_six_motes() {
    let cfg = Variant::Cosmic.config();
    let tier = effective_intensity(Intensity::High, true);
    assert_eq!(cfg.ambient_counts.get(tier), 6);
    assert_eq!(cfg.ambient_counts.get(Intensity::High), 30);
}

#[test]
fn names_round_trip_through_from_str() {
    for v in Variant::ALL {
        assert_eq!(v.as_str().parse::<Variant>().unwrap(), v);
        assert_eq!(v.config().variant, v);
    }
    for i in Intensity::ALL {
        assert_eq!(i.as_str().parse::<Intensity>().unwrap(), i);
    }
    assert!("nebulous".parse::<Variant>().is_err());
    assert!("extreme".parse::<Intensity>().is_err());
}

#[test]
fn hue_ranges_are_ordered() {
    for v in Variant::ALL {
        let (lo, hi) = v.config().hue_range;
        assert!(lo < hi);
        assert!(!v.config().palette.is_empty());
        assert!(!v.config().mesh_spots.is_empty());
    }
}
