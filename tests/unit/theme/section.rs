use super::*;

#[test]
fn unknown_sections_fall_back_to_hero() {
    let b = resolve_section("does-not-exist");
    assert_eq!(b.id, DEFAULT_SECTION);
    assert_eq!(b.variant, Variant::Cosmic);
    assert!(!is_known_section("does-not-exist"));
}

#[test]
fn bindings_follow_page_order() {
    let ids: Vec<_> = section_ids().collect();
    assert_eq!(ids, ["hero", "awakening", "blog", "visual", "footer"]);
    assert_eq!(resolve_section("blog").variant, Variant::Transcendent);
    assert_eq!(resolve_section("awakening").intensity, Intensity::Medium);
    assert_eq!(resolve_section("footer").variant, Variant::Philosophical);
}

#[test]
fn gradients_are_sorted_and_span_unit_range() {
    for s in sections() {
        assert!(s.gradient.len() >= 2, "{}", s.id);
        assert_eq!(s.gradient.first().unwrap().offset, 0.0);
        assert_eq!(s.gradient.last().unwrap().offset, 1.0);
        assert!(s.gradient.windows(2).all(|w| w[0].offset <= w[1].offset));
        assert!((0.0..=1.0).contains(&s.background_opacity));
    }
}
