use super::*;

fn gate(caps: Capabilities) -> Gate {
    Gate::new(
        ObserverOptions::layer(),
        Intensity::High,
        VisibilityState::default(),
        caps,
    )
}

fn in_view() -> Gate {
    let mut g = gate(Capabilities::default());
    g.attach();
    g.observe_ratio(1.0);
    g
}

#[test]
fn gate_starts_unobserved_and_not_animating() {
    let g = gate(Capabilities::default());
    assert_eq!(g.state(), GateState::Unobserved);
    assert!(!g.should_animate());
    assert!(!g.is_observing());
}

#[test]
fn attach_then_intersection_resumes() {
    let mut g = gate(Capabilities::default());
    assert_eq!(g.attach(), GateTransition::Unchanged);
    assert_eq!(g.state(), GateState::OutOfView);
    assert_eq!(g.observe_ratio(0.4), GateTransition::Resume);
    assert_eq!(g.state(), GateState::InView);
    assert!(g.should_animate());
    assert_eq!(g.observe_ratio(0.9), GateTransition::Unchanged);
    assert_eq!(g.observe_ratio(0.0), GateTransition::Pause);
    assert_eq!(g.state(), GateState::OutOfView);
}

#[test]
fn should_animate_is_conjunction_of_inputs() {
    let mut g = in_view();
    assert_eq!(g.set_document_visible(false), GateTransition::Pause);
    assert!(!g.should_animate());
    assert_eq!(g.set_reduced_motion(true), GateTransition::Unchanged);
    assert_eq!(g.set_document_visible(true), GateTransition::Unchanged);
    assert!(g.shows_static_fallback());
    assert_eq!(g.set_reduced_motion(false), GateTransition::Resume);
    assert!(g.should_animate());
}

#[test]
fn mobile_caps_effective_intensity() {
    let mut g = in_view();
    assert_eq!(g.effective_intensity(), Intensity::High);
    g.set_mobile(true);
    assert_eq!(g.effective_intensity(), Intensity::Low);
    assert!(g.should_animate());
    g.set_mobile(false);
    g.set_requested_intensity(Intensity::Medium);
    assert_eq!(g.effective_intensity(), Intensity::Medium);
}

#[test]
fn missing_observation_primitives_fall_back_to_static() {
    for caps in [
        Capabilities::none(),
        Capabilities {
            intersection_observer: false,
            ..Capabilities::default()
        },
        Capabilities {
            media_queries: false,
            ..Capabilities::default()
        },
    ] {
        let mut g = gate(caps);
        assert_eq!(g.attach(), GateTransition::Unchanged);
        assert_eq!(g.state(), GateState::Unobserved);
        assert_eq!(g.observe_ratio(1.0), GateTransition::Unchanged);
        assert!(!g.should_animate());
        assert!(g.shows_static_fallback());
    }
}

#[test]
fn tear_down_is_final() {
    let mut g = in_view();
    assert!(g.tear_down());
    assert_eq!(g.state(), GateState::TornDown);
    assert!(!g.should_animate());
    assert_eq!(g.observe_ratio(1.0), GateTransition::Unchanged);
    assert_eq!(g.attach(), GateTransition::Unchanged);
    assert_eq!(g.set_document_visible(true), GateTransition::Unchanged);
    assert!(!g.tear_down());
}
