use super::*;
use crate::render::recording::RecordingSurface;
use crate::schedule::host::{HostEvent, ManualFrameHost};

const REFRESH_MS: f64 = 1000.0 / 60.0;

fn env() -> EnvSnapshot {
    EnvSnapshot {
        viewport: Size::new(800.0, 600.0),
        document: Size::new(800.0, 3000.0),
        ..EnvSnapshot::default()
    }
}

fn layer_in(hub: &SignalHub, choice: LayerChoice, surface: RecordingSurface) -> AnimatedLayer<RecordingSurface> {
    AnimatedLayer::new(
        LayerId(1),
        choice,
        Variant::Cosmic,
        Intensity::Medium,
        hub.current(),
        surface,
        LayerSetup::default(),
        Rng64::new(42),
    )
}

fn pump(
    host: &mut ManualFrameHost,
    layer: &mut AnimatedLayer<RecordingSurface>,
    refreshes: usize,
) -> Vec<FrameOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..refreshes {
        for event in host.advance(REFRESH_MS) {
            match event {
                HostEvent::Frame { handle, now_ms, .. } => {
                    outcomes.push(layer.on_frame(host, handle, now_ms));
                }
                HostEvent::Timer { handle, .. } => {
                    layer.on_timer(host, handle);
                }
            }
        }
    }
    outcomes
}

#[test]
fn starts_only_once_in_view_and_keeps_one_frame_outstanding() {
    let mut host = ManualFrameHost::new();
    let mut hub = SignalHub::new(env());
    let mut layer = layer_in(&hub, LayerChoice::Trails, RecordingSurface::new());

    layer.mount(&mut hub);
    assert_eq!(host.requests_total(), 0);
    assert_eq!(layer.observe_intersection(&mut host, 0.0), GateTransition::Unchanged);
    assert_eq!(host.requests_total(), 0);

    assert_eq!(layer.observe_intersection(&mut host, 1.0), GateTransition::Resume);
    assert_eq!(host.outstanding_for(LayerId(1)), 1);

    for _ in 0..10 {
        let outcomes = pump(&mut host, &mut layer, 1);
        assert!(matches!(outcomes[..], [FrameOutcome::Rendered { .. }]));
        assert_eq!(host.outstanding_for(LayerId(1)), 1);
    }
    assert_eq!(layer.surface().presents(), 10);
    assert!(!layer.surface().calls().is_empty());
}

#[test]
fn particle_count_and_life_bounds_hold_across_ticks() {
    let mut host = ManualFrameHost::new();
    let mut hub = SignalHub::new(env());
    let mut layer = layer_in(&hub, LayerChoice::Trails, RecordingSurface::new());
    layer.mount(&mut hub);
    layer.observe_intersection(&mut host, 1.0);

    let count = layer.particles().len();
    assert_eq!(count, 30);
    for _ in 0..800 {
        pump(&mut host, &mut layer, 1);
        assert_eq!(layer.particles().len(), count);
        for p in layer.particles() {
            assert!(p.life_ms >= 0.0 && p.life_ms <= p.max_life_ms);
            assert!(p.radius > 0.0);
        }
    }
}

#[test]
fn gated_off_layer_requests_no_frames_and_draws_nothing() {
    let mut host = ManualFrameHost::new();
    let mut hub = SignalHub::new(EnvSnapshot {
        document_visible: false,
        ..env()
    });
    let mut layer = layer_in(&hub, LayerChoice::Ambient, RecordingSurface::new());
    layer.mount(&mut hub);

    assert_eq!(layer.observe_intersection(&mut host, 1.0), GateTransition::Unchanged);
    pump(&mut host, &mut layer, 5);
    assert_eq!(host.requests_total(), 0);
    assert!(layer.surface().calls().is_empty());
    assert_eq!(layer.surface().presents(), 0);
}

#[test]
fn hidden_document_cancels_and_visible_restarts_with_fresh_handle() {
    let mut host = ManualFrameHost::new();
    let mut hub = SignalHub::new(env());
    let mut layer = layer_in(&hub, LayerChoice::Ambient, RecordingSurface::new());
    layer.mount(&mut hub);
    layer.observe_intersection(&mut host, 1.0);
    pump(&mut host, &mut layer, 3);
    let before = layer.frame_loop().pending();

    layer.handle_signal(&mut host, EnvSignal::DocumentVisibility(false));
    assert_eq!(host.outstanding_for(LayerId(1)), 0);
    assert_eq!(layer.loop_state(), LoopState::Idle);
    let presents = layer.surface().presents();
    pump(&mut host, &mut layer, 3);
    assert_eq!(layer.surface().presents(), presents);

    layer.handle_signal(&mut host, EnvSignal::DocumentVisibility(true));
    assert_eq!(host.outstanding_for(LayerId(1)), 1);
    assert_ne!(layer.frame_loop().pending(), before);
}

#[test]
fn reduced_motion_never_initializes_or_schedules() {
    let mut host = ManualFrameHost::new();
    let mut hub = SignalHub::new(EnvSnapshot {
        reduced_motion: true,
        ..env()
    });
    let mut layer = layer_in(&hub, LayerChoice::Stars, RecordingSurface::new());
    layer.mount(&mut hub);
    layer.observe_intersection(&mut host, 1.0);
    layer.handle_signal(
        &mut host,
        EnvSignal::Resize {
            viewport: Size::new(640.0, 480.0),
            document: Size::new(640.0, 2000.0),
            dpr: 1.0,
            mobile: false,
        },
    );

    assert!(layer.particles().is_empty());
    assert_eq!(host.requests_total(), 0);
    assert_eq!(layer.loop_state(), LoopState::Idle);
    assert!(layer.gate().shows_static_fallback());
}

#[test]
fn resize_refits_backing_store_and_reinitializes_within_bounds() {
    let mut host = ManualFrameHost::new();
    let mut hub = SignalHub::new(env());
    let mut layer = layer_in(&hub, LayerChoice::Stars, RecordingSurface::new());
    layer.mount(&mut hub);
    layer.observe_intersection(&mut host, 1.0);
    pump(&mut host, &mut layer, 2);

    layer.handle_signal(
        &mut host,
        EnvSignal::Resize {
            viewport: Size::new(400.0, 300.0),
            document: Size::new(400.0, 1200.0),
            dpr: 3.0,
            mobile: false,
        },
    );

    let desc = layer.surface().desc();
    assert_eq!((desc.backing_width, desc.backing_height), (800, 600));
    assert_eq!(layer.particles().len(), 100);
    for p in layer.particles() {
        assert!((0.0..=400.0).contains(&p.pos.x));
        assert!((0.0..=300.0).contains(&p.pos.y));
    }
    assert_eq!(host.outstanding_for(LayerId(1)), 1);
}

#[test]
fn rapid_mount_unmount_leaves_no_frames_or_listeners() {
    let mut host = ManualFrameHost::new();
    let mut hub = SignalHub::new(env());
    let mut layer = layer_in(&hub, LayerChoice::Waves, RecordingSurface::new());
    layer.mount(&mut hub);
    layer.observe_intersection(&mut host, 1.0);
    let handle = layer.frame_loop().pending().expect("frame requested");

    layer.unmount(&mut host, &mut hub);
    assert_eq!(host.outstanding_frames(), 0);
    assert_eq!(host.outstanding_timers(), 0);
    assert_eq!(hub.listener_count(), 0);
    assert!(layer.particles().is_empty());
    assert!(!layer.is_mounted());

    assert_eq!(layer.on_frame(&mut host, handle, 16.0), FrameOutcome::Stale);
    assert_eq!(layer.surface().presents(), 0);
    layer.handle_signal(&mut host, EnvSignal::DocumentVisibility(true));
    assert_eq!(layer.observe_intersection(&mut host, 1.0), GateTransition::Unchanged);
    assert_eq!(host.outstanding_frames(), 0);
}

#[test]
fn unavailable_surface_renders_nothing() {
    let mut host = ManualFrameHost::new();
    let mut hub = SignalHub::new(env());
    let mut layer = layer_in(&hub, LayerChoice::Nebula, RecordingSurface::unavailable());
    layer.mount(&mut hub);
    layer.observe_intersection(&mut host, 1.0);

    assert!(!layer.surface_ready());
    assert!(layer.particles().is_empty());
    assert_eq!(host.requests_total(), 0);
}

#[test]
fn failed_frame_restarts_after_delay() {
    let mut host = ManualFrameHost::new();
    let mut hub = SignalHub::new(env());
    let mut layer = layer_in(&hub, LayerChoice::Ambient, RecordingSurface::new());
    layer.surface_mut().fail_next_presents(1);
    layer.mount(&mut hub);
    layer.observe_intersection(&mut host, 1.0);

    let first = pump(&mut host, &mut layer, 1);
    assert_eq!(first, vec![FrameOutcome::Failed]);
    assert_eq!(host.outstanding_for(LayerId(1)), 0);
    assert_eq!(layer.loop_state(), LoopState::Restarting);

    pump(&mut host, &mut layer, 10);
    assert_eq!(layer.frame_loop().frames_failed(), 1);
    assert!(layer.surface().presents() > 0);
    assert_eq!(layer.loop_state(), LoopState::Running);
}

#[test]
fn mobile_cosmic_ambient_runs_the_low_tier() {
    let mut hub = SignalHub::new(EnvSnapshot { mobile: true, ..env() });
    let mut layer = AnimatedLayer::new(
        LayerId(9),
        LayerChoice::Ambient,
        Variant::Cosmic,
        Intensity::High,
        hub.current(),
        RecordingSurface::new(),
        LayerSetup::default(),
        Rng64::new(1),
    );
    layer.mount(&mut hub);
    assert_eq!(layer.gate().effective_intensity(), Intensity::Low);
    assert_eq!(layer.particles().len(), 6);
}

#[test]
fn reconfigure_rebuilds_for_the_new_variant() {
    let mut hub = SignalHub::new(env());
    let mut layer = layer_in(&hub, LayerChoice::Trails, RecordingSurface::new());
    layer.mount(&mut hub);
    assert_eq!(layer.particles().len(), 30);

    layer.reconfigure(Variant::Philosophical, Intensity::Medium);
    assert_eq!(layer.variant(), Variant::Philosophical);
    assert_eq!(layer.particles().len(), 20);
}

#[test]
fn celestial_layer_covers_the_document() {
    let mut hub = SignalHub::new(env());
    let mut layer = layer_in(&hub, LayerChoice::Celestial, RecordingSurface::new());
    layer.mount(&mut hub);
    assert_eq!(layer.extent(), Extent::Document);
    assert_eq!(layer.container(), Size::new(800.0, 3000.0));
}
