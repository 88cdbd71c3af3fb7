use super::*;

#[test]
fn advance_delivers_requested_frames_with_refresh_time() {
    let mut host = ManualFrameHost::starting_at(1000.0);
    let a = host.request_frame(LayerId(1));
    let b = host.request_frame(LayerId(2));

    let events = host.advance(16.0);
    assert_eq!(
        events,
        vec![
            HostEvent::Frame {
                layer: LayerId(1),
                handle: a,
                now_ms: 1016.0
            },
            HostEvent::Frame {
                layer: LayerId(2),
                handle: b,
                now_ms: 1016.0
            },
        ]
    );
    assert_eq!(host.outstanding_frames(), 0);
    assert!(host.advance(16.0).is_empty());
}

#[test]
fn cancelled_frames_are_not_delivered() {
    let mut host = ManualFrameHost::new();
    let a = host.request_frame(LayerId(1));
    host.request_frame(LayerId(1));
    assert_eq!(host.outstanding_for(LayerId(1)), 2);

    host.cancel_frame(a);
    host.cancel_frame(FrameHandle(999));
    assert_eq!(host.outstanding_for(LayerId(1)), 1);
    assert_eq!(host.requests_total(), 2);

    let events = host.advance(16.0);
    assert_eq!(events.len(), 1);
    assert!(!events.iter().any(|e| matches!(e, HostEvent::Frame { handle, .. } if *handle == a)));
}

#[test]
fn timers_fire_when_due_and_before_frames() {
    let mut host = ManualFrameHost::new();
    let timer = host.set_timeout(LayerId(3), 100.0);
    host.request_frame(LayerId(3));

    let first = host.advance(50.0);
    assert_eq!(first.len(), 1);
    assert!(matches!(first[0], HostEvent::Frame { .. }));
    assert_eq!(host.outstanding_timers(), 1);

    host.request_frame(LayerId(4));
    let second = host.advance(50.0);
    assert_eq!(
        second[0],
        HostEvent::Timer {
            layer: LayerId(3),
            handle: timer
        }
    );
    assert_eq!(second[1].layer(), LayerId(4));
    assert_eq!(host.outstanding_timers(), 0);
}

#[test]
fn cleared_timers_never_fire() {
    let mut host = ManualFrameHost::new();
    let timer = host.set_timeout(LayerId(1), 10.0);
    host.clear_timeout(timer);
    assert!(host.advance(20.0).is_empty());
    assert_eq!(host.now_ms(), 20.0);
}
