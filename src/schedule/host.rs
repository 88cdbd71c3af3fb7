use std::collections::BTreeMap;

/// Handle of a requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Handle of a one-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Identity of an animated layer within a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u32);

/// The host's per-refresh callback primitive and timers.
///
/// Callbacks are not closures: the host later reports a [`HostEvent`] carrying the handle, and
/// the owner of the layer forwards it. This keeps every callback on the caller's thread.
pub trait FrameHost {
    /// Ask for one frame callback for `layer` on the next display refresh.
    fn request_frame(&mut self, layer: LayerId) -> FrameHandle;

    /// Cancel a pending frame callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Ask for one timer callback for `layer` after `delay_ms`.
    fn set_timeout(&mut self, layer: LayerId, delay_ms: f64) -> TimerHandle;

    /// Cancel a pending timer. Unknown handles are ignored.
    fn clear_timeout(&mut self, handle: TimerHandle);

    /// Current host time in ms.
    fn now_ms(&self) -> f64;
}

/// Callback delivered by a host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// Display refresh for a requested frame.
    Frame {
        /// Target layer.
        layer: LayerId,
        /// Handle returned by [`FrameHost::request_frame`].
        handle: FrameHandle,
        /// Refresh timestamp in ms.
        now_ms: f64,
    },
    /// Expired timer.
    Timer {
        /// Target layer.
        layer: LayerId,
        /// Handle returned by [`FrameHost::set_timeout`].
        handle: TimerHandle,
    },
}

impl HostEvent {
    /// Layer the event is addressed to.
    pub fn layer(&self) -> LayerId {
        match *self {
            HostEvent::Frame { layer, .. } | HostEvent::Timer { layer, .. } => layer,
        }
    }
}

/// Deterministic host driven by an explicit virtual clock.
///
/// [`ManualFrameHost::advance`] moves the clock by one display refresh and returns the due
/// events: expired timers first, then every frame callback requested before the refresh.
#[derive(Debug, Default)]
pub struct ManualFrameHost {
    now_ms: f64,
    next_id: u64,
    frames: BTreeMap<FrameHandle, LayerId>,
    timers: BTreeMap<TimerHandle, (LayerId, f64)>,
    frame_requests: u64,
}

impl ManualFrameHost {
    /// Host at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host starting at `now_ms`.
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    /// Advance the clock by `dt_ms` and drain due callbacks in delivery order.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<HostEvent> {
        self.now_ms += dt_ms.max(0.0);
        let now_ms = self.now_ms;

        let due: Vec<TimerHandle> = self
            .timers
            .iter()
            .filter(|(_, (_, at))| *at <= now_ms)
            .map(|(h, _)| *h)
            .collect();
        let mut events = Vec::with_capacity(due.len() + self.frames.len());
        for handle in due {
            if let Some((layer, _)) = self.timers.remove(&handle) {
                events.push(HostEvent::Timer { layer, handle });
            }
        }
        for (handle, layer) in std::mem::take(&mut self.frames) {
            events.push(HostEvent::Frame {
                layer,
                handle,
                now_ms,
            });
        }
        events
    }

    /// Number of pending frame callbacks across all layers.
    pub fn outstanding_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of pending frame callbacks for `layer`.
    pub fn outstanding_for(&self, layer: LayerId) -> usize {
        self.frames.values().filter(|l| **l == layer).count()
    }

    /// Number of pending timers across all layers.
    pub fn outstanding_timers(&self) -> usize {
        self.timers.len()
    }

    /// Frame requests made since creation.
    pub fn requests_total(&self) -> u64 {
        self.frame_requests
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for ManualFrameHost {
    fn request_frame(&mut self, layer: LayerId) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frames.insert(handle, layer);
        self.frame_requests += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.remove(&handle);
    }

    fn set_timeout(&mut self, layer: LayerId, delay_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers
            .insert(handle, (layer, self.now_ms + delay_ms.max(0.0)));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/host.rs"]
mod tests;
