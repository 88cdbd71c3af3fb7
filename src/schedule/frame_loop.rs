use crate::foundation::error::StardriftResult;
use crate::schedule::host::{FrameHandle, FrameHost, LayerId, TimerHandle};
use serde::{Deserialize, Serialize};

/// 60 Hz cap on accepted frames.
pub const TARGET_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;
/// Tolerance so refreshes arriving marginally early at 60 Hz are still accepted.
pub const FRAME_SLACK_MS: f64 = 0.5;
/// Delay before restarting a loop after a failed frame.
pub const RESTART_DELAY_MS: f64 = 100.0;

/// Frame pacing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameTiming {
    /// Minimum time between accepted frames.
    pub interval_ms: f64,
    /// Tolerance subtracted from the interval.
    pub slack_ms: f64,
    /// Delay of the restart after a failed frame.
    pub restart_delay_ms: f64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self {
            interval_ms: TARGET_FRAME_INTERVAL_MS,
            slack_ms: FRAME_SLACK_MS,
            restart_delay_ms: RESTART_DELAY_MS,
        }
    }
}

/// Scheduler lifecycle of one layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    /// No frame requested.
    Idle,
    /// Exactly one frame requested.
    Running,
    /// A failed frame scheduled a delayed restart.
    Restarting,
    /// The layer is gone; nothing can be scheduled again.
    Unmounted,
}

/// What a frame callback did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Callback for a cancelled or superseded handle, or after unmount; ignored.
    Stale,
    /// The gate said stop; no new frame was requested.
    Halted,
    /// Too early; the next frame was requested without doing work.
    Throttled,
    /// Simulated and drew one frame.
    Rendered {
        /// Time since the previous accepted frame.
        delta_ms: f64,
    },
    /// The frame failed; a delayed restart is pending.
    Failed,
}

/// Per-layer frame loop.
///
/// The next frame is only ever requested from inside a frame callback (or by [`FrameLoop::start`]
/// when none is pending), so at most one frame handle is outstanding per layer.
#[derive(Debug)]
pub struct FrameLoop {
    layer: LayerId,
    timing: FrameTiming,
    state: LoopState,
    pending: Option<FrameHandle>,
    restart: Option<TimerHandle>,
    last_ms: f64,
    frames_rendered: u64,
    frames_failed: u64,
}

impl FrameLoop {
    /// Idle loop for `layer`.
    pub fn new(layer: LayerId, timing: FrameTiming) -> Self {
        Self {
            layer,
            timing,
            state: LoopState::Idle,
            pending: None,
            restart: None,
            last_ms: 0.0,
            frames_rendered: 0,
            frames_failed: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Outstanding frame handle, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Accepted frames so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Failed frames so far.
    pub fn frames_failed(&self) -> u64 {
        self.frames_failed
    }

    /// Request the first frame and reset the elapsed-time baseline.
    ///
    /// Returns `false` when already running or unmounted.
    pub fn start(&mut self, host: &mut dyn FrameHost) -> bool {
        if self.state == LoopState::Unmounted || self.pending.is_some() {
            return false;
        }
        if let Some(timer) = self.restart.take() {
            host.clear_timeout(timer);
        }
        self.last_ms = host.now_ms();
        self.pending = Some(host.request_frame(self.layer));
        self.state = LoopState::Running;
        tracing::debug!(layer = self.layer.0, "frame loop started");
        true
    }

    /// Cancel the outstanding frame and any pending restart.
    pub fn stop(&mut self, host: &mut dyn FrameHost) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
        if let Some(timer) = self.restart.take() {
            host.clear_timeout(timer);
        }
        if self.state != LoopState::Unmounted {
            if self.state != LoopState::Idle {
                tracing::debug!(layer = self.layer.0, "frame loop stopped");
            }
            self.state = LoopState::Idle;
        }
    }

    /// Stop for good; later callbacks are stale.
    pub fn unmount(&mut self, host: &mut dyn FrameHost) {
        self.stop(host);
        self.state = LoopState::Unmounted;
    }

    /// Handle a frame callback.
    ///
    /// `should_animate` must be read from the gate at callback time. `work` runs step-then-draw
    /// with the elapsed time since the previous accepted frame; an error is logged and turns into
    /// a delayed restart.
    pub fn on_frame(
        &mut self,
        host: &mut dyn FrameHost,
        handle: FrameHandle,
        now_ms: f64,
        should_animate: bool,
        work: impl FnOnce(f64) -> StardriftResult<()>,
    ) -> FrameOutcome {
        if self.state == LoopState::Unmounted || self.pending != Some(handle) {
            return FrameOutcome::Stale;
        }
        self.pending = None;

        if !should_animate {
            self.state = LoopState::Idle;
            tracing::debug!(layer = self.layer.0, "frame loop halted by gate");
            return FrameOutcome::Halted;
        }

        let delta_ms = now_ms - self.last_ms;
        if delta_ms + self.timing.slack_ms < self.timing.interval_ms {
            self.pending = Some(host.request_frame(self.layer));
            return FrameOutcome::Throttled;
        }
        self.last_ms = now_ms;

        match work(delta_ms) {
            Ok(()) => {
                self.frames_rendered += 1;
                self.pending = Some(host.request_frame(self.layer));
                FrameOutcome::Rendered { delta_ms }
            }
            Err(err) => {
                self.frames_failed += 1;
                tracing::warn!(
                    layer = self.layer.0,
                    error = %err,
                    delay_ms = self.timing.restart_delay_ms,
                    "frame failed; restarting after delay"
                );
                self.restart = Some(host.set_timeout(self.layer, self.timing.restart_delay_ms));
                self.state = LoopState::Restarting;
                FrameOutcome::Failed
            }
        }
    }

    /// Handle a timer callback. Returns `true` if the loop restarted.
    pub fn on_timer(
        &mut self,
        host: &mut dyn FrameHost,
        handle: TimerHandle,
        should_animate: bool,
    ) -> bool {
        if self.restart != Some(handle) {
            return false;
        }
        self.restart = None;
        self.state = LoopState::Idle;
        should_animate && self.start(host)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/frame_loop.rs"]
mod tests;
