use crate::gate::intersection::ObserverOptions;
use crate::theme::variant::{Intensity, effective_intensity};
use serde::{Deserialize, Serialize};

/// Host primitives the gate relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Viewport intersection watching.
    pub intersection_observer: bool,
    /// Media queries (reduced-motion preference).
    pub media_queries: bool,
    /// 2D drawing contexts.
    pub canvas_2d: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
            media_queries: true,
            canvas_2d: true,
        }
    }
}

impl Capabilities {
    /// No primitive available (non-interactive environment).
    pub fn none() -> Self {
        Self {
            intersection_observer: false,
            media_queries: false,
            canvas_2d: false,
        }
    }

    /// Return `true` when visibility and motion preference can both be observed.
    pub fn can_observe(&self) -> bool {
        self.intersection_observer && self.media_queries
    }
}

/// Inputs the gate decides on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityState {
    /// The layer currently intersects the (margin-adjusted) viewport.
    pub intersecting: bool,
    /// The document tab is visible.
    pub document_visible: bool,
    /// The user asked for reduced motion.
    pub reduced_motion: bool,
    /// Mobile form factor.
    pub mobile: bool,
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self {
            intersecting: false,
            document_visible: true,
            reduced_motion: false,
            mobile: false,
        }
    }
}

/// Per-layer gate lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Not watching yet, or watching is unavailable.
    Unobserved,
    /// Watching; the layer is in view.
    InView,
    /// Watching; the layer is out of view.
    OutOfView,
    /// Watchers detached for good.
    TornDown,
}

/// Effect of an input change on "should animate".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateTransition {
    /// No change.
    Unchanged,
    /// Animation may run again; the scheduler has to be restarted.
    Resume,
    /// Animation must stop; the outstanding frame is cancelled.
    Pause,
}

/// Visibility/capability gate of one animated layer.
#[derive(Clone, Debug)]
pub struct Gate {
    state: GateState,
    visibility: VisibilityState,
    capabilities: Capabilities,
    options: ObserverOptions,
    requested: Intensity,
}

impl Gate {
    /// Unobserved gate.
    pub fn new(
        options: ObserverOptions,
        requested: Intensity,
        visibility: VisibilityState,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            state: GateState::Unobserved,
            visibility,
            capabilities,
            options,
            requested,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Current inputs.
    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    /// Intersection options.
    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Return `true` while an intersection watcher is attached.
    pub fn is_observing(&self) -> bool {
        matches!(self.state, GateState::InView | GateState::OutOfView)
    }

    /// `intersecting AND document visible AND NOT reduced motion`, and only while observing.
    pub fn should_animate(&self) -> bool {
        self.capabilities.can_observe()
            && self.state == GateState::InView
            && self.visibility.document_visible
            && !self.visibility.reduced_motion
    }

    /// Lowest tier on mobile, the requested tier otherwise.
    pub fn effective_intensity(&self) -> Intensity {
        effective_intensity(self.requested, self.visibility.mobile)
    }

    /// Return `true` when only the static visuals should be shown.
    pub fn shows_static_fallback(&self) -> bool {
        !self.capabilities.can_observe() || self.visibility.reduced_motion
    }

    /// Attach the intersection watcher.
    ///
    /// Without observation primitives the gate stays [`GateState::Unobserved`] and never animates.
    pub fn attach(&mut self) -> GateTransition {
        if self.state != GateState::Unobserved {
            return GateTransition::Unchanged;
        }
        if !self.capabilities.can_observe() {
            tracing::warn!("observation unavailable; layer stays static");
            return GateTransition::Unchanged;
        }
        self.track(|g| {
            g.state = GateState::OutOfView;
            g.visibility.intersecting = false;
        })
    }

    /// Feed an intersection ratio; ignored unless observing.
    pub fn observe_ratio(&mut self, ratio: f64) -> GateTransition {
        if !self.is_observing() {
            return GateTransition::Unchanged;
        }
        let intersecting = self.options.passes(ratio);
        self.track(|g| {
            g.visibility.intersecting = intersecting;
            g.state = if intersecting {
                GateState::InView
            } else {
                GateState::OutOfView
            };
        })
    }

    /// Document visibility changed.
    pub fn set_document_visible(&mut self, visible: bool) -> GateTransition {
        self.track(|g| g.visibility.document_visible = visible)
    }

    /// Reduced-motion preference changed.
    pub fn set_reduced_motion(&mut self, reduced: bool) -> GateTransition {
        self.track(|g| g.visibility.reduced_motion = reduced)
    }

    /// Form factor changed; only the effective intensity depends on it.
    pub fn set_mobile(&mut self, mobile: bool) {
        self.visibility.mobile = mobile;
    }

    /// Requested tier changed.
    pub fn set_requested_intensity(&mut self, requested: Intensity) {
        self.requested = requested;
    }

    /// Detach every watcher. Returns `true` if a watcher was attached.
    pub fn tear_down(&mut self) -> bool {
        let was_observing = self.is_observing();
        self.state = GateState::TornDown;
        self.visibility.intersecting = false;
        was_observing
    }

    fn track(&mut self, f: impl FnOnce(&mut Self)) -> GateTransition {
        if self.state == GateState::TornDown {
            return GateTransition::Unchanged;
        }
        let before = self.should_animate();
        f(self);
        match (before, self.should_animate()) {
            (false, true) => GateTransition::Resume,
            (true, false) => GateTransition::Pause,
            _ => GateTransition::Unchanged,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gate/visibility.rs"]
mod tests;
