use crate::foundation::core::Size;
use crate::schedule::host::LayerId;
use std::collections::BTreeMap;

/// Subscription token returned by [`SignalHub::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

/// Window-level change shared by every layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnvSignal {
    /// Viewport or document size changed.
    Resize {
        /// Viewport size in CSS px.
        viewport: Size,
        /// Scrollable document size in CSS px.
        document: Size,
        /// Device pixel ratio reported by the host (uncapped).
        dpr: f64,
        /// Whether the viewport is below the mobile breakpoint.
        mobile: bool,
    },
    /// Reduced-motion preference changed.
    ReducedMotion(bool),
    /// Document visibility changed.
    DocumentVisibility(bool),
}

/// Latest value of every environment input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvSnapshot {
    /// Viewport size in CSS px.
    pub viewport: Size,
    /// Document size in CSS px.
    pub document: Size,
    /// Device pixel ratio reported by the host.
    pub dpr: f64,
    /// Below the mobile breakpoint.
    pub mobile: bool,
    /// Reduced-motion preference.
    pub reduced_motion: bool,
    /// Document visibility.
    pub document_visible: bool,
}

impl Default for EnvSnapshot {
    fn default() -> Self {
        Self {
            viewport: Size::ZERO,
            document: Size::ZERO,
            dpr: 1.0,
            mobile: false,
            reduced_motion: false,
            document_visible: true,
        }
    }
}

impl EnvSnapshot {
    fn apply(&mut self, signal: EnvSignal) {
        match signal {
            EnvSignal::Resize {
                viewport,
                document,
                dpr,
                mobile,
            } => {
                self.viewport = viewport;
                self.document = document;
                self.dpr = dpr;
                self.mobile = mobile;
            }
            EnvSignal::ReducedMotion(reduced) => self.reduced_motion = reduced,
            EnvSignal::DocumentVisibility(visible) => self.document_visible = visible,
        }
    }
}

/// One shared resize/media-query/visibility observable.
///
/// Layers subscribe once on mount and unsubscribe on teardown; the host registers a single
/// listener per signal and publishes into the hub.
#[derive(Debug, Default)]
pub struct SignalHub {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, LayerId>,
    current: EnvSnapshot,
}

impl SignalHub {
    /// Hub seeded with the initial environment.
    pub fn new(current: EnvSnapshot) -> Self {
        Self {
            next_id: 0,
            listeners: BTreeMap::new(),
            current,
        }
    }

    /// Register `layer` for every subsequent signal.
    pub fn subscribe(&mut self, layer: LayerId) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.insert(id, layer);
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Record `signal` and return the layers to deliver it to, in subscription order.
    pub fn publish(&mut self, signal: EnvSignal) -> Vec<LayerId> {
        self.current.apply(signal);
        tracing::debug!(?signal, listeners = self.listeners.len(), "environment signal");
        self.listeners.values().copied().collect()
    }

    /// Latest environment.
    pub fn current(&self) -> EnvSnapshot {
        self.current
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/signals.rs"]
mod tests;
