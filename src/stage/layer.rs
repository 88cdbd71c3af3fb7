use crate::foundation::core::Size;
use crate::foundation::rng::Rng64;
use crate::gate::intersection::ObserverOptions;
use crate::gate::visibility::{Capabilities, Gate, GateTransition, VisibilityState};
use crate::layers::LayerChoice;
use crate::render::surface::Surface;
use crate::schedule::frame_loop::{FrameLoop, FrameOutcome, FrameTiming, LoopState};
use crate::schedule::host::{FrameHandle, FrameHost, LayerId, TimerHandle};
use crate::sim::kind::{Extent, LayerEnv, LayerKind};
use crate::sim::particle::Particle;
use crate::sim::pool::ParticlePool;
use crate::stage::signals::{EnvSignal, EnvSnapshot, SignalHub, SubscriptionId};
use crate::theme::variant::{Intensity, Variant};

/// Settings shared by every layer of a backdrop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSetup {
    /// Intersection watcher options.
    pub options: ObserverOptions,
    /// Frame pacing.
    pub timing: FrameTiming,
    /// Host capabilities.
    pub capabilities: Capabilities,
}

impl Default for LayerSetup {
    fn default() -> Self {
        Self {
            options: ObserverOptions::layer(),
            timing: FrameTiming::default(),
            capabilities: Capabilities::default(),
        }
    }
}

/// One mounted animated layer: a [`LayerKind`] driven by the generic engine.
///
/// Owns its particle pool, gate, frame loop and surface exclusively. The host forwards frame
/// and timer callbacks, intersection ratios and environment signals.
#[derive(Debug)]
pub struct AnimatedLayer<S: Surface> {
    id: LayerId,
    choice: LayerChoice,
    variant: Variant,
    requested: Intensity,
    kind: Box<dyn LayerKind>,
    pool: ParticlePool,
    gate: Gate,
    frame_loop: FrameLoop,
    surface: S,
    canvas_2d: bool,
    surface_ready: bool,
    subscription: Option<SubscriptionId>,
    mounted: bool,
    container: Size,
    dpr: f64,
}

impl<S: Surface> AnimatedLayer<S> {
    /// Unmounted layer of `choice` for `variant` at the `requested` tier.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: LayerId,
        choice: LayerChoice,
        variant: Variant,
        requested: Intensity,
        env: EnvSnapshot,
        surface: S,
        setup: LayerSetup,
        rng: Rng64,
    ) -> Self {
        let visibility = VisibilityState {
            intersecting: false,
            document_visible: env.document_visible,
            reduced_motion: env.reduced_motion,
            mobile: env.mobile,
        };
        let gate = Gate::new(setup.options, requested, visibility, setup.capabilities);
        let kind = choice.build(LayerEnv {
            variant,
            intensity: gate.effective_intensity(),
            mobile: env.mobile,
        });
        Self {
            id,
            choice,
            variant,
            requested,
            kind,
            pool: ParticlePool::new(rng),
            gate,
            frame_loop: FrameLoop::new(id, setup.timing),
            surface,
            canvas_2d: setup.capabilities.canvas_2d,
            surface_ready: false,
            subscription: None,
            mounted: false,
            container: Size::ZERO,
            dpr: env.dpr,
        }
    }

    /// Host identity.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Which layer this is.
    pub fn choice(&self) -> LayerChoice {
        self.choice
    }

    /// Current variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Layer configuration in use.
    pub fn kind(&self) -> &dyn LayerKind {
        self.kind.as_ref()
    }

    /// Gate state and inputs.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Scheduler state.
    pub fn loop_state(&self) -> LoopState {
        self.frame_loop.state()
    }

    /// Frame loop counters.
    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    /// Current particles.
    pub fn particles(&self) -> &[Particle] {
        self.pool.particles()
    }

    /// Drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Drawing surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Return `true` once mounted and until unmounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Return `false` when the drawing context is unavailable; the layer then renders nothing.
    pub fn surface_ready(&self) -> bool {
        self.surface_ready
    }

    /// CSS box the surface is fitted to.
    pub fn container(&self) -> Size {
        self.container
    }

    /// Vertical extent covered by the layer.
    pub fn extent(&self) -> Extent {
        self.kind.extent()
    }

    /// Opacity applied when compositing the layer.
    pub fn composite_opacity(&self) -> f64 {
        self.kind.composite_opacity()
    }

    /// Subscribe to environment signals, fit the surface, attach the gate and fill the pool.
    ///
    /// The frame loop only starts once an intersection ratio puts the layer in view.
    pub fn mount(&mut self, hub: &mut SignalHub) {
        if self.mounted || self.subscription.is_some() {
            return;
        }
        self.subscription = Some(hub.subscribe(self.id));
        let env = hub.current();
        self.dpr = env.dpr;
        self.container = container_for(self.kind.extent(), env.viewport, env.document);
        self.fit_surface();
        self.gate.attach();
        if self.surface_ready && !self.gate.visibility().reduced_motion {
            self.pool.initialize(self.kind.as_ref(), self.container);
        }
        self.mounted = true;
        tracing::debug!(
            layer = self.choice.as_str(),
            id = self.id.0,
            particles = self.pool.len(),
            "layer mounted"
        );
    }

    /// Feed the latest intersection ratio of the layer's box.
    pub fn observe_intersection(
        &mut self,
        host: &mut dyn FrameHost,
        ratio: f64,
    ) -> GateTransition {
        if !self.mounted {
            return GateTransition::Unchanged;
        }
        let transition = self.gate.observe_ratio(ratio);
        self.apply(host, transition);
        transition
    }

    /// React to a shared environment signal.
    pub fn handle_signal(&mut self, host: &mut dyn FrameHost, signal: EnvSignal) {
        if !self.mounted {
            return;
        }
        match signal {
            EnvSignal::Resize {
                viewport,
                document,
                dpr,
                mobile,
            } => self.resize(host, viewport, document, dpr, mobile),
            EnvSignal::ReducedMotion(reduced) => {
                let transition = self.gate.set_reduced_motion(reduced);
                self.apply(host, transition);
            }
            EnvSignal::DocumentVisibility(visible) => {
                let transition = self.gate.set_document_visible(visible);
                self.apply(host, transition);
            }
        }
    }

    /// Switch variant and requested tier, rebuilding the particle set if one exists.
    pub fn reconfigure(&mut self, variant: Variant, requested: Intensity) {
        if self.variant == variant && self.requested == requested {
            return;
        }
        self.variant = variant;
        self.requested = requested;
        self.gate.set_requested_intensity(requested);
        self.rebuild_kind();
        if !self.pool.is_empty() {
            self.pool.reinitialize(self.kind.as_ref(), self.container);
        }
        tracing::debug!(
            layer = self.choice.as_str(),
            %variant,
            intensity = %self.gate.effective_intensity(),
            "layer reconfigured"
        );
    }

    /// Handle a frame callback: step then draw, if the gate still allows it.
    pub fn on_frame(
        &mut self,
        host: &mut dyn FrameHost,
        handle: FrameHandle,
        now_ms: f64,
    ) -> FrameOutcome {
        if !self.mounted {
            return FrameOutcome::Stale;
        }
        let should_animate = self.gate.should_animate() && self.surface_ready;
        let Self {
            frame_loop,
            pool,
            kind,
            surface,
            ..
        } = self;
        frame_loop.on_frame(host, handle, now_ms, should_animate, |delta_ms| {
            pool.step(&**kind, delta_ms);
            surface.clear();
            kind.draw(pool.particles(), &mut *surface)?;
            surface.present()
        })
    }

    /// Handle a timer callback (delayed restart after a failed frame).
    pub fn on_timer(&mut self, host: &mut dyn FrameHost, handle: TimerHandle) -> bool {
        if !self.mounted {
            return false;
        }
        if self.pool.is_empty() && self.gate.should_animate() && self.surface_ready {
            self.pool.initialize(self.kind.as_ref(), self.container);
        }
        let should_animate = self.gate.should_animate() && self.surface_ready;
        self.frame_loop.on_timer(host, handle, should_animate)
    }

    /// Tear down: detach watchers, cancel the outstanding frame, then drop the particles.
    pub fn unmount(&mut self, host: &mut dyn FrameHost, hub: &mut SignalHub) {
        if let Some(subscription) = self.subscription.take() {
            hub.unsubscribe(subscription);
        }
        self.gate.tear_down();
        self.frame_loop.unmount(host);
        self.pool.release();
        if self.mounted {
            tracing::debug!(layer = self.choice.as_str(), id = self.id.0, "layer unmounted");
        }
        self.mounted = false;
    }

    fn apply(&mut self, host: &mut dyn FrameHost, transition: GateTransition) {
        match transition {
            GateTransition::Resume => self.resume(host),
            GateTransition::Pause => self.frame_loop.stop(host),
            GateTransition::Unchanged => {}
        }
    }

    fn resume(&mut self, host: &mut dyn FrameHost) {
        if !self.surface_ready || !self.gate.should_animate() {
            return;
        }
        if self.pool.is_empty() {
            self.pool.initialize(self.kind.as_ref(), self.container);
        }
        self.frame_loop.start(host);
    }

    fn resize(
        &mut self,
        host: &mut dyn FrameHost,
        viewport: Size,
        document: Size,
        dpr: f64,
        mobile: bool,
    ) {
        if mobile != self.gate.visibility().mobile {
            self.gate.set_mobile(mobile);
            self.rebuild_kind();
        }
        self.dpr = dpr;
        self.container = container_for(self.kind.extent(), viewport, document);
        self.fit_surface();
        if !self.surface_ready {
            self.frame_loop.stop(host);
            self.pool.release();
            return;
        }
        if self.gate.visibility().reduced_motion {
            return;
        }
        self.pool.reinitialize(self.kind.as_ref(), self.container);
        if self.gate.should_animate() && self.frame_loop.pending().is_none() {
            self.frame_loop.start(host);
        }
    }

    fn rebuild_kind(&mut self) {
        self.kind = self.choice.build(LayerEnv {
            variant: self.variant,
            intensity: self.gate.effective_intensity(),
            mobile: self.gate.visibility().mobile,
        });
    }

    fn fit_surface(&mut self) {
        if !self.canvas_2d {
            tracing::warn!(
                layer = self.choice.as_str(),
                "2d context unavailable; layer renders nothing"
            );
            self.surface_ready = false;
            return;
        }
        match self.surface.fit_to_container(self.container, self.dpr) {
            Ok(desc) => {
                self.surface_ready = true;
                tracing::debug!(
                    layer = self.choice.as_str(),
                    backing_width = desc.backing_width,
                    backing_height = desc.backing_height,
                    "surface fitted"
                );
            }
            Err(err) => {
                self.surface_ready = false;
                tracing::warn!(
                    layer = self.choice.as_str(),
                    error = %err,
                    "surface unavailable; layer renders nothing"
                );
            }
        }
    }
}

/// CSS box a layer of `extent` covers.
pub fn container_for(extent: Extent, viewport: Size, document: Size) -> Size {
    match extent {
        Extent::Viewport => viewport,
        Extent::Document => Size::new(viewport.width, document.height.max(viewport.height)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/layer.rs"]
mod tests;
