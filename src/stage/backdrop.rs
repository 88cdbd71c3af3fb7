use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{StardriftError, StardriftResult};
use crate::foundation::rng::Rng64;
use crate::layers::LayerChoice;
use crate::render::composite::composite_over;
use crate::render::statics::{
    glass_opacity, paint_background, paint_glass, paint_mesh, paint_vignette, vignette_opacity,
};
use crate::render::surface::{FrameRGBA, Surface};
use crate::schedule::frame_loop::FrameOutcome;
use crate::schedule::host::{FrameHost, HostEvent, LayerId, ManualFrameHost, TimerHandle};
use crate::sim::kind::Extent;
use crate::stage::config::{BackdropConfig, is_mobile_width};
use crate::stage::layer::{AnimatedLayer, LayerSetup};
use crate::stage::sections::{SectionChange, SectionTracker, layout_sections, scroll_progress};
use crate::stage::signals::{EnvSignal, EnvSnapshot, SignalHub};
use crate::theme::section::{SectionBinding, resolve_section};

/// Host identity of the section tracker's wake-up timer. Layers are numbered from 1.
pub const SECTION_TIMER_LAYER: LayerId = LayerId(0);

/// A full animated backdrop: static base, animated layers in painter's order and glass
/// highlights, driven by scroll position and host callbacks.
///
/// Every surface is produced by the same factory so a backdrop is either fully rasterized
/// ([`crate::CpuSurface`]) or fully recorded ([`crate::RecordingSurface`]).
#[derive(Debug)]
pub struct Backdrop<S: Surface> {
    config: BackdropConfig,
    hub: SignalHub,
    layers: Vec<AnimatedLayer<S>>,
    base: S,
    glass: S,
    sections: SectionTracker,
    section_timer: Option<TimerHandle>,
    active: &'static SectionBinding,
    scroll_y: f64,
    mounted: bool,
}

impl<S: Surface> Backdrop<S> {
    /// Validate `config` and build every layer; nothing runs until [`Backdrop::mount`].
    #[tracing::instrument(skip_all, fields(layers = config.layers.len()))]
    pub fn new(config: BackdropConfig, mut make_surface: impl FnMut() -> S) -> StardriftResult<Self> {
        config.validate()?;

        let reduced_motion = config.reduced_motion && config.capabilities.media_queries;
        let hub = SignalHub::new(EnvSnapshot {
            viewport: config.viewport(),
            document: config.document(),
            dpr: config.device_pixel_ratio,
            mobile: config.is_mobile(),
            reduced_motion,
            document_visible: config.document_visible,
        });

        let anchors = layout_sections(&config.sections, config.viewport_width);
        let sections = if config.capabilities.intersection_observer {
            SectionTracker::new(anchors, config.section_observer, config.section_throttle_ms)
        } else {
            SectionTracker::unobservable(anchors)
        };
        let active = sections.current_binding();

        let setup = LayerSetup {
            options: config.layer_observer,
            timing: config.frame,
            capabilities: config.capabilities,
        };
        let root = Rng64::new(config.seed);
        let layers = config
            .layers
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                AnimatedLayer::new(
                    LayerId(i as u32 + 1),
                    *choice,
                    active.variant,
                    active.intensity,
                    hub.current(),
                    make_surface(),
                    setup,
                    root.fork(i as u64),
                )
            })
            .collect();

        Ok(Self {
            base: make_surface(),
            glass: make_surface(),
            config,
            hub,
            layers,
            sections,
            section_timer: None,
            active,
            scroll_y: 0.0,
            mounted: false,
        })
    }

    /// Configuration in use (viewport fields follow resizes).
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    /// Layers in painter's order.
    pub fn layers(&self) -> &[AnimatedLayer<S>] {
        &self.layers
    }

    /// Layer by host identity.
    pub fn layer(&self, id: LayerId) -> Option<&AnimatedLayer<S>> {
        self.layers.iter().find(|l| l.id() == id)
    }

    /// First layer of `choice`.
    pub fn layer_of(&self, choice: LayerChoice) -> Option<&AnimatedLayer<S>> {
        self.layers.iter().find(|l| l.choice() == choice)
    }

    /// Shared environment observable.
    pub fn hub(&self) -> &SignalHub {
        &self.hub
    }

    /// Section tracker.
    pub fn sections(&self) -> &SectionTracker {
        &self.sections
    }

    /// Binding currently driving the layers and the static visuals.
    pub fn active_section(&self) -> &'static SectionBinding {
        self.active
    }

    /// Current scroll offset in CSS px.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Scroll progress through the document in `[0, 1]`.
    pub fn scroll_progress(&self) -> f64 {
        let viewport = self.config.viewport();
        scroll_progress(self.scroll_y, self.config.document().height, viewport.height)
    }

    /// Return `true` between [`Backdrop::mount`] and [`Backdrop::unmount`].
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Static base surface.
    pub fn base_surface(&self) -> &S {
        &self.base
    }

    /// Glass highlight surface.
    pub fn glass_surface(&self) -> &S {
        &self.glass
    }

    /// Mount every layer, feed initial intersections and pick the initial section.
    #[tracing::instrument(skip_all)]
    pub fn mount(&mut self, host: &mut dyn FrameHost) {
        if self.mounted {
            return;
        }
        self.fit_statics();
        for layer in &mut self.layers {
            layer.mount(&mut self.hub);
        }
        self.mounted = true;
        self.refresh_intersections(host);
        self.observe_section(host);
        tracing::debug!(
            layers = self.layers.len(),
            section = self.active.id,
            "backdrop mounted"
        );
    }

    /// Route a host callback to its layer, or to the section tracker for
    /// [`SECTION_TIMER_LAYER`] timers. Frame callbacks also settle a deferred section early.
    pub fn dispatch(&mut self, host: &mut dyn FrameHost, event: HostEvent) -> Option<FrameOutcome> {
        match event {
            HostEvent::Timer { layer, handle } if layer == SECTION_TIMER_LAYER => {
                if self.section_timer == Some(handle) {
                    self.section_timer = None;
                    self.poll_section(host);
                }
                return None;
            }
            HostEvent::Frame { .. } => self.poll_section(host),
            HostEvent::Timer { .. } => {}
        }
        let layer = self.layers.iter_mut().find(|l| l.id() == event.layer())?;
        match event {
            HostEvent::Frame { handle, now_ms, .. } => Some(layer.on_frame(host, handle, now_ms)),
            HostEvent::Timer { handle, .. } => {
                layer.on_timer(host, handle);
                None
            }
        }
    }

    /// Advance a manual host by `refreshes` display refreshes of `dt_ms`, dispatching every
    /// callback. Returns the number of rendered layer frames.
    pub fn pump(&mut self, host: &mut ManualFrameHost, refreshes: usize, dt_ms: f64) -> usize {
        let mut rendered = 0;
        for _ in 0..refreshes {
            for event in host.advance(dt_ms) {
                if let Some(FrameOutcome::Rendered { .. }) = self.dispatch(host, event) {
                    rendered += 1;
                }
            }
        }
        rendered
    }

    /// Viewport resized: refit every surface, reinitialize particles and relayout sections.
    pub fn resize(&mut self, host: &mut dyn FrameHost, viewport: Size, dpr: f64) {
        self.config.viewport_width = viewport.width;
        self.config.viewport_height = viewport.height;
        self.config.device_pixel_ratio = dpr;
        let document = self.config.document();
        let mobile = is_mobile_width(viewport.width, self.config.mobile_breakpoint);
        self.sections
            .set_anchors(layout_sections(&self.config.sections, viewport.width));
        self.fit_statics();
        tracing::debug!(?viewport, dpr, mobile, "backdrop resized");
        self.broadcast(
            host,
            EnvSignal::Resize {
                viewport,
                document,
                dpr,
                mobile,
            },
        );
        self.scroll_y = self.clamp_scroll(self.scroll_y);
        self.refresh_intersections(host);
        self.observe_section(host);
    }

    /// Reduced-motion preference changed. Ignored when the host cannot evaluate media queries.
    pub fn set_reduced_motion(&mut self, host: &mut dyn FrameHost, reduced: bool) {
        if !self.config.capabilities.media_queries {
            return;
        }
        self.broadcast(host, EnvSignal::ReducedMotion(reduced));
    }

    /// Document visibility changed.
    pub fn set_document_visible(&mut self, host: &mut dyn FrameHost, visible: bool) {
        self.broadcast(host, EnvSignal::DocumentVisibility(visible));
    }

    /// Scroll to `scroll_y` (clamped to the scrollable range).
    ///
    /// Updates layer intersections and returns the section change, if one happened.
    pub fn scroll_to(&mut self, host: &mut dyn FrameHost, scroll_y: f64) -> Option<SectionChange> {
        self.scroll_y = self.clamp_scroll(scroll_y);
        if !self.mounted {
            return None;
        }
        self.refresh_intersections(host);
        self.observe_section(host)
    }

    /// Force the visuals of section `id` (unknown ids fall back to the default section).
    #[tracing::instrument(skip(self))]
    pub fn apply_section(&mut self, id: &str) {
        self.activate(resolve_section(id));
    }

    /// Flatten static base, every layer and the glass highlights into one frame.
    ///
    /// Fails when the base surface cannot produce pixels (e.g. a recording surface).
    #[tracing::instrument(skip(self), fields(section = self.active.id))]
    pub fn render_composite(&mut self) -> StardriftResult<FrameRGBA> {
        let progress = self.scroll_progress();
        let active = self.active;

        self.base.clear();
        paint_background(&mut self.base, active.gradient, active.background_opacity);
        paint_vignette(&mut self.base, vignette_opacity(progress));
        paint_mesh(&mut self.base, active.variant.config().mesh_spots);
        self.base.present()?;
        let mut frame = self
            .base
            .snapshot()
            .ok_or_else(|| StardriftError::surface("base surface has no pixels"))?;

        for layer in &mut self.layers {
            if !layer.surface_ready() || layer.particles().is_empty() {
                continue;
            }
            let src_y = match layer.extent() {
                Extent::Viewport => 0,
                Extent::Document => (self.scroll_y * layer.surface().desc().dpr).floor() as u32,
            };
            let opacity = layer.composite_opacity();
            if let Some(src) = layer.surface_mut().snapshot() {
                composite_over(&mut frame, &src, src_y, opacity)?;
            }
        }

        self.glass.clear();
        paint_glass(&mut self.glass, active.glass, glass_opacity(progress));
        self.glass.present()?;
        if let Some(glass) = self.glass.snapshot() {
            composite_over(&mut frame, &glass, 0, 1.0)?;
        }
        Ok(frame)
    }

    /// Tear down every layer. Safe to call more than once.
    pub fn unmount(&mut self, host: &mut dyn FrameHost) {
        for layer in &mut self.layers {
            layer.unmount(host, &mut self.hub);
        }
        if let Some(timer) = self.section_timer.take() {
            host.clear_timeout(timer);
        }
        if self.mounted {
            tracing::debug!("backdrop unmounted");
        }
        self.mounted = false;
    }

    fn observe_section(&mut self, host: &mut dyn FrameHost) -> Option<SectionChange> {
        if !self.mounted {
            return None;
        }
        let change = self
            .sections
            .observe(self.scroll_y, self.config.viewport(), host.now_ms());
        self.settle_section(host, change)
    }

    fn poll_section(&mut self, host: &mut dyn FrameHost) {
        let change = self.sections.poll(host.now_ms());
        self.settle_section(host, change);
    }

    /// Apply a tracker result and keep exactly one wake-up armed while an evaluation is deferred.
    fn settle_section(
        &mut self,
        host: &mut dyn FrameHost,
        change: Option<SectionChange>,
    ) -> Option<SectionChange> {
        if let Some(change) = &change {
            self.activate(change.binding());
        }
        match self.sections.deferred_wait_ms(host.now_ms()) {
            Some(wait_ms) if self.section_timer.is_none() => {
                self.section_timer = Some(host.set_timeout(SECTION_TIMER_LAYER, wait_ms));
            }
            None => {
                if let Some(timer) = self.section_timer.take() {
                    host.clear_timeout(timer);
                }
            }
            Some(_) => {}
        }
        change
    }

    fn activate(&mut self, binding: &'static SectionBinding) {
        if std::ptr::eq(self.active, binding) {
            return;
        }
        self.active = binding;
        for layer in &mut self.layers {
            layer.reconfigure(binding.variant, binding.intensity);
        }
        tracing::debug!(
            section = binding.id,
            variant = %binding.variant,
            intensity = %binding.intensity,
            "section applied"
        );
    }

    fn broadcast(&mut self, host: &mut dyn FrameHost, signal: EnvSignal) {
        for id in self.hub.publish(signal) {
            if let Some(layer) = self.layers.iter_mut().find(|l| l.id() == id) {
                layer.handle_signal(host, signal);
            }
        }
    }

    fn refresh_intersections(&mut self, host: &mut dyn FrameHost) {
        if !self.mounted {
            return;
        }
        let viewport = self.config.viewport();
        let view = Rect::new(0.0, self.scroll_y, viewport.width, self.scroll_y + viewport.height);
        for layer in &mut self.layers {
            let target = match layer.extent() {
                Extent::Viewport => view,
                Extent::Document => Rect::from_origin_size((0.0, 0.0), layer.container()),
            };
            let ratio = layer.gate().options().ratio(target, view);
            layer.observe_intersection(host, ratio);
        }
    }

    fn fit_statics(&mut self) {
        let viewport = self.config.viewport();
        let dpr = self.config.device_pixel_ratio;
        for surface in [&mut self.base, &mut self.glass] {
            if let Err(err) = surface.fit_to_container(viewport, dpr) {
                tracing::warn!(error = %err, "static surface unavailable");
            }
        }
    }

    fn clamp_scroll(&self, scroll_y: f64) -> f64 {
        let max = (self.config.document().height - self.config.viewport_height).max(0.0);
        if scroll_y.is_finite() {
            scroll_y.clamp(0.0, max)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/backdrop.rs"]
mod tests;
