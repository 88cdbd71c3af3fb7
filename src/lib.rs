//! Stardrift is a headless engine for layered animated backdrops.
//!
//! A [`Backdrop`] stacks a static base (section gradient, mesh spots, depth vignette), a set of
//! particle layers and glass highlights. Each layer is one instance of a generic engine:
//!
//! - a fixed-size [`ParticlePool`] stepped by a [`LayerKind`] configuration
//! - a [`Gate`] deciding from intersection, document visibility and reduced motion whether it
//!   may animate
//! - a [`FrameLoop`] keeping exactly one frame callback in flight while it does
//! - a [`Surface`] sized to its container at a capped device pixel ratio
//!
//! Hosts drive everything through [`FrameHost`] callbacks and environment signals; the
//! [`ManualFrameHost`] provides a deterministic virtual clock for tests and offline rendering.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod gate;
pub(crate) mod layers;
pub(crate) mod render;
pub(crate) mod schedule;
pub(crate) mod sim;
pub(crate) mod stage;
pub(crate) mod theme;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, Rgba8Premul, Size, Vec2, overlap_area,
};
pub use crate::foundation::error::{StardriftError, StardriftResult};
pub use crate::foundation::rng::Rng64;

pub use crate::theme::section::{
    DEFAULT_SECTION, GlassSpot, GradientStop, SectionBinding, SectionColors, is_known_section,
    resolve_section, section_ids, sections,
};
pub use crate::theme::variant::{
    GradientSpot, Intensity, TierTable, Variant, VariantConfig, effective_intensity,
};

pub use crate::sim::kind::{Extent, LayerEnv, LayerKind, SpawnCtx, StepCtx};
pub use crate::sim::particle::{
    Body, CelestialKind, FADE_FRACTION, Particle, WRAP_MARGIN_PX, WrapPolicy, fade_factor,
    wrap_torus,
};
pub use crate::sim::pool::ParticlePool;
pub use crate::sim::trail::{Trail, TrailSample};

pub use crate::layers::LayerChoice;
pub use crate::layers::celestial::CelestialLayer;
pub use crate::layers::dust::DustLayer;
pub use crate::layers::nebula::NebulaLayer;
pub use crate::layers::stars::StarField;
pub use crate::layers::waves::EnergyWaves;

pub use crate::render::composite::{composite_over, unpremultiply_in_place};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::recording::{DrawCall, RecordingSurface};
pub use crate::render::statics::{
    glass_opacity, paint_background, paint_glass, paint_mesh, paint_vignette, sample_gradient,
    vignette_opacity,
};
pub use crate::render::surface::{
    FrameRGBA, MAX_DEVICE_PIXEL_RATIO, Surface, SurfaceDesc, effective_dpr,
};

pub use crate::gate::intersection::{Length, ObserverOptions, RootMargin, intersection_ratio};
pub use crate::gate::visibility::{
    Capabilities, Gate, GateState, GateTransition, VisibilityState,
};

pub use crate::schedule::frame_loop::{
    FRAME_SLACK_MS, FrameLoop, FrameOutcome, FrameTiming, LoopState, RESTART_DELAY_MS,
    TARGET_FRAME_INTERVAL_MS,
};
pub use crate::schedule::host::{
    FrameHandle, FrameHost, HostEvent, LayerId, ManualFrameHost, TimerHandle,
};

pub use crate::stage::backdrop::{Backdrop, SECTION_TIMER_LAYER};
pub use crate::stage::config::{
    BackdropConfig, DEFAULT_LAYERS, MOBILE_BREAKPOINT_PX, is_mobile_width,
};
pub use crate::stage::layer::{AnimatedLayer, LayerSetup, container_for};
pub use crate::stage::sections::{
    SECTION_THROTTLE_MS, SectionAnchor, SectionChange, SectionSpec, SectionTracker,
    layout_sections, scroll_progress,
};
pub use crate::stage::signals::{EnvSignal, EnvSnapshot, SignalHub, SubscriptionId};
