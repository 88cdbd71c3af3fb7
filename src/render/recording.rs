use crate::foundation::color::Rgba8;
use crate::foundation::core::{BezPath, Point, Rect, Size};
use crate::foundation::error::{StardriftError, StardriftResult};
use crate::render::surface::{Surface, SurfaceDesc};

/// Draw call captured by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// [`Surface::fill_circle`].
    Circle {
        /// Center in CSS px.
        center: Point,
        /// Radius in CSS px.
        radius: f64,
        /// Color including draw alpha.
        color: Rgba8,
        /// Halo width.
        glow: f64,
    },
    /// [`Surface::fill_polygon`].
    Polygon {
        /// Vertices in CSS px.
        points: Vec<Point>,
        /// Color including draw alpha.
        color: Rgba8,
    },
    /// [`Surface::fill_path`].
    Path {
        /// Number of path elements.
        elements: usize,
        /// Color including draw alpha.
        color: Rgba8,
    },
    /// [`Surface::fill_rect`].
    Rect {
        /// Rectangle in CSS px.
        rect: Rect,
        /// Color including draw alpha.
        color: Rgba8,
    },
    /// [`Surface::fill_radial_glow`].
    RadialGlow {
        /// Center in CSS px.
        center: Point,
        /// Fade-out radius.
        radius: f64,
        /// Center color.
        color: Rgba8,
    },
}

/// Headless surface that records draw calls instead of rasterizing.
///
/// Used by hosts without a raster target and by tests; it can simulate an unavailable drawing
/// context and failing presents.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    desc: SurfaceDesc,
    calls: Vec<DrawCall>,
    unavailable: bool,
    fail_presents: u32,
    clears: u64,
    presents: u64,
    fits: u64,
}

impl RecordingSurface {
    /// Working surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface whose drawing context can never be created.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Make the next `n` presents fail with a frame error.
    pub fn fail_next_presents(&mut self, n: u32) {
        self.fail_presents = n;
    }

    /// Calls recorded since the last clear.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of clears.
    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// Number of successful presents.
    pub fn presents(&self) -> u64 {
        self.presents
    }

    /// Number of successful fits.
    pub fn fits(&self) -> u64 {
        self.fits
    }
}

impl Surface for RecordingSurface {
    fn fit_to_container(&mut self, css: Size, dpr: f64) -> StardriftResult<SurfaceDesc> {
        if self.unavailable {
            return Err(StardriftError::surface("2d context unavailable"));
        }
        self.desc = SurfaceDesc::fit(css, dpr);
        self.fits += 1;
        self.calls.clear();
        Ok(self.desc)
    }

    fn desc(&self) -> SurfaceDesc {
        self.desc
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.calls.clear();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8, glow: f64) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
            glow,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.calls.push(DrawCall::Path {
            elements: path.elements().len(),
            color,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.calls.push(DrawCall::Rect { rect, color });
    }

    fn fill_radial_glow(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.calls.push(DrawCall::RadialGlow {
            center,
            radius,
            color,
        });
    }

    fn present(&mut self) -> StardriftResult<()> {
        if self.fail_presents > 0 {
            self.fail_presents -= 1;
            return Err(StardriftError::frame("simulated present failure"));
        }
        self.presents += 1;
        Ok(())
    }
}
