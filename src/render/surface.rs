use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Size};
use crate::foundation::error::StardriftResult;
use crate::sim::particle::Particle;
use serde::Serialize;

/// Device pixel ratios above this are clamped to keep backing stores small.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

/// Device pixel ratio actually used for a backing store.
///
/// Non-finite or non-positive ratios fall back to `1.0`.
pub fn effective_dpr(dpr: f64) -> f64 {
    if !dpr.is_finite() || dpr <= 0.0 {
        return 1.0;
    }
    dpr.min(MAX_DEVICE_PIXEL_RATIO)
}

/// Size of a drawable surface in CSS pixels and in backing-store pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SurfaceDesc {
    /// Layout box in CSS px.
    pub css: Size,
    /// Effective device pixel ratio.
    pub dpr: f64,
    /// Backing-store width in device px.
    pub backing_width: u32,
    /// Backing-store height in device px.
    pub backing_height: u32,
}

impl SurfaceDesc {
    /// Fit a backing store to a `css` layout box at `dpr` (capped at [`MAX_DEVICE_PIXEL_RATIO`]).
    pub fn fit(css: Size, dpr: f64) -> Self {
        let dpr = effective_dpr(dpr);
        let side = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let css = Size::new(side(css.width), side(css.height));
        Self {
            css,
            dpr,
            backing_width: (css.width * dpr).floor() as u32,
            backing_height: (css.height * dpr).floor() as u32,
        }
    }

    /// Transform from CSS px to backing-store px.
    pub fn css_to_device(&self) -> Affine {
        Affine::scale(self.dpr)
    }

    /// Return `true` when the backing store has no pixels.
    pub fn is_empty(&self) -> bool {
        self.backing_width == 0 || self.backing_height == 0
    }
}

impl Default for SurfaceDesc {
    fn default() -> Self {
        Self {
            css: Size::ZERO,
            dpr: 1.0,
            backing_width: 0,
            backing_height: 0,
        }
    }
}

/// A presented frame as RGBA8 pixels.
///
/// Frames are premultiplied alpha; the flag keeps that explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
            premultiplied: true,
        }
    }

    /// Pixel at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Immediate-mode drawing context of one layer.
///
/// All coordinates are CSS px; implementations map them to the backing store set up by
/// [`Surface::fit_to_container`]. Colors are straight alpha and their alpha is the draw alpha.
pub trait Surface: std::fmt::Debug {
    /// Resize the backing store for a layout box and device pixel ratio.
    ///
    /// An `Err` means no drawing context is available; callers render nothing for the layer.
    fn fit_to_container(&mut self, css: Size, dpr: f64) -> StardriftResult<SurfaceDesc>;

    /// Current size.
    fn desc(&self) -> SurfaceDesc;

    /// Wipe the previous frame.
    fn clear(&mut self);

    /// Filled disc with a soft halo `glow` px wide (`0` for none).
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8, glow: f64);

    /// Filled closed polygon.
    fn fill_polygon(&mut self, points: &[Point], color: Rgba8);

    /// Filled path (non-zero winding).
    fn fill_path(&mut self, path: &BezPath, color: Rgba8);

    /// Filled axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    /// Radial glow fading from `color` at the center to transparent at `radius`.
    fn fill_radial_glow(&mut self, center: Point, radius: f64, color: Rgba8);

    /// Finish the frame.
    fn present(&mut self) -> StardriftResult<()>;

    /// Pixels of the last presented frame, when the surface keeps them.
    fn snapshot(&mut self) -> Option<FrameRGBA> {
        None
    }

    /// Paint a particle with alpha = fade x base opacity: a glowing disc, or the jittered
    /// hexagon for asteroids. Nearly invisible particles are skipped.
    fn draw_particle(&mut self, p: &Particle, color: Rgba8, glow: f64) {
        let alpha = p.alpha();
        if alpha <= 0.01 {
            return;
        }
        let color = color.with_alpha(alpha);
        match p.asteroid_outline() {
            Some(points) => self.fill_polygon(&points, color),
            None => self.fill_circle(p.pos, p.radius, color, glow),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
