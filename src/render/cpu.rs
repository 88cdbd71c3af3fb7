use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Size};
use crate::foundation::error::{StardriftError, StardriftResult};
use crate::render::surface::{FrameRGBA, Surface, SurfaceDesc};
use vello_cpu::kurbo::Shape;

/// Concentric discs used to approximate a halo or radial glow.
const GLOW_RINGS: u32 = 4;
const RADIAL_RINGS: u32 = 12;
/// Alpha of each halo ring relative to the disc alpha.
const HALO_ALPHA: f64 = 0.12;

/// CPU raster surface powered by `vello_cpu`.
///
/// The backing store is `floor(css * dpr)` pixels; drawing happens in CSS px through a
/// `scale(dpr)` transform. Presented frames are premultiplied RGBA8.
pub struct CpuSurface {
    desc: SurfaceDesc,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
    frames_presented: u64,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("desc", &self.desc)
            .field("frames_presented", &self.frames_presented)
            .finish_non_exhaustive()
    }
}

impl Default for CpuSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSurface {
    /// Unsized surface; call [`Surface::fit_to_container`] before drawing.
    pub fn new() -> Self {
        Self {
            desc: SurfaceDesc::default(),
            ctx: None,
            pixmap: None,
            frames_presented: 0,
        }
    }

    /// Number of frames presented since creation.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn with_paint(&mut self, color: Rgba8, f: impl FnOnce(&mut vello_cpu::RenderContext)) {
        if color.a == 0 {
            return;
        }
        let transform = affine_to_cpu(self.desc.css_to_device());
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        ctx.set_transform(transform);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        f(ctx);
    }

    fn disc(&mut self, center: Point, radius: f64, color: Rgba8) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let path = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius).to_path(0.1);
        self.with_paint(color, |ctx| ctx.fill_path(&path));
    }
}

impl Surface for CpuSurface {
    fn fit_to_container(&mut self, css: Size, dpr: f64) -> StardriftResult<SurfaceDesc> {
        let desc = SurfaceDesc::fit(css, dpr);
        if desc.is_empty() {
            self.ctx = None;
            self.pixmap = None;
            return Err(StardriftError::surface(format!(
                "no drawing context for an empty {}x{} backing store",
                desc.backing_width, desc.backing_height
            )));
        }
        let w: u16 = desc
            .backing_width
            .try_into()
            .map_err(|_| StardriftError::surface("backing width exceeds u16"))?;
        let h: u16 = desc
            .backing_height
            .try_into()
            .map_err(|_| StardriftError::surface("backing height exceeds u16"))?;

        let ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        self.ctx = Some(ctx);
        self.pixmap = Some(vello_cpu::Pixmap::new(w, h));
        self.desc = desc;
        self.clear();
        tracing::debug!(
            width = desc.backing_width,
            height = desc.backing_height,
            dpr = desc.dpr,
            "cpu surface fitted"
        );
        Ok(desc)
    }

    fn desc(&self) -> SurfaceDesc {
        self.desc
    }

    fn clear(&mut self) {
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.reset();
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8, glow: f64) {
        if glow > 0.0 {
            let halo = color.with_alpha(HALO_ALPHA);
            for ring in (1..=GLOW_RINGS).rev() {
                let r = radius + glow * f64::from(ring) / f64::from(GLOW_RINGS);
                self.disc(center, r, halo);
            }
        }
        self.disc(center, radius, color);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(*first));
        for p in rest {
            path.line_to(point_to_cpu(*p));
        }
        path.close_path();
        self.with_paint(color, |ctx| ctx.fill_path(&path));
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        let path = bezpath_to_cpu(path);
        self.with_paint(color, |ctx| ctx.fill_path(&path));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let rect = vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1);
        self.with_paint(color, |ctx| ctx.fill_rect(&rect));
    }

    fn fill_radial_glow(&mut self, center: Point, radius: f64, color: Rgba8) {
        // N stacked discs of alpha `a_s` reach `1 - (1 - a_s)^N` at the center.
        let target = f64::from(color.a) / 255.0;
        let step_alpha = 1.0 - (1.0 - target).powf(1.0 / f64::from(RADIAL_RINGS));
        let ring_color = Rgba8 { a: 255, ..color }.with_alpha(step_alpha);
        for ring in 0..RADIAL_RINGS {
            let r = radius * (1.0 - f64::from(ring) / f64::from(RADIAL_RINGS));
            self.disc(center, r, ring_color);
        }
    }

    fn present(&mut self) -> StardriftResult<()> {
        let (Some(ctx), Some(pixmap)) = (self.ctx.as_mut(), self.pixmap.as_mut()) else {
            return Err(StardriftError::surface("present without a drawing context"));
        };
        clear_pixmap_to_transparent(pixmap);
        ctx.flush();
        ctx.render_to_pixmap(pixmap);
        self.frames_presented += 1;
        Ok(())
    }

    fn snapshot(&mut self) -> Option<FrameRGBA> {
        let pixmap = self.pixmap.as_ref()?;
        Some(FrameRGBA {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3))
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
