use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Rect};
use crate::render::surface::Surface;
use crate::theme::section::{GlassSpot, GradientStop};
use crate::theme::variant::GradientSpot;

/// Horizontal bands used to approximate a vertical gradient.
const GRADIENT_BANDS: usize = 64;
/// Nested frames used to approximate the depth vignette.
const VIGNETTE_FRAMES: usize = 16;
/// Stacked mesh gradient passes; each is wider and fainter than the previous one.
pub const MESH_PASSES: usize = 3;

/// Depth vignette opacity for a scroll progress in `[0, 1]`.
pub fn vignette_opacity(progress: f64) -> f64 {
    0.6 + progress.clamp(0.0, 1.0) * 0.2
}

/// Glass highlight opacity for a scroll progress in `[0, 1]`.
pub fn glass_opacity(progress: f64) -> f64 {
    1.0 - progress.clamp(0.0, 1.0) * 0.4
}

/// Color of a stop list at `t` in `[0, 1]`. An empty list is transparent.
pub fn sample_gradient(stops: &[GradientStop], t: f64) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba8::hexa(0, 0);
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return a.color.mix(b.color, local);
        }
    }
    last.color
}

/// Black backdrop with the section gradient over it at `opacity`.
pub fn paint_background(surface: &mut dyn Surface, stops: &[GradientStop], opacity: f64) {
    let css = surface.desc().css;
    surface.fill_rect(Rect::from_origin_size(Point::ZERO, css), Rgba8::hex(0x000000));
    let band_h = css.height / GRADIENT_BANDS as f64;
    for band in 0..GRADIENT_BANDS {
        let t = (band as f64 + 0.5) / GRADIENT_BANDS as f64;
        let y0 = band as f64 * band_h;
        surface.fill_rect(
            Rect::new(0.0, y0, css.width, y0 + band_h),
            sample_gradient(stops, t).with_alpha(opacity),
        );
    }
}

/// Darken the edges, reaching `opacity` black at the border and nothing at the center.
pub fn paint_vignette(surface: &mut dyn Surface, opacity: f64) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }
    let css = surface.desc().css;
    let (w, h) = (css.width, css.height);
    // N stacked frames of alpha `a_s` reach `1 - (1 - a_s)^N` at the border.
    let step_alpha = 1.0 - (1.0 - opacity).powf(1.0 / VIGNETTE_FRAMES as f64);
    let color = Rgba8::hex(0x000000).with_alpha(step_alpha);
    for frame in 1..=VIGNETTE_FRAMES {
        let k = frame as f64 / VIGNETTE_FRAMES as f64;
        let (dx, dy) = (k * w / 2.0, k * h / 2.0);
        surface.fill_rect(Rect::new(0.0, 0.0, w, dy), color);
        surface.fill_rect(Rect::new(0.0, h - dy, w, h), color);
        surface.fill_rect(Rect::new(0.0, dy, dx, h - dy), color);
        surface.fill_rect(Rect::new(w - dx, dy, w, h - dy), color);
    }
}

/// Variant mesh gradient spots, [`MESH_PASSES`] passes.
pub fn paint_mesh(surface: &mut dyn Surface, spots: &[GradientSpot]) {
    let css = surface.desc().css;
    for pass in 0..MESH_PASSES {
        let radius = 350.0 + 87.5 * pass as f64;
        let fade = (40.0 - 8.0 * pass as f64) / 40.0;
        for spot in spots {
            let center = Point::new(css.width * spot.x_pct / 100.0, css.height * spot.y_pct / 100.0);
            surface.fill_radial_glow(center, radius, spot.color.with_alpha(fade));
        }
    }
}

/// Section glass highlights at `opacity`.
pub fn paint_glass(surface: &mut dyn Surface, spots: &[GlassSpot], opacity: f64) {
    let css = surface.desc().css;
    let side = css.width.max(css.height);
    for spot in spots {
        let center = Point::new(css.width * spot.x_pct / 100.0, css.height * spot.y_pct / 100.0);
        surface.fill_radial_glow(
            center,
            side * spot.radius_pct / 100.0,
            spot.color.with_alpha(opacity),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/statics.rs"]
mod tests;
