use crate::foundation::error::{StardriftError, StardriftResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8, unit_to_u8};
use crate::render::surface::FrameRGBA;

/// Premultiplied source-over of `src` onto `dst` at `opacity`.
///
/// `src` row `src_y + y` lands on `dst` row `y`; this is how a document-tall layer is windowed
/// onto the viewport at a scroll offset. Rows outside `src` are left untouched. Widths must match.
pub fn composite_over(
    dst: &mut FrameRGBA,
    src: &FrameRGBA,
    src_y: u32,
    opacity: f64,
) -> StardriftResult<()> {
    if dst.width != src.width {
        return Err(StardriftError::frame(format!(
            "composite width mismatch: dst {} vs src {}",
            dst.width, src.width
        )));
    }
    let row_bytes = dst.width as usize * 4;
    if dst.data.len() != row_bytes * dst.height as usize
        || src.data.len() != row_bytes * src.height as usize
    {
        return Err(StardriftError::frame("composite expects tightly packed rgba8 buffers"));
    }

    let rows = src.height.saturating_sub(src_y).min(dst.height) as usize;
    if rows == 0 || row_bytes == 0 {
        return Ok(());
    }
    let src_start = src_y as usize * row_bytes;
    let src_rows = &src.data[src_start..src_start + rows * row_bytes];
    let dst_rows = &mut dst.data[..rows * row_bytes];
    premul_over_in_place_opacity(dst_rows, src_rows, opacity);
    Ok(())
}

fn premul_over_in_place_opacity(dst: &mut [u8], src: &[u8], opacity: f64) {
    let op = u16::from(unit_to_u8(opacity));
    if op == 0 {
        return;
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = mul_div255_u8(u16::from(s[3]), op);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);

        d[3] = add_sat_u8(sa, mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let sc = mul_div255_u8(u16::from(s[c]), op);
            let dc = mul_div255_u8(u16::from(d[c]), inv);
            d[c] = add_sat_u8(sc, dc);
        }
    }
}

/// Convert premultiplied RGBA8 to straight alpha in place.
pub fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
