pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

pub(crate) fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise-linear interpolation over equally spaced keyframes, `t` in `[0, 1]`.
pub(crate) fn keyframes(values: &[f64], t: f64) -> f64 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (values.len() - 1) as f64;
            let pos = t.clamp(0.0, 1.0) * segments;
            let i = (pos.floor() as usize).min(values.len() - 2);
            lerp(values[i], values[i + 1], pos - i as f64)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
