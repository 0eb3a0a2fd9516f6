pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Linear interpolation between two channel values, rounded to nearest.
pub(crate) fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let af = f32::from(a);
    let bf = f32::from(b);
    (af + (bf - af) * t.clamp(0.0, 1.0))
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Split `len` between two extents proportionally to their natural sizes.
///
/// Returns the natural sizes unchanged when they fit; otherwise the first extent gets
/// `floor(len * a / (a + b))` and the second gets the remainder.
pub(crate) fn shrink_pair(a: i32, b: i32, len: i32) -> (i32, i32) {
    let len = len.max(0);
    let sum = i64::from(a) + i64::from(b);
    if sum <= i64::from(len) {
        return (a, b);
    }
    if sum == 0 {
        return (0, 0);
    }
    let first = ((i64::from(len) * i64::from(a)) / sum) as i32;
    (first, len - first)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
