use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over with an 8-bit coverage factor applied to the source.
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 0 || src[3] == 0 {
        return dst;
    }

    let cov = u16::from(coverage);
    let sa = mul_div255(u16::from(src[3]), cov);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), cov);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite one row of source pixels over one row of destination pixels.
///
/// `coverage`, when present, holds one factor per pixel of the row.
pub fn over_row(dst: &mut [u8], src: &[u8], coverage: Option<&[u8]>) {
    for (i, (d, s)) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)).enumerate() {
        let cov = coverage.map_or(255, |c| c[i]);
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], cov);
        d.copy_from_slice(&out);
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
