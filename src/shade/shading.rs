use crate::foundation::core::Rgba8;
use crate::shade::color::{hsl_to_rgb, rgb_to_hsl};

/// Smallest factor accepted by the shading curves; anything below is clamped.
const MIN_FACTOR: f32 = 0.01;

/// Perceptual lighten/darken transform.
///
/// `factor > 1` lightens, `factor < 1` darkens, `1` is the identity. Alpha is never touched.
/// Implementations must be pure: the render cache relies on identical inputs giving identical
/// output.
pub trait ShadeFn {
    /// Shade `base` by `factor`.
    fn shade(&self, base: Rgba8, factor: f32) -> Rgba8;
}

/// Built-in shading curves selectable from configuration.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ShadingStyle {
    /// Move perceived luma, then shift all channels by the same amount.
    #[default]
    Luma,
    /// Per-channel power curve, `c^(1/factor)`.
    Gamma,
    /// Move HSL lightness while keeping hue and saturation.
    Hsl,
}

impl ShadingStyle {
    /// Every built-in style, in declaration order.
    pub const ALL: [Self; 3] = [Self::Luma, Self::Gamma, Self::Hsl];
}

impl ShadeFn for ShadingStyle {
    fn shade(&self, base: Rgba8, factor: f32) -> Rgba8 {
        if factor == 1.0 {
            return base;
        }
        let f = if factor.is_finite() {
            factor.max(MIN_FACTOR)
        } else {
            1.0
        };
        let [r, g, b, a] = base.to_f32();
        let [r, g, b] = match self {
            Self::Luma => {
                let y = luma(r, g, b);
                let dy = shade_lightness(y, f) - y;
                [r + dy, g + dy, b + dy]
            }
            Self::Gamma => {
                let e = 1.0 / f;
                [r.powf(e), g.powf(e), b.powf(e)]
            }
            Self::Hsl => {
                let [h, s, l] = rgb_to_hsl(f64::from(r), f64::from(g), f64::from(b));
                let l = f64::from(shade_lightness(l as f32, f));
                let [r, g, b] = hsl_to_rgb(h, s, l);
                [r as f32, g as f32, b as f32]
            }
        };
        Rgba8::from_f32([r, g, b, a])
    }
}

/// Rec. 601 luma of normalized channels.
pub(crate) fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Lightening closes a `1 - 1/f` share of the gap to white; darkening scales towards black.
fn shade_lightness(l: f32, f: f32) -> f32 {
    let l = l.clamp(0.0, 1.0);
    if f >= 1.0 {
        1.0 - (1.0 - l) / f
    } else {
        l * f
    }
}

/// Stretch or compress a stop factor around the identity by the configured contrast.
///
/// `contrast` is `0..=1`; `0.5` leaves factors unchanged.
pub fn apply_contrast(factor: f32, contrast: f32) -> f32 {
    1.0 + (factor - 1.0) * (0.5 + contrast.clamp(0.0, 1.0))
}

/// Blend two straight colors, `t = 0` gives `a`.
pub fn mix(a: Rgba8, b: Rgba8, t: f32) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let (a, b) = (a.to_f32(), b.to_f32());
    Rgba8::from_f32([
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/shade/shading.rs"]
mod tests;
