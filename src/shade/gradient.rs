use smallvec::SmallVec;

use crate::foundation::core::{Orientation, Rgba8};
use crate::foundation::math::lerp_u8;
use crate::raster::image::{BYTES_PER_PIXEL, RasterImage};
use crate::shade::shading::ShadeFn;

/// One gradient stop: where it sits, how far to shade the base color, and its opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient, `0..=1`.
    pub position: f32,
    /// Factor handed to the shade function.
    pub shade: f32,
    /// Opacity multiplier, `0..=1`.
    pub alpha: f32,
}

impl ColorStop {
    /// Build a stop.
    pub const fn new(position: f32, shade: f32, alpha: f32) -> Self {
        Self {
            position,
            shade,
            alpha,
        }
    }

    /// Opaque stop.
    pub const fn opaque(position: f32, shade: f32) -> Self {
        Self::new(position, shade, 1.0)
    }
}

/// How the synthesized run relates to the area it will cover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientMode {
    /// Stops spread once over the full length.
    #[default]
    Linear,
    /// Stops spread over one period; the caller tiles it with [`crate::Extend::Reflect`].
    Reflect {
        /// Period length in pixels.
        period_px: u32,
    },
}

/// Everything that determines a gradient raster.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientRequest<'a> {
    /// Color the stops shade from.
    pub base: Rgba8,
    /// Stops, ordered by position.
    pub stops: &'a [ColorStop],
    /// Extent along the gradient axis.
    pub length_px: i32,
    /// Extent across the gradient axis.
    pub thickness_px: i32,
    /// Axis the gradient varies along.
    pub axis: Orientation,
    /// Linear or one reflect period.
    pub mode: GradientMode,
}

/// Renders gradient rasters from stop lists using a pluggable shade function.
///
/// Pure: identical requests produce bit-identical rasters.
pub struct GradientSynthesizer<'s> {
    shader: &'s dyn ShadeFn,
}

impl<'s> GradientSynthesizer<'s> {
    /// Synthesizer using `shader` to color its stops.
    pub fn new(shader: &'s dyn ShadeFn) -> Self {
        Self { shader }
    }

    /// Render a linear gradient.
    ///
    /// A horizontal axis yields a `length x thickness` raster, a vertical one
    /// `thickness x length`. Non-positive sizes or an empty stop list yield an empty raster.
    pub fn synthesize(
        &self,
        base: Rgba8,
        stops: &[ColorStop],
        length_px: i32,
        thickness_px: i32,
        axis_horizontal: bool,
    ) -> RasterImage {
        self.render(&GradientRequest {
            base,
            stops,
            length_px,
            thickness_px,
            axis: if axis_horizontal {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            },
            mode: GradientMode::Linear,
        })
    }

    /// Render any [`GradientRequest`].
    pub fn render(&self, req: &GradientRequest<'_>) -> RasterImage {
        let run = match req.mode {
            GradientMode::Linear => req.length_px,
            GradientMode::Reflect { period_px } => {
                let period = i32::try_from(period_px).unwrap_or(i32::MAX);
                if period > 0 {
                    period.min(req.length_px)
                } else {
                    req.length_px
                }
            }
        };
        if run <= 0 || req.thickness_px <= 0 || req.stops.is_empty() {
            return RasterImage::empty();
        }

        let line = self.line(req.base, req.stops, run as usize);
        let (run, thick) = (run as usize, req.thickness_px as usize);
        let mut out = Vec::with_capacity(run * thick * BYTES_PER_PIXEL);
        match req.axis {
            Orientation::Horizontal => {
                let row: Vec<u8> = line.iter().flat_map(|px| px.iter().copied()).collect();
                for _ in 0..thick {
                    out.extend_from_slice(&row);
                }
                RasterImage::from_raw_parts(run as u32, thick as u32, out)
            }
            Orientation::Vertical => {
                for px in &line {
                    for _ in 0..thick {
                        out.extend_from_slice(px);
                    }
                }
                RasterImage::from_raw_parts(thick as u32, run as u32, out)
            }
        }
    }

    /// Premultiplied colors for each pixel along the gradient axis.
    fn line(&self, base: Rgba8, stops: &[ColorStop], len: usize) -> Vec<[u8; 4]> {
        let mut sorted: SmallVec<[ColorStop; 8]> = stops
            .iter()
            .map(|s| ColorStop {
                position: if s.position.is_finite() {
                    s.position.clamp(0.0, 1.0)
                } else {
                    0.0
                },
                ..*s
            })
            .collect();
        // Stable, so duplicate positions keep caller order and form a hard edge.
        sorted.sort_by(|a, b| a.position.total_cmp(&b.position));

        let colors: SmallVec<[Rgba8; 8]> = sorted
            .iter()
            .map(|s| {
                let c = self.shader.shade(base, s.shade);
                let alpha = if s.alpha.is_finite() {
                    s.alpha.clamp(0.0, 1.0)
                } else {
                    1.0
                };
                c.with_alpha((f32::from(c.a) * alpha).round() as u8)
            })
            .collect();

        (0..len)
            .map(|i| {
                let t = (i as f32 + 0.5) / len as f32;
                color_at(&sorted, &colors, t).to_premul().to_array()
            })
            .collect()
    }
}

fn color_at(stops: &[ColorStop], colors: &[Rgba8], t: f32) -> Rgba8 {
    // Index of the first stop strictly after `t`.
    let next = stops.partition_point(|s| s.position <= t);
    if next == 0 {
        return colors[0];
    }
    if next == stops.len() {
        return colors[stops.len() - 1];
    }
    let (a, b) = (&stops[next - 1], &stops[next]);
    let span = b.position - a.position;
    let u = if span > 0.0 {
        (t - a.position) / span
    } else {
        1.0
    };
    let (ca, cb) = (colors[next - 1], colors[next]);
    Rgba8::new(
        lerp_u8(ca.r, cb.r, u),
        lerp_u8(ca.g, cb.g, u),
        lerp_u8(ca.b, cb.b, u),
        lerp_u8(ca.a, cb.a, u),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/shade/gradient.rs"]
mod tests;
