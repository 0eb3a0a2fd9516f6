use crate::foundation::core::{BezPath, PixelRect, Rgba8Premul};
use crate::raster::image::RasterImage;

/// How a raster continues past its own extent when tiled.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Extend {
    /// Every tile is an exact copy.
    #[default]
    Repeat,
    /// Every other tile is mirrored along the axis it advances on.
    Reflect,
}

/// Paint source for fills.
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    /// One color everywhere.
    Solid(Rgba8Premul),
    /// A raster anchored at `origin` and extended infinitely in both axes.
    Image {
        /// Pattern raster.
        image: RasterImage,
        /// Device position of the raster's top-left pixel.
        origin: (i32, i32),
        /// Extension mode outside the raster.
        extend: Extend,
    },
}

impl Brush {
    /// Sample the brush at device pixel `(x, y)`.
    pub fn sample(&self, x: i32, y: i32) -> Rgba8Premul {
        match self {
            Self::Solid(c) => *c,
            Self::Image {
                image,
                origin,
                extend,
            } => {
                if image.is_empty() {
                    return Rgba8Premul::transparent();
                }
                let u = wrap_coord(x - origin.0, image.width() as i32, *extend);
                let v = wrap_coord(y - origin.1, image.height() as i32, *extend);
                image.pixel(u as u32, v as u32)
            }
        }
    }
}

fn wrap_coord(c: i32, len: i32, extend: Extend) -> i32 {
    match extend {
        Extend::Repeat => c.rem_euclid(len),
        Extend::Reflect => {
            let m = c.rem_euclid(2 * len);
            if m >= len { 2 * len - 1 - m } else { m }
        }
    }
}

/// Split a run of `len` pixels into consecutive tiles of `unit` pixels.
///
/// Yields `(offset, size)` pairs; every tile is `unit` wide except the last, which is clipped so
/// the tiles cover exactly `len` pixels. Non-positive inputs yield nothing.
pub fn tile_spans(len: i32, unit: i32) -> impl Iterator<Item = (i32, i32)> {
    let (len, unit) = if len <= 0 || unit <= 0 {
        (0, 1)
    } else {
        (len, unit)
    };
    (0..len)
        .step_by(unit as usize)
        .map(move |offset| (offset, unit.min(len - offset)))
}

/// Drawing context supplied by the host toolkit.
///
/// All geometry is in device pixels. Implementations must treat empty rectangles as no-ops and
/// must never read outside the rasters they are given.
pub trait Painter {
    /// Fill a rectangle with a brush.
    fn fill_rect(&mut self, rect: PixelRect, brush: &Brush);

    /// Fill a path (nonzero winding) with a brush.
    fn fill_path(&mut self, path: &BezPath, brush: &Brush);

    /// Composite `src` (a region of `image`) with its top-left at `(dst_x, dst_y)`.
    fn blit(&mut self, image: &RasterImage, src: PixelRect, dst_x: i32, dst_y: i32);

    /// Intersect the current clip with a rectangle.
    fn clip_rect(&mut self, rect: PixelRect);

    /// Intersect the current clip with a path.
    fn clip_path(&mut self, path: &BezPath);

    /// Push the current clip state.
    fn save(&mut self);

    /// Pop the most recently saved clip state; no-op when nothing is saved.
    fn restore(&mut self);

    /// Repeat `image` across `dst` starting at its top-left corner.
    ///
    /// The final tile in each axis is clipped, never scaled. With [`Extend::Reflect`] odd tiles
    /// are mirrored along the axis they advance on.
    fn blit_tiled(&mut self, image: &RasterImage, dst: PixelRect, extend: Extend) {
        if dst.is_empty() || image.is_empty() {
            return;
        }
        let variants = TileVariants::new(image, extend);
        let (uw, uh) = (image.width() as i32, image.height() as i32);
        for (ty, (oy, h)) in tile_spans(dst.height, uh).enumerate() {
            for (tx, (ox, w)) in tile_spans(dst.width, uw).enumerate() {
                let img = variants.pick(tx % 2 == 1, ty % 2 == 1);
                self.blit(
                    img,
                    PixelRect::new(0, 0, w, h),
                    dst.x.saturating_add(ox),
                    dst.y.saturating_add(oy),
                );
            }
        }
    }
}

/// The up-to-four mirror images a reflect tiling alternates between.
struct TileVariants {
    plain: RasterImage,
    flip_h: Option<RasterImage>,
    flip_v: Option<RasterImage>,
    flip_hv: Option<RasterImage>,
}

impl TileVariants {
    fn new(image: &RasterImage, extend: Extend) -> Self {
        match extend {
            Extend::Repeat => Self {
                plain: image.clone(),
                flip_h: None,
                flip_v: None,
                flip_hv: None,
            },
            Extend::Reflect => Self {
                plain: image.clone(),
                flip_h: Some(image.mirrored(true, false)),
                flip_v: Some(image.mirrored(false, true)),
                flip_hv: Some(image.mirrored(true, true)),
            },
        }
    }

    fn pick(&self, odd_x: bool, odd_y: bool) -> &RasterImage {
        let chosen = match (odd_x, odd_y) {
            (false, false) => None,
            (true, false) => self.flip_h.as_ref(),
            (false, true) => self.flip_v.as_ref(),
            (true, true) => self.flip_hv.as_ref(),
        };
        chosen.unwrap_or(&self.plain)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/painter.rs"]
mod tests;
