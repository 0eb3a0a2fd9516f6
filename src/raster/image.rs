use std::sync::Arc;

use anyhow::Context;
use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::{PixelRect, Rgba8Premul};
use crate::foundation::error::{SheenError, SheenResult};

const DIGEST_SEED: u64 = 0x5eed_c4a7_e0f1_9b23;

/// Bytes per pixel for premultiplied RGBA8.
pub const BYTES_PER_PIXEL: usize = 4;

/// Immutable raster in premultiplied RGBA8, row-major, tightly packed.
///
/// Pixel storage is shared, so clones are cheap and never copy pixels. Nothing can write to a
/// raster once it is built; use [`crate::Surface`] to draw and then freeze the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Default for RasterImage {
    fn default() -> Self {
        Self::empty()
    }
}

impl RasterImage {
    /// The 0x0 raster.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Arc::from(Vec::<u8>::new()),
        }
    }

    /// Wrap premultiplied RGBA8 bytes.
    pub fn from_premul_bytes(width: u32, height: u32, pixels: Vec<u8>) -> SheenResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| SheenError::validation("raster size overflow"))?;
        if pixels.len() != expected {
            return Err(SheenError::validation(format!(
                "raster {width}x{height} expects {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: Arc::from(pixels),
        })
    }

    /// Wrap bytes whose length already matches `width * height * 4`.
    pub(crate) fn from_raw_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * BYTES_PER_PIXEL
        );
        Self {
            width,
            height,
            pixels: Arc::from(pixels),
        }
    }

    /// A raster filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let px = color.to_array();
        let pixels = px.repeat((width as usize) * (height as usize));
        Self {
            width,
            height,
            pixels: Arc::from(pixels),
        }
    }

    /// Convert a straight-alpha `image` buffer.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut pixels = img.as_raw().clone();
        premultiply_rgba8_in_place(&mut pixels);
        Self {
            width,
            height,
            pixels: Arc::from(pixels),
        }
    }

    /// Decode encoded image bytes (PNG or any format the `image` crate reads).
    pub fn decode(bytes: &[u8]) -> SheenResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::from_rgba_image(&dyn_img.to_rgba8()))
    }

    /// Convert to a straight-alpha `image` buffer.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut raw = self.pixels.to_vec();
        for px in raw.chunks_exact_mut(4) {
            let s = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
            .to_straight();
            px.copy_from_slice(&[s.r, s.g, s.b, s.a]);
        }
        image::RgbaImage::from_raw(self.width, self.height, raw).unwrap_or_default()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full extent as a rectangle at the origin.
    pub fn rect(&self) -> PixelRect {
        PixelRect::from_size(self.width as i32, self.height as i32)
    }

    /// Return `true` for a raster with no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw premultiplied bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Storage cost used for cache accounting.
    pub fn cost_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * BYTES_PER_PIXEL
    }

    /// Pixel at `(x, y)`, or transparent outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        if x >= self.width || y >= self.height {
            return Rgba8Premul::transparent();
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL;
        let p = &self.pixels[idx..idx + BYTES_PER_PIXEL];
        Rgba8Premul {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        }
    }

    /// One row of pixels as bytes.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = (self.width as usize) * BYTES_PER_PIXEL;
        let start = (y as usize) * stride;
        &self.pixels[start..start + stride]
    }

    /// Copy a sub-rectangle into a new raster.
    ///
    /// The rectangle must lie entirely inside this raster.
    pub fn sub_image(&self, rect: PixelRect) -> SheenResult<Self> {
        if rect.width < 0 || rect.height < 0 || rect.x < 0 || rect.y < 0 {
            return Err(SheenError::geometry(format!(
                "sub-image {rect:?} has negative geometry"
            )));
        }
        if rect.right() > self.width as i32 || rect.bottom() > self.height as i32 {
            return Err(SheenError::geometry(format!(
                "sub-image {rect:?} exceeds {}x{} source",
                self.width, self.height
            )));
        }
        let (w, h) = (rect.width as usize, rect.height as usize);
        let mut out = Vec::with_capacity(w * h * BYTES_PER_PIXEL);
        for y in 0..h {
            let row = self.row(rect.y as u32 + y as u32);
            let start = (rect.x as usize) * BYTES_PER_PIXEL;
            out.extend_from_slice(&row[start..start + w * BYTES_PER_PIXEL]);
        }
        Ok(Self {
            width: rect.width as u32,
            height: rect.height as u32,
            pixels: Arc::from(out),
        })
    }

    /// Swap axes, so a `w x h` raster becomes `h x w`.
    pub fn transposed(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut out = vec![0u8; w * h * BYTES_PER_PIXEL];
        for y in 0..h {
            for x in 0..w {
                let src = (y * w + x) * BYTES_PER_PIXEL;
                let dst = (x * h + y) * BYTES_PER_PIXEL;
                out[dst..dst + BYTES_PER_PIXEL]
                    .copy_from_slice(&self.pixels[src..src + BYTES_PER_PIXEL]);
            }
        }
        Self {
            width: self.height,
            height: self.width,
            pixels: Arc::from(out),
        }
    }

    /// Mirror the raster horizontally, vertically, or both.
    pub fn mirrored(&self, horizontal: bool, vertical: bool) -> Self {
        if !horizontal && !vertical {
            return self.clone();
        }
        let (w, h) = (self.width as usize, self.height as usize);
        let mut out = vec![0u8; w * h * BYTES_PER_PIXEL];
        for y in 0..h {
            let sy = if vertical { h - 1 - y } else { y };
            for x in 0..w {
                let sx = if horizontal { w - 1 - x } else { x };
                let src = (sy * w + sx) * BYTES_PER_PIXEL;
                let dst = (y * w + x) * BYTES_PER_PIXEL;
                out[dst..dst + BYTES_PER_PIXEL]
                    .copy_from_slice(&self.pixels[src..src + BYTES_PER_PIXEL]);
            }
        }
        Self::from_raw_parts(self.width, self.height, out)
    }

    /// Stable 128-bit content digest over dimensions and pixels.
    pub fn digest(&self) -> u128 {
        let mut h = Xxh3::with_seed(DIGEST_SEED);
        h.update(&self.width.to_le_bytes());
        h.update(&self.height.to_le_bytes());
        h.update(&self.pixels);
        h.digest128()
    }

    /// Return `true` when both values share the same pixel storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/image.rs"]
mod tests;
