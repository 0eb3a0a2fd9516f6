use std::sync::Arc;

use kurbo::Shape;

use crate::foundation::core::{BezPath, PixelRect, Rgba8Premul};
use crate::raster::composite::{over, over_row};
use crate::raster::image::{BYTES_PER_PIXEL, RasterImage};
use crate::raster::painter::{Brush, Painter};

/// Anti-aliased path coverage over a pixel window, row-major.
#[derive(Clone, Debug)]
struct Coverage {
    area: PixelRect,
    alpha: Vec<u8>,
}

impl Coverage {
    fn index(&self, x: i32, y: i32) -> usize {
        ((y - self.area.y) as usize) * (self.area.width as usize) + (x - self.area.x) as usize
    }

    fn at(&self, x: i32, y: i32) -> u8 {
        if self.area.contains(x, y) {
            self.alpha[self.index(x, y)]
        } else {
            0
        }
    }

    /// `len` factors starting at `(x, y)`; the run must lie inside the window.
    fn run(&self, x: i32, y: i32, len: usize) -> &[u8] {
        let i = self.index(x, y);
        &self.alpha[i..i + len]
    }
}

#[derive(Clone, Debug)]
struct ClipState {
    rect: PixelRect,
    /// Path clip coverage; its window always contains `rect`.
    mask: Option<Arc<Coverage>>,
}

/// CPU drawing context over an owned premultiplied RGBA8 buffer.
///
/// Path coverage is rasterized by `vello_cpu` into scratch buffers sized to the path's bounds;
/// compositing onto the canvas is premultiplied source-over.
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    clip: ClipState,
    saved: Vec<ClipState>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clip", &self.clip)
            .field("saved", &self.saved.len())
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Transparent surface of the given size. Each side is capped at `u16::MAX`.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.min(u32::from(u16::MAX));
        let height = height.min(u32::from(u16::MAX));
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * BYTES_PER_PIXEL],
            clip: ClipState {
                rect: PixelRect::from_size(width as i32, height as i32),
                mask: None,
            },
            saved: Vec::new(),
            ctx: None,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Overwrite every pixel, ignoring the clip.
    pub fn clear(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            d.copy_from_slice(&px);
        }
    }

    /// Pixel at `(x, y)`, or transparent outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        if x >= self.width || y >= self.height {
            return Rgba8Premul::transparent();
        }
        let i = self.index(x as i32, y as i32);
        Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    /// Freeze the pixels into an immutable raster.
    pub fn into_image(self) -> RasterImage {
        RasterImage::from_raw_parts(self.width, self.height, self.data)
    }

    fn index(&self, x: i32, y: i32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL
    }

    fn bounds(&self) -> PixelRect {
        PixelRect::from_size(self.width as i32, self.height as i32)
    }

    fn drawable(&self, rect: PixelRect) -> PixelRect {
        rect.intersect(self.clip.rect).intersect(self.bounds())
    }

    fn mask_at(&self, x: i32, y: i32) -> u8 {
        match &self.clip.mask {
            Some(m) => m.at(x, y),
            None => 255,
        }
    }

    fn put(&mut self, x: i32, y: i32, src: Rgba8Premul, coverage: u8) {
        let cov = scale_coverage(coverage, self.mask_at(x, y));
        let i = self.index(x, y);
        let dst = [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ];
        let out = over(dst, src.to_array(), cov);
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&out);
    }

    /// Rasterize `path` (nonzero winding) over `area`, which lies inside the surface.
    fn rasterize(&mut self, path: &BezPath, area: PixelRect) -> Coverage {
        let empty = Coverage {
            area: PixelRect::default(),
            alpha: Vec::new(),
        };
        let (Ok(w), Ok(h)) = (u16::try_from(area.width), u16::try_from(area.height)) else {
            return empty;
        };
        if w == 0 || h == 0 {
            return empty;
        }

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            -f64::from(area.x),
            -f64::from(area.y),
        )));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        let alpha = pixmap
            .data_as_u8_slice()
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| px[3])
            .collect();
        Coverage { area, alpha }
    }
}

fn scale_coverage(a: u8, b: u8) -> u8 {
    crate::foundation::math::mul_div255_u8(u16::from(a), u16::from(b))
}

fn path_area(path: &BezPath) -> PixelRect {
    let bb = path.bounding_box();
    if !bb.is_finite() || bb.is_zero_area() {
        return PixelRect::default();
    }
    let x0 = bb.x0.floor().max(f64::from(i32::MIN)) as i32;
    let y0 = bb.y0.floor().max(f64::from(i32::MIN)) as i32;
    let x1 = bb.x1.ceil().min(f64::from(i32::MAX)) as i32;
    let y1 = bb.y1.ceil().min(f64::from(i32::MAX)) as i32;
    PixelRect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

impl Painter for Surface {
    fn fill_rect(&mut self, rect: PixelRect, brush: &Brush) {
        let area = self.drawable(rect);
        if area.is_empty() {
            return;
        }
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let src = brush.sample(x, y);
                self.put(x, y, src, 255);
            }
        }
    }

    fn fill_path(&mut self, path: &BezPath, brush: &Brush) {
        let area = self.drawable(path_area(path));
        if area.is_empty() {
            return;
        }
        let coverage = self.rasterize(path, area);
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let cov = coverage.at(x, y);
                if cov == 0 {
                    continue;
                }
                let src = brush.sample(x, y);
                self.put(x, y, src, cov);
            }
        }
    }

    fn blit(&mut self, image: &RasterImage, src: PixelRect, dst_x: i32, dst_y: i32) {
        let clipped_src = src.intersect(image.rect());
        if clipped_src.is_empty() {
            return;
        }
        let dst = PixelRect::new(
            dst_x.saturating_add(clipped_src.x - src.x),
            dst_y.saturating_add(clipped_src.y - src.y),
            clipped_src.width,
            clipped_src.height,
        );
        let area = self.drawable(dst);
        if area.is_empty() {
            return;
        }
        let sx0 = clipped_src.x + (area.x - dst.x);
        let sy0 = clipped_src.y + (area.y - dst.y);
        let w = area.width as usize;
        let mask = self.clip.mask.clone();
        for row in 0..area.height {
            let src_row = image.row((sy0 + row) as u32);
            let s0 = (sx0 as usize) * BYTES_PER_PIXEL;
            let src_px = &src_row[s0..s0 + w * BYTES_PER_PIXEL];
            let y = area.y + row;
            let d0 = self.index(area.x, y);
            let cov = mask.as_ref().map(|m| m.run(area.x, y, w));
            over_row(&mut self.data[d0..d0 + w * BYTES_PER_PIXEL], src_px, cov);
        }
    }

    fn clip_rect(&mut self, rect: PixelRect) {
        self.clip.rect = self.clip.rect.intersect(rect);
    }

    fn clip_path(&mut self, path: &BezPath) {
        let area = self.drawable(path_area(path));
        let mut coverage = self.rasterize(path, area);
        if let Some(prev) = &self.clip.mask {
            for y in area.y..area.bottom() {
                for x in area.x..area.right() {
                    let i = coverage.index(x, y);
                    coverage.alpha[i] = scale_coverage(coverage.alpha[i], prev.at(x, y));
                }
            }
        }
        self.clip.rect = coverage.area;
        self.clip.mask = Some(Arc::new(coverage));
    }

    fn save(&mut self) {
        self.saved.push(self.clip.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.clip = state;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
