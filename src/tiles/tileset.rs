use std::borrow::Cow;
use std::ops::{BitOr, BitOrAssign, Sub};
use std::sync::Arc;

use crate::foundation::core::PixelRect;
use crate::foundation::error::{SheenError, SheenResult};
use crate::foundation::math::shrink_pair;
use crate::raster::image::RasterImage;
use crate::raster::painter::{Extend, Painter};

/// Subset of the stretchable tile positions to draw.
///
/// Corners are implied: a corner is drawn exactly when both of its adjacent edges are selected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileSelection(u8);

impl TileSelection {
    /// Nothing.
    pub const NONE: Self = Self(0);
    /// Top edge.
    pub const TOP: Self = Self(1 << 0);
    /// Left edge.
    pub const LEFT: Self = Self(1 << 1);
    /// Right edge.
    pub const RIGHT: Self = Self(1 << 2);
    /// Bottom edge.
    pub const BOTTOM: Self = Self(1 << 3);
    /// Center.
    pub const CENTER: Self = Self(1 << 4);

    /// All four edges, no center.
    pub const RING: Self = Self(Self::TOP.0 | Self::LEFT.0 | Self::RIGHT.0 | Self::BOTTOM.0);
    /// Left, right and center.
    pub const HORIZONTAL: Self = Self(Self::LEFT.0 | Self::RIGHT.0 | Self::CENTER.0);
    /// Top, bottom and center.
    pub const VERTICAL: Self = Self(Self::TOP.0 | Self::BOTTOM.0 | Self::CENTER.0);
    /// Everything.
    pub const FULL: Self = Self(Self::RING.0 | Self::CENTER.0);

    /// Return `true` when every position in `other` is selected.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Return `true` when nothing is selected.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for TileSelection {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TileSelection {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Sub for TileSelection {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl std::fmt::Debug for TileSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = [
            (Self::TOP, "Top"),
            (Self::LEFT, "Left"),
            (Self::RIGHT, "Right"),
            (Self::BOTTOM, "Bottom"),
            (Self::CENTER, "Center"),
        ];
        let mut set = f.debug_set();
        for (bit, name) in names {
            if self.contains(bit) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

/// The nine slots of a tile set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TilePosition {
    /// Fixed top-left corner.
    TopLeft,
    /// Top edge, tiled horizontally.
    Top,
    /// Fixed top-right corner.
    TopRight,
    /// Left edge, tiled vertically.
    Left,
    /// Center, tiled both ways.
    Center,
    /// Right edge, tiled vertically.
    Right,
    /// Fixed bottom-left corner.
    BottomLeft,
    /// Bottom edge, tiled horizontally.
    Bottom,
    /// Fixed bottom-right corner.
    BottomRight,
}

impl TilePosition {
    /// Every position, row-major.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Center,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Natural slice extents of a tile set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileExtents {
    /// Width of the left column.
    pub left: i32,
    /// Height of the top row.
    pub top: i32,
    /// Width of the right column.
    pub right: i32,
    /// Height of the bottom row.
    pub bottom: i32,
}

#[derive(Debug)]
struct TileSetInner {
    slices: [Option<RasterImage>; 9],
    extents: TileExtents,
    extend: Extend,
}

/// Nine-slice compositor: fixed corners, edges tiled along one axis, center tiled along both.
///
/// Immutable and cheap to clone; clones share their slices.
#[derive(Clone, Debug)]
pub struct TileSet {
    inner: Arc<TileSetInner>,
}

impl TileSet {
    /// Slice `source` on a regular grid.
    ///
    /// `left_w`/`top_h` are the first column/row, `mid_w`/`mid_h` the stretchable middle; the right
    /// column and bottom row take whatever remains of the source. Fails when the grid does not fit
    /// the source, or when the middle is empty on an axis along which the source has pixels.
    pub fn from_uniform_grid(
        source: &RasterImage,
        left_w: i32,
        top_h: i32,
        mid_w: i32,
        mid_h: i32,
    ) -> SheenResult<Self> {
        let (sw, sh) = (source.width() as i32, source.height() as i32);
        if left_w < 0 || top_h < 0 || mid_w < 0 || mid_h < 0 {
            return Err(SheenError::geometry("tile extents must be non-negative"));
        }
        if !fits(left_w, mid_w, sw) || !fits(top_h, mid_h, sh) {
            return Err(SheenError::geometry(format!(
                "grid {left_w}+{mid_w} x {top_h}+{mid_h} exceeds {sw}x{sh} source"
            )));
        }
        let extents = TileExtents {
            left: left_w,
            top: top_h,
            right: sw - left_w - mid_w,
            bottom: sh - top_h - mid_h,
        };
        let middle = PixelRect::new(left_w, top_h, mid_w, mid_h);
        Self::slice(source, extents, middle)
    }

    /// Slice `source` with corners cut from its four corners and the edges/center read from the
    /// explicit middle rectangle `(mid_x, mid_y, mid_w, mid_h)`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_explicit_grid(
        source: &RasterImage,
        left_w: i32,
        top_h: i32,
        right_w: i32,
        bottom_h: i32,
        mid_x: i32,
        mid_y: i32,
        mid_w: i32,
        mid_h: i32,
    ) -> SheenResult<Self> {
        let (sw, sh) = (source.width() as i32, source.height() as i32);
        if [left_w, top_h, right_w, bottom_h, mid_w, mid_h]
            .iter()
            .any(|v| *v < 0)
        {
            return Err(SheenError::geometry("tile extents must be non-negative"));
        }
        if !fits(left_w, right_w, sw) || !fits(top_h, bottom_h, sh) {
            return Err(SheenError::geometry(format!(
                "corners {left_w}+{right_w} x {top_h}+{bottom_h} exceed {sw}x{sh} source"
            )));
        }
        let middle = PixelRect::new(mid_x, mid_y, mid_w, mid_h);
        if mid_x < 0 || mid_y < 0 || middle.right() > sw || middle.bottom() > sh {
            return Err(SheenError::geometry(format!(
                "middle {middle:?} lies outside {sw}x{sh} source"
            )));
        }
        let extents = TileExtents {
            left: left_w,
            top: top_h,
            right: right_w,
            bottom: bottom_h,
        };
        Self::slice(source, extents, middle)
    }

    /// A set holding only a center slice: `source` tiled over the whole target.
    pub fn from_single(source: RasterImage) -> Self {
        let mut slices: [Option<RasterImage>; 9] = Default::default();
        if !source.is_empty() {
            slices[TilePosition::Center.index()] = Some(source);
        }
        Self {
            inner: Arc::new(TileSetInner {
                slices,
                extents: TileExtents::default(),
                extend: Extend::Repeat,
            }),
        }
    }

    fn slice(source: &RasterImage, e: TileExtents, mid: PixelRect) -> SheenResult<Self> {
        let (sw, sh) = (source.width() as i32, source.height() as i32);
        // A zero middle would leave the edges and center of every render blank.
        if (mid.width == 0 && sh > 0) || (mid.height == 0 && sw > 0) {
            return Err(SheenError::geometry(format!(
                "middle {}x{} of a {sw}x{sh} source must be non-empty",
                mid.width, mid.height
            )));
        }
        let rx = sw - e.right;
        let by = sh - e.bottom;
        let rects = [
            PixelRect::new(0, 0, e.left, e.top),
            PixelRect::new(mid.x, 0, mid.width, e.top),
            PixelRect::new(rx, 0, e.right, e.top),
            PixelRect::new(0, mid.y, e.left, mid.height),
            mid,
            PixelRect::new(rx, mid.y, e.right, mid.height),
            PixelRect::new(0, by, e.left, e.bottom),
            PixelRect::new(mid.x, by, mid.width, e.bottom),
            PixelRect::new(rx, by, e.right, e.bottom),
        ];
        let mut slices: [Option<RasterImage>; 9] = Default::default();
        for (slot, rect) in slices.iter_mut().zip(rects) {
            if !rect.is_empty() {
                *slot = Some(source.sub_image(rect)?);
            }
        }
        Ok(Self {
            inner: Arc::new(TileSetInner {
                slices,
                extents: e,
                extend: Extend::Repeat,
            }),
        })
    }

    /// Same slices, tiled with a different extension mode.
    pub fn with_extend(&self, extend: Extend) -> Self {
        Self {
            inner: Arc::new(TileSetInner {
                slices: self.inner.slices.clone(),
                extents: self.inner.extents,
                extend,
            }),
        }
    }

    /// Natural slice extents.
    pub fn extents(&self) -> TileExtents {
        self.inner.extents
    }

    /// Extension mode used for edges and center.
    pub fn extend(&self) -> Extend {
        self.inner.extend
    }

    /// The raster for one position, if that slice is non-empty.
    pub fn slice_at(&self, pos: TilePosition) -> Option<&RasterImage> {
        self.inner.slices[pos.index()].as_ref()
    }

    /// Return `true` when at least one slice holds pixels.
    pub fn is_valid(&self) -> bool {
        self.inner.slices.iter().any(Option::is_some)
    }

    /// Sum of slice storage.
    pub fn cost_bytes(&self) -> usize {
        self.inner
            .slices
            .iter()
            .flatten()
            .map(RasterImage::cost_bytes)
            .sum()
    }

    /// Return `true` when both values are the same set (not merely equal slices).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Draw the selected positions into `rect`.
    ///
    /// An unselected edge contributes no extent on its axis, so the remaining slices stretch to
    /// the rectangle's border. When the target is shorter than the two extents on an axis, both
    /// shrink proportionally and each slice is cropped from its outer edge. Empty targets draw
    /// nothing.
    pub fn render(&self, painter: &mut dyn Painter, rect: PixelRect, selection: TileSelection) {
        if rect.is_empty() || selection.is_empty() || !self.is_valid() {
            return;
        }
        // Clamp so every edge derived below stays representable.
        let rect = PixelRect::new(rect.x, rect.y, rect.right() - rect.x, rect.bottom() - rect.y);
        let e = self.inner.extents;
        let pick = |bit: TileSelection, v: i32| if selection.contains(bit) { v } else { 0 };
        let (l, r) = shrink_pair(
            pick(TileSelection::LEFT, e.left),
            pick(TileSelection::RIGHT, e.right),
            rect.width,
        );
        let (t, b) = shrink_pair(
            pick(TileSelection::TOP, e.top),
            pick(TileSelection::BOTTOM, e.bottom),
            rect.height,
        );
        let mid_w = rect.width - l - r;
        let mid_h = rect.height - t - b;
        let (x0, x1, x2) = (rect.x, rect.x + l, rect.right() - r);
        let (y0, y1, y2) = (rect.y, rect.y + t, rect.bottom() - b);

        let top = selection.contains(TileSelection::TOP);
        let left = selection.contains(TileSelection::LEFT);
        let right = selection.contains(TileSelection::RIGHT);
        let bottom = selection.contains(TileSelection::BOTTOM);

        if top && left {
            self.corner(painter, TilePosition::TopLeft, (x0, y0), (l, t), (false, false));
        }
        if top && right {
            self.corner(painter, TilePosition::TopRight, (x2, y0), (r, t), (true, false));
        }
        if bottom && left {
            self.corner(painter, TilePosition::BottomLeft, (x0, y2), (l, b), (false, true));
        }
        if bottom && right {
            self.corner(painter, TilePosition::BottomRight, (x2, y2), (r, b), (true, true));
        }

        if top {
            self.run(painter, TilePosition::Top, PixelRect::new(x1, y0, mid_w, t), false, false);
        }
        if bottom {
            self.run(painter, TilePosition::Bottom, PixelRect::new(x1, y2, mid_w, b), false, true);
        }
        if left {
            self.run(painter, TilePosition::Left, PixelRect::new(x0, y1, l, mid_h), false, false);
        }
        if right {
            self.run(painter, TilePosition::Right, PixelRect::new(x2, y1, r, mid_h), true, false);
        }
        if selection.contains(TileSelection::CENTER) {
            self.run(
                painter,
                TilePosition::Center,
                PixelRect::new(x1, y1, mid_w, mid_h),
                false,
                false,
            );
        }
    }

    /// Blit a corner unscaled; when shrunk, keep the part nearest the outer edges.
    fn corner(
        &self,
        painter: &mut dyn Painter,
        pos: TilePosition,
        at: (i32, i32),
        size: (i32, i32),
        from_far: (bool, bool),
    ) {
        let Some(img) = self.slice_at(pos) else {
            return;
        };
        let (w, h) = size;
        if w <= 0 || h <= 0 {
            return;
        }
        let w = w.min(img.width() as i32);
        let h = h.min(img.height() as i32);
        let sx = if from_far.0 { img.width() as i32 - w } else { 0 };
        let sy = if from_far.1 { img.height() as i32 - h } else { 0 };
        painter.blit(img, PixelRect::new(sx, sy, w, h), at.0, at.1);
    }

    /// Tile an edge or the center across `dst`.
    fn run(
        &self,
        painter: &mut dyn Painter,
        pos: TilePosition,
        dst: PixelRect,
        from_right: bool,
        from_bottom: bool,
    ) {
        if dst.is_empty() {
            return;
        }
        let Some(img) = self.slice_at(pos) else {
            return;
        };
        let Some(unit) = outer_crop(img, dst, from_right, from_bottom) else {
            return;
        };
        painter.blit_tiled(&unit, dst, self.inner.extend);
    }
}

/// Return `true` when `a + b` neither overflows nor exceeds `limit`.
fn fits(a: i32, b: i32, limit: i32) -> bool {
    a.checked_add(b).is_some_and(|sum| sum <= limit)
}

/// Crop a slice that is thicker than its (shrunk) run so the outer-edge pixels survive.
///
/// Tiling already keeps the leading rows/columns, so only right/bottom runs need a copy.
fn outer_crop(
    img: &RasterImage,
    dst: PixelRect,
    from_right: bool,
    from_bottom: bool,
) -> Option<Cow<'_, RasterImage>> {
    let (iw, ih) = (img.width() as i32, img.height() as i32);
    let crop_x = from_right && dst.width < iw;
    let crop_y = from_bottom && dst.height < ih;
    if !crop_x && !crop_y {
        return Some(Cow::Borrowed(img));
    }
    let w = if crop_x { dst.width } else { iw };
    let h = if crop_y { dst.height } else { ih };
    let rect = PixelRect::new(iw - w, ih - h, w, h);
    img.sub_image(rect).ok().map(Cow::Owned)
}

#[cfg(test)]
#[path = "../../tests/unit/tiles/tileset.rs"]
mod tests;
