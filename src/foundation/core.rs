pub use kurbo::{BezPath, Point, Rect, RoundedRect};

/// Integer pixel rectangle in device space.
///
/// Width and height are signed so callers can hand in degenerate geometry; anything with a
/// non-positive extent is treated as empty and draws nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl PixelRect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Return `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Exclusive right edge.
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Number of covered pixels, zero for empty rectangles.
    pub fn area(self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        (self.width as u64) * (self.height as u64)
    }

    /// Intersection of two rectangles; empty inputs yield an empty result.
    pub fn intersect(self, other: Self) -> Self {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Self::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }

    /// Move each edge outwards by the given amounts (negative values shrink).
    pub fn adjusted(self, left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(
            self.x - left,
            self.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }

    /// Grow every edge outwards by `n` pixels.
    pub fn grown(self, n: i32) -> Self {
        self.adjusted(n, n, n, n)
    }

    /// Return `true` when the pixel at `(px, py)` lies inside.
    pub fn contains(self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Convert to a floating-point kurbo rectangle.
    pub fn to_kurbo(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

/// Layout direction of a control.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Long axis runs left to right.
    #[default]
    Horizontal,
    /// Long axis runs top to bottom.
    Vertical,
}

impl Orientation {
    /// Return `true` for [`Orientation::Horizontal`].
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a color from channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Unpack `0xRRGGBBAA`.
    pub const fn from_u32(v: u32) -> Self {
        Self::new((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Pack as `0xRRGGBBAA`.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Channels as normalized floats `[r, g, b, a]`.
    pub fn to_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }

    /// Build from normalized floats, clamping and rounding each channel.
    pub fn from_f32(c: [f32; 4]) -> Self {
        fn to_u8(x: f32) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self::new(to_u8(c[0]), to_u8(c[1]), to_u8(c[2]), to_u8(c[3]))
    }

    /// Convert to premultiplied form.
    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self::default()
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Convert back to straight alpha.
    pub fn to_straight(self) -> Rgba8 {
        if self.a == 0 {
            return Rgba8::TRANSPARENT;
        }
        let a = u16::from(self.a);
        let un = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
        Rgba8::new(un(self.r), un(self.g), un(self.b), self.a)
    }

    /// Channels as a byte array in memory order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
