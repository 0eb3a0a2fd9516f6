//! Sheen draws the chrome of graphical controls (buttons, sliders, tabs, scroll bars, title bars)
//! and window shadows from cached raster tiles.
//!
//! The pieces, leaves first:
//!
//! - [`GradientSynthesizer`] renders gradient rasters from color stops and a pluggable
//!   [`ShadeFn`].
//! - [`TileSet`] slices a small raster into nine tiles and composites them into any rectangle.
//! - [`RenderCache`] memoizes rendered rasters under a bit-packed [`CacheFingerprint`] within a
//!   byte budget, evicting least-recently-used entries.
//! - [`ShadowCache`] keeps the four window shadow tile sets, rebuilt per configuration role.
//! - [`ChromeEngine`] ties them together behind `render_tile` and `render_shadow`, drawing into
//!   any [`Painter`]. [`Surface`] is the bundled CPU painter.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cache;
mod engine;
mod foundation;
mod raster;
mod shade;
mod tiles;

pub use crate::foundation::core::{
    BezPath, Orientation, PixelRect, Point, Rect, Rgba8, Rgba8Premul, RoundedRect,
};
pub use crate::foundation::error::{SheenError, SheenResult};

pub use crate::raster::image::{BYTES_PER_PIXEL, RasterImage};
pub use crate::raster::painter::{Brush, Extend, Painter, tile_spans};
pub use crate::raster::surface::Surface;

pub use crate::shade::color::ColorDef;
pub use crate::shade::gradient::{ColorStop, GradientMode, GradientRequest, GradientSynthesizer};
pub use crate::shade::palette::{ColorGroup, ColorRole, Palette, PaletteSet};
pub use crate::shade::shading::{ShadeFn, ShadingStyle, apply_contrast, mix};

pub use crate::tiles::tileset::{TileExtents, TilePosition, TileSelection, TileSet};

pub use crate::cache::fingerprint::{
    CacheFingerprint, CacheVariant, MAX_FINGERPRINT_KINDS, MAX_FINGERPRINT_SIZE, PackedKey,
};
pub use crate::cache::render_cache::{CacheCost, CacheStats, RenderCache};
pub use crate::cache::shadow::{
    MAX_SHADOW_OFFSET, MAX_SHADOW_SIZE, MIN_SHADOW_SIZE, ShadowCache, ShadowConfig, ShadowRole,
    ShadowState,
};

pub use crate::engine::chrome::{Chrome, ChromeEngine};
pub use crate::engine::config::{
    DEFAULT_CACHE_CAPACITY_BYTES, EngineOpts, MAX_CORNER_RADIUS, ShadowOpts, StyleConfig,
};
pub use crate::engine::widgets::{ColorState, Interaction, WidgetKind};
