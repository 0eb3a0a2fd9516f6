use crate::cache::fingerprint::CacheFingerprint;
use crate::cache::render_cache::{CacheCost, RenderCache};
use crate::cache::shadow::{ShadowCache, ShadowConfig, ShadowRole, ShadowState};
use crate::engine::config::{EngineOpts, StyleConfig};
use crate::engine::shapes;
use crate::engine::widgets::{self, ColorState, FrameSpec, Interaction, Recipe, WidgetKind};
use crate::foundation::core::{Orientation, PixelRect, Rect, Rgba8};
use crate::foundation::error::SheenResult;
use crate::raster::image::RasterImage;
use crate::raster::painter::{Brush, Extend, Painter};
use crate::raster::surface::Surface;
use crate::shade::gradient::{ColorStop, GradientMode, GradientRequest, GradientSynthesizer};
use crate::shade::palette::{ColorGroup, PaletteSet};
use crate::shade::shading::{ShadeFn, apply_contrast};
use crate::tiles::tileset::{TileSelection, TileSet};

/// Cross-axis thickness of cached gradient strips; strips are tiled across the rest.
const STRIP_THICKNESS_PX: i32 = 32;
/// Length of the stretchable middle of a frame source.
const FRAME_MID_PX: i32 = 4;
/// Smallest frame corner.
const MIN_FRAME_CORNER_PX: i32 = 3;

/// A cached render: a flat gradient strip or a sliced frame.
#[derive(Clone, Debug)]
pub enum Chrome {
    /// Background gradient as a single-slice set, tiled across the control.
    Strip(TileSet),
    /// Outline, drawn through its tile set.
    Frame(TileSet),
}

impl CacheCost for Chrome {
    fn cost_bytes(&self) -> usize {
        match self {
            Self::Strip(ts) => ts.cost_bytes(),
            Self::Frame(ts) => ts.cost_bytes(),
        }
    }
}

/// Draws widget chrome and window shadows, memoizing the expensive rasters.
///
/// Owns its render cache, shadow cache and derived palettes; there is no shared global state.
/// Not thread-safe: callers painting from several threads must serialize access.
#[derive(Debug)]
pub struct ChromeEngine {
    style: StyleConfig,
    palettes: PaletteSet,
    cache: RenderCache<Chrome>,
    shadows: ShadowCache,
}

impl ChromeEngine {
    /// Build an engine from validated options.
    pub fn new(opts: EngineOpts) -> SheenResult<Self> {
        opts.validate()?;
        Ok(Self {
            palettes: derive_palettes(&opts.style),
            style: opts.style,
            cache: RenderCache::new(opts.cache_capacity_bytes),
            shadows: ShadowCache::new(opts.shadows.active, opts.shadows.inactive),
        })
    }

    /// Current style.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Palettes derived from the current style.
    pub fn palettes(&self) -> &PaletteSet {
        &self.palettes
    }

    /// The render cache, for inspection.
    pub fn cache(&self) -> &RenderCache<Chrome> {
        &self.cache
    }

    /// The shadow cache, for inspection.
    pub fn shadow_cache(&self) -> &ShadowCache {
        &self.shadows
    }

    /// Margin the host must reserve around windows for their shadows.
    pub fn shadow_size(&self) -> i32 {
        self.shadows.shadow_size()
    }

    /// Color state for `kind` taken from the derived palettes.
    ///
    /// Disabled controls read from the disabled group regardless of `group`.
    pub fn color_state(
        &self,
        kind: WidgetKind,
        interaction: Interaction,
        group: ColorGroup,
    ) -> ColorState {
        let group = if interaction == Interaction::Disabled {
            ColorGroup::Disabled
        } else {
            group
        };
        ColorState::new(self.palettes.color(group, kind.role()), interaction)
    }

    /// Replace the style. Everything cached is dropped if it changed.
    ///
    /// Returns whether anything changed.
    pub fn set_style(&mut self, style: StyleConfig) -> SheenResult<bool> {
        style.validate()?;
        if style == self.style {
            return Ok(false);
        }
        self.palettes = derive_palettes(&style);
        self.style = style;
        self.invalidate_all();
        Ok(true)
    }

    /// Replace one role's shadow look; only that role's shadows are rebuilt.
    pub fn set_shadow_config(
        &mut self,
        role: ShadowRole,
        config: ShadowConfig,
    ) -> SheenResult<bool> {
        config.validate()?;
        Ok(self.shadows.set_configuration(role, config))
    }

    /// Change the render cache budget.
    pub fn set_cache_capacity(&mut self, capacity_bytes: usize) {
        self.cache.set_capacity(capacity_bytes);
    }

    /// Drop every cached raster and shadow.
    pub fn invalidate_all(&mut self) {
        self.cache.invalidate_all();
        self.shadows.invalidate_all();
    }

    /// Draw the chrome of one control into `target`.
    ///
    /// Empty targets draw nothing. Targets too large to key are drawn without caching.
    #[tracing::instrument(level = "trace", skip(self, painter))]
    pub fn render_tile(
        &mut self,
        painter: &mut dyn Painter,
        target: PixelRect,
        kind: WidgetKind,
        color: ColorState,
        orientation: Orientation,
    ) {
        if target.is_empty() {
            return;
        }
        let recipe = widgets::recipe(kind, color.interaction);
        let radius = self
            .style
            .corner_radius
            .min(target.width.min(target.height) / 2)
            .max(0);

        if let Some(strip) = self.strip(&recipe, kind, color, target, orientation) {
            painter.save();
            painter.clip_path(&shapes::rounded_rect(
                target.to_kurbo(),
                f64::from(radius),
                false,
            ));
            strip.render(painter, target, TileSelection::FULL);
            painter.restore();
        }

        if let Some(spec) = recipe.frame
            && let Some(frame) = self.frame(&spec, kind, color, radius)
        {
            frame.render(painter, target, spec.selection);
        }
    }

    /// Draw the shadow of a window occupying `target`.
    ///
    /// The shadow is drawn outside `target`, within [`Self::shadow_size`] of it.
    #[tracing::instrument(level = "trace", skip(self, painter))]
    pub fn render_shadow(
        &mut self,
        painter: &mut dyn Painter,
        window_active: bool,
        window_shaded: bool,
        target: PixelRect,
    ) {
        if target.is_empty() {
            return;
        }
        let tiles = self.shadows.get(ShadowState::new(window_active, window_shaded));
        if !tiles.is_valid() {
            return;
        }
        let reach = tiles.extents().left;
        tiles.render(painter, target.grown(reach), TileSelection::RING);
    }

    fn strip(
        &mut self,
        recipe: &Recipe,
        kind: WidgetKind,
        color: ColorState,
        target: PixelRect,
        orientation: Orientation,
    ) -> Option<TileSet> {
        // Linear gradients run across the control, reflected ones along it.
        let axis = match (recipe.mode, orientation) {
            (GradientMode::Linear, Orientation::Horizontal)
            | (GradientMode::Reflect { .. }, Orientation::Vertical) => Orientation::Vertical,
            _ => Orientation::Horizontal,
        };
        let length = match axis {
            Orientation::Horizontal => target.width,
            Orientation::Vertical => target.height,
        };
        let run = match recipe.mode {
            GradientMode::Linear => length,
            GradientMode::Reflect { period_px } => {
                length.min(i32::try_from(period_px).unwrap_or(i32::MAX))
            }
        };

        let extend = match recipe.mode {
            GradientMode::Linear => Extend::Repeat,
            GradientMode::Reflect { .. } => Extend::Reflect,
        };
        let style = self.style;
        let produce = || {
            let stops = contrasted(&recipe.stops, style.contrast);
            let img = GradientSynthesizer::new(&style.shading_style).render(&GradientRequest {
                base: color.base,
                stops: &stops,
                length_px: length,
                thickness_px: STRIP_THICKNESS_PX,
                axis,
                mode: recipe.mode,
            });
            Chrome::Strip(TileSet::from_single(img).with_extend(extend))
        };
        let fp = CacheFingerprint::new(
            color.interaction.variant(),
            kind.discriminant(),
            run,
            0,
            axis.is_horizontal(),
            false,
            color.base.to_u32(),
        );
        match cached(&mut self.cache, fp, produce) {
            Chrome::Strip(ts) if ts.is_valid() => Some(ts),
            _ => None,
        }
    }

    fn frame(
        &mut self,
        spec: &FrameSpec,
        kind: WidgetKind,
        color: ColorState,
        radius: i32,
    ) -> Option<TileSet> {
        let corner = (radius + 1).max(MIN_FRAME_CORNER_PX);
        let style = self.style;
        let produce = || {
            let shading = &style.shading_style;
            let shade = |f: f32| shading.shade(color.base, apply_contrast(f, style.contrast));
            let border = shade(spec.border_shade);
            let light = spec.light_shade.map(|f| shade(f).with_alpha(140));
            match frame_tiles(corner, radius, border, light) {
                Ok(ts) => Chrome::Frame(ts),
                Err(err) => {
                    tracing::debug!(%err, "frame slicing failed");
                    Chrome::Frame(TileSet::from_single(RasterImage::empty()))
                }
            }
        };
        // Frames do not depend on orientation.
        let fp = CacheFingerprint::new(
            color.interaction.variant(),
            kind.discriminant(),
            corner,
            radius,
            true,
            true,
            color.base.to_u32(),
        );
        match cached(&mut self.cache, fp, produce) {
            Chrome::Frame(ts) if ts.is_valid() => Some(ts),
            _ => None,
        }
    }
}

fn derive_palettes(style: &StyleConfig) -> PaletteSet {
    PaletteSet::derive(style.palette(), &style.shading_style, style.contrast)
}

fn contrasted(stops: &[ColorStop], contrast: f32) -> Vec<ColorStop> {
    stops
        .iter()
        .map(|s| ColorStop {
            shade: apply_contrast(s.shade, contrast),
            ..*s
        })
        .collect()
}

/// Serve `fp` from the cache, or render it; uncacheable fingerprints are rendered every time.
fn cached(
    cache: &mut RenderCache<Chrome>,
    fp: SheenResult<CacheFingerprint>,
    produce: impl FnOnce() -> Chrome,
) -> Chrome {
    match fp {
        Ok(fp) => cache.lookup_or_insert_with(fp, produce),
        Err(err) => {
            tracing::trace!(%err, "rendering uncached");
            produce()
        }
    }
}

/// Rasterize a rounded outline and slice it into a ring of tiles.
fn frame_tiles(
    corner: i32,
    radius: i32,
    border: Rgba8,
    light: Option<Rgba8>,
) -> SheenResult<TileSet> {
    let side = 2 * corner + FRAME_MID_PX;
    let mut surface = Surface::new(side as u32, side as u32);
    let outer = Rect::new(0.0, 0.0, f64::from(side), f64::from(side));
    let r = f64::from(radius);
    surface.fill_path(&shapes::ring(outer, r, 1.0), &Brush::Solid(border.to_premul()));
    if let Some(light) = light {
        let inner = Rect::new(1.0, 1.0, f64::from(side - 1), f64::from(side - 1));
        surface.fill_path(
            &shapes::ring(inner, (r - 1.0).max(0.0), 1.0),
            &Brush::Solid(light.to_premul()),
        );
    }
    TileSet::from_uniform_grid(&surface.into_image(), corner, corner, FRAME_MID_PX, FRAME_MID_PX)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/chrome.rs"]
mod tests;
