use crate::foundation::core::Rgba8;
use crate::foundation::error::{SheenError, SheenResult};
use crate::raster::image::{BYTES_PER_PIXEL, RasterImage};
use crate::shade::color::rgba8_serde;
use crate::shade::shading::mix;
use crate::tiles::tileset::TileSet;

/// Space reserved around a window for its shadow even when shadows are off.
pub const MIN_SHADOW_SIZE: i32 = 5;
/// Largest configurable shadow size.
pub const MAX_SHADOW_SIZE: i32 = 64;
/// Largest configurable vertical offset.
pub const MAX_SHADOW_OFFSET: i32 = 16;

/// Which window activation state a shadow configuration belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShadowRole {
    /// Focused window.
    Active,
    /// Unfocused window.
    Inactive,
}

/// One of the four cached shadow flavours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShadowState {
    /// Window has focus.
    pub active: bool,
    /// Window is rolled up to its title bar.
    pub shaded: bool,
}

impl ShadowState {
    /// All four states, in slot order.
    pub const ALL: [Self; 4] = [
        Self::new(true, false),
        Self::new(true, true),
        Self::new(false, false),
        Self::new(false, true),
    ];

    /// Build a state.
    pub const fn new(active: bool, shaded: bool) -> Self {
        Self { active, shaded }
    }

    /// The configuration role this state reads from.
    pub fn role(self) -> ShadowRole {
        if self.active {
            ShadowRole::Active
        } else {
            ShadowRole::Inactive
        }
    }

    fn slot(self) -> usize {
        usize::from(!self.active) * 2 + usize::from(self.shaded)
    }
}

/// Look of one window shadow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Draw the shadow at all.
    pub enabled: bool,
    /// Distance the shadow reaches past the window edge, `0..=64`.
    pub size: i32,
    /// Downward shift of the shadow, `0..=16`; ignored for shaded windows.
    pub vertical_offset: i32,
    /// Color next to the window edge.
    #[serde(with = "rgba8_serde")]
    pub inner_color: Rgba8,
    /// Color at the shadow's outer reach.
    #[serde(with = "rgba8_serde")]
    pub outer_color: Rgba8,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 12,
            vertical_offset: 3,
            inner_color: Rgba8::new(0, 0, 0, 160),
            outer_color: Rgba8::new(0, 0, 0, 48),
        }
    }
}

impl ShadowConfig {
    /// Range-check the numeric fields.
    pub fn validate(&self) -> SheenResult<()> {
        if !(0..=MAX_SHADOW_SIZE).contains(&self.size) {
            return Err(SheenError::validation(format!(
                "shadow size {} outside 0..={MAX_SHADOW_SIZE}",
                self.size
            )));
        }
        if !(0..=MAX_SHADOW_OFFSET).contains(&self.vertical_offset) {
            return Err(SheenError::validation(format!(
                "shadow vertical_offset {} outside 0..={MAX_SHADOW_OFFSET}",
                self.vertical_offset
            )));
        }
        Ok(())
    }

    fn visible_size(&self) -> i32 {
        if self.enabled {
            self.size.clamp(0, MAX_SHADOW_SIZE)
        } else {
            0
        }
    }
}

/// Lazily built shadow tile sets for the four [`ShadowState`]s.
///
/// Changing one role's configuration drops only that role's two entries.
#[derive(Debug)]
pub struct ShadowCache {
    configs: [ShadowConfig; 2],
    entries: [Option<TileSet>; 4],
}

impl ShadowCache {
    /// Empty cache with the given configurations.
    pub fn new(active: ShadowConfig, inactive: ShadowConfig) -> Self {
        Self {
            configs: [active, inactive],
            entries: Default::default(),
        }
    }

    /// Configuration for a role.
    pub fn configuration(&self, role: ShadowRole) -> &ShadowConfig {
        &self.configs[role_slot(role)]
    }

    /// Replace a role's configuration. Returns `true` if it changed.
    pub fn set_configuration(&mut self, role: ShadowRole, config: ShadowConfig) -> bool {
        let slot = role_slot(role);
        if self.configs[slot] == config {
            return false;
        }
        self.configs[slot] = config;
        for state in ShadowState::ALL.into_iter().filter(|s| s.role() == role) {
            self.entries[state.slot()] = None;
        }
        tracing::debug!(?role, "shadow configuration changed");
        true
    }

    /// Shadow tiles for `state`, built on first use.
    ///
    /// A disabled or zero-size shadow yields a set with no slices, which renders nothing.
    pub fn get(&mut self, state: ShadowState) -> TileSet {
        let slot = state.slot();
        if let Some(ts) = &self.entries[slot] {
            return ts.clone();
        }
        let ts = build_shadow(self.configuration(state.role()), state.shaded);
        self.entries[slot] = Some(ts.clone());
        ts
    }

    /// Return `true` when `state` has a cached tile set.
    pub fn is_computed(&self, state: ShadowState) -> bool {
        self.entries[state.slot()].is_some()
    }

    /// Margin to reserve around every window: the larger configured size, at least
    /// [`MIN_SHADOW_SIZE`].
    pub fn shadow_size(&self) -> i32 {
        self.configs
            .iter()
            .map(ShadowConfig::visible_size)
            .max()
            .unwrap_or(0)
            .max(MIN_SHADOW_SIZE)
    }

    /// Drop all four entries.
    pub fn invalidate_all(&mut self) {
        self.entries = Default::default();
        tracing::debug!("shadow cache invalidated");
    }
}

fn role_slot(role: ShadowRole) -> usize {
    match role {
        ShadowRole::Active => 0,
        ShadowRole::Inactive => 1,
    }
}

/// Extent of the tile set built for `config`.
pub(crate) fn shadow_extent(config: &ShadowConfig) -> i32 {
    config.visible_size().max(MIN_SHADOW_SIZE)
}

/// Render the shadow around a one-pixel window and slice it.
///
/// The source is `2e + 1` pixels square; the window is its center pixel, pushed down by the
/// vertical offset unless the window is shaded. Intensity falls off quadratically with distance.
fn build_shadow(config: &ShadowConfig, shaded: bool) -> TileSet {
    let size = config.visible_size();
    if size == 0 {
        return TileSet::from_single(RasterImage::empty());
    }
    let e = shadow_extent(config);
    let n = 2 * e + 1;
    let offset = if shaded {
        0
    } else {
        config.vertical_offset.clamp(0, MAX_SHADOW_OFFSET).min(e)
    };
    let (cx, cy) = (e as f32, (e + offset) as f32);

    let mut px = Vec::with_capacity((n * n) as usize * BYTES_PER_PIXEL);
    for y in 0..n {
        for x in 0..n {
            let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            let t = d / size as f32;
            let c = if t >= 1.0 {
                Rgba8::TRANSPARENT
            } else {
                let c = mix(config.inner_color, config.outer_color, t);
                let falloff = (1.0 - t) * (1.0 - t);
                c.with_alpha((f32::from(c.a) * falloff).round() as u8)
            };
            px.extend_from_slice(&c.to_premul().to_array());
        }
    }
    let source = RasterImage::from_raw_parts(n as u32, n as u32, px);
    match TileSet::from_uniform_grid(&source, e, e, 1, 1) {
        Ok(ts) => ts,
        Err(err) => {
            tracing::debug!(%err, "shadow slicing failed");
            TileSet::from_single(RasterImage::empty())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/shadow.rs"]
mod tests;
