use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::cache::shadow::ShadowConfig;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{SheenError, SheenResult};
use crate::shade::color::rgba8_serde;
use crate::shade::palette::Palette;
use crate::shade::shading::ShadingStyle;

/// Default render cache budget.
pub const DEFAULT_CACHE_CAPACITY_BYTES: usize = 4 * 1024 * 1024;
/// Largest supported corner radius.
pub const MAX_CORNER_RADIUS: i32 = 12;

/// Global look shared by every control.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Window background.
    #[serde(with = "rgba8_serde")]
    pub window: Rgba8,
    /// Button face.
    #[serde(with = "rgba8_serde")]
    pub button: Rgba8,
    /// Selection and progress fill.
    #[serde(with = "rgba8_serde")]
    pub highlight: Rgba8,
    /// Input field and groove background.
    #[serde(with = "rgba8_serde")]
    pub base: Rgba8,
    /// Foreground text.
    #[serde(with = "rgba8_serde")]
    pub text: Rgba8,
    /// Curve used to lighten and darken colors.
    pub shading_style: ShadingStyle,
    /// How strongly gradients and frames deviate from the base color, `0..=1`.
    pub contrast: f32,
    /// Rounding of control corners in pixels, `0..=12`.
    pub corner_radius: i32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            window: Rgba8::opaque(0xef, 0xf0, 0xf1),
            button: Rgba8::opaque(0xe3, 0xe5, 0xe7),
            highlight: Rgba8::opaque(0x3d, 0xae, 0xe9),
            base: Rgba8::opaque(0xfc, 0xfc, 0xfc),
            text: Rgba8::opaque(0x31, 0x36, 0x3b),
            shading_style: ShadingStyle::Luma,
            contrast: 0.5,
            corner_radius: 3,
        }
    }
}

impl StyleConfig {
    /// Range-check the numeric fields.
    pub fn validate(&self) -> SheenResult<()> {
        if !(0.0..=1.0).contains(&self.contrast) {
            return Err(SheenError::validation(format!(
                "contrast {} outside 0..=1",
                self.contrast
            )));
        }
        if !(0..=MAX_CORNER_RADIUS).contains(&self.corner_radius) {
            return Err(SheenError::validation(format!(
                "corner_radius {} outside 0..={MAX_CORNER_RADIUS}",
                self.corner_radius
            )));
        }
        Ok(())
    }

    /// Active palette built from the configured base colors.
    pub fn palette(&self) -> Palette {
        Palette::new(self.window, self.button, self.highlight, self.base, self.text)
    }
}

/// Shadow looks for focused and unfocused windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowOpts {
    /// Focused window shadow.
    pub active: ShadowConfig,
    /// Unfocused window shadow.
    pub inactive: ShadowConfig,
}

impl Default for ShadowOpts {
    fn default() -> Self {
        Self {
            active: ShadowConfig::default(),
            inactive: ShadowConfig {
                size: 8,
                vertical_offset: 2,
                inner_color: Rgba8::new(0, 0, 0, 110),
                ..ShadowConfig::default()
            },
        }
    }
}

/// Engine construction options.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Render cache budget in bytes.
    pub cache_capacity_bytes: usize,
    /// Global look.
    pub style: StyleConfig,
    /// Window shadows.
    pub shadows: ShadowOpts,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            cache_capacity_bytes: DEFAULT_CACHE_CAPACITY_BYTES,
            style: StyleConfig::default(),
            shadows: ShadowOpts::default(),
        }
    }
}

impl EngineOpts {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> SheenResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| SheenError::config(format!("parse engine options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SheenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SheenError::config(format!("open engine options '{}': {e}", path.display()))
        })?;
        let opts: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            SheenError::config(format!("parse engine options '{}': {e}", path.display()))
        })?;
        opts.validate()?;
        Ok(opts)
    }

    /// Range-check every nested section.
    pub fn validate(&self) -> SheenResult<()> {
        self.style.validate()?;
        self.shadows.active.validate()?;
        self.shadows.inactive.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
