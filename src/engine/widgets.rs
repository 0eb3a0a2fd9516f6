use smallvec::{SmallVec, smallvec};

use crate::cache::fingerprint::{CacheVariant, MAX_FINGERPRINT_KINDS};
use crate::foundation::core::Rgba8;
use crate::shade::gradient::{ColorStop, GradientMode};
use crate::shade::palette::ColorRole;
use crate::tiles::tileset::TileSelection;

/// Period of the progress bar stripes.
const PROGRESS_PERIOD_PX: u32 = 16;

/// Every kind of chrome the engine can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Push button.
    Button,
    /// Flat toolbar button.
    ToolButton,
    /// Tab bar tab; open at the bottom.
    Tab,
    /// Slider track.
    SliderGroove,
    /// Slider knob.
    SliderHandle,
    /// Scroll bar track.
    ScrollBarGroove,
    /// Scroll bar thumb.
    ScrollBarHandle,
    /// Progress bar fill.
    ProgressBar,
    /// Window title bar; open at the bottom.
    TitleBar,
    /// Group box panel.
    GroupBox,
}

impl WidgetKind {
    /// Number of kinds.
    pub const COUNT: usize = 10;
    /// Every kind, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Button,
        Self::ToolButton,
        Self::Tab,
        Self::SliderGroove,
        Self::SliderHandle,
        Self::ScrollBarGroove,
        Self::ScrollBarHandle,
        Self::ProgressBar,
        Self::TitleBar,
        Self::GroupBox,
    ];

    /// Discriminant stored in cache keys.
    pub fn discriminant(self) -> u8 {
        self as u8
    }

    /// Palette role the kind is painted with.
    pub fn role(self) -> ColorRole {
        match self {
            Self::Button | Self::ToolButton | Self::SliderHandle | Self::ScrollBarHandle => {
                ColorRole::Button
            }
            Self::SliderGroove => ColorRole::Base,
            Self::ProgressBar => ColorRole::Highlight,
            Self::Tab | Self::ScrollBarGroove | Self::TitleBar | Self::GroupBox => {
                ColorRole::Window
            }
        }
    }
}

const _: () = assert!(WidgetKind::COUNT <= MAX_FINGERPRINT_KINDS);

/// Pointer and availability state of a control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// Resting.
    #[default]
    Normal,
    /// Pointer over the control.
    Hovered,
    /// Held down or checked.
    Pressed,
    /// Unavailable.
    Disabled,
}

impl Interaction {
    pub(crate) fn variant(self) -> CacheVariant {
        match self {
            Self::Normal => CacheVariant::Normal,
            Self::Hovered => CacheVariant::Hovered,
            Self::Pressed => CacheVariant::Pressed,
            Self::Disabled => CacheVariant::Disabled,
        }
    }
}

/// Color input of one render call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorState {
    /// Color the gradient and frame are shaded from.
    pub base: Rgba8,
    /// Interaction state.
    pub interaction: Interaction,
}

impl ColorState {
    /// Build a color state.
    pub fn new(base: Rgba8, interaction: Interaction) -> Self {
        Self { base, interaction }
    }
}

/// Outline drawn over the background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FrameSpec {
    pub(crate) selection: TileSelection,
    /// Shade factor of the outer border.
    pub(crate) border_shade: f32,
    /// Shade factor of the inner bevel line, if any.
    pub(crate) light_shade: Option<f32>,
}

/// How one widget kind in one interaction state is drawn.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Recipe {
    pub(crate) stops: SmallVec<[ColorStop; 4]>,
    pub(crate) mode: GradientMode,
    pub(crate) frame: Option<FrameSpec>,
}

fn ring(border_shade: f32, light_shade: Option<f32>) -> Option<FrameSpec> {
    Some(FrameSpec {
        selection: TileSelection::RING,
        border_shade,
        light_shade,
    })
}

fn open_bottom(border_shade: f32, light_shade: Option<f32>) -> Option<FrameSpec> {
    Some(FrameSpec {
        selection: TileSelection::TOP | TileSelection::LEFT | TileSelection::RIGHT,
        border_shade,
        light_shade,
    })
}

pub(crate) fn recipe(kind: WidgetKind, interaction: Interaction) -> Recipe {
    let s = ColorStop::opaque;
    let (stops, mode, frame): (SmallVec<[ColorStop; 4]>, _, _) = match kind {
        WidgetKind::Button => (
            smallvec![s(0.0, 1.10), s(1.0, 0.94)],
            GradientMode::Linear,
            ring(0.70, Some(1.30)),
        ),
        WidgetKind::ToolButton => (
            smallvec![s(0.0, 1.04), s(1.0, 0.97)],
            GradientMode::Linear,
            ring(0.78, None),
        ),
        WidgetKind::Tab => (
            smallvec![s(0.0, 1.12), s(1.0, 1.0)],
            GradientMode::Linear,
            open_bottom(0.72, Some(1.25)),
        ),
        WidgetKind::SliderGroove => (
            smallvec![s(0.0, 0.86), s(1.0, 0.96)],
            GradientMode::Linear,
            ring(0.75, None),
        ),
        WidgetKind::SliderHandle => (
            smallvec![s(0.0, 1.14), s(1.0, 0.92)],
            GradientMode::Linear,
            ring(0.68, Some(1.35)),
        ),
        WidgetKind::ScrollBarGroove => (
            smallvec![s(0.0, 0.94), s(0.5, 0.98), s(1.0, 0.94)],
            GradientMode::Linear,
            None,
        ),
        WidgetKind::ScrollBarHandle => (
            smallvec![s(0.0, 1.06), s(1.0, 0.95)],
            GradientMode::Linear,
            ring(0.74, None),
        ),
        WidgetKind::ProgressBar => (
            smallvec![s(0.0, 1.0), s(0.5, 1.18), s(1.0, 1.0)],
            GradientMode::Reflect {
                period_px: PROGRESS_PERIOD_PX,
            },
            ring(0.80, None),
        ),
        WidgetKind::TitleBar => (
            smallvec![s(0.0, 1.08), s(0.6, 1.0), s(1.0, 0.96)],
            GradientMode::Linear,
            open_bottom(0.75, Some(1.20)),
        ),
        WidgetKind::GroupBox => (
            smallvec![ColorStop::new(0.0, 1.04, 0.6), ColorStop::new(1.0, 1.0, 0.6)],
            GradientMode::Linear,
            ring(0.82, None),
        ),
    };
    let mut recipe = Recipe {
        stops,
        mode,
        frame,
    };
    apply_interaction(&mut recipe, interaction);
    recipe
}

fn apply_interaction(recipe: &mut Recipe, interaction: Interaction) {
    match interaction {
        Interaction::Normal => {}
        Interaction::Hovered => {
            for stop in &mut recipe.stops {
                stop.shade *= 1.05;
            }
        }
        Interaction::Pressed => {
            // Sunken: the gradient runs the other way and sits slightly darker.
            for stop in &mut recipe.stops {
                stop.position = 1.0 - stop.position;
                stop.shade *= 0.95;
            }
            recipe.stops.reverse();
            if let Some(frame) = &mut recipe.frame {
                frame.light_shade = None;
            }
        }
        Interaction::Disabled => {
            for stop in &mut recipe.stops {
                stop.shade = 1.0 + (stop.shade - 1.0) * 0.5;
            }
            if let Some(frame) = &mut recipe.frame {
                frame.border_shade = 1.0 + (frame.border_shade - 1.0) * 0.5;
                frame.light_shade = None;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/widgets.rs"]
mod tests;
