use crate::foundation::core::Rgba8;
use crate::shade::shading::{ShadeFn, mix};

/// Window activation group a palette applies to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorGroup {
    /// Focused window.
    #[default]
    Active,
    /// Unfocused window.
    Inactive,
    /// Disabled controls.
    Disabled,
}

impl ColorGroup {
    /// Number of groups.
    pub const COUNT: usize = 3;
    /// Every group, in index order.
    pub const ALL: [Self; Self::COUNT] = [Self::Active, Self::Inactive, Self::Disabled];

    fn index(self) -> usize {
        self as usize
    }
}

/// Semantic slot within a palette.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    /// Window background.
    #[default]
    Window,
    /// Button face.
    Button,
    /// Selection and progress fill.
    Highlight,
    /// Input field and groove background.
    Base,
    /// Foreground text.
    Text,
}

impl ColorRole {
    /// Number of roles.
    pub const COUNT: usize = 5;
    /// Every role, in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Window,
        Self::Button,
        Self::Highlight,
        Self::Base,
        Self::Text,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// One value-type palette: a color per [`ColorRole`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: [Rgba8; ColorRole::COUNT],
}

impl Palette {
    /// Build a palette from its role colors.
    pub fn new(window: Rgba8, button: Rgba8, highlight: Rgba8, base: Rgba8, text: Rgba8) -> Self {
        Self {
            colors: [window, button, highlight, base, text],
        }
    }

    /// Color for a role.
    pub fn color(&self, role: ColorRole) -> Rgba8 {
        self.colors[role.index()]
    }

    fn map(&self, mut f: impl FnMut(ColorRole, Rgba8) -> Rgba8) -> Self {
        let mut colors = self.colors;
        for role in ColorRole::ALL {
            colors[role.index()] = f(role, colors[role.index()]);
        }
        Self { colors }
    }
}

/// Palettes for every [`ColorGroup`], derived once per style change.
///
/// Two groups that end up with the same colors compare equal; nothing is shared by reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteSet {
    groups: [Palette; ColorGroup::COUNT],
}

impl PaletteSet {
    /// Derive inactive and disabled palettes from the active one.
    ///
    /// Inactive colors are shaded slightly towards the window color's lightness; disabled colors
    /// are blended halfway into the window color. `contrast` (`0..=1`) widens both effects.
    pub fn derive(active: Palette, shader: &dyn ShadeFn, contrast: f32) -> Self {
        let contrast = contrast.clamp(0.0, 1.0);
        let window = active.color(ColorRole::Window);

        let inactive_factor = 1.0 - 0.08 * contrast;
        let inactive = active.map(|role, c| match role {
            ColorRole::Window | ColorRole::Base => c,
            _ => shader.shade(c, inactive_factor),
        });

        let disabled_mix = 0.4 + 0.2 * contrast;
        let disabled = active.map(|role, c| match role {
            ColorRole::Window => c,
            _ => mix(c, window, disabled_mix),
        });

        Self {
            groups: [active, inactive, disabled],
        }
    }

    /// Palette for a group.
    pub fn get(&self, group: ColorGroup) -> &Palette {
        &self.groups[group.index()]
    }

    /// Shortcut for `get(group).color(role)`.
    pub fn color(&self, group: ColorGroup, role: ColorRole) -> Rgba8 {
        self.get(group).color(role)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shade/palette.rs"]
mod tests;
