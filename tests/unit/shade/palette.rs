use super::*;
use crate::shade::shading::ShadingStyle;

fn sample() -> Palette {
    Palette::new(
        Rgba8::opaque(214, 210, 208),
        Rgba8::opaque(224, 223, 222),
        Rgba8::opaque(67, 172, 232),
        Rgba8::opaque(255, 255, 255),
        Rgba8::opaque(31, 28, 27),
    )
}

#[test]
fn active_group_is_the_input() {
    let set = PaletteSet::derive(sample(), &ShadingStyle::Luma, 0.5);
    assert_eq!(*set.get(ColorGroup::Active), sample());
}

#[test]
fn disabled_moves_towards_window() {
    let set = PaletteSet::derive(sample(), &ShadingStyle::Luma, 0.5);
    let window = set.color(ColorGroup::Active, ColorRole::Window);
    let text = set.color(ColorGroup::Active, ColorRole::Text);
    let disabled_text = set.color(ColorGroup::Disabled, ColorRole::Text);
    assert!(disabled_text.r > text.r && disabled_text.r < window.r);
    assert_eq!(set.color(ColorGroup::Disabled, ColorRole::Window), window);
}

#[test]
fn derivation_is_deterministic_and_value_compared() {
    let a = PaletteSet::derive(sample(), &ShadingStyle::Hsl, 0.3);
    let b = PaletteSet::derive(sample(), &ShadingStyle::Hsl, 0.3);
    assert_eq!(a, b);
    let c = PaletteSet::derive(sample(), &ShadingStyle::Gamma, 0.3);
    assert_ne!(a, c);
}

#[test]
fn zero_contrast_inactive_equals_active_by_value() {
    let set = PaletteSet::derive(sample(), &ShadingStyle::Luma, 0.0);
    assert_eq!(set.get(ColorGroup::Inactive), set.get(ColorGroup::Active));
}
