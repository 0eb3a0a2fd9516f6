use super::*;

const MID: Rgba8 = Rgba8::new(120, 90, 60, 200);

fn lum(c: Rgba8) -> f32 {
    let [r, g, b, _] = c.to_f32();
    luma(r, g, b)
}

#[test]
fn factor_one_is_identity_for_every_style() {
    for style in ShadingStyle::ALL {
        assert_eq!(style.shade(MID, 1.0), MID);
    }
}

#[test]
fn lighten_and_darken_move_luma_and_keep_alpha() {
    for style in ShadingStyle::ALL {
        let light = style.shade(MID, 1.4);
        let dark = style.shade(MID, 0.6);
        assert!(lum(light) > lum(MID), "{style:?}");
        assert!(lum(dark) < lum(MID), "{style:?}");
        assert_eq!(light.a, MID.a);
        assert_eq!(dark.a, MID.a);
    }
}

#[test]
fn shading_is_not_a_linear_blend() {
    // A linear blend towards white moves every channel by the same share of its gap.
    let base = Rgba8::opaque(40, 160, 220);
    let light = ShadingStyle::Gamma.shade(base, 2.0);
    let share = |c: u8, l: u8| (f32::from(l) - f32::from(c)) / (255.0 - f32::from(c));
    let r = share(base.r, light.r);
    let b = share(base.b, light.b);
    assert!((r - b).abs() > 0.05);
}

#[test]
fn styles_disagree() {
    let a = ShadingStyle::Luma.shade(MID, 1.5);
    let b = ShadingStyle::Gamma.shade(MID, 1.5);
    let c = ShadingStyle::Hsl.shade(MID, 1.5);
    assert_ne!(a, b);
    assert_ne!(b, c);
}

#[test]
fn degenerate_factors_do_not_panic() {
    for style in ShadingStyle::ALL {
        let _ = style.shade(MID, 0.0);
        let _ = style.shade(MID, -3.0);
        assert_eq!(style.shade(MID, f32::NAN), style.shade(MID, 1.0));
    }
}

#[test]
fn contrast_scales_distance_from_identity() {
    assert!((apply_contrast(1.2, 0.5) - 1.2).abs() < 1e-6);
    assert!((apply_contrast(1.2, 1.0) - 1.3).abs() < 1e-6);
    assert!((apply_contrast(0.8, 0.0) - 0.9).abs() < 1e-6);
    assert_eq!(apply_contrast(1.0, 0.9), 1.0);
}

#[test]
fn mix_endpoints() {
    let a = Rgba8::opaque(0, 0, 0);
    let b = Rgba8::opaque(255, 255, 255);
    assert_eq!(mix(a, b, 0.0), a);
    assert_eq!(mix(a, b, 1.0), b);
    assert_eq!(mix(a, b, 0.5).r, 128);
}
