use super::*;
use crate::tiles::tileset::TilePosition;

fn cfg(size: i32) -> ShadowConfig {
    ShadowConfig {
        size,
        ..ShadowConfig::default()
    }
}

#[test]
fn entries_are_computed_on_first_get() {
    let mut c = ShadowCache::new(cfg(8), cfg(6));
    let s = ShadowState::new(true, false);
    assert!(!c.is_computed(s));
    let a = c.get(s);
    assert!(c.is_computed(s));
    assert!(c.get(s).ptr_eq(&a));
}

#[test]
fn changing_one_role_keeps_the_other_roles_tiles() {
    let mut c = ShadowCache::new(cfg(8), cfg(6));
    let active = [ShadowState::new(true, false), ShadowState::new(true, true)];
    let inactive = [ShadowState::new(false, false), ShadowState::new(false, true)];
    let before: Vec<_> = ShadowState::ALL.iter().map(|s| c.get(*s)).collect();

    assert!(c.set_configuration(ShadowRole::Inactive, cfg(20)));
    for s in inactive {
        assert!(!c.is_computed(s));
    }
    for (i, s) in active.into_iter().enumerate() {
        assert!(c.is_computed(s));
        assert!(c.get(s).ptr_eq(&before[i]));
    }
}

#[test]
fn unchanged_configuration_is_a_no_op() {
    let mut c = ShadowCache::new(cfg(8), cfg(6));
    let s = ShadowState::new(false, true);
    let ts = c.get(s);
    assert!(!c.set_configuration(ShadowRole::Inactive, cfg(6)));
    assert!(c.get(s).ptr_eq(&ts));
}

#[test]
fn shadow_size_has_a_floor() {
    let c = ShadowCache::new(cfg(8), cfg(20));
    assert_eq!(c.shadow_size(), 20);
    let off = ShadowConfig {
        enabled: false,
        ..cfg(30)
    };
    let c = ShadowCache::new(off, cfg(2));
    assert_eq!(c.shadow_size(), MIN_SHADOW_SIZE);
}

#[test]
fn disabled_shadow_renders_nothing() {
    let off = ShadowConfig {
        enabled: false,
        ..cfg(10)
    };
    let mut c = ShadowCache::new(off, off);
    assert!(!c.get(ShadowState::new(true, false)).is_valid());
}

#[test]
fn tiles_fade_outwards_and_use_the_config_extent() {
    let mut c = ShadowCache::new(cfg(10), cfg(10));
    let ts = c.get(ShadowState::new(true, true));
    let e = ts.extents();
    assert_eq!((e.left, e.top, e.right, e.bottom), (10, 10, 10, 10));
    let left = ts.slice_at(TilePosition::Left).unwrap();
    assert_eq!((left.width(), left.height()), (10, 1));
    // Column 9 touches the window, column 0 is the outer reach.
    assert!(left.pixel(9, 0).a > left.pixel(5, 0).a);
    assert!(left.pixel(5, 0).a > left.pixel(0, 0).a);
}

#[test]
fn vertical_offset_applies_only_to_unshaded_windows() {
    let mut c = ShadowCache::new(cfg(10), cfg(10));
    let open = c.get(ShadowState::new(true, false));
    let shaded = c.get(ShadowState::new(true, true));
    let top_open = open.slice_at(TilePosition::Top).unwrap();
    let top_shaded = shaded.slice_at(TilePosition::Top).unwrap();
    assert!(top_open.pixel(0, 9).a < top_shaded.pixel(0, 9).a);
}

#[test]
fn validate_rejects_out_of_range_values() {
    assert!(cfg(12).validate().is_ok());
    assert!(cfg(65).validate().is_err());
    let bad = ShadowConfig {
        vertical_offset: -1,
        ..cfg(4)
    };
    assert!(bad.validate().is_err());
}

#[test]
fn config_reads_from_json() {
    let c: ShadowConfig =
        serde_json::from_str(r##"{ "size": 9, "inner_color": "#102030ff" }"##).unwrap();
    assert_eq!(c.size, 9);
    assert_eq!(c.inner_color, Rgba8::new(0x10, 0x20, 0x30, 0xff));
    assert!(c.enabled);
}
