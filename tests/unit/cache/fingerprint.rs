use std::collections::HashSet;

use super::*;

fn fp(kind: u8, size_a: i32, size_b: i32, horizontal: bool) -> CacheFingerprint {
    CacheFingerprint::new(
        CacheVariant::Normal,
        kind,
        size_a,
        size_b,
        horizontal,
        false,
        0xFF00_00FF,
    )
    .unwrap()
}

#[test]
fn field_layout_matches_documented_offsets() {
    assert_eq!(KIND_SHIFT, 2);
    assert_eq!(SIZE_A_SHIFT, 7);
    assert_eq!(SIZE_B_SHIFT, 22);
    assert_eq!(HORIZONTAL_SHIFT, 37);
    assert_eq!(PIXMAP_SHIFT, 38);
    assert_eq!(COLOR_SHIFT, 39);
    assert_eq!(KEY_BITS, 71);
}

#[test]
fn kinds_one_and_two_encode_differently() {
    assert_ne!(fp(1, 10, 0, true).key(), fp(2, 10, 0, true).key());
}

#[test]
fn decode_recovers_every_field() {
    let f = CacheFingerprint::new(
        CacheVariant::Pressed,
        31,
        MAX_FINGERPRINT_SIZE,
        1,
        true,
        true,
        0xDEAD_BEEF,
    )
    .unwrap();
    assert_eq!(f.key().decode(), f);
}

#[test]
fn boundary_values_do_not_alias() {
    let sizes = [0, 1, MAX_FINGERPRINT_SIZE - 1, MAX_FINGERPRINT_SIZE];
    let colors = [0, 1, 0x8000_0000, u32::MAX];
    let mut seen = HashSet::new();
    let mut count = 0;
    for variant in CacheVariant::ALL {
        for kind in [0u8, 1, 30, 31] {
            for &a in &sizes {
                for &b in &sizes {
                    for flags in 0..4u8 {
                        for &color in &colors {
                            let f = CacheFingerprint::new(
                                variant,
                                kind,
                                a,
                                b,
                                flags & 1 != 0,
                                flags & 2 != 0,
                                color,
                            )
                            .unwrap();
                            seen.insert(f.key());
                            count += 1;
                        }
                    }
                }
            }
        }
    }
    assert_eq!(seen.len(), count);
}

#[test]
fn out_of_range_fields_are_rejected() {
    let mk = |kind, a, b| {
        CacheFingerprint::new(CacheVariant::Normal, kind, a, b, false, false, 0)
    };
    assert!(mk(32, 1, 1).is_err());
    assert!(mk(0, MAX_FINGERPRINT_SIZE + 1, 1).is_err());
    assert!(mk(0, 1, -1).is_err());
    // 32768 would alias 0 if it were masked instead of rejected.
    assert!(matches!(
        mk(0, 32768, 0),
        Err(SheenError::Validation(_))
    ));
}
