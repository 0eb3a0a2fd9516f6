use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn lerp_endpoints_and_midpoint() {
    assert_eq!(lerp_u8(10, 200, 0.0), 10);
    assert_eq!(lerp_u8(10, 200, 1.0), 200);
    assert_eq!(lerp_u8(0, 255, 0.5), 128);
    assert_eq!(lerp_u8(0, 255, 7.0), 255);
}

#[test]
fn shrink_pair_keeps_fitting_extents() {
    assert_eq!(shrink_pair(8, 8, 16), (8, 8));
    assert_eq!(shrink_pair(8, 8, 100), (8, 8));
}

#[test]
fn shrink_pair_is_proportional_and_exact() {
    assert_eq!(shrink_pair(8, 8, 10), (5, 5));
    assert_eq!(shrink_pair(6, 2, 4), (3, 1));
    assert_eq!(shrink_pair(8, 8, 7), (3, 4));
    assert_eq!(shrink_pair(8, 8, 0), (0, 0));
    assert_eq!(shrink_pair(8, 8, -3), (0, 0));
    assert_eq!(shrink_pair(0, 0, 0), (0, 0));
    for len in 0..16 {
        let (a, b) = shrink_pair(5, 9, len);
        assert_eq!(a + b, len.min(14));
    }
}
