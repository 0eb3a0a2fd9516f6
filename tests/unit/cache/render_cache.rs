use super::*;
use crate::cache::fingerprint::CacheVariant;
use crate::foundation::core::Rgba8Premul;

fn fp(n: i32) -> CacheFingerprint {
    CacheFingerprint::new(CacheVariant::Normal, 0, n, 0, true, false, 0).unwrap()
}

/// 100-byte image (5x5 pixels).
fn img() -> RasterImage {
    RasterImage::solid(5, 5, Rgba8Premul::from_straight_rgba(1, 2, 3, 255))
}

#[test]
fn hit_returns_the_stored_pixels() {
    let mut c = RenderCache::new(1000);
    let image = img();
    assert!(c.insert(fp(1), image.clone()));
    let got = c.lookup(&fp(1)).unwrap();
    assert!(got.ptr_eq(&image));
    assert!(c.lookup(&fp(2)).is_none());
    assert_eq!(c.stats().hits, 1);
    assert_eq!(c.stats().misses, 1);
}

#[test]
fn eviction_follows_lookup_recency() {
    let mut c = RenderCache::new(300);
    c.insert(fp(1), img());
    c.insert(fp(2), img());
    c.insert(fp(3), img());
    // 1 becomes most recent; 2 is now the oldest.
    assert!(c.lookup(&fp(1)).is_some());
    c.insert(fp(4), img());
    assert!(c.contains(&fp(1)));
    assert!(!c.contains(&fp(2)));
    assert!(c.contains(&fp(3)));
    assert!(c.contains(&fp(4)));
    assert_eq!(c.total_cost(), 300);
    assert_eq!(c.stats().evictions, 1);
}

#[test]
fn reinserting_a_key_replaces_its_cost() {
    let mut c = RenderCache::new(1000);
    c.insert(fp(1), img());
    c.insert(fp(1), RasterImage::solid(10, 10, Rgba8Premul::transparent()));
    assert_eq!(c.len(), 1);
    assert_eq!(c.total_cost(), 400);
}

#[test]
fn oversized_value_is_not_stored() {
    let mut c = RenderCache::new(150_000);
    let big = RasterImage::solid(250, 200, Rgba8Premul::transparent());
    assert_eq!(big.cost_bytes(), 200_000);
    c.insert(fp(7), img());
    assert!(!c.insert(fp(1), big.clone()));
    assert!(c.lookup(&fp(1)).is_none());
    // Existing entries are not evicted for a value that could never fit.
    assert!(c.contains(&fp(7)));
    assert_eq!(big.width(), 250);
    assert_eq!(c.stats().skipped_oversized, 1);
}

#[test]
fn capacity_holds_across_mixed_traffic() {
    let mut c = RenderCache::new(1_000);
    for i in 0..200 {
        let side = (i % 9 + 1) as u32;
        c.insert(fp(i), RasterImage::solid(side, side, Rgba8Premul::transparent()));
        if i % 3 == 0 {
            let _ = c.lookup(&fp(i / 2));
        }
        assert!(c.total_cost() <= c.capacity());
    }
    assert!(c.stats().evictions > 0);
}

#[test]
fn invalidate_all_clears_but_keeps_capacity() {
    let mut c = RenderCache::new(1000);
    for i in 0..5 {
        c.insert(fp(i), img());
    }
    c.invalidate_all();
    assert!(c.is_empty());
    assert_eq!(c.total_cost(), 0);
    assert_eq!(c.capacity(), 1000);
    for i in 0..5 {
        assert!(c.lookup(&fp(i)).is_none());
    }
}

#[test]
fn shrinking_capacity_evicts_oldest_first() {
    let mut c = RenderCache::new(1000);
    for i in 0..5 {
        c.insert(fp(i), img());
    }
    c.set_capacity(200);
    assert_eq!(c.len(), 2);
    assert!(c.contains(&fp(3)));
    assert!(c.contains(&fp(4)));
}

#[test]
fn lookup_or_insert_with_produces_once() {
    let mut c = RenderCache::new(1000);
    let mut calls = 0;
    for _ in 0..3 {
        let _ = c.lookup_or_insert_with(fp(1), || {
            calls += 1;
            img()
        });
    }
    assert_eq!(calls, 1);
}

#[test]
fn tile_sets_are_costed_by_their_slices() {
    let mut c: RenderCache<TileSet> = RenderCache::new(10_000);
    let ts = TileSet::from_single(img());
    c.insert(fp(1), ts.clone());
    assert_eq!(c.total_cost(), 100);
    assert!(c.lookup(&fp(1)).unwrap().ptr_eq(&ts));
}
