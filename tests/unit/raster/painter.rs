use super::*;

#[test]
fn tile_spans_clip_the_last_tile() {
    let spans: Vec<_> = tile_spans(84, 16).collect();
    assert_eq!(spans.len(), 6);
    assert!(spans[..5].iter().all(|&(_, w)| w == 16));
    assert_eq!(spans[5], (80, 4));
    assert_eq!(spans.iter().map(|&(_, w)| w).sum::<i32>(), 84);
}

#[test]
fn tile_spans_degenerate_inputs_are_empty() {
    assert_eq!(tile_spans(0, 16).count(), 0);
    assert_eq!(tile_spans(-5, 16).count(), 0);
    assert_eq!(tile_spans(10, 0).count(), 0);
}

#[test]
fn reflect_wrap_mirrors_odd_periods() {
    assert_eq!(wrap_coord(0, 4, Extend::Reflect), 0);
    assert_eq!(wrap_coord(3, 4, Extend::Reflect), 3);
    assert_eq!(wrap_coord(4, 4, Extend::Reflect), 3);
    assert_eq!(wrap_coord(7, 4, Extend::Reflect), 0);
    assert_eq!(wrap_coord(8, 4, Extend::Reflect), 0);
    assert_eq!(wrap_coord(-1, 4, Extend::Reflect), 0);
    assert_eq!(wrap_coord(-1, 4, Extend::Repeat), 3);
}

#[derive(Default)]
struct Blits(Vec<(PixelRect, i32, i32, u128)>);

impl Painter for Blits {
    fn fill_rect(&mut self, _rect: PixelRect, _brush: &Brush) {}
    fn fill_path(&mut self, _path: &BezPath, _brush: &Brush) {}
    fn blit(&mut self, image: &RasterImage, src: PixelRect, dst_x: i32, dst_y: i32) {
        self.0.push((src, dst_x, dst_y, image.digest()));
    }
    fn clip_rect(&mut self, _rect: PixelRect) {}
    fn clip_path(&mut self, _path: &BezPath) {}
    fn save(&mut self) {}
    fn restore(&mut self) {}
}

fn ramp(w: u32) -> RasterImage {
    let px: Vec<u8> = (0..w).flat_map(|x| [x as u8, 0, 0, 255]).collect();
    RasterImage::from_premul_bytes(w, 1, px).unwrap()
}

#[test]
fn blit_tiled_default_emits_clipped_tiles() {
    let img = ramp(4);
    let mut p = Blits::default();
    p.blit_tiled(&img, PixelRect::new(10, 0, 10, 1), Extend::Repeat);
    let dst: Vec<_> = p.0.iter().map(|b| (b.1, b.0.width)).collect();
    assert_eq!(dst, vec![(10, 4), (14, 4), (18, 2)]);
    assert!(p.0.iter().all(|b| b.3 == img.digest()));
}

#[test]
fn blit_tiled_reflect_alternates_mirrored_tiles() {
    let img = ramp(4);
    let mut p = Blits::default();
    p.blit_tiled(&img, PixelRect::new(0, 0, 12, 1), Extend::Reflect);
    assert_eq!(p.0.len(), 3);
    assert_eq!(p.0[0].3, img.digest());
    assert_eq!(p.0[1].3, img.mirrored(true, false).digest());
    assert_eq!(p.0[2].3, img.digest());
}
