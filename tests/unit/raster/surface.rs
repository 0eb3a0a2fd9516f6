use kurbo::Shape as _;

use super::*;
use crate::foundation::core::RoundedRect;
use crate::raster::painter::Extend;

const RED: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

fn opaque_count(s: &Surface) -> usize {
    s.as_bytes().chunks_exact(4).filter(|p| p[3] == 255).count()
}

#[test]
fn fill_rect_is_clipped_to_bounds() {
    let mut s = Surface::new(8, 8);
    s.fill_rect(PixelRect::new(-4, -4, 8, 8), &Brush::Solid(RED));
    assert_eq!(opaque_count(&s), 16);
    assert_eq!(s.pixel(3, 3), RED);
    assert_eq!(s.pixel(4, 4), Rgba8Premul::transparent());
}

#[test]
fn empty_and_negative_rects_draw_nothing() {
    let mut s = Surface::new(8, 8);
    s.fill_rect(PixelRect::new(2, 2, 0, 4), &Brush::Solid(RED));
    s.fill_rect(PixelRect::new(2, 2, -3, 4), &Brush::Solid(RED));
    assert_eq!(opaque_count(&s), 0);
}

#[test]
fn clip_rect_and_restore() {
    let mut s = Surface::new(8, 8);
    s.save();
    s.clip_rect(PixelRect::new(0, 0, 2, 2));
    s.fill_rect(PixelRect::from_size(8, 8), &Brush::Solid(RED));
    assert_eq!(opaque_count(&s), 4);
    s.restore();
    s.fill_rect(PixelRect::new(6, 6, 2, 2), &Brush::Solid(RED));
    assert_eq!(opaque_count(&s), 8);
}

#[test]
fn restore_without_save_is_noop() {
    let mut s = Surface::new(4, 4);
    s.restore();
    s.fill_rect(PixelRect::from_size(4, 4), &Brush::Solid(RED));
    assert_eq!(opaque_count(&s), 16);
}

#[test]
fn blit_clips_source_and_destination() {
    let img = RasterImage::solid(4, 4, RED);
    let mut s = Surface::new(6, 6);
    s.blit(&img, PixelRect::new(2, 2, 4, 4), 4, 4);
    // Source is clipped to 2x2, destination keeps its anchor.
    assert_eq!(opaque_count(&s), 4);
    assert_eq!(s.pixel(5, 5), RED);
    assert_eq!(s.pixel(3, 3), Rgba8Premul::transparent());
}

#[test]
fn fill_path_antialiases_round_corners() {
    let mut s = Surface::new(20, 20);
    let rr = RoundedRect::new(0.0, 0.0, 20.0, 20.0, 6.0).to_path(0.1);
    s.fill_path(&rr, &Brush::Solid(RED));
    assert_eq!(s.pixel(10, 10), RED);
    assert_eq!(s.pixel(0, 0).a, 0);
    assert_eq!(s.pixel(10, 0), RED);
}

#[test]
fn clip_path_masks_later_fills() {
    let mut s = Surface::new(10, 10);
    let circle = kurbo::Circle::new((5.0, 5.0), 3.0).to_path(0.1);
    s.clip_path(&circle);
    s.fill_rect(PixelRect::from_size(10, 10), &Brush::Solid(RED));
    assert_eq!(s.pixel(5, 5), RED);
    assert_eq!(s.pixel(0, 0).a, 0);
    assert_eq!(s.pixel(9, 9).a, 0);
}

#[test]
fn image_brush_repeats_from_origin() {
    let mut px = Vec::new();
    px.extend_from_slice(&[255, 0, 0, 255]);
    px.extend_from_slice(&[0, 0, 255, 255]);
    let img = RasterImage::from_premul_bytes(2, 1, px).unwrap();
    let mut s = Surface::new(5, 1);
    s.fill_rect(
        PixelRect::from_size(5, 1),
        &Brush::Image {
            image: img,
            origin: (1, 0),
            extend: Extend::Repeat,
        },
    );
    assert_eq!(s.pixel(1, 0), RED);
    assert_eq!(s.pixel(2, 0).b, 255);
    assert_eq!(s.pixel(0, 0).b, 255);
    assert_eq!(s.pixel(3, 0), RED);
}

#[test]
fn into_image_preserves_pixels() {
    let mut s = Surface::new(3, 2);
    s.fill_rect(PixelRect::new(1, 1, 1, 1), &Brush::Solid(RED));
    let img = s.into_image();
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(img.pixel(1, 1), RED);
}

#[test]
fn clip_mask_covers_only_the_path_bounds() {
    let mut s = Surface::new(1000, 800);
    let circle = kurbo::Circle::new((40.0, 40.0), 8.0).to_path(0.1);
    s.clip_path(&circle);
    let mask = s.clip.mask.clone().unwrap();
    assert!(mask.alpha.len() <= 18 * 18);
    assert!(s.clip.rect.contains(40, 40));
    assert!(!s.clip.rect.contains(60, 40));
}

#[test]
fn nested_path_clips_intersect() {
    let mut s = Surface::new(20, 10);
    s.save();
    s.clip_path(&kurbo::Rect::new(0.0, 0.0, 12.0, 10.0).to_path(0.1));
    s.clip_path(&kurbo::Rect::new(8.0, 0.0, 20.0, 10.0).to_path(0.1));
    s.fill_rect(PixelRect::from_size(20, 10), &Brush::Solid(RED));
    assert_eq!(opaque_count(&s), 40);
    assert_eq!(s.pixel(9, 5), RED);
    assert_eq!(s.pixel(7, 5).a, 0);
    assert_eq!(s.pixel(12, 5).a, 0);
    s.restore();
    s.fill_rect(PixelRect::new(0, 0, 1, 1), &Brush::Solid(RED));
    assert_eq!(s.pixel(0, 0), RED);
}

#[test]
fn blit_respects_path_clip() {
    let img = RasterImage::solid(10, 10, RED);
    let mut s = Surface::new(10, 10);
    s.clip_path(&kurbo::Rect::new(0.0, 0.0, 5.0, 10.0).to_path(0.1));
    s.blit(&img, PixelRect::from_size(10, 10), 0, 0);
    assert_eq!(opaque_count(&s), 50);
    assert_eq!(s.pixel(5, 0).a, 0);
}

#[test]
fn partially_covered_edges_are_blended() {
    let mut s = Surface::new(4, 1);
    s.fill_path(
        &kurbo::Rect::new(0.0, 0.0, 1.5, 1.0).to_path(0.1),
        &Brush::Solid(RED),
    );
    assert_eq!(s.pixel(0, 0), RED);
    let half = s.pixel(1, 0).a;
    assert!((100..=155).contains(&half), "{half}");
    assert_eq!(s.pixel(2, 0).a, 0);
}
