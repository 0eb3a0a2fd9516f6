use kurbo::Shape as _;

use super::*;

#[test]
fn directions_have_opposite_winding() {
    let rect = Rect::new(0.0, 0.0, 20.0, 10.0);
    let c = Point::new(10.0, 5.0);
    let cw = rounded_rect(rect, 3.0, false).winding(c);
    let ccw = rounded_rect(rect, 3.0, true).winding(c);
    assert_ne!(cw, 0);
    assert_eq!(cw, -ccw);
}

#[test]
fn rounded_corners_exclude_the_extreme_corner() {
    let p = rounded_rect(Rect::new(0.0, 0.0, 20.0, 20.0), 6.0, false);
    assert!(!p.contains(Point::new(0.5, 0.5)));
    assert!(p.contains(Point::new(6.0, 0.5)));
    assert!(p.contains(Point::new(10.0, 10.0)));
}

#[test]
fn zero_radius_is_a_plain_rectangle() {
    let p = rounded_rect(Rect::new(0.0, 0.0, 4.0, 4.0), 0.0, true);
    assert!(p.contains(Point::new(0.1, 0.1)));
    assert!((p.area().abs() - 16.0).abs() < 1e-9);
}

#[test]
fn ring_has_a_hole() {
    let p = ring(Rect::new(0.0, 0.0, 20.0, 20.0), 4.0, 2.0);
    assert!(p.contains(Point::new(1.0, 10.0)));
    assert!(p.contains(Point::new(19.0, 10.0)));
    assert!(!p.contains(Point::new(10.0, 10.0)));
}
