use kurbo::{BezPath, Point, Rect};

/// Cubic approximation constant for a quarter circle.
const KAPPA: f64 = 0.552_284_749_831;

struct Corner {
    entry: Point,
    c1: Point,
    c2: Point,
    exit: Point,
}

/// The four corners in clockwise order (screen coordinates), starting top-right.
fn corners(rect: Rect, r: f64) -> [Corner; 4] {
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
    let k = r * (1.0 - KAPPA);
    [
        Corner {
            entry: Point::new(x1 - r, y0),
            c1: Point::new(x1 - k, y0),
            c2: Point::new(x1, y0 + k),
            exit: Point::new(x1, y0 + r),
        },
        Corner {
            entry: Point::new(x1, y1 - r),
            c1: Point::new(x1, y1 - k),
            c2: Point::new(x1 - k, y1),
            exit: Point::new(x1 - r, y1),
        },
        Corner {
            entry: Point::new(x0 + r, y1),
            c1: Point::new(x0 + k, y1),
            c2: Point::new(x0, y1 - k),
            exit: Point::new(x0, y1 - r),
        },
        Corner {
            entry: Point::new(x0, y0 + r),
            c1: Point::new(x0, y0 + k),
            c2: Point::new(x0 + k, y0),
            exit: Point::new(x0 + r, y0),
        },
    ]
}

/// Closed rounded rectangle. `reversed` flips the winding direction.
///
/// The radius is clamped to half the shorter side.
pub(crate) fn rounded_rect(rect: Rect, radius: f64, reversed: bool) -> BezPath {
    let r = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    let cs = corners(rect, r);
    let mut path = BezPath::new();
    // Both directions start where the top-left corner ends.
    path.move_to(cs[3].exit);
    if reversed {
        for c in cs.iter().rev() {
            path.line_to(c.exit);
            if r > 0.0 {
                path.curve_to(c.c2, c.c1, c.entry);
            }
        }
    } else {
        for c in &cs {
            path.line_to(c.entry);
            if r > 0.0 {
                path.curve_to(c.c1, c.c2, c.exit);
            }
        }
    }
    path.close_path();
    path
}

/// Band between `rect` and `rect` shrunk by `width` on every side, filled under nonzero winding.
pub(crate) fn ring(rect: Rect, radius: f64, width: f64) -> BezPath {
    let mut path = rounded_rect(rect, radius, false);
    let inner = Rect::new(
        rect.x0 + width,
        rect.y0 + width,
        rect.x1 - width,
        rect.y1 - width,
    );
    if inner.width() > 0.0 && inner.height() > 0.0 {
        path.extend(rounded_rect(inner, (radius - width).max(0.0), true));
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/engine/shapes.rs"]
mod tests;
