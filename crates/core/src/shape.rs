//! Geometric primitives and their scanline rasterization.
//!
//! A [`Shape`] is rasterized into a [`Coverage`]: the list of horizontal
//! pixel spans it touches, already clipped to the canvas. Both rasters of a
//! [`CanvasPair`](crate::canvas::CanvasPair) are filled from the same
//! coverage, which is what keeps image and mask pixel-aligned.

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate. Origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inclusive axis-aligned bounding box `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BBox {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box of extents `(dx, dy)` centred on `center`, halving with integer division.
    pub fn centered(center: Point, dx: i32, dy: i32) -> Self {
        Self {
            x0: center.x - dx / 2,
            y0: center.y - dy / 2,
            x1: center.x + dx / 2,
            y1: center.y + dy / 2,
        }
    }

    /// Swaps inverted corners so that `x0 <= x1` and `y0 <= y1`.
    pub fn normalized(self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }
}

/// A drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled axis-aligned rectangle.
    Rect(BBox),
    /// Filled axis-aligned ellipse inscribed in the box.
    Ellipse(BBox),
    /// Filled closed polygon (even-odd rule) including its outline.
    Polygon(Vec<Point>),
    /// Straight stroke. Width 0 touches no pixels.
    Line { from: Point, to: Point, width: u32 },
}

impl Shape {
    /// Rasterizes the shape onto a `width` x `height` grid.
    pub fn rasterize(&self, width: u32, height: u32) -> Coverage {
        let mut cov = Coverage::new(width, height);
        match self {
            Shape::Rect(b) => fill_rect(&mut cov, b.normalized()),
            Shape::Ellipse(b) => fill_ellipse(&mut cov, b.normalized()),
            Shape::Polygon(points) => {
                let verts: Vec<(f64, f64)> = points
                    .iter()
                    .map(|p| (f64::from(p.x), f64::from(p.y)))
                    .collect();
                fill_polygon(&mut cov, &verts);
            }
            Shape::Line { from, to, width } => stroke_line(&mut cov, *from, *to, *width),
        }
        cov
    }
}

/// One inclusive run of pixels `x0..=x1` on row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: u32,
    pub x0: u32,
    pub x1: u32,
}

/// Clipped set of spans touched by one primitive. Spans may overlap.
#[derive(Debug, Clone)]
pub struct Coverage {
    width: u32,
    height: u32,
    spans: Vec<Span>,
}

impl Coverage {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            spans: Vec::new(),
        }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Every covered pixel as `(x, y)`; pixels in overlapping spans repeat.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.spans
            .iter()
            .flat_map(|s| (s.x0..=s.x1).map(move |x| (x, s.y)))
    }

    /// Adds `x0..=x1` on row `y`, clipped to the grid.
    fn push(&mut self, y: i64, x0: i64, x1: i64) {
        if y < 0 || y >= i64::from(self.height) || x1 < 0 || x0 >= i64::from(self.width) {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(i64::from(self.width) - 1);
        if x0 <= x1 {
            self.spans.push(Span {
                y: y as u32,
                x0: x0 as u32,
                x1: x1 as u32,
            });
        }
    }

    /// Visible row range for rows `y0..=y1`.
    fn rows(&self, y0: i64, y1: i64) -> std::ops::RangeInclusive<i64> {
        y0.max(0)..=y1.min(i64::from(self.height) - 1)
    }
}

fn fill_rect(cov: &mut Coverage, b: BBox) {
    for y in cov.rows(i64::from(b.y0), i64::from(b.y1)) {
        cov.push(y, i64::from(b.x0), i64::from(b.x1));
    }
}

/// Keeps pixels whose normalized distance from the box centre is at most 1.
fn fill_ellipse(cov: &mut Coverage, b: BBox) {
    let cx = (f64::from(b.x0) + f64::from(b.x1)) / 2.0;
    let cy = (f64::from(b.y0) + f64::from(b.y1)) / 2.0;
    let rx = (f64::from(b.x1) - f64::from(b.x0) + 1.0) / 2.0;
    let ry = (f64::from(b.y1) - f64::from(b.y0) + 1.0) / 2.0;

    for y in cov.rows(i64::from(b.y0), i64::from(b.y1)) {
        let dy = (y as f64 - cy) / ry;
        let t = 1.0 - dy * dy;
        if t < 0.0 {
            continue;
        }
        let half = rx * t.sqrt();
        cov.push(y, (cx - half).ceil() as i64, (cx + half).floor() as i64);
    }
}

/// Even-odd scanline fill sampled at integer rows, plus the edge outline.
fn fill_polygon(cov: &mut Coverage, verts: &[(f64, f64)]) {
    if verts.is_empty() {
        return;
    }
    let ymin = verts.iter().map(|v| v.1).fold(f64::INFINITY, f64::min);
    let ymax = verts.iter().map(|v| v.1).fold(f64::NEG_INFINITY, f64::max);

    let mut xs: Vec<f64> = Vec::with_capacity(verts.len());
    for y in cov.rows(ymin.ceil() as i64, ymax.floor() as i64) {
        let yf = y as f64;
        xs.clear();
        for (i, &(ax, ay)) in verts.iter().enumerate() {
            let (bx, by) = verts[(i + 1) % verts.len()];
            // Half-open in y so shared vertices are counted once.
            if (ay <= yf && by > yf) || (by <= yf && ay > yf) {
                xs.push(ax + (yf - ay) * (bx - ax) / (by - ay));
            }
        }
        xs.sort_by(f64::total_cmp);
        for pair in xs.chunks_exact(2) {
            cov.push(y, pair[0].ceil() as i64, pair[1].floor() as i64);
        }
    }

    for (i, &(ax, ay)) in verts.iter().enumerate() {
        let (bx, by) = verts[(i + 1) % verts.len()];
        bresenham(
            cov,
            (ax.round() as i64, ay.round() as i64),
            (bx.round() as i64, by.round() as i64),
        );
    }
}

fn stroke_line(cov: &mut Coverage, from: Point, to: Point, width: u32) {
    let a = (i64::from(from.x), i64::from(from.y));
    let b = (i64::from(to.x), i64::from(to.y));
    match width {
        0 => {}
        1 => bresenham(cov, a, b),
        w => {
            let (ax, ay) = (a.0 as f64, a.1 as f64);
            let (bx, by) = (b.0 as f64, b.1 as f64);
            let len = (bx - ax).hypot(by - ay);
            // Pixel centres from -(w-1)/2 to +w/2 along the normal, so the
            // stroke is exactly `w` pixels across. A zero-length stroke
            // collapses to its endpoint pixel.
            let (nx, ny) = if len > 0.0 {
                (-(by - ay) / len, (bx - ax) / len)
            } else {
                (0.0, 0.0)
            };
            let near = f64::from(w / 2);
            let far = f64::from((w - 1) / 2);
            fill_polygon(
                cov,
                &[
                    (ax + nx * near, ay + ny * near),
                    (bx + nx * near, by + ny * near),
                    (bx - nx * far, by - ny * far),
                    (ax - nx * far, ay - ny * far),
                ],
            );
        }
    }
}

/// Bresenham segment, one pixel per step, clipped per pixel.
fn bresenham(cov: &mut Coverage, (x0, y0): (i64, i64), (x1, y1): (i64, i64)) {
    let (w, h) = (i64::from(cov.width), i64::from(cov.height));
    // Segments entirely beside the grid touch nothing.
    if (x0 < 0 && x1 < 0) || (y0 < 0 && y1 < 0) || (x0 >= w && x1 >= w) || (y0 >= h && y1 >= h) {
        return;
    }

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        cov.push(y, x, x);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pixel_set(shape: &Shape, w: u32, h: u32) -> HashSet<(u32, u32)> {
        shape.rasterize(w, h).pixels().collect()
    }

    #[test]
    fn rect_is_inclusive() {
        let px = pixel_set(&Shape::Rect(BBox::new(2, 3, 4, 5)), 10, 10);
        assert_eq!(px.len(), 9);
        assert!(px.contains(&(2, 3)) && px.contains(&(4, 5)));
    }

    #[test]
    fn rect_clips_to_grid() {
        let px = pixel_set(&Shape::Rect(BBox::new(-100, 8, 100, 1000)), 10, 10);
        assert_eq!(px.len(), 20);
        assert!(px.iter().all(|&(x, y)| x < 10 && (8..10).contains(&y)));
    }

    #[test]
    fn inverted_bbox_is_normalized() {
        let a = pixel_set(&Shape::Rect(BBox::new(4, 5, 2, 3)), 10, 10);
        let b = pixel_set(&Shape::Rect(BBox::new(2, 3, 4, 5)), 10, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn ellipse_contains_centre_and_axis_extremes_but_not_corners() {
        let px = pixel_set(&Shape::Ellipse(BBox::new(10, 10, 30, 20)), 64, 64);
        assert!(px.contains(&(20, 15)));
        assert!(px.contains(&(10, 15)) && px.contains(&(30, 15)));
        assert!(px.contains(&(20, 10)) && px.contains(&(20, 20)));
        assert!(!px.contains(&(10, 10)) && !px.contains(&(30, 20)));
        assert!(px.iter().all(|&(x, y)| (10..=30).contains(&x) && (10..=20).contains(&y)));
    }

    #[test]
    fn degenerate_ellipse_is_a_single_pixel() {
        let px = pixel_set(&Shape::Ellipse(BBox::new(5, 5, 5, 5)), 10, 10);
        assert_eq!(px, HashSet::from([(5, 5)]));
    }

    #[test]
    fn triangle_fill_contains_interior_and_vertices() {
        let tri = Shape::Polygon(vec![Point::new(0, 0), Point::new(0, 10), Point::new(10, 5)]);
        let px = pixel_set(&tri, 20, 20);
        for p in [(0, 0), (0, 10), (10, 5), (3, 5)] {
            assert!(px.contains(&p), "missing {p:?}");
        }
        assert!(!px.contains(&(9, 0)));
    }

    #[test]
    fn flat_polygon_still_marks_its_outline() {
        let flat = Shape::Polygon(vec![Point::new(1, 4), Point::new(6, 4), Point::new(3, 4)]);
        let px = pixel_set(&flat, 10, 10);
        assert_eq!(px, (1..=6).map(|x| (x, 4)).collect());
    }

    #[test]
    fn hairline_vertical_line_has_expected_pixels() {
        let line = Shape::Line {
            from: Point::new(5, 9),
            to: Point::new(5, 2),
            width: 1,
        };
        let px = pixel_set(&line, 10, 10);
        assert_eq!(px, (2..=9).map(|y| (5, y)).collect());
    }

    #[test]
    fn zero_width_line_touches_nothing() {
        let line = Shape::Line {
            from: Point::new(0, 0),
            to: Point::new(9, 9),
            width: 0,
        };
        assert!(line.rasterize(10, 10).is_empty());
    }

    #[test]
    fn thick_line_covers_exactly_its_width() {
        for width in 2..=5_u32 {
            let line = Shape::Line {
                from: Point::new(128, 200),
                to: Point::new(128, 180),
                width,
            };
            let px = pixel_set(&line, 256, 256);
            let xs: HashSet<u32> = px.iter().map(|p| p.0).collect();
            assert_eq!(xs.len(), width as usize, "width {width} covers {xs:?}");
            let lo = 128 - (width - 1) / 2;
            let hi = 128 + width / 2;
            assert_eq!(xs, (lo..=hi).collect::<HashSet<u32>>(), "width {width}");
            // Every row along the stroke is fully covered.
            for y in 180..=200 {
                assert_eq!(px.iter().filter(|p| p.1 == y).count(), width as usize, "row {y}");
            }
        }
    }

    #[test]
    fn horizontal_thick_line_covers_exactly_its_width() {
        let line = Shape::Line {
            from: Point::new(5, 20),
            to: Point::new(30, 20),
            width: 4,
        };
        let ys: HashSet<u32> = pixel_set(&line, 40, 40).iter().map(|p| p.1).collect();
        assert_eq!(ys.len(), 4, "rows {ys:?}");
    }

    #[test]
    fn zero_length_thick_line_is_its_endpoint() {
        let dot = Shape::Line {
            from: Point::new(3, 3),
            to: Point::new(3, 3),
            width: 5,
        };
        assert_eq!(pixel_set(&dot, 10, 10), HashSet::from([(3, 3)]));
    }

    #[test]
    fn fully_offscreen_shapes_touch_nothing() {
        let shapes = [
            Shape::Rect(BBox::new(-50, -50, -1, -1)),
            Shape::Ellipse(BBox::new(100, 100, 120, 110)),
            Shape::Polygon(vec![Point::new(-9, 0), Point::new(-5, 5), Point::new(-9, 9)]),
            Shape::Line {
                from: Point::new(20, -5),
                to: Point::new(30, -40),
                width: 3,
            },
        ];
        for s in &shapes {
            assert!(s.rasterize(16, 16).is_empty(), "{s:?} touched the grid");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn coverage_always_inside_grid(
                x0 in -200_i32..200, y0 in -200_i32..200,
                x1 in -200_i32..200, y1 in -200_i32..200,
                width in 0_u32..8,
            ) {
                let shapes = [
                    Shape::Rect(BBox::new(x0, y0, x1, y1)),
                    Shape::Ellipse(BBox::new(x0, y0, x1, y1)),
                    Shape::Polygon(vec![Point::new(x0, y0), Point::new(x1, y0), Point::new(x1, y1)]),
                    Shape::Line { from: Point::new(x0, y0), to: Point::new(x1, y1), width },
                ];
                for s in &shapes {
                    for (x, y) in s.rasterize(64, 48).pixels() {
                        prop_assert!(x < 64 && y < 48, "{s:?} produced ({x}, {y})");
                    }
                }
            }
        }
    }
}
