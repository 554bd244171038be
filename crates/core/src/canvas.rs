//! The color raster and label raster of one scene, always drawn together.

use image::{GrayImage, Luma, RgbImage};

use crate::color::Rgb;
use crate::error::ReefError;
use crate::label::{Label, LabelEncoding};
use crate::shape::{Coverage, Shape};

/// A color raster and a same-sized label raster sharing one coordinate system.
///
/// All drawing goes through [`CanvasPair::draw`], which rasterizes a shape
/// once and fills the resulting coverage on both rasters, so a pixel is
/// written on the color raster exactly when it is written on the mask.
#[derive(Debug, Clone)]
pub struct CanvasPair {
    color: RgbImage,
    label: GrayImage,
    encoding: LabelEncoding,
}

impl CanvasPair {
    /// Creates a canvas filled with `background` and the background label.
    ///
    /// Returns `ReefError::InvalidDimensions` if width or height is zero,
    /// or if `width * height` would overflow.
    pub fn new(
        width: u32,
        height: u32,
        background: Rgb,
        encoding: LabelEncoding,
    ) -> Result<Self, ReefError> {
        if width == 0 || height == 0 {
            return Err(ReefError::InvalidDimensions);
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or(ReefError::InvalidDimensions)?;
        Ok(Self {
            color: RgbImage::from_pixel(width, height, background.to_pixel()),
            label: GrayImage::from_pixel(width, height, Luma([encoding.encode(Label::Background)])),
            encoding,
        })
    }

    /// Reassembles a canvas from rasters, e.g. after loading a sample from disk.
    pub fn from_parts(
        color: RgbImage,
        label: GrayImage,
        encoding: LabelEncoding,
    ) -> Result<Self, ReefError> {
        if color.dimensions() != label.dimensions() {
            return Err(ReefError::DimensionMismatch {
                lhs_w: color.width(),
                lhs_h: color.height(),
                rhs_w: label.width(),
                rhs_h: label.height(),
            });
        }
        if color.width() == 0 || color.height() == 0 {
            return Err(ReefError::InvalidDimensions);
        }
        Ok(Self {
            color,
            label,
            encoding,
        })
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    pub fn encoding(&self) -> LabelEncoding {
        self.encoding
    }

    /// Read-only access to the color raster.
    pub fn color(&self) -> &RgbImage {
        &self.color
    }

    /// Read-only access to the label raster.
    pub fn label(&self) -> &GrayImage {
        &self.label
    }

    /// Draws `shape` with `fill` on the color raster and `label` on the mask.
    pub fn draw(&mut self, shape: &Shape, fill: Rgb, label: Label) {
        let coverage = shape.rasterize(self.width(), self.height());
        self.paint(&coverage, fill, label);
    }

    /// Fills an already rasterized coverage on both rasters.
    pub fn paint(&mut self, coverage: &Coverage, fill: Rgb, label: Label) {
        let px = fill.to_pixel();
        let value = Luma([self.encoding.encode(label)]);
        for (x, y) in coverage.pixels() {
            self.color.put_pixel(x, y, px);
            self.label.put_pixel(x, y, value);
        }
    }

    /// Swaps in a post-processed color raster. The label raster is untouched.
    ///
    /// Returns `ReefError::DimensionMismatch` if the new raster has a different size.
    pub fn replace_color(&mut self, color: RgbImage) -> Result<(), ReefError> {
        if color.dimensions() != self.color.dimensions() {
            return Err(ReefError::DimensionMismatch {
                lhs_w: self.width(),
                lhs_h: self.height(),
                rhs_w: color.width(),
                rhs_h: color.height(),
            });
        }
        self.color = color;
        Ok(())
    }

    /// Label at `(x, y)`, or `None` outside the canvas.
    pub fn label_at(&self, x: u32, y: u32) -> Option<Label> {
        self.label
            .get_pixel_checked(x, y)
            .and_then(|p| self.encoding.decode(p.0[0]))
    }

    /// Number of mask pixels per label, indexed by [`Label::index`].
    pub fn label_histogram(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for p in self.label.pixels() {
            if let Some(l) = self.encoding.decode(p.0[0]) {
                counts[l.index() as usize] += 1;
            }
        }
        counts
    }

    /// Number of 4-connected regions carrying `label` in the mask.
    pub fn count_regions(&self, label: Label) -> usize {
        let (w, h) = (self.width() as usize, self.height() as usize);
        let target = self.encoding.encode(label);
        let raw = self.label.as_raw();
        let mut seen = vec![false; w * h];
        let mut stack = Vec::new();
        let mut regions = 0;

        for start in 0..w * h {
            if seen[start] || raw[start] != target {
                continue;
            }
            regions += 1;
            seen[start] = true;
            stack.push(start);
            while let Some(i) = stack.pop() {
                let (x, y) = (i % w, i / w);
                let neighbours = [
                    (x > 0).then(|| i - 1),
                    (x + 1 < w).then(|| i + 1),
                    (y > 0).then(|| i - w),
                    (y + 1 < h).then(|| i + w),
                ];
                for n in neighbours.into_iter().flatten() {
                    if !seen[n] && raw[n] == target {
                        seen[n] = true;
                        stack.push(n);
                    }
                }
            }
        }
        regions
    }

    /// Consumes the canvas, returning `(color, label)`.
    pub fn into_parts(self) -> (RgbImage, GrayImage) {
        (self.color, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{BBox, Point};

    fn canvas(w: u32, h: u32) -> CanvasPair {
        CanvasPair::new(w, h, Rgb::WATER, LabelEncoding::Index).unwrap()
    }

    /// Pixels whose color differs from the background, and pixels whose label does.
    fn touched(c: &CanvasPair) -> (Vec<(u32, u32)>, Vec<(u32, u32)>) {
        let colored = c
            .color()
            .enumerate_pixels()
            .filter(|(_, _, p)| Rgb::from(**p) != Rgb::WATER)
            .map(|(x, y, _)| (x, y))
            .collect();
        let labeled = c
            .label()
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] != 0)
            .map(|(x, y, _)| (x, y))
            .collect();
        (colored, labeled)
    }

    #[test]
    fn new_fills_background() {
        let c = canvas(8, 4);
        assert_eq!(c.width(), 8);
        assert_eq!(c.height(), 4);
        assert_eq!(c.label_histogram(), [32, 0, 0, 0, 0]);
        assert!(c.color().pixels().all(|p| Rgb::from(*p) == Rgb::WATER));
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(CanvasPair::new(0, 4, Rgb::WATER, LabelEncoding::Index).is_err());
        assert!(CanvasPair::new(4, 0, Rgb::WATER, LabelEncoding::Index).is_err());
    }

    #[test]
    fn draw_writes_same_pixels_on_both_rasters() {
        let mut c = canvas(64, 64);
        let shapes = [
            Shape::Ellipse(BBox::new(5, 5, 40, 20)),
            Shape::Polygon(vec![Point::new(50, 10), Point::new(70, 30), Point::new(40, 60)]),
            Shape::Line {
                from: Point::new(-10, 63),
                to: Point::new(63, 0),
                width: 3,
            },
            Shape::Rect(BBox::new(0, 55, 63, 80)),
        ];
        for s in &shapes {
            c.draw(s, Rgb::new(255, 0, 0), Label::Fish);
            let (colored, labeled) = touched(&c);
            assert_eq!(colored, labeled, "rasters diverged after {s:?}");
        }
    }

    #[test]
    fn later_draws_overwrite_earlier_labels() {
        let mut c = canvas(20, 20);
        c.draw(&Shape::Rect(BBox::new(0, 0, 19, 19)), Rgb::new(1, 2, 3), Label::Ground);
        c.draw(&Shape::Rect(BBox::new(5, 5, 9, 9)), Rgb::new(4, 5, 6), Label::Shark);
        assert_eq!(c.label_at(7, 7), Some(Label::Shark));
        assert_eq!(c.label_at(0, 0), Some(Label::Ground));
        assert_eq!(c.label_at(20, 0), None);
        assert_eq!(c.label_histogram(), [0, 375, 0, 25, 0]);
    }

    #[test]
    fn spread_encoding_writes_spread_values() {
        let mut c = CanvasPair::new(4, 4, Rgb::WATER, LabelEncoding::Spread).unwrap();
        c.draw(&Shape::Rect(BBox::new(0, 0, 0, 0)), Rgb::new(0, 0, 0), Label::Coral);
        assert_eq!(c.label().get_pixel(0, 0).0[0], 150);
        assert_eq!(c.label_at(0, 0), Some(Label::Coral));
    }

    #[test]
    fn replace_color_keeps_mask_and_checks_size() {
        let mut c = canvas(4, 4);
        c.draw(&Shape::Rect(BBox::new(0, 0, 1, 1)), Rgb::new(9, 9, 9), Label::Fish);
        let before = c.label().clone();
        c.replace_color(RgbImage::new(4, 4)).unwrap();
        assert_eq!(c.label(), &before);
        assert!(c.replace_color(RgbImage::new(5, 4)).is_err());
    }

    #[test]
    fn from_parts_rejects_mismatched_rasters() {
        let err = CanvasPair::from_parts(RgbImage::new(4, 4), GrayImage::new(4, 5), LabelEncoding::Index)
            .unwrap_err();
        assert!(matches!(err, ReefError::DimensionMismatch { rhs_h: 5, .. }));
    }

    #[test]
    fn count_regions_separates_disjoint_shapes() {
        let mut c = canvas(30, 10);
        for x in [0, 10, 20] {
            c.draw(&Shape::Rect(BBox::new(x, 2, x + 4, 6)), Rgb::new(0, 0, 0), Label::Fish);
        }
        c.draw(&Shape::Rect(BBox::new(20, 0, 29, 1)), Rgb::new(0, 0, 0), Label::Coral);
        assert_eq!(c.count_regions(Label::Fish), 3);
        assert_eq!(c.count_regions(Label::Coral), 1);
        assert_eq!(c.count_regions(Label::Shark), 0);
    }
}
