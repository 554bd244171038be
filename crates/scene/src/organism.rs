//! Fish, shark, and seafloor generators.
//!
//! Each generator is a plain descriptor sampled from [`SceneParams`] and a
//! `draw` that stamps its primitives onto a [`CanvasPair`] with one shared
//! label, so body, tail, and fin of an animal are a single mask class.

use reefgen_core::canvas::CanvasPair;
use reefgen_core::color::Rgb;
use reefgen_core::label::Label;
use reefgen_core::prng::Xorshift64;
use reefgen_core::shape::{BBox, Point, Shape};

use crate::params::SceneParams;

/// Something the composer can place in a scene.
pub trait Organism {
    /// Mask class shared by every primitive of the organism.
    const LABEL: Label;

    /// Draws the organism. Random choices made while drawing (tail side,
    /// branch angles) come from `rng`.
    fn draw(&self, canvas: &mut CanvasPair, rng: &mut Xorshift64);
}

/// Side of the body the caudal fin sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailSide {
    Left,
    Right,
}

impl TailSide {
    /// Unbiased coin flip.
    pub fn flip(rng: &mut Xorshift64) -> Self {
        if rng.next_bool() {
            TailSide::Left
        } else {
            TailSide::Right
        }
    }
}

/// Ellipse body with a triangular tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fish {
    /// Centre of the body.
    pub position: Point,
    /// Body bounding-box extents `(dx, dy)`.
    pub size: (i32, i32),
    pub color: Rgb,
}

impl Fish {
    /// Samples size, then position anywhere on the canvas, then color.
    pub fn sample(rng: &mut Xorshift64, params: &SceneParams, width: u32, height: u32) -> Self {
        let (size, position) =
            sample_swimmer(rng, params.fish_width, params.fish_height, width, height);
        Self {
            position,
            size,
            color: params.fish_color.sample(rng),
        }
    }

    /// The body and tail shapes for the given tail side.
    pub fn shapes(&self, side: TailSide) -> [Shape; 2] {
        [body(self.position, self.size), tail(self.position, self.size, side)]
    }
}

impl Organism for Fish {
    const LABEL: Label = Label::Fish;

    fn draw(&self, canvas: &mut CanvasPair, rng: &mut Xorshift64) {
        let side = TailSide::flip(rng);
        for shape in &self.shapes(side) {
            canvas.draw(shape, self.color, Self::LABEL);
        }
    }
}

/// Fish body and tail plus a dorsal fin leaning toward the tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shark {
    pub position: Point,
    pub size: (i32, i32),
    pub color: Rgb,
}

impl Shark {
    pub fn sample(rng: &mut Xorshift64, params: &SceneParams, width: u32, height: u32) -> Self {
        let (size, position) =
            sample_swimmer(rng, params.shark_width, params.shark_height, width, height);
        Self {
            position,
            size,
            color: params.shark_color.sample(rng),
        }
    }

    pub fn shapes(&self, side: TailSide) -> [Shape; 3] {
        [
            body(self.position, self.size),
            tail(self.position, self.size, side),
            dorsal_fin(self.position, self.size, side),
        ]
    }
}

impl Organism for Shark {
    const LABEL: Label = Label::Shark;

    fn draw(&self, canvas: &mut CanvasPair, rng: &mut Xorshift64) {
        let side = TailSide::flip(rng);
        for shape in &self.shapes(side) {
            canvas.draw(shape, self.color, Self::LABEL);
        }
    }
}

/// Full-width seafloor band along the bottom of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    /// Share of the canvas height covered, in `(0, 1]`.
    pub fraction: f64,
    pub color: Rgb,
}

impl Ground {
    /// Samples the color first, then the fraction.
    pub fn sample(rng: &mut Xorshift64, params: &SceneParams) -> Self {
        let color = params.ground_color.sample(rng);
        let (lo, hi) = params.ground_fraction;
        Self {
            fraction: rng.next_range(lo, hi),
            color,
        }
    }

    /// First row of the seafloor on a canvas of the given height.
    pub fn top(&self, height: u32) -> i32 {
        (f64::from(height) * (1.0 - self.fraction)).floor() as i32
    }

    pub fn shape(&self, width: u32, height: u32) -> Shape {
        Shape::Rect(BBox::new(0, self.top(height), width as i32, height as i32))
    }

    /// Inclusive row range coral bases may be placed in.
    pub fn coral_band(&self, height: u32) -> (i32, i32) {
        (self.top(height), height as i32)
    }
}

impl Organism for Ground {
    const LABEL: Label = Label::Ground;

    fn draw(&self, canvas: &mut CanvasPair, _rng: &mut Xorshift64) {
        let shape = self.shape(canvas.width(), canvas.height());
        canvas.draw(&shape, self.color, Self::LABEL);
    }
}

/// Size then position of a fish or shark.
///
/// Positions are inclusive of the canvas edge so animals may hang half outside.
fn sample_swimmer(
    rng: &mut Xorshift64,
    width_range: (i32, i32),
    height_range: (i32, i32),
    width: u32,
    height: u32,
) -> ((i32, i32), Point) {
    let dx = rng.next_int(width_range.0, width_range.1);
    let dy = rng.next_int(height_range.0, height_range.1);
    let x = rng.next_int(0, width as i32);
    let y = rng.next_int(0, height as i32);
    ((dx, dy), Point::new(x, y))
}

fn body(position: Point, (dx, dy): (i32, i32)) -> Shape {
    Shape::Ellipse(BBox::centered(position, dx, dy))
}

/// Triangle whose apex touches the body's edge midpoint and whose base spans
/// the body height, `dx / 2` further out.
fn tail(Point { x, y }: Point, (dx, dy): (i32, i32), side: TailSide) -> Shape {
    let len = dx / 2;
    let (edge, base) = match side {
        TailSide::Left => (x - dx / 2, x - dx / 2 - len),
        TailSide::Right => (x + dx / 2, x + dx / 2 + len),
    };
    Shape::Polygon(vec![
        Point::new(base, y - dy / 2),
        Point::new(base, y + dy / 2),
        Point::new(edge, y),
    ])
}

/// Triangle standing on the centre line, its apex `dy/2 + dy/4` above the
/// centre and on the tail side.
fn dorsal_fin(Point { x, y }: Point, (dx, dy): (i32, i32), side: TailSide) -> Shape {
    let apex_y = y - dy / 2 - dy / 4;
    let (back, front) = match side {
        TailSide::Left => (x - dx / 8, x + 3 * dx / 8),
        TailSide::Right => (x + dx / 8, x - 3 * dx / 8),
    };
    Shape::Polygon(vec![
        Point::new(back, y),
        Point::new(front, y),
        Point::new(back, apex_y),
    ])
}
