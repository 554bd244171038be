//! Branching coral: a vertical trunk followed by level-by-level fan-out.
//!
//! Geometry is grown first into a flat list of [`Branch`]es and then stroked,
//! so segment counts and per-level shrink can be inspected without a canvas.
//! The active node list is rebuilt each level (two-buffer swap); depth is
//! bounded by `levels`, never by the call stack.

use std::f64::consts::PI;

use reefgen_core::canvas::CanvasPair;
use reefgen_core::color::Rgb;
use reefgen_core::label::Label;
use reefgen_core::prng::Xorshift64;
use reefgen_core::shape::{Point, Shape};

use crate::organism::Organism;
use crate::params::SceneParams;

/// Per-level shrink of branch length and stroke width.
pub const SHRINK: f64 = 0.8;
/// Inclusive range of children per node.
pub const BRANCHES_PER_NODE: (i32, i32) = (3, 5);
/// Branch length as a share of `size * SHRINK^(level)`, half-open.
const LENGTH_FACTOR: (f64, f64) = (0.2, 0.8);
/// Branch angle window: a 3π/2 fan starting at −π/4, leaving out a downward wedge.
const ANGLE_WINDOW: (f64, f64) = (-PI / 4.0, 5.0 * PI / 4.0);

/// How stroke widths that floor to zero are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokePolicy {
    /// Keep every stroke at least one pixel wide.
    Clamp,
    /// Keep the floored width; zero-width strokes touch no pixels.
    Floor,
}

impl StrokePolicy {
    pub fn from_clamp(clamp: bool) -> Self {
        if clamp {
            StrokePolicy::Clamp
        } else {
            StrokePolicy::Floor
        }
    }

    pub fn apply(self, width: u32) -> u32 {
        match self {
            StrokePolicy::Clamp => width.max(1),
            StrokePolicy::Floor => width,
        }
    }
}

/// One stroked segment of a coral. Level 0 is the trunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub level: u32,
    pub from: Point,
    pub to: Point,
    /// Stroke width after the policy was applied.
    pub width: u32,
    /// Sampled length before endpoint truncation.
    pub length: f64,
}

impl Branch {
    pub fn shape(&self) -> Shape {
        Shape::Line {
            from: self.from,
            to: self.to,
            width: self.width,
        }
    }
}

/// A coral colony rooted at its trunk base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coral {
    /// Bottom midpoint of the trunk.
    pub position: Point,
    /// Length scale; the trunk is `size / 2` long and `size / 10` wide.
    pub size: i32,
    pub levels: u32,
    pub color: Rgb,
    pub stroke: StrokePolicy,
}

impl Coral {
    /// Samples size, color, base position inside `band`, then levels.
    ///
    /// `band` is the inclusive row range of the seafloor.
    pub fn sample(rng: &mut Xorshift64, params: &SceneParams, width: u32, band: (i32, i32)) -> Self {
        let size = rng.next_int(params.coral_size.0, params.coral_size.1);
        let color = params.coral_color.sample(rng);
        let x = rng.next_int(0, width as i32);
        let y = rng.next_int(band.0, band.1);
        let levels = rng.next_int(params.coral_levels.0, params.coral_levels.1).max(0) as u32;
        Self {
            position: Point::new(x, y),
            size,
            levels,
            color,
            stroke: StrokePolicy::from_clamp(params.clamp_stroke),
        }
    }

    /// Unclamped trunk stroke width.
    pub fn trunk_width(&self) -> u32 {
        (self.size / 10).max(0) as u32
    }

    /// Grows the full branch list, trunk first, level by level.
    pub fn grow(&self, rng: &mut Xorshift64) -> Vec<Branch> {
        let trunk_width = self.trunk_width();
        let base = self.position;
        let top = Point::new(base.x, base.y - self.size / 2);
        let mut branches = vec![Branch {
            level: 0,
            from: base,
            to: top,
            width: self.stroke.apply(trunk_width),
            length: f64::from(self.size / 2),
        }];

        let size = f64::from(self.size);
        let mut nodes = vec![top];
        let mut next = Vec::new();
        for level in 0..self.levels {
            let shrink = SHRINK.powi(level as i32 + 1);
            let width = self.stroke.apply((f64::from(trunk_width) * shrink) as u32);
            for &node in &nodes {
                let count = rng.next_int(BRANCHES_PER_NODE.0, BRANCHES_PER_NODE.1);
                for _ in 0..count {
                    let length = rng.next_range(LENGTH_FACTOR.0, LENGTH_FACTOR.1) * size * shrink;
                    let angle = rng.next_range(ANGLE_WINDOW.0, ANGLE_WINDOW.1);
                    // Screen y grows downward, so upward growth subtracts sin.
                    let to = Point::new(
                        (f64::from(node.x) + length * angle.cos()) as i32,
                        (f64::from(node.y) - length * angle.sin()) as i32,
                    );
                    branches.push(Branch {
                        level: level + 1,
                        from: node,
                        to,
                        width,
                        length,
                    });
                    next.push(to);
                }
            }
            std::mem::swap(&mut nodes, &mut next);
            next.clear();
        }
        branches
    }

    /// Grows and strokes the coral, returning the branches drawn.
    pub fn render(&self, canvas: &mut CanvasPair, rng: &mut Xorshift64) -> Vec<Branch> {
        let branches = self.grow(rng);
        for b in &branches {
            canvas.draw(&b.shape(), self.color, Self::LABEL);
        }
        branches
    }
}

impl Organism for Coral {
    const LABEL: Label = Label::Coral;

    fn draw(&self, canvas: &mut CanvasPair, rng: &mut Xorshift64) {
        self.render(canvas, rng);
    }
}
