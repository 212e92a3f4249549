//! Screen-space values derived from node positions.
//!
//! Nothing here is stored on edges: endpoints, label placement and drag
//! bounds are recomputed from the current nodes whenever they are needed.

use crate::config::EditorConfig;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub};

/// A position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A displacement in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn distance(self, other: Point) -> f32 {
        (other - self).length()
    }
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    pub fn dot(self, other: Vector) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn scale(self, factor: f32) -> Vector {
        Vector::new(self.x * factor, self.y * factor)
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Point> for Point {
    type Output = Vector;
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

/// A straight line between two rendered positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }

    /// Shortest distance from `p` to any point of the segment.
    pub fn distance_to(&self, p: Point) -> f32 {
        let along = self.to - self.from;
        let len_sq = along.length_sq();
        if len_sq < f32::EPSILON {
            return p.distance(self.from);
        }
        let t = ((p - self.from).dot(along) / len_sq).clamp(0.0, 1.0);
        p.distance(self.from + along.scale(t))
    }
}

// ------------------------------------------------------------------
// Edge labels
// ------------------------------------------------------------------

/// Which side of the anchor the weight text occupies.
///
/// Text always grows toward the higher-x endpoint; only the vertical side
/// depends on the edge's slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    /// Text sits above the anchor, extending right.
    AboveRight,
    /// Text hangs below the anchor, extending right.
    BelowRight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub anchor: Point,
    pub side: LabelSide,
}

/// Place an edge label at the midpoint, on the side the line does not cross.
///
/// A line rising toward higher x passes through the upper-right quadrant of
/// its midpoint, so the label goes below; any other line leaves the
/// upper-right quadrant free.
pub fn label_placement(p: Point, q: Point) -> LabelPlacement {
    let (left, right) = if p.x < q.x { (p, q) } else { (q, p) };
    let side = if left.y > right.y {
        LabelSide::BelowRight
    } else {
        LabelSide::AboveRight
    };
    LabelPlacement {
        anchor: p.midpoint(q),
        side,
    }
}

// ------------------------------------------------------------------
// Drag bounds
// ------------------------------------------------------------------

/// Legal drag offsets for one node, in offset space.
///
/// `left`/`top` are never positive and `right`/`bottom` never negative, so
/// the zero offset is always inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl DragBounds {
    /// Bounds keeping a node whose base is `base` fully on the canvas.
    pub fn for_base(base: Point, config: &EditorConfig) -> Self {
        let pad = config.node.clearance();
        let canvas = &config.canvas;
        Self {
            left: (pad - base.x).min(0.0),
            top: (pad - base.y).min(0.0),
            right: (canvas.width - base.x - pad).max(0.0),
            bottom: (canvas.height - base.y - pad).max(0.0),
        }
    }

    pub fn contains(&self, offset: Vector) -> bool {
        (self.left..=self.right).contains(&offset.x)
            && (self.top..=self.bottom).contains(&offset.y)
    }

    pub fn clamp(&self, offset: Vector) -> Vector {
        Vector::new(
            offset.x.clamp(self.left, self.right),
            offset.y.clamp(self.top, self.bottom),
        )
    }
}
