//! Parametric shapes defined by two anchor points.

use super::color::Color;
use super::point::{Extent, Point};
use crate::util::{self, Rect};
use serde::{Deserialize, Serialize};

/// Shape tool variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Straight line from start to end
    Line,
    /// Axis-aligned rectangle spanning the two anchors
    Rectangle,
    /// Ellipse inscribed in the anchor rectangle
    Ellipse,
    /// Line with a head at the end anchor
    Arrow,
}

/// Arrowhead appearance, captured when the arrow is started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowHead {
    /// Head length in pixels (capped at 30% of the shaft when rendered)
    pub length: f64,
    /// Angle between each wing and the shaft, in degrees
    pub angle_degrees: f64,
}

impl Default for ArrowHead {
    fn default() -> Self {
        Self {
            length: 15.0,
            angle_degrees: 30.0,
        }
    }
}

/// A committed shape. Shapes always render at full opacity.
///
/// `start == end` is allowed; such a shape commits and simply draws nothing
/// visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub start: Point,
    pub end: Point,
    pub color: Color,
    /// Outline thickness in pixels
    pub thickness: f64,
    #[serde(default)]
    pub head: ArrowHead,
}

/// Render-ready geometry for a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeGeometry {
    Line {
        from: Point,
        to: Point,
    },
    /// Normalized so width and height are non-negative
    Rectangle {
        origin: Point,
        width: f64,
        height: f64,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
    },
    Arrow {
        tail: Point,
        tip: Point,
        wings: [Point; 2],
    },
}

impl Shape {
    /// Opacity applied when rendering. Fixed for every shape kind.
    pub const OPACITY: f64 = 1.0;

    /// Resolves the anchors into drawable geometry.
    pub fn geometry(&self) -> ShapeGeometry {
        match self.kind {
            ShapeKind::Line => ShapeGeometry::Line {
                from: self.start,
                to: self.end,
            },
            ShapeKind::Rectangle => ShapeGeometry::Rectangle {
                origin: Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
                width: (self.end.x - self.start.x).abs(),
                height: (self.end.y - self.start.y).abs(),
            },
            ShapeKind::Ellipse => {
                let (center, rx, ry) = util::ellipse_bounds(self.start, self.end);
                ShapeGeometry::Ellipse { center, rx, ry }
            }
            ShapeKind::Arrow => ShapeGeometry::Arrow {
                tail: self.start,
                tip: self.end,
                wings: util::calculate_arrowhead(
                    self.start,
                    self.end,
                    self.head.length,
                    self.head.angle_degrees,
                ),
            },
        }
    }

    /// Returns the axis-aligned bounding box for this shape, expanded to cover stroke width.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut extent = Extent::from_point(self.start);
        extent.include(self.end);
        if let ShapeGeometry::Arrow { wings, .. } = self.geometry() {
            for wing in wings {
                extent.include(wing);
            }
        }
        let extent = extent.inflate((self.thickness / 2.0).ceil().max(1.0));
        Rect::covering(extent.min_x, extent.min_y, extent.max_x, extent.max_y)
    }
}

/// A shape under construction; only the end anchor moves.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeBuilder {
    shape: Shape,
}

impl ShapeBuilder {
    /// Starts a zero-size shape with both anchors at `origin`.
    pub fn new(kind: ShapeKind, origin: Point, color: Color, thickness: f64, head: ArrowHead) -> Self {
        Self {
            shape: Shape {
                kind,
                start: origin,
                end: origin,
                color,
                thickness,
                head,
            },
        }
    }

    /// Moves the end anchor to `current`.
    pub fn update_preview(&mut self, current: Point) {
        self.shape.end = current;
    }

    /// The shape as it would commit right now.
    pub fn preview(&self) -> &Shape {
        &self.shape
    }

    /// Freezes both anchors. Zero-area shapes are not rejected.
    pub fn finalize(self) -> Shape {
        self.shape
    }
}
