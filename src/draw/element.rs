//! Drawable elements: the atomic unit stored on a page and tracked by history.

use super::point::Point;
use super::shape::Shape;
use super::stroke::Stroke;
use crate::util::Rect;
use serde::{Deserialize, Serialize};

/// Engine-unique identity of a committed element.
///
/// History reverts by id, so two elements with identical geometry are never
/// confused with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An already-decoded image placed on the page.
///
/// The bitmap itself is owned by the image manager; the element only keeps a
/// reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Top-left corner
    pub position: Point,
    /// Bitmap reference understood by the image manager (path or library key)
    pub source: String,
    pub width: f64,
    pub height: f64,
}

impl ImageElement {
    /// Returns true if the placement is finite and has positive size.
    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        Rect::covering(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

/// The drawable payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Stroke(Stroke),
    Shape(Shape),
    Image(ImageElement),
}

impl ElementKind {
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            ElementKind::Stroke(stroke) => stroke.bounding_box(),
            ElementKind::Shape(shape) => shape.bounding_box(),
            ElementKind::Image(image) => image.bounding_box(),
        }
    }

    /// Short lowercase label, used in logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Stroke(_) => "stroke",
            ElementKind::Shape(_) => "shape",
            ElementKind::Image(_) => "image",
        }
    }
}

/// A committed element with its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self { id, kind }
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        self.kind.bounding_box()
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match &self.kind {
            ElementKind::Stroke(stroke) => Some(stroke),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match &self.kind {
            ElementKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: f64, height: f64) -> ImageElement {
        ImageElement {
            position: Point::new(10.0, 10.0),
            source: "diagram.png".to_string(),
            width,
            height,
        }
    }

    #[test]
    fn image_validity_requires_positive_size() {
        assert!(image(200.0, 100.0).is_valid());
        assert!(!image(0.0, 100.0).is_valid());
        assert!(!image(200.0, f64::NAN).is_valid());
    }

    #[test]
    fn image_bounds_match_placement() {
        let rect = image(200.0, 100.0).bounding_box().unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (10, 10, 200, 100));
    }

    #[test]
    fn element_serializes_with_type_tag() {
        let element = Element::new(ElementId(7), ElementKind::Image(image(20.0, 20.0)));
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], "image");
        assert_eq!(json["source"], "diagram.png");
    }
}
