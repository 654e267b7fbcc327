//! Drawing model: strokes, shapes, pages, and undo history.
//!
//! This module defines the core drawing types used for screen annotation:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Stroke`] / [`Shape`]: committed freehand paths and parametric shapes
//! - [`Element`]: the identity-carrying unit stored on a [`Page`]
//! - [`History`]: per-page undo/redo stacks
//! - [`Scene`]: owned snapshot handed to renderers

pub mod background;
pub mod color;
pub mod dirty;
pub mod element;
pub mod history;
pub mod page;
pub mod path;
pub mod point;
pub mod scene;
pub mod shape;
pub mod stroke;

// Re-export commonly used types at module level
pub use background::BackgroundPattern;
pub use color::Color;
pub use dirty::DirtyTracker;
pub use element::{Element, ElementId, ElementKind, ImageElement};
pub use history::{History, HistoryDirection, HistoryEntry, HistoryError};
pub use page::Page;
pub use point::Point;
pub use scene::{Preview, Scene};
pub use shape::{ArrowHead, Shape, ShapeBuilder, ShapeGeometry, ShapeKind};
pub use stroke::{Sampling, Stroke, StrokeBuilder, StrokePaint, StrokeTool};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
