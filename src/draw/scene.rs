//! Render-ready snapshot of the active page.

use super::background::BackgroundPattern;
use super::element::{Element, ElementKind};
use crate::input::curtain::Curtain;
use serde::Serialize;

/// Alpha multiplier applied to a shape preview while it is being dragged.
pub const SHAPE_PREVIEW_ALPHA: f64 = 0.6;

/// The in-progress element as the renderer should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Multiplier for the element's own alpha
    pub alpha_scale: f64,
}

/// Immutable copy of everything needed to draw one frame.
///
/// Owned data only, so it can be handed to a render thread while the engine
/// keeps processing input. Committed elements never include the preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub page_index: usize,
    pub page_count: usize,
    pub background: BackgroundPattern,
    /// Committed elements in draw order
    pub elements: Vec<Element>,
    /// Drawn on top of `elements` when present
    pub preview: Option<Preview>,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Drawn last, over the preview
    pub curtain: Curtain,
}

impl Scene {
    /// Counts committed elements by label (`stroke`, `shape`, `image`).
    pub fn count(&self, label: &str) -> usize {
        self.elements
            .iter()
            .filter(|element| element.kind.label() == label)
            .count()
    }
}
