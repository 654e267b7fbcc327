//! Drawing tool selection.

use crate::draw::{ShapeKind, StrokeTool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines what is built when the pointer goes down:
/// freehand tools record a point path, shape tools drag out two anchors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Freehand drawing (default)
    #[default]
    Pen,
    /// Wide translucent marker
    Highlighter,
    /// Freehand with a dash pattern
    DashedPen,
    /// Freehand stroke painted with the page background
    Eraser,
    /// Straight line between start and end points
    Line,
    /// Rectangle outline from corner to corner
    Rectangle,
    /// Ellipse inscribed in the dragged rectangle
    Ellipse,
    /// Line with a head at the release point
    Arrow,
}

/// What a tool produces when a pointer session commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Stroke(StrokeTool),
    Shape(ShapeKind),
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Pen,
        Tool::Highlighter,
        Tool::DashedPen,
        Tool::Eraser,
        Tool::Line,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Arrow,
    ];

    pub fn kind(self) -> ToolKind {
        match self {
            Tool::Pen => ToolKind::Stroke(StrokeTool::Pen),
            Tool::Highlighter => ToolKind::Stroke(StrokeTool::Highlighter),
            Tool::DashedPen => ToolKind::Stroke(StrokeTool::DashedPen),
            Tool::Eraser => ToolKind::Stroke(StrokeTool::Eraser),
            Tool::Line => ToolKind::Shape(ShapeKind::Line),
            Tool::Rectangle => ToolKind::Shape(ShapeKind::Rectangle),
            Tool::Ellipse => ToolKind::Shape(ShapeKind::Ellipse),
            Tool::Arrow => ToolKind::Shape(ShapeKind::Arrow),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Highlighter => "highlighter",
            Tool::DashedPen => "dashed-pen",
            Tool::Eraser => "eraser",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Ellipse => "ellipse",
            Tool::Arrow => "arrow",
        }
    }
}

impl std::str::FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pen" => Ok(Tool::Pen),
            "highlighter" | "marker" => Ok(Tool::Highlighter),
            "dashed-pen" | "dashed_pen" | "dashed" => Ok(Tool::DashedPen),
            "eraser" => Ok(Tool::Eraser),
            "line" => Ok(Tool::Line),
            "rectangle" | "rect" => Ok(Tool::Rectangle),
            "ellipse" | "circle" => Ok(Tool::Ellipse),
            "arrow" => Ok(Tool::Arrow),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for tool in Tool::ALL {
            assert_eq!(tool.as_str().parse::<Tool>(), Ok(tool));
        }
        assert_eq!("Rect".parse::<Tool>(), Ok(Tool::Rectangle));
        assert!("lasso".parse::<Tool>().is_err());
    }

    #[test]
    fn serde_names_match_display() {
        let json = serde_json::to_string(&Tool::DashedPen).unwrap();
        assert_eq!(json, "\"dashed-pen\"");
    }

    #[test]
    fn kinds_split_freehand_from_shapes() {
        assert_eq!(Tool::Eraser.kind(), ToolKind::Stroke(StrokeTool::Eraser));
        assert_eq!(Tool::Arrow.kind(), ToolKind::Shape(ShapeKind::Arrow));
    }
}
