//! Page background pattern selection.

use super::color::{Color, TRANSPARENT};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Background pattern drawn beneath a page's elements.
///
/// Only the identifier lives in the engine; the pattern itself is painted by
/// the background renderer from this value and the surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPattern {
    /// No fill; the desktop shows through (default)
    #[default]
    Transparent,
    /// Plain whiteboard
    White,
    /// Square grid with a heavier line every fifth cell
    Grid,
    /// Notebook lines with a margin
    Ruled,
    /// Dot grid
    Dotted,
    /// Dark green chalkboard
    Blackboard,
}

impl BackgroundPattern {
    /// All patterns, in toolbar order.
    pub const ALL: [BackgroundPattern; 6] = [
        Self::Transparent,
        Self::White,
        Self::Grid,
        Self::Ruled,
        Self::Dotted,
        Self::Blackboard,
    ];

    /// Returns the base fill color for this pattern.
    ///
    /// Transparent returns None (no background fill).
    pub fn fill_color(&self) -> Option<Color> {
        let rgb = match self {
            Self::Transparent => return None,
            Self::White => (0xf8, 0xf9, 0xfa),
            Self::Grid => (0xff, 0xff, 0xff),
            Self::Ruled => (0xff, 0xfe, 0xf5),
            Self::Dotted => (0xfa, 0xfa, 0xfa),
            Self::Blackboard => (0x1a, 0x3a, 0x2a),
        };
        Some(Color::from_rgba8(rgb.0, rgb.1, rgb.2, 0xff))
    }

    /// Color an eraser stroke paints with on this background.
    ///
    /// Transparent pages have nothing to paint over, so erasers punch through
    /// instead and this returns [`TRANSPARENT`].
    pub fn eraser_color(&self) -> Color {
        self.fill_color().unwrap_or(TRANSPARENT)
    }

    /// Returns the lowercase identifier used in config files and scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transparent => "transparent",
            Self::White => "white",
            Self::Grid => "grid",
            Self::Ruled => "ruled",
            Self::Dotted => "dotted",
            Self::Blackboard => "blackboard",
        }
    }
}

impl std::str::FromStr for BackgroundPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "transparent" | "none" => Ok(Self::Transparent),
            "white" | "whiteboard" => Ok(Self::White),
            "grid" => Ok(Self::Grid),
            "ruled" | "lined" => Ok(Self::Ruled),
            "dotted" => Ok(Self::Dotted),
            "blackboard" => Ok(Self::Blackboard),
            other => Err(format!("unknown background pattern '{other}'")),
        }
    }
}

impl std::fmt::Display for BackgroundPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_pattern_is_transparent() {
        assert_eq!(BackgroundPattern::default(), BackgroundPattern::Transparent);
    }

    #[test]
    fn test_fill_color() {
        assert_eq!(BackgroundPattern::Transparent.fill_color(), None);
        for pattern in &BackgroundPattern::ALL[1..] {
            let fill = pattern.fill_color().unwrap();
            assert_eq!(fill.a, 1.0);
        }

        let board = BackgroundPattern::Blackboard.fill_color().unwrap();
        assert!(board.g > board.r && board.g > board.b);
    }

    #[test]
    fn test_eraser_color_punches_through_transparent() {
        assert_eq!(BackgroundPattern::Transparent.eraser_color().a, 0.0);
        assert_eq!(
            BackgroundPattern::White.eraser_color(),
            BackgroundPattern::White.fill_color().unwrap()
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            BackgroundPattern::from_str("Grid").unwrap(),
            BackgroundPattern::Grid
        );
        assert_eq!(
            BackgroundPattern::from_str("lined").unwrap(),
            BackgroundPattern::Ruled
        );
        for pattern in BackgroundPattern::ALL {
            assert_eq!(BackgroundPattern::from_str(pattern.as_str()).unwrap(), pattern);
        }
        assert!(BackgroundPattern::from_str("plaid").is_err());
    }
}
