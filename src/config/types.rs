//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::{BackgroundPattern, color::DEFAULT_PALETTE};
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the default style when the overlay first opens and how pointer
/// motion is sampled into stroke points.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - a named color, a `#rrggbb` hex string, or an RGB
    /// array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default pen thickness in pixels
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Smallest thickness reachable with +/- or the scroll wheel
    #[serde(default = "default_min_thickness")]
    pub min_thickness: f64,

    /// Largest thickness reachable with +/- or the scroll wheel (valid range: up to 200.0)
    #[serde(default = "default_max_thickness")]
    pub max_thickness: f64,

    /// Thickness change per increase/decrease keypress
    #[serde(default = "default_thickness_step")]
    pub thickness_step: f64,

    /// Pointer samples closer than this many pixels to the previous stroke
    /// point are dropped (valid range: 0.0 - 50.0)
    #[serde(default = "default_min_point_distance")]
    pub min_point_distance: f64,

    /// Exponential input smoothing (0.0 = raw input, valid range: 0.0 - 0.95)
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,

    /// Quick-access palette; number keys 1-9 select the first nine entries
    #[serde(default = "default_palette")]
    pub palette: Vec<ColorSpec>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_thickness: default_thickness(),
            min_thickness: default_min_thickness(),
            max_thickness: default_max_thickness(),
            thickness_step: default_thickness_step(),
            min_point_distance: default_min_point_distance(),
            smoothing: default_smoothing(),
            palette: default_palette(),
        }
    }
}

/// Per-tool defaults.
///
/// Selecting a tool resets the thickness to that tool's width.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolsConfig {
    /// Tool active at startup
    #[serde(default = "default_tool")]
    pub default_tool: Tool,

    #[serde(default = "default_pen_width")]
    pub pen_width: f64,

    #[serde(default = "default_highlighter_width")]
    pub highlighter_width: f64,

    #[serde(default = "default_dashed_width")]
    pub dashed_width: f64,

    #[serde(default = "default_eraser_width")]
    pub eraser_width: f64,

    /// Width shared by line, rectangle, ellipse, and arrow
    #[serde(default = "default_shape_width")]
    pub shape_width: f64,

    /// Highlighter alpha (valid range: 0.05 - 1.0)
    #[serde(default = "default_highlighter_opacity")]
    pub highlighter_opacity: f64,

    /// Dashed pen alpha (valid range: 0.05 - 1.0)
    #[serde(default = "default_dashed_opacity")]
    pub dashed_opacity: f64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            pen_width: default_pen_width(),
            highlighter_width: default_highlighter_width(),
            dashed_width: default_dashed_width(),
            eraser_width: default_eraser_width(),
            shape_width: default_shape_width(),
            highlighter_opacity: default_highlighter_opacity(),
            dashed_opacity: default_dashed_opacity(),
        }
    }
}

/// Arrow drawing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Arrowhead length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub length: f64,

    /// Arrowhead angle in degrees (valid range: 15.0 - 60.0)
    /// Smaller angles create narrower arrowheads, larger angles create wider ones
    #[serde(default = "default_arrow_angle")]
    pub angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            length: default_arrow_length(),
            angle_degrees: default_arrow_angle(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum undo steps kept per page (0 = unbounded). Older steps become
    /// permanent once evicted.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

/// Page management settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PagesConfig {
    /// Background for the first page and for new pages
    #[serde(default)]
    pub default_background: BackgroundPattern,

    /// New pages copy the active page's background instead of the default
    #[serde(default)]
    pub inherit_background: bool,

    /// Maximum elements per page (0 = unlimited); commits beyond it are discarded
    #[serde(default)]
    pub max_elements_per_page: usize,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            default_background: BackgroundPattern::default(),
            inherit_background: false,
            max_elements_per_page: 0,
        }
    }
}

/// Screen curtain settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CurtainConfig {
    /// Mask opacity (valid range: 0.1 - 1.0)
    #[serde(default = "default_curtain_opacity")]
    pub opacity: f64,

    /// Initial spotlight radius in pixels (valid range: 50.0 - 500.0)
    #[serde(default = "default_spotlight_radius")]
    pub spotlight_radius: f64,
}

impl Default for CurtainConfig {
    fn default() -> Self {
        Self {
            opacity: default_curtain_opacity(),
            spotlight_radius: default_spotlight_radius(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name(DEFAULT_PALETTE[0].to_string())
}

fn default_thickness() -> f64 {
    3.0
}

fn default_min_thickness() -> f64 {
    1.0
}

fn default_max_thickness() -> f64 {
    80.0
}

fn default_thickness_step() -> f64 {
    2.0
}

fn default_min_point_distance() -> f64 {
    1.0
}

fn default_smoothing() -> f64 {
    0.3
}

fn default_palette() -> Vec<ColorSpec> {
    DEFAULT_PALETTE
        .iter()
        .map(|hex| ColorSpec::Name(hex.to_string()))
        .collect()
}

fn default_tool() -> Tool {
    Tool::Pen
}

fn default_pen_width() -> f64 {
    3.0
}

fn default_highlighter_width() -> f64 {
    20.0
}

fn default_dashed_width() -> f64 {
    3.0
}

fn default_eraser_width() -> f64 {
    25.0
}

fn default_shape_width() -> f64 {
    3.0
}

fn default_highlighter_opacity() -> f64 {
    0.35
}

fn default_dashed_opacity() -> f64 {
    0.7
}

fn default_arrow_length() -> f64 {
    15.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_history_capacity() -> usize {
    100
}

fn default_curtain_opacity() -> f64 {
    0.85
}

fn default_spotlight_radius() -> f64 {
    120.0
}
