//! Utility functions for colors, geometry, and arrowhead calculations.
//!
//! This module provides:
//! - Color name and hex parsing for configuration and scripts
//! - Arrowhead geometry calculations
//! - Ellipse bounds and the integer [`Rect`] used for damage tracking

use crate::draw::{Color, Point, color::*};

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates arrowhead points with custom length and angle.
///
/// Creates a V-shaped arrowhead at `tip` pointing in the direction from
/// `tail` to `tip`. The arrowhead length is capped at 30% of the shaft length
/// so short arrows don't end up all head.
///
/// # Returns
/// Two points `[left, right]` for the arrowhead wings.
/// If the shaft is shorter than one pixel, both points equal `tip`.
pub fn calculate_arrowhead(tail: Point, tip: Point, length: f64, angle_degrees: f64) -> [Point; 2] {
    let dx = tip.x - tail.x;
    let dy = tip.y - tail.y;
    let line_length = (dx * dx + dy * dy).sqrt();

    if line_length < 1.0 {
        return [tip, tip];
    }

    // Unit vector along the shaft, pointing at the tip
    let ux = dx / line_length;
    let uy = dy / line_length;

    let arrow_length = length.min(line_length * 0.3);

    let angle = angle_degrees.to_radians();
    let cos_a = angle.cos();
    let sin_a = angle.sin();

    let left = Point::new(
        tip.x - arrow_length * (ux * cos_a - uy * sin_a),
        tip.y - arrow_length * (uy * cos_a + ux * sin_a),
    );
    let right = Point::new(
        tip.x - arrow_length * (ux * cos_a + uy * sin_a),
        tip.y - arrow_length * (uy * cos_a - ux * sin_a),
    );

    [left, right]
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and the replay script to parse color names.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Parses `#rrggbb` or `#rrggbbaa` hex notation (leading `#` optional).
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let r = channel(0)?;
    let g = channel(2)?;
    let b = channel(4)?;
    let a = if digits.len() == 8 { channel(6)? } else { 255 };

    Some(Color::from_rgba8(r, g, b, a))
}

/// Parses either a named color or a hex color.
pub fn parse_color(spec: &str) -> Option<Color> {
    name_to_color(spec).or_else(|| hex_to_color(spec))
}

/// Maps a Color value to its human-readable name.
///
/// Uses approximate matching (threshold-based) to identify colors.
/// Returns "Custom" if the color doesn't match any predefined color.
pub fn color_to_name(color: &Color) -> &'static str {
    if color.r > 0.9 && color.g < 0.1 && color.b < 0.1 {
        "Red"
    } else if color.r < 0.1 && color.g > 0.9 && color.b < 0.1 {
        "Green"
    } else if color.r < 0.1 && color.g < 0.1 && color.b > 0.9 {
        "Blue"
    } else if color.r > 0.9 && color.g > 0.9 && color.b < 0.1 {
        "Yellow"
    } else if color.r > 0.9 && (0.4..=0.6).contains(&color.g) && color.b < 0.1 {
        "Orange"
    } else if color.r > 0.9 && color.g < 0.1 && color.b > 0.9 {
        "Pink"
    } else if color.r > 0.9 && color.g > 0.9 && color.b > 0.9 {
        "White"
    } else if color.r < 0.1 && color.g < 0.1 && color.b < 0.1 {
        "Black"
    } else {
        "Custom"
    }
}

/// Formats a color as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub fn color_to_hex(color: &Color) -> String {
    let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let rgb = format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.r),
        channel(color.g),
        channel(color.b)
    );
    if color.a < 1.0 {
        format!("{rgb}{:02x}", channel(color.a))
    } else {
        rgb
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Largest pixel coordinate magnitude a [`Rect`] built from geometry can reach.
///
/// Far beyond any real surface; keeps widths and right edges inside `i32`.
pub const COORD_LIMIT: i64 = (i32::MAX / 2) as i64;

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::from_wide(min_x.into(), min_y.into(), max_x.into(), max_y.into())
    }

    /// Builds the smallest integer rectangle covering the given float bounds.
    ///
    /// Zero-extent axes are widened to one pixel so degenerate geometry still
    /// produces damage. Bounds are clamped to [`COORD_LIMIT`].
    pub fn covering(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Self> {
        let (min_x, max_x) = widen_axis(min_x, max_x);
        let (min_y, max_y) = widen_axis(min_y, max_y);
        Self::from_wide(min_x, min_y, max_x, max_y)
    }

    fn from_wide(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Option<Self> {
        let clamp = |v: i64| v.clamp(-COORD_LIMIT, COORD_LIMIT);
        let (min_x, min_y) = (clamp(min_x), clamp(min_y));
        let (max_x, max_y) = (clamp(max_x), clamp(max_y));
        // Both ends lie within +-COORD_LIMIT, so every difference fits in i32.
        Self::new(
            min_x as i32,
            min_y as i32,
            (max_x - min_x) as i32,
            (max_y - min_y) as i32,
        )
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(self, other: Rect) -> Rect {
        let right = |r: &Rect| i64::from(r.x) + i64::from(r.width);
        let bottom = |r: &Rect| i64::from(r.y) + i64::from(r.height);
        let min_x = i64::from(self.x.min(other.x));
        let min_y = i64::from(self.y.min(other.y));
        let max_x = right(&self).max(right(&other));
        let max_y = bottom(&self).max(bottom(&other));
        Self::from_wide(min_x, min_y, max_x, max_y).unwrap_or(self)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Rounds a float span outwards, clamps it, and widens an empty span to one pixel.
fn widen_axis(min: f64, max: f64) -> (i64, i64) {
    let clamp = |v: f64| (v as i64).clamp(-COORD_LIMIT, COORD_LIMIT);
    let (min, max) = (clamp(min.floor()), clamp(max.ceil()));
    match max - min {
        0 if max < COORD_LIMIT => (min, max + 1),
        0 => (min - 1, max),
        _ => (min, max),
    }
}

/// Calculates ellipse parameters from two corner points.
///
/// Converts a drag rectangle (from corner to corner) into ellipse parameters
/// (center point and radii).
///
/// # Returns
/// Tuple `(center, rx, ry)` where `rx`/`ry` are half the width/height.
pub fn ellipse_bounds(a: Point, b: Point) -> (Point, f64, f64) {
    let center = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    let rx = (b.x - a.x).abs() / 2.0;
    let ry = (b.y - a.y).abs() / 2.0;
    (center, rx, ry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED, WHITE};

    #[test]
    fn covering_clamps_far_coordinates() {
        let rect = Rect::covering(3.0e9, 3.0e9, 3.0e9, 3.0e9).unwrap();
        assert_eq!(rect.x as i64, COORD_LIMIT - 1);
        assert_eq!(rect.width, 1);

        let wide = Rect::covering(-3.0e9, 0.0, 3.0e9, 10.0).unwrap();
        assert_eq!(wide.x as i64, -COORD_LIMIT);
        assert_eq!(wide.width as i64, 2 * COORD_LIMIT);

        let merged = rect.union(wide);
        assert_eq!(merged.x as i64, -COORD_LIMIT);
        assert!(merged.is_valid());
    }

    #[test]
    fn from_min_max_handles_extreme_bounds() {
        assert!(Rect::from_min_max(i32::MIN, 0, i32::MAX, 10).is_some());
        assert!(Rect::from_min_max(5, 5, 5, 10).is_none());
    }

    #[test]
    fn hex_formatting_round_trips() {
        assert_eq!(color_to_hex(&RED), "#ff0000");
        assert_eq!(hex_to_color(&color_to_hex(&WHITE)), Some(WHITE));
        let translucent = Color::from_rgba8(0, 0, 0, 128);
        assert_eq!(color_to_hex(&translucent), "#00000080");
        assert_eq!(color_to_hex(&BLACK), "#000000");
    }

    #[test]
    fn arrowhead_caps_at_thirty_percent_of_line_length() {
        let [left, _] =
            calculate_arrowhead(Point::new(0.0, 10.0), Point::new(10.0, 10.0), 100.0, 30.0);
        let distance = ((10.0 - left.x).powi(2) + (10.0 - left.y).powi(2)).sqrt();
        assert!((distance - 3.0).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_wings_sit_behind_the_tip() {
        let [left, right] =
            calculate_arrowhead(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 15.0, 30.0);
        assert!(left.x < 100.0 && right.x < 100.0);
        assert!((left.y + right.y).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_handles_degenerate_lines() {
        let tip = Point::new(5.0, 5.0);
        let [left, right] = calculate_arrowhead(tip, tip, 15.0, 45.0);
        assert_eq!(left, tip);
        assert_eq!(right, tip);
    }

    #[test]
    fn ellipse_bounds_compute_center_and_radii() {
        let (center, rx, ry) = ellipse_bounds(Point::new(10.0, 4.0), Point::new(0.0, 0.0));
        assert_eq!(center, Point::new(5.0, 2.0));
        assert_eq!((rx, ry), (5.0, 2.0));
    }

    #[test]
    fn name_and_hex_color_parsing() {
        assert_eq!(name_to_color("Red").unwrap(), RED);
        assert!(name_to_color("chartreuse").is_none());
        assert_eq!(hex_to_color("#ffffff").unwrap(), WHITE);
        assert_eq!(hex_to_color("000000ff").unwrap(), BLACK);
        assert!(hex_to_color("#fff").is_none());
        assert!(hex_to_color("#gg0000").is_none());
        assert_eq!(parse_color("black").unwrap(), BLACK);
    }

    #[test]
    fn color_to_name_matches_known_colors() {
        assert_eq!(color_to_name(&RED), "Red");
        assert_eq!(color_to_name(&BLACK), "Black");
        assert_eq!(color_to_name(&Color::new(0.42, 0.42, 0.42, 1.0)), "Custom");
    }

    #[test]
    fn covering_widens_degenerate_extent() {
        let rect = Rect::covering(5.0, 5.0, 5.0, 5.0).unwrap();
        assert_eq!(rect, Rect::new(5, 5, 1, 1).unwrap());
    }

    #[test]
    fn union_spans_both_rectangles() {
        let a = Rect::new(0, 0, 10, 10).unwrap();
        let b = Rect::new(20, 5, 5, 20).unwrap();
        assert_eq!(a.union(b), Rect::new(0, 0, 25, 25).unwrap());
    }
}
