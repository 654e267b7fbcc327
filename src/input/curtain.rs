//! Screen curtain: a dark mask over the overlay with a reveal window.
//!
//! `Full` covers everything except a rectangle whose edges can be dragged.
//! `Spotlight` leaves a circle around the pointer uncovered.

use crate::draw::Point;
use crate::util::Rect;
use serde::Serialize;

/// Smallest width or height an edge drag can shrink the reveal area to.
pub const MIN_REVEAL_SIZE: f64 = 50.0;
/// How close (in pixels) a press must land to an edge to grab it.
pub const EDGE_GRAB_MARGIN: f64 = 20.0;
pub const SPOTLIGHT_RADIUS_MIN: f64 = 50.0;
pub const SPOTLIGHT_RADIUS_MAX: f64 = 500.0;
/// Scroll units per pixel of spotlight radius change (one notch is 120 units).
pub const SCROLL_UNITS_PER_RADIUS_PIXEL: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurtainMode {
    #[default]
    Off,
    /// Everything masked except a draggable reveal rectangle
    Full,
    /// Everything masked except a circle following the pointer
    Spotlight,
}

impl CurtainMode {
    /// Cycle order: off, full, spotlight, off.
    pub fn next(self) -> Self {
        match self {
            CurtainMode::Off => CurtainMode::Full,
            CurtainMode::Full => CurtainMode::Spotlight,
            CurtainMode::Spotlight => CurtainMode::Off,
        }
    }

    pub fn is_active(self) -> bool {
        self != CurtainMode::Off
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CurtainMode::Off => "off",
            CurtainMode::Full => "full",
            CurtainMode::Spotlight => "spotlight",
        }
    }
}

impl std::fmt::Display for CurtainMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CurtainMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Ok(CurtainMode::Off),
            "full" => Ok(CurtainMode::Full),
            "spotlight" | "spot" => Ok(CurtainMode::Spotlight),
            other => Err(format!("unknown curtain mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CurtainEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Uncovered rectangle in `Full` mode, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RevealArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl RevealArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Top third of a surface, the initial window when the curtain drops.
    pub fn top_third(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: width,
            bottom: (height / 3.0).floor(),
        }
    }

    fn spans_x(&self, x: f64) -> bool {
        self.left < x && x < self.right
    }

    fn spans_y(&self, y: f64) -> bool {
        self.top < y && y < self.bottom
    }
}

/// Curtain state owned by the engine and copied into each [`crate::draw::Scene`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curtain {
    mode: CurtainMode,
    /// Mask alpha, 0.0-1.0
    opacity: f64,
    reveal: RevealArea,
    #[serde(skip)]
    dragging: Option<CurtainEdge>,
    spotlight_center: Point,
    spotlight_radius: f64,
}

impl Default for Curtain {
    fn default() -> Self {
        Self::new(0.85, 120.0)
    }
}

impl Curtain {
    pub fn new(opacity: f64, spotlight_radius: f64) -> Self {
        Self {
            mode: CurtainMode::Off,
            opacity: opacity.clamp(0.0, 1.0),
            reveal: RevealArea::default(),
            dragging: None,
            spotlight_center: Point::default(),
            spotlight_radius: spotlight_radius.clamp(SPOTLIGHT_RADIUS_MIN, SPOTLIGHT_RADIUS_MAX),
        }
    }

    pub fn mode(&self) -> CurtainMode {
        self.mode
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn reveal(&self) -> RevealArea {
        self.reveal
    }

    pub fn dragging_edge(&self) -> Option<CurtainEdge> {
        self.dragging
    }

    pub fn spotlight_center(&self) -> Point {
        self.spotlight_center
    }

    pub fn spotlight_radius(&self) -> f64 {
        self.spotlight_radius
    }

    /// True while pointer motion changes the curtain (edge drag or spotlight).
    pub fn tracks_pointer(&self) -> bool {
        self.dragging.is_some() || self.mode == CurtainMode::Spotlight
    }

    /// Switches mode for a surface of the given size.
    ///
    /// Dropping the full curtain reveals the top third of the surface; the
    /// spotlight starts at the surface center. Any edge drag is released.
    pub fn set_mode(&mut self, mode: CurtainMode, surface_width: f64, surface_height: f64) {
        self.mode = mode;
        self.dragging = None;
        match mode {
            CurtainMode::Off => {}
            CurtainMode::Full => {
                self.reveal = RevealArea::top_third(surface_width, surface_height);
            }
            CurtainMode::Spotlight => {
                self.spotlight_center = Point::new(surface_width / 2.0, surface_height / 2.0);
            }
        }
    }

    /// Starts dragging the reveal edge nearest `point`, if one is in reach.
    ///
    /// Only the full curtain has edges. Bottom and right win ties, so a small
    /// window can still be grown.
    pub fn grab_edge(&mut self, point: Point) -> Option<CurtainEdge> {
        if self.mode != CurtainMode::Full {
            return None;
        }
        let r = self.reveal;
        let near = |a: f64, b: f64| (a - b).abs() < EDGE_GRAB_MARGIN;

        self.dragging = if near(point.y, r.bottom) && r.spans_x(point.x) {
            Some(CurtainEdge::Bottom)
        } else if near(point.x, r.right) && r.spans_y(point.y) {
            Some(CurtainEdge::Right)
        } else if near(point.y, r.top) && r.spans_x(point.x) {
            Some(CurtainEdge::Top)
        } else if near(point.x, r.left) && r.spans_y(point.y) {
            Some(CurtainEdge::Left)
        } else {
            None
        };
        self.dragging
    }

    /// Moves the grabbed edge to `point`, keeping [`MIN_REVEAL_SIZE`].
    ///
    /// Returns true if the reveal area changed.
    pub fn drag_to(&mut self, point: Point) -> bool {
        let Some(edge) = self.dragging else {
            return false;
        };
        let before = self.reveal;
        let r = &mut self.reveal;
        match edge {
            CurtainEdge::Bottom => r.bottom = point.y.max(r.top + MIN_REVEAL_SIZE),
            CurtainEdge::Right => r.right = point.x.max(r.left + MIN_REVEAL_SIZE),
            CurtainEdge::Top => r.top = point.y.min(r.bottom - MIN_REVEAL_SIZE),
            CurtainEdge::Left => r.left = point.x.min(r.right - MIN_REVEAL_SIZE),
        }
        self.reveal != before
    }

    /// Ends an edge drag. Returns true if one was in progress.
    pub fn release_edge(&mut self) -> bool {
        self.dragging.take().is_some()
    }

    /// Moves the spotlight to `point`. Returns true if it moved.
    pub fn follow(&mut self, point: Point) -> bool {
        if self.mode != CurtainMode::Spotlight || self.spotlight_center == point {
            return false;
        }
        self.spotlight_center = point;
        true
    }

    /// Grows or shrinks the spotlight, clamped to
    /// [`SPOTLIGHT_RADIUS_MIN`]..=[`SPOTLIGHT_RADIUS_MAX`]. Returns the new radius.
    pub fn adjust_radius(&mut self, delta: f64) -> f64 {
        self.spotlight_radius =
            (self.spotlight_radius + delta).clamp(SPOTLIGHT_RADIUS_MIN, SPOTLIGHT_RADIUS_MAX);
        self.spotlight_radius
    }

    /// Area covered by the spotlight circle.
    pub fn spotlight_bounds(&self) -> Option<Rect> {
        let c = self.spotlight_center;
        let r = self.spotlight_radius;
        Rect::covering(c.x - r, c.y - r, c.x + r, c.y + r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_curtain() -> Curtain {
        let mut curtain = Curtain::default();
        curtain.set_mode(CurtainMode::Full, 900.0, 600.0);
        curtain
    }

    #[test]
    fn modes_cycle_off_full_spotlight() {
        let mut mode = CurtainMode::Off;
        let mut seen = Vec::new();
        for _ in 0..4 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![
                CurtainMode::Full,
                CurtainMode::Spotlight,
                CurtainMode::Off,
                CurtainMode::Full
            ]
        );
        assert_eq!("spot".parse::<CurtainMode>(), Ok(CurtainMode::Spotlight));
        assert!("half".parse::<CurtainMode>().is_err());
    }

    #[test]
    fn full_curtain_starts_with_top_third_revealed() {
        let curtain = full_curtain();
        assert_eq!(
            curtain.reveal(),
            RevealArea {
                left: 0.0,
                top: 0.0,
                right: 900.0,
                bottom: 200.0
            }
        );
    }

    #[test]
    fn grabbing_needs_a_press_near_an_edge() {
        let mut curtain = full_curtain();
        assert_eq!(curtain.grab_edge(Point::new(450.0, 210.0)), Some(CurtainEdge::Bottom));
        assert_eq!(curtain.grab_edge(Point::new(890.0, 100.0)), Some(CurtainEdge::Right));
        assert_eq!(curtain.grab_edge(Point::new(450.0, 100.0)), None);
        assert_eq!(curtain.grab_edge(Point::new(450.0, 400.0)), None);
        assert!(!curtain.tracks_pointer());
    }

    #[test]
    fn edge_drag_keeps_minimum_reveal_size() {
        let mut curtain = full_curtain();
        curtain.grab_edge(Point::new(450.0, 200.0));
        assert!(curtain.drag_to(Point::new(450.0, 420.0)));
        assert_eq!(curtain.reveal().bottom, 420.0);

        assert!(curtain.drag_to(Point::new(450.0, -80.0)));
        assert_eq!(curtain.reveal().height(), MIN_REVEAL_SIZE);
        assert!(!curtain.drag_to(Point::new(450.0, -120.0)));

        assert!(curtain.release_edge());
        assert!(!curtain.drag_to(Point::new(450.0, 500.0)));
        assert_eq!(curtain.reveal().height(), MIN_REVEAL_SIZE);
    }

    #[test]
    fn left_edge_stops_short_of_right_edge() {
        let mut curtain = full_curtain();
        curtain.grab_edge(Point::new(450.0, 199.0));
        curtain.drag_to(Point::new(0.0, 300.0));
        curtain.release_edge();

        assert_eq!(curtain.grab_edge(Point::new(5.0, 100.0)), Some(CurtainEdge::Left));
        curtain.drag_to(Point::new(2000.0, 100.0));
        assert_eq!(curtain.reveal().left, 900.0 - MIN_REVEAL_SIZE);
    }

    #[test]
    fn spotlight_follows_pointer_and_clamps_radius() {
        let mut curtain = Curtain::default();
        curtain.set_mode(CurtainMode::Spotlight, 800.0, 600.0);
        assert_eq!(curtain.spotlight_center(), Point::new(400.0, 300.0));
        assert!(curtain.tracks_pointer());
        assert!(curtain.follow(Point::new(10.0, 20.0)));
        assert!(!curtain.follow(Point::new(10.0, 20.0)));

        assert_eq!(curtain.adjust_radius(24.0), 144.0);
        assert_eq!(curtain.adjust_radius(10_000.0), SPOTLIGHT_RADIUS_MAX);
        assert_eq!(curtain.adjust_radius(-10_000.0), SPOTLIGHT_RADIUS_MIN);
        assert_eq!(curtain.grab_edge(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn configured_radius_is_clamped() {
        assert_eq!(Curtain::new(0.85, 5.0).spotlight_radius(), SPOTLIGHT_RADIUS_MIN);
        assert_eq!(Curtain::new(2.0, 120.0).opacity(), 1.0);
    }
}
