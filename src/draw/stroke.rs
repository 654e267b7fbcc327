//! Freehand strokes: the in-progress builder and the committed, immutable form.

use super::background::BackgroundPattern;
use super::color::Color;
use super::point::{Extent, Point};
use crate::util::Rect;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Freehand tool variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeTool {
    /// Solid pen with round caps
    Pen,
    /// Wide, translucent marker with flat caps
    Highlighter,
    /// Pen with a dash pattern and reduced alpha
    DashedPen,
    /// Paints with the page background (or clears on transparent pages)
    Eraser,
}

/// How a stroke combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Composite {
    /// Regular alpha blending
    Over,
    /// Removes existing pixels along the path
    Clear,
}

/// Line cap style for stroke rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineCap {
    Round,
    Butt,
}

/// Per-tool stroke appearance resolved against a page background.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokePaint {
    /// Source color with the stroke opacity folded into alpha
    pub color: Color,
    pub width: f64,
    pub cap: LineCap,
    /// `[on, off]` dash lengths, if dashed
    pub dash: Option<[f64; 2]>,
    pub composite: Composite,
}

/// Sampling parameters for turning pointer motion into stroke points.
///
/// `min_distance` is measured from the last recorded point to the *smoothed*
/// sample, not the raw one. With smoothing `s` a raw sample moves the stroke
/// end by only `(1 - s)` of its offset, so slow motion just past the threshold
/// can be dropped and the recorded end trails the pointer. Callers should feed
/// the release position as a final sample before finalizing;
/// `CanvasEngine::on_mouse_release` does this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    /// Smoothed samples closer than this to the previous recorded point are dropped
    pub min_distance: f64,
    /// Exponential smoothing factor in `0.0..1.0` (0 = raw input)
    pub smoothing: f64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            smoothing: 0.0,
        }
    }
}

/// A committed freehand stroke. Immutable; clones share point storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub tool: StrokeTool,
    /// Points in drawing order (always at least two)
    pub points: Arc<[Point]>,
    pub color: Color,
    /// Line thickness in pixels
    pub thickness: f64,
    /// Opacity derived from the tool at creation time
    pub opacity: f64,
}

impl Stroke {
    /// Returns the paint description for rendering on `background`.
    pub fn paint(&self, background: BackgroundPattern) -> StrokePaint {
        match self.tool {
            StrokeTool::Pen => StrokePaint {
                color: self.color.with_alpha_scaled(self.opacity),
                width: self.thickness,
                cap: LineCap::Round,
                dash: None,
                composite: Composite::Over,
            },
            StrokeTool::Highlighter => StrokePaint {
                color: self.color.with_alpha_scaled(self.opacity),
                width: self.thickness,
                cap: LineCap::Butt,
                dash: None,
                composite: Composite::Over,
            },
            StrokeTool::DashedPen => StrokePaint {
                color: self.color.with_alpha_scaled(self.opacity),
                width: self.thickness,
                cap: LineCap::Butt,
                dash: Some([self.thickness * 3.0, self.thickness * 2.0]),
                composite: Composite::Over,
            },
            StrokeTool::Eraser => match background.fill_color() {
                Some(fill) => StrokePaint {
                    color: fill,
                    width: self.thickness,
                    cap: LineCap::Round,
                    dash: None,
                    composite: Composite::Over,
                },
                None => StrokePaint {
                    color: background.eraser_color(),
                    width: self.thickness,
                    cap: LineCap::Round,
                    dash: None,
                    composite: Composite::Clear,
                },
            },
        }
    }

    /// Axis-aligned bounds expanded to cover the stroke width.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_for_points(&self.points, self.thickness)
    }
}

/// A stroke under construction during an active pointer session.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeBuilder {
    tool: StrokeTool,
    points: Vec<Point>,
    color: Color,
    thickness: f64,
    opacity: f64,
    sampling: Sampling,
}

impl StrokeBuilder {
    /// Starts a stroke seeded at `origin`.
    pub fn new(
        tool: StrokeTool,
        origin: Point,
        color: Color,
        thickness: f64,
        opacity: f64,
        sampling: Sampling,
    ) -> Self {
        Self {
            tool,
            points: vec![origin],
            color,
            thickness,
            opacity,
            sampling,
        }
    }

    /// Appends a pointer sample, returning the recorded point count.
    ///
    /// The sample is first smoothed towards the previous point; it is then
    /// dropped if the smoothed point lies within `min_distance` of the last
    /// recorded point. See [`Sampling`] for the effect on the stroke end.
    pub fn append_point(&mut self, point: Point) -> usize {
        let Some(&last) = self.points.last() else {
            self.points.push(point);
            return self.points.len();
        };

        let smoothed = last.lerp(point, 1.0 - self.sampling.smoothing);
        if smoothed.distance(last) > self.sampling.min_distance {
            self.points.push(smoothed);
        }
        self.points.len()
    }

    /// Points recorded so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn tool(&self) -> StrokeTool {
        self.tool
    }

    /// Bounds of the points recorded so far, padded for the stroke width.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_for_points(&self.points, self.thickness)
    }

    /// Snapshot of the stroke as it would render right now.
    pub fn preview(&self) -> Stroke {
        self.clone().finalize()
    }

    /// Freezes the point sequence into a committed [`Stroke`].
    ///
    /// A single-point tap is doubled so the committed stroke renders as a dot.
    pub fn finalize(mut self) -> Stroke {
        if self.points.len() < 2 {
            let dot = self.points.first().copied().unwrap_or_default();
            self.points = vec![dot, dot];
        }

        Stroke {
            tool: self.tool,
            points: Arc::from(self.points),
            color: self.color,
            thickness: self.thickness,
            opacity: self.opacity,
        }
    }
}

fn stroke_padding(thick: f64) -> f64 {
    (thick / 2.0).ceil().max(1.0)
}

pub(crate) fn bounding_box_for_points(points: &[Point], thick: f64) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let mut extent = Extent::from_point(*first);
    for p in rest {
        extent.include(*p);
    }
    let extent = extent.inflate(stroke_padding(thick));
    Rect::covering(extent.min_x, extent.min_y, extent.max_x, extent.max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, TRANSPARENT};

    fn pen(origin: Point) -> StrokeBuilder {
        StrokeBuilder::new(
            StrokeTool::Pen,
            origin,
            BLACK,
            3.0,
            1.0,
            Sampling::default(),
        )
    }

    #[test]
    fn append_skips_near_duplicates() {
        let mut builder = pen(Point::new(0.0, 0.0));
        assert_eq!(builder.append_point(Point::new(0.5, 0.5)), 1);
        assert_eq!(builder.append_point(Point::new(5.0, 0.0)), 2);
        assert_eq!(builder.append_point(Point::new(5.0, 0.9)), 2);
        assert_eq!(builder.append_point(Point::new(5.0, 2.5)), 3);
    }

    #[test]
    fn smoothing_pulls_samples_towards_previous_point() {
        let mut builder = StrokeBuilder::new(
            StrokeTool::Pen,
            Point::new(0.0, 0.0),
            BLACK,
            3.0,
            1.0,
            Sampling {
                min_distance: 0.0,
                smoothing: 0.3,
            },
        );
        builder.append_point(Point::new(10.0, 0.0));
        let recorded = builder.points()[1];
        assert!((recorded.x - 7.0).abs() < 1e-9);
        assert_eq!(recorded.y, 0.0);
    }

    #[test]
    fn decimation_measures_the_smoothed_sample() {
        let mut builder = StrokeBuilder::new(
            StrokeTool::Pen,
            Point::new(0.0, 0.0),
            BLACK,
            3.0,
            1.0,
            Sampling {
                min_distance: 1.0,
                smoothing: 0.3,
            },
        );
        // 1.2px raw, 0.84px smoothed: dropped
        assert_eq!(builder.append_point(Point::new(1.2, 0.0)), 1);

        // Repeating the release point walks the end towards it
        builder.append_point(Point::new(20.0, 0.0));
        let first_end = builder.points()[1].x;
        assert!((first_end - 14.0).abs() < 1e-9);
        builder.append_point(Point::new(20.0, 0.0));
        let second_end = builder.points().last().unwrap().x;
        assert!(second_end > first_end && second_end < 20.0);
    }

    #[test]
    fn single_tap_finalizes_to_a_dot() {
        let stroke = pen(Point::new(5.0, 5.0)).finalize();
        assert_eq!(stroke.points.len(), 2);
        assert!(stroke.points.iter().all(|p| *p == Point::new(5.0, 5.0)));
        assert!(stroke.bounding_box().is_some());
    }

    #[test]
    fn finalize_preserves_drawing_order() {
        let mut builder = pen(Point::new(0.0, 0.0));
        builder.append_point(Point::new(10.0, 0.0));
        builder.append_point(Point::new(10.0, 10.0));
        let stroke = builder.finalize();
        assert_eq!(
            stroke.points.as_ref(),
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0)
            ]
        );
    }

    #[test]
    fn highlighter_and_dashed_paint_with_reduced_alpha() {
        let highlighter = StrokeBuilder::new(
            StrokeTool::Highlighter,
            Point::new(0.0, 0.0),
            RED,
            20.0,
            0.35,
            Sampling::default(),
        )
        .finalize();
        let paint = highlighter.paint(BackgroundPattern::Transparent);
        assert_eq!(paint.color.a, 0.35);
        assert_eq!(paint.cap, LineCap::Butt);

        let dashed = StrokeBuilder::new(
            StrokeTool::DashedPen,
            Point::new(0.0, 0.0),
            RED,
            2.0,
            0.7,
            Sampling::default(),
        )
        .finalize();
        let paint = dashed.paint(BackgroundPattern::White);
        assert_eq!(paint.dash, Some([6.0, 4.0]));
        assert!(paint.color.a < 1.0);
    }

    #[test]
    fn eraser_paints_background_or_clears() {
        let eraser = StrokeBuilder::new(
            StrokeTool::Eraser,
            Point::new(0.0, 0.0),
            RED,
            25.0,
            1.0,
            Sampling::default(),
        )
        .finalize();

        let on_board = eraser.paint(BackgroundPattern::Blackboard);
        assert_eq!(
            on_board.color,
            BackgroundPattern::Blackboard.fill_color().unwrap()
        );
        assert_eq!(on_board.composite, Composite::Over);

        let on_desktop = eraser.paint(BackgroundPattern::Transparent);
        assert_eq!(on_desktop.color, TRANSPARENT);
        assert_eq!(on_desktop.composite, Composite::Clear);
    }

    #[test]
    fn bounding_box_expands_with_thickness() {
        let mut builder = StrokeBuilder::new(
            StrokeTool::Pen,
            Point::new(10.0, 20.0),
            BLACK,
            6.0,
            1.0,
            Sampling::default(),
        );
        builder.append_point(Point::new(30.0, 40.0));
        let rect = builder.finalize().bounding_box().unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (7, 17, 26, 26));
    }
}
