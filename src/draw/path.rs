//! Path construction for stroke rendering.
//!
//! The model only guarantees an ordered point list; smoothing is layered on
//! here so any rasteriser can consume the same segments.

use super::point::Point;
use super::stroke::{Stroke, StrokeTool};
use serde::Serialize;

/// One drawing command in a stroke path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadTo { ctrl: Point, to: Point },
}

/// Builds a smooth path through `points`.
///
/// Each interior point becomes the control point of a quadratic curve that
/// ends halfway to the next point, so the curve passes through every midpoint
/// and finishes with a straight segment to the last point.
pub fn smooth_path(points: &[Point]) -> Vec<PathSegment> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(points.len() + 1);
    path.push(PathSegment::MoveTo { to: first });

    if rest.len() <= 1 {
        if let Some(&last) = rest.first() {
            path.push(PathSegment::LineTo { to: last });
        }
        return path;
    }

    for pair in points[1..].windows(2) {
        path.push(PathSegment::QuadTo {
            ctrl: pair[0],
            to: pair[0].midpoint(pair[1]),
        });
    }
    path.push(PathSegment::LineTo {
        to: points[points.len() - 1],
    });
    path
}

/// Builds a straight polyline through `points`.
pub fn polyline(points: &[Point]) -> Vec<PathSegment> {
    points
        .iter()
        .enumerate()
        .map(|(i, &to)| {
            if i == 0 {
                PathSegment::MoveTo { to }
            } else {
                PathSegment::LineTo { to }
            }
        })
        .collect()
}

/// Path for a committed stroke. Highlighters keep hard corners.
pub fn stroke_path(stroke: &Stroke) -> Vec<PathSegment> {
    match stroke.tool {
        StrokeTool::Highlighter => polyline(&stroke.points),
        StrokeTool::Pen | StrokeTool::DashedPen | StrokeTool::Eraser => {
            smooth_path(&stroke.points)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_points_make_a_single_line() {
        let path = smooth_path(&[Point::new(5.0, 5.0), Point::new(5.0, 5.0)]);
        assert_eq!(
            path,
            vec![
                PathSegment::MoveTo {
                    to: Point::new(5.0, 5.0)
                },
                PathSegment::LineTo {
                    to: Point::new(5.0, 5.0)
                },
            ]
        );
    }

    #[test]
    fn interior_points_become_quadratic_controls() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let path = smooth_path(&points);
        assert_eq!(path.len(), 4);
        assert_eq!(
            path[1],
            PathSegment::QuadTo {
                ctrl: Point::new(10.0, 0.0),
                to: Point::new(10.0, 5.0),
            }
        );
        assert_eq!(
            path[2],
            PathSegment::QuadTo {
                ctrl: Point::new(10.0, 10.0),
                to: Point::new(5.0, 10.0),
            }
        );
        assert_eq!(
            path[3],
            PathSegment::LineTo {
                to: Point::new(0.0, 10.0)
            }
        );
    }

    #[test]
    fn empty_input_gives_empty_path() {
        assert!(smooth_path(&[]).is_empty());
        assert!(polyline(&[]).is_empty());
    }

    #[test]
    fn polyline_visits_every_point() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)];
        let path = polyline(&points);
        assert_eq!(path.len(), 3);
        assert!(matches!(path[0], PathSegment::MoveTo { .. }));
        assert!(matches!(path[2], PathSegment::LineTo { to } if to == Point::new(2.0, 0.0)));
    }
}
