//! Polyline curves in the pattern plane.

use ringloft_math::{lerp, Point2, Tolerance};
use serde::{Deserialize, Serialize};

/// An ordered sequence of pattern points.
///
/// Point order carries no monotonicity guarantee: a seam may be stored in
/// either direction and may fold back on itself after editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    /// Vertices in order.
    pub points: Vec<Point2>,
}

/// Where a curve crosses a horizontal line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// X coordinate of the crossing.
    pub x: f64,
    /// Arc length from the first vertex to the crossing.
    pub param: f64,
}

impl Curve {
    /// Create a curve from points.
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Create a curve from `(x, y)` pairs.
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the curve has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the curve has at least one segment.
    pub fn has_segments(&self) -> bool {
        self.points.len() >= 2
    }

    /// First vertex.
    pub fn first(&self) -> Option<&Point2> {
        self.points.first()
    }

    /// Last vertex.
    pub fn last(&self) -> Option<&Point2> {
        self.points.last()
    }

    /// A copy with the vertex order reversed.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Arc length at every vertex; the first entry is 0.
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        let mut cum = Vec::with_capacity(self.points.len());
        let mut acc = 0.0;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                acc += (p - self.points[i - 1]).norm();
            }
            cum.push(acc);
        }
        cum
    }

    /// Point at arc-length fraction `a` (clamped to `[0, 1]`).
    ///
    /// Returns `None` for an empty curve. A single-vertex or zero-length
    /// curve always yields its first vertex.
    pub fn point_at_fraction(&self, a: f64) -> Option<Point2> {
        let first = *self.points.first()?;
        let cum = self.cumulative_lengths();
        let total = cum.last().copied().unwrap_or(0.0);
        if total <= 0.0 {
            return Some(first);
        }

        let target = a.clamp(0.0, 1.0) * total;
        for i in 0..self.points.len() - 1 {
            let seg = cum[i + 1] - cum[i];
            if seg <= 0.0 {
                continue;
            }
            if target <= cum[i + 1] {
                let t = ((target - cum[i]) / seg).clamp(0.0, 1.0);
                let (p, q) = (self.points[i], self.points[i + 1]);
                return Some(Point2::new(lerp(p.x, q.x, t), lerp(p.y, q.y, t)));
            }
        }
        self.points.last().copied()
    }

    /// All crossings with the horizontal line `Y = y`, in curve order.
    ///
    /// Horizontal segments contribute nothing. A crossing exactly at a shared
    /// vertex is reported once.
    pub fn horizontal_crossings(&self, y: f64, tol: &Tolerance) -> Vec<Crossing> {
        let mut out: Vec<Crossing> = Vec::new();
        let mut acc = 0.0;

        for w in self.points.windows(2) {
            let (a, b) = (w[0], w[1]);
            let seg = (b - a).norm();
            let dy = b.y - a.y;

            if !tol.is_horizontal(dy) {
                let t = (y - a.y) / dy;
                if (0.0..=1.0).contains(&t) {
                    let crossing = Crossing {
                        x: lerp(a.x, b.x, t),
                        param: acc + t * seg,
                    };
                    let duplicate = out
                        .last()
                        .is_some_and(|c| (c.param - crossing.param).abs() <= tol.linear);
                    if !duplicate {
                        out.push(crossing);
                    }
                }
            }
            acc += seg;
        }

        out
    }

    /// Minimum and maximum Y over all vertices.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y))),
        )
    }
}

impl From<Vec<Point2>> for Curve {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}
