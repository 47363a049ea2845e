//! Side seams joined across the waist, and height sampling along them.

use ringloft_math::{Point2, Tolerance};
use ringloft_pattern::{Curve, Panel, SeamSide};

/// One side seam as a single polyline running from one extremity, through
/// the waist point, to the other.
#[derive(Debug, Clone, PartialEq)]
pub struct SeamPolyline {
    curve: Curve,
    waist_param: f64,
}

/// A seam's crossing with a horizontal line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamSample {
    /// X coordinate of the crossing.
    pub x: f64,
    /// Arc length of the crossing along the seam polyline.
    pub param: f64,
}

impl SeamPolyline {
    /// Join the `up` and `down` halves of a seam around the waist.
    ///
    /// Each half is first oriented waist→outward (its end nearest `waist_y`
    /// becomes its start). The result is the down half reversed followed by
    /// the up half. With one half missing the other is used alone; with both
    /// missing there is no seam. Halves with fewer than two points count as
    /// missing.
    pub fn build(up: Option<&Curve>, down: Option<&Curve>, waist_y: f64) -> Option<Self> {
        let up = up.filter(|c| c.has_segments()).map(|c| outward_from_waist(c, waist_y));
        let down = down.filter(|c| c.has_segments()).map(|c| outward_from_waist(c, waist_y));

        match (up, down) {
            (None, None) => None,
            (Some(up), None) => Some(Self {
                curve: up,
                waist_param: 0.0,
            }),
            (None, Some(down)) => {
                let curve = down.reversed();
                let waist_param = curve.length();
                Some(Self { curve, waist_param })
            }
            (Some(up), Some(down)) => {
                let mut points = down.reversed().points;
                let waist_param = Curve::new(points.clone()).length();
                let tol = Tolerance::DEFAULT;
                let skip = match (points.last(), up.first()) {
                    (Some(a), Some(b)) => usize::from(tol.points_equal(a, b)),
                    _ => 0,
                };
                points.extend(up.points.into_iter().skip(skip));
                Some(Self {
                    curve: Curve::new(points),
                    waist_param,
                })
            }
        }
    }

    /// Build the seam on one side of a panel.
    pub fn for_panel(panel: &Panel, side: SeamSide, waist_y: f64) -> Option<Self> {
        let (up, down) = panel.seam(side);
        Self::build(up, down, waist_y)
    }

    /// The joined polyline.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Arc length of the waist point along the polyline.
    pub fn waist_param(&self) -> f64 {
        self.waist_param
    }

    /// Where the seam crosses `Y = y`.
    ///
    /// With several crossings (a seam folded back on itself) the one nearest
    /// the waist in arc length wins. `None` when the seam never reaches `y`.
    pub fn sample_at_y(&self, y: f64) -> Option<SeamSample> {
        self.curve
            .horizontal_crossings(y, &Tolerance::DEFAULT)
            .into_iter()
            .map(|c| SeamSample {
                x: c.x,
                param: c.param,
            })
            .min_by(|a, b| {
                let da = (a.param - self.waist_param).abs();
                let db = (b.param - self.waist_param).abs();
                da.total_cmp(&db)
            })
    }
}

fn outward_from_waist(curve: &Curve, waist_y: f64) -> Curve {
    let dist = |p: Option<&Point2>| p.map_or(f64::INFINITY, |p| (p.y - waist_y).abs());
    if dist(curve.last()) < dist(curve.first()) {
        curve.reversed()
    } else {
        curve.clone()
    }
}

/// Both side seams of one panel plus its waist height.
#[derive(Debug, Clone)]
pub struct PanelSeams {
    /// Waist height of the panel.
    pub waist_y: f64,
    /// Seam to the previous panel.
    pub left: Option<SeamPolyline>,
    /// Seam to the next panel.
    pub right: Option<SeamPolyline>,
}

/// Left and right seam positions of a panel at one height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSpan {
    /// X of the left (previous) seam.
    pub left_x: f64,
    /// X of the right (next) seam.
    pub right_x: f64,
}

impl PanelSpan {
    /// Distance between the seams.
    pub fn width(&self) -> f64 {
        (self.right_x - self.left_x).abs()
    }

    /// Midpoint between the seams.
    pub fn mid_x(&self) -> f64 {
        (self.left_x + self.right_x) * 0.5
    }

    /// X at fraction `u` from the left seam to the right seam.
    pub fn x_at(&self, u: f64) -> f64 {
        ringloft_math::lerp(self.left_x, self.right_x, u)
    }
}

impl PanelSeams {
    /// Build both seams of a panel. Returns `None` without a usable waist.
    pub fn from_panel(panel: &Panel) -> Option<Self> {
        let waist_y = panel.waist_y()?;
        Some(Self {
            waist_y,
            left: SeamPolyline::for_panel(panel, SeamSide::Prev, waist_y),
            right: SeamPolyline::for_panel(panel, SeamSide::Next, waist_y),
        })
    }

    /// Seam positions at absolute pattern height `y`, if both seams reach it.
    pub fn span_at_y(&self, y: f64) -> Option<PanelSpan> {
        let left = self.left.as_ref()?.sample_at_y(y)?;
        let right = self.right.as_ref()?.sample_at_y(y)?;
        Some(PanelSpan {
            left_x: left.x,
            right_x: right.x,
        })
    }

    /// Seam positions at a height offset from this panel's waist.
    pub fn span_at_offset(&self, offset_mm: f64) -> Option<PanelSpan> {
        self.span_at_y(self.waist_y - offset_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringloft_pattern::CurveKind;

    #[test]
    fn test_sample_at_waist_returns_waist_x() {
        let up = Curve::from_xy(&[(10.0, 100.0), (12.0, 50.0)]);
        let down = Curve::from_xy(&[(10.0, 100.0), (9.0, 150.0)]);
        let seam = SeamPolyline::build(Some(&up), Some(&down), 100.0).unwrap();

        let s = seam.sample_at_y(100.0).unwrap();
        assert!((s.x - 10.0).abs() < 1e-12);
        assert!((s.param - seam.waist_param()).abs() < 1e-9);
    }

    #[test]
    fn test_join_orients_halves() {
        // Down half stored outward→waist, up half stored waist→outward.
        let up = Curve::from_xy(&[(0.0, 100.0), (0.0, 0.0)]);
        let down = Curve::from_xy(&[(0.0, 200.0), (0.0, 100.0)]);
        let seam = SeamPolyline::build(Some(&up), Some(&down), 100.0).unwrap();

        let pts = &seam.curve().points;
        assert_eq!(pts.len(), 3);
        assert!((pts[0].y - 200.0).abs() < 1e-12);
        assert!((pts[1].y - 100.0).abs() < 1e-12);
        assert!((pts[2].y - 0.0).abs() < 1e-12);
        assert!((seam.waist_param() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_half() {
        let up = Curve::from_xy(&[(5.0, 0.0), (5.0, 100.0)]);
        let seam = SeamPolyline::build(Some(&up), None, 100.0).unwrap();
        assert_eq!(seam.waist_param(), 0.0);
        assert!((seam.curve().first().unwrap().y - 100.0).abs() < 1e-12);

        let down = Curve::from_xy(&[(5.0, 100.0), (5.0, 180.0)]);
        let seam = SeamPolyline::build(None, Some(&down), 100.0).unwrap();
        assert!((seam.waist_param() - 80.0).abs() < 1e-12);
        assert!((seam.curve().last().unwrap().y - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_seam() {
        assert!(SeamPolyline::build(None, None, 0.0).is_none());
        let stub = Curve::from_xy(&[(0.0, 0.0)]);
        assert!(SeamPolyline::build(Some(&stub), Some(&stub), 0.0).is_none());
    }

    #[test]
    fn test_no_crossing_is_none() {
        let up = Curve::from_xy(&[(0.0, 100.0), (0.0, 50.0)]);
        let seam = SeamPolyline::build(Some(&up), None, 100.0).unwrap();
        assert!(seam.sample_at_y(20.0).is_none());
    }

    #[test]
    fn test_fold_picks_crossing_nearest_waist() {
        // Up half folds back past y=40 near its far end: crossings at x=0
        // (near the waist) and further along at x=4 and x~8.7.
        let up = Curve::from_xy(&[
            (0.0, 100.0),
            (0.0, 30.0),
            (8.0, 50.0),
            (10.0, 20.0),
        ]);
        let seam = SeamPolyline::build(Some(&up), None, 100.0).unwrap();
        let s = seam.sample_at_y(40.0).unwrap();
        assert!(s.x.abs() < 1e-12, "picked x={}", s.x);
    }

    #[test]
    fn test_panel_span() {
        let panel = Panel::new("A")
            .with_curve(CurveKind::Waist, Curve::from_xy(&[(0.0, 100.0), (40.0, 100.0)]))
            .with_curve(CurveKind::SeamToPrevUp, Curve::from_xy(&[(0.0, 100.0), (5.0, 0.0)]))
            .with_curve(CurveKind::SeamToNextUp, Curve::from_xy(&[(40.0, 100.0), (35.0, 0.0)]));
        let seams = PanelSeams::from_panel(&panel).unwrap();

        let span = seams.span_at_offset(0.0).unwrap();
        assert!((span.width() - 40.0).abs() < 1e-12);
        assert!((span.mid_x() - 20.0).abs() < 1e-12);

        let span = seams.span_at_offset(100.0).unwrap();
        assert!((span.width() - 30.0).abs() < 1e-12);
        assert!((span.x_at(0.5) - 20.0).abs() < 1e-12);

        // Below the waist there is no down half.
        assert!(seams.span_at_offset(-10.0).is_none());
    }
}
