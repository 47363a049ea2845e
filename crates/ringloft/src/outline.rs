//! Re-projection of the real top/bottom edges onto the lofted surface.
//!
//! The edge is walked by arc length, not ring by ring, and every sample is
//! placed using the circumference measured at that sample's own height, so
//! the 3D outline follows the drawn curve instead of the nearest ring.

use std::f64::consts::PI;

use ringloft_math::{ring_point, Point3, Tolerance};
use ringloft_pattern::Curve;

use crate::seam::PanelSeams;

/// A polyline on the lofted surface.
pub type Polyline3 = Vec<Point3>;

/// Inputs shared by every edge re-projection in one build.
#[derive(Debug, Clone, Copy)]
pub struct OutlineParams<'a> {
    /// Seams of every panel, in input order.
    pub seams: &'a [PanelSeams],
    /// Panel indices in pattern order.
    pub order: &'a [usize],
    /// Angle where the first panel starts (radians).
    pub theta_start: f64,
    /// mm to world units.
    pub scale: f64,
    /// Samples along the edge (at least 2).
    pub samples: usize,
}

/// Orient `curve` so it runs from the previous seam toward the next seam.
///
/// Each end point is measured against the midline between the panel's
/// seams at that end point's height; the curve is reversed when its first
/// point lies further toward the next seam than its last point does. When a
/// seam cannot be sampled at an end, raw X decides.
pub fn orient_left_to_right(curve: &Curve, seams: &PanelSeams) -> Curve {
    let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
        return curve.clone();
    };

    let rightness = |p: &ringloft_math::Point2| {
        seams.span_at_y(p.y).map(|span| {
            let dir = (span.right_x - span.left_x).signum();
            (p.x - span.mid_x()) * dir
        })
    };

    let reverse = match (rightness(first), rightness(last)) {
        (Some(a), Some(b)) => a > b,
        _ => first.x > last.x,
    };

    if reverse {
        curve.reversed()
    } else {
        curve.clone()
    }
}

/// Re-project one edge of panel `panel` onto the surface.
///
/// Returns one polyline per run of consecutive valid samples; runs shorter
/// than two points are dropped. An absent or single-point edge yields no
/// polylines.
pub fn reproject_edge(params: &OutlineParams<'_>, panel: usize, edge: Option<&Curve>) -> Vec<Polyline3> {
    let Some(edge) = edge.filter(|c| c.has_segments()) else {
        return Vec::new();
    };
    let own = &params.seams[panel];
    let curve = orient_left_to_right(edge, own);
    let eps = Tolerance::DEFAULT.linear;
    let n = params.samples.max(2);

    let mut out: Vec<Polyline3> = Vec::new();
    let mut run: Polyline3 = Vec::new();
    let mut flushed = 0usize;

    for s in 0..n {
        let a = s as f64 / (n - 1) as f64;
        let Some(cp) = curve.point_at_fraction(a) else {
            break;
        };
        let offset = own.waist_y - cp.y;

        match place_sample(params, panel, offset, a, eps) {
            Some(p) => run.push(p),
            None => {
                if !run.is_empty() {
                    flushed += 1;
                }
                flush(&mut run, &mut out);
            }
        }
    }
    flush(&mut run, &mut out);

    if flushed > 0 {
        log::warn!(
            "panel {panel} outline split {flushed} time(s) where seams were not measurable"
        );
    }
    out
}

/// Place the sample at arc fraction `a` and height `offset_mm` from the
/// panel's waist, measuring every panel at that same relative height.
fn place_sample(
    params: &OutlineParams<'_>,
    panel: usize,
    offset_mm: f64,
    a: f64,
    eps: f64,
) -> Option<Point3> {
    let mut c = 0.0;
    let mut cum = 0.0;
    let mut own_width = None;

    for &j in params.order {
        let width = params.seams[j].span_at_offset(offset_mm).map(|s| s.width());
        if j == panel {
            own_width = width;
            // `cum` stops here; `c` keeps summing the whole ring.
            cum = c;
        }
        if let Some(w) = width {
            c += w;
        }
    }

    let width = own_width.filter(|&w| w > eps)?;
    if c <= eps {
        return None;
    }

    let s_pos = cum + a * width;
    let theta = params.theta_start + s_pos / c * PI;
    Some(ring_point(c / PI, theta, -offset_mm * params.scale, params.scale))
}

fn flush(run: &mut Polyline3, out: &mut Vec<Polyline3>) {
    if run.len() >= 2 {
        out.push(std::mem::take(run));
    } else {
        run.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{rect_panel, seams_of, short_left_seam_panel, tapered_panel};
    use approx::assert_relative_eq;
    use ringloft_pattern::Edge;

    fn params<'a>(seams: &'a [PanelSeams], order: &'a [usize]) -> OutlineParams<'a> {
        OutlineParams {
            seams,
            order,
            theta_start: 0.0,
            scale: 1.0,
            samples: 11,
        }
    }

    #[test]
    fn test_top_edge_of_rectangle_on_ring() {
        let panels = [rect_panel("A", 0.0, 50.0), rect_panel("B", 60.0, 50.0)];
        let seams = seams_of(&panels);
        let order = [0, 1];
        let p = params(&seams, &order);

        let lines = reproject_edge(&p, 1, panels[1].edge(Edge::Top));
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.len(), 11);

        let r = 100.0 / PI;
        for q in line {
            assert!(((q.x * q.x + q.z * q.z).sqrt() - r).abs() < 1e-9);
            // Top edge sits 200 mm above the waist.
            assert!((q.y + 200.0).abs() < 1e-9);
        }
        // Panel B covers the second quarter turn.
        let start = line[0].z.atan2(line[0].x);
        let end = line[10].z.atan2(line[10].x);
        assert!((start - PI / 2.0).abs() < 1e-9);
        assert!((end - PI).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_edge_gives_same_points() {
        let panels = [rect_panel("A", 0.0, 50.0), rect_panel("B", 60.0, 50.0)];
        let seams = seams_of(&panels);
        let order = [0, 1];
        let p = params(&seams, &order);

        // A wavy bottom edge so the orientation test is not trivial.
        let edge = Curve::from_xy(&[(60.0, 400.0), (75.0, 390.0), (95.0, 395.0), (110.0, 400.0)]);
        let forward = reproject_edge(&p, 1, Some(&edge));
        let backward = reproject_edge(&p, 1, Some(&edge.reversed()));
        assert_eq!(forward, backward);
        assert!(!forward.is_empty());
    }

    #[test]
    fn test_degenerate_edge_yields_nothing() {
        let panels = [rect_panel("A", 0.0, 50.0)];
        let seams = seams_of(&panels);
        let order = [0];
        let p = params(&seams, &order);

        let single = Curve::from_xy(&[(10.0, 0.0)]);
        assert!(reproject_edge(&p, 0, Some(&single)).is_empty());
        assert!(reproject_edge(&p, 0, None).is_empty());
    }

    #[test]
    fn test_unmeasurable_samples_split_runs() {
        // Left seam only reaches 60 mm above the waist (y=140); a top edge
        // that dips from y=100 up to y=0 and back is measurable only at its
        // ends.
        let panels = [short_left_seam_panel("A", 0.0, 50.0, 60.0)];
        let seams = seams_of(&panels);
        let order = [0];
        let p = OutlineParams {
            samples: 21,
            ..params(&seams, &order)
        };
        let edge = Curve::from_xy(&[(0.0, 100.0), (25.0, 0.0), (50.0, 100.0)]);
        let lines = reproject_edge(&p, 0, Some(&edge));
        // y=100 is 100 mm above the waist, already beyond the left seam.
        assert!(lines.is_empty());

        let edge = Curve::from_xy(&[(0.0, 150.0), (25.0, 100.0), (50.0, 150.0)]);
        let lines = reproject_edge(&p, 0, Some(&edge));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.len() >= 2));
    }

    #[test]
    fn test_outline_unchanged_when_panel_moves_vertically() {
        let level = [tapered_panel("A", 0.0, 200.0), tapered_panel("B", 80.0, 200.0)];
        let shifted = [tapered_panel("A", 0.0, 200.0), tapered_panel("B", 80.0, 260.0)];
        let order = [0, 1];

        for i in 0..2 {
            let seams = seams_of(&level);
            let a = reproject_edge(&params(&seams, &order), i, level[i].edge(Edge::Top));
            let seams = seams_of(&shifted);
            let b = reproject_edge(&params(&seams, &order), i, shifted[i].edge(Edge::Top));

            assert_eq!(a.len(), 1);
            assert_eq!(b.len(), 1);
            for (p, q) in a[0].iter().zip(&b[0]) {
                assert_relative_eq!(p.x, q.x, epsilon = 1e-9);
                assert_relative_eq!(p.y, q.y, epsilon = 1e-9);
                assert_relative_eq!(p.z, q.z, epsilon = 1e-9);
            }
        }

        // 150 mm above the waist both panels are 80 mm wide.
        let seams = seams_of(&shifted);
        let line = &reproject_edge(&params(&seams, &order), 1, shifted[1].edge(Edge::Top))[0];
        let r = 160.0 / PI;
        for q in line {
            assert_relative_eq!((q.x * q.x + q.z * q.z).sqrt(), r, epsilon = 1e-9);
            assert_relative_eq!(q.y, -150.0, epsilon = 1e-9);
        }
        assert_relative_eq!(line[0].z.atan2(line[0].x), PI / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_orientation_uses_seam_midline() {
        let panels = [rect_panel("A", 0.0, 50.0)];
        let seams = seams_of(&panels);
        let edge = Curve::from_xy(&[(50.0, 0.0), (0.0, 0.0)]);
        let oriented = orient_left_to_right(&edge, &seams[0]);
        assert_eq!(oriented.first().unwrap().x, 0.0);
        let already = orient_left_to_right(&oriented, &seams[0]);
        assert_eq!(already, oriented);
    }
}
