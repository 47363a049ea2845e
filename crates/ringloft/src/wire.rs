//! Ring cross-sections as polylines, for wireframe display.

use ringloft_math::{ring_point, Point3};

use crate::outline::Polyline3;
use crate::rings::RingMetrics;
use crate::windows::AngularWindows;

/// Polylines tracing one ring across the panels.
#[derive(Debug, Clone, PartialEq)]
pub struct RingWire {
    /// Ring index.
    pub ring: usize,
    /// Ring offset (mm).
    pub offset_mm: f64,
    /// Runs of consecutive valid panels, in pattern order.
    pub polylines: Vec<Polyline3>,
}

/// Trace every ring through the panels in `order`.
///
/// Each valid panel contributes `subdiv + 1` points along its window; the
/// point shared with the previous panel is not repeated. A panel without a
/// sample on the ring ends the current polyline.
pub fn ring_wires(
    metrics: &RingMetrics,
    windows: &AngularWindows,
    order: &[usize],
    subdiv: u32,
    scale: f64,
) -> Vec<RingWire> {
    (0..metrics.num_rings())
        .map(|k| {
            let offset_mm = metrics.offsets_mm[k];
            let height = -offset_mm * scale;
            let mut polylines = Vec::new();
            let mut run: Vec<Point3> = Vec::new();

            for &i in order {
                if !metrics.valid[k][i] {
                    if run.len() >= 2 {
                        polylines.push(std::mem::take(&mut run));
                    }
                    run.clear();
                    continue;
                }
                let win = windows.get(k, i);
                let skip = usize::from(!run.is_empty());
                for j in skip..=subdiv as usize {
                    let t = j as f64 / f64::from(subdiv);
                    run.push(ring_point(win.radius, win.theta_at(t), height, scale));
                }
            }
            if run.len() >= 2 {
                polylines.push(run);
            }

            RingWire {
                ring: k,
                offset_mm,
                polylines,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{rect_panel, seams_of, short_left_seam_panel};

    #[test]
    fn test_full_ring_is_one_polyline() {
        let panels = [rect_panel("A", 0.0, 50.0), rect_panel("B", 60.0, 50.0)];
        let m = RingMetrics::compute(&seams_of(&panels), &[-80.0, 0.0, 80.0]).unwrap();
        let w = AngularWindows::allocate(&m, &[0, 1], 0.0);
        let wires = ring_wires(&m, &w, &[0, 1], 4, 1.0);

        assert_eq!(wires.len(), 3);
        for wire in &wires {
            assert_eq!(wire.polylines.len(), 1);
            // 5 points for A, 4 more for B.
            assert_eq!(wire.polylines[0].len(), 9);
            let last = wire.polylines[0].last().unwrap();
            assert!((last.x + 100.0 / std::f64::consts::PI).abs() < 1e-9);
        }
    }

    #[test]
    fn test_invalid_panel_breaks_ring() {
        let panels = [
            rect_panel("A", 0.0, 50.0),
            short_left_seam_panel("B", 60.0, 50.0, 60.0),
            rect_panel("C", 120.0, 50.0),
        ];
        let m = RingMetrics::compute(&seams_of(&panels), &[-80.0, 0.0, 80.0]).unwrap();
        let w = AngularWindows::allocate(&m, &[0, 1, 2], 0.0);
        let wires = ring_wires(&m, &w, &[0, 1, 2], 2, 1.0);

        assert_eq!(wires[1].polylines.len(), 1);
        assert_eq!(wires[2].polylines.len(), 2);
        assert_eq!(wires[2].polylines[0].len(), 3);
        assert_eq!(wires[2].polylines[1].len(), 3);
    }
}
