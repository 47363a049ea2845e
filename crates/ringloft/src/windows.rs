//! Angular windows: where each panel sits around each ring.

use std::f64::consts::PI;

use crate::rings::RingMetrics;

/// The arc a panel occupies on one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularWindow {
    /// Start angle (radians).
    pub theta0: f64,
    /// End angle (radians).
    pub theta1: f64,
    /// Ring radius used for this panel (mm).
    pub radius: f64,
    /// Height offset used for this panel (mm); 0 when collapsed to the waist.
    pub offset_mm: f64,
    /// True when the panel had no sample at this ring and borrowed the
    /// reference ring's window, radius and the waist plane.
    pub degraded: bool,
}

impl AngularWindow {
    /// Angle at fraction `t` across the window.
    pub fn theta_at(&self, t: f64) -> f64 {
        ringloft_math::lerp(self.theta0, self.theta1, t)
    }

    /// Angular extent.
    pub fn span(&self) -> f64 {
        self.theta1 - self.theta0
    }
}

/// Windows for every `(ring, panel)` pair, indexed `[ring][panel]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AngularWindows {
    windows: Vec<Vec<AngularWindow>>,
}

/// Cumulative width before each panel, walking `order`, counting only
/// valid panels.
fn starts(metrics: &RingMetrics, k: usize, order: &[usize]) -> Vec<f64> {
    let mut s_start = vec![0.0; metrics.num_panels()];
    let mut acc = 0.0;
    for &i in order {
        s_start[i] = acc;
        if metrics.valid[k][i] {
            acc += metrics.width[k][i];
        }
    }
    s_start
}

impl AngularWindows {
    /// Lay panels end to end around a half turn on every ring.
    ///
    /// `order` lists panel indices in pattern order. A panel without a sample
    /// at some ring is given its reference-ring window and radius and is
    /// collapsed to the waist plane there.
    pub fn allocate(metrics: &RingMetrics, order: &[usize], theta_start: f64) -> Self {
        let r = metrics.reference;
        let ref_starts = starts(metrics, r, order);
        let ref_denom = metrics.c_half[r];

        let windows = (0..metrics.num_rings())
            .map(|k| {
                let s_start = starts(metrics, k, order);
                let denom = if metrics.has_width(k) {
                    metrics.c_half[k]
                } else {
                    ref_denom
                };

                (0..metrics.num_panels())
                    .map(|i| {
                        if metrics.valid[k][i] {
                            let theta0 = theta_start + s_start[i] / denom * PI;
                            AngularWindow {
                                theta0,
                                theta1: theta0 + metrics.width[k][i] / denom * PI,
                                radius: metrics.radius[k],
                                offset_mm: metrics.offsets_mm[k],
                                degraded: false,
                            }
                        } else {
                            log::warn!(
                                "panel {i} has no sample at ring {k} ({} mm); collapsing to waist",
                                metrics.offsets_mm[k]
                            );
                            let theta0 = theta_start + ref_starts[i] / ref_denom * PI;
                            AngularWindow {
                                theta0,
                                theta1: theta0 + metrics.width[r][i] / ref_denom * PI,
                                radius: metrics.radius[r],
                                offset_mm: 0.0,
                                degraded: true,
                            }
                        }
                    })
                    .collect()
            })
            .collect();

        Self { windows }
    }

    /// Window of panel `panel` on ring `ring`.
    pub fn get(&self, ring: usize, panel: usize) -> &AngularWindow {
        &self.windows[ring][panel]
    }

    /// All windows on one ring, in input order.
    pub fn ring(&self, ring: usize) -> &[AngularWindow] {
        &self.windows[ring]
    }

    /// Number of rings.
    pub fn num_rings(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{rect_panel, seams_of, short_left_seam_panel};
    use approx::assert_relative_eq;

    #[test]
    fn test_two_rectangles_split_half_turn() {
        let panels = [rect_panel("A", 0.0, 50.0), rect_panel("B", 60.0, 50.0)];
        let m = RingMetrics::compute(&seams_of(&panels), &[-80.0, 0.0, 80.0]).unwrap();
        let w = AngularWindows::allocate(&m, &[0, 1], 0.0);

        for k in 0..3 {
            let a = w.get(k, 0);
            let b = w.get(k, 1);
            assert_relative_eq!(a.theta0, 0.0, epsilon = 1e-12);
            assert_relative_eq!(a.theta1, PI / 2.0, epsilon = 1e-12);
            assert_relative_eq!(b.theta0, PI / 2.0, epsilon = 1e-12);
            assert_relative_eq!(b.theta1, PI, epsilon = 1e-12);
            assert!(!a.degraded && !b.degraded);
        }
    }

    #[test]
    fn test_order_is_explicit() {
        let panels = [rect_panel("A", 0.0, 50.0), rect_panel("B", 60.0, 50.0)];
        let m = RingMetrics::compute(&seams_of(&panels), &[-80.0, 0.0, 80.0]).unwrap();
        let w = AngularWindows::allocate(&m, &[1, 0], 0.25);

        assert_relative_eq!(w.get(1, 1).theta0, 0.25, epsilon = 1e-12);
        assert_relative_eq!(w.get(1, 0).theta0, 0.25 + PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_contiguous_and_proportional() {
        let panels = [
            rect_panel("A", 0.0, 30.0),
            rect_panel("B", 40.0, 45.0),
            rect_panel("C", 100.0, 20.0),
        ];
        let m = RingMetrics::compute(&seams_of(&panels), &[-80.0, 0.0, 80.0]).unwrap();
        let w = AngularWindows::allocate(&m, &[0, 1, 2], 0.1);
        for k in 0..3 {
            for i in 0..3 {
                let win = w.get(k, i);
                assert_relative_eq!(win.span(), m.width[k][i] / m.c_half[k] * PI, epsilon = 1e-12);
            }
            for i in 0..2 {
                assert_relative_eq!(w.get(k, i).theta1, w.get(k, i + 1).theta0, epsilon = 1e-12);
            }
            assert_relative_eq!(w.get(k, 2).theta1, 0.1 + PI, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invalid_panel_uses_reference_ring() {
        let panels = [
            rect_panel("A", 0.0, 50.0),
            short_left_seam_panel("B", 60.0, 50.0, 60.0),
        ];
        let m = RingMetrics::compute(&seams_of(&panels), &[-80.0, 0.0, 80.0]).unwrap();
        let w = AngularWindows::allocate(&m, &[0, 1], 0.0);

        let top = w.get(2, 1);
        let reference = w.get(1, 1);
        assert!(top.degraded);
        assert_eq!(top.offset_mm, 0.0);
        assert_relative_eq!(top.theta0, reference.theta0, epsilon = 1e-12);
        assert_relative_eq!(top.theta1, reference.theta1, epsilon = 1e-12);
        assert_relative_eq!(top.radius, reference.radius, epsilon = 1e-12);

        // A alone spans the whole half turn at the ring B misses.
        assert_relative_eq!(w.get(2, 0).span(), PI, epsilon = 1e-12);
    }
}
