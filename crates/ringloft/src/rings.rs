//! Per-ring panel widths, half-circumferences and radii.

use std::f64::consts::PI;

use ringloft_math::Tolerance;

use crate::config::reference_ring;
use crate::error::{LoftError, Result};
use crate::seam::PanelSeams;

/// Width table for every `(ring, panel)` pair plus the derived ring sizes.
///
/// Tables are indexed `[ring][panel]`, with panels in input (not pattern)
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct RingMetrics {
    /// Ring height offsets (mm).
    pub offsets_mm: Vec<f64>,
    /// Seam-to-seam width of each panel at each ring, 0 when invalid.
    pub width: Vec<Vec<f64>>,
    /// Whether both seams of a panel reach a ring.
    pub valid: Vec<Vec<bool>>,
    /// Sum of valid widths per ring.
    pub c_half: Vec<f64>,
    /// Radius per ring; zero-width rings take the waist radius.
    pub radius: Vec<f64>,
    /// Index of the reference (waist) ring.
    pub reference: usize,
    /// Radius of the reference ring.
    pub waist_radius: f64,
}

impl RingMetrics {
    /// Measure every panel at every ring.
    ///
    /// Fails when the reference ring has no width at all, since then no
    /// radius can be inferred.
    pub fn compute(seams: &[PanelSeams], offsets_mm: &[f64]) -> Result<Self> {
        let eps = Tolerance::DEFAULT.linear;
        let n_rings = offsets_mm.len();
        let n_panels = seams.len();

        let mut width = vec![vec![0.0; n_panels]; n_rings];
        let mut valid = vec![vec![false; n_panels]; n_rings];
        let mut c_half = vec![0.0; n_rings];

        for (k, &offset) in offsets_mm.iter().enumerate() {
            for (i, panel) in seams.iter().enumerate() {
                if let Some(span) = panel.span_at_offset(offset) {
                    width[k][i] = span.width();
                    valid[k][i] = true;
                    c_half[k] += span.width();
                }
            }
        }

        let reference = reference_ring(offsets_mm);
        if c_half[reference] <= eps {
            return Err(LoftError::DegenerateReferenceRing {
                offset_mm: offsets_mm[reference],
                c_half: c_half[reference],
            });
        }
        let waist_radius = c_half[reference] / PI;

        let radius = c_half
            .iter()
            .zip(offsets_mm)
            .map(|(&c, offset)| {
                if c > eps {
                    c / PI
                } else {
                    log::warn!("ring at {offset} mm has no width; using waist radius");
                    waist_radius
                }
            })
            .collect();

        let metrics = Self {
            offsets_mm: offsets_mm.to_vec(),
            width,
            valid,
            c_half,
            radius,
            reference,
            waist_radius,
        };
        log::debug!(
            "ring metrics: {} rings x {} panels, reference ring {} ({} mm), waist radius {:.3} mm",
            n_rings,
            n_panels,
            reference,
            offsets_mm[reference],
            waist_radius
        );
        Ok(metrics)
    }

    /// Number of rings.
    pub fn num_rings(&self) -> usize {
        self.offsets_mm.len()
    }

    /// Number of panels.
    pub fn num_panels(&self) -> usize {
        self.width.first().map_or(0, Vec::len)
    }

    /// Count of panels with a valid sample at ring `k`.
    pub fn valid_count(&self, k: usize) -> usize {
        self.valid[k].iter().filter(|&&v| v).count()
    }

    /// Whether ring `k` has a usable circumference of its own.
    pub fn has_width(&self, k: usize) -> bool {
        self.c_half[k] > Tolerance::DEFAULT.linear
    }
}
