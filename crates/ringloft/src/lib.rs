#![warn(missing_docs)]

//! Ring-loft reconstruction for the ringloft engine.
//!
//! Rebuilds an approximate half-turn body of revolution from flat pattern
//! panels:
//! 1. Join each side seam across the waist and sample it at every ring height
//! 2. Sum panel widths per ring into a half-circumference and radius
//! 3. Give each panel an angular window proportional to its width
//! 4. Emit a triangle strip per panel between consecutive measurable rings
//! 5. Re-project the real top/bottom edges onto the same surface
//! 6. Render panel textures in the mesh's UV space
//!
//! Missing curves and unmeasurable heights degrade the output (gaps,
//! collapsed rings, split outlines) rather than failing the build.
//!
//! # Example
//!
//! ```
//! use ringloft::{BuildConfig, RingLoft};
//! use ringloft_pattern::{Curve, CurveKind, Panel};
//!
//! let panel = |id: &str, x0: f64| {
//!     Panel::new(id)
//!         .with_curve(CurveKind::Waist, Curve::from_xy(&[(x0, 100.0), (x0 + 50.0, 100.0)]))
//!         .with_curve(CurveKind::SeamToPrevUp, Curve::from_xy(&[(x0, 100.0), (x0, 0.0)]))
//!         .with_curve(CurveKind::SeamToPrevDown, Curve::from_xy(&[(x0, 100.0), (x0, 200.0)]))
//!         .with_curve(CurveKind::SeamToNextUp, Curve::from_xy(&[(x0 + 50.0, 100.0), (x0 + 50.0, 0.0)]))
//!         .with_curve(CurveKind::SeamToNextDown, Curve::from_xy(&[(x0 + 50.0, 100.0), (x0 + 50.0, 200.0)]))
//! };
//! let panels = vec![panel("A", 0.0), panel("B", 60.0)];
//!
//! let loft = RingLoft::new(&panels, BuildConfig::with_offsets(vec![-50.0, 0.0, 50.0])).unwrap();
//! assert!((loft.metrics().c_half[1] - 100.0).abs() < 1e-9);
//! assert_eq!(loft.meshes().len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod loft;
pub mod mesh;
pub mod outline;
pub mod rings;
pub mod seam;
pub mod texture;
pub mod windows;
pub mod wire;

pub use config::{BuildConfig, TextureSettings};
pub use error::{LoftError, Result};
pub use loft::{PanelOutline, RingLoft};
pub use mesh::{
    palette_color, NoTextures, PanelMaterial, PanelMesh, TextureSupplier, TexturedPanelMesh,
    TriangleMesh,
};
pub use outline::Polyline3;
pub use rings::RingMetrics;
pub use seam::{PanelSeams, PanelSpan, SeamPolyline, SeamSample};
pub use texture::{PanelTextureRenderer, PanelUvMap};
pub use windows::{AngularWindow, AngularWindows};
pub use wire::RingWire;

#[cfg(test)]
pub(crate) mod test_support {
    //! Panel fixtures: waist at y=200, top edge at y=0, bottom edge at y=400.

    use ringloft_pattern::{Curve, CurveKind, Panel};

    use crate::seam::PanelSeams;

    pub const WAIST_Y: f64 = 200.0;

    fn vertical(x: f64, from: f64, to: f64) -> Curve {
        Curve::from_xy(&[(x, from), (x, to)])
    }

    /// Rectangle `[x0, x0 + width]` spanning y 0..400.
    pub fn rect_panel(id: &str, x0: f64, width: f64) -> Panel {
        let x1 = x0 + width;
        Panel::new(id)
            .with_curve(CurveKind::Top, Curve::from_xy(&[(x0, 0.0), (x1, 0.0)]))
            .with_curve(CurveKind::Bottom, Curve::from_xy(&[(x0, 400.0), (x1, 400.0)]))
            .with_curve(CurveKind::Waist, Curve::from_xy(&[(x0, WAIST_Y), (x1, WAIST_Y)]))
            .with_curve(CurveKind::SeamToPrevUp, vertical(x0, WAIST_Y, 0.0))
            // Stored outward→waist to exercise orientation.
            .with_curve(CurveKind::SeamToPrevDown, vertical(x0, 400.0, WAIST_Y))
            .with_curve(CurveKind::SeamToNextUp, vertical(x1, WAIST_Y, 0.0))
            .with_curve(CurveKind::SeamToNextDown, vertical(x1, WAIST_Y, 400.0))
    }

    /// Like [`rect_panel`], but the left seam only reaches `reach_mm` above
    /// the waist.
    pub fn short_left_seam_panel(id: &str, x0: f64, width: f64, reach_mm: f64) -> Panel {
        rect_panel(id, x0, width).with_curve(
            CurveKind::SeamToPrevUp,
            vertical(x0, WAIST_Y, WAIST_Y - reach_mm),
        )
    }

    /// Panel 50 mm wide at a waist of height `waist_y` whose seams lean
    /// apart: width is `50 + 0.2 * offset` above the waist and
    /// `50 + 0.1 * offset` below it, reaching 200 mm either way.
    pub fn tapered_panel(id: &str, x0: f64, waist_y: f64) -> Panel {
        let x1 = x0 + 50.0;
        let (top, bottom) = (waist_y - 200.0, waist_y + 200.0);
        Panel::new(id)
            .with_curve(CurveKind::Top, Curve::from_xy(&[(x0 - 15.0, waist_y - 150.0), (x1 + 15.0, waist_y - 150.0)]))
            .with_curve(CurveKind::Waist, Curve::from_xy(&[(x0, waist_y), (x1, waist_y)]))
            .with_curve(CurveKind::SeamToPrevUp, Curve::from_xy(&[(x0, waist_y), (x0 - 20.0, top)]))
            .with_curve(CurveKind::SeamToPrevDown, Curve::from_xy(&[(x0, waist_y), (x0 + 10.0, bottom)]))
            .with_curve(CurveKind::SeamToNextUp, Curve::from_xy(&[(x1, waist_y), (x1 + 20.0, top)]))
            .with_curve(CurveKind::SeamToNextDown, Curve::from_xy(&[(x1, waist_y), (x1 - 10.0, bottom)]))
    }

    pub fn seams_of(panels: &[Panel]) -> Vec<PanelSeams> {
        panels
            .iter()
            .map(|p| PanelSeams::from_panel(p).expect("fixture has a waist"))
            .collect()
    }
}
