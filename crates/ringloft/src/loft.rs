//! The `RingLoft` facade: one reconstruction over a panel list.

use image::RgbaImage;
use ringloft_pattern::{Edge, Panel, PanelId};

use crate::config::BuildConfig;
use crate::error::{LoftError, Result};
use crate::mesh::{
    build_panel_mesh, palette_color, PanelMaterial, PanelMesh, TextureSupplier, TexturedPanelMesh,
    TriangleMesh,
};
use crate::outline::{reproject_edge, OutlineParams, Polyline3};
use crate::rings::RingMetrics;
use crate::seam::PanelSeams;
use crate::texture::PanelTextureRenderer;
use crate::windows::AngularWindows;
use crate::wire::{ring_wires, RingWire};

/// Re-projected outline of one panel edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOutline {
    /// Panel identifier.
    pub panel: PanelId,
    /// Index of the panel in the input list.
    pub index: usize,
    /// Which edge.
    pub edge: Edge,
    /// Runs of measurable samples.
    pub polylines: Vec<Polyline3>,
}

/// A ring-loft reconstruction.
///
/// Construction measures every panel at every ring and allocates angular
/// windows once; meshes, ring wires, outlines and textures are all derived
/// from those same tables.
#[derive(Debug, Clone)]
pub struct RingLoft<'a> {
    panels: &'a [Panel],
    config: BuildConfig,
    order: Vec<usize>,
    seams: Vec<PanelSeams>,
    metrics: RingMetrics,
    windows: AngularWindows,
}

impl<'a> RingLoft<'a> {
    /// Loft `panels` with slice order as pattern order.
    pub fn new(panels: &'a [Panel], config: BuildConfig) -> Result<Self> {
        Self::with_order(panels, (0..panels.len()).collect(), config)
    }

    /// Loft `panels`, laying them around each ring in `order` (a permutation
    /// of panel indices).
    pub fn with_order(panels: &'a [Panel], order: Vec<usize>, config: BuildConfig) -> Result<Self> {
        config.validate()?;
        if panels.is_empty() {
            return Err(LoftError::NoPanels);
        }
        validate_order(&order, panels.len())?;

        let seams = panels
            .iter()
            .map(|p| {
                PanelSeams::from_panel(p).ok_or_else(|| LoftError::MissingWaist {
                    panel: p.id.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let metrics = RingMetrics::compute(&seams, &config.offsets_mm)?;
        let windows = AngularWindows::allocate(&metrics, &order, config.theta_start_rad);

        log::debug!(
            "lofted {} panels over {} rings, half-circumference at reference {:.3} mm",
            panels.len(),
            metrics.num_rings(),
            metrics.c_half[metrics.reference]
        );

        Ok(Self {
            panels,
            config,
            order,
            seams,
            metrics,
            windows,
        })
    }

    /// Input panels.
    pub fn panels(&self) -> &'a [Panel] {
        self.panels
    }

    /// Build configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Panel indices in pattern order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Joined seams per panel.
    pub fn seams(&self) -> &[PanelSeams] {
        &self.seams
    }

    /// Width and radius tables.
    pub fn metrics(&self) -> &RingMetrics {
        &self.metrics
    }

    /// Angular windows.
    pub fn windows(&self) -> &AngularWindows {
        &self.windows
    }

    /// Waist height of panel `i`.
    pub fn waist_y(&self, i: usize) -> f64 {
        self.seams[i].waist_y
    }

    /// One mesh per panel, in pattern order.
    pub fn meshes(&self) -> Vec<PanelMesh> {
        self.order
            .iter()
            .map(|&i| PanelMesh {
                panel: self.panels[i].id.clone(),
                index: i,
                mesh: self.panel_mesh(i, false),
            })
            .collect()
    }

    /// One UV-mapped mesh per panel, in pattern order, textured by
    /// `supplier` or colored from the palette when it returns nothing.
    pub fn textured_meshes(&self, supplier: &dyn TextureSupplier) -> Vec<TexturedPanelMesh> {
        self.order
            .iter()
            .enumerate()
            .map(|(position, &i)| {
                let panel = &self.panels[i];
                let material = supplier
                    .texture(i, panel)
                    .map_or_else(|| PanelMaterial::Flat(palette_color(position)), PanelMaterial::Texture);
                TexturedPanelMesh {
                    panel: panel.id.clone(),
                    index: i,
                    mesh: self.panel_mesh(i, true),
                    material,
                }
            })
            .collect()
    }

    fn panel_mesh(&self, i: usize, with_uvs: bool) -> TriangleMesh {
        build_panel_mesh(
            &self.metrics,
            &self.windows,
            i,
            self.config.panel_subdiv,
            self.config.scale,
            with_uvs,
        )
    }

    /// Ring cross-sections for wireframe display.
    pub fn ring_wires(&self) -> Vec<RingWire> {
        ring_wires(
            &self.metrics,
            &self.windows,
            &self.order,
            self.config.panel_subdiv,
            self.config.scale,
        )
    }

    /// Re-project one edge of panel `i`.
    pub fn outline(&self, i: usize, edge: Edge) -> Vec<Polyline3> {
        let params = OutlineParams {
            seams: &self.seams,
            order: &self.order,
            theta_start: self.config.theta_start_rad,
            scale: self.config.scale,
            samples: self.config.outline_samples,
        };
        reproject_edge(&params, i, self.panels[i].edge(edge))
    }

    /// Re-project one edge of every panel, in pattern order.
    pub fn outlines(&self, edge: Edge) -> Vec<PanelOutline> {
        self.order
            .iter()
            .map(|&i| PanelOutline {
                panel: self.panels[i].id.clone(),
                index: i,
                edge,
                polylines: self.outline(i, edge),
            })
            .collect()
    }

    /// Texture renderer sharing this loft's seams and rings.
    pub fn texture_renderer(&self) -> PanelTextureRenderer<'_> {
        PanelTextureRenderer::new(
            &self.seams,
            &self.config.offsets_mm,
            &self.order,
            self.config.texture,
        )
    }

    /// Render the texture of panel `i`.
    pub fn render_texture(&self, i: usize) -> RgbaImage {
        self.texture_renderer().render(i, &self.panels[i])
    }
}

fn validate_order(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(LoftError::InvalidOrder(format!(
            "expected {n} entries, got {}",
            order.len()
        )));
    }
    let mut seen = vec![false; n];
    for &i in order {
        if i >= n {
            return Err(LoftError::InvalidOrder(format!("index {i} out of range")));
        }
        if std::mem::replace(&mut seen[i], true) {
            return Err(LoftError::InvalidOrder(format!("index {i} repeated")));
        }
    }
    Ok(())
}
