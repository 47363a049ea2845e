//! Triangle strips per panel across consecutive rings.

use image::{Rgba, RgbaImage};
use ringloft_math::{ring_point, Vec3};
use ringloft_pattern::{Panel, PanelId};

use crate::rings::RingMetrics;
use crate::windows::AngularWindows;

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). Same length as vertices.
    pub normals: Vec<f32>,
    /// Flat array of texture coordinates: `[u0, v0, u1, v1, ...]` (f32).
    /// Either empty or exactly one pair per vertex.
    pub uvs: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Whether the mesh carries texture coordinates.
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: usize) -> [f32; 3] {
        [
            self.vertices[i * 3],
            self.vertices[i * 3 + 1],
            self.vertices[i * 3 + 2],
        ]
    }

    /// Merge another mesh into this one.
    ///
    /// UVs stay consistent only when both meshes carry them or neither does.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Recompute smooth vertex normals from area-weighted face normals.
    ///
    /// Vertices not used by any face get a zero normal.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vec3::zeros(); self.num_vertices()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p = |i: usize| {
                let v = self.vertex(i);
                Vec3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2]))
            };
            let n = (p(b) - p(a)).cross(&(p(c) - p(a)));
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }

        self.normals.clear();
        self.normals.reserve(acc.len() * 3);
        for n in acc {
            let n = if n.norm() > 1e-20 { n.normalize() } else { n };
            self.normals
                .extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }
    }
}

/// Mesh of a single panel.
#[derive(Debug, Clone)]
pub struct PanelMesh {
    /// Panel identifier.
    pub panel: PanelId,
    /// Index of the panel in the input list.
    pub index: usize,
    /// Ring-major vertex grid: `panel_subdiv + 1` vertices per ring.
    pub mesh: TriangleMesh,
}

/// Surface appearance of a textured panel mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelMaterial {
    /// Image addressed by the mesh UVs.
    Texture(RgbaImage),
    /// Flat palette color, used when no image was supplied.
    Flat(Rgba<u8>),
}

/// Panel mesh with UVs and a material.
#[derive(Debug, Clone)]
pub struct TexturedPanelMesh {
    /// Panel identifier.
    pub panel: PanelId,
    /// Index of the panel in the input list.
    pub index: usize,
    /// Mesh with one UV per vertex.
    pub mesh: TriangleMesh,
    /// Texture or fallback color.
    pub material: PanelMaterial,
}

/// Supplies a texture image for a panel.
pub trait TextureSupplier {
    /// Image for the panel at input index `index`, or `None` for a flat color.
    fn texture(&self, index: usize, panel: &Panel) -> Option<RgbaImage>;
}

impl<F> TextureSupplier for F
where
    F: Fn(usize, &Panel) -> Option<RgbaImage>,
{
    fn texture(&self, index: usize, panel: &Panel) -> Option<RgbaImage> {
        self(index, panel)
    }
}

/// Supplier that never provides an image.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextures;

impl TextureSupplier for NoTextures {
    fn texture(&self, _index: usize, _panel: &Panel) -> Option<RgbaImage> {
        None
    }
}

const PALETTE: [[u8; 4]; 8] = [
    [230, 159, 0, 255],
    [86, 180, 233, 255],
    [0, 158, 115, 255],
    [240, 228, 66, 255],
    [0, 114, 178, 255],
    [213, 94, 0, 255],
    [204, 121, 167, 255],
    [153, 153, 153, 255],
];

/// Palette color for the panel at pattern position `position`.
pub fn palette_color(position: usize) -> Rgba<u8> {
    Rgba(PALETTE[position % PALETTE.len()])
}

/// Build the vertex grid and faces of panel `i`.
///
/// Every ring contributes `subdiv + 1` vertices, even where the panel is
/// degraded; faces between rings `k` and `k + 1` exist only when the panel
/// is valid at both.
pub fn build_panel_mesh(
    metrics: &RingMetrics,
    windows: &AngularWindows,
    i: usize,
    subdiv: u32,
    scale: f64,
    with_uvs: bool,
) -> TriangleMesh {
    let n_rings = metrics.num_rings();
    let cols = subdiv as usize + 1;
    let mut mesh = TriangleMesh {
        vertices: Vec::with_capacity(n_rings * cols * 3),
        uvs: Vec::with_capacity(if with_uvs { n_rings * cols * 2 } else { 0 }),
        ..TriangleMesh::default()
    };

    let v_den = (n_rings - 1).max(1) as f64;
    for k in 0..n_rings {
        let win = windows.get(k, i);
        let height = -win.offset_mm * scale;
        for j in 0..cols {
            let t = j as f64 / f64::from(subdiv);
            let p = ring_point(win.radius, win.theta_at(t), height, scale);
            mesh.vertices
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            if with_uvs {
                mesh.uvs.extend_from_slice(&[t as f32, (k as f64 / v_den) as f32]);
            }
        }
    }

    for k in 0..n_rings.saturating_sub(1) {
        if !(metrics.valid[k][i] && metrics.valid[k + 1][i]) {
            continue;
        }
        for j in 0..subdiv as usize {
            let a = (k * cols + j) as u32;
            let b = a + 1;
            let c = ((k + 1) * cols + j) as u32;
            let d = c + 1;
            mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    mesh.compute_normals();
    mesh
}
