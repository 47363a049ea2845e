//! OBJ and JSON writers for loft results.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use ringloft::{PanelMaterial, PanelOutline, RingWire, TexturedPanelMesh};

/// Render all panel meshes as one Wavefront OBJ, one `o` group and
/// material per panel.
///
/// Indices are rebased per panel since OBJ indices are global and 1-based.
/// Texture rows run top-down while OBJ `vt` runs bottom-up, so `v` is
/// flipped.
pub fn obj_string(meshes: &[TexturedPanelMesh], with_uvs: bool, mtllib: Option<&str>) -> String {
    let mut out = String::from("# ringloft export\n");
    if let Some(lib) = mtllib {
        let _ = writeln!(out, "mtllib {lib}");
    }
    let mut base = 1usize;

    for pm in meshes {
        let mesh = &pm.mesh;
        let _ = writeln!(out, "o panel_{}", pm.panel);
        if mtllib.is_some() {
            let _ = writeln!(out, "usemtl panel_{}", pm.panel);
        }
        for v in mesh.vertices.chunks_exact(3) {
            let _ = writeln!(out, "v {} {} {}", v[0], v[1], v[2]);
        }
        let uvs = with_uvs && mesh.has_uvs();
        if uvs {
            for t in mesh.uvs.chunks_exact(2) {
                let _ = writeln!(out, "vt {} {}", t[0], 1.0 - t[1]);
            }
        }
        let normals = mesh.normals.len() == mesh.vertices.len();
        if normals {
            for n in mesh.normals.chunks_exact(3) {
                let _ = writeln!(out, "vn {} {} {}", n[0], n[1], n[2]);
            }
        }
        for tri in mesh.indices.chunks_exact(3) {
            out.push('f');
            for &idx in tri {
                let i = base + idx as usize;
                let _ = match (uvs, normals) {
                    (true, true) => write!(out, " {i}/{i}/{i}"),
                    (true, false) => write!(out, " {i}/{i}"),
                    (false, true) => write!(out, " {i}//{i}"),
                    (false, false) => write!(out, " {i}"),
                };
            }
            out.push('\n');
        }
        base += mesh.num_vertices();
    }

    out
}

/// One material per panel: its texture (`panel_<id>.png`) or its flat color.
pub fn mtl_string(meshes: &[TexturedPanelMesh]) -> String {
    let mut out = String::from("# ringloft materials\n");
    for pm in meshes {
        let _ = writeln!(out, "\nnewmtl panel_{}", pm.panel);
        match &pm.material {
            PanelMaterial::Texture(_) => {
                out.push_str("Kd 1 1 1\n");
                let _ = writeln!(out, "map_Kd panel_{}.png", pm.panel);
            }
            PanelMaterial::Flat(color) => {
                let [r, g, b, _] = color.0.map(|c| f32::from(c) / 255.0);
                let _ = writeln!(out, "Kd {r} {g} {b}");
            }
        }
    }
    out
}

/// Write `path` and a sibling `.mtl` library it references.
pub fn write_obj(path: &Path, meshes: &[TexturedPanelMesh], with_uvs: bool) -> Result<()> {
    let mtl_path = path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .and_then(|n| n.to_str())
        .context("material library path is not valid UTF-8")?;
    fs::write(&mtl_path, mtl_string(meshes))
        .with_context(|| format!("writing {}", mtl_path.display()))?;
    fs::write(path, obj_string(meshes, with_uvs, Some(mtl_name)))
        .with_context(|| format!("writing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

#[derive(Serialize)]
pub struct OutlineDoc {
    panel: String,
    edge: &'static str,
    polylines: Vec<Vec<[f64; 3]>>,
}

#[derive(Serialize)]
pub struct RingDoc {
    ring: usize,
    offset_mm: f64,
    polylines: Vec<Vec<[f64; 3]>>,
}

fn points(polylines: &[ringloft::Polyline3]) -> Vec<Vec<[f64; 3]>> {
    polylines
        .iter()
        .map(|line| line.iter().map(|p| [p.x, p.y, p.z]).collect())
        .collect()
}

pub fn outlines_doc(outlines: &[PanelOutline]) -> Vec<OutlineDoc> {
    outlines
        .iter()
        .map(|o| OutlineDoc {
            panel: o.panel.to_string(),
            edge: o.edge.curve_kind().name(),
            polylines: points(&o.polylines),
        })
        .collect()
}

pub fn rings_doc(wires: &[RingWire]) -> Vec<RingDoc> {
    wires
        .iter()
        .map(|w| RingDoc {
            ring: w.ring,
            offset_mm: w.offset_mm,
            polylines: points(&w.polylines),
        })
        .collect()
}
