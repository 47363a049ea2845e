//! Panel textures in mesh UV space.
//!
//! `u` runs across the panel from the previous seam (0) to the next seam
//! (1) at the local height; `v` is the fractional ring index, matching the
//! UVs emitted by the textured mesh. Image row 0 is `v = 0`.

use image::{Rgba, RgbaImage};
use ringloft_math::{lerp, Point2, Tolerance};
use ringloft_pattern::{CurveKind, Curve, Edge, Panel};

use crate::config::TextureSettings;
use crate::mesh::{palette_color, TextureSupplier};
use crate::seam::PanelSeams;

/// Rows scanned when searching for the outermost measurable heights.
pub const SAFE_SCAN_STEPS: usize = 200;

/// Pieces each curve segment is split into when rasterized.
const SEGMENT_STEPS: usize = 32;

const SEAM_COLOR: Rgba<u8> = Rgba([40, 40, 40, 255]);
const WAIST_COLOR: Rgba<u8> = Rgba([200, 30, 30, 255]);
const OUTLINE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Ring offset at fractional ring index `v`.
pub fn offset_at_v(offsets: &[f64], v: f64) -> f64 {
    match offsets.len() {
        0 => 0.0,
        1 => offsets[0],
        n => {
            let f = v.clamp(0.0, 1.0) * (n - 1) as f64;
            let k = (f.floor() as usize).min(n - 2);
            lerp(offsets[k], offsets[k + 1], f - k as f64)
        }
    }
}

/// Fractional ring index of `offset`, from the first ring pair that brackets
/// it. `None` outside the ring range.
pub fn v_at_offset(offsets: &[f64], offset: f64) -> Option<f64> {
    let n = offsets.len();
    if n < 2 {
        return None;
    }
    let den = (n - 1) as f64;
    for k in 0..n - 1 {
        let (a, b) = (offsets[k], offsets[k + 1]);
        if offset < a.min(b) || offset > a.max(b) {
            continue;
        }
        let t = if (b - a).abs() > 0.0 { (offset - a) / (b - a) } else { 0.0 };
        return Some((k as f64 + t) / den);
    }
    None
}

/// Maps between pattern points and UVs for one panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelUvMap<'a> {
    seams: &'a PanelSeams,
    offsets: &'a [f64],
}

impl<'a> PanelUvMap<'a> {
    /// Map for a panel's seams over the given rings.
    pub fn new(seams: &'a PanelSeams, offsets: &'a [f64]) -> Self {
        Self { seams, offsets }
    }

    /// Pattern point at `(u, v)`, if both seams reach that height.
    pub fn point_at(&self, u: f64, v: f64) -> Option<Point2> {
        let y = self.seams.waist_y - offset_at_v(self.offsets, v);
        let span = self.seams.span_at_y(y)?;
        Some(Point2::new(span.x_at(u), y))
    }

    /// UV of a pattern point, if it lies within the ring range and both seams
    /// reach its height.
    pub fn uv_of(&self, p: &Point2) -> Option<(f64, f64)> {
        let v = v_at_offset(self.offsets, self.seams.waist_y - p.y)?;
        let span = self.seams.span_at_y(p.y)?;
        let w = span.right_x - span.left_x;
        if w.abs() <= Tolerance::DEFAULT.linear {
            return None;
        }
        Some(((p.x - span.left_x) / w, v))
    }

    /// Whether both seams reach the height at `v`.
    pub fn row_valid(&self, v: f64) -> bool {
        self.seams.span_at_offset(offset_at_v(self.offsets, v)).is_some()
    }

    /// Outermost measurable `v` from each end: scanning from `v = 0` inward,
    /// and from `v = 1` inward, the first height where both seams sample.
    pub fn safe_v_range(&self) -> Option<(f64, f64)> {
        let at = |s: usize| s as f64 / SAFE_SCAN_STEPS as f64;
        let lo = (0..=SAFE_SCAN_STEPS).map(at).find(|&v| self.row_valid(v))?;
        let hi = (0..=SAFE_SCAN_STEPS).rev().map(at).find(|&v| self.row_valid(v))?;
        Some((lo, hi))
    }
}

/// Rasterizes panel fill, seams, waist and outline into UV space.
#[derive(Debug, Clone, Copy)]
pub struct PanelTextureRenderer<'a> {
    seams: &'a [PanelSeams],
    offsets: &'a [f64],
    order: &'a [usize],
    settings: TextureSettings,
}

impl<'a> PanelTextureRenderer<'a> {
    /// Renderer over a loft's seams, rings and pattern order.
    ///
    /// `settings` are not validated here; dimensions below 2 are raised to 2
    /// when rendering.
    pub fn new(
        seams: &'a [PanelSeams],
        offsets: &'a [f64],
        order: &'a [usize],
        settings: TextureSettings,
    ) -> Self {
        Self {
            seams,
            offsets,
            order,
            settings,
        }
    }

    /// Render panel `index`.
    pub fn render(&self, index: usize, panel: &Panel) -> RgbaImage {
        let (w, h) = (self.settings.width.max(2), self.settings.height.max(2));
        let mut img = RgbaImage::new(w, h);
        let map = PanelUvMap::new(&self.seams[index], self.offsets);
        let position = self.order.iter().position(|&i| i == index).unwrap_or(index);
        let fill = palette_color(position);

        for py in 0..h {
            let v = f64::from(py) / f64::from(h - 1);
            if !map.row_valid(v) {
                continue;
            }
            for px in 0..w {
                img.put_pixel(px, py, fill);
            }
            img.put_pixel(0, py, SEAM_COLOR);
            img.put_pixel(w - 1, py, SEAM_COLOR);
        }

        if let Some(waist) = panel.curve(CurveKind::Waist) {
            draw_curve(&mut img, &map, waist, WAIST_COLOR);
        }

        // Safe lines first so every measurable column gets a top and bottom
        // line; the real edges are drawn over them where they map.
        if let Some((lo, hi)) = map.safe_v_range() {
            // The larger offset is the top of the garment.
            let top_at_high_v = self.offsets.last() > self.offsets.first();
            for edge in Edge::BOTH {
                let v = match (edge, top_at_high_v) {
                    (Edge::Top, true) | (Edge::Bottom, false) => hi,
                    _ => lo,
                };
                let row = to_pixel(v, h);
                for px in 0..w {
                    img.put_pixel(px, row, OUTLINE_COLOR);
                }
            }
        }
        for edge in Edge::BOTH {
            if let Some(curve) = panel.edge(edge) {
                draw_curve(&mut img, &map, curve, OUTLINE_COLOR);
            }
        }

        img
    }
}

impl TextureSupplier for PanelTextureRenderer<'_> {
    fn texture(&self, index: usize, panel: &Panel) -> Option<RgbaImage> {
        Some(self.render(index, panel))
    }
}

fn to_pixel(t: f64, size: u32) -> u32 {
    (t.clamp(0.0, 1.0) * f64::from(size - 1)).round() as u32
}

/// Draw the mappable parts of `curve`.
///
/// Each segment is split into `SEGMENT_STEPS` pieces so a segment that
/// leaves the ring range is clipped rather than dropped.
fn draw_curve(img: &mut RgbaImage, map: &PanelUvMap<'_>, curve: &Curve, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    let pixel = |p: &Point2| map.uv_of(p).map(|(u, v)| (to_pixel(u, w), to_pixel(v, h)));

    for seg in curve.points.windows(2) {
        let mut prev = pixel(&seg[0]);
        for step in 1..=SEGMENT_STEPS {
            let t = step as f64 / SEGMENT_STEPS as f64;
            let next = pixel(&seg[0].lerp(&seg[1], t));
            if let (Some(a), Some(b)) = (prev, next) {
                draw_line(img, a, b, color);
            }
            prev = next;
        }
    }
}

/// Bresenham line between two in-bounds pixels.
fn draw_line(img: &mut RgbaImage, (x0, y0): (u32, u32), (x1, y1): (u32, u32), color: Rgba<u8>) {
    let (mut x, mut y) = (i64::from(x0), i64::from(y0));
    let (x1, y1) = (i64::from(x1), i64::from(y1));
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        img.put_pixel(x as u32, y as u32, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
