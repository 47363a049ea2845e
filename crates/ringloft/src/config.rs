//! Build configuration.

use serde::{Deserialize, Serialize};

use crate::error::{LoftError, Result};

/// Raster size for panel textures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    /// Image width in pixels (u axis).
    pub width: u32,
    /// Image height in pixels (v axis).
    pub height: u32,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

/// Loft parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Signed ring heights relative to the waist (mm). The offset with the
    /// smallest magnitude is the reference ring.
    pub offsets_mm: Vec<f64>,
    /// Angle where the first panel starts (radians).
    pub theta_start_rad: f64,
    /// Conversion from mm to world units.
    pub scale: f64,
    /// Angular segments per panel per ring.
    pub panel_subdiv: u32,
    /// Samples taken along each top/bottom edge when re-projecting outlines.
    pub outline_samples: usize,
    /// Panel texture raster size.
    pub texture: TextureSettings,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            offsets_mm: (-6..=6).map(|i| f64::from(i) * 25.0).collect(),
            theta_start_rad: 0.0,
            scale: 0.001,
            panel_subdiv: 8,
            outline_samples: 100,
            texture: TextureSettings::default(),
        }
    }
}

impl BuildConfig {
    /// Config with the given ring offsets and defaults elsewhere.
    pub fn with_offsets(offsets_mm: Vec<f64>) -> Self {
        Self {
            offsets_mm,
            ..Default::default()
        }
    }

    /// Parse a TOML document; absent keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.offsets_mm.len() < 2 {
            return Err(LoftError::InvalidConfig(format!(
                "need at least 2 ring offsets, got {}",
                self.offsets_mm.len()
            )));
        }
        if let Some(bad) = self.offsets_mm.iter().find(|o| !o.is_finite()) {
            return Err(LoftError::InvalidConfig(format!(
                "ring offset {bad} is not finite"
            )));
        }
        if self.panel_subdiv < 1 {
            return Err(LoftError::InvalidConfig(
                "panel_subdiv must be at least 1".into(),
            ));
        }
        if !self.theta_start_rad.is_finite() {
            return Err(LoftError::InvalidConfig(
                "theta_start_rad must be finite".into(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(LoftError::InvalidConfig("scale must be positive".into()));
        }
        if self.outline_samples < 2 {
            return Err(LoftError::InvalidConfig(
                "outline_samples must be at least 2".into(),
            ));
        }
        if self.texture.width < 2 || self.texture.height < 2 {
            return Err(LoftError::InvalidConfig(
                "texture must be at least 2x2 pixels".into(),
            ));
        }
        Ok(())
    }

    /// Index of the reference (waist) ring: the smallest `|offset|`, first
    /// wins on ties.
    pub fn reference_ring(&self) -> usize {
        reference_ring(&self.offsets_mm)
    }
}

pub(crate) fn reference_ring(offsets: &[f64]) -> usize {
    let mut best = 0;
    for (k, o) in offsets.iter().enumerate() {
        if o.abs() < offsets[best].abs() {
            best = k;
        }
    }
    best
}
