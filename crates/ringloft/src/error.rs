//! Error types for the loft engine.

use thiserror::Error;

/// Structural failures that stop a build.
///
/// Missing curves, absent seam intersections and zero-width rings are not
/// errors; they surface as validity flags and degraded output instead.
#[derive(Error, Debug)]
pub enum LoftError {
    /// No panels were supplied.
    #[error("no panels to loft")]
    NoPanels,

    /// Invalid build configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Config text could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A panel has no usable waist line, so its waist height is unknown.
    #[error("panel {panel} has no waist line with at least two points")]
    MissingWaist {
        /// Identifier of the offending panel.
        panel: String,
    },

    /// The reference ring has no measurable width across all panels.
    #[error("reference ring at offset {offset_mm} mm has no width (half-circumference {c_half})")]
    DegenerateReferenceRing {
        /// Offset of the reference ring.
        offset_mm: f64,
        /// Measured half-circumference.
        c_half: f64,
    },

    /// The explicit pattern order is not a permutation of the panels.
    #[error("invalid panel order: {0}")]
    InvalidOrder(String),
}

/// Result type for loft operations.
pub type Result<T> = std::result::Result<T, LoftError>;
