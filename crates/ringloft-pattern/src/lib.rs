#![warn(missing_docs)]

//! Flat pattern model for the ringloft engine.
//!
//! A pattern is an ordered list of [`Panel`]s. Each panel carries up to seven
//! named [`Curve`]s: top and bottom edges, the waist line, and the up/down
//! halves of the seams joining it to its previous (left) and next (right)
//! neighbours. Any curve may be absent; absence is an ordinary state, not an
//! error.
//!
//! # Example
//!
//! ```
//! use ringloft_pattern::{Curve, CurveKind, Panel};
//!
//! let panel = Panel::new("A")
//!     .with_curve(CurveKind::Waist, Curve::from_xy(&[(0.0, 100.0), (50.0, 100.0)]))
//!     .with_curve(CurveKind::SeamToPrevUp, Curve::from_xy(&[(0.0, 100.0), (0.0, 0.0)]));
//!
//! assert_eq!(panel.waist_y(), Some(100.0));
//! assert!(panel.curve(CurveKind::SeamToNextUp).is_none());
//! ```

mod curve;

pub use curve::{Crossing, Curve};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from loading pattern data.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The panel document is not valid JSON for a panel list.
    #[error("invalid panel document: {0}")]
    Json(#[from] serde_json::Error),

    /// Two panels share an identifier.
    #[error("duplicate panel id: {0}")]
    DuplicateId(String),
}

/// Identifier of a panel (for example `"A"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub String);

impl PanelId {
    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PanelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The seven named curves a panel may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Upper edge.
    Top,
    /// Lower edge.
    Bottom,
    /// Waist line; its end points anchor the waist height.
    Waist,
    /// Seam to the previous panel, above the waist.
    SeamToPrevUp,
    /// Seam to the previous panel, below the waist.
    SeamToPrevDown,
    /// Seam to the next panel, above the waist.
    SeamToNextUp,
    /// Seam to the next panel, below the waist.
    SeamToNextDown,
}

impl CurveKind {
    /// Every curve kind.
    pub const ALL: [CurveKind; 7] = [
        CurveKind::Top,
        CurveKind::Bottom,
        CurveKind::Waist,
        CurveKind::SeamToPrevUp,
        CurveKind::SeamToPrevDown,
        CurveKind::SeamToNextUp,
        CurveKind::SeamToNextDown,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            CurveKind::Top => "top",
            CurveKind::Bottom => "bottom",
            CurveKind::Waist => "waist",
            CurveKind::SeamToPrevUp => "seam_to_prev_up",
            CurveKind::SeamToPrevDown => "seam_to_prev_down",
            CurveKind::SeamToNextUp => "seam_to_next_up",
            CurveKind::SeamToNextDown => "seam_to_next_down",
        }
    }
}

/// An outline edge of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// The top edge.
    Top,
    /// The bottom edge.
    Bottom,
}

impl Edge {
    /// Both edges, top first.
    pub const BOTH: [Edge; 2] = [Edge::Top, Edge::Bottom];

    /// The curve holding this edge.
    pub fn curve_kind(self) -> CurveKind {
        match self {
            Edge::Top => CurveKind::Top,
            Edge::Bottom => CurveKind::Bottom,
        }
    }
}

/// A side seam of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeamSide {
    /// The seam shared with the previous panel (left side).
    Prev,
    /// The seam shared with the next panel (right side).
    Next,
}

impl SeamSide {
    /// The curve holding the half above the waist.
    pub fn up_kind(self) -> CurveKind {
        match self {
            SeamSide::Prev => CurveKind::SeamToPrevUp,
            SeamSide::Next => CurveKind::SeamToNextUp,
        }
    }

    /// The curve holding the half below the waist.
    pub fn down_kind(self) -> CurveKind {
        match self {
            SeamSide::Prev => CurveKind::SeamToPrevDown,
            SeamSide::Next => CurveKind::SeamToNextDown,
        }
    }
}

/// One flat pattern piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Panel identifier.
    pub id: PanelId,
    /// Upper edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Curve>,
    /// Lower edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Curve>,
    /// Waist line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<Curve>,
    /// Seam to the previous panel, above the waist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seam_to_prev_up: Option<Curve>,
    /// Seam to the previous panel, below the waist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seam_to_prev_down: Option<Curve>,
    /// Seam to the next panel, above the waist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seam_to_next_up: Option<Curve>,
    /// Seam to the next panel, below the waist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seam_to_next_down: Option<Curve>,
}

impl Panel {
    /// Create a panel with no curves.
    pub fn new(id: impl Into<PanelId>) -> Self {
        Self {
            id: id.into(),
            top: None,
            bottom: None,
            waist: None,
            seam_to_prev_up: None,
            seam_to_prev_down: None,
            seam_to_next_up: None,
            seam_to_next_down: None,
        }
    }

    /// Builder-style setter for one curve.
    pub fn with_curve(mut self, kind: CurveKind, curve: Curve) -> Self {
        self.set_curve(kind, Some(curve));
        self
    }

    /// Replace (or clear) one curve.
    pub fn set_curve(&mut self, kind: CurveKind, curve: Option<Curve>) {
        *self.slot_mut(kind) = curve;
    }

    /// A curve, if present and non-empty.
    pub fn curve(&self, kind: CurveKind) -> Option<&Curve> {
        self.slot(kind).as_ref().filter(|c| !c.is_empty())
    }

    /// The `(up, down)` halves of a side seam.
    pub fn seam(&self, side: SeamSide) -> (Option<&Curve>, Option<&Curve>) {
        (self.curve(side.up_kind()), self.curve(side.down_kind()))
    }

    /// An outline edge.
    pub fn edge(&self, edge: Edge) -> Option<&Curve> {
        self.curve(edge.curve_kind())
    }

    /// Waist height: the mean Y of the waist line's end points.
    ///
    /// `None` when the waist is absent or has fewer than two points.
    pub fn waist_y(&self) -> Option<f64> {
        let waist = self.curve(CurveKind::Waist).filter(|c| c.has_segments())?;
        let (a, b) = (waist.first()?, waist.last()?);
        Some((a.y + b.y) * 0.5)
    }

    fn slot(&self, kind: CurveKind) -> &Option<Curve> {
        match kind {
            CurveKind::Top => &self.top,
            CurveKind::Bottom => &self.bottom,
            CurveKind::Waist => &self.waist,
            CurveKind::SeamToPrevUp => &self.seam_to_prev_up,
            CurveKind::SeamToPrevDown => &self.seam_to_prev_down,
            CurveKind::SeamToNextUp => &self.seam_to_next_up,
            CurveKind::SeamToNextDown => &self.seam_to_next_down,
        }
    }

    fn slot_mut(&mut self, kind: CurveKind) -> &mut Option<Curve> {
        match kind {
            CurveKind::Top => &mut self.top,
            CurveKind::Bottom => &mut self.bottom,
            CurveKind::Waist => &mut self.waist,
            CurveKind::SeamToPrevUp => &mut self.seam_to_prev_up,
            CurveKind::SeamToPrevDown => &mut self.seam_to_prev_down,
            CurveKind::SeamToNextUp => &mut self.seam_to_next_up,
            CurveKind::SeamToNextDown => &mut self.seam_to_next_down,
        }
    }
}

/// Parse a JSON array of panels, rejecting duplicate identifiers.
///
/// Array order is kept as pattern order.
pub fn panels_from_json(json: &str) -> Result<Vec<Panel>, PatternError> {
    let panels: Vec<Panel> = serde_json::from_str(json)?;
    let mut seen = std::collections::HashSet::new();
    for panel in &panels {
        if !seen.insert(panel.id.clone()) {
            return Err(PatternError::DuplicateId(panel.id.to_string()));
        }
    }
    Ok(panels)
}

/// Serialize panels to pretty-printed JSON.
pub fn panels_to_json(panels: &[Panel]) -> Result<String, PatternError> {
    Ok(serde_json::to_string_pretty(panels)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waist_y_is_mean_of_end_points() {
        let panel = Panel::new("A").with_curve(
            CurveKind::Waist,
            Curve::from_xy(&[(0.0, 98.0), (25.0, 90.0), (50.0, 102.0)]),
        );
        assert_eq!(panel.waist_y(), Some(100.0));
    }

    #[test]
    fn test_waist_y_requires_two_points() {
        let panel = Panel::new("A").with_curve(CurveKind::Waist, Curve::from_xy(&[(0.0, 1.0)]));
        assert_eq!(panel.waist_y(), None);
        assert_eq!(Panel::new("B").waist_y(), None);
    }

    #[test]
    fn test_empty_curve_reads_as_absent() {
        let panel = Panel::new("A").with_curve(CurveKind::Top, Curve::default());
        assert!(panel.edge(Edge::Top).is_none());
    }

    #[test]
    fn test_seam_halves() {
        let up = Curve::from_xy(&[(0.0, 0.0), (0.0, -10.0)]);
        let panel = Panel::new("A").with_curve(CurveKind::SeamToNextUp, up.clone());
        let (u, d) = panel.seam(SeamSide::Next);
        assert_eq!(u, Some(&up));
        assert!(d.is_none());
        let (u, d) = panel.seam(SeamSide::Prev);
        assert!(u.is_none() && d.is_none());
    }

    #[test]
    fn test_set_curve_clears() {
        let mut panel = Panel::new("A").with_curve(CurveKind::Bottom, Curve::from_xy(&[(0.0, 0.0)]));
        panel.set_curve(CurveKind::Bottom, None);
        assert!(panel.curve(CurveKind::Bottom).is_none());
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let json = r#"[
            {"id": "B", "waist": [[0.0, 10.0], [5.0, 10.0]]},
            {"id": "A", "top": [[0.0, 0.0], [5.0, 0.0]]}
        ]"#;
        let panels = panels_from_json(json).unwrap();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].id.as_str(), "B");
        assert_eq!(panels[0].waist_y(), Some(10.0));
        assert!(panels[1].waist.is_none());

        let back = panels_from_json(&panels_to_json(&panels).unwrap()).unwrap();
        assert_eq!(back, panels);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[{"id": "A"}, {"id": "A"}]"#;
        assert!(matches!(
            panels_from_json(json),
            Err(PatternError::DuplicateId(id)) if id == "A"
        ));
    }

    #[test]
    fn test_curve_kind_names_unique() {
        let names: std::collections::HashSet<_> = CurveKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), CurveKind::ALL.len());
    }
}
