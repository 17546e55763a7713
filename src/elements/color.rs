use egui::Color32;
use serde::{Deserialize, Serialize};

/// Semantic render hint attached to steps, nodes and edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepColor {
    /// Settled or confirmed.
    Accent,
    /// Under consideration.
    Secondary,
    /// Just updated.
    Primary,
    /// Part of a negative cycle or about to be removed.
    Destructive,
}

impl StepColor {
    pub const ALL: [StepColor; 4] = [
        StepColor::Accent,
        StepColor::Secondary,
        StepColor::Primary,
        StepColor::Destructive,
    ];

    /// Default palette for renderers.
    pub fn to_color32(self) -> Color32 {
        match self {
            StepColor::Accent => Color32::from_rgb(16, 185, 129),
            StepColor::Secondary => Color32::from_rgb(245, 158, 11),
            StepColor::Primary => Color32::from_rgb(59, 130, 246),
            StepColor::Destructive => Color32::from_rgb(239, 68, 68),
        }
    }
}
