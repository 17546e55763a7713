use std::fmt::{self, Display};

use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::{Distance, StepColor};

/// Opaque node identifier. Allocated by [`crate::Graph`] and never reused while the graph lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Stores properties of a node.
///
/// `color` and `label` are transient render state: the authoritative graph keeps them empty
/// and every [`crate::Step`] carries its own painted copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,

    location: Pos2,

    name: String,

    /// If `color` is None default color is used.
    color: Option<StepColor>,

    /// Current distance or similar value shown next to the node.
    label: Option<Distance>,
}

impl Node {
    pub fn new(id: NodeId, location: Pos2, name: impl Into<String>) -> Self {
        Self {
            id,
            location,
            name: name.into(),
            color: None,
            label: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub fn set_location(&mut self, loc: Pos2) {
        self.location = loc;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn color(&self) -> Option<StepColor> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<StepColor>) {
        self.color = color;
    }

    pub fn with_color(mut self, color: StepColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn label(&self) -> Option<Distance> {
        self.label
    }

    pub fn set_label(&mut self, label: Option<Distance>) {
        self.label = label;
    }

    pub fn with_label(mut self, label: Distance) -> Self {
        self.label = Some(label);
        self
    }

    /// Drops color and label.
    pub fn clear_visual_state(&mut self) {
        self.color = None;
        self.label = None;
    }
}
