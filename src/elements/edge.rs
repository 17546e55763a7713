use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::{NodeId, StepColor};

/// Opaque edge identifier. Allocated by [`crate::Graph`] and never reused while the graph lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Stores properties of an edge.
///
/// Directedness is a concrete boolean fixed when the edge is created, see
/// [`crate::Graph::apply_algorithm_context`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    /// Signed weights are allowed.
    weight: f64,
    directed: bool,
    color: Option<StepColor>,
}

impl Edge {
    pub fn new(id: EdgeId, from: NodeId, to: NodeId, weight: f64, directed: bool) -> Self {
        Self {
            id,
            from,
            to,
            weight,
            directed,
            color: None,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// Swaps `from` and `to`.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// True if the edge can be walked from `start` to `end`.
    pub fn connects(&self, start: NodeId, end: NodeId) -> bool {
        (self.from == start && self.to == end)
            || (!self.directed && self.from == end && self.to == start)
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connects_respects_direction() {
        let directed = Edge::new(EdgeId(0), NodeId(0), NodeId(1), 1., true);
        assert!(directed.connects(NodeId(0), NodeId(1)));
        assert!(!directed.connects(NodeId(1), NodeId(0)));

        let undirected = Edge::new(EdgeId(1), NodeId(0), NodeId(1), 1., false);
        assert!(undirected.connects(NodeId(0), NodeId(1)));
        assert!(undirected.connects(NodeId(1), NodeId(0)));
    }

    #[test]
    fn flip_swaps_ends() {
        let mut e = Edge::new(EdgeId(0), NodeId(4), NodeId(7), -2., true);
        e.flip();
        assert_eq!(e.from(), NodeId(7));
        assert_eq!(e.to(), NodeId(4));
        assert!(e.connects(NodeId(7), NodeId(4)));
    }
}
