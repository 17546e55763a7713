use std::collections::HashMap;

use crate::{Edge, EdgeId, GraphRead, Node, NodeId, StepColor};

/// Immutable working copy of a graph taken when a transducer starts.
///
/// Nodes and edges are addressed by position (insertion order) which is what the
/// transducers index their distance and visited tables with.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_pos: HashMap<NodeId, usize>,
    edge_pos: HashMap<EdgeId, usize>,
    /// Endpoint positions, None when an endpoint is missing from the graph.
    ends: Vec<Option<(usize, usize)>>,
}

impl Snapshot {
    /// Copies nodes and edges of `graph` dropping their colors and labels.
    pub fn capture<G: GraphRead>(graph: &G) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| {
                let mut n = n.clone();
                n.clear_visual_state();
                n
            })
            .collect::<Vec<_>>();
        let edges = graph
            .edges()
            .map(|e| {
                let mut e = e.clone();
                e.set_color(None);
                e
            })
            .collect::<Vec<_>>();

        let node_pos = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id(), i))
            .collect::<HashMap<_, _>>();
        let edge_pos = edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id(), i))
            .collect::<HashMap<_, _>>();
        let ends = edges
            .iter()
            .map(|e| Some((*node_pos.get(&e.from())?, *node_pos.get(&e.to())?)))
            .collect();

        Self {
            nodes,
            edges,
            node_pos,
            edge_pos,
            ends,
        }
    }

    pub fn node_at(&self, i: usize) -> &Node {
        &self.nodes[i]
    }

    pub fn edge_at(&self, i: usize) -> &Edge {
        &self.edges[i]
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.node_pos.get(&id).copied()
    }

    pub fn edge_position(&self, id: EdgeId) -> Option<usize> {
        self.edge_pos.get(&id).copied()
    }

    /// Positions of `from` and `to` of the edge at position `i`.
    pub fn endpoints(&self, i: usize) -> Option<(usize, usize)> {
        self.ends.get(i).copied().flatten()
    }

    pub fn name(&self, i: usize) -> &str {
        self.nodes[i].name()
    }

    /// Edge positions together with resolved endpoints, dangling edges skipped.
    pub fn resolved_edges(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.ends
            .iter()
            .enumerate()
            .filter_map(|(i, ends)| ends.map(|(from, to)| (i, from, to)))
    }

    /// First edge in order walkable from position `start` to position `end`.
    pub fn connecting(&self, start: usize, end: usize) -> Option<usize> {
        let (start, end) = (self.nodes[start].id(), self.nodes[end].id());
        self.edges.iter().position(|e| e.connects(start, end))
    }

    /// Deep copy of the nodes painted by `paint`.
    pub fn nodes_with(&self, mut paint: impl FnMut(usize, &mut Node)) -> Vec<Node> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let mut n = n.clone();
                paint(i, &mut n);
                n
            })
            .collect()
    }

    /// Deep copy of the edges painted by `paint`.
    pub fn edges_with(&self, mut paint: impl FnMut(usize, &mut Edge)) -> Vec<Edge> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let mut e = e.clone();
                paint(i, &mut e);
                e
            })
            .collect()
    }

    /// Deep copy of the edges with a single color rule.
    pub fn edges_colored(&self, mut color: impl FnMut(usize) -> Option<StepColor>) -> Vec<Edge> {
        self.edges_with(|i, e| e.set_color(color(i)))
    }

    pub fn plain_nodes(&self) -> Vec<Node> {
        self.nodes.clone()
    }

    pub fn plain_edges(&self) -> Vec<Edge> {
        self.edges.clone()
    }
}

impl GraphRead for Snapshot {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(self.position(id)?)
    }

    fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(self.edge_position(id)?)
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
