use std::collections::HashMap;

use egui::Pos2;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use serde::{Deserialize, Serialize};

use crate::{Algorithm, Edge, EdgeId, Node, NodeId};

/// One entry of [`GraphRead::neighbors`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub node: NodeId,
    pub edge: EdgeId,
    pub weight: f64,
}

/// Read access to a graph, the only thing the transducers need from a graph store.
///
/// `nodes` and `edges` must iterate in insertion order and that order must be the same on every
/// call: it decides tie-breaking and the layout of the trace tables.
pub trait GraphRead {
    fn node(&self, id: NodeId) -> Option<&Node>;

    fn edge(&self, id: EdgeId) -> Option<&Edge>;

    fn nodes(&self) -> impl Iterator<Item = &Node>;

    fn edges(&self) -> impl Iterator<Item = &Edge>;

    /// Edges walkable from `id` in edge order. An edge is always walkable `from -> to` and
    /// `to -> from` only when it is undirected.
    fn neighbors(&self, id: NodeId) -> Vec<Neighbor> {
        self.edges()
            .filter_map(|e| {
                let node = if e.from() == id {
                    e.to()
                } else if e.to() == id && !e.directed() {
                    e.from()
                } else {
                    return None;
                };
                Some(Neighbor {
                    node,
                    edge: e.id(),
                    weight: e.weight(),
                })
            })
            .collect()
    }

    fn node_count(&self) -> usize {
        self.nodes().count()
    }

    fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

/// Wrapper around [`petgraph::stable_graph::StableGraph`] holding the user-drawn graph.
///
/// Ids are allocated from counters and never reused, unlike petgraph indices which are
/// recycled after removals. Insertion order is tracked separately for the same reason.
#[derive(Debug, Clone)]
pub struct Graph {
    g: StableGraph<Node, Edge>,

    node_order: Vec<NodeId>,
    edge_order: Vec<EdgeId>,
    node_idx: HashMap<NodeId, NodeIndex>,
    edge_idx: HashMap<EdgeId, EdgeIndex>,

    next_node_id: u32,
    next_edge_id: u32,

    /// Number used for the next auto-generated `N<k>` name.
    name_counter: usize,

    /// Directedness given to edges created without an explicit one.
    directed_default: bool,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            g: StableGraph::default(),
            node_order: Vec::default(),
            edge_order: Vec::default(),
            node_idx: HashMap::default(),
            edge_idx: HashMap::default(),
            next_node_id: 0,
            next_edge_id: 0,
            name_counter: 1,
            directed_default: false,
        }
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn g(&self) -> &StableGraph<Node, Edge> {
        &self.g
    }

    /// Adds node named `N<k>` with the next free `k`.
    pub fn add_node(&mut self, location: Pos2) -> NodeId {
        let name = format!("N{}", self.name_counter);
        self.name_counter += 1;
        self.add_node_with_name(location, name)
    }

    /// Adds node with custom name. Names are display labels and may repeat.
    pub fn add_node_with_name(&mut self, location: Pos2, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;

        let idx = self.g.add_node(Node::new(id, location, name));
        self.node_idx.insert(id, idx);
        self.node_order.push(id);
        self.bump_name_counter_past(id);

        id
    }

    /// Adds edge using the graph directedness context.
    ///
    /// Returns None if an endpoint is unknown or the edge duplicates an existing one.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Option<EdgeId> {
        self.add_edge_directed(from, to, weight, self.directed_default)
    }

    /// Adds edge with explicit directedness.
    ///
    /// An existing `from -> to` edge is a duplicate, and so is an existing `to -> from` edge
    /// when the new edge is undirected.
    pub fn add_edge_directed(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
        directed: bool,
    ) -> Option<EdgeId> {
        let start = *self.node_idx.get(&from)?;
        let end = *self.node_idx.get(&to)?;

        let duplicate = self.edges().any(|e| {
            (e.from() == from && e.to() == to) || (!directed && e.from() == to && e.to() == from)
        });
        if duplicate {
            return None;
        }

        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;

        let idx = self
            .g
            .add_edge(start, end, Edge::new(id, from, to, weight, directed));
        self.edge_idx.insert(id, idx);
        self.edge_order.push(id);

        Some(id)
    }

    /// Removes node and every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let idx = *self.node_idx.get(&id)?;

        let touching = self
            .edges()
            .filter(|e| e.from() == id || e.to() == id)
            .map(Edge::id)
            .collect::<Vec<_>>();
        for e in touching {
            self.remove_edge(e);
        }

        self.node_idx.remove(&id);
        self.node_order.retain(|n| *n != id);
        self.g.remove_node(idx)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let idx = self.edge_idx.remove(&id)?;
        self.edge_order.retain(|e| *e != id);
        self.g.remove_edge(idx)
    }

    pub fn set_node_name(&mut self, id: NodeId, name: impl Into<String>) -> bool {
        match self.node_mut(id) {
            Some(n) => {
                n.set_name(name);
                true
            }
            None => false,
        }
    }

    pub fn set_node_location(&mut self, id: NodeId, location: Pos2) -> bool {
        match self.node_mut(id) {
            Some(n) => {
                n.set_location(location);
                true
            }
            None => false,
        }
    }

    pub fn set_edge_weight(&mut self, id: EdgeId, weight: f64) -> bool {
        match self.edge_mut(id) {
            Some(e) => {
                e.set_weight(weight);
                true
            }
            None => false,
        }
    }

    /// Reverses a directed edge. Undirected edges are left alone and false is returned.
    pub fn flip_edge(&mut self, id: EdgeId) -> bool {
        let Some(idx) = self.edge_idx.get(&id).copied() else {
            return false;
        };
        if !self.g.edge_weight(idx).is_some_and(Edge::directed) {
            return false;
        }
        let Some(mut edge) = self.g.remove_edge(idx) else {
            return false;
        };
        edge.flip();

        let (Some(start), Some(end)) = (
            self.node_idx.get(&edge.from()).copied(),
            self.node_idx.get(&edge.to()).copied(),
        ) else {
            return false;
        };
        let new_idx = self.g.add_edge(start, end, edge);
        self.edge_idx.insert(id, new_idx);

        true
    }

    /// Makes edges match the convention of `algorithm`.
    ///
    /// Shortest path algorithms turn every edge directed. Spanning tree algorithms keep
    /// existing edges, and new edges become undirected.
    pub fn apply_algorithm_context(&mut self, algorithm: Algorithm) {
        self.directed_default = algorithm.prefers_directed();
        if !self.directed_default {
            return;
        }

        let undirected = self
            .edges()
            .filter(|e| !e.directed())
            .map(Edge::id)
            .collect::<Vec<_>>();
        for id in undirected {
            if let Some(e) = self.edge_mut(id) {
                e.set_directed(true);
            }
        }
    }

    pub fn directed_default(&self) -> bool {
        self.directed_default
    }

    pub fn set_directed_default(&mut self, directed: bool) {
        self.directed_default = directed;
    }

    /// Clears colors and labels of every element.
    pub fn reset_visual_state(&mut self) {
        self.g.node_weights_mut().for_each(Node::clear_visual_state);
        self.g.edge_weights_mut().for_each(|e| e.set_color(None));
    }

    /// Removes everything and restarts automatic naming at `N1`.
    pub fn clear(&mut self) {
        *self = Self {
            directed_default: self.directed_default,
            ..Self::default()
        };
    }

    /// Makes sure automatic names never collide with an existing `N<k>` name.
    pub(crate) fn bump_name_counter_past(&mut self, id: NodeId) {
        let Some(k) = self
            .node(id)
            .and_then(|n| n.name().strip_prefix('N'))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<usize>().ok())
        else {
            return;
        };
        if k >= self.name_counter {
            self.name_counter = k + 1;
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let idx = *self.node_idx.get(&id)?;
        self.g.node_weight_mut(idx)
    }

    fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        let idx = *self.edge_idx.get(&id)?;
        self.g.edge_weight_mut(idx)
    }
}

impl GraphRead for Graph {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.g.node_weight(*self.node_idx.get(&id)?)
    }

    fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.g.edge_weight(*self.edge_idx.get(&id)?)
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.node(*id))
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_order.iter().filter_map(|id| self.edge(*id))
    }

    fn node_count(&self) -> usize {
        self.g.node_count()
    }

    fn edge_count(&self) -> usize {
        self.g.edge_count()
    }
}
