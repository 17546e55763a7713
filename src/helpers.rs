use std::fmt::Display;

use egui::Pos2;
use log::warn;
use petgraph::{
    graph::IndexType,
    stable_graph::{NodeIndex, StableGraph},
    visit::{EdgeRef, IntoEdgeReferences, IntoNodeReferences, NodeIndexable},
    EdgeType,
};

use crate::{Graph, Node};

const BASE_RADIUS: f32 = 50.;
const RADIUS_PER_NODE: f32 = 5.;

/// Helper function which transforms user's `petgraph::StableGraph` into a [`Graph`] the
/// transducers can run on.
///
/// Node data becomes the node name, edge data the weight. Edges are directed if `Ty` is.
/// Nodes are placed on a circle around the origin in index order.
///
/// # Example
/// ```
/// use petgraph::stable_graph::StableGraph;
/// use algoviz::{to_graph, GraphRead};
///
/// let mut user_graph: StableGraph<&str, f64> = StableGraph::new();
/// let a = user_graph.add_node("A");
/// let b = user_graph.add_node("B");
/// user_graph.add_edge(a, b, 2.5);
///
/// let g = to_graph(&user_graph);
/// assert_eq!(g.node_count(), 2);
/// assert!(g.edges().next().unwrap().directed());
/// ```
pub fn to_graph<N, E, Ty, Ix>(g: &StableGraph<N, E, Ty, Ix>) -> Graph
where
    N: Display,
    E: Clone + Into<f64>,
    Ty: EdgeType,
    Ix: IndexType,
{
    to_graph_custom(g, |e| e.clone().into(), default_node_transform)
}

/// Same as [`to_graph`] with a custom weight extraction and node transform.
///
/// `node_transform` runs after the node is placed and may rename or move it.
pub fn to_graph_custom<N, E, Ty, Ix>(
    g: &StableGraph<N, E, Ty, Ix>,
    mut weight: impl FnMut(&E) -> f64,
    mut node_transform: impl FnMut(&N, &mut Node),
) -> Graph
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let mut res = Graph::new();
    res.set_directed_default(Ty::is_directed());

    let count = g.node_count();
    let mut ids = Vec::with_capacity(g.node_bound());
    ids.resize(g.node_bound(), None);

    for (i, (idx, data)) in g.node_references().enumerate() {
        let id = res.add_node_with_name(circle_location(i, count), String::new());
        if let Some(node) = res.node_mut(id) {
            node_transform(data, node);
        }
        res.bump_name_counter_past(id);
        ids[idx.index()] = Some(id);
    }

    let lookup = |idx: NodeIndex<Ix>| ids.get(idx.index()).copied().flatten();
    for e in g.edge_references() {
        let (Some(from), Some(to)) = (lookup(e.source()), lookup(e.target())) else {
            continue;
        };
        if res.add_edge(from, to, weight(e.weight())).is_none() {
            warn!(
                "to_graph: dropping parallel edge {} -> {}",
                e.source().index(),
                e.target().index()
            );
        }
    }

    res
}

/// Default node transform: the node is named after its data.
pub fn default_node_transform<N: Display>(data: &N, node: &mut Node) {
    node.set_name(data.to_string());
}

/// Position `i` of `count` on a circle starting at the top and going clockwise.
fn circle_location(i: usize, count: usize) -> Pos2 {
    let radius = BASE_RADIUS + count as f32 * RADIUS_PER_NODE;
    let angle = -std::f32::consts::PI / 2. + i as f32 * 2. * std::f32::consts::PI / count as f32;
    Pos2::new(radius * angle.cos(), radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use petgraph::{Directed, Undirected};

    use super::*;
    use crate::GraphRead;

    #[test]
    fn directedness_follows_edge_type() {
        let mut user: StableGraph<&str, f64, Directed> = StableGraph::default();
        let a = user.add_node("A");
        let b = user.add_node("B");
        user.add_edge(a, b, 1.);
        let g = to_graph(&user);
        assert!(g.edges().all(crate::Edge::directed));

        let mut user: StableGraph<&str, f64, Undirected> = StableGraph::default();
        let a = user.add_node("A");
        let b = user.add_node("B");
        user.add_edge(a, b, 1.);
        user.add_edge(b, a, 3.);
        let g = to_graph(&user);
        // reverse undirected edge is a duplicate
        assert_eq!(g.edge_count(), 1);
        assert!(!g.edges().next().unwrap().directed());
    }

    #[test]
    fn removed_user_nodes_are_skipped() {
        let mut user: StableGraph<u32, u32> = StableGraph::default();
        let a = user.add_node(1);
        let b = user.add_node(2);
        let c = user.add_node(3);
        user.add_edge(a, c, 7);
        user.remove_node(b);

        let g = to_graph_custom(&user, |w| f64::from(*w), |data, node| {
            node.set_name(format!("N{data}"));
        });
        let names = g.nodes().map(|n| n.name().to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["N1", "N3"]);
        assert_eq!(g.edges().next().unwrap().weight(), 7.);
    }

    #[test]
    fn nodes_sit_on_circle() {
        let p = circle_location(0, 4);
        assert!(p.x.abs() < 1e-3);
        assert!((p.y + 70.).abs() < 1e-3);
    }
}
