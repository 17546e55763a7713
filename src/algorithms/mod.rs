//! Algorithm-to-steps transducers.
//!
//! Every transducer takes a [`Snapshot`] of the graph when called, runs to completion and
//! returns the whole step list. The last step is always [`crate::StepKind::Final`]. A missing
//! or unknown start node fails the run before any step is produced.

mod bellman_ford;
mod dijkstra;
mod kruskal;
mod prim;

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    AlgorithmError, GraphRead, NodeId, SettingsAlgorithm, Snapshot, Step, UnknownAlgorithm,
};

pub use self::bellman_ford::bellman_ford;
pub use self::dijkstra::{dijkstra, dijkstra_with};
pub use self::kruskal::kruskal;
pub use self::prim::prim;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    BellmanFord,
    Prim,
    Kruskal,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::BellmanFord,
        Algorithm::Prim,
        Algorithm::Kruskal,
    ];

    pub fn requires_start_node(self) -> bool {
        !matches!(self, Algorithm::Kruskal)
    }

    /// Shortest path algorithms work on directed edges, spanning tree algorithms on undirected.
    pub fn prefers_directed(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::BellmanFord)
    }

    /// Selector value, also accepted by [`FromStr`].
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::BellmanFord => "bellmanFord",
            Algorithm::Prim => "prim",
            Algorithm::Kruskal => "kruskal",
        }
    }

    /// Runs the transducer with default settings. `start` is ignored by Kruskal.
    ///
    /// # Errors
    ///
    /// Fails when the algorithm needs a start node and `start` is None or not in `graph`.
    pub fn run<G: GraphRead>(
        self,
        graph: &G,
        start: Option<NodeId>,
    ) -> Result<Vec<Step>, AlgorithmError> {
        self.run_with(graph, start, &SettingsAlgorithm::default())
    }

    /// # Errors
    ///
    /// See [`Algorithm::run`]. Dijkstra additionally fails on negative weights when
    /// `settings` asks for it.
    pub fn run_with<G: GraphRead>(
        self,
        graph: &G,
        start: Option<NodeId>,
        settings: &SettingsAlgorithm,
    ) -> Result<Vec<Step>, AlgorithmError> {
        match self {
            Algorithm::Dijkstra => dijkstra_with(graph, start, settings),
            Algorithm::BellmanFord => bellman_ford(graph, start),
            Algorithm::Prim => prim(graph, start),
            Algorithm::Kruskal => kruskal(graph),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Dijkstra => "Dijkstra's algorithm",
            Algorithm::BellmanFord => "Bellman-Ford algorithm",
            Algorithm::Prim => "Prim's algorithm",
            Algorithm::Kruskal => "Kruskal's algorithm",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "bellmanford" | "bellman-ford" | "bellman_ford" => Ok(Algorithm::BellmanFord),
            "prim" => Ok(Algorithm::Prim),
            "kruskal" => Ok(Algorithm::Kruskal),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Position of the start node inside `snapshot`.
fn resolve_start(
    snapshot: &Snapshot,
    start: Option<NodeId>,
    algorithm: Algorithm,
) -> Result<usize, AlgorithmError> {
    let id = start.ok_or(AlgorithmError::MissingStartNode(algorithm))?;
    snapshot
        .position(id)
        .ok_or(AlgorithmError::UnknownStartNode(algorithm, id))
}

/// Marks edges lying on predecessor chains from every node accepted by `include` back to
/// `start`. Chains are walked at most once around the graph so a corrupt chain cannot loop.
fn shortest_path_edges(
    snapshot: &Snapshot,
    start: usize,
    pred: &[Option<usize>],
    include: impl Fn(usize) -> bool,
) -> Vec<bool> {
    let mut on_path = vec![false; snapshot.edge_count()];

    for node in 0..pred.len() {
        if node == start || pred[node].is_none() || !include(node) {
            continue;
        }

        let mut current = node;
        for _ in 0..pred.len() {
            if current == start {
                break;
            }
            let Some(prev) = pred[current] else {
                break;
            };
            if let Some(e) = snapshot.connecting(prev, current) {
                on_path[e] = true;
            }
            current = prev;
        }
    }

    on_path
}

/// Trace table headers of the distance based algorithms: first column then node names.
fn distance_headers(snapshot: &Snapshot, first: &str) -> Vec<String> {
    std::iter::once(first.to_string())
        .chain(snapshot.nodes().map(|n| n.name().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use egui::Pos2;

    use super::*;
    use crate::Graph;

    #[test]
    fn parse_selectors() {
        for a in Algorithm::ALL {
            assert_eq!(a.key().parse::<Algorithm>(), Ok(a));
        }
        assert_eq!("Bellman-Ford".parse::<Algorithm>(), Ok(Algorithm::BellmanFord));
        assert!("floyd".parse::<Algorithm>().is_err());
    }

    #[test]
    fn only_kruskal_runs_without_start() {
        let mut g = Graph::new();
        g.add_node(Pos2::ZERO);

        for a in Algorithm::ALL {
            let res = a.run(&g, None);
            assert_eq!(res.is_ok(), !a.requires_start_node(), "{a}");
        }
    }

    #[test]
    fn unknown_start_is_reported() {
        let g = Graph::new();
        let err = Algorithm::Prim.run(&g, Some(NodeId(5))).unwrap_err();
        assert_eq!(err, AlgorithmError::UnknownStartNode(Algorithm::Prim, NodeId(5)));
        assert!(!err.to_string().is_empty());

        let err = Algorithm::Dijkstra.run(&g, None).unwrap_err();
        assert_eq!(err.to_string(), "Start node is required for Dijkstra's algorithm.");
    }

    #[test]
    fn path_edges_follow_predecessors() {
        let mut g = Graph::new();
        let a = g.add_node(Pos2::ZERO);
        let b = g.add_node(Pos2::ZERO);
        let c = g.add_node(Pos2::ZERO);
        g.add_edge_directed(a, b, 1., true).unwrap();
        g.add_edge_directed(a, c, 1., true).unwrap();
        g.add_edge_directed(b, c, 1., true).unwrap();
        let s = Snapshot::capture(&g);

        let marked = shortest_path_edges(&s, 0, &[None, Some(0), Some(1)], |_| true);
        assert_eq!(marked, vec![true, false, true]);

        // a predecessor loop that never reaches start terminates
        let marked = shortest_path_edges(&s, 0, &[None, Some(2), Some(1)], |_| true);
        assert_eq!(marked, vec![false, false, true]);
    }
}
