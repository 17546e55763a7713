mod algorithms;
mod document;
mod elements;
mod error;
mod graph;
mod helpers;
mod playback;
mod settings;
mod snapshot;
mod step;
mod trace;

pub use self::algorithms::{bellman_ford, dijkstra, dijkstra_with, kruskal, prim, Algorithm};
pub use self::document::{EdgeDocument, GraphDocument, NodeDocument};
pub use self::elements::{Distance, Edge, EdgeId, Node, NodeId, StepColor};
pub use self::error::{AlgorithmError, DocumentError, UnknownAlgorithm};
pub use self::graph::{Graph, GraphRead, Neighbor};
pub use self::helpers::{default_node_transform, to_graph, to_graph_custom};
pub use self::playback::Playback;
pub use self::settings::{NegativeWeights, SettingsAlgorithm, SettingsPlayback};
pub use self::snapshot::Snapshot;
pub use self::step::{ElementId, Step, StepKind};
pub use self::trace::{distance_cell, edge_cell, TraceTable};
