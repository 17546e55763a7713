use std::collections::HashMap;

use egui::Pos2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{DocumentError, Graph, GraphRead, NodeId};

/// Saved graph design, the JSON written by "save" and read by "load".
///
/// Ids are opaque strings. Only the structure is kept, colors and labels are not saved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeDocument>,
    pub edges: Vec<EdgeDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDocument {
    #[serde(default)]
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Absent means "use the graph's current convention".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_directed: Option<bool>,
}

fn default_weight() -> f64 {
    1.
}

impl Graph {
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self
                .nodes()
                .map(|n| NodeDocument {
                    id: n.id().to_string(),
                    x: n.location().x,
                    y: n.location().y,
                    name: n.name().to_string(),
                })
                .collect(),
            edges: self
                .edges()
                .map(|e| EdgeDocument {
                    id: e.id().to_string(),
                    from: e.from().to_string(),
                    to: e.to().to_string(),
                    weight: e.weight(),
                    is_directed: Some(e.directed()),
                })
                .collect(),
        }
    }

    /// Builds a graph from `doc` with undirected edges wherever `isDirected` is absent.
    ///
    /// # Errors
    ///
    /// See [`Graph::load_document`].
    pub fn from_document(doc: &GraphDocument) -> Result<Self, DocumentError> {
        let mut g = Self::new();
        g.load_document(doc)?;
        Ok(g)
    }

    /// Replaces the content of the graph with `doc`, keeping the directedness context.
    ///
    /// Fresh ids are allocated. Edges duplicating an earlier edge are dropped. On error the
    /// graph is left untouched.
    ///
    /// # Errors
    ///
    /// Fails on a repeated node id or an edge naming a node that is not in `doc`.
    pub fn load_document(&mut self, doc: &GraphDocument) -> Result<(), DocumentError> {
        let mut g = Self::new();
        g.set_directed_default(self.directed_default());

        let mut ids: HashMap<&str, NodeId> = HashMap::with_capacity(doc.nodes.len());
        for n in &doc.nodes {
            if ids.contains_key(n.id.as_str()) {
                return Err(DocumentError::DuplicateNode(n.id.clone()));
            }
            let id = g.add_node_with_name(Pos2::new(n.x, n.y), n.name.clone());
            ids.insert(n.id.as_str(), id);
        }

        for e in &doc.edges {
            let endpoint = |node: &str| {
                ids.get(node)
                    .copied()
                    .ok_or_else(|| DocumentError::UnknownNode {
                        edge: e.id.clone(),
                        node: node.to_string(),
                    })
            };
            let (from, to) = (endpoint(&e.from)?, endpoint(&e.to)?);
            let directed = e.is_directed.unwrap_or(g.directed_default());

            if g.add_edge_directed(from, to, e.weight, directed).is_none() {
                warn!("document: dropping duplicate edge {} ({} -> {})", e.id, e.from, e.to);
            }
        }

        debug!(
            "document: loaded {} nodes, {} edges",
            g.node_count(),
            g.edge_count()
        );
        *self = g;
        Ok(())
    }

    /// Pretty printed JSON of [`Graph::to_document`].
    ///
    /// # Errors
    ///
    /// Fails only if serialization itself fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// # Errors
    ///
    /// Fails on malformed JSON or an inconsistent document, see [`Graph::load_document`].
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc = serde_json::from_str::<GraphDocument>(json)?;
        Self::from_document(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_get_defaults() {
        let json = r#"{
            "nodes": [
                {"id": "a", "x": 1.0, "y": 2.0, "name": "N4"},
                {"id": "b", "x": 3.0, "y": 4.0, "name": "B"}
            ],
            "edges": [{"from": "a", "to": "b"}]
        }"#;

        let mut g = Graph::from_json(json).unwrap();
        let e = g.edges().next().unwrap();
        assert_eq!(e.weight(), 1.);
        assert!(!e.directed());

        // counter moved past the imported N4
        let n = g.add_node(Pos2::ZERO);
        assert_eq!(g.node(n).unwrap().name(), "N5");
    }

    #[test]
    fn absent_direction_follows_context() {
        let doc = GraphDocument {
            nodes: vec![
                NodeDocument {
                    id: "1".into(),
                    x: 0.,
                    y: 0.,
                    name: "A".into(),
                },
                NodeDocument {
                    id: "2".into(),
                    x: 0.,
                    y: 0.,
                    name: "B".into(),
                },
            ],
            edges: vec![EdgeDocument {
                id: "e".into(),
                from: "1".into(),
                to: "2".into(),
                weight: 2.,
                is_directed: None,
            }],
        };

        let mut g = Graph::new();
        g.set_directed_default(true);
        g.load_document(&doc).unwrap();
        assert!(g.edges().next().unwrap().directed());
    }

    #[test]
    fn broken_documents_are_rejected() {
        let dangling = r#"{"nodes": [{"id": "a", "x": 0, "y": 0, "name": "A"}],
                           "edges": [{"id": "e1", "from": "a", "to": "zz", "weight": 1}]}"#;
        match Graph::from_json(dangling) {
            Err(DocumentError::UnknownNode { edge, node }) => {
                assert_eq!(edge, "e1");
                assert_eq!(node, "zz");
            }
            other => panic!("unexpected {other:?}"),
        }

        let twice = r#"{"nodes": [{"id": "a", "x": 0, "y": 0, "name": "A"},
                                  {"id": "a", "x": 0, "y": 0, "name": "B"}],
                        "edges": []}"#;
        assert!(matches!(
            Graph::from_json(twice),
            Err(DocumentError::DuplicateNode(id)) if id == "a"
        ));

        assert!(matches!(
            Graph::from_json("{\"nodes\": 3}"),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn failed_load_keeps_graph() {
        let mut g = Graph::new();
        g.add_node(Pos2::ZERO);
        let doc = GraphDocument {
            nodes: Vec::new(),
            edges: vec![EdgeDocument {
                id: "e".into(),
                from: "x".into(),
                to: "y".into(),
                weight: 1.,
                is_directed: Some(true),
            }],
        };
        assert!(g.load_document(&doc).is_err());
        assert_eq!(g.node_count(), 1);
    }
}
