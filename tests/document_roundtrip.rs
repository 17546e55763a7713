use algoviz::{
    bellman_ford, Distance, Edge, Graph, GraphDocument, GraphRead, Node, NodeId, Step, StepColor,
};
use egui::Pos2;

fn sample() -> (Graph, Vec<NodeId>) {
    let mut g = Graph::new();
    let a = g.add_node(Pos2::new(10., 20.));
    let b = g.add_node(Pos2::new(30., 40.));
    let c = g.add_node_with_name(Pos2::new(50., 60.), "hub");
    g.add_edge_directed(a, b, 2.5, true).unwrap();
    g.add_edge_directed(b, c, -1., false).unwrap();
    (g, vec![a, b, c])
}

#[test]
fn test_serialize_deserialize_node() {
    let node = Node::new(NodeId(3), Pos2::new(1., 2.), "A")
        .with_color(StepColor::Accent)
        .with_label(Distance::NegativeInfinite);
    let json = serde_json::to_string(&node).expect("serialize node");
    let node2: Node = serde_json::from_str(&json).expect("deserialize node");

    assert_eq!(node2, node);
}

#[test]
fn test_serialize_deserialize_edge() {
    let edge = Edge::new(algoviz::EdgeId(1), NodeId(0), NodeId(1), 4., false)
        .with_color(StepColor::Destructive);
    let json = serde_json::to_string(&edge).expect("serialize edge");
    let edge2: Edge = serde_json::from_str(&json).expect("deserialize edge");

    assert_eq!(edge2, edge);
}

#[test]
fn test_graph_document_roundtrip() {
    let (g, _) = sample();
    let json = g.to_json().expect("serialize graph");
    let g2 = Graph::from_json(&json).expect("deserialize graph");

    assert_eq!(g2.node_count(), g.node_count());
    assert_eq!(g2.edge_count(), g.edge_count());
    for (n1, n2) in g.nodes().zip(g2.nodes()) {
        assert_eq!(n1.name(), n2.name());
        assert_eq!(n1.location(), n2.location());
    }
    for (e1, e2) in g.edges().zip(g2.edges()) {
        assert_eq!(e1.weight(), e2.weight());
        assert_eq!(e1.directed(), e2.directed());
    }

    // documents of equal graphs are equal, ids included since both were allocated from zero
    assert_eq!(g2.to_document(), g.to_document());
}

#[test]
fn test_document_uses_camel_case_field_names() {
    let (g, _) = sample();
    let value = serde_json::to_value(g.to_document()).expect("serialize document");

    let edge = &value["edges"][0];
    assert_eq!(edge["isDirected"], serde_json::Value::Bool(true));
    assert_eq!(edge["from"], serde_json::Value::String("n0".into()));
    assert_eq!(value["nodes"][2]["name"], serde_json::Value::String("hub".into()));

    let doc: GraphDocument = serde_json::from_value(value).expect("deserialize document");
    assert_eq!(doc.nodes.len(), 3);
}

#[test]
fn test_steps_survive_json() {
    let (g, ids) = sample();
    let steps = bellman_ford(&g, Some(ids[0])).expect("start node exists");
    let json = serde_json::to_string(&steps).expect("serialize steps");
    let steps2: Vec<Step> = serde_json::from_str(&json).expect("deserialize steps");

    assert_eq!(steps2, steps);
    assert!(json.contains("\"kind\":\"node-highlight\""));
}
