use log::trace;
use serde::{Deserialize, Serialize};

use crate::{Edge, EdgeId, Node, NodeId, StepColor, TraceTable};

/// Visual intent of a [`Step`]. Not a state machine: any order the algorithm implies is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    NodeHighlight,
    EdgeHighlight,
    NodeUpdate,
    TextUpdate,
    Final,
}

/// Element a step is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementId {
    Node(NodeId),
    Edge(EdgeId),
}

/// One visualization event.
///
/// A step is self-contained: it owns deep copies of every node, edge and trace row as they
/// render at that moment, so a player can jump to any index without replaying earlier steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    kind: StepKind,
    element: Option<ElementId>,
    color: Option<StepColor>,
    text: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    table: TraceTable,
}

impl Step {
    pub(crate) fn new(kind: StepKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            element: None,
            color: None,
            text: text.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            table: TraceTable::default(),
        }
    }

    pub(crate) fn on_node(mut self, id: NodeId) -> Self {
        self.element = Some(ElementId::Node(id));
        self
    }

    pub(crate) fn on_edge(mut self, id: EdgeId) -> Self {
        self.element = Some(ElementId::Edge(id));
        self
    }

    pub(crate) fn with_color(mut self, color: Option<StepColor>) -> Self {
        self.color = color;
        self
    }

    pub(crate) fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    pub(crate) fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = edges;
        self
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    pub fn color(&self) -> Option<StepColor> {
        self.color
    }

    /// Narration, refers to elements by name.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn table(&self) -> &TraceTable {
        &self.table
    }

    /// Node as rendered in this step.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Edge as rendered in this step.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id() == id)
    }

    pub fn is_final(&self) -> bool {
        self.kind == StepKind::Final
    }
}

/// Collects steps of one run, freezing the current trace table into every recorded step.
#[derive(Debug)]
pub(crate) struct StepLog {
    steps: Vec<Step>,
    table: TraceTable,
}

impl StepLog {
    pub fn new(table: TraceTable) -> Self {
        Self {
            steps: Vec::new(),
            table,
        }
    }

    pub fn record(&mut self, mut step: Step) {
        trace!("step {}: {:?} {}", self.steps.len(), step.kind, step.text);
        step.table = self.table.clone();
        self.steps.push(step);
    }

    pub fn row(&mut self, row: Vec<String>) {
        self.table.push_row(row);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn finish(self) -> Vec<Step> {
        self.steps
    }
}
