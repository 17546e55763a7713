use log::debug;

use crate::{
    edge_cell, Algorithm, AlgorithmError, Edge, GraphRead, Node, NodeId, Snapshot, Step,
    StepColor, StepKind, TraceTable,
};

use super::resolve_start;
use crate::step::StepLog;

/// Minimum spanning tree grown from `start`, always through the lightest edge leaving the
/// tree. Edge direction is ignored. Ties go to the earlier edge.
///
/// A disconnected graph ends with a partial tree covering the component of `start`.
///
/// # Errors
///
/// Fails when `start` is None or not part of `graph`.
pub fn prim<G: GraphRead>(graph: &G, start: Option<NodeId>) -> Result<Vec<Step>, AlgorithmError> {
    let s = Snapshot::capture(graph);
    let start = resolve_start(&s, start, Algorithm::Prim)?;

    let n = s.node_count();
    debug!(
        "prim: {n} nodes, {} edges, start {}",
        s.edge_count(),
        s.name(start)
    );

    let mut visited = vec![false; n];
    // joining order, for the trace
    let mut joined = vec![start];
    let mut in_tree = vec![false; s.edge_count()];
    let mut total = 0.;
    visited[start] = true;

    let mut log = StepLog::new(TraceTable::new([
        "Step",
        "Action",
        "Current MST Nodes",
        "Candidate Edge (u,v)=w",
        "Total MST Cost",
    ]));
    log.row(vec![
        "1".to_string(),
        format!("Start with node {}", s.name(start)),
        s.name(start).to_string(),
        "-".to_string(),
        "0".to_string(),
    ]);

    log.record(
        Step::new(
            StepKind::NodeHighlight,
            format!("Starting Prim's algorithm from node {}.", s.name(start)),
        )
        .on_node(s.node_at(start).id())
        .with_color(Some(StepColor::Accent))
        .with_nodes(paint_nodes(&s, &visited))
        .with_edges(s.plain_edges()),
    );

    let mut count = 2;
    while joined.len() < n {
        let Some((edge, inside, outside)) = lightest_crossing(&s, &visited) else {
            log.record(
                Step::new(
                    StepKind::TextUpdate,
                    "No more edges can be added. The graph might be disconnected.",
                )
                .with_nodes(paint_nodes(&s, &visited))
                .with_edges(tree_edges(&s, &in_tree, None)),
            );
            break;
        };

        let weight = s.edge_at(edge).weight();
        let edge_id = s.edge_at(edge).id();
        let (from_name, to_name) = (s.name(inside), s.name(outside));

        log.record(
            Step::new(
                StepKind::EdgeHighlight,
                format!("Considering edge from {from_name} to {to_name} with weight {weight}."),
            )
            .on_edge(edge_id)
            .with_color(Some(StepColor::Secondary))
            .with_nodes(paint_nodes(&s, &visited))
            .with_edges(tree_edges(&s, &in_tree, Some(edge))),
        );

        visited[outside] = true;
        joined.push(outside);
        in_tree[edge] = true;
        total += weight;

        let action = format!("Added edge {from_name}-{to_name} to MST. Node {to_name} joined MST.");
        log.row(vec![
            count.to_string(),
            action.clone(),
            joined
                .iter()
                .map(|v| s.name(*v))
                .collect::<Vec<_>>()
                .join(", "),
            edge_cell(from_name, to_name, weight),
            total.to_string(),
        ]);
        count += 1;

        log.record(
            Step::new(StepKind::EdgeHighlight, action)
                .on_edge(edge_id)
                .with_color(Some(StepColor::Accent))
                .with_nodes(paint_nodes(&s, &visited))
                .with_edges(tree_edges(&s, &in_tree, None)),
        );
    }

    log.record(
        Step::new(
            StepKind::Final,
            format!("Prim's algorithm completed. Total MST cost: {total}."),
        )
        .with_nodes(paint_nodes(&s, &visited))
        .with_edges(tree_edges(&s, &in_tree, None)),
    );

    debug!(
        "prim: {} steps, {} tree edges, cost {total}",
        log.len(),
        joined.len() - 1
    );
    Ok(log.finish())
}

/// Lightest edge with exactly one end in the tree as `(edge, inside, outside)`.
fn lightest_crossing(s: &Snapshot, visited: &[bool]) -> Option<(usize, usize, usize)> {
    let mut best: Option<(usize, usize, usize)> = None;
    for (e, from, to) in s.resolved_edges() {
        let crossing = match (visited[from], visited[to]) {
            (true, false) => (e, from, to),
            (false, true) => (e, to, from),
            _ => continue,
        };
        if best.is_none_or(|(b, _, _)| s.edge_at(e).weight() < s.edge_at(b).weight()) {
            best = Some(crossing);
        }
    }
    best
}

fn paint_nodes(s: &Snapshot, visited: &[bool]) -> Vec<Node> {
    s.nodes_with(|i, n| n.set_color(visited[i].then_some(StepColor::Accent)))
}

/// Tree edges in accent, `candidate` in secondary.
fn tree_edges(s: &Snapshot, in_tree: &[bool], candidate: Option<usize>) -> Vec<Edge> {
    s.edges_colored(|e| {
        if candidate == Some(e) {
            Some(StepColor::Secondary)
        } else {
            in_tree[e].then_some(StepColor::Accent)
        }
    })
}
