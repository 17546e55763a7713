use log::{debug, warn};

use crate::{
    distance_cell, Algorithm, AlgorithmError, Distance, GraphRead, NegativeWeights, Node, NodeId,
    SettingsAlgorithm, Snapshot, Step, StepColor, StepKind, TraceTable,
};

use super::{distance_headers, resolve_start, shortest_path_edges};
use crate::step::StepLog;

/// Dijkstra with default settings.
///
/// # Errors
///
/// Fails when `start` is None or not part of `graph`.
pub fn dijkstra<G: GraphRead>(
    graph: &G,
    start: Option<NodeId>,
) -> Result<Vec<Step>, AlgorithmError> {
    dijkstra_with(graph, start, &SettingsAlgorithm::default())
}

/// Single-source shortest paths visiting the closest unvisited node first.
///
/// Ties between equally close nodes go to the earlier node. The trace gets one row per
/// visited node with the visiting sequence from the start node and every node's `d(pred)`,
/// visited nodes as `x`.
///
/// # Errors
///
/// Fails when `start` is None or unknown, or when `settings` rejects negative weights and the
/// graph has one.
pub fn dijkstra_with<G: GraphRead>(
    graph: &G,
    start: Option<NodeId>,
    settings: &SettingsAlgorithm,
) -> Result<Vec<Step>, AlgorithmError> {
    let s = Snapshot::capture(graph);
    let start = resolve_start(&s, start, Algorithm::Dijkstra)?;
    check_weights(&s, settings.negative_weights)?;

    let n = s.node_count();
    debug!(
        "dijkstra: {n} nodes, {} edges, start {}",
        s.edge_count(),
        s.name(start)
    );

    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut visited_count = 0;
    let mut sequence = vec![s.name(start).to_string()];
    dist[start] = 0.;

    let mut log = StepLog::new(TraceTable::new(distance_headers(&s, "Sequence")));

    log.record(
        Step::new(
            StepKind::NodeHighlight,
            format!("Starting Dijkstra's algorithm from node {}.", s.name(start)),
        )
        .on_node(s.node_at(start).id())
        .with_color(Some(StepColor::Accent))
        .with_nodes(paint_nodes(&s, &dist, &visited, Some(start)))
        .with_edges(s.plain_edges()),
    );

    while visited_count < n {
        let closest = (0..n)
            .filter(|v| !visited[*v])
            .fold(None, |best: Option<usize>, v| match best {
                Some(b) if dist[b] <= dist[v] => Some(b),
                _ => Some(v),
            });

        let Some(current) = closest.filter(|v| dist[*v].is_finite()) else {
            log.record(
                Step::new(StepKind::TextUpdate, "No more nodes can be reached.")
                    .with_nodes(paint_nodes(&s, &dist, &visited, None))
                    .with_edges(tree_edges(&s, &pred, &visited)),
            );
            break;
        };

        visited[current] = true;
        visited_count += 1;
        if current != start {
            sequence.push(s.name(current).to_string());
        }
        log.row(trace_row(&s, &sequence, &dist, &pred, &visited));

        log.record(
            Step::new(
                StepKind::NodeHighlight,
                format!(
                    "Visiting node {} with distance {}.",
                    s.name(current),
                    Distance::from(dist[current])
                ),
            )
            .on_node(s.node_at(current).id())
            .with_color(Some(StepColor::Accent))
            .with_nodes(paint_nodes(&s, &dist, &visited, None))
            .with_edges(s.edges_colored(|e| {
                let reached_by = pred[current].is_some_and(|p| {
                    s.endpoints(e).is_some_and(|(from, to)| {
                        (from == p && to == current)
                            || (!s.edge_at(e).directed() && from == current && to == p)
                    })
                });
                reached_by.then_some(StepColor::Accent)
            })),
        );

        for neighbor in s.neighbors(s.node_at(current).id()) {
            let (Some(next), Some(edge)) = (s.position(neighbor.node), s.edge_position(neighbor.edge))
            else {
                continue;
            };
            if visited[next] {
                continue;
            }

            let considered = tree_edges_with(&s, &pred, &visited, edge, StepColor::Secondary);
            log.record(
                Step::new(
                    StepKind::EdgeHighlight,
                    format!(
                        "Considering edge from {} to {} with weight {}.",
                        s.name(current),
                        s.name(next),
                        neighbor.weight
                    ),
                )
                .on_edge(neighbor.edge)
                .with_color(Some(StepColor::Secondary))
                .with_nodes(paint_nodes(&s, &dist, &visited, None))
                .with_edges(considered),
            );

            let candidate = dist[current] + neighbor.weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                pred[next] = Some(current);

                let mut nodes = paint_nodes(&s, &dist, &visited, None);
                nodes[next].set_color(Some(StepColor::Primary));
                log.record(
                    Step::new(
                        StepKind::NodeUpdate,
                        format!(
                            "Updated distance to node {}: {} via {}.",
                            s.name(next),
                            Distance::from(candidate),
                            s.name(current)
                        ),
                    )
                    .on_node(neighbor.node)
                    .with_color(Some(StepColor::Primary))
                    .with_nodes(nodes)
                    .with_edges(tree_edges_with(&s, &pred, &visited, edge, StepColor::Primary)),
                );
            } else {
                log.record(
                    Step::new(
                        StepKind::TextUpdate,
                        format!(
                            "Current path to {} (distance {}) is better than the new path via {} (distance {}).",
                            s.name(next),
                            Distance::from(dist[next]),
                            s.name(current),
                            Distance::from(candidate)
                        ),
                    )
                    .with_nodes(paint_nodes(&s, &dist, &visited, None))
                    .with_edges(tree_edges(&s, &pred, &visited)),
                );
            }
        }
    }

    let on_path = shortest_path_edges(&s, start, &pred, |_| true);
    log.record(
        Step::new(
            StepKind::Final,
            format!(
                "Dijkstra's algorithm completed. Shortest paths from {} to all reachable nodes have been found.",
                s.name(start)
            ),
        )
        .with_nodes(paint_nodes(&s, &dist, &visited, None))
        .with_edges(s.edges_colored(|e| on_path[e].then_some(StepColor::Accent))),
    );

    debug!("dijkstra: {} steps", log.len());
    Ok(log.finish())
}

fn check_weights(s: &Snapshot, policy: NegativeWeights) -> Result<(), AlgorithmError> {
    let Some((e, from, to)) = s
        .resolved_edges()
        .find(|(e, _, _)| s.edge_at(*e).weight() < 0.)
    else {
        return Ok(());
    };

    let edge = format!("{}-{}", s.name(from), s.name(to));
    let weight = s.edge_at(e).weight();
    match policy {
        NegativeWeights::Allow => {
            warn!("dijkstra: edge {edge} has negative weight {weight}, distances may be wrong");
            Ok(())
        }
        NegativeWeights::Reject => Err(AlgorithmError::NegativeWeight {
            algorithm: Algorithm::Dijkstra,
            edge,
            weight,
        }),
    }
}

/// Every node labelled with its distance, visited nodes and `focus` in accent.
fn paint_nodes(s: &Snapshot, dist: &[f64], visited: &[bool], focus: Option<usize>) -> Vec<Node> {
    s.nodes_with(|i, n| {
        n.set_label(Some(dist[i].into()));
        if visited[i] || focus == Some(i) {
            n.set_color(Some(StepColor::Accent));
        }
    })
}

/// True for edges through which a visited node got its final distance.
fn is_tree_edge(s: &Snapshot, pred: &[Option<usize>], visited: &[bool], e: usize) -> bool {
    let Some((from, to)) = s.endpoints(e) else {
        return false;
    };
    (visited[to] && pred[to] == Some(from))
        || (!s.edge_at(e).directed() && visited[from] && pred[from] == Some(to))
}

fn tree_edges(s: &Snapshot, pred: &[Option<usize>], visited: &[bool]) -> Vec<crate::Edge> {
    s.edges_colored(|e| is_tree_edge(s, pred, visited, e).then_some(StepColor::Accent))
}

/// Tree edges in accent with `focus` painted over in `color`.
fn tree_edges_with(
    s: &Snapshot,
    pred: &[Option<usize>],
    visited: &[bool],
    focus: usize,
    color: StepColor,
) -> Vec<crate::Edge> {
    s.edges_colored(|e| {
        if e == focus {
            Some(color)
        } else {
            is_tree_edge(s, pred, visited, e).then_some(StepColor::Accent)
        }
    })
}

fn trace_row(
    s: &Snapshot,
    sequence: &[String],
    dist: &[f64],
    pred: &[Option<usize>],
    visited: &[bool],
) -> Vec<String> {
    let mut row = vec![sequence.join(", ")];
    row.extend((0..dist.len()).map(|v| {
        if visited[v] {
            "x".to_string()
        } else {
            distance_cell(dist[v], pred[v].map(|p| s.name(p)))
        }
    }));
    row
}
