use std::collections::HashSet;

use log::debug;

use crate::{
    distance_cell, Algorithm, AlgorithmError, Distance, Edge, GraphRead, Node, NodeId, Snapshot,
    Step, StepColor, StepKind, TraceTable,
};

use super::{distance_headers, resolve_start, shortest_path_edges};
use crate::step::StepLog;

/// One relaxable direction of an edge.
#[derive(Clone, Copy, Debug)]
struct Arc {
    edge: usize,
    from: usize,
    to: usize,
}

/// Single-source shortest paths with negative weights and negative cycle detection.
///
/// Runs `|V| - 1` relaxation passes over every edge in graph order plus one detection pass.
/// A pass that relaxes nothing ends the run early. When the detection pass still relaxes an
/// edge, every node reachable from a negative cycle ends at `-∞`.
///
/// Undirected edges are relaxed in both directions.
///
/// # Errors
///
/// Fails when `start` is None or not part of `graph`.
pub fn bellman_ford<G: GraphRead>(
    graph: &G,
    start: Option<NodeId>,
) -> Result<Vec<Step>, AlgorithmError> {
    let s = Snapshot::capture(graph);
    let start = resolve_start(&s, start, Algorithm::BellmanFord)?;

    let n = s.node_count();
    debug!(
        "bellman-ford: {n} nodes, {} edges, start {}",
        s.edge_count(),
        s.name(start)
    );

    let arcs = arcs(&s);
    let passes = n - 1;

    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    dist[start] = 0.;

    let mut log = StepLog::new(TraceTable::new(distance_headers(&s, "Iteration")));

    log.record(
        Step::new(
            StepKind::NodeHighlight,
            format!(
                "Starting Bellman-Ford algorithm from node {}.",
                s.name(start)
            ),
        )
        .on_node(s.node_at(start).id())
        .with_color(Some(StepColor::Accent))
        .with_nodes(paint_nodes(&s, &dist, start, None))
        .with_edges(s.plain_edges()),
    );
    log.row(trace_row(&s, "0 (Initial)".to_string(), &dist, &pred));

    let mut negative_cycle = false;

    for i in 0..=passes {
        let detecting = i == passes;
        let text = if detecting {
            format!("Starting iteration {} (checking for negative cycles).", i + 1)
        } else {
            format!("Starting iteration {} of {passes}.", i + 1)
        };
        log.record(
            Step::new(StepKind::TextUpdate, text)
                .with_nodes(paint_nodes(&s, &dist, start, None))
                .with_edges(s.plain_edges()),
        );

        let mut relaxed = false;

        for arc in &arcs {
            if dist[arc.from] == f64::INFINITY {
                continue;
            }

            let weight = s.edge_at(arc.edge).weight();
            let edge_id = s.edge_at(arc.edge).id();
            let (from_name, to_name) = (s.name(arc.from), s.name(arc.to));

            log.record(
                Step::new(
                    StepKind::EdgeHighlight,
                    format!("Considering edge from {from_name} to {to_name} with weight {weight}."),
                )
                .on_edge(edge_id)
                .with_color(Some(StepColor::Secondary))
                .with_nodes(paint_nodes(&s, &dist, start, None))
                .with_edges(only_edge(&s, arc.edge, StepColor::Secondary)),
            );

            let candidate = dist[arc.from] + weight;
            if candidate >= dist[arc.to] {
                continue;
            }

            if detecting {
                negative_cycle = true;
                dist[arc.to] = f64::NEG_INFINITY;
                log.record(
                    Step::new(
                        StepKind::EdgeHighlight,
                        format!(
                            "Negative cycle detected! Edge {from_name}-{to_name} can still reduce the distance to {to_name}."
                        ),
                    )
                    .on_edge(edge_id)
                    .with_color(Some(StepColor::Destructive))
                    .with_nodes(paint_nodes(
                        &s,
                        &dist,
                        start,
                        Some((arc.to, StepColor::Destructive)),
                    ))
                    .with_edges(only_edge(&s, arc.edge, StepColor::Destructive)),
                );
                break;
            }

            dist[arc.to] = candidate;
            pred[arc.to] = Some(arc.from);
            relaxed = true;
            log.record(
                Step::new(
                    StepKind::NodeUpdate,
                    format!(
                        "Updated distance to node {to_name}: {} via {from_name}.",
                        Distance::from(candidate)
                    ),
                )
                .on_node(s.node_at(arc.to).id())
                .with_color(Some(StepColor::Primary))
                .with_nodes(paint_nodes(&s, &dist, start, Some((arc.to, StepColor::Primary))))
                .with_edges(only_edge(&s, arc.edge, StepColor::Primary)),
            );
        }

        let label = if detecting {
            format!("{} (Neg. Cycle Check)", i + 1)
        } else {
            (i + 1).to_string()
        };
        log.row(trace_row(&s, label, &dist, &pred));

        if !relaxed && !detecting {
            log.record(
                Step::new(
                    StepKind::TextUpdate,
                    format!(
                        "No distances were updated in iteration {}. Algorithm can terminate early.",
                        i + 1
                    ),
                )
                .with_nodes(paint_nodes(&s, &dist, start, None))
                .with_edges(s.plain_edges()),
            );
            break;
        }

        if negative_cycle {
            let flooded = flood(&s, &arcs, &dist);
            for v in &flooded {
                dist[*v] = f64::NEG_INFINITY;
            }

            log.record(
                Step::new(
                    StepKind::TextUpdate,
                    "Propagating negative infinity to all nodes reachable from the negative cycle.",
                )
                .with_nodes(paint_nodes(&s, &dist, start, None))
                .with_edges(s.edges_colored(|e| {
                    s.endpoints(e)
                        .filter(|(from, to)| flooded.contains(from) && flooded.contains(to))
                        .map(|_| StepColor::Destructive)
                })),
            );
            log.row(trace_row(&s, "Final (with -∞)".to_string(), &dist, &pred));
            break;
        }
    }

    let last = if negative_cycle {
        Step::new(
            StepKind::Final,
            "Bellman-Ford algorithm completed. Negative cycle detected! Some distances are -∞.",
        )
        .with_nodes(paint_nodes(&s, &dist, start, None))
        .with_edges(s.plain_edges())
    } else {
        let on_path = shortest_path_edges(&s, start, &pred, |v| dist[v].is_finite());
        Step::new(
            StepKind::Final,
            format!(
                "Bellman-Ford algorithm completed. No negative cycles detected. Shortest paths from {} to all reachable nodes have been found.",
                s.name(start)
            ),
        )
        .with_nodes(paint_nodes(&s, &dist, start, None))
        .with_edges(s.edges_colored(|e| on_path[e].then_some(StepColor::Accent)))
    };
    log.record(last);

    debug!(
        "bellman-ford: {} steps, negative cycle: {negative_cycle}",
        log.len()
    );
    Ok(log.finish())
}

/// Relaxable directions in edge order, dangling edges skipped.
fn arcs(s: &Snapshot) -> Vec<Arc> {
    let mut arcs = Vec::with_capacity(s.edge_count() * 2);
    for (edge, from, to) in s.resolved_edges() {
        arcs.push(Arc { edge, from, to });
        if !s.edge_at(edge).directed() && from != to {
            arcs.push(Arc {
                edge,
                from: to,
                to: from,
            });
        }
    }
    arcs
}

/// Nodes whose distance keeps dropping under further relaxation, i.e. every node reachable
/// from a negative cycle that is itself reachable from the start, plus everything downstream.
///
/// `dist` must be the state after the regular passes. Runs on a copy, one pass per node is
/// enough for `-∞` to travel the longest simple path.
fn flood(s: &Snapshot, arcs: &[Arc], dist: &[f64]) -> HashSet<usize> {
    let mut dist = dist.to_vec();
    for _ in 0..dist.len() {
        for arc in arcs {
            if dist[arc.from] == f64::INFINITY {
                continue;
            }
            if dist[arc.from] + s.edge_at(arc.edge).weight() < dist[arc.to] {
                dist[arc.to] = f64::NEG_INFINITY;
            }
        }
    }

    let mut reached = (0..dist.len())
        .filter(|v| dist[*v] == f64::NEG_INFINITY)
        .collect::<HashSet<_>>();

    let mut changed = true;
    while changed {
        changed = false;
        for arc in arcs {
            if reached.contains(&arc.from) && reached.insert(arc.to) {
                changed = true;
            }
        }
    }
    reached
}

/// Distance labels everywhere, start in accent, `focus` painted over.
fn paint_nodes(
    s: &Snapshot,
    dist: &[f64],
    start: usize,
    focus: Option<(usize, StepColor)>,
) -> Vec<Node> {
    s.nodes_with(|i, n| {
        n.set_label(Some(dist[i].into()));
        let color = match focus {
            Some((f, color)) if f == i => Some(color),
            _ if dist[i] == f64::NEG_INFINITY => Some(StepColor::Destructive),
            _ if i == start => Some(StepColor::Accent),
            _ => None,
        };
        n.set_color(color);
    })
}

fn only_edge(s: &Snapshot, edge: usize, color: StepColor) -> Vec<Edge> {
    s.edges_colored(|e| (e == edge).then_some(color))
}

fn trace_row(s: &Snapshot, label: String, dist: &[f64], pred: &[Option<usize>]) -> Vec<String> {
    let mut row = vec![label];
    row.extend(
        dist.iter()
            .zip(pred)
            .map(|(d, p)| distance_cell(*d, p.map(|p| s.name(p)))),
    );
    row
}
