use log::debug;
use petgraph::unionfind::UnionFind;

use crate::step::StepLog;
use crate::{
    edge_cell, AlgorithmError, Edge, GraphRead, Node, Snapshot, Step, StepColor, StepKind,
    TraceTable,
};

/// Minimum spanning forest from edges taken lightest first, skipping edges whose ends are
/// already connected. Edge direction is ignored.
///
/// Equal weights keep graph order. Every edge is considered even after the forest is
/// complete, so the trace has one row per edge.
///
/// # Errors
///
/// Never fails, the signature matches the other transducers.
pub fn kruskal<G: GraphRead>(graph: &G) -> Result<Vec<Step>, AlgorithmError> {
    let s = Snapshot::capture(graph);
    debug!(
        "kruskal: {} nodes, {} edges",
        s.node_count(),
        s.edge_count()
    );

    let mut sorted = s.resolved_edges().collect::<Vec<_>>();
    // stable
    sorted.sort_by(|(a, _, _), (b, _, _)| {
        s.edge_at(*a).weight().total_cmp(&s.edge_at(*b).weight())
    });

    let mut sets = UnionFind::<usize>::new(s.node_count());
    let mut in_tree = vec![false; s.edge_count()];
    let mut touched = vec![false; s.node_count()];
    let mut tree_size = 0;
    let mut total = 0.;

    let mut log = StepLog::new(TraceTable::new([
        "Step",
        "Edge Considered (u,v)=w",
        "Find(u)",
        "Find(v)",
        "Action",
        "MST Edges",
        "Total MST Cost",
    ]));

    log.record(
        Step::new(
            StepKind::TextUpdate,
            "Starting Kruskal's algorithm. Edges are sorted by weight.",
        )
        .with_nodes(s.plain_nodes())
        .with_edges(s.plain_edges()),
    );

    for (count, (edge, from, to)) in sorted.into_iter().enumerate() {
        let weight = s.edge_at(edge).weight();
        let edge_id = s.edge_at(edge).id();
        let (from_name, to_name) = (s.name(from), s.name(to));
        let from_root = sets.find_mut(from);
        let to_root = sets.find_mut(to);

        log.record(
            Step::new(
                StepKind::EdgeHighlight,
                format!("Considering edge {from_name}-{to_name} with weight {weight}."),
            )
            .on_edge(edge_id)
            .with_color(Some(StepColor::Secondary))
            .with_nodes(paint_nodes(&s, &touched))
            .with_edges(tree_edges(&s, &in_tree, Some(edge))),
        );

        let (action, color, outcome) = if from_root == to_root {
            ("Forms Cycle - Skipped", None, "Would form a cycle.".to_string())
        } else {
            sets.union(from, to);
            in_tree[edge] = true;
            touched[from] = true;
            touched[to] = true;
            tree_size += 1;
            total += weight;
            (
                "Add to MST",
                Some(StepColor::Accent),
                format!("Total MST cost: {total}."),
            )
        };

        log.row(vec![
            (count + 1).to_string(),
            edge_cell(from_name, to_name, weight),
            s.name(from_root).to_string(),
            s.name(to_root).to_string(),
            action.to_string(),
            tree_size.to_string(),
            total.to_string(),
        ]);

        log.record(
            Step::new(
                StepKind::EdgeHighlight,
                format!("{action}: Edge {from_name}-{to_name} with weight {weight}. {outcome}"),
            )
            .on_edge(edge_id)
            .with_color(color)
            .with_nodes(paint_nodes(&s, &touched))
            .with_edges(tree_edges(&s, &in_tree, None)),
        );
    }

    log.record(
        Step::new(
            StepKind::Final,
            format!("Kruskal's algorithm completed. Total MST cost: {total}."),
        )
        .with_nodes(paint_nodes(&s, &touched))
        .with_edges(tree_edges(&s, &in_tree, None)),
    );

    debug!(
        "kruskal: {} steps, {tree_size} tree edges, cost {total}",
        log.len()
    );
    Ok(log.finish())
}

/// Nodes touching a tree edge in accent.
fn paint_nodes(s: &Snapshot, touched: &[bool]) -> Vec<Node> {
    s.nodes_with(|i, n| n.set_color(touched[i].then_some(StepColor::Accent)))
}

fn tree_edges(s: &Snapshot, in_tree: &[bool], candidate: Option<usize>) -> Vec<Edge> {
    s.edges_colored(|e| {
        if candidate == Some(e) {
            Some(StepColor::Secondary)
        } else {
            in_tree[e].then_some(StepColor::Accent)
        }
    })
}

#[cfg(test)]
mod tests {
    use egui::Pos2;

    use super::*;
    use crate::{Graph, NodeId};

    fn k4() -> (Graph, Vec<NodeId>) {
        let mut g = Graph::new();
        let ids = ["A", "B", "C", "D"]
            .iter()
            .map(|n| g.add_node_with_name(Pos2::ZERO, *n))
            .collect::<Vec<_>>();
        let weighted = [(0, 1, 1.), (0, 2, 4.), (0, 3, 3.), (1, 2, 2.), (1, 3, 5.), (2, 3, 6.)];
        for (from, to, w) in weighted {
            g.add_edge_directed(ids[from], ids[to], w, false).unwrap();
        }
        (g, ids)
    }

    #[test]
    fn complete_graph_of_four() {
        let (g, _) = k4();
        let steps = kruskal(&g).unwrap();
        let last = steps.last().unwrap();

        assert_eq!(last.text(), "Kruskal's algorithm completed. Total MST cost: 6.");
        let accepted = last
            .edges()
            .iter()
            .filter(|e| e.color() == Some(StepColor::Accent))
            .count();
        assert_eq!(accepted, 3);

        let rows = last.table().rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], vec!["1", "(A,B)=1", "A", "B", "Add to MST", "1", "1"]);
        // every node hangs under A by now
        assert_eq!(rows[3], vec!["4", "(A,C)=4", "A", "A", "Forms Cycle - Skipped", "3", "6"]);
        // initial + 2 per edge + final
        assert_eq!(steps.len(), 14);
    }

    #[test]
    fn skipped_edge_is_narrated() {
        let (g, _) = k4();
        let steps = kruskal(&g).unwrap();
        let skipped = steps
            .iter()
            .find(|s| s.text().starts_with("Forms Cycle - Skipped"))
            .unwrap();
        assert_eq!(
            skipped.text(),
            "Forms Cycle - Skipped: Edge A-C with weight 4. Would form a cycle."
        );
        assert_eq!(skipped.color(), None);
    }

    #[test]
    fn forest_on_disconnected_graph() {
        let mut g = Graph::new();
        let a = g.add_node(Pos2::ZERO);
        let b = g.add_node(Pos2::ZERO);
        let c = g.add_node(Pos2::ZERO);
        let d = g.add_node(Pos2::ZERO);
        g.add_edge(a, b, 2.).unwrap();
        g.add_edge(c, d, 1.).unwrap();

        let last = kruskal(&g).unwrap().pop().unwrap();
        assert!(last.is_final());
        assert!(last
            .edges()
            .iter()
            .all(|e| e.color() == Some(StepColor::Accent)));
        assert!(last
            .nodes()
            .iter()
            .all(|n| n.color() == Some(StepColor::Accent)));
    }

    #[test]
    fn empty_graph_still_finishes() {
        let steps = kruskal(&Graph::new()).unwrap();
        assert_eq!(steps.len(), 2);
        assert!(steps[1].is_final());
    }
}
