use serde::{Deserialize, Serialize};

use crate::Distance;

/// Cumulative, append-only trace of an algorithm run, one row per iteration or decision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TraceTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    /// Fixed-width text rendering with `title` on top, as written by the "save steps" action.
    ///
    /// Every column is as wide as its longest cell or header plus two.
    pub fn to_text(&self, title: &str) -> String {
        let widths = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let longest = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .fold(h.chars().count(), usize::max);
                longest + 2
            })
            .collect::<Vec<_>>();

        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-|-");

        let mut lines = vec![
            title.to_string(),
            String::new(),
            join_cells(self.headers.iter().map(String::as_str), &widths),
            rule,
        ];
        lines.extend(self.rows.iter().map(|row| {
            let cells = (0..widths.len()).map(|i| row.get(i).map_or("", String::as_str));
            join_cells(cells, &widths)
        }));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(c, w)| pad(c, *w))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

/// Distance cell in the `d(pred)` convention: `∞(-)` when unreached, `-∞(-)` on a negative cycle.
pub fn distance_cell(distance: f64, pred: Option<&str>) -> String {
    match Distance::from(distance) {
        Distance::Infinite => "∞(-)".to_string(),
        Distance::NegativeInfinite => "-∞(-)".to_string(),
        d @ Distance::Finite(_) => format!("{d}({})", pred.unwrap_or("-")),
    }
}

/// `(u,v)=w` edge description.
pub fn edge_cell(from: &str, to: &str, weight: f64) -> String {
    format!("({from},{to})={weight}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_cells() {
        assert_eq!(distance_cell(f64::INFINITY, Some("A")), "∞(-)");
        assert_eq!(distance_cell(f64::NEG_INFINITY, None), "-∞(-)");
        assert_eq!(distance_cell(3., Some("B")), "3(B)");
        assert_eq!(distance_cell(0., None), "0(-)");
        assert_eq!(edge_cell("A", "B", 2.5), "(A,B)=2.5");
    }

    #[test]
    fn text_layout() {
        let mut t = TraceTable::new(["Step", "Edge"]);
        t.push_row(vec!["1".into(), "(A,B)=1".into()]);
        t.push_row(vec!["2".into(), "∞".into()]);

        let text = t.to_text("Algorithm Steps: Kruskal");
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "Algorithm Steps: Kruskal");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Step   | Edge     ");
        assert_eq!(lines[3], format!("{}|{}", "-".repeat(7), "-".repeat(10)));
        assert_eq!(lines[4], "1      | (A,B)=1  ");
        assert_eq!(lines[5], "2      | ∞        ");
        assert_eq!(lines.len(), 6);
        assert!(text.ends_with("∞        \n"));
    }

    #[test]
    fn empty_table_has_header_only() {
        let t = TraceTable::new(["A"]);
        assert!(t.is_empty());
        assert_eq!(t.to_text("T").lines().count(), 4);
    }
}
