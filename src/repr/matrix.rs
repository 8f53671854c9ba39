/*!
# Adjacency Matrix Snapshot

[`AdjMatrix`] is a dense `n x n` copy of the arc weights of a graph, indexed by the position of each
node in [`node_list`](crate::ops::GraphNodeOrder::node_list). It is the structure consumed by
shortest-path, flow and coloring algorithms.

- the diagonal is `0`,
- entries without an arc are [`INFINITY`],
- all other entries hold the weight of the arc.

The matrix is a snapshot: later changes to the graph are not reflected.

## Rendering

`Display` renders the matrix as a table with node names as row and column headers, showing
[`INFINITY`] as `INF`. Use [`AdjMatrix::display`] to change the placeholder or the minimum cell width:
```
use arcgraph::prelude::*;

let mut graph = Graph::with_nodes(2);
graph.set_arc("a0", "b0", 5).unwrap();

let table = graph.adjacency_matrix().display().placeholder("-").to_string();
assert_eq!(table, "\n    a0  b0  \na0  0   5   \nb0  -   0   \n");
```
*/

use std::fmt::Display;

use fxhash::FxHashMap;
use itertools::Itertools;

use super::*;

/// Dense adjacency matrix of a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjMatrix {
    nodes: Vec<NodeId>,
    names: Vec<String>,
    index: FxHashMap<NodeId, usize>,
    /// Row-major `n x n` weights
    weights: Vec<Weight>,
}

impl AdjMatrix {
    /// Builds the adjacency matrix of a graph
    pub fn from_graph<G: GraphArcOrder + ?Sized>(graph: &G) -> Self {
        let nodes = graph.node_list().to_vec();
        let n = nodes.len();

        let names = nodes
            .iter()
            .map(|&u| graph.name_of(u).unwrap_or_default().to_string())
            .collect_vec();
        let index: FxHashMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(i, &u)| (u, i)).collect();

        let mut weights = vec![INFINITY; n * n];
        for i in 0..n {
            weights[i * n + i] = 0;
        }

        for arc in graph.arcs() {
            if let (Some(&i), Some(&j)) = (index.get(&arc.start), index.get(&arc.end)) {
                weights[i * n + j] = arc.weight;
            }
        }

        Self {
            nodes,
            names,
            index,
            weights,
        }
    }

    /// Returns the number of rows (= number of columns)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns *true* if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node of each row/column
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns the name of each row/column
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the row/column of the given node
    pub fn index_of(&self, u: NodeId) -> Option<usize> {
        self.index.get(&u).copied()
    }

    /// Returns the entry in row `i` and column `j`
    /// ** Panics if `i >= n || j >= n` **
    pub fn get(&self, i: usize, j: usize) -> Weight {
        assert!(j < self.len());
        self.weights[i * self.len() + j]
    }

    /// Returns the entry for the node pair `(u, v)` or `None` if one of them is not part of the matrix
    pub fn weight(&self, u: NodeId, v: NodeId) -> Option<Weight> {
        Some(self.get(self.index_of(u)?, self.index_of(v)?))
    }

    /// Returns row `i` as a slice
    /// ** Panics if `i >= n` **
    pub fn row(&self, i: usize) -> &[Weight] {
        let n = self.len();
        &self.weights[i * n..(i + 1) * n]
    }

    /// Returns an iterator over all rows
    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> + '_ {
        // `chunks` panics on size 0
        self.weights.chunks(self.len().max(1))
    }

    /// Copies the matrix into nested vectors
    pub fn to_rows(&self) -> Vec<Vec<Weight>> {
        self.rows().map(<[Weight]>::to_vec).collect_vec()
    }

    /// Returns a configurable textual rendering of the matrix
    pub fn display(&self) -> MatrixDisplay<'_> {
        MatrixDisplay {
            matrix: self,
            placeholder: "INF",
            min_width: 3,
        }
    }
}

impl Display for AdjMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.display().fmt(f)
    }
}

/// Textual rendering of an [`AdjMatrix`].
///
/// Every cell is left-aligned in a column of equal width followed by a single space.
/// The width is the maximum of `min_width`, the longest name, the longest weight and the
/// placeholder. An empty matrix renders as the empty string.
#[derive(Debug, Clone, Copy)]
pub struct MatrixDisplay<'a> {
    matrix: &'a AdjMatrix,
    placeholder: &'a str,
    min_width: usize,
}

impl<'a> MatrixDisplay<'a> {
    /// Token shown for entries without an arc (default: `INF`)
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Minimum width of a column (default: `3`)
    pub fn min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    fn cell_width(&self) -> usize {
        let names = self.matrix.names.iter().map(|name| name.chars().count());
        let weights = self
            .matrix
            .weights
            .iter()
            .filter(|&&w| w != INFINITY)
            .map(|w| w.to_string().len());

        names
            .chain(weights)
            .chain(std::iter::once(self.placeholder.chars().count()))
            .fold(self.min_width, usize::max)
    }
}

impl Display for MatrixDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.matrix.is_empty() {
            return Ok(());
        }

        let width = self.cell_width();

        writeln!(f)?;
        write!(f, "{:width$}", "", width = width + 1)?;
        for name in &self.matrix.names {
            write!(f, "{name:<width$} ")?;
        }
        writeln!(f)?;

        for (name, row) in self.matrix.names.iter().zip(self.matrix.rows()) {
            write!(f, "{name:<width$} ")?;
            for &w in row {
                if w == INFINITY {
                    write!(f, "{:<width$} ", self.placeholder)?;
                } else {
                    write!(f, "{w:<width$} ")?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::graph_from_arcs;

    #[test]
    fn matrix_of_path() {
        let graph = graph_from_arcs(["a0", "b0", "c0"], [("a0", "b0", 5), ("b0", "c0", 3)]);
        let matrix = graph.adjacency_matrix();

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.names(), ["a0", "b0", "c0"]);
        assert_eq!(
            matrix.to_rows(),
            vec![
                vec![0, 5, INFINITY],
                vec![INFINITY, 0, 3],
                vec![INFINITY, INFINITY, 0],
            ]
        );

        let a = graph.node_id("a0").unwrap();
        let c = graph.node_id("c0").unwrap();
        assert_eq!(matrix.index_of(c), Some(2));
        assert_eq!(matrix.weight(a, c), Some(INFINITY));
        assert_eq!(matrix.get(0, 1), 5);
        assert_eq!(matrix.row(1), [INFINITY, 0, 3]);
    }

    #[test]
    fn matrix_follows_insertion_order() {
        let graph = graph_from_arcs(["z", "m", "a"], [("a", "z", 2)]);
        let matrix = graph.adjacency_matrix();

        assert_eq!(matrix.names(), ["z", "m", "a"]);
        assert_eq!(matrix.get(2, 0), 2);
        assert_eq!(matrix.get(0, 2), INFINITY);
    }

    #[test]
    fn empty_matrix() {
        let matrix = Graph::new().adjacency_matrix();

        assert!(matrix.is_empty());
        assert_eq!(matrix.rows().count(), 0);
        assert_eq!(matrix.to_string(), "");
    }

    #[test]
    fn render_table() {
        let graph = graph_from_arcs(["a0", "b0", "c0"], [("a0", "b0", 5), ("b0", "c0", 3)]);

        let expected = concat!(
            "\n",
            "    a0  b0  c0  \n",
            "a0  0   5   INF \n",
            "b0  INF 0   3   \n",
            "c0  INF INF 0   \n",
        );
        assert_eq!(graph.adjacency_matrix().to_string(), expected);
        assert_eq!(graph.to_string(), expected);
    }

    #[test]
    fn render_table_with_wide_cells() {
        let graph = graph_from_arcs(["node", "x"], [("x", "node", 123456)]);

        let expected = concat!(
            "\n",
            "       node   x      \n",
            "node   0      ~      \n",
            "x      123456 0      \n",
        );
        assert_eq!(
            graph.adjacency_matrix().display().placeholder("~").to_string(),
            expected
        );
    }
}
