/*!
`arcgraph` is the graph data model of an interactive graph editor. Graphs are
- **named** : Every node has a unique name (and a position used by renderers)
- **weighted** : Every arc carries a strictly positive integer weight
- **directed** and **simple** : At most one arc per ordered pair of nodes, no self-loops

Undirected graphs can be modelled by inserting both directions of an arc.

# Representation

The only representation is [`Graph`](crate::repr::Graph).
Nodes are stored in an arena and referred to by generation-checked [`NodeId`](crate::node::NodeId)
handles, so a handle of a removed node can never silently refer to another node.
Wherever a node is expected, its name can be used instead (see [`NodeRef`](crate::ops::NodeRef)).

Arcs are stored as a mapping from ordered pairs of handles to their [`Weight`](crate::arc::Weight).
Missing arcs are reported with the sentinel [`INFINITY`](crate::arc::INFINITY).

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, arcs, errors, the read-only graph traits and the graph itself,
- [`ops`] includes the traits consumed by algorithms and renderers: node list, arc list, adjacency matrix and weights,
- [`io`] includes the reader and writer of the text format,
- [`observe`] includes the change notifications delivered after every successful mutation.

```
use arcgraph::prelude::*;

let mut graph = Graph::with_nodes(3);
graph.set_arc("a0", "b0", 5).unwrap();
graph.set_arc("b0", "c0", 3).unwrap();

let matrix = graph.adjacency_matrix();
assert_eq!(matrix.row(0), [0, 5, INFINITY]);

let transposed = graph.transpose();
assert_eq!(transposed.weight("c0", "b0"), 3);
```

# Features
- `logging` emits `log` records on structural changes and file IO.
*/

pub mod arc;
pub mod error;
pub mod io;
pub mod node;
pub mod observe;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;

/// `arcgraph::prelude` includes definitions for nodes, arcs and errors, all read-only graph traits as well as the graph itself.
pub mod prelude {
    pub use super::{
        arc::*,
        error::*,
        node::*,
        observe::{GraphEvent, SubscriptionId},
        ops::*,
        repr::*,
    };
}
