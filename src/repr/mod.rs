/*!
# Graph Representation

[`Graph`] is a directed, simple, weighted graph whose nodes are identified by unique names.

## Storage

- Nodes live in an arena of slots; a [`NodeId`] is the slot index plus the generation of the slot.
  Removing a node bumps the generation, so stale handles never resolve again.
- A name index maps every name to its handle.
- An explicit list of handles keeps the insertion order used by
  [`node_list`](crate::ops::GraphNodeOrder::node_list) and the [`AdjMatrix`].
- Arcs are stored as a map from `(start, end)` handle pairs to their weight.

All mutating calls either fully succeed or return a [`Violation`] without changing anything.
*/

use crate::prelude::*;

mod graph;
mod matrix;

pub use graph::*;
pub use matrix::*;
