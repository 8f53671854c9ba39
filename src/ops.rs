/*!
# Graph Operations

Read-only traits describing what algorithms (BFS/DFS, shortest paths, colorings, ...) and renderers
may ask of a graph. [`Graph`](crate::repr::Graph) implements all of them; the derived views
[`arc_list`](GraphArcOrder::arc_list) and [`adjacency_matrix`](AdjacencyView::adjacency_matrix)
are provided on top of the required methods.

Nodes can be referred to either by [`NodeId`] or by name, see [`NodeRef`].
*/

use crate::{prelude::*, repr::AdjMatrix};

/// Anything that can be resolved to a node of a graph: a [`NodeId`] or a node name.
pub trait NodeRef {
    /// Returns the handle of the referenced node if it is part of `graph`
    fn resolve<G: GraphNodeOrder + ?Sized>(&self, graph: &G) -> Option<NodeId>;
}

impl NodeRef for NodeId {
    fn resolve<G: GraphNodeOrder + ?Sized>(&self, graph: &G) -> Option<NodeId> {
        graph.node_by_id(*self).map(|_| *self)
    }
}

impl NodeRef for &NodeId {
    fn resolve<G: GraphNodeOrder + ?Sized>(&self, graph: &G) -> Option<NodeId> {
        (**self).resolve(graph)
    }
}

impl NodeRef for &str {
    fn resolve<G: GraphNodeOrder + ?Sized>(&self, graph: &G) -> Option<NodeId> {
        graph.node_id(self)
    }
}

impl NodeRef for String {
    fn resolve<G: GraphNodeOrder + ?Sized>(&self, graph: &G) -> Option<NodeId> {
        graph.node_id(self)
    }
}

impl NodeRef for &String {
    fn resolve<G: GraphNodeOrder + ?Sized>(&self, graph: &G) -> Option<NodeId> {
        graph.node_id(self)
    }
}

/// Provides getters pertaining to the nodes of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Returns all nodes in insertion order.
    /// This list is maintained by the graph and not recomputed.
    fn node_list(&self) -> &[NodeId];

    /// Returns the node behind a handle, or `None` if the handle is stale
    fn node_by_id(&self, u: NodeId) -> Option<&Node>;

    /// Returns the handle of the node with the given name
    fn node_id(&self, name: &str) -> Option<NodeId>;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns *true* if the graph has no nodes (and thus no arcs)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the referenced node if it exists
    fn node(&self, u: impl NodeRef) -> Option<&Node> {
        u.resolve(self).and_then(|u| self.node_by_id(u))
    }

    /// Returns *true* if the referenced node exists
    fn has_node(&self, u: impl NodeRef) -> bool {
        u.resolve(self).is_some()
    }

    /// Returns the name of the referenced node
    fn name_of(&self, u: impl NodeRef) -> Option<&str> {
        self.node(u).map(Node::name)
    }

    /// Returns the number of arcs leaving the referenced node
    fn out_degree_of(&self, u: impl NodeRef) -> Option<NumNodes> {
        self.node(u).map(Node::out_degree)
    }

    /// Returns the number of arcs entering the referenced node
    fn in_degree_of(&self, u: impl NodeRef) -> Option<NumNodes> {
        self.node(u).map(Node::in_degree)
    }

    /// Returns an iterator over all nodes (with handles) in insertion order
    fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.node_list()
            .iter()
            .filter_map(|&u| self.node_by_id(u).map(|node| (u, node)))
    }
}

/// Provides getters pertaining to the arcs of a graph
pub trait GraphArcOrder: GraphNodeOrder {
    /// Returns the number of arcs of the graph
    fn number_of_arcs(&self) -> NumArcs;

    /// Returns an iterator over all arcs in no particular order
    fn arcs(&self) -> impl Iterator<Item = Arc> + '_;

    /// Returns the weight of the arc `(u, v)` if it exists
    fn arc_weight(&self, u: NodeId, v: NodeId) -> Option<Weight>;

    /// Returns a fresh list of all arcs in no particular order
    fn arc_list(&self) -> Vec<Arc> {
        self.arcs().collect()
    }

    /// Returns the weight of the arc `(u, v)` or [`INFINITY`] if there is no such arc or one of the
    /// endpoints does not exist
    fn weight(&self, u: impl NodeRef, v: impl NodeRef) -> Weight {
        match (u.resolve(self), v.resolve(self)) {
            (Some(u), Some(v)) => self.arc_weight(u, v).unwrap_or(INFINITY),
            _ => INFINITY,
        }
    }

    /// Returns *true* if the arc `(u, v)` exists
    fn has_arc(&self, u: impl NodeRef, v: impl NodeRef) -> bool {
        self.weight(u, v) != INFINITY
    }

    /// Returns an iterator over all arcs leaving `u`
    fn out_arcs_of(&self, u: NodeId) -> impl Iterator<Item = Arc> + '_ {
        self.arcs().filter(move |arc| arc.start == u)
    }

    /// Returns an iterator over all arcs entering `u`
    fn in_arcs_of(&self, u: NodeId) -> impl Iterator<Item = Arc> + '_ {
        self.arcs().filter(move |arc| arc.end == u)
    }

    /// Returns *true* if the graph has no arcs
    fn has_no_arcs(&self) -> bool {
        self.number_of_arcs() == 0
    }
}

/// Provides the adjacency matrix consumed by path/flow/coloring algorithms
pub trait AdjacencyView: GraphArcOrder {
    /// Builds a `n x n` matrix indexed by the position of nodes in [`GraphNodeOrder::node_list`].
    /// The diagonal is `0`, entries without arc are [`INFINITY`].
    fn adjacency_matrix(&self) -> AdjMatrix {
        AdjMatrix::from_graph(self)
    }
}

impl<G: GraphArcOrder> AdjacencyView for G {}
