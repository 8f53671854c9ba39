use std::{collections::hash_map::Entry, fmt::Display};

use fxhash::FxHashMap;
use itertools::Itertools;

use super::*;
use crate::observe::{GraphEvent, Observers, SubscriptionId};

/// A slot of the node arena
#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A directed, simple, weighted graph with uniquely named nodes.
///
/// Nodes are referred to by [`NodeId`] handles or by name (see [`NodeRef`]).
/// Arcs are unique per ordered pair of distinct nodes and carry a weight in `1..INFINITY`.
///
/// ```
/// use arcgraph::prelude::*;
///
/// let mut graph = Graph::new();
/// let u = graph.add_node("u").unwrap();
/// let v = graph.add_node("v").unwrap();
///
/// assert!(graph.set_arc(u, v, 4).unwrap());
/// assert_eq!(graph.weight("u", "v"), 4);
/// assert_eq!(graph.weight(v, u), INFINITY);
/// assert!(graph.set_arc(u, u, 1).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    slots: Vec<Slot>,
    /// Slots whose node was removed and that can be reused
    free_slots: Vec<u32>,
    names: FxHashMap<String, NodeId>,
    /// Live nodes in insertion order
    order: Vec<NodeId>,
    arcs: FxHashMap<(NodeId, NodeId), Weight>,
    /// Never decremented; drives default names
    nodes_ever_added: u64,
    observers: Observers,
}

impl Graph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `n` nodes named `a0, b0, ...` and no arcs
    pub fn with_nodes(n: NumNodes) -> Self {
        let mut graph = Self::new();
        for _ in 0..n {
            // Default names of a fresh graph never collide
            let node = Node::new(graph.next_node_name(), Position::default());
            graph.insert_node(node);
            graph.nodes_ever_added += 1;
        }
        graph
    }

    /// Returns the number of nodes that were ever added to this graph
    pub fn nodes_ever_added(&self) -> u64 {
        self.nodes_ever_added
    }

    /// Returns the name the next node added without a name will receive
    pub fn next_node_name(&self) -> String {
        default_node_name(self.nodes_ever_added)
    }

    /// Adds a node at the origin. If `name` is empty, [`Graph::next_node_name`] is used.
    ///
    /// # Errors
    /// Fails if a node with that name already exists or the name contains whitespace.
    pub fn add_node(&mut self, name: &str) -> Result<NodeId> {
        self.add_node_at(name, Position::default())
    }

    /// Adds a node at the given position. If `name` is empty, [`Graph::next_node_name`] is used.
    ///
    /// # Errors
    /// Fails if a node with that name already exists or the name contains whitespace.
    pub fn add_node_at<P: Into<Position>>(&mut self, name: &str, position: P) -> Result<NodeId> {
        let name = if name.is_empty() {
            self.next_node_name()
        } else {
            name.to_string()
        };

        if !is_valid_node_name(&name) {
            return Err(Violation::InvalidName(name).into());
        }
        if self.names.contains_key(&name) {
            return Err(Violation::DuplicateName(name).into());
        }

        let u = self.insert_node(Node::new(name, position.into()));
        self.nodes_ever_added += 1;

        self.observers.notify(GraphEvent::NodeAdded(u));
        Ok(u)
    }

    /// Removes a node together with all arcs entering or leaving it and returns the node.
    /// The handle of the node (and copies of it) will never resolve again.
    ///
    /// # Errors
    /// Fails if the node does not exist.
    pub fn remove_node(&mut self, u: impl NodeRef) -> Result<Node> {
        let u = self.resolve(u)?;
        let num_detached = self.detach_arcs(u);

        let slot = &mut self.slots[u.index()];
        let node = slot.node.take().ok_or(Violation::UnknownNode)?;
        // A slot whose generation is exhausted is never handed out again
        if slot.generation < u32::MAX {
            slot.generation += 1;
            self.free_slots.push(u.index() as u32);
        }

        self.names.remove(node.name());
        self.order.retain(|&v| v != u);

        #[cfg(feature = "logging")]
        log::debug!("removed node `{}` and {num_detached} incident arcs", node.name());
        #[cfg(not(feature = "logging"))]
        let _ = num_detached;

        self.observers.notify(GraphEvent::NodeRemoved(u));
        Ok(node)
    }

    /// Removes all arcs entering or leaving a node but keeps the node.
    /// Returns the number of removed arcs.
    ///
    /// # Errors
    /// Fails if the node does not exist.
    pub fn isolate_node(&mut self, u: impl NodeRef) -> Result<NumArcs> {
        let u = self.resolve(u)?;
        let num_detached = self.detach_arcs(u);

        self.observers.notify(GraphEvent::NodeIsolated(u));
        Ok(num_detached)
    }

    /// Renames a node. Arcs are keyed by handle and remain untouched.
    ///
    /// # Errors
    /// Fails if the node does not exist, already has this name, or the name is invalid or taken.
    pub fn rename_node(&mut self, u: impl NodeRef, new_name: &str) -> Result<()> {
        let u = self.resolve(u)?;
        let old_name = self.name_of(u).ok_or(Violation::UnknownNode)?.to_string();

        if old_name == new_name {
            return Err(Violation::UnchangedName(old_name).into());
        }
        if !is_valid_node_name(new_name) {
            return Err(Violation::InvalidName(new_name.to_string()).into());
        }
        if self.names.contains_key(new_name) {
            return Err(Violation::DuplicateName(new_name.to_string()).into());
        }

        let node = self.node_mut(u).ok_or(Violation::UnknownNode)?;
        node.set_name(new_name.to_string());
        self.names.remove(&old_name);
        self.names.insert(new_name.to_string(), u);

        self.observers.notify(GraphEvent::NodeRenamed(u));
        Ok(())
    }

    /// Moves a node to a new position.
    ///
    /// # Errors
    /// Fails if the node does not exist.
    pub fn set_position<P: Into<Position>>(&mut self, u: impl NodeRef, position: P) -> Result<()> {
        let u = self.resolve(u)?;
        self.node_mut(u)
            .ok_or(Violation::UnknownNode)?
            .set_position(position.into());

        self.observers.notify(GraphEvent::NodeMoved(u));
        Ok(())
    }

    /// Sets the weight of the arc `(u, v)`, inserting the arc if it did not exist.
    /// Returns *true* if the arc was inserted and *false* if only its weight was updated.
    /// Degrees only change on insertion.
    ///
    /// # Errors
    /// Fails if an endpoint does not exist, `u == v`, or `weight` is not in `1..INFINITY`.
    pub fn set_arc(&mut self, u: impl NodeRef, v: impl NodeRef, weight: Weight) -> Result<bool> {
        let (u, v) = self.resolve_arc(u, v)?;
        if !is_valid_weight(weight) {
            return Err(Violation::WeightOutOfRange(weight).into());
        }

        let inserted = self.insert_arc(u, v, weight);

        self.observers.notify(GraphEvent::ArcSet {
            start: u,
            end: v,
            weight,
            inserted,
        });
        Ok(inserted)
    }

    /// Removes the arc `(u, v)` and returns its weight.
    ///
    /// # Errors
    /// Fails if an endpoint does not exist, `u == v`, or there is no such arc.
    pub fn remove_arc(&mut self, u: impl NodeRef, v: impl NodeRef) -> Result<Weight> {
        let (u, v) = self.resolve_arc(u, v)?;
        let weight = self.erase_arc(u, v).ok_or(Violation::MissingArc)?;

        self.observers
            .notify(GraphEvent::ArcRemoved { start: u, end: v });
        Ok(weight)
    }

    /// Removes all nodes and arcs.
    /// The counter for default names is kept, so generated names are not reused.
    pub fn clear(&mut self) {
        #[cfg(feature = "logging")]
        log::debug!(
            "clearing graph with {} nodes and {} arcs",
            self.order.len(),
            self.arcs.len()
        );

        self.clear_silently();
        self.observers.notify(GraphEvent::Cleared);
    }

    /// Removes all arcs and resets all degrees to zero
    pub fn clear_arcs(&mut self) {
        self.clear_arcs_silently();
        self.observers.notify(GraphEvent::ArcsCleared);
    }

    /// Returns a new graph with the same nodes (and handles) and every arc reversed.
    /// The new graph has no subscribers.
    pub fn transpose(&self) -> Graph {
        let mut graph = self.clone();
        graph.clear_arcs_silently();

        for (&(u, v), &weight) in &self.arcs {
            graph.insert_arc(v, u, weight);
        }

        graph
    }

    /// Registers a callback that is invoked after every successful mutation
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&GraphEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Removes a callback. Returns *false* if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Returns the number of registered callbacks
    pub fn number_of_subscribers(&self) -> usize {
        self.observers.len()
    }

    /// Replaces all nodes and arcs by those of `other`, keeping the subscribers of `self`.
    /// Nodes receive new handles in `self`; every node counts as newly added.
    pub(crate) fn replace_content(&mut self, other: &Graph) {
        self.clear_silently();

        let mut ids = FxHashMap::default();
        for (u, node) in other.nodes() {
            let mut node = node.clone();
            node.reset_degrees();
            ids.insert(u, self.insert_node(node));
            self.nodes_ever_added += 1;
        }
        for arc in other.arcs() {
            if let (Some(&u), Some(&v)) = (ids.get(&arc.start), ids.get(&arc.end)) {
                self.insert_arc(u, v, arc.weight);
            }
        }

        self.observers.notify(GraphEvent::Loaded);
    }

    // ---------- Internals ----------

    fn resolve(&self, u: impl NodeRef) -> Result<NodeId> {
        u.resolve(self).ok_or_else(|| Violation::UnknownNode.into())
    }

    fn resolve_arc(&self, u: impl NodeRef, v: impl NodeRef) -> Result<(NodeId, NodeId)> {
        let u = self.resolve(u)?;
        let v = self.resolve(v)?;
        if u == v {
            return Err(Violation::SelfLoop.into());
        }
        Ok((u, v))
    }

    fn node_mut(&mut self, u: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(u.index())
            .filter(|slot| slot.generation == u.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    fn insert_node(&mut self, node: Node) -> NodeId {
        let name = node.name().to_string();
        let u = match self.free_slots.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(index, 0)
            }
        };

        self.names.insert(name, u);
        self.order.push(u);
        u
    }

    /// Inserts or updates an arc between two existing, distinct nodes
    fn insert_arc(&mut self, u: NodeId, v: NodeId, weight: Weight) -> bool {
        debug_assert!(u != v);
        match self.arcs.entry((u, v)) {
            Entry::Occupied(mut entry) => {
                entry.insert(weight);
                return false;
            }
            Entry::Vacant(entry) => {
                entry.insert(weight);
            }
        }

        if let Some(node) = self.node_mut(u) {
            node.inc_out_degree();
        }
        if let Some(node) = self.node_mut(v) {
            node.inc_in_degree();
        }
        true
    }

    fn erase_arc(&mut self, u: NodeId, v: NodeId) -> Option<Weight> {
        let weight = self.arcs.remove(&(u, v))?;

        if let Some(node) = self.node_mut(u) {
            node.dec_out_degree();
        }
        if let Some(node) = self.node_mut(v) {
            node.dec_in_degree();
        }
        Some(weight)
    }

    /// Removes all arcs incident to `u` and returns their number
    fn detach_arcs(&mut self, u: NodeId) -> NumArcs {
        let incident = self
            .arcs
            .keys()
            .filter(|&&(s, t)| s == u || t == u)
            .copied()
            .collect_vec();

        for &(s, t) in &incident {
            self.erase_arc(s, t);
        }
        incident.len() as NumArcs
    }

    fn clear_arcs_silently(&mut self) {
        self.arcs.clear();
        for node in self.slots.iter_mut().filter_map(|slot| slot.node.as_mut()) {
            node.reset_degrees();
        }
    }

    /// Empties all slots and bumps their generations, so no handle issued so far resolves again
    fn clear_silently(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() && slot.generation < u32::MAX {
                slot.generation += 1;
                self.free_slots.push(index as u32);
            }
        }
        self.names.clear();
        self.order.clear();
        self.arcs.clear();
    }
}

impl GraphNodeOrder for Graph {
    fn number_of_nodes(&self) -> NumNodes {
        self.order.len() as NumNodes
    }

    fn node_list(&self) -> &[NodeId] {
        &self.order
    }

    fn node_by_id(&self, u: NodeId) -> Option<&Node> {
        self.slots
            .get(u.index())
            .filter(|slot| slot.generation == u.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }
}

impl GraphArcOrder for Graph {
    fn number_of_arcs(&self) -> NumArcs {
        self.arcs.len() as NumArcs
    }

    fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.arcs.iter().map(Arc::from)
    }

    fn arc_weight(&self, u: NodeId, v: NodeId) -> Option<Weight> {
        self.arcs.get(&(u, v)).copied()
    }
}

impl Display for Graph {
    /// Renders the adjacency matrix as a table
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.adjacency_matrix().fmt(f)
    }
}
