/*!
# Change Notification

Views of a graph (renderers, matrix tables, "unsaved changes" indicators) need to refresh whenever
the graph changes. A [`Graph`](crate::repr::Graph) therefore keeps a list of subscribers and
delivers exactly one [`GraphEvent`] to each of them after every successful mutating call.
Rejected calls never notify.

```
use arcgraph::prelude::*;
use std::{cell::RefCell, rc::Rc};

let seen = Rc::new(RefCell::new(Vec::new()));
let mut graph = Graph::new();

let log = Rc::clone(&seen);
graph.subscribe(move |event| log.borrow_mut().push(event.clone()));

let u = graph.add_node("u").unwrap();
assert!(graph.add_node("u").is_err());

assert_eq!(*seen.borrow(), vec![GraphEvent::NodeAdded(u)]);
```
*/

use std::fmt::Debug;

use crate::{arc::Weight, node::NodeId};

/// A change that was applied to a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    NodeAdded(NodeId),
    /// The node and all its incident arcs were removed
    NodeRemoved(NodeId),
    NodeRenamed(NodeId),
    NodeMoved(NodeId),
    /// All arcs incident to the node were removed
    NodeIsolated(NodeId),
    /// An arc was inserted (`inserted == true`) or its weight was updated
    ArcSet {
        start: NodeId,
        end: NodeId,
        weight: Weight,
        inserted: bool,
    },
    ArcRemoved {
        start: NodeId,
        end: NodeId,
    },
    /// All arcs were removed, nodes were kept
    ArcsCleared,
    /// All nodes and arcs were removed
    Cleared,
    /// The whole content was replaced by reading a file
    Loaded,
}

/// Handle returned by [`Graph::subscribe`](crate::repr::Graph::subscribe)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&GraphEvent)>;

/// List of subscribers of a graph.
///
/// Subscriptions belong to one graph instance: cloning yields an empty list.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub(crate) fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&GraphEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.callbacks.len();
        self.callbacks.retain(|(other, _)| *other != id);
        self.callbacks.len() != len
    }

    pub(crate) fn notify(&mut self, event: GraphEvent) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(&event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl Clone for Observers {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
