use std::fmt::{Debug, Display};

use crate::node::NodeId;

/// Arc weights are strictly positive integers below [`INFINITY`]
pub type Weight = i32;

/// Weight-Value that is reserved to denote "no arc" / "unreachable"
pub const INFINITY: Weight = Weight::MAX;

/// Number of arcs in a graph
pub type NumArcs = u32;

/// Returns *true* if `w` may be stored as the weight of an arc
pub const fn is_valid_weight(w: Weight) -> bool {
    w > 0 && w < INFINITY
}

/// A directed arc from `start` to `end` with a weight attached.
///
/// Arcs are plain values produced by [`arc_list`](crate::ops::GraphArcOrder::arc_list);
/// the graph itself only stores the `(start, end) -> weight` mapping.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arc {
    pub start: NodeId,
    pub end: NodeId,
    pub weight: Weight,
}

impl Arc {
    pub const fn new(start: NodeId, end: NodeId, weight: Weight) -> Self {
        Self { start, end, weight }
    }

    /// Returns the arc with switched endpoints and the same weight
    pub const fn reverse(&self) -> Self {
        Self::new(self.end, self.start, self.weight)
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }

    /// Endpoints as a `(start, end)` tuple
    pub const fn endpoints(&self) -> (NodeId, NodeId) {
        (self.start, self.end)
    }
}

impl Display for Arc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}->{}:{})", self.start, self.end, self.weight)
    }
}

impl Debug for Arc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl From<((NodeId, NodeId), Weight)> for Arc {
    fn from(((start, end), weight): ((NodeId, NodeId), Weight)) -> Self {
        Arc::new(start, end, weight)
    }
}

impl From<(&(NodeId, NodeId), &Weight)> for Arc {
    fn from(((start, end), weight): (&(NodeId, NodeId), &Weight)) -> Self {
        Arc::new(*start, *end, *weight)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn weight_range() {
        assert!(is_valid_weight(1));
        assert!(is_valid_weight(INFINITY - 1));
        assert!(!is_valid_weight(0));
        assert!(!is_valid_weight(-3));
        assert!(!is_valid_weight(INFINITY));
    }

    #[test]
    fn reverse_keeps_weight() {
        let u = NodeId::new(0, 0);
        let v = NodeId::new(1, 0);
        let arc = Arc::new(u, v, 7);

        assert_eq!(arc.reverse(), Arc::new(v, u, 7));
        assert_eq!(arc.reverse().reverse(), arc);
        assert!(!arc.is_loop());
        assert_eq!(format!("{arc}"), "(#0->#1:7)");
    }
}
