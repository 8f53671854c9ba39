/*!
# Node Representation

Nodes are identified by their (unique) name, but the graph hands out [`NodeId`]s to refer to them.
A `NodeId` is an index into the node arena of a [`Graph`](crate::repr::Graph) together with the
generation of the slot at the time the node was created. Once a node is removed, its slot may be
reused, but the generation is bumped so that old handles never resolve to the new node.
*/

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
};

/// Counter type for degrees and numbers of nodes
pub type NumNodes = u32;

/// Handle to a node stored in a [`Graph`](crate::repr::Graph).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Index of the arena slot this handle points to
    pub const fn index(&self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when the node was created
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.index)
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Placement of a node in the plane. The graph never interprets it.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A named vertex together with its position and cached degrees.
///
/// Degrees are maintained by the owning graph and are always consistent with its arcs.
/// Two nodes are equal iff their names are equal; they are ordered by name.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    position: Position,
    out_degree: NumNodes,
    in_degree: NumNodes,
}

impl Node {
    pub(crate) fn new(name: String, position: Position) -> Self {
        Self {
            name,
            position,
            out_degree: 0,
            in_degree: 0,
        }
    }

    /// Unique name of the node
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of arcs starting at this node
    pub fn out_degree(&self) -> NumNodes {
        self.out_degree
    }

    /// Number of arcs ending at this node
    pub fn in_degree(&self) -> NumNodes {
        self.in_degree
    }

    /// Sum of in- and out-degree
    pub fn total_degree(&self) -> NumNodes {
        self.in_degree + self.out_degree
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn inc_out_degree(&mut self) {
        self.out_degree += 1;
    }

    pub(crate) fn dec_out_degree(&mut self) {
        debug_assert!(self.out_degree > 0);
        self.out_degree -= 1;
    }

    pub(crate) fn inc_in_degree(&mut self) {
        self.in_degree += 1;
    }

    pub(crate) fn dec_in_degree(&mut self) {
        debug_assert!(self.in_degree > 0);
        self.in_degree -= 1;
    }

    pub(crate) fn reset_degrees(&mut self) {
        self.out_degree = 0;
        self.in_degree = 0;
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Default name for the `k`-th node ever added to a graph: a letter cycling through `a..=z`
/// followed by the number of completed cycles, i.e. `a0, b0, ..., z0, a1, ...`
pub fn default_node_name(k: u64) -> String {
    let letter = char::from(b'a' + (k % 26) as u8);
    format!("{letter}{}", k / 26)
}

/// Returns *true* if `name` can be used as a node name: it must be non-empty and must not contain
/// whitespace, as the text format separates tokens by whitespace.
pub fn is_valid_node_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn default_names_cycle_through_alphabet() {
        assert_eq!(default_node_name(0), "a0");
        assert_eq!(default_node_name(2), "c0");
        assert_eq!(default_node_name(25), "z0");
        assert_eq!(default_node_name(26), "a1");
        assert_eq!(default_node_name(27 + 26 * 3), "b4");

        let names = (0..26 * 4).map(default_node_name).collect_vec();
        assert!(names.iter().all_unique());
    }

    #[test]
    fn node_identity_is_the_name() {
        let mut u = Node::new("u".into(), Position::new(1.0, 2.0));
        let v = Node::new("u".into(), Position::default());
        u.inc_out_degree();

        assert_eq!(u, v);
        assert!(Node::new("a".into(), Position::default()) < v);
    }

    #[test]
    fn node_names() {
        assert!(is_valid_node_name("a0"));
        assert!(is_valid_node_name("Köln"));
        assert!(!is_valid_node_name(""));
        assert!(!is_valid_node_name("a b"));
        assert!(!is_valid_node_name("a\tb"));
    }
}
