use std::fmt;
use std::ops::Index;

use serde_json::Value;

use super::error::{GraphError, SolveError};
use super::node::{Node, NodeId};
use super::ranked::Ranked;

/// An arena of [`Node`]s connected by directed transitions.
///
/// Nodes are addressed by the [`NodeId`] returned from [`add_node()`](Self::add_node).
/// The graph may contain cycles; they are reported when solving, not when building.
///
/// # Example
///
/// ```
/// use rulegraph::{Graph, Node};
/// use serde_json::json;
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(Node::new("a"));
/// let b = graph.add_node(Node::new("b").with_rules(json!({"var": ["foo"]})));
/// let c = graph.add_node(Node::new("c"));
/// graph.add_transition(b, c).unwrap();
///
/// let results = graph.solve(&[a, b], &json!({"foo": true})).unwrap();
/// let payloads: Vec<_> = results.iter().map(|r| *r.payload()).collect();
/// assert_eq!(payloads, ["a", "c"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<P> {
    nodes: Vec<Node<P>>,
}

impl<P> Default for Graph<P> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<P> Graph<P> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node and return its id. Any transitions already on the node are
    /// discarded; edges are added with [`add_transition()`](Self::add_transition).
    pub fn add_node(&mut self, mut node: Node<P>) -> NodeId {
        node.transitions.clear();
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Append a transition `from -> to`. Transition order is discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either id is not in this graph.
    pub fn add_transition(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        if !self.contains(to) {
            return Err(GraphError::UnknownNode { id: to });
        }
        let node = self
            .nodes
            .get_mut(from.0)
            .ok_or(GraphError::UnknownNode { id: from })?;
        node.transitions.push(to);
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub(crate) fn push_transition(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from.0].transitions.push(to);
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes.get(id.0)
    }

    /// Mutable access for editing payloads, weights and rules through
    /// [`Node::payload_mut()`], [`Node::set_weight()`], [`Node::set_rules()`] and
    /// [`Node::set_weight_rules()`]. Transitions can only be added through
    /// [`add_transition()`](Self::add_transition).
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<P>> {
        self.nodes.get_mut(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of transitions across all nodes.
    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.nodes.iter().map(|n| n.transitions.len()).sum()
    }

    /// Iterate over all `(id, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<P>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Ids of all nodes without outgoing transitions.
    pub fn terminals(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, n)| n.is_terminal())
            .map(|(id, _)| id)
    }

    /// Solve from `start` with the default [`Solver`](crate::Solver).
    ///
    /// # Errors
    ///
    /// See [`Solver::solve()`](crate::Solver::solve).
    pub fn solve(&self, start: &[NodeId], data: &Value) -> Result<Vec<Ranked<'_, P>>, SolveError> {
        crate::solve(self, start, data)
    }
}

impl<P> Index<NodeId> for Graph<P> {
    type Output = Node<P>;

    /// # Panics
    ///
    /// Panics if `id` is not in this graph.
    fn index(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.0]
    }
}

impl<P> fmt::Display for Graph<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph({} nodes, {} transitions)",
            self.nodes.len(),
            self.transition_count(),
        )
    }
}
