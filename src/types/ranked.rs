use std::fmt;

use super::node::{Node, NodeId};

/// A reachable terminal node paired with its resolved weight.
///
/// Borrowed from the solved [`Graph`](super::Graph); the graph itself is never
/// modified by solving.
#[must_use]
pub struct Ranked<'g, P> {
    id: NodeId,
    node: &'g Node<P>,
    weight: i64,
}

impl<'g, P> Ranked<'g, P> {
    pub(crate) fn new(id: NodeId, node: &'g Node<P>, weight: i64) -> Self {
        Self { id, node, weight }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn node(&self) -> &'g Node<P> {
        self.node
    }

    #[must_use]
    pub fn payload(&self) -> &'g P {
        &self.node.payload
    }

    /// The resolved weight: the weight rule's result if the node has one,
    /// otherwise its static weight.
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.weight
    }
}

impl<P> Clone for Ranked<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Ranked<'_, P> {}

impl<P: fmt::Debug> fmt::Debug for Ranked<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ranked")
            .field("id", &self.id)
            .field("payload", &self.node.payload)
            .field("weight", &self.weight)
            .finish()
    }
}

impl<P> PartialEq for Ranked<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.weight == other.weight && std::ptr::eq(self.node, other.node)
    }
}

impl<P> fmt::Display for Ranked<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.id, self.weight)
    }
}
