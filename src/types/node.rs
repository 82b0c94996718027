use std::fmt;

use serde_json::Value;

/// Stable index of a [`Node`] inside a [`Graph`](super::Graph) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Wrap a raw arena index. Ids are normally obtained from
    /// [`Graph::add_node()`](super::Graph::add_node).
    #[must_use]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// The arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex in a rule-gated graph.
///
/// A node with no transitions is *terminal*. A node is reachable when its
/// `rules` expression evaluates to `true`, or unconditionally when it has none.
/// Its ranking weight is `weight`, unless `weight_rules` is set, in which case
/// that expression's numeric result is used instead.
///
/// # Example
///
/// ```
/// use rulegraph::Node;
/// use serde_json::json;
///
/// let node = Node::new("premium")
///     .with_rules(json!({"var": "is_member"}))
///     .with_weight(10);
/// assert!(node.is_terminal());
/// assert_eq!(node.weight(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node<P> {
    pub(crate) payload: P,
    pub(crate) transitions: Vec<NodeId>,
    pub(crate) weight: i64,
    pub(crate) rules: Option<Value>,
    pub(crate) weight_rules: Option<Value>,
}

impl<P> Node<P> {
    /// A terminal, unconditionally reachable node with weight 0.
    #[must_use]
    pub fn new(payload: P) -> Self {
        Self {
            payload,
            transitions: Vec::new(),
            weight: 0,
            rules: None,
            weight_rules: None,
        }
    }

    /// Set the gating rule. `null` or `{}` mean "always reachable".
    #[must_use]
    pub fn with_rules(mut self, rules: Value) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Set the static weight.
    #[must_use]
    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the weight rule, which overrides the static weight when present.
    #[must_use]
    pub fn with_weight_rules(mut self, weight_rules: Value) -> Self {
        self.weight_rules = Some(weight_rules);
        self
    }

    pub fn set_rules(&mut self, rules: Option<Value>) {
        self.rules = rules;
    }

    pub fn set_weight(&mut self, weight: i64) {
        self.weight = weight;
    }

    pub fn set_weight_rules(&mut self, weight_rules: Option<Value>) {
        self.weight_rules = weight_rules;
    }

    #[must_use]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    #[must_use]
    pub fn transitions(&self) -> &[NodeId] {
        &self.transitions
    }

    /// The static weight, before any weight rule is applied.
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// The gating rule, or `None` when the node is unconditionally reachable.
    #[must_use]
    pub fn rules(&self) -> Option<&Value> {
        self.rules.as_ref().filter(|r| !is_blank(r))
    }

    /// The weight rule, or `None` when the static weight applies.
    #[must_use]
    pub fn weight_rules(&self) -> Option<&Value> {
        self.weight_rules.as_ref().filter(|r| !is_blank(r))
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.transitions.is_empty()
    }
}

fn is_blank(rule: &Value) -> bool {
    match rule {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
