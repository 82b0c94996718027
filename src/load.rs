use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{Graph, GraphError, Node, NodeId};

/// Nested, tree-shaped node definition, as found in JSON rule files.
///
/// Field names are accepted both in `snake_case` and in `PascalCase`
/// (`Payload`, `Transitions`, `Weight`, `Rules`, `WeightRules`).
///
/// ```json
/// [
///   {"Payload": "a", "Transitions": [{"Payload": "b", "Weight": 10}]},
///   {"Payload": "e", "Rules": {"var": ["is_smoker"]}}
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>"))]
pub struct NodeSpec<P> {
    #[serde(alias = "Payload")]
    pub payload: P,
    #[serde(default, alias = "Transitions")]
    pub transitions: Vec<NodeSpec<P>>,
    #[serde(default, alias = "Weight")]
    pub weight: i64,
    #[serde(default, alias = "Rules")]
    pub rules: Option<Value>,
    #[serde(default, alias = "WeightRules")]
    pub weight_rules: Option<Value>,
}

impl<P> Graph<P> {
    /// Flatten nested node definitions into a new graph, returning it with the
    /// ids of the top-level definitions (the natural start set).
    ///
    /// Every definition becomes its own node, in pre-order; a definition that
    /// appears twice in the tree yields two distinct nodes.
    #[must_use]
    pub fn from_specs(specs: Vec<NodeSpec<P>>) -> (Self, Vec<NodeId>) {
        let mut graph = Graph::new();
        let start = specs.into_iter().map(|spec| graph.insert_spec(spec)).collect();
        (graph, start)
    }

    /// Parse a JSON array of [`NodeSpec`]s and flatten it with
    /// [`from_specs()`](Self::from_specs).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Json`] if the input is not a valid definition list.
    pub fn from_json(input: &str) -> Result<(Self, Vec<NodeId>), GraphError>
    where
        P: DeserializeOwned,
    {
        let specs: Vec<NodeSpec<P>> = serde_json::from_str(input)?;
        Ok(Self::from_specs(specs))
    }

    fn insert_spec(&mut self, spec: NodeSpec<P>) -> NodeId {
        let NodeSpec {
            payload,
            transitions,
            weight,
            rules,
            weight_rules,
        } = spec;
        let id = self.add_node(Node {
            payload,
            transitions: Vec::new(),
            weight,
            rules,
            weight_rules,
        });
        for child in transitions {
            let child_id = self.insert_spec(child);
            self.push_transition(id, child_id);
        }
        id
    }
}
