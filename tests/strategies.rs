use std::collections::BTreeSet;

use proptest::prelude::*;
use rulegraph::{Graph, Node, NodeId};
use serde_json::{json, Value};

// --- Fixed data schema ---
// flags.a : bool
// flags.b : bool
// level   : i64 (0..=10)

/// Generated data context matching the fixed schema.
#[derive(Debug, Clone, Copy)]
pub struct GenData {
    pub a: bool,
    pub b: bool,
    pub level: i64,
}

impl GenData {
    #[must_use]
    pub fn to_json(self) -> Value {
        json!({"flags": {"a": self.a, "b": self.b}, "level": self.level})
    }
}

pub fn arb_data() -> impl Strategy<Value = GenData> {
    (any::<bool>(), any::<bool>(), 0_i64..=10).prop_map(|(a, b, level)| GenData { a, b, level })
}

/// A gating rule drawn from a small vocabulary with a known truth table.
#[derive(Debug, Clone)]
pub enum GenRule {
    Const(bool),
    Flag(&'static str),
    NotFlag(&'static str),
    LevelBelow(i64),
    And(Box<GenRule>, Box<GenRule>),
    Or(Box<GenRule>, Box<GenRule>),
}

impl GenRule {
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            GenRule::Const(b) => json!(b),
            GenRule::Flag(name) => json!({"var": format!("flags.{name}")}),
            GenRule::NotFlag(name) => json!({"!": {"var": format!("flags.{name}")}}),
            GenRule::LevelBelow(n) => json!({"<": [{"var": "level"}, n]}),
            GenRule::And(a, b) => json!({"and": [a.to_json(), b.to_json()]}),
            GenRule::Or(a, b) => json!({"or": [a.to_json(), b.to_json()]}),
        }
    }

    /// Reference evaluation, independent of the crate's evaluator.
    #[must_use]
    pub fn holds(&self, data: GenData) -> bool {
        let flag = |name: &str| if name == "a" { data.a } else { data.b };
        match self {
            GenRule::Const(b) => *b,
            GenRule::Flag(name) => flag(name),
            GenRule::NotFlag(name) => !flag(name),
            GenRule::LevelBelow(n) => data.level < *n,
            GenRule::And(a, b) => a.holds(data) && b.holds(data),
            GenRule::Or(a, b) => a.holds(data) || b.holds(data),
        }
    }
}

fn arb_rule() -> impl Strategy<Value = GenRule> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(GenRule::Const),
        prop::sample::select(&["a", "b"][..]).prop_map(GenRule::Flag),
        prop::sample::select(&["a", "b"][..]).prop_map(GenRule::NotFlag),
        (0_i64..=10).prop_map(GenRule::LevelBelow),
    ];
    leaf.prop_recursive(2, 8, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| GenRule::And(Box::new(a), Box::new(b))),
            (inner.clone(), inner).prop_map(|(a, b)| GenRule::Or(Box::new(a), Box::new(b))),
        ]
    })
}

/// A generated node. `children` only point at higher indices, so every
/// generated graph is acyclic.
#[derive(Debug, Clone)]
pub struct GenNode {
    pub weight: i64,
    pub rule: Option<GenRule>,
    pub children: Vec<usize>,
}

/// A complete generated graph plus its start set.
#[derive(Debug, Clone)]
pub struct GenGraph {
    pub nodes: Vec<GenNode>,
    pub start: Vec<usize>,
}

impl GenGraph {
    /// Build the actual graph. Node `i` gets payload `i`.
    ///
    /// # Panics
    ///
    /// Panics if a generated transition is invalid (should not happen with
    /// valid generators).
    #[must_use]
    pub fn build(&self) -> (Graph<usize>, Vec<NodeId>) {
        self.build_with(|_, node| node)
    }

    /// Build with a hook that can decorate each node before insertion.
    #[must_use]
    pub fn build_with(
        &self,
        mut decorate: impl FnMut(usize, Node<usize>) -> Node<usize>,
    ) -> (Graph<usize>, Vec<NodeId>) {
        let mut graph = Graph::with_capacity(self.nodes.len());
        let ids: Vec<NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, gen)| {
                let mut node = Node::new(i).with_weight(gen.weight);
                if let Some(rule) = &gen.rule {
                    node = node.with_rules(rule.to_json());
                }
                graph.add_node(decorate(i, node))
            })
            .collect();
        for (i, gen) in self.nodes.iter().enumerate() {
            for &child in &gen.children {
                graph
                    .add_transition(ids[i], ids[child])
                    .expect("generated transition should be valid");
            }
        }
        let start = self.start.iter().map(|&i| ids[i]).collect();
        (graph, start)
    }

    /// Same graph with every gating rule removed.
    #[must_use]
    pub fn without_rules(&self) -> GenGraph {
        let mut stripped = self.clone();
        for node in &mut stripped.nodes {
            node.rule = None;
        }
        stripped
    }

    fn passes(&self, i: usize, data: GenData) -> bool {
        self.nodes[i].rule.as_ref().map_or(true, |r| r.holds(data))
    }

    /// Reference reachability: terminal nodes reachable from the start set
    /// through gate-passing nodes only.
    #[must_use]
    pub fn reachable_terminals(&self, data: GenData) -> BTreeSet<usize> {
        let mut seen = BTreeSet::new();
        let mut out = BTreeSet::new();
        let mut stack: Vec<usize> = self
            .start
            .iter()
            .copied()
            .filter(|&i| self.passes(i, data))
            .collect();
        while let Some(i) = stack.pop() {
            if !seen.insert(i) {
                continue;
            }
            let node = &self.nodes[i];
            if node.children.is_empty() {
                out.insert(i);
            }
            stack.extend(node.children.iter().copied().filter(|&c| self.passes(c, data)));
        }
        out
    }
}

fn arb_node(index: usize, len: usize) -> BoxedStrategy<GenNode> {
    let children = if index + 1 < len {
        prop::collection::vec(index + 1..len, 0..=3).boxed()
    } else {
        Just(Vec::new()).boxed()
    };
    (-5_i64..=5, prop::option::weighted(0.4, arb_rule()), children)
        .prop_map(|(weight, rule, children)| GenNode {
            weight,
            rule,
            children,
        })
        .boxed()
}

/// Generate an acyclic graph with 1..=10 nodes and 1..=3 start nodes.
pub fn arb_dag() -> impl Strategy<Value = GenGraph> {
    (1_usize..=10).prop_flat_map(|len| {
        let nodes: Vec<BoxedStrategy<GenNode>> = (0..len).map(|i| arb_node(i, len)).collect();
        (nodes, prop::collection::vec(0..len, 1..=3))
            .prop_map(|(nodes, start)| GenGraph { nodes, start })
    })
}

// --- Graphs with back edges ---

/// A node whose children may point anywhere, itself included.
#[derive(Debug, Clone)]
pub struct LoopyNode {
    pub weight: i64,
    pub open: Option<bool>,
    pub children: Vec<usize>,
}

/// A graph that may contain cycles, gated by constant rules.
#[derive(Debug, Clone)]
pub struct LoopyGraph {
    pub nodes: Vec<LoopyNode>,
    pub start: Vec<usize>,
}

impl LoopyGraph {
    /// Build the actual graph. Node `i` gets payload `i`.
    ///
    /// # Panics
    ///
    /// Panics if a generated transition is invalid (should not happen with
    /// valid generators).
    #[must_use]
    pub fn build(&self) -> (Graph<usize>, Vec<NodeId>) {
        self.build_with(|_, node| node)
    }

    /// Build with a hook that can decorate each node before insertion.
    #[must_use]
    pub fn build_with(
        &self,
        mut decorate: impl FnMut(usize, Node<usize>) -> Node<usize>,
    ) -> (Graph<usize>, Vec<NodeId>) {
        let mut graph = Graph::with_capacity(self.nodes.len());
        let ids: Vec<NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, gen)| {
                let mut node = Node::new(i).with_weight(gen.weight);
                if let Some(open) = gen.open {
                    node = node.with_rules(json!(open));
                }
                graph.add_node(decorate(i, node))
            })
            .collect();
        for (i, gen) in self.nodes.iter().enumerate() {
            for &child in &gen.children {
                graph
                    .add_transition(ids[i], ids[child])
                    .expect("generated transition should be valid");
            }
        }
        let start = self.start.iter().map(|&i| ids[i]).collect();
        (graph, start)
    }

    fn passes(&self, i: usize) -> bool {
        self.nodes[i].open.unwrap_or(true)
    }

    fn passing_starts(&self) -> Vec<usize> {
        self.start.iter().copied().filter(|&i| self.passes(i)).collect()
    }

    /// Reference cycle check: does the subgraph of gate-passing nodes
    /// reachable from the start set contain a cycle?
    #[must_use]
    pub fn has_reachable_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        fn visit(graph: &LoopyGraph, i: usize, marks: &mut [Mark]) -> bool {
            marks[i] = Mark::Active;
            for &child in &graph.nodes[i].children {
                if !graph.passes(child) {
                    continue;
                }
                let mark = marks[child];
                match mark {
                    Mark::Active => return true,
                    Mark::New if visit(graph, child, marks) => return true,
                    _ => {}
                }
            }
            marks[i] = Mark::Done;
            false
        }

        let mut marks = vec![Mark::New; self.nodes.len()];
        self.passing_starts()
            .into_iter()
            .any(|i| marks[i] == Mark::New && visit(self, i, &mut marks))
    }

    /// Reference reachability over gate-passing nodes, as in
    /// [`GenGraph::reachable_terminals`].
    #[must_use]
    pub fn reachable_terminals(&self) -> BTreeSet<usize> {
        let mut seen = BTreeSet::new();
        let mut out = BTreeSet::new();
        let mut stack = self.passing_starts();
        while let Some(i) = stack.pop() {
            if !seen.insert(i) {
                continue;
            }
            let node = &self.nodes[i];
            if node.children.is_empty() {
                out.insert(i);
            }
            stack.extend(node.children.iter().copied().filter(|&c| self.passes(c)));
        }
        out
    }
}

/// Generate a graph of 1..=7 nodes with arbitrary edges (self-loops and back
/// edges included) and 1..=3 start nodes.
pub fn arb_loopy_graph() -> impl Strategy<Value = LoopyGraph> {
    (1_usize..=7).prop_flat_map(|len| {
        let node = (
            -5_i64..=5,
            prop::option::weighted(0.4, prop::bool::weighted(0.7)),
            prop::collection::vec(0..len, 0..=2),
        )
            .prop_map(|(weight, open, children)| LoopyNode {
                weight,
                open,
                children,
            });
        (
            prop::collection::vec(node, len),
            prop::collection::vec(0..len, 1..=3),
        )
            .prop_map(|(nodes, start)| LoopyGraph { nodes, start })
    })
}

// --- Unconstrained rules ---

const OPERATORS: &[&str] = &[
    "var", "missing", "if", "and", "or", "==", "!", "!!", "<", ">=", "+", "-", "*", "/", "%",
    "min", "in", "cat", "merge", "nope",
];

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-100_i64..100).prop_map(Value::from),
        (-1e3_f64..1e3).prop_map(Value::from),
        "[a-c.]{0,4}".prop_map(Value::String),
    ]
}

/// Arbitrary rule trees: well-formed or not, boolean or not.
pub fn arb_wild_rule() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            (
                prop::sample::select(OPERATORS),
                prop::collection::vec(inner, 0..3),
            )
                .prop_map(|(op, args)| json!({ op: args })),
        ]
    })
}

/// Arbitrary data objects over the keys `a`, `b` and `c`.
pub fn arb_wild_data() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-c]", arb_scalar()), 0..3)
        .prop_map(|pairs| Value::Object(pairs.into_iter().collect()))
}
