use std::time::Instant;

use serde_json::Value;
use tracing::debug;

use crate::gate::resolve_weight;
use crate::walk::walk;
use crate::{Graph, JsonLogic, Logic, NodeId, Ranked, SolveError, SolveReport};

/// Default cap on frontier expansions per solve.
pub const DEFAULT_MAX_ROUNDS: usize = 10;

/// Configured solver: a rule evaluator plus the round cap.
///
/// A `Solver` holds no per-call state and can be shared across threads
/// whenever its evaluator can.
///
/// # Example
///
/// ```
/// use rulegraph::{Graph, Node, Solver};
/// use serde_json::json;
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(Node::new("a"));
/// let b = graph.add_node(Node::new("b").with_weight_rules(json!({"if": [{"var": "is_smoker"}, 100, 50]})));
/// let c = graph.add_node(Node::new("c").with_weight(75));
/// graph.add_transition(a, b).unwrap();
/// graph.add_transition(a, c).unwrap();
///
/// let solver = Solver::new().max_rounds(32);
/// let results = solver.solve(&graph, &[a], &json!({"is_smoker": false})).unwrap();
/// let ranked: Vec<_> = results.iter().map(|r| (*r.payload(), r.weight())).collect();
/// assert_eq!(ranked, [("c", 75), ("b", 50)]);
/// ```
#[derive(Debug, Clone)]
pub struct Solver<L = JsonLogic> {
    logic: L,
    max_rounds: usize,
}

impl Solver<JsonLogic> {
    /// A solver using the bundled [`JsonLogic`] evaluator and
    /// [`DEFAULT_MAX_ROUNDS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_logic(JsonLogic)
    }
}

impl Default for Solver<JsonLogic> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Logic> Solver<L> {
    /// A solver using a custom rule evaluator.
    #[must_use]
    pub fn with_logic(logic: L) -> Self {
        Self {
            logic,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Cap the number of frontier expansions. Values below 1 are raised to 1.
    #[must_use]
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    #[must_use]
    pub fn logic(&self) -> &L {
        &self.logic
    }

    /// Return the terminal nodes reachable from `start` under `data`, ordered
    /// by descending weight; equal weights keep discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] on the first failure: a start id outside the
    /// graph, a cycle, or a gating or weight rule that fails to evaluate or
    /// returns the wrong type. No partial results are returned.
    pub fn solve<'g, P>(
        &self,
        graph: &'g Graph<P>,
        start: &[NodeId],
        data: &Value,
    ) -> Result<Vec<Ranked<'g, P>>, SolveError> {
        self.solve_detailed(graph, start, data)
            .map(SolveReport::into_results)
    }

    /// Like [`solve()`](Self::solve), returning a [`SolveReport`] with walk
    /// statistics and timing.
    ///
    /// # Errors
    ///
    /// Same as [`solve()`](Self::solve).
    pub fn solve_detailed<'g, P>(
        &self,
        graph: &'g Graph<P>,
        start: &[NodeId],
        data: &Value,
    ) -> Result<SolveReport<'g, P>, SolveError> {
        let started = Instant::now();
        debug!(nodes = graph.len(), start = start.len(), "solving graph");

        let walked = walk(graph, start, data, &self.logic, self.max_rounds)?;

        let mut ranked = Vec::with_capacity(walked.found.len());
        for id in walked.found {
            let node = &graph[id];
            let weight = resolve_weight(&self.logic, node.weight(), node.weight_rules(), data)?;
            ranked.push(Ranked::new(id, node, weight));
        }
        rank(&mut ranked);

        debug!(
            results = ranked.len(),
            rounds = walked.rounds,
            truncated = walked.truncated,
            "solved graph"
        );
        Ok(SolveReport::new(
            ranked,
            walked.rounds,
            walked.truncated,
            walked.gated,
            started.elapsed(),
        ))
    }
}

/// Stable sort by descending weight.
pub(crate) fn rank<P>(ranked: &mut [Ranked<'_, P>]) {
    ranked.sort_by(|a, b| b.weight().cmp(&a.weight()));
}

/// Solve with the default [`Solver`].
///
/// # Errors
///
/// See [`Solver::solve()`].
pub fn solve<'g, P>(
    graph: &'g Graph<P>,
    start: &[NodeId],
    data: &Value,
) -> Result<Vec<Ranked<'g, P>>, SolveError> {
    Solver::new().solve(graph, start, data)
}
