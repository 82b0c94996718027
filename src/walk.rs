use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::{trace, warn};

use crate::gate::gate;
use crate::{Graph, Logic, Node, NodeId, SolveError};

/// Outcome of a frontier walk.
#[derive(Debug)]
pub(crate) struct Walk {
    /// Terminal, gate-passing nodes in discovery order.
    pub(crate) found: Vec<NodeId>,
    pub(crate) rounds: usize,
    pub(crate) truncated: bool,
    pub(crate) gated: usize,
}

struct Entry {
    id: NodeId,
    ancestors: HashSet<NodeId>,
}

/// Ordered frontier with one slot per node. A node reached again in the same
/// round keeps its first slot and absorbs the new path's ancestors.
#[derive(Default)]
struct Frontier {
    entries: Vec<Entry>,
    slots: HashMap<NodeId, usize>,
}

impl Frontier {
    fn push(&mut self, id: NodeId, ancestors: HashSet<NodeId>) {
        match self.slots.get(&id) {
            Some(&slot) => self.entries[slot].ancestors.extend(ancestors),
            None => {
                self.slots.insert(id, self.entries.len());
                self.entries.push(Entry { id, ancestors });
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-call memo of gate results. Gating is a pure function of the node's own
/// rule and the data, so each node is evaluated at most once.
struct Gates<'a, L> {
    logic: &'a L,
    data: &'a Value,
    results: Vec<Option<bool>>,
}

impl<'a, L: Logic> Gates<'a, L> {
    fn new(logic: &'a L, data: &'a Value, len: usize) -> Self {
        Self {
            logic,
            data,
            results: vec![None; len],
        }
    }

    fn passes<P>(&mut self, id: NodeId, node: &Node<P>) -> Result<bool, SolveError> {
        if let Some(passed) = self.results[id.0] {
            return Ok(passed);
        }
        let passed = gate(self.logic, node.rules(), self.data)?;
        trace!(node = %id, passed, "gated node");
        self.results[id.0] = Some(passed);
        Ok(passed)
    }

    fn evaluated(&self) -> usize {
        self.results.iter().filter(|r| r.is_some()).count()
    }
}

/// Expand the frontier one edge at a time until it holds only terminal nodes.
///
/// Start nodes and children are gated as they are discovered; a node that fails
/// its gate is dropped together with everything only reachable through it.
/// Terminal nodes that pass are collected once, in discovery order.
///
/// A child that is already an ancestor of the node being expanded fails the
/// walk with [`SolveError::CycleDetected`]. Independently, at most
/// `max_rounds` expansions are performed; if the cap is reached while a
/// non-terminal node still has a gate-passing child, the walk is marked
/// truncated and stops with what it has collected. Gate errors on those
/// children still abort the walk.
pub(crate) fn walk<P, L: Logic>(
    graph: &Graph<P>,
    start: &[NodeId],
    data: &Value,
    logic: &L,
    max_rounds: usize,
) -> Result<Walk, SolveError> {
    let mut gates = Gates::new(logic, data, graph.len());
    let mut frontier = Frontier::default();

    for &id in start {
        let node = graph.node(id).ok_or(SolveError::UnknownNode { id })?;
        if gates.passes(id, node)? {
            frontier.push(id, HashSet::new());
        }
    }

    let mut found = Vec::new();
    let mut collected = HashSet::new();
    let mut rounds = 0;
    let mut truncated = false;

    while !frontier.is_empty() {
        trace!(round = rounds, frontier = frontier.len(), "expanding frontier");
        let mut next = Frontier::default();

        for entry in frontier.entries {
            let node = &graph[entry.id];
            if node.is_terminal() {
                if collected.insert(entry.id) {
                    found.push(entry.id);
                }
                continue;
            }
            if rounds == max_rounds {
                // Only a child that would have been entered makes the cap lossy.
                for &child in node.transitions() {
                    if gates.passes(child, &graph[child])? {
                        truncated = true;
                        break;
                    }
                }
                continue;
            }
            for &child in node.transitions() {
                if !gates.passes(child, &graph[child])? {
                    continue;
                }
                if child == entry.id || entry.ancestors.contains(&child) {
                    return Err(SolveError::CycleDetected { node: child });
                }
                let mut ancestors = entry.ancestors.clone();
                ancestors.insert(entry.id);
                next.push(child, ancestors);
            }
        }

        if truncated {
            warn!(
                max_rounds,
                collected = found.len(),
                "round cap reached before the frontier settled; returning partial walk"
            );
            break;
        }
        if !next.is_empty() {
            rounds += 1;
        }
        frontier = next;
    }

    Ok(Walk {
        found,
        rounds,
        truncated,
        gated: gates.evaluated(),
    })
}
