//! DAG validation
//!
//! Cycle detection uses Kahn's algorithm: nodes with no incoming edges are
//! removed one at a time, and any node left over once the queue drains sits
//! on (or behind) a cycle.

use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

use crate::types::{Edge, GraphReport, NodeId, PipelineGraph};

/// Returns true if the edges among `node_ids` form no directed cycle.
///
/// Duplicate identifiers collapse into one node. Edges with a missing
/// endpoint, or an endpoint outside `node_ids`, are ignored. Parallel edges
/// are kept and each one counts toward the target's in-degree.
pub fn is_dag<'a, I>(node_ids: I, edges: &'a [Edge]) -> bool
where
    I: IntoIterator<Item = &'a NodeId>,
{
    let nodes: HashSet<&NodeId> = node_ids.into_iter().collect();
    if nodes.is_empty() {
        return true;
    }

    let mut adjacency: HashMap<&NodeId, Vec<&NodeId>> = HashMap::with_capacity(nodes.len());
    let mut in_degree: HashMap<&NodeId, usize> = nodes.iter().map(|&id| (id, 0)).collect();

    for (source, target) in edges.iter().filter_map(Edge::endpoints) {
        if !nodes.contains(source) || !nodes.contains(target) {
            continue;
        }
        adjacency.entry(source).or_default().push(target);
        *in_degree.entry(target).or_default() += 1;
    }

    let mut queue: VecDeque<&NodeId> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut visited = 0usize;

    while let Some(node) = queue.pop_front() {
        visited += 1;

        let Some(successors) = adjacency.get(node) else {
            continue;
        };
        for &next in successors {
            if let Some(degree) = in_degree.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    visited == nodes.len()
}

/// Summarize a submitted pipeline.
///
/// Counts are taken from the submission as-is: duplicate nodes and
/// dangling or malformed edges are all counted.
pub fn analyze(graph: &PipelineGraph) -> GraphReport {
    GraphReport {
        num_nodes: graph.nodes.len(),
        num_edges: graph.edges.len(),
        is_dag: is_dag(graph.nodes.iter().map(|node| &node.id), &graph.edges),
    }
}

/// Stateless pipeline validator
#[derive(Debug, Clone, Copy, Default)]
pub struct DagValidator;

impl DagValidator {
    /// Create a new validator
    pub fn new() -> Self {
        DagValidator
    }

    /// Analyze a pipeline and log the outcome
    pub fn validate(&self, graph: &PipelineGraph) -> GraphReport {
        let report = analyze(graph);
        debug!(
            num_nodes = report.num_nodes,
            num_edges = report.num_edges,
            is_dag = report.is_dag,
            "Validated pipeline graph"
        );
        report
    }
}
