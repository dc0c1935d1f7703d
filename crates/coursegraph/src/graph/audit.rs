//! Whole-catalog cycle audit.
//!
//! Traversal reports at most one cycle per query. This module lists every
//! cycle in the snapshot at once, for admin views over already-corrupt
//! data, using petgraph's Tarjan SCC.

use super::DependencyGraph;
use crate::domain::CourseCode;
use petgraph::algo;
use tracing::debug;

/// Every strongly connected component of the `requires` relation that forms a cycle.
///
/// A component counts when it has more than one course or a course that
/// lists itself. Codes within a component are sorted, and components are
/// sorted by their first code, so output is stable across builds.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<CourseCode>> {
    let inner = graph.inner();

    let mut cycles: Vec<Vec<CourseCode>> = algo::tarjan_scc(inner)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => inner.find_edge(*single, *single).is_some(),
            _ => true,
        })
        .map(|component| {
            let mut codes: Vec<CourseCode> =
                component.into_iter().map(|n| graph.code(n).clone()).collect();
            codes.sort();
            codes
        })
        .collect();
    cycles.sort();

    if !cycles.is_empty() {
        debug!(count = cycles.len(), "Catalog audit found prerequisite cycles");
    }
    cycles
}

/// Whether the snapshot contains any prerequisite cycle.
pub fn is_acyclic(graph: &DependencyGraph) -> bool {
    !algo::is_cyclic_directed(graph.inner())
}
