//! Transitive traversal of the prerequisite graph.
//!
//! [`resolve_chain`] follows `requires` edges (everything a course needs),
//! [`resolve_pathway`] follows `enables` edges (everything a course
//! unlocks). Both share one depth-first walk with path-local cycle
//! detection:
//!
//! - A code already on the **current path** closes a cycle. The walk records
//!   it and abandons that branch; it does not fail.
//! - A code already **discovered** on a sibling branch is not expanded again,
//!   so diamond-shaped catalogs stay linear instead of exponential.
//!
//! The walk uses an explicit stack, so pathological depth cannot exhaust the
//! call stack.

use super::DependencyGraph;
use crate::domain::CourseCode;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::trace;

/// Transitive closure of a course over one edge direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closure {
    /// Course the traversal started from
    pub start: CourseCode,

    /// Every distinct code reached, in first-discovered order.
    ///
    /// The start code itself is never listed.
    pub codes: Vec<CourseCode>,

    /// Whether the walk ran into a code already on its current path
    pub has_cycle: bool,

    /// The first code at which a cycle was detected
    pub cycle_node: Option<CourseCode>,
}

/// Transitive prerequisites of a course.
pub type Chain = Closure;

/// Courses transitively unlocked by a course.
pub type Pathway = Closure;

impl Closure {
    fn empty(start: &CourseCode) -> Self {
        Self {
            start: start.clone(),
            codes: Vec::new(),
            has_cycle: false,
            cycle_node: None,
        }
    }

    /// Whether `code` was reached
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.codes.contains(code)
    }

    /// Number of codes reached
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether nothing was reached
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Full prerequisite chain of `start`.
///
/// Returns an empty, non-cyclic chain when `start` is not in the graph.
pub fn resolve_chain(graph: &DependencyGraph, start: &CourseCode) -> Chain {
    depth_first(graph, start, Direction::Outgoing)
}

/// Everything `start` transitively unlocks.
///
/// Returns an empty, non-cyclic pathway when `start` is not in the graph.
pub fn resolve_pathway(graph: &DependencyGraph, start: &CourseCode) -> Pathway {
    depth_first(graph, start, Direction::Incoming)
}

struct Frame {
    node: NodeIndex,
    children: std::vec::IntoIter<NodeIndex>,
}

fn depth_first(graph: &DependencyGraph, start: &CourseCode, direction: Direction) -> Closure {
    let Some(start_node) = graph.node(start) else {
        return Closure::empty(start);
    };

    let mut discovered = HashSet::from([start_node]);
    let mut on_path = HashSet::from([start_node]);
    let mut order = Vec::new();
    let mut cycle_node = None;
    let mut stack = vec![Frame {
        node: start_node,
        children: graph.neighbors(start_node, direction).into_iter(),
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(next) = frame.children.next() else {
            on_path.remove(&frame.node);
            stack.pop();
            continue;
        };

        if on_path.contains(&next) {
            trace!(start = %start, at = %graph.code(next), "Cycle detected during traversal");
            cycle_node.get_or_insert(next);
            continue;
        }
        if !discovered.insert(next) {
            continue;
        }

        order.push(next);
        on_path.insert(next);
        stack.push(Frame {
            node: next,
            children: graph.neighbors(next, direction).into_iter(),
        });
    }

    Closure {
        start: start.clone(),
        codes: order.into_iter().map(|n| graph.code(n).clone()).collect(),
        has_cycle: cycle_node.is_some(),
        cycle_node: cycle_node.map(|n| graph.code(n).clone()),
    }
}

/// Shortest path from `from` to `to` following `requires` edges.
///
/// The returned path includes both endpoints. `None` when either code is
/// absent or `to` is unreachable.
pub fn requires_path(
    graph: &DependencyGraph,
    from: &CourseCode,
    to: &CourseCode,
) -> Option<Vec<CourseCode>> {
    shortest_path(graph, from, to, Direction::Outgoing)
}

/// Shortest path from `from` to `to` following `enables` edges.
pub fn enables_path(
    graph: &DependencyGraph,
    from: &CourseCode,
    to: &CourseCode,
) -> Option<Vec<CourseCode>> {
    shortest_path(graph, from, to, Direction::Incoming)
}

fn shortest_path(
    graph: &DependencyGraph,
    from: &CourseCode,
    to: &CourseCode,
    direction: Direction,
) -> Option<Vec<CourseCode>> {
    let source = graph.node(from)?;
    let target = graph.node(to)?;

    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut visited = HashSet::from([source]);
    let mut queue = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        if current == target {
            let mut path = vec![graph.code(current).clone()];
            let mut node = current;
            while let Some(&prev) = parent.get(&node) {
                path.push(graph.code(prev).clone());
                node = prev;
            }
            path.reverse();
            return Some(path);
        }

        for next in graph.neighbors(current, direction) {
            if visited.insert(next) {
                parent.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}
