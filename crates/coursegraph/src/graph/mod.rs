//! Dependency graph over a course snapshot, using petgraph.
//!
//! # Edge Direction Convention
//!
//! Edges point from **dependent -> prerequisite**: if `CSI-340` requires
//! `CSI-240`, the edge is `CSI-340 -> CSI-240`. The two adjacency views of
//! the same edge set are therefore:
//!
//! - `requires(code)`: outgoing edges (forward view)
//! - `enables(code)`: incoming edges (reverse view)
//!
//! Edge weights carry the insertion sequence so both views list neighbors in
//! catalog order, independent of petgraph's internal edge list order.
//!
//! # Dangling References
//!
//! A prerequisite code that matches no course still becomes a node and an
//! edge, so traversal and cycle detection see it. It is also recorded in
//! [`DependencyGraph::unknown_codes`] for callers that want to warn.
//!
//! # Cycles
//!
//! The graph does not forbid cycles. Cyclic input is represented as-is so
//! that it can be reported; rejection happens in [`crate::validation`].

pub mod audit;
pub mod traversal;
pub mod view;

use crate::domain::{Course, CourseCode};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

pub use traversal::{Chain, Closure, Pathway, resolve_chain, resolve_pathway};
pub use view::{GraphView, ViewLink, ViewNode, focus_view};

/// Prerequisite graph built from one course snapshot.
///
/// Built once per query (or per request) and read-only afterwards. Any
/// change to the underlying course list requires a fresh [`build`].
///
/// [`build`]: DependencyGraph::build
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Nodes are course codes, edge weights are insertion sequence numbers.
    /// Edge direction: source (dependent) -> target (prerequisite).
    graph: DiGraph<CourseCode, usize>,

    /// Mapping from course code to graph node, including dangling codes.
    node_map: HashMap<CourseCode, NodeIndex>,

    /// Codes of courses present in the snapshot.
    known: HashSet<CourseCode>,

    /// Dangling prerequisite code -> courses referencing it, in catalog order.
    unknown_codes: BTreeMap<CourseCode, Vec<CourseCode>>,
}

impl DependencyGraph {
    /// Build the graph from a flat course list in O(V + E).
    ///
    /// Never fails. Duplicate course codes keep the first record (a warning
    /// is logged); a prerequisite listed twice by the same course yields a
    /// single edge.
    pub fn build(courses: &[Course]) -> Self {
        let mut this = Self::default();

        // First pass registers every course so forward references resolve.
        let mut accepted = Vec::with_capacity(courses.len());
        for course in courses {
            if this.known.contains(&course.code) {
                warn!(code = %course.code, "Duplicate course code in snapshot, keeping first record");
                continue;
            }
            this.known.insert(course.code.clone());
            this.node_or_insert(&course.code);
            accepted.push(course);
        }

        let mut sequence = 0usize;
        for course in accepted {
            let dependent = this.node_map[&course.code];
            for prerequisite in &course.prerequisite_codes {
                let target = this.node_or_insert(prerequisite);

                if !this.known.contains(prerequisite) {
                    let referrers = this.unknown_codes.entry(prerequisite.clone()).or_default();
                    if !referrers.contains(&course.code) {
                        referrers.push(course.code.clone());
                    }
                }

                if this.graph.find_edge(dependent, target).is_none() {
                    this.graph.add_edge(dependent, target, sequence);
                    sequence += 1;
                }
            }
        }

        if !this.unknown_codes.is_empty() {
            warn!(
                count = this.unknown_codes.len(),
                "Snapshot references prerequisite codes with no matching course"
            );
        }
        debug!(
            courses = this.known.len(),
            nodes = this.graph.node_count(),
            edges = this.graph.edge_count(),
            "Built dependency graph"
        );

        this
    }

    fn node_or_insert(&mut self, code: &CourseCode) -> NodeIndex {
        if let Some(&node) = self.node_map.get(code) {
            return node;
        }
        let node = self.graph.add_node(code.clone());
        self.node_map.insert(code.clone(), node);
        node
    }

    /// Whether the code is a node of the graph (known course or dangling reference).
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.node_map.contains_key(code)
    }

    /// Whether the code belongs to a course in the snapshot.
    pub fn is_known(&self, code: &CourseCode) -> bool {
        self.known.contains(code)
    }

    /// Number of courses in the snapshot (dangling codes excluded).
    pub fn course_count(&self) -> usize {
        self.known.len()
    }

    /// Number of distinct prerequisite edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct prerequisites of `code`, in catalog order.
    pub fn requires(&self, code: &CourseCode) -> Vec<&CourseCode> {
        self.adjacent(code, Direction::Outgoing)
    }

    /// Courses that directly require `code`, in catalog order.
    pub fn enables(&self, code: &CourseCode) -> Vec<&CourseCode> {
        self.adjacent(code, Direction::Incoming)
    }

    /// Dangling prerequisite codes mapped to the courses that reference them.
    pub fn unknown_codes(&self) -> &BTreeMap<CourseCode, Vec<CourseCode>> {
        &self.unknown_codes
    }

    /// All `(dependent, prerequisite)` edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&CourseCode, &CourseCode)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    fn adjacent(&self, code: &CourseCode, direction: Direction) -> Vec<&CourseCode> {
        self.node(code)
            .map(|node| {
                self.neighbors(node, direction)
                    .into_iter()
                    .map(|n| &self.graph[n])
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn node(&self, code: &CourseCode) -> Option<NodeIndex> {
        self.node_map.get(code).copied()
    }

    pub(crate) fn code(&self, node: NodeIndex) -> &CourseCode {
        &self.graph[node]
    }

    pub(crate) fn inner(&self) -> &DiGraph<CourseCode, usize> {
        &self.graph
    }

    /// Neighbors of `node` ordered by edge insertion sequence.
    pub(crate) fn neighbors(&self, node: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(node, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (*edge.weight(), other)
            })
            .collect();
        edges.sort_unstable_by_key(|(sequence, _)| *sequence);
        edges.into_iter().map(|(_, other)| other).collect()
    }
}
