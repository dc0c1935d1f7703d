//! Focus subgraph handed to the visualization layer.
//!
//! The node set is the union, over every focus code, of the code itself,
//! its prerequisite chain and its unlock pathway. Links are exactly the
//! prerequisite edges whose endpoints both lie in that set, oriented
//! prerequisite -> dependent.

use super::DependencyGraph;
use super::traversal::{resolve_chain, resolve_pathway};
use crate::domain::CourseCode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Node/link data for one rendered graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    /// Nodes in discovery order: focus codes first, then each focus
    /// course's chain followed by its pathway
    pub nodes: Vec<ViewNode>,

    /// Links in catalog edge order
    pub links: Vec<ViewLink>,
}

/// A course in the rendered graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewNode {
    /// Course code
    pub code: CourseCode,

    /// Whether the caller asked for this course explicitly
    pub is_focus: bool,
}

/// A prerequisite relationship in the rendered graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewLink {
    /// The prerequisite
    pub source_code: CourseCode,

    /// The course requiring it
    pub target_code: CourseCode,
}

/// Build the focus subgraph for `focus_codes`.
///
/// Focus codes absent from the graph are still emitted as isolated focus
/// nodes so the renderer can show what was asked for.
pub fn focus_view(graph: &DependencyGraph, focus_codes: &[CourseCode]) -> GraphView {
    let closures: Vec<_> = focus_codes
        .iter()
        .flat_map(|code| [resolve_chain(graph, code), resolve_pathway(graph, code)])
        .collect();

    let mut seen: HashSet<&CourseCode> = HashSet::new();
    let mut nodes = Vec::new();

    for code in focus_codes {
        if seen.insert(code) {
            nodes.push(ViewNode {
                code: code.clone(),
                is_focus: true,
            });
        }
    }

    for code in closures.iter().flat_map(|closure| &closure.codes) {
        if seen.insert(code) {
            nodes.push(ViewNode {
                code: code.clone(),
                is_focus: false,
            });
        }
    }

    let links = graph
        .edges()
        .filter(|(dependent, prerequisite)| seen.contains(dependent) && seen.contains(prerequisite))
        .map(|(dependent, prerequisite)| ViewLink {
            source_code: prerequisite.clone(),
            target_code: dependent.clone(),
        })
        .collect();

    GraphView { nodes, links }
}
