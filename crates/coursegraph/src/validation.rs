//! Pre-commit validation of a course's prerequisite list.
//!
//! [`validate_prerequisites`] is called before the catalog store commits an
//! edit (or a new course proposal). It never mutates the graph and never
//! short-circuits: every applicable error and warning is collected. The
//! store may commit only when [`ValidationResult::errors`] is empty;
//! warnings are advisory and may be overridden after confirmation.
//!
//! Checks, in order:
//!
//! 1. Self-reference (error)
//! 2. Unknown prerequisite (warning)
//! 3. Upstream cycle: the candidate's chain already contains the subject (error)
//! 4. Downstream cycle: the subject's pathway already contains the candidate (error)
//! 5. Duplicate candidate codes (warning)
//!
//! Checks 3 and 4 overlap on purpose; both run against the graph as it is
//! before the candidate edges are added.

use crate::domain::CourseCode;
use crate::graph::DependencyGraph;
use crate::graph::traversal::{enables_path, requires_path, resolve_chain, resolve_pathway};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// A problem that must block the save
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// The course lists itself as a prerequisite
    #[error("{course} cannot be a prerequisite of itself")]
    SelfReference {
        /// The subject course
        course: CourseCode,
    },

    /// The prerequisite already (transitively) requires the subject
    #[error("adding {prerequisite} as a prerequisite of {course} creates a cycle: {}", render_path(.path))]
    UpstreamCycle {
        /// The subject course
        course: CourseCode,
        /// The offending candidate prerequisite
        prerequisite: CourseCode,
        /// `course -> prerequisite -> ... -> course`
        path: Vec<CourseCode>,
    },

    /// The subject already (transitively) unlocks the prerequisite
    #[error("{course} already unlocks {prerequisite}, so requiring it creates a cycle: {}", render_path(.path))]
    DownstreamCycle {
        /// The subject course
        course: CourseCode,
        /// The offending candidate prerequisite
        prerequisite: CourseCode,
        /// `course -> prerequisite -> ... -> course`
        path: Vec<CourseCode>,
    },
}

/// An advisory problem the caller may override
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// No course with this code exists in the snapshot (it may be proposed concurrently)
    #[error("prerequisite {code} does not match any course in the catalog")]
    UnknownPrerequisite {
        /// The unmatched code
        code: CourseCode,
    },

    /// The code appears more than once in the candidate list
    #[error("prerequisite {code} is listed {occurrences} times")]
    DuplicatePrerequisite {
        /// The repeated code
        code: CourseCode,
        /// How many times it appears
        occurrences: usize,
    },
}

fn render_path(path: &[CourseCode]) -> String {
    path.iter()
        .map(CourseCode::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Outcome of validating one prerequisite list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Problems that must block the save
    pub errors: Vec<ValidationError>,

    /// Advisory problems
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Whether the change may be committed (warnings allowed)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the change is free of both errors and warnings
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Validate `candidates` as the prerequisite list of `subject`.
///
/// `subject` may be an existing course being edited or a brand-new code
/// that is not yet in the graph.
pub fn validate_prerequisites(
    graph: &DependencyGraph,
    subject: &CourseCode,
    candidates: &[CourseCode],
) -> ValidationResult {
    let mut result = ValidationResult::default();

    let mut seen = HashSet::new();
    let distinct: Vec<&CourseCode> = candidates.iter().filter(|c| seen.insert(*c)).collect();

    if distinct.contains(&subject) {
        result.errors.push(ValidationError::SelfReference {
            course: subject.clone(),
        });
    }

    for &code in &distinct {
        if !graph.is_known(code) {
            result.warnings.push(ValidationWarning::UnknownPrerequisite { code: code.clone() });
        }
    }

    for &prerequisite in distinct.iter().filter(|c| **c != subject) {
        if resolve_chain(graph, prerequisite).contains(subject) {
            let mut path = vec![subject.clone()];
            path.extend(requires_path(graph, prerequisite, subject).unwrap_or_default());
            result.errors.push(ValidationError::UpstreamCycle {
                course: subject.clone(),
                prerequisite: prerequisite.clone(),
                path,
            });
        }
    }

    let pathway = resolve_pathway(graph, subject);
    for &prerequisite in distinct.iter().filter(|c| **c != subject) {
        if pathway.contains(prerequisite) {
            let mut path = vec![subject.clone()];
            let mut downstream = enables_path(graph, subject, prerequisite).unwrap_or_default();
            downstream.reverse();
            path.extend(downstream);
            result.errors.push(ValidationError::DownstreamCycle {
                course: subject.clone(),
                prerequisite: prerequisite.clone(),
                path,
            });
        }
    }

    for &code in &distinct {
        let occurrences = candidates.iter().filter(|c| *c == code).count();
        if occurrences > 1 {
            result.warnings.push(ValidationWarning::DuplicatePrerequisite {
                code: code.clone(),
                occurrences,
            });
        }
    }

    debug!(
        course = %subject,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validated prerequisite list"
    );
    result
}
