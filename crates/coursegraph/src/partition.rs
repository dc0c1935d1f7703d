//! Available vs. locked course partition for one student.
//!
//! Eligibility is shallow: a course is available when every **direct**
//! prerequisite is completed. A transitively required course that is not
//! completed already shows up separately as locked, so direct checks match
//! registration eligibility rather than full curriculum completion.

use crate::domain::{Course, CourseCode};
use crate::graph::DependencyGraph;
use crate::graph::traversal::resolve_pathway;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How much of what an available course unlocks to list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockScope {
    /// Do not list unlocks
    #[default]
    None,

    /// Courses that directly require it
    Direct,

    /// Everything it transitively unlocks
    Transitive,
}

/// Options for [`partition_courses`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PartitionOptions {
    /// Unlock listing for available courses
    pub unlocks: UnlockScope,
}

/// A course the student may register for now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableCourse {
    /// Course code
    pub code: CourseCode,

    /// What completing it unlocks (empty unless requested)
    pub unlocks: Vec<CourseCode>,
}

/// A course held back by missing prerequisites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedCourse {
    /// Course code
    pub code: CourseCode,

    /// Direct prerequisites not yet completed, in catalog order
    pub missing: Vec<CourseCode>,
}

/// Three-way classification of the catalog for one student
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Echo of the completed codes supplied
    pub completed: Vec<CourseCode>,

    /// Not completed, every direct prerequisite satisfied
    pub available: Vec<AvailableCourse>,

    /// Not completed, at least one direct prerequisite missing
    pub locked: Vec<LockedCourse>,
}

/// Partition `courses` against `completed`.
///
/// Courses are visited in snapshot order; a duplicated course code is
/// classified once.
pub fn partition_courses(
    graph: &DependencyGraph,
    courses: &[Course],
    completed: &[CourseCode],
    options: PartitionOptions,
) -> Partition {
    let done: HashSet<&CourseCode> = completed.iter().collect();
    let mut classified = HashSet::new();
    let mut partition = Partition {
        completed: completed.to_vec(),
        ..Partition::default()
    };

    for course in courses {
        if done.contains(&course.code) || !classified.insert(&course.code) {
            continue;
        }

        let missing: Vec<CourseCode> = graph
            .requires(&course.code)
            .into_iter()
            .filter(|code| !done.contains(code))
            .cloned()
            .collect();

        if missing.is_empty() {
            partition.available.push(AvailableCourse {
                code: course.code.clone(),
                unlocks: unlocks(graph, &course.code, options.unlocks),
            });
        } else {
            partition.locked.push(LockedCourse {
                code: course.code.clone(),
                missing,
            });
        }
    }

    partition
}

fn unlocks(graph: &DependencyGraph, code: &CourseCode, scope: UnlockScope) -> Vec<CourseCode> {
    match scope {
        UnlockScope::None => Vec::new(),
        UnlockScope::Direct => graph.enables(code).into_iter().cloned().collect(),
        UnlockScope::Transitive => resolve_pathway(graph, code).codes,
    }
}
