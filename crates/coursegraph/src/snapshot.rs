//! Per-request view over one course snapshot.
//!
//! A [`CatalogSnapshot`] builds the dependency graph once and answers any
//! number of queries against it, e.g. chain + pathway + partition for a
//! single "course details" page. It borrows the course slice read-only;
//! any change to the catalog needs a new snapshot.

use crate::config::EngineConfig;
use crate::domain::{Course, CourseCode, CourseId};
use crate::error::Result;
use crate::graph::audit::find_cycles;
use crate::graph::{Chain, DependencyGraph, GraphView, Pathway, focus_view};
use crate::graph::{resolve_chain, resolve_pathway};
use crate::partition::{Partition, PartitionOptions, partition_courses};
use crate::schedule::{ConflictReport, CreditPolicy, check_schedule};
use crate::validation::{ValidationResult, validate_prerequisites};
use std::collections::BTreeMap;

/// Course snapshot with its built dependency graph
#[derive(Debug, Clone)]
pub struct CatalogSnapshot<'a> {
    courses: &'a [Course],
    graph: DependencyGraph,
    credit_policy: CreditPolicy,
    partition_options: PartitionOptions,
}

impl<'a> CatalogSnapshot<'a> {
    /// Build a snapshot with default configuration
    pub fn new(courses: &'a [Course]) -> Self {
        Self::with_config(courses, &EngineConfig::default())
    }

    /// Build a snapshot using the thresholds and options from `config`
    pub fn with_config(courses: &'a [Course], config: &EngineConfig) -> Self {
        Self {
            courses,
            graph: DependencyGraph::build(courses),
            credit_policy: config.credit_policy,
            partition_options: config.partition,
        }
    }

    /// The courses this snapshot was built from
    pub fn courses(&self) -> &'a [Course] {
        self.courses
    }

    /// The built dependency graph
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Look up a course by code
    pub fn course(&self, code: &CourseCode) -> Option<&'a Course> {
        self.courses.iter().find(|c| &c.code == code)
    }

    /// Dangling prerequisite codes and the courses referencing them
    pub fn unknown_codes(&self) -> &BTreeMap<CourseCode, Vec<CourseCode>> {
        self.graph.unknown_codes()
    }

    /// Full prerequisite chain of `code`
    pub fn chain(&self, code: &CourseCode) -> Chain {
        resolve_chain(&self.graph, code)
    }

    /// Everything `code` transitively unlocks
    pub fn pathway(&self, code: &CourseCode) -> Pathway {
        resolve_pathway(&self.graph, code)
    }

    /// Validate a proposed prerequisite list for `subject`
    pub fn validate(&self, subject: &CourseCode, candidates: &[CourseCode]) -> ValidationResult {
        validate_prerequisites(&self.graph, subject, candidates)
    }

    /// Available/locked partition for a student
    pub fn partition(&self, completed: &[CourseCode]) -> Partition {
        partition_courses(&self.graph, self.courses, completed, self.partition_options)
    }

    /// Conflicts of a proposed term schedule.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CourseNotFound`] for an id outside the snapshot.
    pub fn check_schedule(
        &self,
        scheduled: &[CourseId],
        completed: &[CourseCode],
    ) -> Result<ConflictReport> {
        check_schedule(
            &self.graph,
            self.courses,
            scheduled,
            completed,
            &self.credit_policy,
        )
    }

    /// Node/link data for rendering the neighborhood of `focus`
    pub fn focus_view(&self, focus: &[CourseCode]) -> GraphView {
        focus_view(&self.graph, focus)
    }

    /// Every prerequisite cycle present in the catalog
    pub fn cycles(&self) -> Vec<Vec<CourseCode>> {
        find_cycles(&self.graph)
    }
}
