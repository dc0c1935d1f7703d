//! Term schedule conflict checking.
//!
//! A scheduled course's direct prerequisite is satisfied when it is either
//! completed or co-scheduled in the same term. Credit totals are compared
//! against a [`CreditPolicy`]. The report is recomputed wholesale on every
//! call and is deterministic: conflicts follow schedule order, with the
//! credit-load check last.

use crate::domain::{Course, CourseCode, CourseId};
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Default upper bound of a normal term load (inclusive)
pub const DEFAULT_MAX_CREDITS: u32 = 18;

/// Default lower bound of a normal term load (inclusive)
pub const DEFAULT_MIN_CREDITS: u32 = 12;

/// Credit-load thresholds for one term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CreditPolicy {
    /// Totals below this (with at least one course) are an underload
    pub min_credits: u32,

    /// Totals above this are an overload
    pub max_credits: u32,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self {
            min_credits: DEFAULT_MIN_CREDITS,
            max_credits: DEFAULT_MAX_CREDITS,
        }
    }
}

/// How strongly the UI should present a conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Info,

    /// Advisory
    Warning,

    /// Blocking
    Error,
}

/// Structured parameters of a conflict message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConflictKind {
    /// Direct prerequisites neither completed nor co-scheduled
    PrerequisiteUnmet {
        /// Missing prerequisite codes, in catalog order
        missing: Vec<CourseCode>,
    },

    /// The term carries more credits than the policy allows
    CreditOverload {
        /// Scheduled credit total
        total_credits: u64,
        /// Policy maximum
        max_credits: u32,
    },

    /// The term carries fewer credits than a full load
    CreditUnderload {
        /// Scheduled credit total
        total_credits: u64,
        /// Policy minimum
        min_credits: u32,
    },
}

/// A detected problem with a proposed term schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Presentation severity
    pub severity: Severity,

    /// Affected course codes
    pub courses: Vec<CourseCode>,

    /// What went wrong, with message parameters
    #[serde(flatten)]
    pub kind: ConflictKind,
}

/// All conflicts for one proposed term schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Conflicts in schedule order, credit-load check last
    pub conflicts: Vec<Conflict>,

    /// Sum of credit hours over the scheduled courses
    pub total_credits: u64,
}

impl ConflictReport {
    /// Whether any conflict is blocking
    pub fn has_errors(&self) -> bool {
        self.conflicts.iter().any(|c| c.severity == Severity::Error)
    }

    /// Conflicts of exactly the given severity
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Conflict> + '_ {
        self.conflicts.iter().filter(move |c| c.severity == severity)
    }

    /// Whether nothing was flagged
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Check a proposed term schedule.
///
/// A course id repeated in `scheduled` counts once.
///
/// # Errors
///
/// Returns [`Error::CourseNotFound`] if a scheduled id is not in `courses`.
/// That is a caller bug, not user input, so nothing is computed.
pub fn check_schedule(
    graph: &DependencyGraph,
    courses: &[Course],
    scheduled: &[CourseId],
    completed: &[CourseCode],
    policy: &CreditPolicy,
) -> Result<ConflictReport> {
    let by_id: HashMap<&CourseId, &Course> = courses.iter().map(|c| (&c.id, c)).collect();

    let mut seen = HashSet::new();
    let mut term = Vec::new();
    for id in scheduled {
        let course = by_id
            .get(id)
            .copied()
            .ok_or_else(|| Error::CourseNotFound(id.clone()))?;
        if seen.insert(id) {
            term.push(course);
        }
    }

    let done: HashSet<&CourseCode> = completed.iter().collect();
    let mut report = ConflictReport::default();

    for course in &term {
        let missing: Vec<CourseCode> = graph
            .requires(&course.code)
            .into_iter()
            .filter(|prerequisite| {
                !done.contains(prerequisite)
                    && !term
                        .iter()
                        .any(|other| other.id != course.id && other.code == **prerequisite)
            })
            .cloned()
            .collect();

        if !missing.is_empty() {
            report.conflicts.push(Conflict {
                severity: Severity::Error,
                courses: vec![course.code.clone()],
                kind: ConflictKind::PrerequisiteUnmet { missing },
            });
        }
    }

    report.total_credits = term.iter().map(|c| u64::from(c.credit_hours)).sum();
    if let Some(conflict) = credit_load(&term, report.total_credits, policy) {
        report.conflicts.push(conflict);
    }

    debug!(
        courses = term.len(),
        total_credits = report.total_credits,
        conflicts = report.conflicts.len(),
        "Checked term schedule"
    );
    Ok(report)
}

fn credit_load(term: &[&Course], total_credits: u64, policy: &CreditPolicy) -> Option<Conflict> {
    let courses = || -> Vec<CourseCode> { term.iter().map(|c| c.code.clone()).collect() };

    if total_credits > u64::from(policy.max_credits) {
        Some(Conflict {
            severity: Severity::Warning,
            courses: courses(),
            kind: ConflictKind::CreditOverload {
                total_credits,
                max_credits: policy.max_credits,
            },
        })
    } else if !term.is_empty() && total_credits < u64::from(policy.min_credits) {
        Some(Conflict {
            severity: Severity::Info,
            courses: courses(),
            kind: ConflictKind::CreditUnderload {
                total_credits,
                min_credits: policy.min_credits,
            },
        })
    } else {
        None
    }
}
