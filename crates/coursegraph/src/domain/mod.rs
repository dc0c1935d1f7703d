//! Domain types for the course catalog.
//!
//! Courses are immutable value snapshots supplied by the catalog store. The
//! engine never mutates them and never keeps them beyond the call that
//! supplied them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credit hours assumed when a record does not carry a usable value.
pub const DEFAULT_CREDIT_HOURS: u32 = 3;

/// Course code in canonical `PREFIX-NUMBER` form (e.g. `CSI-340`).
///
/// Codes are compared exactly. Use [`CourseCode::parse`] to canonicalize
/// user or legacy input; [`CourseCode::new`] trusts its argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseCode(pub String);

impl CourseCode {
    /// Create a course code from an already canonical string
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Parse free-form input into canonical `PREFIX-NUMBER` form.
    ///
    /// The prefix is the leading run of ASCII letters, upper-cased. Any
    /// whitespace, `-` or `_` between prefix and number is collapsed into a
    /// single `-`. The number part must start with a digit and may carry
    /// trailing letters (`BIO-101L`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCourseCode`] when either part is missing or
    /// the number part contains anything but ASCII alphanumerics.
    ///
    /// # Examples
    ///
    /// ```
    /// use coursegraph::domain::CourseCode;
    ///
    /// assert_eq!(CourseCode::parse("csi 340").unwrap().as_str(), "CSI-340");
    /// assert_eq!(CourseCode::parse("CSI340").unwrap().as_str(), "CSI-340");
    /// assert!(CourseCode::parse("340").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCourseCode`] if the input has no subject
    /// letters or no course number.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || Error::InvalidCourseCode(input.to_string());

        let prefix_len = trimmed
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let (prefix, rest) = trimmed.split_at(prefix_len);
        let number = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '_');

        if prefix.is_empty() || number.is_empty() {
            return Err(invalid());
        }
        if !number.starts_with(|c: char| c.is_ascii_digit())
            || !number.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(invalid());
        }

        Ok(Self(format!(
            "{}-{}",
            prefix.to_ascii_uppercase(),
            number.to_ascii_uppercase()
        )))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CourseCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CourseCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier the catalog store assigns to a course record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(pub String);

impl CourseId {
    /// Create a new course ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CourseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A course record from the catalog snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Store-assigned identifier, used by schedules
    pub id: CourseId,

    /// Unique course code
    pub code: CourseCode,

    /// Credit hours (always positive after normalization)
    pub credit_hours: u32,

    /// Direct prerequisites in catalog order.
    ///
    /// May reference codes absent from the snapshot; such dangling
    /// references are reported by the graph, never rejected.
    pub prerequisite_codes: Vec<CourseCode>,
}

impl Course {
    /// Create a course whose identifier is its code.
    pub fn new<I, C>(code: impl Into<CourseCode>, credit_hours: u32, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CourseCode>,
    {
        let code = code.into();
        Self {
            id: CourseId::new(code.as_str()),
            code,
            credit_hours,
            prerequisite_codes: prerequisites.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the identifier, keeping everything else.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<CourseId>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_code_unchanged() {
        assert_eq!(CourseCode::parse("CSI-340").unwrap().as_str(), "CSI-340");
    }

    #[test]
    fn test_parse_normalizes_case_and_separators() {
        assert_eq!(CourseCode::parse("csi 340").unwrap().as_str(), "CSI-340");
        assert_eq!(CourseCode::parse(" csi_340 ").unwrap().as_str(), "CSI-340");
        assert_eq!(CourseCode::parse("MATH101").unwrap().as_str(), "MATH-101");
        assert_eq!(CourseCode::parse("bio - 101l").unwrap().as_str(), "BIO-101L");
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        for input in ["", "   ", "340", "CSI", "CSI-", "CSI-A40", "CSI-34 0", "CSI-3.4"] {
            assert!(
                matches!(CourseCode::parse(input), Err(Error::InvalidCourseCode(_))),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_course_new_uses_code_as_id() {
        let course = Course::new("CSI-240", 4, ["CSI-140"]);
        assert_eq!(course.id.as_str(), "CSI-240");
        assert_eq!(course.credit_hours, 4);
        assert_eq!(course.prerequisite_codes, vec![CourseCode::new("CSI-140")]);

        let course = course.with_id("42");
        assert_eq!(course.id, CourseId::new("42"));
    }

    #[test]
    fn test_course_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&CourseCode::new("CSI-340")).unwrap();
        assert_eq!(json, "\"CSI-340\"");
    }
}
