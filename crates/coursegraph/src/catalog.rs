//! Boundary normalization of catalog records.
//!
//! The catalog store hands over loosely typed records: credit hours as a
//! number, a string or nothing; prerequisites as a structured list, a
//! comma-separated string, or both. This module turns them into strict
//! [`Course`] values once, so the engine never special-cases formats.
//!
//! Normalization never fails. Every record or field that cannot be used is
//! skipped or defaulted and reported as a [`NormalizationWarning`].
//!
//! When a record carries both prerequisite forms, the structured list is
//! authoritative; a disagreement with the free-text form is reported.

use crate::domain::{Course, CourseCode, CourseId};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Free-text prerequisite values that mean "no prerequisites"
const NO_PREREQUISITE_MARKERS: &[&str] = &["none", "n/a", "na", "-"];

/// A course record as supplied by the catalog store
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCourse {
    /// Store identifier; falls back to the canonical code
    #[serde(default)]
    pub id: Option<RawId>,

    /// Course code in any casing/separator style
    #[serde(alias = "courseCode", alias = "course_code")]
    pub code: String,

    /// Credit hours in any legacy encoding
    #[serde(default, alias = "credits", alias = "creditHours")]
    pub credit_hours: Option<RawCredits>,

    /// Legacy prerequisite field: free text or a list
    #[serde(default)]
    pub prerequisites: Option<RawPrerequisites>,

    /// Structured prerequisite list
    ///
    /// `prerequisite_list` and `prerequisiteList` name the same field, so a
    /// record carrying both spellings is malformed.
    #[serde(default, alias = "prerequisiteList")]
    pub prerequisite_list: Option<RawPrerequisites>,

    /// Structured prerequisite list under its export name.
    ///
    /// Merged after `prerequisite_list` when both are present.
    #[serde(default)]
    pub prerequisite_codes: Option<RawPrerequisites>,
}

/// A record identifier, numeric or textual
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric identifier
    Number(serde_json::Number),
    /// Textual identifier
    Text(String),
    /// Anything else; the canonical code is used instead
    Other(Value),
}

/// Credit hours, numeric or textual
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCredits {
    /// Numeric value
    Number(f64),
    /// Textual value such as `"3"` or `"4.0"`
    Text(String),
    /// Any other JSON value; always unusable
    Other(Value),
}

/// Prerequisites, structured or free text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPrerequisites {
    /// Structured list; non-string elements are reported and dropped
    List(Vec<Value>),
    /// Comma or semicolon separated codes
    Text(String),
    /// Any other JSON value; reported and dropped
    Other(Value),
}

/// One prerequisite entry before code parsing
enum Entry {
    Code(String),
    Unusable(String),
}

impl RawPrerequisites {
    fn entries(&self) -> Vec<Entry> {
        match self {
            Self::List(values) => values
                .iter()
                .map(|value| match value {
                    Value::String(s) => Entry::Code(s.clone()),
                    other => Entry::Unusable(other.to_string()),
                })
                .collect(),
            Self::Text(text) => split_prerequisite_text(text)
                .into_iter()
                .map(Entry::Code)
                .collect(),
            Self::Other(value) => vec![Entry::Unusable(value.to_string())],
        }
    }
}

/// A non-fatal problem found while normalizing records.
///
/// `index` is the 0-based position of the record in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationWarning {
    /// The record could not be read as a course at all; skipped
    MalformedRecord {
        /// Record position
        index: usize,
        /// Deserialization error
        error: String,
    },

    /// The course code is not in `PREFIX-NUMBER` form; skipped
    InvalidCourseCode {
        /// Record position
        index: usize,
        /// The code as supplied
        code: String,
    },

    /// An earlier record already used this code; skipped
    DuplicateCourseCode {
        /// Record position
        index: usize,
        /// Canonical code
        code: CourseCode,
    },

    /// Credit hours were present but unusable; the default was applied
    InvalidCreditHours {
        /// Record position
        index: usize,
        /// Canonical code
        code: CourseCode,
        /// The value as supplied
        value: String,
    },

    /// A prerequisite entry is not a course code; dropped
    InvalidPrerequisite {
        /// Record position
        index: usize,
        /// Canonical code of the record
        code: CourseCode,
        /// The entry as supplied
        entry: String,
    },

    /// Structured and free-text prerequisites name different courses
    PrerequisiteFormsDisagree {
        /// Record position
        index: usize,
        /// Canonical code of the record
        code: CourseCode,
    },
}

impl NormalizationWarning {
    /// Returns the record position associated with this warning.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::MalformedRecord { index, .. }
            | Self::InvalidCourseCode { index, .. }
            | Self::DuplicateCourseCode { index, .. }
            | Self::InvalidCreditHours { index, .. }
            | Self::InvalidPrerequisite { index, .. }
            | Self::PrerequisiteFormsDisagree { index, .. } => *index,
        }
    }

    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => "malformed_record",
            Self::InvalidCourseCode { .. } => "invalid_course_code",
            Self::DuplicateCourseCode { .. } => "duplicate_course_code",
            Self::InvalidCreditHours { .. } => "invalid_credit_hours",
            Self::InvalidPrerequisite { .. } => "invalid_prerequisite",
            Self::PrerequisiteFormsDisagree { .. } => "prerequisite_forms_disagree",
        }
    }

    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedRecord { index, error } => {
                format!("record {}: malformed course record: {}", index, error)
            }
            Self::InvalidCourseCode { index, code } => {
                format!("record {}: invalid course code {:?}", index, code)
            }
            Self::DuplicateCourseCode { index, code } => {
                format!("record {}: duplicate course code {}", index, code)
            }
            Self::InvalidCreditHours { index, code, value } => {
                format!("record {} ({}): unusable credit hours {:?}", index, code, value)
            }
            Self::InvalidPrerequisite { index, code, entry } => {
                format!("record {} ({}): invalid prerequisite {:?}", index, code, entry)
            }
            Self::PrerequisiteFormsDisagree { index, code } => {
                format!(
                    "record {} ({}): prerequisite list and text disagree, using list",
                    index, code
                )
            }
        }
    }
}

/// Courses plus everything that had to be skipped or defaulted
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Strict course records in input order
    pub courses: Vec<Course>,

    /// Non-fatal problems, in input order
    pub warnings: Vec<NormalizationWarning>,
}

/// Normalize untyped JSON records (e.g. the elements of a JSON array).
///
/// A value that does not deserialize as [`RawCourse`] is reported as
/// [`NormalizationWarning::MalformedRecord`] and skipped.
pub fn normalize_values(values: &[Value], default_credit_hours: u32) -> Normalized {
    let mut warnings = Vec::new();
    let mut raw = Vec::with_capacity(values.len());

    for (index, value) in values.iter().enumerate() {
        match RawCourse::deserialize(value) {
            Ok(record) => raw.push((index, record)),
            Err(e) => warnings.push(NormalizationWarning::MalformedRecord {
                index,
                error: e.to_string(),
            }),
        }
    }

    let mut normalized = normalize_indexed(raw, default_credit_hours);
    warnings.append(&mut normalized.warnings);
    warnings.sort_by_key(NormalizationWarning::index);
    log_warnings(&warnings);
    normalized.warnings = warnings;
    normalized
}

/// Normalize typed raw records.
pub fn normalize_courses(raw: Vec<RawCourse>, default_credit_hours: u32) -> Normalized {
    let normalized = normalize_indexed(raw.into_iter().enumerate().collect(), default_credit_hours);
    log_warnings(&normalized.warnings);
    normalized
}

fn normalize_indexed(raw: Vec<(usize, RawCourse)>, default_credit_hours: u32) -> Normalized {
    let mut normalized = Normalized::default();
    let mut codes = HashSet::new();

    for (index, record) in raw {
        let warnings = &mut normalized.warnings;

        let Ok(code) = CourseCode::parse(&record.code) else {
            warnings.push(NormalizationWarning::InvalidCourseCode {
                index,
                code: record.code,
            });
            continue;
        };
        if !codes.insert(code.clone()) {
            warnings.push(NormalizationWarning::DuplicateCourseCode { index, code });
            continue;
        }

        let id = match &record.id {
            Some(RawId::Number(n)) => CourseId::new(n.to_string()),
            Some(RawId::Text(s)) if !s.trim().is_empty() => CourseId::new(s.trim()),
            _ => CourseId::new(code.as_str()),
        };

        let credit_hours = match record.credit_hours.as_ref().map(parse_credits) {
            None | Some(Credits::Missing) => default_credit_hours,
            Some(Credits::Valid(hours)) => hours,
            Some(Credits::Invalid(value)) => {
                warnings.push(NormalizationWarning::InvalidCreditHours {
                    index,
                    code: code.clone(),
                    value,
                });
                default_credit_hours
            }
        };

        let prerequisite_codes = normalize_prerequisites(index, &code, &record, warnings);

        normalized.courses.push(Course {
            id,
            code,
            credit_hours,
            prerequisite_codes,
        });
    }

    normalized
}

fn log_warnings(warnings: &[NormalizationWarning]) {
    for warning in warnings {
        warn!(kind = warning.kind(), "{}", warning.description());
    }
}

enum Credits {
    Missing,
    Valid(u32),
    Invalid(String),
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_credits(raw: &RawCredits) -> Credits {
    let (value, text) = match raw {
        RawCredits::Number(n) => (Some(*n), n.to_string()),
        RawCredits::Text(s) if s.trim().is_empty() => return Credits::Missing,
        RawCredits::Text(s) => (s.trim().parse::<f64>().ok(), s.clone()),
        RawCredits::Other(value) => return Credits::Invalid(value.to_string()),
    };

    match value {
        Some(v) if v >= 1.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => {
            Credits::Valid(v as u32)
        }
        _ => Credits::Invalid(text),
    }
}

fn normalize_prerequisites(
    index: usize,
    code: &CourseCode,
    record: &RawCourse,
    warnings: &mut Vec<NormalizationWarning>,
) -> Vec<CourseCode> {
    let structured: Option<Vec<Entry>> =
        match (&record.prerequisite_list, &record.prerequisite_codes) {
            (None, None) => None,
            (list, codes) => Some(
                list.iter()
                    .chain(codes)
                    .flat_map(RawPrerequisites::entries)
                    .collect(),
            ),
        };
    let text = record.prerequisites.as_ref().map(RawPrerequisites::entries);

    let (entries, other) = match (structured, text) {
        (Some(list), other) => (list, other),
        (None, Some(text)) => (text, None),
        (None, None) => return Vec::new(),
    };

    let mut parsed: Vec<CourseCode> = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = match entry {
            Entry::Code(entry) if is_no_prerequisite_marker(&entry) => continue,
            Entry::Code(entry) => match CourseCode::parse(&entry) {
                Ok(prerequisite) => {
                    if !parsed.contains(&prerequisite) {
                        parsed.push(prerequisite);
                    }
                    continue;
                }
                Err(_) => entry,
            },
            Entry::Unusable(entry) => entry,
        };
        warnings.push(NormalizationWarning::InvalidPrerequisite {
            index,
            code: code.clone(),
            entry,
        });
    }

    if let Some(other) = other {
        let listed: HashSet<&CourseCode> = parsed.iter().collect();
        let alternative: Vec<CourseCode> = other
            .iter()
            .filter_map(|entry| match entry {
                Entry::Code(entry) if !is_no_prerequisite_marker(entry) => {
                    CourseCode::parse(entry).ok()
                }
                _ => None,
            })
            .collect();
        let alternative: HashSet<&CourseCode> = alternative.iter().collect();
        if listed != alternative {
            warnings.push(NormalizationWarning::PrerequisiteFormsDisagree {
                index,
                code: code.clone(),
            });
        }
    }

    parsed
}

fn split_prerequisite_text(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_no_prerequisite_marker(entry: &str) -> bool {
    let entry = entry.trim();
    entry.is_empty()
        || NO_PREREQUISITE_MARKERS
            .iter()
            .any(|marker| entry.eq_ignore_ascii_case(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(values: Value) -> Normalized {
        let Value::Array(values) = values else {
            panic!("expected a JSON array");
        };
        normalize_values(&values, 3)
    }

    #[test]
    fn test_structured_record_passes_through() {
        let result = normalize(json!([
            {"id": 7, "code": "CSI-340", "credit_hours": 4, "prerequisiteList": ["CSI-240"]}
        ]));

        assert!(result.warnings.is_empty());
        assert_eq!(
            result.courses,
            vec![Course::new("CSI-340", 4, ["CSI-240"]).with_id("7")]
        );
    }

    #[test]
    fn test_legacy_text_prerequisites_and_string_credits() {
        let result = normalize(json!([
            {"courseCode": "csi 340", "credits": "3", "prerequisites": "CSI-240, csi210; "}
        ]));

        assert!(result.warnings.is_empty());
        let course = &result.courses[0];
        assert_eq!(course.code.as_str(), "CSI-340");
        assert_eq!(course.id.as_str(), "CSI-340");
        assert_eq!(course.credit_hours, 3);
        assert_eq!(
            course.prerequisite_codes,
            vec![CourseCode::new("CSI-240"), CourseCode::new("CSI-210")]
        );
    }

    #[test]
    fn test_none_marker_means_no_prerequisites() {
        let result = normalize(json!([
            {"code": "CSI-100", "prerequisites": "None"},
            {"code": "CSI-101", "prerequisites": ""},
            {"code": "CSI-102", "prerequisites": null}
        ]));
        assert!(result.warnings.is_empty());
        assert!(result.courses.iter().all(|c| c.prerequisite_codes.is_empty()));
    }

    #[test]
    fn test_credit_hours_defaults() {
        let result = normalize(json!([
            {"code": "A-100"},
            {"code": "A-101", "creditHours": ""},
            {"code": "A-102", "creditHours": "four"},
            {"code": "A-103", "credits": 0},
            {"code": "A-104", "credits": 2.5},
            {"code": "A-105", "credits": "4.0"}
        ]));

        let credits: Vec<u32> = result.courses.iter().map(|c| c.credit_hours).collect();
        assert_eq!(credits, vec![3, 3, 3, 3, 3, 4]);

        let flagged: Vec<usize> = result.warnings.iter().map(NormalizationWarning::index).collect();
        assert_eq!(flagged, vec![2, 3, 4]);
        assert!(
            result
                .warnings
                .iter()
                .all(|w| w.kind() == "invalid_credit_hours")
        );
    }

    #[test]
    fn test_list_wins_when_forms_disagree() {
        let result = normalize(json!([
            {"code": "CSI-340", "prerequisites": "CSI-230", "prerequisite_list": ["CSI-240"]}
        ]));

        assert_eq!(
            result.courses[0].prerequisite_codes,
            vec![CourseCode::new("CSI-240")]
        );
        assert_eq!(
            result.warnings,
            vec![NormalizationWarning::PrerequisiteFormsDisagree {
                index: 0,
                code: "CSI-340".into(),
            }]
        );
    }

    #[test]
    fn test_agreeing_forms_are_quiet() {
        let result = normalize(json!([
            {"code": "CSI-340", "prerequisites": "csi 240, CSI-210", "prerequisiteList": ["CSI-210", "CSI-240"]}
        ]));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_bad_records_are_skipped_with_warnings() {
        let result = normalize(json!([
            {"code": "CSI-100"},
            {"title": "no code at all"},
            {"code": "???"},
            {"code": "csi-100"},
            {"code": "CSI-200", "prerequisiteList": ["CSI-100", "intro stuff"]}
        ]));

        let kinds: Vec<&str> = result.warnings.iter().map(NormalizationWarning::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "malformed_record",
                "invalid_course_code",
                "duplicate_course_code",
                "invalid_prerequisite"
            ]
        );
        let codes: Vec<&str> = result.courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CSI-100", "CSI-200"]);
        assert_eq!(
            result.courses[1].prerequisite_codes,
            vec![CourseCode::new("CSI-100")]
        );
    }

    #[test]
    fn test_typed_records() {
        let raw = vec![RawCourse {
            id: Some(RawId::Text("  ".to_string())),
            code: "math101".to_string(),
            credit_hours: Some(RawCredits::Number(4.0)),
            prerequisites: Some(RawPrerequisites::List(vec![json!("MATH-099")])),
            prerequisite_list: None,
            prerequisite_codes: None,
        }];
        let result = normalize_courses(raw, 3);

        assert!(result.warnings.is_empty());
        assert_eq!(
            result.courses,
            vec![Course::new("MATH-101", 4, ["MATH-099"])]
        );
    }

    #[test]
    fn test_unusable_field_types_keep_the_course() {
        let result = normalize(json!([
            {"code": "A-100", "credits": true},
            {"code": "B-100", "credits": {"value": 3}, "id": [1, 2]},
            {"code": "C-100", "credits": [], "prerequisites": 42},
            {"code": "D-100", "prerequisiteList": ["A-100", 7, null]}
        ]));

        let codes: Vec<&str> = result.courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["A-100", "B-100", "C-100", "D-100"]);
        assert!(result.courses.iter().all(|c| c.credit_hours == 3));
        assert_eq!(result.courses[1].id.as_str(), "B-100");
        assert!(result.courses[2].prerequisite_codes.is_empty());
        assert_eq!(
            result.courses[3].prerequisite_codes,
            vec![CourseCode::new("A-100")]
        );

        let kinds: Vec<(usize, &str)> = result
            .warnings
            .iter()
            .map(|w| (w.index(), w.kind()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (0, "invalid_credit_hours"),
                (1, "invalid_credit_hours"),
                (2, "invalid_credit_hours"),
                (2, "invalid_prerequisite"),
                (3, "invalid_prerequisite"),
                (3, "invalid_prerequisite"),
            ]
        );
        assert_eq!(
            result.warnings[0],
            NormalizationWarning::InvalidCreditHours {
                index: 0,
                code: "A-100".into(),
                value: "true".to_string(),
            }
        );
    }

    #[test]
    fn test_both_structured_keys_are_merged() {
        let result = normalize(json!([
            {
                "code": "CSI-340",
                "prerequisiteList": ["CSI-240"],
                "prerequisite_codes": ["csi 230", "CSI-240"]
            }
        ]));

        assert!(result.warnings.is_empty());
        assert_eq!(
            result.courses[0].prerequisite_codes,
            vec![CourseCode::new("CSI-240"), CourseCode::new("CSI-230")]
        );
    }

    #[test]
    fn test_descriptions_mention_record() {
        let warning = NormalizationWarning::InvalidCreditHours {
            index: 4,
            code: "A-100".into(),
            value: "four".to_string(),
        };
        let desc = warning.description();
        assert!(desc.contains("record 4"));
        assert!(desc.contains("A-100"));
        assert!(desc.contains("four"));
    }
}
