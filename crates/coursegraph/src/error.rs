//! Error types for coursegraph operations.
//!
//! Structural anomalies in catalog data (dangling prerequisites, cycles) are
//! never errors; they are reported as fields on the result types. This enum
//! only covers caller contract violations and configuration problems.

use crate::domain::CourseId;
use std::io;
use thiserror::Error;

/// The error type for coursegraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing configuration.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A course identifier was not present in the supplied snapshot.
    #[error("Course not found: {0}")]
    CourseNotFound(CourseId),

    /// A course code could not be brought into `PREFIX-NUMBER` form.
    #[error("Invalid course code: {0:?}")]
    InvalidCourseCode(String),
}

/// A specialized Result type for coursegraph operations.
pub type Result<T> = std::result::Result<T, Error>;
