//! Coursegraph - a course prerequisite graph engine.
//!
//! This crate computes prerequisite chains, unlock pathways, cycle
//! validation, availability partitions and term schedule conflicts over an
//! immutable snapshot of a course catalog. Every entry point is a pure
//! function of its inputs: the engine keeps no state between calls and
//! performs no I/O outside of [`config`].
//!
//! # Example
//!
//! ```
//! use coursegraph::domain::Course;
//! use coursegraph::snapshot::CatalogSnapshot;
//!
//! let courses = vec![
//!     Course::new("CSI-140", 3, Vec::<&str>::new()),
//!     Course::new("CSI-240", 3, ["CSI-140"]),
//!     Course::new("CSI-340", 3, ["CSI-240"]),
//! ];
//!
//! let snapshot = CatalogSnapshot::new(&courses);
//! let chain = snapshot.chain(&"CSI-340".into());
//! assert_eq!(chain.codes.len(), 2);
//! assert!(!chain.has_cycle);
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod partition;
pub mod schedule;
pub mod snapshot;
pub mod validation;

pub use domain::{Course, CourseCode, CourseId};
pub use error::{Error, Result};
pub use graph::DependencyGraph;
pub use snapshot::CatalogSnapshot;
