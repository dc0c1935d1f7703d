//! Shared fixtures for coursegraph integration tests.

#![allow(dead_code)]

use coursegraph::domain::{Course, CourseCode, CourseId};
use std::sync::Once;

static INIT: Once = Once::new();

/// Route `tracing` output through the test harness (`RUST_LOG` to enable).
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A 3-credit course whose id equals its code.
pub fn course(code: &str, prerequisites: &[&str]) -> Course {
    Course::new(code, 3, prerequisites.iter().copied())
}

/// A course with explicit credit hours.
pub fn course_with_credits(code: &str, credits: u32, prerequisites: &[&str]) -> Course {
    Course::new(code, credits, prerequisites.iter().copied())
}

pub fn codes(list: &[&str]) -> Vec<CourseCode> {
    list.iter().map(|c| CourseCode::new(*c)).collect()
}

pub fn ids(list: &[&str]) -> Vec<CourseId> {
    list.iter().map(|c| CourseId::new(*c)).collect()
}

/// `A <- B <- C`: B requires A, C requires B.
pub fn linear_catalog() -> Vec<Course> {
    vec![
        course("A-100", &[]),
        course("B-200", &["A-100"]),
        course("C-300", &["B-200"]),
    ]
}

/// A small computer science sequence with a diamond and a dangling reference.
pub fn cs_catalog() -> Vec<Course> {
    vec![
        course("CSI-140", &[]),
        course("MAT-120", &[]),
        course("CSI-240", &["CSI-140"]),
        course("CSI-230", &["CSI-140", "MAT-120"]),
        course("CSI-340", &["CSI-240", "CSI-230"]),
        course("CSI-380", &["CSI-340"]),
        course("CSI-480", &["CSI-380", "ENG-990"]),
    ]
}
