//! Error types for schedule analysis.
//!
//! Tolerant analysis never fails; these are produced by strict validation
//! and by configuration parsing only.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Task {task_id} depends on unknown task {dependency_id}")]
    UnknownDependency {
        task_id: String,
        dependency_id: String,
    },
    #[error("Duplicate task id: {0}")]
    DuplicateId(String),
    #[error("Circular dependency detected among tasks: {0:?}")]
    CycleDetected(Vec<String>),
    #[error("Task {task_id} has invalid weight {weight}")]
    InvalidWeight { task_id: String, weight: f64 },
    #[error("Unknown validation mode: {0}")]
    UnknownValidationMode(String),
}
