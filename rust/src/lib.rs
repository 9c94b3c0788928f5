//! Dependency-aware schedule analysis.
//!
//! Turns a snapshot of tasks (time windows, effort weights, predecessor ids)
//! into an annotated timeline: per-task progress, milestone flags, and the
//! critical path, i.e. the heaviest chain of dependent tasks. Weights are
//! effort estimates, so critical path durations are in effort units.
//!
//! The analysis is a pure function of its input. Stages:
//! 1. [`network`] builds the predecessor -> successor graph
//! 2. [`critical_path`] runs a topological longest-path pass over it
//! 3. [`metrics`] annotates each task
//!
//! [`analyze_schedule`] runs all three and is also exported to Python.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

pub mod analysis;
mod config;
pub mod critical_path;
mod error;
mod interner;
pub mod logging;
pub mod metrics;
mod models;
pub mod network;
pub mod validation;

pub use analysis::analyze_schedule;
pub use config::{AnalyzerConfig, ValidationMode};
pub use critical_path::{calculate_critical_path, unreached_tasks};
pub use error::AnalysisError;
pub use interner::NodeId;
pub use metrics::annotate_tasks;
pub use models::{AnnotatedTask, CriticalPathResult, NetworkDiagnostics, ScheduleAnalysis, Task};
pub use network::{build_network, TaskNetwork};
pub use validation::validate_tasks;

/// Analyze a list of tasks.
///
/// # Arguments
/// * `tasks` - Task records, in the caller's order (used for tie-breaking)
/// * `config` - Analyzer configuration (defaults to tolerant validation)
///
/// # Returns
/// * ScheduleAnalysis with annotated tasks, critical path and diagnostics
///
/// # Raises
/// * ValueError in strict mode on invalid input, or on an unknown validation mode
#[pyfunction]
#[pyo3(name = "analyze_schedule", signature = (tasks, config=None))]
fn py_analyze_schedule(
    tasks: Vec<Task>,
    config: Option<AnalyzerConfig>,
) -> PyResult<ScheduleAnalysis> {
    let config = config.unwrap_or_default();
    match analyze_schedule(&tasks, &config) {
        Ok(analysis) => Ok(analysis),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The taskline.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Task>()?;
    m.add_class::<AnnotatedTask>()?;
    m.add_class::<CriticalPathResult>()?;
    m.add_class::<NetworkDiagnostics>()?;
    m.add_class::<ScheduleAnalysis>()?;

    // Config types
    m.add_class::<AnalyzerConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_analyze_schedule, m)?)?;

    Ok(())
}
