//! Schedule analysis entry point.
//!
//! Runs the stages in order: (strict validation), network construction,
//! critical path, metrics. Each stage builds a new structure from the
//! previous one's output; nothing outlives the call.

use crate::config::{AnalyzerConfig, ValidationMode};
use crate::critical_path::{calculate_critical_path, unreached_tasks};
use crate::error::AnalysisError;
use crate::metrics::annotate_tasks;
use crate::models::{ScheduleAnalysis, Task};
use crate::network::build_network;
use crate::validation::validate_tasks;
use crate::{log_changes, log_checks};

/// Analyze a snapshot of tasks.
///
/// In tolerant mode (the default) this only fails on an unparseable
/// `config.validation`; bad input is absorbed and reported in
/// `ScheduleAnalysis::diagnostics`. In strict mode the first inconsistency
/// is returned as an error.
pub fn analyze_schedule(
    tasks: &[Task],
    config: &AnalyzerConfig,
) -> Result<ScheduleAnalysis, AnalysisError> {
    let verbosity = config.verbosity;
    let mode = config.validation_mode()?;
    log_changes!(
        verbosity,
        "Analyzing {} task records ({} validation)",
        tasks.len(),
        mode.as_str()
    );

    if mode == ValidationMode::Strict {
        validate_tasks(tasks)?;
    }

    let network = build_network(tasks, verbosity);
    let critical_path = calculate_critical_path(&network, verbosity);

    let mut diagnostics = network.diagnostics().clone();
    diagnostics.unreached_tasks = unreached_tasks(&network, &critical_path);
    for id in &diagnostics.unreached_tasks {
        log_checks!(verbosity, "Task {} is on or behind a cycle: excluded", id);
    }

    let annotated = annotate_tasks(tasks, &network, &critical_path, config);

    Ok(ScheduleAnalysis {
        tasks: annotated,
        critical_path,
        diagnostics,
    })
}
