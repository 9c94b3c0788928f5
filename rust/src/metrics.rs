//! Per-task schedule metrics.
//!
//! Combines the task records with the network and critical path into the
//! annotated timeline: progress, milestone flag, critical path membership.

use chrono::NaiveDateTime;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

use crate::config::AnalyzerConfig;
use crate::models::{AnnotatedTask, CriticalPathResult, Task};
use crate::network::{dedupe_tasks, TaskNetwork};

/// Progress as a percentage in 0..=100.
///
/// Done tasks are 100. Otherwise completed / planned effort, capped at 100;
/// 0 when there is no planned effort.
pub fn progress_percent(task: &Task) -> f64 {
    if task.is_done {
        return 100.0;
    }
    let planned = task.planned_effort.unwrap_or(0.0);
    if planned.is_nan() || planned <= 0.0 {
        return 0.0;
    }
    let completed = task.completed_effort.unwrap_or(0.0);
    let percent = completed / planned * 100.0;
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// A task is a milestone if it carries no weight or its kind says so.
pub fn is_milestone(task: &Task, config: &AnalyzerConfig) -> bool {
    task.effective_weight() == 0.0
        || task
            .kind
            .as_deref()
            .is_some_and(|kind| config.is_milestone_kind(kind))
}

/// Dated tasks first, ascending; undated tasks after them.
fn cmp_start(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Annotate every distinct task of the input.
///
/// Tasks outside the network still get progress and milestone flags but are
/// never on the critical path. Output is ordered by start date, then by the
/// position of the task's first occurrence in `tasks`.
pub fn annotate_tasks(
    tasks: &[Task],
    network: &TaskNetwork,
    critical_path: &CriticalPathResult,
    config: &AnalyzerConfig,
) -> Vec<AnnotatedTask> {
    let on_path: FxHashSet<&str> = critical_path.path.iter().map(String::as_str).collect();
    let catalog = dedupe_tasks(tasks);

    let mut annotated: Vec<(usize, AnnotatedTask)> = catalog
        .tasks
        .into_iter()
        .enumerate()
        .map(|(position, task)| {
            let in_network = network.contains(&task.id);
            let annotation = AnnotatedTask {
                task: task.clone(),
                progress_percent: progress_percent(task),
                is_milestone: is_milestone(task, config),
                is_on_critical_path: in_network && on_path.contains(task.id.as_str()),
                duration_days: task.window_days(),
                path_distance: critical_path.distances.get(&task.id).copied(),
                in_network,
            };
            (position, annotation)
        })
        .collect();

    annotated.sort_by(|(pos_a, a), (pos_b, b)| {
        cmp_start(a.task.start_date, b.task.start_date).then(pos_a.cmp(pos_b))
    });

    annotated.into_iter().map(|(_, task)| task).collect()
}
