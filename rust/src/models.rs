//! Core data types for schedule analysis.

use chrono::NaiveDateTime;
use pyo3::prelude::*;
use std::collections::HashMap;

// Note: We use std HashMap here for PyO3 interface compatibility

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A unit of work with a time window, an effort weight and predecessors.
///
/// `weight` is an effort estimate. It is also the edge length used by the
/// critical path calculation, so path durations are in effort units, not
/// calendar days.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub start_date: Option<NaiveDateTime>,
    #[pyo3(get, set)]
    pub end_date: Option<NaiveDateTime>,
    #[pyo3(get, set)]
    pub weight: Option<f64>,
    /// Ids of tasks that must complete before this one may start.
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
    #[pyo3(get, set)]
    pub completed_effort: Option<f64>,
    #[pyo3(get, set)]
    pub planned_effort: Option<f64>,
    #[pyo3(get, set)]
    pub is_done: bool,
    #[pyo3(get, set)]
    pub kind: Option<String>,
}

impl Task {
    /// Weight used as edge length: absent, negative or non-finite becomes 0.
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => 0.0,
        }
    }

    /// True when a weight was supplied but cannot be used as-is.
    pub fn has_invalid_weight(&self) -> bool {
        matches!(self.weight, Some(w) if !w.is_finite() || w < 0.0)
    }

    /// Both ends of the window are present.
    pub fn has_window(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Window length in days. Inverted windows clamp to 0.
    pub fn window_days(&self) -> f64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                let seconds = (end - start).num_seconds() as f64;
                (seconds / SECONDS_PER_DAY).max(0.0)
            }
            _ => 0.0,
        }
    }
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        title=String::new(),
        start_date=None,
        end_date=None,
        weight=None,
        dependencies=Vec::new(),
        completed_effort=None,
        planned_effort=None,
        is_done=false,
        kind=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: String,
        title: String,
        start_date: Option<NaiveDateTime>,
        end_date: Option<NaiveDateTime>,
        weight: Option<f64>,
        dependencies: Vec<String>,
        completed_effort: Option<f64>,
        planned_effort: Option<f64>,
        is_done: bool,
        kind: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            start_date,
            end_date,
            weight,
            dependencies,
            completed_effort,
            planned_effort,
            is_done,
            kind,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, weight={:?}, deps={}, done={})",
            self.id,
            self.weight,
            self.dependencies.len(),
            self.is_done
        )
    }
}

/// A task with its computed schedule metrics.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedTask {
    #[pyo3(get, set)]
    pub task: Task,
    /// 0-100.
    #[pyo3(get, set)]
    pub progress_percent: f64,
    #[pyo3(get, set)]
    pub is_milestone: bool,
    #[pyo3(get, set)]
    pub is_on_critical_path: bool,
    /// Window length in days, clamped at 0.
    #[pyo3(get, set)]
    pub duration_days: f64,
    /// Cumulative weight of the heaviest chain ending at this task.
    /// None for tasks outside the network or on a cycle.
    #[pyo3(get, set)]
    pub path_distance: Option<f64>,
    #[pyo3(get, set)]
    pub in_network: bool,
}

#[pymethods]
impl AnnotatedTask {
    #[getter]
    fn id(&self) -> String {
        self.task.id.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "AnnotatedTask(id={:?}, progress={:.1}, milestone={}, critical={})",
            self.task.id, self.progress_percent, self.is_milestone, self.is_on_critical_path
        )
    }
}

/// The longest chain of dependent tasks by cumulative weight.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CriticalPathResult {
    /// Task ids from the earliest contributing task to the terminal task.
    #[pyo3(get, set)]
    pub path: Vec<String>,
    /// Sum of weights along `path` (effort units).
    #[pyo3(get, set)]
    pub duration: f64,
    /// Cumulative weight for every task the traversal reached.
    #[pyo3(get, set)]
    pub distances: HashMap<String, f64>,
}

impl CriticalPathResult {
    pub fn contains(&self, task_id: &str) -> bool {
        self.path.iter().any(|id| id == task_id)
    }
}

#[pymethods]
impl CriticalPathResult {
    fn __repr__(&self) -> String {
        format!(
            "CriticalPathResult(path={:?}, duration={})",
            self.path, self.duration
        )
    }
}

/// Input problems that tolerant analysis absorbed instead of failing.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkDiagnostics {
    /// Tasks missing a start or end date.
    #[pyo3(get, set)]
    pub excluded_tasks: Vec<String>,
    /// Ids that occurred more than once; the last record was kept.
    #[pyo3(get, set)]
    pub duplicate_ids: Vec<String>,
    /// Dropped edges as "task -> dependency".
    #[pyo3(get, set)]
    pub dangling_dependencies: Vec<String>,
    /// Network tasks never reached by the traversal (on or behind a cycle).
    #[pyo3(get, set)]
    pub unreached_tasks: Vec<String>,
    /// Tasks whose negative or non-finite weight was treated as 0.
    #[pyo3(get, set)]
    pub clamped_weights: Vec<String>,
}

#[pymethods]
impl NetworkDiagnostics {
    /// True when nothing was dropped, replaced or clamped.
    pub fn is_clean(&self) -> bool {
        self.excluded_tasks.is_empty()
            && self.duplicate_ids.is_empty()
            && self.dangling_dependencies.is_empty()
            && self.unreached_tasks.is_empty()
            && self.clamped_weights.is_empty()
    }

    fn __repr__(&self) -> String {
        format!(
            "NetworkDiagnostics(excluded={}, duplicates={}, dangling={}, unreached={}, clamped={})",
            self.excluded_tasks.len(),
            self.duplicate_ids.len(),
            self.dangling_dependencies.len(),
            self.unreached_tasks.len(),
            self.clamped_weights.len()
        )
    }
}

/// Result of one analysis run.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleAnalysis {
    /// Ordered by start date, then input order.
    #[pyo3(get, set)]
    pub tasks: Vec<AnnotatedTask>,
    #[pyo3(get, set)]
    pub critical_path: CriticalPathResult,
    #[pyo3(get, set)]
    pub diagnostics: NetworkDiagnostics,
}

#[pymethods]
impl ScheduleAnalysis {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleAnalysis(tasks={}, critical_path_len={}, duration={})",
            self.tasks.len(),
            self.critical_path.path.len(),
            self.critical_path.duration
        )
    }
}
