//! Task network construction.
//!
//! Turns raw task records into a predecessor -> successor graph. Input
//! problems are absorbed, never raised: duplicate ids keep the last record,
//! tasks without a full window stay out of the network, and dependencies on
//! unknown ids are dropped. Everything absorbed is recorded in the
//! network's `NetworkDiagnostics`.

use rustc_hash::FxHashSet;

use crate::interner::{NodeId, TaskIdInterner};
use crate::models::{NetworkDiagnostics, Task};
use crate::{log_changes, log_checks};

/// Distinct tasks in first-occurrence order, each holding its last record.
pub(crate) struct TaskCatalog<'a> {
    pub tasks: Vec<&'a Task>,
    pub duplicate_ids: Vec<String>,
}

/// Collapse repeated ids. The record of the last occurrence wins; its
/// position is that of the first occurrence.
pub(crate) fn dedupe_tasks(tasks: &[Task]) -> TaskCatalog<'_> {
    let mut interner = TaskIdInterner::with_capacity(tasks.len());
    let mut slots: Vec<&Task> = Vec::with_capacity(tasks.len());
    let mut reported: FxHashSet<&str> = FxHashSet::default();
    let mut duplicate_ids = Vec::new();

    for task in tasks {
        let (id, is_new) = interner.intern(&task.id);
        if is_new {
            slots.push(task);
        } else {
            slots[id as usize] = task;
            if reported.insert(task.id.as_str()) {
                duplicate_ids.push(task.id.clone());
            }
        }
    }

    TaskCatalog {
        tasks: slots,
        duplicate_ids,
    }
}

/// Directed graph of tasks that have a complete window.
///
/// All per-node tables are indexed by `NodeId`, which follows input order.
#[derive(Debug, Clone, Default)]
pub struct TaskNetwork {
    index: TaskIdInterner,
    nodes: Vec<Task>,
    weights: Vec<f64>,
    forward_edges: Vec<Vec<NodeId>>,
    in_degree: Vec<usize>,
    diagnostics: NetworkDiagnostics,
}

impl TaskNetwork {
    /// Build a network without logging.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        build_network(tasks, 0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in input order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.index.ids()
    }

    pub fn id_of(&self, task_id: &str) -> Option<NodeId> {
        self.index.get(task_id)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.index.get(task_id).is_some()
    }

    pub fn task(&self, node: NodeId) -> &Task {
        &self.nodes[node as usize]
    }

    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node as usize].id
    }

    pub fn weight(&self, node: NodeId) -> f64 {
        self.weights[node as usize]
    }

    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.forward_edges[node as usize]
    }

    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_degree[node as usize]
    }

    pub(crate) fn in_degrees(&self) -> &[usize] {
        &self.in_degree
    }

    pub fn edge_count(&self) -> usize {
        self.forward_edges.iter().map(Vec::len).sum()
    }

    pub fn diagnostics(&self) -> &NetworkDiagnostics {
        &self.diagnostics
    }
}

/// Build the task network from raw records.
pub fn build_network(tasks: &[Task], verbosity: u8) -> TaskNetwork {
    let catalog = dedupe_tasks(tasks);
    let mut diagnostics = NetworkDiagnostics {
        duplicate_ids: catalog.duplicate_ids,
        ..NetworkDiagnostics::default()
    };
    for id in &diagnostics.duplicate_ids {
        log_checks!(verbosity, "Duplicate task id {}: keeping last record", id);
    }

    let mut index = TaskIdInterner::with_capacity(catalog.tasks.len());
    let mut nodes: Vec<Task> = Vec::with_capacity(catalog.tasks.len());
    let mut weights: Vec<f64> = Vec::with_capacity(catalog.tasks.len());

    for &task in &catalog.tasks {
        if task.has_invalid_weight() {
            log_checks!(
                verbosity,
                "Task {} has invalid weight {:?}: using 0",
                task.id,
                task.weight
            );
            diagnostics.clamped_weights.push(task.id.clone());
        }
        if !task.has_window() {
            log_checks!(verbosity, "Task {} has no complete window: excluded", task.id);
            diagnostics.excluded_tasks.push(task.id.clone());
            continue;
        }
        index.intern(&task.id);
        weights.push(task.effective_weight());
        nodes.push(task.clone());
    }

    let n = nodes.len();
    let mut forward_edges: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];

    for (idx, task) in nodes.iter().enumerate() {
        let node = idx as NodeId;
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        for dep_id in &task.dependencies {
            match index.get(dep_id) {
                Some(pred) => {
                    if seen.insert(pred) {
                        forward_edges[pred as usize].push(node);
                        in_degree[idx] += 1;
                    }
                }
                None => {
                    log_checks!(
                        verbosity,
                        "Task {} depends on unknown task {}: edge dropped",
                        task.id,
                        dep_id
                    );
                    diagnostics
                        .dangling_dependencies
                        .push(format!("{} -> {}", task.id, dep_id));
                }
            }
        }
    }

    let network = TaskNetwork {
        index,
        nodes,
        weights,
        forward_edges,
        in_degree,
        diagnostics,
    };
    log_changes!(
        verbosity,
        "Task network: {} nodes, {} edges, {} excluded",
        network.len(),
        network.edge_count(),
        network.diagnostics.excluded_tasks.len()
    );
    network
}
