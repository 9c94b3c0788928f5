//! Strict input validation.
//!
//! Tolerant analysis absorbs bad input. Strict mode runs these checks first
//! and rejects the batch on the first problem found, in this order:
//! duplicate ids, invalid weights, unknown dependencies, cycles.
//!
//! Tasks without a complete window are not an error in either mode; they
//! are kept out of the network, and edges pointing at them are dropped.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::error::AnalysisError;
use crate::interner::NodeId;
use crate::models::Task;
use crate::network::TaskNetwork;

fn check_duplicate_ids(tasks: &[Task]) -> Result<(), AnalysisError> {
    let mut seen: FxHashSet<&str> =
        FxHashSet::with_capacity_and_hasher(tasks.len(), Default::default());
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(AnalysisError::DuplicateId(task.id.clone()));
        }
    }
    Ok(())
}

fn check_weights(tasks: &[Task]) -> Result<(), AnalysisError> {
    for task in tasks {
        if let Some(weight) = task.weight {
            if task.has_invalid_weight() {
                return Err(AnalysisError::InvalidWeight {
                    task_id: task.id.clone(),
                    weight,
                });
            }
        }
    }
    Ok(())
}

fn check_dependencies(tasks: &[Task]) -> Result<(), AnalysisError> {
    let known: FxHashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    for task in tasks {
        for dep in &task.dependencies {
            if !known.contains(dep.as_str()) {
                return Err(AnalysisError::UnknownDependency {
                    task_id: task.id.clone(),
                    dependency_id: dep.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Order the network topologically (Kahn's algorithm).
///
/// Fails with the tasks that could not be ordered: those on a cycle and
/// those downstream of one.
pub fn topological_order(network: &TaskNetwork) -> Result<Vec<NodeId>, AnalysisError> {
    let mut in_degree = network.in_degrees().to_vec();
    let mut queue: VecDeque<NodeId> = network
        .node_ids()
        .filter(|&node| in_degree[node as usize] == 0)
        .collect();
    let mut order: Vec<NodeId> = Vec::with_capacity(network.len());

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &succ in network.successors(node) {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() != network.len() {
        let blocked: Vec<String> = network
            .node_ids()
            .filter(|&node| in_degree[node as usize] > 0)
            .map(|node| network.name(node).to_string())
            .collect();
        return Err(AnalysisError::CycleDetected(blocked));
    }

    Ok(order)
}

/// Validate a task batch for strict analysis.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), AnalysisError> {
    check_duplicate_ids(tasks)?;
    check_weights(tasks)?;
    check_dependencies(tasks)?;
    topological_order(&TaskNetwork::from_tasks(tasks))?;
    Ok(())
}
