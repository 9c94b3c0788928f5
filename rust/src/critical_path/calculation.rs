//! Longest-path calculation over the task network.
//!
//! Kahn-style topological processing: a node is settled once all of its
//! predecessors are, and its distance is the heaviest cumulative weight of
//! any chain ending at it. Nodes on a cycle (or downstream of one) never
//! reach in-degree zero, are never settled, and take no part in the result.
//! The traversal visits each node and edge at most once, so it terminates
//! for any input shape.

use std::collections::{HashMap, VecDeque};

use crate::interner::NodeId;
use crate::models::CriticalPathResult;
use crate::network::TaskNetwork;
use crate::{log_changes, log_debug};

/// Per-node traversal state, indexed by `NodeId`.
struct Traversal {
    distance: Vec<Option<f64>>,
    predecessor: Vec<Option<NodeId>>,
    settled: Vec<bool>,
}

fn traverse(network: &TaskNetwork, verbosity: u8) -> Traversal {
    let n = network.len();
    let mut in_degree = network.in_degrees().to_vec();
    let mut distance: Vec<Option<f64>> = vec![None; n];
    let mut predecessor: Vec<Option<NodeId>> = vec![None; n];
    let mut settled = vec![false; n];

    // Sources enter the queue in node order; this fixes tie-breaking.
    let mut queue: VecDeque<NodeId> = VecDeque::with_capacity(n);
    for node in network.node_ids() {
        if in_degree[node as usize] == 0 {
            distance[node as usize] = Some(network.weight(node));
            queue.push_back(node);
        }
    }

    while let Some(node) = queue.pop_front() {
        let idx = node as usize;
        settled[idx] = true;
        let base = distance[idx].unwrap_or_else(|| network.weight(node));

        for &succ in network.successors(node) {
            let succ_idx = succ as usize;
            let candidate = base + network.weight(succ);
            let improves = match distance[succ_idx] {
                None => true,
                Some(current) => candidate > current,
            };
            if improves {
                log_debug!(
                    verbosity,
                    "Relax {} -> {}: distance {}",
                    network.name(node),
                    network.name(succ),
                    candidate
                );
                distance[succ_idx] = Some(candidate);
                predecessor[succ_idx] = Some(node);
            }

            in_degree[succ_idx] -= 1;
            if in_degree[succ_idx] == 0 {
                queue.push_back(succ);
            }
        }
    }

    Traversal {
        distance,
        predecessor,
        settled,
    }
}

/// Calculate the critical path of a task network.
///
/// The terminal node is the settled node with the largest distance; on ties
/// the one earliest in node order wins. The path runs from the start of its
/// heaviest chain to the terminal node. An empty network, or one where every
/// node sits on a cycle, yields an empty path with duration 0.
pub fn calculate_critical_path(network: &TaskNetwork, verbosity: u8) -> CriticalPathResult {
    if network.is_empty() {
        return CriticalPathResult::default();
    }

    let traversal = traverse(network, verbosity);

    let mut terminal: Option<(NodeId, f64)> = None;
    let mut distances: HashMap<String, f64> = HashMap::with_capacity(network.len());
    for node in network.node_ids() {
        let idx = node as usize;
        if !traversal.settled[idx] {
            continue;
        }
        let Some(dist) = traversal.distance[idx] else {
            continue;
        };
        distances.insert(network.name(node).to_string(), dist);
        if terminal.map_or(true, |(_, best)| dist > best) {
            terminal = Some((node, dist));
        }
    }

    let Some((terminal, duration)) = terminal else {
        log_changes!(verbosity, "Critical path: no settled tasks");
        return CriticalPathResult {
            path: Vec::new(),
            duration: 0.0,
            distances,
        };
    };

    let mut path = vec![network.name(terminal).to_string()];
    let mut cursor = terminal;
    while let Some(prev) = traversal.predecessor[cursor as usize] {
        path.push(network.name(prev).to_string());
        cursor = prev;
    }
    path.reverse();

    log_changes!(
        verbosity,
        "Critical path: {} tasks, duration {} ({} of {} tasks settled)",
        path.len(),
        duration,
        distances.len(),
        network.len()
    );

    CriticalPathResult {
        path,
        duration,
        distances,
    }
}

/// Network tasks the traversal never settled, in node order.
pub fn unreached_tasks(network: &TaskNetwork, result: &CriticalPathResult) -> Vec<String> {
    network
        .node_ids()
        .map(|node| network.name(node))
        .filter(|name| !result.distances.contains_key(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use chrono::{NaiveDate, NaiveDateTime};

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn make_task(id: &str, weight: f64, deps: Vec<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: String::new(),
            start_date: Some(day(1)),
            end_date: Some(day(3)),
            weight: Some(weight),
            dependencies: deps.into_iter().map(str::to_string).collect(),
            completed_effort: None,
            planned_effort: None,
            is_done: false,
            kind: None,
        }
    }

    fn critical_path(tasks: &[Task]) -> CriticalPathResult {
        calculate_critical_path(&TaskNetwork::from_tasks(tasks), 0)
    }

    fn ids(path: &[String]) -> Vec<&str> {
        path.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_network() {
        let result = critical_path(&[]);
        assert!(result.path.is_empty());
        assert_eq!(result.duration, 0.0);
        assert!(result.distances.is_empty());
    }

    #[test]
    fn test_single_task() {
        let result = critical_path(&[make_task("a", 5.0, vec![])]);
        assert_eq!(ids(&result.path), vec!["a"]);
        assert_eq!(result.duration, 5.0);
    }

    #[test]
    fn test_linear_chain() {
        let tasks = vec![
            make_task("a", 2.0, vec![]),
            make_task("b", 3.0, vec!["a"]),
            make_task("c", 4.0, vec!["b"]),
        ];
        let result = critical_path(&tasks);
        assert_eq!(ids(&result.path), vec!["a", "b", "c"]);
        assert_eq!(result.duration, 9.0);
        assert_eq!(result.distances.get("b"), Some(&5.0));
    }

    #[test]
    fn test_diamond_takes_heavier_branch() {
        // a -> b (5) -> d
        // a -> c (2) -> d
        let tasks = vec![
            make_task("a", 1.0, vec![]),
            make_task("b", 5.0, vec!["a"]),
            make_task("c", 2.0, vec!["a"]),
            make_task("d", 1.0, vec!["b", "c"]),
        ];
        let result = critical_path(&tasks);
        assert_eq!(ids(&result.path), vec!["a", "b", "d"]);
        assert_eq!(result.duration, 7.0);
    }

    #[test]
    fn test_diamond_heavier_branch_listed_last() {
        let tasks = vec![
            make_task("a", 1.0, vec![]),
            make_task("c", 2.0, vec!["a"]),
            make_task("b", 5.0, vec!["a"]),
            make_task("d", 1.0, vec!["c", "b"]),
        ];
        let result = critical_path(&tasks);
        assert_eq!(ids(&result.path), vec!["a", "b", "d"]);
        assert_eq!(result.duration, 7.0);
    }

    #[test]
    fn test_tie_prefers_earlier_source() {
        // x and y both feed z with equal weight
        let tasks = vec![
            make_task("x", 3.0, vec![]),
            make_task("y", 3.0, vec![]),
            make_task("z", 1.0, vec!["y", "x"]),
        ];
        let result = critical_path(&tasks);
        assert_eq!(ids(&result.path), vec!["x", "z"]);
        assert_eq!(result.duration, 4.0);

        // Reordering the input flips the choice
        let reordered = vec![tasks[1].clone(), tasks[0].clone(), tasks[2].clone()];
        let result = critical_path(&reordered);
        assert_eq!(ids(&result.path), vec!["y", "z"]);
    }

    #[test]
    fn test_tie_between_disjoint_chains() {
        // p -> q and r -> s, both totalling 5
        let tasks = vec![
            make_task("p", 2.0, vec![]),
            make_task("r", 4.0, vec![]),
            make_task("q", 3.0, vec!["p"]),
            make_task("s", 1.0, vec!["r"]),
        ];
        let result = critical_path(&tasks);
        assert_eq!(ids(&result.path), vec!["p", "q"]);
        assert_eq!(result.duration, 5.0);
    }

    #[test]
    fn test_cycle_excluded_and_terminates() {
        let tasks = vec![
            make_task("a", 10.0, vec!["b"]),
            make_task("b", 10.0, vec!["a"]),
            make_task("solo", 2.0, vec![]),
        ];
        let network = TaskNetwork::from_tasks(&tasks);
        let result = calculate_critical_path(&network, 0);

        assert_eq!(ids(&result.path), vec!["solo"]);
        assert_eq!(result.duration, 2.0);
        assert!(!result.distances.contains_key("a"));
        assert!(!result.distances.contains_key("b"));
        assert_eq!(unreached_tasks(&network, &result), vec!["a", "b"]);
    }

    #[test]
    fn test_cycle_fed_by_settled_task_stays_excluded() {
        // root -> a, and a <-> b: a gets a candidate distance but never settles
        let tasks = vec![
            make_task("root", 1.0, vec![]),
            make_task("a", 50.0, vec!["root", "b"]),
            make_task("b", 50.0, vec!["a"]),
        ];
        let result = critical_path(&tasks);
        assert_eq!(ids(&result.path), vec!["root"]);
        assert_eq!(result.duration, 1.0);
        assert_eq!(result.distances.len(), 1);
    }

    #[test]
    fn test_only_cycle_yields_empty_path() {
        let tasks = vec![make_task("a", 1.0, vec!["a"])];
        let result = critical_path(&tasks);
        assert!(result.path.is_empty());
        assert_eq!(result.duration, 0.0);
    }

    #[test]
    fn test_dangling_dependency_ignored() {
        let tasks = vec![
            make_task("a", 2.0, vec!["missing"]),
            make_task("b", 3.0, vec!["a"]),
        ];
        let result = critical_path(&tasks);
        assert_eq!(ids(&result.path), vec!["a", "b"]);
        assert_eq!(result.duration, 5.0);
    }

    #[test]
    fn test_zero_weight_tasks() {
        let tasks = vec![
            make_task("kickoff", 0.0, vec![]),
            make_task("work", 4.0, vec!["kickoff"]),
            make_task("launch", 0.0, vec!["work"]),
        ];
        let result = critical_path(&tasks);
        // launch ties with work at 4.0; work comes first in node order
        assert_eq!(ids(&result.path), vec!["kickoff", "work"]);
        assert_eq!(result.duration, 4.0);
    }

    #[test]
    fn test_duration_is_sum_of_path_weights() {
        let tasks = vec![
            make_task("a", 1.5, vec![]),
            make_task("b", 2.0, vec!["a"]),
            make_task("c", 0.5, vec!["a"]),
            make_task("d", 3.0, vec!["b", "c"]),
            make_task("e", 1.0, vec!["c"]),
        ];
        let result = critical_path(&tasks);
        let sum: f64 = result
            .path
            .iter()
            .map(|id| tasks.iter().find(|t| &t.id == id).unwrap().effective_weight())
            .sum();
        assert_eq!(ids(&result.path), vec!["a", "b", "d"]);
        assert!((result.duration - sum).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let tasks = vec![
            make_task("a", 1.0, vec![]),
            make_task("b", 2.0, vec!["a"]),
            make_task("c", 2.0, vec!["a"]),
            make_task("d", 1.0, vec!["b", "c"]),
        ];
        let first = critical_path(&tasks);
        let second = critical_path(&tasks);
        assert_eq!(first.path, second.path);
        assert_eq!(first.duration.to_bits(), second.duration.to_bits());
    }
}
