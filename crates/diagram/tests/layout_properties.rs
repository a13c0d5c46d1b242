//! Property-based tests for level assignment and layout geometry.
//!
//! Random DAGs are generated with edges only from lower to higher index,
//! which guarantees acyclicity; random cyclic graphs check termination
//! under both cycle policies.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use keel_diagram::{layout_network, CyclePolicy, DependencyGraph, LayoutConfig};
use keel_model::{Dependency, Task, TaskId, TaskKind, TaskStatus};
use proptest::prelude::*;
use std::collections::HashSet;

fn task_with_deps(id: usize, predecessors: &[usize]) -> Task {
    Task {
        id: TaskId::new(format!("t-{id}")),
        name: format!("Task {id}"),
        start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        finish: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        duration_days: 5.0,
        status: TaskStatus::NotStarted,
        progress: 0,
        dependencies: predecessors
            .iter()
            .map(|p| Dependency::finish_to_start(format!("t-{p}")))
            .collect(),
        critical: false,
        total_float_days: 0.0,
        kind: TaskKind::Task,
    }
}

/// Strategy: a DAG as (node_count, forward edges (from < to), deduped).
fn dag_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..12).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n - 1, 1..n), 0..20).prop_map(move |pairs| {
            let mut seen = HashSet::new();
            pairs
                .into_iter()
                .filter_map(|(a, b)| {
                    let (from, to) = if a < b { (a, b) } else if b < a { (b, a) } else {
                        return None;
                    };
                    seen.insert((from, to)).then_some((from, to))
                })
                .collect::<Vec<_>>()
        });
        (Just(n), edges)
    })
}

fn tasks_from_dag(n: usize, edges: &[(usize, usize)]) -> Vec<Task> {
    (0..n)
        .map(|i| {
            let preds: Vec<usize> = edges
                .iter()
                .filter(|(_, to)| *to == i)
                .map(|(from, _)| *from)
                .collect();
            task_with_deps(i, &preds)
        })
        .collect()
}

proptest! {
    /// Property: every edge points to a strictly deeper level.
    #[test]
    fn prop_levels_respect_edges((n, edges) in dag_strategy()) {
        let tasks = tasks_from_dag(n, &edges);
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();
        let levels = graph.assign_levels(CyclePolicy::Reject).unwrap();

        prop_assert_eq!(levels.len(), n);
        for (from, to) in &edges {
            let lf = levels[&TaskId::new(format!("t-{from}"))];
            let lt = levels[&TaskId::new(format!("t-{to}"))];
            prop_assert!(lt > lf, "edge {from}->{to} levels {lf}->{lt}");
        }
    }

    /// Property: every task is placed exactly once, and no two nodes in
    /// the same column share a y coordinate.
    #[test]
    fn prop_placements_unique((n, edges) in dag_strategy()) {
        let tasks = tasks_from_dag(n, &edges);
        let layout =
            layout_network(&tasks, &LayoutConfig::default(), CyclePolicy::Reject).unwrap();

        prop_assert_eq!(layout.nodes.len(), n);

        let mut seen = HashSet::new();
        for node in &layout.nodes {
            prop_assert!(
                seen.insert((node.level, node.y.to_bits())),
                "column {} has two nodes at y={}",
                node.level,
                node.y
            );
        }
    }

    /// Property: connector count equals dependency edge count.
    #[test]
    fn prop_connector_per_edge((n, edges) in dag_strategy()) {
        let tasks = tasks_from_dag(n, &edges);
        let layout =
            layout_network(&tasks, &LayoutConfig::default(), CyclePolicy::Reject).unwrap();
        prop_assert_eq!(layout.connectors.len(), edges.len());
    }

    /// Property: a ring of any size terminates - rejected under Reject,
    /// finite placement under BestEffort.
    #[test]
    fn prop_cycles_terminate(n in 2usize..10) {
        let tasks: Vec<Task> = (0..n)
            .map(|i| task_with_deps(i, &[(i + n - 1) % n]))
            .collect();

        let rejected =
            layout_network(&tasks, &LayoutConfig::default(), CyclePolicy::Reject);
        prop_assert!(rejected.is_err());

        let layout =
            layout_network(&tasks, &LayoutConfig::default(), CyclePolicy::BestEffort).unwrap();
        prop_assert_eq!(layout.nodes.len(), n);
    }
}
