//! Dependency graph built on petgraph.
//!
//! Wraps a directed graph whose edges run predecessor -> successor. Note
//! the inversion relative to the stored data model: a [`Task`] carries a
//! list of dependencies naming its predecessors, while graph edges point
//! forward along the schedule.

use std::collections::{HashMap, VecDeque};

use itertools::Itertools;
use keel_model::{DependencyKind, Task, TaskId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::{DiagramError, DiagramResult};

/// How level assignment treats cyclic dependency data.
///
/// The upstream data source enforces no acyclic guarantee, so the choice
/// is explicit rather than an accident of recursion depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Report cycles as [`DiagramError::CycleDetected`] (default).
    #[default]
    Reject,
    /// Assign the level floor (0) to every node caught in or behind a
    /// cycle and lay out the rest normally. Always terminates.
    BestEffort,
}

/// Directed task dependency graph with O(1) id lookups.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<TaskId, DependencyKind>,
    node_map: HashMap<TaskId, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from the task list, validating every edge.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::DuplicateTask`] for repeated ids,
    /// [`DiagramError::UnknownPredecessor`] for dangling dependency
    /// targets, [`DiagramError::SelfDependency`] for self-loops, and
    /// [`DiagramError::DuplicateDependency`] for repeated edges.
    pub fn from_tasks(tasks: &[Task]) -> DiagramResult<Self> {
        let mut graph = Self::new();
        for task in tasks {
            graph.add_task(task.id.clone())?;
        }
        for task in tasks {
            for dep in &task.dependencies {
                graph.add_dependency(dep.predecessor.clone(), task.id.clone(), dep.kind)?;
            }
        }
        Ok(graph)
    }

    /// Add a node for a task id.
    pub fn add_task(&mut self, id: TaskId) -> DiagramResult<()> {
        if self.node_map.contains_key(&id) {
            return Err(DiagramError::DuplicateTask(id));
        }
        let index = self.graph.add_node(id.clone());
        self.node_map.insert(id, index);
        Ok(())
    }

    /// Add an edge from `predecessor` to `successor`.
    pub fn add_dependency(
        &mut self,
        predecessor: TaskId,
        successor: TaskId,
        kind: DependencyKind,
    ) -> DiagramResult<()> {
        if predecessor == successor {
            return Err(DiagramError::SelfDependency(successor));
        }
        let from = *self
            .node_map
            .get(&predecessor)
            .ok_or_else(|| DiagramError::unknown_predecessor(successor.clone(), predecessor.clone()))?;
        let to = *self
            .node_map
            .get(&successor)
            .ok_or_else(|| DiagramError::TaskNotFound(successor.clone()))?;

        if self.graph.find_edge(from, to).is_some() {
            return Err(DiagramError::duplicate_dependency(successor, predecessor));
        }

        self.graph.add_edge(from, to, kind);
        Ok(())
    }

    /// Number of tasks in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over task ids in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskId> {
        self.graph.node_weights()
    }

    /// Direct predecessors of a task.
    pub fn predecessors(&self, id: &TaskId) -> DiagramResult<Vec<TaskId>> {
        let index = self.index_of(id)?;
        Ok(self
            .graph
            .neighbors_directed(index, Direction::Incoming)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect())
    }

    /// Direct successors of a task.
    pub fn successors(&self, id: &TaskId) -> DiagramResult<Vec<TaskId>> {
        let index = self.index_of(id)?;
        Ok(self
            .graph
            .neighbors_directed(index, Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect())
    }

    /// Assign each task its longest-path distance from a dependency-free
    /// root, using an iterative Kahn traversal.
    ///
    /// Dependency-free tasks sit at level 0; every other task sits one
    /// past its deepest predecessor. Disconnected subgraphs are leveled
    /// independently.
    ///
    /// # Errors
    ///
    /// Under [`CyclePolicy::Reject`], returns
    /// [`DiagramError::CycleDetected`] naming the tasks on a cycle.
    pub fn assign_levels(&self, policy: CyclePolicy) -> DiagramResult<HashMap<TaskId, usize>> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|n| {
                (
                    n,
                    self.graph.neighbors_directed(n, Direction::Incoming).count(),
                )
            })
            .collect();

        let mut levels: HashMap<NodeIndex, usize> = HashMap::new();
        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|n| in_degree.get(n).copied() == Some(0))
            .collect();
        for &root in &queue {
            levels.insert(root, 0);
        }

        while let Some(node) = queue.pop_front() {
            let level = levels.get(&node).copied().unwrap_or(0);
            for succ in self.graph.neighbors_directed(node, Direction::Outgoing) {
                let entry = levels.entry(succ).or_insert(0);
                *entry = (*entry).max(level + 1);

                if let Some(degree) = in_degree.get_mut(&succ) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(succ);
                    }
                }
            }
        }

        let unprocessed: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|n| in_degree.get(n).copied().unwrap_or(0) > 0)
            .collect();

        if !unprocessed.is_empty() {
            let cycle_members = self.cycle_members();
            match policy {
                CyclePolicy::Reject => {
                    return Err(DiagramError::CycleDetected(cycle_members));
                }
                CyclePolicy::BestEffort => {
                    tracing::warn!(
                        cycle = ?cycle_members,
                        "dependency cycle detected; assigning level 0 to affected tasks"
                    );
                    for node in unprocessed {
                        levels.insert(node, 0);
                    }
                }
            }
        }

        Ok(levels
            .into_iter()
            .filter_map(|(index, level)| {
                self.graph.node_weight(index).cloned().map(|id| (id, level))
            })
            .collect())
    }

    /// Task ids on a dependency cycle, in sorted order.
    ///
    /// Members of any strongly connected component larger than one node;
    /// self-loops cannot occur because insertion rejects them.
    fn cycle_members(&self) -> Vec<TaskId> {
        petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .flatten()
            .filter_map(|index| self.graph.node_weight(index).cloned())
            .sorted()
            .collect()
    }

    fn index_of(&self, id: &TaskId) -> DiagramResult<NodeIndex> {
        self.node_map
            .get(id)
            .copied()
            .ok_or_else(|| DiagramError::TaskNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;

    fn graph_from_edges(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for node in nodes {
            graph.add_task(TaskId::new(*node)).unwrap();
        }
        for (from, to) in edges {
            graph
                .add_dependency(
                    TaskId::new(*from),
                    TaskId::new(*to),
                    DependencyKind::FinishToStart,
                )
                .unwrap();
        }
        graph
    }

    #[test]
    fn empty_graph_has_no_levels() {
        let graph = DependencyGraph::new();
        let levels = graph.assign_levels(CyclePolicy::Reject).unwrap();
        assert!(levels.is_empty());
    }

    #[test]
    fn linear_chain_levels() {
        let graph = graph_from_edges(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let levels = graph.assign_levels(CyclePolicy::Reject).unwrap();

        assert_eq!(levels[&TaskId::new("a")], 0);
        assert_eq!(levels[&TaskId::new("b")], 1);
        assert_eq!(levels[&TaskId::new("c")], 2);
    }

    #[test]
    fn level_is_longest_path_not_shortest() {
        // a -> b -> d and a -> d: d must sit past b, not beside it.
        let graph = graph_from_edges(
            &["a", "b", "d"],
            &[("a", "b"), ("b", "d"), ("a", "d")],
        );
        let levels = graph.assign_levels(CyclePolicy::Reject).unwrap();

        assert_eq!(levels[&TaskId::new("d")], 2);
    }

    #[test]
    fn disconnected_subgraphs_level_independently() {
        let graph = graph_from_edges(&["a", "b", "x", "y"], &[("a", "b"), ("x", "y")]);
        let levels = graph.assign_levels(CyclePolicy::Reject).unwrap();

        assert_eq!(levels[&TaskId::new("a")], 0);
        assert_eq!(levels[&TaskId::new("x")], 0);
        assert_eq!(levels[&TaskId::new("b")], 1);
        assert_eq!(levels[&TaskId::new("y")], 1);
    }

    #[test]
    fn cycle_is_rejected_with_member_ids() {
        let graph = graph_from_edges(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("a", "c")]);
        let err = graph.assign_levels(CyclePolicy::Reject).unwrap_err();

        match err {
            DiagramError::CycleDetected(members) => {
                assert_eq!(members, vec![TaskId::new("a"), TaskId::new("b")]);
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn best_effort_terminates_on_cycle() {
        let graph = graph_from_edges(&["a", "b"], &[("a", "b"), ("b", "a")]);
        let levels = graph.assign_levels(CyclePolicy::BestEffort).unwrap();

        // Some finite assignment for every node; exact values are not a
        // contract for pathological graphs.
        assert_eq!(levels.len(), 2);
        assert!(levels.values().all(|&l| l < 2));
    }

    #[test]
    fn self_dependency_is_rejected_at_insert() {
        let mut graph = DependencyGraph::new();
        graph.add_task(TaskId::new("a")).unwrap();
        let err = graph
            .add_dependency(
                TaskId::new("a"),
                TaskId::new("a"),
                DependencyKind::FinishToStart,
            )
            .unwrap_err();
        assert!(matches!(err, DiagramError::SelfDependency(_)));
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let mut graph = graph_from_edges(&["a", "b"], &[("a", "b")]);
        let err = graph
            .add_dependency(
                TaskId::new("a"),
                TaskId::new("b"),
                DependencyKind::FinishToStart,
            )
            .unwrap_err();
        assert!(matches!(err, DiagramError::DuplicateDependency { .. }));
    }

    #[test]
    fn unknown_predecessor_is_reported() {
        let mut graph = DependencyGraph::new();
        graph.add_task(TaskId::new("b")).unwrap();
        let err = graph
            .add_dependency(
                TaskId::new("ghost"),
                TaskId::new("b"),
                DependencyKind::FinishToStart,
            )
            .unwrap_err();
        assert!(matches!(err, DiagramError::UnknownPredecessor { .. }));
    }

    #[test]
    fn predecessors_and_successors_are_inverse() {
        let graph = graph_from_edges(&["a", "b", "c"], &[("a", "b"), ("a", "c")]);

        let succ = graph.successors(&TaskId::new("a")).unwrap();
        assert_eq!(succ.len(), 2);

        let preds = graph.predecessors(&TaskId::new("b")).unwrap();
        assert_eq!(preds, vec![TaskId::new("a")]);
    }
}
