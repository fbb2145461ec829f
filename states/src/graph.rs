use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use thiserror::Error;

/// A dependency chain, kept for diagnostics when a cycle is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepRoute<N> {
    nodes: Vec<N>,
}

impl<N> DepRoute<N> {
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }
}

impl<N: fmt::Debug> fmt::Display for DepRoute<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in &self.nodes {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{node:?}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError<N: fmt::Debug> {
    #[error("dependency cycle: {0}")]
    CycleDetected(DepRoute<N>),
}

/// Directed graph from a dependency to its dependents.
///
/// The context uses this for dirty propagation (when a state changes,
/// every transitive dependent compute is marked) and for rejecting cyclic
/// compute registrations up front.
#[derive(Debug, Clone)]
pub struct Graph<N: Copy + Ord + fmt::Debug> {
    nodes: BTreeSet<N>,
    edges: BTreeMap<N, BTreeSet<N>>,
}

impl<N: Copy + Ord + fmt::Debug> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy + Ord + fmt::Debug> Graph<N> {
    pub fn new() -> Self {
        Self {
            nodes: BTreeSet::new(),
            edges: BTreeMap::new(),
        }
    }

    pub fn add_node(&mut self, node: N) {
        self.nodes.insert(node);
    }

    /// Record that `dependent` must re-run when `dependency` changes.
    pub fn add_edge(&mut self, dependency: N, dependent: N) {
        self.nodes.insert(dependency);
        self.nodes.insert(dependent);
        self.edges.entry(dependency).or_default().insert(dependent);
    }

    /// Transitive closure of dependents, excluding `node` itself unless a
    /// cycle leads back to it.
    pub fn dependents_of(&self, node: N) -> BTreeSet<N> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([node]);
        while let Some(current) = queue.pop_front() {
            if let Some(nexts) = self.edges.get(&current) {
                for &next in nexts {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        seen
    }

    /// Kahn topological order over all nodes, dependencies first. A cycle
    /// is reported with one offending route.
    pub fn toposort(&self) -> Result<Vec<N>, TopologyError<N>> {
        let mut indegree: BTreeMap<N, usize> = self.nodes.iter().map(|&n| (n, 0)).collect();
        for dependents in self.edges.values() {
            for &dependent in dependents {
                *indegree.entry(dependent).or_insert(0) += 1;
            }
        }
        let mut ready: VecDeque<N> = indegree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(&node, _)| node)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(node) = ready.pop_front() {
            order.push(node);
            if let Some(dependents) = self.edges.get(&node) {
                for &dependent in dependents {
                    if let Some(degree) = indegree.get_mut(&dependent) {
                        *degree -= 1;
                        if *degree == 0 {
                            ready.push_back(dependent);
                        }
                    }
                }
            }
        }
        if order.len() == self.nodes.len() {
            Ok(order)
        } else {
            Err(TopologyError::CycleDetected(self.find_cycle()))
        }
    }

    /// DFS for the error path only: returns one cycle as a closed route.
    fn find_cycle(&self) -> DepRoute<N> {
        const GRAY: u8 = 1;
        const BLACK: u8 = 2;
        let mut colors: BTreeMap<N, u8> = BTreeMap::new();
        for &start in &self.nodes {
            if colors.contains_key(&start) {
                continue;
            }
            let mut path = vec![start];
            let mut stack = vec![(start, self.children_of(start))];
            colors.insert(start, GRAY);
            while let Some(top) = stack.last_mut() {
                let Some(next) = top.1.pop() else {
                    colors.insert(top.0, BLACK);
                    path.pop();
                    stack.pop();
                    continue;
                };
                match colors.get(&next).copied() {
                    Some(GRAY) => {
                        let pos = path.iter().position(|&p| p == next).unwrap_or(0);
                        let mut nodes = path[pos..].to_vec();
                        nodes.push(next);
                        return DepRoute { nodes };
                    }
                    None => {
                        colors.insert(next, GRAY);
                        path.push(next);
                        let children = self.children_of(next);
                        stack.push((next, children));
                    }
                    Some(_) => {}
                }
            }
        }
        DepRoute { nodes: Vec::new() }
    }

    fn children_of(&self, node: N) -> Vec<N> {
        self.edges
            .get(&node)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod graph_tests {
    use super::{Graph, TopologyError};

    fn position(order: &[&str], node: &str) -> usize {
        order
            .iter()
            .position(|&n| n == node)
            .unwrap_or_else(|| panic!("{node} missing from order {order:?}"))
    }

    #[test]
    fn toposort_puts_dependencies_first() {
        let mut graph = Graph::new();
        graph.add_edge("query", "columns");
        graph.add_edge("columns", "layout");
        let order = graph.toposort().unwrap();
        assert!(
            position(&order, "query") < position(&order, "columns"),
            "dependency must come before dependent"
        );
        assert!(
            position(&order, "columns") < position(&order, "layout"),
            "ordering must be transitive"
        );
    }

    #[test]
    fn diamond_orders_every_branch_after_root() {
        let mut graph = Graph::new();
        graph.add_edge("root", "left");
        graph.add_edge("root", "right");
        graph.add_edge("left", "sink");
        graph.add_edge("right", "sink");
        let order = graph.toposort().unwrap();
        assert_eq!(order.len(), 4, "every node appears exactly once");
        assert!(
            position(&order, "sink") > position(&order, "left"),
            "sink must follow both branches"
        );
        assert!(
            position(&order, "sink") > position(&order, "right"),
            "sink must follow both branches"
        );
    }

    #[test]
    fn cycle_is_rejected_with_route() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");
        let TopologyError::CycleDetected(route) =
            graph.toposort().expect_err("cycle must be detected");
        let rendered = route.to_string();
        assert!(
            rendered.contains("\"a\"") && rendered.contains("\"b\""),
            "route should name the participating nodes, got {rendered}"
        );
        assert!(
            route.nodes().first() == route.nodes().last(),
            "route must close back on itself"
        );
    }

    #[test]
    fn dependents_are_transitive() {
        let mut graph = Graph::new();
        graph.add_edge("query", "columns");
        graph.add_edge("columns", "layout");
        graph.add_node("unrelated");
        let dependents = graph.dependents_of("query");
        assert!(dependents.contains("columns"), "direct dependent expected");
        assert!(dependents.contains("layout"), "transitive dependent expected");
        assert!(
            !dependents.contains("unrelated"),
            "disconnected node must not appear"
        );
    }
}
