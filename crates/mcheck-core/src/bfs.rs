//! Deduplicated breadth-first search over a model's reachable-state graph.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, trace};

use crate::model::Model;
use crate::report::ModelReport;
use crate::state::{fingerprint_of, Fingerprint};

/// Explore the reachable-state graph of `model` breadth-first, visiting each
/// distinct state at most once and expanding no state at depth >= `depth_bound`.
///
/// Invariants are evaluated on every dequeued state. The first violating
/// state terminates the whole search; all violations at that single state are
/// reported together. Reachability counterexamples are single witnesses, so
/// sibling branches are not searched for more.
///
/// Terminates because the visited set prevents revisiting and the depth bound
/// caps expansion of a finite action universe.
pub fn check_bfs<M: Model>(model: &M, depth_bound: usize) -> ModelReport {
    let mut queue: VecDeque<(M::State, usize)> = VecDeque::new();
    let mut visited: HashSet<Fingerprint> = HashSet::new();
    let mut explored = 0usize;
    let mut max_depth = 0usize;

    queue.push_back((model.initial_state(), 0));

    while let Some((state, depth)) = queue.pop_front() {
        let fp = fingerprint_of(&state);
        if !visited.insert(fp) {
            continue;
        }
        explored += 1;
        max_depth = max_depth.max(depth);
        trace!(depth, fp = %fp, "exploring state");

        let violations = model.invariants(&state);
        if !violations.is_empty() {
            debug!(
                model = model.name(),
                depth,
                count = violations.len(),
                "invariant violation, stopping search"
            );
            return ModelReport::failed(model.name(), explored, violations);
        }

        if depth >= depth_bound {
            continue;
        }

        for action in model.actions(&state) {
            queue.push_back((model.apply(&state, &action), depth + 1));
        }
    }

    info!(
        model = model.name(),
        states = explored,
        max_depth,
        "search complete, all invariants hold"
    );
    ModelReport::passed(model.name(), explored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Violation;

    /// Counter that can step +1 or +2; state space is a DAG with shared
    /// states, so dedup matters.
    struct Counter {
        bad: Option<i64>,
    }

    impl Model for Counter {
        type State = i64;
        type Action = i64;

        fn name(&self) -> &'static str {
            "counter"
        }

        fn initial_state(&self) -> i64 {
            0
        }

        fn actions(&self, _state: &i64) -> Vec<i64> {
            vec![1, 2]
        }

        fn apply(&self, state: &i64, action: &i64) -> i64 {
            state + action
        }

        fn invariants(&self, state: &i64) -> Vec<Violation> {
            match self.bad {
                Some(bad) if *state == bad => {
                    vec![Violation::new("TEST-INV", format!("counter reached {state}"))]
                }
                _ => vec![],
            }
        }
    }

    #[test]
    fn test_bfs_deduplicates_shared_states() {
        let report = check_bfs(&Counter { bad: None }, 3);
        // Reachable values within depth 3: 0..=6, each visited once.
        assert!(report.passed);
        assert_eq!(report.explored, 7);
    }

    #[test]
    fn test_bfs_short_circuits_on_violation() {
        let report = check_bfs(&Counter { bad: Some(2) }, 10);
        assert!(!report.passed);
        assert_eq!(report.violations, vec!["TEST-INV: counter reached 2"]);
        // BFS order: 0, 1, 2 — stops before exploring anything deeper.
        assert_eq!(report.explored, 3);
    }

    #[test]
    fn test_bfs_respects_depth_bound() {
        // Violation sits at value 5, reachable only at depth >= 3.
        let report = check_bfs(&Counter { bad: Some(5) }, 2);
        assert!(report.passed);
        // Depth <= 2 reaches values 0..=4.
        assert_eq!(report.explored, 5);
    }
}
