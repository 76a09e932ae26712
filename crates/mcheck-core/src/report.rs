//! Uniform per-model result record and run summary.

use crate::model::Violation;

/// Result of checking one model.
///
/// `violations` is ordered as discovered; empty iff `passed`. `explored`
/// counts whatever the strategy's unit is: unique states for BFS, visited
/// nodes for DFS, trials for sampling, subsets for exhaustive enumeration.
#[derive(Debug, Clone)]
pub struct ModelReport {
    pub model: &'static str,
    pub passed: bool,
    pub violations: Vec<String>,
    pub explored: usize,
}

impl ModelReport {
    pub fn passed(model: &'static str, explored: usize) -> Self {
        Self {
            model,
            passed: true,
            violations: Vec::new(),
            explored,
        }
    }

    pub fn failed(model: &'static str, explored: usize, violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self {
            model,
            passed: false,
            violations: violations.iter().map(|v| v.to_string()).collect(),
            explored,
        }
    }
}

/// Aggregation of every requested model's report.
#[derive(Debug, Default)]
pub struct Summary {
    pub reports: Vec<ModelReport>,
}

impl Summary {
    pub fn push(&mut self, report: ModelReport) {
        self.reports.push(report);
    }

    /// Overall success: every requested model passed.
    pub fn all_passed(&self) -> bool {
        self.reports.iter().all(|r| r.passed)
    }
}
