//! Exhaustive enumeration of every subset of a small finite universe.

use tracing::{info, trace};

use crate::model::Violation;
use crate::report::ModelReport;

/// Enumerate all 2^n subsets of `universe` and evaluate `property` on each,
/// accumulating every violation.
///
/// This is a constraint-satisfaction check, not a reachability check: there
/// is no transition relation and no bound parameter. The universe size is the
/// implicit bound, which is why this is only tractable for small universes.
pub fn check_subsets<T, F>(name: &'static str, universe: &[T], mut property: F) -> ModelReport
where
    F: FnMut(&[&T]) -> Vec<Violation>,
{
    assert!(
        universe.len() < usize::BITS as usize,
        "universe too large for exhaustive subset enumeration"
    );

    let total = 1usize << universe.len();
    let mut violations = Vec::new();

    for mask in 0..total {
        let subset: Vec<&T> = universe
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, item)| item)
            .collect();
        let found = property(&subset);
        trace!(mask, violations = found.len(), "subset checked");
        violations.extend(found);
    }

    if violations.is_empty() {
        info!(
            model = name,
            subsets = total,
            "all subsets checked, property holds"
        );
        ModelReport::passed(name, total)
    } else {
        ModelReport::failed(name, total, violations)
    }
}
