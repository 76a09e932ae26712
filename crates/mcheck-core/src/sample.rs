//! Randomized trial sampling for properties invariant over any fixed function.

use rand::rngs::StdRng;
use tracing::{info, trace};

use crate::model::TrialModel;
use crate::report::ModelReport;

/// Run `trials` independent trials of `model`, accumulating every violation.
///
/// Unlike the reachability strategies, sampling never short-circuits: each
/// trial is an independent sample of a fixed deterministic function, and a
/// full violation report across all of them is more useful than the first
/// witness alone.
pub fn check_trials<M: TrialModel>(model: &M, trials: usize, rng: &mut StdRng) -> ModelReport {
    let mut violations = Vec::new();

    for trial in 0..trials {
        let found = model.run_trial(rng);
        trace!(trial, violations = found.len(), "trial complete");
        violations.extend(found);
    }

    if violations.is_empty() {
        info!(
            model = model.name(),
            trials, "all trials complete, all invariants hold"
        );
        ModelReport::passed(model.name(), trials)
    } else {
        ModelReport::failed(model.name(), trials, violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Violation;
    use rand::{Rng, SeedableRng};

    /// Flags every trial whose sampled byte is even.
    struct EvenByte;

    impl TrialModel for EvenByte {
        fn name(&self) -> &'static str {
            "even-byte"
        }

        fn run_trial(&self, rng: &mut StdRng) -> Vec<Violation> {
            let b: u8 = rng.gen();
            if b % 2 == 0 {
                vec![Violation::new("TEST-INV", format!("sampled even byte {b}"))]
            } else {
                vec![]
            }
        }
    }

    #[test]
    fn test_trials_accumulate_instead_of_short_circuiting() {
        let mut rng = StdRng::seed_from_u64(7);
        let report = check_trials(&EvenByte, 64, &mut rng);
        assert!(!report.passed);
        assert_eq!(report.explored, 64);
        // Roughly half the trials violate; all of them must be reported.
        assert!(report.violations.len() > 1);
    }

    #[test]
    fn test_trials_are_reproducible_with_seed() {
        let a = check_trials(&EvenByte, 32, &mut StdRng::seed_from_u64(42));
        let b = check_trials(&EvenByte, 32, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.violations, b.violations);
    }

    #[test]
    fn test_zero_trials_pass_vacuously() {
        let mut rng = StdRng::seed_from_u64(0);
        let report = check_trials(&EvenByte, 0, &mut rng);
        assert!(report.passed);
        assert_eq!(report.explored, 0);
    }
}
