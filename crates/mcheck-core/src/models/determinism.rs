//! Hash-determinism model, checked by randomized trial sampling.
//!
//! The hashing contract: hashing is a pure function of (domain prefix, raw
//! input), and distinct domain prefixes never collide on the same input. The
//! simulated hash is SHA-256 truncated to 16 hex chars; each trial observes
//! it through a randomly ordered call sequence and a replay pass.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use sha2::{Digest as _, Sha256};

use crate::model::{TrialModel, Violation};

const DOMAIN_PREFIXES: [&str; 3] = ["req:", "res:", "cas:"];
const INPUTS: [&str; 4] = ["input_a", "input_b", "input_c", ""];

/// Truncated digest length in hex chars.
const DIGEST_LEN: usize = 16;

/// Domain-separated content hash: SHA-256 over prefix || input, truncated.
fn simulate_hash(prefix: &str, input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(input.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(DIGEST_LEN);
    digest
}

/// Number of randomly ordered hash calls observed per trial.
pub struct DeterminismModel {
    pub calls_per_trial: usize,
}

impl TrialModel for DeterminismModel {
    fn name(&self) -> &'static str {
        "determinism"
    }

    fn run_trial(&self, rng: &mut StdRng) -> Vec<Violation> {
        let mut violations = Vec::new();

        // The memo table plays the role of the fixed function: the first call
        // per (prefix, input) fixes the digest, later calls must observe it.
        let mut hash_fn: BTreeMap<(&str, &str), String> = BTreeMap::new();
        let mut call_log: Vec<(&str, &str, String)> = Vec::new();

        let mut ops: Vec<(&str, &str)> = Vec::new();
        for prefix in DOMAIN_PREFIXES {
            for input in INPUTS {
                ops.push((prefix, input));
            }
        }
        ops.shuffle(rng);

        for _ in 0..self.calls_per_trial {
            let (prefix, input) = match ops.choose(rng) {
                Some(op) => *op,
                None => continue,
            };
            let digest = hash_fn
                .entry((prefix, input))
                .or_insert_with(|| simulate_hash(prefix, input))
                .clone();
            call_log.push((prefix, input, digest));
        }

        // DET-INV-1: purity — the same (prefix, input) always observes the
        // same digest, across call sites and across the replay pass.
        let mut seen: BTreeMap<(&str, &str), &str> = BTreeMap::new();
        for (prefix, input, digest) in &call_log {
            match seen.get(&(*prefix, *input)) {
                Some(previous) if *previous != digest.as_str() => {
                    violations.push(Violation::new(
                        "DET-INV-1",
                        format!(
                            "hash({prefix},{input}) returned {digest} \
                             but previously returned {previous}"
                        ),
                    ));
                }
                Some(_) => {}
                None => {
                    seen.insert((*prefix, *input), digest.as_str());
                }
            }
        }
        for (prefix, input, digest) in &call_log {
            let replayed = simulate_hash(prefix, input);
            if replayed != *digest {
                violations.push(Violation::new(
                    "DET-INV-1",
                    format!("replay hash({prefix},{input})={replayed} != original={digest}"),
                ));
            }
        }

        // DET-INV-2: domain separation — two distinct prefixes never produce
        // the same digest for the same raw input.
        for input in INPUTS {
            for (i, a) in DOMAIN_PREFIXES.iter().enumerate() {
                for b in &DOMAIN_PREFIXES[i + 1..] {
                    if simulate_hash(a, input) == simulate_hash(b, input) {
                        violations.push(Violation::new(
                            "DET-INV-2",
                            format!(
                                "domain prefix collision: '{a}' and '{b}' \
                                 share a digest for input '{input}'"
                            ),
                        ));
                    }
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::check_trials;
    use rand::SeedableRng;

    #[test]
    fn test_simulated_hash_is_stable_and_truncated() {
        let a = simulate_hash("req:", "input_a");
        let b = simulate_hash("req:", "input_a");
        assert_eq!(a, b);
        assert_eq!(a.len(), DIGEST_LEN);
    }

    #[test]
    fn test_domain_prefixes_separate() {
        assert_ne!(simulate_hash("req:", "input_a"), simulate_hash("cas:", "input_a"));
        assert_ne!(simulate_hash("req:", ""), simulate_hash("res:", ""));
    }

    #[test]
    fn test_determinism_holds_over_trials() {
        let model = DeterminismModel { calls_per_trial: 30 };
        let mut rng = StdRng::seed_from_u64(0xd9);
        let report = check_trials(&model, 30, &mut rng);
        assert!(report.passed, "violations: {:?}", report.violations);
        assert_eq!(report.explored, 30);
    }
}
