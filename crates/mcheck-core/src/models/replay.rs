//! Replay-equivalence model, checked by randomized trial sampling.
//!
//! Each trial fixes one request->digest function, executes it on every
//! simulated node, then replays it. All nodes must agree per request, and the
//! replay pass must reproduce the original observations exactly. The property
//! holds for any fixed function, so sampling many fixed functions checks it
//! generically.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::model::{TrialModel, Violation};

const REQUESTS: [&str; 2] = ["req_a", "req_b"];
const DIGESTS: [&str; 3] = ["d_x", "d_y", "d_z"];
const NODES: [&str; 3] = ["node_1", "node_2", "node_3"];

pub struct ReplayModel;

impl TrialModel for ReplayModel {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn run_trial(&self, rng: &mut StdRng) -> Vec<Violation> {
        // Sample the deterministic function once; it is fixed for the whole
        // trial, including the replay pass.
        let mut exec_fn: BTreeMap<&str, &str> = BTreeMap::new();
        for request in REQUESTS {
            // Non-empty slice, choose cannot fail.
            let digest = DIGESTS.choose(rng).copied().unwrap_or(DIGESTS[0]);
            exec_fn.insert(request, digest);
        }

        let mut violations = Vec::new();

        // Original pass: every node executes every request.
        let mut results: BTreeMap<(&str, &str), &str> = BTreeMap::new();
        for node in NODES {
            for request in REQUESTS {
                results.insert((node, request), exec_fn[request]);
            }
        }

        // Replay pass: apply the same fixed function again.
        let mut replay_log: Vec<(&str, &str, &str)> = Vec::new();
        for node in NODES {
            for request in REQUESTS {
                replay_log.push((node, request, exec_fn[request]));
            }
        }

        // REPLAY-INV-1: all nodes observe the same digest per request.
        for request in REQUESTS {
            let digests: BTreeSet<&str> = NODES
                .iter()
                .map(|node| results[&(*node, request)])
                .collect();
            if digests.len() > 1 {
                violations.push(Violation::new(
                    "REPLAY-INV-1",
                    format!("request {request} produced different digests: {digests:?}"),
                ));
            }
        }

        // REPLAY-INV-3: replay agrees with the original observation.
        for (node, request, digest) in &replay_log {
            let original = results[&(*node, *request)];
            if original != *digest {
                violations.push(Violation::new(
                    "REPLAY-INV-3",
                    format!("replay({node},{request})={digest} != original={original}"),
                ));
            }
        }

        violations
    }
}
