//! The five built-in models and the per-model strategy dispatch.

pub mod cas;
pub mod determinism;
pub mod policy;
pub mod protocol;
pub mod replay;

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;

use crate::bfs::check_bfs;
use crate::dfs::check_dfs;
use crate::error::{CheckError, CheckResult};
use crate::report::ModelReport;
use crate::sample::check_trials;

pub use policy::PolicyDefinition;

/// The built-in models, each bound to its exploration strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelName {
    /// Content-addressable store; deduplicated BFS.
    Cas,
    /// Frame-stream protocol; bounded DFS.
    Protocol,
    /// Replay equivalence; randomized trial sampling.
    Replay,
    /// Hash determinism; randomized trial sampling.
    Determinism,
    /// Policy compilation; exhaustive subset enumeration.
    PolicyCompiler,
}

impl ModelName {
    pub const ALL: [ModelName; 5] = [
        ModelName::Cas,
        ModelName::Protocol,
        ModelName::Replay,
        ModelName::Determinism,
        ModelName::PolicyCompiler,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelName::Cas => "cas",
            ModelName::Protocol => "protocol",
            ModelName::Replay => "replay",
            ModelName::Determinism => "determinism",
            ModelName::PolicyCompiler => "policy-compiler",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cas" => Ok(ModelName::Cas),
            "protocol" => Ok(ModelName::Protocol),
            "replay" => Ok(ModelName::Replay),
            "determinism" => Ok(ModelName::Determinism),
            "policy-compiler" | "policy" => Ok(ModelName::PolicyCompiler),
            other => Err(CheckError::UnknownModel(other.to_string())),
        }
    }
}

/// Run one model under its strategy.
///
/// `bound` is interpreted per model: BFS graph depth for the CAS model, DFS
/// branch depth for the protocol model, trial count for the sampled models,
/// and ignored by the policy enumeration whose implicit bound is the universe
/// size. The external `policy` definition, if any, must already be validated
/// shape-wise by the loader; semantic validation happens here.
pub fn run_model(
    name: ModelName,
    bound: usize,
    rng: &mut StdRng,
    policy: Option<&PolicyDefinition>,
) -> CheckResult<ModelReport> {
    match name {
        ModelName::Cas => Ok(check_bfs(&cas::CasModel, bound)),
        ModelName::Protocol => Ok(check_dfs(&protocol::ProtocolModel, bound)),
        ModelName::Replay => Ok(check_trials(&replay::ReplayModel, bound, rng)),
        ModelName::Determinism => {
            let model = determinism::DeterminismModel {
                calls_per_trial: bound,
            };
            Ok(check_trials(&model, bound, rng))
        }
        ModelName::PolicyCompiler => {
            let builtin;
            let definition = match policy {
                Some(definition) => definition,
                None => {
                    builtin = PolicyDefinition::builtin();
                    &builtin
                }
            };
            policy::check_policy(definition)
        }
    }
}
