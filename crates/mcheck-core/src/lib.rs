//! Bounded verification engine: safety-invariant checking over every state
//! reachable, within a bound, from a model's initial configuration.
//!
//! Four exploration strategies — deduplicated BFS, bounded DFS, randomized
//! trial sampling and exhaustive subset enumeration — drive five built-in
//! models under one reporting contract ([`ModelReport`]).

pub mod bfs;
pub mod dfs;
pub mod error;
pub mod model;
pub mod models;
pub mod report;
pub mod sample;
pub mod state;
pub mod subsets;

pub use error::{CheckError, CheckResult};
pub use model::{Model, TrialModel, Violation};
pub use models::{run_model, ModelName, PolicyDefinition};
pub use report::{ModelReport, Summary};
pub use state::{fingerprint_of, Fingerprint};
