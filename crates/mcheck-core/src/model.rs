//! Model capability traits consumed by the exploration strategies.

use std::fmt;
use std::hash::Hash;

use rand::rngs::StdRng;

/// A single invariant violation witnessed at some state, trial or subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Stable invariant identifier, e.g. `CAS-INV-1`.
    pub invariant: &'static str,
    /// Human-readable description including the offending values.
    pub message: String,
}

impl Violation {
    pub fn new(invariant: &'static str, message: impl Into<String>) -> Self {
        Self {
            invariant,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

/// A state-transition model checked by graph or tree exploration.
///
/// Successor generation must be a pure function of the current state:
/// structurally equal states must have identical legal actions and apply
/// results, otherwise BFS deduplication is unsound.
pub trait Model {
    /// Configuration of the model. Hashed for visited-set deduplication,
    /// so containers inside must hash independently of insertion order.
    type State: Clone + Eq + Hash + fmt::Debug;
    /// One legal move from a state.
    type Action: fmt::Debug;

    fn name(&self) -> &'static str;

    fn initial_state(&self) -> Self::State;

    /// The finite set of actions legal from `state`. Empty means the state
    /// has no successors (e.g. a terminated protocol stream).
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn apply(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Evaluate every invariant at `state`; empty means all hold.
    fn invariants(&self, state: &Self::State) -> Vec<Violation>;
}

/// A model checked by independent randomized trials rather than state
/// exploration.
///
/// Each trial fixes one randomly sampled deterministic function and checks
/// cross-cutting consistency properties over observations of it. The checked
/// property must be invariant over any fixed function, which is what makes
/// sampling sufficient in place of exhaustive enumeration.
pub trait TrialModel {
    fn name(&self) -> &'static str;

    /// Run one independent trial, returning every violation it witnessed.
    fn run_trial(&self, rng: &mut StdRng) -> Vec<Violation>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let v = Violation::new("CAS-INV-1", "digest d1 mapped to 'c_a' but write has 'c_b'");
        assert_eq!(
            v.to_string(),
            "CAS-INV-1: digest d1 mapped to 'c_a' but write has 'c_b'"
        );
    }
}
