//! Policy-compilation model, checked by exhaustive subset enumeration.
//!
//! Compiling a set of active policies unions their generated constraints.
//! For every subset of the policy universe whose generated constraints carry
//! no conflicting pair, compilation must be complete (every active policy's
//! constraints present) and consistent (no conflicting pair present).

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::error::{CheckError, CheckResult};
use crate::model::Violation;
use crate::report::ModelReport;
use crate::subsets::check_subsets;

/// Externally supplied (or built-in default) policy universe.
///
/// JSON shape: `{"policies": [...], "map": {"p": ["c", ...]}, "conflicts":
/// [["c1", "c2"], ...]}`. All three keys are required; a malformed file is a
/// configuration error, never silently replaced by the default.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyDefinition {
    pub policies: Vec<String>,
    pub map: BTreeMap<String, BTreeSet<String>>,
    pub conflicts: Vec<[String; 2]>,
}

impl PolicyDefinition {
    /// The built-in universe used when no external definition is supplied.
    pub fn builtin() -> Self {
        Self {
            policies: vec!["p1".into(), "p2".into(), "p3".into()],
            map: [
                ("p1".to_string(), BTreeSet::from(["c1".to_string()])),
                ("p2".to_string(), BTreeSet::from(["c2".to_string()])),
                ("p3".to_string(), BTreeSet::from(["c3".to_string()])),
            ]
            .into(),
            conflicts: vec![["c1".into(), "c2".into()]],
        }
    }

    /// Reject definitions that cannot be checked: every declared policy must
    /// have a constraint mapping, and the universe must be small enough for
    /// exhaustive 2^n subset enumeration.
    pub fn validate(&self) -> CheckResult<()> {
        if self.policies.len() >= usize::BITS as usize {
            return Err(CheckError::Config(format!(
                "policy universe of {} exceeds the {} policies exhaustive \
                 enumeration can cover",
                self.policies.len(),
                usize::BITS as usize - 1
            )));
        }
        for policy in &self.policies {
            if !self.map.contains_key(policy) {
                return Err(CheckError::Config(format!(
                    "policy '{policy}' has no entry in the constraint map"
                )));
            }
        }
        Ok(())
    }

    /// Conflict pairs are unordered: {c1,c2} equals {c2,c1}.
    fn is_conflicting(&self, a: &str, b: &str) -> bool {
        self.conflicts
            .iter()
            .any(|[x, y]| (x == a && y == b) || (x == b && y == a))
    }

    /// The compile step under test: union the constraints of every active
    /// policy.
    fn compile(&self, active: &[&String]) -> BTreeSet<&str> {
        let mut generated = BTreeSet::new();
        for policy in active {
            if let Some(constraints) = self.map.get(*policy) {
                generated.extend(constraints.iter().map(String::as_str));
            }
        }
        generated
    }
}

/// Check completeness and consistency over every subset of the policy
/// universe. Violations across subsets are accumulated, not short-circuited.
pub fn check_policy(definition: &PolicyDefinition) -> CheckResult<ModelReport> {
    definition.validate()?;

    let report = check_subsets("policy-compiler", &definition.policies, |active| {
        let mut violations = Vec::new();
        let generated = definition.compile(active);

        let has_conflict = generated.iter().any(|a| {
            generated
                .iter()
                .any(|b| a != b && definition.is_conflicting(a, b))
        });
        if has_conflict {
            // A subset that compiles to conflicting constraints is excluded
            // from both checks; the empty subset trivially passes them.
            return violations;
        }

        // POLICY-INV-1: completeness — every active policy's declared
        // constraints are all present in the generated set.
        for policy in active {
            if let Some(constraints) = definition.map.get(*policy) {
                if !constraints
                    .iter()
                    .all(|c| generated.contains(c.as_str()))
                {
                    violations.push(Violation::new(
                        "POLICY-INV-1",
                        format!("policy {policy} active but constraints missing"),
                    ));
                }
            }
        }

        // POLICY-INV-2: consistency — no conflicting pair slipped through a
        // compile step that also mislabelled it non-conflicting.
        for a in &generated {
            for b in &generated {
                if a < b && definition.is_conflicting(a, b) {
                    violations.push(Violation::new(
                        "POLICY-INV-2",
                        format!("conflict {a}<->{b} passed compilation"),
                    ));
                }
            }
        }

        violations
    });

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_universe_passes_all_subsets() {
        let definition = PolicyDefinition::builtin();
        let report = check_policy(&definition).unwrap();
        assert!(report.passed, "violations: {:?}", report.violations);
        assert_eq!(report.explored, 8);
    }

    #[test]
    fn test_conflicting_subset_is_excluded_not_flagged() {
        // {p1,p2} generates {c1,c2} which contains the declared conflict, so
        // it is excluded from the checks rather than reported.
        let definition = PolicyDefinition::builtin();
        let active = [&definition.policies[0], &definition.policies[1]];
        let generated = definition.compile(&active);
        assert!(generated.contains("c1") && generated.contains("c2"));
        assert!(definition.is_conflicting("c1", "c2"));
        // Whole-universe run still passes: the conflicted subsets are skipped.
        assert!(check_policy(&definition).unwrap().passed);
    }

    #[test]
    fn test_conflict_pairs_are_unordered() {
        let definition = PolicyDefinition::builtin();
        assert!(definition.is_conflicting("c1", "c2"));
        assert!(definition.is_conflicting("c2", "c1"));
        assert!(!definition.is_conflicting("c1", "c3"));
    }

    #[test]
    fn test_oversized_universe_is_config_error_not_panic() {
        // 64 policies would need a 2^64 subset mask; a well-formed external
        // file of that size must surface a configuration error, not reach
        // the enumerator.
        let mut definition = PolicyDefinition {
            policies: Vec::new(),
            map: BTreeMap::new(),
            conflicts: Vec::new(),
        };
        for i in 0..64 {
            let name = format!("p{i}");
            definition.map.insert(name.clone(), BTreeSet::new());
            definition.policies.push(name);
        }

        let err = check_policy(&definition).unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
        assert!(err.to_string().contains("universe"));
    }

    #[test]
    fn test_policy_missing_from_map_is_config_error() {
        let mut definition = PolicyDefinition::builtin();
        definition.map.remove("p2");
        let err = check_policy(&definition).unwrap_err();
        assert!(err.to_string().contains("p2"));
    }

    #[test]
    fn test_definition_parses_from_original_json_shape() {
        let json = r#"{
            "policies": ["p1", "p2"],
            "map": {"p1": ["c1"], "p2": ["c2"]},
            "conflicts": [["c1", "c2"]]
        }"#;
        let definition: PolicyDefinition = serde_json::from_str(json).unwrap();
        definition.validate().unwrap();
        let report = check_policy(&definition).unwrap();
        assert!(report.passed);
        assert_eq!(report.explored, 4);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let json = r#"{"policies": ["p1"], "map": {"p1": ["c1"]}}"#;
        assert!(serde_json::from_str::<PolicyDefinition>(json).is_err());
    }
}
