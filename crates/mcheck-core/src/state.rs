//! State fingerprinting for visited-set deduplication.

use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

/// A fingerprint is a 64-bit hash identifying a state.
///
/// BFS uses fingerprints as canonical keys: two structurally equal states
/// always produce the same fingerprint, so a state is expanded at most once.
/// Order-sensitive containers must not appear in state types; the built-in
/// models use `BTreeMap`/`BTreeSet` so that insertion order cannot leak into
/// the hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn from_u64(v: u64) -> Self {
        Fingerprint(v)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({:016x})", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Compute the fingerprint of any hashable state.
///
/// Uses a fixed-key AHasher so fingerprints are stable within a run
/// regardless of which exploration constructed the state.
pub fn fingerprint_of<T: Hash>(value: &T) -> Fingerprint {
    let mut hasher = ahash::RandomState::with_seeds(
        0x2d35_8dcc_aa6c_78a5,
        0x9e37_79b9_7f4a_7c15,
        0x517c_c1b7_2722_0a95,
        0x6c62_272e_07bb_0142,
    )
    .build_hasher();
    value.hash(&mut hasher);
    Fingerprint(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_equal_states_equal_fingerprints() {
        let a = (1i64, vec![2i64, 3]);
        let b = (1i64, vec![2i64, 3]);
        let c = (1i64, vec![3i64, 2]);

        assert_eq!(fingerprint_of(&a), fingerprint_of(&b));
        assert_ne!(fingerprint_of(&a), fingerprint_of(&c));
    }

    #[test]
    fn test_set_states_ignore_insertion_order() {
        let mut a = BTreeSet::new();
        a.insert(("d1", "c_a"));
        a.insert(("d2", "c_b"));

        let mut b = BTreeSet::new();
        b.insert(("d2", "c_b"));
        b.insert(("d1", "c_a"));

        assert_eq!(fingerprint_of(&a), fingerprint_of(&b));
    }

    #[test]
    fn test_display_is_hex() {
        let fp = Fingerprint::from_u64(0xdead_beef);
        assert_eq!(fp.to_string(), "00000000deadbeef");
        assert_eq!(fp.as_u64(), 0xdead_beef);
    }
}
